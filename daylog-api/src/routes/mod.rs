/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login endpoint
/// - `accounts`: Admin account management
/// - `log_heads`: Log head management and member-facing listings
/// - `log_contents`: Dated entries under log heads
/// - `user`: The authenticated account's own profile
pub mod accounts;
pub mod auth;
pub mod health;
pub mod log_contents;
pub mod log_heads;
pub mod user;
