pub mod auth;
pub mod error_handler;
pub mod method_override;
pub mod not_found;
pub mod session;
