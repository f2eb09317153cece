//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod user_rules;
pub mod user_validator;

// Re-exports
pub use config::{AuthConfig, HmacKey};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use user_validator::UserValidator;
