pub mod attendance;
pub mod auth;
pub mod leave;
pub mod macros;
pub mod settings;
pub mod summary;
pub mod user;

// Re-export all models for easy importing
pub use attendance::*;
pub use auth::*;
pub use leave::*;
pub use settings::*;
pub use summary::*;
pub use user::*;
