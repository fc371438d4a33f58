pub mod admin;
pub mod attendance;
pub mod auth;
pub mod export;
pub mod leave;
pub mod shared;
pub mod stats;

#[cfg(test)]
mod export_tests;
