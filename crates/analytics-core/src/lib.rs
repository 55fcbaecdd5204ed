//! # analytics-core
//!
//! Foundation crate for the analytics client. Contains the unified error
//! system, configuration schemas, and the clock / id-generator providers
//! that message builders consume.
//!
//! This crate has **no** internal dependencies on other analytics crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
