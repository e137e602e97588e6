//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;

#[allow(unused_imports)]
pub use config::{GitConfig, SlipwayConfig, valid_app_name};
#[allow(unused_imports)]
pub use error::{ApiError, BootstrapError, ConfigError, ProvisionError};
