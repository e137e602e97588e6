//! Command implementations

pub mod apps;
pub mod bootstrap_git;
pub mod check;
pub mod config;
pub mod init;
pub mod link;
pub mod methods;
pub mod provision;
pub mod teardown;
pub mod version;
pub mod websites;
