//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: control-plane HTTP calls,
//! process execution, SSH, filesystem access, and asset lookup.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod assets;
pub mod command_runner;
pub mod config;
pub mod ssh;
pub mod webfaction;
pub mod xmlrpc;
