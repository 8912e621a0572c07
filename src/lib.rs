//! bgnotify - glucose threshold alerting library
//!
//! This library evaluates glucose readings against a severity table and
//! delivers the resulting notifications through Pushover, including
//! emergency notifications that repeat until acknowledged.
//!
//! # Modules
//!
//! - [`alerts`]: Severity rules and threshold evaluation
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`pushover`]: Pushover key routing, message building, and delivery
//! - [`services`]: Business logic services

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod pushover;
pub mod services;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
