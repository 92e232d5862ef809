//! Shared plumbing for certificator crates.
//!
//! This crate provides centralized implementations for:
//! - Environment variable sources (process and in-memory)
//! - The deployment environment tag
//! - HTTP client configuration and building
//! - Tracing subscriber initialisation with JSON or logfmt output

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod env;
pub mod environment;
pub mod http;
pub mod tracing_config;

pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use environment::Environment;
pub use http::{HttpConfig, build_http_client};
pub use tracing_config::{LogFormat, TracingConfig, TracingError, init_tracing};
