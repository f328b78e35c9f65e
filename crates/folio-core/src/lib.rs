#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for configuration resolution.
///
/// Use this target for logging option application and absorbed parameter
/// values.
pub const TRACING_TARGET_CONFIG: &str = "folio_core::config";

mod config;
mod page;
mod params;

pub use crate::config::{PageConfig, default_limit, set_default_limit};
pub use crate::page::Page;
pub use crate::params::{ParamNames, ParamSource};
