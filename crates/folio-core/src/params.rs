//! Configuration from external key-value parameter sources.
//!
//! A [`ParamSource`] is anything that can answer "the first value for this
//! key, if present", typically the query parameters of an inbound HTTP
//! request. [`PageConfig::with_params`] reads up to three named parameters
//! from such a source and applies them through the regular options, so
//! malformed input degrades to "value unchanged" rather than an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;
use crate::config::PageConfig;

/// External key-value source of pagination parameters.
///
/// Implementations report the first value associated with a key; an absent
/// key yields `None`. Repeated keys are expected; only the first value
/// counts.
pub trait ParamSource {
    /// Returns the first value associated with `key`, if the key is
    /// present at all.
    fn first_value(&self, key: &str) -> Option<&str>;
}

impl<P: ParamSource + ?Sized> ParamSource for &P {
    fn first_value(&self, key: &str) -> Option<&str> {
        (**self).first_value(key)
    }
}

impl ParamSource for HashMap<String, String> {
    fn first_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<K, V> ParamSource for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn first_value(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(name, _)| name.as_ref() == key)
            .map(|(_, value)| value.as_ref())
    }
}

impl<K, V> ParamSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn first_value(&self, key: &str) -> Option<&str> {
        self.as_slice().first_value(key)
    }
}

/// Names of the parameters read from a [`ParamSource`].
///
/// A name configured as the empty string disables that parameter: it is
/// never looked up in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamNames {
    /// Name of the page number parameter.
    pub page: String,
    /// Name of the page size parameter.
    pub limit: String,
    /// Name of the comma-separated order parameter.
    pub order: String,
}

impl ParamNames {
    /// Creates a set of parameter names.
    pub fn new(
        page: impl Into<String>,
        limit: impl Into<String>,
        order: impl Into<String>,
    ) -> Self {
        Self {
            page: page.into(),
            limit: limit.into(),
            order: order.into(),
        }
    }
}

impl Default for ParamNames {
    fn default() -> Self {
        Self::new("page", "limit", "order")
    }
}

impl PageConfig {
    /// Returns a configuration refined from a parameter source using the
    /// default parameter names `page`, `limit` and `order`.
    pub fn with_params<P>(self, params: &P) -> Self
    where
        P: ParamSource + ?Sized,
    {
        self.with_params_named(params, &ParamNames::default())
    }

    /// Returns a configuration refined from a parameter source.
    ///
    /// Page and limit values are parsed as integers and applied through
    /// [`PageConfig::with_page`] and [`PageConfig::with_limit`]; a value
    /// that fails to parse is absorbed and the previously configured value
    /// stays intact. The order value is split on commas and applied through
    /// [`PageConfig::with_order`]; a blank order value leaves the order
    /// list unchanged.
    pub fn with_params_named<P>(mut self, params: &P, names: &ParamNames) -> Self
    where
        P: ParamSource + ?Sized,
    {
        if !names.page.is_empty() {
            if let Some(value) = params.first_value(&names.page) {
                match value.parse::<i64>() {
                    Ok(page) => self = self.with_page(page),
                    Err(_) => tracing::debug!(
                        target: TRACING_TARGET_CONFIG,
                        value,
                        "Ignoring non-numeric page parameter"
                    ),
                }
            }
        }

        if !names.limit.is_empty() {
            if let Some(value) = params.first_value(&names.limit) {
                match value.parse::<i64>() {
                    Ok(limit) => self = self.with_limit(limit),
                    Err(_) => tracing::debug!(
                        target: TRACING_TARGET_CONFIG,
                        value,
                        "Ignoring non-numeric limit parameter"
                    ),
                }
            }
        }

        if !names.order.is_empty() {
            if let Some(value) = params.first_value(&names.order) {
                let value = value.trim();
                if !value.is_empty() {
                    self = self.with_order(value.split(','));
                }
            }
        }

        self
    }
}
