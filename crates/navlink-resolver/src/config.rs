//! Resolver configuration
//!
//! Loaded from TOML or built in code:
//!
//! ```toml
//! nav_mode = "v2"
//! base_path = "/ng"
//! failure_policy = "degrade"
//! lookup_timeout_ms = 5000
//!
//! [api]
//! base_url = "https://platform.example.com/gateway"
//! ```

use crate::error::ConfigError;
use navlink_routes::{NavMode, RouteOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What to do when a pipeline or trigger lookup fails outright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Link the list page instead, like template lookups do
    #[default]
    Degrade,
    /// Return the lookup error to the caller
    Propagate,
}

/// Lookup API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Gateway base URL the lookup paths are appended to
    pub base_url: String,
    /// Sent as `x-api-key` when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// HTTP client timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl ApiConfig {
    /// With base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With API key
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// HTTP client timeout
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8181/gateway".to_string(),
            api_key: None,
            request_timeout_ms: 30_000,
        }
    }
}

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Route table to build URLs with
    pub nav_mode: NavMode,
    /// Prefix for every route
    pub base_path: String,
    /// Module segment for legacy project routes
    pub module: String,
    /// Pipeline/trigger lookup failure handling
    pub failure_policy: FailurePolicy,
    /// Upper bound on a single lookup, in milliseconds
    pub lookup_timeout_ms: u64,
    /// Lookup API settings
    pub api: ApiConfig,
}

impl ResolverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With navigation mode
    #[inline]
    #[must_use]
    pub fn with_nav_mode(mut self, nav_mode: NavMode) -> Self {
        self.nav_mode = nav_mode;
        self
    }

    /// With base path
    #[inline]
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// With legacy module
    #[inline]
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// With failure policy
    #[inline]
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// With lookup timeout
    #[inline]
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With API settings
    #[inline]
    #[must_use]
    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Lookup timeout
    #[inline]
    #[must_use]
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// Options for the route table
    #[must_use]
    pub fn route_options(&self) -> RouteOptions {
        RouteOptions::default()
            .with_base_path(self.base_path.clone())
            .with_module(self.module.clone())
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module.trim().is_empty() {
            return Err(ConfigError::invalid("module", "must not be empty"));
        }
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(ConfigError::invalid(
                "base_path",
                format!("'{}' must start with '/'", self.base_path),
            ));
        }
        if self.lookup_timeout_ms == 0 {
            return Err(ConfigError::invalid("lookup_timeout_ms", "must be positive"));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("api.base_url", "must not be empty"));
        }
        if self.api.request_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "api.request_timeout_ms",
                "must be positive",
            ));
        }
        Ok(())
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`ResolverConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&source)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nav_mode: NavMode::Legacy,
            base_path: String::new(),
            module: "cd".to_string(),
            failure_policy: FailurePolicy::Degrade,
            lookup_timeout_ms: 10_000,
            api: ApiConfig::default(),
        }
    }
}
