//! Navigation mode selection

use crate::legacy::LegacyRoutes;
use crate::table::RouteTable;
use crate::v2::V2Routes;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Which navigation experience to build URLs for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavMode {
    /// Module-based navigation
    #[default]
    Legacy,
    /// Unified navigation
    V2,
}

impl NavMode {
    /// Build the route table for this mode
    #[must_use]
    pub fn route_table(self, options: RouteOptions) -> Arc<dyn RouteTable> {
        match self {
            Self::Legacy => Arc::new(LegacyRoutes::new(options)),
            Self::V2 => Arc::new(V2Routes::new(options)),
        }
    }
}

impl Display for NavMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

/// Unrecognized navigation mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown navigation mode: '{0}' (expected 'legacy' or 'v2')")]
pub struct ParseNavModeError(pub String);

impl FromStr for NavMode {
    type Err = ParseNavModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" | "old" => Ok(Self::Legacy),
            "v2" | "new" => Ok(Self::V2),
            _ => Err(ParseNavModeError(s.to_string())),
        }
    }
}

/// Settings shared by both route tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    /// Prefix prepended to every path (`""` or e.g. `/ng`)
    pub base_path: String,
    /// Module segment used by legacy project routes
    pub module: String,
}

impl RouteOptions {
    /// With base path; a trailing `/` is dropped
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        self.base_path = base_path.trim_end_matches('/').to_string();
        self
    }

    /// With legacy module segment
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            module: "cd".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nav_mode() {
        assert_eq!("legacy".parse::<NavMode>().unwrap(), NavMode::Legacy);
        assert_eq!("V2".parse::<NavMode>().unwrap(), NavMode::V2);
        assert!("sideways".parse::<NavMode>().is_err());
    }

    #[test]
    fn route_table_matches_mode() {
        for mode in [NavMode::Legacy, NavMode::V2] {
            assert_eq!(mode.route_table(RouteOptions::default()).nav_mode(), mode);
        }
    }

    #[test]
    fn base_path_trailing_slash_dropped() {
        let options = RouteOptions::default().with_base_path("/ng/");
        assert_eq!(options.base_path, "/ng");
    }
}
