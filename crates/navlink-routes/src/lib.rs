//! navlink routes
//!
//! Two parallel route tables behind one trait:
//! - [`LegacyRoutes`]: module segment in the path (`/account/a/cd/orgs/...`)
//! - [`V2Routes`]: module-free paths with a trailing `mode=all` query parameter
//!
//! Pick one with [`NavMode::route_table`] when wiring the application; callers
//! then hold an `Arc<dyn RouteTable>` and never branch on the mode again.

#![warn(unreachable_pub)]

pub mod legacy;
pub mod mode;
pub mod query;
pub mod table;
pub mod v2;

pub use legacy::LegacyRoutes;
pub use mode::{NavMode, ParseNavModeError, RouteOptions};
pub use query::QueryString;
pub use table::{
    EnvironmentParams, GitRouteParams, PipelineStudioParams, RouteTable, TemplateStudioParams,
    TriggerDetailsParams, TriggerListParams,
};
pub use v2::V2Routes;

/// Module tag for monitored service pages
pub const MONITORING_MODULE: &str = "cv";

/// Query selecting the configuration tab of the service studio
pub const SERVICE_CONFIGURATION_TAB: &str = "configuration";

/// Section id selecting the infrastructure part of environment details
pub const INFRASTRUCTURE_SECTION: &str = "INFRASTRUCTURE";
