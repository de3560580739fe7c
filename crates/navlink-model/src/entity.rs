//! Entity references
//!
//! An [`EntityReference`] is what a rendered mention carries: the kind of the
//! target, its identifier, the scope it lives in, and optional git/version
//! context.

use crate::error::ModelError;
use crate::non_empty;
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Kind of entity a reference points at
///
/// Serialized with the platform's wire names (`"Pipelines"`, `"Connectors"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// Connector
    Connectors,
    /// Service
    Service,
    /// Template
    Template,
    /// Pipeline
    Pipelines,
    /// Secret
    Secrets,
    /// Environment
    Environment,
    /// Environment group
    EnvironmentGroup,
    /// Infrastructure definition (owned by an environment)
    Infrastructure,
    /// Monitored service
    MonitoredService,
    /// Trigger (owned by a pipeline)
    Triggers,
    /// Anything the resolver does not know how to route
    Unknown,
}

impl EntityType {
    /// All routable types, in declaration order
    pub const ALL: [EntityType; 10] = [
        EntityType::Connectors,
        EntityType::Service,
        EntityType::Template,
        EntityType::Pipelines,
        EntityType::Secrets,
        EntityType::Environment,
        EntityType::EnvironmentGroup,
        EntityType::Infrastructure,
        EntityType::MonitoredService,
        EntityType::Triggers,
    ];

    /// Wire name used by the platform
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connectors => "Connectors",
            Self::Service => "Service",
            Self::Template => "Template",
            Self::Pipelines => "Pipelines",
            Self::Secrets => "Secrets",
            Self::Environment => "Environment",
            Self::EnvironmentGroup => "EnvironmentGroup",
            Self::Infrastructure => "Infrastructure",
            Self::MonitoredService => "MonitoredService",
            Self::Triggers => "Triggers",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether routing this type needs a storage metadata lookup
    #[inline]
    #[must_use]
    pub const fn requires_lookup(self) -> bool {
        matches!(self, Self::Pipelines | Self::Triggers | Self::Template)
    }
}

impl FromStr for EntityType {
    type Err = std::convert::Infallible;

    /// Case-insensitive; accepts singular and plural spellings.
    /// Unrecognized names parse as [`EntityType::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        Ok(match normalized.as_str() {
            "connector" | "connectors" => Self::Connectors,
            "service" | "services" => Self::Service,
            "template" | "templates" => Self::Template,
            "pipeline" | "pipelines" => Self::Pipelines,
            "secret" | "secrets" => Self::Secrets,
            "environment" | "environments" => Self::Environment,
            "environmentgroup" | "environmentgroups" => Self::EnvironmentGroup,
            "infrastructure" | "infrastructures" => Self::Infrastructure,
            "monitoredservice" | "monitoredservices" => Self::MonitoredService,
            "trigger" | "triggers" => Self::Triggers,
            _ => Self::Unknown,
        })
    }
}

impl From<String> for EntityType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<EntityType> for String {
    fn from(value: EntityType) -> Self {
        value.as_str().to_string()
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an entity from some other view
///
/// Immutable once built. Optional fields given as empty strings are treated
/// as absent by the accessors. Deserialization runs the same checks as
/// [`EntityReference::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawEntityReference")]
pub struct EntityReference {
    /// Kind of target
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Unique key within `scope`
    pub identifier: String,
    /// Tenancy scope
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_identifier: Option<String>,
}

/// Wire form of [`EntityReference`] before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntityReference {
    #[serde(rename = "type")]
    entity_type: EntityType,
    identifier: String,
    scope: Scope,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    version_label: Option<String>,
    #[serde(default)]
    parent_identifier: Option<String>,
}

impl TryFrom<RawEntityReference> for EntityReference {
    type Error = ModelError;

    fn try_from(raw: RawEntityReference) -> Result<Self, Self::Error> {
        let mut reference = Self::new(raw.entity_type, raw.identifier, raw.scope)?;
        reference.branch = raw.branch;
        reference.version_label = raw.version_label;
        reference.parent_identifier = raw.parent_identifier;
        Ok(reference)
    }
}

impl EntityReference {
    /// Create a new reference
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyIdentifier`] for an empty identifier.
    pub fn new(
        entity_type: EntityType,
        identifier: impl Into<String>,
        scope: Scope,
    ) -> Result<Self, ModelError> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(ModelError::EmptyIdentifier);
        }
        Ok(Self {
            entity_type,
            identifier,
            scope,
            branch: None,
            version_label: None,
            parent_identifier: None,
        })
    }

    /// With git branch context
    #[inline]
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// With template version label
    #[inline]
    #[must_use]
    pub fn with_version_label(mut self, version_label: impl Into<String>) -> Self {
        self.version_label = Some(version_label.into());
        self
    }

    /// With owning entity (pipeline for a trigger, environment for an infra)
    #[inline]
    #[must_use]
    pub fn with_parent(mut self, parent_identifier: impl Into<String>) -> Self {
        self.parent_identifier = Some(parent_identifier.into());
        self
    }

    /// Git branch, if non-empty
    #[inline]
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        non_empty(self.branch.as_deref())
    }

    /// Template version label, if non-empty
    #[inline]
    #[must_use]
    pub fn version_label(&self) -> Option<&str> {
        non_empty(self.version_label.as_deref())
    }

    /// Owning entity identifier, if non-empty
    #[inline]
    #[must_use]
    pub fn parent_identifier(&self) -> Option<&str> {
        non_empty(self.parent_identifier.as_deref())
    }
}
