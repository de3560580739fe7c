//! Hierarchical tenancy scope
//!
//! Every entity lives under an account, optionally narrowed to an organization
//! and then a project. A project is never addressable without its org.

use crate::error::ModelError;
use crate::non_empty;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Depth of a [`Scope`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeLevel {
    /// Account-wide
    Account,
    /// Organization within an account
    Org,
    /// Project within an organization
    Project,
}

/// Account / org / project scope of an entity
///
/// Deserialization runs the same checks as [`Scope::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawScope")]
pub struct Scope {
    account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_id: Option<String>,
}

/// Wire form of [`Scope`] before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScope {
    account_id: String,
    #[serde(default)]
    org_id: Option<String>,
    #[serde(default)]
    project_id: Option<String>,
}

impl TryFrom<RawScope> for Scope {
    type Error = ModelError;

    fn try_from(raw: RawScope) -> Result<Self, Self::Error> {
        Self::from_parts(raw.account_id, raw.org_id, raw.project_id)
    }
}

impl Scope {
    /// Account-level scope
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyAccount`] when `account_id` is empty.
    pub fn account(account_id: impl Into<String>) -> Result<Self, ModelError> {
        let account_id = account_id.into();
        if account_id.is_empty() {
            return Err(ModelError::EmptyAccount);
        }
        Ok(Self {
            account_id,
            org_id: None,
            project_id: None,
        })
    }

    /// Organization-level scope
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyAccount`] when `account_id` is empty.
    pub fn org(
        account_id: impl Into<String>,
        org_id: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::from_parts(account_id, Some(org_id.into()), None)
    }

    /// Project-level scope
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyAccount`] when `account_id` is empty.
    pub fn project(
        account_id: impl Into<String>,
        org_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Self::from_parts(account_id, Some(org_id.into()), Some(project_id.into()))
    }

    /// Build a scope from optional parts, as they arrive from route params
    ///
    /// Empty org/project strings count as absent.
    ///
    /// # Errors
    /// - [`ModelError::EmptyAccount`] for an empty account
    /// - [`ModelError::ProjectWithoutOrg`] when a project has no org
    pub fn from_parts(
        account_id: impl Into<String>,
        org_id: Option<String>,
        project_id: Option<String>,
    ) -> Result<Self, ModelError> {
        let mut scope = Self::account(account_id)?;
        let org_id = org_id.filter(|o| !o.is_empty());
        let project_id = project_id.filter(|p| !p.is_empty());

        if let (None, Some(project)) = (&org_id, &project_id) {
            return Err(ModelError::ProjectWithoutOrg {
                project: project.clone(),
            });
        }

        scope.org_id = org_id;
        scope.project_id = project_id;
        Ok(scope)
    }

    /// Account identifier
    #[inline]
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Organization identifier, if any
    #[inline]
    #[must_use]
    pub fn org_id(&self) -> Option<&str> {
        non_empty(self.org_id.as_deref())
    }

    /// Project identifier, if any
    #[inline]
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        non_empty(self.project_id.as_deref())
    }

    /// How deep this scope goes
    #[must_use]
    pub fn level(&self) -> ScopeLevel {
        match (self.org_id(), self.project_id()) {
            (Some(_), Some(_)) => ScopeLevel::Project,
            (Some(_), None) => ScopeLevel::Org,
            _ => ScopeLevel::Account,
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.account_id)?;
        if let Some(org) = self.org_id() {
            write!(f, "/{org}")?;
        }
        if let Some(project) = self.project_id() {
            write!(f, "/{project}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_levels() {
        assert_eq!(Scope::account("a").unwrap().level(), ScopeLevel::Account);
        assert_eq!(Scope::org("a", "o").unwrap().level(), ScopeLevel::Org);
        assert_eq!(
            Scope::project("a", "o", "p").unwrap().level(),
            ScopeLevel::Project
        );
    }

    #[test]
    fn empty_parts_are_absent() {
        let scope = Scope::from_parts("a", Some(String::new()), None).unwrap();
        assert_eq!(scope.level(), ScopeLevel::Account);
        assert_eq!(scope.org_id(), None);
    }

    #[test]
    fn project_requires_org() {
        let err = Scope::from_parts("a", None, Some("p".into())).unwrap_err();
        assert_eq!(
            err,
            ModelError::ProjectWithoutOrg {
                project: "p".into()
            }
        );
    }

    #[test]
    fn empty_account_rejected() {
        assert_eq!(Scope::account("").unwrap_err(), ModelError::EmptyAccount);
    }

    #[test]
    fn deserialize_validates_parts() {
        let scope: Scope =
            serde_json::from_str(r#"{"accountId":"a","orgId":"o","projectId":"p"}"#).unwrap();
        assert_eq!(scope, Scope::project("a", "o", "p").unwrap());

        let empty_account = serde_json::from_str::<Scope>(r#"{"accountId":""}"#).unwrap_err();
        assert!(empty_account.to_string().contains("account identifier"));

        let orphan_project =
            serde_json::from_str::<Scope>(r#"{"accountId":"a","projectId":"p"}"#).unwrap_err();
        assert!(orphan_project.to_string().contains("requires an organization"));
    }

    #[test]
    fn scope_display() {
        let scope = Scope::project("a", "o", "p").unwrap();
        assert_eq!(scope.to_string(), "a/o/p");
    }
}
