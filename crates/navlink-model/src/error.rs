//! Error types for the navlink model

/// Errors raised while constructing references and scopes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Entity identifier was empty
    #[error("entity identifier must not be empty")]
    EmptyIdentifier,

    /// Account identifier was empty
    #[error("account identifier must not be empty")]
    EmptyAccount,

    /// A project scope was requested without an owning organization
    #[error("project '{project}' requires an organization")]
    ProjectWithoutOrg {
        /// Project identifier that had no org
        project: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_display() {
        let err = ModelError::ProjectWithoutOrg {
            project: "p1".to_string(),
        };
        assert!(err.to_string().contains("p1"));
        assert!(ModelError::EmptyIdentifier.to_string().contains("identifier"));
    }
}
