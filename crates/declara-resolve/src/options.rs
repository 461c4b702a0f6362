use serde::{Deserialize, Serialize};

/// What the resolver does when a statement fails to resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// The first error aborts the whole resolution.
    #[default]
    Abort,
    /// The offending statement is left out and its error is recorded in the
    /// `skipped` list of the result for the scope it occurred in.
    SkipStatement,
}

/// Resolver settings, deserializable from a host's TOML configuration:
///
/// ```toml
/// error-policy = "skip-statement"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverOptions {
    pub error_policy: ErrorPolicy,
}

impl ResolverOptions {
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}
