use serde::{Deserialize, Serialize};

/// Severity of the issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Fatal,
    Error,
    Warning,
    Information,
}

/// Type of issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Invalid,
    Structure,
    Required,
    Value,
    Invariant,
    Security,
    Login,
    Unknown,
    Expired,
    Forbidden,
    Suppressed,
    Processing,
    NotSupported,
    Duplicate,
    NotFound,
    TooLong,
    CodeInvalid,
    Extension,
    TooCostly,
    BusinessRule,
    Conflict,
    Incomplete,
    Transient,
    LockError,
    NoStore,
    Exception,
    Timeout,
    Throttled,
    Informational,
}

/// FHIR OperationOutcome resource, as returned by servers on failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub resource_type: String,

    #[serde(default)]
    pub issue: Vec<OperationOutcomeIssue>,
}

/// Single issue within an OperationOutcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcomeIssue {
    pub severity: IssueSeverity,
    pub code: IssueType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

impl OperationOutcome {
    /// Best-effort parse of an error response body.
    ///
    /// Servers are not obliged to return an OperationOutcome (proxies and
    /// gateways often answer with HTML or plain text), so anything that is
    /// not one yields `None`.
    pub fn from_body(body: &str) -> Option<Self> {
        let outcome: Self = serde_json::from_str(body).ok()?;
        if outcome.resource_type == "OperationOutcome" {
            Some(outcome)
        } else {
            None
        }
    }

    /// Diagnostics text of the first issue, if any issue carries one.
    pub fn first_diagnostics(&self) -> Option<&str> {
        self.issue
            .iter()
            .find_map(|issue| issue.diagnostics.as_deref())
    }
}
