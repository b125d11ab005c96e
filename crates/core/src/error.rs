use thiserror::Error;

/// Result type alias used across the workspace
pub type Result<T> = std::result::Result<T, FhirError>;

/// FHIR client error types
#[derive(Debug, Error)]
pub enum FhirError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Server returned {status}: {}", .diagnostics.as_deref().unwrap_or("no diagnostics"))]
    Status {
        status: u16,
        diagnostics: Option<String>,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation error: {0}")]
    Pdf(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_diagnostics_when_present() {
        let err = FhirError::Status {
            status: 400,
            diagnostics: Some("Unknown search parameter".into()),
        };
        assert_eq!(
            err.to_string(),
            "Server returned 400: Unknown search parameter"
        );

        let bare = FhirError::Status {
            status: 502,
            diagnostics: None,
        };
        assert_eq!(bare.to_string(), "Server returned 502: no diagnostics");
    }
}
