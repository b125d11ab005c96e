//! Client configuration

const DEFAULT_BASE_URL: &str = "https://hapi.fhir.org/baseR4";
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables
pub struct Config {
    pub base_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("FHIR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            page_size: std::env::var("FHIRVIEW_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE),
            timeout_secs: std::env::var("FHIRVIEW_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
