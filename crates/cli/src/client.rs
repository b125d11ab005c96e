//! HTTP client for the FHIR R4 REST API
//!
//! Thin wrapper over reqwest: build a URL, GET it, check the status, decode
//! the body. Non-2xx responses are reported with the server's
//! OperationOutcome diagnostics when the body carries any.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use fhirview_core::{Bundle, FhirError, OperationOutcome, Result};

use crate::config::Config;

/// Clinical resource types fetched for a patient's record, in section order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Observation,
    Encounter,
    Condition,
    MedicationRequest,
    AllergyIntolerance,
    Immunization,
    DiagnosticReport,
    Procedure,
    CarePlan,
}

impl ResourceType {
    /// All section resource types in display order.
    pub const ALL: [ResourceType; 9] = [
        ResourceType::Observation,
        ResourceType::Encounter,
        ResourceType::Condition,
        ResourceType::MedicationRequest,
        ResourceType::AllergyIntolerance,
        ResourceType::Immunization,
        ResourceType::DiagnosticReport,
        ResourceType::Procedure,
        ResourceType::CarePlan,
    ];

    /// REST path segment for this resource type.
    pub fn path(self) -> &'static str {
        match self {
            ResourceType::Observation => "Observation",
            ResourceType::Encounter => "Encounter",
            ResourceType::Condition => "Condition",
            ResourceType::MedicationRequest => "MedicationRequest",
            ResourceType::AllergyIntolerance => "AllergyIntolerance",
            ResourceType::Immunization => "Immunization",
            ResourceType::DiagnosticReport => "DiagnosticReport",
            ResourceType::Procedure => "Procedure",
            ResourceType::CarePlan => "CarePlan",
        }
    }

    /// Search parameter that filters this type by patient reference.
    ///
    /// AllergyIntolerance and Immunization use the `patient` parameter, the
    /// rest use `subject`.
    pub fn search_param(self) -> &'static str {
        match self {
            ResourceType::AllergyIntolerance | ResourceType::Immunization => "patient",
            _ => "subject",
        }
    }

    /// Whether the list query is capped with `_count`.
    pub fn paginated(self) -> bool {
        matches!(
            self,
            ResourceType::Observation
                | ResourceType::Encounter
                | ResourceType::Condition
                | ResourceType::MedicationRequest
        )
    }

    /// Section heading for the record view.
    pub fn section_title(self) -> &'static str {
        match self {
            ResourceType::Observation => "Observations",
            ResourceType::Encounter => "Encounters",
            ResourceType::Condition => "Conditions",
            ResourceType::MedicationRequest => "Medications",
            ResourceType::AllergyIntolerance => "Allergies",
            ResourceType::Immunization => "Immunizations",
            ResourceType::DiagnosticReport => "Diagnostic reports",
            ResourceType::Procedure => "Procedures",
            ResourceType::CarePlan => "Care plans",
        }
    }

    /// Placeholder shown when the section has no entries.
    pub fn empty_message(self) -> &'static str {
        match self {
            ResourceType::Observation => "No observations available.",
            ResourceType::Encounter => "No encounters available.",
            ResourceType::Condition => "No conditions available.",
            ResourceType::MedicationRequest => "No medications available.",
            ResourceType::AllergyIntolerance => "No allergies recorded.",
            ResourceType::Immunization => "No immunizations recorded.",
            ResourceType::DiagnosticReport => "No diagnostic reports.",
            ResourceType::Procedure => "No procedures recorded.",
            ResourceType::CarePlan => "No care plans.",
        }
    }
}

/// One page of patient search results
#[derive(Debug)]
pub struct PatientPage {
    pub patients: Vec<JsonValue>,
    /// Server-supplied next-page URL; `None` on the last page.
    pub next: Option<String>,
}

/// Client for a FHIR R4 server
#[derive(Clone)]
pub struct FhirClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl FhirClient {
    /// Create a client from the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FhirError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// Search patients, optionally filtered by name.
    pub async fn search_patients(&self, name: Option<&str>) -> Result<PatientPage> {
        let url = self.search_url(name);
        self.fetch_page(&url).await
    }

    /// Follow a server-supplied next link. The cursor is opaque to us.
    pub async fn fetch_page(&self, url: &str) -> Result<PatientPage> {
        let bundle: Bundle = self.get_json(url).await?;
        let next = bundle.next_link().map(String::from);
        Ok(PatientPage {
            patients: bundle.into_resources(),
            next,
        })
    }

    /// Read a single patient by id.
    pub async fn read_patient(&self, id: &str) -> Result<JsonValue> {
        let url = format!("{}/Patient/{}", self.base_url, urlencoding::encode(id));
        self.get_json(&url)
            .await
            .map_err(|err| patient_read_error(id, err))
    }

    /// List clinical resources of one type for a patient.
    pub async fn list_for_patient(
        &self,
        resource: ResourceType,
        patient_id: &str,
    ) -> Result<Vec<JsonValue>> {
        let url = self.resource_url(resource, patient_id);
        let bundle: Bundle = self.get_json(&url).await?;
        Ok(bundle.into_resources())
    }

    fn search_url(&self, name: Option<&str>) -> String {
        let mut url = format!("{}/Patient?_count={}", self.base_url, self.page_size);
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            url.push_str("&name=");
            url.push_str(&urlencoding::encode(name));
        }
        url
    }

    fn resource_url(&self, resource: ResourceType, patient_id: &str) -> String {
        let mut url = format!(
            "{}/{}?{}=Patient/{}",
            self.base_url,
            resource.path(),
            resource.search_param(),
            urlencoding::encode(patient_id)
        );
        if resource.paginated() {
            url.push_str(&format!("&_count={}", self.page_size));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FhirError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let diagnostics = OperationOutcome::from_body(&body)
                .and_then(|o| o.first_diagnostics().map(String::from));
            return Err(FhirError::Status {
                status: status.as_u16(),
                diagnostics,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FhirError::Http(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Map a 404 on `Patient/{id}` to `NotFound`; other errors pass through.
fn patient_read_error(id: &str, err: FhirError) -> FhirError {
    match err {
        FhirError::Status { status: 404, .. } => FhirError::NotFound(format!("Patient/{id}")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FhirClient {
        FhirClient::new(&Config::default()).unwrap()
    }

    #[test]
    fn search_url_without_name() {
        assert_eq!(
            client().search_url(None),
            "https://hapi.fhir.org/baseR4/Patient?_count=10"
        );
    }

    #[test]
    fn search_url_encodes_name() {
        assert_eq!(
            client().search_url(Some("van der Berg")),
            "https://hapi.fhir.org/baseR4/Patient?_count=10&name=van%20der%20Berg"
        );
    }

    #[test]
    fn blank_name_is_treated_as_no_filter() {
        assert_eq!(
            client().search_url(Some("   ")),
            "https://hapi.fhir.org/baseR4/Patient?_count=10"
        );
    }

    #[test]
    fn subject_filtered_types_carry_count() {
        assert_eq!(
            client().resource_url(ResourceType::Observation, "592911"),
            "https://hapi.fhir.org/baseR4/Observation?subject=Patient/592911&_count=10"
        );
        assert_eq!(
            client().resource_url(ResourceType::MedicationRequest, "592911"),
            "https://hapi.fhir.org/baseR4/MedicationRequest?subject=Patient/592911&_count=10"
        );
    }

    #[test]
    fn patient_filtered_types_are_uncapped() {
        assert_eq!(
            client().resource_url(ResourceType::AllergyIntolerance, "592911"),
            "https://hapi.fhir.org/baseR4/AllergyIntolerance?patient=Patient/592911"
        );
        assert_eq!(
            client().resource_url(ResourceType::Immunization, "592911"),
            "https://hapi.fhir.org/baseR4/Immunization?patient=Patient/592911"
        );
    }

    #[test]
    fn subject_filtered_unpaginated_types() {
        assert_eq!(
            client().resource_url(ResourceType::CarePlan, "592911"),
            "https://hapi.fhir.org/baseR4/CarePlan?subject=Patient/592911"
        );
        assert_eq!(
            client().resource_url(ResourceType::DiagnosticReport, "592911"),
            "https://hapi.fhir.org/baseR4/DiagnosticReport?subject=Patient/592911"
        );
    }

    #[test]
    fn missing_patient_maps_to_not_found() {
        let err = patient_read_error(
            "592911",
            FhirError::Status {
                status: 404,
                diagnostics: Some("Resource Patient/592911 is not known".into()),
            },
        );
        assert!(matches!(err, FhirError::NotFound(ref msg) if msg == "Patient/592911"));
    }

    #[test]
    fn other_read_errors_pass_through() {
        let err = patient_read_error(
            "592911",
            FhirError::Status {
                status: 500,
                diagnostics: None,
            },
        );
        assert!(matches!(err, FhirError::Status { status: 500, .. }));

        let err = patient_read_error("592911", FhirError::Http("timed out".into()));
        assert!(matches!(err, FhirError::Http(_)));
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let config = Config {
            base_url: "https://example.org/fhir/".into(),
            ..Config::default()
        };
        let client = FhirClient::new(&config).unwrap();
        assert_eq!(
            client.search_url(None),
            "https://example.org/fhir/Patient?_count=10"
        );
    }
}
