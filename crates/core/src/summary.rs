//! Display summaries extracted from raw FHIR resources.
//!
//! Resources are consumed as opaque JSON: each summary pulls out a handful
//! of optional fields with chained access and substitutes a literal
//! fallback when a field (or any object on the way to it) is missing or
//! has the wrong type. No schema validation happens here.

use std::fmt;

use serde_json::Value as JsonValue;

/// Follow a path of object keys, yielding the string at the end.
fn text_at<'a>(resource: &'a JsonValue, path: &[&str]) -> Option<&'a str> {
    let mut current = resource;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str()
}

/// String at `path`, or the fallback literal.
fn text_or<'a>(resource: &'a JsonValue, path: &[&str], fallback: &'a str) -> &'a str {
    text_at(resource, path).unwrap_or(fallback)
}

/// Patient demographics for the list and detail views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub birth_date: String,
}

impl PatientSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            id: text_or(resource, &["id"], "unknown").to_string(),
            name: format_patient_name(resource),
            gender: text_or(resource, &["gender"], "N/A").to_string(),
            birth_date: text_or(resource, &["birthDate"], "Unknown").to_string(),
        }
    }

    /// Detail header line shown above the clinical sections.
    pub fn detail_line(&self) -> String {
        format!(
            "Name: {} | Gender: {} | Birth: {} | ID: {}",
            self.name, self.gender, self.birth_date, self.id
        )
    }
}

impl fmt::Display for PatientSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Gender: {} | ID: {}", self.name, self.gender, self.id)
    }
}

/// `name[0].given` joined with spaces plus `name[0].family`, trimmed.
fn format_patient_name(resource: &JsonValue) -> String {
    let name = resource.get("name").and_then(|n| n.get(0));

    let given = name
        .and_then(|n| n.get("given"))
        .and_then(|g| g.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    let family = name.and_then(|n| text_at(n, &["family"])).unwrap_or("");

    let full = format!("{given} {family}");
    let full = full.trim();
    if full.is_empty() {
        "Unknown name".to_string()
    } else {
        full.to_string()
    }
}

/// Observation: coded test plus quantity value and effective date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationSummary {
    pub code: String,
    pub value: String,
    pub date: String,
}

impl ObservationSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            code: text_or(resource, &["code", "text"], "No description").to_string(),
            value: format_quantity(resource.get("valueQuantity")),
            date: text_or(resource, &["effectiveDateTime"], "No date").to_string(),
        }
    }
}

impl fmt::Display for ObservationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Value: {} | Date: {}", self.code, self.value, self.date)
    }
}

/// `valueQuantity.value` followed by its unit when present.
///
/// The value keeps the server's JSON number formatting (no float
/// round-tripping), the unit is optional.
fn format_quantity(quantity: Option<&JsonValue>) -> String {
    let Some(value) = quantity.and_then(|q| q.get("value")).and_then(|v| v.as_number()) else {
        return "No value".to_string();
    };
    let unit = quantity.and_then(|q| text_at(q, &["unit"])).unwrap_or("");
    format!("{value} {unit}").trim().to_string()
}

/// Encounter: visit type, status, start date, and facility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterSummary {
    pub kind: String,
    pub status: String,
    pub start: String,
    pub facility: String,
}

impl EncounterSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        let kind = resource
            .get("type")
            .and_then(|t| t.get(0))
            .and_then(|t| text_at(t, &["text"]))
            .unwrap_or("Unknown type");

        Self {
            kind: kind.to_string(),
            status: text_or(resource, &["status"], "No status").to_string(),
            start: text_or(resource, &["period", "start"], "No date").to_string(),
            facility: text_or(
                resource,
                &["serviceProvider", "display"],
                "Facility not specified",
            )
            .to_string(),
        }
    }
}

impl fmt::Display for EncounterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Status: {} | Date: {} | Facility: {}",
            self.kind, self.status, self.start, self.facility
        )
    }
}

/// Condition: diagnosis code, clinical status, onset date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSummary {
    pub code: String,
    pub status: String,
    pub onset: String,
}

impl ConditionSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            code: text_or(resource, &["code", "text"], "Condition not specified").to_string(),
            status: text_or(resource, &["clinicalStatus", "text"], "No status").to_string(),
            onset: text_or(resource, &["onsetDateTime"], "Unknown date").to_string(),
        }
    }
}

impl fmt::Display for ConditionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Status: {} | Onset: {}",
            self.code, self.status, self.onset
        )
    }
}

/// MedicationRequest: medication, status, authored date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationSummary {
    pub medication: String,
    pub status: String,
    pub authored: String,
}

impl MedicationSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            medication: text_or(
                resource,
                &["medicationCodeableConcept", "text"],
                "Medication not specified",
            )
            .to_string(),
            status: text_or(resource, &["status"], "No status").to_string(),
            authored: text_or(resource, &["authoredOn"], "Unknown date").to_string(),
        }
    }
}

impl fmt::Display for MedicationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Status: {} | Authored: {}",
            self.medication, self.status, self.authored
        )
    }
}

/// AllergyIntolerance: allergen code and clinical status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllergySummary {
    pub code: String,
    pub status: String,
}

impl AllergySummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            code: text_or(resource, &["code", "text"], "No description").to_string(),
            status: text_or(resource, &["clinicalStatus", "text"], "N/A").to_string(),
        }
    }
}

impl fmt::Display for AllergySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Status: {}", self.code, self.status)
    }
}

/// Immunization: vaccine and occurrence date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmunizationSummary {
    pub vaccine: String,
    pub date: String,
}

impl ImmunizationSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            vaccine: text_or(resource, &["vaccineCode", "text"], "Unknown vaccine").to_string(),
            date: text_or(resource, &["occurrenceDateTime"], "N/A").to_string(),
        }
    }
}

impl fmt::Display for ImmunizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Date: {}", self.vaccine, self.date)
    }
}

/// DiagnosticReport: report title, status, effective date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub code: String,
    pub status: String,
    pub date: String,
}

impl ReportSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            code: text_or(resource, &["code", "text"], "Untitled").to_string(),
            status: text_or(resource, &["status"], "N/A").to_string(),
            date: text_or(resource, &["effectiveDateTime"], "N/A").to_string(),
        }
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Status: {} | Date: {}", self.code, self.status, self.date)
    }
}

/// Procedure: procedure code, status, performed date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureSummary {
    pub code: String,
    pub status: String,
    pub date: String,
}

impl ProcedureSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            code: text_or(resource, &["code", "text"], "No procedure").to_string(),
            status: text_or(resource, &["status"], "N/A").to_string(),
            date: text_or(resource, &["performedDateTime"], "N/A").to_string(),
        }
    }
}

impl fmt::Display for ProcedureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | Status: {} | Date: {}", self.code, self.status, self.date)
    }
}

/// CarePlan: title, status, period start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarePlanSummary {
    pub title: String,
    pub status: String,
    pub date: String,
}

impl CarePlanSummary {
    pub fn from_resource(resource: &JsonValue) -> Self {
        Self {
            title: text_or(resource, &["title"], "Untitled plan").to_string(),
            status: text_or(resource, &["status"], "N/A").to_string(),
            date: text_or(resource, &["period", "start"], "N/A").to_string(),
        }
    }
}

impl fmt::Display for CarePlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Status: {} | Date: {}",
            self.title, self.status, self.date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn patient_full_fields() {
        let resource = json!({
            "resourceType": "Patient",
            "id": "592911",
            "name": [{"given": ["Ana", "Maria"], "family": "Lopez"}],
            "gender": "female",
            "birthDate": "1987-03-14"
        });

        let summary = PatientSummary::from_resource(&resource);
        assert_eq!(summary.name, "Ana Maria Lopez");
        assert_eq!(
            summary.detail_line(),
            "Name: Ana Maria Lopez | Gender: female | Birth: 1987-03-14 | ID: 592911"
        );
        assert_eq!(
            summary.to_string(),
            "Ana Maria Lopez | Gender: female | ID: 592911"
        );
    }

    #[test]
    fn patient_missing_everything_gets_fallbacks() {
        let resource = json!({"resourceType": "Patient"});
        let summary = PatientSummary::from_resource(&resource);
        assert_eq!(summary.id, "unknown");
        assert_eq!(summary.name, "Unknown name");
        assert_eq!(summary.gender, "N/A");
        assert_eq!(summary.birth_date, "Unknown");
    }

    #[test]
    fn patient_name_without_given_or_family() {
        // An empty HumanName trims down to nothing, which falls back too
        let resource = json!({"id": "7", "name": [{"use": "official"}]});
        assert_eq!(PatientSummary::from_resource(&resource).name, "Unknown name");

        let family_only = json!({"id": "7", "name": [{"family": "Okafor"}]});
        assert_eq!(PatientSummary::from_resource(&family_only).name, "Okafor");
    }

    #[test]
    fn observation_with_quantity() {
        let resource = json!({
            "code": {"text": "Body Weight"},
            "valueQuantity": {"value": 72.4, "unit": "kg"},
            "effectiveDateTime": "2023-09-02"
        });

        let summary = ObservationSummary::from_resource(&resource);
        assert_eq!(
            summary.to_string(),
            "Body Weight | Value: 72.4 kg | Date: 2023-09-02"
        );
    }

    #[test]
    fn observation_quantity_without_unit_and_integer_value() {
        let resource = json!({
            "code": {"text": "Heart rate"},
            "valueQuantity": {"value": 72}
        });

        let summary = ObservationSummary::from_resource(&resource);
        assert_eq!(summary.value, "72");
        assert_eq!(summary.date, "No date");
    }

    #[test]
    fn observation_without_quantity_falls_back() {
        let resource = json!({"valueString": "positive"});
        let summary = ObservationSummary::from_resource(&resource);
        assert_eq!(summary.code, "No description");
        assert_eq!(summary.value, "No value");
    }

    #[test]
    fn encounter_fields_and_fallbacks() {
        let resource = json!({
            "type": [{"text": "Ambulatory visit"}],
            "status": "finished",
            "period": {"start": "2022-11-05T09:00:00Z"},
            "serviceProvider": {"display": "General Hospital"}
        });
        assert_eq!(
            EncounterSummary::from_resource(&resource).to_string(),
            "Ambulatory visit | Status: finished | Date: 2022-11-05T09:00:00Z | Facility: General Hospital"
        );

        let empty = EncounterSummary::from_resource(&json!({}));
        assert_eq!(
            empty.to_string(),
            "Unknown type | Status: No status | Date: No date | Facility: Facility not specified"
        );
    }

    #[test]
    fn condition_fallbacks() {
        let summary = ConditionSummary::from_resource(&json!({}));
        assert_eq!(
            summary.to_string(),
            "Condition not specified | Status: No status | Onset: Unknown date"
        );
    }

    #[test]
    fn medication_fields() {
        let resource = json!({
            "medicationCodeableConcept": {"text": "Metformin 500mg"},
            "status": "active",
            "authoredOn": "2021-06-30"
        });
        assert_eq!(
            MedicationSummary::from_resource(&resource).to_string(),
            "Metformin 500mg | Status: active | Authored: 2021-06-30"
        );
    }

    #[test]
    fn allergy_and_immunization_fallbacks() {
        assert_eq!(
            AllergySummary::from_resource(&json!({})).to_string(),
            "No description | Status: N/A"
        );
        assert_eq!(
            ImmunizationSummary::from_resource(&json!({})).to_string(),
            "Unknown vaccine | Date: N/A"
        );
    }

    #[test]
    fn report_procedure_careplan_fields() {
        let report = json!({"code": {"text": "CBC panel"}, "status": "final"});
        assert_eq!(
            ReportSummary::from_resource(&report).to_string(),
            "CBC panel | Status: final | Date: N/A"
        );

        let procedure = json!({"performedDateTime": "2020-01-15"});
        assert_eq!(
            ProcedureSummary::from_resource(&procedure).to_string(),
            "No procedure | Status: N/A | Date: 2020-01-15"
        );

        let plan = json!({"title": "Diabetes management", "period": {"start": "2024-02-01"}});
        assert_eq!(
            CarePlanSummary::from_resource(&plan).to_string(),
            "Diabetes management | Status: N/A | Date: 2024-02-01"
        );
    }

    #[test]
    fn wrong_typed_fields_fall_back() {
        // gender as a number, name as an object: every access fails closed
        let resource = json!({"id": 42, "gender": 3, "name": {"family": "X"}});
        let summary = PatientSummary::from_resource(&resource);
        assert_eq!(summary.id, "unknown");
        assert_eq!(summary.gender, "N/A");
        assert_eq!(summary.name, "Unknown name");
    }
}
