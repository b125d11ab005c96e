//! Patient record assembly
//!
//! A record is the patient's demographics plus up to nine clinical
//! sections. Section fetches run concurrently and are allowed to fail
//! independently: a failed section is logged and omitted, an empty one is
//! kept with a placeholder line.

use serde_json::Value as JsonValue;

use fhirview_core::{
    AllergySummary, CarePlanSummary, ConditionSummary, EncounterSummary, ImmunizationSummary,
    MedicationSummary, ObservationSummary, PatientSummary, ProcedureSummary, ReportSummary, Result,
};

use crate::client::{FhirClient, ResourceType};

/// One titled section of the record view
#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    pub items: Vec<String>,
}

impl Section {
    fn new(kind: ResourceType, resources: &[JsonValue]) -> Self {
        let items = if resources.is_empty() {
            vec![kind.empty_message().to_string()]
        } else {
            resources.iter().map(|r| summarize(kind, r)).collect()
        };
        Self {
            title: kind.section_title(),
            items,
        }
    }
}

/// Fully assembled patient record
#[derive(Debug, Clone)]
pub struct PatientRecord {
    pub patient: PatientSummary,
    pub sections: Vec<Section>,
}

/// Reduce one resource to its display line.
fn summarize(kind: ResourceType, resource: &JsonValue) -> String {
    match kind {
        ResourceType::Observation => ObservationSummary::from_resource(resource).to_string(),
        ResourceType::Encounter => EncounterSummary::from_resource(resource).to_string(),
        ResourceType::Condition => ConditionSummary::from_resource(resource).to_string(),
        ResourceType::MedicationRequest => MedicationSummary::from_resource(resource).to_string(),
        ResourceType::AllergyIntolerance => AllergySummary::from_resource(resource).to_string(),
        ResourceType::Immunization => ImmunizationSummary::from_resource(resource).to_string(),
        ResourceType::DiagnosticReport => ReportSummary::from_resource(resource).to_string(),
        ResourceType::Procedure => ProcedureSummary::from_resource(resource).to_string(),
        ResourceType::CarePlan => CarePlanSummary::from_resource(resource).to_string(),
    }
}

/// Fetch the full record for a patient.
///
/// The detail read must succeed; the nine section fetches run concurrently
/// and settle independently, matching the behavior of loading the record
/// view section by section.
pub async fn fetch_record(client: &FhirClient, patient_id: &str) -> Result<PatientRecord> {
    let patient = client.read_patient(patient_id).await?;
    let patient = PatientSummary::from_resource(&patient);

    let [obs, enc, cond, med, allergy, imm, report, proc_, plan] = ResourceType::ALL;
    let results = tokio::join!(
        client.list_for_patient(obs, patient_id),
        client.list_for_patient(enc, patient_id),
        client.list_for_patient(cond, patient_id),
        client.list_for_patient(med, patient_id),
        client.list_for_patient(allergy, patient_id),
        client.list_for_patient(imm, patient_id),
        client.list_for_patient(report, patient_id),
        client.list_for_patient(proc_, patient_id),
        client.list_for_patient(plan, patient_id),
    );
    let results = [
        results.0, results.1, results.2, results.3, results.4, results.5, results.6, results.7,
        results.8,
    ];

    Ok(PatientRecord {
        patient,
        sections: build_sections(results),
    })
}

/// Assemble the section list from the settled per-type fetch results.
///
/// A failed fetch drops its section; the survivors keep display order.
fn build_sections(results: [Result<Vec<JsonValue>>; 9]) -> Vec<Section> {
    let mut sections = Vec::with_capacity(ResourceType::ALL.len());
    for (kind, result) in ResourceType::ALL.into_iter().zip(results) {
        match result {
            Ok(resources) => sections.push(Section::new(kind, &resources)),
            Err(err) => {
                tracing::warn!(resource = kind.path(), error = %err, "section fetch failed, omitting");
            }
        }
    }
    sections
}
