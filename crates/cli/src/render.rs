//! Plain-text rendering for the terminal and the text export

use fhirview_core::PatientSummary;
use serde_json::Value as JsonValue;

use crate::record::PatientRecord;

/// Render one page of patient search results.
pub fn render_patient_list(patients: &[JsonValue], page: u32, has_more: bool) -> String {
    let mut out = format!("== Patients (page {page}) ==\n");

    if patients.is_empty() {
        out.push_str("No patients found.\n");
        return out;
    }

    for resource in patients {
        let summary = PatientSummary::from_resource(resource);
        out.push_str(&format!("  {summary}\n"));
    }

    if has_more {
        out.push_str("\n(more results available, pass --pages to fetch further pages)\n");
    }

    out
}

/// Render the full record: the detail line followed by each section.
///
/// The text export writes this output, followed by a generation stamp.
pub fn render_record(record: &PatientRecord) -> String {
    let mut out = record.patient.detail_line();
    out.push('\n');

    for section in &record.sections {
        out.push('\n');
        out.push_str(section.title);
        out.push('\n');
        for item in &section.items {
            out.push_str(&format!("  {item}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Section;
    use fhirview_core::PatientSummary;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_record() -> PatientRecord {
        PatientRecord {
            patient: PatientSummary {
                id: "592911".into(),
                name: "Ana Lopez".into(),
                gender: "female".into(),
                birth_date: "1987-03-14".into(),
            },
            sections: vec![
                Section {
                    title: "Observations",
                    items: vec![
                        "Body Weight | Value: 72.4 kg | Date: 2023-09-02".into(),
                        "Heart rate | Value: 72 | Date: No date".into(),
                    ],
                },
                Section {
                    title: "Allergies",
                    items: vec!["No allergies recorded.".into()],
                },
            ],
        }
    }

    #[test]
    fn record_rendering() {
        let expected = "\
Name: Ana Lopez | Gender: female | Birth: 1987-03-14 | ID: 592911

Observations
  Body Weight | Value: 72.4 kg | Date: 2023-09-02
  Heart rate | Value: 72 | Date: No date

Allergies
  No allergies recorded.
";
        assert_eq!(render_record(&sample_record()), expected);
    }

    #[test]
    fn list_rendering_with_next_page() {
        let patients = vec![json!({
            "id": "1",
            "name": [{"given": ["Ana"], "family": "Lopez"}],
            "gender": "female"
        })];

        let out = render_patient_list(&patients, 1, true);
        assert_eq!(
            out,
            "== Patients (page 1) ==\n  Ana Lopez | Gender: female | ID: 1\n\n(more results available, pass --pages to fetch further pages)\n"
        );
    }

    #[test]
    fn empty_list_rendering() {
        let out = render_patient_list(&[], 1, false);
        assert_eq!(out, "== Patients (page 1) ==\nNo patients found.\n");
    }
}
