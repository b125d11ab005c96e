//! fhirview-core: Shared FHIR R4 types and utilities
//!
//! This crate provides the types the client reads off the wire: the Bundle
//! search envelope, OperationOutcome error payloads, and the per-resource
//! display summaries with their fallback defaults.

pub mod bundle;
pub mod error;
pub mod outcome;
pub mod summary;

// Re-export our types
pub use bundle::{Bundle, BundleEntry, BundleLink, BundleType};
pub use error::{FhirError, Result};
pub use outcome::{IssueSeverity, IssueType, OperationOutcome, OperationOutcomeIssue};
pub use summary::{
    AllergySummary, CarePlanSummary, ConditionSummary, EncounterSummary, ImmunizationSummary,
    MedicationSummary, ObservationSummary, PatientSummary, ProcedureSummary, ReportSummary,
};
