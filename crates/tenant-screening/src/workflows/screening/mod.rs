//! Rental application screening: intake records, six screening sub-checks, the weighted
//! overall score, and approve/reject review decisions.
//!
//! [`ScreeningWorkflow`] is the single owner of the collection. Every write that touches
//! screening rescores the record, so `Application::overall_score` never drifts from the
//! screening it was derived from.

pub mod domain;
pub mod router;
pub mod scoring;
pub mod storage;
mod workflow;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantDetails, Application, ApplicationId, ApplicationStatus, ApplicationSummaryView,
    ApplicationUpdate, BackgroundCheck, CreditCheck, EmploymentDetails, EmploymentVerification,
    HouseholdComposition, IncomeVerification, NewApplication, ReferenceCheck, RentalHistoryCheck,
    ReportStatus, ScreeningResults, ScreeningUpdate, VerificationStatus,
};
pub use router::{screening_router, SharedWorkflow};
pub use scoring::{ScoreBreakdown, ScoreComponent, ScreeningCategory};
pub use storage::{
    JsonFileStore, KeyValueStore, MemoryStore, StorageError, APPLICATIONS_KEY,
    SEQUENCE_KEY,
};
pub use workflow::{ScreeningWorkflow, DEFAULT_INCOME_MULTIPLIER};
