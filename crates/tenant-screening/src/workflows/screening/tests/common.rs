use std::io;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::screening::domain::{
    ApplicantDetails, BackgroundCheck, CreditCheck, EmploymentDetails, EmploymentVerification,
    HouseholdComposition, IncomeVerification, NewApplication, ReferenceCheck, RentalHistoryCheck,
    ReportStatus, ScreeningResults, VerificationStatus,
};
use crate::workflows::screening::storage::{KeyValueStore, MemoryStore, StorageError};
use crate::workflows::screening::{screening_router, ScreeningWorkflow, SharedWorkflow};

pub(super) fn submission() -> NewApplication {
    NewApplication {
        property_id: "prop-riverfront".to_string(),
        unit_id: "A-201".to_string(),
        applicant: ApplicantDetails {
            full_name: "Jordan Avery".to_string(),
            email: "jordan.avery@example.com".to_string(),
            phone: "515-555-0142".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1991, 4, 12),
        },
        employment: EmploymentDetails {
            employer: "Des Moines Health".to_string(),
            position: "Nurse".to_string(),
            monthly_income: 5200.0,
            years_employed: 4.5,
        },
        household: HouseholdComposition {
            adults: 1,
            children: 1,
            pets: 0,
        },
        monthly_rent: 1500.0,
        desired_move_in: NaiveDate::from_ymd_opt(2025, 10, 1),
        screening: ScreeningResults::default(),
    }
}

pub(super) fn submission_for(property_id: &str) -> NewApplication {
    let mut submission = submission();
    submission.property_id = property_id.to_string();
    submission
}

pub(super) fn reference(contacted: bool, rating: Option<u8>) -> ReferenceCheck {
    ReferenceCheck {
        name: "Morgan Lee".to_string(),
        relationship: "Former landlord".to_string(),
        phone: "515-555-0199".to_string(),
        contacted,
        rating,
        notes: None,
    }
}

pub(super) fn completed_credit(score: u16) -> CreditCheck {
    CreditCheck {
        status: ReportStatus::Completed,
        score: Some(score),
        report_date: NaiveDate::from_ymd_opt(2025, 9, 20),
    }
}

/// Every sub-check maximally satisfied.
pub(super) fn excellent_screening() -> ScreeningResults {
    ScreeningResults {
        credit_check: completed_credit(780),
        background_check: BackgroundCheck {
            status: ReportStatus::Completed,
            criminal_record: false,
            eviction_history: false,
        },
        employment_verification: EmploymentVerification {
            status: VerificationStatus::Verified,
            verified: true,
        },
        references: vec![reference(true, Some(5))],
        income_verification: IncomeVerification {
            status: VerificationStatus::Verified,
            verified: true,
            meets_requirement: true,
        },
        rental_history: RentalHistoryCheck {
            status: VerificationStatus::Verified,
            previous_landlords: vec!["Riverfront Lofts".to_string()],
            notes: None,
        },
    }
}

pub(super) fn screening_with_credit(score: u16) -> ScreeningResults {
    let mut screening = excellent_screening();
    screening.credit_check = completed_credit(score);
    screening
}

/// Store whose writes always fail, to observe fire-and-forget persistence.
#[derive(Default)]
pub(super) struct FailingStore;

impl KeyValueStore for FailingStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(io::Error::new(
            io::ErrorKind::Other,
            "disk detached",
        )))
    }
}

pub(super) fn shared_workflow() -> SharedWorkflow<MemoryStore> {
    Arc::new(Mutex::new(ScreeningWorkflow::in_memory()))
}

pub(super) fn router_with(workflow: SharedWorkflow<MemoryStore>) -> axum::Router {
    screening_router(workflow)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
