//! End-to-end screening scenarios driven through the public workflow facade and HTTP router.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use tenant_screening::workflows::screening::{
    screening_router, ApplicantDetails, ApplicationStatus, BackgroundCheck, CreditCheck,
    EmploymentDetails, EmploymentVerification, HouseholdComposition, JsonFileStore,
    NewApplication, ReferenceCheck, ReportStatus, ScreeningResults, ScreeningUpdate,
    ScreeningWorkflow, VerificationStatus,
};

fn candidate(property_id: &str, monthly_income: f64) -> NewApplication {
    NewApplication {
        property_id: property_id.to_string(),
        unit_id: "3B".to_string(),
        applicant: ApplicantDetails {
            full_name: "Riley Chen".to_string(),
            email: "riley.chen@example.com".to_string(),
            phone: "319-555-0107".to_string(),
            date_of_birth: None,
        },
        employment: EmploymentDetails {
            employer: "Cedar Logistics".to_string(),
            position: "Dispatcher".to_string(),
            monthly_income,
            years_employed: 2.0,
        },
        household: HouseholdComposition {
            adults: 2,
            children: 0,
            pets: 1,
        },
        monthly_rent: 1250.0,
        desired_move_in: NaiveDate::from_ymd_opt(2025, 11, 1),
        screening: ScreeningResults::default(),
    }
}

fn landlord_reference(rating: u8) -> ReferenceCheck {
    ReferenceCheck {
        name: "Pat Quinn".to_string(),
        relationship: "Landlord".to_string(),
        phone: "319-555-0150".to_string(),
        contacted: true,
        rating: Some(rating),
        notes: Some("paid on time".to_string()),
    }
}

#[test]
fn screening_progresses_from_intake_to_approval() {
    let mut workflow = ScreeningWorkflow::in_memory();
    let id = workflow.add_application(candidate("prop-cedar", 4000.0));
    assert_eq!(
        workflow.get_application_by_id(&id).map(|app| app.overall_score()),
        Some(0)
    );

    assert!(workflow.mark_under_review(&id));
    assert!(workflow.update_screening(
        &id,
        ScreeningUpdate {
            credit_check: Some(CreditCheck {
                status: ReportStatus::Completed,
                score: Some(702),
                report_date: NaiveDate::from_ymd_opt(2025, 10, 2),
            }),
            references: Some(vec![landlord_reference(4)]),
            ..ScreeningUpdate::default()
        },
    ));
    // 25 credit + 16 references
    assert_eq!(workflow.calculate_overall_score(&id), Some(41));

    assert!(workflow.record_income_verification(&id));
    assert!(workflow.update_screening(
        &id,
        ScreeningUpdate {
            background_check: Some(BackgroundCheck {
                status: ReportStatus::Completed,
                criminal_record: false,
                eviction_history: false,
            }),
            employment_verification: Some(EmploymentVerification {
                status: VerificationStatus::Verified,
                verified: true,
            }),
            ..ScreeningUpdate::default()
        },
    ));
    assert_eq!(workflow.calculate_overall_score(&id), Some(91));

    assert!(workflow.approve_application(&id, "mgr1"));
    let approved = workflow.get_application_by_id(&id).expect("record kept");
    assert_eq!(approved.status, ApplicationStatus::Approved);
    assert_eq!(approved.overall_score(), 91);
    assert_eq!(
        workflow
            .get_applications_by_status(ApplicationStatus::UnderReview)
            .len(),
        0
    );
}

#[test]
fn file_backed_workflow_survives_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut workflow =
        ScreeningWorkflow::open(JsonFileStore::new(dir.path())).expect("opens empty dir");
    let kept = workflow.add_application(candidate("prop-cedar", 3000.0));
    let removed = workflow.add_application(candidate("prop-elm", 3000.0));
    assert!(workflow.record_income_verification(&kept));
    assert!(workflow.delete_application(&removed));
    let store = workflow.dispose();

    let reopened = ScreeningWorkflow::open(store).expect("reopens");
    assert_eq!(reopened.applications().len(), 1);
    let restored = reopened.get_application_by_id(&kept).expect("kept record");
    // 3000 against 3 x 1250 rent misses the requirement
    assert!(!restored.screening.income_verification.meets_requirement);
    assert_eq!(restored.overall_score(), 15);
    assert!(reopened.get_application_by_id(&removed).is_none());
}

#[tokio::test]
async fn router_drives_review_decision() {
    let workflow = Arc::new(Mutex::new(ScreeningWorkflow::in_memory()));
    let router = screening_router(workflow.clone());

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/screening/applications")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&candidate("prop-cedar", 5000.0)).expect("serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    let created: Value = serde_json::from_slice(&body).expect("json payload");
    let id = created["id"].as_str().expect("id").to_string();

    let response = router
        .oneshot(
            Request::post(format!("/api/v1/screening/applications/{id}/approve"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "reviewed_by": "mgr1" }).to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let guard = workflow.lock().expect("workflow mutex poisoned");
    let approved = guard.get_applications_by_status(ApplicationStatus::Approved);
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].reviewed_by.as_deref(), Some("mgr1"));
}
