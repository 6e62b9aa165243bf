use crate::infra::{open_workflow, parse_status};
use chrono::{Duration, Local};
use clap::Args;
use std::path::PathBuf;
use tenant_screening::config::{AppConfig, ScreeningConfig};
use tenant_screening::error::AppError;
use tenant_screening::workflows::screening::{
    ApplicantDetails, Application, ApplicationId, ApplicationStatus, BackgroundCheck,
    CreditCheck, EmploymentDetails, EmploymentVerification, HouseholdComposition, KeyValueStore,
    NewApplication, ReferenceCheck, ReportStatus, ScoreBreakdown, ScreeningResults,
    ScreeningUpdate, ScreeningWorkflow, VerificationStatus, DEFAULT_INCOME_MULTIPLIER,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Name recorded as the reviewer on demo decisions
    #[arg(long, default_value = "demo-manager")]
    pub(crate) reviewer: String,
    /// Income requirement as a multiple of monthly rent
    #[arg(long)]
    pub(crate) income_multiplier: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Directory of the JSON file store (defaults to SCREENING_STORAGE_DIR)
    #[arg(long)]
    pub(crate) storage_dir: Option<PathBuf>,
    /// Only list applications for this property
    #[arg(long)]
    pub(crate) property: Option<String>,
    /// Only list applications in this status (pending, under_review, approved, rejected)
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<ApplicationStatus>,
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let ListArgs {
        storage_dir,
        property,
        status,
    } = args;

    let mut screening = AppConfig::load()?.screening;
    if storage_dir.is_some() {
        screening.storage_dir = storage_dir;
    }
    let workflow = open_workflow(&screening)?;
    println!("Store: {}", workflow.store().describe());

    let applications = workflow.find_applications(property.as_deref(), status);
    if applications.is_empty() {
        println!("No applications found");
        return Ok(());
    }

    for application in applications {
        render_summary_line(application);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        reviewer,
        income_multiplier,
    } = args;

    let config = ScreeningConfig {
        storage_dir: None,
        income_multiplier: income_multiplier.unwrap_or(DEFAULT_INCOME_MULTIPLIER),
    };
    let mut workflow = open_workflow(&config)?;

    println!("Tenant screening demo");
    println!(
        "Income requirement: {:.1}x monthly rent",
        workflow.income_multiplier()
    );

    let strong = workflow.add_application(demo_candidate(
        "Jordan Avery",
        "jordan.avery@example.com",
        5400.0,
    ));
    let thin = workflow.add_application(demo_candidate(
        "Casey Morgan",
        "casey.morgan@example.com",
        3200.0,
    ));

    workflow.mark_under_review(&strong);
    workflow.update_screening(&strong, strong_screening());
    workflow.record_income_verification(&strong);

    workflow.mark_under_review(&thin);
    workflow.update_screening(&thin, thin_screening());
    workflow.record_income_verification(&thin);

    for id in [&strong, &thin] {
        render_breakdown(&workflow, id);
    }

    workflow.approve_application(&strong, &reviewer);
    workflow.reject_application(&thin, &reviewer, "income below requirement");

    println!("\nDecisions");
    for application in workflow.applications() {
        render_summary_line(application);
    }

    Ok(())
}

fn render_breakdown<S: KeyValueStore>(workflow: &ScreeningWorkflow<S>, id: &ApplicationId) {
    let (Some(application), Some(breakdown)) =
        (workflow.get_application_by_id(id), workflow.score_breakdown(id))
    else {
        return;
    };

    println!(
        "\n{} ({}), unit {} at {}",
        application.applicant.full_name, application.id, application.unit_id, application.property_id
    );
    render_components(&breakdown);
}

fn render_components(breakdown: &ScoreBreakdown) {
    for component in &breakdown.components {
        println!(
            "- {:?}: {:.1}/{:.0} ({})",
            component.category, component.earned, component.possible, component.notes
        );
    }
    println!("Overall score: {}/100", breakdown.overall_score);
}

fn render_summary_line(application: &Application) {
    let reviewer = application
        .reviewed_by
        .as_deref()
        .map(|name| format!(", reviewed by {name}"))
        .unwrap_or_default();
    println!(
        "- {} | {} | {} | score {} | submitted {}{}",
        application.id,
        application.applicant.full_name,
        application.status.label(),
        application.overall_score(),
        application.submitted_at.format("%Y-%m-%d %H:%M"),
        reviewer
    );
}

fn demo_candidate(full_name: &str, email: &str, monthly_income: f64) -> NewApplication {
    NewApplication {
        property_id: "prop-riverfront".to_string(),
        unit_id: "A-201".to_string(),
        applicant: ApplicantDetails {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: "515-555-0100".to_string(),
            date_of_birth: None,
        },
        employment: EmploymentDetails {
            employer: "Riverfront Health".to_string(),
            position: "Coordinator".to_string(),
            monthly_income,
            years_employed: 3.0,
        },
        household: HouseholdComposition {
            adults: 1,
            children: 0,
            pets: 0,
        },
        monthly_rent: 1450.0,
        desired_move_in: Some(Local::now().date_naive() + Duration::days(21)),
        screening: ScreeningResults::default(),
    }
}

fn reference(name: &str, contacted: bool, rating: Option<u8>) -> ReferenceCheck {
    ReferenceCheck {
        name: name.to_string(),
        relationship: "Former landlord".to_string(),
        phone: "515-555-0188".to_string(),
        contacted,
        rating,
        notes: None,
    }
}

fn strong_screening() -> ScreeningUpdate {
    ScreeningUpdate {
        credit_check: Some(CreditCheck {
            status: ReportStatus::Completed,
            score: Some(762),
            report_date: Some(Local::now().date_naive()),
        }),
        background_check: Some(BackgroundCheck {
            status: ReportStatus::Completed,
            criminal_record: false,
            eviction_history: false,
        }),
        employment_verification: Some(EmploymentVerification {
            status: VerificationStatus::Verified,
            verified: true,
        }),
        references: Some(vec![
            reference("Morgan Lee", true, Some(5)),
            reference("Sam Ortiz", true, Some(4)),
        ]),
        ..ScreeningUpdate::default()
    }
}

fn thin_screening() -> ScreeningUpdate {
    ScreeningUpdate {
        credit_check: Some(CreditCheck {
            status: ReportStatus::Completed,
            score: Some(618),
            report_date: Some(Local::now().date_naive()),
        }),
        background_check: Some(BackgroundCheck {
            status: ReportStatus::Pending,
            ..BackgroundCheck::default()
        }),
        references: Some(vec![
            reference("Dana Fox", true, Some(3)),
            reference("Lee Park", false, None),
        ]),
        ..ScreeningUpdate::default()
    }
}
