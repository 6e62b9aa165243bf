use super::super::domain::{
    BackgroundCheck, CreditCheck, EmploymentVerification, IncomeVerification, ReferenceCheck,
    ReportStatus, ScreeningResults, VerificationStatus,
};
use super::ScreeningCategory;

const MAX_REFERENCE_RATING: f64 = 5.0;

pub(crate) fn score_category(
    category: ScreeningCategory,
    screening: &ScreeningResults,
) -> (f64, String) {
    match category {
        ScreeningCategory::Credit => credit_points(&screening.credit_check),
        ScreeningCategory::Income => income_points(&screening.income_verification),
        ScreeningCategory::References => reference_points(&screening.references),
        ScreeningCategory::Background => background_points(&screening.background_check),
        ScreeningCategory::Employment => {
            employment_points(&screening.employment_verification)
        }
    }
}

fn credit_points(check: &CreditCheck) -> (f64, String) {
    match (check.status, check.score) {
        (ReportStatus::Completed, Some(score)) => {
            let points = match score {
                750..=u16::MAX => 30.0,
                700..=749 => 25.0,
                650..=699 => 20.0,
                600..=649 => 15.0,
                _ => 10.0,
            };
            (points, format!("credit score {score}"))
        }
        (ReportStatus::Completed, None) => (0.0, "credit report has no score".to_string()),
        (status, _) => (0.0, format!("credit check {}", report_label(status))),
    }
}

fn income_points(check: &IncomeVerification) -> (f64, String) {
    match check.status {
        VerificationStatus::Verified if check.meets_requirement => {
            (25.0, "income verified and meets requirement".to_string())
        }
        VerificationStatus::Verified => {
            (15.0, "income verified below requirement".to_string())
        }
        status => (0.0, format!("income verification {}", verification_label(status))),
    }
}

fn reference_points(references: &[ReferenceCheck]) -> (f64, String) {
    let contacted: Vec<&ReferenceCheck> = references
        .iter()
        .filter(|reference| reference.contacted)
        .collect();

    if contacted.is_empty() {
        return (0.0, "no references contacted".to_string());
    }

    // Unrated contacted references count as zero; ratings above the scale are capped.
    let total: f64 = contacted
        .iter()
        .map(|reference| {
            f64::from(reference.rating.unwrap_or(0)).min(MAX_REFERENCE_RATING)
        })
        .sum();
    let average = total / contacted.len() as f64;
    let points = average / MAX_REFERENCE_RATING * ScreeningCategory::References.max_points();

    (
        points,
        format!(
            "average rating {:.1} across {} contacted reference(s)",
            average,
            contacted.len()
        ),
    )
}

fn background_points(check: &BackgroundCheck) -> (f64, String) {
    if check.status != ReportStatus::Completed {
        return (
            0.0,
            format!("background check {}", report_label(check.status)),
        );
    }

    match (check.criminal_record, check.eviction_history) {
        (false, false) => (15.0, "no criminal or eviction record".to_string()),
        (true, false) => (10.0, "criminal record without eviction history".to_string()),
        (_, true) => (5.0, "eviction history on record".to_string()),
    }
}

fn employment_points(check: &EmploymentVerification) -> (f64, String) {
    match check.status {
        VerificationStatus::Verified => (10.0, "employment verified".to_string()),
        status => (
            0.0,
            format!("employment verification {}", verification_label(status)),
        ),
    }
}

fn report_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pending => "pending",
        ReportStatus::Completed => "completed",
        ReportStatus::Failed => "failed",
    }
}

fn verification_label(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Pending => "pending",
        VerificationStatus::Verified => "verified",
        VerificationStatus::Failed => "failed",
        VerificationStatus::NotRequired => "not required",
    }
}
