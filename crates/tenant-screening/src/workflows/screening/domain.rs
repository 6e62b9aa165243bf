use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Review status of an application. Approve and reject are accepted from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub const fn is_decided(self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }
}

/// Contact details supplied by the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

/// Declared employment and income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentDetails {
    pub employer: String,
    pub position: String,
    pub monthly_income: f64,
    pub years_employed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdComposition {
    pub adults: u8,
    pub children: u8,
    pub pets: u8,
}

/// Status of a report pulled from a bureau (credit, background).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

/// Status of a check confirmed with a third party (employer, income, landlords).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Failed,
    NotRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreditCheck {
    pub status: ReportStatus,
    /// Bureau score, conventionally 300 to 850.
    #[serde(default)]
    pub score: Option<u16>,
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackgroundCheck {
    pub status: ReportStatus,
    #[serde(default)]
    pub criminal_record: bool,
    #[serde(default)]
    pub eviction_history: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmploymentVerification {
    pub status: VerificationStatus,
    #[serde(default)]
    pub verified: bool,
}

/// A personal or landlord reference and the outcome of contacting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCheck {
    pub name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub contacted: bool,
    /// 1 to 5 once the reference has been contacted.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeVerification {
    pub status: VerificationStatus,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub meets_requirement: bool,
}

impl IncomeVerification {
    /// A verified income check whose requirement flag compares income against `multiplier` times rent.
    pub fn assessed(monthly_income: f64, monthly_rent: f64, multiplier: f64) -> Self {
        Self {
            status: VerificationStatus::Verified,
            verified: true,
            meets_requirement: monthly_income >= monthly_rent * multiplier,
        }
    }
}

/// Informational only; does not contribute to the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RentalHistoryCheck {
    pub status: VerificationStatus,
    #[serde(default)]
    pub previous_landlords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Aggregate of the six screening sub-checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreeningResults {
    #[serde(default)]
    pub credit_check: CreditCheck,
    #[serde(default)]
    pub background_check: BackgroundCheck,
    #[serde(default)]
    pub employment_verification: EmploymentVerification,
    #[serde(default)]
    pub references: Vec<ReferenceCheck>,
    #[serde(default)]
    pub income_verification: IncomeVerification,
    #[serde(default)]
    pub rental_history: RentalHistoryCheck,
}

impl ScreeningResults {
    /// Replace every sub-check present in `update`, keeping the others.
    pub fn merge(&mut self, update: ScreeningUpdate) {
        let ScreeningUpdate {
            credit_check,
            background_check,
            employment_verification,
            references,
            income_verification,
            rental_history,
        } = update;

        if let Some(check) = credit_check {
            self.credit_check = check;
        }
        if let Some(check) = background_check {
            self.background_check = check;
        }
        if let Some(check) = employment_verification {
            self.employment_verification = check;
        }
        if let Some(list) = references {
            self.references = list;
        }
        if let Some(check) = income_verification {
            self.income_verification = check;
        }
        if let Some(check) = rental_history {
            self.rental_history = check;
        }
    }
}

/// Partial screening payload; each present sub-check replaces the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreeningUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_check: Option<CreditCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_check: Option<BackgroundCheck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_verification: Option<EmploymentVerification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<ReferenceCheck>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_verification: Option<IncomeVerification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_history: Option<RentalHistoryCheck>,
}

/// Payload accepted from the application form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewApplication {
    pub property_id: String,
    pub unit_id: String,
    pub applicant: ApplicantDetails,
    pub employment: EmploymentDetails,
    pub household: HouseholdComposition,
    pub monthly_rent: f64,
    #[serde(default)]
    pub desired_move_in: Option<NaiveDate>,
    #[serde(default)]
    pub screening: ScreeningResults,
}

/// Field-wise update. The id, submission time, and overall score are not updatable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant: Option<ApplicantDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment: Option<EmploymentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household: Option<HouseholdComposition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_move_in: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screening: Option<ScreeningResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Stored application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub property_id: String,
    pub unit_id: String,
    pub status: ApplicationStatus,
    pub applicant: ApplicantDetails,
    pub employment: EmploymentDetails,
    pub household: HouseholdComposition,
    pub monthly_rent: f64,
    #[serde(default)]
    pub desired_move_in: Option<NaiveDate>,
    pub screening: ScreeningResults,
    pub(crate) overall_score: u8,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Application {
    pub(crate) fn from_submission(
        id: ApplicationId,
        submitted_at: DateTime<Utc>,
        data: NewApplication,
    ) -> Self {
        Self {
            id,
            property_id: data.property_id,
            unit_id: data.unit_id,
            status: ApplicationStatus::Pending,
            applicant: data.applicant,
            employment: data.employment,
            household: data.household,
            monthly_rent: data.monthly_rent,
            desired_move_in: data.desired_move_in,
            screening: data.screening,
            overall_score: 0,
            submitted_at,
            reviewed_at: None,
            reviewed_by: None,
            notes: None,
        }
    }

    /// Weighted 0 to 100 score derived from the current screening results.
    pub fn overall_score(&self) -> u8 {
        self.overall_score
    }

    /// Apply every present field; returns whether screening was part of the update.
    pub(crate) fn apply(&mut self, update: ApplicationUpdate) -> bool {
        let ApplicationUpdate {
            property_id,
            unit_id,
            status,
            applicant,
            employment,
            household,
            monthly_rent,
            desired_move_in,
            screening,
            notes,
        } = update;

        if let Some(value) = property_id {
            self.property_id = value;
        }
        if let Some(value) = unit_id {
            self.unit_id = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = applicant {
            self.applicant = value;
        }
        if let Some(value) = employment {
            self.employment = value;
        }
        if let Some(value) = household {
            self.household = value;
        }
        if let Some(value) = monthly_rent {
            self.monthly_rent = value;
        }
        if let Some(value) = desired_move_in {
            self.desired_move_in = Some(value);
        }
        if let Some(value) = notes {
            self.notes = Some(value);
        }

        match screening {
            Some(value) => {
                self.screening = value;
                true
            }
            None => false,
        }
    }

    pub fn summary(&self) -> ApplicationSummaryView {
        ApplicationSummaryView {
            id: self.id.clone(),
            property_id: self.property_id.clone(),
            unit_id: self.unit_id.clone(),
            applicant_name: self.applicant.full_name.clone(),
            status: self.status.label(),
            overall_score: self.overall_score,
            submitted_at: self.submitted_at,
            reviewed_by: self.reviewed_by.clone(),
        }
    }
}

/// List-friendly projection of an application.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationSummaryView {
    pub id: ApplicationId,
    pub property_id: String,
    pub unit_id: String,
    pub applicant_name: String,
    pub status: &'static str,
    pub overall_score: u8,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
}
