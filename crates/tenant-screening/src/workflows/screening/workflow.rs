use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationUpdate, IncomeVerification,
    NewApplication, ScreeningUpdate,
};
use super::scoring::{overall_score, score_breakdown, ScoreBreakdown};
use super::storage::{KeyValueStore, MemoryStore, StorageError, APPLICATIONS_KEY, SEQUENCE_KEY};

/// Default monthly income requirement, as a multiple of monthly rent.
pub const DEFAULT_INCOME_MULTIPLIER: f64 = 3.0;

const ID_PREFIX: &str = "app-";

/// Owns the application collection and keeps every overall score in step with its screening.
///
/// Lookups by unknown id return `None` and mutators report `false`; nothing here fails except
/// reloading a corrupt collection in [`ScreeningWorkflow::open`]. Each mutation is written to
/// the store afterwards, and a failed write is logged rather than returned.
pub struct ScreeningWorkflow<S = MemoryStore> {
    applications: Vec<Application>,
    store: S,
    next_sequence: u64,
    income_multiplier: f64,
}

impl ScreeningWorkflow<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new(), Vec::new())
    }
}

impl<S: KeyValueStore> ScreeningWorkflow<S> {
    /// Reload the collection persisted in `store`, recomputing every score.
    ///
    /// Id generation resumes after the persisted sequence, or after the highest stored id
    /// when that is further along.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let applications = match store.load(APPLICATIONS_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<Application>>(&raw)?,
            None => Vec::new(),
        };
        let persisted_sequence = match store.load(SEQUENCE_KEY)? {
            Some(raw) => serde_json::from_str::<u64>(raw.trim())?,
            None => 1,
        };
        let mut workflow = Self::with_store(store, applications);
        workflow.next_sequence = workflow.next_sequence.max(persisted_sequence);
        for application in &mut workflow.applications {
            application.overall_score = overall_score(&application.screening);
        }
        info!(
            applications = workflow.applications.len(),
            next_sequence = workflow.next_sequence,
            "screening workflow opened"
        );
        Ok(workflow)
    }

    fn with_store(store: S, applications: Vec<Application>) -> Self {
        let next_sequence = applications
            .iter()
            .filter_map(|application| application.id.0.strip_prefix(ID_PREFIX))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .map_or(1, |highest| highest + 1);

        Self {
            applications,
            store,
            next_sequence,
            income_multiplier: DEFAULT_INCOME_MULTIPLIER,
        }
    }

    pub fn with_income_multiplier(mut self, multiplier: f64) -> Self {
        if multiplier.is_finite() && multiplier > 0.0 {
            self.income_multiplier = multiplier;
        }
        self
    }

    pub fn income_multiplier(&self) -> f64 {
        self.income_multiplier
    }

    /// Flush the collection one last time and hand the store back.
    pub fn dispose(self) -> S {
        self.persist();
        self.store
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_application(&mut self, data: NewApplication) -> ApplicationId {
        let id = self.next_application_id();
        let application = Application::from_submission(id.clone(), Utc::now(), data);
        self.applications.push(application);
        self.calculate_overall_score(&id);
        debug!(application_id = %id, "application added");
        id
    }

    pub fn update_application(&mut self, id: &ApplicationId, updates: ApplicationUpdate) -> bool {
        let Some(application) = self.find_mut(id) else {
            debug!(application_id = %id, "update ignored for unknown application");
            return false;
        };

        if application.apply(updates) {
            application.overall_score = overall_score(&application.screening);
        }
        debug!(application_id = %id, "application updated");
        self.persist();
        true
    }

    /// Merge sub-checks into the existing screening, then rescore.
    pub fn update_screening(&mut self, id: &ApplicationId, partial: ScreeningUpdate) -> bool {
        let Some(application) = self.get_application_by_id(id) else {
            return false;
        };

        let mut screening = application.screening.clone();
        screening.merge(partial);
        self.update_application(
            id,
            ApplicationUpdate {
                screening: Some(screening),
                ..ApplicationUpdate::default()
            },
        )
    }

    /// Verify income from the declared employment income and the unit's rent.
    pub fn record_income_verification(&mut self, id: &ApplicationId) -> bool {
        let Some(application) = self.get_application_by_id(id) else {
            return false;
        };

        let check = IncomeVerification::assessed(
            application.employment.monthly_income,
            application.monthly_rent,
            self.income_multiplier,
        );
        self.update_screening(
            id,
            ScreeningUpdate {
                income_verification: Some(check),
                ..ScreeningUpdate::default()
            },
        )
    }

    /// Rescore the current screening and store the result on the record.
    pub fn calculate_overall_score(&mut self, id: &ApplicationId) -> Option<u8> {
        let application = self.find_mut(id)?;
        let score = overall_score(&application.screening);
        application.overall_score = score;
        self.persist();
        Some(score)
    }

    pub fn score_breakdown(&self, id: &ApplicationId) -> Option<ScoreBreakdown> {
        self.get_application_by_id(id)
            .map(|application| score_breakdown(&application.screening))
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn get_application_by_id(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications
            .iter()
            .find(|application| &application.id == id)
    }

    pub fn get_applications_by_property(&self, property_id: &str) -> Vec<&Application> {
        self.applications
            .iter()
            .filter(|application| application.property_id == property_id)
            .collect()
    }

    pub fn get_applications_by_status(&self, status: ApplicationStatus) -> Vec<&Application> {
        self.applications
            .iter()
            .filter(|application| application.status == status)
            .collect()
    }

    /// Applications matching every filter given; no filters lists the whole collection.
    pub fn find_applications(
        &self,
        property_id: Option<&str>,
        status: Option<ApplicationStatus>,
    ) -> Vec<&Application> {
        match (property_id, status) {
            (Some(property_id), Some(status)) => {
                let in_status = self.get_applications_by_status(status);
                let mut matches = self.get_applications_by_property(property_id);
                matches.retain(|application| {
                    in_status
                        .iter()
                        .any(|candidate| std::ptr::eq(*candidate, *application))
                });
                matches
            }
            (Some(property_id), None) => self.get_applications_by_property(property_id),
            (None, Some(status)) => self.get_applications_by_status(status),
            (None, None) => self.applications.iter().collect(),
        }
    }

    pub fn mark_under_review(&mut self, id: &ApplicationId) -> bool {
        self.update_application(
            id,
            ApplicationUpdate {
                status: Some(ApplicationStatus::UnderReview),
                ..ApplicationUpdate::default()
            },
        )
    }

    pub fn approve_application(&mut self, id: &ApplicationId, reviewed_by: &str) -> bool {
        self.decide(id, ApplicationStatus::Approved, reviewed_by, None)
    }

    pub fn reject_application(&mut self, id: &ApplicationId, reviewed_by: &str, reason: &str) -> bool {
        self.decide(
            id,
            ApplicationStatus::Rejected,
            reviewed_by,
            Some(reason.to_string()),
        )
    }

    fn decide(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
        reviewed_by: &str,
        notes: Option<String>,
    ) -> bool {
        let Some(application) = self.find_mut(id) else {
            return false;
        };

        let revised = application.status.is_decided();
        application.status = status;
        application.reviewed_at = Some(Utc::now());
        application.reviewed_by = Some(reviewed_by.to_string());
        if notes.is_some() {
            application.notes = notes;
        }
        info!(
            application_id = %id,
            decision = status.label(),
            reviewed_by,
            revised,
            overall_score = application.overall_score,
            "application decided"
        );
        self.persist();
        true
    }

    pub fn delete_application(&mut self, id: &ApplicationId) -> bool {
        let before = self.applications.len();
        self.applications.retain(|application| &application.id != id);
        let removed = self.applications.len() != before;
        if removed {
            debug!(application_id = %id, "application deleted");
            self.persist();
        }
        removed
    }

    fn find_mut(&mut self, id: &ApplicationId) -> Option<&mut Application> {
        self.applications
            .iter_mut()
            .find(|application| &application.id == id)
    }

    fn next_application_id(&mut self) -> ApplicationId {
        loop {
            let candidate = ApplicationId(format!("{ID_PREFIX}{:06}", self.next_sequence));
            self.next_sequence += 1;
            if self.get_application_by_id(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.applications)
            .map_err(StorageError::from)
            .and_then(|payload| self.store.save(APPLICATIONS_KEY, &payload))
            .and_then(|()| {
                self.store
                    .save(SEQUENCE_KEY, &self.next_sequence.to_string())
            });

        if let Err(err) = result {
            warn!(error = %err, "failed to persist screening applications");
        }
    }
}
