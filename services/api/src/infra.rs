use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tenant_screening::config::ScreeningConfig;
use tenant_screening::workflows::screening::{
    ApplicationStatus, JsonFileStore, KeyValueStore, MemoryStore, ScreeningWorkflow, StorageError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store selected at startup from `SCREENING_STORAGE_DIR`.
#[derive(Debug)]
pub(crate) enum ConfiguredStore {
    Memory(MemoryStore),
    File(JsonFileStore),
}

impl ConfiguredStore {
    pub(crate) fn from_dir(storage_dir: Option<PathBuf>) -> Self {
        match storage_dir {
            Some(dir) => Self::File(JsonFileStore::new(dir)),
            None => Self::Memory(MemoryStore::new()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            ConfiguredStore::Memory(_) => "in-memory".to_string(),
            ConfiguredStore::File(store) => format!("json files in {}", store.root().display()),
        }
    }
}

impl KeyValueStore for ConfiguredStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            ConfiguredStore::Memory(store) => store.load(key),
            ConfiguredStore::File(store) => store.load(key),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            ConfiguredStore::Memory(store) => store.save(key, value),
            ConfiguredStore::File(store) => store.save(key, value),
        }
    }
}

pub(crate) fn open_workflow(
    config: &ScreeningConfig,
) -> Result<ScreeningWorkflow<ConfiguredStore>, StorageError> {
    let store = ConfiguredStore::from_dir(config.storage_dir.clone());
    let workflow = ScreeningWorkflow::open(store)?.with_income_multiplier(config.income_multiplier);
    Ok(workflow)
}

pub(crate) fn parse_status(raw: &str) -> Result<ApplicationStatus, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "pending" => Ok(ApplicationStatus::Pending),
        "under_review" => Ok(ApplicationStatus::UnderReview),
        "approved" => Ok(ApplicationStatus::Approved),
        "rejected" => Ok(ApplicationStatus::Rejected),
        _ => Err(format!(
            "unknown status '{raw}' (expected pending, under_review, approved, or rejected)"
        )),
    }
}
