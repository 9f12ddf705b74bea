//! Patient service shared by the presentation layers.
//!
//! The service owns one [`Registry`] behind a mutex. Every method takes the lock once and does
//! all of its work under it, so an update's locate-then-mutate sequence cannot interleave with
//! another caller. Records are returned as clones so no lock outlives a call.

use crate::config::CoreConfig;
use crate::error::RegistryResult;
use crate::record::{PatientRecord, RecordUpdate};
use crate::registry::{Registry, SearchReport};
use std::sync::{Arc, Mutex, MutexGuard};

/// Thread-safe handle to the patient registry. Cloning shares the same registry.
#[derive(Clone, Debug)]
pub struct PatientService {
    cfg: Arc<CoreConfig>,
    registry: Arc<Mutex<Registry>>,
}

impl PatientService {
    /// Creates a service over an existing registry.
    pub fn new(cfg: Arc<CoreConfig>, registry: Registry) -> Self {
        Self {
            cfg,
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    // No operation leaves the registry half-written, so a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Lists all patient records in insertion order.
    pub fn list_patients(&self) -> Vec<PatientRecord> {
        self.lock().records().to_vec()
    }

    pub fn insert(&self, record: PatientRecord) {
        self.lock().insert(record);
    }

    pub fn find_by_name(&self, name: &str) -> Option<PatientRecord> {
        self.lock().find_by_name(name).cloned()
    }

    /// Symptom search with suggested treatments, using the configured suggestion count.
    pub fn search(&self, symptoms: &[String]) -> RegistryResult<SearchReport> {
        let count = self.cfg.suggestion_count();
        self.lock()
            .search_report(symptoms, count, &mut rand::thread_rng())
    }

    pub fn update(&self, name: &str, update: RecordUpdate) -> RegistryResult<PatientRecord> {
        self.lock().update(name, update).cloned()
    }

    pub fn consultation(&self, name: &str) -> RegistryResult<PatientRecord> {
        self.lock().consultation(name).cloned()
    }

    pub fn add_device_reading(&self, name: &str, device: &str, value: &str) -> RegistryResult<()> {
        self.lock().add_device_reading(name, device, value)
    }

    pub fn get_device_reading(&self, name: &str, device: &str) -> RegistryResult<String> {
        self.lock().get_device_reading(name, device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::seed::sample_registry;
    use std::thread;

    fn service() -> PatientService {
        PatientService::new(
            Arc::new(CoreConfig::default()),
            sample_registry().expect("sample data is valid"),
        )
    }

    #[test]
    fn clones_share_one_registry() {
        let service = service();
        let other = service.clone();
        let carol = PatientRecord::new("Carol", "Cold", "Rest", vec![], vec![], vec![]).unwrap();
        other.insert(carol);

        assert_eq!(service.list_patients().len(), 3);
        assert!(service.find_by_name("carol").is_some());
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let service = service();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        service.update("Bob", RecordUpdate::default()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(service.find_by_name("Bob").unwrap().visit_count(), 1 + 8 * 25);
    }

    #[test]
    fn search_uses_configured_suggestion_count() {
        let service = PatientService::new(
            Arc::new(CoreConfig::new(5, true).unwrap()),
            sample_registry().unwrap(),
        );
        let report = service.search(&["fever".to_string()]).unwrap();
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].suggestions.len(), 5);

        assert!(matches!(
            service.search(&[]),
            Err(RegistryError::InvalidSearch)
        ));
    }

    #[test]
    fn failed_update_leaves_registry_unchanged() {
        let service = service();
        let before = service.list_patients();
        let err = service
            .update(
                "Zed",
                RecordUpdate {
                    diagnosis: Some("Flu".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::RecordNotFound(_)));
        assert_eq!(service.list_patients(), before);
    }

    #[test]
    fn device_readings_round_trip_through_service() {
        let service = service();
        service
            .add_device_reading("bob", "Glucose Meter", "140 mg/dL")
            .unwrap();
        assert_eq!(
            service.get_device_reading("Bob", "Glucose Meter").unwrap(),
            "140 mg/dL"
        );
        assert_eq!(
            service.find_by_name("Bob").unwrap().device_names().count(),
            1
        );
    }
}
