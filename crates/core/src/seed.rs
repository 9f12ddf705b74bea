//! Sample patients used by the CLI and the REST service at startup.

use crate::error::PatientResult;
use crate::record::PatientRecord;
use crate::registry::Registry;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds a registry holding the two demo patients, Alice and Bob.
pub fn sample_registry() -> PatientResult<Registry> {
    let mut alice = PatientRecord::new(
        "Alice",
        "Flu",
        "Bed rest, paracetamol",
        strings(&["fever", "cough", "sore throat"]),
        strings(&["Flu", "Allergy"]),
        strings(&["Paracetamol", "Cetrizine"]),
    )?;
    alice.add_device_reading("Heart Rate Monitor", "75 bpm");
    alice.add_device_reading("Blood Sugar Monitor", "110 mg/dL");

    let bob = PatientRecord::new(
        "Bob",
        "Diabetes",
        "Insulin, metformin",
        strings(&["thirst", "frequent urination"]),
        strings(&["Diabetes"]),
        strings(&["Insulin", "Metformin"]),
    )?;

    let mut registry = Registry::new();
    registry.insert(alice);
    registry.insert(bob);
    tracing::debug!(patients = registry.len(), "seeded sample registry");
    Ok(registry)
}
