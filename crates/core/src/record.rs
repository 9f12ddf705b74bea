//! Patient records.
//!
//! A record's advice text is cached: it is computed when the record is created and recomputed on
//! every update, so it always reflects the symptoms and visit count of the last mutation.

use crate::advice::generate_advice;
use crate::codec::{self, CodecResult};
use crate::error::{PatientResult, RegistryError, RegistryResult};
use shc_types::PatientName;
use std::collections::BTreeMap;
use std::fmt;

/// A single patient's record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientRecord {
    name: PatientName,
    diagnosis: String,
    prescription: String,
    symptoms: Vec<String>,
    history: Vec<String>,
    medications: Vec<String>,
    /// Device name to obfuscated reading.
    device_readings: BTreeMap<String, String>,
    visit_count: u32,
    advice: String,
}

/// Partial update of a record.
///
/// A field that is `None` or empty leaves the current value in place; there is no way to clear a
/// field through an update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub history: Option<Vec<String>>,
    pub medications: Option<Vec<String>>,
    pub symptoms: Option<Vec<String>>,
}

impl RecordUpdate {
    /// True when applying this update would change nothing but the visit count.
    pub fn is_noop(&self) -> bool {
        fn blank(v: &Option<Vec<String>>) -> bool {
            v.as_ref().map_or(true, Vec::is_empty)
        }

        self.diagnosis.as_deref().map_or(true, str::is_empty)
            && self.prescription.as_deref().map_or(true, str::is_empty)
            && blank(&self.history)
            && blank(&self.medications)
            && blank(&self.symptoms)
    }
}

impl PatientRecord {
    /// Creates a first-visit record.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Text` if `name` is blank.
    pub fn new(
        name: impl AsRef<str>,
        diagnosis: impl Into<String>,
        prescription: impl Into<String>,
        symptoms: Vec<String>,
        history: Vec<String>,
        medications: Vec<String>,
    ) -> PatientResult<Self> {
        let name = PatientName::new(name)?;
        let visit_count = 1;
        let advice = generate_advice(&symptoms, visit_count);

        Ok(Self {
            name,
            diagnosis: diagnosis.into(),
            prescription: prescription.into(),
            symptoms,
            history,
            medications,
            device_readings: BTreeMap::new(),
            visit_count,
            advice,
        })
    }

    pub fn name(&self) -> &PatientName {
        &self.name
    }

    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    pub fn prescription(&self) -> &str {
        &self.prescription
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn medications(&self) -> &[String] {
        &self.medications
    }

    pub fn visit_count(&self) -> u32 {
        self.visit_count
    }

    pub fn advice(&self) -> &str {
        &self.advice
    }

    /// True when every queried symptom appears in this record's symptoms.
    pub fn has_all_symptoms<S: AsRef<str>>(&self, query: &[S]) -> bool {
        query
            .iter()
            .all(|q| self.symptoms.iter().any(|s| s == q.as_ref()))
    }

    /// Applies a partial update, bumps the visit count and refreshes the advice.
    pub(crate) fn apply_update(&mut self, update: RecordUpdate) {
        if let Some(diagnosis) = update.diagnosis.filter(|v| !v.is_empty()) {
            self.diagnosis = diagnosis;
        }
        if let Some(prescription) = update.prescription.filter(|v| !v.is_empty()) {
            self.prescription = prescription;
        }
        if let Some(history) = update.history.filter(|v| !v.is_empty()) {
            self.history = history;
        }
        if let Some(medications) = update.medications.filter(|v| !v.is_empty()) {
            self.medications = medications;
        }
        if let Some(symptoms) = update.symptoms.filter(|v| !v.is_empty()) {
            self.symptoms = symptoms;
        }

        self.visit_count = self.visit_count.saturating_add(1);
        self.advice = generate_advice(&self.symptoms, self.visit_count);
    }

    /// Stores a reading for `device_name`, replacing any earlier reading from that device.
    pub fn add_device_reading(&mut self, device_name: impl Into<String>, raw_value: &str) {
        let device_name = device_name.into();
        tracing::debug!(patient = %self.name, device = %device_name, "storing device reading");
        self.device_readings
            .insert(device_name, codec::obfuscate(raw_value));
    }

    /// Returns the plaintext reading for `device_name`.
    ///
    /// # Errors
    ///
    /// - `RegistryError::DeviceNotFound` if the device has no reading
    /// - `RegistryError::Codec` if the stored token cannot be revealed
    pub fn get_device_reading(&self, device_name: &str) -> RegistryResult<String> {
        let token = self
            .device_readings
            .get(device_name)
            .ok_or_else(|| RegistryError::DeviceNotFound {
                patient: self.name.to_string(),
                device: device_name.to_string(),
            })?;
        Ok(codec::reveal(token)?)
    }

    /// Device names with a stored reading, in sorted order.
    pub fn device_names(&self) -> impl Iterator<Item = &str> {
        self.device_readings.keys().map(String::as_str)
    }

    /// Every reading revealed, keyed by device name in sorted order.
    pub fn revealed_readings(&self) -> Vec<(&str, CodecResult<String>)> {
        self.device_readings
            .iter()
            .map(|(device, token)| (device.as_str(), codec::reveal(token)))
            .collect()
    }
}

impl fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let device_data = self
            .revealed_readings()
            .into_iter()
            .map(|(device, reading)| match reading {
                Ok(value) => format!("{device}: {value}"),
                Err(e) => {
                    tracing::warn!(patient = %self.name, device, "unreadable device reading: {e}");
                    format!("{device}: <unreadable>")
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "Patient Name: {}", self.name)?;
        writeln!(f, "Diagnosis: {}", self.diagnosis)?;
        writeln!(f, "Prescription: {}", self.prescription)?;
        writeln!(f, "Symptoms: {}", self.symptoms.join(", "))?;
        writeln!(f, "Past Health Issues: {}", self.history.join(", "))?;
        writeln!(f, "Medications: {}", self.medications.join(", "))?;
        writeln!(f, "Wearable Device Data: {device_data}")?;
        writeln!(f, "Visit Count: {}", self.visit_count)?;
        writeln!(f, "Personalized Advice: {}", self.advice)?;
        write!(f, "------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatientError;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn alice() -> PatientRecord {
        PatientRecord::new(
            "Alice",
            "Flu",
            "Bed rest, paracetamol",
            strings(&["fever", "cough", "sore throat"]),
            strings(&["Flu", "Allergy"]),
            strings(&["Paracetamol", "Cetrizine"]),
        )
        .expect("valid record")
    }

    #[test]
    fn new_record_starts_at_first_visit_with_advice() {
        let record = alice();
        assert_eq!(record.visit_count(), 1);
        assert_eq!(
            record.advice(),
            generate_advice(&["fever", "cough", "sore throat"], 1)
        );
        assert_eq!(record.device_names().count(), 0);
    }

    #[test]
    fn new_record_rejects_blank_name() {
        let err = PatientRecord::new("  ", "", "", vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, PatientError::Text(_)));
    }

    #[test]
    fn apply_update_changes_only_supplied_fields() {
        let mut record = alice();
        record.apply_update(RecordUpdate {
            diagnosis: Some(String::new()),
            prescription: Some("Fluids".into()),
            history: Some(vec![]),
            ..Default::default()
        });

        assert_eq!(record.diagnosis(), "Flu");
        assert_eq!(record.prescription(), "Fluids");
        assert_eq!(record.history(), ["Flu", "Allergy"]);
        assert_eq!(record.symptoms(), ["fever", "cough", "sore throat"]);
        assert_eq!(record.visit_count(), 2);
        assert!(record.advice().contains("Regular follow-ups, "));
    }

    #[test]
    fn apply_update_recomputes_advice_from_new_symptoms() {
        let mut record = alice();
        record.apply_update(RecordUpdate {
            symptoms: Some(strings(&["cough"])),
            ..Default::default()
        });

        assert_eq!(record.advice(), generate_advice(&["cough"], 2));
        assert!(!record.advice().contains("plenty of rest"));
    }

    #[test]
    fn device_reading_is_stored_obfuscated_and_overwritten() {
        let mut record = alice();
        record.add_device_reading("Heart Rate Monitor", "75 bpm");
        record.add_device_reading("Heart Rate Monitor", "82 bpm");

        assert_eq!(record.device_names().collect::<Vec<_>>(), ["Heart Rate Monitor"]);
        assert_eq!(record.get_device_reading("Heart Rate Monitor").unwrap(), "82 bpm");

        let stored = &record.device_readings["Heart Rate Monitor"];
        assert_ne!(stored, "82 bpm");
    }

    #[test]
    fn missing_device_reading_is_an_error() {
        let record = alice();
        let err = record.get_device_reading("Thermometer").unwrap_err();
        match err {
            RegistryError::DeviceNotFound { patient, device } => {
                assert_eq!(patient, "Alice");
                assert_eq!(device, "Thermometer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn display_reveals_readings() {
        let mut record = alice();
        record.add_device_reading("Heart Rate Monitor", "75 bpm");
        record.add_device_reading("Blood Sugar Monitor", "110 mg/dL");

        let text = record.to_string();
        assert!(text.starts_with("Patient Name: Alice\nDiagnosis: Flu\n"));
        assert!(text.contains("Symptoms: fever, cough, sore throat\n"));
        assert!(text.contains("Past Health Issues: Flu, Allergy\n"));
        assert!(text.contains(
            "Wearable Device Data: Blood Sugar Monitor: 110 mg/dL, Heart Rate Monitor: 75 bpm\n"
        ));
        assert!(text.contains("Visit Count: 1\n"));
        assert!(text.ends_with("------"));
    }

    #[test]
    fn display_marks_corrupt_readings() {
        let mut record = alice();
        record
            .device_readings
            .insert("Thermometer".into(), "%%%".into());

        assert!(record
            .to_string()
            .contains("Wearable Device Data: Thermometer: <unreadable>\n"));
    }

    #[test]
    fn record_update_noop_detection() {
        assert!(RecordUpdate::default().is_noop());
        assert!(RecordUpdate {
            diagnosis: Some(String::new()),
            symptoms: Some(vec![]),
            ..Default::default()
        }
        .is_noop());
        assert!(!RecordUpdate {
            medications: Some(strings(&["Insulin"])),
            ..Default::default()
        }
        .is_noop());
    }
}
