//! The patient registry.
//!
//! Records are kept in insertion order. Names are not unique: every name-based operation
//! resolves to the **first** record whose name matches case-insensitively. Two patients sharing a
//! name therefore make the later one unreachable by name. That is a known ambiguity and is kept
//! as-is until there is a product decision on patient identity.

use crate::error::{RegistryError, RegistryResult};
use crate::record::{PatientRecord, RecordUpdate};
use crate::suggestions::{sample_suggestions, SUGGESTIONS};
use rand::Rng;

/// Ordered, in-memory collection of patient records.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    records: Vec<PatientRecord>,
}

/// One matching record in a [`SearchReport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchMatch {
    pub name: String,
    pub advice: String,
    pub suggestions: Vec<String>,
}

/// Result of a symptom search with suggested treatments for each match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub query: Vec<String>,
    pub matches: Vec<SearchMatch>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: PatientRecord) {
        tracing::debug!(patient = %record.name(), "inserting patient record");
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name().as_str()).collect()
    }

    /// First record whose name matches `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&PatientRecord> {
        self.records.iter().find(|r| r.name().matches(name))
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut PatientRecord> {
        self.records.iter_mut().find(|r| r.name().matches(name))
    }

    /// Records whose symptoms include every queried symptom, in insertion order.
    ///
    /// Symptoms are compared exactly. Extra symptoms on a record do not prevent a match.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidSearch` for an empty query; no search is performed.
    pub fn find_matching_symptoms<S: AsRef<str>>(
        &self,
        query: &[S],
    ) -> RegistryResult<Vec<&PatientRecord>> {
        if query.is_empty() {
            return Err(RegistryError::InvalidSearch);
        }

        Ok(self
            .records
            .iter()
            .filter(|r| r.has_all_symptoms(query))
            .collect())
    }

    /// Applies a partial update to the first record named `name`.
    ///
    /// The visit count always goes up by one and the advice is recomputed, even when `update`
    /// carries no changes.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::RecordNotFound` if no record matches; nothing is modified.
    pub fn update(&mut self, name: &str, update: RecordUpdate) -> RegistryResult<&PatientRecord> {
        let record = self
            .find_by_name_mut(name)
            .ok_or_else(|| RegistryError::RecordNotFound(name.to_string()))?;

        let noop = update.is_noop();
        record.apply_update(update);
        if noop {
            tracing::debug!(
                patient = %record.name(),
                visit_count = record.visit_count(),
                "recorded visit with no field changes"
            );
        } else {
            tracing::debug!(
                patient = %record.name(),
                visit_count = record.visit_count(),
                "updated patient record"
            );
        }
        Ok(record)
    }

    /// Stores a device reading on the first record named `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::RecordNotFound` if no record matches.
    pub fn add_device_reading(
        &mut self,
        name: &str,
        device_name: impl Into<String>,
        raw_value: &str,
    ) -> RegistryResult<()> {
        let record = self
            .find_by_name_mut(name)
            .ok_or_else(|| RegistryError::RecordNotFound(name.to_string()))?;
        record.add_device_reading(device_name, raw_value);
        Ok(())
    }

    /// Reveals a device reading on the first record named `name`.
    ///
    /// # Errors
    ///
    /// - `RegistryError::RecordNotFound` if no record matches
    /// - `RegistryError::DeviceNotFound` if the record has no reading for `device_name`
    /// - `RegistryError::Codec` if the stored token is corrupt
    pub fn get_device_reading(&self, name: &str, device_name: &str) -> RegistryResult<String> {
        self.find_by_name(name)
            .ok_or_else(|| RegistryError::RecordNotFound(name.to_string()))?
            .get_device_reading(device_name)
    }

    /// Looks up a record for a remote consultation.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::RecordNotFound` if no record matches.
    pub fn consultation(&self, name: &str) -> RegistryResult<&PatientRecord> {
        tracing::info!(patient = name, "starting remote consultation");
        let record = self
            .find_by_name(name)
            .ok_or_else(|| RegistryError::RecordNotFound(name.to_string()))?;
        tracing::info!(
            patient = %record.name(),
            visit_count = record.visit_count(),
            "consultation complete"
        );
        Ok(record)
    }

    /// Runs a symptom search and samples `suggestion_count` treatments for each match.
    ///
    /// Each match gets its own independent sample.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidSearch` for an empty query.
    pub fn search_report<S: AsRef<str>, R: Rng + ?Sized>(
        &self,
        query: &[S],
        suggestion_count: usize,
        rng: &mut R,
    ) -> RegistryResult<SearchReport> {
        let matches = self
            .find_matching_symptoms(query)?
            .into_iter()
            .map(|record| SearchMatch {
                name: record.name().to_string(),
                advice: record.advice().to_string(),
                suggestions: sample_suggestions(&SUGGESTIONS, suggestion_count, &mut *rng)
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            })
            .collect();

        Ok(SearchReport {
            query: query.iter().map(|q| q.as_ref().to_string()).collect(),
            matches,
        })
    }
}
