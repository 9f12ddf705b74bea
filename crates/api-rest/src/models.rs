//! Request and response bodies for the REST API.

use serde::{Deserialize, Serialize};
use shc_core::{PatientRecord, RecordUpdate, SearchReport};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Placeholder shown for a stored reading that cannot be revealed.
pub const UNREADABLE_READING: &str = "<unreadable>";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A patient record with device readings revealed.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PatientView {
    pub name: String,
    pub diagnosis: String,
    pub prescription: String,
    pub symptoms: Vec<String>,
    pub history: Vec<String>,
    pub medications: Vec<String>,
    pub device_readings: BTreeMap<String, String>,
    pub visit_count: u32,
    pub advice: String,
}

impl From<&PatientRecord> for PatientView {
    fn from(record: &PatientRecord) -> Self {
        let device_readings = record
            .revealed_readings()
            .into_iter()
            .map(|(device, reading)| {
                let value = reading.unwrap_or_else(|e| {
                    tracing::warn!(patient = %record.name(), device, "unreadable reading: {e}");
                    UNREADABLE_READING.to_string()
                });
                (device.to_string(), value)
            })
            .collect();

        Self {
            name: record.name().to_string(),
            diagnosis: record.diagnosis().to_string(),
            prescription: record.prescription().to_string(),
            symptoms: record.symptoms().to_vec(),
            history: record.history().to_vec(),
            medications: record.medications().to_vec(),
            device_readings,
            visit_count: record.visit_count(),
            advice: record.advice().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<PatientView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    pub name: String,
    pub diagnosis: String,
    pub prescription: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
}

/// Partial update. Omitted, empty or blank fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub history: Option<Vec<String>>,
    pub medications: Option<Vec<String>>,
    pub symptoms: Option<Vec<String>>,
}

/// Trims entries and drops blank ones.
pub(crate) fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl From<UpdatePatientReq> for RecordUpdate {
    fn from(req: UpdatePatientReq) -> Self {
        RecordUpdate {
            diagnosis: shc_core::validation::non_blank(req.diagnosis),
            prescription: shc_core::validation::non_blank(req.prescription),
            history: req.history.map(clean_list),
            medications: req.medications.map(clean_list),
            symptoms: req.symptoms.map(clean_list),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchReq {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchMatchRes {
    pub name: String,
    pub advice: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchRes {
    pub query: Vec<String>,
    pub matches: Vec<SearchMatchRes>,
}

impl From<SearchReport> for SearchRes {
    fn from(report: SearchReport) -> Self {
        Self {
            query: report.query,
            matches: report
                .matches
                .into_iter()
                .map(|m| SearchMatchRes {
                    name: m.name,
                    advice: m.advice,
                    suggestions: m.suggestions,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeviceReadingReq {
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeviceReadingRes {
    pub device: String,
    pub value: String,
}
