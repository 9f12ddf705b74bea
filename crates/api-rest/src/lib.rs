//! # API REST
//!
//! REST API for the Smart Health Care patient registry.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - Mapping registry errors to HTTP status codes
//!
//! All handlers share one [`PatientService`], which serialises access to the registry.

#![warn(rust_2018_idioms)]

pub mod models;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use shc_core::{PatientRecord, PatientService, RegistryError};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use models::{
    clean_list, CreatePatientReq, DeviceReadingReq, DeviceReadingRes, HealthRes,
    ListPatientsRes, PatientView, SearchMatchRes, SearchReq, SearchRes, UpdatePatientReq,
};

type ApiError = (StatusCode, &'static str);

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_patients,
        create_patient,
        get_patient,
        update_patient,
        search_patients,
        put_device_reading,
        get_device_reading,
    ),
    components(schemas(
        HealthRes,
        PatientView,
        ListPatientsRes,
        CreatePatientReq,
        UpdatePatientReq,
        SearchReq,
        SearchRes,
        SearchMatchRes,
        DeviceReadingReq,
        DeviceReadingRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router over `patient_service`.
pub fn router(patient_service: PatientService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/:name", get(get_patient).put(update_patient))
        .route(
            "/patients/:name/devices/:device",
            put(put_device_reading).get(get_device_reading),
        )
        .route("/search", post(search_patients))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { patient_service })
}

fn registry_error(context: &str, e: RegistryError) -> ApiError {
    match e {
        RegistryError::RecordNotFound(_) => (StatusCode::NOT_FOUND, "Patient not found"),
        RegistryError::DeviceNotFound { .. } => {
            (StatusCode::NOT_FOUND, "Device reading not found")
        }
        RegistryError::InvalidSearch => {
            (StatusCode::BAD_REQUEST, "No symptoms provided to search for")
        }
        RegistryError::Codec(_) => {
            tracing::error!("{} error: {:?}", context, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Smart Health Care REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "All patients in insertion order", body = ListPatientsRes)
    )
)]
#[axum::debug_handler]
async fn list_patients(State(state): State<AppState>) -> Json<ListPatientsRes> {
    let patients = state
        .patient_service
        .list_patients()
        .iter()
        .map(PatientView::from)
        .collect();
    Json(ListPatientsRes { patients })
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = PatientView),
        (status = 400, description = "Bad request")
    )
)]
/// Create a new patient record
///
/// Names do not have to be unique. Lookups by name always resolve to the earliest record, so a
/// second patient with an existing name can only be reached through `GET /patients`.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientReq>,
) -> Result<(StatusCode, Json<PatientView>), ApiError> {
    let record = PatientRecord::new(
        &req.name,
        req.diagnosis,
        req.prescription,
        clean_list(req.symptoms),
        clean_list(req.history),
        clean_list(req.medications),
    )
    .map_err(|e| {
        tracing::warn!("Create patient rejected: {}", e);
        (StatusCode::BAD_REQUEST, "Patient name is required")
    })?;

    let view = PatientView::from(&record);
    state.patient_service.insert(record);
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/patients/{name}",
    params(("name" = String, Path, description = "Patient name, case-insensitive")),
    responses(
        (status = 200, description = "Patient record", body = PatientView),
        (status = 404, description = "Patient not found")
    )
)]
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PatientView>, ApiError> {
    state
        .patient_service
        .find_by_name(&name)
        .map(|record| Json(PatientView::from(&record)))
        .ok_or((StatusCode::NOT_FOUND, "Patient not found"))
}

#[utoipa::path(
    put,
    path = "/patients/{name}",
    params(("name" = String, Path, description = "Patient name, case-insensitive")),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = PatientView),
        (status = 404, description = "Patient not found")
    )
)]
/// Partially update a patient record
///
/// Every successful call counts as a visit, even if no field changes.
#[axum::debug_handler]
async fn update_patient(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<UpdatePatientReq>,
) -> Result<Json<PatientView>, ApiError> {
    state
        .patient_service
        .update(&name, req.into())
        .map(|record| Json(PatientView::from(&record)))
        .map_err(|e| registry_error("Update patient", e))
}

#[utoipa::path(
    post,
    path = "/search",
    request_body = SearchReq,
    responses(
        (status = 200, description = "Patients having every queried symptom", body = SearchRes),
        (status = 400, description = "No symptoms provided")
    )
)]
#[axum::debug_handler]
async fn search_patients(
    State(state): State<AppState>,
    Json(req): Json<SearchReq>,
) -> Result<Json<SearchRes>, ApiError> {
    let symptoms = clean_list(req.symptoms);
    state
        .patient_service
        .search(&symptoms)
        .map(|report| Json(SearchRes::from(report)))
        .map_err(|e| registry_error("Search patients", e))
}

#[utoipa::path(
    put,
    path = "/patients/{name}/devices/{device}",
    params(
        ("name" = String, Path, description = "Patient name, case-insensitive"),
        ("device" = String, Path, description = "Device name")
    ),
    request_body = DeviceReadingReq,
    responses(
        (status = 200, description = "Reading stored", body = DeviceReadingRes),
        (status = 404, description = "Patient not found")
    )
)]
/// Store a device reading, replacing any earlier reading from the same device
#[axum::debug_handler]
async fn put_device_reading(
    State(state): State<AppState>,
    Path((name, device)): Path<(String, String)>,
    Json(req): Json<DeviceReadingReq>,
) -> Result<Json<DeviceReadingRes>, ApiError> {
    state
        .patient_service
        .add_device_reading(&name, &device, &req.value)
        .map_err(|e| registry_error("Store device reading", e))?;

    Ok(Json(DeviceReadingRes {
        device,
        value: req.value,
    }))
}

#[utoipa::path(
    get,
    path = "/patients/{name}/devices/{device}",
    params(
        ("name" = String, Path, description = "Patient name, case-insensitive"),
        ("device" = String, Path, description = "Device name")
    ),
    responses(
        (status = 200, description = "Revealed device reading", body = DeviceReadingRes),
        (status = 404, description = "Patient or reading not found"),
        (status = 500, description = "Stored reading is unreadable")
    )
)]
#[axum::debug_handler]
async fn get_device_reading(
    State(state): State<AppState>,
    Path((name, device)): Path<(String, String)>,
) -> Result<Json<DeviceReadingRes>, ApiError> {
    let value = state
        .patient_service
        .get_device_reading(&name, &device)
        .map_err(|e| registry_error("Read device reading", e))?;

    Ok(Json(DeviceReadingRes { device, value }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde::de::DeserializeOwned;
    use shc_core::{seed::sample_registry, CoreConfig};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        router(PatientService::new(
            Arc::new(CoreConfig::default()),
            sample_registry().expect("sample data is valid"),
        ))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthRes = read_json(response).await;
        assert!(body.ok);
    }

    #[tokio::test]
    async fn list_returns_seeded_patients_with_revealed_readings() {
        let response = app().oneshot(get("/patients")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: ListPatientsRes = read_json(response).await;
        let names: Vec<_> = body.patients.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob"]);
        assert_eq!(
            body.patients[0].device_readings["Heart Rate Monitor"],
            "75 bpm"
        );
    }

    #[tokio::test]
    async fn get_patient_is_case_insensitive() {
        let response = app().oneshot(get("/patients/aLiCe")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: PatientView = read_json(response).await;
        assert_eq!(body.name, "Alice");
        assert_eq!(body.visit_count, 1);

        let missing = app().oneshot(get("/patients/Zed")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_patient_rejects_blank_name() {
        let request = json_request(
            "POST",
            "/patients",
            serde_json::json!({ "name": "  ", "diagnosis": "Flu", "prescription": "Rest" }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn created_patient_is_searchable() {
        let app = app();
        let request = json_request(
            "POST",
            "/patients",
            serde_json::json!({
                "name": "Carol",
                "diagnosis": "Cold",
                "prescription": "Rest",
                "symptoms": ["cough", " fever "]
            }),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let search = json_request(
            "POST",
            "/search",
            serde_json::json!({ "symptoms": ["fever", "cough"] }),
        );
        let response = app.oneshot(search).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: SearchRes = read_json(response).await;
        let names: Vec<_> = body.matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Carol"]);
        assert!(body.matches.iter().all(|m| m.suggestions.len() == 3));
    }

    #[tokio::test]
    async fn empty_search_is_bad_request() {
        let request = json_request("POST", "/search", serde_json::json!({ "symptoms": [" "] }));
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_is_partial_and_counts_visit() {
        let request = json_request(
            "PUT",
            "/patients/alice",
            serde_json::json!({ "diagnosis": "", "prescription": "X" }),
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: PatientView = read_json(response).await;
        assert_eq!(body.diagnosis, "Flu");
        assert_eq!(body.prescription, "X");
        assert_eq!(body.visit_count, 2);
        assert!(body.advice.contains("Regular follow-ups"));
    }

    #[tokio::test]
    async fn update_missing_patient_is_not_found() {
        let app = app();
        let request = json_request(
            "PUT",
            "/patients/Zed",
            serde_json::json!({ "symptoms": ["thirst"] }),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: ListPatientsRes = read_json(app.oneshot(get("/patients")).await.unwrap()).await;
        assert_eq!(body.patients.len(), 2);
        assert!(body.patients.iter().all(|p| p.visit_count == 1));
    }

    #[tokio::test]
    async fn device_reading_put_then_get() {
        let app = app();
        let uri = "/patients/bob/devices/Glucose%20Meter";

        let response = app
            .clone()
            .oneshot(json_request("PUT", uri, serde_json::json!({ "value": "140 mg/dL" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: DeviceReadingRes = read_json(response).await;
        assert_eq!(body.device, "Glucose Meter");
        assert_eq!(body.value, "140 mg/dL");

        let missing = app
            .oneshot(get("/patients/bob/devices/Thermometer"))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/patients",
            "/patients/{name}",
            "/patients/{name}/devices/{device}",
            "/search",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
