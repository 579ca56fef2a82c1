//! HTTP handlers for the dispatch endpoints.
//!
//! Each handler translates the request into a call against the fleet
//! registry and the drone core, then wraps the result in the uniform
//! [`Envelope`]. Business rules live entirely in `dispatch-domain`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use serde::Deserialize;

use dispatch_domain::{Drone, DroneDescriptor};

use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::AppState;

/// Query string for the single-drone read endpoints.
#[derive(Debug, Deserialize)]
pub struct SerialQuery {
    #[serde(default)]
    pub serial_number: Option<String>,
}

impl SerialQuery {
    fn require(&self) -> ApiResult<&str> {
        self.serial_number
            .as_deref()
            .filter(|serial| !serial.is_empty())
            .ok_or(ApiError::MissingParameter("serial_number"))
    }
}

/// POST `/drone/register`
pub async fn register_drone(
    State(state): State<AppState>,
    body: Result<Json<DroneDescriptor>, JsonRejection>,
) -> ApiResult<Json<Envelope>> {
    let Json(descriptor) = body.map_err(|err| ApiError::Encoding(err.to_string()))?;

    let drone = Drone::from_descriptor(&descriptor)?;
    let drone = state.registry.register(drone)?;

    tracing::info!(serial = drone.serial_number(), "new drone registered");
    Ok(Json(Envelope::success(format!(
        "new drone with serial number {} added",
        drone.serial_number()
    ))))
}

/// POST `/drone/load`
///
/// The body reuses the drone descriptor shape: only `serial_number` and
/// `medications` are read.
pub async fn load_medications(
    State(state): State<AppState>,
    body: Result<Json<DroneDescriptor>, JsonRejection>,
) -> ApiResult<Json<Envelope>> {
    let Json(descriptor) = body.map_err(|err| ApiError::Encoding(err.to_string()))?;

    let drone = state.registry.get(&descriptor.serial_number)?;
    let loaded = drone.load_descriptors(descriptor.medications.as_deref().unwrap_or_default())?;

    tracing::info!(
        serial = %descriptor.serial_number,
        loaded,
        "medications loaded"
    );
    Ok(Json(Envelope::success(format!(
        "{loaded} medications loaded on drone with serial number {}",
        descriptor.serial_number
    ))))
}

/// GET `/drone/medications?serial_number=`
pub async fn get_medications(
    State(state): State<AppState>,
    Query(query): Query<SerialQuery>,
) -> ApiResult<Json<Envelope>> {
    let serial = query.require()?;
    let drone = state.registry.get(serial)?;

    if !drone.has_cargo() {
        return Err(ApiError::NoCargo(serial.to_owned()));
    }

    Ok(Json(Envelope::success_with_drones(
        format!("medications loaded on drone with serial number {serial}"),
        vec![drone.cargo_view()],
    )))
}

/// GET `/drone/battery?serial_number=`
pub async fn get_battery(
    State(state): State<AppState>,
    Query(query): Query<SerialQuery>,
) -> ApiResult<Json<Envelope>> {
    let serial = query.require()?;
    let drone = state.registry.get(serial)?;

    Ok(Json(Envelope::success_with_drones(
        format!("battery capacity of drone with serial number {serial}"),
        vec![drone.battery_view()],
    )))
}

/// GET `/drone/all/availables`
pub async fn list_available(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope>> {
    let drones: Vec<_> = state
        .registry
        .available_for_loading()
        .iter()
        .map(|drone| drone.summary_view())
        .collect();

    if drones.is_empty() {
        return Err(ApiError::NoneAvailable);
    }

    Ok(Json(Envelope::success_with_drones(
        format!("{} drones available for loading", drones.len()),
        drones,
    )))
}

/// GET `/drone/all`
///
/// Returns a bare array of full views rather than the envelope.
pub async fn list_all(State(state): State<AppState>) -> Json<Vec<DroneDescriptor>> {
    Json(state.registry.all().iter().map(|drone| drone.view()).collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use dispatch_fleet::FleetRegistry;

    use crate::build_router;

    use super::*;

    fn router() -> Router {
        build_router(Arc::new(FleetRegistry::new()))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_envelope(response: axum::response::Response) -> Envelope {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn register_body(serial: &str) -> serde_json::Value {
        serde_json::json!({
            "serial_number": serial,
            "model": "Lightweight",
            "weight_limit": 150,
            "battery_capacity": 100,
            "state": "IDLE",
            "medications": [
                {"name": "Medication-A", "code": "CODE_A", "weight": 20, "image": "aW1n"},
            ],
        })
    }

    #[tokio::test]
    async fn test_register_then_query_battery() {
        let app = router();

        let response = app
            .clone()
            .oneshot(post_json("/drone/register", register_body("A1")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);

        let response = app
            .oneshot(get("/drone/battery?serial_number=A1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let envelope = body_envelope(response).await;
        assert!(envelope.ok);
        let drones = envelope.drones.unwrap();
        assert_eq!(drones[0].serial_number, "A1");
        assert_eq!(drones[0].battery_capacity, Some(100));
        // Battery view carries no other field.
        assert_eq!(drones[0].state, None);
        assert_eq!(drones[0].medications, None);
    }

    #[tokio::test]
    async fn test_register_duplicate_serial_is_bad_request() {
        let app = router();

        let first = app
            .clone()
            .oneshot(post_json("/drone/register", register_body("A1")))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .clone()
            .oneshot(post_json("/drone/register", register_body("A1")))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body = body_json(second).await;
        assert_eq!(body["ok"], false);

        // Exactly one drone with that serial remains.
        let all = app.oneshot(get("/drone/all")).await.unwrap();
        let body = body_json(all).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_invalid_descriptor_is_bad_request() {
        let app = router();

        let mut body = register_body("A1");
        body["battery_capacity"] = serde_json::json!(0);
        let response = app
            .oneshot(post_json("/drone/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = router();

        let request = Request::builder()
            .method("POST")
            .uri("/drone/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_load_medications_onto_registered_drone() {
        let app = router();
        app.clone()
            .oneshot(post_json("/drone/register", register_body("A1")))
            .await
            .unwrap();

        let load = serde_json::json!({
            "serial_number": "A1",
            "medications": [
                {"name": "Medication-B", "code": "CODE_B", "weight": 40},
            ],
        });
        let response = app
            .clone()
            .oneshot(post_json("/drone/load", load))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Cargo view lists both items, in loading order, without images.
        let response = app
            .oneshot(get("/drone/medications?serial_number=A1"))
            .await
            .unwrap();
        let body = body_json(response).await;
        let cargo = body["drones"][0]["medications"].as_array().unwrap();
        assert_eq!(cargo.len(), 2);
        assert_eq!(cargo[0]["code"], "CODE_A");
        assert_eq!(cargo[1]["code"], "CODE_B");
        assert!(cargo[0].get("image").is_none());
    }

    #[tokio::test]
    async fn test_load_on_unknown_drone_is_not_found() {
        let load = serde_json::json!({"serial_number": "ghost", "medications": []});
        let response = router()
            .oneshot(post_json("/drone/load", load))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_overweight_load_reports_partial_progress() {
        let app = router();
        app.clone()
            .oneshot(post_json("/drone/register", register_body("A1")))
            .await
            .unwrap();

        // 20g already aboard a 150g drone; the third extra item overflows.
        let load = serde_json::json!({
            "serial_number": "A1",
            "medications": [
                {"name": "Medication-B", "code": "CODE_B", "weight": 60},
                {"name": "Medication-C", "code": "CODE_C", "weight": 60},
                {"name": "Medication-D", "code": "CODE_D", "weight": 60},
            ],
        });
        let response = app
            .clone()
            .oneshot(post_json("/drone/load", load))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let details = body["details"].as_str().unwrap();
        assert!(details.contains("2 of 3"), "details: {details}");
    }

    #[tokio::test]
    async fn test_medications_endpoint_requires_parameter_and_cargo() {
        let app = router();
        app.clone()
            .oneshot(post_json("/drone/register", {
                let mut body = register_body("empty");
                body["medications"] = serde_json::json!([]);
                body
            }))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get("/drone/medications"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(get("/drone/medications?serial_number=empty"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(get("/drone/medications?serial_number=ghost"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_available_drones_endpoint() {
        let app = router();

        // No drones yet: 404.
        let response = app
            .clone()
            .oneshot(get("/drone/all/availables"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        app.clone()
            .oneshot(post_json("/drone/register", {
                let mut body = register_body("ready");
                body["medications"] = serde_json::json!([]);
                body
            }))
            .await
            .unwrap();

        let response = app
            .oneshot(get("/drone/all/availables"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        // Summary view: serial number only.
        assert_eq!(body["drones"], serde_json::json!([{"serial_number": "ready"}]));
    }

    #[tokio::test]
    async fn test_list_all_returns_bare_array_of_full_views() {
        let app = router();
        app.clone()
            .oneshot(post_json("/drone/register", register_body("A1")))
            .await
            .unwrap();

        let response = app.oneshot(get("/drone/all")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        let drones = body.as_array().unwrap();
        assert_eq!(drones.len(), 1);
        assert_eq!(drones[0]["model"], "Lightweight");
        // Full view keeps the image blob.
        assert_eq!(drones[0]["medications"][0]["image"], "aW1n");
    }
}
