//! Service instance and binding endpoint handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{authorize, cf_error, envelope, SharedState};
use crate::mock_server::state::BindRejection;
use crate::{BindParams, ProvisionParams};

/// GET /v2/spaces/{guid}/service_instances
pub async fn list_space_instances(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(space_guid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    envelope(state.list_instances(Some(&space_guid))).into_response()
}

/// GET /v2/service_instances
pub async fn list_instances(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    envelope(state.list_instances(None)).into_response()
}

/// POST /v2/service_instances
pub async fn create_instance(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(params): Json<ProvisionParams>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match state.provision(&params) {
        Some(instance) => (StatusCode::CREATED, Json(instance.clone())).into_response(),
        None => cf_error(
            StatusCode::BAD_REQUEST,
            60003,
            "CF-InvalidServicePlan",
            &format!("Invalid service plan: {}", params.service_plan_guid),
        ),
    }
}

/// POST /v2/service_bindings
pub async fn create_binding(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(params): Json<BindParams>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match state.bind(&params) {
        Ok(binding) => (StatusCode::CREATED, Json(binding.clone())).into_response(),
        Err(BindRejection::AlreadyBound) => cf_error(
            StatusCode::BAD_REQUEST,
            90003,
            "CF-ServiceBindingAppServiceTaken",
            &format!(
                "The app space binding to service is taken: {} {}",
                params.app_guid, params.service_instance_guid
            ),
        ),
        Err(BindRejection::UnknownTarget) => cf_error(
            StatusCode::BAD_REQUEST,
            1001,
            "CF-MessageParseError",
            "Unknown app or service instance",
        ),
    }
}
