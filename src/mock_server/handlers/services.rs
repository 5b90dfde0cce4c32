//! Marketplace, service and service plan endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{authorize, envelope, not_found, ListQuery, SharedState};
use crate::mock_server::state::DEFAULT_PAGE_SIZE;
use crate::ResourceList;

/// GET /v2/spaces/{guid}/services
///
/// Pages through the marketplace, linking pages with `next_url`.
pub async fn list_space_services(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(space_guid): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if !state.spaces.iter().any(|s| s.guid() == space_guid) {
        return not_found("space", &space_guid);
    }

    let per_page = query
        .results_per_page
        .or(state.marketplace_page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);
    let page = query.page.unwrap_or(1).max(1);
    let total = state.services.len();
    let total_pages = total.div_ceil(per_page).max(1);

    let start = ((page - 1) * per_page).min(total);
    let end = (start + per_page).min(total);
    let link = |p: usize| {
        format!("/v2/spaces/{space_guid}/services?page={p}&results-per-page={per_page}")
    };

    (
        StatusCode::OK,
        Json(ResourceList {
            total_results: Some(total as u64),
            total_pages: Some(total_pages as u32),
            prev_url: (page > 1).then(|| link(page - 1)),
            next_url: (end < total).then(|| link(page + 1)),
            resources: state.services[start..end].to_vec(),
        }),
    )
        .into_response()
}

/// GET /v2/services/{guid}
pub async fn get_service(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(guid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    match state.get_service(&guid) {
        Some(service) => (StatusCode::OK, Json(service.clone())).into_response(),
        None => not_found("service", &guid),
    }
}

/// GET /v2/services/{guid}/service_plans
pub async fn list_service_plans(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(guid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if state.get_service(&guid).is_none() {
        return not_found("service", &guid);
    }
    envelope(state.plans_for_service(&guid)).into_response()
}

/// GET /v2/service_plans/{guid}
pub async fn get_service_plan(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(guid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    if state.failing_plans.contains(&guid) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    match state.get_plan(&guid) {
        Some(plan) => (StatusCode::OK, Json(plan.clone())).into_response(),
        None => not_found("service plan", &guid),
    }
}
