//! Organization, space and app endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use super::{authorize, envelope, ListQuery, SharedState};

/// GET /v2/organizations
pub async fn list_organizations(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    envelope(state.organizations.iter().collect()).into_response()
}

/// GET /v2/organizations/{guid}/spaces
pub async fn list_org_spaces(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(org_guid): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    envelope(state.spaces_in_org(&org_guid)).into_response()
}

/// GET /v2/spaces/{guid}/apps
pub async fn list_space_apps(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(space_guid): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    envelope(state.list_apps(Some(&space_guid), query.filter("name"))).into_response()
}

/// GET /v2/apps
pub async fn list_apps(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    envelope(state.list_apps(None, query.filter("name"))).into_response()
}
