//! `/list` routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{log_rejection, parse_body, record_sizes, AppState};
use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::store::validation::validate_new_list;
use crate::store::{Identifier, List, NewList, Store};

/// Body of a successful `POST /list`.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: Identifier,
}

pub fn list(store: &Store) -> Result<Vec<List>, ApiError> {
    Ok(store.list_lists()?)
}

pub fn find(store: &Store, id: &str) -> Result<List, ApiError> {
    store
        .get_list(id)
        .map_err(ApiError::from)
        .inspect_err(log_rejection)
}

/// Validate the payload and every card reference, then insert the list.
/// Nothing is stored when any reference is unknown.
pub fn create(store: &Store, payload: NewList) -> Result<List, ApiError> {
    let list = validate_new_list(payload)
        .map_err(ApiError::from)
        .and_then(|list| store.insert_list(list).map_err(ApiError::from))
        .inspect_err(log_rejection)?;

    tracing::info!("List with id {} created", list.id);
    metrics::record_mutation("list", "create");
    record_sizes(store);
    Ok(list)
}

pub fn delete(store: &Store, id: &str) -> Result<(), ApiError> {
    store
        .delete_list(id)
        .map_err(ApiError::from)
        .inspect_err(log_rejection)?;

    tracing::info!("List with id {} deleted", id);
    metrics::record_mutation("list", "delete");
    record_sizes(store);
    Ok(())
}

pub async fn get_lists(State(state): State<AppState>) -> Result<Json<Vec<List>>, ApiError> {
    Ok(Json(list(&state.store)?))
}

pub async fn get_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<List>, ApiError> {
    Ok(Json(find(&state.store, &id)?))
}

pub async fn post_list(
    State(state): State<AppState>,
    payload: Result<Json<NewList>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let list = create(&state.store, parse_body(payload)?)?;
    let location = state.location("list", &list.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(Created { id: list.id }),
    ))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete(&state.store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
