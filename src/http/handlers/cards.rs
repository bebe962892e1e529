//! `/card` routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{log_rejection, parse_body, record_sizes, AppState};
use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::store::validation::validate_new_card;
use crate::store::{Card, NewCard, Store};

pub fn list(store: &Store) -> Result<Vec<Card>, ApiError> {
    Ok(store.list_cards()?)
}

pub fn find(store: &Store, id: &str) -> Result<Card, ApiError> {
    store
        .get_card(id)
        .map_err(ApiError::from)
        .inspect_err(log_rejection)
}

/// Validate and insert a card.
pub fn create(store: &Store, payload: NewCard) -> Result<Card, ApiError> {
    let card = validate_new_card(payload)
        .map_err(ApiError::from)
        .inspect_err(log_rejection)?;
    let card = store.insert_card(card)?;

    tracing::info!("Card with id {} created", card.id);
    metrics::record_mutation("card", "create");
    record_sizes(store);
    Ok(card)
}

/// Delete a card and remove it from every list.
pub fn delete(store: &Store, id: &str) -> Result<(), ApiError> {
    let lists_updated = store
        .delete_card(id)
        .map_err(ApiError::from)
        .inspect_err(log_rejection)?;

    tracing::info!(lists_updated, "Card with id {} deleted", id);
    metrics::record_mutation("card", "delete");
    record_sizes(store);
    Ok(())
}

pub async fn get_cards(State(state): State<AppState>) -> Result<Json<Vec<Card>>, ApiError> {
    Ok(Json(list(&state.store)?))
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    Ok(Json(find(&state.store, &id)?))
}

pub async fn post_card(
    State(state): State<AppState>,
    payload: Result<Json<NewCard>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let card = create(&state.store, parse_body(payload)?)?;
    let location = state.location("card", &card.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(card)))
}

pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete(&state.store, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
