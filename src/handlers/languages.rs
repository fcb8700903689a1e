// Language handlers
// HTTP handlers for the read-only language catalog

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{error::ApiResult, state::AppState};

/// Query parameters for listing languages
#[derive(Debug, Default, Deserialize)]
pub struct ListLanguagesQuery {
    pub q: Option<String>,
}

/// List languages, optionally filtered by name or topic
/// GET /api/languages?q=<text>
pub async fn list_languages(
    State(state): State<AppState>,
    Query(params): Query<ListLanguagesQuery>,
) -> impl IntoResponse {
    if let Some(ref q) = params.q {
        debug!("Searching languages with query: {:?}", q);
    }

    let languages = state.catalog.search(params.q.as_deref());

    info!(
        "Returning {} of {} languages",
        languages.len(),
        state.catalog.len()
    );
    (StatusCode::OK, Json(languages))
}

/// Get a single language by its id
/// GET /api/languages/:lang_id
pub async fn get_language(
    State(state): State<AppState>,
    Path(lang_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!("Fetching language with id: {}", lang_id);

    let language = state.catalog.get_by_id(&lang_id)?;

    Ok((StatusCode::OK, Json(language)))
}
