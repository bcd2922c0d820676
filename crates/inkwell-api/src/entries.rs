use std::net::SocketAddr;

use axum::{
    Form,
    extract::{
        ConnectInfo, Path, Query, State,
        rejection::{FormRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use inkwell_db::EntryStore;
use inkwell_types::{EntryId, entry_path};
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::navigation::NavError;
use crate::render;
use crate::state::AppState;
use crate::validate::validate_content;

/// Decoded query or form pairs, in the order they were sent.
type Pairs = Vec<(String, String)>;

/// GET / — redirect to the newest entry.
pub async fn latest(State(state): State<AppState>) -> Result<Response, ApiError> {
    let navigator = state.navigator.clone();
    let target = run_blocking(move || navigator.latest_redirect_target()).await?;
    Ok(found(&entry_path(target)))
}

/// GET /entry/{id} — show one entry, or its edit form with `?edit=true`.
pub async fn show_entry(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<Pairs>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    // A segment that does not even decode is just another malformed position.
    let Path(raw_id) = path.map_err(|e| {
        debug!("Undecodable entry path: {}", e);
        ApiError::NotFound
    })?;
    let id = parse_position(&raw_id).ok_or(ApiError::NotFound)?;
    let query = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let editing = first_value(&query, "edit") == Some("true");

    let navigator = state.navigator.clone();
    let view = run_blocking(move || navigator.resolve(id, editing))
        .await?
        .map_err(|e| {
            match &e {
                NavError::NotFound { .. } => debug!("{}", e),
                NavError::Inconsistent { .. } => error!("Entry store inconsistency: {}", e),
            }
            ApiError::from(e)
        })?;

    Ok(render::render_page(&view))
}

/// POST /save — append a new entry and redirect to it.
pub async fn save_entry(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    form: Result<Form<Pairs>, FormRejection>,
) -> Result<Response, ApiError> {
    // An unreadable body or wrong content type carries no text, same as an empty field.
    let fields = form.map(|Form(fields)| fields).unwrap_or_else(|e| {
        debug!("Unreadable save form: {}", e);
        Vec::new()
    });
    let new_text = first_value(&fields, "newText").unwrap_or_default().to_string();
    validate_content(&new_text)?;

    let origin = peer.ip().to_string();
    let db = state.db.clone();
    let new_id = run_blocking(move || db.append(&new_text, &origin))
        .await?
        .map_err(|e| {
            error!("Error saving entry: {}", e);
            ApiError::Internal("Failed to save entry")
        })?;

    info!("Saved entry {} from {}", new_id, peer.ip());
    Ok(found(&entry_path(new_id)))
}

/// Positions are plain decimal integers; anything else is treated as a missing page.
fn parse_position(raw: &str) -> Option<EntryId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// First value sent for `key`; later repeats are ignored.
fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Run blocking store work off the async runtime.
async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal("Internal server error")
    })
}
