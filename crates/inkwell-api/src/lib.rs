pub mod entries;
pub mod error;
pub mod navigation;
pub mod render;
pub mod state;
pub mod validate;

use axum::{
    Router,
    routing::{get, post},
};

pub use state::{AppState, AppStateInner};

/// All public routes. Transport layers (tracing, connect info) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(entries::latest))
        .route("/entry/{id}", get(entries::show_entry))
        .route("/save", post(entries::save_entry))
        .with_state(state)
}
