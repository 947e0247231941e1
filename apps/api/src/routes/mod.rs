pub mod gift_ideas;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(gift_ideas::handle_gift_ideas))
        .with_state(state)
}
