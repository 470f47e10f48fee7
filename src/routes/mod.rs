pub mod auth;
pub mod place;

use axum::{extract::Extension, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Merge auth routes (signup & login)
        .merge(auth::auth_router())
        // Merge dining-place routes (create, search, availability, booking)
        .merge(place::place_router())
        .layer(Extension(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
