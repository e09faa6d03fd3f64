//! Router assembly.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::error;
use crate::pages;
use crate::state::AppState;

/// Builds the application router.
///
/// The course route groups sit behind the session gate; the index, user,
/// and auth routes are public. Unmatched paths fall through to the 404
/// handler of the error translator.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/courses", pages::courses::router())
        .nest("/courses_create_edit", pages::course_editor::router())
        .nest("/courseworks", pages::courseworks::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::session_gate,
        ));

    Router::new()
        .merge(pages::home::router())
        .nest("/users", pages::users::router())
        .route("/login", get(auth::login))
        .route("/auth", get(auth::callback))
        .route("/logout", get(auth::logout))
        .merge(protected)
        .nest_service("/static", ServeDir::new("public"))
        .fallback(error::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
