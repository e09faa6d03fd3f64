//! Public user pages.

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum_extra::extract::SignedCookieJar;

use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>, jar: SignedCookieJar) -> Html<String> {
    let user = state.session_user(&jar).await;
    views::users_page(user.as_ref())
}
