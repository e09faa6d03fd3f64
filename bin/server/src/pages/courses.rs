//! Course listing and detail.

use axum::Router;
use axum::extract::{Extension, Path, State};
use axum::response::Html;
use axum::routing::get;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/{id}", get(detail))
}

async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let courses = state
        .classroom
        .list_courses(&current.credentials)
        .await
        .map_err(|e| state.errors.upstream(&e))?;
    Ok(views::courses_page(&current.user, &courses))
}

async fn detail(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let course = state
        .classroom
        .get_course(&current.credentials, &id)
        .await
        .map_err(|e| state.errors.upstream(&e))?;
    Ok(views::course_detail_page(&course))
}
