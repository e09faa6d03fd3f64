//! Coursework listing and creation (`/courseworks`).

use axum::Router;
use axum::extract::{Extension, Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use serde::Deserialize;

use classhub_google::NewCourseWork;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{course_id}", get(list).post(create))
}

#[derive(Debug, Deserialize)]
struct CourseWorkForm {
    title: String,
    description: Option<String>,
}

async fn index(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let courses = state
        .classroom
        .list_courses(&current.credentials)
        .await
        .map_err(|e| state.errors.upstream(&e))?;
    Ok(views::courseworks_index_page(&courses))
}

async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(course_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let course = state
        .classroom
        .get_course(&current.credentials, &course_id)
        .await
        .map_err(|e| state.errors.upstream(&e))?;
    let items = state
        .classroom
        .list_coursework(&current.credentials, &course_id)
        .await
        .map_err(|e| state.errors.upstream(&e))?;
    Ok(views::courseworks_page(&course, &items))
}

async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(course_id): Path<String>,
    Form(form): Form<CourseWorkForm>,
) -> Result<Response, AppError> {
    if form.title.trim().is_empty() {
        return Err(state.errors.bad_request("Coursework title is required."));
    }

    let mut coursework = NewCourseWork::assignment(form.title.trim());
    coursework.description = form.description.filter(|d| !d.trim().is_empty());

    let created = state
        .classroom
        .create_coursework(&current.credentials, &course_id, &coursework)
        .await
        .map_err(|e| state.errors.upstream(&e))?;

    tracing::info!(course_id = %course_id, coursework_id = %created.id, "created coursework");
    Ok(Redirect::to(&format!("/courseworks/{course_id}")).into_response())
}
