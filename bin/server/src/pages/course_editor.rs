//! Course create and edit forms (`/courses_create_edit`).

use axum::Router;
use axum::extract::{Extension, Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use serde::Deserialize;

use classhub_google::{CourseUpdate, NewCourse};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(edit_form).post(update))
}

/// Form fields shared by the create and edit forms. Browsers submit empty
/// strings for untouched inputs; those are treated as absent.
#[derive(Debug, Deserialize)]
struct CourseForm {
    name: String,
    section: Option<String>,
    description_heading: Option<String>,
    room: Option<String>,
}

fn blank_to_none(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
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
    Ok(views::course_editor_page(&courses))
}

async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    if form.name.trim().is_empty() {
        return Err(state.errors.bad_request("Course name is required."));
    }

    let mut course = NewCourse::new(form.name.trim());
    course.section = blank_to_none(form.section);
    course.description_heading = blank_to_none(form.description_heading);
    course.room = blank_to_none(form.room);

    let created = state
        .classroom
        .create_course(&current.credentials, &course)
        .await
        .map_err(|e| state.errors.upstream(&e))?;

    tracing::info!(course_id = %created.id, "created course");
    Ok(Redirect::to("/courses").into_response())
}

async fn edit_form(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let course = state
        .classroom
        .get_course(&current.credentials, &id)
        .await
        .map_err(|e| state.errors.upstream(&e))?;
    Ok(views::course_edit_page(&course))
}

async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    let update = CourseUpdate {
        name: blank_to_none(Some(form.name)),
        section: blank_to_none(form.section),
        description_heading: blank_to_none(form.description_heading),
        room: blank_to_none(form.room),
    };

    if update.is_empty() {
        // Nothing to patch; go back to the listing.
        return Ok(Redirect::to("/courses").into_response());
    }

    let updated = state
        .classroom
        .update_course(&current.credentials, &id, &update)
        .await
        .map_err(|e| state.errors.upstream(&e))?;

    tracing::info!(course_id = %updated.id, "updated course");
    Ok(Redirect::to("/courses").into_response())
}
