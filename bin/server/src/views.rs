//! Minimal server-rendered HTML views.
//!
//! The view layer is intentionally thin: each function takes data and
//! returns a rendered page. All interpolated values are escaped.

use axum::http::StatusCode;
use axum::response::Html;

use classhub_google::{Course, CourseWork};
use classhub_session::User;

/// Escapes a value for interpolation into HTML.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n\
         <body>\n<nav><a href=\"/\">Home</a> <a href=\"/courses\">Courses</a> \
         <a href=\"/courses_create_edit\">Create/Edit</a> \
         <a href=\"/courseworks\">Coursework</a> <a href=\"/logout\">Log out</a></nav>\n\
         {}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

/// The shared error view.
pub fn error_page(status: StatusCode, message: &str, detail: Option<&str>) -> Html<String> {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"error-message\">{}</p>",
        status.as_u16(),
        escape(message)
    );
    if let Some(detail) = detail {
        body.push_str(&format!("\n<pre class=\"error-detail\">{}</pre>", escape(detail)));
    }
    layout("Error", &body)
}

/// Public landing page.
pub fn home_page(user: Option<&User>) -> Html<String> {
    let body = match user {
        Some(user) => format!(
            "<h1>classhub</h1>\n<p>Signed in as {} ({}).</p>\n\
             <p><a href=\"/courses\">Your courses</a></p>",
            escape(&user.username),
            escape(&user.email)
        ),
        None => "<h1>classhub</h1>\n<p><a href=\"/login\">Sign in with Google</a></p>".to_string(),
    };
    layout("classhub", &body)
}

/// Public user page.
pub fn users_page(user: Option<&User>) -> Html<String> {
    let body = match user {
        Some(user) => format!(
            "<h1>Your profile</h1>\n<dl><dt>Name</dt><dd>{}</dd>\
             <dt>Email</dt><dd>{}</dd></dl>",
            escape(&user.username),
            escape(&user.email)
        ),
        None => "<h1>Your profile</h1>\n<p>Not signed in. <a href=\"/login\">Sign in</a></p>"
            .to_string(),
    };
    layout("Users", &body)
}

/// Course listing.
pub fn courses_page(user: &User, courses: &[Course]) -> Html<String> {
    let mut body = format!("<h1>Courses for {}</h1>\n", escape(&user.username));
    if courses.is_empty() {
        body.push_str("<p>No courses yet.</p>");
    } else {
        body.push_str("<ul>\n");
        for course in courses {
            body.push_str(&format!(
                "<li><a href=\"/courses/{}\">{}</a>{}</li>\n",
                escape(&course.id),
                escape(&course.name),
                course
                    .section
                    .as_deref()
                    .map(|s| format!(" — {}", escape(s)))
                    .unwrap_or_default()
            ));
        }
        body.push_str("</ul>");
    }
    layout("Courses", &body)
}

/// Single course detail.
pub fn course_detail_page(course: &Course) -> Html<String> {
    let mut body = format!("<h1>{}</h1>\n<dl>", escape(&course.name));
    let optional = [
        ("Section", course.section.as_deref()),
        ("Heading", course.description_heading.as_deref()),
        ("Room", course.room.as_deref()),
        ("State", course.course_state.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            body.push_str(&format!("<dt>{label}</dt><dd>{}</dd>", escape(value)));
        }
    }
    body.push_str("</dl>");
    body.push_str(&format!(
        "\n<p><a href=\"/courses_create_edit/{}\">Edit</a></p>",
        escape(&course.id)
    ));
    layout(&course.name, &body)
}

fn course_form(action: &str, submit: &str, course: Option<&Course>) -> String {
    let value = |field: Option<&str>| field.map(escape).unwrap_or_default();
    format!(
        "<form method=\"post\" action=\"{}\">\n\
         <label>Name <input name=\"name\" value=\"{}\" required></label>\n\
         <label>Section <input name=\"section\" value=\"{}\"></label>\n\
         <label>Heading <input name=\"description_heading\" value=\"{}\"></label>\n\
         <label>Room <input name=\"room\" value=\"{}\"></label>\n\
         <button type=\"submit\">{}</button>\n</form>",
        escape(action),
        value(course.map(|c| c.name.as_str())),
        value(course.and_then(|c| c.section.as_deref())),
        value(course.and_then(|c| c.description_heading.as_deref())),
        value(course.and_then(|c| c.room.as_deref())),
        escape(submit)
    )
}

/// Create form plus the list of editable courses.
pub fn course_editor_page(courses: &[Course]) -> Html<String> {
    let mut body = format!(
        "<h1>Create a course</h1>\n{}\n<h2>Edit an existing course</h2>\n<ul>\n",
        course_form("/courses_create_edit", "Create", None)
    );
    for course in courses {
        body.push_str(&format!(
            "<li><a href=\"/courses_create_edit/{}\">{}</a></li>\n",
            escape(&course.id),
            escape(&course.name)
        ));
    }
    body.push_str("</ul>");
    layout("Create/Edit courses", &body)
}

/// Prefilled edit form for one course.
pub fn course_edit_page(course: &Course) -> Html<String> {
    let body = format!(
        "<h1>Edit {}</h1>\n{}",
        escape(&course.name),
        course_form(
            &format!("/courses_create_edit/{}", course.id),
            "Save",
            Some(course)
        )
    );
    layout("Edit course", &body)
}

/// Course chooser for the coursework section.
pub fn courseworks_index_page(courses: &[Course]) -> Html<String> {
    let mut body = "<h1>Coursework</h1>\n<p>Pick a course:</p>\n<ul>\n".to_string();
    for course in courses {
        body.push_str(&format!(
            "<li><a href=\"/courseworks/{}\">{}</a></li>\n",
            escape(&course.id),
            escape(&course.name)
        ));
    }
    body.push_str("</ul>");
    layout("Coursework", &body)
}

/// Coursework listing and create form for one course.
pub fn courseworks_page(course: &Course, items: &[CourseWork]) -> Html<String> {
    let mut body = format!("<h1>Coursework — {}</h1>\n", escape(&course.name));
    if items.is_empty() {
        body.push_str("<p>No coursework yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for item in items {
            body.push_str(&format!(
                "<li>{}{}</li>\n",
                escape(&item.title),
                item.description
                    .as_deref()
                    .map(|d| format!(" — {}", escape(d)))
                    .unwrap_or_default()
            ));
        }
        body.push_str("</ul>\n");
    }
    body.push_str(&format!(
        "<h2>New assignment</h2>\n<form method=\"post\" action=\"/courseworks/{}\">\n\
         <label>Title <input name=\"title\" required></label>\n\
         <label>Description <input name=\"description\"></label>\n\
         <button type=\"submit\">Create</button>\n</form>",
        escape(&course.id)
    ));
    layout("Coursework", &body)
}
