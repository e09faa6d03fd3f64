//! Classroom API client.
//!
//! Thin proxy over the `courses` and `courseWork` resources: listing follows
//! `nextPageToken` until exhausted, creation posts the new resource, editing
//! patches with an `updateMask` built from the fields present. Every call
//! takes the requesting user's [`AccessCredentials`].

use serde::{Deserialize, Serialize};

use crate::credential::AccessCredentials;
use crate::error::GoogleApiError;

/// Google Classroom API base URL.
const CLASSROOM_API_BASE: &str = "https://classroom.googleapis.com";

/// Page size requested from list endpoints.
const PAGE_SIZE: u32 = 50;

/// A course as returned by the Classroom API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_link: Option<String>,
}

/// Fields for creating a course.
///
/// `owner_id` defaults to `"me"`, the authenticated teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub owner_id: String,
}

impl NewCourse {
    /// Creates a course owned by the authenticated user.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section: None,
            description_heading: None,
            room: None,
            owner_id: "me".to_string(),
        }
    }
}

/// Partial course edit.
///
/// Only the fields present are patched; the update mask is derived from
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl CourseUpdate {
    /// Builds the `updateMask` value from the fields present.
    #[must_use]
    pub fn update_mask(&self) -> String {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.section.is_some() {
            fields.push("section");
        }
        if self.description_heading.is_some() {
            fields.push("descriptionHeading");
        }
        if self.room.is_some() {
            fields.push("room");
        }
        fields.join(",")
    }

    /// Whether the update carries any field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.update_mask().is_empty()
    }
}

/// A coursework item as returned by the Classroom API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWork {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_link: Option<String>,
}

/// Fields for creating a coursework item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseWork {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub work_type: String,
}

impl NewCourseWork {
    /// Creates an assignment, the default coursework type.
    #[must_use]
    pub fn assignment(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            work_type: "ASSIGNMENT".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListCoursesResponse {
    #[serde(default)]
    courses: Vec<Course>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListCourseWorkResponse {
    #[serde(default)]
    course_work: Vec<CourseWork>,
    next_page_token: Option<String>,
}

/// Client for the Classroom API.
#[derive(Debug, Clone)]
pub struct ClassroomClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for ClassroomClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassroomClient {
    /// Creates a client against the production Classroom API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(CLASSROOM_API_BASE)
    }

    /// Creates a client against an alternate endpoint (tests).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Lists all courses visible to the user, following pagination.
    pub async fn list_courses(
        &self,
        credentials: &AccessCredentials,
    ) -> Result<Vec<Course>, GoogleApiError> {
        let url = format!("{}/v1/courses", self.base_url);
        let mut courses = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&url)
                .query(&[("pageSize", PAGE_SIZE.to_string())])
                .bearer_auth(credentials.bearer());
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListCoursesResponse = self.read_json(request.send().await).await?;
            courses.extend(page.courses);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(count = courses.len(), "listed courses");
        Ok(courses)
    }

    /// Fetches a single course by id.
    pub async fn get_course(
        &self,
        credentials: &AccessCredentials,
        course_id: &str,
    ) -> Result<Course, GoogleApiError> {
        let url = format!("{}/v1/courses/{course_id}", self.base_url);
        let request = self.http.get(&url).bearer_auth(credentials.bearer());
        self.read_json(request.send().await).await
    }

    /// Creates a course.
    pub async fn create_course(
        &self,
        credentials: &AccessCredentials,
        course: &NewCourse,
    ) -> Result<Course, GoogleApiError> {
        let url = format!("{}/v1/courses", self.base_url);
        let request = self
            .http
            .post(&url)
            .bearer_auth(credentials.bearer())
            .json(course);
        self.read_json(request.send().await).await
    }

    /// Patches a course with the fields present in the update.
    pub async fn update_course(
        &self,
        credentials: &AccessCredentials,
        course_id: &str,
        update: &CourseUpdate,
    ) -> Result<Course, GoogleApiError> {
        let url = format!("{}/v1/courses/{course_id}", self.base_url);
        let request = self
            .http
            .patch(&url)
            .query(&[("updateMask", update.update_mask())])
            .bearer_auth(credentials.bearer())
            .json(update);
        self.read_json(request.send().await).await
    }

    /// Lists all coursework for a course, following pagination.
    pub async fn list_coursework(
        &self,
        credentials: &AccessCredentials,
        course_id: &str,
    ) -> Result<Vec<CourseWork>, GoogleApiError> {
        let url = format!("{}/v1/courses/{course_id}/courseWork", self.base_url);
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&url)
                .query(&[("pageSize", PAGE_SIZE.to_string())])
                .bearer_auth(credentials.bearer());
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListCourseWorkResponse = self.read_json(request.send().await).await?;
            items.extend(page.course_work);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Creates a coursework item under a course.
    pub async fn create_coursework(
        &self,
        credentials: &AccessCredentials,
        course_id: &str,
        coursework: &NewCourseWork,
    ) -> Result<CourseWork, GoogleApiError> {
        let url = format!("{}/v1/courses/{course_id}/courseWork", self.base_url);
        let request = self
            .http
            .post(&url)
            .bearer_auth(credentials.bearer())
            .json(coursework);
        self.read_json(request.send().await).await
    }

    /// Checks the response status and deserializes the body.
    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, GoogleApiError> {
        let response = response.map_err(|e| GoogleApiError::request(&e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response.json().await.map_err(|e| GoogleApiError::request(&e))
    }
}
