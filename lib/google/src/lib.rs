//! Google API clients for the classhub server.
//!
//! Two thin HTTP clients over `reqwest`:
//!
//! - [`IdentityResolver`]: fetches the authenticated principal's display
//!   name and primary email from the People API (runs once, during the
//!   OAuth callback).
//! - [`ClassroomClient`]: lists, creates, and edits courses and coursework
//!   through the Classroom API.
//!
//! Both take request-scoped [`AccessCredentials`] on every call. The clients
//! themselves hold no per-user state, so a single instance is safely shared
//! across concurrent requests.

pub mod classroom;
pub mod credential;
pub mod error;
pub mod people;

pub use classroom::{ClassroomClient, Course, CourseUpdate, CourseWork, NewCourse, NewCourseWork};
pub use credential::AccessCredentials;
pub use error::GoogleApiError;
pub use people::{IdentityResolver, Profile};
