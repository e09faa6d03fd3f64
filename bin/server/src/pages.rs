//! Route groups.
//!
//! `courses`, `course_editor`, and `courseworks` sit behind the session
//! gate and proxy to the Classroom API with the credentials the gate
//! threads in. `home` and `users` are public.

pub mod course_editor;
pub mod courses;
pub mod courseworks;
pub mod home;
pub mod users;
