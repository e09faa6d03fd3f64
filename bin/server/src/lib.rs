//! classhub web server.
//!
//! A small axum application that authenticates users against Google via the
//! OAuth2 authorization-code flow, keeps them in an in-memory cookie session,
//! and proxies course and coursework operations to the Google Classroom API.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod pages;
pub mod state;
pub mod views;
