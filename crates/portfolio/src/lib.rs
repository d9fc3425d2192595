//! Personal portfolio site: landing page, contact intake, and a project listing
//! proxied from a public source-hosting API.

pub mod config;
pub mod contact;
pub mod context;
pub mod error;
pub mod pages;
pub mod projects;
pub mod telemetry;
