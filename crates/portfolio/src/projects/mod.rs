//! Public repository listing proxied from the source-hosting API.

pub mod router;
pub mod source;

pub use router::projects_router;
pub use source::{GithubProjectSource, ProjectCard, ProjectSource, UpstreamFetchError};
