use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};
use tracing::warn;

use super::source::ProjectSource;
use crate::pages;

/// Router exposing the project listing page.
pub fn projects_router<S>(source: Arc<S>) -> Router
where
    S: ProjectSource + 'static,
{
    Router::new()
        .route("/projects", get(projects_handler::<S>))
        .with_state(source)
}

pub(crate) async fn projects_handler<S>(State(source): State<Arc<S>>) -> Html<String>
where
    S: ProjectSource + 'static,
{
    let cards = match source.fetch().await {
        Ok(cards) => cards,
        Err(err) => {
            warn!(error = %err, "project listing unavailable; rendering empty list");
            Vec::new()
        }
    };

    Html(pages::projects(&cards))
}
