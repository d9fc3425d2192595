use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};

use super::domain::{ContactForm, ContactStatus};
use super::notifier::Notifier;
use super::repository::SubmissionRepository;
use super::service::ContactService;
use crate::error::AppError;
use crate::pages;

/// Router builder exposing the contact page and form intake.
pub fn contact_router<R, N>(service: Arc<ContactService<R, N>>) -> Router
where
    R: SubmissionRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/contact",
            get(contact_page).post(submit_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn contact_page() -> Html<String> {
    Html(pages::contact(ContactStatus::NotSubmitted))
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<ContactService<R, N>>>,
    Form(form): Form<ContactForm>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: Notifier + 'static,
{
    match service.submit(form).await {
        // Rejections re-render the form like an acceptance; only the marker differs.
        Ok(outcome) => (StatusCode::OK, Html(pages::contact(outcome.status()))).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
