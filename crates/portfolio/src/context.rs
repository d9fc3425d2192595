use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use crate::config::{AppConfig, AppEnvironment};
use crate::contact::{contact_router, ContactService, SmtpNotifier, SqliteSubmissionRepository};
use crate::error::AppError;
use crate::projects::{projects_router, GithubProjectSource};

pub type SiteContactService = ContactService<SqliteSubmissionRepository, SmtpNotifier>;

/// Long-lived collaborators shared by every request: the store pool, the mail
/// relay, and the outbound HTTP client. Built once at startup.
pub struct AppContext {
    repository: Arc<SqliteSubmissionRepository>,
    contact: Arc<SiteContactService>,
    projects: Arc<GithubProjectSource>,
}

impl AppContext {
    pub async fn build(config: &AppConfig) -> Result<Self, AppError> {
        if config.environment == AppEnvironment::Production && config.uses_default_secret() {
            warn!("SECRET_KEY is unset; using the development placeholder in production");
        }

        let repository = Arc::new(SqliteSubmissionRepository::connect(&config.database.url).await?);
        repository.migrate().await?;

        let notifier = Arc::new(SmtpNotifier::from_config(config.mail.as_ref())?);
        if !notifier.is_enabled() {
            info!("mail relay not configured; contact notifications disabled");
        }

        let projects = Arc::new(GithubProjectSource::new(&config.projects)?);
        let contact = Arc::new(ContactService::new(repository.clone(), notifier));

        Ok(Self {
            repository,
            contact,
            projects,
        })
    }

    /// Contact and project routes bound to this context.
    pub fn router(&self) -> Router {
        contact_router(self.contact.clone()).merge(projects_router(self.projects.clone()))
    }

    pub fn repository(&self) -> &Arc<SqliteSubmissionRepository> {
        &self.repository
    }

    /// Release pooled store connections.
    pub async fn shutdown(self) {
        self.repository.close().await;
        info!("store connections released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ProjectsConfig, ServerConfig, TelemetryConfig};
    use crate::contact::SubmissionRepository;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            secret_key: "test".to_string(),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            mail: None,
            projects: ProjectsConfig {
                api_base: "http://127.0.0.1:1".to_string(),
                account: "octocat".to_string(),
                timeout: Duration::from_secs(1),
            },
        }
    }

    #[tokio::test]
    async fn built_context_serves_contact_and_projects() {
        let context = AppContext::build(&config()).await.expect("context builds");
        let router = context.router();

        let response = router
            .clone()
            .oneshot(
                Request::post("/contact")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "name=Jane&email=jane%40x.com&phone=1234567890&reason=hello",
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(context.repository().count().await.expect("count"), 1);

        let response = router
            .oneshot(
                Request::get("/projects")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        context.shutdown().await;
    }
}
