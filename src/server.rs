use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::configuration::ServiceConfiguration;
use crate::error::ContextError;
use crate::fields::RequestFields;
use crate::{merge, report, template, text_report};

pub const TEXT_REPORT_CONFIRMATION: &str = "PDF com texto gerado!";
pub const TEMPLATE_CONFIRMATION: &str = "PDF com template preenchido!";
pub const MULTIPAGE_CONFIRMATION: &str = "PDF multipage gerado!";
pub const MERGE_CONFIRMATION: &str = "PDFs mesclados para o CPF!";

/// The state shared by all the handlers, the configuration is never modified once the server is running.
#[derive(Clone)]
pub struct AppState {
    pub configuration: Arc<ServiceConfiguration>,
}

#[derive(Debug, Deserialize)]
pub struct MergeQuery {
    pub cpf: String,
}

type HandlerResponse = (StatusCode, String);

/// Builds the router of the service with its four document endpoints and the health check.
pub fn build_router(configuration: ServiceConfiguration) -> Router {
    let state = AppState {
        configuration: Arc::new(configuration),
    };

    Router::new()
        .route("/pdf/text", post(text_report_handler))
        .route("/pdf/template", post(template_handler))
        .route("/pdf/multipage", get(multipage_handler))
        .route("/pdf/merge", get(merge_handler))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn text_report_handler(
    State(state): State<AppState>,
    Json(fields): Json<RequestFields>,
) -> HandlerResponse {
    run_document_job(state, TEXT_REPORT_CONFIRMATION, move |configuration| {
        text_report::generate_text_report(configuration, &fields)
    })
    .await
}

async fn template_handler(
    State(state): State<AppState>,
    Json(fields): Json<RequestFields>,
) -> HandlerResponse {
    run_document_job(state, TEMPLATE_CONFIRMATION, move |configuration| {
        template::fill_template(configuration, &fields)
    })
    .await
}

async fn multipage_handler(State(state): State<AppState>) -> HandlerResponse {
    run_document_job(state, MULTIPAGE_CONFIRMATION, report::generate_report).await
}

async fn merge_handler(
    State(state): State<AppState>,
    Query(query): Query<MergeQuery>,
) -> HandlerResponse {
    run_document_job(state, MERGE_CONFIRMATION, move |configuration| {
        merge::merge_by_identifier(configuration, &query.cpf)
    })
    .await
}

async fn health_check() -> &'static str {
    "ok"
}

/// Runs the document generation on the blocking pool and maps its outcome to a response.
/// Failures are logged and, unless the configuration asks to report them, answered with the
/// same confirmation as a success.
async fn run_document_job<F>(state: AppState, confirmation: &'static str, job: F) -> HandlerResponse
where
    F: FnOnce(&ServiceConfiguration) -> Result<PathBuf, ContextError> + Send + 'static,
{
    let configuration = Arc::clone(&state.configuration);
    let outcome = tokio::task::spawn_blocking(move || job(configuration.as_ref()))
        .await
        .unwrap_or_else(|error| {
            Err(ContextError::with_error(
                "The document generation task did not complete",
                &error,
            ))
        });

    match outcome {
        Ok(output_path) => {
            log::debug!("Request answered with {:?}", output_path);
            (StatusCode::OK, confirmation.to_string())
        }
        Err(error) => {
            log::error!("{}", error);
            if state.configuration.report_failures {
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
            } else {
                (StatusCode::OK, confirmation.to_string())
            }
        }
    }
}
