use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use tracing::{debug, error};

use crate::domain::{AdviceOutcome, FormInput};

use super::super::view::{render_page, PageModel};
use super::super::Container;

pub const INVALID_BODY_WARNING: &str = "The request body is not a valid advice form.";

/// Application state shared with all routes.
#[derive(Clone)]
pub struct WebState {
    container: Arc<Container>,
}

impl WebState {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }
}

/// GET / - the empty, prefilled form. Never calls the generative API.
pub async fn index(State(state): State<WebState>) -> Response {
    let model = PageModel::new(&FormInput::prefilled(), state.container.has_configured_key());
    page_response(&model)
}

/// POST /advice - the submit action. Re-renders the form with the outcome.
pub async fn submit_form(
    State(state): State<WebState>,
    Form(input): Form<FormInput>,
) -> Response {
    let outcome = state.container.submit_use_case().submit(&input).await;
    let model =
        PageModel::new(&input, state.container.has_configured_key()).with_outcome(outcome);
    page_response(&model)
}

/// POST /api/advice - the same submit action for JSON clients.
pub async fn submit_json(
    State(state): State<WebState>,
    payload: Result<Json<FormInput>, JsonRejection>,
) -> (StatusCode, Json<AdviceOutcome>) {
    let outcome = match payload {
        Ok(Json(input)) => state.container.submit_use_case().submit(&input).await,
        Err(rejection) => {
            // The rejection text can quote body values, so it stays out of the reply.
            debug!("Rejected advice body with status {}", rejection.status());
            AdviceOutcome::validation_warning(INVALID_BODY_WARNING)
        }
    };
    (status_for(&outcome), Json(outcome))
}

/// GET /health - liveness.
pub async fn health() -> &'static str {
    "ok"
}

pub fn status_for(outcome: &AdviceOutcome) -> StatusCode {
    match outcome {
        AdviceOutcome::Recommendations { .. } => StatusCode::OK,
        AdviceOutcome::ValidationWarning { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AdviceOutcome::ConfigurationError { .. } => StatusCode::BAD_REQUEST,
        AdviceOutcome::RemoteFailure { .. } | AdviceOutcome::EmptyResponse { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn page_response(model: &PageModel) -> Response {
    match render_page(model) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.detail()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_each_outcome() {
        assert_eq!(
            status_for(&AdviceOutcome::Recommendations {
                text: "x".to_string()
            }),
            StatusCode::OK
        );
        assert_eq!(
            status_for(&AdviceOutcome::validation_warning("x")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&AdviceOutcome::configuration_error("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AdviceOutcome::RemoteFailure {
                message: "x".to_string()
            }),
            StatusCode::BAD_GATEWAY
        );
    }
}
