use crate::service::{AnalysisError, AnalysisService};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::models::{AnalysisRequest, AnalysisResult};
use log::error;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalysisErrorResponse {
    pub code: u16,
    pub message: &'static str,
}

type AnalysisErrorReply = (StatusCode, Json<AnalysisErrorResponse>);

#[utoipa::path(post, path = "/analyze", request_body = AnalysisRequest, responses((status = OK, body = AnalysisResult), (status = UNPROCESSABLE_ENTITY), (status = INTERNAL_SERVER_ERROR, body = AnalysisErrorResponse)), description = "Explains the error in a student's code without giving away the solution")]
#[axum::debug_handler]
pub async fn analyze(
    service: State<Arc<AnalysisService>>,
    body: Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AnalysisErrorReply> {
    service.analyze(&body).await.map(Json).map_err(|err| {
        error!("Error while handling analyze request: {err}");
        err_to_response(&err)
    })
}

fn err_to_response(err: &AnalysisError) -> AnalysisErrorReply {
    let message = match err {
        AnalysisError::Prompt(_) => "an error occurred while building the prompt",
        AnalysisError::Transport(_) => "an error occurred while sending llm request",
        AnalysisError::UpstreamStatus(..) => "the llm service responded with an error",
        AnalysisError::MalformedResponse(_) => {
            "an error occurred while processing the llm response"
        }
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AnalysisErrorResponse {
            code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message,
        }),
    )
}
