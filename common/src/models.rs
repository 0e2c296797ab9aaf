use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Student submission to be explained.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalysisRequest {
    /// Source code as written by the student, may be empty.
    pub code: String,
    /// Error message produced by the code, if any.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalysisResult {
    pub analysis: String,
}
