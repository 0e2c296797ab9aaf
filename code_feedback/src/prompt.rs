use askama::Template;
use common::models::AnalysisRequest;

pub const EMPTY_CODE: &str = "[EMPTY CODE]";
pub const NO_ERROR_MESSAGE: &str = "No error message";

#[derive(Template)]
#[template(path = "prompt.txt")]
struct PromptTemplate<'a> {
    code: &'a str,
    error: &'a str,
}

/// Renders the tutoring prompt for a submission. Empty fields are replaced by
/// placeholder markers so the prompt never contains a blank section.
pub fn render(request: &AnalysisRequest) -> Result<String, askama::Error> {
    let code = match request.code.as_str() {
        "" => EMPTY_CODE,
        code => code,
    };
    let error = request
        .error
        .as_deref()
        .filter(|error| !error.is_empty())
        .unwrap_or(NO_ERROR_MESSAGE);

    PromptTemplate { code, error }.render()
}
