use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use crate::error::AppError;

/// JSON request body whose rejection uses the `{kind, message}` envelope
/// instead of axum's plain-text response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "request body rejected");
        let reason = match rejection {
            JsonRejection::MissingJsonContentType(_) => "expected a JSON request body",
            JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
            JsonRejection::JsonDataError(_) => "request body has missing or invalid fields",
            _ => "request body could not be read",
        };
        Self::InvalidRequest(reason.to_owned())
    }
}
