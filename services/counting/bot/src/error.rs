use std::borrow::Cow;

use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{response, Request};
use serde::Serialize;

use expression::EvalError;
use telemetry::IsErr;

#[derive(Debug)]
pub enum ApiError {
    InvalidExpression(String),
    NotFound,
    InternalError(String),
}

impl From<EvalError> for ApiError {
    fn from(e: EvalError) -> Self {
        ApiError::InvalidExpression(e.to_string())
    }
}

impl IsErr for ApiError {
    fn is_err(&self) -> bool {
        matches!(self, ApiError::InternalError(_))
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: Cow<'a, str>,
}

impl<'r> response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (message, status) = match self {
            ApiError::InternalError(e) => {
                error!("Internal Error: {}", e);
                (
                    Cow::Borrowed("Internal Server Error"),
                    Status::InternalServerError,
                )
            }
            ApiError::InvalidExpression(e) => (Cow::Owned(e), Status::BadRequest),
            ApiError::NotFound => (Cow::Borrowed("Not Found"), Status::NotFound),
        };
        response::status::Custom(status, Json(ErrorResponse { message })).respond_to(req)
    }
}
