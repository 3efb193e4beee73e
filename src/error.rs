use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Command(#[from] mealplanner_shared::Error),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_title, error_message) = match self {
            AppError::Command(mealplanner_shared::Error::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not Found", msg)
            }
            AppError::Command(mealplanner_shared::Error::InvalidArgument(msg)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Invalid Argument", msg)
            }
            AppError::Command(mealplanner_shared::Error::Validate(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error",
                errors.to_string(),
            ),
            AppError::Command(mealplanner_shared::Error::Unknown(e)) | AppError::InternalError(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (
            status_code,
            Json(json!({
                "error": error_title,
                "message": error_message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                AppError::from(mealplanner_shared::Error::NotFound("gone".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(mealplanner_shared::Error::InvalidArgument("bad".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(mealplanner_shared::Error::Unknown(anyhow::anyhow!("boom"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
