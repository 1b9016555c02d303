//! Printable form handlers
//!
//! Unlike the JSON endpoints, failures here are reported as plain text so
//! that a browser tab opened on the form shows a readable message.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};

use crate::domain::entities::ControlNumber;
use crate::error::AppError;
use crate::AppState;

const ALLOWED_METHODS: &str = "GET, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";
/// Seconds a browser may cache the preflight answer
const PREFLIGHT_MAX_AGE: &str = "86400";

fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
    ]
}

/// GET /pdf/:numero_control/
///
/// Serves the re-enrollment request inline.
pub async fn generar_pdf(
    State(state): State<AppState>,
    numero_control: Result<Path<i32>, PathRejection>,
) -> Response {
    let numero_control = match numero_control {
        Ok(Path(numero_control)) => numero_control,
        Err(rejection) => {
            let error = AppError::BadRequest(rejection.body_text());
            return (cors_headers(), error.into_plain_text()).into_response();
        }
    };

    match state
        .form_service
        .render(&ControlNumber(numero_control))
        .await
    {
        Ok(form) => (
            [
                (header::CONTENT_TYPE, form.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("inline; filename=\"{}\"", form.filename),
                ),
            ],
            cors_headers(),
            form.bytes,
        )
            .into_response(),
        Err(e) => (cors_headers(), AppError::from(e).into_plain_text()).into_response(),
    }
}

/// OPTIONS /pdf/:numero_control/
///
/// Answered for any path segment; the GET reports a bad control number.
pub async fn pdf_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        cors_headers(),
        [(header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE)],
    )
}
