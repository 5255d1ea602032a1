use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use db::certificates::CertificateDescriptor;
use serde::Serialize;
use util::{config, state::AppState};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{ErrorCode, core_error_response};
use crate::services::certificate::{
    CertificateRenderer, HtmlCertificateRenderer, IssuedCertificate, generate_certificate_id,
};

#[derive(Debug, Serialize)]
pub struct CertificateResponse {
    pub course_id: i64,
    pub course_title: String,
    pub student_name: String,
    pub instructor_name: String,
    pub completion_date: String,
    pub total_lessons: u64,
    pub completed_lessons: u64,
}

impl From<CertificateDescriptor> for CertificateResponse {
    fn from(d: CertificateDescriptor) -> Self {
        Self {
            course_id: d.course_id,
            course_title: d.course_title,
            student_name: d.student_name,
            instructor_name: d.instructor_name,
            completion_date: d.completion_date.to_rfc3339(),
            total_lessons: d.total_lessons,
            completed_lessons: d.completed_lessons,
        }
    }
}

/// GET /api/me/certificates
///
/// Every course the caller has fully completed. Computed on each request.
pub async fn list_my_certificates(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let principal = user.principal();

    match db::certificates::list_eligible_certificates(state.db(), principal.id).await {
        Ok(certificates) => {
            let certificates: Vec<CertificateResponse> = certificates
                .into_iter()
                .map(CertificateResponse::from)
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(certificates, "Certificates retrieved")),
            )
                .into_response()
        }
        Err(e) => core_error_response(e),
    }
}

/// GET /api/me/certificates/{course_id}/download
///
/// Renders the caller's certificate for a completed course as an HTML
/// attachment. A fresh certificate id is generated for every download.
///
/// ### Responses
/// - `200 OK` with `text/html` body
/// - `403 Forbidden` (`NOT_ENROLLED`)
/// - `404 Not Found` (`NOT_FOUND`)
/// - `412 Precondition Failed` (`COURSE_INCOMPLETE`) while lessons remain
pub async fn download_certificate(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    let principal = user.principal();

    let descriptor =
        match db::certificates::certificate_for_course(state.db(), principal.id, course_id).await {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => {
                return (
                    StatusCode::PRECONDITION_FAILED,
                    Json(ApiResponse::failure(
                        ErrorCode {
                            code: "COURSE_INCOMPLETE",
                        },
                        "Course is not fully completed",
                    )),
                )
                    .into_response();
            }
            Err(e) => return core_error_response(e),
        };

    let issued = IssuedCertificate::from_descriptor(
        &descriptor,
        generate_certificate_id(Utc::now()),
        config::organization_name(),
        config::certificate_verify_url(),
    );
    let rendered = match HtmlCertificateRenderer.render(&issued) {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::error!(error = %e, "Failed to render certificate");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(
                    ErrorCode { code: "INTERNAL" },
                    "Internal server error",
                )),
            )
                .into_response();
        }
    };

    tracing::info!(
        user = principal.id,
        course_id,
        certificate_id = %issued.certificate_id,
        "Certificate rendered"
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(rendered.content_type));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", rendered.file_name))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, headers, rendered.body).into_response()
}
