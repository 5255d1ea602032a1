use db::models::enrollment::Model as EnrollmentModel;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub user_id: i64,
    pub course_id: i64,
    pub progress: i32,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EnrollmentModel> for EnrollmentResponse {
    fn from(e: EnrollmentModel) -> Self {
        Self {
            user_id: e.user_id,
            course_id: e.course_id,
            progress: e.progress,
            status: e.status.to_string(),
            created_at: e.created_at.to_rfc3339(),
            updated_at: e.updated_at.to_rfc3339(),
        }
    }
}
