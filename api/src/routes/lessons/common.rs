use db::models::lesson_progress::Model as ProgressModel;
use db::progress::Telemetry;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Optional viewing telemetry. Absent fields leave stored values unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TelemetryRequest {
    #[validate(range(min = 0, message = "time_spent must not be negative"))]
    pub time_spent: Option<i64>,

    #[validate(range(min = 0, message = "last_position must not be negative"))]
    pub last_position: Option<i64>,

    #[validate(range(min = 0, message = "watched_duration must not be negative"))]
    pub watched_duration: Option<i64>,

    #[validate(range(min = 0, message = "drop_off_point must not be negative"))]
    pub drop_off_point: Option<i64>,
}

impl From<TelemetryRequest> for Telemetry {
    fn from(r: TelemetryRequest) -> Self {
        Telemetry {
            time_spent: r.time_spent,
            last_position: r.last_position,
            watched_duration: r.watched_duration,
            drop_off_point: r.drop_off_point,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LessonProgressResponse {
    pub user_id: i64,
    pub lesson_id: i64,
    pub completed: bool,
    pub completed_at: Option<String>,
    pub time_spent: Option<i64>,
    pub last_position: Option<i64>,
    pub watched_duration: Option<i64>,
    pub drop_off_point: Option<i64>,
    pub updated_at: String,
}

impl From<ProgressModel> for LessonProgressResponse {
    fn from(p: ProgressModel) -> Self {
        Self {
            user_id: p.user_id,
            lesson_id: p.lesson_id,
            completed: p.completed,
            completed_at: p.completed_at.map(|t| t.to_rfc3339()),
            time_spent: p.time_spent,
            last_position: p.last_position,
            watched_duration: p.watched_duration,
            drop_off_point: p.drop_off_point,
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub progress: LessonProgressResponse,
    pub course_progress: i32,
}
