use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Uniform success envelope: `{ statusCode, message, data }`.
pub struct SuccessResponse<T: Serialize> {
    pub data: T,
    pub message: String,
    pub status: StatusCode,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status: StatusCode::OK,
        }
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status: StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> IntoResponse for SuccessResponse<T> {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
            "data": self.data,
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_and_created_status() {
        let ok = SuccessResponse::new(json!({"a": 1}), "done");
        assert_eq!(ok.status, StatusCode::OK);

        let created = SuccessResponse::created(json!(null), "made");
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.message, "made");
    }
}
