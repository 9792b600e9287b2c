#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use serde_json::Value;

    use crate::error::{validation, AppError};
    use crate::store::StoreError;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::BadRequest("ID mismatch".to_string());
        assert_eq!(format!("{}", error), "Bad request: ID mismatch");

        let error = AppError::NotFound("Book not found".to_string());
        assert_eq!(format!("{}", error), "Not found: Book not found");

        let error = AppError::ValidationError { field: "title".into(), message: "must not be blank".into() };
        assert_eq!(format!("{}", error), "Validation error on field 'title': must not be blank");
    }

    #[test]
    fn test_app_error_into_response() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Concurrency("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal(anyhow::anyhow!("x")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_payload_carries_message() {
        let (status, body) = body_json(AppError::NotFound("No books found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No books found");
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["status"], 404);
        assert!(body.get("timestamp").is_some());
        assert!(body.get("error_id").is_none());
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak_details() {
        let (_, body) = body_json(AppError::Internal(anyhow::anyhow!("password=hunter2"))).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body["error_id"].is_string());
        assert!(!body.to_string().contains("hunter2"));

        let (_, body) = body_json(AppError::Database("NOT NULL constraint failed: books.genre".into())).await;
        assert_eq!(body["message"], "Database error occurred");
        assert_eq!(body["code"], "DATABASE_ERROR");
        assert!(!body.to_string().contains("books.genre"));

        let (_, body) = body_json(AppError::Concurrency("book 3 was modified concurrently".into())).await;
        assert_eq!(body["message"], "Concurrency error occurred");
        assert_eq!(body["code"], "CONCURRENCY_ERROR");
    }

    #[test]
    fn test_from_store_error() {
        assert!(matches!(AppError::from(StoreError::Constraint("c".into())), AppError::Database(_)));
        assert!(matches!(AppError::from(StoreError::Conflict(3)), AppError::Concurrency(_)));
        assert!(matches!(AppError::from(StoreError::Other(anyhow::anyhow!("boom"))), AppError::Internal(_)));
    }

    #[test]
    fn test_require_text() {
        assert!(validation::require_text("Dune", "title").is_ok());

        match validation::require_text("   ", "author") {
            Err(AppError::ValidationError { field, message }) => {
                assert_eq!(field, "author");
                assert_eq!(message, "must not be blank");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }

        match validation::require_text("Du\0ne", "title") {
            Err(AppError::ValidationError { message, .. }) => assert_eq!(message, "contains null characters"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
