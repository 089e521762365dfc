#[cfg(test)]
mod tests {
    use crate::helpers::{get_json_body, json_request, make_test_app};
    use axum::http::StatusCode;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn health_check_is_public() {
        let (app, _db) = make_test_app().await;

        let response = app
            .oneshot(json_request("GET", "/api/health", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["status"], "OK");
    }
}
