#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, get_json_body, json_request, make_test_app, seed_student, seed_teacher};
    use axum::http::StatusCode;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn class_analytics_summarises_marks() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);
        let alice = seed_student(&db, "Alice Johnson", "1", "10th").await;
        let bob = seed_student(&db, "Bob Brown", "2", "10th").await;
        seed_student(&db, "Cara Diaz", "3", "9th").await;

        for (student_id, obtained) in [(alice.id, 90.0), (bob.id, 30.0)] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/marks",
                    Some(&auth),
                    Some(json!({
                        "student_id": student_id,
                        "subject": "Mathematics",
                        "marks_obtained": obtained
                    })),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(json_request("GET", "/api/analytics/classes/10th", Some(&auth), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["class_name"], "10th");
        assert_eq!(json["data"]["total_students"], 2);
        assert_eq!(json["data"]["average_percentage"], 60.0);
        assert_eq!(json["data"]["highest_percentage"], 90.0);
        assert_eq!(json["data"]["lowest_percentage"], 30.0);
        assert_eq!(json["data"]["pass_rate"], 50.0);
    }

    #[tokio::test]
    #[serial]
    async fn empty_class_reports_zeroes() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/analytics/classes/12th",
                Some(&bearer(&teacher)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["total_students"], 0);
        assert_eq!(json["data"]["average_percentage"], 0.0);
        assert_eq!(json["data"]["pass_rate"], 0.0);
    }
}
