#[cfg(test)]
mod tests {
    use crate::helpers::{
        bearer, body_bytes, get_json_body, json_request, make_test_app, seed_admin, seed_student,
        seed_teacher,
    };
    use axum::{
        Router,
        http::{StatusCode, header::CONTENT_DISPOSITION},
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;
    use util::config::{AppConfig, DuplicateMarksPolicy};

    async fn post_marks(app: &Router, auth: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/marks", Some(auth), Some(body)))
            .await
            .unwrap();
        let status = response.status();
        (status, get_json_body(response).await)
    }

    #[tokio::test]
    #[serial]
    async fn create_derives_percentage_and_grade() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;

        let (status, json) = post_marks(
            &app,
            &bearer(&teacher),
            json!({
                "student_id": student.id,
                "subject": "Mathematics",
                "marks_obtained": 85,
                "total_marks": 100,
                "percentage": 12,
                "grade": "F"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["percentage"], 85.0);
        assert_eq!(json["data"]["grade"], "A");
        assert_eq!(json["data"]["entered_by"], teacher.id);
        assert_eq!(json["data"]["exam_type"], "Midterm");
        assert_eq!(json["data"]["semester"], "1st");
    }

    #[tokio::test]
    #[serial]
    async fn create_rejects_out_of_range_and_unknown_student() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;

        let (status, json) = post_marks(
            &app,
            &auth,
            json!({ "student_id": student.id, "subject": "Mathematics", "marks_obtained": 150 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Marks obtained must be between 0 and 100")
        );

        let (status, json) = post_marks(
            &app,
            &auth,
            json!({ "student_id": 999, "subject": "Mathematics", "marks_obtained": 50 }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Student not found");
    }

    #[tokio::test]
    #[serial]
    async fn anonymous_cannot_create_marks() {
        let (app, db) = make_test_app().await;
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/marks",
                None,
                Some(json!({ "student_id": student.id, "subject": "Art", "marks_obtained": 50 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn duplicate_marks_follow_configured_policy() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;
        let body = json!({
            "student_id": student.id,
            "subject": "Mathematics",
            "exam_type": "Final",
            "marks_obtained": 70,
            "academic_year": "2024"
        });

        AppConfig::set_duplicate_marks_policy(DuplicateMarksPolicy::Reject);
        let (status, _) = post_marks(&app, &auth, body.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, json) = post_marks(&app, &auth, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "Marks already exist for this student, subject, exam type and academic year"
        );

        AppConfig::set_duplicate_marks_policy(DuplicateMarksPolicy::Allow);
        let (status, _) = post_marks(&app, &auth, body).await;
        AppConfig::set_duplicate_marks_policy(DuplicateMarksPolicy::Reject);
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    #[serial]
    async fn only_owner_or_admin_may_update_and_delete() {
        let (app, db) = make_test_app().await;
        let owner = seed_teacher(&db, "owner@school.com").await;
        let other = seed_teacher(&db, "other@school.com").await;
        let admin = seed_admin(&db).await;
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;

        let (_, json) = post_marks(
            &app,
            &bearer(&owner),
            json!({ "student_id": student.id, "subject": "Mathematics", "marks_obtained": 85 }),
        )
        .await;
        let uri = format!("/api/marks/{}", json["data"]["id"]);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &uri,
                Some(&bearer(&other)),
                Some(json!({ "marks_obtained": 90 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "You can only update marks you entered");

        let response = app
            .clone()
            .oneshot(json_request("DELETE", &uri, Some(&bearer(&other)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "You can only delete marks you entered");

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &uri,
                Some(&bearer(&admin)),
                Some(json!({ "marks_obtained": 92, "remarks": "Regraded" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["percentage"], 92.0);
        assert_eq!(json["data"]["grade"], "A+");
        assert_eq!(json["data"]["entered_by"], owner.id);

        let response = app
            .clone()
            .oneshot(json_request("DELETE", &uri, Some(&bearer(&owner)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request("GET", &uri, Some(&bearer(&owner)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn anonymous_update_of_missing_marks_is_unauthorized() {
        let (app, _db) = make_test_app().await;

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/marks/999",
                None,
                Some(json!({ "marks_obtained": 10 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn list_filters_and_rejects_bad_exam_type() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;

        for (subject, exam_type) in [("Mathematics", "Quiz"), ("Physics", "Quiz"), ("Physics", "Final")] {
            post_marks(
                &app,
                &auth,
                json!({
                    "student_id": student.id,
                    "subject": subject,
                    "exam_type": exam_type,
                    "marks_obtained": 60
                }),
            )
            .await;
        }

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/marks?subject=Physics&exam_type=quiz",
                Some(&auth),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["subject"], "Physics");
        assert_eq!(rows[0]["exam_type"], "Quiz");

        let response = app
            .oneshot(json_request("GET", "/api/marks?exam_type=Oral", Some(&auth), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn export_all_marks_is_csv_attachment() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;
        post_marks(
            &app,
            &auth,
            json!({ "student_id": student.id, "subject": "Mathematics", "marks_obtained": 35 }),
        )
        .await;

        let response = app
            .oneshot(json_request("GET", "/api/marks/export", Some(&auth), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION].to_str().unwrap(),
            "attachment; filename=\"all_students_marks.csv\""
        );
        let csv = String::from_utf8(body_bytes(response).await).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("Alice Johnson,2024001,10th,A,Mathematics,Midterm"));
        assert!(row.contains("35.00%,F"));
    }
}
