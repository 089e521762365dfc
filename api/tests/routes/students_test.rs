#[cfg(test)]
mod tests {
    use crate::helpers::{
        bearer, body_bytes, get_json_body, json_request, make_test_app, seed_admin, seed_student,
        seed_teacher,
    };
    use axum::http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    };
    use db::models::student::Model as StudentModel;
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    fn alice() -> Value {
        json!({
            "name": "Alice Johnson",
            "roll_number": "2024001",
            "class_name": "10th",
            "section": "A",
            "email": "alice@student.com",
            "gender": "Female",
            "date_of_birth": "2008-05-15"
        })
    }

    #[tokio::test]
    #[serial]
    async fn list_requires_authentication() {
        let (app, _db) = make_test_app().await;

        let response = app
            .oneshot(json_request("GET", "/api/students", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "You must be logged in to perform this action");
    }

    #[tokio::test]
    #[serial]
    async fn create_then_fetch_by_id_and_roll_number() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/students", Some(&auth), Some(alice())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = get_json_body(response).await;
        let id = json["data"]["id"].as_i64().unwrap();
        assert_eq!(json["data"]["gender"], "Female");
        assert_eq!(json["data"]["is_active"], true);
        assert_eq!(json["data"]["date_of_birth"], "2008-05-15");

        let response = app
            .clone()
            .oneshot(json_request("GET", &format!("/api/students/{id}"), Some(&auth), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request("GET", "/api/students/roll/2024001", Some(&auth), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["id"], id);
    }

    #[tokio::test]
    #[serial]
    async fn duplicate_roll_number_is_bad_request() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);

        app.clone()
            .oneshot(json_request("POST", "/api/students", Some(&auth), Some(alice())))
            .await
            .unwrap();

        let mut again = alice();
        again["email"] = json!("other@student.com");
        let response = app
            .oneshot(json_request("POST", "/api/students", Some(&auth), Some(again)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Student with this roll number already exists");
    }

    #[tokio::test]
    #[serial]
    async fn invalid_email_is_bad_request() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;

        let mut body = alice();
        body["email"] = json!("not-an-email");
        let response = app
            .oneshot(json_request("POST", "/api/students", Some(&bearer(&teacher)), Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert!(json["message"].as_str().unwrap().contains("Invalid email format"));
    }

    #[tokio::test]
    #[serial]
    async fn list_filters_by_class_and_sorts_by_name() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        seed_student(&db, "Zara Khan", "3", "10th").await;
        seed_student(&db, "Bob Brown", "2", "10th").await;
        seed_student(&db, "Cara Diaz", "1", "9th").await;

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/students?class_name=10th",
                Some(&bearer(&teacher)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        let names: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Bob Brown", "Zara Khan"]);
    }

    #[tokio::test]
    #[serial]
    async fn update_changes_only_given_fields() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/students/{}", student.id),
                Some(&bearer(&teacher)),
                Some(json!({ "section": "B" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["section"], "B");
        assert_eq!(json["data"]["name"], "Alice Johnson");
    }

    #[tokio::test]
    #[serial]
    async fn delete_is_admin_only_and_soft() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let admin = seed_admin(&db).await;
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;
        let uri = format!("/api/students/{}", student.id);

        let response = app
            .clone()
            .oneshot(json_request("DELETE", &uri, Some(&bearer(&teacher)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(json_request("DELETE", &uri, Some(&bearer(&admin)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = StudentModel::find_by_id(&db, student.id).await.unwrap().unwrap();
        assert!(!stored.is_active);

        let response = app
            .oneshot(json_request("GET", "/api/students", Some(&bearer(&admin)), None))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn missing_student_is_not_found() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;

        let response = app
            .oneshot(json_request("GET", "/api/students/999", Some(&bearer(&teacher)), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Student not found");
    }

    #[tokio::test]
    #[serial]
    async fn student_marks_and_export() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);
        let student = seed_student(&db, "Alice Johnson", "2024001", "10th").await;

        for (subject, obtained) in [("Mathematics", 85.0), ("Physics", 72.0)] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/marks",
                    Some(&auth),
                    Some(json!({
                        "student_id": student.id,
                        "subject": subject,
                        "exam_type": "Final",
                        "marks_obtained": obtained
                    })),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/students/{}/marks", student.id),
                Some(&auth),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["student"]["roll_number"], "2024001");
        assert_eq!(json["data"]["marks"].as_array().unwrap().len(), 2);

        let response = app
            .oneshot(json_request(
                "GET",
                &format!("/api/students/{}/marks/export", student.id),
                Some(&auth),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION].to_str().unwrap(),
            "attachment; filename=\"Alice_Johnson_marks.csv\""
        );

        let csv = String::from_utf8(body_bytes(response).await).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("Student Name,Roll Number"));
        assert_eq!(lines.count(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn export_filename_is_header_safe() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let student = seed_student(&db, "Eve \"Quote\"\r\nX-Injected: 1", "2024009", "10th").await;

        let response = app
            .oneshot(json_request(
                "GET",
                &format!("/api/students/{}/marks/export", student.id),
                Some(&bearer(&teacher)),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-injected").is_none());
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION].to_str().unwrap(),
            "attachment; filename=\"Eve_Quote_X-Injected_1_marks.csv\""
        );
    }
}
