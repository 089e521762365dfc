#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, get_json_body, json_request, make_test_app, seed_admin, seed_teacher};
    use axum::{Router, http::StatusCode};
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    async fn graphql(app: &Router, auth: Option<&str>, query: &str, variables: Value) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/graphql",
                auth,
                Some(json!({ "query": query, "variables": variables })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        get_json_body(response).await
    }

    fn error_code(body: &Value) -> &str {
        body["errors"][0]["extensions"]["code"].as_str().unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn login_mutation_issues_token_usable_for_me() {
        let (app, db) = make_test_app().await;
        seed_teacher(&db, "teacher@school.com").await;

        let body = graphql(
            &app,
            None,
            "mutation($input: LoginInput!) { login(input: $input) { token teacher { email role } } }",
            json!({ "input": { "email": "teacher@school.com", "password": "password123" } }),
        )
        .await;
        assert!(body.get("errors").is_none(), "{body}");
        assert_eq!(body["data"]["login"]["teacher"]["role"], "teacher");

        let token = body["data"]["login"]["token"].as_str().unwrap();
        let auth = format!("Bearer {token}");
        let body = graphql(&app, Some(&auth), "{ me { name email } }", json!({})).await;
        assert_eq!(body["data"]["me"]["name"], "John Smith");
    }

    #[tokio::test]
    #[serial]
    async fn bad_login_is_unauthenticated() {
        let (app, db) = make_test_app().await;
        seed_teacher(&db, "teacher@school.com").await;

        let body = graphql(
            &app,
            None,
            "mutation { login(input: { email: \"teacher@school.com\", password: \"wrong-pass\" }) { token } }",
            json!({}),
        )
        .await;
        assert_eq!(error_code(&body), "UNAUTHENTICATED");
        assert_eq!(body["errors"][0]["message"], "Invalid email or password");
    }

    #[tokio::test]
    #[serial]
    async fn queries_without_token_are_unauthenticated() {
        let (app, _db) = make_test_app().await;

        let body = graphql(&app, None, "{ students { id } }", json!({})).await;
        assert_eq!(error_code(&body), "UNAUTHENTICATED");
    }

    #[tokio::test]
    #[serial]
    async fn teacher_list_is_forbidden_for_non_admin() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let admin = seed_admin(&db).await;

        let body = graphql(&app, Some(&bearer(&teacher)), "{ teachers { id } }", json!({})).await;
        assert_eq!(error_code(&body), "FORBIDDEN");

        let body = graphql(&app, Some(&bearer(&admin)), "{ teachers { email } }", json!({})).await;
        assert_eq!(body["data"]["teachers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn register_teacher_as_admin() {
        let (app, db) = make_test_app().await;
        let admin = seed_admin(&db).await;

        let body = graphql(
            &app,
            Some(&bearer(&admin)),
            "mutation($input: RegisterTeacherInput!) { registerTeacher(input: $input) { email role } }",
            json!({ "input": {
                "name": "Head Teacher",
                "email": "head@school.com",
                "password": "secret123",
                "subject": "History",
                "role": "admin"
            } }),
        )
        .await;
        assert!(body.get("errors").is_none(), "{body}");
        assert_eq!(body["data"]["registerTeacher"]["role"], "admin");
    }

    #[tokio::test]
    #[serial]
    async fn add_student_validation_and_lookup() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);
        let mutation = "mutation($input: StudentInput!) { addStudent(input: $input) { id rollNumber gender } }";
        let input = json!({
            "name": "Alice Johnson",
            "rollNumber": "2024001",
            "className": "10th",
            "section": "A",
            "email": "alice@student.com",
            "gender": "Female"
        });

        let body = graphql(&app, Some(&auth), mutation, json!({ "input": input.clone() })).await;
        assert!(body.get("errors").is_none(), "{body}");
        assert_eq!(body["data"]["addStudent"]["gender"], "Female");

        let body = graphql(&app, Some(&auth), mutation, json!({ "input": input })).await;
        assert_eq!(error_code(&body), "BAD_USER_INPUT");
        assert_eq!(
            body["errors"][0]["message"],
            "Student with this roll number already exists"
        );

        let body = graphql(
            &app,
            Some(&auth),
            "{ studentByRollNumber(rollNumber: \"2024001\") { name } }",
            json!({}),
        )
        .await;
        assert_eq!(body["data"]["studentByRollNumber"]["name"], "Alice Johnson");

        let body = graphql(&app, Some(&auth), "{ student(id: 999) { name } }", json!({})).await;
        assert_eq!(error_code(&body), "NOT_FOUND");
        assert!(body["data"]["student"].is_null());
    }

    #[tokio::test]
    #[serial]
    async fn unknown_gender_is_bad_user_input() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;

        let body = graphql(
            &app,
            Some(&bearer(&teacher)),
            "mutation { addStudent(input: { name: \"X\", rollNumber: \"9\", className: \"10th\", section: \"A\", email: \"x@student.com\", gender: \"Robot\" }) { id } }",
            json!({}),
        )
        .await;
        assert_eq!(error_code(&body), "BAD_USER_INPUT");
    }

    #[tokio::test]
    #[serial]
    async fn delete_student_is_admin_only() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let admin = seed_admin(&db).await;
        let student = crate::helpers::seed_student(&db, "Alice Johnson", "1", "10th").await;
        let mutation = format!("mutation {{ deleteStudent(id: {}) }}", student.id);

        let body = graphql(&app, Some(&bearer(&teacher)), &mutation, json!({})).await;
        assert_eq!(error_code(&body), "FORBIDDEN");

        let body = graphql(&app, Some(&bearer(&admin)), &mutation, json!({})).await;
        assert_eq!(body["data"]["deleteStudent"], true);
    }

    #[tokio::test]
    #[serial]
    async fn unknown_ids_null_only_their_own_field() {
        let (app, db) = make_test_app().await;
        let admin = seed_admin(&db).await;

        let body = graphql(
            &app,
            Some(&bearer(&admin)),
            "{ me { email } student(id: 999) { name } teacher(id: 999) { name } }",
            json!({}),
        )
        .await;
        assert_eq!(body["data"]["me"]["email"], "admin@school.com");
        assert!(body["data"]["student"].is_null());
        assert!(body["data"]["teacher"].is_null());

        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e["extensions"]["code"] == "NOT_FOUND"));
    }
}
