#[cfg(test)]
mod tests {
    use crate::helpers::{
        bearer, get_json_body, json_request, make_test_app, seed_admin, seed_teacher,
    };
    use axum::http::StatusCode;
    use db::models::teacher::Model as TeacherModel;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn login_success_returns_token_and_teacher() {
        let (app, db) = make_test_app().await;
        seed_teacher(&db, "teacher@school.com").await;

        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "Teacher@School.com", "password": "password123" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert!(json["data"]["token"].as_str().is_some());
        assert!(json["data"]["expires_at"].as_str().is_some());
        assert_eq!(json["data"]["teacher"]["email"], "teacher@school.com");
        assert_eq!(json["data"]["teacher"]["role"], "teacher");
        assert!(json["data"]["teacher"].get("password_hash").is_none());
    }

    #[tokio::test]
    #[serial]
    async fn login_wrong_password_is_unauthorized() {
        let (app, db) = make_test_app().await;
        seed_teacher(&db, "teacher@school.com").await;

        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "teacher@school.com", "password": "nope-nope" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid email or password");
    }

    #[tokio::test]
    #[serial]
    async fn login_deactivated_teacher_is_unauthorized() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "gone@school.com").await;
        let mut active = teacher.into_active_model();
        active.is_active = Set(false);
        active.update(&db).await.unwrap();

        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "gone@school.com", "password": "password123" })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn register_requires_admin() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let payload = json!({
            "name": "New Teacher",
            "email": "new@school.com",
            "password": "secret123",
            "subject": "Physics"
        });

        let anonymous = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/register", None, Some(payload.clone())))
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let auth = bearer(&teacher);
        let forbidden = app
            .oneshot(json_request("POST", "/api/auth/register", Some(&auth), Some(payload)))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        let json = get_json_body(forbidden).await;
        assert_eq!(json["message"], "You must be an admin to perform this action");
    }

    #[tokio::test]
    #[serial]
    async fn admin_registers_teacher_and_duplicate_email_is_rejected() {
        let (app, db) = make_test_app().await;
        let admin = seed_admin(&db).await;
        let auth = bearer(&admin);
        let payload = json!({
            "name": "New Teacher",
            "email": "new@school.com",
            "password": "secret123",
            "subject": "Physics",
            "phone": "555-0199"
        });

        let created = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/register", Some(&auth), Some(payload.clone())))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let json = get_json_body(created).await;
        assert_eq!(json["data"]["role"], "teacher");
        assert_eq!(json["data"]["is_active"], true);

        let stored = TeacherModel::find_by_email(&db, "new@school.com").await.unwrap().unwrap();
        assert!(stored.verify_password("secret123"));

        let duplicate = app
            .oneshot(json_request("POST", "/api/auth/register", Some(&auth), Some(payload)))
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(duplicate).await;
        assert_eq!(json["message"], "Teacher with this email already exists");
    }

    #[tokio::test]
    #[serial]
    async fn register_short_password_is_bad_request() {
        let (app, db) = make_test_app().await;
        let admin = seed_admin(&db).await;

        let req = json_request(
            "POST",
            "/api/auth/register",
            Some(&bearer(&admin)),
            Some(json!({
                "name": "Short",
                "email": "short@school.com",
                "password": "123",
                "subject": "Art"
            })),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Password must be at least 6 characters long")
        );
    }

    #[tokio::test]
    #[serial]
    async fn profile_round_trip() {
        let (app, db) = make_test_app().await;
        let teacher = seed_teacher(&db, "teacher@school.com").await;
        let auth = bearer(&teacher);

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/auth/profile", Some(&auth), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["name"], "John Smith");

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/auth/profile",
                Some(&auth),
                Some(json!({ "name": "Johnny Smith", "subject": "Statistics", "role": "admin" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["name"], "Johnny Smith");
        assert_eq!(json["data"]["subject"], "Statistics");
        assert_eq!(json["data"]["role"], "teacher");
    }

    #[tokio::test]
    #[serial]
    async fn profile_without_token_is_unauthorized() {
        let (app, _db) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/auth/profile", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(json_request("GET", "/api/auth/profile", Some("Bearer not-a-jwt"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
