use api::{auth::generate_jwt, graphql::graphql_routes, routes::routes};
use axum::{
    Router,
    body::Body,
    http::{Request, header::CONTENT_TYPE},
    response::Response,
};
use db::{
    models::{
        student::{Gender, Model as StudentModel, NewStudent},
        teacher::{Model as TeacherModel, Role},
    },
    test_utils::setup_test_db,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use util::{config::AppConfig, state::AppState};

/// Both transports over a fresh in-memory database.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    AppConfig::set_jwt_secret("integration-test-secret");
    let db = setup_test_db().await;
    let app_state = AppState::new(db.clone());

    let router = Router::new()
        .nest("/api", routes(app_state.clone()))
        .merge(graphql_routes(app_state));

    (router, db)
}

pub async fn seed_admin(db: &DatabaseConnection) -> TeacherModel {
    TeacherModel::create(
        db,
        "Admin User",
        "admin@school.com",
        "password123",
        "Administration",
        None,
        Role::Admin,
    )
    .await
    .unwrap()
}

pub async fn seed_teacher(db: &DatabaseConnection, email: &str) -> TeacherModel {
    TeacherModel::create(
        db,
        "John Smith",
        email,
        "password123",
        "Mathematics",
        Some("555-0101"),
        Role::Teacher,
    )
    .await
    .unwrap()
}

pub async fn seed_student(
    db: &DatabaseConnection,
    name: &str,
    roll_number: &str,
    class_name: &str,
) -> StudentModel {
    StudentModel::create(
        db,
        NewStudent {
            name: name.into(),
            roll_number: roll_number.into(),
            class_name: class_name.into(),
            section: "A".into(),
            email: format!("{roll_number}@student.com"),
            phone: None,
            address: None,
            date_of_birth: None,
            gender: Gender::Female,
            admission_date: None,
        },
    )
    .await
    .unwrap()
}

/// `Authorization` header value for `teacher`.
pub fn bearer(teacher: &TeacherModel) -> String {
    let (token, _) = generate_jwt(teacher.id, teacher.is_admin()).unwrap();
    format!("Bearer {token}")
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn get_json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
