pub mod app;

pub use app::{
    bearer, body_bytes, get_json_body, json_request, make_test_app, seed_admin, seed_student,
    seed_teacher,
};
