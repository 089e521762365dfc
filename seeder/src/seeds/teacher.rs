use crate::seed::{SeedFuture, Seeder};
use db::models::teacher::{Model, Role};
use sea_orm::DatabaseConnection;

pub const ADMIN_EMAIL: &str = "admin@school.com";
pub const TEACHER_EMAIL: &str = "teacher@school.com";
pub const DEFAULT_PASSWORD: &str = "password123";

pub struct TeacherSeeder;

impl Seeder for TeacherSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> SeedFuture<'a> {
        Box::pin(async move {
            Model::create(
                db,
                "Admin User",
                ADMIN_EMAIL,
                DEFAULT_PASSWORD,
                "Administration",
                Some("+1234567890"),
                Role::Admin,
            )
            .await?;

            Model::create(
                db,
                "John Smith",
                TEACHER_EMAIL,
                DEFAULT_PASSWORD,
                "Mathematics",
                Some("+1234567891"),
                Role::Teacher,
            )
            .await?;

            Ok(())
        })
    }
}
