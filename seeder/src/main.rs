use crate::seed::{Seeder, run_seeder};
use crate::seeds::{marks::MarksSeeder, student::StudentSeeder, teacher::TeacherSeeder};
use db::models::{marks, student, teacher};
use migration::Migrator;
use sea_orm::EntityTrait;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to {}: {e}", util::config::database_path());
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    // Start from an empty dataset
    let cleared = async {
        marks::Entity::delete_many().exec(&db).await?;
        student::Entity::delete_many().exec(&db).await?;
        teacher::Entity::delete_many().exec(&db).await
    };
    if let Err(e) = cleared.await {
        eprintln!("Failed to clear existing data: {e}");
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(TeacherSeeder) as Box<dyn Seeder + Send + Sync>, "Teacher"),
        (Box::new(StudentSeeder), "Student"),
        (Box::new(MarksSeeder), "Marks"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }

    println!();
    println!("Admin:   {} / {}", seeds::teacher::ADMIN_EMAIL, seeds::teacher::DEFAULT_PASSWORD);
    println!("Teacher: {} / {}", seeds::teacher::TEACHER_EMAIL, seeds::teacher::DEFAULT_PASSWORD);
}
