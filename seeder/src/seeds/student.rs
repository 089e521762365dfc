use crate::seed::{SeedFuture, Seeder};
use chrono::NaiveDate;
use db::models::student::{Gender, Model, NewStudent};
use fake::{Fake, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct StudentSeeder;

// (name, roll, class, section, email, phone, address, dob, gender)
const FIXED: [(&str, &str, &str, &str, &str, &str, &str, (i32, u32, u32), Gender); 5] = [
    ("Alice Johnson", "2024001", "10th", "A", "alice.johnson@student.com", "+1234567892", "123 Main St, City, State", (2006, 5, 15), Gender::Female),
    ("Bob Wilson", "2024002", "10th", "A", "bob.wilson@student.com", "+1234567893", "456 Oak Ave, City, State", (2006, 8, 22), Gender::Male),
    ("Carol Davis", "2024003", "10th", "B", "carol.davis@student.com", "+1234567894", "789 Pine Rd, City, State", (2006, 3, 10), Gender::Female),
    ("David Brown", "2024004", "10th", "B", "david.brown@student.com", "+1234567895", "321 Elm St, City, State", (2006, 11, 5), Gender::Male),
    ("Eva Garcia", "2024005", "11th", "A", "eva.garcia@student.com", "+1234567896", "654 Maple Dr, City, State", (2005, 7, 18), Gender::Female),
];

const RANDOM_STUDENTS: u32 = 10;

impl Seeder for StudentSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> SeedFuture<'a> {
        Box::pin(async move {
            for (name, roll, class_name, section, email, phone, address, (y, m, d), gender) in FIXED {
                Model::create(
                    db,
                    NewStudent {
                        name: name.into(),
                        roll_number: roll.into(),
                        class_name: class_name.into(),
                        section: section.into(),
                        email: email.into(),
                        phone: Some(phone.into()),
                        address: Some(address.into()),
                        date_of_birth: NaiveDate::from_ymd_opt(y, m, d),
                        gender,
                        admission_date: None,
                    },
                )
                .await?;
            }

            let classes = ["9th", "10th", "11th", "12th"];
            let genders = [Gender::Male, Gender::Female, Gender::Other];
            for n in 0..RANDOM_STUDENTS {
                let name: String = Name().fake();
                let roll = format!("2024{:03}", 100 + n);
                Model::create(
                    db,
                    NewStudent {
                        email: format!("student{roll}@student.com"),
                        name,
                        roll_number: roll,
                        class_name: classes[fastrand::usize(..classes.len())].into(),
                        section: if fastrand::bool() { "A" } else { "B" }.into(),
                        phone: None,
                        address: None,
                        date_of_birth: NaiveDate::from_ymd_opt(
                            fastrand::i32(2005..=2009),
                            fastrand::u32(1..=12),
                            fastrand::u32(1..=28),
                        ),
                        gender: genders[fastrand::usize(..genders.len())],
                        admission_date: None,
                    },
                )
                .await?;
            }

            Ok(())
        })
    }
}
