use db::models::student::Model as Student;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Default)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: String,
    pub admission_date: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            roll_number: s.roll_number,
            class_name: s.class_name,
            section: s.section,
            email: s.email,
            phone: s.phone,
            address: s.address,
            date_of_birth: s.date_of_birth.map(|d| d.to_string()),
            gender: s.gender.to_string(),
            admission_date: s.admission_date.to_string(),
            is_active: s.is_active,
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct StudentListQuery {
    pub class_name: Option<String>,
    pub section: Option<String>,
}
