use db::models::teacher::Model as Teacher;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct TeacherResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Teacher> for TeacherResponse {
    fn from(t: Teacher) -> Self {
        Self {
            id: t.id,
            name: t.name,
            email: t.email,
            subject: t.subject,
            phone: t.phone,
            role: t.role.to_string(),
            is_active: t.is_active,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}
