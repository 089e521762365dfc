use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a teacher account in the `teachers` table.
///
/// Admins are teachers with `role = admin`; there is no separate admin table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Unique, stored lowercase.
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Subject taught.
    pub subject: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "teacher")]
    Teacher,

    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::marks::Entity")]
    Marks,
}

impl Related<super::marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a teacher, hashing `password` with a fresh salt.
    pub async fn create(
        db: &DbConn,
        name: &str,
        email: &str,
        password: &str,
        subject: &str,
        phone: Option<&str>,
        role: Role,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let teacher = ActiveModel {
            name: Set(name.trim().to_owned()),
            email: Set(email.trim().to_lowercase()),
            password_hash: Set(Self::hash_password(password)?),
            subject: Set(subject.trim().to_owned()),
            phone: Set(phone.map(|p| p.trim().to_owned())),
            is_active: Set(true),
            role: Set(role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        teacher.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await
    }

    /// Active teachers ordered by name.
    pub async fn list_active(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }

    /// True when another teacher (optionally excluding `except_id`) already uses `email`.
    pub async fn email_taken(
        db: &DbConn,
        email: &str,
        except_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut condition = Condition::all().add(Column::Email.eq(email.trim().to_lowercase()));
        if let Some(id) = except_id {
            condition = condition.add(Column::Id.ne(id));
        }
        Ok(Entity::find().filter(condition).one(db).await?.is_some())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DbErr::Custom(format!("password hashing failed: {e}")))
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
