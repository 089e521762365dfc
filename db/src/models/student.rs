use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a student in the `students` table.
///
/// Students are never physically deleted; `is_active = false` marks a removed record.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Unique across active and inactive students.
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    /// Unique, stored lowercase.
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub admission_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    #[sea_orm(string_value = "Male")]
    Male,

    #[sea_orm(string_value = "Female")]
    Female,

    #[sea_orm(string_value = "Other")]
    Other,
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

/// Field values for a new student row.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub admission_date: Option<NaiveDate>,
}

impl Model {
    /// Inserts an active student. `admission_date` defaults to today.
    pub async fn create(db: &DbConn, new: NewStudent) -> Result<Model, DbErr> {
        let now = Utc::now();
        let student = ActiveModel {
            name: Set(new.name.trim().to_owned()),
            roll_number: Set(new.roll_number.trim().to_owned()),
            class_name: Set(new.class_name.trim().to_owned()),
            section: Set(new.section.trim().to_owned()),
            email: Set(new.email.trim().to_lowercase()),
            phone: Set(new.phone),
            address: Set(new.address),
            date_of_birth: Set(new.date_of_birth),
            gender: Set(new.gender),
            admission_date: Set(new.admission_date.unwrap_or_else(|| now.date_naive())),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        student.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_active_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::IsActive.eq(true))
            .one(db)
            .await
    }

    /// Looks up a student by roll number regardless of `is_active`.
    pub async fn find_by_roll_number(db: &DbConn, roll_number: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RollNumber.eq(roll_number.trim()))
            .one(db)
            .await
    }

    pub async fn find_active_by_roll_number(
        db: &DbConn,
        roll_number: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RollNumber.eq(roll_number.trim()))
            .filter(Column::IsActive.eq(true))
            .one(db)
            .await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await
    }

    pub async fn find_by_ids(db: &DbConn, ids: &[i64]) -> Result<Vec<Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await
    }

    /// Active students, optionally narrowed to a class and/or section, ordered by name.
    pub async fn list_active(
        db: &DbConn,
        class_name: Option<&str>,
        section: Option<&str>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find().filter(Column::IsActive.eq(true));
        if let Some(class_name) = class_name {
            query = query.filter(Column::ClassName.eq(class_name));
        }
        if let Some(section) = section {
            query = query.filter(Column::Section.eq(section));
        }
        query.order_by_asc(Column::Name).all(db).await
    }

    pub async fn roll_number_taken(
        db: &DbConn,
        roll_number: &str,
        except_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut condition = Condition::all().add(Column::RollNumber.eq(roll_number.trim()));
        if let Some(id) = except_id {
            condition = condition.add(Column::Id.ne(id));
        }
        Ok(Entity::find().filter(condition).one(db).await?.is_some())
    }

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

    /// Marks the student inactive. Returns `Ok(None)` when no such student exists.
    pub async fn soft_delete(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        let Some(student) = Self::find_by_id(db, id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = student.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(db).await.map(Some)
    }
}
