use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010003_create_marks"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("marks"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("student_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("entered_by")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("subject")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("exam_type"))
                            .string()
                            .not_null()
                            .default("Midterm"),
                    )
                    .col(ColumnDef::new(Alias::new("marks_obtained")).double().not_null())
                    .col(
                        ColumnDef::new(Alias::new("total_marks"))
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(ColumnDef::new(Alias::new("percentage")).double().not_null())
                    .col(ColumnDef::new(Alias::new("grade")).string().not_null())
                    .col(ColumnDef::new(Alias::new("exam_date")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("academic_year")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("semester"))
                            .string()
                            .not_null()
                            .default("1st"),
                    )
                    .col(ColumnDef::new(Alias::new("remarks")).text())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("marks"), Alias::new("student_id"))
                            .to(Alias::new("students"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("marks"), Alias::new("entered_by"))
                            .to(Alias::new("teachers"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Not unique: the duplicate rule is a runtime policy.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_marks_student_subject_exam_year")
                    .table(Alias::new("marks"))
                    .col(Alias::new("student_id"))
                    .col(Alias::new("subject"))
                    .col(Alias::new("exam_type"))
                    .col(Alias::new("academic_year"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("marks")).to_owned())
            .await
    }
}
