use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010007_create_quiz_attempts"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("quiz_attempts"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("quiz_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("score")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("passed")).boolean().not_null())
                    .col(ColumnDef::new(Alias::new("time_spent")).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("completed_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_attempts_quiz")
                            .from(Alias::new("quiz_attempts"), Alias::new("quiz_id"))
                            .to(Alias::new("quizzes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_attempts_user")
                            .from(Alias::new("quiz_attempts"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // no foreign key on question_id: answers naming unknown questions are stored too
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("quiz_answers"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("attempt_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("question_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("answer")).text().not_null())
                    .col(ColumnDef::new(Alias::new("is_correct")).boolean().not_null())
                    .col(ColumnDef::new(Alias::new("points_awarded")).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_answers_attempt")
                            .from(Alias::new("quiz_answers"), Alias::new("attempt_id"))
                            .to(Alias::new("quiz_attempts"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("quiz_answers")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("quiz_attempts")).to_owned())
            .await
    }
}
