use sea_orm_migration::prelude::*;

use crate::m20260801_000002_references::{Companies, Operators};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Date,
    CompanyId,
    Category,
    CashMinor,
    CardMinor,
    Comment,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Incomes {
    Table,
    Id,
    Date,
    CompanyId,
    OperatorId,
    Shift,
    CashMinor,
    CardMinor,
    Comment,
    CreatedBy,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(ColumnDef::new(Expenses::CompanyId).string().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::CashMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::CardMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Comment).string())
                    .col(ColumnDef::new(Expenses::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-company_id")
                            .from(Expenses::Table, Expenses::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-company_id-date")
                    .table(Expenses::Table)
                    .col(Expenses::CompanyId)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Incomes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Incomes::Date).date().not_null())
                    .col(ColumnDef::new(Incomes::CompanyId).string().not_null())
                    .col(ColumnDef::new(Incomes::OperatorId).string().not_null())
                    .col(ColumnDef::new(Incomes::Shift).string().not_null())
                    .col(
                        ColumnDef::new(Incomes::CashMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Incomes::CardMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Incomes::Comment).string())
                    .col(ColumnDef::new(Incomes::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Incomes::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-incomes-company_id")
                            .from(Incomes::Table, Incomes::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-incomes-operator_id")
                            .from(Incomes::Table, Incomes::OperatorId)
                            .to(Operators::Table, Operators::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-incomes-date")
                    .table(Incomes::Table)
                    .col(Incomes::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-incomes-operator_id-date")
                    .table(Incomes::Table)
                    .col(Incomes::OperatorId)
                    .col(Incomes::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Incomes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await
    }
}
