use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Debts {
    Table,
    Id,
    Counterparty,
    Direction,
    AmountMinor,
    OpenedOn,
    SettledOn,
    Note,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Debts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Debts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Debts::Counterparty).string().not_null())
                    .col(ColumnDef::new(Debts::Direction).string().not_null())
                    .col(
                        ColumnDef::new(Debts::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Debts::OpenedOn).date().not_null())
                    .col(ColumnDef::new(Debts::SettledOn).date())
                    .col(ColumnDef::new(Debts::Note).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-debts-opened_on")
                    .table(Debts::Table)
                    .col(Debts::OpenedOn)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Debts::Table).to_owned())
            .await
    }
}
