use sea_orm_migration::prelude::*;

use crate::m20260801_000002_references::{Operators, Staff};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum StaffSalaryPayments {
    Table,
    Id,
    StaffId,
    Date,
    AmountMinor,
    Note,
}

#[derive(Iden)]
enum OperatorSalaryAdjustments {
    Table,
    Id,
    OperatorId,
    Date,
    AmountMinor,
    Reason,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffSalaryPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffSalaryPayments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StaffSalaryPayments::StaffId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StaffSalaryPayments::Date).date().not_null())
                    .col(
                        ColumnDef::new(StaffSalaryPayments::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StaffSalaryPayments::Note).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-staff_salary_payments-staff_id")
                            .from(StaffSalaryPayments::Table, StaffSalaryPayments::StaffId)
                            .to(Staff::Table, Staff::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-staff_salary_payments-staff_id-date")
                    .table(StaffSalaryPayments::Table)
                    .col(StaffSalaryPayments::StaffId)
                    .col(StaffSalaryPayments::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OperatorSalaryAdjustments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OperatorSalaryAdjustments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OperatorSalaryAdjustments::OperatorId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OperatorSalaryAdjustments::Date)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OperatorSalaryAdjustments::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OperatorSalaryAdjustments::Reason)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-operator_salary_adjustments-operator_id")
                            .from(
                                OperatorSalaryAdjustments::Table,
                                OperatorSalaryAdjustments::OperatorId,
                            )
                            .to(Operators::Table, Operators::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-operator_salary_adjustments-operator_id-date")
                    .table(OperatorSalaryAdjustments::Table)
                    .col(OperatorSalaryAdjustments::OperatorId)
                    .col(OperatorSalaryAdjustments::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(OperatorSalaryAdjustments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(StaffSalaryPayments::Table).to_owned())
            .await
    }
}
