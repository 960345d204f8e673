pub use sea_orm_migration::prelude::*;

mod m20260801_000001_users;
mod m20260801_000002_references;
mod m20260801_000003_journal;
mod m20260801_000004_salaries;
mod m20260801_000005_debts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_users::Migration),
            Box::new(m20260801_000002_references::Migration),
            Box::new(m20260801_000003_journal::Migration),
            Box::new(m20260801_000004_salaries::Migration),
            Box::new(m20260801_000005_debts::Migration),
        ]
    }
}
