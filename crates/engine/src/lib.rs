//! Domain engine for the finance tracker.
//!
//! The engine owns no long-lived state besides the database connection: every
//! operation validates its inputs, runs the statements it needs and returns
//! plain domain values. Pages (HTTP handlers, CLI) never touch the entities
//! directly.

pub use companies::Company;
pub use debts::{Debt, DebtDirection};
pub use error::EngineError;
pub use expenses::Expense;
pub use incomes::{Income, Shift};
pub use money::Money;
pub use operators::Operator;
pub use staff::StaffMember;

pub use ops::{
    BucketAnomaly, Dashboard, DashboardBucket, DashboardSummary, DebtFilter, Engine,
    EngineBuilder, ExpenseListFilter, IncomeListFilter, NewDebt, NewExpense, NewIncome,
    NewSalaryAdjustment, NewSalaryPayment, OperatorPayroll, StaffPayroll, TaxEstimate, TaxMonth,
    TaxScheme, UpdateExpenseCmd, UpdateIncomeCmd, MAX_EXPORT_ROWS, MAX_LIST_ROWS,
};
pub use stats::{Anomaly, Granularity, RunningStats, TrendLine};

mod companies;
mod debts;
mod error;
mod expenses;
pub mod export;
mod incomes;
mod money;
mod operator_adjustments;
mod operators;
mod ops;
mod staff;
mod staff_payments;
pub mod stats;
pub mod users;
mod util;

pub use operator_adjustments::SalaryAdjustment;
pub use staff_payments::SalaryPayment;

pub type ResultEngine<T> = Result<T, EngineError>;
