use base64::Engine as _;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

mod dashboard;
mod debts;
mod expenses;
mod exports;
mod incomes;
mod payroll;
mod references;
mod taxes;

pub use dashboard::{
    BucketAnomaly, Dashboard, DashboardBucket, DashboardSummary, DEFAULT_ANOMALY_THRESHOLD,
};
pub use debts::{DebtFilter, NewDebt};
pub use expenses::{ExpenseListFilter, NewExpense, UpdateExpenseCmd};
pub use incomes::{IncomeListFilter, NewIncome, UpdateIncomeCmd};
pub use payroll::{NewSalaryAdjustment, NewSalaryPayment, OperatorPayroll, StaffPayroll};
pub use taxes::{TaxEstimate, TaxMonth, TaxScheme};

/// Hard cap on a single list page. Mirrors the query-layer row limits the
/// journal pages rely on instead of streaming.
pub const MAX_LIST_ROWS: u64 = 2_000;

/// Hard cap on rows feeding an export or an in-memory report.
pub const MAX_EXPORT_ROWS: u64 = 5_000;

#[derive(Debug)]
pub struct Engine {
    pub(crate) database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}

/// Clamp a requested page size into `1..=MAX_LIST_ROWS`.
pub(crate) fn clamp_page_limit(limit: u64) -> u64 {
    limit.clamp(1, MAX_LIST_ROWS)
}

/// Opaque pagination cursor for journal listings (newest → older).
///
/// Rows are ordered by `(date desc, id desc)`; the cursor records the last
/// returned position and is serialized as URL-safe base64 so clients treat
/// it as opaque.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct JournalCursor {
    pub date: NaiveDate,
    pub id: String,
}

impl JournalCursor {
    pub(crate) fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidId("invalid journal cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    pub(crate) fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidId("invalid journal cursor".to_string()))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| EngineError::InvalidId("invalid journal cursor".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_roundtrip() {
        let cursor = JournalCursor {
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            id: "6a1f0f2e-0000-4000-8000-000000000001".to_string(),
        };
        let encoded = cursor.encode().unwrap();
        let decoded = JournalCursor::decode(&encoded).unwrap();
        assert_eq!(decoded.date, cursor.date);
        assert_eq!(decoded.id, cursor.id);
    }

    #[test]
    fn cursor_rejects_garbage() {
        assert!(JournalCursor::decode("???").is_err());
        assert!(JournalCursor::decode("bm90IGpzb24").is_err());
    }

    #[test]
    fn page_limit_is_clamped() {
        assert_eq!(clamp_page_limit(0), 1);
        assert_eq!(clamp_page_limit(50), 50);
        assert_eq!(clamp_page_limit(100_000), MAX_LIST_ROWS);
    }
}
