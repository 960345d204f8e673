use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work period an income row is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Day,
    Night,
}

/// Calendar bucket size for dashboard series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

/// Taxable-base scheme for the estimate endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxScheme {
    Turnover,
    Profit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtDirection {
    OwedToUs,
    OwedByUs,
}

pub mod company {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyNew {
        pub name: String,
        /// Secondary revenue stream (gaming zone), excluded from aggregate
        /// reports unless explicitly included.
        pub extra: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyView {
        pub id: Uuid,
        pub name: String,
        pub extra: bool,
        pub archived: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyList {
        pub include_archived: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompaniesResponse {
        pub companies: Vec<CompanyView>,
    }
}

pub mod operator {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OperatorNew {
        pub name: String,
        pub shift_rate_minor: i64,
        /// Commission on attributed revenue, basis points (0..=10000).
        pub revenue_share_bps: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OperatorView {
        pub id: Uuid,
        pub name: String,
        pub shift_rate_minor: i64,
        pub revenue_share_bps: i64,
        pub active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OperatorList {
        pub include_inactive: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OperatorsResponse {
        pub operators: Vec<OperatorView>,
    }
}

pub mod staff {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StaffNew {
        pub name: String,
        pub monthly_salary_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StaffView {
        pub id: Uuid,
        pub name: String,
        pub monthly_salary_minor: i64,
        pub active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StaffList {
        pub include_inactive: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StaffResponse {
        pub staff: Vec<StaffView>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub date: NaiveDate,
        pub company_id: Uuid,
        pub category: String,
        pub cash_minor: i64,
        pub card_minor: i64,
        pub comment: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub date: NaiveDate,
        pub company_id: Uuid,
        pub category: String,
        pub cash_minor: i64,
        pub card_minor: i64,
        pub comment: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseList {
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
        pub company_id: Option<Uuid>,
        pub category: Option<String>,
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        ///
        /// Newest → older pagination.
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub company_id: Uuid,
        pub category: String,
        pub cash_minor: i64,
        pub card_minor: i64,
        pub total_minor: i64,
        pub comment: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
        /// Opaque cursor for fetching the next page (older items).
        pub next_cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RowCreated {
        pub id: Uuid,
    }
}

pub mod income {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeNew {
        pub date: NaiveDate,
        pub company_id: Uuid,
        pub operator_id: Uuid,
        pub shift: Shift,
        pub cash_minor: i64,
        pub card_minor: i64,
        pub comment: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeUpdate {
        pub date: NaiveDate,
        pub company_id: Uuid,
        pub operator_id: Uuid,
        pub shift: Shift,
        pub cash_minor: i64,
        pub card_minor: i64,
        pub comment: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeList {
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
        pub company_id: Option<Uuid>,
        pub operator_id: Option<Uuid>,
        pub shift: Option<Shift>,
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub company_id: Uuid,
        pub operator_id: Uuid,
        pub shift: Shift,
        pub cash_minor: i64,
        pub card_minor: i64,
        pub total_minor: i64,
        pub comment: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeListResponse {
        pub incomes: Vec<IncomeView>,
        pub next_cursor: Option<String>,
    }
}

pub mod payroll {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayrollQuery {
        pub from: NaiveDate,
        pub to: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OperatorPayrollView {
        pub operator_id: Uuid,
        pub name: String,
        pub shifts_worked: u64,
        pub revenue_minor: i64,
        pub base_minor: i64,
        pub commission_minor: i64,
        pub adjustments_minor: i64,
        pub total_due_minor: i64,
        /// `max(0, 1 - stddev/mean) x 100` over per-shift revenue.
        pub stability_index: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OperatorPayrollResponse {
        pub entries: Vec<OperatorPayrollView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StaffPayrollView {
        pub staff_id: Uuid,
        pub name: String,
        pub monthly_salary_minor: i64,
        pub months_accrued: u64,
        pub accrued_minor: i64,
        pub paid_minor: i64,
        pub outstanding_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StaffPayrollResponse {
        pub entries: Vec<StaffPayrollView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryPaymentNew {
        pub staff_id: Uuid,
        pub date: NaiveDate,
        pub amount_minor: i64,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryPaymentView {
        pub id: Uuid,
        pub staff_id: Uuid,
        pub date: NaiveDate,
        pub amount_minor: i64,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryPaymentList {
        pub staff_id: Option<Uuid>,
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryPaymentsResponse {
        pub payments: Vec<SalaryPaymentView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryAdjustmentNew {
        pub operator_id: Uuid,
        pub date: NaiveDate,
        /// Positive bonus, negative deduction. Never zero.
        pub amount_minor: i64,
        pub reason: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryAdjustmentView {
        pub id: Uuid,
        pub operator_id: Uuid,
        pub date: NaiveDate,
        pub amount_minor: i64,
        pub reason: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryAdjustmentList {
        pub operator_id: Option<Uuid>,
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalaryAdjustmentsResponse {
        pub adjustments: Vec<SalaryAdjustmentView>,
    }
}

pub mod tax {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaxEstimateQuery {
        pub from: NaiveDate,
        pub to: NaiveDate,
        pub scheme: TaxScheme,
        /// Basis points (0..=10000).
        pub rate_bps: i64,
        pub include_extra: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaxMonthView {
        /// First day of the month.
        pub month: NaiveDate,
        pub base_minor: i64,
        pub tax_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaxEstimateResponse {
        pub scheme: TaxScheme,
        pub rate_bps: i64,
        pub base_minor: i64,
        pub tax_minor: i64,
        pub months: Vec<TaxMonthView>,
    }
}

pub mod debt {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtNew {
        pub counterparty: String,
        pub direction: DebtDirection,
        pub amount_minor: i64,
        pub opened_on: NaiveDate,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtSettle {
        /// Optional: if absent, server uses today.
        pub settled_on: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtList {
        pub open_only: Option<bool>,
        pub direction: Option<DebtDirection>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtView {
        pub id: Uuid,
        pub counterparty: String,
        pub direction: DebtDirection,
        pub amount_minor: i64,
        pub opened_on: NaiveDate,
        pub settled_on: Option<NaiveDate>,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtsResponse {
        pub debts: Vec<DebtView>,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardQuery {
        pub from: NaiveDate,
        pub to: NaiveDate,
        pub granularity: Granularity,
        pub include_extra: Option<bool>,
        /// Z-score threshold for anomaly flags; server default 2.0.
        pub anomaly_threshold: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BucketView {
        pub start: NaiveDate,
        pub income_minor: i64,
        pub expense_minor: i64,
        pub net_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryView {
        pub buckets: u64,
        pub mean_net: f64,
        pub std_dev_net: f64,
        pub stability_index: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AnomalyView {
        pub start: NaiveDate,
        pub net_minor: i64,
        pub zscore: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub granularity: Granularity,
        pub buckets: Vec<BucketView>,
        pub summary: SummaryView,
        pub anomalies: Vec<AnomalyView>,
        pub forecast_net_minor: Option<i64>,
    }
}

pub mod export {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExportQuery {
        pub from: NaiveDate,
        pub to: NaiveDate,
    }
}
