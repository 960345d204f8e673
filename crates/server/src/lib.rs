use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener, spawn_with_listener};

mod dashboard;
mod debts;
mod expenses;
mod exports;
mod incomes;
mod payroll;
mod references;
mod server;
mod taxes;

pub mod types {
    pub mod company {
        pub use api_types::company::{CompaniesResponse, CompanyList, CompanyNew, CompanyView};
    }

    pub mod operator {
        pub use api_types::operator::{OperatorList, OperatorNew, OperatorView, OperatorsResponse};
    }

    pub mod staff {
        pub use api_types::staff::{StaffList, StaffNew, StaffResponse, StaffView};
    }

    pub mod expense {
        pub use api_types::expense::{
            ExpenseList, ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView, RowCreated,
        };
    }

    pub mod income {
        pub use api_types::income::{
            IncomeList, IncomeListResponse, IncomeNew, IncomeUpdate, IncomeView,
        };
    }

    pub mod payroll {
        pub use api_types::payroll::{
            OperatorPayrollResponse, OperatorPayrollView, PayrollQuery, SalaryAdjustmentList,
            SalaryAdjustmentNew, SalaryAdjustmentView, SalaryAdjustmentsResponse,
            SalaryPaymentList, SalaryPaymentNew, SalaryPaymentView, SalaryPaymentsResponse,
            StaffPayrollResponse, StaffPayrollView,
        };
    }

    pub mod tax {
        pub use api_types::tax::{TaxEstimateQuery, TaxEstimateResponse, TaxMonthView};
    }

    pub mod debt {
        pub use api_types::debt::{DebtList, DebtNew, DebtSettle, DebtView, DebtsResponse};
    }

    pub mod dashboard {
        pub use api_types::dashboard::{
            AnomalyView, BucketView, DashboardQuery, DashboardResponse, SummaryView,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidId(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Export(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Export(export_err) => {
            tracing::error!("export error: {export_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let res = ServerError::from(EngineError::InvalidDate("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn database_details_are_not_leaked() {
        let res = ServerError::from(EngineError::Database(sea_orm::DbErr::Custom(
            "secret dsn".to_string(),
        )))
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
