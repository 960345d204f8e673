//! Payroll API endpoints.

use api_types::expense::RowCreated;
use api_types::payroll::{
    OperatorPayrollResponse, OperatorPayrollView, PayrollQuery, SalaryAdjustmentList,
    SalaryAdjustmentNew, SalaryAdjustmentView, SalaryAdjustmentsResponse, SalaryPaymentList,
    SalaryPaymentNew, SalaryPaymentView, SalaryPaymentsResponse, StaffPayrollResponse,
    StaffPayrollView,
};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

pub async fn operator_payroll(
    State(state): State<ServerState>,
    Json(payload): Json<PayrollQuery>,
) -> Result<Json<OperatorPayrollResponse>, ServerError> {
    let entries = state
        .engine
        .operator_payroll(payload.from, payload.to)
        .await?
        .into_iter()
        .map(|entry| OperatorPayrollView {
            operator_id: entry.operator_id,
            name: entry.name,
            shifts_worked: entry.shifts_worked,
            revenue_minor: entry.revenue_minor,
            base_minor: entry.base_minor,
            commission_minor: entry.commission_minor,
            adjustments_minor: entry.adjustments_minor,
            total_due_minor: entry.total_due_minor,
            stability_index: entry.stability_index,
        })
        .collect();
    Ok(Json(OperatorPayrollResponse { entries }))
}

pub async fn staff_payroll(
    State(state): State<ServerState>,
    Json(payload): Json<PayrollQuery>,
) -> Result<Json<StaffPayrollResponse>, ServerError> {
    let entries = state
        .engine
        .staff_payroll(payload.from, payload.to)
        .await?
        .into_iter()
        .map(|entry| StaffPayrollView {
            staff_id: entry.staff_id,
            name: entry.name,
            monthly_salary_minor: entry.monthly_salary_minor,
            months_accrued: entry.months_accrued,
            accrued_minor: entry.accrued_minor,
            paid_minor: entry.paid_minor,
            outstanding_minor: entry.outstanding_minor,
        })
        .collect();
    Ok(Json(StaffPayrollResponse { entries }))
}

pub async fn staff_payment_new(
    State(state): State<ServerState>,
    Json(payload): Json<SalaryPaymentNew>,
) -> Result<(StatusCode, Json<RowCreated>), ServerError> {
    let id = state
        .engine
        .record_staff_payment(engine::NewSalaryPayment {
            staff_id: payload.staff_id,
            date: payload.date,
            amount_minor: payload.amount_minor,
            note: payload.note,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RowCreated { id })))
}

pub async fn list_staff_payments(
    State(state): State<ServerState>,
    Json(payload): Json<SalaryPaymentList>,
) -> Result<Json<SalaryPaymentsResponse>, ServerError> {
    let payments = state
        .engine
        .list_staff_payments(payload.staff_id, payload.from, payload.to)
        .await?
        .into_iter()
        .map(|payment| SalaryPaymentView {
            id: payment.id,
            staff_id: payment.staff_id,
            date: payment.date,
            amount_minor: payment.amount_minor,
            note: payment.note,
        })
        .collect();
    Ok(Json(SalaryPaymentsResponse { payments }))
}

pub async fn adjustment_new(
    State(state): State<ServerState>,
    Json(payload): Json<SalaryAdjustmentNew>,
) -> Result<(StatusCode, Json<RowCreated>), ServerError> {
    let id = state
        .engine
        .record_salary_adjustment(engine::NewSalaryAdjustment {
            operator_id: payload.operator_id,
            date: payload.date,
            amount_minor: payload.amount_minor,
            reason: payload.reason,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RowCreated { id })))
}

pub async fn list_adjustments(
    State(state): State<ServerState>,
    Json(payload): Json<SalaryAdjustmentList>,
) -> Result<Json<SalaryAdjustmentsResponse>, ServerError> {
    let adjustments = state
        .engine
        .list_salary_adjustments(payload.operator_id, payload.from, payload.to)
        .await?
        .into_iter()
        .map(|adjustment| SalaryAdjustmentView {
            id: adjustment.id,
            operator_id: adjustment.operator_id,
            date: adjustment.date,
            amount_minor: adjustment.amount_minor,
            reason: adjustment.reason,
        })
        .collect();
    Ok(Json(SalaryAdjustmentsResponse { adjustments }))
}
