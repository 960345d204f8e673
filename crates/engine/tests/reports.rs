use chrono::NaiveDate;
use sea_orm::Database;
use uuid::Uuid;

use engine::{
    Engine, Granularity, NewExpense, NewIncome, NewSalaryAdjustment, NewSalaryPayment, Shift,
    TaxScheme,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn income(
    engine: &Engine,
    company_id: Uuid,
    operator_id: Uuid,
    day: NaiveDate,
    shift: Shift,
    cash: i64,
) {
    engine
        .add_income(NewIncome {
            date: day,
            company_id,
            operator_id,
            shift,
            cash_minor: cash,
            card_minor: 0,
            comment: None,
            created_by: "alice".to_string(),
        })
        .await
        .unwrap();
}

async fn expense(engine: &Engine, company_id: Uuid, day: NaiveDate, cash: i64) {
    engine
        .add_expense(NewExpense {
            date: day,
            company_id,
            category: "supplies".to_string(),
            cash_minor: cash,
            card_minor: 0,
            comment: None,
            created_by: "alice".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn operator_payroll_combines_base_commission_and_adjustments() {
    let engine = engine_with_db().await;
    let company_id = engine.new_company("Main Hall", false).await.unwrap();
    // 20.00 per shift, 5% of attributed revenue.
    let anna = engine.new_operator("Anna", 2_000, 500).await.unwrap();

    income(&engine, company_id, anna, date(2026, 1, 10), Shift::Day, 10_000).await;
    income(&engine, company_id, anna, date(2026, 1, 11), Shift::Day, 10_000).await;
    income(&engine, company_id, anna, date(2026, 1, 11), Shift::Night, 10_000).await;
    // Same date and shift as an existing row: still one worked shift.
    income(&engine, company_id, anna, date(2026, 1, 11), Shift::Night, 0).await;

    engine
        .record_salary_adjustment(NewSalaryAdjustment {
            operator_id: anna,
            date: date(2026, 1, 12),
            amount_minor: -1_000,
            reason: "register shortage".to_string(),
        })
        .await
        .unwrap();

    let report = engine
        .operator_payroll(date(2026, 1, 1), date(2026, 1, 31))
        .await
        .unwrap();
    assert_eq!(report.len(), 1);

    let entry = &report[0];
    assert_eq!(entry.name, "Anna");
    assert_eq!(entry.shifts_worked, 3);
    assert_eq!(entry.revenue_minor, 30_000);
    assert_eq!(entry.base_minor, 6_000);
    assert_eq!(entry.commission_minor, 1_500);
    assert_eq!(entry.adjustments_minor, -1_000);
    assert_eq!(entry.total_due_minor, 6_500);
    // Per-shift revenue is even, so the series reads as fully stable.
    assert!((entry.stability_index - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn inactive_operator_without_activity_is_omitted() {
    let engine = engine_with_db().await;
    let company_id = engine.new_company("Main Hall", false).await.unwrap();
    let anna = engine.new_operator("Anna", 2_000, 500).await.unwrap();
    let idle = engine.new_operator("Idle", 2_000, 500).await.unwrap();
    engine.deactivate_operator(idle).await.unwrap();

    income(&engine, company_id, anna, date(2026, 1, 10), Shift::Day, 5_000).await;

    let report = engine
        .operator_payroll(date(2026, 1, 1), date(2026, 1, 31))
        .await
        .unwrap();
    let names: Vec<&str> = report.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Anna"]);
}

#[tokio::test]
async fn staff_payroll_accrues_per_intersecting_month() {
    let engine = engine_with_db().await;
    // 1000.00 monthly.
    let staff_id = engine.new_staff("Irene", 100_000).await.unwrap();

    engine
        .record_staff_payment(NewSalaryPayment {
            staff_id,
            date: date(2026, 1, 31),
            amount_minor: 150_000,
            note: Some("january + advance".to_string()),
        })
        .await
        .unwrap();

    let report = engine
        .staff_payroll(date(2026, 1, 10), date(2026, 2, 20))
        .await
        .unwrap();
    assert_eq!(report.len(), 1);

    let entry = &report[0];
    assert_eq!(entry.months_accrued, 2);
    assert_eq!(entry.accrued_minor, 200_000);
    assert_eq!(entry.paid_minor, 150_000);
    assert_eq!(entry.outstanding_minor, 50_000);
}

#[tokio::test]
async fn tax_estimate_by_scheme_and_extra_exclusion() {
    let engine = engine_with_db().await;
    let main = engine.new_company("Main Hall", false).await.unwrap();
    let zone = engine.new_company("Gaming Zone", true).await.unwrap();
    let anna = engine.new_operator("Anna", 0, 0).await.unwrap();

    income(&engine, main, anna, date(2026, 1, 10), Shift::Day, 100_000).await;
    income(&engine, zone, anna, date(2026, 1, 11), Shift::Day, 50_000).await;
    expense(&engine, main, date(2026, 1, 12), 30_000).await;

    let turnover = engine
        .estimate_taxes(date(2026, 1, 1), date(2026, 1, 31), TaxScheme::Turnover, 500, false)
        .await
        .unwrap();
    assert_eq!(turnover.base_minor, 100_000);
    assert_eq!(turnover.tax_minor, 5_000);
    assert_eq!(turnover.months.len(), 1);
    assert_eq!(turnover.months[0].month, date(2026, 1, 1));

    let with_extra = engine
        .estimate_taxes(date(2026, 1, 1), date(2026, 1, 31), TaxScheme::Turnover, 500, true)
        .await
        .unwrap();
    assert_eq!(with_extra.base_minor, 150_000);
    assert_eq!(with_extra.tax_minor, 7_500);

    let profit = engine
        .estimate_taxes(date(2026, 1, 1), date(2026, 1, 31), TaxScheme::Profit, 500, false)
        .await
        .unwrap();
    assert_eq!(profit.base_minor, 70_000);
    assert_eq!(profit.tax_minor, 3_500);
}

#[tokio::test]
async fn loss_months_floor_at_zero_under_profit_scheme() {
    let engine = engine_with_db().await;
    let main = engine.new_company("Main Hall", false).await.unwrap();
    let anna = engine.new_operator("Anna", 0, 0).await.unwrap();

    income(&engine, main, anna, date(2026, 1, 10), Shift::Day, 10_000).await;
    expense(&engine, main, date(2026, 2, 10), 50_000).await;

    let profit = engine
        .estimate_taxes(date(2026, 1, 1), date(2026, 2, 28), TaxScheme::Profit, 1_000, false)
        .await
        .unwrap();

    // Range-wide base floors at zero.
    assert_eq!(profit.base_minor, 0);
    assert_eq!(profit.tax_minor, 0);
    // January alone is profitable; February floors at zero.
    assert_eq!(profit.months.len(), 2);
    assert_eq!(profit.months[0].base_minor, 10_000);
    assert_eq!(profit.months[1].base_minor, 0);
}

#[tokio::test]
async fn dashboard_buckets_are_gapless_and_flag_outliers() {
    let engine = engine_with_db().await;
    let main = engine.new_company("Main Hall", false).await.unwrap();
    let anna = engine.new_operator("Anna", 0, 0).await.unwrap();

    for day in 1..=6 {
        income(&engine, main, anna, date(2026, 3, day), Shift::Day, 10_000).await;
    }
    // A spike well past the 2.0 z-score threshold.
    income(&engine, main, anna, date(2026, 3, 7), Shift::Day, 80_000).await;

    let dashboard = engine
        .dashboard(date(2026, 3, 1), date(2026, 3, 8), Granularity::Day, false, None)
        .await
        .unwrap();

    // March 8th has no rows but still gets a zero bucket.
    assert_eq!(dashboard.buckets.len(), 8);
    assert_eq!(dashboard.buckets[6].income_minor, 80_000);
    assert_eq!(dashboard.buckets[7].income_minor, 0);

    assert_eq!(dashboard.summary.buckets, 8);
    assert!(dashboard.summary.std_dev_net > 0.0);

    assert_eq!(dashboard.anomalies.len(), 1);
    assert_eq!(dashboard.anomalies[0].start, date(2026, 3, 7));
    assert!(dashboard.anomalies[0].zscore > 2.0);

    assert!(dashboard.forecast_net_minor.is_some());
}

#[tokio::test]
async fn dashboard_can_exclude_extra_companies() {
    let engine = engine_with_db().await;
    let main = engine.new_company("Main Hall", false).await.unwrap();
    let zone = engine.new_company("Gaming Zone", true).await.unwrap();
    let anna = engine.new_operator("Anna", 0, 0).await.unwrap();

    income(&engine, main, anna, date(2026, 3, 2), Shift::Day, 10_000).await;
    income(&engine, zone, anna, date(2026, 3, 2), Shift::Day, 99_000).await;
    expense(&engine, zone, date(2026, 3, 2), 1_000).await;

    let without = engine
        .dashboard(date(2026, 3, 2), date(2026, 3, 2), Granularity::Day, false, None)
        .await
        .unwrap();
    assert_eq!(without.buckets[0].income_minor, 10_000);
    assert_eq!(without.buckets[0].expense_minor, 0);

    let with = engine
        .dashboard(date(2026, 3, 2), date(2026, 3, 2), Granularity::Day, true, None)
        .await
        .unwrap();
    assert_eq!(with.buckets[0].income_minor, 109_000);
    assert_eq!(with.buckets[0].net_minor, 108_000);
}

#[tokio::test]
async fn dashboard_groups_by_month() {
    let engine = engine_with_db().await;
    let main = engine.new_company("Main Hall", false).await.unwrap();
    let anna = engine.new_operator("Anna", 0, 0).await.unwrap();

    income(&engine, main, anna, date(2026, 1, 5), Shift::Day, 10_000).await;
    income(&engine, main, anna, date(2026, 1, 25), Shift::Night, 5_000).await;
    income(&engine, main, anna, date(2026, 2, 3), Shift::Day, 7_000).await;

    let dashboard = engine
        .dashboard(date(2026, 1, 1), date(2026, 2, 28), Granularity::Month, false, None)
        .await
        .unwrap();

    assert_eq!(dashboard.buckets.len(), 2);
    assert_eq!(dashboard.buckets[0].start, date(2026, 1, 1));
    assert_eq!(dashboard.buckets[0].income_minor, 15_000);
    assert_eq!(dashboard.buckets[1].start, date(2026, 2, 1));
    assert_eq!(dashboard.buckets[1].income_minor, 7_000);
}
