use chrono::NaiveDate;
use sea_orm::Database;

use engine::{
    DebtDirection, DebtFilter, Engine, EngineError, ExpenseListFilter, IncomeListFilter, NewDebt,
    NewExpense, NewIncome, Shift, UpdateExpenseCmd,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(company_id: Uuid, day: NaiveDate, cash: i64, card: i64) -> NewExpense {
    NewExpense {
        date: day,
        company_id,
        category: "supplies".to_string(),
        cash_minor: cash,
        card_minor: card,
        comment: None,
        created_by: "alice".to_string(),
    }
}

#[tokio::test]
async fn duplicate_company_name_is_rejected() {
    let engine = engine_with_db().await;

    engine.new_company("Bar Centrale", false).await.unwrap();
    let err = engine.new_company(" Bar Centrale ", false).await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("Bar Centrale".to_string()));
}

#[tokio::test]
async fn expense_requires_known_company_and_positive_amount() {
    let engine = engine_with_db().await;
    let company_id = engine.new_company("Main Hall", false).await.unwrap();

    let err = engine
        .add_expense(expense(Uuid::new_v4(), date(2026, 1, 10), 100, 0))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("company".to_string()));

    let err = engine
        .add_expense(expense(company_id, date(2026, 1, 10), 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_expense(expense(company_id, date(2026, 1, 10), -5, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn expenses_paginate_newest_first() {
    let engine = engine_with_db().await;
    let company_id = engine.new_company("Main Hall", false).await.unwrap();

    for day in 10..15 {
        engine
            .add_expense(expense(company_id, date(2026, 1, day), 100 * day as i64, 0))
            .await
            .unwrap();
    }

    let filter = ExpenseListFilter::default();
    let (page, cursor) = engine.list_expenses(&filter, 2, None).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].date, date(2026, 1, 14));
    assert_eq!(page[1].date, date(2026, 1, 13));
    let cursor = cursor.expect("more pages expected");

    let (page, cursor) = engine
        .list_expenses(&filter, 2, Some(&cursor))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].date, date(2026, 1, 12));
    let cursor = cursor.expect("one more page expected");

    let (page, cursor) = engine
        .list_expenses(&filter, 2, Some(&cursor))
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].date, date(2026, 1, 10));
    assert!(cursor.is_none());
}

#[tokio::test]
async fn expense_list_honors_filters() {
    let engine = engine_with_db().await;
    let bar = engine.new_company("Bar", false).await.unwrap();
    let hall = engine.new_company("Hall", false).await.unwrap();

    engine
        .add_expense(expense(bar, date(2026, 2, 1), 100, 0))
        .await
        .unwrap();
    engine
        .add_expense(expense(hall, date(2026, 2, 2), 200, 0))
        .await
        .unwrap();
    engine
        .add_expense(expense(hall, date(2026, 3, 2), 300, 0))
        .await
        .unwrap();

    let filter = ExpenseListFilter {
        company_id: Some(hall),
        ..Default::default()
    };
    let (page, _) = engine.list_expenses(&filter, 50, None).await.unwrap();
    assert_eq!(page.len(), 2);

    let filter = ExpenseListFilter {
        from: Some(date(2026, 2, 1)),
        to: Some(date(2026, 2, 28)),
        ..Default::default()
    };
    let (page, _) = engine.list_expenses(&filter, 50, None).await.unwrap();
    assert_eq!(page.len(), 2);

    let filter = ExpenseListFilter {
        from: Some(date(2026, 3, 1)),
        to: Some(date(2026, 2, 1)),
        ..Default::default()
    };
    assert!(engine.list_expenses(&filter, 50, None).await.is_err());
}

#[tokio::test]
async fn expense_update_and_delete() {
    let engine = engine_with_db().await;
    let company_id = engine.new_company("Main Hall", false).await.unwrap();

    let id = engine
        .add_expense(expense(company_id, date(2026, 1, 10), 100, 0))
        .await
        .unwrap();

    engine
        .update_expense(UpdateExpenseCmd {
            expense_id: id,
            date: date(2026, 1, 11),
            company_id,
            category: "repairs".to_string(),
            cash_minor: 0,
            card_minor: 2500,
            comment: Some("  replaced chairs  ".to_string()),
        })
        .await
        .unwrap();

    let (page, _) = engine
        .list_expenses(&ExpenseListFilter::default(), 10, None)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].category, "repairs");
    assert_eq!(page[0].card_minor, 2500);
    assert_eq!(page[0].comment.as_deref(), Some("replaced chairs"));
    assert_eq!(page[0].created_by, "alice");

    engine.delete_expense(id).await.unwrap();
    let err = engine.delete_expense(id).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("expense".to_string()));
}

#[tokio::test]
async fn income_rows_attribute_operator_and_shift() {
    let engine = engine_with_db().await;
    let company_id = engine.new_company("Main Hall", false).await.unwrap();
    let anna = engine.new_operator("Anna", 2000, 500).await.unwrap();
    let boris = engine.new_operator("Boris", 2000, 500).await.unwrap();

    engine
        .add_income(NewIncome {
            date: date(2026, 1, 10),
            company_id,
            operator_id: anna,
            shift: Shift::Day,
            cash_minor: 10_000,
            card_minor: 0,
            comment: None,
            created_by: "alice".to_string(),
        })
        .await
        .unwrap();
    engine
        .add_income(NewIncome {
            date: date(2026, 1, 10),
            company_id,
            operator_id: boris,
            shift: Shift::Night,
            cash_minor: 0,
            card_minor: 8_000,
            comment: None,
            created_by: "alice".to_string(),
        })
        .await
        .unwrap();

    let filter = IncomeListFilter {
        operator_id: Some(anna),
        ..Default::default()
    };
    let (page, _) = engine.list_incomes(&filter, 10, None).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].shift, Shift::Day);
    assert_eq!(page[0].total_minor(), 10_000);

    let filter = IncomeListFilter {
        shift: Some(Shift::Night),
        ..Default::default()
    };
    let (page, _) = engine.list_incomes(&filter, 10, None).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].operator_id, boris);
}

#[tokio::test]
async fn debts_open_settle_and_filter() {
    let engine = engine_with_db().await;

    let supplier = engine
        .open_debt(NewDebt {
            counterparty: "Beverage supplier".to_string(),
            direction: DebtDirection::OwedByUs,
            amount_minor: 50_000,
            opened_on: date(2026, 1, 5),
            note: None,
        })
        .await
        .unwrap();
    engine
        .open_debt(NewDebt {
            counterparty: "Regular customer".to_string(),
            direction: DebtDirection::OwedToUs,
            amount_minor: 1_500,
            opened_on: date(2026, 1, 7),
            note: Some("tab".to_string()),
        })
        .await
        .unwrap();

    let err = engine
        .settle_debt(supplier, date(2026, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidDate(_)));

    engine.settle_debt(supplier, date(2026, 1, 20)).await.unwrap();
    let err = engine
        .settle_debt(supplier, date(2026, 1, 21))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidDate(_)));

    let open = engine
        .list_debts(DebtFilter {
            open_only: true,
            direction: None,
        })
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].counterparty, "Regular customer");

    let owed_by_us = engine
        .list_debts(DebtFilter {
            open_only: false,
            direction: Some(DebtDirection::OwedByUs),
        })
        .await
        .unwrap();
    assert_eq!(owed_by_us.len(), 1);
    assert!(!owed_by_us[0].is_open());
}
