//! CSV export builders.
//!
//! Exports use `;` as separator and start with a UTF-8 BOM so spreadsheet
//! applications detect the encoding. Column layout is fixed per report: the
//! serialized field names are the header row.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{EngineError, Money, ResultEngine, Shift};

/// UTF-8 byte-order mark prepended to every export.
const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// One line of the expenses export: `date;company;category;cash;card;total;comment`.
#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub date: NaiveDate,
    pub company: String,
    pub category: String,
    pub cash: String,
    pub card: String,
    pub total: String,
    pub comment: String,
}

impl ExpenseRow {
    pub fn new(
        date: NaiveDate,
        company: String,
        category: String,
        cash_minor: i64,
        card_minor: i64,
        comment: Option<String>,
    ) -> Self {
        Self {
            date,
            company,
            category,
            cash: Money::new(cash_minor).to_string(),
            card: Money::new(card_minor).to_string(),
            total: Money::new(cash_minor + card_minor).to_string(),
            comment: comment.unwrap_or_default(),
        }
    }
}

/// One line of the incomes export: `date;company;operator;shift;cash;card;total;comment`.
#[derive(Debug, Serialize)]
pub struct IncomeRow {
    pub date: NaiveDate,
    pub company: String,
    pub operator: String,
    pub shift: &'static str,
    pub cash: String,
    pub card: String,
    pub total: String,
    pub comment: String,
}

impl IncomeRow {
    pub fn new(
        date: NaiveDate,
        company: String,
        operator: String,
        shift: Shift,
        cash_minor: i64,
        card_minor: i64,
        comment: Option<String>,
    ) -> Self {
        Self {
            date,
            company,
            operator,
            shift: shift.as_str(),
            cash: Money::new(cash_minor).to_string(),
            card: Money::new(card_minor).to_string(),
            total: Money::new(cash_minor + card_minor).to_string(),
            comment: comment.unwrap_or_default(),
        }
    }
}

/// One line of the operator payroll export:
/// `operator;shifts;revenue;base;commission;adjustments;total`.
#[derive(Debug, Serialize)]
pub struct PayrollRow {
    pub operator: String,
    pub shifts: u64,
    pub revenue: String,
    pub base: String,
    pub commission: String,
    pub adjustments: String,
    pub total: String,
}

/// Serializes rows into a `;`-separated, BOM-prefixed CSV document.
pub fn write_csv<R: Serialize>(rows: &[R]) -> ResultEngine<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(BOM.to_vec());

    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| EngineError::Export(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn export_starts_with_bom_and_header() {
        let rows = vec![ExpenseRow::new(
            date(2026, 2, 1),
            "Bar Centrale".to_string(),
            "supplies".to_string(),
            1500,
            0,
            None,
        )];
        let bytes = write_csv(&rows).unwrap();

        assert_eq!(&bytes[..3], &BOM);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date;company;category;cash;card;total;comment"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2026-02-01;Bar Centrale;supplies;15.00;0.00;15.00;"
        );
    }

    #[test]
    fn income_row_uses_semicolon_separator() {
        let rows = vec![IncomeRow::new(
            date(2026, 2, 2),
            "Main Hall".to_string(),
            "Anna".to_string(),
            Shift::Night,
            10_000,
            2_550,
            Some("busy evening".to_string()),
        )];
        let bytes = write_csv(&rows).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.contains("2026-02-02;Main Hall;Anna;night;100.00;25.50;125.50;busy evening"));
    }

    #[test]
    fn fields_containing_separator_are_quoted() {
        let rows = vec![ExpenseRow::new(
            date(2026, 2, 3),
            "Bar; Annex".to_string(),
            "repairs".to_string(),
            100,
            0,
            None,
        )];
        let bytes = write_csv(&rows).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.contains("\"Bar; Annex\""));
    }
}
