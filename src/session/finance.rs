//! Expense ledger kept for the lifetime of a session.

use crate::error::{AppError, AppResult};
use crate::export::{self, ExportFile};
use chrono::{Local, NaiveDate};
use unicode_width::UnicodeWidthStr;

/// Categories offered in the expense form; free text is also accepted
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Travel",
    "Transport",
    "Shopping",
    "Bills",
    "Education",
    "Other",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub description: String,
    /// Always finite and strictly positive
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

/// Parse a form amount. Anything that is not a finite number > 0 is rejected.
pub fn parse_amount(raw: &str) -> AppResult<f64> {
    let trimmed = raw.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| AppError::validation(format!("Amount '{trimmed}' is not a number.")))?;
    validate_amount(amount)?;
    Ok(amount)
}

fn validate_amount(amount: f64) -> AppResult<()> {
    if !amount.is_finite() {
        return Err(AppError::validation("Amount must be a finite number."));
    }
    if amount <= 0.0 {
        return Err(AppError::validation("Amount must be greater than zero."));
    }
    Ok(())
}

/// Append-only list of expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseLedger {
    rows: Vec<ExpenseRow>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an expense. On any validation failure the ledger is unchanged.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        category: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<&ExpenseRow> {
        validate_amount(amount)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(AppError::validation("Choose a category for the expense."));
        }

        self.rows.push(ExpenseRow {
            description: description.trim().to_string(),
            amount,
            category: category.to_string(),
            date: date.unwrap_or_else(|| Local::now().date_naive()),
        });
        tracing::debug!("Expense added, {} row(s) now", self.rows.len());
        Ok(&self.rows[self.rows.len() - 1])
    }

    pub fn rows(&self) -> &[ExpenseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.amount).sum()
    }

    /// Spreadsheet download of every row.
    pub fn export(&self) -> AppResult<ExportFile> {
        let bytes = export::xlsx::expenses(&self.rows)?;
        Ok(ExportFile::xlsx("expenses.xlsx", bytes))
    }
}

/// Render rows as an aligned plain-text table for the advice prompt.
pub fn summary_table(rows: &[ExpenseRow]) -> String {
    const HEADERS: [&str; 4] = ["date", "description", "amount", "category"];

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.date.format("%Y-%m-%d").to_string(),
                table_cell(&r.description),
                format!("{:.2}", r.amount),
                table_cell(&r.category),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    let mut push_row = |row: [&str; 4]| {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell}{}", " ".repeat(w - cell.width())))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_row(HEADERS);
    for row in &cells {
        push_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]);
    }
    out
}

/// Tabs and line breaks would break the column layout
fn table_cell(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[rstest]
    #[case("0")]
    #[case("-3.5")]
    #[case("abc")]
    #[case("")]
    #[case("NaN")]
    #[case("inf")]
    fn test_parse_amount_rejects(#[case] raw: &str) {
        assert!(parse_amount(raw).unwrap_err().is_validation());
    }

    #[rstest]
    #[case("4.50", 4.5)]
    #[case(" 2 ", 2.0)]
    #[case("0.01", 0.01)]
    fn test_parse_amount_accepts(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_amount(raw).unwrap(), expected);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn test_add_rejects_bad_amount_and_leaves_rows(#[case] amount: f64) {
        let mut ledger = ExpenseLedger::new();
        ledger.add("Coffee", 4.5, "Food", None).unwrap();

        let err = ledger.add("Bad", amount, "Food", None).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_add_requires_category() {
        let mut ledger = ExpenseLedger::new();
        assert!(ledger.add("Coffee", 4.5, "  ", None).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_defaults_date_to_today() {
        let mut ledger = ExpenseLedger::new();
        let row = ledger.add("Coffee", 4.5, "Food", None).unwrap();
        assert_eq!(row.date, Local::now().date_naive());
    }

    #[test]
    fn test_total() {
        let mut ledger = ExpenseLedger::new();
        ledger.add("Coffee", 4.5, "Food", None).unwrap();
        ledger.add("Bus", 2.0, "Transport", None).unwrap();
        assert!((ledger.total() - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_summary_table_layout() {
        let mut ledger = ExpenseLedger::new();
        ledger.add("Coffee", 4.5, "Food", date(2024, 3, 1)).unwrap();
        ledger
            .add("Monthly bus pass", 30.0, "Transport", date(2024, 3, 2))
            .unwrap();

        let table = summary_table(ledger.rows());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date        description"));
        assert!(lines[1].contains("Coffee"));
        assert!(lines[1].contains("4.50"));
        assert!(lines[2].ends_with("Transport"));
        // amount column lines up
        assert_eq!(lines[1].find("4.50"), lines[2].find("30.00"));
    }

    #[test]
    fn test_summary_table_flattens_control_characters() {
        let mut ledger = ExpenseLedger::new();
        ledger
            .add("Coffee\twith\nfriends", 4.5, "Food\r\nOut", date(2024, 3, 1))
            .unwrap();
        ledger.add("Bus", 2.0, "Transport", date(2024, 3, 2)).unwrap();

        let table = summary_table(ledger.rows());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(!table.contains('\t'));
        assert!(lines[1].contains("Coffee with friends"));
        assert!(lines[1].ends_with("Food  Out"));
        assert_eq!(lines[1].find("4.50"), lines[2].find("2.00"));
    }
}
