use super::{respond, respond_error, take_flash};
use crate::error::{AppError, AppResult};
use crate::session::SharedSession;
use crate::session::finance::parse_amount;
use crate::web::AppState;
use crate::web::render::{Tab, pages};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use chrono::{Local, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
}

/// Empty means "today"; anything else must be `YYYY-MM-DD`.
fn parse_date(raw: &str) -> AppResult<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::validation(format!("Date '{trimmed}' is not a valid YYYY-MM-DD date.")))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn show(Extension(session): Extension<SharedSession>) -> Response {
    let mut session = session.lock().await;
    let notice = take_flash(&mut session);
    respond(
        Tab::Finance,
        StatusCode::OK,
        notice,
        pages::finance(&session.expenses, None, today()),
    )
}

pub async fn add(
    Extension(session): Extension<SharedSession>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let mut session = session.lock().await;
    let added = parse_amount(&form.amount).and_then(|amount| {
        let date = parse_date(&form.date)?;
        session
            .expenses
            .add(&form.description, amount, &form.category, date)
            .map(|_| ())
    });

    match added {
        Ok(()) => {
            session.flash = Some("Expense added.".to_string());
            Redirect::to(Tab::Finance.path()).into_response()
        }
        Err(e) => respond_error(
            Tab::Finance,
            e,
            pages::finance(&session.expenses, None, today()),
        ),
    }
}

pub async fn tip(
    State(state): State<AppState>,
    Extension(session): Extension<SharedSession>,
) -> Response {
    let rows = session.lock().await.expenses.rows().to_vec();
    let advice = state.assistant.finance_tip(&rows).await;

    let session = session.lock().await;
    match advice {
        Ok(advice) => respond(
            Tab::Finance,
            StatusCode::OK,
            None,
            pages::finance(&session.expenses, Some(&advice), today()),
        ),
        Err(e) => respond_error(
            Tab::Finance,
            e,
            pages::finance(&session.expenses, None, today()),
        ),
    }
}

pub async fn export(Extension(session): Extension<SharedSession>) -> Response {
    let exported = session.lock().await.expenses.export();
    match exported {
        Ok(file) => file.into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("  ").unwrap(), None);
        assert_eq!(
            parse_date("2026-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28)
        );
        assert!(parse_date("2026-02-30").unwrap_err().is_validation());
        assert!(parse_date("yesterday").unwrap_err().is_validation());
    }
}
