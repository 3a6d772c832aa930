//! Request handlers, one module per feature tab.
//!
//! Handlers never hold a session lock across a call to the model: inputs are
//! copied out, the lock is dropped, and results are written back afterwards.

pub mod finance;
pub mod ideas;
pub mod notes;
pub mod tasks;
pub mod todos;

use super::render::{self, Notice, Tab};
use crate::error::AppError;
use crate::session::Session;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

fn respond(tab: Tab, status: StatusCode, notice: Option<Notice>, body: String) -> Response {
    (status, Html(render::page(tab, notice.as_ref(), &body))).into_response()
}

/// Re-render a tab with the error shown inline, keeping what the user typed.
fn respond_error(tab: Tab, err: AppError, body: String) -> Response {
    if err.is_validation() {
        tracing::debug!("{}: rejected input: {}", tab.path(), err);
    } else {
        tracing::error!("{}: request failed: {}", tab.path(), err);
    }
    respond(tab, err.status(), Some(Notice::from_error(&err)), body)
}

fn take_flash(session: &mut Session) -> Option<Notice> {
    session.flash.take().map(Notice::success)
}
