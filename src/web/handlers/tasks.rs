use super::{respond, respond_error};
use crate::web::AppState;
use crate::web::render::{Tab, pages};
use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub task: String,
}

pub async fn show() -> Response {
    respond(Tab::Tasks, StatusCode::OK, None, pages::tasks("", &[]))
}

pub async fn split(State(state): State<AppState>, Form(form): Form<TaskForm>) -> Response {
    match state.assistant.split_task(&form.task).await {
        Ok(steps) => respond(
            Tab::Tasks,
            StatusCode::OK,
            None,
            pages::tasks(&form.task, &steps),
        ),
        Err(e) => respond_error(Tab::Tasks, e, pages::tasks(&form.task, &[])),
    }
}
