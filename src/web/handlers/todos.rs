use super::{respond, respond_error, take_flash};
use crate::session::SharedSession;
use crate::web::render::{Tab, pages};
use axum::extract::{Form, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub text: String,
}

pub async fn show(Extension(session): Extension<SharedSession>) -> Response {
    let mut session = session.lock().await;
    let notice = take_flash(&mut session);
    respond(Tab::Todos, StatusCode::OK, notice, pages::todos(&session.todos))
}

pub async fn add(
    Extension(session): Extension<SharedSession>,
    Form(form): Form<TodoForm>,
) -> Response {
    let mut session = session.lock().await;
    let added = session.todos.add(&form.text).map(|_| ());
    match added {
        Ok(()) => {
            session.flash = Some("Task added.".to_string());
            Redirect::to(Tab::Todos.path()).into_response()
        }
        Err(e) => respond_error(Tab::Todos, e, pages::todos(&session.todos)),
    }
}

pub async fn toggle(
    Extension(session): Extension<SharedSession>,
    Path(index): Path<usize>,
) -> Response {
    let mut session = session.lock().await;
    match session.todos.toggle(index) {
        Ok(_) => Redirect::to(Tab::Todos.path()).into_response(),
        Err(e) => respond_error(Tab::Todos, e, pages::todos(&session.todos)),
    }
}

pub async fn clear(Extension(session): Extension<SharedSession>) -> Response {
    let mut session = session.lock().await;
    let removed = session.todos.remove_completed();
    session.flash = Some(match removed {
        0 => "No completed tasks to remove.".to_string(),
        1 => "Removed 1 completed task.".to_string(),
        n => format!("Removed {n} completed tasks."),
    });
    Redirect::to(Tab::Todos.path()).into_response()
}

pub async fn export(Extension(session): Extension<SharedSession>) -> Response {
    let file = session.lock().await.todos.export();
    file.into_response()
}
