use super::{respond, respond_error};
use crate::assistant::IdeaSource;
use crate::web::AppState;
use crate::web::render::{Tab, pages};
use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IdeaForm {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub custom_prompt: String,
}

pub async fn show() -> Response {
    respond(Tab::Ideas, StatusCode::OK, None, pages::ideas("", "", &[]))
}

pub async fn generate(State(state): State<AppState>, Form(form): Form<IdeaForm>) -> Response {
    let source = IdeaSource::from_form(&form.category, &form.custom_prompt);
    match state.assistant.generate_ideas(&source).await {
        Ok(ideas) => respond(
            Tab::Ideas,
            StatusCode::OK,
            None,
            pages::ideas(&form.category, &form.custom_prompt, &ideas),
        ),
        Err(e) => respond_error(
            Tab::Ideas,
            e,
            pages::ideas(&form.category, &form.custom_prompt, &[]),
        ),
    }
}
