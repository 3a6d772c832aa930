use super::{respond, respond_error};
use crate::assistant::NotesSource;
use crate::error::{AppError, AppResult};
use crate::export::{self, ExportFile};
use crate::session::SharedSession;
use crate::web::AppState;
use crate::web::render::{Notice, Tab, pages};
use axum::Extension;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Fields pulled out of the notes form
#[derive(Debug, Default)]
struct NotesUpload {
    pasted: String,
    pdf: Option<Vec<u8>>,
}

impl NotesUpload {
    /// An uploaded PDF wins over pasted text.
    fn source(&self) -> NotesSource {
        match &self.pdf {
            Some(bytes) => NotesSource::Pdf(bytes.clone()),
            None => NotesSource::Pasted(self.pasted.clone()),
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> AppResult<NotesUpload> {
    let mut upload = NotesUpload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Could not read the form: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("notes") => {
                upload.pasted = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Could not read notes: {e}")))?;
            }
            Some("pdf") => {
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::validation(format!(
                        "Could not read the uploaded file (max {} MiB): {e}",
                        crate::import::MAX_UPLOAD_BYTES / (1024 * 1024)
                    ))
                })?;
                // Browsers send an empty part when no file was chosen
                if !bytes.is_empty() {
                    upload.pdf = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }
    Ok(upload)
}

pub async fn show(Extension(session): Extension<SharedSession>) -> Response {
    let session = session.lock().await;
    respond(
        Tab::Notes,
        StatusCode::OK,
        None,
        pages::notes("", session.cleaned_notes.as_deref()),
    )
}

pub async fn clean(
    State(state): State<AppState>,
    Extension(session): Extension<SharedSession>,
    multipart: Multipart,
) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            let previous = session.lock().await.cleaned_notes.clone();
            return respond_error(Tab::Notes, e, pages::notes("", previous.as_deref()));
        }
    };

    match state.assistant.clean_notes(upload.source()).await {
        Ok(cleaned) => {
            let body = pages::notes(&upload.pasted, Some(&cleaned));
            session.lock().await.cleaned_notes = Some(cleaned);
            respond(
                Tab::Notes,
                StatusCode::OK,
                Some(Notice::success("Notes cleaned.")),
                body,
            )
        }
        Err(e) => {
            let previous = session.lock().await.cleaned_notes.clone();
            respond_error(Tab::Notes, e, pages::notes(&upload.pasted, previous.as_deref()))
        }
    }
}

pub async fn export(Extension(session): Extension<SharedSession>) -> Response {
    let Some(notes) = session.lock().await.cleaned_notes.clone() else {
        return AppError::validation("Clean some notes before exporting.").into_response();
    };

    let rendered = tokio::task::spawn_blocking(move || export::pdf::notes(&notes)).await;
    match rendered {
        Ok(Ok(bytes)) => ExportFile::pdf("cleaned_notes.pdf", bytes).into_response(),
        Ok(Err(e)) => AppError::from(e).into_response(),
        Err(e) => AppError::from(export::ExportError::Pdf(format!("render task failed: {e}")))
            .into_response(),
    }
}
