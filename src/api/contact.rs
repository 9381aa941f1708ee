use crate::api::AppState;
use crate::domain::validation::{ContactForm, null_as_empty};
use crate::error::AppError;
use crate::services::contact_service::ContactFormState;
use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::header,
};
use serde::Deserialize;

/// JSON form post. Clients that re-render the form may send back the state
/// they were showing as `previous`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactRequest {
    #[serde(deserialize_with = "null_as_empty")]
    name: String,
    #[serde(deserialize_with = "null_as_empty")]
    email: String,
    #[serde(deserialize_with = "null_as_empty")]
    message: String,
    previous: Option<ContactFormState>,
}

/// Contact form fields, accepted either URL-encoded (plain HTML form post) or as JSON.
///
/// URL-encoded posts never carry a previous state.
#[derive(Debug)]
pub struct ContactInput {
    pub form: ContactForm,
    pub previous: Option<ContactFormState>,
}

impl<S> FromRequest<S> for ContactInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<ContactRequest>::from_request(req, state).await?;
            Ok(Self {
                form: ContactForm { name: body.name, email: body.email, message: body.message },
                previous: body.previous,
            })
        } else {
            let Form(form) = Form::<ContactForm>::from_request(req, state).await?;
            Ok(Self { form, previous: None })
        }
    }
}

/// Handles a contact form post.
///
/// Validation and storage failures are part of the returned state, so a
/// processed attempt always answers 200. A body that cannot be read at all
/// is rejected with a JSON `{"error": ..}`.
pub async fn submit_contact(State(state): State<AppState>, input: ContactInput) -> Json<ContactFormState> {
    let outcome = state.contact_service.submit(input.previous.as_ref(), input.form).await;
    Json(outcome.into_form_state())
}
