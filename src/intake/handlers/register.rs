use crate::{
    intake::{
        handlers::FORM_PATH,
        pages, password,
        validate::{self, Submission},
    },
    store::{self, RegistrationRecord, Store},
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Raw form fields as submitted. Missing fields default to empty; the
/// passwords deserialize into [`SecretString`] so `Debug` output stays
/// redacted.
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct RegisterForm {
    fullname: String,
    username: String,
    email: String,
    phone: String,
    password: SecretString,
    confirm_password: SecretString,
}

/// Redirect issued for anything that is not a form POST.
pub async fn form_redirect() -> Redirect {
    Redirect::to(FORM_PATH)
}

// axum handler for the registration POST
#[instrument]
pub async fn register(
    store: Extension<Arc<Store>>,
    payload: Option<Form<RegisterForm>>,
) -> Response {
    // An absent or unreadable body counts as an all-empty submission
    let form = payload.map_or_else(RegisterForm::default, |Form(form)| form);

    debug!("submission: {:?}", form);

    let submission = Submission {
        fullname: validate::clean(&form.fullname),
        username: validate::clean(&form.username),
        email: validate::clean(&form.email),
        phone: validate::clean(&form.phone),
        password: form.password,
        confirm_password: form.confirm_password,
    };

    let failures = validate::validate(&submission);
    if !failures.is_empty() {
        debug!("rejected submission with {} failures", failures.len());

        return Html(pages::error_page(&failures)).into_response();
    }

    let password_hash = match password::hash(&submission.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Error hashing password: {:?}", e);

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to process the registration.".to_string(),
            )
                .into_response();
        }
    };

    let record = RegistrationRecord {
        timestamp: store::timestamp_now(),
        fullname: submission.fullname.clone(),
        username: submission.username,
        email: submission.email,
        phone: submission.phone,
        password_hash,
    };

    // Storage failure is terminal for the request, no retry
    if let Err(e) = store.append(&record) {
        error!("Error appending record: {:?}", e);

        return (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")).into_response();
    }

    Html(pages::success_page(&submission.fullname)).into_response()
}
