//! Validated form extractor.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;

use common::AppError;
use domain::{FormErrors, LoginForm, RegisterForm, Submission};

use crate::views;

/// A form whose failed validation re-renders its own page.
pub trait FormPage: Submission {
    fn render_invalid(errors: FormErrors) -> Response;
}

impl FormPage for LoginForm {
    fn render_invalid(errors: FormErrors) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, views::login(Some(&errors), None)).into_response()
    }
}

impl FormPage for RegisterForm {
    fn render_invalid(errors: FormErrors) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, views::register(Some(&errors), None)).into_response()
    }
}

/// URL-encoded form extractor that normalizes and validates the payload.
///
/// Holds the validated value; on failure the form page is rendered with
/// status 422 and the handler never runs.
pub struct ValidatedForm<T: Submission>(pub T::Valid);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: FormPage + DeserializeOwned + Send,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()).into_response())?;

        value.check().map(ValidatedForm).map_err(T::render_invalid)
    }
}
