use actix_web::{
    body::BoxBody,
    http::StatusCode,
    web::{Data, Json},
    HttpRequest, HttpResponse, ResponseError,
};
use anyhow::anyhow;

use crate::{
    dispatcher::MailDispatcher,
    domain::{DispatchPayload, DispatchResponse, ErrorResponse},
    utils::error_chain_fmt,
};

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for DispatchError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        tracing::error!(
            error.cause_chain = ?self,
            error.message = %self,
            "Error in send-newsletter function",
        );
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Rejections raised while reading the JSON body are answered like any
/// other dispatch failure.
pub fn json_error_handler(err: actix_web::error::JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    DispatchError::from(anyhow!(err.to_string())).into()
}

pub async fn send_newsletter_preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[tracing::instrument(
    name = "Sending a newsletter",
    skip_all,
    fields(
        email_subject = %payload.title,
        newsletter_type = %payload.kind,
        subscribers = payload.subscribers.len(),
    )
)]
pub async fn send_newsletter(
    payload: Json<DispatchPayload>,
    dispatcher: Data<MailDispatcher>,
) -> Result<HttpResponse, DispatchError> {
    let (request, subscribers) = payload
        .into_inner()
        .into_parts()
        .map_err(|e| anyhow!(e))?;
    let result = dispatcher.dispatch(&request, &subscribers).await;
    Ok(HttpResponse::Ok().json(DispatchResponse::from(result)))
}
