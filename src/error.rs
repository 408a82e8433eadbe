//! Error types for quiz generation, the remote sentence provider, and the HTTP boundary.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
  #[error("sentence provider is not configured")]
  Unavailable,
  #[error("request to model API failed: {0}")]
  Transport(String),
  #[error("model API returned HTTP {status}: {message}")]
  Api { status: u16, message: String },
  #[error("unusable model response: {0}")]
  InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum QuizError {
  #[error("no question types selected")]
  NoQuestionTypes,
  #[error("need more letters/words selected: {available} word(s) match, at least {required} required")]
  InsufficientPool { available: usize, required: usize },
  #[error("not enough distinct options: required {required}, found {unique}")]
  InsufficientUniqueOptions { required: usize, unique: usize },
  #[error("no questions could be generated; widen the selection criteria")]
  EmptyGeneration,
  #[error(transparent)]
  Provider(#[from] ProviderError),
}

/// Error rendered at the HTTP boundary as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub message: String,
}

impl ApiError {
  pub fn bad_request(message: impl Into<String>) -> Self {
    Self { status: StatusCode::BAD_REQUEST, message: message.into() }
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self { status: StatusCode::NOT_FOUND, message: message.into() }
  }
}

impl From<ProviderError> for ApiError {
  fn from(e: ProviderError) -> Self {
    let status = match e {
      ProviderError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
      _ => StatusCode::BAD_GATEWAY,
    };
    Self { status, message: e.to_string() }
  }
}

impl From<QuizError> for ApiError {
  fn from(e: QuizError) -> Self {
    match e {
      QuizError::Provider(p) => p.into(),
      other => Self { status: StatusCode::UNPROCESSABLE_ENTITY, message: other.to_string() },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(json!({ "error": self.message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quiz_errors_map_to_status_codes() {
    let e: ApiError = QuizError::InsufficientPool { available: 2, required: 4 }.into();
    assert_eq!(e.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(e.message.contains("need more letters"));

    let e: ApiError = QuizError::Provider(ProviderError::Unavailable).into();
    assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);

    let e: ApiError = QuizError::Provider(ProviderError::Api { status: 429, message: "quota".into() }).into();
    assert_eq!(e.status, StatusCode::BAD_GATEWAY);
    assert!(e.message.contains("quota"));
  }
}
