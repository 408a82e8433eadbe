//! Source of fill-in-the-blank sentences.
//!
//! The quiz generator only depends on this trait; the Gemini client is one
//! implementation and tests inject fakes.

use std::future::Future;

use crate::error::ProviderError;

pub trait SentenceProvider: Send + Sync {
  /// One sentence using `word`, with the word replaced by a single blank marker.
  fn fill_blank_sentence(&self, word: &str) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Stand-in used when no model API key is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unconfigured;

impl SentenceProvider for Unconfigured {
  async fn fill_blank_sentence(&self, _word: &str) -> Result<String, ProviderError> {
    Err(ProviderError::Unavailable)
  }
}
