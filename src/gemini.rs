//! Minimal Gemini (generative-language API) client for our use-cases.
//!
//! We only call `models/{model}:generateContent` and request either plain text
//! or a JSON document constrained by a response schema.
//! Calls are instrumented and log model names, latencies and response sizes (not contents).
//!
//! NOTE: The API key travels as a header and is never logged.

use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::domain::{ChatRole, ChatTurn, SentenceExample};
use crate::error::ProviderError;
use crate::provider::SentenceProvider;
use crate::util::{fill_template, mask_word, trunc_for_log};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub prompts: Prompts,
}

impl Gemini {
  /// Construct the client if we find GEMINI_API_KEY (or API_KEY); otherwise return None.
  pub fn from_env(prompts: Prompts) -> Option<Self> {
    let api_key = std::env::var("GEMINI_API_KEY")
      .or_else(|_| std::env::var("API_KEY"))
      .ok()
      .filter(|k| !k.trim().is_empty())?;
    let base_url = std::env::var("GEMINI_BASE_URL")
      .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into());
    let timeout = std::env::var("GEMINI_TIMEOUT_SECS")
      .ok()
      .and_then(|s| s.parse::<u64>().ok())
      .unwrap_or(20);

    let client = match reqwest::Client::builder().timeout(Duration::from_secs(timeout)).build() {
      Ok(c) => c,
      Err(e) => {
        error!(target: "vocab_backend", error = %e, "Failed to build HTTP client; Gemini disabled");
        return None;
      }
    };

    Some(Self { client, api_key, base_url, model, prompts })
  }

  /// One `generateContent` round trip; returns the first candidate's text.
  #[instrument(level = "info", skip(self, system, contents, generation_config), fields(model = %self.model, turns = contents.len()))]
  async fn generate(
    &self,
    system: Option<&str>,
    contents: Vec<Content>,
    generation_config: Option<Value>,
  ) -> Result<String, ProviderError> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateRequest {
      contents,
      system_instruction: system.map(|s| Content { role: None, parts: vec![Part { text: s.to_string() }] }),
      generation_config,
    };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "vocab-quiz-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(API_KEY_HEADER, &self.api_key)
      .json(&req).send().await.map_err(|e| ProviderError::Transport(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let message = extract_gemini_error(&body).unwrap_or_else(|| trunc_for_log(&body, 200));
      error!(elapsed = ?start.elapsed(), %status, "Gemini call failed");
      return Err(ProviderError::Api { status: status.as_u16(), message });
    }

    let body: GenerateResponse = res.json().await.map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
    if let Some(usage) = &body.usage_metadata {
      info!(prompt_tokens = ?usage.prompt_token_count, candidates_tokens = ?usage.candidates_token_count, total_tokens = ?usage.total_token_count, "Gemini usage");
    }
    let text = first_candidate_text(body)
      .ok_or_else(|| ProviderError::InvalidResponse("response has no candidate text".into()))?;
    info!(elapsed = ?start.elapsed(), response_len = text.len(), "Gemini response received");
    Ok(text)
  }

  async fn generate_json<T: for<'a> Deserialize<'a>>(
    &self,
    system: Option<&str>,
    user: &str,
    schema: Value,
  ) -> Result<T, ProviderError> {
    let config = json!({ "responseMimeType": "application/json", "responseSchema": schema });
    let text = self.generate(system, vec![Content::user(user)], Some(config)).await?;
    serde_json::from_str::<T>(text.trim()).map_err(|e| ProviderError::InvalidResponse(format!("JSON parse error: {}", e)))
  }

  // --- High-level helpers ---

  /// Five learner-level example sentences with Arabic translations.
  #[instrument(level = "info", skip(self), fields(model = %self.model))]
  pub async fn example_sentences(&self, word: &str) -> Result<Vec<SentenceExample>, ProviderError> {
    let user = fill_template(&self.prompts.sentences_template, &[("word", word)]);
    let schema = json!({
      "type": "ARRAY",
      "items": {
        "type": "OBJECT",
        "properties": {
          "sentence": { "type": "STRING", "description": "A simple English example sentence." },
          "translation": { "type": "STRING", "description": "The Arabic translation of the sentence." }
        },
        "required": ["sentence", "translation"]
      }
    });
    let sentences: Vec<SentenceExample> = self.generate_json(None, &user, schema).await?;
    if sentences.is_empty() {
      return Err(ProviderError::InvalidResponse("no sentences returned".into()));
    }
    Ok(sentences)
  }

  /// Tutor reply given the prior conversation and the new message.
  #[instrument(level = "info", skip(self, history, message), fields(history_len = history.len(), message_len = message.len()))]
  pub async fn tutor_reply(&self, history: &[ChatTurn], message: &str) -> Result<String, ProviderError> {
    let mut contents: Vec<Content> = history
      .iter()
      .filter(|t| !t.text.trim().is_empty())
      .map(|t| Content {
        role: Some(match t.role { ChatRole::User => "user".into(), ChatRole::Model => "model".into() }),
        parts: vec![Part { text: t.text.clone() }],
      })
      .collect();
    contents.push(Content::user(message));
    let text = self.generate(Some(&self.prompts.tutor_system), contents, None).await?;
    let text = text.trim().to_string();
    if text.is_empty() {
      return Err(ProviderError::InvalidResponse("empty tutor reply".into()));
    }
    Ok(text)
  }
}

impl SentenceProvider for Gemini {
  #[instrument(level = "info", skip(self), fields(model = %self.model))]
  async fn fill_blank_sentence(&self, word: &str) -> Result<String, ProviderError> {
    #[derive(Deserialize)]
    struct FillBlank { sentence: String }

    let user = fill_template(&self.prompts.fill_blank_template, &[("word", word)]);
    let schema = json!({
      "type": "OBJECT",
      "properties": { "sentence": { "type": "STRING" } },
      "required": ["sentence"]
    });
    let out: FillBlank = self.generate_json(None, &user, schema).await?;
    mask_word(&out.sentence, word)
      .ok_or_else(|| ProviderError::InvalidResponse(format!("sentence does not contain a single blank for '{}'", word)))
  }
}

// --- Request/response DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
  contents: Vec<Content>,
  #[serde(skip_serializing_if = "Option::is_none")]
  system_instruction: Option<Content>,
  #[serde(skip_serializing_if = "Option::is_none")]
  generation_config: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct Content {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  role: Option<String>,
  #[serde(default)]
  parts: Vec<Part>,
}

impl Content {
  fn user(text: &str) -> Self {
    Self { role: Some("user".into()), parts: vec![Part { text: text.to_string() }] }
  }
}

#[derive(Serialize, Deserialize)]
struct Part {
  #[serde(default)]
  text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
  #[serde(default)] candidates: Vec<Candidate>,
  #[serde(default)] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate { #[serde(default)] content: Option<Content> }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
  #[serde(default)] total_token_count: Option<u32>,
}

fn first_candidate_text(body: GenerateResponse) -> Option<String> {
  let text: String = body.candidates
    .into_iter()
    .next()?
    .content?
    .parts
    .into_iter()
    .map(|p| p.text)
    .collect();
  if text.trim().is_empty() { None } else { Some(text) }
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn candidate_text_joins_parts() {
    let body: GenerateResponse = serde_json::from_str(
      r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"sentence\":"},{"text":"\"hi\"}"}]}}],
          "usageMetadata":{"promptTokenCount":3,"totalTokenCount":9}}"#,
    ).unwrap();
    assert_eq!(first_candidate_text(body).as_deref(), Some("{\"sentence\":\"hi\"}"));
  }

  #[test]
  fn empty_candidates_yield_none() {
    let body: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
    assert!(first_candidate_text(body).is_none());
    let body: GenerateResponse = serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#).unwrap();
    assert!(first_candidate_text(body).is_none());
  }

  #[test]
  fn error_body_message_is_extracted() {
    let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
    assert_eq!(extract_gemini_error(body).as_deref(), Some("API key not valid."));
    assert_eq!(extract_gemini_error("<html>"), None);
  }

  #[test]
  fn request_uses_camel_case_and_skips_empty_fields() {
    let req = GenerateRequest { contents: vec![Content::user("hi")], system_instruction: None, generation_config: None };
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v, json!({ "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }] }));
  }
}
