//! Loading application configuration (prompts, quiz limits, lexicon path) from TOML.
//!
//! See `AppConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  /// JSON file with `[{english, arabic, partOfSpeech}, ...]`. Built-in words when absent.
  #[serde(default)]
  pub lexicon_path: Option<String>,
  #[serde(default)]
  pub quiz: QuizLimits,
  #[serde(default)]
  pub prompts: Prompts,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct QuizLimits {
  pub default_question_count: usize,
  pub max_question_count: usize,
  /// Quizzes kept for grading; the oldest is evicted past this.
  pub max_stored_quizzes: usize,
}

impl Default for QuizLimits {
  fn default() -> Self {
    Self { default_question_count: 10, max_question_count: 50, max_stored_quizzes: 1000 }
  }
}

/// Prompts sent to Gemini. `{word}` is substituted in the templates.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub fill_blank_template: String,
  pub sentences_template: String,
  pub tutor_system: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      fill_blank_template: "Write one short, simple English sentence for a language learner that uses the word \"{word}\" exactly once. Return JSON {\"sentence\": string}. Do not add explanations.".into(),
      sentences_template: "Generate an array of 5 diverse and simple example sentences for the English word \"{word}\". Each sentence should be suitable for a language learner. For each sentence, also provide its Arabic translation.".into(),
      tutor_system: "You are a friendly and helpful English language tutor. Your goal is to help the user practice their English, answer their questions about vocabulary and grammar, and correct their mistakes in a gentle and encouraging way. Keep your responses concise and clear, suitable for a language learner. Converse with the user in Arabic if they ask you to, but always encourage them to practice English.".into(),
    }
  }
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "vocab_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "vocab_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "vocab_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_defaults() {
    let cfg: AppConfig = toml::from_str(
      r#"
        lexicon_path = "words.json"
        [quiz]
        max_question_count = 20
        [prompts]
        tutor_system = "Be brief."
      "#,
    ).unwrap();
    assert_eq!(cfg.lexicon_path.as_deref(), Some("words.json"));
    assert_eq!(cfg.quiz.max_question_count, 20);
    assert_eq!(cfg.quiz.default_question_count, 10);
    assert_eq!(cfg.quiz.max_stored_quizzes, 1000);
    assert_eq!(cfg.prompts.tutor_system, "Be brief.");
    assert!(cfg.prompts.fill_blank_template.contains("{word}"));
  }

  #[test]
  fn empty_toml_is_all_defaults() {
    let cfg: AppConfig = toml::from_str("").unwrap();
    assert!(cfg.lexicon_path.is_none());
    assert_eq!(cfg.quiz.default_question_count, 10);
  }
}
