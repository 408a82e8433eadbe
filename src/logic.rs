//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Generating and storing quizzes (Gemini or an unconfigured provider)
//!   - Grading typed/chosen answers and match-pairs submissions
//!   - Example sentences (Gemini first, built-in bank as fallback)
//!   - Tutor replies, words of the day and dictionary search

use chrono::{Local, NaiveDate};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{ChatTurn, LexiconEntry, MatchPair, QuizQuestion, QuizSettings, SentenceExample};
use crate::error::{ApiError, ProviderError, QuizError};
use crate::provider::Unconfigured;
use crate::quiz::{generate_quiz, grade_answer, is_pair, matching_complete};
use crate::state::AppState;

#[instrument(level = "info", skip(state, settings), fields(question_count = settings.question_count, seeded = rng_seed.is_some()))]
pub async fn create_quiz(
  state: &AppState,
  settings: &QuizSettings,
  rng_seed: Option<u64>,
) -> Result<(String, Vec<QuizQuestion>), QuizError> {
  let mut rng = match rng_seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  let questions = match &state.gemini {
    Some(g) => generate_quiz(settings, &state.lexicon, g, &mut rng).await?,
    None => generate_quiz(settings, &state.lexicon, &Unconfigured, &mut rng).await?,
  };

  let id = Uuid::new_v4().to_string();
  state.insert_quiz(id.clone(), questions.clone()).await;
  info!(target: "quiz", quiz_id = %id, count = questions.len(), "Quiz stored");
  Ok((id, questions))
}

async fn stored_question(state: &AppState, quiz_id: &str, index: usize) -> Result<QuizQuestion, ApiError> {
  state
    .get_question(quiz_id, index)
    .await
    .ok_or_else(|| ApiError::not_found(format!("Unknown quiz question: {} #{}", quiz_id, index)))
}

/// Returns (correct, expected answer).
#[instrument(level = "info", skip(state, answer), fields(answer_len = answer.len()))]
pub async fn grade_submission(state: &AppState, quiz_id: &str, index: usize, answer: &str) -> Result<(bool, String), ApiError> {
  let q = stored_question(state, quiz_id, index).await?;
  match grade_answer(&q, answer) {
    Some(correct) => {
      debug!(target: "quiz", %quiz_id, index, kind = ?q.question_type(), correct, "Answer graded");
      Ok((correct, q.answer().to_string()))
    }
    None => Err(ApiError::bad_request("Match-pairs questions are graded via /quiz/match")),
  }
}

/// Returns (complete, number of proposed pairs that are canonical).
#[instrument(level = "info", skip(state, proposed), fields(proposed = proposed.len()))]
pub async fn grade_matching(state: &AppState, quiz_id: &str, index: usize, proposed: &[MatchPair]) -> Result<(bool, usize), ApiError> {
  let q = stored_question(state, quiz_id, index).await?;
  let pairs = q
    .pairs()
    .ok_or_else(|| ApiError::bad_request("Question is not a match-pairs question"))?;
  let matched = proposed.iter().filter(|p| is_pair(pairs, &p.english, &p.arabic)).count();
  let complete = matching_complete(pairs, proposed);
  debug!(target: "quiz", %quiz_id, index, matched, complete, "Matching graded");
  Ok((complete, matched))
}

#[instrument(level = "info", skip(state))]
pub async fn example_sentences(state: &AppState, word: &str) -> Result<Vec<SentenceExample>, ApiError> {
  let word = word.trim();
  if word.is_empty() {
    return Err(ApiError::bad_request("Missing \"word\" in request body."));
  }

  let failure = match &state.gemini {
    Some(g) => match g.example_sentences(word).await {
      Ok(s) => return Ok(s),
      Err(e) => {
        error!(target: "vocab_backend", %word, error = %e, "Gemini sentences failed; trying built-in bank.");
        e
      }
    },
    None => ProviderError::Unavailable,
  };

  match state.sentence_bank.get(word.to_lowercase().as_str()) {
    Some(bank) => {
      warn!(target: "vocab_backend", %word, "Serving built-in example sentences");
      Ok(bank.clone())
    }
    None => Err(failure.into()),
  }
}

#[instrument(level = "info", skip(state, history, message), fields(history_len = history.len(), message_len = message.len()))]
pub async fn tutor_reply(state: &AppState, history: &[ChatTurn], message: &str) -> Result<String, ApiError> {
  if message.trim().is_empty() {
    return Err(ApiError::bad_request("Message is empty"));
  }
  let gemini = state.gemini.as_ref().ok_or(ProviderError::Unavailable)?;
  Ok(gemini.tutor_reply(history, message).await?)
}

pub fn daily_words(state: &AppState, date: Option<&str>) -> Result<Vec<LexiconEntry>, ApiError> {
  let date = match date {
    Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
      .map_err(|e| ApiError::bad_request(format!("Invalid date {:?}: {}", s, e)))?,
    None => Local::now().date_naive(),
  };
  Ok(state.lexicon.daily_words(date).into_iter().cloned().collect())
}

pub fn search_words(state: &AppState, query: Option<&str>, letter: Option<&str>) -> Result<Vec<LexiconEntry>, ApiError> {
  let letter = match letter.map(str::trim).filter(|l| !l.is_empty()) {
    None => None,
    Some(l) => {
      let mut chars = l.chars();
      match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Some(c),
        _ => return Err(ApiError::bad_request(format!("Invalid letter: {:?}", l))),
      }
    }
  };
  Ok(state.lexicon.search(query.unwrap_or(""), letter).into_iter().cloned().collect())
}
