//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Query, State}, Json};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::domain::SentenceExample;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> Json<HealthOut> {
  Json(HealthOut { ok: true, gemini_enabled: state.gemini.is_some(), lexicon_size: state.lexicon.len() })
}

#[instrument(level = "info", skip(state, body), fields(letters = body.letters.len(), seeded = body.rng_seed.is_some()))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizIn>,
) -> Result<Json<QuizOut>, ApiError> {
  let settings = body.to_settings(&state.config.quiz)?;
  let (quiz_id, questions) = create_quiz(&state, &settings, body.rng_seed).await?;
  info!(target: "quiz", %quiz_id, count = questions.len(), "HTTP quiz served");
  Ok(Json(QuizOut { quiz_id, questions }))
}

#[instrument(level = "info", skip(state, body), fields(quiz_id = %body.quiz_id, index = body.index, answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, ApiError> {
  let (correct, expected) = grade_submission(&state, &body.quiz_id, body.index, &body.answer).await?;
  info!(target: "quiz", quiz_id = %body.quiz_id, index = body.index, %correct, "HTTP answer evaluated");
  Ok(Json(AnswerOut { correct, expected }))
}

#[instrument(level = "info", skip(state, body), fields(quiz_id = %body.quiz_id, index = body.index, pairs = body.pairs.len()))]
pub async fn http_post_match(
  State(state): State<Arc<AppState>>,
  Json(body): Json<MatchIn>,
) -> Result<Json<MatchOut>, ApiError> {
  let (correct, matched) = grade_matching(&state, &body.quiz_id, body.index, &body.pairs).await?;
  info!(target: "quiz", quiz_id = %body.quiz_id, index = body.index, %correct, matched, "HTTP matching evaluated");
  Ok(Json(MatchOut { correct, matched }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_words(
  State(state): State<Arc<AppState>>,
  Query(q): Query<WordsQuery>,
) -> Result<Json<WordsOut>, ApiError> {
  let words = search_words(&state, q.q.as_deref(), q.letter.as_deref())?;
  Ok(Json(WordsOut { words }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_daily_words(
  State(state): State<Arc<AppState>>,
  Query(q): Query<DailyQuery>,
) -> Result<Json<WordsOut>, ApiError> {
  let words = daily_words(&state, q.date.as_deref())?;
  Ok(Json(WordsOut { words }))
}

#[instrument(level = "info", skip(state, body), fields(word = %body.word))]
pub async fn http_post_sentences(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SentencesIn>,
) -> Result<Json<Vec<SentenceExample>>, ApiError> {
  let sentences = example_sentences(&state, &body.word).await?;
  info!(target: "vocab_backend", word = %body.word, count = sentences.len(), "HTTP sentences served");
  Ok(Json(sentences))
}

#[instrument(level = "info", skip(state, body), fields(history_len = body.history.len(), message_len = body.message.len()))]
pub async fn http_post_chat(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChatIn>,
) -> Result<Json<ChatOut>, ApiError> {
  let reply = tutor_reply(&state, &body.history, &body.message).await?;
  Ok(Json(ChatOut { reply }))
}

#[cfg(test)]
mod tests {
  use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
  };
  use serde_json::{json, Value};
  use tower::ServiceExt;

  use crate::config::AppConfig;
  use crate::lexicon::Lexicon;
  use crate::routes::build_router;
  use crate::state::AppState;
  use std::sync::Arc;

  fn app() -> Router {
    let state = AppState::from_parts(AppConfig::default(), Lexicon::default(), None);
    build_router(Arc::new(state))
  }

  async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        req = req.header("content-type", "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }

  #[tokio::test]
  async fn health_reports_lexicon_and_gemini() {
    let (status, v) = call(&app(), "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["ok"], true);
    assert_eq!(v["geminiEnabled"], false);
    assert!(v["lexiconSize"].as_u64().unwrap() > 4);
  }

  #[tokio::test]
  async fn quiz_then_answer_round_trip() {
    let app = app();
    let (status, quiz) = call(&app, "POST", "/api/v1/quiz", Some(json!({
      "questionCount": 3, "letters": ["b"], "questionTypes": ["TRANSLATE_TO_AR", "LISTEN_TYPE"], "rngSeed": 7
    }))).await;
    assert_eq!(status, StatusCode::OK);
    let questions = quiz["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    let quiz_id = quiz["quizId"].as_str().unwrap();

    let q = &questions[0];
    let expected = q["answer"].as_str().unwrap();
    let (status, v) = call(&app, "POST", "/api/v1/quiz/answer", Some(json!({
      "quizId": quiz_id, "index": 0, "answer": format!("  {}  ", expected.to_uppercase())
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["correct"], true);
    assert_eq!(v["expected"], expected);

    let (_, v) = call(&app, "POST", "/api/v1/quiz/answer", Some(json!({
      "quizId": quiz_id, "index": 0, "answer": "definitely wrong"
    }))).await;
    assert_eq!(v["correct"], false);
  }

  #[tokio::test]
  async fn match_pairs_are_graded_against_canonical_pairs() {
    let app = app();
    let (_, quiz) = call(&app, "POST", "/api/v1/quiz", Some(json!({
      "questionCount": 1, "questionTypes": ["MATCH_PAIRS"], "rngSeed": 11
    }))).await;
    let quiz_id = quiz["quizId"].as_str().unwrap();
    let q = &quiz["questions"][0];
    assert_eq!(q["type"], "MATCH_PAIRS");
    assert_eq!(q["answer"], "Matching complete");
    let pairs = q["pairs"].clone();

    let (status, v) = call(&app, "POST", "/api/v1/quiz/match", Some(json!({
      "quizId": quiz_id, "index": 0, "pairs": pairs
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["correct"], true);
    assert_eq!(v["matched"], 4);

    let mut partial = pairs.as_array().unwrap().clone();
    partial.pop();
    let (_, v) = call(&app, "POST", "/api/v1/quiz/match", Some(json!({
      "quizId": quiz_id, "index": 0, "pairs": partial
    }))).await;
    assert_eq!(v["correct"], false);
    assert_eq!(v["matched"], 3);

    let (status, _) = call(&app, "POST", "/api/v1/quiz/answer", Some(json!({
      "quizId": quiz_id, "index": 0, "answer": "x"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn unknown_quiz_is_not_found() {
    let (status, v) = call(&app(), "POST", "/api/v1/quiz/answer", Some(json!({
      "quizId": "nope", "index": 0, "answer": "x"
    }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(v["error"].as_str().unwrap().contains("nope"));
  }

  #[tokio::test]
  async fn narrow_selection_is_unprocessable() {
    let (status, v) = call(&app(), "POST", "/api/v1/quiz", Some(json!({ "letters": ["X"] }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(v["error"].as_str().unwrap().contains("need more letters"));
  }

  #[tokio::test]
  async fn fill_blank_without_gemini_is_unavailable() {
    let (status, v) = call(&app(), "POST", "/api/v1/quiz", Some(json!({ "questionTypes": ["FILL_BLANK"] }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(v["error"].is_string());
  }

  #[tokio::test]
  async fn sentences_fall_back_to_built_in_bank() {
    let app = app();
    let (status, v) = call(&app, "POST", "/api/v1/sentences", Some(json!({ "word": "Able" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v.as_array().unwrap().len(), 5);
    assert!(v[0]["translation"].is_string());

    let (status, _) = call(&app, "POST", "/api/v1/sentences", Some(json!({ "word": "zero" }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = call(&app, "POST", "/api/v1/sentences", Some(json!({ "word": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn chat_requires_gemini() {
    let (status, _) = call(&app(), "POST", "/api/v1/chat", Some(json!({ "message": "Hi!" }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
  }

  #[tokio::test]
  async fn words_search_and_daily() {
    let app = app();
    let (status, v) = call(&app, "GET", "/api/v1/words?q=bank", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["words"][0]["english"], "bank");
    assert_eq!(v["words"][0]["partOfSpeech"], "noun");

    let (status, _) = call(&app, "GET", "/api/v1/words?letter=ab", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, a) = call(&app, "GET", "/api/v1/words/daily?date=2025-01-31", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, b) = call(&app, "GET", "/api/v1/words/daily?date=2025-01-31", None).await;
    assert_eq!(a, b);
    assert_eq!(a["words"].as_array().unwrap().len(), 5);

    let (status, _) = call(&app, "GET", "/api/v1/words/daily?date=31-01-2025", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
