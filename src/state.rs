//! Application state: the lexicon, prompts and limits, the optional Gemini client,
//! and the in-memory store of generated quizzes.
//!
//! Quizzes are kept by id so answers can be graded against the canonical
//! question without the client echoing it back. The store lives only as long
//! as the process and holds at most `max_stored_quizzes`; the oldest quiz is
//! evicted first.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::{load_app_config_from_env, AppConfig};
use crate::domain::{QuizQuestion, SentenceExample};
use crate::gemini::Gemini;
use crate::lexicon::Lexicon;
use crate::seeds::seed_sentences;

#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<Lexicon>,
    pub config: AppConfig,
    pub gemini: Option<Gemini>,
    pub quizzes: Arc<RwLock<HashMap<String, Vec<QuizQuestion>>>>,
    /// Insertion order of `quizzes`, oldest first.
    pub quiz_order: Arc<RwLock<VecDeque<String>>>,
    pub sentence_bank: Arc<HashMap<&'static str, Vec<SentenceExample>>>,
}

impl AppState {
    /// Build state from env: load config and lexicon, init Gemini.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_app_config_from_env().unwrap_or_default();
        let lexicon = Lexicon::load(config.lexicon_path.as_deref());
        info!(target: "vocab_backend", size = lexicon.len(), tags = lexicon.tags().len(), "Lexicon ready");

        let gemini = Gemini::from_env(config.prompts.clone());
        if let Some(g) = &gemini {
            info!(target: "vocab_backend", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
        } else {
            info!(target: "vocab_backend", "Gemini disabled (no GEMINI_API_KEY). Fill-blank questions and chat are unavailable.");
        }

        Self::from_parts(config, lexicon, gemini)
    }

    pub fn from_parts(config: AppConfig, lexicon: Lexicon, gemini: Option<Gemini>) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            config,
            gemini,
            quizzes: Arc::new(RwLock::new(HashMap::new())),
            quiz_order: Arc::new(RwLock::new(VecDeque::new())),
            sentence_bank: Arc::new(seed_sentences()),
        }
    }

    #[instrument(level = "debug", skip(self, questions), fields(%id, count = questions.len()))]
    pub async fn insert_quiz(&self, id: String, questions: Vec<QuizQuestion>) {
        let cap = self.config.quiz.max_stored_quizzes.max(1);
        let mut quizzes = self.quizzes.write().await;
        let mut order = self.quiz_order.write().await;
        if quizzes.insert(id.clone(), questions).is_none() {
            order.push_back(id);
        }
        while order.len() > cap {
            if let Some(oldest) = order.pop_front() {
                quizzes.remove(&oldest);
                debug!(target: "quiz", quiz_id = %oldest, "Evicted oldest stored quiz");
            }
        }
    }

    /// Read-only access to one question of a stored quiz.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_question(&self, id: &str, index: usize) -> Option<QuizQuestion> {
        let quizzes = self.quizzes.read().await;
        quizzes.get(id).and_then(|q| q.get(index)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizLimits;
    use crate::domain::LexiconEntry;
    use crate::quiz::listen_type;

    fn state_with_cap(cap: usize) -> AppState {
        let config = AppConfig {
            quiz: QuizLimits { max_stored_quizzes: cap, ..QuizLimits::default() },
            ..AppConfig::default()
        };
        AppState::from_parts(config, Lexicon::default(), None)
    }

    fn one_question() -> Vec<QuizQuestion> {
        vec![listen_type(&LexiconEntry::new("apple", "تفاحة", "noun"))]
    }

    #[tokio::test]
    async fn store_stays_at_cap_and_evicts_oldest() {
        let state = state_with_cap(3);
        for i in 0..10 {
            state.insert_quiz(format!("q{i}"), one_question()).await;
        }
        assert_eq!(state.quizzes.read().await.len(), 3);
        assert_eq!(state.quiz_order.read().await.len(), 3);
        assert!(state.get_question("q0", 0).await.is_none());
        assert!(state.get_question("q6", 0).await.is_none());
        for id in ["q7", "q8", "q9"] {
            assert_eq!(state.get_question(id, 0).await.map(|q| q.source_entry.english), Some("apple".into()));
        }
    }

    #[tokio::test]
    async fn reinserting_an_id_does_not_grow_the_order() {
        let state = state_with_cap(2);
        state.insert_quiz("a".into(), one_question()).await;
        state.insert_quiz("a".into(), one_question()).await;
        state.insert_quiz("b".into(), one_question()).await;
        assert!(state.get_question("a", 0).await.is_some());
        assert_eq!(state.quiz_order.read().await.len(), 2);
    }
}
