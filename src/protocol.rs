//! Public request/response structs for the HTTP API (serde ready).
//! Wire names are camelCase to match the web client.

use serde::{Deserialize, Serialize};

use crate::config::QuizLimits;
use crate::domain::{ChatTurn, LexiconEntry, MatchPair, QuestionType, QuizQuestion, QuizSettings};
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizIn {
    #[serde(default)]
    pub question_count: Option<usize>,
    #[serde(default)]
    pub letters: Vec<String>,
    #[serde(default)]
    pub question_types: Option<Vec<QuestionType>>,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl QuizIn {
    /// Validate and turn the request into generation settings.
    /// Missing fields fall back to the configured defaults; the count is clamped.
    pub fn to_settings(&self, limits: &QuizLimits) -> Result<QuizSettings, ApiError> {
        let mut letters = Vec::with_capacity(self.letters.len());
        for raw in &self.letters {
            let mut chars = raw.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => {
                    for u in c.to_uppercase() {
                        if !letters.contains(&u) {
                            letters.push(u);
                        }
                    }
                }
                _ => return Err(ApiError::bad_request(format!("Invalid letter: {:?}", raw))),
            }
        }

        let question_types = match &self.question_types {
            Some(types) => {
                let mut unique: Vec<QuestionType> = Vec::with_capacity(types.len());
                for t in types {
                    if !unique.contains(t) {
                        unique.push(*t);
                    }
                }
                unique
            }
            None => QuestionType::ALL.to_vec(),
        };

        let question_count = self
            .question_count
            .unwrap_or(limits.default_question_count)
            .min(limits.max_question_count);

        Ok(QuizSettings { question_count, letters, question_types })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOut {
    pub quiz_id: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerIn {
    pub quiz_id: String,
    pub index: usize,
    pub answer: String,
}
#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    pub expected: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchIn {
    pub quiz_id: String,
    pub index: usize,
    pub pairs: Vec<MatchPair>,
}
#[derive(Debug, Serialize)]
pub struct MatchOut {
    pub correct: bool,
    /// How many of the proposed pairs are canonical.
    pub matched: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct WordsQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub letter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DailyQuery {
    /// YYYY-MM-DD; today (local time) when absent.
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WordsOut {
    pub words: Vec<LexiconEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SentencesIn {
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatIn {
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub message: String,
}
#[derive(Debug, Serialize)]
pub struct ChatOut {
    pub reply: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOut {
    pub ok: bool,
    pub gemini_enabled: bool,
    pub lexicon_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_all_types_and_configured_count() {
        let s = QuizIn::default().to_settings(&QuizLimits::default()).unwrap();
        assert_eq!(s.question_count, 10);
        assert_eq!(s.question_types.len(), QuestionType::ALL.len());
        assert!(s.letters.is_empty());
    }

    #[test]
    fn letters_are_uppercased_and_deduplicated() {
        let q = QuizIn { letters: vec!["a".into(), "A".into(), " b ".into()], ..Default::default() };
        let s = q.to_settings(&QuizLimits::default()).unwrap();
        assert_eq!(s.letters, vec!['A', 'B']);
    }

    #[test]
    fn invalid_letters_are_rejected() {
        for bad in ["ab", "", "7"] {
            let q = QuizIn { letters: vec![bad.into()], ..Default::default() };
            assert!(q.to_settings(&QuizLimits::default()).is_err(), "{bad:?} accepted");
        }
    }

    #[test]
    fn count_is_clamped_to_limit() {
        let q = QuizIn { question_count: Some(500), ..Default::default() };
        let s = q.to_settings(&QuizLimits::default()).unwrap();
        assert_eq!(s.question_count, 50);
    }

    #[test]
    fn question_types_parse_from_wire_names() {
        let q: QuizIn = serde_json::from_str(r#"{"questionTypes":["TRANSLATE_TO_AR","MATCH_PAIRS","TRANSLATE_TO_AR"]}"#).unwrap();
        let s = q.to_settings(&QuizLimits::default()).unwrap();
        assert_eq!(s.question_types, vec![QuestionType::TranslateToAr, QuestionType::MatchPairs]);
    }
}
