//! Domain models: lexicon entries, quiz settings and the generated questions.

use serde::{Deserialize, Serialize};

/// Answer carried by match-pairs questions. Never compared against user input.
pub const MATCH_PAIRS_ANSWER: &str = "Matching complete";

/// One word of the vocabulary list. Keyed by `english`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconEntry {
  pub english: String,
  pub arabic: String,
  /// Comma-separated tags, e.g. "noun, verb". The first one is canonical.
  pub part_of_speech: String,
}

impl LexiconEntry {
  pub fn new(english: &str, arabic: &str, part_of_speech: &str) -> Self {
    Self { english: english.into(), arabic: arabic.into(), part_of_speech: part_of_speech.into() }
  }

  /// First tag of `part_of_speech`, trimmed.
  pub fn primary_tag(&self) -> &str {
    self.part_of_speech.split(',').next().unwrap_or("").trim()
  }

  pub fn pair(&self) -> MatchPair {
    MatchPair { english: self.english.clone(), arabic: self.arabic.clone() }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
  TranslateToAr,
  TranslateToEn,
  ListenChoose,
  ListenType,
  SpellingChoice,
  PosIdentify,
  FillBlank,
  MatchPairs,
}

impl QuestionType {
  pub const ALL: [QuestionType; 8] = [
    QuestionType::TranslateToAr,
    QuestionType::TranslateToEn,
    QuestionType::ListenChoose,
    QuestionType::ListenType,
    QuestionType::SpellingChoice,
    QuestionType::PosIdentify,
    QuestionType::FillBlank,
    QuestionType::MatchPairs,
  ];
}

/// Inputs of one generation call.
#[derive(Clone, Debug)]
pub struct QuizSettings {
  pub question_count: usize,
  /// Uppercase initial letters. Empty means no filter.
  pub letters: Vec<char>,
  pub question_types: Vec<QuestionType>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPair {
  pub english: String,
  pub arabic: String,
}

/// Four distinct options, exactly one of them equal to `answer`.
#[derive(Clone, Debug, Serialize)]
pub struct Choice {
  pub options: Vec<String>,
  pub answer: String,
}

/// Type-specific part of a question.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionBody {
  TranslateToAr(Choice),
  TranslateToEn(Choice),
  ListenChoose(Choice),
  SpellingChoice(Choice),
  PosIdentify(Choice),
  FillBlank(Choice),
  ListenType {
    answer: String,
  },
  MatchPairs {
    /// Canonical pairing. Any proposed (english, arabic) is checked against it.
    pairs: Vec<MatchPair>,
    /// Arabic side shuffled independently for display.
    #[serde(rename = "arabicOrder")]
    arabic_order: Vec<String>,
    /// Always `MATCH_PAIRS_ANSWER`.
    answer: String,
  },
}

/// A generated question. Immutable once built.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub source_entry: LexiconEntry,
  pub prompt: String,
  #[serde(flatten)]
  pub body: QuestionBody,
}

impl QuizQuestion {
  pub fn question_type(&self) -> QuestionType {
    match &self.body {
      QuestionBody::TranslateToAr(_) => QuestionType::TranslateToAr,
      QuestionBody::TranslateToEn(_) => QuestionType::TranslateToEn,
      QuestionBody::ListenChoose(_) => QuestionType::ListenChoose,
      QuestionBody::SpellingChoice(_) => QuestionType::SpellingChoice,
      QuestionBody::PosIdentify(_) => QuestionType::PosIdentify,
      QuestionBody::FillBlank(_) => QuestionType::FillBlank,
      QuestionBody::ListenType { .. } => QuestionType::ListenType,
      QuestionBody::MatchPairs { .. } => QuestionType::MatchPairs,
    }
  }

  pub fn answer(&self) -> &str {
    match &self.body {
      QuestionBody::TranslateToAr(c)
      | QuestionBody::TranslateToEn(c)
      | QuestionBody::ListenChoose(c)
      | QuestionBody::SpellingChoice(c)
      | QuestionBody::PosIdentify(c)
      | QuestionBody::FillBlank(c) => &c.answer,
      QuestionBody::ListenType { answer } | QuestionBody::MatchPairs { answer, .. } => answer,
    }
  }

  #[cfg(test)]
  pub fn choice(&self) -> Option<&Choice> {
    match &self.body {
      QuestionBody::TranslateToAr(c)
      | QuestionBody::TranslateToEn(c)
      | QuestionBody::ListenChoose(c)
      | QuestionBody::SpellingChoice(c)
      | QuestionBody::PosIdentify(c)
      | QuestionBody::FillBlank(c) => Some(c),
      _ => None,
    }
  }

  pub fn pairs(&self) -> Option<&[MatchPair]> {
    match &self.body {
      QuestionBody::MatchPairs { pairs, .. } => Some(pairs),
      _ => None,
    }
  }
}

/// Example sentence with its Arabic translation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceExample {
  pub sentence: String,
  pub translation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
  User,
  Model,
}

/// One turn of a tutor conversation, as sent back by the client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatTurn {
  pub role: ChatRole,
  pub text: String,
}
