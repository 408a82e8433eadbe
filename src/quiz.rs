//! Quiz generation over the lexicon.
//!
//! Flow:
//! 1) Restrict the lexicon to the selected initial letters (the subject pool).
//! 2) Sample subjects without replacement and pick a question type per subject.
//! 3) Build each question. Distractors always come from the full lexicon so a
//!    narrow letter selection still yields four options.
//! 4) Fill-in-the-blank sentences are requested concurrently once every random
//!    draw is done; the call resolves after all of them settle.

use std::collections::HashSet;

use futures::future::join_all;
use rand::{
  seq::{IteratorRandom, SliceRandom},
  Rng,
};
use tracing::{debug, error, info, instrument};

use crate::domain::{
  Choice, LexiconEntry, MatchPair, QuestionBody, QuestionType, QuizQuestion, QuizSettings, MATCH_PAIRS_ANSWER,
};
use crate::error::QuizError;
use crate::lexicon::Lexicon;
use crate::provider::SentenceProvider;
use crate::util::{answers_match, normalize_answer};

pub const OPTION_COUNT: usize = 4;
const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

const PROMPT_LISTEN_CHOOSE: &str = "استمع واختر الكلمة الصحيحة:";
const PROMPT_LISTEN_TYPE: &str = "استمع واكتب الكلمة التي تسمعها:";
const PROMPT_SPELLING: &str = "اختر الإملاء الصحيح:";
const PROMPT_MATCH_PAIRS: &str = "طابق الكلمات الإنجليزية بترجمتها العربية:";

/// Which side of an entry a distractor is taken from.
#[derive(Clone, Copy, Debug)]
enum Side {
  English,
  Arabic,
}

impl Side {
  fn of(self, e: &LexiconEntry) -> &str {
    match self {
      Side::English => &e.english,
      Side::Arabic => &e.arabic,
    }
  }
}

/// A question whose random content is final; fill-blank ones still need a sentence.
enum Planned {
  Ready(QuizQuestion),
  AwaitingSentence { entry: LexiconEntry, choice: Choice },
}

/// Generate a quiz. Questions come back in sampling order.
#[instrument(
  level = "info",
  skip_all,
  fields(question_count = settings.question_count, letters = settings.letters.len(), types = settings.question_types.len())
)]
pub async fn generate_quiz<R: Rng, P: SentenceProvider>(
  settings: &QuizSettings,
  lexicon: &Lexicon,
  provider: &P,
  rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
  if settings.question_types.is_empty() {
    return Err(QuizError::NoQuestionTypes);
  }

  let mut pool = lexicon.filter_by_letters(&settings.letters);
  if pool.len() < OPTION_COUNT {
    return Err(QuizError::InsufficientPool { available: pool.len(), required: OPTION_COUNT });
  }

  let count = settings.question_count.min(pool.len());
  if count == 0 {
    return Err(QuizError::EmptyGeneration);
  }

  let (subjects, _) = pool.partial_shuffle(rng, count);
  let mut planned = Vec::with_capacity(count);
  for entry in subjects.iter() {
    let kind = *settings.question_types.choose(rng).ok_or(QuizError::NoQuestionTypes)?;
    planned.push(plan_question(entry, kind, lexicon, rng)?);
  }

  let pending = planned.iter().filter(|p| matches!(p, Planned::AwaitingSentence { .. })).count();
  debug!(target: "quiz", subjects = count, pending_sentences = pending, "Question content drawn");

  let sentences = join_all(planned.iter().map(|p| async move {
    match p {
      Planned::Ready(_) => None,
      Planned::AwaitingSentence { entry, .. } => Some(provider.fill_blank_sentence(&entry.english).await),
    }
  }))
  .await;

  let mut questions = Vec::with_capacity(count);
  for (plan, sentence) in planned.into_iter().zip(sentences) {
    match (plan, sentence) {
      (Planned::Ready(q), _) => questions.push(q),
      (Planned::AwaitingSentence { entry, choice }, Some(Ok(sentence))) => questions.push(QuizQuestion {
        source_entry: entry,
        prompt: sentence,
        body: QuestionBody::FillBlank(choice),
      }),
      (Planned::AwaitingSentence { entry, .. }, Some(Err(e))) => {
        error!(target: "quiz", word = %entry.english, error = %e, "Fill-blank sentence failed; aborting quiz");
        return Err(e.into());
      }
      (Planned::AwaitingSentence { entry, .. }, None) => {
        error!(target: "quiz", word = %entry.english, "Fill-blank sentence missing");
        return Err(QuizError::EmptyGeneration);
      }
    }
  }

  info!(target: "quiz", requested = settings.question_count, generated = questions.len(), fill_blank = pending, "Quiz generated");
  Ok(questions)
}

fn plan_question<R: Rng>(
  entry: &LexiconEntry,
  kind: QuestionType,
  lexicon: &Lexicon,
  rng: &mut R,
) -> Result<Planned, QuizError> {
  let q = match kind {
    QuestionType::TranslateToAr => translate_to_arabic(entry, lexicon, rng)?,
    QuestionType::TranslateToEn => translate_to_english(entry, lexicon, rng)?,
    QuestionType::ListenChoose => listen_choose(entry, lexicon, rng)?,
    QuestionType::ListenType => listen_type(entry),
    QuestionType::SpellingChoice => spelling_choice(entry, lexicon, rng)?,
    QuestionType::PosIdentify => pos_identify(entry, lexicon, rng)?,
    QuestionType::MatchPairs => match_pairs(entry, lexicon, rng)?,
    QuestionType::FillBlank => {
      let choice = choice_from_lexicon(entry, Side::English, lexicon, rng)?;
      return Ok(Planned::AwaitingSentence { entry: entry.clone(), choice });
    }
  };
  Ok(Planned::Ready(q))
}

// -------- Builders --------

pub fn translate_to_arabic<R: Rng>(entry: &LexiconEntry, lexicon: &Lexicon, rng: &mut R) -> Result<QuizQuestion, QuizError> {
  let choice = choice_from_lexicon(entry, Side::Arabic, lexicon, rng)?;
  Ok(QuizQuestion {
    source_entry: entry.clone(),
    prompt: format!("ما هو معنى '{}'؟", entry.english),
    body: QuestionBody::TranslateToAr(choice),
  })
}

pub fn translate_to_english<R: Rng>(entry: &LexiconEntry, lexicon: &Lexicon, rng: &mut R) -> Result<QuizQuestion, QuizError> {
  let choice = choice_from_lexicon(entry, Side::English, lexicon, rng)?;
  Ok(QuizQuestion {
    source_entry: entry.clone(),
    prompt: format!("ما هي الكلمة الإنجليزية التي تعني '{}'؟", entry.arabic),
    body: QuestionBody::TranslateToEn(choice),
  })
}

/// The caller speaks `answer`; the prompt carries no word.
pub fn listen_choose<R: Rng>(entry: &LexiconEntry, lexicon: &Lexicon, rng: &mut R) -> Result<QuizQuestion, QuizError> {
  let choice = choice_from_lexicon(entry, Side::English, lexicon, rng)?;
  Ok(QuizQuestion {
    source_entry: entry.clone(),
    prompt: PROMPT_LISTEN_CHOOSE.into(),
    body: QuestionBody::ListenChoose(choice),
  })
}

pub fn listen_type(entry: &LexiconEntry) -> QuizQuestion {
  QuizQuestion {
    source_entry: entry.clone(),
    prompt: PROMPT_LISTEN_TYPE.into(),
    body: QuestionBody::ListenType { answer: entry.english.clone() },
  }
}

/// Misspellings of the word, padded with other lexicon words when too few survive.
pub fn spelling_choice<R: Rng>(entry: &LexiconEntry, lexicon: &Lexicon, rng: &mut R) -> Result<QuizQuestion, QuizError> {
  let answer = entry.english.clone();
  let mut distractors = misspellings(&answer, rng);
  distractors.truncate(DISTRACTOR_COUNT);
  fill_distinct(entry, Side::English, lexicon, &answer, &mut distractors, rng)?;
  Ok(QuizQuestion {
    source_entry: entry.clone(),
    prompt: PROMPT_SPELLING.into(),
    body: QuestionBody::SpellingChoice(shuffled_choice(answer, distractors, rng)),
  })
}

pub fn pos_identify<R: Rng>(entry: &LexiconEntry, lexicon: &Lexicon, rng: &mut R) -> Result<QuizQuestion, QuizError> {
  let answer = entry.primary_tag().to_string();
  let key = normalize_answer(&answer);
  let distractors: Vec<String> = lexicon
    .tags()
    .iter()
    .filter(|t| normalize_answer(t) != key)
    .cloned()
    .choose_multiple(rng, DISTRACTOR_COUNT);
  if distractors.len() < DISTRACTOR_COUNT {
    return Err(QuizError::InsufficientUniqueOptions { required: OPTION_COUNT, unique: distractors.len() + 1 });
  }
  Ok(QuizQuestion {
    source_entry: entry.clone(),
    prompt: format!("ما هو نوع كلمة '{}'؟", entry.english),
    body: QuestionBody::PosIdentify(shuffled_choice(answer, distractors, rng)),
  })
}

/// Four pairs with no repeated english or arabic side, one of them the subject.
pub fn match_pairs<R: Rng>(entry: &LexiconEntry, lexicon: &Lexicon, rng: &mut R) -> Result<QuizQuestion, QuizError> {
  let mut english: HashSet<&str> = HashSet::from([entry.english.as_str()]);
  let mut arabic: HashSet<&str> = HashSet::from([entry.arabic.as_str()]);
  let mut pairs = vec![entry.pair()];

  let mut candidates: Vec<&LexiconEntry> = lexicon.entries().iter().collect();
  candidates.shuffle(rng);
  for other in candidates {
    if pairs.len() == OPTION_COUNT {
      break;
    }
    if english.contains(other.english.as_str()) || arabic.contains(other.arabic.as_str()) {
      continue;
    }
    english.insert(&other.english);
    arabic.insert(&other.arabic);
    pairs.push(other.pair());
  }
  if pairs.len() < OPTION_COUNT {
    return Err(QuizError::InsufficientUniqueOptions { required: OPTION_COUNT, unique: pairs.len() });
  }

  pairs.shuffle(rng);
  let mut arabic_order: Vec<String> = pairs.iter().map(|p| p.arabic.clone()).collect();
  arabic_order.shuffle(rng);

  Ok(QuizQuestion {
    source_entry: entry.clone(),
    prompt: PROMPT_MATCH_PAIRS.into(),
    body: QuestionBody::MatchPairs { pairs, arabic_order, answer: MATCH_PAIRS_ANSWER.into() },
  })
}

// -------- Option helpers --------

fn choice_from_lexicon<R: Rng>(entry: &LexiconEntry, side: Side, lexicon: &Lexicon, rng: &mut R) -> Result<Choice, QuizError> {
  let answer = side.of(entry).to_string();
  let mut distractors = Vec::with_capacity(DISTRACTOR_COUNT);
  fill_distinct(entry, side, lexicon, &answer, &mut distractors, rng)?;
  Ok(shuffled_choice(answer, distractors, rng))
}

/// Top `picked` up to three values drawn from other entries. Values are compared
/// the way answers are graded, so no distractor can grade as correct and no two
/// options grade alike.
fn fill_distinct<R: Rng>(
  subject: &LexiconEntry,
  side: Side,
  lexicon: &Lexicon,
  answer: &str,
  picked: &mut Vec<String>,
  rng: &mut R,
) -> Result<(), QuizError> {
  if picked.len() >= DISTRACTOR_COUNT {
    return Ok(());
  }
  let mut seen: HashSet<String> = picked.iter().map(|p| normalize_answer(p)).collect();
  seen.insert(normalize_answer(answer));

  let mut candidates: Vec<&LexiconEntry> = lexicon
    .entries()
    .iter()
    .filter(|e| e.english != subject.english)
    .collect();
  candidates.shuffle(rng);

  for other in candidates {
    let value = side.of(other);
    if !seen.insert(normalize_answer(value)) {
      continue;
    }
    picked.push(value.to_string());
    if picked.len() == DISTRACTOR_COUNT {
      return Ok(());
    }
  }
  Err(QuizError::InsufficientUniqueOptions { required: OPTION_COUNT, unique: picked.len() + 1 })
}

fn shuffled_choice<R: Rng>(answer: String, distractors: Vec<String>, rng: &mut R) -> Choice {
  let mut options = distractors;
  options.push(answer.clone());
  options.shuffle(rng);
  Choice { options, answer }
}

// -------- Misspellings --------

/// Up to three misspellings, none grading equal to `word` or to each other.
/// Words shorter than three letters get none.
pub fn misspellings<R: Rng>(word: &str, rng: &mut R) -> Vec<String> {
  if word.chars().count() < 3 {
    return Vec::new();
  }
  let candidates = [swap_adjacent(word, rng), substitute_vowel(word, rng), duplicate_letter(word, rng)];
  let mut seen = HashSet::from([normalize_answer(word)]);
  let mut out: Vec<String> = Vec::with_capacity(candidates.len());
  for candidate in candidates.into_iter().flatten() {
    if seen.insert(normalize_answer(&candidate)) {
      out.push(candidate);
    }
  }
  out
}

/// Swap two neighbouring characters that differ.
pub fn swap_adjacent<R: Rng>(word: &str, rng: &mut R) -> Option<String> {
  let mut chars: Vec<char> = word.chars().collect();
  let positions: Vec<usize> = (0..chars.len().saturating_sub(1))
    .filter(|&i| chars[i] != chars[i + 1])
    .collect();
  let &i = positions.choose(rng)?;
  chars.swap(i, i + 1);
  Some(chars.into_iter().collect())
}

/// Replace one vowel with a different vowel, keeping its case.
pub fn substitute_vowel<R: Rng>(word: &str, rng: &mut R) -> Option<String> {
  let mut chars: Vec<char> = word.chars().collect();
  let positions: Vec<usize> = chars
    .iter()
    .enumerate()
    .filter(|(_, c)| VOWELS.contains(&c.to_ascii_lowercase()))
    .map(|(i, _)| i)
    .collect();
  let &i = positions.choose(rng)?;
  let current = chars[i].to_ascii_lowercase();
  let replacement = *VOWELS.iter().filter(|v| **v != current).choose(rng)?;
  chars[i] = if chars[i].is_ascii_uppercase() { replacement.to_ascii_uppercase() } else { replacement };
  Some(chars.into_iter().collect())
}

/// Insert a copy of one letter right after itself.
pub fn duplicate_letter<R: Rng>(word: &str, rng: &mut R) -> Option<String> {
  let mut chars: Vec<char> = word.chars().collect();
  let positions: Vec<usize> = chars
    .iter()
    .enumerate()
    .filter(|(_, c)| c.is_alphabetic())
    .map(|(i, _)| i)
    .collect();
  let &i = positions.choose(rng)?;
  chars.insert(i + 1, chars[i]);
  Some(chars.into_iter().collect())
}

// -------- Grading --------

/// Grade a typed or chosen answer. `None` for match-pairs questions.
pub fn grade_answer(question: &QuizQuestion, submitted: &str) -> Option<bool> {
  match &question.body {
    QuestionBody::MatchPairs { .. } => None,
    _ => Some(answers_match(question.answer(), submitted)),
  }
}

/// Whether (english, arabic) is one of the canonical pairs.
pub fn is_pair(pairs: &[MatchPair], english: &str, arabic: &str) -> bool {
  pairs.iter().any(|p| p.english == english && p.arabic == arabic)
}

/// Complete when the proposed pairs are exactly the canonical ones, in any order.
pub fn matching_complete(pairs: &[MatchPair], proposed: &[MatchPair]) -> bool {
  let proposed: HashSet<&MatchPair> = proposed.iter().collect();
  proposed.len() == pairs.len() && pairs.iter().all(|p| proposed.contains(p))
}
