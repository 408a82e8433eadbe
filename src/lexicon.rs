//! The vocabulary table. Immutable after construction; shared behind an `Arc`.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{error, info, warn};

use crate::domain::LexiconEntry;
use crate::seeds::seed_lexicon;
use crate::util::normalize_answer;

/// Used to widen the tag universe of lexicons with too few distinct tags.
pub const STANDARD_TAGS: [&str; 12] = [
  "noun", "verb", "adjective", "adverb", "preposition", "pronoun",
  "conjunction", "determiner", "exclamation", "number", "modal verb", "article",
];

pub const DAILY_WORD_COUNT: usize = 5;

#[derive(Clone, Debug)]
pub struct Lexicon {
  entries: Vec<LexiconEntry>,
  tags: Vec<String>,
}

impl Lexicon {
  /// Build from raw entries. Entries with an empty `english` or without a
  /// part of speech are dropped and later duplicates of an `english` key are ignored.
  pub fn new(raw: Vec<LexiconEntry>) -> Self {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw.len());
    for e in raw {
      let key = e.english.trim().to_string();
      if key.is_empty() {
        continue;
      }
      if e.primary_tag().is_empty() {
        warn!(target: "vocab_backend", english = %key, "Lexicon entry without part of speech ignored");
        continue;
      }
      if !seen.insert(key.clone()) {
        warn!(target: "vocab_backend", english = %key, "Duplicate lexicon entry ignored");
        continue;
      }
      entries.push(LexiconEntry { english: key, arabic: e.arabic.trim().to_string(), part_of_speech: e.part_of_speech });
    }

    let mut tags: Vec<String> = Vec::new();
    for e in &entries {
      for tag in e.part_of_speech.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| normalize_answer(t) == normalize_answer(tag)) {
          tags.push(tag.to_string());
        }
      }
    }
    if tags.len() < 4 {
      for tag in STANDARD_TAGS {
        if !tags.iter().any(|t| normalize_answer(t) == tag) {
          tags.push(tag.to_string());
        }
      }
    }

    Self { entries, tags }
  }

  /// Load from a JSON array of entries. Any failure falls back to the built-in seeds.
  pub fn load(path: Option<&str>) -> Self {
    let Some(path) = path else {
      return Self::new(seed_lexicon());
    };
    match std::fs::read_to_string(path) {
      Ok(s) => match serde_json::from_str::<Vec<LexiconEntry>>(&s) {
        Ok(raw) if !raw.is_empty() => {
          let lexicon = Self::new(raw);
          info!(target: "vocab_backend", %path, size = lexicon.len(), "Loaded lexicon file");
          lexicon
        }
        Ok(_) => {
          error!(target: "vocab_backend", %path, "Lexicon file is empty; using built-in words");
          Self::new(seed_lexicon())
        }
        Err(e) => {
          error!(target: "vocab_backend", %path, error = %e, "Failed to parse lexicon file; using built-in words");
          Self::new(seed_lexicon())
        }
      },
      Err(e) => {
        error!(target: "vocab_backend", %path, error = %e, "Failed to read lexicon file; using built-in words");
        Self::new(seed_lexicon())
      }
    }
  }

  pub fn entries(&self) -> &[LexiconEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[cfg(test)]
  pub fn get(&self, english: &str) -> Option<&LexiconEntry> {
    self.entries.iter().find(|e| e.english == english)
  }

  /// Distinct part-of-speech tags across all entries, in first-seen order.
  pub fn tags(&self) -> &[String] {
    &self.tags
  }

  /// Entries whose first letter is one of `letters` (case-insensitive).
  /// An empty letter set selects everything.
  pub fn filter_by_letters(&self, letters: &[char]) -> Vec<&LexiconEntry> {
    if letters.is_empty() {
      return self.entries.iter().collect();
    }
    let wanted: Vec<char> = letters.iter().flat_map(|c| c.to_uppercase()).collect();
    self.entries
      .iter()
      .filter(|e| {
        e.english
          .chars()
          .next()
          .map(|first| first.to_uppercase().any(|u| wanted.contains(&u)))
          .unwrap_or(false)
      })
      .collect()
  }

  /// Dictionary search: `query` against english (case-insensitive) or arabic,
  /// optionally restricted to a first letter.
  pub fn search(&self, query: &str, letter: Option<char>) -> Vec<&LexiconEntry> {
    let q = query.trim().to_lowercase();
    let letter = letter.map(|l| l.to_ascii_uppercase());
    self.entries
      .iter()
      .filter(|e| match letter {
        Some(l) => e.english.to_uppercase().starts_with(l),
        None => true,
      })
      .filter(|e| q.is_empty() || e.english.to_lowercase().contains(&q) || e.arabic.contains(query.trim()))
      .collect()
  }

  /// Words of the day: the same date always yields the same selection.
  pub fn daily_words(&self, date: NaiveDate) -> Vec<&LexiconEntry> {
    let seed = (date.year() as u64) * 1000 + date.ordinal() as u64;
    let mut rng = StdRng::seed_from_u64(seed);
    self.entries.choose_multiple(&mut rng, DAILY_WORD_COUNT).collect()
  }
}

impl Default for Lexicon {
  fn default() -> Self {
    Self::new(seed_lexicon())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn small() -> Lexicon {
    Lexicon::new(vec![
      LexiconEntry::new("apple", "تفاحة", "noun"),
      LexiconEntry::new("Able", "قادر", "adjective"),
      LexiconEntry::new("book", "كتاب", "noun, verb"),
      LexiconEntry::new("apple", "تفاحة مكررة", "noun"),
      LexiconEntry::new("  ", "فارغ", "noun"),
    ])
  }

  #[test]
  fn duplicates_and_blank_keys_are_dropped() {
    let lex = small();
    assert_eq!(lex.len(), 3);
    assert_eq!(lex.get("apple").map(|e| e.arabic.as_str()), Some("تفاحة"));
  }

  #[test]
  fn entries_without_part_of_speech_are_dropped() {
    let lex = Lexicon::new(vec![
      LexiconEntry::new("apple", "تفاحة", "noun"),
      LexiconEntry::new("orphan", "يتيم", "  "),
      LexiconEntry::new("odd", "غريب", " , adjective"),
    ]);
    assert_eq!(lex.len(), 1);
    assert!(lex.get("orphan").is_none());
    assert!(lex.tags().iter().all(|t| !t.is_empty()));
  }

  #[test]
  fn tags_differing_only_in_case_are_merged() {
    let lex = Lexicon::new(vec![
      LexiconEntry::new("run", "يركض", "verb"),
      LexiconEntry::new("walk", "يمشي", "Verb"),
    ]);
    assert_eq!(lex.tags().iter().filter(|t| t.eq_ignore_ascii_case("verb")).count(), 1);
  }

  #[test]
  fn tags_are_split_trimmed_and_deduplicated() {
    let lex = Lexicon::default();
    let tags = lex.tags();
    assert!(tags.iter().any(|t| t == "preposition"));
    assert!(tags.iter().all(|t| t.trim() == t && !t.contains(',')));
    let unique: HashSet<_> = tags.iter().collect();
    assert_eq!(unique.len(), tags.len());
  }

  #[test]
  fn narrow_tag_sets_are_widened() {
    let lex = small();
    assert!(lex.tags().len() >= 4);
    assert_eq!(&lex.tags()[..3], &["noun".to_string(), "adjective".into(), "verb".into()]);
  }

  #[test]
  fn letter_filter_is_case_insensitive() {
    let lex = small();
    let a: Vec<_> = lex.filter_by_letters(&['A']).iter().map(|e| e.english.clone()).collect();
    assert_eq!(a, vec!["apple", "Able"]);
    let b = lex.filter_by_letters(&['b']);
    assert_eq!(b.len(), 1);
    assert_eq!(lex.filter_by_letters(&[]).len(), 3);
  }

  #[test]
  fn search_matches_english_or_arabic() {
    let lex = Lexicon::default();
    let hits = lex.search("BOOK", None);
    assert!(hits.iter().any(|e| e.english == "book"));
    let hits = lex.search("كتاب", None);
    assert_eq!(hits.len(), 1);
    let hits = lex.search("", Some('z'));
    assert!(hits.iter().all(|e| e.english.starts_with('z')));
    assert!(!hits.is_empty());
  }

  #[test]
  fn daily_words_are_stable_per_date() {
    let lex = Lexicon::default();
    let d = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    let first: Vec<_> = lex.daily_words(d).iter().map(|e| e.english.clone()).collect();
    let second: Vec<_> = lex.daily_words(d).iter().map(|e| e.english.clone()).collect();
    assert_eq!(first.len(), DAILY_WORD_COUNT);
    assert_eq!(first, second);
  }

  #[test]
  fn load_falls_back_to_seeds_on_missing_file() {
    let lex = Lexicon::load(Some("/definitely/not/here.json"));
    assert_eq!(lex.len(), Lexicon::default().len());
  }
}
