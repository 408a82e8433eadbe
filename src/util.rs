//! Small utility helpers used across modules.

/// Marker substituted for the target word in fill-in-the-blank sentences.
pub const BLANK: &str = "____";

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Normalization applied to both sides of a typed answer before comparing.
pub fn normalize_answer(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Trimmed, case-folded equality of a stored answer and a submission.
pub fn answers_match(expected: &str, submitted: &str) -> bool {
  normalize_answer(expected) == normalize_answer(submitted)
}

/// Log-safe truncation for large strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  let count = s.chars().count();
  if count <= max {
    s.to_string()
  } else {
    format!("{}… ({} chars total)", s.chars().take(max).collect::<String>(), count)
  }
}

/// Ensure `sentence` carries exactly one blank in place of `word`.
///
/// A sentence that already has one blank is accepted as is. Otherwise the
/// first case-insensitive whole-word occurrence of `word` is replaced.
pub fn mask_word(sentence: &str, word: &str) -> Option<String> {
  let sentence = sentence.trim();
  if sentence.is_empty() || word.trim().is_empty() {
    return None;
  }
  match sentence.matches(BLANK).count() {
    0 => {}
    1 => return Some(sentence.to_string()),
    _ => return None,
  }

  let chars: Vec<char> = sentence.chars().collect();
  let target: Vec<char> = word.trim().to_lowercase().chars().collect();
  let lowered: Vec<char> = chars.iter().map(|c| c.to_lowercase().next().unwrap_or(*c)).collect();

  let n = target.len();
  if n == 0 || chars.len() < n {
    return None;
  }
  for start in 0..=(chars.len() - n) {
    if lowered[start..start + n] != target[..] {
      continue;
    }
    let before_ok = start == 0 || !chars[start - 1].is_alphanumeric();
    let after_ok = start + n == chars.len() || !chars[start + n].is_alphanumeric();
    if before_ok && after_ok {
      let mut out: String = chars[..start].iter().collect();
      out.push_str(BLANK);
      out.extend(chars[start + n..].iter());
      return Some(out);
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn answers_match_ignores_case_and_outer_whitespace() {
    assert!(answers_match("apple", " Apple "));
    assert!(answers_match("  ABLE", "able\n"));
    assert!(!answers_match("apple", "apples"));
    assert!(!answers_match("ice cream", "icecream"));
  }

  #[test]
  fn fill_template_replaces_every_key() {
    let out = fill_template("Use '{word}' once. Again: {word}. {missing}", &[("word", "able")]);
    assert_eq!(out, "Use 'able' once. Again: able. {missing}");
  }

  #[test]
  fn mask_word_replaces_first_whole_word_match() {
    let out = mask_word("The Book is on the table, book it.", "book").unwrap();
    assert_eq!(out, "The ____ is on the table, book it.");
  }

  #[test]
  fn mask_word_skips_partial_matches() {
    let out = mask_word("Bookshelves hold a book.", "book").unwrap();
    assert_eq!(out, "Bookshelves hold a ____.");
  }

  #[test]
  fn mask_word_accepts_a_single_existing_blank() {
    assert_eq!(mask_word("I ____ every day.", "run").as_deref(), Some("I ____ every day."));
    assert_eq!(mask_word("____ and ____", "run"), None);
  }

  #[test]
  fn mask_word_rejects_sentences_without_the_word() {
    assert_eq!(mask_word("Nothing to see here.", "apple"), None);
    assert_eq!(mask_word("   ", "apple"), None);
  }

  #[test]
  fn trunc_for_log_counts_chars() {
    assert_eq!(trunc_for_log("short", 10), "short");
    assert_eq!(trunc_for_log("مرحبا بالعالم", 5), "مرحبا… (13 chars total)");
  }
}
