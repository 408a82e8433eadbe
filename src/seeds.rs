//! Built-in content: an Oxford 3000 excerpt and a small example-sentence bank.
//! Keeps the backend useful without a lexicon file or a Gemini key.

use std::collections::HashMap;

use crate::domain::{LexiconEntry, SentenceExample};

const OXFORD_EXCERPT: &[(&str, &str, &str)] = &[
  ("a", "أداة نكرة", "indefinite article"),
  ("abandon", "يتخلى عن", "verb"),
  ("ability", "قدرة", "noun"),
  ("able", "قادر", "adjective"),
  ("about", "حول", "preposition, adverb"),
  ("above", "فوق", "preposition, adverb"),
  ("accept", "يقبل", "verb"),
  ("accident", "حادث", "noun"),
  ("across", "عبر", "preposition, adverb"),
  ("act", "يتصرف", "verb, noun"),
  ("baby", "طفل رضيع", "noun"),
  ("back", "ظهر", "noun, adverb, adjective"),
  ("bad", "سيئ", "adjective"),
  ("bag", "حقيبة", "noun"),
  ("ball", "كرة", "noun"),
  ("banana", "موزة", "noun"),
  ("bank", "بنك", "noun"),
  ("beautiful", "جميل", "adjective"),
  ("because", "لأن", "conjunction"),
  ("book", "كتاب", "noun, verb"),
  ("cake", "كعكة", "noun"),
  ("call", "يتصل", "verb, noun"),
  ("camera", "كاميرا", "noun"),
  ("can", "يستطيع", "modal verb"),
  ("careful", "حذر", "adjective"),
  ("carefully", "بحذر", "adverb"),
  ("dance", "يرقص", "verb, noun"),
  ("danger", "خطر", "noun"),
  ("dark", "مظلم", "adjective"),
  ("daughter", "ابنة", "noun"),
  ("early", "مبكرا", "adverb, adjective"),
  ("earth", "الأرض", "noun"),
  ("easy", "سهل", "adjective"),
  ("eat", "يأكل", "verb"),
  ("face", "وجه", "noun"),
  ("family", "عائلة", "noun"),
  ("famous", "مشهور", "adjective"),
  ("fast", "سريع", "adjective, adverb"),
  ("garden", "حديقة", "noun"),
  ("give", "يعطي", "verb"),
  ("glass", "زجاج", "noun"),
  ("happy", "سعيد", "adjective"),
  ("hello", "مرحبا", "exclamation"),
  ("help", "يساعد", "verb, noun"),
  ("idea", "فكرة", "noun"),
  ("important", "مهم", "adjective"),
  ("island", "جزيرة", "noun"),
  ("job", "وظيفة", "noun"),
  ("juice", "عصير", "noun"),
  ("jump", "يقفز", "verb"),
  ("key", "مفتاح", "noun"),
  ("kitchen", "مطبخ", "noun"),
  ("know", "يعرف", "verb"),
  ("language", "لغة", "noun"),
  ("large", "كبير", "adjective"),
  ("learn", "يتعلم", "verb"),
  ("machine", "آلة", "noun"),
  ("market", "سوق", "noun"),
  ("many", "كثير", "determiner, pronoun"),
  ("name", "اسم", "noun"),
  ("near", "قريب من", "preposition, adjective"),
  ("never", "أبدا", "adverb"),
  ("ocean", "محيط", "noun"),
  ("open", "يفتح", "verb, adjective"),
  ("orange", "برتقالة", "noun, adjective"),
  ("paper", "ورق", "noun"),
  ("people", "ناس", "noun"),
  ("play", "يلعب", "verb, noun"),
  ("quality", "جودة", "noun"),
  ("question", "سؤال", "noun"),
  ("quick", "سريع الحركة", "adjective"),
  ("quiet", "هادئ", "adjective"),
  ("quite", "تماما", "adverb"),
  ("rain", "مطر", "noun, verb"),
  ("read", "يقرأ", "verb"),
  ("river", "نهر", "noun"),
  ("school", "مدرسة", "noun"),
  ("she", "هي", "pronoun"),
  ("sing", "يغني", "verb"),
  ("table", "طاولة", "noun"),
  ("teacher", "معلم", "noun"),
  ("three", "ثلاثة", "number"),
  ("under", "تحت", "preposition, adverb"),
  ("useful", "مفيد", "adjective"),
  ("village", "قرية", "noun"),
  ("visit", "يزور", "verb, noun"),
  ("water", "ماء", "noun"),
  ("window", "نافذة", "noun"),
  ("write", "يكتب", "verb"),
  ("year", "سنة", "noun"),
  ("yellow", "أصفر", "adjective"),
  ("zero", "صفر", "number"),
];

/// The built-in lexicon, in dataset order.
pub fn seed_lexicon() -> Vec<LexiconEntry> {
  OXFORD_EXCERPT
    .iter()
    .map(|(en, ar, pos)| LexiconEntry::new(en, ar, pos))
    .collect()
}

/// Pre-written example sentences used when the model is unavailable.
pub fn seed_sentences() -> HashMap<&'static str, Vec<SentenceExample>> {
  fn ex(sentence: &str, translation: &str) -> SentenceExample {
    SentenceExample { sentence: sentence.into(), translation: translation.into() }
  }

  HashMap::from([
    ("a", vec![
      ex("She is a doctor.", "هي طبيبة."),
      ex("I need a new computer.", "أحتاج إلى جهاز كمبيوتر جديد."),
      ex("He bought a ticket for the concert.", "لقد اشترى تذكرة للحفل الموسيقي."),
      ex("There is a cat in the garden.", "توجد قطة في الحديقة."),
      ex("It was a beautiful day.", "لقد كان يوما جميلا."),
    ]),
    ("abandon", vec![
      ex("He had to abandon his car in the snow.", "كان عليه أن يتخلى عن سيارته في الثلج."),
      ex("The sailors decided to abandon the sinking ship.", "قرر البحارة التخلي عن السفينة الغارقة."),
      ex("Do not abandon your dreams.", "لا تتخلى عن أحلامك."),
      ex("The old house was abandoned years ago.", "تم هجر المنزل القديم منذ سنوات."),
      ex("She would never abandon her friends.", "لن تتخلى عن أصدقائها أبدًا."),
    ]),
    ("ability", vec![
      ex("She has the ability to solve complex problems.", "لديها القدرة على حل المشاكل المعقدة."),
      ex("His ability to speak five languages is amazing.", "قدرته على التحدث بخمس لغات مذهلة."),
      ex("The test measures your mathematical ability.", "الاختبار يقيس قدرتك الرياضية."),
      ex("He has a natural ability for music.", "لديه موهبة طبيعية للموسيقى."),
      ex("We must not doubt our own abilities.", "يجب ألا نشك في قدراتنا."),
    ]),
    ("able", vec![
      ex("Will you be able to come to the party?", "هل ستكون قادراً على الحضور إلى الحفلة؟"),
      ex("She is a very able student.", "إنها طالبة قادرة جداً."),
      ex("He was not able to finish the race.", "لم يكن قادراً على إنهاء السباق."),
      ex("You must be able to work under pressure.", "يجب أن تكون قادرًا على العمل تحت الضغط."),
      ex("I might be able to help you with that.", "قد أكون قادرًا على مساعدتك في ذلك."),
    ]),
  ])
}
