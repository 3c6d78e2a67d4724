//! Keyword-based text analyzer.
//!
//! This is the offline classifier used when no external analysis is at hand.
//! It counts keyword hits for a fixed set of traits and emotions, estimates
//! formality from indicator words, and derives sentence-structure levels from
//! sentence lengths. Everything is heuristic.

use std::collections::HashMap;

use serde::Serialize;

use brandvoice_core::model::{FieldValue, PartialParameterSet};

const PERSONALITY_TRAITS: &[(&str, &[&str])] = &[
    (
        "innovative",
        &["innovative", "creative", "cutting-edge", "pioneering", "inventive", "original", "groundbreaking"],
    ),
    (
        "trustworthy",
        &["trustworthy", "reliable", "dependable", "honest", "credible", "authentic", "transparent"],
    ),
    (
        "playful",
        &["playful", "fun", "lighthearted", "humorous", "witty", "amusing", "entertaining"],
    ),
    (
        "sophisticated",
        &["sophisticated", "elegant", "refined", "polished", "cultured", "high-end", "premium"],
    ),
    (
        "friendly",
        &["friendly", "approachable", "warm", "welcoming", "personable", "accessible", "conversational"],
    ),
    (
        "authoritative",
        &["authoritative", "expert", "knowledgeable", "professional", "competent", "credible", "informed"],
    ),
    (
        "bold",
        &["bold", "daring", "brave", "fearless", "confident", "assertive", "strong"],
    ),
    (
        "empathetic",
        &["empathetic", "compassionate", "understanding", "caring", "supportive", "sensitive", "thoughtful"],
    ),
];

const EMOTIONAL_TONES: &[(&str, &[&str])] = &[
    (
        "optimistic",
        &["optimistic", "positive", "hopeful", "upbeat", "encouraging", "inspiring", "motivating"],
    ),
    (
        "serious",
        &["serious", "solemn", "grave", "earnest", "sober", "formal", "no-nonsense"],
    ),
    (
        "passionate",
        &["passionate", "enthusiastic", "excited", "energetic", "fervent", "ardent", "zealous"],
    ),
    (
        "calm",
        &["calm", "peaceful", "serene", "tranquil", "relaxed", "composed", "steady"],
    ),
    (
        "urgent",
        &["urgent", "pressing", "critical", "crucial", "vital", "essential", "immediate"],
    ),
    (
        "reassuring",
        &["reassuring", "comforting", "soothing", "consoling", "encouraging", "supportive", "calming"],
    ),
];

const FORMAL_INDICATORS: &[&str] = &[
    "therefore",
    "consequently",
    "furthermore",
    "moreover",
    "thus",
    "hence",
    "regarding",
    "concerning",
    "accordingly",
    "subsequently",
];

const INFORMAL_INDICATORS: &[&str] = &[
    "anyway", "basically", "actually", "so", "well", "you know", "kind of", "sort of", "like",
    "stuff", "thing",
];

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

const PRIMARY_TRAITS: usize = 3;
const SECONDARY_TRAITS: usize = 3;
const PRIMARY_EMOTIONS: usize = 2;
const SECONDARY_EMOTIONS: usize = 2;

/// Sentences shorter than this many words count as short.
const SHORT_SENTENCE: usize = 10;
/// Sentences of at least this many words count as long.
const LONG_SENTENCE: usize = 20;

/// A label and the number of keyword hits it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub label: String,
    pub count: usize,
}

/// Raw findings of one analyzer run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    /// Traits with at least one hit, best first.
    pub traits: Vec<Hit>,
    /// Emotions with at least one hit, best first.
    pub emotions: Vec<Hit>,
    /// 1-10 formality, absent when the text has no indicator words.
    pub formality: Option<u8>,
    pub sentence_count: usize,
    pub word_count: usize,
    pub avg_sentence_words: f64,
    pub sentence_length: Option<u8>,
    pub sentence_complexity: Option<u8>,
    /// Non-stopword words by descending frequency.
    pub frequent_words: Vec<Hit>,
}

impl TextAnalysis {
    /// The partial set the analyzer contributes, keeping at most `terms`
    /// frequent words as preferred terms.
    pub fn to_params(&self, terms: usize) -> PartialParameterSet {
        let mut set = PartialParameterSet::default();

        let (primary, secondary) = split_hits(&self.traits, PRIMARY_TRAITS, SECONDARY_TRAITS);
        set.personality.primary_traits = primary;
        set.personality.secondary_traits = secondary;

        let (primary, secondary) = split_hits(&self.emotions, PRIMARY_EMOTIONS, SECONDARY_EMOTIONS);
        set.emotional_tone.primary_emotions = primary;
        set.emotional_tone.secondary_emotions = secondary;

        set.formality.level = level(self.formality);
        set.communication_style.sentence_length_preference = level(self.sentence_length);
        set.communication_style.sentence_complexity_preference = level(self.sentence_complexity);

        set.vocabulary.preferred_terms =
            list_or_missing(self.frequent_words.iter().take(terms).map(|h| h.label.as_str()));

        set
    }
}

fn level(value: Option<u8>) -> FieldValue {
    value.map(FieldValue::scalar).unwrap_or_default()
}

fn list_or_missing<'a>(items: impl Iterator<Item = &'a str>) -> FieldValue {
    match FieldValue::list(items) {
        FieldValue::List(items) if items.is_empty() => FieldValue::Missing,
        value => value,
    }
}

fn split_hits(hits: &[Hit], primary: usize, secondary: usize) -> (FieldValue, FieldValue) {
    let labels = || hits.iter().map(|h| h.label.as_str());
    (
        list_or_missing(labels().take(primary)),
        list_or_missing(labels().skip(primary).take(secondary)),
    )
}

/// Analyze a body of text.
pub fn analyze_text(text: &str) -> TextAnalysis {
    let sentences = split_sentences(text);
    let sentence_words: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s)).collect();
    let words: Vec<&str> = sentence_words.iter().flatten().map(String::as_str).collect();
    let lower_sentences: Vec<String> = sentences.iter().map(|s| s.to_lowercase()).collect();

    let traits = rank_hits(PERSONALITY_TRAITS, &words, &lower_sentences);
    let emotions = rank_hits(EMOTIONAL_TONES, &words, &lower_sentences);

    let formal = count_indicators(FORMAL_INDICATORS, &words);
    let informal = count_indicators(INFORMAL_INDICATORS, &words);
    let formality = (formal + informal > 0).then(|| scale(10 * formal / (formal + informal)));

    let lengths: Vec<usize> = sentence_words.iter().map(Vec::len).collect();
    let sentence_count = lengths.len();
    let word_count = words.len();
    let avg_sentence_words = if sentence_count == 0 {
        0.0
    } else {
        word_count as f64 / sentence_count as f64
    };

    let sentence_length = (sentence_count > 0).then(|| scale((avg_sentence_words / 3.0) as usize));
    let sentence_complexity = (sentence_count > 0).then(|| {
        let medium = lengths
            .iter()
            .filter(|&&n| (SHORT_SENTENCE..LONG_SENTENCE).contains(&n))
            .count();
        let long = lengths.iter().filter(|&&n| n >= LONG_SENTENCE).count();
        scale(10 * (medium + 2 * long) / sentence_count)
    });

    tracing::debug!(
        sentences = sentence_count,
        words = word_count,
        traits = traits.len(),
        emotions = emotions.len(),
        "Analyzed text"
    );

    TextAnalysis {
        traits,
        emotions,
        formality,
        sentence_count,
        word_count,
        avg_sentence_words,
        sentence_length,
        sentence_complexity,
        frequent_words: frequent_words(&words),
    }
}

fn scale(raw: usize) -> u8 {
    raw.clamp(1, 10) as u8
}

/// Split on sentence-ending punctuation and line breaks between paragraphs.
fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}

/// Lower-cased words. Hyphens and apostrophes inside a word are kept.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '\''))
        .map(|w| w.trim_matches(|c| c == '-' || c == '\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// One hit per matching word plus one per sentence mentioning a keyword.
fn rank_hits(table: &[(&str, &[&str])], words: &[&str], sentences: &[String]) -> Vec<Hit> {
    let mut hits: Vec<Hit> = table
        .iter()
        .map(|(label, keywords)| {
            let word_hits = words.iter().filter(|w| keywords.contains(*w)).count();
            let sentence_hits: usize = keywords
                .iter()
                .map(|k| sentences.iter().filter(|s| s.contains(k)).count())
                .sum();
            Hit {
                label: label.to_string(),
                count: word_hits + sentence_hits,
            }
        })
        .filter(|h| h.count > 0)
        .collect();
    // Stable: ties keep table order.
    hits.sort_by(|a, b| b.count.cmp(&a.count));
    hits
}

/// Count single-word and multi-word indicators on word boundaries.
fn count_indicators(indicators: &[&str], words: &[&str]) -> usize {
    indicators
        .iter()
        .map(|indicator| {
            let phrase: Vec<&str> = indicator.split(' ').collect();
            words.windows(phrase.len()).filter(|w| *w == phrase.as_slice()).count()
        })
        .sum()
}

fn frequent_words(words: &[&str]) -> Vec<Hit> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, word) in words.iter().enumerate() {
        if word.len() < 2 || !word.chars().all(char::is_alphanumeric) || STOPWORDS.contains(word) {
            continue;
        }
        counts.entry(*word).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .map(|(word, count, _)| Hit {
            label: word.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAL: &str = "Therefore, our reliable and transparent platform is trusted by experts. \
        Furthermore, we remain honest regarding every commitment. \
        Consequently, clients consider the platform dependable.";

    #[test]
    fn test_traits_ranked_by_hits() {
        let analysis = analyze_text(FORMAL);
        assert_eq!(analysis.traits[0].label, "trustworthy");
        assert!(analysis.traits.iter().all(|h| h.count > 0));
        assert!(!analysis.traits.iter().any(|h| h.label == "playful"));
    }

    #[test]
    fn test_formality_from_indicators() {
        let analysis = analyze_text(FORMAL);
        assert_eq!(analysis.formality, Some(10));

        let casual = analyze_text("So basically we like fun stuff. Anyway, you know how it is.");
        assert_eq!(casual.formality, Some(1));

        let neutral = analyze_text("Our shoes are comfortable. They last for years.");
        assert_eq!(neutral.formality, None);
    }

    #[test]
    fn test_indicators_match_whole_words() {
        // "also" and "likely" must not count as "so" and "like".
        let analysis = analyze_text("This is also likely to happen. Therefore we plan ahead.");
        assert_eq!(analysis.formality, Some(10));
    }

    #[test]
    fn test_sentence_structure() {
        let analysis = analyze_text("Short one. Another short one. Tiny.");
        assert_eq!(analysis.sentence_count, 3);
        assert_eq!(analysis.sentence_length, Some(1));
        assert_eq!(analysis.sentence_complexity, Some(1));

        let long_sentence = vec!["word"; 30].join(" ");
        let analysis = analyze_text(&format!("{long_sentence}."));
        assert_eq!(analysis.sentence_length, Some(10));
        assert_eq!(analysis.sentence_complexity, Some(10));
    }

    #[test]
    fn test_empty_text() {
        let analysis = analyze_text("   ");
        assert_eq!(analysis.sentence_count, 0);
        assert!(analysis.traits.is_empty());
        assert_eq!(analysis.sentence_length, None);
        assert!(analysis.to_params(20).is_empty());
    }

    #[test]
    fn test_frequent_words_skip_stopwords() {
        let analysis = analyze_text("The craft matters. Our craft is quality. Quality and craft.");
        let labels: Vec<&str> = analysis.frequent_words.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["craft", "quality", "matters"]);
    }

    #[test]
    fn test_to_params() {
        let analysis = analyze_text(FORMAL);
        let set = analysis.to_params(2);

        let primary = set.personality.primary_traits.as_list().unwrap();
        assert_eq!(primary[0], "trustworthy");
        assert_eq!(set.formality.level, FieldValue::Scalar(10.0));
        assert_eq!(set.vocabulary.preferred_terms.as_list().unwrap().len(), 2);
        assert!(set.communication_style.sentence_length_preference.as_scalar().is_some());
    }
}
