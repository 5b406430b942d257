//! Utterance building: raw text in, tokenized utterances out.
//!
//! Tokenization is a capability consumed by the classifier rather than a
//! fixed behavior: hosts with a real linguistic pipeline implement
//! [`UtteranceBuilder`] themselves. [`RegexUtteranceBuilder`] is the default
//! implementation, a regex scan that splits text into word, whitespace, and
//! punctuation runs and assigns idf-style term weights across the batch.

use ahash::AHashMap;
use regex::Regex;

use crate::analysis::Language;
use crate::analysis::token::Token;
use crate::analysis::utterance::Utterance;
use crate::error::{Result, SagarisError};

/// Capability for turning raw texts into tokenized utterances.
///
/// Term weights are expected to be comparable within one batch: the
/// none-intent synthesizer selects "low-signal" vocabulary by thresholding
/// them, so a builder should weight corpus-wide common words low.
pub trait UtteranceBuilder: Send + Sync {
    /// Tokenize a batch of texts into utterances tagged with `language`.
    fn build_batch(&self, texts: &[String], language: &Language) -> Result<Vec<Utterance>>;

    /// Get the name of this builder (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// The default regex-based utterance builder.
///
/// Splits text into runs of word characters, whitespace, and punctuation.
/// Word tokens carry a term weight of `ln(batch_size / document_frequency)`,
/// so words present in every text of the batch weigh 0 and words unique to
/// one text weigh highest.
#[derive(Clone, Debug)]
pub struct RegexUtteranceBuilder {
    pattern: Regex,
}

impl RegexUtteranceBuilder {
    /// Create a new builder with the default token pattern.
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"\w+|\s+|[^\w\s]+")
            .map_err(|e| SagarisError::analysis(format!("Invalid token pattern: {e}")))?;
        Ok(RegexUtteranceBuilder { pattern })
    }

    fn scan(&self, text: &str) -> Vec<Token> {
        self.pattern
            .find_iter(text)
            .map(|m| {
                let run = m.as_str();
                let first = run.chars().next().unwrap_or(' ');
                if first.is_whitespace() {
                    Token::whitespace(run)
                } else if first.is_alphanumeric() || first == '_' {
                    Token::word(run)
                } else {
                    Token::punctuation(run)
                }
            })
            .collect()
    }
}

impl Default for RegexUtteranceBuilder {
    fn default() -> Self {
        Self::new().expect("Default token pattern should be valid")
    }
}

impl UtteranceBuilder for RegexUtteranceBuilder {
    fn build_batch(&self, texts: &[String], language: &Language) -> Result<Vec<Utterance>> {
        let token_runs: Vec<Vec<Token>> = texts.iter().map(|text| self.scan(text)).collect();

        // Document frequency of each lowercase word over the batch.
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        for tokens in &token_runs {
            let mut seen: Vec<&str> = Vec::new();
            for token in tokens.iter().filter(|t| t.is_word) {
                if !seen.contains(&token.lower.as_str()) {
                    seen.push(&token.lower);
                }
            }
            for lower in seen {
                *document_frequency.entry(lower.to_string()).or_insert(0) += 1;
            }
        }

        let batch_size = texts.len() as f64;
        let utterances = token_runs
            .into_iter()
            .map(|tokens| {
                let tokens = tokens
                    .into_iter()
                    .map(|token| {
                        if token.is_word {
                            let df = *document_frequency.get(&token.lower).unwrap_or(&1) as f64;
                            let weight = (batch_size / df).ln().max(0.0);
                            token.with_term_weight(weight)
                        } else {
                            token
                        }
                    })
                    .collect();
                Utterance::new(tokens, language.clone())
            })
            .collect();

        Ok(utterances)
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(texts: &[&str]) -> Vec<Utterance> {
        let builder = RegexUtteranceBuilder::new().unwrap();
        let texts: Vec<String> = texts.iter().map(|s| s.to_string()).collect();
        builder.build_batch(&texts, &Language::new("en")).unwrap()
    }

    #[test]
    fn test_scan_classifies_runs() {
        let utterances = build(&["Hello, world!"]);
        let kinds: Vec<(bool, bool)> = utterances[0]
            .tokens()
            .iter()
            .map(|t| (t.is_word, t.is_whitespace))
            .collect();
        // "Hello" "," " " "world" "!"
        assert_eq!(
            kinds,
            vec![
                (true, false),
                (false, false),
                (false, true),
                (true, false),
                (false, false)
            ]
        );
        assert_eq!(utterances[0].text(), "Hello, world!");
    }

    #[test]
    fn test_ubiquitous_words_weigh_zero() {
        let utterances = build(&["book a flight", "book a hotel", "book a table"]);
        for utterance in &utterances {
            for token in utterance.words() {
                match token.lower.as_str() {
                    "book" | "a" => assert_eq!(token.term_weight, 0.0),
                    _ => assert!(token.term_weight > 0.0, "{} should be weighted", token.lower),
                }
            }
        }
    }

    #[test]
    fn test_no_space_text_is_one_word_run() {
        let utterances = build(&["こんにちは世界"]);
        assert_eq!(utterances[0].word_count(), 1);
        assert_eq!(utterances[0].len(), 1);
    }
}
