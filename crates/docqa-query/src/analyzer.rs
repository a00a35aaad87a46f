//! The analyzer proper: compiled form of the lexicon plus the extraction
//! rules.

use crate::analysis::{OrderType, QueryAnalysis, QuestionType};
use crate::lexicon::Lexicon;
use docqa_core::error::{Error, Result};
use docqa_core::tokenize::tokenize;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

const MAX_KEYWORDS: usize = 10;

/// Compiled, immutable form of a [`Lexicon`]. Construction validates every
/// pattern table; analysis itself cannot fail.
#[derive(Debug)]
pub struct QueryAnalyzer {
    /// Lower-case aliases in match order: longest first, then alphabetical,
    /// so multi-word names cannot be shadowed by their suffixes.
    aliases: Vec<(String, String)>,
    state_codes: BTreeSet<String>,
    order_rules: Vec<(OrderType, Regex)>,
    topic_rules: Vec<(String, Regex)>,
    image_rule: Option<Regex>,
    question_rules: Vec<(QuestionType, Regex)>,
}

impl QueryAnalyzer {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let mut aliases: Vec<(String, String)> = lexicon
            .state_names
            .iter()
            .map(|(name, code)| (name.clone(), code.clone()))
            .collect();
        for code in &lexicon.state_codes {
            let lower = code.to_lowercase();
            if !lexicon.ambiguous_codes.contains(&lower) {
                aliases.push((lower, code.clone()));
            }
        }
        aliases.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });

        let mut order_rules = Vec::new();
        for rule in &lexicon.order_types {
            if let Some(re) = compile_any(&rule.patterns)? {
                order_rules.push((rule.order_type, re));
            }
        }
        let mut topic_rules = Vec::new();
        for rule in &lexicon.topics {
            if let Some(re) = compile_any(&rule.patterns)? {
                topic_rules.push((rule.topic.clone(), re));
            }
        }
        let mut question_rules = Vec::new();
        for rule in &lexicon.question_types {
            if let Some(re) = compile_any(&rule.patterns)? {
                question_rules.push((rule.question_type, re));
            }
        }

        Ok(Self {
            aliases,
            state_codes: lexicon.state_codes.clone(),
            order_rules,
            topic_rules,
            image_rule: compile_any(&lexicon.image_words)?,
            question_rules,
        })
    }

    /// Extract structured signals from one query. Always returns a fully
    /// populated analysis; unrecognized queries come back mostly null with
    /// base confidence.
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let lowered = query.to_lowercase();

        let state = self.extract_state(query, &lowered);
        let order_type = self.extract_order_type(&lowered);
        let topics = self.extract_topics(&lowered);
        let requires_image = self
            .image_rule
            .as_ref()
            .is_some_and(|re| re.is_match(&lowered));
        let question_type = self.extract_question_type(&lowered);
        let keywords: Vec<String> = tokenize(query).into_iter().take(MAX_KEYWORDS).collect();

        let mut confidence = 0.5;
        if state.is_some() {
            confidence += 0.2;
        }
        if order_type.is_some() {
            confidence += 0.2;
        }
        confidence += 0.1 * topics.len().min(3) as f32;
        let confidence = confidence.clamp(0.0, 1.0);

        debug!(
            ?state,
            ?order_type,
            topic_count = topics.len(),
            requires_image,
            ?question_type,
            confidence,
            "query analyzed"
        );

        QueryAnalysis {
            state,
            order_type,
            topics,
            requires_image,
            question_type,
            keywords,
            confidence,
        }
    }

    /// Alias dictionary first; bare two-letter uppercase codes as fallback.
    /// First match wins, at most one state per query.
    fn extract_state(&self, raw: &str, lowered: &str) -> Option<String> {
        for (alias, code) in &self.aliases {
            if contains_word(lowered, alias) {
                return Some(code.clone());
            }
        }
        for token in raw.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric());
            if token.len() == 2
                && token.chars().all(|c| c.is_ascii_uppercase())
                && self.state_codes.contains(token)
            {
                return Some(token.to_string());
            }
        }
        None
    }

    fn extract_order_type(&self, lowered: &str) -> Option<OrderType> {
        self.order_rules
            .iter()
            .find(|(_, re)| re.is_match(lowered))
            .map(|(order_type, _)| *order_type)
    }

    fn extract_topics(&self, lowered: &str) -> Vec<String> {
        self.topic_rules
            .iter()
            .filter(|(_, re)| re.is_match(lowered))
            .map(|(topic, _)| topic.clone())
            .collect()
    }

    fn extract_question_type(&self, lowered: &str) -> QuestionType {
        self.question_rules
            .iter()
            .find(|(_, re)| re.is_match(lowered))
            .map_or(QuestionType::General, |(question_type, _)| *question_type)
    }
}

/// Join a pattern table into one word-bounded alternation. `None` for an
/// empty table, `InvalidConfig` for fragments that do not compile.
fn compile_any(patterns: &[String]) -> Result<Option<Regex>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let joined = patterns.join("|");
    Regex::new(&format!(r"\b(?:{joined})\b"))
        .map(Some)
        .map_err(|e| Error::InvalidConfig(format!("pattern table '{joined}' does not compile: {e}")))
}

/// Substring containment at word boundaries: the match may not touch an
/// alphanumeric character on either side.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = !haystack[..begin]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric);
        let after_ok = !haystack[end..]
            .chars()
            .next()
            .is_some_and(char::is_alphanumeric);
        if before_ok && after_ok {
            return true;
        }
        start = begin + needle.len();
    }
    false
}
