//! Pattern tables driving the query analyzer.
//!
//! Everything the analyzer matches against is data in this module, so
//! deployments can extend aliases and topic vocabularies through
//! configuration without touching analyzer logic. Pattern strings are regex
//! fragments; the analyzer wraps each table in one word-bounded alternation.

use crate::analysis::{OrderType, QuestionType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One order-type category and the patterns that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTypeRule {
    pub order_type: OrderType,
    pub patterns: Vec<String>,
}

/// One topic category and the patterns that select it. Categories are
/// tested in declaration order and are disjoint by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRule {
    pub topic: String,
    pub patterns: Vec<String>,
}

/// One question-type category and the patterns that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionTypeRule {
    pub question_type: QuestionType,
    pub patterns: Vec<String>,
}

/// Alias and pattern tables for the analyzer. Every field has a
/// compiled-in default; configuration may override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Full state names, lower case, mapped to two-letter codes.
    pub state_names: BTreeMap<String, String>,
    /// Valid two-letter codes for the uppercase fallback scan.
    pub state_codes: BTreeSet<String>,
    /// Codes whose lower-case forms double as common English words. These
    /// never act as lower-case aliases and are only recognized upper case.
    pub ambiguous_codes: BTreeSet<String>,
    pub order_types: Vec<OrderTypeRule>,
    pub topics: Vec<TopicRule>,
    /// Words signalling that the answer should include visual material.
    pub image_words: Vec<String>,
    pub question_types: Vec<QuestionTypeRule>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            state_names: default_state_names(),
            state_codes: default_state_codes(),
            ambiguous_codes: default_ambiguous_codes(),
            order_types: default_order_types(),
            topics: default_topics(),
            image_words: default_image_words(),
            question_types: default_question_types(),
        }
    }
}

fn default_state_names() -> BTreeMap<String, String> {
    [
        ("alabama", "AL"),
        ("alaska", "AK"),
        ("arizona", "AZ"),
        ("arkansas", "AR"),
        ("california", "CA"),
        ("colorado", "CO"),
        ("connecticut", "CT"),
        ("delaware", "DE"),
        ("district of columbia", "DC"),
        ("florida", "FL"),
        ("georgia", "GA"),
        ("hawaii", "HI"),
        ("idaho", "ID"),
        ("illinois", "IL"),
        ("indiana", "IN"),
        ("iowa", "IA"),
        ("kansas", "KS"),
        ("kentucky", "KY"),
        ("louisiana", "LA"),
        ("maine", "ME"),
        ("maryland", "MD"),
        ("massachusetts", "MA"),
        ("michigan", "MI"),
        ("minnesota", "MN"),
        ("mississippi", "MS"),
        ("missouri", "MO"),
        ("montana", "MT"),
        ("nebraska", "NE"),
        ("nevada", "NV"),
        ("new hampshire", "NH"),
        ("new jersey", "NJ"),
        ("new mexico", "NM"),
        ("new york", "NY"),
        ("north carolina", "NC"),
        ("north dakota", "ND"),
        ("ohio", "OH"),
        ("oklahoma", "OK"),
        ("oregon", "OR"),
        ("pennsylvania", "PA"),
        ("rhode island", "RI"),
        ("south carolina", "SC"),
        ("south dakota", "SD"),
        ("tennessee", "TN"),
        ("texas", "TX"),
        ("utah", "UT"),
        ("vermont", "VT"),
        ("virginia", "VA"),
        ("washington", "WA"),
        ("west virginia", "WV"),
        ("wisconsin", "WI"),
        ("wyoming", "WY"),
    ]
    .into_iter()
    .map(|(name, code)| (name.to_string(), code.to_string()))
    .collect()
}

fn default_state_codes() -> BTreeSet<String> {
    default_state_names().into_values().collect()
}

fn default_ambiguous_codes() -> BTreeSet<String> {
    ["in", "or", "me", "hi", "ok", "id"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_order_types() -> Vec<OrderTypeRule> {
    vec![
        OrderTypeRule {
            order_type: OrderType::Rise,
            patterns: strings(&["rise"]),
        },
        OrderTypeRule {
            order_type: OrderType::Regular,
            patterns: strings(&["regular", "standard", "normal"]),
        },
    ]
}

fn default_topics() -> Vec<TopicRule> {
    let table: &[(&str, &[&str])] = &[
        ("ordering", &["orders?", "ordering", "limits?", "cutoff"]),
        ("delivery", &["deliver(?:y|ies)?", "shipping", "shipments?", "transport"]),
        ("scheduling", &["schedul(?:e|es|ing)", "appointments?", "pickups?", "calendar"]),
        ("eligibility", &["eligib(?:le|ility)", "qualif(?:y|ies|ication)", "who can"]),
        ("inventory", &["inventory", "stock", "storage", "warehouse"]),
        ("reporting", &["reports?", "reporting", "statistics"]),
        ("forms", &["forms?", "paperwork", "signatures?"]),
        ("contacts", &["contacts?", "phone", "email", "who do i call"]),
        ("billing", &["billing", "invoices?", "payments?", "fees?"]),
    ];
    table
        .iter()
        .map(|(topic, patterns)| TopicRule {
            topic: (*topic).to_string(),
            patterns: strings(patterns),
        })
        .collect()
}

fn default_image_words() -> Vec<String> {
    strings(&[
        "images?",
        "pictures?",
        "photos?",
        "screenshots?",
        "diagrams?",
        "show",
        "examples?",
        "forms?",
        "illustrations?",
    ])
}

fn default_question_types() -> Vec<QuestionTypeRule> {
    vec![
        QuestionTypeRule {
            question_type: QuestionType::Procedural,
            patterns: strings(&["how do", "how can", "how to", "steps?", "process", "procedures?"]),
        },
        QuestionTypeRule {
            question_type: QuestionType::Policy,
            patterns: strings(&[
                "polic(?:y|ies)",
                "rules?",
                "allowed",
                "permitted",
                "limits?",
                "restrictions?",
                "can i",
                "may i",
            ]),
        },
        QuestionTypeRule {
            question_type: QuestionType::Location,
            patterns: strings(&["where", "locations?", "address"]),
        },
        QuestionTypeRule {
            question_type: QuestionType::Definition,
            patterns: strings(&["what is", "what are", "what does", "define", "definitions?", "meaning"]),
        },
        QuestionTypeRule {
            question_type: QuestionType::Comparison,
            patterns: strings(&["difference", "compared?", "comparison", "versus", "vs", "better"]),
        },
    ]
}

fn strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| (*p).to_string()).collect()
}
