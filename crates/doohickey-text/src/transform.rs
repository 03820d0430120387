// Whole-text string transforms.

use std::collections::HashSet;
use std::fmt;

use doohickey_core::{Convert, ConvertError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").unwrap());

static SENTENCE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^\w|[.!?]\s+\w)").unwrap());

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_\s]+(.)?").unwrap());

static UPPER_ASCII: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z])").unwrap());

static SNAKE_GAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

static KEBAB_GAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\s]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    Uppercase,
    Lowercase,
    Title,
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
    Reverse,
    Trim,
    RemoveDuplicates,
    SortLines,
}

impl Transform {
    pub const ALL: [Transform; 12] = [
        Transform::Uppercase,
        Transform::Lowercase,
        Transform::Title,
        Transform::Sentence,
        Transform::Camel,
        Transform::Pascal,
        Transform::Snake,
        Transform::Kebab,
        Transform::Reverse,
        Transform::Trim,
        Transform::RemoveDuplicates,
        Transform::SortLines,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Transform::Uppercase => "upper",
            Transform::Lowercase => "lower",
            Transform::Title => "title",
            Transform::Sentence => "sentence",
            Transform::Camel => "camel",
            Transform::Pascal => "pascal",
            Transform::Snake => "snake",
            Transform::Kebab => "kebab",
            Transform::Reverse => "reverse",
            Transform::Trim => "trim",
            Transform::RemoveDuplicates => "remove-duplicates",
            Transform::SortLines => "sort-lines",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transform::Uppercase => "UPPERCASE",
            Transform::Lowercase => "lowercase",
            Transform::Title => "Title Case",
            Transform::Sentence => "Sentence case",
            Transform::Camel => "camelCase",
            Transform::Pascal => "PascalCase",
            Transform::Snake => "snake_case",
            Transform::Kebab => "kebab-case",
            Transform::Reverse => "Reverse",
            Transform::Trim => "Trim whitespace",
            Transform::RemoveDuplicates => "Remove duplicate lines",
            Transform::SortLines => "Sort lines A-Z",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Transform> {
        let slug = slug.trim().to_ascii_lowercase();
        let slug = match slug.as_str() {
            "uppercase" => "upper",
            "lowercase" => "lower",
            "dedupe" => "remove-duplicates",
            "sort" => "sort-lines",
            other => other,
        };
        Self::ALL.iter().copied().find(|t| t.slug() == slug)
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Transform::Uppercase => text.to_uppercase(),
            Transform::Lowercase => text.to_lowercase(),
            Transform::Title => upper_matches(&WORD_START, text),
            Transform::Sentence => upper_matches(&SENTENCE_START, &text.to_lowercase()),
            Transform::Camel => map_first_char(&join_words(text), |c| c.to_lowercase().collect()),
            Transform::Pascal => map_first_char(&join_words(text), |c| c.to_uppercase().collect()),
            Transform::Snake => separate(text, "_$1", &SNAKE_GAPS, '_'),
            Transform::Kebab => separate(text, "-$1", &KEBAB_GAPS, '-'),
            Transform::Reverse => text.chars().rev().collect(),
            Transform::Trim => text
                .split('\n')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string(),
            Transform::RemoveDuplicates => {
                let mut seen = HashSet::new();
                text.split('\n')
                    .filter(|line| seen.insert(*line))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Transform::SortLines => {
                let mut lines: Vec<&str> = text.split('\n').collect();
                // Case-insensitive, lowercase first when letters tie.
                lines.sort_by(|a, b| {
                    a.to_lowercase()
                        .cmp(&b.to_lowercase())
                        .then_with(|| b.cmp(a))
                });
                lines.join("\n")
            }
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Convert for Transform {
    fn convert(&self, input: &str) -> Result<String, ConvertError> {
        Ok(self.apply(input))
    }
}

fn upper_matches(pattern: &Regex, text: &str) -> String {
    pattern
        .replace_all(text, |caps: &Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Drop `-`, `_` and whitespace runs, uppercasing the character after each.
fn join_words(text: &str) -> String {
    SEPARATOR_RUN
        .replace_all(text, |caps: &Captures<'_>| {
            caps.get(1)
                .map_or(String::new(), |m| m.as_str().to_uppercase())
        })
        .into_owned()
}

fn map_first_char(text: &str, f: impl Fn(char) -> String) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => f(first) + chars.as_str(),
        None => String::new(),
    }
}

/// Prefix capitals with `sep`, collapse `gaps` into `sep`, drop one leading
/// `sep`, lowercase.
fn separate(text: &str, upper_template: &str, gaps: &Regex, sep: char) -> String {
    let marked = UPPER_ASCII.replace_all(text, upper_template);
    let joined = gaps.replace_all(&marked, sep.to_string().as_str());
    joined
        .strip_prefix(sep)
        .unwrap_or(&*joined)
        .to_lowercase()
}

/// Literal, non-overlapping replace of every `find`. An empty `find` leaves
/// the text unchanged.
pub fn replace_all(text: &str, find: &str, replacement: &str) -> String {
    if find.is_empty() {
        return text.to_string();
    }
    text.split(find).collect::<Vec<_>>().join(replacement)
}
