//! Textual quality-control: the pipeline parallel to the visual analyzers.
//!
//! Spelling and grammar detection itself is an external collaborator
//! (dictionary- or LLM-backed) behind [`TextIssueProvider`]; this module
//! owns what happens to its raw spans afterwards — ordering, sentence
//! context, page/paragraph estimation, and section attribution — plus the
//! in-crate regex style rules that need no external service.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;

/// The kind of textual defect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TextIssueKind {
    /// Misspelled word.
    Spelling,
    /// Grammatical problem.
    Grammar,
    /// House-style violation.
    Style,
}

/// A raw issue span as returned by a provider: half-open byte range into
/// the analyzed text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawTextIssue {
    /// Issue kind.
    pub kind: TextIssueKind,
    /// What is wrong.
    pub message: String,
    /// Suggested replacement, when the provider has one.
    pub suggestion: Option<String>,
    /// Byte offset where the span starts.
    pub start: usize,
    /// Byte offset one past the span's end.
    pub end: usize,
}

/// A fully annotated text issue as it appears in reports.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextIssue {
    /// Issue kind.
    pub kind: TextIssueKind,
    /// What is wrong.
    pub message: String,
    /// Suggested replacement, when available.
    pub suggestion: Option<String>,
    /// Byte offset where the span starts.
    pub start: usize,
    /// Byte offset one past the span's end.
    pub end: usize,
    /// The sentence the span occurs in.
    pub context: String,
    /// Estimated 1-based page (character-count heuristic).
    pub page: u32,
    /// 1-based paragraph number (blank-line separated).
    pub paragraph: usize,
    /// Document section the span falls under, when one can be named.
    pub section: Option<String>,
}

/// External collaborator that detects issues in extracted text.
pub trait TextIssueProvider {
    /// Detect issues in `text`. Spans are byte ranges into `text`.
    fn provide(&self, text: &str) -> Result<Vec<RawTextIssue>>;
}

lazy_static! {
    static ref SECTION_HEADER: Regex = Regex::new(
        r"(?i)\b(Abstract|Introduction|Background|Objectives|Methods|Methodology|Materials|Results|Findings|Analysis|Discussion|Conclusion|Recommendations|Summary|References|Appendix)\b"
    )
    .expect("section header pattern");
    static ref DOUBLE_SPACE: Regex = Regex::new(r" {2,}").expect("double space pattern");
    static ref LOWERCASE_SENTENCE: Regex =
        Regex::new(r"(?:^|[.!?]\s+)([a-z])").expect("lowercase sentence pattern");
}

/// How far back to scan for a section header, in bytes.
const SECTION_LOOKBEHIND: usize = 500;

/// Annotate raw provider spans with sentence context, page and paragraph
/// estimates, and section attribution, sorted by span start.
///
/// Spans that fall outside `text` are dropped (a provider bug must not
/// panic the report).
pub fn annotate(text: &str, raw: Vec<RawTextIssue>, page_count: usize) -> Vec<TextIssue> {
    let paragraph_starts = paragraph_starts(text);
    let mut issues: Vec<TextIssue> = raw
        .into_iter()
        .filter(|issue| {
            let ok = issue.start <= issue.end && issue.end <= text.len();
            if !ok {
                log::warn!(
                    "dropping out-of-range text issue span {}..{} (text length {})",
                    issue.start,
                    issue.end,
                    text.len()
                );
            }
            ok
        })
        .map(|issue| {
            let context = sentence_at(text, issue.start);
            let page = page_estimate(text, issue.start, page_count);
            let paragraph = paragraph_at(&paragraph_starts, issue.start);
            let section = section_at(text, issue.start);
            TextIssue {
                kind: issue.kind,
                message: issue.message,
                suggestion: issue.suggestion,
                start: issue.start,
                end: issue.end,
                context,
                page,
                paragraph,
                section,
            }
        })
        .collect();
    issues.sort_by_key(|issue| issue.start);
    issues
}

/// Run a set of providers and merge their annotated output.
///
/// A failing provider is logged and contributes nothing; the merged list
/// stays sorted by span start.
pub fn analyze_text(
    text: &str,
    providers: &[&dyn TextIssueProvider],
    page_count: usize,
) -> Vec<TextIssue> {
    let mut raw = Vec::new();
    for provider in providers {
        match provider.provide(text) {
            Ok(found) => raw.extend(found),
            Err(err) => log::warn!("text issue provider failed, skipping: {}", err),
        }
    }
    annotate(text, raw, page_count)
}

/// The sentence containing byte offset `pos`.
fn sentence_at(text: &str, pos: usize) -> String {
    let bytes = text.as_bytes();
    let pos = pos.min(text.len());
    let is_terminator = |b: u8| b == b'.' || b == b'!' || b == b'?' || b == b'\n';

    let start = bytes[..pos]
        .iter()
        .rposition(|&b| is_terminator(b))
        .map(|i| i + 1)
        .unwrap_or(0);
    let end = bytes[pos..]
        .iter()
        .position(|&b| is_terminator(b))
        .map(|i| (pos + i + 1).min(text.len()))
        .unwrap_or(text.len());

    // Clamp to char boundaries in case a terminator byte sits inside a
    // multibyte sequence's neighborhood.
    let start = ceil_char_boundary(text, start);
    let end = floor_char_boundary(text, end);
    text[start..end].trim().to_string()
}

fn ceil_char_boundary(text: &str, mut i: usize) -> usize {
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn floor_char_boundary(text: &str, mut i: usize) -> usize {
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Estimate the 1-based page for a byte offset, assuming evenly sized
/// pages. The layout adapter knows real page breaks; plain text does not,
/// so this stays a documented approximation.
fn page_estimate(text: &str, pos: usize, page_count: usize) -> u32 {
    if text.is_empty() || page_count == 0 {
        return 1;
    }
    let chars_per_page = text.len().div_ceil(page_count);
    let page = (pos / chars_per_page.max(1)) + 1;
    page.min(page_count) as u32
}

/// Byte offsets where paragraphs (blank-line separated) begin.
fn paragraph_starts(text: &str) -> Vec<usize> {
    lazy_static! {
        static ref PARAGRAPH_BREAK: Regex =
            Regex::new(r"\n\s*\n").expect("paragraph break pattern");
    }
    let mut starts = vec![0];
    for m in PARAGRAPH_BREAK.find_iter(text) {
        starts.push(m.end());
    }
    starts
}

fn paragraph_at(starts: &[usize], pos: usize) -> usize {
    match starts.binary_search(&pos) {
        Ok(i) => i + 1,
        Err(i) => i,
    }
}

/// Name the section a byte offset falls under by scanning the preceding
/// text for the last recognizable section header.
fn section_at(text: &str, pos: usize) -> Option<String> {
    let pos = pos.min(text.len());
    let from = ceil_char_boundary(text, pos.saturating_sub(SECTION_LOOKBEHIND));
    let window = &text[from..pos];
    SECTION_HEADER
        .find_iter(window)
        .last()
        .map(|m| capitalize(m.as_str()))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Built-in provider for mechanical style rules: formatting of common
/// scientific terms, doubled spaces, and sentences starting lowercase.
///
/// These rules were core logic in the surrounding application and need no
/// external service, so they ship in-crate. Dictionary spell checking and
/// LLM-backed grammar analysis stay behind [`TextIssueProvider`].
#[derive(Debug, Default)]
pub struct StyleRuleProvider;

struct StyleRule {
    canonical: &'static str,
    pattern: &'static str,
}

const STYLE_RULES: &[StyleRule] = &[
    StyleRule {
        canonical: "IC50",
        pattern: r"IC\s+50|ic\s*50|Ic\s*50",
    },
    StyleRule {
        canonical: "p-value",
        pattern: r"p\s+value|P\s*[- ]?value|p\s*Value",
    },
    StyleRule {
        canonical: "et al.",
        pattern: r"\bet\s+al(?:[^.\w]|$)",
    },
    StyleRule {
        canonical: "in vitro",
        pattern: r"in-vitro|invitro|InVitro",
    },
    StyleRule {
        canonical: "in vivo",
        pattern: r"in-vivo|invivo|InVivo",
    },
];

lazy_static! {
    static ref STYLE_PATTERNS: Vec<(usize, Regex)> = STYLE_RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| (i, Regex::new(rule.pattern).expect("style rule pattern")))
        .collect();
}

impl TextIssueProvider for StyleRuleProvider {
    fn provide(&self, text: &str) -> Result<Vec<RawTextIssue>> {
        let mut issues = Vec::new();

        for (i, pattern) in STYLE_PATTERNS.iter() {
            let rule = &STYLE_RULES[*i];
            for m in pattern.find_iter(text) {
                let found = m
                    .as_str()
                    .trim_end_matches(|c: char| !c.is_alphanumeric());
                if found == rule.canonical {
                    continue;
                }
                issues.push(RawTextIssue {
                    kind: TextIssueKind::Style,
                    message: format!(
                        "Incorrect formatting of \"{}\": found \"{}\"",
                        rule.canonical, found
                    ),
                    suggestion: Some(rule.canonical.to_string()),
                    start: m.start(),
                    end: m.start() + found.len(),
                });
            }
        }

        for m in DOUBLE_SPACE.find_iter(text) {
            issues.push(RawTextIssue {
                kind: TextIssueKind::Grammar,
                message: "Doubled spaces".to_string(),
                suggestion: Some(" ".to_string()),
                start: m.start(),
                end: m.end(),
            });
        }

        for caps in LOWERCASE_SENTENCE.captures_iter(text) {
            let letter = match caps.get(1) {
                Some(letter) => letter,
                None => continue,
            };
            issues.push(RawTextIssue {
                kind: TextIssueKind::Grammar,
                message: "Sentence should start with a capital letter".to_string(),
                suggestion: Some(letter.as_str().to_uppercase()),
                start: letter.start(),
                end: letter.end(),
            });
        }

        Ok(issues)
    }
}
