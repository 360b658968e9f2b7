//! Configurable episode matchers.
//!
//! Each matcher is a pure function of the file name and its own parameters:
//!
//! - `A`: the n-th digit run in the name (`nth_number`)
//! - `B`: the first digit run inside the n-th delimited span (`nth_bracket`)
//! - `F`: a literal sample name with one `{07}` placeholder (`SampleMatcher`)
//!
//! Indexes are 1-based; `0` is treated as `1` and negative values count
//! from the end (`-1` is the last match).

use regex::Regex;
use seasonfix_core::ConfigError;
use std::sync::LazyLock;

use crate::parser::episode_subject;

static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)").unwrap());

// Digit run with an optional `v2` style version suffix swallowed after it
static RE_NUMBER_VERSIONED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)(?:v[0-9]+)?").unwrap());

static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[0-9]*\}").unwrap());

fn number_regex(ignore_version: bool) -> &'static Regex {
    if ignore_version {
        &*RE_NUMBER_VERSIONED
    } else {
        &*RE_NUMBER
    }
}

/// Resolve a 1-based, possibly negative index into a position in `len` items.
pub fn select_index(len: usize, index: i64) -> Option<usize> {
    let index = if index == 0 { 1 } else { index };
    let magnitude = usize::try_from(index.unsigned_abs()).ok()?;
    if magnitude > len {
        return None;
    }
    if index > 0 {
        Some(magnitude - 1)
    } else {
        Some(len - magnitude)
    }
}

/// Mode `A`: pick the `index`-th digit run.
pub fn nth_number(name: &str, index: i64, ignore_version: bool) -> Option<u32> {
    let subject = episode_subject(name);
    let runs: Vec<&str> = number_regex(ignore_version)
        .captures_iter(subject)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let pos = select_index(runs.len(), index)?;
    runs[pos].parse().ok()
}

/// Split `text` into non-overlapping spans delimited by literal `open`/`close` tokens.
pub fn bracket_spans<'a>(text: &'a str, open: &str, close: &str) -> Vec<&'a str> {
    let mut spans = Vec::new();
    if open.is_empty() || close.is_empty() {
        return spans;
    }

    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let inner = &rest[start + open.len()..];
        let Some(end) = inner.find(close) else {
            break;
        };
        spans.push(&inner[..end]);
        rest = &inner[end + close.len()..];
    }
    spans
}

/// Mode `B`: first digit run inside the `index`-th bracketed span.
pub fn nth_bracket(
    name: &str,
    open: &str,
    close: &str,
    index: i64,
    ignore_version: bool,
) -> Option<u32> {
    let spans = bracket_spans(episode_subject(name), open, close);
    let span = spans.get(select_index(spans.len(), index)?)?;

    number_regex(ignore_version)
        .captures(span)
        .and_then(|c| c[1].parse().ok())
}

/// Mode `F`: a compiled sample template.
///
/// `[{07}] Title` becomes the literal prefix `[`, a 1-3 digit episode,
/// and the literal suffix `] Title`, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct SampleMatcher {
    sample: String,
    pattern: Regex,
}

impl SampleMatcher {
    pub fn new(sample: &str, ignore_version: bool) -> Result<Self, ConfigError> {
        if sample.trim().is_empty() {
            return Err(ConfigError::EmptySample);
        }

        let template = episode_subject(sample);
        let placeholders: Vec<_> = RE_PLACEHOLDER.find_iter(template).collect();
        let placeholder = match placeholders.as_slice() {
            [] => return Err(ConfigError::MissingPlaceholder),
            [one] => *one,
            many => return Err(ConfigError::MultiplePlaceholders(many.len())),
        };

        let prefix = regex::escape(&template[..placeholder.start()]);
        let suffix = regex::escape(&template[placeholder.end()..]);
        let version = if ignore_version { "(?:v[0-9]+)?" } else { "" };
        let pattern = Regex::new(&format!("(?i){prefix}([0-9]{{1,3}}){version}{suffix}"))
            .map_err(|e| ConfigError::InvalidParameter {
                field: "sample",
                value: e.to_string(),
            })?;

        Ok(Self {
            sample: sample.to_string(),
            pattern,
        })
    }

    pub fn sample(&self) -> &str {
        &self.sample
    }

    pub fn matches(&self, name: &str) -> Option<u32> {
        self.pattern
            .captures(episode_subject(name))
            .and_then(|c| c[1].parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_normalization() {
        assert_eq!(select_index(3, 1), Some(0));
        assert_eq!(select_index(3, 0), Some(0));
        assert_eq!(select_index(3, 3), Some(2));
        assert_eq!(select_index(3, 4), None);
        assert_eq!(select_index(3, -1), Some(2));
        assert_eq!(select_index(3, -3), Some(0));
        assert_eq!(select_index(3, -4), None);
        assert_eq!(select_index(0, 1), None);
        assert_eq!(select_index(2, i64::MIN), None);
    }

    #[test]
    fn nth_number_ignores_version_suffix() {
        let name = "Show [05v2] 1080p.mkv";
        assert_eq!(nth_number(name, 1, true), Some(5));
        assert_eq!(nth_number(name, 2, true), Some(1080));
        assert_eq!(nth_number(name, 3, true), None);
        assert_eq!(nth_number(name, -1, true), Some(1080));
    }

    #[test]
    fn nth_number_counts_version_when_not_ignored() {
        let name = "Show [05v2] 1080p.mkv";
        assert_eq!(nth_number(name, 1, false), Some(5));
        assert_eq!(nth_number(name, 2, false), Some(2));
        assert_eq!(nth_number(name, 3, false), Some(1080));
    }

    #[test]
    fn nth_number_skips_extension_digits() {
        assert_eq!(nth_number("Show 07.mp4", -1, true), Some(7));
    }

    #[test]
    fn bracket_spans_literal_tokens() {
        assert_eq!(bracket_spans("[a][b] [c", "[", "]"), vec!["a", "b"]);
        assert_eq!(bracket_spans("<<x>> <<y>>", "<<", ">>"), vec!["x", "y"]);
        assert_eq!(bracket_spans("(.*)(+)", "(", ")"), vec![".*", "+"]);
        assert!(bracket_spans("no spans", "[", "]").is_empty());
        assert!(bracket_spans("[a]", "", "]").is_empty());
    }

    #[test]
    fn nth_bracket_picks_span() {
        assert_eq!(nth_bracket("[07v2] Title.mkv", "[", "]", 1, true), Some(7));
        assert_eq!(nth_bracket("[Group][Title][12][1080p].mkv", "[", "]", 3, true), Some(12));
        assert_eq!(nth_bracket("[Group][Title][12][1080p].mkv", "[", "]", -1, true), Some(1080));
        assert_eq!(nth_bracket("【字幕组】【标题】【09】.mp4", "【", "】", 3, true), Some(9));
    }

    #[test]
    fn nth_bracket_absent_cases() {
        assert_eq!(nth_bracket("[Group] Title.mkv", "[", "]", 1, true), None);
        assert_eq!(nth_bracket("[Group] Title.mkv", "[", "]", 2, true), None);
        assert_eq!(nth_bracket("Title 05.mkv", "[", "]", 1, true), None);
    }

    #[test]
    fn sample_matcher_extracts_episode() {
        let m = SampleMatcher::new("[{07}] Title", true).unwrap();
        assert_eq!(m.matches("[12] Title.mkv"), Some(12));
        assert_eq!(m.matches("[12v3] title.srt"), Some(12));
        assert_eq!(m.matches("Extra [03] Title [1080p].mkv"), Some(3));
        assert_eq!(m.matches("[12] Other.mkv"), None);
        assert_eq!(m.sample(), "[{07}] Title");
    }

    #[test]
    fn sample_matcher_escapes_literals() {
        let m = SampleMatcher::new("Show.(2020).E{}.mkv", false).unwrap();
        assert_eq!(m.matches("Show.(2020).E05.mkv"), Some(5));
        assert_eq!(m.matches("ShowX(2020)XE05.mkv"), None);
    }

    #[test]
    fn sample_matcher_rejects_bad_templates() {
        assert!(matches!(SampleMatcher::new("   ", true), Err(ConfigError::EmptySample)));
        assert!(matches!(
            SampleMatcher::new("[07] Title", true),
            Err(ConfigError::MissingPlaceholder)
        ));
        assert!(matches!(
            SampleMatcher::new("[{07}] Title {01}", true),
            Err(ConfigError::MultiplePlaceholders(2))
        ));
    }
}
