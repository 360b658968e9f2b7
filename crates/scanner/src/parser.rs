use regex::Regex;
use seasonfix_core::MediaKind;
use std::sync::LazyLock;

// "Season 01", "season1", "Season  2 (2019)"
static RE_SEASON_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)season\s*([0-9]{1,2})").unwrap());

// SxxEyy pattern: S01E02, s1e3, etc.
static RE_SXXEXX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)S[0-9]+E([0-9]{1,3})").unwrap());

// E02, EP02, Episode 02, 第02
static RE_EPISODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:E|EP|Episode|第)\s*?([0-9]{1,3})").unwrap());

// [07] or [07v2]
static RE_BRACKET_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[([0-9]{1,3})(?:v[0-9]+)?\]").unwrap());

// " 07 "
static RE_SPACED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s([0-9]{1,3})\s").unwrap());

static RE_SHORT_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{1,3}").unwrap());

/// Parse a season number from a directory name like `Season 01` or `season1`.
pub fn parse_season_dir(dirname: &str) -> Option<u32> {
    RE_SEASON_DIR
        .captures(dirname)
        .and_then(|c| c[1].parse().ok())
}

/// Strip any leading path and a recognized media extension, leaving the part
/// of the name that episode matchers look at.
pub fn episode_subject(name: &str) -> &str {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && MediaKind::from_extension(ext).is_some() => stem,
        _ => base,
    }
}

/// Extension of a file name including its dot, or an empty string.
pub fn file_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if pos > 0 => &name[pos..],
        _ => "",
    }
}

/// Built-in episode heuristics, tried in order, first match wins.
pub fn parse_episode(name: &str) -> Option<u32> {
    let subject = episode_subject(name);

    for re in [
        &*RE_SXXEXX,
        &*RE_EPISODE_TOKEN,
        &*RE_BRACKET_NUMBER,
        &*RE_SPACED_NUMBER,
    ] {
        if let Some(caps) = re.captures(subject) {
            return caps[1].parse().ok();
        }
    }

    // Fallback: last short number anywhere in the name
    RE_SHORT_NUMBER
        .find_iter(subject)
        .last()
        .and_then(|m| m.as_str().parse().ok())
}

/// Canonical output name: `<series> SxxEyy<ext>`.
pub fn target_name(series: &str, season: u32, episode: u32, ext: &str) -> String {
    format!("{series} S{season:02}E{episode:02}{ext}")
}

/// Episode number of a name that is already canonical for this series and season.
pub fn canonical_episode(series: &str, season: u32, name: &str) -> Option<u32> {
    let prefix = format!("{series} S{season:02}E");
    let rest = name.strip_prefix(&prefix)?;
    let digits = rest.strip_suffix(file_extension(rest)).unwrap_or(rest);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let episode: u32 = digits.parse().ok()?;
    (format!("{episode:02}") == digits).then_some(episode)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_dir_names() {
        assert_eq!(parse_season_dir("Season 01"), Some(1));
        assert_eq!(parse_season_dir("season1"), Some(1));
        assert_eq!(parse_season_dir("SEASON   12"), Some(12));
        assert_eq!(parse_season_dir("Show Season 2 (2019)"), Some(2));
        assert_eq!(parse_season_dir("Specials"), None);
        assert_eq!(parse_season_dir("Extras"), None);
    }

    #[test]
    fn parse_sxxexx() {
        assert_eq!(parse_episode("Breaking.Bad.S02E05.Episode.Title.mkv"), Some(5));
        assert_eq!(parse_episode("the.office.s01e11.pilot.mp4"), Some(11));
        assert_eq!(parse_episode("Show S1E123.mkv"), Some(123));
    }

    #[test]
    fn parse_episode_tokens() {
        assert_eq!(parse_episode("Show EP07 1080p.mkv"), Some(7));
        assert_eq!(parse_episode("Show Episode 12.mkv"), Some(12));
        assert_eq!(parse_episode("Show E 3.srt"), Some(3));
        assert_eq!(parse_episode("某动画 第07话.mkv"), Some(7));
    }

    #[test]
    fn parse_bracket_ignores_version() {
        assert_eq!(parse_episode("[Group] Title [07v2][1080p].mkv"), Some(7));
        assert_eq!(parse_episode("[Group] Title [11].ass"), Some(11));
    }

    #[test]
    fn parse_spaced_number() {
        assert_eq!(parse_episode("[Group] Title - 03 [1080p].mkv"), Some(3));
    }

    #[test]
    fn parse_last_number_fallback() {
        assert_eq!(parse_episode("Title_08_BD.mkv"), Some(8));
        assert_eq!(parse_episode("Title.x264-04.mkv"), Some(4));
    }

    #[test]
    fn extension_digits_are_not_episodes() {
        assert_eq!(parse_episode("Title.mp4"), None);
        assert_eq!(parse_episode("no number here.mkv"), None);
    }

    #[test]
    fn subject_strips_path_and_known_extension() {
        assert_eq!(episode_subject("a/b/Show 01.mkv"), "Show 01");
        assert_eq!(episode_subject("Show 01.MP4"), "Show 01");
        assert_eq!(episode_subject("Show 01.part"), "Show 01.part");
        assert_eq!(episode_subject(".mkv"), ".mkv");
    }

    #[test]
    fn build_target_name() {
        assert_eq!(target_name("My Show", 1, 3, ".mkv"), "My Show S01E03.mkv");
        assert_eq!(target_name("My Show", 12, 104, ".ass"), "My Show S12E104.ass");
        assert_eq!(target_name("My Show", 2, 5, ""), "My Show S02E05");
    }

    #[test]
    fn canonical_names() {
        assert_eq!(canonical_episode("My Show", 1, "My Show S01E03.mkv"), Some(3));
        assert_eq!(canonical_episode("My Show", 1, "My Show S01E103.srt"), Some(103));
        assert_eq!(canonical_episode("My Show", 2, "My Show S01E03.mkv"), None);
        assert_eq!(canonical_episode("My Show", 1, "My Show S01E3.mkv"), None);
        assert_eq!(canonical_episode("Other", 1, "My Show S01E03.mkv"), None);
        assert_eq!(canonical_episode("My Show", 1, "My Show S01E03 v2.mkv"), None);
    }
}
