use seasonfix_scanner::{MediaKind, is_target_file};

#[test]
fn recognizes_videos_subtitles_and_sidecars() {
    for name in [
        "a.mkv", "b.MP4", "c.avi", "d.mov", "e.flv", "f.wmv", "g.M4V", "h.webm", "i.srt", "j.ASS",
        "k.ssa", "l.vtt", "m.sub", "n.nfo",
    ] {
        assert!(is_target_file(name), "should detect {name}");
    }
}

#[test]
fn rejects_other_files() {
    for name in [
        "notes.txt",
        "poster.jpg",
        "seasonfix.toml",
        "archive.zip",
        "movie.ts",
        "subs.idx",
        "mkv",
    ] {
        assert!(!is_target_file(name), "should NOT detect {name}");
    }
}

#[test]
fn classifies_by_kind() {
    assert_eq!(MediaKind::from_file_name("Show S01E01.mkv"), Some(MediaKind::Video));
    assert_eq!(MediaKind::from_file_name("Show S01E01.zh.ass"), Some(MediaKind::Subtitle));
    assert_eq!(MediaKind::from_file_name("Show S01E01.nfo"), Some(MediaKind::Sidecar));
}
