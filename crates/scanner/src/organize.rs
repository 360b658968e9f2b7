//! Series/season walk that renames episodes to `<Series> SxxEyy<ext>`.
//!
//! Layout: `<root>/<series>/<season folder>/<file>`. A series with loose files
//! and no season folder is first normalized into `Season 01`.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use seasonfix_core::{ConfigError, MediaKind, OnMiss, is_target_file};
use serde::{Serialize, Serializer};
use tracing::{debug, error, info, warn};

use crate::config::{self, CONFIG_FILE_NAME};
use crate::extractor::Extractor;
use crate::fs::{FileSystem, LocalFs};
use crate::parser;

/// Folder created when a series has no season folders.
pub const DEFAULT_SEASON_DIR: &str = "Season 01";

/// One thing the organizer did (or would do, in a dry run).
/// Paths are relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    CreateDir {
        #[serde(serialize_with = "lossy_path")]
        path: PathBuf,
    },
    CreateDirFailed {
        #[serde(serialize_with = "lossy_path")]
        path: PathBuf,
        error: String,
    },
    Move {
        #[serde(serialize_with = "lossy_path")]
        from: PathBuf,
        #[serde(serialize_with = "lossy_path")]
        to: PathBuf,
    },
    MoveFailed {
        #[serde(serialize_with = "lossy_path")]
        from: PathBuf,
        error: String,
    },
    Rename {
        #[serde(serialize_with = "lossy_path")]
        from: PathBuf,
        #[serde(serialize_with = "lossy_path")]
        to: PathBuf,
    },
    RenameFailed {
        #[serde(serialize_with = "lossy_path")]
        from: PathBuf,
        error: String,
    },
    AlreadyNamed {
        #[serde(serialize_with = "lossy_path")]
        path: PathBuf,
    },
    Exists {
        #[serde(serialize_with = "lossy_path")]
        from: PathBuf,
        #[serde(serialize_with = "lossy_path")]
        to: PathBuf,
    },
    Unresolved {
        #[serde(serialize_with = "lossy_path")]
        path: PathBuf,
    },
}

// serde rejects non-UTF-8 paths; undecodable bytes become U+FFFD.
fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizeReport {
    pub dry_run: bool,
    /// Files renamed, or that would be renamed in a dry run.
    pub renamed: usize,
    /// Eligible files looked at.
    pub scanned: usize,
    pub actions: Vec<Action>,
}

impl OrganizeReport {
    pub fn unresolved(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().filter_map(|a| match a {
            Action::Unresolved { path } => Some(path.as_path()),
            _ => None,
        })
    }

    pub fn collisions(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Exists { .. }))
            .count()
    }
}

#[derive(Debug)]
pub struct SeriesConfigError {
    pub series: String,
    pub error: ConfigError,
}

/// Everything that made a run fail, collected over all series.
#[derive(Debug)]
pub struct RunFailure {
    pub config_errors: Vec<SeriesConfigError>,
    /// Unresolved files from series with `on_miss = "error"`, sorted.
    pub unresolved: Vec<PathBuf>,
    pub report: OrganizeReport,
}

#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "{} series with invalid configuration, {} unresolved file(s)",
        .0.config_errors.len(),
        .0.unresolved.len()
    )]
    Incomplete(Box<RunFailure>),
}

/// A season folder to process. `source` is where its files are listed from;
/// it differs from `dir` only for a dry-run normalization.
#[derive(Debug)]
struct SeasonFolder {
    number: u32,
    dir: PathBuf,
    source: PathBuf,
}

#[derive(Debug, Default)]
struct RunState {
    report: OrganizeReport,
    config_errors: Vec<SeriesConfigError>,
    unresolved: Vec<PathBuf>,
}

impl RunState {
    fn record_miss(&mut self, path: PathBuf, on_miss: OnMiss) {
        match on_miss {
            OnMiss::Error => {
                warn!(path = %path.display(), "no episode number found");
                self.unresolved.push(path.clone());
            }
            OnMiss::Skip => info!(path = %path.display(), "skipping (no episode found)"),
        }
        self.report.actions.push(Action::Unresolved { path });
    }

    fn finish(mut self) -> Result<OrganizeReport, OrganizeError> {
        if self.config_errors.is_empty() && self.unresolved.is_empty() {
            return Ok(self.report);
        }
        self.unresolved.sort();
        Err(OrganizeError::Incomplete(Box::new(RunFailure {
            config_errors: self.config_errors,
            unresolved: self.unresolved,
            report: self.report,
        })))
    }
}

/// Renames episode files under a root of series folders.
#[derive(Debug)]
pub struct Organizer<F = LocalFs> {
    fs: F,
    root: PathBuf,
    dry_run: bool,
}

impl Organizer<LocalFs> {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self::with_fs(LocalFs, root, dry_run)
    }
}

impl<F: FileSystem> Organizer<F> {
    pub fn with_fs(fs: F, root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            fs,
            root: root.into(),
            dry_run,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk every series and season folder and rename episodes in place.
    pub fn organize(&self) -> Result<OrganizeReport, OrganizeError> {
        if !self.fs.is_dir(&self.root) {
            warn!(path = %self.root.display(), "not a directory");
            return Err(OrganizeError::NotADirectory(self.root.clone()));
        }

        let series_names = self
            .fs
            .list_dir(&self.root)
            .map_err(|source| OrganizeError::ReadRoot {
                path: self.root.clone(),
                source,
            })?;

        let mut run = RunState::default();
        run.report.dry_run = self.dry_run;

        for series_name in series_names {
            let series_path = self.root.join(&series_name);
            if !self.fs.is_dir(&series_path) {
                continue;
            }
            // The series name is written into every target name.
            let Some(series_name) = series_name.to_str() else {
                warn!(path = %series_path.display(), "series folder name is not valid UTF-8, skipping");
                continue;
            };
            self.organize_series(series_name, &series_path, &mut run);
        }

        info!(
            renamed = run.report.renamed,
            scanned = run.report.scanned,
            dry_run = self.dry_run,
            "organize finished"
        );
        run.finish()
    }

    fn organize_series(&self, series_name: &str, series_path: &Path, run: &mut RunState) {
        let (extractor, on_miss) = match self.resolve_extractor(series_path) {
            Ok(resolved) => resolved,
            Err(error) => {
                error!(series = %series_name, error = %error, "invalid series configuration, skipping");
                run.config_errors.push(SeriesConfigError {
                    series: series_name.to_string(),
                    error,
                });
                return;
            }
        };
        debug!(
            series = %series_name,
            mode = ?extractor.mode(),
            sample = ?extractor.sample(),
            on_miss = %on_miss,
            "organizing series"
        );

        let entries = match self.fs.list_dir(series_path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %series_path.display(), error = %e, "cannot read directory");
                return;
            }
        };

        let mut seasons = self.season_folders(series_path, &entries);
        if seasons.is_empty() && self.has_loose_files(series_path, &entries) {
            seasons = self.normalize_seasons(series_path, &entries, &mut run.report);
        }

        for season in &seasons {
            self.organize_season(series_name, season, &extractor, on_miss, run);
        }
    }

    /// Configured extractor for a series, or the heuristics when it has no config.
    fn resolve_extractor(&self, series_path: &Path) -> Result<(Extractor, OnMiss), ConfigError> {
        match config::load_series_config(&self.fs, series_path)? {
            Some(cfg) => Ok((Extractor::from_config(&cfg)?, cfg.on_miss)),
            None => Ok((Extractor::Heuristic, OnMiss::Skip)),
        }
    }

    fn season_folders(&self, series_path: &Path, entries: &[OsString]) -> Vec<SeasonFolder> {
        let mut seasons = Vec::new();
        for name in entries {
            let path = series_path.join(name);
            if !self.fs.is_dir(&path) {
                continue;
            }
            match name.to_str().and_then(parser::parse_season_dir) {
                Some(number) => seasons.push(SeasonFolder {
                    number,
                    dir: path.clone(),
                    source: path,
                }),
                None => debug!(path = %self.relative(&path).display(), "skip non-season folder"),
            }
        }
        seasons
    }

    fn has_loose_files(&self, series_path: &Path, entries: &[OsString]) -> bool {
        entries
            .iter()
            .filter(|name| *name != CONFIG_FILE_NAME)
            .any(|name| self.fs.is_file(&series_path.join(name)))
    }

    /// Move every entry of a series folder into `Season 01`.
    fn normalize_seasons(
        &self,
        series_path: &Path,
        entries: &[OsString],
        report: &mut OrganizeReport,
    ) -> Vec<SeasonFolder> {
        let season_dir = series_path.join(DEFAULT_SEASON_DIR);
        let rel_season = self.relative(&season_dir);

        if self.dry_run {
            info!(path = %rel_season.display(), "would create directory");
        } else if let Err(e) = self.fs.create_dir_all(&season_dir) {
            error!(path = %rel_season.display(), error = %e, "failed to create season folder");
            report.actions.push(Action::CreateDirFailed {
                path: rel_season,
                error: e.to_string(),
            });
            return Vec::new();
        }
        report.actions.push(Action::CreateDir {
            path: rel_season,
        });

        for name in entries.iter().filter(|name| *name != CONFIG_FILE_NAME) {
            let from = series_path.join(name);
            let to = season_dir.join(name);
            let (rel_from, rel_to) = (self.relative(&from), self.relative(&to));

            if self.dry_run {
                info!(from = %rel_from.display(), to = %rel_to.display(), "would move");
            } else if let Err(e) = self.fs.rename(&from, &to) {
                error!(path = %rel_from.display(), error = %e, "failed to move into season folder");
                report.actions.push(Action::MoveFailed {
                    from: rel_from,
                    error: e.to_string(),
                });
                continue;
            } else {
                info!(from = %rel_from.display(), to = %rel_to.display(), "moved");
            }
            report.actions.push(Action::Move {
                from: rel_from,
                to: rel_to,
            });
        }

        if self.dry_run {
            // Nothing moved: list the loose files as if they were already inside.
            return vec![SeasonFolder {
                number: 1,
                dir: season_dir,
                source: series_path.to_path_buf(),
            }];
        }

        match self.fs.list_dir(series_path) {
            Ok(entries) => self.season_folders(series_path, &entries),
            Err(e) => {
                warn!(path = %series_path.display(), error = %e, "cannot read directory");
                Vec::new()
            }
        }
    }

    fn organize_season(
        &self,
        series_name: &str,
        season: &SeasonFolder,
        extractor: &Extractor,
        on_miss: OnMiss,
        run: &mut RunState,
    ) {
        let names = match self.fs.list_dir(&season.source) {
            Ok(names) => names,
            Err(e) => {
                warn!(path = %season.source.display(), error = %e, "cannot read directory");
                return;
            }
        };

        // Names present in the season folder as the walk progresses
        let mut occupied: HashSet<OsString> = names.iter().cloned().collect();

        for name in &names {
            let src = season.source.join(name);
            let Some(text) = name.to_str() else {
                // Counted and reported, but never renamed.
                if has_target_extension(name) && self.fs.is_file(&src) {
                    run.report.scanned += 1;
                    let rel_src = self.relative(&season.dir.join(name));
                    warn!(path = %rel_src.display(), "file name is not valid UTF-8");
                    run.record_miss(rel_src, on_miss);
                }
                continue;
            };
            if !is_target_file(text) || !self.fs.is_file(&src) {
                continue;
            }
            run.report.scanned += 1;

            let rel_src = self.relative(&season.dir.join(name));
            let episode = parser::canonical_episode(series_name, season.number, text)
                .or_else(|| extractor.extract(text));

            let Some(episode) = episode else {
                run.record_miss(rel_src, on_miss);
                continue;
            };

            let report = &mut run.report;
            let dst_name = parser::target_name(
                series_name,
                season.number,
                episode,
                parser::file_extension(text),
            );
            if dst_name == text {
                debug!(path = %rel_src.display(), "already correct");
                report.actions.push(Action::AlreadyNamed { path: rel_src });
                continue;
            }

            let dst = season.dir.join(&dst_name);
            let rel_dst = self.relative(&dst);
            let taken = occupied.contains(OsStr::new(&dst_name))
                || (!self.dry_run && self.fs.exists(&dst));
            if taken {
                info!(from = %rel_src.display(), to = %rel_dst.display(), "skipping (exists)");
                report.actions.push(Action::Exists {
                    from: rel_src,
                    to: rel_dst,
                });
                continue;
            }

            if self.dry_run {
                info!(from = %rel_src.display(), to = %rel_dst.display(), "would rename");
            } else if let Err(e) = self.fs.rename(&src, &dst) {
                error!(path = %rel_src.display(), error = %e, "failed to rename");
                report.actions.push(Action::RenameFailed {
                    from: rel_src,
                    error: e.to_string(),
                });
                continue;
            } else {
                info!(from = %rel_src.display(), to = %rel_dst.display(), "renamed");
            }

            occupied.remove(name);
            occupied.insert(dst_name.into());
            report.renamed += 1;
            report.actions.push(Action::Rename {
                from: rel_src,
                to: rel_dst,
            });
        }
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_path_buf()
    }
}

/// Extension check for names that are not valid UTF-8 as a whole.
fn has_target_extension(name: &OsStr) -> bool {
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .and_then(MediaKind::from_extension)
        .is_some()
}
