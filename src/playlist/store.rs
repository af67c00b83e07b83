use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::model::{Playlist, Track};

#[derive(thiserror::Error, Debug)]
pub enum PlaylistError {
    /// Reading or writing the playlist file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The playlist file exists but is not a JSON array of strings.
    #[error("{}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode playlist: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A path `add` refused, with the reason.
#[derive(Debug)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of `PlaylistStore::add`.
#[derive(Debug, Default)]
pub struct AddReport {
    pub added: usize,
    pub skipped: Vec<SkippedPath>,
}

/// Outcome of `PlaylistStore::load_from`.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// Entries of the file that no longer exist on disk.
    pub missing: Vec<PathBuf>,
}

/// The playlist together with the file it is persisted to.
pub struct PlaylistStore {
    playlist: Playlist,
    file: PathBuf,
}

impl PlaylistStore {
    /// Create an empty store persisting to `file`. Nothing is read yet.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            playlist: Playlist::new(),
            file: file.into(),
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn set_current(&mut self, index: usize) -> bool {
        self.playlist.set_current(index)
    }

    /// Append every existing, readable file in `paths`, then save.
    ///
    /// Rejected entries end up in the report; they never abort the call.
    /// Paths that are not valid UTF-8 are rejected since the JSON file
    /// cannot hold them.
    /// On a save error the in-memory playlist keeps the new tracks.
    pub fn add<I, P>(&mut self, paths: I) -> (AddReport, Result<(), PlaylistError>)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = AddReport::default();

        for p in paths {
            let p = p.as_ref();
            let abs = std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
            match check_readable(&abs) {
                Ok(()) => {
                    self.playlist.push(Track::from_path(abs));
                    report.added += 1;
                }
                Err(reason) => {
                    warn!(path = %p.display(), %reason, "skipping unreadable file");
                    report.skipped.push(SkippedPath {
                        path: p.to_path_buf(),
                        reason,
                    });
                }
            }
        }

        let saved = self.save();
        (report, saved)
    }

    /// Remove every track and save the now empty list.
    pub fn clear(&mut self) -> Result<(), PlaylistError> {
        self.playlist.clear();
        self.save()
    }

    pub fn save(&self) -> Result<(), PlaylistError> {
        self.save_to(&self.file)
    }

    /// Write the ordered track paths to `path` as a JSON array, overwriting it.
    pub fn save_to(&self, path: &Path) -> Result<(), PlaylistError> {
        let paths: Vec<&Path> = self.playlist.tracks().iter().map(|t| t.path.as_path()).collect();
        let json = serde_json::to_string(&paths)?;
        fs::write(path, json).map_err(|source| PlaylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), tracks = paths.len(), "playlist saved");
        Ok(())
    }

    pub fn load(&mut self) -> Result<LoadReport, PlaylistError> {
        let file = self.file.clone();
        self.load_from(&file)
    }

    /// Append the tracks listed in `path`. Relative entries resolve against
    /// the working directory and are stored in absolute form.
    ///
    /// A missing file is not an error. A malformed file inserts nothing.
    pub fn load_from(&mut self, path: &Path) -> Result<LoadReport, PlaylistError> {
        let mut report = LoadReport::default();
        if !path.exists() {
            return Ok(report);
        }

        let text = fs::read_to_string(path).map_err(|source| PlaylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<String> =
            serde_json::from_str(&text).map_err(|source| PlaylistError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        for entry in entries {
            let p = PathBuf::from(entry);
            let p = std::path::absolute(&p).unwrap_or(p);
            if p.exists() {
                self.playlist.push(Track::from_path(p));
                report.loaded += 1;
            } else {
                report.missing.push(p);
            }
        }

        if !self.playlist.is_empty() {
            self.playlist.set_current(0);
        }
        Ok(report)
    }
}

fn check_readable(path: &Path) -> Result<(), String> {
    if path.to_str().is_none() {
        return Err("path is not valid UTF-8".to_string());
    }
    let meta = fs::metadata(path).map_err(|e| e.to_string())?;
    if !meta.is_file() {
        return Err("not a regular file".to_string());
    }
    File::open(path).map(|_| ()).map_err(|e| e.to_string())
}
