use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;

/// Read the total duration from the file's headers, if lofty understands it.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "duration probe failed");
            None
        }
    }
}
