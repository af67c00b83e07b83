use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::PickerSettings;

fn is_audio_file(path: &Path, settings: &PickerSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the audio files under `root`, sorted case-insensitively by path.
pub fn scan_audio_files(root: &Path, settings: &PickerSettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, settings))
        .collect();

    files.sort_by_key(|p| p.to_string_lossy().to_lowercase());
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = PickerSettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn extensions_may_carry_a_leading_dot() {
        let settings = PickerSettings {
            extensions: vec![".FLAC".into()],
            ..PickerSettings::default()
        };
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
    }

    #[test]
    fn scan_filters_non_audio_and_sorts_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"x").unwrap();
        fs::write(dir.path().join("A.wav"), b"x").unwrap();
        fs::write(dir.path().join("c.txt"), b"x").unwrap();

        let files = scan_audio_files(dir.path(), &PickerSettings::default());
        assert_eq!(names(&files), vec!["A.wav", "b.MP3"]);
    }

    #[test]
    fn scan_skips_hidden_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"x").unwrap();
        let hidden_dir = dir.path().join(".cache");
        fs::create_dir_all(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inner.mp3"), b"x").unwrap();

        let files = scan_audio_files(dir.path(), &PickerSettings::default());
        assert_eq!(names(&files), vec!["visible.mp3"]);

        let settings = PickerSettings {
            include_hidden: true,
            ..PickerSettings::default()
        };
        assert_eq!(scan_audio_files(dir.path(), &settings).len(), 3);
    }

    #[test]
    fn scan_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"x").unwrap();

        let settings = PickerSettings {
            recursive: false,
            ..PickerSettings::default()
        };
        assert_eq!(names(&scan_audio_files(dir.path(), &settings)), vec!["root.mp3"]);
    }

    #[test]
    fn scan_respects_max_depth() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = d1.join("d2");
        fs::create_dir_all(&d2).unwrap();
        fs::write(dir.path().join("root.mp3"), b"x").unwrap();
        fs::write(d1.join("one.mp3"), b"x").unwrap();
        fs::write(d2.join("two.mp3"), b"x").unwrap();

        // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
        let settings = PickerSettings {
            max_depth: Some(2),
            ..PickerSettings::default()
        };
        let found = names(&scan_audio_files(dir.path(), &settings));
        assert!(found.contains(&"root.mp3".to_string()));
        assert!(found.contains(&"one.mp3".to_string()));
        assert!(!found.contains(&"two.mp3".to_string()));
    }
}
