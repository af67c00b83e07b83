use super::*;
use crate::console::Console;
use crate::engine::fake::{Call, FakeEngine};
use crate::engine::{EngineEvent, LoopMode, PlaybackState};
use crate::playlist::PlaylistStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::{TempDir, tempdir};

fn touch(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, b"not real audio").unwrap();
    p
}

fn controller_with(n: usize, mode: LoopMode) -> (TempDir, Controller<FakeEngine>) {
    let dir = tempdir().unwrap();
    let store = PlaylistStore::new(dir.path().join("playlist.json"));
    let mut c = Controller::new(store, FakeEngine::default(), Console::new(100), mode);
    let paths: Vec<PathBuf> = (0..n).map(|i| touch(dir.path(), &format!("t{i}.mp3"))).collect();
    c.add_files(paths);
    (dir, c)
}

fn last_call(c: &Controller<FakeEngine>) -> Option<Call> {
    c.engine().calls.last().cloned()
}

#[test]
fn new_syncs_loop_mode_and_sources_into_engine() {
    let dir = tempdir().unwrap();
    let store = PlaylistStore::new(dir.path().join("p.json"));
    let c = Controller::new(store, FakeEngine::default(), Console::new(10), LoopMode::NoLoop);
    assert_eq!(
        c.engine().calls,
        vec![Call::SetLoopMode(LoopMode::NoLoop), Call::SetSources(0)]
    );
    assert_eq!(c.state(), PlaybackState::Stopped);
}

#[test]
fn add_files_on_empty_playlist_selects_first_and_persists() {
    let (dir, c) = controller_with(2, LoopMode::LoopAll);
    assert_eq!(c.playlist().len(), 2);
    assert_eq!(c.playlist().current(), Some(0));
    assert_eq!(last_call(&c), Some(Call::SetSources(2)));

    let saved: Vec<String> =
        serde_json::from_str(&fs::read_to_string(dir.path().join("playlist.json")).unwrap())
            .unwrap();
    assert_eq!(saved.len(), 2);
    let lines: Vec<&str> = c.console().lines().collect();
    assert_eq!(lines, vec!["> Playlist saved", "> Added 2 file(s)"]);
}

#[test]
fn add_files_with_empty_selection_does_nothing() {
    let (_dir, mut c) = controller_with(0, LoopMode::LoopAll);
    let calls_before = c.engine().calls.len();
    c.add_files(Vec::new());
    assert_eq!(c.engine().calls.len(), calls_before);
    assert_eq!(c.console().len(), 0);
}

#[test]
fn add_files_reports_skipped_entries() {
    let (dir, mut c) = controller_with(0, LoopMode::LoopAll);
    c.add_files(vec![touch(dir.path(), "ok.wav"), dir.path().join("ghost.mp3")]);
    assert_eq!(c.playlist().len(), 1);
    assert!(c.console().lines().any(|l| l.starts_with("> Skipped ghost.mp3")));
    assert_eq!(c.console().last(), Some("> Added 1 file(s)"));
}

#[test]
fn play_pause_cycles_through_states() {
    let (_dir, mut c) = controller_with(2, LoopMode::LoopAll);

    c.play_pause();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(last_call(&c), Some(Call::Play(0)));
    assert_eq!(c.play_button_label(), "[ || ]");

    c.play_pause();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(last_call(&c), Some(Call::Pause));
    assert_eq!(c.play_button_label(), "[ > ]");

    c.play_pause();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(last_call(&c), Some(Call::Resume));
}

#[test]
fn play_pause_on_empty_playlist_stays_stopped() {
    let (_dir, mut c) = controller_with(0, LoopMode::LoopAll);
    c.play_pause();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.console().last(), Some("> Playlist is empty"));
}

#[test]
fn stop_resets_position_and_state() {
    let (_dir, mut c) = controller_with(1, LoopMode::LoopAll);
    c.play_pause();
    c.handle_engine_event(EngineEvent::PositionChanged(Duration::from_secs(42)));
    c.handle_engine_event(EngineEvent::DurationChanged(Some(Duration::from_secs(100))));
    assert_eq!(c.time_label(), "> 0:42 / 1:40");

    c.stop();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.position(), Duration::ZERO);
    assert_eq!(last_call(&c), Some(Call::Stop));
    assert_eq!(c.time_label(), "> 0:00 / 1:40");
}

#[test]
fn next_when_stopped_starts_playback_at_new_index() {
    let (_dir, mut c) = controller_with(3, LoopMode::LoopAll);
    c.next();
    assert_eq!(c.playlist().current(), Some(1));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(last_call(&c), Some(Call::Play(1)));
    assert_eq!(c.console().last(), Some("> Next track"));
}

#[test]
fn next_and_previous_wrap_with_loop_all() {
    let (_dir, mut c) = controller_with(3, LoopMode::LoopAll);
    c.select_track(2);
    for expected in [0, 1, 2, 0] {
        c.next();
        assert_eq!(c.playlist().current(), Some(expected));
    }
    c.select_track(0);
    for expected in [2, 1, 0, 2] {
        c.previous();
        assert_eq!(c.playlist().current(), Some(expected));
    }
}

#[test]
fn next_and_previous_clamp_without_loop() {
    let (_dir, mut c) = controller_with(3, LoopMode::NoLoop);
    c.select_track(2);
    let plays_before = c.engine().calls.len();
    for _ in 0..3 {
        c.next();
        assert_eq!(c.playlist().current(), Some(2));
        assert_eq!(c.state(), PlaybackState::Playing);
    }
    // Already playing the last track: nothing is restarted.
    assert_eq!(c.engine().calls.len(), plays_before);

    c.select_track(0);
    c.stop();
    c.previous();
    assert_eq!(c.playlist().current(), Some(0));
    assert_eq!(last_call(&c), Some(Call::Play(0)));
    c.previous();
    assert_eq!(c.playlist().current(), Some(0));
}

#[test]
fn next_on_empty_playlist_is_a_logged_noop() {
    let (_dir, mut c) = controller_with(0, LoopMode::LoopAll);
    c.next();
    c.previous();
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.console().len(), 2);
}

#[test]
fn select_track_plays_and_rejects_out_of_range() {
    let (_dir, mut c) = controller_with(2, LoopMode::LoopAll);
    c.select_track(1);
    assert_eq!(c.playlist().current(), Some(1));
    assert_eq!(last_call(&c), Some(Call::Play(1)));

    let calls = c.engine().calls.len();
    c.select_track(5);
    assert_eq!(c.playlist().current(), Some(1));
    assert_eq!(c.engine().calls.len(), calls);
    assert_eq!(c.console().last(), Some("> No track at position 6"));
}

#[test]
fn seek_forwards_to_engine_without_validation() {
    let (_dir, mut c) = controller_with(1, LoopMode::LoopAll);
    c.play_pause();
    c.seek(90_000);
    assert_eq!(last_call(&c), Some(Call::Seek(Duration::from_secs(90))));
    assert_eq!(c.position(), Duration::from_secs(90));

    c.seek_by(-100_000);
    assert_eq!(last_call(&c), Some(Call::Seek(Duration::ZERO)));
}

#[test]
fn seek_while_stopped_is_ignored() {
    let (_dir, mut c) = controller_with(1, LoopMode::LoopAll);
    c.play_pause();
    c.stop();
    let calls = c.engine().calls.len();

    c.seek_by(5_000);
    c.seek_by(5_000);
    c.seek(30_000);

    assert_eq!(c.engine().calls.len(), calls);
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.position(), Duration::ZERO);
    assert_eq!(c.time_label(), "> 0:00 / 0:00");
    assert_eq!(c.progress(), 0.0);
}

#[test]
fn clear_always_ends_empty_and_stopped() {
    for prime in [0u8, 1, 2] {
        let (dir, mut c) = controller_with(3, LoopMode::LoopAll);
        match prime {
            1 => c.play_pause(),
            2 => {
                c.play_pause();
                c.play_pause();
            }
            _ => {}
        }
        c.clear();
        assert!(c.playlist().is_empty());
        assert_eq!(c.playlist().current(), None);
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.track_label(), "> SYSTEM READY");
        assert!(c.engine().calls.contains(&Call::Stop));
        assert_eq!(
            fs::read_to_string(dir.path().join("playlist.json")).unwrap(),
            "[]"
        );
        assert_eq!(c.console().last(), Some("> Playlist cleared"));
    }
}

#[test]
fn engine_events_update_labels_and_selection() {
    let (_dir, mut c) = controller_with(3, LoopMode::LoopAll);
    c.play_pause();
    c.engine_mut().pending = vec![
        EngineEvent::CurrentTrackChanged(Some(2)),
        EngineEvent::DurationChanged(Some(Duration::from_millis(61_000))),
        EngineEvent::PositionChanged(Duration::from_millis(30_500)),
    ];
    c.drain_engine_events();

    assert_eq!(c.playlist().current(), Some(2));
    assert_eq!(c.track_label(), "> NOW PLAYING: t2.mp3");
    assert_eq!(c.time_label(), "> 0:30 / 1:01");
    assert!((c.progress() - 0.5).abs() < 0.01);
    assert_eq!(c.console().last(), Some("> Now playing: t2.mp3"));
}

#[test]
fn engine_state_and_error_events_are_mirrored() {
    let (_dir, mut c) = controller_with(1, LoopMode::LoopAll);
    c.play_pause();
    c.handle_engine_event(EngineEvent::PositionChanged(Duration::from_secs(3)));
    c.handle_engine_event(EngineEvent::Error("failed to decode t0.mp3".into()));
    c.handle_engine_event(EngineEvent::StateChanged(PlaybackState::Stopped));

    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.position(), Duration::ZERO);
    assert!(c.console().lines().any(|l| l == "> failed to decode t0.mp3"));
}

#[test]
fn out_of_range_track_change_is_ignored() {
    let (_dir, mut c) = controller_with(1, LoopMode::LoopAll);
    c.handle_engine_event(EngineEvent::CurrentTrackChanged(Some(7)));
    assert_eq!(c.playlist().current(), Some(0));
    assert_eq!(c.track_label(), "> SYSTEM READY");
}

#[test]
fn load_playlist_reports_missing_files_and_count() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("playlist.json");
    let a = touch(dir.path(), "a.mp3");
    let entries = vec![a.display().to_string(), "/nowhere/gone.wav".to_string()];
    fs::write(&file, serde_json::to_string(&entries).unwrap()).unwrap();

    let mut c = Controller::new(
        PlaylistStore::new(&file),
        FakeEngine::default(),
        Console::new(10),
        LoopMode::LoopAll,
    );
    c.load_playlist();

    assert_eq!(c.playlist().len(), 1);
    let lines: Vec<&str> = c.console().lines().collect();
    assert_eq!(lines, vec!["> Missing files: gone.wav", "> Loaded 1 tracks"]);
    assert_eq!(last_call(&c), Some(Call::SetSources(1)));
}

#[test]
fn load_playlist_logs_malformed_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("playlist.json");
    fs::write(&file, "not json").unwrap();

    let mut c = Controller::new(
        PlaylistStore::new(&file),
        FakeEngine::default(),
        Console::new(10),
        LoopMode::LoopAll,
    );
    c.load_playlist();
    assert!(c.playlist().is_empty());
    assert!(c.console().last().unwrap().starts_with("> Playlist load error: "));
}

#[test]
fn cycle_loop_mode_cycles_three_states_and_informs_engine() {
    let (_dir, mut c) = controller_with(0, LoopMode::LoopAll);
    c.cycle_loop_mode();
    assert_eq!(c.loop_mode(), LoopMode::LoopOne);
    assert_eq!(last_call(&c), Some(Call::SetLoopMode(LoopMode::LoopOne)));
    c.cycle_loop_mode();
    assert_eq!(c.loop_mode(), LoopMode::NoLoop);
    c.cycle_loop_mode();
    assert_eq!(c.loop_mode(), LoopMode::LoopAll);
}

#[test]
fn shutdown_saves_and_releases_engine() {
    let (dir, mut c) = controller_with(2, LoopMode::LoopAll);
    fs::remove_file(dir.path().join("playlist.json")).unwrap();
    c.shutdown(Duration::ZERO);
    assert_eq!(last_call(&c), Some(Call::Shutdown));
    assert!(dir.path().join("playlist.json").exists());
}

#[test]
fn format_time_matches_minutes_and_padded_seconds() {
    assert_eq!(format_time(-5), "0:00");
    assert_eq!(format_time(0), "0:00");
    assert_eq!(format_time(59_999), "0:59");
    assert_eq!(format_time(61_000), "1:01");
    assert_eq!(format_time(3_600_000), "60:00");
}

#[test]
fn closed_engine_refuses_playback_commands() {
    let (_dir, mut c) = controller_with(2, LoopMode::LoopAll);
    c.engine_mut().pending = vec![
        EngineEvent::Error("no audio output device".into()),
        EngineEvent::Closed,
    ];
    c.drain_engine_events();
    assert!(!c.engine_available());
    let calls = c.engine().calls.len();

    c.play_pause();
    c.next();
    c.previous();
    c.select_track(1);

    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.play_button_label(), "[ > ]");
    assert_eq!(c.playlist().current(), Some(0));
    assert_eq!(c.engine().calls.len(), calls);
    assert_eq!(c.console().last(), Some("> No audio output"));
}

#[test]
fn closed_engine_drops_a_playing_controller_to_stopped() {
    let (_dir, mut c) = controller_with(1, LoopMode::LoopAll);
    c.play_pause();
    c.handle_engine_event(EngineEvent::CurrentTrackChanged(Some(0)));
    c.handle_engine_event(EngineEvent::Closed);
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.track_label(), "> SYSTEM READY");
}
