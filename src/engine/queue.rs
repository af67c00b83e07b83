//! Index arithmetic for moving through the playlist.
//!
//! Both manual next/prev (in the controller) and end-of-track auto-advance
//! (in the audio thread) go through these helpers so the boundary policy is
//! the same everywhere.

use super::types::LoopMode;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Index a manual next/prev lands on, or `None` for an empty playlist.
///
/// `LoopAll` wraps at both ends. `NoLoop` and `LoopOne` clamp, so stepping
/// past a boundary stays on the boundary track.
pub fn step(current: Option<usize>, len: usize, direction: Direction, mode: LoopMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(cur) = current else {
        return Some(0);
    };
    let cur = cur.min(len - 1);
    let wrap = mode == LoopMode::LoopAll;

    let next = match direction {
        Direction::Forward if cur + 1 < len => cur + 1,
        Direction::Forward if wrap => 0,
        Direction::Forward => cur,
        Direction::Backward if cur > 0 => cur - 1,
        Direction::Backward if wrap => len - 1,
        Direction::Backward => 0,
    };
    Some(next)
}

/// Index to continue with when the current track finishes, or `None` to stop.
pub fn auto_advance(current: Option<usize>, len: usize, mode: LoopMode) -> Option<usize> {
    let cur = current?;
    if cur >= len {
        return None;
    }
    match mode {
        LoopMode::LoopOne => Some(cur),
        LoopMode::LoopAll => Some((cur + 1) % len),
        LoopMode::NoLoop if cur + 1 < len => Some(cur + 1),
        LoopMode::NoLoop => None,
    }
}
