//! Playlist module: the ordered track list and its JSON sidecar file.
//!
//! `Playlist` is the in-memory model; `PlaylistStore` pairs it with the
//! file it is persisted to and saves after every mutation.

mod model;
mod store;

pub use model::*;
pub use store::*;
