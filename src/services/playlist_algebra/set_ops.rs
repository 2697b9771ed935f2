use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ports::playlist_provider::{PlaylistSnapshot, Track};

/// Set operation applied to two playlists, keyed on track id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SetOperation {
    Intersection,
    Union,
    Complement,
}

impl SetOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetOperation::Intersection => "intersection",
            SetOperation::Union => "union",
            SetOperation::Complement => "complement",
        }
    }

    pub fn apply(&self, first: &PlaylistSnapshot, second: &PlaylistSnapshot) -> Vec<Track> {
        match self {
            SetOperation::Intersection => intersection(first, second),
            SetOperation::Union => union(first, second),
            SetOperation::Complement => complement(first, second),
        }
    }
}

impl fmt::Display for SetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation `{0}`, expected intersection, union or complement")]
pub struct UnknownOperation(pub String);

impl FromStr for SetOperation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "intersection" | "intersect" => Ok(SetOperation::Intersection),
            "union" => Ok(SetOperation::Union),
            "complement" => Ok(SetOperation::Complement),
            _ => Err(UnknownOperation(s.to_string())),
        }
    }
}

fn track_ids(snapshot: &PlaylistSnapshot) -> HashSet<&str> {
    snapshot.items.iter().map(|track| track.id.as_str()).collect()
}

/// Tracks of `first` whose id also appears in `second`, in `first` order.
///
/// A track of `first` is kept once no matter how often `second` repeats its
/// id; repeats within `first` are all kept.
pub fn intersection(first: &PlaylistSnapshot, second: &PlaylistSnapshot) -> Vec<Track> {
    let in_second = track_ids(second);

    first
        .items
        .iter()
        .filter(|track| in_second.contains(track.id.as_str()))
        .cloned()
        .collect()
}

/// Every track of `first` followed by every track of `second`.
///
/// No deduplication happens: an id present in both playlists shows up twice.
pub fn union(first: &PlaylistSnapshot, second: &PlaylistSnapshot) -> Vec<Track> {
    first.items.iter().chain(&second.items).cloned().collect()
}

/// Tracks of `second` whose id does not appear in `first` (B minus A).
pub fn complement(first: &PlaylistSnapshot, second: &PlaylistSnapshot) -> Vec<Track> {
    let in_first = track_ids(first);

    second
        .items
        .iter()
        .filter(|track| !in_first.contains(track.id.as_str()))
        .cloned()
        .collect()
}
