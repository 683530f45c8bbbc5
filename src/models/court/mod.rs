// Court module
// Club resources (courts and studios) that scope conflict detection

use serde::{Deserialize, Serialize};

/// The kind of playing surface or room a court represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtKind {
    Tennis,
    Padel,
    Squash,
    Studio,
}

impl CourtKind {
    pub fn label(&self) -> &'static str {
        match self {
            CourtKind::Tennis => "Tennis",
            CourtKind::Padel => "Padel",
            CourtKind::Squash => "Squash",
            CourtKind::Studio => "Studio",
        }
    }
}

/// A bookable club resource. Two classes conflict only when they share a court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub kind: CourtKind,
}

impl Court {
    pub fn new(id: i64, name: impl Into<String>, kind: CourtKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}
