//! Drop history shown next to the seesaw
//!
//! Kept in memory only; a reload starts with an empty log.

use std::collections::VecDeque;
use std::fmt;

use crate::consts::{CENTER_THRESHOLD, HEAVY_WEIGHT};
use crate::to_fixed;

/// Maximum number of entries to keep
pub const MAX_LOG_ENTRIES: usize = 50;

/// Side of the plank as worded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Center,
    Right,
}

impl Side {
    /// Near-zero distances read as "center". Physics still puts them on the right.
    pub fn classify(distance: f64) -> Self {
        if distance.abs() < CENTER_THRESHOLD {
            Side::Center
        } else if distance < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Center => "center",
            Side::Right => "right",
        }
    }
}

/// A single drop
#[derive(Debug, Clone, PartialEq)]
pub struct DropLogEntry {
    pub weight: u8,
    pub distance: f64,
    pub side: Side,
}

impl DropLogEntry {
    pub fn new(weight: u8, distance: f64) -> Self {
        Self {
            weight,
            distance,
            side: Side::classify(distance),
        }
    }

    pub fn is_heavy(&self) -> bool {
        self.weight > HEAVY_WEIGHT
    }
}

impl fmt::Display for DropLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}kg dropped on {} side at {}px from center",
            self.weight,
            self.side.as_str(),
            to_fixed(self.distance.abs(), 0)
        )
    }
}

/// Drop history, newest first
#[derive(Debug, Clone, Default)]
pub struct DropLog {
    entries: VecDeque<DropLogEntry>,
}

impl DropLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a drop and return the entry
    pub fn record(&mut self, weight: u8, distance: f64) -> DropLogEntry {
        let entry = DropLogEntry::new(weight, distance);
        self.entries.push_front(entry.clone());
        self.entries.truncate(MAX_LOG_ENTRIES);
        entry
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &DropLogEntry> {
        self.entries.iter()
    }
}
