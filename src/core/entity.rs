//! Identifier newtypes for match entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a card instance within one match
///
/// Allocated from a monotonic counter on the match state, so IDs stay
/// simple and contiguous for human readability. An ID is never reused for
/// the lifetime of a match, even after the instance is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(u32);

impl InstanceId {
    pub fn new(id: u32) -> Self {
        InstanceId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Seat index of a player (0 or 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(seat: u8) -> Self {
        PlayerId(seat)
    }

    /// Index into the match's player array
    pub fn idx(&self) -> usize {
        self.0 as usize
    }

    /// The other seat in a two-player match
    pub fn opponent(&self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    pub fn from_idx(idx: usize) -> Self {
        PlayerId(idx as u8)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0 + 1)
    }
}
