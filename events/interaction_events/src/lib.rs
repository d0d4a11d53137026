//! Requests from the presentation layer into the level interaction engine, and
//! the engine's observational replies.
//!
//! Requests referring to entities or ids that no longer exist are dropped silently.

use bevy::prelude::*;

/// Player clicked a bit (level 1, bit collection).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitClicked {
    pub bit: Entity,
}

/// Asks for one extra bit outside the periodic tick. Still throttled.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SpawnBitRequest;

/// Player clicked a neural node (level 1, neural connections).
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct NodeClicked {
    pub node_id: String,
}

impl NodeClicked {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
        }
    }
}

/// A valid directed edge was stored on the source node.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionFormed {
    pub source: String,
    pub target: String,
}

/// Player highlighted an option of the current loop challenge. Reversible.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerSelected {
    pub option: usize,
}

/// Player locked in the highlighted option.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct AnswerSubmitted;

/// Result of a submission, fired immediately so the explanation can be shown.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRevealed {
    pub challenge_id: u32,
    pub correct: bool,
}

/// Player asked for the next loop challenge.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NextChallengeRequested;
