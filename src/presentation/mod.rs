//! Transition notifications for the rendering layer.
//!
//! The controller emits one event per move, before the current index changes.
//! Observers only learn that a transition happened; nothing flows back.

mod observer;

pub use observer::{ChannelObserver, NoopObserver, TransitionObserver};

use crate::graph::StepKindTag;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub direction: Direction,
    pub from_index: usize,
    pub to_index: usize,
    pub from_kind: StepKindTag,
    pub to_kind: StepKindTag,
    /// Both ends are visual option cards: sequence a fade/slide instead of a swap.
    pub animate: bool,
}

impl TransitionEvent {
    pub fn new(
        direction: Direction,
        (from_index, from_kind): (usize, StepKindTag),
        (to_index, to_kind): (usize, StepKindTag),
        animations_enabled: bool,
    ) -> Self {
        Self {
            direction,
            from_index,
            to_index,
            from_kind,
            to_kind,
            animate: animations_enabled && from_kind.is_visual_card() && to_kind.is_visual_card(),
        }
    }
}
