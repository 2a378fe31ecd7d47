//! Host input as discrete commands, applied at the start of the next tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::components::{FishKind, Vec2};

/// One input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Pointer moved (or left the view when `at` is `None`)
    PointerMoved { at: Option<Vec2> },
    /// Raw click; routed to feed or disturb by where it lands
    Click { at: Vec2, secondary: bool },
    FeedAt { x: f32 },
    DisturbAt { at: Vec2 },
    ToggleFilter,
    ReduceAlgae,
    TogglePause,
    /// Add a fish; `size` of `None` picks the kind's default range
    Spawn { kind: FishKind, size: Option<f32> },
}

/// FIFO of commands waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending command in submission order
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = CommandQueue::new();
        queue.push(Command::ToggleFilter);
        queue.push(Command::FeedAt { x: 100.0 });
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![Command::ToggleFilter, Command::FeedAt { x: 100.0 }]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_command_json_shape() {
        let json = serde_json::to_string(&Command::Spawn {
            kind: FishKind::BottomFeeder,
            size: Some(15.0),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"spawn","kind":"bottom_feeder","size":15.0}"#);

        let parsed: Command = serde_json::from_str(r#"{"type":"reduce_algae"}"#).unwrap();
        assert_eq!(parsed, Command::ReduceAlgae);
    }
}
