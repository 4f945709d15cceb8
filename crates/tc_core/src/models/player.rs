use serde::{Deserialize, Serialize};

use super::position::Position;

/// A player candidate for a generated squad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    /// Nation id, when the source file carries one
    pub nationality: Option<u32>,
    /// 0 = men's player
    pub gender: u8,
    pub position: Position,
    /// Alternative positions listed by club files (pos2/pos3)
    pub secondary_positions: Vec<Position>,
    /// Overall rating (OVR)
    pub overall: u8,
    /// Shirt number from the source file, if any
    pub jersey: Option<u8>,
}

impl Player {
    pub fn new(id: u32, position: Position, overall: u8) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            nationality: None,
            gender: 0,
            position,
            secondary_positions: Vec::new(),
            overall,
            jersey: None,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            format!("Player {}", self.id)
        } else {
            name.to_string()
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.position.is_goalkeeper()
    }
}
