use serde::{Deserialize, Serialize};

/// Club or national side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamKind {
    Club,
    National { nation_id: u32 },
}

/// Identity of the team being generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSpec {
    pub id: u32,
    pub name: String,
    pub league_id: u32,
    pub kind: TeamKind,
    pub stadium_id: Option<u32>,
}

impl TeamSpec {
    pub fn club(id: u32, name: impl Into<String>, league_id: u32) -> Self {
        Self {
            id,
            name: name.into(),
            league_id,
            kind: TeamKind::Club,
            stadium_id: None,
        }
    }

    pub fn national(id: u32, name: impl Into<String>, league_id: u32, nation_id: u32) -> Self {
        Self {
            id,
            name: name.into(),
            league_id,
            kind: TeamKind::National { nation_id },
            stadium_id: None,
        }
    }

    pub fn with_stadium(mut self, stadium_id: Option<u32>) -> Self {
        self.stadium_id = stadium_id;
        self
    }

    pub fn is_national(&self) -> bool {
        matches!(self.kind, TeamKind::National { .. })
    }

    pub fn nation_id(&self) -> Option<u32> {
        match self.kind {
            TeamKind::National { nation_id } => Some(nation_id),
            TeamKind::Club => None,
        }
    }
}
