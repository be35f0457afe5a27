use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};
use tracing::warn;

/// Board dimensions and mine count for one level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Preset {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert
}

impl Difficulty {
    pub fn preset(self) -> Preset {
        match self {
            Difficulty::Beginner => Preset{rows: 9, cols: 9, mines: 10},
            Difficulty::Intermediate => Preset{rows: 16, cols: 16, mines: 40},
            Difficulty::Expert => Preset{rows: 16, cols: 30, mines: 99}
        }
    }

    /// Anything that isn't a known level name means beginner.
    pub fn from_name_lossy(name: &str) -> Difficulty {
        let name = name.trim();
        match Difficulty::from_str(name) {
            Ok(difficulty) => difficulty,
            Err(_) => {
                warn!(input = name, "unrecognised difficulty, falling back to beginner");
                Difficulty::default()
            }
        }
    }
}
