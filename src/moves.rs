//! Partitions a creature's learnable moves into "by level" and "by machine".

use schema::{MoveEntry, VersionGroupDetail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearnMethod {
    LevelUp,
    Machine,
    Other,
}

impl LearnMethod {
    pub fn from_api_name(name: &str) -> Self {
        match name {
            "level-up" => LearnMethod::LevelUp,
            "machine" => LearnMethod::Machine,
            _ => LearnMethod::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLearnRecord {
    pub move_name: String,
    pub learn_method: LearnMethod,
    /// Only meaningful for [`LearnMethod::LevelUp`].
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSets {
    pub by_level: Vec<MoveLearnRecord>,
    pub by_machine: Vec<MoveLearnRecord>,
}

impl MoveSets {
    pub fn is_empty(&self) -> bool {
        self.by_level.is_empty() && self.by_machine.is_empty()
    }
}

fn first_detail(entry: &MoveEntry) -> Option<&VersionGroupDetail> {
    entry.version_group_details.first()
}

fn sort_level(entry: &MoveEntry) -> u32 {
    first_detail(entry)
        .and_then(|detail| detail.level_learned_at)
        .unwrap_or(0)
}

fn is_method(detail: &VersionGroupDetail, method: LearnMethod) -> bool {
    LearnMethod::from_api_name(&detail.move_learn_method.name) == method
}

/// Classifies moves for display.
///
/// Moves are first stably sorted by the level in their *first* version-group
/// detail (missing level sorts as 0). A move is listed "by level" when that
/// first detail is a level-up; it is listed "by machine" when *any* detail is
/// a machine. The two checks are deliberately asymmetric, so one move can
/// appear in both lists or in neither.
pub fn classify_moves(moves: &[MoveEntry]) -> MoveSets {
    let mut sorted: Vec<&MoveEntry> = moves.iter().collect();
    sorted.sort_by_key(|entry| sort_level(entry));

    let by_level = sorted
        .iter()
        .filter(|entry| first_detail(entry).is_some_and(|d| is_method(d, LearnMethod::LevelUp)))
        .map(|entry| MoveLearnRecord {
            move_name: entry.move_.name.clone(),
            learn_method: LearnMethod::LevelUp,
            level: sort_level(entry),
        })
        .collect();

    let by_machine = sorted
        .iter()
        .filter(|entry| {
            entry
                .version_group_details
                .iter()
                .any(|d| is_method(d, LearnMethod::Machine))
        })
        .map(|entry| MoveLearnRecord {
            move_name: entry.move_.name.clone(),
            learn_method: LearnMethod::Machine,
            level: 0,
        })
        .collect();

    MoveSets {
        by_level,
        by_machine,
    }
}
