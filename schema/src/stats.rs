use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Upper bound of the stat chart axis. No base stat exceeds it.
pub const STAT_CHART_MAX: u8 = 255;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    /// Chart label for the given language code.
    pub fn label(self, language: &str) -> &'static str {
        use StatKind::*;

        match (language, self) {
            ("es", Hp) => "PS",
            ("es", Attack) => "Ataque",
            ("es", Defense) => "Defensa",
            ("es", SpecialAttack) => "At. Esp.",
            ("es", SpecialDefense) => "Def. Esp.",
            ("es", Speed) => "Velocidad",
            (_, Hp) => "HP",
            (_, Attack) => "Attack",
            (_, Defense) => "Defense",
            (_, SpecialAttack) => "Sp. Atk",
            (_, SpecialDefense) => "Sp. Def",
            (_, Speed) => "Speed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.sp_attack,
            StatKind::SpecialDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: u8) {
        let slot = match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::SpecialAttack => &mut self.sp_attack,
            StatKind::SpecialDefense => &mut self.sp_defense,
            StatKind::Speed => &mut self.speed,
        };
        *slot = value;
    }

    /// The six stats in chart order (HP first, Speed last).
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, u8)> + '_ {
        StatKind::iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> u16 {
        self.iter().map(|(_, value)| u16::from(value)).sum()
    }
}
