//! Stage identifiers and stage-indexed tables.

use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Number of stages in a rollout.
pub const STAGE_COUNT: usize = 5;

/// Growth stages, visited strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Seed,
    #[serde(rename = "MVP")]
    Mvp,
    #[serde(rename = "PMF")]
    Pmf,
    #[serde(rename = "Scale-up")]
    ScaleUp,
    Unicorn,
}

impl Stage {
    /// All stages in rollout order
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::Seed,
        Stage::Mvp,
        Stage::Pmf,
        Stage::ScaleUp,
        Stage::Unicorn,
    ];

    pub fn index(self) -> usize {
        match self {
            Stage::Seed => 0,
            Stage::Mvp => 1,
            Stage::Pmf => 2,
            Stage::ScaleUp => 3,
            Stage::Unicorn => 4,
        }
    }

    /// Display name, also used as the JSON key
    pub fn name(self) -> &'static str {
        match self {
            Stage::Seed => "Seed",
            Stage::Mvp => "MVP",
            Stage::Pmf => "PMF",
            Stage::ScaleUp => "Scale-up",
            Stage::Unicorn => "Unicorn",
        }
    }

    /// The stage after this one, or None for the last stage.
    pub fn next(self) -> Option<Stage> {
        Stage::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a stage name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStage(pub String);

impl fmt::Display for UnknownStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown stage '{}'", self.0)
    }
}

impl std::error::Error for UnknownStage {}

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

/// One value per stage.
///
/// Every stage always has an entry, so lookups never fail. Serializes as a
/// JSON object keyed by stage name, in rollout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageTable<T>([T; STAGE_COUNT]);

impl<T> StageTable<T> {
    pub fn from_fn(f: impl FnMut(Stage) -> T) -> Self {
        Self(Stage::ALL.map(f))
    }

    /// Entries in rollout order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &T)> {
        Stage::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T> From<[T; STAGE_COUNT]> for StageTable<T> {
    fn from(values: [T; STAGE_COUNT]) -> Self {
        Self(values)
    }
}

impl<T> Index<Stage> for StageTable<T> {
    type Output = T;

    fn index(&self, stage: Stage) -> &T {
        &self.0[stage.index()]
    }
}

impl<T> IndexMut<Stage> for StageTable<T> {
    fn index_mut(&mut self, stage: Stage) -> &mut T {
        &mut self.0[stage.index()]
    }
}

impl<T: Serialize> Serialize for StageTable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(STAGE_COUNT))?;
        for (stage, value) in self.iter() {
            map.serialize_entry(stage.name(), value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for StageTable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut entries: HashMap<Stage, T> = HashMap::deserialize(deserializer)?;
        let mut slots = Vec::with_capacity(STAGE_COUNT);
        for stage in Stage::ALL {
            let value = entries
                .remove(&stage)
                .ok_or_else(|| D::Error::custom(format!("missing entry for stage {stage}")))?;
            slots.push(value);
        }
        let slots: [T; STAGE_COUNT] = slots
            .try_into()
            .map_err(|_| D::Error::custom("stage table has the wrong length"))?;
        Ok(Self(slots))
    }
}
