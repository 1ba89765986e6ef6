//! Level store
//!
//! Three ordered lists of grid positions loaded once from level data. Pickup
//! lists only shrink; removal is stable so remaining entries keep their order.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::Deserialize;

use crate::error::{Result, SceneError};

/// World-space position of an entity
pub type Position = Vec3;

/// Which entity list an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Coin,
    Health,
    Beast,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Coin, EntityKind::Health, EntityKind::Beast];

    /// Key used in level data
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Coin => "coin",
            EntityKind::Health => "health",
            EntityKind::Beast => "beast",
        }
    }
}

/// Level data as written on disk: each list holds raw number arrays
#[derive(Debug, Clone, Deserialize)]
pub struct LevelData {
    pub coin: Vec<Vec<f64>>,
    pub health: Vec<Vec<f64>>,
    pub beast: Vec<Vec<f64>>,
}

/// Live entity lists for one scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    coin: Vec<Position>,
    health: Vec<Position>,
    beast: Vec<Position>,
}

impl Level {
    /// Validate level data and build the live lists
    pub fn load(data: &LevelData) -> Result<Self> {
        let level = Self {
            coin: parse_list(EntityKind::Coin, &data.coin)?,
            health: parse_list(EntityKind::Health, &data.health)?,
            beast: parse_list(EntityKind::Beast, &data.beast)?,
        };
        log::info!(
            "Level loaded: {} coins, {} health, {} beasts",
            level.coin.len(),
            level.health.len(),
            level.beast.len()
        );
        Ok(level)
    }

    /// Parse a single level object `{ coin, health, beast }`
    pub fn from_json(json: &str) -> Result<Self> {
        let data: LevelData = serde_json::from_str(json)
            .map_err(|e| SceneError::MalformedLevelData(e.to_string()))?;
        Self::load(&data)
    }

    /// Build directly from positions (tests, generated levels)
    pub fn from_positions(coin: Vec<Position>, health: Vec<Position>, beast: Vec<Position>) -> Self {
        Self { coin, health, beast }
    }

    pub fn list(&self, kind: EntityKind) -> &[Position] {
        match kind {
            EntityKind::Coin => &self.coin,
            EntityKind::Health => &self.health,
            EntityKind::Beast => &self.beast,
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.list(kind).len()
    }

    pub fn coins(&self) -> &[Position] {
        &self.coin
    }

    pub fn health_pickups(&self) -> &[Position] {
        &self.health
    }

    pub fn beasts(&self) -> &[Position] {
        &self.beast
    }

    /// Stable removal; out-of-range indices are a caller bug
    pub fn remove_at(&mut self, kind: EntityKind, index: usize) -> Result<Position> {
        let list = match kind {
            EntityKind::Coin => &mut self.coin,
            EntityKind::Health => &mut self.health,
            EntityKind::Beast => &mut self.beast,
        };
        if index >= list.len() {
            return Err(SceneError::InvariantViolation(format!(
                "remove_at({}, {index}) on a list of {}",
                kind.as_str(),
                list.len()
            )));
        }
        Ok(list.remove(index))
    }
}

fn parse_list(kind: EntityKind, entries: &[Vec<f64>]) -> Result<Vec<Position>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry.as_slice() {
            [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
                Ok(Vec3::new(*x as f32, *y as f32, *z as f32))
            }
            _ => Err(SceneError::MalformedLevelData(format!(
                "{}[{i}] is not a 3-vector: {entry:?}",
                kind.as_str()
            ))),
        })
        .collect()
}

/// Named levels from a single data file, e.g. `{ "Level1": { ... } }`
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LevelSet {
    levels: BTreeMap<String, LevelData>,
}

impl LevelSet {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SceneError::MalformedLevelData(e.to_string()))
    }

    /// Load a level set from disk (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Level names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }

    pub fn level(&self, name: &str) -> Result<Level> {
        let data = self
            .levels
            .get(name)
            .ok_or_else(|| SceneError::UnknownLevel(name.to_string()))?;
        Level::load(data)
    }
}
