//! Tunable progression settings

use serde::{Deserialize, Serialize};

use crate::error::{ProgressionError, Result};
use crate::progression::{ArchitectRule, LevelCurve, TierThresholds};

/// Default XP per stat point
pub const DEFAULT_STAT_XP_UNIT: u64 = 25;

/// Everything about progression that can be overridden from a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Level threshold curve
    pub curve: LevelCurve,
    /// Minimum title XP per tier
    pub tiers: TierThresholds,
    /// Breadth rule for the architect title
    pub architect: ArchitectRule,
    /// XP that buys one stat point
    pub stat_xp_unit: u64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            curve: LevelCurve::STANDARD,
            tiers: TierThresholds::default(),
            architect: ArchitectRule::default(),
            stat_xp_unit: DEFAULT_STAT_XP_UNIT,
        }
    }
}

impl ProgressionConfig {
    /// Check settings the field types cannot enforce on their own
    pub fn validate(&self) -> Result<()> {
        if self.stat_xp_unit == 0 {
            return Err(ProgressionError::configuration("stat_xp_unit must be positive"));
        }
        Ok(())
    }
}
