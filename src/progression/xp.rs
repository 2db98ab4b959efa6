//! Experience and leveling
//!
//! XP curve, level resolution from cumulative XP, and level ranks.

use serde::{Deserialize, Serialize};

use crate::error::{ProgressionError, Result};

/// XP required to complete level 1
pub const BASE_LEVEL_XP: u64 = 100;
/// Growth factor 1.2 expressed as 6/5 so thresholds can be computed exactly
pub const GROWTH_NUMERATOR: u64 = 6;
pub const GROWTH_DENOMINATOR: u64 = 5;

/// Geometric XP curve: level `L` needs `floor(base * (num/den)^(L-1))` XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurveSettings", into = "CurveSettings")]
pub struct LevelCurve {
    base_xp: u64,
    growth_numerator: u64,
    growth_denominator: u64,
}

/// Raw curve fields as they appear in config files
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CurveSettings {
    base_xp: u64,
    growth_numerator: u64,
    growth_denominator: u64,
}

impl TryFrom<CurveSettings> for LevelCurve {
    type Error = ProgressionError;

    fn try_from(raw: CurveSettings) -> Result<Self> {
        LevelCurve::new(raw.base_xp, raw.growth_numerator, raw.growth_denominator)
    }
}

impl From<LevelCurve> for CurveSettings {
    fn from(curve: LevelCurve) -> Self {
        Self {
            base_xp: curve.base_xp,
            growth_numerator: curve.growth_numerator,
            growth_denominator: curve.growth_denominator,
        }
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl LevelCurve {
    /// The curve used by the free functions: 100 XP, growing 20% per level
    pub const STANDARD: LevelCurve = LevelCurve {
        base_xp: BASE_LEVEL_XP,
        growth_numerator: GROWTH_NUMERATOR,
        growth_denominator: GROWTH_DENOMINATOR,
    };

    /// Build a curve, rejecting settings whose thresholds would not strictly increase
    pub fn new(base_xp: u64, growth_numerator: u64, growth_denominator: u64) -> Result<Self> {
        if base_xp == 0 {
            return Err(ProgressionError::configuration("curve base_xp must be positive"));
        }
        if growth_denominator == 0 || growth_numerator <= growth_denominator {
            return Err(ProgressionError::configuration(format!(
                "curve growth {}/{} must be greater than 1",
                growth_numerator, growth_denominator
            )));
        }
        // Consecutive thresholds differ by at least base * (g - 1) before flooring,
        // so that product must reach 1 for the floored values to stay distinct.
        let step = (base_xp as u128) * ((growth_numerator - growth_denominator) as u128);
        if step < growth_denominator as u128 {
            return Err(ProgressionError::configuration(format!(
                "curve base {} with growth {}/{} does not grow by at least 1 XP per level",
                base_xp, growth_numerator, growth_denominator
            )));
        }
        Ok(Self { base_xp, growth_numerator, growth_denominator })
    }

    pub fn base_xp(&self) -> u64 {
        self.base_xp
    }

    /// Growth factor as a float, for display
    pub fn growth(&self) -> f64 {
        self.growth_numerator as f64 / self.growth_denominator as f64
    }

    /// XP needed to complete `level`, or `None` if it does not fit in a u64
    fn threshold(&self, level: u32) -> Option<u64> {
        let steps = level.checked_sub(1)?;
        let numerator = (self.growth_numerator as u128)
            .checked_pow(steps)
            .and_then(|p| p.checked_mul(self.base_xp as u128));
        let denominator = (self.growth_denominator as u128).checked_pow(steps);

        match (numerator, denominator) {
            (Some(n), Some(d)) => u64::try_from(n / d).ok(),
            _ => {
                let exponent = i32::try_from(steps).ok()?;
                let value = (self.base_xp as f64 * self.growth().powi(exponent)).floor();
                if value.is_finite() && value < u64::MAX as f64 {
                    Some(value as u64)
                } else {
                    None
                }
            }
        }
    }

    /// XP required to complete exactly `level`
    pub fn xp_for_level(&self, level: u32) -> Result<u64> {
        if level == 0 {
            return Err(ProgressionError::invalid("level must be at least 1"));
        }
        self.threshold(level).ok_or_else(|| {
            ProgressionError::invalid(format!("level {} is beyond the representable XP range", level))
        })
    }

    /// Total XP needed from zero to reach the start of `level`
    pub fn total_xp_for_level(&self, level: u32) -> Result<u64> {
        if level == 0 {
            return Err(ProgressionError::invalid("level must be at least 1"));
        }
        (1..level).try_fold(0u64, |sum, l| {
            let needed = self.xp_for_level(l)?;
            sum.checked_add(needed).ok_or_else(|| {
                ProgressionError::invalid(format!("cumulative XP for level {} overflows", level))
            })
        })
    }

    /// Resolve a cumulative XP total into its level and in-level progress
    pub fn level_from_xp(&self, total_xp: u64) -> LevelState {
        let mut level = 1;
        let mut remaining = total_xp;

        loop {
            // An unrepresentable threshold can never be met by a u64 remainder
            let needed = self.threshold(level).unwrap_or(u64::MAX);
            if remaining < needed {
                return LevelState {
                    level,
                    xp_in_level: remaining,
                    xp_to_next: needed,
                };
            }
            remaining -= needed;
            level += 1;
        }
    }

    /// Level states before and after gaining `gained` XP
    pub fn transition(&self, total_before: u64, gained: u64) -> Result<LevelTransition> {
        let total_after = total_before.checked_add(gained).ok_or_else(|| {
            ProgressionError::invalid(format!(
                "adding {} XP to {} overflows the XP total",
                gained, total_before
            ))
        })?;
        Ok(LevelTransition {
            before: self.level_from_xp(total_before),
            after: self.level_from_xp(total_after),
            total_after,
        })
    }
}

/// Level and progress derived from a cumulative XP total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub level: u32,
    pub xp_in_level: u64,
    pub xp_to_next: u64,
}

impl LevelState {
    /// Progress through the current level, 0.0..100.0
    pub fn progress_percent(&self) -> f64 {
        self.xp_in_level as f64 / self.xp_to_next as f64 * 100.0
    }

    /// XP still missing before the next level
    pub fn xp_remaining(&self) -> u64 {
        self.xp_to_next - self.xp_in_level
    }

    pub fn rank(&self) -> LevelRank {
        LevelRank::for_level(self.level)
    }

    /// Whether this level satisfies a minimum level requirement (e.g. a gig's)
    pub fn meets_requirement(&self, required_level: u32) -> bool {
        self.level >= required_level
    }
}

/// Before/after view of a single XP gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTransition {
    pub before: LevelState,
    pub after: LevelState,
    pub total_after: u64,
}

impl LevelTransition {
    pub fn level_up(&self) -> bool {
        self.after.level != self.before.level
    }

    pub fn levels_gained(&self) -> u32 {
        self.after.level - self.before.level
    }
}

/// Named band of levels shown around the level ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelRank {
    Novice,
    Adept,
    Expert,
    Master,
    Legend,
}

impl LevelRank {
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=9 => LevelRank::Novice,
            10..=24 => LevelRank::Adept,
            25..=49 => LevelRank::Expert,
            50..=74 => LevelRank::Master,
            _ => LevelRank::Legend,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LevelRank::Novice => "Novice",
            LevelRank::Adept => "Adept",
            LevelRank::Expert => "Expert",
            LevelRank::Master => "Master",
            LevelRank::Legend => "Legend",
        }
    }
}

/// XP required to complete `level` on the standard curve
pub fn xp_for_level(level: u32) -> Result<u64> {
    LevelCurve::STANDARD.xp_for_level(level)
}

/// Total XP needed to reach the start of `level` on the standard curve
pub fn total_xp_for_level(level: u32) -> Result<u64> {
    LevelCurve::STANDARD.total_xp_for_level(level)
}

/// Resolve a cumulative XP total on the standard curve
pub fn level_from_xp(total_xp: u64) -> LevelState {
    LevelCurve::STANDARD.level_from_xp(total_xp)
}
