//! Titles and tiers
//!
//! Each activity feeds one title. A title's tier is a step function over the XP
//! accumulated under that title; architect is derived from breadth across the others.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ProgressionError, Result};
use super::activity::ActivityType;

/// Highest tier any title can reach
pub const MAX_TIER: u8 = 5;

/// Default minimum title XP for tiers I..V
pub const DEFAULT_TIER_THRESHOLDS: [u64; MAX_TIER as usize] = [1, 500, 1500, 3500, 7500];

const TIER_LABELS: [&str; MAX_TIER as usize] = ["I", "II", "III", "IV", "V"];

/// Behavioral archetypes a user can hold concurrently
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleType {
    Creator,
    Breaker,
    Prolancer,
    Explorer,
    Architect,
}

impl TitleType {
    pub const ALL: [TitleType; 5] = [
        TitleType::Creator,
        TitleType::Breaker,
        TitleType::Prolancer,
        TitleType::Explorer,
        TitleType::Architect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleType::Creator => "creator",
            TitleType::Breaker => "breaker",
            TitleType::Prolancer => "prolancer",
            TitleType::Explorer => "explorer",
            TitleType::Architect => "architect",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TitleType::Creator => "Creator",
            TitleType::Breaker => "Breaker",
            TitleType::Prolancer => "Prolancer",
            TitleType::Explorer => "Explorer",
            TitleType::Architect => "Architect",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TitleType::Creator => "Project-focused builder",
            TitleType::Breaker => "Problem solver",
            TitleType::Prolancer => "Freelance specialist",
            TitleType::Explorer => "Stack learner",
            TitleType::Architect => "System designer",
        }
    }

    /// The activity whose XP feeds this title; architect has none
    pub fn source_activity(&self) -> Option<ActivityType> {
        ActivityType::ALL.into_iter().find(|a| a.title() == *self)
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleType {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self> {
        TitleType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ProgressionError::invalid(format!("unknown title type {:?}", s)))
    }
}

/// Roman numeral shown on a title badge, `None` outside 1..=5
pub fn tier_label(tier: u8) -> Option<&'static str> {
    tier.checked_sub(1).and_then(|i| TIER_LABELS.get(i as usize)).copied()
}

/// Minimum title XP for each tier, ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TierSettings", into = "TierSettings")]
pub struct TierThresholds {
    thresholds: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TierSettings {
    thresholds: Vec<u64>,
}

impl TryFrom<TierSettings> for TierThresholds {
    type Error = ProgressionError;

    fn try_from(raw: TierSettings) -> Result<Self> {
        TierThresholds::new(raw.thresholds)
    }
}

impl From<TierThresholds> for TierSettings {
    fn from(tiers: TierThresholds) -> Self {
        Self { thresholds: tiers.thresholds }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self { thresholds: DEFAULT_TIER_THRESHOLDS.to_vec() }
    }
}

impl TierThresholds {
    pub fn new(thresholds: Vec<u64>) -> Result<Self> {
        if thresholds.is_empty() || thresholds.len() > MAX_TIER as usize {
            return Err(ProgressionError::configuration(format!(
                "expected 1..={} tier thresholds, got {}",
                MAX_TIER,
                thresholds.len()
            )));
        }
        if thresholds[0] == 0 {
            return Err(ProgressionError::configuration(
                "tier I threshold must be positive; zero XP holds no title",
            ));
        }
        if thresholds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ProgressionError::configuration(format!(
                "tier thresholds must strictly increase: {:?}",
                thresholds
            )));
        }
        Ok(Self { thresholds })
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.thresholds
    }

    pub fn max_tier(&self) -> u8 {
        self.thresholds.len() as u8
    }

    /// Tier earned with `xp` title XP, `None` if the title is not held
    pub fn tier_for_xp(&self, xp: u64) -> Option<u8> {
        let reached = self.thresholds.iter().take_while(|&&t| xp >= t).count();
        (reached > 0).then_some(reached as u8)
    }

    /// Title XP still needed for the next tier, `None` at the top tier
    pub fn xp_to_next_tier(&self, xp: u64) -> Option<u64> {
        self.thresholds.iter().find(|&&t| xp < t).map(|t| t - xp)
    }
}

/// Breadth rule for the architect title
///
/// Architect has no activity of its own. It is held once `min_titles` activity
/// titles are held, at the `min_titles`-th highest of their tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ArchitectSettings", into = "ArchitectSettings")]
pub struct ArchitectRule {
    min_titles: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ArchitectSettings {
    min_titles: usize,
}

impl TryFrom<ArchitectSettings> for ArchitectRule {
    type Error = ProgressionError;

    fn try_from(raw: ArchitectSettings) -> Result<Self> {
        ArchitectRule::new(raw.min_titles)
    }
}

impl From<ArchitectRule> for ArchitectSettings {
    fn from(rule: ArchitectRule) -> Self {
        Self { min_titles: rule.min_titles }
    }
}

impl Default for ArchitectRule {
    fn default() -> Self {
        Self { min_titles: 3 }
    }
}

impl ArchitectRule {
    pub fn new(min_titles: usize) -> Result<Self> {
        let activity_titles = ActivityType::ALL.len();
        if min_titles == 0 || min_titles > activity_titles {
            return Err(ProgressionError::configuration(format!(
                "architect min_titles must be within 1..={}, got {}",
                activity_titles, min_titles
            )));
        }
        Ok(Self { min_titles })
    }

    pub fn min_titles(&self) -> usize {
        self.min_titles
    }

    /// Architect tier given the tiers of the activity titles currently held
    pub fn tier(&self, activity_tiers: &[u8]) -> Option<u8> {
        let mut held: Vec<u8> = activity_tiers.iter().copied().filter(|&t| t > 0).collect();
        held.sort_unstable_by(|a, b| b.cmp(a));
        held.get(self.min_titles - 1).copied()
    }
}

/// A held title and its tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleStanding {
    pub title: TitleType,
    /// XP accumulated under the title (zero for architect)
    pub xp: u64,
    pub tier: u8,
}

impl TitleStanding {
    pub fn label(&self) -> String {
        format!("{} {}", self.title.label(), tier_label(self.tier).unwrap_or("?"))
    }
}

/// All titles held given per-title XP, in `TitleType::ALL` order
pub fn title_standings(
    title_xp: &BTreeMap<TitleType, u64>,
    tiers: &TierThresholds,
    architect: &ArchitectRule,
) -> Vec<TitleStanding> {
    let mut standings: Vec<TitleStanding> = ActivityType::ALL
        .into_iter()
        .map(|a| a.title())
        .filter_map(|title| {
            let xp = title_xp.get(&title).copied().unwrap_or(0);
            tiers.tier_for_xp(xp).map(|tier| TitleStanding { title, xp, tier })
        })
        .collect();

    let activity_tiers: Vec<u8> = standings.iter().map(|s| s.tier).collect();
    if let Some(tier) = architect.tier(&activity_tiers) {
        standings.push(TitleStanding { title: TitleType::Architect, xp: 0, tier });
    }
    standings
}
