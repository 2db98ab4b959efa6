//! Activities and XP awards
//!
//! The static activity table, stat keys, and the award calculation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ProgressionError, Result};
use super::titles::TitleType;
use super::xp::LevelCurve;

/// Actions that grant XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Project,
    ProblemSolving,
    Freelancing,
    Learning,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Project,
        ActivityType::ProblemSolving,
        ActivityType::Freelancing,
        ActivityType::Learning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Project => "project",
            ActivityType::ProblemSolving => "problem_solving",
            ActivityType::Freelancing => "freelancing",
            ActivityType::Learning => "learning",
        }
    }

    /// Title this activity contributes to
    pub fn title(&self) -> TitleType {
        match self {
            ActivityType::Project => TitleType::Creator,
            ActivityType::ProblemSolving => TitleType::Breaker,
            ActivityType::Freelancing => TitleType::Prolancer,
            ActivityType::Learning => TitleType::Explorer,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self> {
        ActivityType::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ProgressionError::invalid(format!("unknown activity type {:?}", s)))
    }
}

/// Capability dimensions shown on the stats radar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Knowledge,
    HandsOn,
    ProblemSolving,
    Consistency,
    Depth,
    Collaboration,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Knowledge,
        StatKey::HandsOn,
        StatKey::ProblemSolving,
        StatKey::Consistency,
        StatKey::Depth,
        StatKey::Collaboration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Knowledge => "knowledge",
            StatKey::HandsOn => "hands_on",
            StatKey::ProblemSolving => "problem_solving",
            StatKey::Consistency => "consistency",
            StatKey::Depth => "depth",
            StatKey::Collaboration => "collaboration",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKey {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self> {
        StatKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ProgressionError::invalid(format!("unknown stat key {:?}", s)))
    }
}

/// Per-activity award settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityConfig {
    pub activity: ActivityType,
    pub base_xp: u64,
    pub affected_stats: &'static [StatKey],
    pub title: TitleType,
}

impl ActivityConfig {
    /// Stat points gained by each affected stat for an award of `xp_earned`
    ///
    /// One point per `xp_per_point` XP, and never less than one point.
    pub fn stat_gains(&self, xp_earned: u64, xp_per_point: u64) -> Vec<(StatKey, u32)> {
        let points = (xp_earned / xp_per_point.max(1)).clamp(1, u32::MAX as u64) as u32;
        self.affected_stats.iter().map(|&stat| (stat, points)).collect()
    }
}

/// The activity table, one row per `ActivityType`
pub const ACTIVITY_CONFIGS: &[ActivityConfig] = &[
    ActivityConfig {
        activity: ActivityType::Project,
        base_xp: 100,
        affected_stats: &[StatKey::HandsOn, StatKey::Depth],
        title: TitleType::Creator,
    },
    ActivityConfig {
        activity: ActivityType::ProblemSolving,
        base_xp: 25,
        affected_stats: &[StatKey::ProblemSolving, StatKey::Knowledge],
        title: TitleType::Breaker,
    },
    ActivityConfig {
        activity: ActivityType::Freelancing,
        base_xp: 150,
        affected_stats: &[StatKey::Collaboration, StatKey::HandsOn],
        title: TitleType::Prolancer,
    },
    ActivityConfig {
        activity: ActivityType::Learning,
        base_xp: 50,
        affected_stats: &[StatKey::Knowledge],
        title: TitleType::Explorer,
    },
];

/// Look up the table row for `activity`
pub fn activity_config(activity: ActivityType) -> Result<&'static ActivityConfig> {
    ACTIVITY_CONFIGS
        .iter()
        .find(|c| c.activity == activity)
        .ok_or_else(|| {
            ProgressionError::configuration(format!("no activity config entry for {}", activity))
        })
}

/// Result of awarding XP for one activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGainResult {
    pub success: bool,
    pub xp_earned: u64,
    pub level_up: bool,
}

/// Award XP on a given curve, comparing levels before and after the award
pub(crate) fn award_on_curve(
    curve: &LevelCurve,
    activity: ActivityType,
    total_xp_before: u64,
    bonus_xp: u64,
) -> Result<XpGainResult> {
    let config = activity_config(activity)?;
    let xp_earned = config.base_xp.checked_add(bonus_xp).ok_or_else(|| {
        ProgressionError::invalid(format!("bonus of {} XP overflows the award", bonus_xp))
    })?;
    let transition = curve.transition(total_xp_before, xp_earned)?;

    Ok(XpGainResult {
        success: true,
        xp_earned,
        level_up: transition.level_up(),
    })
}

/// Award XP for `activity` to a user who had `total_xp_before`, on the standard curve
pub fn award_xp(activity: ActivityType, total_xp_before: u64, bonus_xp: u64) -> Result<XpGainResult> {
    award_on_curve(&LevelCurve::STANDARD, activity, total_xp_before, bonus_xp)
}

/// Same as [`award_xp`] for an activity given by its wire name
pub fn award_xp_named(activity: &str, total_xp_before: u64, bonus_xp: u64) -> Result<XpGainResult> {
    award_xp(activity.parse()?, total_xp_before, bonus_xp)
}
