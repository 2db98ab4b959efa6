//! Bonus XP for challenge difficulty and project complexity

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ProgressionError, Result};

/// XP per point of project complexity
pub const PROJECT_COMPLEXITY_XP: u64 = 25;
/// Reward for a correct challenge submission before the difficulty multiplier
pub const CHALLENGE_BASE_REWARD: u64 = 25;

const MAX_COMPLEXITY: u32 = 10;

/// Challenge difficulty and its reward multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl ChallengeDifficulty {
    pub fn xp_multiplier(&self) -> u64 {
        match self {
            ChallengeDifficulty::Easy => 1,
            ChallengeDifficulty::Medium => 2,
            ChallengeDifficulty::Hard => 3,
            ChallengeDifficulty::Expert => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeDifficulty::Easy => "easy",
            ChallengeDifficulty::Medium => "medium",
            ChallengeDifficulty::Hard => "hard",
            ChallengeDifficulty::Expert => "expert",
        }
    }
}

impl FromStr for ChallengeDifficulty {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "easy" => Ok(ChallengeDifficulty::Easy),
            "medium" => Ok(ChallengeDifficulty::Medium),
            "hard" => Ok(ChallengeDifficulty::Hard),
            "expert" => Ok(ChallengeDifficulty::Expert),
            _ => Err(ProgressionError::invalid(format!("unknown challenge difficulty {:?}", s))),
        }
    }
}

/// Bonus on top of the problem-solving base so a solve pays `25 * multiplier`
///
/// The dashboard this replaces paid a flat per-problem reward and only displayed
/// the multiplier. Here the multiplier scales the reward.
pub fn challenge_bonus(difficulty: ChallengeDifficulty) -> u64 {
    CHALLENGE_BASE_REWARD * (difficulty.xp_multiplier() - 1)
}

/// Complexity score 1..=10 from the size of a project's tech stack
pub fn project_complexity<S: AsRef<str>>(tech_stack: &[S]) -> u32 {
    let score = (tech_stack.len() / 2) as u32 + 1;
    score.clamp(1, MAX_COMPLEXITY)
}

/// Complexity bonus, `complexity * 25`, added on top of the project base XP
///
/// The dashboard this replaces paid `complexity * 25` as the whole project
/// reward. Here it is a bonus, so a project always earns at least its base.
pub fn project_bonus(complexity: u32) -> u64 {
    complexity.clamp(1, MAX_COMPLEXITY) as u64 * PROJECT_COMPLEXITY_XP
}
