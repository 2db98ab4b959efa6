//! Progression systems
//!
//! Level curve, activity awards, titles and tiers. Everything here is pure.

pub mod xp;
pub mod activity;
pub mod titles;
pub mod bonus;
pub mod engine;

pub use xp::{LevelCurve, LevelState, LevelTransition, LevelRank, xp_for_level, total_xp_for_level, level_from_xp};
pub use activity::{ActivityType, ActivityConfig, StatKey, XpGainResult, ACTIVITY_CONFIGS};
pub use activity::{activity_config, award_xp, award_xp_named};
pub use titles::{TitleType, TitleStanding, TierThresholds, ArchitectRule, MAX_TIER, tier_label, title_standings};
pub use bonus::{ChallengeDifficulty, challenge_bonus, project_bonus, project_complexity};
pub use engine::ProgressionEngine;
