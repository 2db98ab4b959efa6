//! SkillQuest - career progression engine
//!
//! Candidates earn XP for projects, solved problems, freelance gigs and
//! certificates. This crate turns those activities into levels, titles and tiers.

pub mod error;
pub mod progression;
pub mod data;
pub mod profile;
pub mod input;

// Re-export commonly used types
pub use error::{ProgressionError, Result};
pub use progression::{
    ActivityType, ActivityConfig, StatKey, TitleType, LevelState, XpGainResult,
    ProgressionEngine, ACTIVITY_CONFIGS, xp_for_level, level_from_xp, award_xp,
};
pub use data::ProgressionConfig;
pub use profile::{CareerProfile, ProfileStore, MemoryStore};
