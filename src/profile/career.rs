//! Career profile counters
//!
//! The cumulative values a profile/stats store keeps for one user. Levels and
//! tiers are never stored; they are recomputed from these counters on demand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::progression::{
    ActivityType, LevelState, ProgressionEngine, StatKey, TitleStanding, TitleType, XpGainResult,
};

/// Upper bound for a single stat value
pub const MAX_STAT_VALUE: u32 = 100;

/// Persistent progression counters for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerProfile {
    /// Cumulative XP across all activities
    pub total_xp: u64,
    /// XP accumulated under each activity title
    pub title_xp: BTreeMap<TitleType, u64>,
    /// Capability stats, 0..=100
    pub stats: BTreeMap<StatKey, u32>,
    /// Number of awards per activity
    pub activity_counts: BTreeMap<ActivityType, u32>,
}

/// Everything that changed as a result of one award
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardOutcome {
    pub activity: ActivityType,
    pub gain: XpGainResult,
    pub level_before: LevelState,
    pub level_after: LevelState,
    /// Stat increases actually applied after capping
    pub stat_updates: Vec<(StatKey, u32)>,
    pub titles_before: Vec<TitleStanding>,
    pub titles_after: Vec<TitleStanding>,
}

impl AwardOutcome {
    /// Titles whose tier rose (or that were newly earned) with this award
    pub fn promoted_titles(&self) -> Vec<TitleStanding> {
        self.titles_after
            .iter()
            .filter(|after| {
                self.titles_before
                    .iter()
                    .find(|before| before.title == after.title)
                    .map_or(true, |before| after.tier > before.tier)
            })
            .copied()
            .collect()
    }
}

impl CareerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, engine: &ProgressionEngine) -> LevelState {
        engine.level_from_xp(self.total_xp)
    }

    pub fn stat(&self, key: StatKey) -> u32 {
        self.stats.get(&key).copied().unwrap_or(0)
    }

    pub fn title_xp(&self, title: TitleType) -> u64 {
        self.title_xp.get(&title).copied().unwrap_or(0)
    }

    pub fn titles(&self, engine: &ProgressionEngine) -> Vec<TitleStanding> {
        engine.title_standings(&self.title_xp)
    }

    /// Apply an award for `activity`, updating every counter it touches
    ///
    /// Nothing is modified if the award fails.
    pub fn apply(&mut self, engine: &ProgressionEngine, activity: ActivityType, bonus_xp: u64) -> Result<AwardOutcome> {
        let gain = engine.award_xp(activity, self.total_xp, bonus_xp)?;
        let stat_gains = engine.stat_gains(activity, gain.xp_earned)?;
        let level_before = self.level(engine);
        let titles_before = self.titles(engine);

        // Award succeeded, so total_xp + xp_earned is known not to overflow
        self.total_xp += gain.xp_earned;
        let title = activity.title();
        let title_xp = self.title_xp.entry(title).or_insert(0);
        *title_xp = title_xp.saturating_add(gain.xp_earned);
        let count = self.activity_counts.entry(activity).or_insert(0);
        *count = count.saturating_add(1);

        let mut stat_updates = Vec::with_capacity(stat_gains.len());
        for (key, points) in stat_gains {
            let value = self.stats.entry(key).or_insert(0);
            let raised = value.saturating_add(points).min(MAX_STAT_VALUE);
            if raised > *value {
                stat_updates.push((key, raised - *value));
                *value = raised;
            }
        }

        let outcome = AwardOutcome {
            activity,
            gain,
            level_before,
            level_after: self.level(engine),
            stat_updates,
            titles_before,
            titles_after: self.titles(engine),
        };

        if gain.level_up {
            log::info!(
                "Level up: {} -> {} ({} XP total)",
                outcome.level_before.level,
                outcome.level_after.level,
                self.total_xp
            );
        }
        for standing in outcome.promoted_titles() {
            log::info!("Title earned: {}", standing.label());
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_updates_counters() {
        let engine = ProgressionEngine::standard();
        let mut profile = CareerProfile::new();

        let outcome = profile.apply(&engine, ActivityType::Project, 0).unwrap();
        assert_eq!(outcome.gain.xp_earned, 100);
        assert!(outcome.gain.level_up);
        assert_eq!(outcome.level_after.level, 2);
        assert_eq!(profile.total_xp, 100);
        assert_eq!(profile.title_xp(TitleType::Creator), 100);
        assert_eq!(profile.stat(StatKey::HandsOn), 4);
        assert_eq!(profile.stat(StatKey::Depth), 4);
        assert_eq!(profile.activity_counts.get(&ActivityType::Project), Some(&1));
    }

    #[test]
    fn test_first_award_earns_title() {
        let engine = ProgressionEngine::standard();
        let mut profile = CareerProfile::new();

        let outcome = profile.apply(&engine, ActivityType::Learning, 0).unwrap();
        let promoted = outcome.promoted_titles();
        assert_eq!(promoted.len(), 1);
        assert_eq!(promoted[0].title, TitleType::Explorer);
        assert_eq!(promoted[0].tier, 1);

        let outcome = profile.apply(&engine, ActivityType::Learning, 0).unwrap();
        assert!(outcome.promoted_titles().is_empty());
    }

    #[test]
    fn test_stats_are_capped() {
        let engine = ProgressionEngine::standard();
        let mut profile = CareerProfile::new();
        profile.stats.insert(StatKey::Collaboration, 98);

        let outcome = profile.apply(&engine, ActivityType::Freelancing, 0).unwrap();
        assert_eq!(profile.stat(StatKey::Collaboration), MAX_STAT_VALUE);
        assert!(outcome.stat_updates.contains(&(StatKey::Collaboration, 2)));
        assert!(outcome.stat_updates.contains(&(StatKey::HandsOn, 6)));

        let outcome = profile.apply(&engine, ActivityType::Freelancing, 0).unwrap();
        assert!(!outcome.stat_updates.iter().any(|(k, _)| *k == StatKey::Collaboration));
    }

    #[test]
    fn test_failed_award_leaves_profile_untouched() {
        let engine = ProgressionEngine::standard();
        let mut profile = CareerProfile { total_xp: u64::MAX - 1, ..CareerProfile::default() };
        let snapshot = profile.clone();

        assert!(profile.apply(&engine, ActivityType::Project, 0).is_err());
        assert_eq!(profile, snapshot);
    }

    #[test]
    fn test_activity_count_saturates() {
        let engine = ProgressionEngine::standard();
        let mut profile = CareerProfile::new();
        profile.activity_counts.insert(ActivityType::Learning, u32::MAX);

        profile.apply(&engine, ActivityType::Learning, 0).unwrap();
        assert_eq!(profile.activity_counts.get(&ActivityType::Learning), Some(&u32::MAX));
    }

    #[test]
    fn test_breadth_grants_architect() {
        let engine = ProgressionEngine::standard();
        let mut profile = CareerProfile::new();
        profile.apply(&engine, ActivityType::Project, 0).unwrap();
        profile.apply(&engine, ActivityType::ProblemSolving, 0).unwrap();
        assert!(!profile.titles(&engine).iter().any(|s| s.title == TitleType::Architect));

        let outcome = profile.apply(&engine, ActivityType::Freelancing, 0).unwrap();
        let promoted: Vec<TitleType> = outcome.promoted_titles().iter().map(|s| s.title).collect();
        assert_eq!(promoted, vec![TitleType::Prolancer, TitleType::Architect]);
    }

    #[test]
    fn test_profile_json_snapshot() {
        let engine = ProgressionEngine::standard();
        let mut profile = CareerProfile::new();
        profile.apply(&engine, ActivityType::ProblemSolving, 10).unwrap();

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["total_xp"], 35);
        assert_eq!(json["title_xp"]["breaker"], 35);
        assert_eq!(json["stats"]["problem_solving"], 1);

        let back: CareerProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
