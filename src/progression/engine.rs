//! Progression engine bound to a loaded configuration

use std::collections::BTreeMap;

use crate::data::ProgressionConfig;
use crate::error::Result;
use super::activity::{activity_config, award_on_curve, ActivityType, StatKey, XpGainResult};
use super::titles::{title_standings, TitleStanding, TitleType};
use super::xp::{LevelCurve, LevelState, LevelTransition};

/// Stateless calculator over a validated [`ProgressionConfig`]
///
/// Holds no mutable state and can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct ProgressionEngine {
    config: ProgressionConfig,
}

impl ProgressionEngine {
    pub fn new(config: ProgressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine over the built-in constants
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.config.curve
    }

    pub fn xp_for_level(&self, level: u32) -> Result<u64> {
        self.config.curve.xp_for_level(level)
    }

    pub fn total_xp_for_level(&self, level: u32) -> Result<u64> {
        self.config.curve.total_xp_for_level(level)
    }

    pub fn level_from_xp(&self, total_xp: u64) -> LevelState {
        self.config.curve.level_from_xp(total_xp)
    }

    pub fn transition(&self, total_before: u64, gained: u64) -> Result<LevelTransition> {
        self.config.curve.transition(total_before, gained)
    }

    pub fn award_xp(&self, activity: ActivityType, total_xp_before: u64, bonus_xp: u64) -> Result<XpGainResult> {
        award_on_curve(&self.config.curve, activity, total_xp_before, bonus_xp)
    }

    pub fn award_xp_named(&self, activity: &str, total_xp_before: u64, bonus_xp: u64) -> Result<XpGainResult> {
        self.award_xp(activity.parse()?, total_xp_before, bonus_xp)
    }

    /// Stat points each affected stat gains from an award
    pub fn stat_gains(&self, activity: ActivityType, xp_earned: u64) -> Result<Vec<(StatKey, u32)>> {
        Ok(activity_config(activity)?.stat_gains(xp_earned, self.config.stat_xp_unit))
    }

    pub fn tier_for_xp(&self, title_xp: u64) -> Option<u8> {
        self.config.tiers.tier_for_xp(title_xp)
    }

    pub fn title_standings(&self, title_xp: &BTreeMap<TitleType, u64>) -> Vec<TitleStanding> {
        title_standings(title_xp, &self.config.tiers, &self.config.architect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::titles::{ArchitectRule, TierThresholds};

    #[test]
    fn test_standard_engine_matches_free_functions() {
        let engine = ProgressionEngine::standard();
        for total in [0, 99, 100, 5000, 123_456] {
            assert_eq!(engine.level_from_xp(total), crate::progression::level_from_xp(total));
        }
        assert_eq!(
            engine.award_xp(ActivityType::Freelancing, 10, 0),
            crate::progression::award_xp(ActivityType::Freelancing, 10, 0)
        );
    }

    #[test]
    fn test_engine_rejects_zero_stat_unit() {
        let config = ProgressionConfig { stat_xp_unit: 0, ..ProgressionConfig::default() };
        assert!(ProgressionEngine::new(config).is_err());
    }

    #[test]
    fn test_engine_uses_configured_curve_and_tiers() {
        let config = ProgressionConfig {
            curve: LevelCurve::new(10, 2, 1).unwrap(),
            tiers: TierThresholds::new(vec![100, 200]).unwrap(),
            architect: ArchitectRule::new(2).unwrap(),
            stat_xp_unit: 50,
        };
        let engine = ProgressionEngine::new(config).unwrap();

        assert_eq!(engine.xp_for_level(1), Ok(10));
        let gain = engine.award_xp(ActivityType::ProblemSolving, 0, 0).unwrap();
        assert!(gain.level_up);
        assert_eq!(engine.tier_for_xp(150), Some(1));
        assert_eq!(
            engine.stat_gains(ActivityType::Project, 100).unwrap(),
            vec![(StatKey::HandsOn, 2), (StatKey::Depth, 2)]
        );

        let mut xp = BTreeMap::new();
        xp.insert(TitleType::Creator, 250);
        xp.insert(TitleType::Explorer, 120);
        let standings = engine.title_standings(&xp);
        assert_eq!(standings.last().map(|s| (s.title, s.tier)), Some((TitleType::Architect, 1)));
    }
}
