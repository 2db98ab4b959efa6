//! SkillQuest - Entry Point
//!
//! Command-line front end for inspecting the progression curve and
//! computing awards from scripts.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use skillquest::data::{export_default_config, resolve_config};
use skillquest::input::{parse_level, parse_tag_list, parse_title_xp, parse_xp};
use skillquest::progression::{
    challenge_bonus, project_bonus, project_complexity, tier_label, ActivityType,
    ChallengeDifficulty, ProgressionEngine, ACTIVITY_CONFIGS,
};

#[derive(Parser)]
#[command(name = "skillquest")]
#[command(about = "SkillQuest progression engine - levels, XP awards and titles", long_about = None)]
#[command(version)]
struct Cli {
    /// Progression config file (RON); defaults to the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// XP required to complete a level
    Threshold {
        #[arg(value_parser = parse_level)]
        level: u32,
    },

    /// Resolve a cumulative XP total into level and progress
    Level {
        #[arg(value_parser = parse_xp)]
        total_xp: u64,
    },

    /// Award XP for an activity
    Award {
        /// project, problem_solving, freelancing or learning
        activity: ActivityType,

        /// User's cumulative XP before the award
        #[arg(long, value_parser = parse_xp)]
        total: u64,

        /// Extra XP on top of the activity base
        #[arg(long, default_value = "0", value_parser = parse_xp)]
        bonus: u64,

        /// Challenge difficulty (problem_solving only)
        #[arg(long)]
        difficulty: Option<ChallengeDifficulty>,

        /// Comma-separated tech stack used to score project complexity (project only)
        #[arg(long)]
        tech_stack: Option<String>,
    },

    /// List the activity table
    Activities,

    /// Show titles and tiers held for per-title XP
    Titles {
        /// Comma-separated title=xp pairs, e.g. "creator=600,breaker=40"
        #[arg(long)]
        xp: String,
    },

    /// Write the default config as RON
    ExportConfig { path: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Stderr)
    .init();

    let cli = Cli::parse();
    log::debug!("Starting SkillQuest v{}", env!("CARGO_PKG_VERSION"));

    let engine = ProgressionEngine::new(resolve_config(cli.config.as_deref())?)?;

    match cli.command {
        Commands::Threshold { level } => {
            let xp = engine.xp_for_level(level)?;
            let total = engine.total_xp_for_level(level)?;
            if cli.json {
                print_json(&json!({ "level": level, "xp_for_level": xp, "total_xp_to_reach": total }))?;
            } else {
                println!("Level {}: {} XP to complete ({} XP total to reach)", level, xp, total);
            }
        }
        Commands::Level { total_xp } => {
            let state = engine.level_from_xp(total_xp);
            if cli.json {
                print_json(&json!({ "total_xp": total_xp, "state": state, "rank": state.rank() }))?;
            } else {
                println!(
                    "Level {} ({}) - {}/{} XP ({:.1}%), {} XP to next level",
                    state.level,
                    state.rank().name(),
                    state.xp_in_level,
                    state.xp_to_next,
                    state.progress_percent(),
                    state.xp_remaining()
                );
            }
        }
        Commands::Award { activity, total, bonus, difficulty, tech_stack } => {
            let mut bonus = bonus;
            if let Some(difficulty) = difficulty {
                if activity != ActivityType::ProblemSolving {
                    bail!("--difficulty only applies to problem_solving");
                }
                bonus = bonus.saturating_add(challenge_bonus(difficulty));
            }
            if let Some(raw) = tech_stack {
                if activity != ActivityType::Project {
                    bail!("--tech-stack only applies to project");
                }
                let complexity = project_complexity(&parse_tag_list(&raw));
                bonus = bonus.saturating_add(project_bonus(complexity));
            }

            let gain = engine.award_xp(activity, total, bonus)?;
            let after = engine.level_from_xp(total + gain.xp_earned);
            if cli.json {
                print_json(&json!({ "activity": activity, "result": gain, "after": after }))?;
            } else {
                println!("+{} XP for {}", gain.xp_earned, activity);
                if gain.level_up {
                    println!("Level up! Now level {}", after.level);
                }
                println!("Level {} - {}/{} XP", after.level, after.xp_in_level, after.xp_to_next);
            }
        }
        Commands::Activities => {
            if cli.json {
                print_json(&ACTIVITY_CONFIGS)?;
            } else {
                for config in ACTIVITY_CONFIGS {
                    let stats: Vec<&str> = config.affected_stats.iter().map(|s| s.as_str()).collect();
                    println!(
                        "{:<16} {:>4} XP  title: {:<10} stats: {}",
                        config.activity.as_str(),
                        config.base_xp,
                        config.title.label(),
                        stats.join(", ")
                    );
                }
            }
        }
        Commands::Titles { xp } => {
            let title_xp = parse_title_xp(&xp)?;
            let standings = engine.title_standings(&title_xp);
            if cli.json {
                print_json(&standings)?;
            } else if standings.is_empty() {
                println!("No titles held");
            } else {
                for standing in &standings {
                    let tier = tier_label(standing.tier).unwrap_or("?");
                    println!("{} {} - {}", standing.title.label(), tier, standing.title.description());
                }
            }
        }
        Commands::ExportConfig { path } => {
            export_default_config(&path)?;
            println!("Default config written to {}", path.display());
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
