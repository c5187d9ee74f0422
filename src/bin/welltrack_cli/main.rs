// ABOUTME: WellTrack CLI - command-line front end for meal scoring and dietary checks
// ABOUTME: Reads JSON inputs, runs the engine, and prints JSON results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Grade a meal's nutrient totals
//! welltrack-cli score --input meal.json
//!
//! # Check one recipe against a dietary profile
//! welltrack-cli check --profile profile.json --recipe recipe.json --min-score 0.8
//!
//! # Filter a list of recipes, with substitutions and a 500 ms budget
//! welltrack-cli batch --profile profile.json --recipes recipes.json --substitutions --time-budget-ms 500
//!
//! # Use custom reference tables
//! welltrack-cli --reference tables.json check --profile profile.json --recipe recipe.json
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use welltrack::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "welltrack-cli",
    about = "WellTrack nutrition scoring and dietary compatibility",
    long_about = "Grade meals, check recipes against dietary profiles, and filter recipe batches."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Custom reference tables (JSON) replacing the built-in ones
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Grade a meal from its nutrient totals
    Score {
        /// Nutrient profile JSON file
        #[arg(long)]
        input: PathBuf,
    },

    /// Check one recipe against a dietary profile
    Check {
        /// Dietary profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// Recipe JSON file
        #[arg(long)]
        recipe: PathBuf,

        /// Minimum compatibility score (defaults to the configured value)
        #[arg(long)]
        min_score: Option<f64>,

        /// Maximum number of violations
        #[arg(long)]
        max_violations: Option<usize>,
    },

    /// Filter a list of recipes against a dietary profile
    Batch {
        /// Dietary profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// JSON file holding an array of recipes
        #[arg(long)]
        recipes: PathBuf,

        /// Minimum compatibility score (defaults to the configured value)
        #[arg(long)]
        min_score: Option<f64>,

        /// Maximum number of violations
        #[arg(long)]
        max_violations: Option<usize>,

        /// Suggest substitutions for incompatible recipes
        #[arg(long)]
        substitutions: bool,

        /// Time budget in milliseconds
        #[arg(long)]
        time_budget_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;
    info!("WellTrack CLI");

    let context = helpers::EngineContext::load(cli.reference.as_deref())?;

    let output = match cli.command {
        Command::Score { input } => commands::score(&context, &input)?,
        Command::Check {
            profile,
            recipe,
            min_score,
            max_violations,
        } => {
            let criteria = context.criteria(min_score, max_violations);
            commands::check(&context, &profile, &recipe, &criteria)?
        }
        Command::Batch {
            profile,
            recipes,
            min_score,
            max_violations,
            substitutions,
            time_budget_ms,
        } => {
            let criteria = context.criteria(min_score, max_violations);
            commands::batch(
                &context,
                &profile,
                &recipes,
                criteria,
                substitutions,
                time_budget_ms,
            )?
        }
    };

    helpers::print_json(&output)
}
