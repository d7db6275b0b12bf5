//! Riskmatrix CLI - EHS risk assessment tool

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output: identical input yields identical output
// - All engine work happens in riskmatrix-core; this binary only parses
//   arguments and renders results

use anyhow::Context;
use clap::{Parser, Subcommand};
use riskmatrix_core::report::{render_intent_json, render_intent_text};
use riskmatrix_core::{
    assess_with_policy, config, intent, recommend, render_json, render_text, AggregationPolicy,
    RiskAssessmentInput, SeverityCategory, SeverityRatings,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "riskmatrix")]
#[command(about = "EHS risk scoring: severity/likelihood assessment, chat intent classification, corrective-action suggestions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a risk from per-category severity ratings and a likelihood
    Assess {
        /// Severity for people (0-10)
        #[arg(long, default_value = "0")]
        people: i32,

        /// Severity for environment (0-10)
        #[arg(long, default_value = "0")]
        environment: i32,

        /// Severity for cost (0-10)
        #[arg(long, default_value = "0")]
        cost: i32,

        /// Severity for reputation (0-10)
        #[arg(long, default_value = "0")]
        reputation: i32,

        /// Severity for legal (0-10)
        #[arg(long, default_value = "0")]
        legal: i32,

        /// Likelihood of recurrence (0-10)
        #[arg(long)]
        likelihood: i32,

        /// Hazard description; also used to suggest a corrective action
        #[arg(long)]
        free_text: Option<String>,

        /// Aggregation policy (overrides config file)
        #[arg(long)]
        policy: Option<PolicyArg>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Classify the intent of a chat message
    Chat {
        /// The message to classify
        message: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Suggest a corrective action for a hazard description
    Recommend {
        /// Hazard description
        description: String,

        /// Root-cause note (repeatable)
        #[arg(long = "note")]
        notes: Vec<String>,
    },
    /// Print the severity and likelihood tier tables
    Scales {
        /// Limit output to one category (people, environment, cost, reputation, legal)
        #[arg(long)]
        category: Option<String>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or inspect a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running an assessment
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PolicyArg {
    MaxSeverity,
    WeightedCategory,
}

impl From<PolicyArg> for AggregationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::MaxSeverity => AggregationPolicy::MaxSeverity,
            PolicyArg::WeightedCategory => AggregationPolicy::WeightedCategory,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            people,
            environment,
            cost,
            reputation,
            legal,
            likelihood,
            free_text,
            policy,
            format,
            config: config_path,
        } => {
            let project_root = std::env::current_dir()?;
            let resolved = config::load_and_resolve(&project_root, config_path.as_deref())
                .context("failed to load configuration")?;

            if let Some(path) = &resolved.config_path {
                eprintln!("Using config: {}", path.display());
            }

            // CLI flag overrides the config file value
            let effective_policy = policy.map(AggregationPolicy::from).unwrap_or(resolved.policy);

            let input = RiskAssessmentInput {
                severity: SeverityRatings {
                    people,
                    environment,
                    cost,
                    reputation,
                    legal,
                },
                likelihood,
                free_text,
            };

            let result = assess_with_policy(&input, effective_policy);

            match format {
                OutputFormat::Text => {
                    let text = render_text(&result, &input, &resolved.registry)
                        .context("failed to render assessment")?;
                    print!("{}", text);
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&result));
                }
            }
        }
        Commands::Chat { message, format } => {
            let result = intent::classify(&message);
            match format {
                OutputFormat::Text => print!("{}", render_intent_text(&result)),
                OutputFormat::Json => println!("{}", render_intent_json(&result)),
            }
        }
        Commands::Recommend { description, notes } => {
            println!("{}", recommend::suggest(&description, &notes));
        }
        Commands::Scales {
            category,
            config: config_path,
        } => {
            let project_root = std::env::current_dir()?;
            let resolved = config::load_and_resolve(&project_root, config_path.as_deref())
                .context("failed to load configuration")?;

            let categories: Vec<SeverityCategory> = match category.as_deref() {
                Some(name) => vec![parse_category(name)?],
                None => SeverityCategory::ALL.to_vec(),
            };

            for category in categories {
                println!("{}:", category.as_str());
                for tier in resolved
                    .registry
                    .severity_tiers(category)
                    .context("registry lookup failed")?
                {
                    println!("  {:>2}  {:<22} {}", tier.score, tier.label, tier.description);
                }
                println!();
            }

            if category.is_none() {
                println!("likelihood:");
                for tier in resolved.registry.likelihood_tiers() {
                    let frequency = tier.frequency.as_deref().unwrap_or("-");
                    println!(
                        "  {:>2}  {:<22} {} ({})",
                        tier.score, tier.label, tier.description, frequency
                    );
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                match config::load_and_resolve(&project_root, path.as_deref()) {
                    Ok(resolved) => {
                        if let Some(p) = &resolved.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;

                println!("Configuration:");
                if let Some(p) = &resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("Policy: {}", resolved.policy.as_str());
                println!();
                println!("Priority thresholds:");
                println!("  medium:   {}", riskmatrix_core::priority::MEDIUM_MIN);
                println!("  high:     {}", riskmatrix_core::priority::HIGH_MIN);
                println!("  critical: {}", riskmatrix_core::priority::CRITICAL_MIN);
            }
        },
    }

    Ok(())
}

/// Parse a category name as accepted by `--category`.
fn parse_category(name: &str) -> anyhow::Result<SeverityCategory> {
    SeverityCategory::ALL
        .into_iter()
        .find(|c| c.as_str() == name.to_lowercase())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "unknown category '{}' (expected one of: people, environment, cost, reputation, legal)",
                name
            )
        })
}
