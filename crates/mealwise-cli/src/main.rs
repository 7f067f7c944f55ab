mod catalog_cmds;
mod config;
mod export_cmd;
mod plan_cmds;
mod plan_file;
mod render;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, CommandFactory, Parser, Subcommand};

use mealwise_catalog::MealSlot;
use mealwise_core::{DietType, EnergyLevel, OptimizeFor, Persona, hhmm};

use config::{ConfigFile, Settings};
use plan_cmds::{PlanOptions, SwapRequest};
use render::OutputFormat;

#[derive(Parser)]
#[command(name = "mealwise", about = "Constraint-driven meal planner")]
struct Cli {
    /// Config file path (defaults to ~/.config/mealwise/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Catalog file overrides shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct CatalogArgs {
    /// Meal catalog TOML file (overrides MEALWISE_CATALOG env var)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    /// Ingredient table TOML file (overrides MEALWISE_INGREDIENTS env var)
    #[arg(long, global = true)]
    pub ingredients: Option<PathBuf>,
}

/// Planning profile flags; each overrides the `[profile]` config section.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    /// working-professional, student, or household
    #[arg(long)]
    pub persona: Option<Persona>,
    /// veg, non-veg, or no-preference
    #[arg(long)]
    pub diet: Option<DietType>,
    /// Daily budget in rupees
    #[arg(long)]
    pub budget: Option<f64>,
    /// Number of days to plan (1-3)
    #[arg(long)]
    pub days: Option<u8>,
    /// Disliked ingredient (repeatable or comma-separated)
    #[arg(long = "dislike", value_delimiter = ',')]
    pub dislikes: Vec<String>,
    /// Ingredient already at home (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub pantry: Vec<String>,
    /// Ingredient the plan should favour (repeatable or comma-separated)
    #[arg(long = "lock", value_delimiter = ',')]
    pub locked: Vec<String>,
    /// low, medium, or high
    #[arg(long)]
    pub energy: Option<EnergyLevel>,
    #[arg(long)]
    pub city: Option<String>,
    /// Dinner start time, HH:MM
    #[arg(long, value_parser = parse_hhmm)]
    pub cooking_window: Option<NaiveTime>,
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, String> {
    hhmm::parse(s).map_err(|e| format!("expected HH:MM: {e}"))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a mealwise config file with default settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a meal plan with its grocery list, reminders, and calendar
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,
        /// RNG seed for a reproducible plan (overrides MEALWISE_SEED env var)
        #[arg(long)]
        seed: Option<u64>,
        /// Re-optimize every slot after generating: cheapest, fastest, or protein
        #[arg(long)]
        optimize: Option<OptimizeFor>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Save the plan as JSON for later swap, reoptimize, and export
        #[arg(long)]
        save: Option<PathBuf>,
        /// Also write the calendar as an .ics file
        #[arg(long)]
        ics: Option<PathBuf>,
        /// Shopping and prep day, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    /// Replace one meal in a saved plan and rewrite the file
    Swap {
        /// Plan JSON written by `mealwise plan --save`
        file: PathBuf,
        #[arg(long)]
        day: u8,
        /// breakfast, lunch, or dinner
        #[arg(long)]
        slot: MealSlot,
        /// Prefer cheapest, fastest, or protein alternatives
        #[arg(long)]
        optimize: Option<OptimizeFor>,
        /// RNG seed (overrides MEALWISE_SEED env var)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Re-optimize every meal in a saved plan and rewrite the file
    Reoptimize {
        /// Plan JSON written by `mealwise plan --save`
        file: PathBuf,
        /// cheapest, fastest, or protein
        #[arg(long = "for", value_name = "GOAL")]
        goal: OptimizeFor,
        /// RNG seed (overrides MEALWISE_SEED env var)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Export a saved plan's calendar as iCalendar
    Export {
        /// Plan JSON written by `mealwise plan --save`
        file: PathBuf,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Override the start date stored in the plan file
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    /// Browse the meal catalog and ingredient table
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List meals, optionally for one slot
    Meals {
        #[arg(long)]
        slot: Option<MealSlot>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List ingredients by category, or autocomplete a prefix
    Ingredients {
        /// Case-insensitive name prefix
        #[arg(long)]
        prefix: Option<String>,
        /// Maximum suggestions for --prefix
        #[arg(long, default_value_t = mealwise_catalog::ingredients::DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },
}

/// Execute the `mealwise init` command: write config file.
fn cmd_init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = ConfigFile::default();
    config::save_config(&cfg, path)?;

    println!("Config written to {}", path.display());
    println!("  profile.persona = {}", cfg.profile.persona);
    println!("  profile.diet = {}", cfg.profile.diet);
    println!("  profile.budget_per_day = {}", cfg.profile.budget_per_day);
    println!("  profile.days = {}", cfg.profile.days);
    println!();
    println!("Next: add pantry and locked ingredients, then run `mealwise plan`.");

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config::config_path);

    match cli.command {
        Commands::Init { force } => {
            cmd_init(&config_path, force)?;
        }
        Commands::Plan {
            profile,
            seed,
            optimize,
            format,
            save,
            ics,
            start_date,
        } => {
            let file = config::load_config_or_default(&config_path)?;
            let settings = Settings::resolve(&file, &profile, &cli.catalog)?;
            let options = PlanOptions {
                seed: config::resolve_seed(seed)?,
                optimize,
                format,
                save,
                ics,
                start_date: start_date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            };
            plan_cmds::cmd_plan(&settings, &options)?;
        }
        Commands::Swap {
            file: plan_path,
            day,
            slot,
            optimize,
            seed,
            format,
        } => {
            let file = config::load_config_or_default(&config_path)?;
            let catalog = config::resolve_catalog(&file.catalog, &cli.catalog);
            let request = SwapRequest {
                day,
                slot,
                optimize,
            };
            let seed = config::resolve_seed(seed)?;
            plan_cmds::cmd_swap(&catalog, &plan_path, &request, seed, format)?;
        }
        Commands::Reoptimize {
            file: plan_path,
            goal,
            seed,
            format,
        } => {
            let file = config::load_config_or_default(&config_path)?;
            let catalog = config::resolve_catalog(&file.catalog, &cli.catalog);
            let seed = config::resolve_seed(seed)?;
            plan_cmds::cmd_reoptimize(&catalog, &plan_path, goal, seed, format)?;
        }
        Commands::Export {
            file: plan_path,
            output,
            start_date,
        } => {
            let file = config::load_config_or_default(&config_path)?;
            let options = config::export_options(&file.calendar);
            export_cmd::cmd_export(&plan_path, output.as_deref(), start_date, &options)?;
        }
        Commands::Catalog { command } => {
            let file = config::load_config_or_default(&config_path)?;
            let catalog = config::resolve_catalog(&file.catalog, &cli.catalog);
            catalog_cmds::run_catalog_command(command, &catalog)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "mealwise", &mut std::io::stdout());
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_flags_parse() {
        let cli = Cli::try_parse_from([
            "mealwise",
            "plan",
            "--persona",
            "student",
            "--diet",
            "veg",
            "--budget",
            "350",
            "--lock",
            "Rice,Lentils",
            "--lock",
            "Onion",
            "--cooking-window",
            "19:15",
            "--format",
            "json",
            "--start-date",
            "2025-02-10",
        ])
        .unwrap();
        let Commands::Plan {
            profile,
            format,
            start_date,
            ..
        } = cli.command
        else {
            panic!("expected plan command");
        };
        assert_eq!(profile.persona, Some(Persona::Student));
        assert_eq!(profile.diet, Some(DietType::Veg));
        assert_eq!(profile.budget, Some(350.0));
        assert_eq!(profile.locked, vec!["Rice", "Lentils", "Onion"]);
        assert_eq!(profile.cooking_window, NaiveTime::from_hms_opt(19, 15, 0));
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(start_date, NaiveDate::from_ymd_opt(2025, 2, 10));
    }

    #[test]
    fn bad_enum_values_are_rejected() {
        let err = Cli::try_parse_from(["mealwise", "plan", "--diet", "vegan"])
            .err()
            .unwrap();
        assert!(
            err.to_string().contains("invalid diet type"),
            "unexpected error: {err}"
        );
        assert!(Cli::try_parse_from(["mealwise", "swap", "p.json", "--day", "1", "--slot", "brunch"]).is_err());
        assert!(Cli::try_parse_from(["mealwise", "plan", "--cooking-window", "7pm"]).is_err());
    }

    #[test]
    fn global_catalog_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mealwise",
            "catalog",
            "meals",
            "--catalog",
            "/tmp/meals.toml",
        ])
        .unwrap();
        assert_eq!(cli.catalog.catalog, Some(PathBuf::from("/tmp/meals.toml")));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("mealwise").join("config.toml");

        cmd_init(&path, false).unwrap();
        assert!(path.exists());

        let err = cmd_init(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"), "unexpected error: {err}");
        cmd_init(&path, true).unwrap();
        assert_eq!(config::load_config(&path).unwrap(), ConfigFile::default());
    }
}
