//! Configuration file management for mealwise.
//!
//! Provides a TOML-based config file at `~/.config/mealwise/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mealwise_catalog::CatalogConfig;
use mealwise_core::calendar::ExportOptions;
use mealwise_core::{
    ContextSettings, DietType, EnergyLevel, Persona, PreferredTime, ReminderSettings,
    UserConstraints, hhmm,
};

use crate::{CatalogArgs, ProfileArgs};

/// Environment variable holding a fixed RNG seed.
pub const SEED_ENV: &str = "MEALWISE_SEED";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

/// Every section is optional; missing keys take the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub profile: ProfileSection,
    pub reminders: RemindersSection,
    pub calendar: CalendarSection,
    pub catalog: CatalogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    pub persona: Persona,
    pub diet: DietType,
    pub budget_per_day: f64,
    pub days: u8,
    pub dislikes: Vec<String>,
    pub pantry: Vec<String>,
    pub locked: Vec<String>,
    pub energy_level: EnergyLevel,
    pub city: String,
    /// Minutes per meal, free text such as `30-60`.
    pub cooking_time_window: String,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            persona: Persona::WorkingProfessional,
            diet: DietType::NoPreference,
            budget_per_day: 400.0,
            days: 2,
            dislikes: Vec::new(),
            pantry: Vec::new(),
            locked: Vec::new(),
            energy_level: EnergyLevel::Medium,
            city: "Delhi".to_owned(),
            cooking_time_window: "30-60".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemindersSection {
    pub preferred_time: PreferredTime,
    /// Dinner start, `HH:MM`.
    pub cooking_window: String,
    pub reminders_per_day: u8,
}

impl Default for RemindersSection {
    fn default() -> Self {
        let settings = ReminderSettings::default();
        Self {
            preferred_time: settings.preferred_time,
            cooking_window: hhmm::format(settings.cooking_window),
            reminders_per_day: settings.reminders_per_day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSection {
    pub name: String,
    pub timezone: Option<String>,
}

impl Default for CalendarSection {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            name: options.calendar_name,
            timezone: options.timezone,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Meal catalog TOML file.
    pub meals: Option<PathBuf>,
    /// Ingredient table TOML file.
    pub ingredients: Option<PathBuf>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the mealwise config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/mealwise` or `~/.config/mealwise`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("mealwise");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("mealwise")
}

/// Return the path to the mealwise config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file. Returns an error if it does not exist.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Load the config file if present, otherwise the defaults.
///
/// A file that exists but does not parse is still an error.
pub fn load_config_or_default(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(ConfigFile::default())
    }
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved planning inputs, ready for use.
#[derive(Debug, Clone)]
pub struct Settings {
    pub constraints: UserConstraints,
    pub context: ContextSettings,
    pub reminders: ReminderSettings,
    pub calendar: ExportOptions,
    pub catalog: CatalogConfig,
}

impl Settings {
    /// Merge profile flags over the config file.
    ///
    /// List flags replace the file's list when given at all. The resulting
    /// constraints are validated before returning.
    pub fn resolve(file: &ConfigFile, args: &ProfileArgs, catalog: &CatalogArgs) -> Result<Self> {
        let profile = &file.profile;
        let persona = args.persona.unwrap_or(profile.persona);
        let number_of_days = args.days.unwrap_or(profile.days);

        let constraints = UserConstraints {
            diet_type: args.diet.unwrap_or(profile.diet),
            dislikes: pick_list(&args.dislikes, &profile.dislikes),
            pantry_items: pick_list(&args.pantry, &profile.pantry),
            locked_ingredients: pick_list(&args.locked, &profile.locked),
            budget_per_day: args.budget.unwrap_or(profile.budget_per_day),
            persona,
            number_of_days,
        };
        constraints.validate().context("invalid planning profile")?;

        let context = ContextSettings {
            persona,
            energy_level: args.energy.unwrap_or(profile.energy_level),
            number_of_days,
            city: args.city.clone().unwrap_or_else(|| profile.city.clone()),
            cooking_time_window: profile.cooking_time_window.clone(),
        };

        let mut reminders = reminder_settings(&file.reminders)?;
        if let Some(window) = args.cooking_window {
            reminders.cooking_window = window;
        }

        Ok(Self {
            constraints,
            context,
            reminders,
            calendar: export_options(&file.calendar),
            catalog: resolve_catalog(&file.catalog, catalog),
        })
    }
}

fn pick_list(flag: &[String], file: &[String]) -> Vec<String> {
    if flag.is_empty() {
        file.to_vec()
    } else {
        flag.to_vec()
    }
}

pub fn reminder_settings(section: &RemindersSection) -> Result<ReminderSettings> {
    let cooking_window = hhmm::parse(&section.cooking_window).with_context(|| {
        format!(
            "reminders.cooking_window must be HH:MM, got {:?}",
            section.cooking_window
        )
    })?;
    Ok(ReminderSettings {
        preferred_time: section.preferred_time,
        cooking_window,
        reminders_per_day: section.reminders_per_day,
    })
}

pub fn export_options(section: &CalendarSection) -> ExportOptions {
    ExportOptions {
        calendar_name: section.name.clone(),
        timezone: section.timezone.clone(),
    }
}

/// Catalog paths: `--catalog`/`--ingredients` > `MEALWISE_CATALOG`/
/// `MEALWISE_INGREDIENTS` > `[catalog]` > embedded data.
pub fn resolve_catalog(section: &CatalogSection, args: &CatalogArgs) -> CatalogConfig {
    let env = CatalogConfig::from_env();
    CatalogConfig::new(
        args.catalog
            .clone()
            .or(env.meals_path)
            .or_else(|| section.meals.clone()),
        args.ingredients
            .clone()
            .or(env.ingredients_path)
            .or_else(|| section.ingredients.clone()),
    )
}

/// Seed: `--seed` > `MEALWISE_SEED` > none (entropy).
pub fn resolve_seed(cli_seed: Option<u64>) -> Result<Option<u64>> {
    if cli_seed.is_some() {
        return Ok(cli_seed);
    }
    match std::env::var(SEED_ENV) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got {raw:?}")),
        Err(_) => Ok(None),
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
