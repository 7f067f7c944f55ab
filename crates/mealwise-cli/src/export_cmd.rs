use std::io::Write;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use mealwise_core::calendar::{self, CalendarEvent, ExportOptions};

use crate::plan_file::PlanFile;

/// Export a saved plan's calendar as iCalendar.
pub fn cmd_export(
    plan_path: &Path,
    output: Option<&Path>,
    start_date: Option<NaiveDate>,
    options: &ExportOptions,
) -> anyhow::Result<()> {
    let file = PlanFile::load(plan_path)?;
    let events = calendar::build_events(&file.plan, start_date.unwrap_or(file.start_date));
    write_ics(&events, options, output)
}

/// Write `events` to `output`, or stdout when `None`.
pub fn write_ics(
    events: &[CalendarEvent],
    options: &ExportOptions,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let ics = calendar::to_ics(events, options);

    let mut writer: Box<dyn Write> = if let Some(path) = output {
        Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file: {}", path.display()))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };
    writer.write_all(ics.as_bytes())?;
    writer.flush()?;

    if let Some(path) = output {
        eprintln!("Exported {} events to {}", events.len(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use mealwise_core::{ContextSettings, DietType, Persona, ReminderSettings, UserConstraints, budget, select};
    use mealwise_test_utils::{builtin_catalog, seeded_rng};

    fn saved_plan(dir: &Path) -> std::path::PathBuf {
        let constraints = UserConstraints {
            diet_type: DietType::NoPreference,
            dislikes: vec![],
            pantry_items: vec![],
            locked_ingredients: vec![],
            budget_per_day: 450.0,
            persona: Persona::WorkingProfessional,
            number_of_days: 1,
        };
        let plan = select::select_plan(&builtin_catalog(), &constraints, &mut seeded_rng(2)).unwrap();
        let file = PlanFile {
            context: ContextSettings::for_constraints(&constraints),
            reminders: ReminderSettings::default(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
            budget_status: budget::validate(&plan, constraints.budget_per_day),
            is_fallback: false,
            plan,
            constraints,
        };
        let path = dir.join("plan.json");
        file.save(&path).unwrap();
        path
    }

    #[test]
    fn export_writes_ics_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let plan = saved_plan(tmp.path());
        let out = tmp.path().join("plan.ics");

        cmd_export(&plan, Some(&out), None, &ExportOptions::default()).unwrap();
        let ics = std::fs::read_to_string(&out).unwrap();
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 5);
        assert!(ics.contains("UID:cal-dinner-1-20250721@mealwise"));
    }

    #[test]
    fn start_date_override_moves_events() {
        let tmp = tempfile::TempDir::new().unwrap();
        let plan = saved_plan(tmp.path());
        let out = tmp.path().join("plan.ics");
        let start = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        cmd_export(&plan, Some(&out), Some(start), &ExportOptions::default()).unwrap();
        let ics = std::fs::read_to_string(&out).unwrap();
        assert!(ics.contains("DTSTART:20251231T100000"));
        assert!(ics.contains("DTSTART:20260101T073000"));
    }

    #[test]
    fn unwritable_output_is_reported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let plan = saved_plan(tmp.path());
        let out = tmp.path().join("missing-dir").join("plan.ics");

        let err = cmd_export(&plan, Some(&out), None, &ExportOptions::default()).unwrap_err();
        assert!(
            err.to_string().contains("cannot create output file"),
            "unexpected error: {err}"
        );
    }
}
