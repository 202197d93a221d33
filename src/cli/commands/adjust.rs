use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::cli::render::print_adjustment;
use crate::config::Config;
use crate::core::adjust::{AdjustLogic, SalaryRange, validate_percentage};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;

/// Handle the `adjust` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Adjust {
        percent,
        min,
        max,
        dry_run,
        yes,
    } = cmd
    {
        validate_percentage(*percent)?;
        let range = SalaryRange::new(*min, *max)?;

        let mut pool = open_pool(cfg)?;

        let ask = !*dry_run && !*yes && cfg.confirm_bulk_updates;

        if *dry_run || ask {
            let preview = AdjustLogic::apply(&mut pool, *percent, range, true)?;
            print_adjustment(&preview, cfg);

            if *dry_run {
                info(preview.summary());
                return Ok(());
            }
            info(format!("Preview: {}", preview.describe()));
            if preview.affected() == 0 {
                return Ok(());
            }
            if !confirm(&format!(
                "Apply +{}% to {} employee(s)?",
                percent,
                preview.affected()
            )) {
                warning("Adjustment cancelled, no salary was changed.");
                return Ok(());
            }
        }

        let applied = AdjustLogic::apply(&mut pool, *percent, range, false)?;
        if !ask {
            print_adjustment(&applied, cfg);
        }
        success(applied.summary());
    }

    Ok(())
}
