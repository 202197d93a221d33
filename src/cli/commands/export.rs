use crate::cli::commands::{open_pool, resolve_month};
use crate::cli::parser::{Commands, ExportTarget};
use crate::config::Config;
use crate::core::directory::ListFilter;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::info;

/// Handle the `export` subcommands
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export { what } = cmd {
        let mut pool = open_pool(cfg)?;

        match what {
            ExportTarget::Report {
                month,
                by,
                format,
                file,
                force,
            } => {
                let month = resolve_month(month)?;
                let group_by = by.unwrap_or(cfg.default_group_by);
                let n = ExportLogic::report(&mut pool, month, group_by, *format, file, *force)?;
                if n > 0 {
                    info(format!("{} group(s) of {} written as {}", n, month, format.as_str()));
                }
            }

            ExportTarget::Employees {
                status,
                division,
                format,
                file,
                force,
            } => {
                let filter = ListFilter {
                    status: *status,
                    division: division.clone(),
                    ..ListFilter::default()
                };
                let n = ExportLogic::employees(&mut pool, &filter, *format, file, *force)?;
                if n > 0 {
                    info(format!("{} employee(s) written as {}", n, format.as_str()));
                }
            }
        }
    }

    Ok(())
}
