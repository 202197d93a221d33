use crate::cli::commands::{open_pool, resolve_month};
use crate::cli::parser::Commands;
use crate::cli::render::{print_pay_rows, print_report};
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;

/// Handle the `report` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        month,
        by,
        statements,
    } = cmd
    {
        let month = resolve_month(month)?;
        let group_by = by.unwrap_or(cfg.default_group_by);

        let mut pool = open_pool(cfg)?;

        if *statements {
            let (rows, report) = ReportLogic::statements(&mut pool, month, group_by)?;
            print_pay_rows(&rows, &report, cfg);
        } else {
            let report = ReportLogic::build(&mut pool, month, group_by)?;
            print_report(&report, cfg);
        }
    }

    Ok(())
}
