use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, PayAction};
use crate::cli::render::print_pay_statements;
use crate::config::Config;
use crate::core::payroll::PayrollLogic;
use crate::errors::AppResult;
use crate::models::pay_group::Month;

/// Handle the `pay` subcommands
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pay { action } = cmd {
        match action {
            PayAction::List { employee, month } => {
                let month = month.as_deref().map(Month::parse).transpose()?;

                let mut pool = open_pool(cfg)?;
                let statements = PayrollLogic::list(&mut pool, *employee, month)?;
                print_pay_statements(&statements, cfg);
            }
        }
    }

    Ok(())
}
