use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, ImportTarget};
use crate::config::Config;
use crate::core::import::{ImportLogic, ImportSummary};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

/// Handle the `import` subcommands
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { what } = cmd {
        let mut pool = open_pool(cfg)?;

        let (summary, label) = match what {
            ImportTarget::Employees { file } => (
                ImportLogic::employees(&mut pool, &expand_tilde(file))?,
                "employee(s)",
            ),
            ImportTarget::Pay { file } => (
                ImportLogic::pay_statements(&mut pool, &expand_tilde(file))?,
                "pay statement(s)",
            ),
        };

        report(&summary, label);
    }

    Ok(())
}

fn report(summary: &ImportSummary, label: &str) {
    for w in &summary.warnings {
        warning(w);
    }
    success(format!("Imported {} {}.", summary.inserted, label));
}
