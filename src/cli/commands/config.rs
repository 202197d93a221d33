use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

use crate::cli::parser::Commands;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", ConfigLogic::render(cfg)?);
        }

        // ---- CHECK ----
        if *check {
            let missing = ConfigLogic::check(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!(
                    "Missing fields: {} (run `hrledger config --migrate`)",
                    missing.join(", ")
                ));
            }
        }

        // ---- MIGRATE ----
        if *migrate {
            match ConfigLogic::migrate(&path)? {
                0 => success("Configuration file already up to date."),
                n => success(format!("Added {} missing field(s) to {}", n, path.display())),
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let used = ConfigLogic::edit(&path, editor)?;
            success(format!(
                "Configuration file edited successfully using '{}'",
                used
            ));
        }
    }

    Ok(())
}
