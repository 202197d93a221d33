use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::cli::render::print_employees;
use crate::config::Config;
use crate::core::search::SearchLogic;
use crate::errors::AppResult;

/// Handle the `search` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Search { term, by } = cmd {
        let field = by.unwrap_or(cfg.default_search_field);

        let mut pool = open_pool(cfg)?;
        let found = SearchLogic::search(&mut pool, term, field)?;

        if found.is_empty() {
            println!("No employees match '{}' by {}.", term.trim(), field.as_str());
        } else {
            print_employees(&found, cfg);
        }
    }

    Ok(())
}
