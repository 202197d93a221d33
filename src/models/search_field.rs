use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which employee field a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Case-insensitive substring of first or last name
    Name,
    /// Exact identity number
    Ssn,
    /// Exact numeric employee id
    Id,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Ssn => "ssn",
            SearchField::Id => "id",
        }
    }
}
