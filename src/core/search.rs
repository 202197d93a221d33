use crate::db::employees::{self, EmployeeSort};
use crate::db::filter::{Column, Filter};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::search_field::SearchField;

/// Employee search by name, identity number or numeric id.
pub struct SearchLogic;

impl SearchLogic {
    /// Translate `(term, field)` into store filters.
    ///
    /// A non-numeric term for [`SearchField::Id`] is rejected here, before
    /// any query reaches the store.
    pub fn filters_for(term: &str, field: SearchField) -> AppResult<Vec<Filter>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::InvalidSearchTerm(
                "search term must not be empty".to_string(),
            ));
        }

        let filter = match field {
            SearchField::Name => Filter::Or(vec![
                Filter::contains(Column::FirstName, term),
                Filter::contains(Column::LastName, term),
            ]),
            SearchField::Ssn => Filter::eq(Column::Ssn, term.to_string()),
            SearchField::Id => {
                let id: i64 = term
                    .parse()
                    .map_err(|_| AppError::InvalidEmployeeId(term.to_string()))?;
                Filter::eq(Column::EmployeeId, id)
            }
        };

        Ok(vec![filter])
    }

    /// Run a search. `Ok(vec![])` means nothing matched; a store failure is
    /// always an `Err`.
    pub fn search(pool: &mut DbPool, term: &str, field: SearchField) -> AppResult<Vec<Employee>> {
        let filters = Self::filters_for(term, field)?;
        employees::select(&pool.conn, &filters, EmployeeSort::Name)
    }
}
