use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, EmployeeAction, EmployeeFields};
use crate::cli::render::{print_employee, print_employees};
use crate::config::Config;
use crate::core::directory::{DirectoryLogic, ListFilter};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{EmployeePatch, NewEmployee};
use crate::ui::messages::{success, warning};
use crate::ui::prompt::confirm;
use crate::utils::date::{parse_date, today};
use chrono::NaiveDate;

/// Handle the `employee` subcommands
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee { action } = cmd {
        let mut pool = open_pool(cfg)?;

        match action {
            EmployeeAction::Add { fields } => {
                let emp = DirectoryLogic::create(&mut pool, new_employee(fields)?)?;
                success(format!("Employee #{} {} created.", emp.id, emp.full_name()));
                print_employee(&emp, cfg);
            }

            EmployeeAction::Edit { id, fields } => {
                let emp = DirectoryLogic::update(&mut pool, *id, patch(fields)?)?;
                success(format!("Employee #{} updated.", emp.id));
                print_employee(&emp, cfg);
            }

            EmployeeAction::Show { id } => {
                let emp = DirectoryLogic::get(&mut pool, *id)?;
                print_employee(&emp, cfg);
            }

            EmployeeAction::List {
                status,
                division,
                job_title,
                sort,
            } => {
                let filter = ListFilter {
                    status: *status,
                    division: division.clone(),
                    job_title: job_title.clone(),
                    sort: *sort,
                };

                let employees = DirectoryLogic::list(&mut pool, &filter)?;
                if employees.is_empty() {
                    println!("No employees found.");
                } else {
                    print_employees(&employees, cfg);
                }
            }

            EmployeeAction::Del { id, yes } => {
                let emp = DirectoryLogic::get(&mut pool, *id)?;

                if !*yes
                    && !confirm(&format!(
                        "Delete employee #{} {} and all their pay statements?",
                        emp.id,
                        emp.full_name()
                    ))
                {
                    warning("Deletion cancelled.");
                    return Ok(());
                }

                let deleted = DirectoryLogic::delete(&mut pool, *id)?;
                success(format!(
                    "Employee #{} {} deleted.",
                    deleted.id,
                    deleted.full_name()
                ));
            }
        }
    }

    Ok(())
}

fn required(field: &str, value: &Option<String>) -> AppResult<String> {
    value.clone().ok_or_else(|| AppError::InvalidField {
        field: field.to_string(),
        message: "is required".to_string(),
    })
}

fn hire_date(value: &str) -> AppResult<NaiveDate> {
    parse_date(value).ok_or_else(|| AppError::InvalidDate(value.to_string()))
}

fn new_employee(f: &EmployeeFields) -> AppResult<NewEmployee> {
    let hire_date = match &f.hire_date {
        Some(d) => hire_date(d)?,
        None => today(),
    };

    let salary = f.salary.ok_or_else(|| AppError::InvalidField {
        field: "salary".to_string(),
        message: "is required".to_string(),
    })?;

    Ok(NewEmployee {
        first_name: required("first_name", &f.first_name)?,
        last_name: required("last_name", &f.last_name)?,
        ssn: required("ssn", &f.ssn)?,
        email: required("email", &f.email)?,
        phone: f.phone.clone().filter(|p| !p.trim().is_empty()),
        hire_date,
        job_title: required("job_title", &f.job_title)?,
        division: required("division", &f.division)?,
        salary,
        status: f.status.unwrap_or_default(),
    })
}

fn patch(f: &EmployeeFields) -> AppResult<EmployeePatch> {
    Ok(EmployeePatch {
        first_name: f.first_name.clone(),
        last_name: f.last_name.clone(),
        ssn: f.ssn.clone(),
        email: f.email.clone(),
        phone: f.phone.clone(),
        hire_date: f.hire_date.as_deref().map(hire_date).transpose()?,
        job_title: f.job_title.clone(),
        division: f.division.clone(),
        salary: f.salary,
        status: f.status,
    })
}
