//! Terminal rendering of employees, reports and adjustments.

use crate::config::Config;
use crate::core::adjust::Adjustment;
use crate::core::report::PayReport;
use crate::models::employee::Employee;
use crate::models::pay_statement::{PayRow, PayStatement};
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, RESET, color_for_delta, color_for_status, colorize_optional};
use crate::utils::formatting::{bold, format_amount, format_delta, format_money};
use crate::utils::table::{Column, Table};

pub fn print_employees(employees: &[Employee], cfg: &Config) {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::left("Email"),
        Column::left("Job title"),
        Column::left("Division"),
        Column::right("Salary"),
        Column::left("Status"),
    ])
    .with_separator(&cfg.separator_char);

    for e in employees {
        table.add_row(vec![
            e.id.to_string(),
            e.full_name(),
            e.email.clone(),
            e.job_title.clone(),
            e.division.clone(),
            format_amount(e.salary),
            format!(
                "{}{}{}",
                color_for_status(e.status),
                e.status.to_db_str(),
                RESET
            ),
        ]);
    }

    print!("{}", table.render());
    println!("{} employee(s)", employees.len());
}

pub fn print_employee(e: &Employee, cfg: &Config) {
    let line = |label: &str, value: String| println!("{CYAN}{:<12}{RESET} {}", label, value);

    println!("{}", bold(&format!("#{} {}", e.id, e.full_name())));
    line("SSN", e.ssn.clone());
    line("Email", e.email.clone());
    line(
        "Phone",
        colorize_optional(e.phone.as_deref().unwrap_or_default()),
    );
    line("Hired", e.hire_date_str());
    line("Job title", e.job_title.clone());
    line("Division", e.division.clone());
    line("Salary", format_money(e.salary, &cfg.currency));
    line(
        "Status",
        format!("{}{}{}", color_for_status(e.status), e.status.to_db_str(), RESET),
    );
    line("Created", e.created_at.clone());
    line("Updated", e.updated_at.clone());
}

pub fn print_report(report: &PayReport, cfg: &Config) {
    header(format!(
        "Pay by {} for {}",
        report.group_by.label().to_lowercase(),
        report.month
    ));

    if report.is_empty() {
        println!("No pay data for {}.", report.month);
        return;
    }

    let mut table = Table::new(vec![
        Column::left(report.group_by.label()),
        Column::right(&format!("Total pay ({})", cfg.currency)),
        Column::right("Statements"),
        Column::right("Average"),
    ])
    .with_separator(&cfg.separator_char);

    for g in &report.groups {
        table.add_row(vec![
            g.key.clone(),
            format_amount(g.total_pay),
            g.employee_count.to_string(),
            g.average().to_string(),
        ]);
    }

    let total = report.grand_total();
    table.set_footer(vec![
        total.key.clone(),
        format_amount(total.total_pay),
        total.employee_count.to_string(),
        total.average().to_string(),
    ]);

    print!("{}", table.render());
}

pub fn print_pay_rows(rows: &[PayRow], report: &PayReport, cfg: &Config) {
    let mut table = Table::new(vec![
        Column::right("Stmt"),
        Column::left("Employee"),
        Column::left(report.group_by.label()),
        Column::left("Period"),
        Column::right("Gross"),
    ])
    .with_separator(&cfg.separator_char);

    for r in rows {
        table.add_row(vec![
            r.statement_id.to_string(),
            r.employee_name.clone(),
            report.group_by.key_of(r).to_string(),
            format!("{} → {}", r.period_start, r.period_end),
            format_amount(r.gross_pay),
        ]);
    }

    if !rows.is_empty() {
        print!("{}", table.render());
        println!();
    }

    print_report(report, cfg);
}

pub fn print_pay_statements(statements: &[PayStatement], cfg: &Config) {
    if statements.is_empty() {
        println!("No pay statements found.");
        return;
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::right("Employee"),
        Column::left("Period"),
        Column::right("Gross"),
        Column::right("Deductions"),
        Column::right("Net"),
    ])
    .with_separator(&cfg.separator_char);

    for s in statements {
        table.add_row(vec![
            s.id.to_string(),
            s.employee_id.to_string(),
            format!("{} → {}", s.period_start, s.period_end),
            format_amount(s.gross_pay),
            format_amount(s.deductions),
            format_amount(s.net_pay),
        ]);
    }

    print!("{}", table.render());
    println!("{} statement(s)", statements.len());
}

pub fn print_adjustment(adj: &Adjustment, cfg: &Config) {
    if !adj.changes.is_empty() {
        let mut table = Table::new(vec![
            Column::right("ID"),
            Column::left("Name"),
            Column::right("Old salary"),
            Column::right("New salary"),
            Column::right("Change"),
        ])
        .with_separator(&cfg.separator_char);

        for c in &adj.changes {
            table.add_row(vec![
                c.employee_id.to_string(),
                c.name.clone(),
                format_amount(c.old_salary),
                format_amount(c.new_salary),
                format!(
                    "{}{}{}",
                    color_for_delta(c.delta()),
                    format_delta(c.delta()),
                    RESET
                ),
            ]);
        }

        print!("{}", table.render());
    }
}
