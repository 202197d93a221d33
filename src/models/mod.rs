pub mod employee;
pub mod employee_status;
pub mod pay_group;
pub mod pay_statement;
pub mod search_field;
