pub mod employees;
pub mod filter;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pay_statements;
pub mod pool;
pub mod stats;
