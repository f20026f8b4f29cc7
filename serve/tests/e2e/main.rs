mod common;

mod execute_ok;
mod executor_error;
mod history;
mod invalid_json;
mod unknown_agent;
