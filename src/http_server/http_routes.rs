pub mod healthcheck;
pub mod set_operation;
