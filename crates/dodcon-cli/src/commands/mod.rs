//! Command implementations.

pub mod check;
pub mod config;
pub mod corpus;
pub mod process;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::corpus::execute_corpus;
pub use self::process::execute_process;
