pub mod brave_search;
pub mod job_scanner;
pub mod open_checker;

pub use brave_search::*;
pub use job_scanner::*;
pub use open_checker::*;
