pub mod job_entry;
pub mod search_result;

pub use job_entry::*;
pub use search_result::*;
