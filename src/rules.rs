pub mod api_check;
pub mod matchers;

pub mod removed_apis;

pub use api_check::{ApiCheck, Matcher, Message, Replacement};
pub use removed_apis::RemovedApisLint;
