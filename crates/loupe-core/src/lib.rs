pub mod assemble;
pub mod resolve;
pub mod types;

pub use self::assemble::{AssembleError, ParsedItem, assemble};
pub use self::resolve::{StatEntry, clean_candidate, resolve_item, resolve_stat};
