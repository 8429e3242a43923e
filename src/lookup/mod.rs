pub mod table;

pub use table::{LookupKey, LookupTable, LOOKUP_KEY_DELIMITER};
