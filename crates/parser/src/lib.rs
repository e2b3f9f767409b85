// parser crate

pub mod loader;
pub mod rules;

pub use loader::{load_record, load_rule_spec, parse_record, parse_rule_spec, Format, ParseError};
pub use rules::{parse_rules, ParsedRule};
