pub mod regex;
pub mod line_parser;

pub use line_parser::{LogEvent, classify_line, names_match};
