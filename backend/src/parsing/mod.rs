//! Input normalization.

pub mod json_parser;

pub use json_parser::{parse_directory_file, parse_directory_str, parse_record};
