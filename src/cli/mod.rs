//! CLI command handlers

pub mod commands;

pub use commands::{
    blank_target, copy, dump, from_xlsx, merge, set_lang, swap_source_target, to_json, to_xlsx,
    FromXlsxOptions, OutputFormat, ToXlsxOptions,
};
