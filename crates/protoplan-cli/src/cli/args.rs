//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// JSON descriptor set (positional, "-" for stdin).
pub fn descriptor_set_arg() -> Arg {
    Arg::new("descriptor_set")
        .value_name("DESCRIPTOR_SET")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("FileDescriptorSet in JSON form (use \"-\" for stdin)")
}

/// Restrict output to one type (-m/--message).
pub fn message_arg() -> Arg {
    Arg::new("message")
        .short('m')
        .long("message")
        .value_name("NAME")
        .help("Fully-qualified type name to dump (default: all)")
}

/// Feature-set defaults table (--defaults).
pub fn defaults_arg() -> Arg {
    Arg::new("defaults")
        .long("defaults")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Feature set defaults in JSON form (default: built-in table)")
}

/// Also print programs as string literals (--literal).
pub fn literal_arg() -> Arg {
    Arg::new("literal")
        .long("literal")
        .action(ArgAction::SetTrue)
        .help("Also print each program as an escaped string literal")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}
