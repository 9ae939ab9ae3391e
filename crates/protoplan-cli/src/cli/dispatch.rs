//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::layout::LayoutArgs;
use crate::commands::names::NamesArgs;

pub struct LayoutParams {
    pub descriptor_set: PathBuf,
    pub message: Option<String>,
    pub defaults: Option<PathBuf>,
    pub literal: bool,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl LayoutParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            descriptor_set: descriptor_set(m),
            message: m.get_one::<String>("message").cloned(),
            defaults: m.get_one::<PathBuf>("defaults").cloned(),
            literal: m.get_flag("literal"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<LayoutParams> for LayoutArgs {
    fn from(p: LayoutParams) -> Self {
        Self {
            descriptor_set: p.descriptor_set,
            message: p.message,
            defaults: p.defaults,
            literal: p.literal,
            color: p.color.should_colorize(),
        }
    }
}

pub struct NamesParams {
    pub descriptor_set: PathBuf,
    pub message: Option<String>,
    pub defaults: Option<PathBuf>,
    pub literal: bool,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl NamesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            descriptor_set: descriptor_set(m),
            message: m.get_one::<String>("message").cloned(),
            defaults: m.get_one::<PathBuf>("defaults").cloned(),
            literal: m.get_flag("literal"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<NamesParams> for NamesArgs {
    fn from(p: NamesParams) -> Self {
        Self {
            descriptor_set: p.descriptor_set,
            type_name: p.message,
            defaults: p.defaults,
            literal: p.literal,
            color: p.color.should_colorize(),
        }
    }
}

// Required by the arg definition, so clap rejects the command line first.
fn descriptor_set(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("descriptor_set")
        .cloned()
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
