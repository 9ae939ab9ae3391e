use std::path::PathBuf;

use super::*;
use crate::cli::commands::{layout_command, names_command};

#[test]
fn layout_extracts_all_flags() {
    let m = layout_command()
        .try_get_matches_from([
            "layout",
            "set.json",
            "-m",
            "pkg.Person",
            "--defaults",
            "defaults.json",
            "--literal",
            "--color",
            "never",
            "-vv",
        ])
        .unwrap();
    let params = LayoutParams::from_matches(&m);

    assert_eq!(params.descriptor_set, PathBuf::from("set.json"));
    assert_eq!(params.message.as_deref(), Some("pkg.Person"));
    assert_eq!(params.defaults, Some(PathBuf::from("defaults.json")));
    assert!(params.literal);
    assert_eq!(params.color, ColorChoice::Never);
    assert_eq!(params.verbose, 2);
}

#[test]
fn layout_defaults() {
    let m = layout_command()
        .try_get_matches_from(["layout", "set.json"])
        .unwrap();
    let params = LayoutParams::from_matches(&m);

    assert_eq!(params.message, None);
    assert_eq!(params.defaults, None);
    assert!(!params.literal);
    assert_eq!(params.color, ColorChoice::Auto);
    assert_eq!(params.verbose, 0);
}

#[test]
fn descriptor_set_is_required() {
    let result = layout_command().try_get_matches_from(["layout"]);
    assert!(result.is_err());

    let result = names_command().try_get_matches_from(["names", "-m", "pkg.Person"]);
    assert!(result.is_err());
}

#[test]
fn names_accepts_stdin_and_color() {
    let m = names_command()
        .try_get_matches_from(["names", "-", "--color", "always", "-v"])
        .unwrap();
    let params = NamesParams::from_matches(&m);

    assert_eq!(params.descriptor_set, PathBuf::from("-"));
    assert_eq!(params.color, ColorChoice::Always);
    assert!(params.color.should_colorize());
    assert_eq!(params.verbose, 1);
}

#[test]
fn rejects_unknown_color() {
    let result = names_command().try_get_matches_from(["names", "set.json", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn help_lists_subcommands() {
    let mut cli = build_cli();
    let help = cli.render_help().to_string();
    assert!(help.contains("layout"));
    assert!(help.contains("names"));
}
