//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("protoplan")
        .about("Message layout and name-table compiler for protobuf descriptors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(layout_command())
        .subcommand(names_command())
}

/// Dump per-target layout programs.
pub fn layout_command() -> Command {
    Command::new("layout")
        .about("Show message layouts for each pointer width")
        .override_usage(
            "\
  protoplan layout <DESCRIPTOR_SET>
  protoplan layout <DESCRIPTOR_SET> -m <NAME>",
        )
        .after_help(
            r#"EXAMPLES:
  protoplan layout set.json                    # every message
  protoplan layout set.json -m pkg.Person      # one message
  protoplan layout set.json --literal          # include program literals
  protoc -o /dev/stdout ... | protoplan layout -"#,
        )
        .arg(descriptor_set_arg())
        .arg(message_arg())
        .arg(defaults_arg())
        .arg(literal_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Dump name tables of messages and enums.
pub fn names_command() -> Command {
    Command::new("names")
        .about("Show proto/JSON name tables of messages and enums")
        .override_usage(
            "\
  protoplan names <DESCRIPTOR_SET>
  protoplan names <DESCRIPTOR_SET> -m <NAME>",
        )
        .after_help(
            r#"EXAMPLES:
  protoplan names set.json                     # every message and enum
  protoplan names set.json -m pkg.Status       # one message or enum"#,
        )
        .arg(descriptor_set_arg())
        .arg(message_arg())
        .arg(defaults_arg())
        .arg(literal_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
