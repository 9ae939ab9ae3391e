mod cli;
mod commands;

use tracing_subscriber::{EnvFilter, fmt};

use cli::{LayoutParams, NamesParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("layout", m)) => {
            let params = LayoutParams::from_matches(m);
            init_logging(params.verbose);
            commands::layout::run(params.into());
        }
        Some(("names", m)) => {
            let params = NamesParams::from_matches(m);
            init_logging(params.verbose);
            commands::names::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
