use std::process;

use log::LevelFilter;
use webpage::assemble::{self, AssemblyReport, Collaborators};
use webpage::host::SystemHost;
use webpage::options::{self, Configuration, Invocation, OptionError};
use webpage::render::CommonMark;
use webpage::stylesheet::FsProbe;
use webpage::{Error, config, output};

fn main() -> process::ExitCode {
    let invocation = match options::parse_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        // Help and version text; clap picks the stream and the exit status.
        Err(OptionError::Display(help)) => help.exit(),
        Err(err) => return fail(err.into()),
    };

    match invocation {
        Invocation::PrintConfig => {
            print!("{}", config::stock_config_toml());
            process::ExitCode::SUCCESS
        }
        Invocation::Build(config) => {
            init_logging(config.verbose);
            output::log_configuration(&config);
            match build(&config) {
                Ok(report) => {
                    output::log_report(&config, &report);
                    process::ExitCode::SUCCESS
                }
                Err(err) => fail(err),
            }
        }
    }
}

/// Build the page in the current working directory.
fn build(config: &Configuration) -> webpage::Result<AssemblyReport> {
    let dir = std::env::current_dir()?;
    let with = Collaborators {
        renderer: &CommonMark,
        host: &SystemHost,
        probe: &FsProbe,
    };
    Ok(assemble::assemble(config, &dir, with)?)
}

/// `-v` turns on debug output; `RUST_LOG` still wins when set.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn fail(err: Error) -> process::ExitCode {
    eprintln!("webpage: {err}");
    process::ExitCode::from(err.exit_code() as u8)
}
