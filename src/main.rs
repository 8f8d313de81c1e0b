mod codec;
mod commands;
mod config;
mod options;
mod output_path;

use std::process;

use structopt::StructOpt;

use crate::options::Options;

fn main() {
    let options = Options::from_args();

    let default_level = if options.global.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    commands::pad(options.global, options.pad)?;

    Ok(())
}
