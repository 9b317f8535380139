use clap::{Command, crate_version};
use env_logger::{Builder, Target};

mod cli;
mod commands;

fn app() -> Command {
    Command::new(env!("CARGO_BIN_NAME"))
        .version(crate_version!())
        .arg_required_else_help(true)
        .subcommands(commands::cli())
}

fn real_main() -> anyhow::Result<()> {
    let matches = app().get_matches();

    commands::dispatch(matches)
}

fn main() {
    Builder::from_default_env()
        .target(Target::Stderr)
        .format_timestamp(None)
        .init();

    if let Err(ref e) = real_main() {
        let red = console::Style::new().red();
        eprintln!("{}: {}", red.apply_to("error"), e);
        std::process::exit(1);
    }
}
