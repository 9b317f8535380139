use anyhow::Result;
use clap::{ArgAction, ArgMatches, Command, arg};
use clap_complete::{Generator, Shell, generate};

use crate::cli;

pub(crate) fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Generate shell completions for your shell to stdout")
        .arg(
            arg!(<SHELL> "The shell to generate completions for")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(Shell)),
        )
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut std::io::stdout());
}

pub(crate) fn exec(args: &ArgMatches) -> Result<()> {
    let generator = *cli::required::<Shell>(args, "SHELL")?;
    let mut cmd = crate::app();
    print_completions(generator, &mut cmd);

    Ok(())
}
