use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use clap::{ArgMatches, Command, arg};
use grib1::{Grib1, Message};

use crate::cli;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Show product information of each message")
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let file_name = cli::required::<PathBuf>(args, "FILE")?;
    let grib = cli::grib(file_name)?;
    cli::display_in_pager(InfoView(&grib));
    Ok(())
}

struct InfoView<'i>(&'i Grib1);

impl cli::PredictableNumLines for InfoView<'_> {
    fn num_lines(&self) -> usize {
        let Self(grib) = self;
        grib.iter().map(|m| m.describe().lines().count() + 5).sum()
    }
}

impl Display for InfoView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self(grib) = self;
        for (index, message) in grib.iter().enumerate() {
            let offset = grib.offset(index).unwrap_or_default();
            write!(f, "{}", MessageInfo(index, offset, message))?;
        }
        Ok(())
    }
}

struct MessageInfo<'i>(usize, usize, &'i Message);

impl Display for MessageInfo<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self(index, offset, message) = self;
        write!(
            f,
            "\
Message {}

    Offset:                                 {}
    Total Length:                           {}
",
            index,
            offset,
            message.total_length(),
        )?;
        for line in message.describe().lines() {
            writeln!(f, "    {line}")?;
        }
        writeln!(f)
    }
}
