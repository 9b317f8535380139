use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use clap::{ArgAction, ArgMatches, Command, arg};
use console::Style;
use grib1::Message;
use regex::Regex;

use crate::cli;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("List layers contained in the data")
        .arg(arg!(-d --dump "Show details of each data").action(ArgAction::SetTrue))
        .arg(
            arg!(-f --filter <PATTERN> "Only list parameters whose name matches the regular expression")
                .required(false),
        )
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let file_name = cli::required::<PathBuf>(args, "FILE")?;
    let grib = cli::grib(file_name)?;

    let filter = args
        .get_one::<String>("filter")
        .map(String::as_str)
        .map(Regex::new)
        .transpose()?;
    let entries = grib
        .iter()
        .enumerate()
        .filter(|(_, message)| {
            filter
                .as_ref()
                .is_none_or(|re| re.is_match(&message.parameter().to_string()))
        })
        .collect::<Vec<_>>();

    let mode = if args.get_flag("dump") {
        ListViewMode::Dump
    } else {
        ListViewMode::OneLine
    };
    let view = ListView::new(entries, mode);
    cli::display_in_pager(view);

    Ok(())
}

struct ListView<'i> {
    data: Vec<(usize, &'i Message)>,
    mode: ListViewMode,
}

impl<'i> ListView<'i> {
    fn new(data: Vec<(usize, &'i Message)>, mode: ListViewMode) -> Self {
        Self { data, mode }
    }
}

impl cli::PredictableNumLines for ListView<'_> {
    fn num_lines(&self) -> usize {
        match self.mode {
            ListViewMode::OneLine => {
                let header_height = 1;
                header_height + self.data.len()
            }
            ListViewMode::Dump => self
                .data
                .iter()
                .map(|(_, message)| message.describe().lines().count() + 2)
                .sum(),
        }
    }
}

impl Display for ListView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.mode {
            ListViewMode::OneLine => {
                let header = format!(
                    "{:>5} │ {:<48} {:>10} {:>8} {:>23} {:>12} │ {:>21} {:<21}",
                    "id",
                    "Parameter",
                    "Level type",
                    "Level",
                    "Reference time",
                    "Forecast",
                    "#points (nan/total)",
                    "grid type",
                );
                let style = Style::new().bold();
                writeln!(f, "{}", style.apply_to(header.trim_end()))?;

                for (i, message) in &self.data {
                    let pd = message.product_definition();
                    let (num_missing, num_points) = match message.bitmap() {
                        Some(bitmap) => {
                            let total = message.num_points().unwrap_or(bitmap.num_bits());
                            let num_present = (0..total).filter(|&i| bitmap.is_set(i)).count();
                            (total - num_present, total)
                        }
                        None => (0, message.num_points().unwrap_or_default()),
                    };
                    let grid_type = message
                        .grid_description()
                        .map_or("-", |gd| gd.short_name());
                    let line = format!(
                        "{:>5} │ {:<48} {:>10} {:>8} {:>23} {:>12} │ {:>10}/{:>10} {:<21}",
                        i,
                        message.parameter().to_string(),
                        pd.level_type,
                        pd.level,
                        message.ref_time().to_string(),
                        message.forecast_time().to_string(),
                        num_missing,
                        num_points,
                        grid_type,
                    );
                    writeln!(f, "{}", line.trim_end())?;
                }
            }
            ListViewMode::Dump => {
                for (i, message) in &self.data {
                    write!(f, "{i}\n{}\n", message.describe())?;
                }
            }
        }

        Ok(())
    }
}

enum ListViewMode {
    OneLine,
    Dump,
}
