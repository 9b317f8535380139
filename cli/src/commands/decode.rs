use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use anyhow::Result;
use clap::{ArgMatches, Command, arg};
use console::Style;
use grib1::{GridValue, Message};

use crate::cli;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Export decoded data")
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(<INDEX> "Message index").value_parser(clap::value_parser!(usize)))
        .arg(
            arg!(-b --"big-endian" <OUT_FILE> "Export as a big-endian flat binary file")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-l --"little-endian" <OUT_FILE> "Export as a little-endian flat binary file")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with("big-endian"),
        )
}

fn write_output(out_path: &PathBuf, values: &[f32], to_bytes: fn(&f32) -> [u8; 4]) -> Result<()> {
    let mut stream = cli::WriteStream::new(out_path)?;
    values
        .iter()
        .try_for_each(|value| stream.write_all(&to_bytes(value)))?;
    stream.flush()?;
    Ok(())
}

pub fn exec(args: &ArgMatches) -> Result<()> {
    let file_name = cli::required::<PathBuf>(args, "FILE")?;
    let grib = cli::grib(file_name)?;
    let index = *cli::required::<usize>(args, "INDEX")?;
    let message = grib
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("no such index: {index}"))?;
    let values = message.values()?;
    log::debug!("decoded {} values from message {index}", values.len());

    if let Some(out_path) = args.get_one::<PathBuf>("big-endian") {
        write_output(out_path, &values, |f| f.to_be_bytes())
    } else if let Some(out_path) = args.get_one::<PathBuf>("little-endian") {
        write_output(out_path, &values, |f| f.to_le_bytes())
    } else {
        let view = DecodeTextView::new(message, values);
        cli::display_in_pager(view);
        Ok(())
    }
}

enum DecodeTextView {
    WithPositions(Vec<GridValue>),
    ValuesOnly(Box<[f32]>),
}

impl DecodeTextView {
    fn new(message: &Message, values: Box<[f32]>) -> Self {
        match message.latlons_and_values() {
            Ok(values) => Self::WithPositions(values),
            Err(e) => {
                log::info!("printing values without positions: {e}");
                Self::ValuesOnly(values)
            }
        }
    }
}

impl cli::PredictableNumLines for DecodeTextView {
    fn num_lines(&self) -> usize {
        let header_height = 1;
        match self {
            Self::WithPositions(values) => header_height + values.len(),
            Self::ValuesOnly(values) => header_height + values.len(),
        }
    }
}

impl Display for DecodeTextView {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let style = Style::new().bold();
        match self {
            Self::WithPositions(values) => {
                let header = format!("{:>12} {:>12} {:>14}", "Latitude", "Longitude", "Value");
                writeln!(f, "{}", style.apply_to(header))?;
                for v in values {
                    writeln!(
                        f,
                        "{:>12.3} {:>12.3} {:>14}",
                        v.latitude, v.longitude, v.value
                    )?;
                }
            }
            Self::ValuesOnly(values) => {
                let header = format!("{:>8} {:>14}", "#", "Value");
                writeln!(f, "{}", style.apply_to(header))?;
                for (i, value) in values.iter().enumerate() {
                    writeln!(f, "{i:>8} {value:>14}")?;
                }
            }
        }
        Ok(())
    }
}
