use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use clap::{ArgAction, ArgMatches, Command, arg};
use console::Style;
use grib1::Grib1;

use crate::cli;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Inspect and describes the data structure")
        .arg(
            arg!(-s --sections "Print sections constructing the GRIB messages")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-m --messages "Print messages and skipped data in the input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .after_help(
            "\
This subcommand is mainly targeted at (possible) developers and
engineers, who wants to understand the data structure for the purpose
of debugging, enhancement, and education.\
",
        )
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let file_name = cli::required::<PathBuf>(args, "FILE")?;
    let grib = cli::grib(file_name)?;

    let mut view = InspectView::new();
    if args.get_flag("sections") {
        view.add(InspectItem::Sections(InspectSectionsItem(&grib)));
    }
    if args.get_flag("messages") {
        view.add(InspectItem::Messages(InspectMessagesItem(&grib)));
    }
    if view.items.is_empty() {
        view.add(InspectItem::Sections(InspectSectionsItem(&grib)));
        view.add(InspectItem::Messages(InspectMessagesItem(&grib)));
    }

    cli::display_in_pager(view);
    Ok(())
}

struct InspectView<'i> {
    items: Vec<InspectItem<'i>>,
}

impl<'i> InspectView<'i> {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn add(&mut self, item: InspectItem<'i>) {
        self.items.push(item);
    }

    fn with_headers(&self) -> bool {
        self.items.len() >= 2
    }
}

impl cli::PredictableNumLines for InspectView<'_> {
    fn num_lines(&self) -> usize {
        let mut count = 0;
        for item in self.items.iter() {
            if self.with_headers() {
                count += 1;
            }
            count += item.len();
        }
        count += self.items.len().saturating_sub(1); // empty lines
        count
    }
}

impl Display for InspectView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let with_header = self.with_headers();
        let mut items = self.items.iter().peekable();
        while let Some(item) = items.next() {
            if with_header {
                let yellow = Style::new().yellow().bold();
                let s = format!("{}:", item.title());
                writeln!(f, "{}", yellow.apply_to(s))?;
            }

            match item {
                InspectItem::Sections(item) => write!(f, "{item}")?,
                InspectItem::Messages(item) => write!(f, "{item}")?,
            }

            if items.peek().is_some() {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

enum InspectItem<'i> {
    Sections(InspectSectionsItem<'i>),
    Messages(InspectMessagesItem<'i>),
}

impl InspectItem<'_> {
    fn title(&self) -> &'static str {
        match self {
            InspectItem::Sections(_) => "Sections",
            InspectItem::Messages(_) => "Messages",
        }
    }

    fn len(&self) -> usize {
        match self {
            InspectItem::Sections(item) => item.len(),
            InspectItem::Messages(item) => item.len(),
        }
    }
}

struct InspectSectionsItem<'i>(&'i Grib1);

impl InspectSectionsItem<'_> {
    fn len(&self) -> usize {
        let Self(grib) = self;
        grib.iter().map(|m| m.sections().len()).sum()
    }
}

impl Display for InspectSectionsItem<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self(grib) = self;
        for (i, message) in grib.iter().enumerate() {
            let base = grib.offset(i).unwrap_or_default();
            for sect in message.sections() {
                let start = base + sect.offset;
                writeln!(
                    f,
                    "{:>5} │ {:016x} - {:016x} │ Section {} ({})",
                    i,
                    start,
                    start + sect.size,
                    sect.kind.number(),
                    sect.kind,
                )?
            }
        }
        Ok(())
    }
}

struct InspectMessagesItem<'i>(&'i Grib1);

impl InspectMessagesItem<'_> {
    fn len(&self) -> usize {
        let Self(grib) = self;
        let header_height = 1;
        header_height + grib.len() + grib.skipped().len()
    }
}

impl Display for InspectMessagesItem<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fn presence(present: bool) -> &'static str {
            if present { "yes" } else { "-" }
        }

        let Self(grib) = self;
        let header = format!(
            "{:>5} │ {:>16} {:>8} │ {:>3} {:>3} │ {:<21}",
            "id", "offset", "length", "GDS", "BMS", "grid type",
        );
        let style = Style::new().bold();
        writeln!(f, "{}", style.apply_to(header.trim_end()))?;

        for (i, message) in grib.iter().enumerate() {
            let grid_type = message
                .grid_description()
                .map_or("-", |gd| gd.short_name());
            let line = format!(
                "{:>5} │ {:016x} {:>8} │ {:>3} {:>3} │ {:<21}",
                i,
                grib.offset(i).unwrap_or_default(),
                message.total_length(),
                presence(message.grid_description().is_some()),
                presence(message.bitmap().is_some()),
                grid_type,
            );
            writeln!(f, "{}", line.trim_end())?;
        }
        for skipped in grib.skipped() {
            writeln!(
                f,
                "{:>5} │ {:016x} {:>8} │ skipped GRIB edition {}",
                "-", skipped.offset, skipped.length, skipped.edition,
            )?;
        }
        Ok(())
    }
}
