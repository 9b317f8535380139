use std::{
    any::Any,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use clap::ArgMatches;
use grib1::{Grib1, LogObserver, ReadOptions};
#[cfg(unix)]
use pager::Pager;
#[cfg(unix)]
use which::which;

pub fn grib<P>(path: P) -> anyhow::Result<Grib1>
where
    P: AsRef<Path>,
{
    let mut buf = Vec::with_capacity(4096);
    if is_dash(&path) {
        let mut stdin = std::io::stdin();
        stdin.read_to_end(&mut buf)?;
    } else {
        let f = File::open(path)?;
        let mut f = BufReader::new(f);
        f.read_to_end(&mut buf)?;
    };
    let grib = grib1::from_bytes_with_observer(&buf, &ReadOptions::default(), &mut LogObserver)?;

    if grib.is_empty() {
        anyhow::bail!("empty GRIB1 data")
    }
    Ok(grib)
}

pub(crate) fn required<'a, T>(args: &'a ArgMatches, id: &str) -> anyhow::Result<&'a T>
where
    T: Any + Clone + Send + Sync + 'static,
{
    args.try_get_one::<T>(id)?
        .ok_or_else(|| anyhow::anyhow!("argument {id} is missing"))
}

pub(crate) fn display_in_pager<V>(view: V)
where
    V: PredictableNumLines + std::fmt::Display,
{
    let user_attended = console::user_attended();

    let term = console::Term::stdout();
    let (height, _width) = term.size();
    if user_attended && view.num_lines() > height.into() {
        start_pager();
    }

    if user_attended {
        console::set_colors_enabled(true);
    }

    print!("{view}");
}

pub(crate) trait PredictableNumLines {
    fn num_lines(&self) -> usize;
}

#[cfg(unix)]
fn start_pager() {
    if which("less").is_ok() {
        Pager::with_pager("less -R").setup();
    } else {
        Pager::new().setup();
    }
}

#[cfg(not(unix))]
fn start_pager() {}

pub(crate) enum WriteStream {
    File(BufWriter<std::fs::File>),
    Stdout(std::io::Stdout),
}

impl WriteStream {
    pub(crate) fn new<P>(out_path: P) -> std::io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let stream = if is_dash(&out_path) {
            Self::Stdout(std::io::stdout())
        } else {
            let f = File::create(out_path)?;
            let f = BufWriter::new(f);
            Self::File(f)
        };
        Ok(stream)
    }

    pub(crate) fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        match self {
            Self::File(file) => file.write_all(buf),
            Self::Stdout(stdout) => stdout.write_all(buf),
        }
    }

    pub(crate) fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::File(file) => file.flush(),
            Self::Stdout(stdout) => stdout.flush(),
        }
    }
}

fn is_dash<P: AsRef<Path>>(path: P) -> bool {
    matches!(path.as_ref().to_str(), Some("-"))
}

macro_rules! module_component {
    () => {
        module_path!().split("::").last().unwrap_or("")
    };
}
pub(crate) use module_component;
