//! Decoder for GRIB edition 1 messages.
//!
//! ```no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = std::fs::read("data.grib")?;
//!     let grib = grib1::from_bytes(&data)?;
//!     for message in grib.iter() {
//!         let values = message.values()?;
//!         println!("{message}: {} values", values.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod codetables;
mod datatypes;
mod decoder;
mod error;
mod grid;
mod helpers;
mod message;
mod observer;
mod reader;
mod time;

pub use crate::{
    datatypes::*,
    decoder::DecodeError,
    error::*,
    grid::*,
    helpers::{
        grib_int_from_bytes, grib_int_to_bytes, grib_uint_from_bytes, grib_uint_to_bytes,
        ibm_float_from_bytes, ibm_float_to_bytes,
    },
    message::*,
    observer::{DecodeObserver, LogObserver, NoopObserver},
    reader::*,
    time::UtcDateTime,
};
