//! Decode checkpoints.
//!
//! The decoder reports its progress to a [`DecodeObserver`] instead of
//! logging directly, so that callers decide where diagnostics go.

use crate::datatypes::SectionKind;

/// Receives notifications at decode checkpoints.
///
/// All methods do nothing by default. Offsets are byte offsets in the input
/// buffer.
pub trait DecodeObserver {
    /// Called after a section of a message has been decoded.
    fn on_section(&mut self, _kind: SectionKind, _offset: usize, _size: usize) {}

    /// Called after a whole message has been decoded.
    fn on_message(&mut self, _index: usize, _offset: usize, _length: usize) {}

    /// Called when a run of zero octets between messages has been skipped.
    fn on_padding(&mut self, _offset: usize, _count: usize) {}

    /// Called when a message of another edition has been skipped.
    fn on_skipped_message(&mut self, _edition: u8, _offset: usize, _length: usize) {}
}

impl<O: DecodeObserver + ?Sized> DecodeObserver for &mut O {
    fn on_section(&mut self, kind: SectionKind, offset: usize, size: usize) {
        (**self).on_section(kind, offset, size)
    }

    fn on_message(&mut self, index: usize, offset: usize, length: usize) {
        (**self).on_message(index, offset, length)
    }

    fn on_padding(&mut self, offset: usize, count: usize) {
        (**self).on_padding(offset, count)
    }

    fn on_skipped_message(&mut self, edition: u8, offset: usize, length: usize) {
        (**self).on_skipped_message(edition, offset, length)
    }
}

/// Observer ignoring all checkpoints.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DecodeObserver for NoopObserver {}

/// Observer forwarding checkpoints to the [`log`] facade.
///
/// Sections are logged at trace level, messages and padding at debug level
/// and skipped messages at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl DecodeObserver for LogObserver {
    fn on_section(&mut self, kind: SectionKind, offset: usize, size: usize) {
        log::trace!("decoded {kind} @ {offset} ({size} bytes)");
    }

    fn on_message(&mut self, index: usize, offset: usize, length: usize) {
        log::debug!("decoded message {index} @ {offset} ({length} bytes)");
    }

    fn on_padding(&mut self, offset: usize, count: usize) {
        log::debug!("skipped {count} zero bytes @ {offset}");
    }

    fn on_skipped_message(&mut self, edition: u8, offset: usize, length: usize) {
        log::warn!("skipping GRIB edition {edition} message @ {offset} ({length} bytes)");
    }
}
