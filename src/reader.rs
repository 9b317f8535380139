use std::{io::Read, slice::Iter};

use crate::{
    datatypes::SectionKind,
    error::*,
    helpers::{grib_uint_from_bytes, read_as},
    message::Message,
    observer::{DecodeObserver, NoopObserver},
};

/// Edition and total length of a message, read without decoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHeader {
    pub edition: u8,
    pub total_length: u64,
}

impl MessageHeader {
    /// Number of octets needed to read the header of a message of `edition`.
    fn size(edition: u8) -> usize {
        if edition == 2 { 16 } else { 8 }
    }
}

/// Reads the edition and the total length of the message at the start of
/// `data`.
///
/// The length is taken from octets 5-7 for edition 1 and from octets 9-16
/// for edition 2.
///
/// # Examples
///
/// ```
/// let header = grib1::peek_header(b"GRIB\x00\x01\x00\x01").unwrap();
/// assert_eq!(header.edition, 1);
/// assert_eq!(header.total_length, 256);
/// ```
pub fn peek_header(data: &[u8]) -> Result<MessageHeader, ParseError> {
    let truncated = |needed: usize| ParseError::Truncated {
        section: SectionKind::Indicator,
        needed,
        available: data.len(),
    };

    if data.len() < MessageHeader::size(1) {
        return Err(truncated(MessageHeader::size(1)));
    }
    if &data[..4] != b"GRIB" {
        return Err(ParseError::NotGRIB(data[..4].to_vec()));
    }

    let edition = data[7];
    let total_length = match edition {
        1 => u64::from(grib_uint_from_bytes(&data[4..7])),
        2 => {
            if data.len() < MessageHeader::size(2) {
                return Err(truncated(MessageHeader::size(2)));
            }
            read_as!(u64, data, 8)
        }
        _ => return Err(ParseError::GRIBVersionMismatch(edition)),
    };

    Ok(MessageHeader {
        edition,
        total_length,
    })
}

/// Options for reading a buffer of concatenated messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadOptions {
    skip_edition2: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            skip_edition2: true,
        }
    }
}

impl ReadOptions {
    /// If `true`, edition 2 messages are skipped and listed in
    /// [`Grib1::skipped`]. Otherwise they are an error.
    pub fn skip_edition2(self, skip_edition2: bool) -> Self {
        Self { skip_edition2 }
    }
}

/// A message of another edition found in the input and not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkippedMessage {
    pub edition: u8,
    pub offset: usize,
    pub length: usize,
}

/// Messages decoded from a buffer of concatenated GRIB data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grib1 {
    messages: Vec<Message>,
    offsets: Vec<usize>,
    skipped: Vec<SkippedMessage>,
    padding: usize,
}

impl Grib1 {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    /// Byte offset of the message at `index` in the input.
    pub fn offset(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages of other editions that were skipped.
    pub fn skipped(&self) -> &[SkippedMessage] {
        &self.skipped
    }

    /// Total number of zero octets skipped between and after messages.
    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl<'a> IntoIterator for &'a Grib1 {
    type Item = &'a Message;
    type IntoIter = Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Decodes all GRIB1 messages in `data`, skipping zero padding and edition 2
/// messages.
pub fn from_bytes(data: &[u8]) -> Result<Grib1, GribError> {
    from_bytes_with_options(data, &ReadOptions::default())
}

pub fn from_bytes_with_options(data: &[u8], options: &ReadOptions) -> Result<Grib1, GribError> {
    from_bytes_with_observer(data, options, &mut NoopObserver)
}

/// Decodes all messages in `data`, reporting checkpoints to `observer`.
///
/// Reading stops at the first message that fails to decode. The error
/// carries the byte offset where that message starts.
pub fn from_bytes_with_observer<O: DecodeObserver>(
    data: &[u8],
    options: &ReadOptions,
    observer: &mut O,
) -> Result<Grib1, GribError> {
    let mut grib = Grib1::default();
    let mut pos = 0;

    while pos < data.len() {
        let padding = data[pos..].iter().take_while(|b| **b == 0).count();
        if padding > 0 {
            observer.on_padding(pos, padding);
            grib.padding += padding;
            pos += padding;
            continue;
        }

        let offset = pos;
        let rest = &data[pos..];
        let header = peek_header(rest).map_err(|e| GribError::from(e).in_message_at(offset))?;
        match header.edition {
            1 => {
                let message = Message::assemble(rest, offset, observer)
                    .map_err(|e| e.in_message_at(offset))?;
                let length = message.total_length();
                observer.on_message(grib.messages.len(), offset, length);
                grib.messages.push(message);
                grib.offsets.push(offset);
                pos += length;
            }
            edition if options.skip_edition2 => {
                let length = skipped_length(&header, rest.len())
                    .map_err(|e| GribError::from(e).in_message_at(offset))?;
                observer.on_skipped_message(edition, offset, length);
                grib.skipped.push(SkippedMessage {
                    edition,
                    offset,
                    length,
                });
                pos += length;
            }
            edition => {
                let err = GribError::from(ParseError::GRIBVersionMismatch(edition));
                return Err(err.in_message_at(offset));
            }
        }
    }

    Ok(grib)
}

fn skipped_length(header: &MessageHeader, available: usize) -> Result<usize, ParseError> {
    let minimum = MessageHeader::size(header.edition);
    let length = usize::try_from(header.total_length).unwrap_or(usize::MAX);
    if length > available {
        return Err(ParseError::Truncated {
            section: SectionKind::Indicator,
            needed: length,
            available,
        });
    }
    if length < minimum {
        return Err(ParseError::MessageLengthMismatch {
            declared: length,
            consumed: minimum,
        });
    }
    Ok(length)
}

/// Decodes all messages in `data`, which must all be GRIB1 messages
/// optionally separated by zero padding.
pub fn read_messages(data: &[u8]) -> Result<Vec<Message>, GribError> {
    let options = ReadOptions::default().skip_edition2(false);
    from_bytes_with_options(data, &options).map(Grib1::into_messages)
}

/// Reads all bytes from `reader` and decodes them with [`from_bytes`].
pub fn from_reader<R: Read>(mut reader: R) -> Result<Grib1, GribError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    from_bytes(&buf)
}
