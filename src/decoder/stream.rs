/// Reads `width`-bit unsigned integers from a byte slice, most significant
/// bit first, across octet boundaries.
#[derive(Clone)]
pub(crate) struct NBitwiseIterator<'a> {
    data: &'a [u8],
    width: usize,
    bit_pos: usize,
    bit_len: usize,
}

impl<'a> NBitwiseIterator<'a> {
    /// `width` must not exceed 32.
    pub(crate) fn new(data: &'a [u8], width: usize) -> Self {
        Self {
            data,
            width,
            bit_pos: 0,
            bit_len: data.len() * 8,
        }
    }

    /// Stops the iteration after `bits` bits, leaving trailing padding
    /// unread.
    pub(crate) fn with_bit_limit(self, bits: usize) -> Self {
        Self {
            bit_len: bits.min(self.data.len() * 8),
            ..self
        }
    }
}

impl Iterator for NBitwiseIterator<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.width == 0 || self.bit_pos + self.width > self.bit_len {
            return None;
        }

        let mut value = 0_u64;
        let mut remaining = self.width;
        let mut pos = self.bit_pos;
        while remaining > 0 {
            let offset = pos % 8;
            let take = (8 - offset).min(remaining);
            let bits = (self.data[pos / 8] << offset) >> (8 - take);
            value = (value << take) | u64::from(bits);
            remaining -= take;
            pos += take;
        }

        self.bit_pos = pos;
        Some(value as u32)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = match self.width {
            0 => 0,
            width => self.bit_len.saturating_sub(self.bit_pos) / width,
        };
        (size, Some(size))
    }
}

impl ExactSizeIterator for NBitwiseIterator<'_> {}
