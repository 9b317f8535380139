use std::iter::{RepeatN, repeat_n};

use num::ToPrimitive;

use super::{param::SimplePackingParam, stream::NBitwiseIterator};

pub(crate) enum SimplePackingDecodeIteratorWrapper<I> {
    FixedValue(RepeatN<f32>),
    SimplePacking(SimplePackingDecodeIterator<I>),
}

impl<I, N> Iterator for SimplePackingDecodeIteratorWrapper<I>
where
    I: Iterator<Item = N>,
    N: ToPrimitive,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::FixedValue(inner) => inner.next(),
            Self::SimplePacking(inner) => inner.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::FixedValue(inner) => inner.size_hint(),
            Self::SimplePacking(inner) => inner.size_hint(),
        }
    }
}

/// Decodes `num_points` values packed in `payload`.
///
/// Callers check that `payload` holds enough bits and that the width does not
/// exceed 32 bits.
pub(crate) fn decode<'a>(
    payload: &'a [u8],
    param: SimplePackingParam,
    num_points: usize,
) -> SimplePackingDecodeIteratorWrapper<NBitwiseIterator<'a>> {
    // As in wgrib, a width of 0 means a constant field of the reference value.
    if param.nbit == 0 {
        let value = param.unpack(0.0) as f32;
        SimplePackingDecodeIteratorWrapper::FixedValue(repeat_n(value, num_points))
    } else {
        let nbit = usize::from(param.nbit);
        let iter = NBitwiseIterator::new(payload, nbit).with_bit_limit(num_points * nbit);
        SimplePackingDecodeIteratorWrapper::SimplePacking(SimplePackingDecodeIterator::new(
            iter, param,
        ))
    }
}

pub(crate) struct SimplePackingDecodeIterator<I> {
    iter: I,
    param: SimplePackingParam,
}

impl<I> SimplePackingDecodeIterator<I> {
    pub(crate) fn new(iter: I, param: SimplePackingParam) -> Self {
        Self { iter, param }
    }
}

impl<I: Iterator<Item = N>, N: ToPrimitive> Iterator for SimplePackingDecodeIterator<I> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let encoded = self.iter.next()?.to_f64()?;
        Some(self.param.unpack(encoded) as f32)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
