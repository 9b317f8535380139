/// Distributes decoded values over grid points, yielding NaN where the bit
/// for a point is 0.
pub(crate) struct BitmapDecodeIterator<B, I> {
    bitmap: B,
    values: I,
}

impl<B, I> BitmapDecodeIterator<B, I> {
    pub(crate) fn new(bitmap: B, values: I) -> Self {
        Self { bitmap, values }
    }
}

impl<B, I> Iterator for BitmapDecodeIterator<B, I>
where
    B: Iterator<Item = u32>,
    I: Iterator<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        match self.bitmap.next()? {
            0 => Some(f32::NAN),
            _ => self.values.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, max) = self.bitmap.size_hint();
        (0, max)
    }
}
