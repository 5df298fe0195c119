use core::ops::Index;
use core::slice::{ChunksExact, Iter, IterMut};

use crate::registers::{PIXEL_COUNT, ROW_LEN};
use crate::temp::Temperature;

/** One image from the sensor: 64 pixel temperatures, row-major, in the order of the pixel
registers (pixel 0 at 0x80, pixel 63 at 0xFE). */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame([Temperature; PIXEL_COUNT]);

impl Frame {
    pub fn pixels(&self) -> &[Temperature; PIXEL_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> Iter<'_, Temperature> {
        self.0.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, Temperature> {
        self.0.iter_mut()
    }

    /// Eight rows of eight pixels.
    pub fn rows(&self) -> ChunksExact<'_, Temperature> {
        self.0.chunks_exact(ROW_LEN)
    }

    /// Returns `None` when `row` or `col` is not below 8.
    pub fn get(&self, row: usize, col: usize) -> Option<Temperature> {
        if row < ROW_LEN && col < ROW_LEN {
            Some(self.0[row * ROW_LEN + col])
        } else {
            None
        }
    }

    pub fn celsius(&self) -> [f64; PIXEL_COUNT] {
        let mut out = [0.0; PIXEL_COUNT];

        for (c, t) in out.iter_mut().zip(self.0.iter()) {
            *c = t.celsius();
        }

        out
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame([Temperature::default(); PIXEL_COUNT])
    }
}

impl From<[Temperature; PIXEL_COUNT]> for Frame {
    fn from(pixels: [Temperature; PIXEL_COUNT]) -> Self {
        Frame(pixels)
    }
}

impl Index<usize> for Frame {
    type Output = Temperature;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Temperature;
    type IntoIter = Iter<'a, Temperature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
