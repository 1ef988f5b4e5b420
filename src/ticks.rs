/// Evenly spaced tick positions from `start` up to and including `end`:
/// [ start + i * interval | i <- 0..=steps ], each computed directly
/// from the index so long axes do not accumulate rounding error.
#[derive(Clone, Debug)]
pub struct Ticks {
    current: u64,
    current_back: u64,
    start: f64,
    interval: f64,
}

impl Ticks {
    /// `end` is included when it falls on the grid (within half an interval of rounding);
    /// a non-positive interval gives the single tick `start`.
    pub fn new(start: f64, end: f64, interval: f64) -> Self {
        let steps = if interval > 0. && end > start {
            ((end - start) / interval + 1e-9).floor() as u64
        } else {
            0
        };
        Ticks {
            current: 0,
            current_back: steps + 1,
            start,
            interval,
        }
    }

    pub fn length(&self) -> u64 {
        self.current_back - self.current
    }

    fn at(&self, pos: u64) -> f64 {
        self.start + pos as f64 * self.interval
    }
}

impl Iterator for Ticks {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.current_back {
            return None;
        }
        let result = self.at(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = self.length() as usize;
        (l, Some(l))
    }
}

impl DoubleEndedIterator for Ticks {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.current >= self.current_back {
            return None;
        }
        self.current_back -= 1;
        Some(self.at(self.current_back))
    }
}

impl ExactSizeIterator for Ticks {}
