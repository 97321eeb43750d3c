use core::iter::StepBy;
use core::ops::{
    Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive,
};

/// A range of pixel positions, optionally with a step.
///
/// The bounds are resolved against the length of the strip when
/// the range gets used, the same way a slice would be clamped:
/// positions past the end of the strip are silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRange {
    start: usize,
    end: Option<usize>,
    step: usize,
}

impl PixelRange {
    /// Creates a pixel range from any range of positions.
    pub fn new(range: impl RangeBounds<usize>) -> Self {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => Some(e.saturating_add(1)),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => None,
        };

        Self {
            start,
            end,
            step: 1,
        }
    }

    /// Only visit every `step`-th position, starting with the first one.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn step_by(self, step: usize) -> Self {
        assert!(step != 0, "pixel range step must be non-zero");
        Self { step, ..self }
    }

    /// The positions this range covers on a strip with `len` pixels,
    /// in ascending order.
    pub fn indices(&self, len: usize) -> StepBy<Range<usize>> {
        let end = self.end.map_or(len, |end| end.min(len));
        let start = self.start.min(end);
        (start..end).step_by(self.step)
    }

    /// The amount of positions this range covers on a strip with `len` pixels.
    pub fn count(&self, len: usize) -> usize {
        self.indices(len).len()
    }
}

/// Converts an object into a [`PixelRange`], usable by the strip's range accessors.
pub trait IntoPixelRange {
    /// Converts the current object into a pixel range.
    fn into_pixel_range(self) -> PixelRange;
}

impl IntoPixelRange for PixelRange {
    fn into_pixel_range(self) -> PixelRange {
        self
    }
}

macro_rules! impl_into_pixel_range {
    ($($range:ty),+) => {
        $(
            impl IntoPixelRange for $range {
                fn into_pixel_range(self) -> PixelRange {
                    PixelRange::new(self)
                }
            }
        )+
    };
}

impl_into_pixel_range!(
    Range<usize>,
    RangeInclusive<usize>,
    RangeFrom<usize>,
    RangeTo<usize>,
    RangeToInclusive<usize>,
    RangeFull
);

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(range: impl IntoPixelRange, len: usize) -> Vec<usize> {
        range.into_pixel_range().indices(len).collect()
    }

    #[test]
    fn plain_ranges() {
        assert_eq!(collect(2..5, 10), [2, 3, 4]);
        assert_eq!(collect(2..=5, 10), [2, 3, 4, 5]);
        assert_eq!(collect(7.., 10), [7, 8, 9]);
        assert_eq!(collect(..3, 10), [0, 1, 2]);
        assert_eq!(collect(..=1, 10), [0, 1]);
        assert_eq!(collect(.., 3), [0, 1, 2]);
    }

    #[test]
    fn clamped_to_length() {
        assert_eq!(collect(3..100, 5), [3, 4]);
        assert_eq!(collect(8..12, 5), Vec::<usize>::new());
        assert_eq!(collect(4..2, 5), Vec::<usize>::new());
    }

    #[test]
    fn stepped() {
        assert_eq!(collect(PixelRange::new(..).step_by(3), 10), [0, 3, 6, 9]);
        assert_eq!(collect(PixelRange::new(1..8).step_by(2), 10), [1, 3, 5, 7]);
        assert_eq!(PixelRange::new(1..8).step_by(2).count(5), 2);
    }

    #[test]
    #[should_panic]
    fn zero_step() {
        let _ = PixelRange::new(..).step_by(0);
    }
}
