//! Segment type and range planning.

/// A single segment: byte range [start, end) (half-open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Start offset (inclusive).
    pub start: u64,
    /// End offset (exclusive).
    pub end: u64,
}

impl Segment {
    /// Length of this segment in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Byte-range spec with inclusive end, `start-(end-1)`: the part after
    /// `bytes=` in a Range header, and exactly what curl's `range()` takes.
    pub fn range_spec(&self) -> String {
        if self.is_empty() {
            "0-0".to_string()
        } else {
            format!("{}-{}", self.start, self.end - 1)
        }
    }
}

/// Builds a segment plan for a given total size and segment count.
///
/// `segment_size = total_size / segment_count` (integer division); segment
/// `i` covers `[i*segment_size, (i+1)*segment_size)` and the last segment's
/// end is forced to `total_size`, absorbing the division remainder. The
/// union of ranges exactly covers `[0, total_size)` with no gaps or
/// overlaps. Returns an empty vec if `total_size` is 0 or `segment_count`
/// is 0.
pub fn plan_segments(total_size: u64, segment_count: usize) -> Vec<Segment> {
    if total_size == 0 || segment_count == 0 {
        return Vec::new();
    }

    let segment_count = segment_count as u64;
    let segment_size = total_size / segment_count;

    let mut out = Vec::with_capacity(segment_count as usize);
    for i in 0..segment_count {
        let start = i * segment_size;
        let end = if i == segment_count - 1 {
            total_size
        } else {
            (i + 1) * segment_size
        };
        out.push(Segment { start, end });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(segs: &[Segment], total: u64) {
        assert_eq!(segs.first().unwrap().start, 0);
        assert_eq!(segs.last().unwrap().end, total);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "no gaps, no overlaps");
        }
    }

    #[test]
    fn plan_segments_even() {
        let segs = plan_segments(1000, 4);
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0], Segment { start: 0, end: 250 });
        assert_eq!(segs[1], Segment { start: 250, end: 500 });
        assert_eq!(segs[2], Segment { start: 500, end: 750 });
        assert_eq!(segs[3], Segment { start: 750, end: 1000 });
        assert_covers(&segs, 1000);
    }

    #[test]
    fn plan_segments_last_absorbs_remainder() {
        // 10 / 4 -> segment size 2; last segment runs from 6 to 10.
        let segs = plan_segments(10, 4);
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0], Segment { start: 0, end: 2 });
        assert_eq!(segs[1], Segment { start: 2, end: 4 });
        assert_eq!(segs[2], Segment { start: 4, end: 6 });
        assert_eq!(segs[3], Segment { start: 6, end: 10 });
        assert_covers(&segs, 10);
    }

    #[test]
    fn plan_segments_last_length_formula() {
        for (total, n) in [(10u64, 3usize), (1001, 4), (97, 8), (20, 2)] {
            let segs = plan_segments(total, n);
            let expected_last = total - (n as u64 - 1) * (total / n as u64);
            assert_eq!(segs.last().unwrap().len(), expected_last);
            assert_covers(&segs, total);
        }
    }

    #[test]
    fn plan_segments_one() {
        let segs = plan_segments(100, 1);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0], Segment { start: 0, end: 100 });
    }

    #[test]
    fn plan_segments_empty() {
        assert!(plan_segments(0, 4).is_empty());
        assert!(plan_segments(100, 0).is_empty());
    }

    #[test]
    fn segment_range_spec() {
        let s = Segment { start: 0, end: 99 };
        assert_eq!(s.range_spec(), "0-98");
        assert_eq!(s.len(), 99);
    }

    #[test]
    fn segment_range_spec_single_byte() {
        let s = Segment { start: 42, end: 43 };
        assert_eq!(s.range_spec(), "42-42");
    }
}
