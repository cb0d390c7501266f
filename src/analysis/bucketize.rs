// @module: Fixed-width temporal bucketing for trend visualization

/// Number of equal-width time windows per trend chart. Fixed by design.
pub const BUCKET_COUNT: usize = 10;

/// A bucketed time series: one midpoint and one count per window.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketedSeries {
    /// Midpoint of each window, in seconds - the chart x-axis
    pub midpoints: Vec<f64>,

    /// Number of records whose time falls in each window
    pub counts: Vec<usize>,
}

/// Partition the observed time range into `BUCKET_COUNT` equal-width
/// windows and count values per window.
///
/// Bounds are 11 evenly spaced values from `min` to `max` inclusive.
/// Assignment is `floor((v - min) / width)` clamped to `[0, 9]`, so the
/// lowest value lands in window 0 and the highest in window 9. Windows
/// with no values count as 0, and every input value is counted exactly
/// once.
///
/// Returns `None` for an empty input - a time range is undefined there and
/// callers are expected to skip rendering. When all values share one
/// timestamp the range has zero width: everything lands in window 0 and
/// every midpoint equals that timestamp.
pub fn bucketize(times: &[f64]) -> Option<BucketedSeries> {
    if times.is_empty() {
        return None;
    }

    let min = times.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = times.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let bounds: Vec<f64> = (0..=BUCKET_COUNT)
        .map(|i| min + span * (i as f64) / (BUCKET_COUNT as f64))
        .collect();

    let midpoints: Vec<f64> = bounds.windows(2)
        .map(|pair| (pair[0] + pair[1]) / 2.0)
        .collect();

    let width = span / (BUCKET_COUNT as f64);
    let mut counts = vec![0usize; BUCKET_COUNT];
    for &time in times {
        let index = if width > 0.0 {
            (((time - min) / width).floor() as usize).min(BUCKET_COUNT - 1)
        } else {
            0
        };
        counts[index] += 1;
    }

    Some(BucketedSeries { midpoints, counts })
}

/// Format seconds as `MM:SS`, zero-padded.
///
/// Minutes are not rolled into hours: 3661 seconds formats as "61:01".
pub fn format_mmss(seconds: f64) -> String {
    let minutes = (seconds / 60.0) as u64;
    let secs = (seconds % 60.0) as u64;
    format!("{:02}:{:02}", minutes, secs)
}
