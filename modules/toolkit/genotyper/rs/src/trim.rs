use std::ops::Range;

/// Region left after stripping leading and trailing base calls below `min_quality`.
/// Internal low-quality calls are kept, so indices inside the region match the original read.
pub fn window(qualities: &[u8], min_quality: u8) -> Range<usize> {
    let start = qualities
        .iter()
        .position(|x| *x >= min_quality)
        .unwrap_or(qualities.len());
    let end = qualities
        .iter()
        .rposition(|x| *x >= min_quality)
        .map_or(start, |x| x + 1);
    start..end
}
