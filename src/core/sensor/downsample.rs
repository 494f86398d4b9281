/// Reduce a series to at most `max_points` by fixed-stride sampling.
///
/// Series that already fit are returned unchanged. Otherwise every
/// `ceil(len / max_points)`-th element is kept, starting at index 0.
pub fn downsample<T: Clone>(series: &[T], max_points: usize) -> Vec<T> {
    if series.len() <= max_points {
        return series.to_vec();
    }
    if max_points == 0 {
        return Vec::new();
    }

    let stride = series.len().div_ceil(max_points);
    series.iter().step_by(stride).cloned().collect()
}
