use std::fmt::Debug;

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default {}
impl<T: ::num::PrimInt + Debug + Default> PrimInt for T {}

/// Signed integers used to accumulate alignment scores. `i16` bounds the memory of the dynamic
/// programming matrix and is enough for references of a few thousand bases; `i32` is the default.
pub trait Score: PrimInt + ::num::Signed + Send + Sync {}
impl<T: PrimInt + ::num::Signed + Send + Sync> Score for T {}

/// Median of the given values: middle element for an odd count, mean of the two middle elements
/// for an even count and 0 for an empty input. The input is sorted in place.
pub fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        0.5 * (values[mid - 1] + values[mid])
    }
}
