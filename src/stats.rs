//! Small statistics helpers shared by the analyzers.
//!
//! "Expected" values for spacing and typography are histogram modes over
//! integer-rounded measurements. Ties break toward the first-encountered
//! value, which keeps results deterministic for identical inputs.

use indexmap::IndexMap;

/// Most frequent integer-rounded value in `values`.
///
/// Returns `None` for an empty input. Ties break toward the value that
/// appears first in iteration order.
///
/// # Examples
///
/// ```
/// use pdf_qc::stats::rounded_mode;
///
/// assert_eq!(rounded_mode(&[10.2, 9.8, 10.4, 25.0]), Some(10));
/// assert_eq!(rounded_mode(&[]), None);
/// // Tie: 12 seen before 14.
/// assert_eq!(rounded_mode(&[12.0, 14.0, 12.0, 14.0]), Some(12));
/// ```
pub fn rounded_mode(values: &[f32]) -> Option<i64> {
    let mut counts: IndexMap<i64, usize> = IndexMap::new();
    for &v in values {
        *counts.entry(v.round() as i64).or_insert(0) += 1;
    }

    let mut best: Option<(i64, usize)> = None;
    for (value, count) in &counts {
        match best {
            // Strict comparison keeps the first-encountered value on ties.
            Some((_, best_count)) if *count <= best_count => {}
            _ => best = Some((*value, *count)),
        }
    }
    best.map(|(value, _)| value)
}

/// Spread (max - min) of a set of coordinates.
///
/// Returns 0.0 for fewer than two values.
pub fn spread(values: &[f32]) -> f32 {
    let mut iter = values.iter();
    let first = match iter.next() {
        Some(&v) => v,
        None => return 0.0,
    };
    let (min, max) = iter.fold((first, first), |(min, max), &v| (min.min(v), max.max(v)));
    max - min
}
