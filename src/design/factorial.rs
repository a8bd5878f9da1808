//! Full-factorial enumeration in mixed-radix order.
//!
//! Rows are numbered `0..size`, with the first attribute cycling fastest:
//! row 0 is all first levels, row 1 bumps the first attribute, and so on.
//! Rows are decoded on demand rather than materialized, so sampling from a
//! large factorial never allocates the whole cross product.

/// Number of rows in the full factorial.
pub fn size(level_counts: &[usize]) -> usize {
    level_counts.iter().product()
}

/// Decode a row number into one level index per attribute.
pub fn decode(mut row: usize, level_counts: &[usize]) -> Vec<usize> {
    level_counts
        .iter()
        .map(|&n| {
            let level = row % n;
            row /= n;
            level
        })
        .collect()
}
