//! Evaluation helpers.

/// Index of the largest value, with ties resolved to the earliest index.
///
/// The comparison is strict, so the first occurrence of the maximum wins.
/// Callers pass non-empty slices; this is only `debug_assert!`ed.
pub fn argmax(values: &[f64]) -> usize {
    debug_assert!(!values.is_empty());
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_largest_value() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[-3.0, -1.0, -2.0]), 1);
        assert_eq!(argmax(&[5.0]), 0);
    }

    #[test]
    fn ties_go_to_the_first_occurrence() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
    }
}
