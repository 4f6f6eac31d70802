/// # Summary
/// Arithmetic mean without integer-to-float casts.
///
/// # Returns
/// `None` for an empty iterator.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(sum, count), v| (sum + v, count + 1.0));
    (count > 0.0).then(|| sum / count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean([10.0, 9.0, 8.0]), Some(9.0));
        assert_eq!(mean(std::iter::empty()), None);
    }
}
