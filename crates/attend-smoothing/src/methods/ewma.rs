/// Exponentially weighted moving average.
///
/// `S_0 = v_0`, `S_i = α·v_i + (1-α)·S_{i-1}`; returns the last `S`.
pub fn ewma(values: &[f64], alpha: f64) -> f64 {
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return 0.0;
    };
    iter.fold(first, |s, &v| alpha * v + (1.0 - alpha) * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favors_later_values() {
        let v = ewma(&[100.0, 200.0], 0.65);
        assert!((v - 165.0).abs() < 1e-9);
    }

    #[test]
    fn single_and_empty() {
        assert_eq!(ewma(&[42.0], 0.65), 42.0);
        assert_eq!(ewma(&[], 0.65), 0.0);
    }
}
