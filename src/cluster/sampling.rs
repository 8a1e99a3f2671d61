use rand::Rng;

/// Total weight at or below which a row is treated as having no preference.
pub(crate) const DEGENERATE_WEIGHT: f64 = 1e-12;

/// Roulette-wheel draw: index `i` is chosen with probability `weights[i] / sum`.
///
/// Falls back to a uniform draw when the total weight is (near) zero or not
/// finite. `weights` must be non-empty and non-negative.
pub fn weighted_choice<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    debug_assert!(!weights.is_empty());
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= DEGENERATE_WEIGHT {
        return rng.random_range(0..weights.len());
    }

    let r = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = i;
        if r < cumulative {
            return i;
        }
    }
    // Rounding can leave `r` a hair above the final cumulative sum.
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_weight_never_chosen() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let i = weighted_choice(&[0.0, 1.0, 0.0, 3.0], &mut rng);
            assert!(i == 1 || i == 3);
        }
    }

    #[test]
    fn test_single_positive_weight() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(weighted_choice(&[0.0, 0.0, 5.0], &mut rng), 2);
        }
    }

    #[test]
    fn test_degenerate_row_is_uniform() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[weighted_choice(&[0.0; 4], &mut rng)] += 1;
        }
        for c in counts {
            assert!(c > 800, "counts {counts:?}");
        }
    }

    #[test]
    fn test_proportional_frequencies() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut counts = [0usize; 2];
        for _ in 0..10_000 {
            counts[weighted_choice(&[1.0, 3.0], &mut rng)] += 1;
        }
        let frac = counts[1] as f64 / 10_000.0;
        assert!((frac - 0.75).abs() < 0.03, "frac {frac}");
    }
}
