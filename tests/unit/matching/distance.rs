//! Tests for redmean, luminance and Hamming distances

#[cfg(test)]
mod tests {
    use puzzletile::PuzzleError;
    use puzzletile::matching::distance::{gray, hamming, redmean};
    use puzzletile::signature::{MatchMode, PerceptualHash, Signature};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_color(rng: &mut StdRng) -> [f64; 3] {
        [0; 3].map(|_: u8| f64::from(rng.random::<u8>()))
    }

    // Tests redmean is zero on equal colors and symmetric
    // Verified by using r1 instead of the mean red in the weights
    #[test]
    fn test_redmean_identity_and_symmetry() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let a = random_color(&mut rng);
            let b = random_color(&mut rng);

            assert!(redmean(a, a).abs() < f64::EPSILON);
            assert!((redmean(a, b) - redmean(b, a)).abs() < 1e-9);
            assert!(redmean(a, b) >= 0.0);
        }
    }

    // Tests the weighting constants on black against white
    // Verified by changing the green weight from 4 to 3
    #[test]
    fn test_redmean_black_white_value() {
        let expected = 255.0 * (8.0 + 255.0 / 256.0_f64).sqrt();
        let actual = redmean([0.0; 3], [255.0; 3]);

        assert!((actual - expected).abs() < 1e-9, "{actual} vs {expected}");
    }

    // Tests redmean ranks candidates differently from Euclidean distance
    // Verified by substituting plain Euclidean distance
    #[test]
    fn test_redmean_differs_from_euclidean_ranking() {
        let query = [0.0; 3];
        let greenish = [0.0, 12.0, 0.0];
        let reddish = [14.0, 0.0, 0.0];

        // Euclidean: 12 < 14; redmean: 24 > ~19.9
        assert!(redmean(query, reddish) < redmean(query, greenish));
    }

    // Tests gray distance is the absolute difference
    // Verified by returning the signed difference
    #[test]
    fn test_gray_absolute_difference() {
        assert!((gray(10.0, 42.5) - 32.5).abs() < f64::EPSILON);
        assert!((gray(42.5, 10.0) - 32.5).abs() < f64::EPSILON);
        assert!(gray(3.0, 3.0).abs() < f64::EPSILON);
    }

    // Tests Hamming distance through the signature dispatch
    // Verified by dispatching hash signatures to the gray metric
    #[test]
    fn test_hash_signature_distance() {
        let a: PerceptualHash = format!("{}{}", "1".repeat(10), "0".repeat(54))
            .parse()
            .unwrap_or_else(|_| unreachable!());
        let b: PerceptualHash = "0".repeat(64).parse().unwrap_or_else(|_| unreachable!());

        assert_eq!(hamming(&a, &b), 10);

        let distance = Signature::Hash(a).distance(&Signature::Hash(b)).ok();
        assert_eq!(distance, Some(10.0));
    }

    // Tests signatures of different modes cannot be compared
    // Verified by falling back to zero distance on mismatch
    #[test]
    fn test_mode_mismatch_rejected() {
        let rgb = Signature::from_color([1, 2, 3]);
        let luma = Signature::Gray(2.0);

        match rgb.distance(&luma) {
            Err(PuzzleError::ModeMismatch { expected, found }) => {
                assert_eq!(expected, MatchMode::Rgb);
                assert_eq!(found, MatchMode::Gray);
            }
            other => unreachable!("Expected ModeMismatch, got {other:?}"),
        }
    }
}
