// Copyright @yucwang 2023

use super::constants::{ Float, ONE_MINUS_EPSILON, Vector3f };
use crate::core::rng::LcgRng;

/// Base-2 radical inverse: the bits of `n` mirrored about the binary point.
pub fn radical_inverse(n: u32) -> Float {
    let reversed = n.reverse_bits() as f64 / 4_294_967_296.0;
    (reversed as Float).min(ONE_MINUS_EPSILON)
}

/// Uniformly distributed direction, by rejection from the [-1, 1]^3 cube.
pub fn random_unit_vector(rng: &mut LcgRng) -> Vector3f {
    loop {
        let p = Vector3f::new(
            rng.next_float() * 2.0 - 1.0,
            rng.next_float() * 2.0 - 1.0,
            rng.next_float() * 2.0 - 1.0,
        );
        let d = p.norm_squared();
        if d > 0.0 && d <= 1.0 {
            return p / d.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radical_inverse_values() {
        assert_eq!(radical_inverse(0), 0.0);
        assert_eq!(radical_inverse(1), 0.5);
        assert_eq!(radical_inverse(2), 0.25);
        assert_eq!(radical_inverse(3), 0.75);
        assert_eq!(radical_inverse(6), 0.375);
    }

    #[test]
    fn test_radical_inverse_in_unit_interval() {
        for n in [1u32, 17, 1000, u32::MAX - 1, u32::MAX] {
            let v = radical_inverse(n);
            assert!(v >= 0.0 && v < 1.0, "n={} gave {}", n, v);
            assert_eq!(v, radical_inverse(n));
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit_and_unbiased() {
        let mut rng = LcgRng::new(1);
        let n = 20_000;
        let mut mean = Vector3f::zeros();
        for _ in 0..n {
            let v = random_unit_vector(&mut rng);
            assert!((v.norm() - 1.0).abs() < 1e-4);
            mean += v;
        }
        mean /= n as Float;
        assert!(mean.norm() < 0.05);
    }
}
