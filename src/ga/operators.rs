//! Generic genetic operators for fixed-length, locus-aligned chromosomes.
//!
//! Gene `i` of every chromosome describes the same decision, so operators
//! exchange or redraw genes position by position and never reorder them.
//!
//! # Crossover Operators
//!
//! - [`two_point_crossover`]: swap the middle segment between two parents
//!
//! # Mutation Operators
//!
//! - [`resample_genes`]: redraw each gene independently with a fixed rate
//!
//! # References
//!
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems"

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Two-point crossover.
///
/// Cuts both parents at `c1 < c2` (see [`two_cut_points`]) and exchanges
/// the middle segment `[c1, c2)`:
///
/// - child 1 = `p1[..c1] ++ p2[c1..c2] ++ p1[c2..]`
/// - child 2 = `p2[..c1] ++ p1[c1..c2] ++ p2[c2..]`
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or fewer than 2 genes.
pub fn two_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n >= 2, "two-point crossover needs at least 2 genes");

    let (c1, c2) = two_cut_points(n, rng);
    (
        splice_middle(parent1, parent2, c1, c2),
        splice_middle(parent2, parent1, c1, c2),
    )
}

/// Draws the cut points of [`two_point_crossover`].
///
/// `c1` is uniform in `[0, n - 2]` and `c2` uniform in `[c1 + 1, n - 1]`,
/// so the middle and last segments always hold at least one gene. The first
/// segment is empty when `c1 == 0`.
///
/// # Panics
/// Panics if `n < 2`.
pub fn two_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "two-point crossover needs at least 2 genes");
    let c1 = rng.random_range(0..n - 1);
    let c2 = rng.random_range(c1 + 1..n);
    (c1, c2)
}

/// Copies `outer` with `middle[c1..c2]` spliced in at the same positions.
pub fn splice_middle<T: Clone>(outer: &[T], middle: &[T], c1: usize, c2: usize) -> Vec<T> {
    let mut child = Vec::with_capacity(outer.len());
    child.extend_from_slice(&outer[..c1]);
    child.extend_from_slice(&middle[c1..c2]);
    child.extend_from_slice(&outer[c2..]);
    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Gene-wise resampling.
///
/// Each gene is replaced, with independent probability `rate`, by
/// `draw(locus, rng)`; otherwise it is copied. The redraw may coincide with
/// the old value. One uniform draw is consumed per gene before any `draw`.
///
/// # Complexity
/// O(n)
pub fn resample_genes<T, R, F>(genes: &[T], rate: f64, rng: &mut R, mut draw: F) -> Vec<T>
where
    T: Clone,
    R: Rng,
    F: FnMut(usize, &mut R) -> T,
{
    genes
        .iter()
        .enumerate()
        .map(|(locus, gene)| {
            if rng.random_range(0.0..1.0) < rate {
                draw(locus, rng)
            } else {
                gene.clone()
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_cut_points_in_range() {
        let mut rng = create_rng(42);
        for n in 2..12 {
            for _ in 0..200 {
                let (c1, c2) = two_cut_points(n, &mut rng);
                assert!(c1 <= n - 2, "c1={c1} out of range for n={n}");
                assert!(c1 < c2 && c2 <= n - 1, "c2={c2} out of range for n={n}");
            }
        }
    }

    #[test]
    fn test_cut_points_cover_range() {
        let mut rng = create_rng(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(two_cut_points(4, &mut rng));
        }
        // (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_splice_middle() {
        let a = [1, 2, 3, 4, 5];
        let b = [10, 20, 30, 40, 50];
        assert_eq!(splice_middle(&a, &b, 1, 3), vec![1, 20, 30, 4, 5]);
        assert_eq!(splice_middle(&b, &a, 0, 4), vec![1, 2, 3, 4, 50]);
    }

    #[test]
    fn test_crossover_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![3, 1, 4, 1, 5, 9];
        for _ in 0..50 {
            let (c1, c2) = two_point_crossover(&p, &p, &mut rng);
            assert_eq!(c1, p);
            assert_eq!(c2, p);
        }
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_crossover_length_mismatch() {
        let mut rng = create_rng(42);
        two_point_crossover(&[1, 2, 3], &[1, 2], &mut rng);
    }

    #[test]
    fn test_resample_rate_zero_keeps_genes() {
        let mut rng = create_rng(42);
        let genes = vec![1, 2, 3, 4];
        let out = resample_genes(&genes, 0.0, &mut rng, |_, _| 99);
        assert_eq!(out, genes);
    }

    #[test]
    fn test_resample_rate_one_redraws_every_locus() {
        let mut rng = create_rng(42);
        let genes = vec![1, 2, 3, 4];
        let out = resample_genes(&genes, 1.0, &mut rng, |locus, _| 100 + locus);
        assert_eq!(out, vec![100, 101, 102, 103]);
    }

    #[test]
    fn test_resample_rate_roughly_respected() {
        let mut rng = create_rng(3);
        let genes = vec![0u8; 10_000];
        let out = resample_genes(&genes, 0.1, &mut rng, |_, _| 1u8);
        let changed = out.iter().filter(|&&g| g == 1).count();
        assert!((800..1200).contains(&changed), "changed {changed} of 10000");
    }

    proptest! {
        #[test]
        fn prop_children_exchange_one_segment(seed in any::<u64>(), n in 2usize..20) {
            let mut rng = create_rng(seed);
            let a: Vec<u32> = (0..n as u32).collect();
            let b: Vec<u32> = (100..100 + n as u32).collect();
            let (x, y) = two_point_crossover(&a, &b, &mut rng);

            prop_assert_eq!(x.len(), n);
            prop_assert_eq!(y.len(), n);
            for i in 0..n {
                // Every locus comes from the same position of one parent,
                // and the two children take complementary parents.
                let from_b = x[i] >= 100;
                prop_assert_eq!(x[i], if from_b { b[i] } else { a[i] });
                prop_assert_eq!(y[i], if from_b { a[i] } else { b[i] });
            }
            // The last gene always stays with its own parent.
            prop_assert_eq!(x[n - 1], a[n - 1]);
            prop_assert!(x.iter().any(|&g| g >= 100));
        }
    }
}
