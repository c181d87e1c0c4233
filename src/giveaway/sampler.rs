use rand::Rng;

/// Draws `min(count, pool.len())` distinct items. Each draw picks uniformly
/// among the items not drawn yet. The caller's pool is left untouched.
pub fn select_winners<T, R>(pool: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut remaining: Vec<&T> = pool.iter().collect();
    let winner_count = count.min(remaining.len());
    let mut winners = Vec::with_capacity(winner_count);

    for _ in 0..winner_count {
        let index = rng.gen_range(0..remaining.len());
        winners.push(remaining.swap_remove(index).clone());
    }

    winners
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_small_pool_returns_everyone() {
        let pool = vec![1, 2, 3, 4, 5];
        let mut rng = StdRng::seed_from_u64(7);
        let winners = select_winners(&pool, 10, &mut rng);

        assert_eq!(winners.len(), 5);
        let unique: HashSet<_> = winners.iter().copied().collect();
        assert_eq!(unique, pool.iter().copied().collect());
        assert_eq!(pool, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_large_pool_returns_distinct_members() {
        let pool: Vec<u32> = (0..100).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let winners = select_winners(&pool, 7, &mut rng);
            assert_eq!(winners.len(), 7);
            let unique: HashSet<_> = winners.iter().collect();
            assert_eq!(unique.len(), 7);
            assert!(winners.iter().all(|winner| pool.contains(winner)));
        }
    }

    #[test]
    fn test_empty_pool_and_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_winners::<u32, _>(&[], 3, &mut rng).is_empty());
        assert!(select_winners(&[1, 2], 0, &mut rng).is_empty());
    }

    #[test]
    fn test_every_entrant_can_win() {
        let pool = vec!['a', 'b', 'c'];
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.extend(select_winners(&pool, 1, &mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
