//! Train/test split and batching

use crate::error::CorpusError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle with a seeded RNG, then split
///
/// The first `floor(n * (1 - test_fraction))` shuffled items are the
/// training set; the rest are the test set. The same seed always gives the
/// same split.
pub fn split<T>(
    mut items: Vec<T>,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>), CorpusError> {
    if !(0.0..=1.0).contains(&test_fraction) {
        return Err(CorpusError::Config(format!(
            "test_fraction must be between 0.0 and 1.0, got {}",
            test_fraction
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);

    let train_len = (items.len() as f64 * (1.0 - test_fraction)).floor() as usize;
    let test = items.split_off(train_len.min(items.len()));
    Ok((items, test))
}

/// Iterate over consecutive batches of at most `size` items
///
/// A size of zero is treated as one.
pub fn batches<T>(items: &[T], size: usize) -> impl Iterator<Item = &[T]> {
    items.chunks(size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let (train, test) = split((0..10).collect::<Vec<_>>(), 0.2, 7).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn test_split_floors_training_size() {
        let (train, test) = split((0..7).collect::<Vec<_>>(), 0.2, 7).unwrap();
        // floor(7 * 0.8) = 5
        assert_eq!(train.len(), 5);
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn test_split_is_deterministic() {
        let a = split((0..50).collect::<Vec<_>>(), 0.3, 42).unwrap();
        let b = split((0..50).collect::<Vec<_>>(), 0.3, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_keeps_every_item() {
        let (mut train, test) = split((0..20).collect::<Vec<_>>(), 0.25, 1).unwrap();
        train.extend(test);
        train.sort();
        assert_eq!(train, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        assert!(split(vec![1, 2, 3], 1.5, 0).is_err());
        assert!(split(vec![1, 2, 3], -0.1, 0).is_err());
    }

    #[test]
    fn test_split_empty() {
        let (train, test) = split(Vec::<u8>::new(), 0.2, 0).unwrap();
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_batches() {
        let items = [1, 2, 3, 4, 5];
        let sizes: Vec<usize> = batches(&items, 2).map(<[i32]>::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(batches(&items, 0).count(), 5);
    }
}
