use rand::{Rng, rng};

/// Source of random integers for the strategies.
///
/// Strategies only ever draw through this trait, so tests can swap in a fixed
/// or counting source and get deterministic identifiers.
///
/// # Example
/// ```
/// use idforge::RandSource;
///
/// struct Constant(u64);
///
/// impl RandSource<u64> for Constant {
///     fn rand(&self) -> u64 {
///         self.0
///     }
/// }
///
/// assert_eq!(Constant(7).rand(), 7);
/// ```
pub trait RandSource<T> {
    fn rand(&self) -> T;
}

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does **not** store the RNG itself; it simply
/// accesses the thread-local generator on each call, which keeps it `Send` and
/// `Sync` even though `ThreadRng` is neither.
///
/// Identifiers produced from this source are not meant to be security tokens.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> u128 {
        rng().random()
    }
}

/// Draws an index uniformly from `0..len` using rejection sampling so small
/// alphabets are not biased towards their first characters.
///
/// `len` must be non-zero.
pub fn pick_index<R>(rng: &R, len: usize) -> usize
where
    R: RandSource<u64> + ?Sized,
{
    debug_assert!(len > 0, "cannot pick from an empty range");
    let len = len as u64;
    let zone = u64::MAX - (u64::MAX % len);
    loop {
        let value = rng.rand();
        if value < zone {
            return (value % len) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct SequenceRand {
        values: Vec<u64>,
        index: Cell<usize>,
    }

    impl RandSource<u64> for SequenceRand {
        fn rand(&self) -> u64 {
            let i = self.index.get();
            self.index.set(i + 1);
            self.values[i]
        }
    }

    #[test]
    fn pick_index_wraps_into_range() {
        let rng = SequenceRand {
            values: vec![7, 8, 9],
            index: Cell::new(0),
        };
        assert_eq!(pick_index(&rng, 2), 1);
        assert_eq!(pick_index(&rng, 2), 0);
        assert_eq!(pick_index(&rng, 4), 1);
    }

    #[test]
    fn pick_index_rejects_values_in_biased_zone() {
        // With len = 3 the top `u64::MAX % 3 + 1` values are rejected.
        let rng = SequenceRand {
            values: vec![u64::MAX, 5],
            index: Cell::new(0),
        };
        assert_eq!(pick_index(&rng, 3), 2);
        assert_eq!(rng.index.get(), 2);
    }

    #[test]
    fn thread_random_stays_in_range() {
        for _ in 0..1_000 {
            assert!(pick_index(&ThreadRandom, 62) < 62);
        }
    }
}
