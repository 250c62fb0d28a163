//! Playlist shuffle
//!
//! Every position is swapped with a uniformly drawn position from the whole
//! slice. The draw range does not shrink, so this is not Fisher-Yates and the
//! resulting permutations are not equally likely. Good enough for playlist
//! randomization; callers should only rely on the result being a permutation.

use rand::Rng;

/// Shuffle in place using the thread-local generator
pub fn shuffle<T>(items: &mut [T]) {
    shuffle_with(items, &mut rand::thread_rng());
}

/// Shuffle in place with a caller-supplied generator
pub fn shuffle_with<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let len = items.len();
    if len < 2 {
        return;
    }

    for first in 0..len {
        let second = rng.gen_range(0..len);
        items.swap(first, second);
    }
}
