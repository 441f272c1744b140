use rand::Rng;

/// Returns a uniformly random permutation of `items`, leaving the input untouched.
///
/// Fisher–Yates: walk from the last index down to 1, swapping each slot with
/// a uniformly chosen slot in `0..=i`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut result = items.to_vec();
    for i in (1..result.len()).rev() {
        let j = rng.random_range(0..=i);
        result.swap(i, j);
    }
    result
}
