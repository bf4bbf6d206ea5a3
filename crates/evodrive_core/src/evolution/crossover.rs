use rand::Rng;

/// Alternating-index crossover.
///
/// The first child takes even indices from `a` and odd indices from `b`;
/// the second child takes the complement.
#[must_use]
pub fn alternating(a: &[f32], b: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let mut first = Vec::with_capacity(a.len());
    let mut second = Vec::with_capacity(a.len());
    for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
        if i % 2 == 0 {
            first.push(x);
            second.push(y);
        } else {
            first.push(y);
            second.push(x);
        }
    }
    (first, second)
}

/// Single-point crossover at a uniformly drawn cut in `[1, len)`.
pub fn single_point<R: Rng>(a: &[f32], b: &[f32], rng: &mut R) -> (Vec<f32>, Vec<f32>) {
    let len = a.len().min(b.len());
    if len < 2 {
        return (a[..len].to_vec(), b[..len].to_vec());
    }
    let cut = rng.gen_range(1..len);

    let mut first = a[..cut].to_vec();
    first.extend_from_slice(&b[cut..len]);
    let mut second = b[..cut].to_vec();
    second.extend_from_slice(&a[cut..len]);
    (first, second)
}
