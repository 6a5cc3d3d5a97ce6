use super::stream::RandomStream;

/// One Bernoulli trial with success probability `p`.
///
/// A probability outside [0, 1] (including NaN) yields the inactive state
/// without consuming a draw.
pub fn binomial(p: f64, stream: &mut RandomStream) -> u8 {
    if !(0.0..=1.0).contains(&p) {
        return 0;
    }
    if p > stream.uniform() { 1 } else { 0 }
}
