use crate::error::{Error, Result};
use crate::skew::{Skew, SkewLaw};
use crate::zeta::riemann_zeta;
use rand::distributions::Open01;
use rand::Rng;
use rand_distr::{Distribution, Zipf};

/// Draws candidates with replacement, biased toward low ranks when skewed.
///
/// Candidates are ranked by position: index 0 is rank 1, the most popular
/// element. With [`Skew::Uniform`] every index is equally likely.
///
/// The default [`SkewLaw::ClosestWeight`] builds the table
/// `w(i) = (1 / ζ(alpha)) / i^alpha` and, for each draw, binary searches it
/// for the weight closest to a key drawn from `(0, 1)`. The table decreases
/// with rank while the search narrows as if it increased, so the result is
/// not a Zipf sample: for ten candidates only indices 0, 3, 6 and 9 are ever
/// returned, with index 0 taking more than 90% of draws. Traces generated
/// before [`SkewLaw::Zipf`] existed depend on this shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankSampler {
    skew: Skew,
    law: SkewLaw,
}

impl RankSampler {
    pub fn new(skew: Skew, law: SkewLaw) -> Self {
        Self { skew, law }
    }

    pub fn uniform() -> Self {
        Self::new(Skew::Uniform, SkewLaw::default())
    }

    pub fn skew(&self) -> Skew {
        self.skew
    }

    pub fn law(&self) -> SkewLaw {
        self.law
    }

    /// Draw `n_elems` candidates.
    pub fn draw<T, R>(&self, candidates: &[T], n_elems: usize, rng: &mut R) -> Result<Vec<T>>
    where
        T: Clone,
        R: Rng + ?Sized,
    {
        let indices = self.draw_indices(candidates.len(), n_elems, rng)?;
        Ok(indices.into_iter().map(|i| candidates[i].clone()).collect())
    }

    /// Draw `n_elems` indices into a candidate set of size `len`.
    pub fn draw_indices<R>(&self, len: usize, n_elems: usize, rng: &mut R) -> Result<Vec<usize>>
    where
        R: Rng + ?Sized,
    {
        if len == 0 {
            return Err(Error::EmptyCandidates);
        }

        let alpha = match self.skew {
            Skew::Uniform => {
                return Ok((0..n_elems).map(|_| rng.gen_range(0..len)).collect());
            }
            Skew::Zipf(alpha) => alpha,
        };

        match self.law {
            SkewLaw::ClosestWeight => {
                let weights = zeta_weights(alpha, len);
                Ok((0..n_elems)
                    .map(|_| {
                        let key: f64 = rng.sample(Open01);
                        closest_weight_index(&weights, key)
                    })
                    .collect())
            }
            SkewLaw::Zipf => {
                let dist = Zipf::new(len as u64, alpha)
                    .map_err(|e| Error::Config(format!("invalid Zipf parameters: {e}")))?;
                // Zipf yields ranks in 1..=len.
                Ok((0..n_elems)
                    .map(|_| (dist.sample(rng) as usize).clamp(1, len) - 1)
                    .collect())
            }
        }
    }
}

/// Per-rank weights `(1 / ζ(alpha)) / i^alpha` for ranks `1..=n`.
pub fn zeta_weights(alpha: f64, n: usize) -> Vec<f64> {
    let z = 1.0 / riemann_zeta(alpha);
    (1..=n).map(|i| z / (i as f64).powf(alpha)).collect()
}

/// Binary search over a decreasing weight table for the entry closest to
/// `key`, returning the last midpoint examined.
///
/// A key above the midpoint weight moves the right bound below it, a key
/// below moves the left bound past it, and an exact match stops the search.
pub fn closest_weight_index(weights: &[f64], key: f64) -> usize {
    let (mut lo, mut hi) = (0usize, weights.len());
    let mut mid = 0;
    while lo < hi {
        mid = (lo + hi) / 2;
        if key > weights[mid] {
            if mid == 0 {
                break;
            }
            hi = mid - 1;
        } else if key < weights[mid] {
            lo = mid + 1;
        } else {
            break;
        }
    }
    mid
}
