use crate::error::Result;
use crate::rank_sampler::RankSampler;
use crate::skew::{Skew, SkewLaw};
use crate::traits::{RequestBatch, RequestGenerator};
use rand::{Rng, RngCore};

/// Regex strength bins, ordered by popularity rank. Matching cost grows
/// exponentially from one bin to the next.
pub const REGEX_STRENGTH_BINS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Render a strength as a query whose backtracking cost scales with `k`.
pub fn render_regex_query(k: u32) -> String {
    format!("?regex={}b", "a".repeat(k as usize))
}

/// Generates `?regex=aa...ab` queries with skewed or uniform strengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexRequestGenerator {
    sampler: RankSampler,
}

impl RegexRequestGenerator {
    pub fn new(skew: Skew, law: SkewLaw) -> Self {
        Self {
            sampler: RankSampler::new(skew, law),
        }
    }

    /// Draw `n_req` strengths.
    ///
    /// Uniform mode draws from `[min - 1, max - 1)` of the bins rather than
    /// from the bins themselves, so strengths run 0..=8.
    pub fn strengths(&self, n_req: usize, rng: &mut dyn RngCore) -> Result<Vec<u32>> {
        if n_req == 0 {
            return Ok(Vec::new());
        }
        match self.sampler.skew() {
            Skew::Uniform => {
                let lo = REGEX_STRENGTH_BINS.iter().min().copied().unwrap_or(1) - 1;
                let hi = REGEX_STRENGTH_BINS.iter().max().copied().unwrap_or(1) - 1;
                Ok((0..n_req).map(|_| rng.gen_range(lo..hi)).collect())
            }
            Skew::Zipf(_) => self.sampler.draw(&REGEX_STRENGTH_BINS, n_req, rng),
        }
    }
}

impl RequestGenerator for RegexRequestGenerator {
    fn generate(&self, n_req: usize, rng: &mut dyn RngCore) -> Result<RequestBatch> {
        let strengths = self.strengths(n_req, rng)?;
        tracing::debug!(
            n_req,
            zalpha = self.sampler.skew().zalpha(),
            "generated regex strengths"
        );
        Ok(strengths.into_iter().map(render_regex_query).collect())
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Strength encoded in a `?regex=a{k}b` query, or None if malformed.
    fn strength_of(uri: &str) -> Option<usize> {
        let body = uri.strip_prefix("?regex=")?.strip_suffix('b')?;
        body.chars().all(|c| c == 'a').then_some(body.len())
    }

    #[test]
    fn renders_repeated_a_then_b() {
        assert_eq!(render_regex_query(0), "?regex=b");
        assert_eq!(render_regex_query(3), "?regex=aaab");
    }

    #[test]
    fn zero_requests_is_empty_for_any_skew() {
        let mut rng = StdRng::seed_from_u64(0);
        for skew in [Skew::Uniform, Skew::Zipf(1.5), Skew::Zipf(3.0)] {
            let gen = RegexRequestGenerator::new(skew, SkewLaw::ClosestWeight);
            assert!(gen.generate(0, &mut rng).unwrap().is_empty());
        }
    }

    #[test]
    fn uniform_strengths_stay_below_nine() {
        let mut rng = StdRng::seed_from_u64(12);
        let gen = RegexRequestGenerator::new(Skew::Uniform, SkewLaw::default());
        let uris = gen.generate(5, &mut rng).unwrap();
        assert_eq!(uris.len(), 5);
        for uri in &uris {
            let k = strength_of(uri).unwrap_or_else(|| panic!("malformed {uri}"));
            assert!(k < 9, "strength {k} out of range");
        }

        let all = gen.strengths(10_000, &mut rng).unwrap();
        assert_eq!(all.iter().min(), Some(&0));
        assert_eq!(all.iter().max(), Some(&8));
    }

    #[test]
    fn skewed_strengths_come_from_the_bins() {
        let mut rng = StdRng::seed_from_u64(4);
        let gen = RegexRequestGenerator::new(Skew::Zipf(2.0), SkewLaw::ClosestWeight);
        let uris = gen.generate(1_000, &mut rng).unwrap();
        assert_eq!(uris.len(), 1_000);
        let ones = uris
            .iter()
            .map(|u| strength_of(u).unwrap())
            .inspect(|k| assert!((1..=10).contains(k)))
            .filter(|&k| k == 1)
            .count();
        assert!(ones > 800, "weakest bin drawn {ones} times");
    }
}
