use crate::traits::RequestBatch;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of `(file, regex)` requests for a trace of `n_requests`.
///
/// Each count is `floor(n_requests * ratio)`; a non-positive ratio yields
/// zero, so the two counts may sum to less than `n_requests`.
pub fn request_counts(n_requests: usize, html_ratio: f64, regex_ratio: f64) -> (usize, usize) {
    let count = |ratio: f64| {
        if ratio > 0.0 {
            (n_requests as f64 * ratio).floor() as usize
        } else {
            0
        }
    };
    (count(html_ratio), count(regex_ratio))
}

/// Interleave two typed batches into one uniformly shuffled batch.
pub fn mix<R>(regex_batch: RequestBatch, file_batch: RequestBatch, rng: &mut R) -> RequestBatch
where
    R: Rng + ?Sized,
{
    let mut all = regex_batch;
    all.extend(file_batch);
    all.shuffle(rng);
    all
}
