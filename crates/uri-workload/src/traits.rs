use crate::error::Result;
use rand::RngCore;

/// A rendered request URI, one line of the output trace.
pub type RequestRecord = String;

/// Ordered sequence of request records.
pub type RequestBatch = Vec<RequestRecord>;

/// Common interface for the request generators.
///
/// Implementations: regex queries, static file fetches.
/// The random source is injected so that a seeded run is reproducible.
pub trait RequestGenerator {
    /// Produce exactly `n_req` records, in draw order (not shuffled).
    fn generate(&self, n_req: usize, rng: &mut dyn RngCore) -> Result<RequestBatch>;

    /// Human-readable name of the request type.
    fn name(&self) -> &'static str;
}
