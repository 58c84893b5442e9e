//! Synthetic URI workload traces for web server benchmarking.
//!
//! A trace mixes static page fetches and pathological regex queries, each
//! optionally skewed toward popular ranks, shuffled into a single
//! newline-delimited file.

pub mod error;
pub mod file_requests;
pub mod mixer;
pub mod rank_sampler;
pub mod regex_requests;
pub mod skew;
pub mod traits;
pub mod workload;
pub mod zeta;

pub use error::{Error, Result};
pub use file_requests::{FileOrder, FileRequestGenerator};
pub use mixer::{mix, request_counts};
pub use rank_sampler::RankSampler;
pub use regex_requests::RegexRequestGenerator;
pub use skew::{Skew, SkewLaw};
pub use traits::{RequestBatch, RequestGenerator};
pub use workload::{generate, generate_batch, write_batch, WorkloadConfig};
