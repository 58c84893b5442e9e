use crate::error::{Error, Result};
use crate::file_requests::{FileOrder, FileRequestGenerator, DEFAULT_DOCUMENT_ROOT};
use crate::mixer::{mix, request_counts};
use crate::regex_requests::RegexRequestGenerator;
use crate::skew::{Skew, SkewLaw};
use crate::traits::{RequestBatch, RequestGenerator};
use rand::RngCore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Fully resolved parameters of one trace.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub output_file: PathBuf,
    pub n_requests: usize,
    pub html_ratio: f64,
    pub regex_ratio: f64,
    pub html_skew: Skew,
    pub regex_skew: Skew,
    pub skew_law: SkewLaw,
    pub html_files_list: PathBuf,
    pub document_root: PathBuf,
    pub file_order: FileOrder,
}

impl WorkloadConfig {
    /// A trace of only file requests, unskewed.
    pub fn new(output_file: impl Into<PathBuf>, n_requests: usize) -> Self {
        Self {
            output_file: output_file.into(),
            n_requests,
            html_ratio: 1.0,
            regex_ratio: 0.0,
            html_skew: Skew::Uniform,
            regex_skew: Skew::Uniform,
            skew_law: SkewLaw::default(),
            html_files_list: PathBuf::from("./"),
            document_root: PathBuf::from(DEFAULT_DOCUMENT_ROOT),
            file_order: FileOrder::default(),
        }
    }

    /// Reject ratio combinations no trace can satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.n_requests == 0 {
            return Err(Error::Config(
                "number of requests must be positive".to_string(),
            ));
        }
        let (html, regex) = (self.html_ratio, self.regex_ratio);
        if !html.is_finite() || !regex.is_finite() || html < 0.0 || regex < 0.0 {
            return Err(Error::Config(format!(
                "Ratios are between 0 and 1 (html: {html}, regex: {regex})"
            )));
        }
        if html + regex > 1.0 {
            return Err(Error::Config(format!(
                "Given ratios exceed 1 (html: {html}, regex: {regex})"
            )));
        }
        Ok(())
    }
}

/// Generate the regex and file batches once and shuffle them together.
pub fn generate_batch(config: &WorkloadConfig, rng: &mut dyn RngCore) -> Result<RequestBatch> {
    config.validate()?;
    let (n_file, n_regex) = request_counts(config.n_requests, config.html_ratio, config.regex_ratio);

    let regex_batch = if config.regex_ratio > 0.0 {
        RegexRequestGenerator::new(config.regex_skew, config.skew_law).generate(n_regex, rng)?
    } else {
        Vec::new()
    };

    let file_batch = if config.html_ratio > 0.0 {
        FileRequestGenerator::new(&config.html_files_list, config.html_skew, config.skew_law)
            .with_document_root(&config.document_root)
            .with_order(config.file_order)
            .generate(n_file, rng)?
    } else {
        Vec::new()
    };

    tracing::info!(
        regex = regex_batch.len(),
        html = file_batch.len(),
        regex_zalpha = config.regex_skew.zalpha(),
        html_zalpha = config.html_skew.zalpha(),
        law = %config.skew_law,
        "generated requests"
    );
    Ok(mix(regex_batch, file_batch, rng))
}

/// Write one record per line, creating or truncating `path`.
pub fn write_batch(path: &Path, batch: &[String]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);
    for record in batch {
        writeln!(out, "{record}").map_err(|e| Error::io(path, e))?;
    }
    out.flush().map_err(|e| Error::io(path, e))
}

/// Generate a trace and write it to `config.output_file`. Returns the number
/// of records written.
pub fn generate(config: &WorkloadConfig, rng: &mut dyn RngCore) -> Result<usize> {
    let batch = generate_batch(config, rng)?;
    write_batch(&config.output_file, &batch)?;
    tracing::info!(
        output = %config.output_file.display(),
        requests = batch.len(),
        "trace written"
    );
    Ok(batch.len())
}
