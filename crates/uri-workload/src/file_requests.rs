use crate::error::{Error, Result};
use crate::rank_sampler::RankSampler;
use crate::skew::{Skew, SkewLaw};
use crate::traits::{RequestBatch, RequestGenerator};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::path::{Path, PathBuf};

/// Where the benchmarked web server serves its pages from.
pub const DEFAULT_DOCUMENT_ROOT: &str = "/media/wiki/";

/// A candidate page and its size on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedFile {
    pub name: String,
    pub size: u64,
}

/// Rank order of the candidate pages before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileOrder {
    /// Random permutation, so rank carries no meaning beyond popularity.
    #[default]
    Shuffled,
    /// Smallest pages are the most popular.
    AscendingSize,
    /// Largest pages are the most popular.
    DescendingSize,
}

impl FileOrder {
    pub fn from_flags(sort: bool, ascending: bool) -> Self {
        match (sort, ascending) {
            (false, _) => FileOrder::Shuffled,
            (true, true) => FileOrder::AscendingSize,
            (true, false) => FileOrder::DescendingSize,
        }
    }
}

/// Read a newline-delimited page list. Surrounding whitespace is trimmed and
/// blank lines are skipped; an empty result is fatal.
pub fn load_file_list(list_path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(list_path).map_err(|e| Error::io(list_path, e))?;
    let names: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    if names.is_empty() {
        return Err(Error::EmptyFileList(list_path.to_path_buf()));
    }
    Ok(names)
}

/// Stat every page under `document_root`.
pub fn resolve_sizes(document_root: &Path, names: Vec<String>) -> Result<Vec<SizedFile>> {
    names
        .into_iter()
        .map(|name| {
            let path = document_root.join(name.trim_start_matches('/'));
            let size = std::fs::metadata(&path)
                .map_err(|e| Error::io(&path, e))?
                .len();
            Ok(SizedFile { name, size })
        })
        .collect()
}

/// Generates static page fetches from a list of pages under a document root.
#[derive(Debug, Clone)]
pub struct FileRequestGenerator {
    list_path: PathBuf,
    document_root: PathBuf,
    order: FileOrder,
    sampler: RankSampler,
}

impl FileRequestGenerator {
    pub fn new(list_path: impl Into<PathBuf>, skew: Skew, law: SkewLaw) -> Self {
        Self {
            list_path: list_path.into(),
            document_root: PathBuf::from(DEFAULT_DOCUMENT_ROOT),
            order: FileOrder::default(),
            sampler: RankSampler::new(skew, law),
        }
    }

    pub fn with_document_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.document_root = root.into();
        self
    }

    pub fn with_order(mut self, order: FileOrder) -> Self {
        self.order = order;
        self
    }

    /// Load, stat and rank the candidate pages.
    pub fn ranked_files(&self, rng: &mut dyn RngCore) -> Result<Vec<SizedFile>> {
        let names = load_file_list(&self.list_path)?;
        let mut files = resolve_sizes(&self.document_root, names)?;
        match self.order {
            FileOrder::Shuffled => files.shuffle(rng),
            FileOrder::AscendingSize => files.sort_by_key(|f| f.size),
            FileOrder::DescendingSize => files.sort_by(|a, b| b.size.cmp(&a.size)),
        }
        tracing::debug!(
            list = %self.list_path.display(),
            files = files.len(),
            order = ?self.order,
            "ranked candidate pages"
        );
        Ok(files)
    }
}

impl RequestGenerator for FileRequestGenerator {
    fn generate(&self, n_req: usize, rng: &mut dyn RngCore) -> Result<RequestBatch> {
        if n_req == 0 {
            return Ok(Vec::new());
        }
        let files = self.ranked_files(rng)?;
        let names: Vec<String> = files.into_iter().map(|f| f.name).collect();

        match self.sampler.skew() {
            Skew::Uniform => {
                // The last page is never picked in uniform mode; a single
                // page list still has to yield something.
                let upper = names.len() - 1;
                Ok((0..n_req)
                    .map(|_| {
                        let i = if upper == 0 {
                            0
                        } else {
                            rng.gen_range(0..upper)
                        };
                        names[i].clone()
                    })
                    .collect())
            }
            Skew::Zipf(_) => self.sampler.draw(&names, n_req, rng),
        }
    }

    fn name(&self) -> &'static str {
        "html"
    }
}
