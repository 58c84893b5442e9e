use serde::Deserialize;
use std::path::{Path, PathBuf};
use uri_workload::file_requests::DEFAULT_DOCUMENT_ROOT;

/// Optional TOML profile holding defaults for a family of traces.
///
/// ```toml
/// [workload]
/// html_ratio = 0.8
/// regex_ratio = 0.2
/// regex_zalpha = 1.5
/// html_files_list = "pages.txt"
/// seed = 7
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub workload: WorkloadProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadProfile {
    #[serde(default = "default_html_ratio")]
    pub html_ratio: f64,
    #[serde(default)]
    pub regex_ratio: f64,
    #[serde(default = "default_zalpha")]
    pub html_zalpha: f64,
    #[serde(default = "default_zalpha")]
    pub regex_zalpha: f64,
    #[serde(default = "default_html_files_list")]
    pub html_files_list: PathBuf,
    #[serde(default = "default_document_root")]
    pub document_root: PathBuf,
    #[serde(default)]
    pub sort_by_size: bool,
    #[serde(default)]
    pub descending: bool,
    #[serde(default = "default_skew_law")]
    pub skew_law: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let profile: Profile = toml::from_str(&contents)?;
        Ok(profile)
    }
}

impl Default for WorkloadProfile {
    fn default() -> Self {
        Self {
            html_ratio: default_html_ratio(),
            regex_ratio: 0.0,
            html_zalpha: default_zalpha(),
            regex_zalpha: default_zalpha(),
            html_files_list: default_html_files_list(),
            document_root: default_document_root(),
            sort_by_size: false,
            descending: false,
            skew_law: default_skew_law(),
            seed: None,
        }
    }
}

fn default_html_ratio() -> f64 {
    1.0
}
fn default_zalpha() -> f64 {
    -1.0
}
fn default_html_files_list() -> PathBuf {
    PathBuf::from("./")
}
fn default_document_root() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT_ROOT)
}
fn default_skew_law() -> String {
    "closest-weight".to_string()
}
