use crate::config::{Profile, WorkloadProfile};
use crate::logging::Logger;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use uri_workload::{Error, FileOrder, Result, Skew, SkewLaw, WorkloadConfig};

/// Generate a list of URIs for web server benchmarking experiments.
#[derive(Parser, Debug)]
#[command(name = "urigen", version)]
pub struct Args {
    /// Output file name
    pub output_file: PathBuf,

    /// Number of requests to generate
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub n_requests: u64,

    /// Ratio of html requests [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub html_ratio: Option<f64>,

    /// Ratio of regex requests [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub regex_ratio: Option<f64>,

    /// html file popularity Zipf alpha (-1 to disable) [default: -1]
    #[arg(long, allow_negative_numbers = true)]
    pub html_zalpha: Option<f64>,

    /// Regex strength Zipf alpha (-1 to disable) [default: -1]
    #[arg(long, allow_negative_numbers = true)]
    pub regex_zalpha: Option<f64>,

    /// File holding html pages to request [default: ./]
    #[arg(long)]
    pub html_files_list: Option<PathBuf>,

    /// Directory the web server serves pages from [default: /media/wiki/]
    #[arg(long)]
    pub document_root: Option<PathBuf>,

    /// Rank pages by size instead of shuffling them
    #[arg(long)]
    pub sort_by_size: bool,

    /// With --sort-by-size, make the largest pages the most popular
    #[arg(long)]
    pub descending: bool,

    /// Rank search for skewed draws: closest-weight or zipf [default: closest-weight]
    #[arg(long)]
    pub skew_law: Option<SkewLaw>,

    /// Seed for the random source (drawn from the OS if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML profile providing defaults for the options above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Mirror log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit console logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Args {
    pub fn logger(&self) -> Logger {
        let level = match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::WARN,
            (false, 0) => LevelFilter::INFO,
            (false, 1) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        Logger::new(level)
            .with_log_file(self.log_file.clone())
            .with_json(self.json_logs)
    }

    /// The `--config` profile, or built-in defaults.
    pub fn profile(&self) -> Result<Profile> {
        match &self.config {
            Some(path) => {
                let profile = Profile::load(path).map_err(|e| {
                    Error::Config(format!("cannot load profile {}: {e}", path.display()))
                })?;
                tracing::info!(profile = %path.display(), "loaded profile");
                Ok(profile)
            }
            None => Ok(Profile::default()),
        }
    }

    /// Merge explicit flags over `profile` and validate the result.
    pub fn workload(&self, profile: &WorkloadProfile) -> Result<WorkloadConfig> {
        let n_requests = usize::try_from(self.n_requests)
            .map_err(|_| Error::Config(format!("too many requests: {}", self.n_requests)))?;

        let skew_law = match self.skew_law {
            Some(law) => law,
            None => profile.skew_law.parse()?,
        };

        let config = WorkloadConfig {
            output_file: self.output_file.clone(),
            n_requests,
            html_ratio: self.html_ratio.unwrap_or(profile.html_ratio),
            regex_ratio: self.regex_ratio.unwrap_or(profile.regex_ratio),
            html_skew: skew("html", self.html_zalpha.unwrap_or(profile.html_zalpha))?,
            regex_skew: skew("regex", self.regex_zalpha.unwrap_or(profile.regex_zalpha))?,
            skew_law,
            html_files_list: self
                .html_files_list
                .clone()
                .unwrap_or_else(|| profile.html_files_list.clone()),
            document_root: self
                .document_root
                .clone()
                .unwrap_or_else(|| profile.document_root.clone()),
            file_order: FileOrder::from_flags(
                self.sort_by_size || profile.sort_by_size,
                !(self.descending || profile.descending),
            ),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn seed(&self, profile: &WorkloadProfile) -> Option<u64> {
        self.seed.or(profile.seed)
    }
}

fn skew(which: &str, zalpha: f64) -> Result<Skew> {
    Skew::from_zalpha(zalpha).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("{which}: {msg}")),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("urigen").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_a_file_only_uniform_trace() {
        let args = parse(&["out.txt", "100"]);
        let config = args.workload(&WorkloadProfile::default()).unwrap();
        assert_eq!(config.n_requests, 100);
        assert_eq!(config.html_ratio, 1.0);
        assert_eq!(config.regex_ratio, 0.0);
        assert_eq!(config.html_skew, Skew::Uniform);
        assert_eq!(config.regex_skew, Skew::Uniform);
        assert_eq!(config.skew_law, SkewLaw::ClosestWeight);
        assert_eq!(config.file_order, FileOrder::Shuffled);
        assert_eq!(config.html_files_list, PathBuf::from("./"));
    }

    #[test]
    fn negative_zalpha_is_accepted_as_a_value() {
        let args = parse(&[
            "out.txt",
            "10",
            "--html-zalpha",
            "-1",
            "--regex-zalpha",
            "1.5",
            "--regex-ratio",
            "0.5",
            "--html-ratio",
            "0.5",
        ]);
        let config = args.workload(&WorkloadProfile::default()).unwrap();
        assert_eq!(config.html_skew, Skew::Uniform);
        assert_eq!(config.regex_skew, Skew::Zipf(1.5));
    }

    #[test]
    fn zero_requests_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["urigen", "out.txt", "0"]).is_err());
    }

    #[test]
    fn invalid_inputs_are_configuration_errors() {
        let profile = WorkloadProfile::default();
        for argv in [
            &["out.txt", "10", "--regex-ratio", "0.5"][..],
            &["out.txt", "10", "--html-ratio", "-0.2"][..],
            &["out.txt", "10", "--html-zalpha", "0.5"][..],
            &["out.txt", "10", "--regex-zalpha", "1"][..],
        ] {
            let err = parse(argv).workload(&profile).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{argv:?} gave {err}");
        }
    }

    #[test]
    fn flags_override_the_profile() {
        let profile: Profile = toml::from_str(
            r#"
            [workload]
            html_ratio = 0.5
            regex_ratio = 0.5
            regex_zalpha = 2.0
            skew_law = "zipf"
            descending = true
            sort_by_size = true
            seed = 3
            "#,
        )
        .unwrap();
        let args = parse(&["out.txt", "10", "--regex-zalpha", "1.1", "--seed", "8"]);
        let config = args.workload(&profile.workload).unwrap();
        assert_eq!(config.html_ratio, 0.5);
        assert_eq!(config.regex_skew, Skew::Zipf(1.1));
        assert_eq!(config.skew_law, SkewLaw::Zipf);
        assert_eq!(config.file_order, FileOrder::DescendingSize);
        assert_eq!(args.seed(&profile.workload), Some(8));
        assert_eq!(parse(&["o", "1"]).seed(&profile.workload), Some(3));
    }

    #[test]
    fn quiet_and_verbose_pick_the_log_level() {
        assert_eq!(parse(&["o", "1", "-q"]).logger().level(), LevelFilter::WARN);
        assert_eq!(parse(&["o", "1"]).logger().level(), LevelFilter::INFO);
        assert_eq!(parse(&["o", "1", "-vv"]).logger().level(), LevelFilter::TRACE);
        assert!(Args::try_parse_from(["urigen", "o", "1", "-q", "-v"]).is_err());
    }
}
