use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Log verbosity plus an optional file mirroring the console.
///
/// Nothing is installed globally: [`Logger::build`] hands back a
/// [`Dispatch`] that the caller scopes with
/// `tracing::dispatcher::with_default`.
#[derive(Debug, Clone)]
pub struct Logger {
    level: LevelFilter,
    log_file: Option<PathBuf>,
    json: bool,
}

/// A built logger: the dispatch to run under and the mirror file, if any.
pub struct Logging {
    dispatch: Dispatch,
    sink: Option<Arc<File>>,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            log_file: None,
            json: false,
        }
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Open the mirror file (truncating it) and assemble the subscriber.
    pub fn build(&self) -> io::Result<Logging> {
        let sink = match &self.log_file {
            Some(path) => Some(Arc::new(File::create(path)?)),
            None => None,
        };
        Ok(self.assemble(sink))
    }

    /// Console only, for reporting why the mirror could not be opened.
    pub fn console_only(&self) -> Logging {
        self.assemble(None)
    }

    fn assemble(&self, sink: Option<Arc<File>>) -> Logging {
        // RUST_LOG wins over the command-line verbosity.
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(self.level().into()));

        let console: Box<dyn Layer<Registry> + Send + Sync> = if self.json {
            fmt::layer().json().boxed()
        } else {
            fmt::layer().with_target(false).boxed()
        };

        let mirror = sink.clone().map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(file)
        });

        let subscriber = tracing_subscriber::registry()
            .with(console)
            .with(mirror)
            .with(filter);

        Logging {
            dispatch: Dispatch::new(subscriber),
            sink,
        }
    }
}

impl Logging {
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Flush the mirror file to disk.
    pub fn sync(&self) -> io::Result<()> {
        match &self.sink {
            Some(file) => file.sync_all(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_events_to_the_log_file_without_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urigen.log");
        let logging = Logger::new(LevelFilter::INFO)
            .with_log_file(Some(path.clone()))
            .build()
            .unwrap();

        tracing::dispatcher::with_default(logging.dispatch(), || {
            tracing::info!(pages = 4, "loaded page list");
            tracing::trace!("too chatty");
        });
        logging.sync().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("loaded page list"), "{contents}");
        assert!(contents.contains("pages=4"));
        assert!(contents.contains("INFO"));
        assert!(!contents.contains('\u{1b}'));
        assert!(!contents.contains("too chatty"));
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(LevelFilter::INFO)
            .with_log_file(Some(dir.path().join("no").join("such").join("dir.log")));
        assert!(logger.build().is_err());
        assert!(logger.console_only().sync().is_ok());
    }
}
