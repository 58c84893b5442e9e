use std::cell::Cell;
use std::fmt;
use std::process::ExitCode;

const RULE: &str = "________________________________________________";

/// How a halt was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    Fatal,
    /// Another fatal condition arrived while already halting.
    DoubleFatality,
}

impl Halt {
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(255)
    }
}

/// Reports the condition that ends the run, framed in a banner.
#[derive(Debug, Default)]
pub struct FatalHandler {
    halting: Cell<bool>,
}

impl FatalHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_halting(&self) -> bool {
        self.halting.get()
    }

    pub fn halt(&self, title: &str, err: &dyn fmt::Display) -> Halt {
        if self.is_halting() {
            tracing::error!("DOUBLE FATALITY: {err}");
            return Halt::DoubleFatality;
        }
        self.halting.set(true);
        tracing::error!("\n{RULE}\n------- {title}: {err}\n{RULE}\n");
        tracing::error!("Exiting");
        Halt::Fatal
    }

    /// Halt on a workload error, titled by whether it is bad input or a
    /// failure during generation.
    pub fn halt_on(&self, err: &uri_workload::Error) -> Halt {
        let title = if err.is_fatal() {
            "FATAL ERROR"
        } else {
            "CONFIGURATION ERROR"
        };
        self.halt(title, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Logger;
    use std::path::PathBuf;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn second_halt_escalates() {
        let handler = FatalHandler::new();
        assert!(!handler.is_halting());
        assert_eq!(handler.halt("FATAL ERROR", &"list unreadable"), Halt::Fatal);
        assert!(handler.is_halting());
        assert_eq!(
            handler.halt("FATAL ERROR", &"log flush failed"),
            Halt::DoubleFatality
        );
    }

    #[test]
    fn banner_reaches_the_log_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fatal.log");
        let logging = Logger::new(LevelFilter::INFO)
            .with_log_file(Some(path.clone()))
            .build()
            .unwrap();

        let handler = FatalHandler::new();
        tracing::dispatcher::with_default(logging.dispatch(), || {
            let empty = uri_workload::Error::EmptyFileList(PathBuf::from("pages.txt"));
            handler.halt_on(&empty);
            handler.halt_on(&uri_workload::Error::Config("late".into()));
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("------- FATAL ERROR: pages.txt was (likely) empty"));
        assert!(contents.contains(RULE));
        assert!(contents.contains("Exiting"));
        assert!(contents.contains("DOUBLE FATALITY: configuration error: late"));
    }
}
