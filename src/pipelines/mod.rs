use std::fmt;

pub mod image;
pub mod url;

pub use self::url::ImportPipeline;

/// Stages an import passes through. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    Idle,
    Fetching,
    Extracting,
    Normalizing,
    Done,
    Failed,
}

impl fmt::Display for ImportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportState::Idle => "idle",
            ImportState::Fetching => "fetching",
            ImportState::Extracting => "extracting",
            ImportState::Normalizing => "normalizing",
            ImportState::Done => "done",
            ImportState::Failed => "failed",
        };
        f.write_str(name)
    }
}
