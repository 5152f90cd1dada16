mod environment;
mod scaffold_config;
mod settings;

pub use environment::Environment;
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    LoggingSettings, ProfileSettings, ScoringProvider, ScoringSettings, ScratchSettings,
    ServerSettings, Settings, TranscriptionSettings,
};
