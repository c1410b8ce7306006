use aurum_codec::CodecError;
use aurum_config::ConfigError;
use aurum_core::CoreError;
use thiserror::Error;

/// Error type that unifies failures from the engine's crates.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Calculation error: {0}")]
    Core(#[from] CoreError),
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
