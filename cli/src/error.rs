use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("no model with id {0} is configured")]
    UnknownModel(u32),

    #[error("no models are configured; pass --vectors or add [[models]] to the config")]
    NoModels,

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Engine(#[from] lexapprox_core::EngineError),

    #[error(transparent)]
    Plot(#[from] lexapprox_plot::PlotError),

    #[error(transparent)]
    Export(#[from] lexapprox_persistence::ExportError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
