use lexapprox_core::EngineError;
use lexapprox_persistence::ExportError;
use lexapprox_plot::PlotError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("missing query parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("invalid value '{value}' for query parameter '{name}'")]
    InvalidParameter { name: &'static str, value: String },

    #[error("no model with id {0}")]
    UnknownModel(u32),

    #[error("no model selected; call /models?id=<id> first")]
    NoModelSelected,

    #[error("no game in progress; call /suggestions first")]
    NoGame,

    #[error("no route for {0}")]
    RouteNotFound(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(String),
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::Engine(err) => match err {
                EngineError::NotFound(_) => 404,
                EngineError::Precondition(_)
                | EngineError::EmptyHistory
                | EngineError::InsufficientCandidates { .. } => 409,
                EngineError::InvalidSpace(_)
                | EngineError::Parse { .. }
                | EngineError::Io(_)
                | EngineError::Config(_) => 500,
            },
            ServerError::Plot(_) => 500,
            ServerError::Export(ExportError::NotRevealed) => 409,
            ServerError::Export(_) => 500,
            ServerError::MissingParameter(_) | ServerError::InvalidParameter { .. } => 422,
            ServerError::UnknownModel(_) | ServerError::RouteNotFound(_) => 404,
            ServerError::NoModelSelected | ServerError::NoGame => 409,
            ServerError::MethodNotAllowed(_) => 405,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServerError::Engine(err) => err.code(),
            ServerError::Plot(_) => "plot",
            ServerError::Export(ExportError::NotRevealed) => "not_revealed",
            ServerError::Export(_) => "export",
            ServerError::MissingParameter(_) => "missing_parameter",
            ServerError::InvalidParameter { .. } => "invalid_parameter",
            ServerError::UnknownModel(_) => "unknown_model",
            ServerError::NoModelSelected => "no_model_selected",
            ServerError::NoGame => "no_game",
            ServerError::RouteNotFound(_) => "route_not_found",
            ServerError::MethodNotAllowed(_) => "method_not_allowed",
        }
    }
}
