use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("nothing to plot: {0}")]
    Empty(String),
}
