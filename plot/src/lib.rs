//! PNG rendering for games: a 2-D projection of the embedding space with the
//! current round highlighted, and the similarity trajectory shown after a
//! reveal.

pub mod canvas;
pub mod error;
mod font;
pub mod projection;
pub mod space_plot;
pub mod trajectory;

pub use error::PlotError;
pub use error::Result;
pub use projection::SpaceProjection;
pub use space_plot::render_space_plot;
pub use trajectory::render_trajectory;
