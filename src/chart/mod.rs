mod error;
mod layout;
mod render;

pub use error::RenderError;
pub use render::render_chart;
