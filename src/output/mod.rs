//! Output encoders and frame sinks (PNG, animated PNG, terminal).

mod apng;
mod png_encoder;
mod terminal;

pub use apng::ApngWriter;
pub use png_encoder::PngEncoder;
pub use terminal::{TerminalEncoder, TerminalMode, TerminalPlayer};
