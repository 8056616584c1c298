#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod font;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod renderer;
pub mod session;
pub mod surface;
pub mod tools;

pub use app::PaintApp;
pub use config::Config;
pub use error::{ConfigError, FontError, PaintError, PaintResult};
pub use font::BitmapFont;
pub use geometry::{PixelRect, Point};
pub use input::{InputEvent, InputHandler};
pub use palette::Palette;
pub use renderer::Renderer;
pub use session::Session;
pub use surface::{PixelSurface, Surface};
pub use tools::{Tool, ToolContext, ToolKind, ToolType};
