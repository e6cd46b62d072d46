#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod geometry;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod scale;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ColorBounds, Config, LayoutConfig};
pub use ir::Item;
pub use layout::{CircleLayout, Layout, LayoutError, compute_layout};
pub use render::render_svg;
pub use theme::Theme;
