#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod placement;
pub mod scene;

pub use config::{Config, EngineConfig, load_config};
pub use placement::{
    GlyphBox, PlacementEngine, PlacementProperty, PlacementRange, Point, Rect, TILE_EXTENT,
};
pub use scene::{Scene, SceneError, parse_scene};

#[cfg(feature = "cli")]
pub use cli::run;
