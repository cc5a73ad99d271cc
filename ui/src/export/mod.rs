mod deliver;
mod prompt;
mod raster;
mod scene;
mod slides;

pub use deliver::{download_bytes, timestamp_slug};
pub use prompt::{build_prompt, copy_to_clipboard};
pub use raster::{capped_scale, scene_to_png, CHARTS_RASTER_SCALE, MAX_RASTER_SCALE, MAX_RASTER_SIDE};
pub use scene::{charts_scene, map_scene, Scene};
pub use slides::build_deck;
