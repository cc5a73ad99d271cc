mod arrows;
mod layout;
mod view;

pub use arrows::{connectors, svg_path, Connector};
pub use layout::{band_for_offset, MapLayout, Placement, DRAG_THRESHOLD_PX, ROW_COUNT, ROW_HEIGHT, SLOT_GAP, SLOT_WIDTH};
pub use view::DesignMap;
