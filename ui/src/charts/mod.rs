mod model;
mod view;

pub use model::{
    interaction_chart, key_app_chart, strategy_chart, ChartModel, Slice, MIN_LABEL_SWEEP_DEG,
};
pub use view::{ChartCard, ChartsBoard};
