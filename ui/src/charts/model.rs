//! Time-allocation aggregation and proportional pie geometry.
//!
//! Three independent axes classify the same complete activities: active
//! learning process (4 categories), interaction type (4), and key
//! application of technology (8). Each axis sums minutes per category and
//! lays the categories out as pie slices in declared order, starting at 12
//! o'clock.

use crate::core::lexicon::{Coded, Interaction, KeyApplication, Strategy};
use crate::core::store::Activity;

/// Slices thinner than this keep their value queryable but draw no on-chart
/// label; anything smaller would collide with its neighbours.
pub const MIN_LABEL_SWEEP_DEG: f64 = 18.0;

/// One category's share of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub minutes: u32,
    /// Degrees clockwise from 12 o'clock where this slice starts.
    pub start_deg: f64,
    /// Angular span; zero when the category has no time or the chart is empty.
    pub sweep_deg: f64,
}

impl Slice {
    /// Whether the on-chart label is drawn at all.
    pub fn label_visible(&self) -> bool {
        self.minutes > 0 && self.sweep_deg >= MIN_LABEL_SWEEP_DEG
    }

    /// Label anchor as percentages of the chart square, at the slice's mid
    /// angle. Thin slices anchor closer to the center.
    pub fn label_anchor(&self) -> (f64, f64) {
        let mid = self.start_deg + self.sweep_deg / 2.0;
        let radians = (mid - 90.0).to_radians();
        let radius = if self.sweep_deg < 40.0 { 28.0 } else { 36.0 };
        (50.0 + radius * radians.cos(), 50.0 + radius * radians.sin())
    }

    /// Percent of total time, one decimal, e.g. `"33.3"`.
    pub fn percent(&self, total: u32) -> String {
        if total == 0 {
            return "0.0".to_string();
        }
        format!("{:.1}", self.minutes as f64 / total as f64 * 100.0)
    }
}

/// A fully computed chart for one classification axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub title: &'static str,
    pub slices: Vec<Slice>,
    pub total_minutes: u32,
}

impl ChartModel {
    fn build<T, F>(title: &'static str, categories: &[T], activities: &[Activity], select: F) -> Self
    where
        T: Coded + PartialEq,
        T: ColoredCategory,
        F: Fn(&Activity) -> Option<T>,
    {
        let totals: Vec<u32> = categories
            .iter()
            .map(|category| {
                activities
                    .iter()
                    .filter(|a| select(a).map(|c| c == *category).unwrap_or(false))
                    .map(Activity::planned_minutes)
                    .sum()
            })
            .collect();
        let total_minutes: u32 = totals.iter().sum();

        let mut cursor = 0.0;
        let slices = categories
            .iter()
            .zip(totals)
            .map(|(category, minutes)| {
                let sweep = if total_minutes > 0 {
                    minutes as f64 / total_minutes as f64 * 360.0
                } else {
                    0.0
                };
                let slice = Slice {
                    key: category.code(),
                    label: category.label(),
                    color: category.category_color(),
                    minutes,
                    start_deg: cursor,
                    sweep_deg: sweep,
                };
                cursor += sweep;
                slice
            })
            .collect();

        Self {
            title,
            slices,
            total_minutes,
        }
    }

    /// CSS `conic-gradient` mirroring the slice geometry; a neutral disc
    /// when there is no time to chart.
    pub fn conic_gradient(&self) -> String {
        if self.total_minutes == 0 {
            return "conic-gradient(#f3f4f6 0deg 360deg)".to_string();
        }
        let stops: Vec<String> = self
            .slices
            .iter()
            .map(|s| {
                format!(
                    "{} {:.4}deg {:.4}deg",
                    s.color,
                    s.start_deg,
                    s.start_deg + s.sweep_deg
                )
            })
            .collect();
        format!("conic-gradient({})", stops.join(", "))
    }
}

/// Per-category display color, kept off the `Coded` trait because the
/// lexicon also codes non-charted vocabularies.
trait ColoredCategory {
    fn category_color(&self) -> &'static str;
}

impl ColoredCategory for Strategy {
    fn category_color(&self) -> &'static str {
        self.color()
    }
}

impl ColoredCategory for Interaction {
    fn category_color(&self) -> &'static str {
        self.color()
    }
}

impl ColoredCategory for KeyApplication {
    fn category_color(&self) -> &'static str {
        self.color()
    }
}

pub fn strategy_chart(activities: &[Activity]) -> ChartModel {
    ChartModel::build(
        "Active Learning Processes",
        &Strategy::ALL,
        activities,
        |a| a.strategy,
    )
}

pub fn interaction_chart(activities: &[Activity]) -> ChartModel {
    ChartModel::build("Interaction Types", &Interaction::ALL, activities, |a| {
        a.interaction
    })
}

pub fn key_app_chart(activities: &[Activity]) -> ChartModel {
    ChartModel::build(
        "Key Applications of Technology",
        &KeyApplication::ALL,
        activities,
        |a| a.key_app,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{ActivityField, PlannerState};

    fn activities(specs: &[(&str, &str)]) -> Vec<Activity> {
        let mut state = PlannerState::default();
        for (strategy, minutes) in specs {
            let id = state.add();
            state.update(id, ActivityField::Interaction, "class");
            state.update(id, ActivityField::Strategy, strategy);
            state.update(id, ActivityField::Minutes, minutes);
            state.update(id, ActivityField::Details, "x");
        }
        state.complete_activities()
    }

    #[test]
    fn four_distinct_categories_split_proportionally() {
        let acts = activities(&[
            ("activate", "10"),
            ("promote", "20"),
            ("facilitate", "30"),
            ("monitor", "40"),
        ]);
        let chart = strategy_chart(&acts);
        let sweeps: Vec<f64> = chart.slices.iter().map(|s| s.sweep_deg).collect();
        assert_eq!(sweeps, vec![36.0, 72.0, 108.0, 144.0]);
        assert!((chart.slices.iter().map(|s| s.sweep_deg).sum::<f64>() - 360.0).abs() < 1e-9);
        assert_eq!(chart.slices[3].percent(chart.total_minutes), "40.0");
    }

    #[test]
    fn zero_minute_category_draws_no_label() {
        let acts = activities(&[("activate", "30"), ("promote", "30")]);
        let chart = strategy_chart(&acts);
        let facilitate = chart.slices.iter().find(|s| s.key == "facilitate").unwrap();
        assert_eq!(facilitate.minutes, 0);
        assert_eq!(facilitate.sweep_deg, 0.0);
        assert!(!facilitate.label_visible());
    }

    #[test]
    fn thin_slices_suppress_labels_but_keep_values() {
        // 2 of 50 minutes → 14.4°, under the 18° legibility floor.
        let acts = activities(&[("activate", "48"), ("promote", "2")]);
        let chart = strategy_chart(&acts);
        let thin = chart.slices.iter().find(|s| s.key == "promote").unwrap();
        assert!(thin.sweep_deg < MIN_LABEL_SWEEP_DEG);
        assert!(!thin.label_visible());
        assert_eq!(thin.minutes, 2);
    }

    #[test]
    fn empty_chart_renders_neutral() {
        let chart = strategy_chart(&[]);
        assert_eq!(chart.total_minutes, 0);
        assert!(chart.slices.iter().all(|s| s.sweep_deg == 0.0));
        assert_eq!(chart.conic_gradient(), "conic-gradient(#f3f4f6 0deg 360deg)");
    }

    #[test]
    fn slices_accumulate_in_declared_order() {
        let acts = activities(&[("monitor", "10"), ("activate", "10")]);
        let chart = strategy_chart(&acts);
        // Declared order is activate, promote, facilitate, monitor: the
        // activate slice starts at 0° even though it was entered second.
        assert_eq!(chart.slices[0].key, "activate");
        assert_eq!(chart.slices[0].start_deg, 0.0);
        assert_eq!(chart.slices[3].start_deg, 180.0);
    }

    #[test]
    fn interaction_and_key_app_axes_aggregate_independently() {
        let mut state = PlannerState::default();
        let id = state.add();
        state.update(id, ActivityField::Interaction, "group");
        state.update(id, ActivityField::Strategy, "promote");
        state.update(id, ActivityField::Minutes, "25");
        state.update(id, ActivityField::Details, "x");
        state.update(id, ActivityField::KeyApp, "develop-metacognition");
        let acts = state.complete_activities();

        let by_interaction = interaction_chart(&acts);
        let group = by_interaction.slices.iter().find(|s| s.key == "group").unwrap();
        assert_eq!(group.sweep_deg, 360.0);

        let by_key_app = key_app_chart(&acts);
        assert_eq!(by_key_app.slices.len(), 8);
        let tagged = by_key_app
            .slices
            .iter()
            .find(|s| s.key == "develop-metacognition")
            .unwrap();
        assert_eq!(tagged.minutes, 25);
    }
}
