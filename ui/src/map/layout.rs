//! Grid placement for the design map.
//!
//! The map is a fixed 4-row grid (one row per interaction category, top to
//! bottom in declared order) with one column per complete activity in id
//! order. Placement is deterministic and stateless: computing the layout
//! twice for the same input yields identical geometry, which the export
//! scenes rely on to mirror the on-screen map exactly.

use crate::core::lexicon::Interaction;
use crate::core::store::{Activity, LessonMeta};

/// Width of one activity column, in CSS pixels.
pub const SLOT_WIDTH: f64 = 240.0;
/// Height of one interaction row.
pub const ROW_HEIGHT: f64 = 150.0;
/// Horizontal gap between an activity box and the next column.
pub const SLOT_GAP: f64 = 20.0;
/// Rows on the social plane axis.
pub const ROW_COUNT: usize = 4;
/// Net pointer displacement below which a gesture counts as a click rather
/// than a drag.
pub const DRAG_THRESHOLD_PX: f64 = 6.0;

/// One complete activity pinned to a grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub activity: Activity,
    /// 0-based row (interaction category order).
    pub row: usize,
    /// 0-based column (ordinal among complete activities).
    pub column: usize,
}

/// The computed design map: placements plus the time bookkeeping shown in
/// the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapLayout {
    pub placements: Vec<Placement>,
    pub total_minutes: u32,
    pub planned_minutes: Option<u32>,
    pub duration_mismatch: bool,
}

impl MapLayout {
    /// Projects the complete activities (already filtered, id order) onto
    /// the grid.
    pub fn compute(complete: &[Activity], meta: &LessonMeta) -> Self {
        let mut ordered: Vec<Activity> = complete.to_vec();
        ordered.sort_by_key(|a| a.id);

        let total_minutes: u32 = ordered.iter().map(Activity::planned_minutes).sum();
        let planned_minutes = meta.planned_minutes();
        let duration_mismatch = planned_minutes
            .map(|planned| planned != total_minutes)
            .unwrap_or(false);

        let placements = ordered
            .into_iter()
            .enumerate()
            .map(|(column, activity)| {
                let row = activity.interaction.map(Interaction::row).unwrap_or(0);
                Placement {
                    activity,
                    row,
                    column,
                }
            })
            .collect();

        Self {
            placements,
            total_minutes,
            planned_minutes,
            duration_mismatch,
        }
    }

    pub fn columns(&self) -> usize {
        self.placements.len()
    }

    /// Natural (un-clipped) grid width.
    pub fn grid_width(&self) -> f64 {
        SLOT_WIDTH * self.columns().max(1) as f64
    }

    pub fn grid_height(&self) -> f64 {
        ROW_HEIGHT * ROW_COUNT as f64
    }
}

/// Maps a vertical offset inside the grid to the interaction row whose band
/// contains it. The grid divides into four equal bands; release points
/// outside the grid clamp to the nearest row.
pub fn band_for_offset(offset_y: f64, grid_height: f64) -> Interaction {
    if grid_height <= 0.0 {
        return Interaction::ALL[0];
    }
    let band = (offset_y / grid_height * ROW_COUNT as f64).floor();
    let index = band.clamp(0.0, (ROW_COUNT - 1) as f64) as usize;
    Interaction::ALL[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::ActivityField;
    use crate::core::store::PlannerState;

    fn planner_with(rows: &[(&str, &str, &str, &str)]) -> PlannerState {
        let mut state = PlannerState::default();
        for (interaction, strategy, minutes, details) in rows {
            let id = state.add();
            state.update(id, ActivityField::Interaction, interaction);
            state.update(id, ActivityField::Strategy, strategy);
            state.update(id, ActivityField::Minutes, minutes);
            state.update(id, ActivityField::Details, details);
        }
        state
    }

    #[test]
    fn placements_follow_category_rows_and_id_columns() {
        let state = planner_with(&[
            ("class", "activate", "10", "Recall quiz"),
            ("group", "promote", "15", "Peer discussion"),
            ("individual", "monitor", "5", "Exit ticket"),
        ]);
        let layout = MapLayout::compute(&state.complete_activities(), &state.meta);
        let cells: Vec<(usize, usize)> = layout
            .placements
            .iter()
            .map(|p| (p.row, p.column))
            .collect();
        assert_eq!(cells, vec![(1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn incomplete_activities_leave_no_column_gap() {
        let mut state = planner_with(&[
            ("class", "activate", "10", "Recall quiz"),
            ("group", "promote", "15", "Peer discussion"),
        ]);
        // Activity 2 of 3 is incomplete; the two complete ones still occupy
        // columns 0 and 1.
        state.insert_after(1);
        let complete = state.complete_activities();
        assert_eq!(complete.len(), 2);
        let layout = MapLayout::compute(&complete, &state.meta);
        assert_eq!(layout.placements[0].column, 0);
        assert_eq!(layout.placements[1].column, 1);
        assert_eq!(layout.placements[1].activity.id, 3);
    }

    #[test]
    fn mismatch_flag_requires_a_valid_differing_plan() {
        let mut state = planner_with(&[
            ("class", "activate", "20", "Recall quiz"),
            ("group", "promote", "25", "Peer discussion"),
        ]);
        state.meta.duration = "60".into();
        let layout = MapLayout::compute(&state.complete_activities(), &state.meta);
        assert!(layout.duration_mismatch);
        assert_eq!(layout.total_minutes, 45);

        state.meta.duration = "45".into();
        let layout = MapLayout::compute(&state.complete_activities(), &state.meta);
        assert!(!layout.duration_mismatch);

        state.meta.duration = "about an hour".into();
        let layout = MapLayout::compute(&state.complete_activities(), &state.meta);
        assert!(!layout.duration_mismatch);

        state.meta.duration = "-10".into();
        let layout = MapLayout::compute(&state.complete_activities(), &state.meta);
        assert!(!layout.duration_mismatch);
    }

    #[test]
    fn layout_is_idempotent() {
        let state = planner_with(&[
            ("community", "facilitate", "30", "Gallery walk"),
            ("class", "monitor", "10", "Cold call review"),
        ]);
        let complete = state.complete_activities();
        let first = MapLayout::compute(&complete, &state.meta);
        let second = MapLayout::compute(&complete, &state.meta);
        assert_eq!(first, second);
    }

    #[test]
    fn release_bands_split_the_grid_into_four() {
        let h = 600.0;
        assert_eq!(band_for_offset(10.0, h), Interaction::Community);
        assert_eq!(band_for_offset(160.0, h), Interaction::Class);
        assert_eq!(band_for_offset(320.0, h), Interaction::Group);
        assert_eq!(band_for_offset(580.0, h), Interaction::Individual);
        // Out-of-grid releases clamp.
        assert_eq!(band_for_offset(-40.0, h), Interaction::Community);
        assert_eq!(band_for_offset(900.0, h), Interaction::Individual);
    }
}
