//! Connector routing between consecutive activities.
//!
//! Arrows are derived from the committed placements in a second pass; they
//! never measure the DOM. Each path runs from an activity's right edge to
//! the next activity's left edge: a single horizontal segment when both sit
//! on the same row, otherwise an orthogonal polyline that drops (or rises)
//! at the source exit before running into the target.

use super::layout::{MapLayout, ROW_HEIGHT, SLOT_GAP, SLOT_WIDTH};

/// One routed connector, as polyline points in grid coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub from_id: u32,
    pub to_id: u32,
    pub points: Vec<(f64, f64)>,
}

/// Routes a connector between each pair of consecutive placements.
pub fn connectors(layout: &MapLayout) -> Vec<Connector> {
    let mut routed = Vec::new();
    for pair in layout.placements.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        let start_x = current.column as f64 * SLOT_WIDTH + (SLOT_WIDTH - SLOT_GAP) + 4.0;
        let end_x = next.column as f64 * SLOT_WIDTH + 6.0;
        let start_y = (current.row as f64 + 0.5) * ROW_HEIGHT;
        let end_y = (next.row as f64 + 0.5) * ROW_HEIGHT;

        let points = if current.row == next.row {
            vec![(start_x, start_y), (end_x - 4.0, end_y)]
        } else {
            vec![
                (start_x, start_y),
                (start_x, end_y),
                (end_x - 4.0, end_y),
            ]
        };

        routed.push(Connector {
            from_id: current.activity.id,
            to_id: next.activity.id,
            points,
        });
    }
    routed
}

/// Serializes polyline points as an SVG path (`M x y L x y ...`).
pub fn svg_path(points: &[(f64, f64)]) -> String {
    let mut path = String::new();
    for (index, (x, y)) in points.iter().enumerate() {
        let op = if index == 0 { 'M' } else { 'L' };
        path.push_str(&format!("{op} {x} {y} "));
    }
    path.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{Activity, ActivityField, LessonMeta, PlannerState};
    use crate::map::layout::MapLayout;

    fn complete_pair(rows: [&str; 2]) -> Vec<Activity> {
        let mut state = PlannerState::default();
        for row in rows {
            let id = state.add();
            state.update(id, ActivityField::Interaction, row);
            state.update(id, ActivityField::Strategy, "activate");
            state.update(id, ActivityField::Details, "x");
        }
        state.complete_activities()
    }

    #[test]
    fn same_row_pairs_route_straight() {
        let layout = MapLayout::compute(&complete_pair(["class", "class"]), &LessonMeta::default());
        let routed = connectors(&layout);
        assert_eq!(routed.len(), 1);
        assert_eq!(
            routed[0].points,
            vec![(224.0, 225.0), (242.0, 225.0)]
        );
    }

    #[test]
    fn cross_row_pairs_route_orthogonally() {
        let layout =
            MapLayout::compute(&complete_pair(["class", "individual"]), &LessonMeta::default());
        let routed = connectors(&layout);
        assert_eq!(
            routed[0].points,
            vec![(224.0, 225.0), (224.0, 525.0), (242.0, 525.0)]
        );
    }

    #[test]
    fn single_activity_routes_nothing() {
        let mut state = PlannerState::default();
        let id = state.add();
        state.update(id, ActivityField::Interaction, "group");
        state.update(id, ActivityField::Strategy, "monitor");
        state.update(id, ActivityField::Details, "solo");
        let layout = MapLayout::compute(&state.complete_activities(), &state.meta);
        assert!(connectors(&layout).is_empty());
    }

    #[test]
    fn svg_path_emits_move_then_lines() {
        assert_eq!(
            svg_path(&[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]),
            "M 1 2 L 3 4 L 5 6"
        );
    }
}
