//! Standalone vector scenes for the exports.
//!
//! Exports never rasterize the live page. Instead the map and the charts are
//! rebuilt here as self-contained SVG documents from the same layout and
//! chart models the views project, so an exported image mirrors the screen
//! without inheriting scroll clipping or viewport size.

use crate::charts::ChartModel;
use crate::core::format::split_label;
use crate::core::lexicon::{Coded, Interaction, Strategy, TechIntegration};
use crate::core::store::LessonMeta;
use crate::map::{connectors, svg_path, MapLayout, ROW_HEIGHT, SLOT_WIDTH};

/// A rendered SVG document with its natural size in CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

const PAD: f64 = 40.0;
const LABEL_COLUMN: f64 = 150.0;
const LEGEND_ROW_H: f64 = 26.0;
const DETAILS_WRAP: usize = 32;

/// Rebuilds the design map (header, grid, connectors, legend) as one SVG.
pub fn map_scene(layout: &MapLayout, meta: &LessonMeta) -> Scene {
    let header_lines = header_lines(meta);
    let header_h = 90.0 + header_lines.len() as f64 * 20.0 + 16.0;

    let grid_x = PAD + LABEL_COLUMN;
    let grid_y = header_h;
    let grid_w = layout.grid_width();
    let grid_h = layout.grid_height();

    let legend_y = grid_y + grid_h + 36.0;
    let legend_h = 30.0 + Strategy::ALL.len() as f64 * LEGEND_ROW_H;

    let width = PAD * 2.0 + LABEL_COLUMN + grid_w;
    let height = legend_y + legend_h + PAD;

    let mut body = String::new();

    // Header
    body.push_str(&text(
        PAD,
        44.0,
        meta.display_topic(),
        26,
        true,
        "#312e81",
        None,
    ));
    let duration_line = duration_line(meta, layout);
    body.push_str(&text(
        PAD,
        72.0,
        &duration_line,
        14,
        false,
        if layout.duration_mismatch {
            "#b91c1c"
        } else {
            "#0f172a"
        },
        None,
    ));
    for (index, line) in header_lines.iter().enumerate() {
        body.push_str(&text(
            PAD,
            96.0 + index as f64 * 20.0,
            line,
            12,
            false,
            "#334155",
            None,
        ));
    }

    // Axis labels
    body.push_str(&format!(
        "<text x=\"{x}\" y=\"{y}\" font-size=\"12\" fill=\"#64748b\" font-family=\"sans-serif\" \
         transform=\"rotate(-90 {x} {y})\" text-anchor=\"middle\">Social Plane</text>",
        x = PAD - 14.0,
        y = grid_y + grid_h / 2.0,
    ));
    body.push_str(&text(
        grid_x + grid_w - 60.0,
        grid_y - 8.0,
        "Time -\u{3e}",
        12,
        false,
        "#64748b",
        None,
    ));

    // Row separators and labels
    for (row, interaction) in Interaction::ALL.iter().enumerate() {
        let top = grid_y + row as f64 * ROW_HEIGHT;
        body.push_str(&format!(
            "<line x1=\"{x1}\" y1=\"{y}\" x2=\"{x2}\" y2=\"{y}\" stroke=\"#cbd5e1\" stroke-width=\"1\"/>",
            x1 = PAD,
            x2 = grid_x + grid_w,
            y = top,
        ));
        let mid = top + ROW_HEIGHT / 2.0;
        body.push_str(&text(
            PAD + 4.0,
            mid - 4.0,
            interaction.short_label(),
            13,
            true,
            "#1e293b",
            None,
        ));
        body.push_str(&text(
            PAD + 4.0,
            mid + 14.0,
            interaction.gloss(),
            11,
            false,
            "#475569",
            None,
        ));
    }
    body.push_str(&format!(
        "<line x1=\"{x1}\" y1=\"{y}\" x2=\"{x2}\" y2=\"{y}\" stroke=\"#cbd5e1\" stroke-width=\"1\"/>",
        x1 = PAD,
        x2 = grid_x + grid_w,
        y = grid_y + grid_h,
    ));

    // Activity boxes
    for placement in &layout.placements {
        let activity = &placement.activity;
        let box_x = grid_x + placement.column as f64 * SLOT_WIDTH + 2.0;
        let box_y = grid_y + placement.row as f64 * ROW_HEIGHT + 10.0;
        let fill = activity
            .strategy
            .map(Strategy::color)
            .unwrap_or("#e2e8f0");
        body.push_str(&format!(
            "<rect x=\"{box_x}\" y=\"{box_y}\" width=\"218\" height=\"130\" rx=\"10\" \
             fill=\"{fill}\" stroke=\"#1f2937\" stroke-width=\"1.5\"/>",
        ));

        let title = if activity.minutes.trim().is_empty() {
            format!("Activity {}", activity.id)
        } else {
            format!("Activity {} ({} min)", activity.id, activity.minutes.trim())
        };
        let mut cursor = box_y + 20.0;
        body.push_str(&text(box_x + 10.0, cursor, &title, 12, true, "#111827", None));
        cursor += 16.0;

        if let Some(key_app) = activity.key_app {
            let (first, second) = split_label(key_app.label());
            body.push_str(&text(box_x + 10.0, cursor, &first, 10, false, "#1f2937", None));
            cursor += 12.0;
            if let Some(second) = second {
                body.push_str(&text(box_x + 10.0, cursor, &second, 10, false, "#1f2937", None));
                cursor += 12.0;
            }
            cursor += 2.0;
        }

        for line in wrap_text(&activity.details, DETAILS_WRAP).into_iter().take(4) {
            body.push_str(&text(box_x + 10.0, cursor, &line, 11, false, "#111827", None));
            cursor += 14.0;
        }

        if !activity.tool.trim().is_empty() {
            let tool = format!("[Tool]: {}", activity.tool.trim());
            body.push_str(&text(
                box_x + 10.0,
                box_y + 122.0,
                &tool,
                10,
                false,
                "#1e3a8a",
                Some("italic"),
            ));
        }
    }

    // Connectors, offset into the grid frame.
    let routed = connectors(layout);
    if !routed.is_empty() {
        body.push_str(
            "<defs><marker id=\"arrowhead\" markerUnits=\"userSpaceOnUse\" markerWidth=\"10\" \
             markerHeight=\"8\" refX=\"9\" refY=\"4\" orient=\"auto\">\
             <polygon points=\"0 0, 10 4, 0 8\" fill=\"#333\"/></marker></defs>",
        );
        for connector in &routed {
            let shifted: Vec<(f64, f64)> = connector
                .points
                .iter()
                .map(|(x, y)| (x + grid_x, y + grid_y))
                .collect();
            body.push_str(&format!(
                "<path d=\"{}\" stroke=\"#111\" stroke-width=\"2.5\" stroke-linecap=\"round\" \
                 stroke-linejoin=\"round\" fill=\"none\" marker-end=\"url(#arrowhead)\"/>",
                svg_path(&shifted),
            ));
        }
    }

    // Legend
    body.push_str(&text(PAD, legend_y, "Legend", 14, true, "#111827", None));
    for (index, strategy) in Strategy::ALL.iter().enumerate() {
        let row_y = legend_y + 14.0 + index as f64 * LEGEND_ROW_H;
        body.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"18\" height=\"18\" rx=\"4\" fill=\"{fill}\" \
             stroke=\"#94a3b8\"/>",
            x = PAD,
            y = row_y,
            fill = strategy.color(),
        ));
        body.push_str(&text(
            PAD + 26.0,
            row_y + 14.0,
            strategy.label(),
            12,
            false,
            "#334155",
            None,
        ));
    }

    Scene {
        svg: wrap_svg(&body, width, height),
        width,
        height,
    }
}

/// Rebuilds the three proportional charts side by side.
pub fn charts_scene(models: &[ChartModel]) -> Scene {
    const CARD_W: f64 = 380.0;
    const PIE_CX: f64 = 190.0;
    const PIE_CY: f64 = 190.0;
    const PIE_R: f64 = 110.0;

    let legend_rows = models.iter().map(|m| m.slices.len()).max().unwrap_or(0);
    let width = CARD_W * models.len().max(1) as f64;
    let height = 330.0 + legend_rows as f64 * 22.0 + PAD;

    let mut body = String::new();
    for (index, model) in models.iter().enumerate() {
        let origin_x = index as f64 * CARD_W;
        body.push_str(&text(
            origin_x + 20.0,
            36.0,
            model.title,
            15,
            true,
            "#312e81",
            None,
        ));

        let cx = origin_x + PIE_CX;
        if model.total_minutes == 0 {
            body.push_str(&format!(
                "<circle cx=\"{cx}\" cy=\"{PIE_CY}\" r=\"{PIE_R}\" fill=\"#f3f4f6\" \
                 stroke=\"#e5e7eb\" stroke-width=\"2\"/>",
            ));
        } else {
            for slice in &model.slices {
                if slice.minutes == 0 {
                    continue;
                }
                body.push_str(&sector(cx, PIE_CY, PIE_R, slice.start_deg, slice.sweep_deg, slice.color));
            }
            body.push_str(&format!(
                "<circle cx=\"{cx}\" cy=\"{PIE_CY}\" r=\"{PIE_R}\" fill=\"none\" \
                 stroke=\"#e5e7eb\" stroke-width=\"2\"/>",
            ));
            for slice in &model.slices {
                if !slice.label_visible() {
                    continue;
                }
                let (ax, ay) = slice.label_anchor();
                // Anchor percentages map onto the pie's bounding square.
                let label_x = cx - PIE_R + ax / 100.0 * PIE_R * 2.0;
                let label_y = PIE_CY - PIE_R + ay / 100.0 * PIE_R * 2.0;
                body.push_str(&format!(
                    "<text x=\"{label_x}\" y=\"{label_y}\" font-size=\"12\" font-weight=\"600\" \
                     fill=\"#111827\" font-family=\"sans-serif\" text-anchor=\"middle\">{} \
                     <tspan font-size=\"10\" font-weight=\"400\">({}%)</tspan></text>",
                    slice.minutes,
                    slice.percent(model.total_minutes),
                ));
            }
        }

        for (row, slice) in model.slices.iter().enumerate() {
            let row_y = 330.0 + row as f64 * 22.0;
            body.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"14\" height=\"14\" rx=\"3\" fill=\"{fill}\" \
                 stroke=\"#94a3b8\"/>",
                x = origin_x + 20.0,
                y = row_y,
                fill = slice.color,
            ));
            let legend_text = format!("{}: {} min", slice.label, slice.minutes);
            body.push_str(&text(
                origin_x + 42.0,
                row_y + 12.0,
                &legend_text,
                11,
                false,
                "#334155",
                None,
            ));
        }
    }

    Scene {
        svg: wrap_svg(&body, width, height),
        width,
        height,
    }
}

fn header_lines(meta: &LessonMeta) -> Vec<String> {
    let mut lines = Vec::new();
    if !meta.student_profile.trim().is_empty() {
        lines.push(format!("Student profile: {}", meta.student_profile.trim()));
    }
    if !meta.learning_outcomes.trim().is_empty() {
        lines.push(format!("Learning outcomes: {}", meta.learning_outcomes.trim()));
    }
    if !meta.prerequisite_knowledge.trim().is_empty() {
        lines.push(format!(
            "Prerequisite knowledge: {}",
            meta.prerequisite_knowledge.trim()
        ));
    }
    if meta.tech_integration != TechIntegration::Optional {
        lines.push(format!(
            "Level of technology integration: {}",
            meta.tech_integration.label()
        ));
    }
    if !meta.learning_issues.trim().is_empty() {
        lines.push(format!(
            "Learning issue to be addressed: {}",
            meta.learning_issues.trim()
        ));
    }
    lines
}

fn duration_line(meta: &LessonMeta, layout: &MapLayout) -> String {
    let mut line = String::new();
    if !meta.level.trim().is_empty() {
        line.push_str(&format!("Level: {} | ", meta.level.trim()));
    }
    line.push_str(&format!("Duration: {} minutes", meta.duration.trim()));
    if layout.duration_mismatch {
        line.push_str(&format!("; Activities total: {} mins", layout.total_minutes));
    }
    line
}

/// Pie sector as an SVG path. Angles are degrees clockwise from 12 o'clock.
fn sector(cx: f64, cy: f64, r: f64, start_deg: f64, sweep_deg: f64, fill: &str) -> String {
    if sweep_deg >= 360.0 - 1e-9 {
        return format!("<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{fill}\"/>");
    }
    let to_point = |deg: f64| {
        let rad = (deg - 90.0).to_radians();
        (cx + r * rad.cos(), cy + r * rad.sin())
    };
    let (x1, y1) = to_point(start_deg);
    let (x2, y2) = to_point(start_deg + sweep_deg);
    let large_arc = if sweep_deg > 180.0 { 1 } else { 0 };
    format!(
        "<path d=\"M {cx} {cy} L {x1} {y1} A {r} {r} 0 {large_arc} 1 {x2} {y2} Z\" fill=\"{fill}\"/>",
    )
}

fn wrap_svg(body: &str, width: f64, height: f64) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\
         <rect width=\"{width}\" height=\"{height}\" fill=\"#ffffff\"/>{body}</svg>",
    )
}

fn text(
    x: f64,
    y: f64,
    content: &str,
    size: u32,
    bold: bool,
    fill: &str,
    style: Option<&str>,
) -> String {
    format!(
        "<text x=\"{x}\" y=\"{y}\" font-size=\"{size}\" font-family=\"sans-serif\"{weight}{style} \
         fill=\"{fill}\">{content}</text>",
        weight = if bold { " font-weight=\"700\"" } else { "" },
        style = style
            .map(|s| format!(" font-style=\"{s}\""))
            .unwrap_or_default(),
        content = escape_xml(content),
    )
}

/// Greedy word wrap; words longer than the width get a line of their own.
pub(crate) fn wrap_text(content: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub(crate) fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::strategy_chart;
    use crate::core::store::{ActivityField, PlannerState};
    use crate::map::MapLayout;

    fn sample_state() -> PlannerState {
        let mut state = PlannerState::default();
        for (interaction, strategy, minutes, details) in [
            ("class", "activate", "10", "Retrieval quiz"),
            ("group", "promote", "25", "Jigsaw annotation & gallery walk"),
            ("individual", "monitor", "10", "Exit ticket"),
        ] {
            let id = state.add();
            state.update(id, ActivityField::Interaction, interaction);
            state.update(id, ActivityField::Strategy, strategy);
            state.update(id, ActivityField::Minutes, minutes);
            state.update(id, ActivityField::Details, details);
        }
        state.meta.topic = "Energy & Transfer".into();
        state.meta.duration = "60".into();
        state
    }

    #[test]
    fn map_scene_draws_one_box_per_complete_activity() {
        let state = sample_state();
        let layout = MapLayout::compute(&state.complete_activities(), &state.meta);
        let scene = map_scene(&layout, &state.meta);
        let boxes = scene.svg.matches("width=\"218\" height=\"130\"").count();
        assert_eq!(boxes, 3);
        // Two connectors between three activities.
        assert_eq!(scene.svg.matches("marker-end=\"url(#arrowhead)\"").count(), 2);
        // Ampersand in the topic is escaped.
        assert!(scene.svg.contains("Energy &amp; Transfer"));
    }

    #[test]
    fn map_scene_flags_duration_mismatch_in_header() {
        let mut state = sample_state();
        state.meta.duration = "70".into();
        let layout = MapLayout::compute(&state.complete_activities(), &state.meta);
        let scene = map_scene(&layout, &state.meta);
        assert!(scene.svg.contains("Activities total: 45 mins"));
    }

    #[test]
    fn charts_scene_skips_zero_slices() {
        let state = sample_state();
        let chart = strategy_chart(&state.complete_activities());
        let scene = charts_scene(&[chart]);
        // facilitate has no minutes: three drawn sectors, not four.
        let sectors = scene.svg.matches("A 110 110").count();
        assert_eq!(sectors, 3);
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("annotate the leaf diagrams in pairs", 12);
        assert!(lines.iter().all(|l| l.len() <= 12));
        assert_eq!(lines.join(" "), "annotate the leaf diagrams in pairs");
    }
}
