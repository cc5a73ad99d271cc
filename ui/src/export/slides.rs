//! Slide-deck export.
//!
//! Rebuilds the map with vector drawing primitives as a minimal PPTX: one
//! slide of lesson metadata, one with the grid and connectors, one with the
//! legends, and one embedding a raster snapshot of the charts. The deck is a
//! zip archive of OOXML parts written with stored (uncompressed) entries so
//! the same code path works on web and desktop.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::scene::{escape_xml, wrap_text, Scene};
use crate::core::format::split_label;
use crate::core::lexicon::{Coded, Interaction, KeyApplication, Strategy, TechIntegration};
use crate::core::store::LessonMeta;
use crate::map::{connectors, MapLayout, ROW_HEIGHT, SLOT_WIDTH};

/// EMUs per CSS pixel.
const EMU_PER_PX: f64 = 9525.0;
/// 16:9 slide, 1280 × 720 px.
const SLIDE_W_PX: f64 = 1280.0;
const SLIDE_H_PX: f64 = 720.0;

const XMLNS: &str = "xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
                     xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
                     xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\"";

fn emu(px: f64) -> i64 {
    (px * EMU_PER_PX).round() as i64
}

/// Assembles the deck. `charts` is the vector scene the raster snapshot was
/// taken from; its aspect ratio sizes the embedded picture.
pub fn build_deck(
    layout: &MapLayout,
    meta: &LessonMeta,
    charts: &Scene,
    charts_png: &[u8],
) -> Result<Vec<u8>, String> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions = FileOptions::default().compression_method(CompressionMethod::Stored);

    let mut put = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, body: &[u8]| {
        zip.start_file(name, options)
            .and_then(|_| zip.write_all(body).map_err(zip::result::ZipError::from))
            .map_err(|err| format!("deck write failed at {name}: {err}"))
    };

    put(&mut zip, "[Content_Types].xml", content_types().as_bytes())?;
    put(&mut zip, "_rels/.rels", root_rels().as_bytes())?;
    put(&mut zip, "ppt/presentation.xml", presentation().as_bytes())?;
    put(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        presentation_rels().as_bytes(),
    )?;
    put(&mut zip, "ppt/theme/theme1.xml", theme().as_bytes())?;
    put(
        &mut zip,
        "ppt/slideMasters/slideMaster1.xml",
        slide_master().as_bytes(),
    )?;
    put(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        master_rels().as_bytes(),
    )?;
    put(
        &mut zip,
        "ppt/slideLayouts/slideLayout1.xml",
        slide_layout().as_bytes(),
    )?;
    put(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        layout_rels().as_bytes(),
    )?;

    let slides = [
        metadata_slide(meta, layout),
        grid_slide(layout, meta),
        legend_slide(),
        charts_slide(charts),
    ];
    for (index, body) in slides.iter().enumerate() {
        let n = index + 1;
        put(&mut zip, &format!("ppt/slides/slide{n}.xml"), body.as_bytes())?;
        let rels = if n == 4 {
            chart_slide_rels()
        } else {
            plain_slide_rels()
        };
        put(
            &mut zip,
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            rels.as_bytes(),
        )?;
    }

    put(&mut zip, "ppt/media/chart1.png", charts_png)?;

    let cursor = zip
        .finish()
        .map_err(|err| format!("deck finalize failed: {err}"))?;
    Ok(cursor.into_inner())
}

// ---- fixed packaging parts ----

fn content_types() -> String {
    let mut overrides = String::new();
    for n in 1..=4 {
        overrides.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{n}.xml\" ContentType=\"application/vnd.\
             openxmlformats-officedocument.presentationml.slide+xml\"/>"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Default Extension=\"png\" ContentType=\"image/png\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         {overrides}</Types>"
    )
}

fn root_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"ppt/presentation.xml\"/>\
     </Relationships>"
        .to_string()
}

fn presentation() -> String {
    let slide_ids: String = (0..4)
        .map(|i| format!("<p:sldId id=\"{}\" r:id=\"rId{}\"/>", 256 + i, i + 2))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:presentation {XMLNS}>\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>{slide_ids}</p:sldIdLst>\
         <p:sldSz cx=\"{w}\" cy=\"{h}\"/><p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>",
        w = emu(SLIDE_W_PX),
        h = emu(SLIDE_H_PX),
    )
}

fn presentation_rels() -> String {
    let mut rels = String::from(
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>",
    );
    for n in 1..=4 {
        rels.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"slides/slide{n}.xml\"/>",
            n + 1
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{rels}</Relationships>"
    )
}

fn master_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
     <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\
     </Relationships>"
        .to_string()
}

fn layout_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
     </Relationships>"
        .to_string()
}

fn plain_slide_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
     </Relationships>"
        .to_string()
}

fn chart_slide_rels() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
     <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"../media/chart1.png\"/>\
     </Relationships>"
        .to_string()
}

fn empty_sp_tree(shapes: &str) -> String {
    format!(
        "<p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
         <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
         {shapes}</p:spTree></p:cSld>"
    )
}

fn slide_master() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldMaster {XMLNS}>{tree}\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" \
         accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" \
         accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         </p:sldMaster>",
        tree = empty_sp_tree(""),
    )
}

fn slide_layout() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldLayout {XMLNS}>{tree}\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>",
        tree = empty_sp_tree(""),
    )
}

fn theme() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <a:theme xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" name=\"DesignMap\">\
     <a:themeElements>\
     <a:clrScheme name=\"DesignMap\">\
     <a:dk1><a:srgbClr val=\"111827\"/></a:dk1><a:lt1><a:srgbClr val=\"FFFFFF\"/></a:lt1>\
     <a:dk2><a:srgbClr val=\"312E81\"/></a:dk2><a:lt2><a:srgbClr val=\"F1F5F9\"/></a:lt2>\
     <a:accent1><a:srgbClr val=\"6ACED8\"/></a:accent1><a:accent2><a:srgbClr val=\"CC6BFF\"/></a:accent2>\
     <a:accent3><a:srgbClr val=\"FFC000\"/></a:accent3><a:accent4><a:srgbClr val=\"F6BBBF\"/></a:accent4>\
     <a:accent5><a:srgbClr val=\"34D399\"/></a:accent5><a:accent6><a:srgbClr val=\"F97316\"/></a:accent6>\
     <a:hlink><a:srgbClr val=\"2563EB\"/></a:hlink><a:folHlink><a:srgbClr val=\"7C3AED\"/></a:folHlink>\
     </a:clrScheme>\
     <a:fontScheme name=\"DesignMap\">\
     <a:majorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
     <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
     </a:fontScheme>\
     <a:fmtScheme name=\"DesignMap\">\
     <a:fillStyleLst><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
     <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
     <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:fillStyleLst>\
     <a:lnStyleLst><a:ln w=\"6350\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
     <a:ln w=\"12700\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>\
     <a:ln w=\"19050\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln></a:lnStyleLst>\
     <a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle>\
     <a:effectStyle><a:effectLst/></a:effectStyle>\
     <a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>\
     <a:bgFillStyleLst><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
     <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>\
     <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:bgFillStyleLst>\
     </a:fmtScheme></a:themeElements></a:theme>"
        .to_string()
}

// ---- slide bodies ----

fn slide(shapes: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sld {XMLNS}>{tree}<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
        tree = empty_sp_tree(shapes),
    )
}

struct ShapeIds(u32);

impl ShapeIds {
    fn next(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }
}

fn metadata_slide(meta: &LessonMeta, layout: &MapLayout) -> String {
    let mut ids = ShapeIds(1);
    let mut shapes = String::new();
    shapes.push_str(&textbox(
        &mut ids,
        80.0,
        60.0,
        1120.0,
        80.0,
        &[(meta.display_topic().to_string(), 32, true)],
    ));

    let mut lines: Vec<(String, u32, bool)> = Vec::new();
    let mut push = |label: &str, value: &str| {
        if !value.trim().is_empty() {
            lines.push((format!("{label}: {}", value.trim()), 16, false));
        }
    };
    push("Level", &meta.level);
    push("Planned duration (minutes)", &meta.duration);
    push("Student profile", &meta.student_profile);
    push("Learning outcomes", &meta.learning_outcomes);
    push("Prerequisite knowledge", &meta.prerequisite_knowledge);
    push("Learning issues", &meta.learning_issues);
    if meta.tech_integration != TechIntegration::Optional {
        lines.push((
            format!(
                "Level of technology integration: {}",
                meta.tech_integration.label()
            ),
            16,
            false,
        ));
    }
    lines.push((
        format!("Activities total: {} minutes", layout.total_minutes),
        16,
        layout.duration_mismatch,
    ));

    shapes.push_str(&textbox(&mut ids, 80.0, 170.0, 1120.0, 480.0, &lines));
    slide(&shapes)
}

fn grid_slide(layout: &MapLayout, meta: &LessonMeta) -> String {
    let mut ids = ShapeIds(1);
    let mut shapes = String::new();
    shapes.push_str(&textbox(
        &mut ids,
        60.0,
        24.0,
        1160.0,
        50.0,
        &[(format!("Design map: {}", meta.display_topic()), 22, true)],
    ));

    // Fit the natural grid (plus the row-label column) onto the slide.
    let label_col = 150.0;
    let natural_w = label_col + layout.grid_width();
    let natural_h = layout.grid_height();
    let avail_w = 1160.0;
    let avail_h = 580.0;
    let scale = (avail_w / natural_w).min(avail_h / natural_h).min(1.0);
    let origin_x = 60.0;
    let origin_y = 100.0;

    let sx = |x: f64| origin_x + x * scale;
    let sy = |y: f64| origin_y + y * scale;

    for (row, interaction) in Interaction::ALL.iter().enumerate() {
        let top = row as f64 * ROW_HEIGHT;
        shapes.push_str(&line(
            &mut ids,
            sx(0.0),
            sy(top),
            sx(natural_w),
            sy(top),
            9525,
            "CBD5E1",
            false,
        ));
        shapes.push_str(&textbox(
            &mut ids,
            sx(0.0),
            sy(top + ROW_HEIGHT / 2.0 - 24.0),
            label_col * scale,
            48.0 * scale.max(0.5),
            &[
                (interaction.short_label().to_string(), 13, true),
                (interaction.gloss().to_string(), 10, false),
            ],
        ));
    }
    shapes.push_str(&line(
        &mut ids,
        sx(0.0),
        sy(natural_h),
        sx(natural_w),
        sy(natural_h),
        9525,
        "CBD5E1",
        false,
    ));

    for placement in &layout.placements {
        let activity = &placement.activity;
        let x = label_col + placement.column as f64 * SLOT_WIDTH + 2.0;
        let y = placement.row as f64 * ROW_HEIGHT + 10.0;
        let fill = activity
            .strategy
            .map(Strategy::color)
            .unwrap_or("#e2e8f0");
        let mut lines = vec![(
            format!("Activity {} ({} min)", activity.id, activity.planned_minutes()),
            11,
            true,
        )];
        if let Some(key_app) = activity.key_app {
            let (first, second) = split_label(key_app.label());
            lines.push((first, 9, false));
            if let Some(second) = second {
                lines.push((second, 9, false));
            }
        }
        for detail_line in wrap_text(&activity.details, 34).into_iter().take(3) {
            lines.push((detail_line, 10, false));
        }
        if !activity.tool.trim().is_empty() {
            lines.push((format!("[Tool]: {}", activity.tool.trim()), 9, false));
        }
        shapes.push_str(&rect(
            &mut ids,
            sx(x),
            sy(y),
            218.0 * scale,
            130.0 * scale,
            hex(fill),
            Some("1F2937"),
            &lines,
        ));
    }

    for connector in connectors(layout) {
        let points: Vec<(f64, f64)> = connector
            .points
            .iter()
            .map(|(x, y)| (sx(x + label_col), sy(*y)))
            .collect();
        for (index, pair) in points.windows(2).enumerate() {
            let arrow = index == points.len() - 2;
            shapes.push_str(&line(
                &mut ids,
                pair[0].0,
                pair[0].1,
                pair[1].0,
                pair[1].1,
                28575,
                "111111",
                arrow,
            ));
        }
    }

    slide(&shapes)
}

fn legend_slide() -> String {
    let mut ids = ShapeIds(1);
    let mut shapes = String::new();
    shapes.push_str(&textbox(
        &mut ids,
        60.0,
        24.0,
        1160.0,
        50.0,
        &[("Legend".to_string(), 22, true)],
    ));

    shapes.push_str(&textbox(
        &mut ids,
        60.0,
        100.0,
        520.0,
        40.0,
        &[("Active learning processes".to_string(), 16, true)],
    ));
    for (index, strategy) in Strategy::ALL.iter().enumerate() {
        let y = 150.0 + index as f64 * 44.0;
        shapes.push_str(&rect(&mut ids, 60.0, y, 26.0, 26.0, hex(strategy.color()), Some("94A3B8"), &[]));
        shapes.push_str(&textbox(
            &mut ids,
            100.0,
            y - 4.0,
            480.0,
            36.0,
            &[(strategy.label().to_string(), 14, false)],
        ));
    }

    shapes.push_str(&textbox(
        &mut ids,
        660.0,
        100.0,
        520.0,
        40.0,
        &[("Key applications of technology".to_string(), 16, true)],
    ));
    for (index, key_app) in KeyApplication::ALL.iter().enumerate() {
        let y = 150.0 + index as f64 * 44.0;
        shapes.push_str(&rect(&mut ids, 660.0, y, 26.0, 26.0, hex(key_app.color()), Some("94A3B8"), &[]));
        shapes.push_str(&textbox(
            &mut ids,
            700.0,
            y - 4.0,
            480.0,
            36.0,
            &[(key_app.label().to_string(), 14, false)],
        ));
    }

    slide(&shapes)
}

fn charts_slide(charts: &Scene) -> String {
    let mut ids = ShapeIds(1);
    let mut shapes = String::new();
    shapes.push_str(&textbox(
        &mut ids,
        60.0,
        24.0,
        1160.0,
        50.0,
        &[("Time allocation".to_string(), 22, true)],
    ));

    let avail_w = 1160.0;
    let avail_h = 560.0;
    let scale = (avail_w / charts.width).min(avail_h / charts.height).min(1.0);
    let w = charts.width * scale;
    let h = charts.height * scale;
    let x = 60.0 + (avail_w - w) / 2.0;
    let y = 110.0 + (avail_h - h) / 2.0;

    let id = ids.next();
    shapes.push_str(&format!(
        "<p:pic><p:nvPicPr><p:cNvPr id=\"{id}\" name=\"Charts\"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
         <p:blipFill><a:blip r:embed=\"rId2\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>\
         <p:spPr><a:xfrm><a:off x=\"{ox}\" y=\"{oy}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr></p:pic>",
        ox = emu(x),
        oy = emu(y),
        cx = emu(w),
        cy = emu(h),
    ));

    slide(&shapes)
}

// ---- shape primitives ----

fn hex(color: &str) -> String {
    color.trim_start_matches('#').to_ascii_uppercase()
}

fn runs(lines: &[(String, u32, bool)]) -> String {
    lines
        .iter()
        .map(|(content, size, bold)| {
            format!(
                "<a:p><a:r><a:rPr lang=\"en-US\" sz=\"{sz}\" b=\"{b}\" dirty=\"0\">\
                 <a:solidFill><a:srgbClr val=\"111827\"/></a:solidFill></a:rPr>\
                 <a:t>{t}</a:t></a:r></a:p>",
                sz = size * 100,
                b = if *bold { 1 } else { 0 },
                t = escape_xml(content),
            )
        })
        .collect()
}

fn textbox(ids: &mut ShapeIds, x: f64, y: f64, w: f64, h: f64, lines: &[(String, u32, bool)]) -> String {
    let id = ids.next();
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Text {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{ox}\" y=\"{oy}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\"><a:normAutofit/></a:bodyPr><a:lstStyle/>{body}</p:txBody></p:sp>",
        ox = emu(x),
        oy = emu(y),
        cx = emu(w.max(1.0)),
        cy = emu(h.max(1.0)),
        body = if lines.is_empty() {
            "<a:p/>".to_string()
        } else {
            runs(lines)
        },
    )
}

fn rect(
    ids: &mut ShapeIds,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    fill: String,
    stroke: Option<&str>,
    lines: &[(String, u32, bool)],
) -> String {
    let id = ids.next();
    let ln = stroke
        .map(|color| {
            format!(
                "<a:ln w=\"12700\"><a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill></a:ln>"
            )
        })
        .unwrap_or_default();
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Box {id}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{ox}\" y=\"{oy}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"roundRect\"><a:avLst/></a:prstGeom>\
         <a:solidFill><a:srgbClr val=\"{fill}\"/></a:solidFill>{ln}</p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\" lIns=\"36000\" tIns=\"18000\"><a:normAutofit/></a:bodyPr>\
         <a:lstStyle/>{body}</p:txBody></p:sp>",
        ox = emu(x),
        oy = emu(y),
        cx = emu(w.max(1.0)),
        cy = emu(h.max(1.0)),
        body = if lines.is_empty() {
            "<a:p/>".to_string()
        } else {
            runs(lines)
        },
    )
}

fn line(
    ids: &mut ShapeIds,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    width_emu: i64,
    color: &str,
    arrow: bool,
) -> String {
    let id = ids.next();
    let (ox, flip_h) = if x2 >= x1 { (x1, "") } else { (x2, " flipH=\"1\"") };
    let (oy, flip_v) = if y2 >= y1 { (y1, "") } else { (y2, " flipV=\"1\"") };
    let tail = if arrow {
        "<a:tailEnd type=\"triangle\" w=\"med\" len=\"med\"/>"
    } else {
        ""
    };
    format!(
        "<p:cxnSp><p:nvCxnSpPr><p:cNvPr id=\"{id}\" name=\"Line {id}\"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr>\
         <p:spPr><a:xfrm{flip_h}{flip_v}><a:off x=\"{offx}\" y=\"{offy}\"/>\
         <a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"line\"><a:avLst/></a:prstGeom>\
         <a:ln w=\"{width_emu}\" cap=\"rnd\"><a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill>{tail}</a:ln>\
         </p:spPr></p:cxnSp>",
        offx = emu(ox),
        offy = emu(oy),
        cx = emu((x2 - x1).abs()),
        cy = emu((y2 - y1).abs()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::strategy_chart;
    use crate::core::store::{ActivityField, PlannerState};
    use crate::export::scene::charts_scene;
    use crate::map::MapLayout;
    use std::io::Read;

    fn sample_deck() -> Vec<u8> {
        let mut state = PlannerState::default();
        for (interaction, strategy, minutes) in
            [("class", "activate", "10"), ("group", "promote", "25")]
        {
            let id = state.add();
            state.update(id, ActivityField::Interaction, interaction);
            state.update(id, ActivityField::Strategy, strategy);
            state.update(id, ActivityField::Minutes, minutes);
            state.update(id, ActivityField::Details, "work together");
        }
        state.meta.topic = "Forces".into();
        state.meta.duration = "35".into();

        let complete = state.complete_activities();
        let layout = MapLayout::compute(&complete, &state.meta);
        let charts = charts_scene(&[strategy_chart(&complete)]);
        let fake_png = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3];
        build_deck(&layout, &state.meta, &charts, &fake_png).unwrap()
    }

    #[test]
    fn deck_contains_all_expected_parts() {
        let bytes = sample_deck();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide3.xml",
            "ppt/slides/slide4.xml",
            "ppt/media/chart1.png",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing part {part}");
        }
    }

    #[test]
    fn grid_slide_draws_boxes_and_an_arrowed_connector() {
        let bytes = sample_deck();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut slide2 = String::new();
        archive
            .by_name("ppt/slides/slide2.xml")
            .unwrap()
            .read_to_string(&mut slide2)
            .unwrap();
        assert_eq!(slide2.matches("prst=\"roundRect\"").count(), 2);
        assert_eq!(slide2.matches("tailEnd type=\"triangle\"").count(), 1);
        // Strategy fills survive the hex conversion.
        assert!(slide2.contains("6ACED8"));
    }

    #[test]
    fn chart_slide_embeds_the_snapshot_bytes() {
        let bytes = sample_deck();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut media = Vec::new();
        archive
            .by_name("ppt/media/chart1.png")
            .unwrap()
            .read_to_end(&mut media)
            .unwrap();
        assert_eq!(media, vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3]);

        let mut rels = String::new();
        archive
            .by_name("ppt/slides/_rels/slide4.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains("../media/chart1.png"));
    }

    #[test]
    fn metadata_slide_carries_topic_and_totals() {
        let bytes = sample_deck();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut slide1 = String::new();
        archive
            .by_name("ppt/slides/slide1.xml")
            .unwrap()
            .read_to_string(&mut slide1)
            .unwrap();
        assert!(slide1.contains("<a:t>Forces</a:t>"));
        assert!(slide1.contains("Activities total: 35 minutes"));
    }
}
