use crate::config::LayoutConfig;
use crate::layout::Layout;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

#[cfg(feature = "png")]
use crate::config::RenderConfig;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for circle in &layout.circles {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            circle.x, circle.y, circle.r, circle.color
        ));
        if label_fits(&circle.label, circle.r, theme, config) {
            let baseline_y = circle.y + theme.font_size * 0.35;
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{baseline_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                circle.x,
                theme.font_family,
                theme.font_size,
                theme.label_color,
                escape_xml(&circle.label)
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Labels are only drawn on circles wide enough for them; the width
/// estimate is a flat per-glyph heuristic, not real font metrics. The
/// configured gap doubles as the clearance kept inside the rim.
fn label_fits(label: &str, r: f32, theme: &Theme, config: &LayoutConfig) -> bool {
    let estimated = label.chars().count() as f32 * theme.font_size * 0.6;
    estimated <= r * 2.0 - config.gap.max(4.0)
}

/// Radius to show for circle `index` at animation frame `frame`: growth
/// starts once the frame count passes the index, one radius unit per
/// frame, capped at the full radius.
pub fn reveal_radius(index: usize, frame: usize, r: f32) -> f32 {
    (frame as f32 - index as f32).min(r).max(0.0)
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    let family = theme
        .font_family
        .split(',')
        .next()
        .unwrap_or("sans-serif")
        .trim()
        .trim_matches('"');
    opt.font_family = family.to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
