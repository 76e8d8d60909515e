//! Plan view of a designed footing and its SVG rendering.

use std::fmt::Write;

use nalgebra::Point2;

use crate::footing::FootingDesign;

/// Stroke style of an outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// Continuous line.
    Solid,
    /// Dashed line.
    Dashed,
}

/// A closed rectangle centred on the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    /// Label used in the legend.
    pub label: &'static str,
    /// Extent along X in metres.
    pub length: f64,
    /// Extent along Y in metres.
    pub width: f64,
    /// Stroke style.
    pub style: LineStyle,
    /// Stroke colour.
    pub colour: &'static str,
}

impl Outline {
    /// Vertices of the closed polyline, starting and ending at the lower-left corner.
    #[must_use]
    pub fn vertices(&self) -> [Point2<f64>; 5] {
        let (hx, hy) = (self.length / 2.0, self.width / 2.0);
        [
            Point2::new(-hx, -hy),
            Point2::new(hx, -hy),
            Point2::new(hx, hy),
            Point2::new(-hx, hy),
            Point2::new(-hx, -hy),
        ]
    }
}

/// The three outlines drawn for a footing: base, wall and punching perimeter.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanView {
    /// Footing boundary.
    pub footing: Outline,
    /// Wall outline.
    pub wall: Outline,
    /// Critical punching perimeter, offset from the wall by `d` on every side.
    pub critical: Outline,
}

/// Title printed above the plot.
pub const PLAN_TITLE: &str = "Shear Wall Footing Plan";

impl PlanView {
    /// Build the plan for explicit dimensions in metres.
    #[must_use]
    pub fn new(
        length: f64,
        width: f64,
        wall_length: f64,
        wall_thickness: f64,
        effective_depth: f64,
    ) -> Self {
        Self {
            footing: Outline {
                label: "Footing",
                length,
                width,
                style: LineStyle::Solid,
                colour: "#1f77b4",
            },
            wall: Outline {
                label: "Wall",
                length: wall_length,
                width: wall_thickness,
                style: LineStyle::Solid,
                colour: "#ff7f0e",
            },
            critical: Outline {
                label: "Punching perimeter",
                length: wall_length + 2.0 * effective_depth,
                width: wall_thickness + 2.0 * effective_depth,
                style: LineStyle::Dashed,
                colour: "#2ca02c",
            },
        }
    }

    /// Build the plan for a finished design.
    #[must_use]
    pub fn from_design(design: &FootingDesign, wall_length: f64, wall_thickness: f64) -> Self {
        Self::new(
            design.length,
            design.width,
            wall_length,
            wall_thickness,
            design.effective_depth,
        )
    }

    /// Outlines in drawing order.
    #[must_use]
    pub fn outlines(&self) -> [&Outline; 3] {
        [&self.footing, &self.wall, &self.critical]
    }

    /// Half-size of the square drawing window, padded by 10 %.
    fn half_extent(&self) -> f64 {
        let largest = self
            .outlines()
            .iter()
            .map(|outline| outline.length.max(outline.width))
            .fold(0.0_f64, f64::max);
        if largest > 0.0 {
            0.55 * largest
        } else {
            1.0
        }
    }

    /// Render the plan as a standalone SVG document with equal aspect.
    #[must_use]
    pub fn render_svg(&self, size_px: u32) -> String {
        let size = f64::from(size_px);
        let margin = 40.0;
        let half = self.half_extent();
        let scale = (size - 2.0 * margin) / (2.0 * half);
        let centre = size / 2.0;
        // SVG y grows downwards.
        let to_px = |p: &Point2<f64>| (centre + p.x * scale, centre - p.y * scale);

        let mut svg = String::new();
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size_px}" height="{size_px}" viewBox="0 0 {size_px} {size_px}">"#
        )
        .expect("writing to string cannot fail");
        writeln!(&mut svg, r#"<rect width="100%" height="100%" fill="white"/>"#)
            .expect("writing to string cannot fail");
        writeln!(
            &mut svg,
            r#"<text x="{centre:.1}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16">{PLAN_TITLE}</text>"#
        )
        .expect("writing to string cannot fail");

        // Grid at a round spacing.
        let spacing = grid_spacing(2.0 * half);
        let steps = (half / spacing).floor() as i64;
        for i in -steps..=steps {
            let offset = i as f64 * spacing * scale;
            writeln!(
                &mut svg,
                r##"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="#dddddd" stroke-width="1"/>"##,
                x = centre + offset,
                top = margin,
                bottom = size - margin,
            )
            .expect("writing to string cannot fail");
            writeln!(
                &mut svg,
                r##"<line x1="{left:.2}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}" stroke="#dddddd" stroke-width="1"/>"##,
                y = centre - offset,
                left = margin,
                right = size - margin,
            )
            .expect("writing to string cannot fail");
        }

        for outline in self.outlines() {
            let points = outline
                .vertices()
                .iter()
                .map(|vertex| {
                    let (x, y) = to_px(vertex);
                    format!("{x:.2},{y:.2}")
                })
                .collect::<Vec<_>>()
                .join(" ");
            let dash = match outline.style {
                LineStyle::Solid => "",
                LineStyle::Dashed => r#" stroke-dasharray="8 4""#,
            };
            writeln!(
                &mut svg,
                r#"<polyline points="{points}" fill="none" stroke="{}" stroke-width="2"{dash}><title>{}</title></polyline>"#,
                outline.colour, outline.label
            )
            .expect("writing to string cannot fail");
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Pick a 1-2-5 grid spacing giving roughly ten divisions over `span`.
fn grid_spacing(span: f64) -> f64 {
    let raw = span / 10.0;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalised = raw / magnitude;
    let step = if normalised < 1.5 {
        1.0
    } else if normalised < 3.5 {
        2.0
    } else if normalised < 7.5 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}
