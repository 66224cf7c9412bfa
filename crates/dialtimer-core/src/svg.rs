//! A [`DialSurface`] that builds a standalone SVG document.

use std::fmt::Write as _;

use crate::geometry::{ClockFace, WedgePath};
use crate::surface::DialSurface;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const STYLE: &str = "\
.tick-minute{stroke:#888;stroke-width:0.5}\
.tick-five-minute{stroke:#222;stroke-width:1}\
.label{font:5px sans-serif;text-anchor:middle;dominant-baseline:central}\
#time-wedge{fill:#e53935}";

/// Keeps the rendered face markup and the current wedge path.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    face: String,
    wedge: String,
    redraws: usize,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current `d` attribute of the wedge.
    pub fn wedge_data(&self) -> &str {
        &self.wedge
    }

    /// Number of wedge redraws so far.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn document(&self) -> String {
        format!(
            "<svg xmlns=\"{SVG_NS}\" id=\"timer-svg\" viewBox=\"0 0 100 100\">\
<style>{STYLE}</style>\
<path id=\"time-wedge\" d=\"{wedge}\"/>\
<g id=\"clock-face\">{face}</g>\
</svg>\n",
            wedge = self.wedge,
            face = self.face,
        )
    }
}

impl DialSurface for SvgSurface {
    fn draw_face(&mut self, face: &ClockFace) {
        let mut out = String::new();
        for tick in &face.ticks {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" class=\"{}\"/>",
                tick.from.x,
                tick.from.y,
                tick.to.x,
                tick.to.y,
                tick.class.as_str()
            );
        }
        for label in &face.labels {
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" class=\"label\">{}</text>",
                label.at.x, label.at.y, label.text
            );
        }
        self.face = out;
    }

    fn draw_wedge(&mut self, wedge: &WedgePath) {
        self.wedge = wedge.to_string();
        self.redraws += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DialGeometry;

    #[test]
    fn document_contains_face_and_wedge() {
        let dial = DialGeometry::default();
        let mut surface = SvgSurface::new();
        surface.draw_face(&dial.clock_face());
        surface.draw_wedge(&dial.wedge_path(1500.0));

        let doc = surface.document();
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert_eq!(doc.matches("<line ").count(), 60);
        assert_eq!(doc.matches("<text ").count(), 12);
        assert_eq!(doc.matches("class=\"tick-five-minute\"").count(), 12);
        assert!(doc.contains(">60</text>"));
        assert!(doc.contains("d=\"M 50,50 L 50,0 A 50,50 0 0 1 "));
    }

    #[test]
    fn empty_wedge_renders_empty_path() {
        let mut surface = SvgSurface::new();
        surface.draw_wedge(&WedgePath::Empty);
        assert_eq!(surface.wedge_data(), "");
        assert!(surface.document().contains("<path id=\"time-wedge\" d=\"\"/>"));
        assert_eq!(surface.redraws(), 1);
    }
}
