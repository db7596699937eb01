use crate::domain::model::Rgb;
use crate::domain::ports::DrawingSurface;
use std::fmt::Write;

/// Collects filled rectangles and writes them out as an SVG document in millimetres.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    fill: Rgb,
    body: String,
    rects: usize,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            fill: Rgb::BLACK,
            body: String::new(),
            rects: 0,
        }
    }

    pub fn rect_count(&self) -> usize {
        self.rects
    }

    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\" shape-rendering=\"crispEdges\">\n{body}</svg>\n",
            w = number(self.width),
            h = number(self.height),
            body = self.body
        )
    }
}

fn number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

impl DrawingSurface for SvgSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        // String 寫入不會失敗
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            number(x),
            number(y),
            number(width),
            number(height),
            self.fill.to_hex()
        );
        self.rects += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_use_current_fill() {
        let mut surface = SvgSurface::new(46.0, 46.0);
        surface.set_fill_color(Rgb::WHITE);
        surface.fill_rect(0.0, 0.0, 46.0, 46.0);
        surface.set_fill_color(Rgb::BLACK);
        surface.fill_rect(5.0, 5.0, 1.5, 1.5);

        let svg = surface.to_svg();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("viewBox=\"0 0 46 46\""));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"46\" height=\"46\" fill=\"#ffffff\"/>"));
        assert!(svg.contains("<rect x=\"5\" y=\"5\" width=\"1.5\" height=\"1.5\" fill=\"#000000\"/>"));
        assert_eq!(surface.rect_count(), 2);
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(1.0 / 3.0), "0.3333");
        assert_eq!(number(12.0), "12");
        assert_eq!(number(0.10), "0.1");
    }
}
