use crate::domain::model::{ErrorCorrection, ModuleMatrix, Rgb};
use crate::domain::ports::{DrawingSurface, MatrixEncoder};
use crate::utils::error::{QrBillError, Result};

/// Placement and geometry of the code on the page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderLayout {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub quiet_zone: f64,
    pub emblem_size: f64,
}

impl Default for RenderLayout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: 46.0,
            quiet_zone: 5.0,
            emblem_size: 7.0,
        }
    }
}

impl RenderLayout {
    /// Square occupied by the emblem, centered on the code.
    pub fn emblem_rect(&self) -> Rect {
        let offset = (self.size - self.emblem_size) / 2.0;
        Rect {
            x: self.x + offset,
            y: self.y + offset,
            width: self.emblem_size,
            height: self.emblem_size,
        }
    }

    fn check(&self) -> Result<()> {
        let invalid = |field: &str, value: f64, reason: &str| QrBillError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(invalid("size", self.size, "must be positive"));
        }
        if !(self.quiet_zone >= 0.0 && self.quiet_zone * 2.0 < self.size) {
            return Err(invalid("quiet_zone", self.quiet_zone, "must leave room for modules"));
        }
        if !(self.emblem_size >= 0.0 && self.emblem_size < self.size - 2.0 * self.quiet_zone) {
            return Err(invalid("emblem_size", self.emblem_size, "must fit inside the code area"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// True when `other` lies entirely inside `self`, edges included.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        other.x < self.x + self.width
            && self.x < other.x + other.width
            && other.y < self.y + self.height
            && self.y < other.y + other.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    SetFillColor(Rgb),
    FillRect(Rect),
}

/// Computes every drawing call for `matrix` without touching a surface.
pub fn plan_for_matrix(
    matrix: &ModuleMatrix,
    layout: &RenderLayout,
    foreground: Rgb,
    background: Rgb,
) -> Vec<DrawOp> {
    let side = matrix.side();
    let module_size = (layout.size - 2.0 * layout.quiet_zone) / side as f64;
    let emblem = layout.emblem_rect();

    let mut ops = vec![
        DrawOp::SetFillColor(background),
        DrawOp::FillRect(Rect {
            x: layout.x,
            y: layout.y,
            width: layout.size,
            height: layout.size,
        }),
        DrawOp::SetFillColor(foreground),
    ];

    for row in 0..side {
        for col in 0..side {
            if !matrix.is_dark(row, col) {
                continue;
            }
            let module = Rect {
                x: layout.x + layout.quiet_zone + col as f64 * module_size,
                y: layout.y + layout.quiet_zone + row as f64 * module_size,
                width: module_size,
                height: module_size,
            };
            // 只略過完全被徽章蓋住的模組
            if emblem.contains(&module) {
                continue;
            }
            ops.push(DrawOp::FillRect(module));
        }
    }

    ops.push(DrawOp::FillRect(emblem));

    let thickness = layout.emblem_size / 5.0;
    let arm = thickness * 3.0;
    let center_x = emblem.x + emblem.width / 2.0;
    let center_y = emblem.y + emblem.height / 2.0;
    ops.push(DrawOp::SetFillColor(background));
    ops.push(DrawOp::FillRect(Rect {
        x: center_x - arm / 2.0,
        y: center_y - thickness / 2.0,
        width: arm,
        height: thickness,
    }));
    ops.push(DrawOp::FillRect(Rect {
        x: center_x - thickness / 2.0,
        y: center_y - arm / 2.0,
        width: thickness,
        height: arm,
    }));

    ops
}

/// Replays a plan onto a surface.
pub fn replay(ops: &[DrawOp], surface: &mut dyn DrawingSurface) {
    for op in ops {
        match op {
            DrawOp::SetFillColor(color) => surface.set_fill_color(*color),
            DrawOp::FillRect(rect) => surface.fill_rect(rect.x, rect.y, rect.width, rect.height),
        }
    }
}

pub struct BarcodeRenderer<E: MatrixEncoder> {
    encoder: E,
    foreground: Rgb,
    background: Rgb,
}

impl<E: MatrixEncoder> BarcodeRenderer<E> {
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
        }
    }

    /// Encodes `text` at medium error correction and returns the draw plan.
    pub fn plan(&self, text: &str, layout: &RenderLayout) -> Result<Vec<DrawOp>> {
        layout.check()?;
        let matrix = self.encoder.encode(text, ErrorCorrection::Medium)?;
        tracing::debug!("Encoded payload into a {}x{} matrix", matrix.side(), matrix.side());
        Ok(plan_for_matrix(&matrix, layout, self.foreground, self.background))
    }

    /// Draws the code. Nothing is drawn if encoding fails.
    pub fn render(
        &self,
        text: &str,
        layout: &RenderLayout,
        surface: &mut dyn DrawingSurface,
    ) -> Result<usize> {
        let ops = self.plan(text, layout)?;
        replay(&ops, surface);
        tracing::debug!("Rendered code with {} drawing operations", ops.len());
        Ok(ops.len())
    }
}
