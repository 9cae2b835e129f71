use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind};
use folio_protocol::{HitTarget, RenderCommand, TextAlign, TextWeight, ThemeToken};

use crate::theme::{self, ThemeMode};

/// Transform state for PushTransform/PopTransform.
#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
}

impl Transform {
    fn identity() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }

    fn apply_x(&self, x: f64) -> f32 {
        (x * self.sx + self.tx) as f32
    }

    fn apply_y(&self, y: f64) -> f32 {
        (y * self.sy + self.ty) as f32
    }

    fn scale_w(&self, w: f64) -> f32 {
        (w * self.sx) as f32
    }

    fn scale_h(&self, h: f64) -> f32 {
        (h * self.sy) as f32
    }

    fn rect(&self, rect: &folio_protocol::Rect, offset: Pos2) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.apply_x(rect.x) + offset.x, self.apply_y(rect.y) + offset.y),
            egui::vec2(self.scale_w(rect.w), self.scale_h(rect.h)),
        )
    }
}

/// An interactive rectangle in screen coordinates.
pub struct HitRegion {
    pub rect: Rect,
    pub target: HitTarget,
}

/// Result of rendering a command list: includes hit regions for interaction.
#[derive(Default)]
pub struct RenderResult {
    pub hit_regions: Vec<HitRegion>,
}

impl RenderResult {
    /// Topmost target under `pos`.
    pub fn target_at(&self, pos: Pos2) -> Option<&HitTarget> {
        self.hit_regions
            .iter()
            .rev()
            .find(|hit| hit.rect.contains(pos))
            .map(|hit| &hit.target)
    }

    pub fn extend(&mut self, other: RenderResult) {
        self.hit_regions.extend(other.hit_regions);
    }
}

fn corner(radius: f64) -> CornerRadius {
    CornerRadius::same(radius.clamp(0.0, 255.0) as u8)
}

fn faded(color: Color32, alpha: f32) -> Color32 {
    if alpha >= 1.0 {
        color
    } else {
        color.gamma_multiply(alpha.max(0.0))
    }
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` maps command coordinates to screen pixels. Fully transparent
/// content is skipped and contributes no hit regions.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) -> RenderResult {
    let mut transform_stack: Vec<Transform> = vec![Transform::identity()];
    let mut opacity_stack: Vec<f32> = vec![1.0];
    let mut clip_stack: Vec<Rect> = Vec::new();
    let mut hit_regions: Vec<HitRegion> = Vec::new();

    for cmd in commands {
        let tf = transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::identity());
        let alpha = opacity_stack.last().copied().unwrap_or(1.0);
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                radius,
                target,
            } => {
                let egui_rect = tf.rect(rect, offset);
                if egui_rect.width() < 0.5 || egui_rect.height() < 0.5 || alpha <= 0.0 {
                    continue;
                }
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }

                let rounding = corner(*radius);
                painter.rect_filled(egui_rect, rounding, faded(theme::resolve(*color, mode), alpha));
                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        rounding,
                        Stroke::new(1.0, faded(theme::resolve(*bc, mode), alpha)),
                        StrokeKind::Inside,
                    );
                }

                if let Some(target) = target {
                    hit_regions.push(HitRegion {
                        rect: egui_rect.intersect(painter.clip_rect()),
                        target: target.clone(),
                    });
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                weight,
            } => {
                let size = *font_size as f32;
                if size < 1.0 || alpha <= 0.0 {
                    continue;
                }
                let pos = Pos2::new(tf.apply_x(position.x) + offset.x, tf.apply_y(position.y) + offset.y);
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_CENTER,
                };
                let color = faded(theme::resolve(*color, mode), alpha);
                painter.text(pos, anchor, text.as_str(), FontId::proportional(size), color);
                // The default font set has no bold face; overdraw to thicken.
                if *weight == TextWeight::Bold {
                    painter.text(
                        pos + egui::vec2(0.6, 0.0),
                        anchor,
                        text.as_str(),
                        FontId::proportional(size),
                        color,
                    );
                }
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                let p1 = Pos2::new(tf.apply_x(from.x) + offset.x, tf.apply_y(from.y) + offset.y);
                let p2 = Pos2::new(tf.apply_x(to.x) + offset.x, tf.apply_y(to.y) + offset.y);
                let line_color = faded(theme::resolve(*color, mode), alpha);
                painter.line_segment([p1, p2], Stroke::new(*width as f32, line_color));
            }

            RenderCommand::DrawImage { rect, alt, .. } => {
                let egui_rect = tf.rect(rect, offset);
                if alpha <= 0.0 || !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }
                painter.rect_filled(
                    egui_rect,
                    CornerRadius::ZERO,
                    faded(theme::resolve(ThemeToken::ImagePlaceholder, mode), alpha),
                );
                if egui_rect.width() > 80.0 {
                    painter.text(
                        egui_rect.center(),
                        Align2::CENTER_CENTER,
                        alt.as_str(),
                        FontId::proportional(theme::FONT_CAPTION),
                        faded(theme::resolve(ThemeToken::TextMuted, mode), alpha),
                    );
                }
            }

            RenderCommand::SetClip { rect } => {
                let clip_rect = tf.rect(rect, offset);
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(clip_rect);
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::PushTransform { translate, scale } => {
                let parent = tf;
                transform_stack.push(Transform {
                    tx: parent.tx + translate.x * parent.sx,
                    ty: parent.ty + translate.y * parent.sy,
                    sx: parent.sx * scale.x,
                    sy: parent.sy * scale.y,
                });
            }

            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }

            RenderCommand::PushOpacity { alpha: a } => {
                opacity_stack.push(alpha * (*a as f32).clamp(0.0, 1.0));
            }

            RenderCommand::PopOpacity => {
                if opacity_stack.len() > 1 {
                    opacity_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    RenderResult { hit_regions }
}
