//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write as _;

use folio_protocol::{HitTarget, RenderCommand, TextAlign, TextWeight, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the viewBox. `dark` selects the palette.
/// External links become `<a>` elements; other hit targets are dropped.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark),
    );

    let mut clip_ids = 0usize;
    let mut open_clips = 0usize;
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                radius,
                target,
            } => {
                let link = match target {
                    Some(HitTarget::ExternalLink { url }) => Some(url),
                    _ => None,
                };
                if let Some(url) = link {
                    let _ = write!(svg, r#"<a href="{}" target="_blank">"#, escape_xml(url));
                }
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" fill="{}""#,
                    rect.x,
                    rect.y,
                    rect.w.max(0.0),
                    rect.h.max(0.0),
                    resolve_color(*color, dark),
                );
                if let Some(border) = border_color {
                    let _ = write!(svg, r#" stroke="{}""#, resolve_color(*border, dark));
                }
                svg.push_str("/>");
                if link.is_some() {
                    svg.push_str("</a>");
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
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let weight = match weight {
                    TextWeight::Regular => 400,
                    TextWeight::Medium => 500,
                    TextWeight::Bold => 700,
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{}" font-size="{font_size}" font-weight="{weight}" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
                    position.x,
                    position.y,
                    resolve_color(*color, dark),
                    escape_xml(text),
                );
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{line_width}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    resolve_color(*color, dark),
                );
            }
            RenderCommand::DrawImage { rect, url, alt } => {
                let _ = write!(
                    svg,
                    r#"<image x="{}" y="{}" width="{}" height="{}" href="{}" preserveAspectRatio="xMidYMid slice"><title>{}</title></image>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    escape_xml(url),
                    escape_xml(alt),
                );
            }
            RenderCommand::SetClip { rect } => {
                clip_ids += 1;
                open_clips += 1;
                let _ = write!(
                    svg,
                    r#"<clipPath id="clip{clip_ids}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clip_ids})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
            }
            RenderCommand::ClearClip => {
                if open_clips > 0 {
                    open_clips -= 1;
                    svg.push_str("</g>");
                }
            }
            RenderCommand::PushTransform { translate, scale } => {
                let _ = write!(
                    svg,
                    r#"<g transform="translate({} {}) scale({} {})">"#,
                    translate.x, translate.y, scale.x, scale.y,
                );
            }
            RenderCommand::PushOpacity { alpha } => {
                let _ = write!(svg, r#"<g opacity="{}">"#, alpha.clamp(0.0, 1.0));
            }
            RenderCommand::BeginGroup { id, label } => {
                let _ = write!(svg, r#"<g id="{}""#, escape_xml(id));
                if let Some(label) = label {
                    let _ = write!(svg, r#" aria-label="{}""#, escape_xml(label));
                }
                svg.push('>');
            }
            RenderCommand::PopTransform | RenderCommand::PopOpacity | RenderCommand::EndGroup => {
                svg.push_str("</g>");
            }
        }
    }
    for _ in 0..open_clips {
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

/// Tailwind-like palette; light mode mirrors the site's gray/blue scheme.
fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background | ThemeToken::SectionBackground => "#111827",
            ThemeToken::SectionAltBackground => "#1f2937",
            ThemeToken::Heading => "#ffffff",
            ThemeToken::TextPrimary | ThemeToken::NavText => "#e5e7eb",
            ThemeToken::TextSecondary => "#d1d5db",
            ThemeToken::TextMuted => "#9ca3af",
            ThemeToken::Accent | ThemeToken::NavActive | ThemeToken::LevelFill => "#60a5fa",
            ThemeToken::NavBackground => "#111827",
            ThemeToken::NavBorder | ThemeToken::CardBorder => "#374151",
            ThemeToken::ChipIdle => "#374151",
            ThemeToken::ChipIdleText => "#d1d5db",
            ThemeToken::ChipActive => "#2563eb",
            ThemeToken::ChipActiveText => "#ffffff",
            ThemeToken::CardBackground => "#111827",
            ThemeToken::ImagePlaceholder | ThemeToken::LevelTrack => "#374151",
            ThemeToken::TagBackground => "#1e3a8a",
            ThemeToken::TagText => "#bfdbfe",
        }
    } else {
        match token {
            ThemeToken::Background | ThemeToken::SectionBackground => "#ffffff",
            ThemeToken::SectionAltBackground => "#f9fafb",
            ThemeToken::Heading => "#111827",
            ThemeToken::TextPrimary | ThemeToken::NavText => "#374151",
            ThemeToken::TextSecondary => "#4b5563",
            ThemeToken::TextMuted => "#6b7280",
            ThemeToken::Accent | ThemeToken::NavActive | ThemeToken::LevelFill => "#2563eb",
            ThemeToken::NavBackground => "#ffffff",
            ThemeToken::NavBorder | ThemeToken::CardBorder => "#e5e7eb",
            ThemeToken::ChipIdle => "#e5e7eb",
            ThemeToken::ChipIdleText => "#374151",
            ThemeToken::ChipActive => "#2563eb",
            ThemeToken::ChipActiveText => "#ffffff",
            ThemeToken::CardBackground => "#ffffff",
            ThemeToken::ImagePlaceholder | ThemeToken::LevelTrack => "#e5e7eb",
            ThemeToken::TagBackground => "#dbeafe",
            ThemeToken::TagText => "#1e40af",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
