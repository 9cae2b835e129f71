use folio_protocol::{
    HitTarget, Point, Rect, RenderCommand, TextAlign, TextWeight, ThemeToken,
};

use super::layout::{NAV_HEIGHT, text_width};
use crate::model::Site;

const NAV_FONT: f64 = 15.0;
const TITLE_FONT: f64 = 20.0;
const LINK_PAD_X: f64 = 12.0;
const LINK_GAP: f64 = 8.0;

/// Fixed navigation bar in viewport coordinates.
///
/// One link per section, right-aligned. The section equal to `active` is
/// highlighted; `None` highlights nothing.
pub fn render_nav(site: &Site, active: Option<&str>, width: f64) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(4 + site.sections.len() * 3);
    commands.push(RenderCommand::BeginGroup {
        id: "nav".into(),
        label: None,
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, NAV_HEIGHT),
        color: ThemeToken::NavBackground,
        border_color: None,
        radius: 0.0,
        target: None,
    });
    commands.push(RenderCommand::DrawLine {
        from: Point::new(0.0, NAV_HEIGHT),
        to: Point::new(width, NAV_HEIGHT),
        color: ThemeToken::NavBorder,
        width: 1.0,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(24.0, NAV_HEIGHT / 2.0),
        text: site.title.clone(),
        color: ThemeToken::Heading,
        font_size: TITLE_FONT,
        align: TextAlign::Left,
        weight: TextWeight::Bold,
    });

    let widths: Vec<f64> = site
        .sections
        .iter()
        .map(|s| text_width(&s.heading, NAV_FONT) + 2.0 * LINK_PAD_X)
        .collect();
    let total: f64 = widths.iter().sum::<f64>() + LINK_GAP * widths.len().saturating_sub(1) as f64;
    let mut x = (width - 24.0 - total).max(0.0);

    for (section, w) in site.sections.iter().zip(widths) {
        let is_active = active == Some(section.id.as_str());
        let link = Rect::new(x, (NAV_HEIGHT - 36.0) / 2.0, w, 36.0);
        commands.push(RenderCommand::DrawRect {
            rect: link,
            color: ThemeToken::NavBackground,
            border_color: None,
            radius: 6.0,
            target: Some(HitTarget::NavLink {
                section: section.id.clone(),
            }),
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(link.x + w / 2.0, NAV_HEIGHT / 2.0),
            text: section.heading.clone(),
            color: if is_active {
                ThemeToken::NavActive
            } else {
                ThemeToken::NavText
            },
            font_size: NAV_FONT,
            align: TextAlign::Center,
            weight: if is_active {
                TextWeight::Bold
            } else {
                TextWeight::Medium
            },
        });
        if is_active {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(link.x + LINK_PAD_X, link.bottom()),
                to: Point::new(link.right() - LINK_PAD_X, link.bottom()),
                color: ThemeToken::NavActive,
                width: 2.0,
            });
        }
        x += w + LINK_GAP;
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
