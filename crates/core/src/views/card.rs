use folio_protocol::{
    HitTarget, Item, Point, Rect, RenderCommand, SharedStr, TextAlign, TextWeight, ThemeToken,
};

use super::layout::{text_width, wrap_text};

const CARD_RADIUS: f64 = 12.0;
const CARD_PAD: f64 = 24.0;
const IMAGE_HEIGHT: f64 = 192.0;
const TITLE_SIZE: f64 = 20.0;
const BODY_SIZE: f64 = 15.0;
const BODY_LINE: f64 = 22.0;
const MAX_BODY_LINES: usize = 3;
const TAG_SIZE: f64 = 12.0;
const TAG_HEIGHT: f64 = 22.0;
const TAG_PAD_X: f64 = 10.0;
const TAG_GAP: f64 = 6.0;
const LINK_HEIGHT: f64 = 32.0;

const ICON_SIZE: f64 = 48.0;
const LEVEL_BAR_H: f64 = 8.0;

fn card_frame(commands: &mut Vec<RenderCommand>, item: &Item, rect: Rect, prefix: &str) {
    commands.push(RenderCommand::BeginGroup {
        id: SharedStr::from(format!("{prefix}-{}", item.id)),
        label: Some(item.title.clone()),
    });
    commands.push(RenderCommand::DrawRect {
        rect,
        color: ThemeToken::CardBackground,
        border_color: Some(ThemeToken::CardBorder),
        radius: CARD_RADIUS,
        target: None,
    });
}

fn text(
    position: Point,
    text: impl Into<SharedStr>,
    color: ThemeToken,
    font_size: f64,
    align: TextAlign,
    weight: TextWeight,
) -> RenderCommand {
    RenderCommand::DrawText {
        position,
        text: text.into(),
        color,
        font_size,
        align,
        weight,
    }
}

/// Image, title, description, tag pills and outbound links of one project.
pub fn render_project_card(item: &Item, rect: Rect) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(16);
    card_frame(&mut commands, item, rect, "project");
    commands.push(RenderCommand::SetClip { rect });

    let image = Rect::new(rect.x, rect.y, rect.w, IMAGE_HEIGHT.min(rect.h));
    match &item.display.image {
        Some(url) => commands.push(RenderCommand::DrawImage {
            rect: image,
            url: url.clone(),
            alt: item.title.clone(),
        }),
        None => commands.push(RenderCommand::DrawRect {
            rect: image,
            color: ThemeToken::ImagePlaceholder,
            border_color: None,
            radius: 0.0,
            target: None,
        }),
    }

    let left = rect.x + CARD_PAD;
    let inner = (rect.w - 2.0 * CARD_PAD).max(0.0);
    let mut y = image.bottom() + CARD_PAD;

    for line in wrap_text(&item.title, TITLE_SIZE, inner).into_iter().take(2) {
        commands.push(text(
            Point::new(left, y + TITLE_SIZE / 2.0),
            line,
            ThemeToken::Heading,
            TITLE_SIZE,
            TextAlign::Left,
            TextWeight::Bold,
        ));
        y += TITLE_SIZE + 6.0;
    }
    y += 6.0;

    if let Some(description) = &item.display.description {
        let lines = wrap_text(description, BODY_SIZE, inner);
        let truncated = lines.len() > MAX_BODY_LINES;
        for (i, line) in lines.into_iter().take(MAX_BODY_LINES).enumerate() {
            let line = if truncated && i + 1 == MAX_BODY_LINES {
                SharedStr::from(format!("{line}…"))
            } else {
                line
            };
            commands.push(text(
                Point::new(left, y + BODY_LINE / 2.0),
                line,
                ThemeToken::TextSecondary,
                BODY_SIZE,
                TextAlign::Left,
                TextWeight::Regular,
            ));
            y += BODY_LINE;
        }
        y += 8.0;
    }

    let mut x = left;
    for tag in item.classification.values() {
        let w = text_width(tag, TAG_SIZE) + 2.0 * TAG_PAD_X;
        if x > left && x + w > left + inner {
            x = left;
            y += TAG_HEIGHT + TAG_GAP;
        }
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, w, TAG_HEIGHT),
            color: ThemeToken::TagBackground,
            border_color: None,
            radius: TAG_HEIGHT / 2.0,
            target: None,
        });
        commands.push(text(
            Point::new(x + w / 2.0, y + TAG_HEIGHT / 2.0),
            tag.clone(),
            ThemeToken::TagText,
            TAG_SIZE,
            TextAlign::Center,
            TextWeight::Medium,
        ));
        x += w + TAG_GAP;
    }

    let links = [("GitHub", &item.display.github), ("Demo", &item.display.link)];
    let link_y = rect.bottom() - CARD_PAD - LINK_HEIGHT;
    let mut x = left;
    for (label, url) in links {
        let Some(url) = url else { continue };
        let w = text_width(label, BODY_SIZE) + 24.0;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, link_y, w, LINK_HEIGHT),
            color: ThemeToken::CardBackground,
            border_color: None,
            radius: 6.0,
            target: Some(HitTarget::ExternalLink { url: url.clone() }),
        });
        commands.push(text(
            Point::new(x + w / 2.0, link_y + LINK_HEIGHT / 2.0),
            label,
            ThemeToken::Accent,
            BODY_SIZE,
            TextAlign::Center,
            TextWeight::Medium,
        ));
        x += w + 12.0;
    }

    commands.push(RenderCommand::ClearClip);
    commands.push(RenderCommand::EndGroup);
    commands
}

/// Icon, name and proficiency bar of one skill.
pub fn render_skill_tile(item: &Item, rect: Rect) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(10);
    card_frame(&mut commands, item, rect, "skill");

    let cx = rect.x + rect.w / 2.0;
    let mut y = rect.y + 16.0;
    if let Some(icon) = &item.display.icon {
        commands.push(RenderCommand::DrawImage {
            rect: Rect::new(cx - ICON_SIZE / 2.0, y, ICON_SIZE, ICON_SIZE),
            url: icon.clone(),
            alt: item.title.clone(),
        });
    }
    y += ICON_SIZE + 12.0;

    commands.push(text(
        Point::new(cx, y + 8.0),
        item.title.clone(),
        ThemeToken::TextPrimary,
        15.0,
        TextAlign::Center,
        TextWeight::Medium,
    ));
    y += 28.0;

    if let Some(level) = item.display.level {
        let track = Rect::new(rect.x + 16.0, y, (rect.w - 32.0).max(0.0), LEVEL_BAR_H);
        let fraction = f64::from(level.min(100)) / 100.0;
        commands.push(RenderCommand::DrawRect {
            rect: track,
            color: ThemeToken::LevelTrack,
            border_color: None,
            radius: LEVEL_BAR_H / 2.0,
            target: None,
        });
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(track.x, track.y, track.w * fraction, LEVEL_BAR_H),
            color: ThemeToken::LevelFill,
            border_color: None,
            radius: LEVEL_BAR_H / 2.0,
            target: None,
        });
        commands.push(text(
            Point::new(cx, track.bottom() + 12.0),
            format!("{level}%"),
            ThemeToken::TextMuted,
            12.0,
            TextAlign::Center,
            TextWeight::Regular,
        ));
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
