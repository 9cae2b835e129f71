use folio_protocol::{
    HitTarget, Point, RenderCommand, TextAlign, TextWeight, ThemeToken,
};

use super::card::{render_project_card, render_skill_tile};
use super::layout::{BLURB_SIZE, CHIP_FONT, CHIP_HEIGHT, HEADING_SIZE, SectionLayout};
use crate::model::{CardStyle, CategoryFilterList, SectionSpec};
use crate::reveal::{RevealFrame, SectionFrames};

/// Wrap `body` in the opacity and offset of `frame`. Parts at rest are
/// emitted bare.
fn animated(commands: &mut Vec<RenderCommand>, frame: RevealFrame, body: Vec<RenderCommand>) {
    if frame.opacity <= 0.0 {
        return;
    }
    let moving = frame.offset_y != 0.0;
    let faded = frame.opacity < 1.0;
    if faded {
        commands.push(RenderCommand::PushOpacity {
            alpha: frame.opacity,
        });
    }
    if moving {
        commands.push(RenderCommand::PushTransform {
            translate: Point::new(0.0, frame.offset_y),
            scale: Point::new(1.0, 1.0),
        });
    }
    commands.extend(body);
    if moving {
        commands.push(RenderCommand::PopTransform);
    }
    if faded {
        commands.push(RenderCommand::PopOpacity);
    }
}

/// One section: background band, header, filter chips and the card grid for
/// the list's current view.
///
/// `layout` must have been computed from the same `list` state.
pub fn render_section(
    section: &SectionSpec,
    list: &CategoryFilterList,
    layout: &SectionLayout,
    frames: &SectionFrames,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(32 + layout.cards.len() * 12);
    commands.push(RenderCommand::BeginGroup {
        id: section.id.clone(),
        label: Some(section.heading.clone()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: layout.bounds,
        color: match section.style {
            CardStyle::Project => ThemeToken::SectionAltBackground,
            CardStyle::Skill => ThemeToken::SectionBackground,
        },
        border_color: None,
        radius: 0.0,
        target: None,
    });

    let mut header = vec![
        RenderCommand::DrawText {
            position: layout.heading,
            text: section.heading.clone(),
            color: ThemeToken::Heading,
            font_size: HEADING_SIZE,
            align: TextAlign::Center,
            weight: TextWeight::Bold,
        },
        RenderCommand::DrawRect {
            rect: layout.divider,
            color: ThemeToken::Accent,
            border_color: None,
            radius: layout.divider.h / 2.0,
            target: None,
        },
    ];
    header.extend(layout.blurb.iter().map(|(position, line)| RenderCommand::DrawText {
        position: *position,
        text: line.clone(),
        color: ThemeToken::TextSecondary,
        font_size: BLURB_SIZE,
        align: TextAlign::Center,
        weight: TextWeight::Regular,
    }));
    animated(&mut commands, frames.header, header);

    let mut chips = Vec::with_capacity(layout.chips.len() * 2);
    for chip in &layout.chips {
        let selected = list.is_selected(&chip.value);
        chips.push(RenderCommand::DrawRect {
            rect: chip.rect,
            color: if selected {
                ThemeToken::ChipActive
            } else {
                ThemeToken::ChipIdle
            },
            border_color: None,
            radius: CHIP_HEIGHT / 2.0,
            target: Some(HitTarget::FilterChip {
                section: section.id.clone(),
                value: chip.value.clone(),
            }),
        });
        chips.push(RenderCommand::DrawText {
            position: Point::new(
                chip.rect.x + chip.rect.w / 2.0,
                chip.rect.y + chip.rect.h / 2.0,
            ),
            text: chip.label.clone(),
            color: if selected {
                ThemeToken::ChipActiveText
            } else {
                ThemeToken::ChipIdleText
            },
            font_size: CHIP_FONT,
            align: TextAlign::Center,
            weight: TextWeight::Medium,
        });
    }
    animated(&mut commands, frames.controls, chips);

    let mut grid = Vec::new();
    for (item, rect) in list.view().into_iter().zip(&layout.cards) {
        grid.extend(match section.style {
            CardStyle::Project => render_project_card(item, *rect),
            CardStyle::Skill => render_skill_tile(item, *rect),
        });
    }
    animated(&mut commands, frames.grid, grid);

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin_site;
    use crate::reveal::{RevealLatch, SectionTransitions};
    use crate::views::layout::PageLayout;
    use folio_protocol::FilterValue;

    fn chip_targets(commands: &[RenderCommand]) -> Vec<(FilterValue, ThemeToken)> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    color,
                    target: Some(HitTarget::FilterChip { value, .. }),
                    ..
                } => Some((value.clone(), *color)),
                _ => None,
            })
            .collect()
    }

    fn count_groups(commands: &[RenderCommand], prefix: &str) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::BeginGroup { id, .. } if id.starts_with(prefix)))
            .count()
    }

    #[test]
    fn active_chip_is_highlighted() {
        let site = builtin_site();
        let mut lists: Vec<_> = site
            .sections
            .iter()
            .map(CategoryFilterList::for_section)
            .collect();
        lists[1].set_filter("backend");
        let page = PageLayout::compute(&site, &lists, 1200.0);
        let commands = render_section(
            &site.sections[1],
            &lists[1],
            &page.sections[1],
            &SectionFrames::REST,
        );
        let chips = chip_targets(&commands);
        assert_eq!(chips.len(), 5);
        for (value, color) in chips {
            let expected = if value == FilterValue::parse("backend") {
                ThemeToken::ChipActive
            } else {
                ThemeToken::ChipIdle
            };
            assert_eq!(color, expected, "{value}");
        }
        assert_eq!(count_groups(&commands, "skill-"), 4);
    }

    #[test]
    fn at_rest_emits_no_animation_commands() {
        let site = builtin_site();
        let list = CategoryFilterList::for_section(&site.sections[0]);
        let page = PageLayout::compute(&site, std::slice::from_ref(&list), 1200.0);
        let commands = render_section(&site.sections[0], &list, &page.sections[0], &SectionFrames::REST);
        assert!(!commands.iter().any(|c| matches!(
            c,
            RenderCommand::PushOpacity { .. } | RenderCommand::PushTransform { .. }
        )));
        assert_eq!(count_groups(&commands, "project-"), 1);
    }

    #[test]
    fn hidden_parts_are_skipped_until_reveal() {
        let site = builtin_site();
        let section = &site.sections[0];
        let list = CategoryFilterList::for_section(section);
        let page = PageLayout::compute(&site, std::slice::from_ref(&list), 1200.0);
        let transitions = SectionTransitions::for_style(section.style);

        let mut latch = RevealLatch::default();
        let hidden = render_section(section, &list, &page.sections[0], &transitions.frames(&latch, 0.0));
        assert!(chip_targets(&hidden).is_empty());
        assert_eq!(count_groups(&hidden, "project-"), 0);

        latch.observe(true, 0.0);
        let mid = render_section(section, &list, &page.sections[0], &transitions.frames(&latch, 0.3));
        assert!(mid.iter().any(|c| matches!(c, RenderCommand::PushTransform { .. })));
        let pushes = mid
            .iter()
            .filter(|c| matches!(c, RenderCommand::PushOpacity { .. }))
            .count();
        let pops = mid
            .iter()
            .filter(|c| matches!(c, RenderCommand::PopOpacity))
            .count();
        assert_eq!(pushes, pops);
    }
}
