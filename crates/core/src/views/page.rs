use folio_protocol::{Rect, RenderCommand, ThemeToken};

use super::layout::PageLayout;
use super::nav::render_nav;
use super::section::render_section;
use crate::model::{CategoryFilterList, Site};
use crate::reveal::SectionFrames;

/// The full page in page coordinates: background, every section, then the
/// nav bar pinned at the top.
///
/// `frames` is index-aligned with the sections; missing entries render at
/// rest. Sections whose bounds miss `visible` are skipped.
pub fn render_page(
    site: &Site,
    lists: &[CategoryFilterList],
    layout: &PageLayout,
    frames: &[SectionFrames],
    active: Option<&str>,
    visible: Option<Rect>,
) -> Vec<RenderCommand> {
    let mut commands = vec![RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, layout.width, layout.height),
        color: ThemeToken::Background,
        border_color: None,
        radius: 0.0,
        target: None,
    }];
    for (i, (section, list)) in site.sections.iter().zip(lists).enumerate() {
        let Some(section_layout) = layout.sections.get(i) else {
            break;
        };
        if visible.is_some_and(|v| section_layout.bounds.intersect(&v).is_none()) {
            continue;
        }
        let frame = frames.get(i).unwrap_or(&SectionFrames::REST);
        commands.extend(render_section(section, list, section_layout, frame));
    }
    commands.extend(render_nav(site, active, layout.width));
    commands
}

/// Static rendering with every section at rest and a fresh filter state.
pub fn render_static(site: &Site, width: f64) -> (PageLayout, Vec<RenderCommand>) {
    let lists: Vec<CategoryFilterList> = site
        .sections
        .iter()
        .map(CategoryFilterList::for_section)
        .collect();
    let layout = PageLayout::compute(site, &lists, width);
    let commands = render_page(site, &lists, &layout, &[], None, None);
    (layout, commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin_site;

    fn section_groups(commands: &[RenderCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { id, .. }
                    if matches!(id.as_str(), "projects" | "skills" | "nav") =>
                {
                    Some(id.as_str())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn static_page_has_every_section_and_nav_last() {
        let site = builtin_site();
        let (layout, commands) = render_static(&site, 1024.0);
        assert_eq!(section_groups(&commands), vec!["projects", "skills", "nav"]);
        assert!(layout.height > layout.sections[1].bounds.y);
    }

    #[test]
    fn culls_sections_outside_visible_rect() {
        let site = builtin_site();
        let lists: Vec<_> = site
            .sections
            .iter()
            .map(CategoryFilterList::for_section)
            .collect();
        let layout = PageLayout::compute(&site, &lists, 1024.0);
        let bottom = layout.sections[1].bounds.translate(0.0, 10.0);
        let commands = render_page(&site, &lists, &layout, &[], Some("skills"), Some(bottom));
        assert_eq!(section_groups(&commands), vec!["skills", "nav"]);
    }
}
