use std::rc::Rc;

use folio_core::model::{CardStyle, CategoryFilterList, Site, UiStore};
use folio_core::observe::{RegionId, ScrollObserver, SectionVisibilityTracker};
use folio_protocol::{FilterValue, Item, Rect, ThemeToken};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::renderer::theme_to_color;

const LEVEL_BAR_CELLS: usize = 20;

/// Rows of the whole page plus the row span of each section.
pub struct Document {
    pub lines: Vec<Line<'static>>,
    /// `(first_row, row_count)` per section, in page order.
    pub sections: Vec<(usize, usize)>,
}

/// Terminal page state: the same trackers and filters as the graphical
/// frontends, with rows standing in for pixels.
pub struct TuiApp {
    site: Site,
    lists: Vec<CategoryFilterList>,
    store: UiStore,
    observer: Rc<ScrollObserver>,
    trackers: Vec<SectionVisibilityTracker>,
    scroll: usize,
    focus: usize,
}

impl TuiApp {
    pub fn new(site: Site) -> Self {
        let lists = site
            .sections
            .iter()
            .map(CategoryFilterList::for_section)
            .collect();
        Self {
            site,
            lists,
            store: UiStore::new(),
            observer: Rc::new(ScrollObserver::new()),
            trackers: Vec::new(),
            scroll: 0,
            focus: 0,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn active_section(&self) -> Option<String> {
        self.store.active_section().map(|id| id.to_string())
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn filter(&self, section: usize) -> Option<&FilterValue> {
        self.lists.get(section).map(CategoryFilterList::filter)
    }

    /// Lay the page out at `width` columns and re-attach section regions.
    ///
    /// Trackers are mounted on the first call, once regions exist.
    pub fn layout(&mut self, width: u16) -> Document {
        let doc = self.document(width);
        for (i, (start, len)) in doc.sections.iter().enumerate() {
            self.observer.attach(
                RegionId(i as u64),
                Rect::new(0.0, *start as f64, f64::from(width), *len as f64),
            );
        }
        if self.trackers.is_empty() {
            self.trackers = self
                .site
                .sections
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    SectionVisibilityTracker::mount(
                        spec.id.clone(),
                        spec.threshold,
                        Some(RegionId(i as u64)),
                        self.observer.clone(),
                        &self.store,
                    )
                })
                .collect();
        }
        doc
    }

    /// Clamp the scroll offset and feed the visible rows to the observer.
    pub fn observe(&mut self, doc: &Document, width: u16, height: u16) {
        let max = doc.lines.len().saturating_sub(usize::from(height));
        self.scroll = self.scroll.min(max);
        self.observer.set_viewport(Rect::new(
            0.0,
            self.scroll as f64,
            f64::from(width),
            f64::from(height),
        ));
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
    }

    /// Move focus to the next section and scroll to it.
    pub fn focus_next(&mut self, doc: &Document) {
        if self.site.sections.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.site.sections.len();
        if let Some((start, _)) = doc.sections.get(self.focus) {
            self.scroll = *start;
        }
    }

    /// Step the focused section's filter through its chip row.
    pub fn cycle_filter(&mut self, forward: bool) -> bool {
        let Some(list) = self.lists.get_mut(self.focus) else {
            return false;
        };
        let controls = list.controls();
        if controls.is_empty() {
            return false;
        }
        let current = controls
            .iter()
            .position(|value| list.is_selected(value))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % controls.len()
        } else {
            (current + controls.len() - 1) % controls.len()
        };
        list.set_filter(controls[next].clone())
    }

    fn document(&self, width: u16) -> Document {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut sections = Vec::with_capacity(self.site.sections.len());
        let width = usize::from(width.max(20));

        for (i, (spec, list)) in self.site.sections.iter().zip(&self.lists).enumerate() {
            let start = lines.len();
            let heading_style = Style::default()
                .fg(theme_to_color(ThemeToken::Heading))
                .add_modifier(Modifier::BOLD);
            lines.push(Line::default());
            lines.push(Line::styled(spec.heading.to_string(), heading_style).centered());
            lines.push(
                Line::styled("━".repeat(8), Style::default().fg(theme_to_color(ThemeToken::Accent)))
                    .centered(),
            );
            for blurb in wrap(&spec.blurb, width.saturating_sub(4)) {
                lines.push(
                    Line::styled(blurb, Style::default().fg(theme_to_color(ThemeToken::TextSecondary)))
                        .centered(),
                );
            }
            lines.push(Line::default());
            lines.push(self.chip_line(i, spec.capitalizes_chips(), list).centered());
            lines.push(Line::default());

            let view = list.view();
            if view.is_empty() {
                lines.push(
                    Line::styled("—", Style::default().fg(theme_to_color(ThemeToken::TextMuted)))
                        .centered(),
                );
            }
            for item in view {
                match spec.style {
                    CardStyle::Project => project_lines(&mut lines, item, width),
                    CardStyle::Skill => lines.push(skill_line(item)),
                }
            }
            lines.push(Line::default());
            sections.push((start, lines.len() - start));
        }
        Document { lines, sections }
    }

    fn chip_line(&self, section: usize, capitalize: bool, list: &CategoryFilterList) -> Line<'static> {
        let focused = section == self.focus;
        let mut spans = Vec::new();
        for value in list.controls() {
            let label = self.site.chip_label(&value, capitalize);
            let style = if list.is_selected(&value) {
                Style::default()
                    .fg(theme_to_color(ThemeToken::ChipActiveText))
                    .bg(theme_to_color(ThemeToken::ChipActive))
            } else {
                Style::default()
                    .fg(theme_to_color(ThemeToken::ChipIdleText))
                    .bg(theme_to_color(ThemeToken::ChipIdle))
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        if focused {
            spans.insert(0, Span::styled("◀ ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled("▶", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

fn project_lines(lines: &mut Vec<Line<'static>>, item: &Item, width: usize) {
    lines.push(Line::styled(
        format!("  {}", item.title),
        Style::default()
            .fg(theme_to_color(ThemeToken::TextPrimary))
            .add_modifier(Modifier::BOLD),
    ));
    if let Some(description) = &item.display.description {
        for line in wrap(description, width.saturating_sub(4)) {
            lines.push(Line::styled(
                format!("  {line}"),
                Style::default().fg(theme_to_color(ThemeToken::TextSecondary)),
            ));
        }
    }
    let mut tags = vec![Span::raw("  ")];
    for tag in item.classification.values() {
        tags.push(Span::styled(
            format!("[{tag}]"),
            Style::default().fg(theme_to_color(ThemeToken::TagText)),
        ));
        tags.push(Span::raw(" "));
    }
    lines.push(Line::from(tags));
    for (label, url) in [("GitHub", &item.display.github), ("Demo", &item.display.link)] {
        if let Some(url) = url {
            lines.push(Line::styled(
                format!("  {label}: {url}"),
                Style::default().fg(theme_to_color(ThemeToken::Accent)),
            ));
        }
    }
    lines.push(Line::default());
}

fn skill_line(item: &Item) -> Line<'static> {
    let level = usize::from(item.display.level.unwrap_or(0).min(100));
    let filled = level * LEVEL_BAR_CELLS / 100;
    Line::from(vec![
        Span::styled(
            format!("  {:<24}", item.title),
            Style::default().fg(theme_to_color(ThemeToken::TextPrimary)),
        ),
        Span::styled(
            "█".repeat(filled),
            Style::default().fg(theme_to_color(ThemeToken::LevelFill)),
        ),
        Span::styled(
            "░".repeat(LEVEL_BAR_CELLS - filled),
            Style::default().fg(theme_to_color(ThemeToken::LevelTrack)),
        ),
        Span::styled(
            format!(" {level:>3}%"),
            Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
        ),
    ])
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
