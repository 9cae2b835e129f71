use folio_protocol::{FilterValue, Point, Rect, SharedStr};

use crate::model::{CardStyle, CategoryFilterList, SectionSpec, Site};

pub const NAV_HEIGHT: f64 = 64.0;

const BREAKPOINT_SM: f64 = 640.0;
const BREAKPOINT_MD: f64 = 768.0;
const BREAKPOINT_LG: f64 = 1024.0;

const CONTAINER_MAX: f64 = 1280.0;
const CONTAINER_PAD: f64 = 16.0;
const PROSE_MAX: f64 = 768.0;

const SECTION_PAD_Y: f64 = 80.0;
pub const HEADING_SIZE: f64 = 36.0;
pub const BLURB_SIZE: f64 = 18.0;
const BLURB_LINE: f64 = 28.0;
const DIVIDER_W: f64 = 80.0;
const DIVIDER_H: f64 = 4.0;

pub const CHIP_HEIGHT: f64 = 36.0;
pub const CHIP_FONT: f64 = 14.0;
const CHIP_PAD_X: f64 = 16.0;
const CHIP_GAP: f64 = 8.0;

const PROJECT_CARD_H: f64 = 400.0;
const PROJECT_GAP: f64 = 32.0;
const SKILL_TILE_H: f64 = 150.0;
const SKILL_GAP: f64 = 24.0;

/// Rough advance width of `text` at `font_size`, for layout only.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.55
}

/// Greedy word wrap to at most `max_width` pixels per line.
///
/// Words wider than a line are kept whole on their own line.
pub fn wrap_text(text: &str, font_size: f64, max_width: f64) -> Vec<SharedStr> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if !current.is_empty() && candidate_len as f64 * font_size * 0.55 > max_width {
            lines.push(SharedStr::from(std::mem::take(&mut current)));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current.into());
    }
    lines
}

/// Grid columns for `style` at page width `width`.
pub fn grid_columns(style: CardStyle, width: f64) -> usize {
    match style {
        CardStyle::Project if width >= BREAKPOINT_LG => 3,
        CardStyle::Project if width >= BREAKPOINT_MD => 2,
        CardStyle::Project => 1,
        CardStyle::Skill if width >= BREAKPOINT_MD => 4,
        CardStyle::Skill if width >= BREAKPOINT_SM => 3,
        CardStyle::Skill => 2,
    }
}

fn card_metrics(style: CardStyle) -> (f64, f64) {
    match style {
        CardStyle::Project => (PROJECT_CARD_H, PROJECT_GAP),
        CardStyle::Skill => (SKILL_TILE_H, SKILL_GAP),
    }
}

/// Horizontal extent of the centered content container.
fn container(width: f64) -> (f64, f64) {
    let inner = (width.min(CONTAINER_MAX) - 2.0 * CONTAINER_PAD).max(0.0);
    ((width - inner) / 2.0, inner)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChipLayout {
    pub value: FilterValue,
    pub label: SharedStr,
    pub rect: Rect,
}

/// Absolute page geometry of one section for the current filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub bounds: Rect,
    /// Center of the heading baseline box.
    pub heading: Point,
    pub divider: Rect,
    pub blurb: Vec<(Point, SharedStr)>,
    pub chips: Vec<ChipLayout>,
    /// Grid area; zero height when the view is empty.
    pub grid: Rect,
    /// One rect per item of the filtered view, in view order.
    pub cards: Vec<Rect>,
}

impl SectionLayout {
    /// The chip under `p`, if any.
    pub fn chip_at(&self, p: Point) -> Option<&ChipLayout> {
        self.chips.iter().find(|chip| chip.rect.contains(p))
    }
}

pub fn layout_section(
    site: &Site,
    section: &SectionSpec,
    list: &CategoryFilterList,
    top: f64,
    width: f64,
) -> SectionLayout {
    let (left, inner) = container(width);
    let center_x = width / 2.0;
    let mut y = top + SECTION_PAD_Y;

    let heading = Point::new(center_x, y + HEADING_SIZE / 2.0);
    y += HEADING_SIZE + 16.0;

    let divider = Rect::new(center_x - DIVIDER_W / 2.0, y, DIVIDER_W, DIVIDER_H);
    y += DIVIDER_H + 24.0;

    let prose = inner.min(PROSE_MAX);
    let blurb: Vec<(Point, SharedStr)> = wrap_text(&section.blurb, BLURB_SIZE, prose)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            (
                Point::new(center_x, y + i as f64 * BLURB_LINE + BLURB_LINE / 2.0),
                line,
            )
        })
        .collect();
    y += blurb.len() as f64 * BLURB_LINE + 64.0;

    let (chips, chips_height) =
        layout_chips(site, list, section.capitalizes_chips(), left, inner, y);
    y += chips_height + 48.0;

    let view_len = list.view().len();
    let columns = grid_columns(section.style, width);
    let (card_h, gap) = card_metrics(section.style);
    let card_w = ((inner - gap * (columns as f64 - 1.0)) / columns as f64).max(0.0);
    let rows = view_len.div_ceil(columns);
    let grid_h = if rows == 0 {
        0.0
    } else {
        rows as f64 * card_h + (rows as f64 - 1.0) * gap
    };
    let grid = Rect::new(left, y, inner, grid_h);
    let cards = (0..view_len)
        .map(|i| {
            let row = (i / columns) as f64;
            let col = (i % columns) as f64;
            Rect::new(left + col * (card_w + gap), y + row * (card_h + gap), card_w, card_h)
        })
        .collect();
    y += grid_h + SECTION_PAD_Y;

    SectionLayout {
        bounds: Rect::new(0.0, top, width, y - top),
        heading,
        divider,
        blurb,
        chips,
        grid,
        cards,
    }
}

/// Chips flow left to right and wrap; each row is centered.
fn layout_chips(
    site: &Site,
    list: &CategoryFilterList,
    capitalize: bool,
    left: f64,
    inner: f64,
    top: f64,
) -> (Vec<ChipLayout>, f64) {
    let mut rows: Vec<Vec<(FilterValue, SharedStr, f64)>> = vec![Vec::new()];
    let mut row_width = 0.0;
    for value in list.controls() {
        let label = site.chip_label(&value, capitalize);
        let w = text_width(&label, CHIP_FONT) + 2.0 * CHIP_PAD_X;
        let needed = if row_width > 0.0 { row_width + CHIP_GAP + w } else { w };
        if needed > inner && row_width > 0.0 {
            rows.push(Vec::new());
            row_width = w;
        } else {
            row_width = needed;
        }
        if let Some(row) = rows.last_mut() {
            row.push((value, label, w));
        }
    }

    let mut chips = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        let total: f64 =
            row.iter().map(|(_, _, w)| w).sum::<f64>() + CHIP_GAP * (row.len().saturating_sub(1)) as f64;
        let mut x = left + (inner - total).max(0.0) / 2.0;
        let y = top + r as f64 * (CHIP_HEIGHT + CHIP_GAP);
        for (value, label, w) in row {
            chips.push(ChipLayout {
                value: value.clone(),
                label: label.clone(),
                rect: Rect::new(x, y, *w, CHIP_HEIGHT),
            });
            x += w + CHIP_GAP;
        }
    }
    let height = rows.len() as f64 * (CHIP_HEIGHT + CHIP_GAP) - CHIP_GAP;
    (chips, height)
}

/// All sections stacked below the nav bar, in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub sections: Vec<SectionLayout>,
    pub height: f64,
}

impl PageLayout {
    /// `lists` must be index-aligned with `site.sections`.
    pub fn compute(site: &Site, lists: &[CategoryFilterList], width: f64) -> Self {
        let mut top = NAV_HEIGHT;
        let mut sections = Vec::with_capacity(site.sections.len());
        for (section, list) in site.sections.iter().zip(lists) {
            let layout = layout_section(site, section, list, top, width);
            top = layout.bounds.bottom();
            sections.push(layout);
        }
        Self {
            width,
            sections,
            height: top,
        }
    }

    pub fn section_bounds(&self, index: usize) -> Option<Rect> {
        self.sections.get(index).map(|s| s.bounds)
    }

    /// Scroll offset that puts section `index` just under the nav bar.
    pub fn scroll_target(&self, index: usize) -> Option<f64> {
        self.section_bounds(index).map(|b| (b.y - NAV_HEIGHT).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin_site;

    fn lists(site: &Site) -> Vec<CategoryFilterList> {
        site.sections.iter().map(CategoryFilterList::for_section).collect()
    }

    #[test]
    fn breakpoints() {
        assert_eq!(grid_columns(CardStyle::Project, 500.0), 1);
        assert_eq!(grid_columns(CardStyle::Project, 800.0), 2);
        assert_eq!(grid_columns(CardStyle::Project, 1200.0), 3);
        assert_eq!(grid_columns(CardStyle::Skill, 500.0), 2);
        assert_eq!(grid_columns(CardStyle::Skill, 700.0), 3);
        assert_eq!(grid_columns(CardStyle::Skill, 1200.0), 4);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text("one two three four", 10.0, 50.0);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert!(wrap_text("   ", 10.0, 50.0).is_empty());
    }

    #[test]
    fn sections_stack_without_gaps() {
        let site = builtin_site();
        let page = PageLayout::compute(&site, &lists(&site), 1200.0);
        assert_eq!(page.sections.len(), 2);
        assert_eq!(page.sections[0].bounds.y, NAV_HEIGHT);
        assert_eq!(page.sections[1].bounds.y, page.sections[0].bounds.bottom());
        assert_eq!(page.height, page.sections[1].bounds.bottom());
        assert_eq!(page.scroll_target(1), Some(page.sections[1].bounds.y - NAV_HEIGHT));
    }

    #[test]
    fn skill_grid_rows_follow_filter() {
        let site = builtin_site();
        let mut lists = lists(&site);
        let all = PageLayout::compute(&site, &lists, 1200.0);
        // 8 tiles in 4 columns: two rows.
        assert_eq!(all.sections[1].cards.len(), 8);
        assert_eq!(all.sections[1].grid.h, 2.0 * SKILL_TILE_H + SKILL_GAP);

        lists[1].set_filter("nothing");
        let empty = PageLayout::compute(&site, &lists, 1200.0);
        assert!(empty.sections[1].cards.is_empty());
        assert_eq!(empty.sections[1].grid.h, 0.0);
        assert!(empty.height < all.height);
    }

    #[test]
    fn chips_start_with_all_label() {
        let site = builtin_site();
        let page = PageLayout::compute(&site, &lists(&site), 1200.0);
        let labels: Vec<&str> = page.sections[1].chips.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Tümü", "Frontend", "Backend", "Design", "Other"]);
        let first = &page.sections[1].chips[0];
        let hit = Point::new(first.rect.x + 1.0, first.rect.y + 1.0);
        assert_eq!(page.sections[1].chip_at(hit).map(|c| &c.value), Some(&FilterValue::All));
    }

    #[test]
    fn narrow_page_wraps_chips() {
        let site = builtin_site();
        let page = PageLayout::compute(&site, &lists(&site), 320.0);
        let rows: std::collections::BTreeSet<i64> = page.sections[0]
            .chips
            .iter()
            .map(|c| c.rect.y as i64)
            .collect();
        assert!(rows.len() > 1);
        for chip in &page.sections[0].chips {
            assert!(chip.rect.x >= 0.0 && chip.rect.right() <= 320.0);
        }
    }
}
