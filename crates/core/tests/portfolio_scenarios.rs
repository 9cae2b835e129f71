//! Integration test: load site content from a fixture, mount trackers for
//! every section on one scroll observer, and drive filters and scrolling the
//! way a frontend would.

use std::rc::Rc;

use folio_core::content::parse_site;
use folio_core::model::{CategoryFilterList, FilterControls, UiStore};
use folio_core::observe::{IntersectionSource, RegionId, ScrollObserver, SectionVisibilityTracker};
use folio_core::svg::render_svg;
use folio_core::views::{NAV_HEIGHT, PageLayout, render_nav, render_static};
use folio_protocol::{Catalog, Classification, FilterValue, Item, Rect};

const FIXTURE: &[u8] = include_bytes!("fixtures/site.json");

fn ids(list: &CategoryFilterList) -> Vec<u32> {
    list.view().iter().map(|item| item.id.0).collect()
}

#[test]
fn single_item_filter_scenario() {
    let catalog = Catalog::new(vec![Item::new(
        1,
        "Site",
        Classification::tags(["JavaScript", "Node.js"]),
    )]);
    let mut list = CategoryFilterList::new(catalog, FilterControls::Derived);

    list.set_filter("Node.js");
    assert_eq!(ids(&list), vec![1]);
    list.set_filter("Python");
    assert!(ids(&list).is_empty());
    list.set_filter("all");
    assert_eq!(ids(&list), vec![1]);
    assert_eq!(list.filter(), &FilterValue::All);
}

#[test]
fn last_crossing_wins() {
    let site = parse_site(FIXTURE).expect("fixture is valid");
    let store = UiStore::new();
    let observer = Rc::new(ScrollObserver::new());
    let source: Rc<dyn IntersectionSource> = observer.clone();
    observer.attach_measured(RegionId(1));
    observer.attach_measured(RegionId(2));

    let skills = SectionVisibilityTracker::mount(
        "skills",
        site.sections[1].threshold,
        Some(RegionId(2)),
        Rc::clone(&source),
        &store,
    );
    let projects = SectionVisibilityTracker::mount(
        "projects",
        site.sections[0].threshold,
        Some(RegionId(1)),
        Rc::clone(&source),
        &store,
    );

    observer.deliver(RegionId(1), 0.3);
    assert_eq!(store.active_section().as_deref(), Some("projects"));
    observer.deliver(RegionId(2), 0.6);
    assert_eq!(store.active_section().as_deref(), Some("skills"));

    // Still above threshold: no new edge, no write.
    observer.deliver(RegionId(1), 0.9);
    assert_eq!(store.active_section().as_deref(), Some("skills"));
    assert_eq!(projects.reports(), 1);
    assert_eq!(skills.reports(), 1);
}

#[test]
fn teardown_stops_reports() {
    let site = parse_site(FIXTURE).expect("fixture is valid");
    let store = UiStore::new();
    let observer = Rc::new(ScrollObserver::new());
    observer.attach_measured(RegionId(1));

    let tracker = SectionVisibilityTracker::mount(
        "projects",
        site.sections[0].threshold,
        Some(RegionId(1)),
        observer.clone(),
        &store,
    );
    assert_eq!(observer.subscription_count(), 1);
    tracker.unmount();
    assert_eq!(observer.subscription_count(), 0);

    observer.deliver(RegionId(1), 1.0);
    assert_eq!(store.active_section(), None);
    assert_eq!(store.writes(), 0);
}

#[test]
fn scrolling_the_laid_out_page_moves_the_nav_highlight() {
    let site = parse_site(FIXTURE).expect("fixture is valid");
    let lists: Vec<_> = site
        .sections
        .iter()
        .map(CategoryFilterList::for_section)
        .collect();
    let width = 1280.0;
    let page = PageLayout::compute(&site, &lists, width);

    let store = UiStore::new();
    let observer = Rc::new(ScrollObserver::new());
    let trackers: Vec<_> = site
        .sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let region = RegionId(i as u64);
            observer.attach(region, page.sections[i].bounds);
            SectionVisibilityTracker::mount(
                section.id.clone(),
                section.threshold,
                Some(region),
                observer.clone(),
                &store,
            )
        })
        .collect();

    observer.set_viewport(Rect::new(0.0, 0.0, width, 800.0));
    assert_eq!(store.active_section().as_deref(), Some("projects"));

    let bottom = (page.height - 800.0).max(0.0);
    observer.set_viewport(Rect::new(0.0, bottom, width, 800.0));
    assert_eq!(store.active_section().as_deref(), Some("skills"));

    let nav = render_nav(&site, store.active_section().as_deref(), width);
    let svg = render_svg(&nav, width, NAV_HEIGHT, false);
    assert!(svg.contains("Beceriler ve Uzmanlıklar"));

    drop(trackers);
    assert_eq!(observer.subscription_count(), 0);
}

#[test]
fn static_export_contains_content() {
    let site = parse_site(FIXTURE).expect("fixture is valid");
    let (layout, commands) = render_static(&site, 1024.0);
    let svg = render_svg(&commands, layout.width, layout.height, true);
    assert!(svg.contains("Projeler"));
    assert!(svg.contains("Tümü"));
    assert!(svg.contains(r#"href="https://oxyinc.xyz""#));
    assert!(svg.contains("95%"));
}
