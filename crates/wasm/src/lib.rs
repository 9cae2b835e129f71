//! `wasm-bindgen` bridge for a DOM host.
//!
//! The host measures intersections itself (e.g. with `IntersectionObserver`)
//! and forwards ratios here; trackers, filters and the active section live on
//! the Rust side. Structured results cross the boundary as JSON strings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use folio_core::content::{ContentError, builtin_site, parse_site};
use folio_core::model::{CategoryFilterList, Site, UiStore};
use folio_core::observe::{RegionId, ScrollObserver, SectionVisibilityTracker};
use folio_core::reveal::SectionFrames;
use folio_core::views::{PageLayout, render_section as render_section_view};
use folio_protocol::{FilterValue, SharedStr};
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("no content loaded")]
    NotLoaded,
    #[error("unknown section `{0}`")]
    UnknownSection(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One chip as the host renders it.
#[derive(Debug, Serialize)]
pub struct ControlEntry {
    pub value: FilterValue,
    pub label: SharedStr,
    pub selected: bool,
}

/// Loaded content plus the runtime state of every section.
pub struct Bridge {
    site: Site,
    lists: Vec<CategoryFilterList>,
    store: UiStore,
    observer: Rc<ScrollObserver>,
    trackers: HashMap<usize, SectionVisibilityTracker>,
}

impl Bridge {
    pub fn new(site: Site) -> Self {
        let lists = site
            .sections
            .iter()
            .map(CategoryFilterList::for_section)
            .collect();
        let observer = Rc::new(ScrollObserver::new());
        for i in 0..site.sections.len() {
            observer.attach_measured(RegionId(i as u64));
        }
        Self {
            site,
            lists,
            store: UiStore::new(),
            observer,
            trackers: HashMap::new(),
        }
    }

    fn index(&self, section: &str) -> Result<usize, BridgeError> {
        self.site
            .section_index(section)
            .ok_or_else(|| BridgeError::UnknownSection(section.to_owned()))
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Start tracking `section`. Mounting again replaces the old tracker and
    /// starts the filter over at `all`.
    pub fn mount(&mut self, section: &str) -> Result<bool, BridgeError> {
        let idx = self.index(section)?;
        if self.trackers.remove(&idx).is_some() {
            self.lists[idx].reset();
        }
        let spec = &self.site.sections[idx];
        let tracker = SectionVisibilityTracker::mount(
            spec.id.clone(),
            spec.threshold,
            Some(RegionId(idx as u64)),
            self.observer.clone(),
            &self.store,
        );
        let observing = tracker.is_observing();
        self.trackers.insert(idx, tracker);
        Ok(observing)
    }

    /// Stop tracking `section`; its filter goes back to `all`.
    pub fn unmount(&mut self, section: &str) -> Result<bool, BridgeError> {
        let idx = self.index(section)?;
        self.lists[idx].reset();
        Ok(self.trackers.remove(&idx).is_some())
    }

    /// Forward a host-measured visible fraction of `section`.
    pub fn report_intersection(&self, section: &str, ratio: f64) -> Result<(), BridgeError> {
        let idx = self.index(section)?;
        self.observer.deliver(RegionId(idx as u64), ratio);
        Ok(())
    }

    pub fn active_section(&self) -> Option<String> {
        self.store.active_section().map(|id| id.to_string())
    }

    pub fn set_filter(&mut self, section: &str, value: &str) -> Result<bool, BridgeError> {
        let idx = self.index(section)?;
        Ok(self.lists[idx].set_filter(FilterValue::parse(value)))
    }

    pub fn filter(&self, section: &str) -> Result<String, BridgeError> {
        let idx = self.index(section)?;
        Ok(self.lists[idx].filter().to_string())
    }

    pub fn filtered_items_json(&self, section: &str) -> Result<String, BridgeError> {
        let idx = self.index(section)?;
        Ok(serde_json::to_string(&self.lists[idx].view())?)
    }

    pub fn controls(&self, section: &str) -> Result<Vec<ControlEntry>, BridgeError> {
        let idx = self.index(section)?;
        let list = &self.lists[idx];
        let capitalize = self.site.sections[idx].capitalizes_chips();
        Ok(list
            .controls()
            .into_iter()
            .map(|value| ControlEntry {
                label: self.site.chip_label(&value, capitalize),
                selected: list.is_selected(&value),
                value,
            })
            .collect())
    }

    /// Render commands for one section at rest, laid out at `width`.
    pub fn render_section_json(&self, section: &str, width: f64) -> Result<String, BridgeError> {
        let idx = self.index(section)?;
        let layout = PageLayout::compute(&self.site, &self.lists, width);
        let section_layout = layout
            .sections
            .get(idx)
            .ok_or_else(|| BridgeError::UnknownSection(section.to_owned()))?;
        let commands = render_section_view(
            &self.site.sections[idx],
            &self.lists[idx],
            section_layout,
            &SectionFrames::REST,
        );
        Ok(serde_json::to_string(&commands)?)
    }
}

thread_local! {
    static BRIDGE: RefCell<Option<Bridge>> = const { RefCell::new(None) };
}

fn js(e: BridgeError) -> JsError {
    JsError::new(&e.to_string())
}

fn with_bridge<T>(f: impl FnOnce(&mut Bridge) -> Result<T, BridgeError>) -> Result<T, JsError> {
    BRIDGE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let bridge = slot.as_mut().ok_or(BridgeError::NotLoaded).map_err(js)?;
        f(bridge).map_err(js)
    })
}

fn install(site: Site) -> usize {
    let count = site.sections.len();
    BRIDGE.with(|cell| {
        // Old trackers unmount before the new store exists.
        cell.borrow_mut().take();
        *cell.borrow_mut() = Some(Bridge::new(site));
    });
    count
}

/// Load site content JSON. Returns the number of sections.
#[wasm_bindgen]
pub fn load_site(data: &[u8]) -> Result<usize, JsError> {
    let site = parse_site(data).map_err(|e| js(e.into()))?;
    Ok(install(site))
}

/// Load the built-in content. Returns the number of sections.
#[wasm_bindgen]
pub fn load_builtin() -> usize {
    install(builtin_site())
}

/// Section ids in page order, as a JSON array.
#[wasm_bindgen]
pub fn section_ids() -> Result<String, JsError> {
    with_bridge(|b| {
        let ids: Vec<&str> = b.site().sections.iter().map(|s| s.id.as_str()).collect();
        Ok(serde_json::to_string(&ids)?)
    })
}

/// Start tracking a section's visibility. Returns whether it is observing.
#[wasm_bindgen]
pub fn mount_section(section: &str) -> Result<bool, JsError> {
    with_bridge(|b| b.mount(section))
}

#[wasm_bindgen]
pub fn unmount_section(section: &str) -> Result<bool, JsError> {
    with_bridge(|b| b.unmount(section))
}

#[wasm_bindgen]
pub fn report_intersection(section: &str, ratio: f64) -> Result<(), JsError> {
    with_bridge(|b| b.report_intersection(section, ratio))
}

#[wasm_bindgen]
pub fn active_section() -> Option<String> {
    BRIDGE.with(|cell| cell.borrow().as_ref().and_then(Bridge::active_section))
}

/// Select a filter value; `"all"` selects everything.
#[wasm_bindgen]
pub fn set_filter(section: &str, value: &str) -> Result<bool, JsError> {
    with_bridge(|b| b.set_filter(section, value))
}

#[wasm_bindgen]
pub fn current_filter(section: &str) -> Result<String, JsError> {
    with_bridge(|b| b.filter(section))
}

/// Items of the current view as JSON.
#[wasm_bindgen]
pub fn filtered_items(section: &str) -> Result<String, JsError> {
    with_bridge(|b| b.filtered_items_json(section))
}

/// Chip row (`value`, `label`, `selected`) as JSON.
#[wasm_bindgen]
pub fn filter_controls(section: &str) -> Result<String, JsError> {
    with_bridge(|b| Ok(serde_json::to_string(&b.controls(section)?)?))
}

/// Render a section to render-command JSON.
#[wasm_bindgen]
pub fn render_section(section: &str, width: f64) -> Result<String, JsError> {
    with_bridge(|b| b.render_section_json(section, width))
}
