use std::rc::Rc;
use std::sync::{Arc, Mutex};

use eframe::egui;
use folio_core::content::{builtin_site, parse_site};
use folio_core::model::{CategoryFilterList, Site, UiStore};
use folio_core::observe::{IntersectionSource, RegionId, ScrollObserver, SectionVisibilityTracker};
use folio_core::reveal::{RevealLatch, SectionTransitions};
use folio_core::views::{PageLayout, render_nav, render_section};
use folio_protocol::{HitTarget, Rect as PageRect, ThemeToken};

use crate::renderer::{self, RenderResult};
use crate::theme::{self, ThemeMode};

const INITIAL_WIDTH: f64 = 1024.0;
const LINE_SCROLL: f32 = 60.0;

/// Per-section runtime state. Dropping it unmounts the tracker.
struct SectionState {
    list: CategoryFilterList,
    tracker: SectionVisibilityTracker,
    latch: RevealLatch,
    transitions: SectionTransitions,
    region: RegionId,
}

/// Layout is recomputed when the width or any filter changes.
#[derive(Debug, Clone, PartialEq)]
struct LayoutKey {
    width: u32,
    revisions: Vec<u64>,
}

/// Main application state.
pub struct PortfolioApp {
    site: Site,
    sections: Vec<SectionState>,
    store: UiStore,
    observer: Rc<ScrollObserver>,
    layout: Option<PageLayout>,
    layout_key: Option<LayoutKey>,
    /// Page scroll offset in pixels.
    scroll_y: f32,
    /// Smooth-scroll destination set by nav links.
    scroll_target: Option<f32>,
    theme_mode: ThemeMode,
    error: Option<String>,
    /// Content JSON fetched asynchronously.
    pending_data: Arc<Mutex<Option<Vec<u8>>>>,
}

impl PortfolioApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme_mode = ThemeMode::Light;
        cc.egui_ctx.set_visuals(theme_mode.visuals());
        theme::apply_typography(&cc.egui_ctx);

        let pending_data: Arc<Mutex<Option<Vec<u8>>>> = Arc::new(Mutex::new(None));

        // On WASM, `#content=<url>` loads site content from that URL.
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(w) = web_sys::window() {
                let hash = w.location().hash().unwrap_or_default();
                if let Some(url) = hash.strip_prefix("#content=") {
                    let url = url.to_owned();
                    let pd = pending_data.clone();
                    let ctx = cc.egui_ctx.clone();
                    web_sys::console::log_1(&format!("folio: loading {url}...").into());
                    wasm_bindgen_futures::spawn_local(async move {
                        match Self::fetch_bytes(&url).await {
                            Ok(resp) => {
                                if let Ok(mut lock) = pd.lock() {
                                    *lock = Some(resp);
                                }
                                ctx.request_repaint();
                            }
                            Err(e) => {
                                web_sys::console::error_1(
                                    &format!("folio: fetch error: {e}").into(),
                                );
                            }
                        }
                    });
                }
            }
        }

        let mut app = Self {
            site: builtin_site(),
            sections: Vec::new(),
            store: UiStore::new(),
            observer: Rc::new(ScrollObserver::new()),
            layout: None,
            layout_key: None,
            scroll_y: 0.0,
            scroll_target: None,
            theme_mode,
            error: None,
            pending_data,
        };
        app.mount_sections();
        app
    }

    fn load_content(&mut self, data: &[u8]) {
        match parse_site(data) {
            Ok(site) => {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::log_1(
                    &format!("folio: loaded {} sections", site.sections.len()).into(),
                );
                self.site = site;
                self.error = None;
                self.mount_sections();
            }
            Err(e) => {
                self.error = Some(format!("Failed to load content: {e}"));
            }
        }
    }

    /// Tear down every tracker and mount fresh ones for `self.site`.
    fn mount_sections(&mut self) {
        for state in self.sections.drain(..) {
            state.tracker.unmount();
            self.observer.detach(state.region);
        }
        self.store = UiStore::new();
        self.scroll_y = 0.0;
        self.scroll_target = None;

        let width = self.layout.as_ref().map_or(INITIAL_WIDTH, |l| l.width);
        let lists: Vec<CategoryFilterList> = self
            .site
            .sections
            .iter()
            .map(CategoryFilterList::for_section)
            .collect();
        let layout = PageLayout::compute(&self.site, &lists, width);

        let source: Rc<dyn IntersectionSource> = self.observer.clone();
        let sections: Vec<SectionState> = self
            .site
            .sections
            .iter()
            .zip(lists)
            .enumerate()
            .map(|(i, (spec, list))| {
                let region = RegionId(i as u64);
                if let Some(bounds) = layout.section_bounds(i) {
                    self.observer.attach(region, bounds);
                }
                let tracker = SectionVisibilityTracker::mount(
                    spec.id.clone(),
                    spec.threshold,
                    Some(region),
                    Rc::clone(&source),
                    &self.store,
                );
                SectionState {
                    list,
                    tracker,
                    latch: RevealLatch::default(),
                    transitions: SectionTransitions::for_style(spec.style),
                    region,
                }
            })
            .collect();
        self.sections = sections;
        self.layout = Some(layout);
        self.layout_key = None;
    }

    fn ensure_layout(&mut self, width: f32) {
        let key = LayoutKey {
            width: width.round() as u32,
            revisions: self.sections.iter().map(|s| s.list.revision()).collect(),
        };
        if self.layout_key.as_ref() == Some(&key) {
            return;
        }
        let lists: Vec<CategoryFilterList> = self.sections.iter().map(|s| s.list.clone()).collect();
        let layout = PageLayout::compute(&self.site, &lists, f64::from(key.width));
        for (state, section) in self.sections.iter().zip(&layout.sections) {
            self.observer.attach(state.region, section.bounds);
        }
        self.layout = Some(layout);
        self.layout_key = Some(key);
    }

    fn max_scroll(&self, view_height: f32) -> f32 {
        self.layout
            .as_ref()
            .map_or(0.0, |l| (l.height as f32 - view_height).max(0.0))
    }

    fn activate(&mut self, ctx: &egui::Context, target: HitTarget) {
        match target {
            HitTarget::FilterChip { section, value } => {
                if let Some(idx) = self.site.section_index(&section)
                    && let Some(state) = self.sections.get_mut(idx)
                {
                    state.list.set_filter(value);
                }
            }
            HitTarget::NavLink { section } => {
                let target = self
                    .site
                    .section_index(&section)
                    .and_then(|idx| self.layout.as_ref()?.scroll_target(idx));
                self.scroll_target = target.map(|y| y as f32);
            }
            HitTarget::ExternalLink { url } => {
                ctx.open_url(egui::OpenUrl::new_tab(url.as_str()));
            }
        }
    }

    fn handle_input(&mut self, ui: &egui::Ui, view_height: f32) {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.1 {
            self.scroll_y -= scroll;
            self.scroll_target = None;
        }
        ui.input(|i| {
            if i.key_pressed(egui::Key::ArrowDown) {
                self.scroll_y += LINE_SCROLL;
            }
            if i.key_pressed(egui::Key::ArrowUp) {
                self.scroll_y -= LINE_SCROLL;
            }
            if i.key_pressed(egui::Key::PageDown) || i.key_pressed(egui::Key::Space) {
                self.scroll_y += view_height * 0.9;
            }
            if i.key_pressed(egui::Key::PageUp) {
                self.scroll_y -= view_height * 0.9;
            }
            if i.key_pressed(egui::Key::Home) {
                self.scroll_target = Some(0.0);
            }
            if i.key_pressed(egui::Key::End) {
                self.scroll_target = Some(f32::MAX);
            }
        });

        let max = self.max_scroll(view_height);
        if let Some(target) = self.scroll_target {
            let target = target.clamp(0.0, max);
            let step = (target - self.scroll_y) * 0.25;
            if step.abs() < 0.5 {
                self.scroll_y = target;
                self.scroll_target = None;
            } else {
                self.scroll_y += step;
            }
        }
        self.scroll_y = self.scroll_y.clamp(0.0, max);
    }

    /// Feed the visible page rect to the observer and latch reveals.
    fn observe_viewport(&mut self, width: f32, view_height: f32, now: f64) {
        self.observer.set_viewport(PageRect::new(
            0.0,
            f64::from(self.scroll_y),
            f64::from(width),
            f64::from(view_height),
        ));
        for state in &mut self.sections {
            let visible = self.observer.ratio(state.region).is_some_and(|r| r > 0.0);
            state.latch.observe(visible, now);
        }
    }

    fn paint(&self, painter: &mut egui::Painter, area: egui::Rect, now: f64) -> RenderResult {
        let mut result = RenderResult::default();
        let Some(layout) = &self.layout else {
            return result;
        };
        painter.rect_filled(
            area,
            egui::CornerRadius::ZERO,
            theme::resolve(ThemeToken::Background, self.theme_mode),
        );

        let page_origin = egui::pos2(area.left(), area.top() - self.scroll_y);
        let visible = PageRect::new(
            0.0,
            f64::from(self.scroll_y),
            f64::from(area.width()),
            f64::from(area.height()),
        );
        for ((spec, state), section_layout) in self
            .site
            .sections
            .iter()
            .zip(&self.sections)
            .zip(&layout.sections)
        {
            if section_layout.bounds.intersect(&visible).is_none() {
                continue;
            }
            let frames = state.transitions.frames(&state.latch, now);
            let commands = render_section(spec, &state.list, section_layout, &frames);
            result.extend(renderer::render_commands(
                painter,
                &commands,
                page_origin,
                self.theme_mode,
            ));
        }

        let active = self.store.active_section();
        let nav = render_nav(&self.site, active.as_deref(), f64::from(area.width()));
        result.extend(renderer::render_commands(
            painter,
            &nav,
            area.left_top(),
            self.theme_mode,
        ));
        result
    }

    fn is_animating(&self, now: f64) -> bool {
        self.scroll_target.is_some()
            || self
                .sections
                .iter()
                .any(|s| s.latch.is_animating(&s.transitions.all(), now))
    }

    #[cfg(target_arch = "wasm32")]
    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let window = web_sys::window().ok_or("no window")?;
        let resp_value = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| format!("{e:?}"))?;
        let resp: web_sys::Response = resp_value.dyn_into().map_err(|_| "not a Response")?;
        if !resp.ok() {
            return Err(format!("HTTP {}", resp.status()));
        }
        let buf = JsFuture::from(resp.array_buffer().map_err(|e| format!("{e:?}"))?)
            .await
            .map_err(|e| format!("{e:?}"))?;
        Ok(js_sys::Uint8Array::new(&buf).to_vec())
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let pending = {
            let mut lock = self.pending_data.lock().unwrap_or_else(|e| e.into_inner());
            lock.take()
        };
        if let Some(data) = pending {
            self.load_content(&data);
        }

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                } else {
                    let active = self.store.active_section();
                    let filters: Vec<String> = self
                        .site
                        .sections
                        .iter()
                        .zip(&self.sections)
                        .map(|(spec, state)| format!("{}: {}", spec.id, state.list.filter()))
                        .collect();
                    ui.label(format!(
                        "Active: {} | {}",
                        active.as_deref().unwrap_or("-"),
                        filters.join(" | "),
                    ));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.theme_mode {
                        ThemeMode::Dark => "Light",
                        ThemeMode::Light => "Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        self.theme_mode = self.theme_mode.toggled();
                        ctx.set_visuals(self.theme_mode.visuals());
                    }
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let area = ui.available_rect_before_wrap();
                let now = ui.input(|i| i.time);
                self.ensure_layout(area.width());
                let response = ui.allocate_rect(area, egui::Sense::click());
                self.handle_input(ui, area.height());
                self.observe_viewport(area.width(), area.height(), now);

                let mut painter = ui.painter_at(area);
                let result = self.paint(&mut painter, area, now);

                if let Some(pos) = response.hover_pos()
                    && result.target_at(pos).is_some()
                {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if response.clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                    && let Some(target) = result.target_at(pos).cloned()
                {
                    tracing::debug!(?target, "activated");
                    self.activate(ctx, target);
                }

                if self.is_animating(now) {
                    ctx.request_repaint();
                }
            });

        // Dropped content file replaces the site.
        let dropped: Option<Vec<u8>> = ctx.input(|i| {
            i.raw
                .dropped_files
                .first()
                .and_then(|file| file.bytes.as_ref())
                .map(|bytes| bytes.to_vec())
        });
        if let Some(data) = dropped {
            self.load_content(&data);
        }
    }
}
