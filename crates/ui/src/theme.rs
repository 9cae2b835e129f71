use folio_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemeMode::Dark => folio_dark_visuals(),
            ThemeMode::Light => folio_light_visuals(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Tailwind gray/blue scale
    use ThemeToken::*;
    match token {
        Background | SectionBackground => ResolvedColor::rgb(0x11, 0x18, 0x27), // gray-900
        SectionAltBackground => ResolvedColor::rgb(0x1f, 0x29, 0x37),          // gray-800

        Heading => ResolvedColor::rgb(0xff, 0xff, 0xff),
        TextPrimary => ResolvedColor::rgb(0xe5, 0xe7, 0xeb), // gray-200
        TextSecondary => ResolvedColor::rgb(0xd1, 0xd5, 0xdb), // gray-300
        TextMuted => ResolvedColor::rgb(0x9c, 0xa3, 0xaf),   // gray-400

        Accent => ResolvedColor::rgb(0x3b, 0x82, 0xf6), // blue-500

        NavBackground => ResolvedColor::rgba(0x11, 0x18, 0x27, 240),
        NavText => ResolvedColor::rgb(0xd1, 0xd5, 0xdb),
        NavActive => ResolvedColor::rgb(0x60, 0xa5, 0xfa), // blue-400
        NavBorder => ResolvedColor::rgb(0x37, 0x41, 0x51), // gray-700

        ChipIdle => ResolvedColor::rgb(0x37, 0x41, 0x51),
        ChipIdleText => ResolvedColor::rgb(0xd1, 0xd5, 0xdb),
        ChipActive => ResolvedColor::rgb(0x25, 0x63, 0xeb), // blue-600
        ChipActiveText => ResolvedColor::rgb(0xff, 0xff, 0xff),

        CardBackground => ResolvedColor::rgb(0x11, 0x18, 0x27),
        CardBorder => ResolvedColor::rgb(0x37, 0x41, 0x51),
        ImagePlaceholder => ResolvedColor::rgb(0x37, 0x41, 0x51),
        TagBackground => ResolvedColor::rgb(0x1e, 0x3a, 0x8a), // blue-900
        TagText => ResolvedColor::rgb(0xbf, 0xdb, 0xfe),       // blue-200
        LevelTrack => ResolvedColor::rgb(0x37, 0x41, 0x51),
        LevelFill => ResolvedColor::rgb(0x3b, 0x82, 0xf6),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background | SectionBackground => ResolvedColor::rgb(255, 255, 255),
        SectionAltBackground => ResolvedColor::rgb(249, 250, 251),

        Heading => ResolvedColor::rgb(17, 24, 39),
        TextPrimary => ResolvedColor::rgb(55, 65, 81),
        TextSecondary => ResolvedColor::rgb(75, 85, 99),
        TextMuted => ResolvedColor::rgb(107, 114, 128),

        Accent => ResolvedColor::rgb(37, 99, 235),

        NavBackground => ResolvedColor::rgba(255, 255, 255, 240),
        NavText => ResolvedColor::rgb(55, 65, 81),
        NavActive => ResolvedColor::rgb(37, 99, 235),
        NavBorder => ResolvedColor::rgb(229, 231, 235),

        ChipIdle => ResolvedColor::rgb(229, 231, 235),
        ChipIdleText => ResolvedColor::rgb(55, 65, 81),
        ChipActive => ResolvedColor::rgb(37, 99, 235),
        ChipActiveText => ResolvedColor::rgb(255, 255, 255),

        CardBackground => ResolvedColor::rgb(255, 255, 255),
        CardBorder => ResolvedColor::rgb(229, 231, 235),
        ImagePlaceholder => ResolvedColor::rgb(229, 231, 235),
        TagBackground => ResolvedColor::rgb(219, 234, 254),
        TagText => ResolvedColor::rgb(30, 64, 175),
        LevelTrack => ResolvedColor::rgb(229, 231, 235),
        LevelFill => ResolvedColor::rgb(37, 99, 235),
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_BODY: f32 = 14.0;
pub const FONT_CAPTION: f32 = 12.0;

// ── egui visual presets ────────────────────────────────────────────────────

pub fn folio_dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = egui::Color32::from_rgb(0x11, 0x18, 0x27);
    v.window_fill = egui::Color32::from_rgb(0x1f, 0x29, 0x37);
    v.extreme_bg_color = egui::Color32::from_rgb(0x11, 0x18, 0x27);
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x37, 0x41, 0x51);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x4b, 0x55, 0x63);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0x25, 0x63, 0xeb);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x3b, 0x82, 0xf6, 60);
    v.hyperlink_color = egui::Color32::from_rgb(0x60, 0xa5, 0xfa);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    v.widgets.active.corner_radius = egui::CornerRadius::same(6);
    v
}

pub fn folio_light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = egui::Color32::from_rgb(249, 250, 251);
    v.window_fill = egui::Color32::from_rgb(255, 255, 255);
    v.extreme_bg_color = egui::Color32::from_rgb(255, 255, 255);
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(229, 231, 235);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(209, 213, 219);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(37, 99, 235);
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(37, 99, 235, 50);
    v.hyperlink_color = egui::Color32::from_rgb(37, 99, 235);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    v.widgets.active.corner_radius = egui::CornerRadius::same(6);
    v
}

/// Apply the site's typography scale to egui widget styles.
pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(FONT_BODY),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
