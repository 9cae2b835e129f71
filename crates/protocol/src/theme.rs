use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    SectionBackground,
    SectionAltBackground,

    // Typography
    Heading,
    TextPrimary,
    TextSecondary,
    TextMuted,

    /// Brand accent (divider bar, active chip, links).
    Accent,

    // Navigation
    NavBackground,
    NavText,
    NavActive,
    NavBorder,

    // Filter chips
    ChipIdle,
    ChipIdleText,
    ChipActive,
    ChipActiveText,

    // Cards and tiles
    CardBackground,
    CardBorder,
    ImagePlaceholder,
    TagBackground,
    TagText,
    LevelTrack,
    LevelFill,
}
