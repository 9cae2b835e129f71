use serde::{Deserialize, Serialize};

use crate::catalog::FilterValue;
use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// Views emit a `Vec<RenderCommand>` per page region. Renderers consume the
/// list sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle. `target` marks it as interactive.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        radius: f64,
        target: Option<HitTarget>,
    },

    /// Draw a text string anchored at `position` (baseline-centered vertically).
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        weight: TextWeight,
    },

    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// An image slot. Renderers that cannot fetch `url` draw a placeholder
    /// labelled with `alt`.
    DrawImage {
        rect: Rect,
        url: SharedStr,
        alt: SharedStr,
    },

    SetClip { rect: Rect },
    ClearClip,

    /// Push an affine transform applied to all following commands until the
    /// matching `PopTransform`.
    PushTransform { translate: Point, scale: Point },
    PopTransform,

    /// Multiply the alpha of following commands until the matching `PopOpacity`.
    PushOpacity { alpha: f64 },
    PopOpacity,

    /// Begin a logical group (nav bar, a section, a card).
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextWeight {
    Regular,
    Medium,
    Bold,
}

/// What happens when the user activates an interactive rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// Select `value` in the filter of section `section`.
    FilterChip {
        section: SharedStr,
        value: FilterValue,
    },
    /// Scroll to section `section`.
    NavLink { section: SharedStr },
    /// Open an external URL (GitHub, live demo).
    ExternalLink { url: SharedStr },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_target_serializes_sentinel_as_all() {
        let target = HitTarget::FilterChip {
            section: "projects".into(),
            value: FilterValue::All,
        };
        let json = serde_json::to_string(&target).expect("serializable");
        assert_eq!(
            json,
            r#"{"FilterChip":{"section":"projects","value":"all"}}"#
        );
    }
}
