use folio_protocol::{Catalog, SharedStr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a page section (`"projects"`, `"skills"`, ...).
pub type SectionId = SharedStr;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("intersection threshold must be in (0, 1], got {0}")]
pub struct InvalidThreshold(pub f64);

/// Fraction of a section that must be on screen before it counts as active.
///
/// Always in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self, InvalidThreshold> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(InvalidThreshold(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Whether `ratio` is at or above the threshold.
    pub fn is_met_by(self, ratio: f64) -> bool {
        ratio >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.2)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = InvalidThreshold;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(value: Threshold) -> Self {
        value.0
    }
}

/// How a section's items are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    /// Image card with title, description, tags and links.
    #[default]
    Project,
    /// Compact tile with icon, name and a level bar.
    Skill,
}

/// Where a section's filter chips come from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterControls {
    /// Every distinct classification value in the catalog, first-seen order.
    #[default]
    Derived,
    /// A fixed chip list, independent of which values the data uses.
    Fixed(Vec<SharedStr>),
}

/// One filterable, visibility-tracked page section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: SectionId,
    pub heading: SharedStr,
    #[serde(default)]
    pub blurb: SharedStr,
    #[serde(default)]
    pub threshold: Threshold,
    #[serde(default)]
    pub style: CardStyle,
    #[serde(default)]
    pub controls: FilterControls,
    #[serde(default)]
    pub items: Catalog,
}

impl SectionSpec {
    pub fn new(id: impl Into<SectionId>, heading: impl Into<SharedStr>, items: Catalog) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            blurb: SharedStr::default(),
            threshold: Threshold::default(),
            style: CardStyle::default(),
            controls: FilterControls::default(),
            items,
        }
    }

    pub fn with_blurb(mut self, blurb: impl Into<SharedStr>) -> Self {
        self.blurb = blurb.into();
        self
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_style(mut self, style: CardStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_controls(mut self, controls: FilterControls) -> Self {
        self.controls = controls;
        self
    }

    /// Fixed chip values are lowercase keys shown capitalized; derived tags
    /// are shown verbatim.
    pub fn capitalizes_chips(&self) -> bool {
        matches!(self.controls, FilterControls::Fixed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_bounds() {
        assert!(Threshold::new(0.0).is_err());
        assert!(Threshold::new(-0.1).is_err());
        assert!(Threshold::new(1.5).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
        assert!(Threshold::new(1.0).is_ok());
        assert!(Threshold::new(0.2).is_ok_and(|t| t.is_met_by(0.2) && !t.is_met_by(0.19)));
    }

    #[test]
    fn threshold_rejected_when_deserializing() {
        let bad = serde_json::from_str::<Threshold>("0");
        assert!(bad.is_err());
        let good = serde_json::from_str::<Threshold>("0.5").expect("valid threshold");
        assert_eq!(good.get(), 0.5);
    }

    #[test]
    fn controls_json_forms() {
        let derived: FilterControls =
            serde_json::from_str(r#""derived""#).expect("derived controls");
        assert_eq!(derived, FilterControls::Derived);
        let fixed: FilterControls =
            serde_json::from_str(r#"{"fixed": ["frontend", "backend"]}"#)
                .expect("fixed controls");
        assert_eq!(
            fixed,
            FilterControls::Fixed(vec!["frontend".into(), "backend".into()])
        );
    }
}
