use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared_str::SharedStr;

/// The content IR shared by every frontend.
///
/// ```text
///   content JSON ─┐
///                 ├─▶ Catalog (immutable) ──▶ filter / derive ──▶ RenderCommand[] ──▶ egui / SVG / DOM
///   built-in    ──┘
/// ```
///
/// A catalog is created once and never mutated. Cloning shares the backing
/// slice, so every consumer sees the same items.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Arc<[Item]>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Item>::deserialize(deserializer).map(Catalog::new)
    }
}

/// Stable identifier of an item within its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a section: a project, a skill, or anything else that carries
/// a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(alias = "name")]
    pub title: SharedStr,
    #[serde(alias = "tags", alias = "category")]
    pub classification: Classification,
    /// Render-only fields; never read by filtering.
    #[serde(flatten)]
    pub display: DisplayMetadata,
}

impl Item {
    pub fn new(id: u32, title: impl Into<SharedStr>, classification: Classification) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            classification,
            display: DisplayMetadata::default(),
        }
    }

    pub fn with_display(mut self, display: DisplayMetadata) -> Self {
        self.display = display;
        self
    }
}

/// The attribute filters match against: one category or a set of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Classification {
    Single(SharedStr),
    Multi(Vec<SharedStr>),
}

impl Classification {
    pub fn single(value: impl Into<SharedStr>) -> Self {
        Self::Single(value.into())
    }

    pub fn tags<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SharedStr>,
    {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(v) => v == value,
            Self::Multi(vs) => vs.iter().any(|v| v == value),
        }
    }

    /// All values in declaration order (may repeat for a malformed tag list).
    pub fn values(&self) -> &[SharedStr] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Multi(vs) => vs,
        }
    }
}

/// Fields consumed only by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<SharedStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<SharedStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<SharedStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<SharedStr>,
    /// Proficiency 0–100 for skill tiles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<SharedStr>,
}

/// The current filter of a list: everything, or one classification value.
///
/// Serialized as the string `"all"` for the sentinel and the bare value
/// otherwise, matching what filter controls send.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterValue {
    #[default]
    All,
    Only(SharedStr),
}

impl FilterValue {
    pub const ALL: &'static str = "all";

    /// `"all"` maps to the sentinel; anything else is taken literally.
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value.into())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Only(v) => v,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches(&self, classification: &Classification) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => classification.contains(v),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<SharedStr> for FilterValue {
    fn from(value: SharedStr) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SharedStr::deserialize(deserializer).map(FilterValue::from)
    }
}
