use folio_protocol::{FilterValue, SharedStr};
use serde::{Deserialize, Serialize};

use super::section::SectionSpec;

fn default_all_label() -> SharedStr {
    SharedStr::from("All")
}

/// The whole page: owner title, chip label for the sentinel, and sections in
/// display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub title: SharedStr,
    #[serde(default = "default_all_label")]
    pub all_label: SharedStr,
    pub sections: Vec<SectionSpec>,
}

impl Site {
    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Label shown on a filter chip.
    ///
    /// The sentinel uses `all_label`. Lowercase values from a fixed chip list
    /// are capitalized (`frontend` becomes `Frontend`); derived tags are shown
    /// as written.
    pub fn chip_label(&self, value: &FilterValue, capitalize: bool) -> SharedStr {
        match value {
            FilterValue::All => self.all_label.clone(),
            FilterValue::Only(v) if capitalize => capitalize_first(v).into(),
            FilterValue::Only(v) => v.clone(),
        }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
