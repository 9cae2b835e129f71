use std::collections::HashSet;

use folio_protocol::{Catalog, FilterValue, Item, SharedStr};

use super::section::{FilterControls, SectionSpec};

/// Items matching `filter`, in catalog order.
///
/// `FilterValue::All` returns every item. Otherwise an item is kept when its
/// classification contains the value; a value no item carries yields an
/// empty view.
pub fn derive<'a>(items: &'a [Item], filter: &FilterValue) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| filter.matches(&item.classification))
        .collect()
}

/// Distinct classification values across `items`, in first-seen order.
pub fn available_classifications(items: &[Item]) -> Vec<SharedStr> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for value in items.iter().flat_map(|item| item.classification.values()) {
        if seen.insert(value.as_str()) {
            out.push(value.clone());
        }
    }
    out
}

/// A static catalog plus the one mutable filter selection over it.
///
/// The filter starts at `All` and changes only through [`set_filter`]; it is
/// never persisted. `revision` advances on every actual change so renderers
/// can re-derive synchronously without diffing the view.
///
/// [`set_filter`]: CategoryFilterList::set_filter
#[derive(Debug, Clone)]
pub struct CategoryFilterList {
    catalog: Catalog,
    controls: FilterControls,
    filter: FilterValue,
    revision: u64,
}

impl CategoryFilterList {
    pub fn new(catalog: Catalog, controls: FilterControls) -> Self {
        Self {
            catalog,
            controls,
            filter: FilterValue::All,
            revision: 0,
        }
    }

    /// A fresh list (filter at `All`) over a section's items and chips.
    pub fn for_section(section: &SectionSpec) -> Self {
        Self::new(section.items.clone(), section.controls.clone())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterValue {
        &self.filter
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Select a filter value. Unknown values are accepted.
    ///
    /// Returns `true` when the selection changed.
    pub fn set_filter(&mut self, value: impl Into<FilterValue>) -> bool {
        let value = value.into();
        if value == self.filter {
            return false;
        }
        tracing::trace!(from = %self.filter, to = %value, "filter changed");
        self.filter = value;
        self.revision += 1;
        true
    }

    /// Back to `All`, as on a fresh mount.
    pub fn reset(&mut self) -> bool {
        self.set_filter(FilterValue::All)
    }

    /// The filtered view for the current selection.
    pub fn view(&self) -> Vec<&Item> {
        derive(self.catalog.items(), &self.filter)
    }

    /// The chip row: `All` first, then either the catalog's classifications or
    /// the configured fixed list.
    pub fn controls(&self) -> Vec<FilterValue> {
        let values = match &self.controls {
            FilterControls::Derived => available_classifications(self.catalog.items()),
            FilterControls::Fixed(values) => values.clone(),
        };
        std::iter::once(FilterValue::All)
            .chain(
                values
                    .into_iter()
                    .map(FilterValue::from)
                    .filter(|value| !value.is_all()),
            )
            .collect()
    }

    pub fn is_selected(&self, value: &FilterValue) -> bool {
        &self.filter == value
    }
}
