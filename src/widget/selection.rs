//! Combobox model shared by the fragment picker and the query picker
//!
//! A selection holds an option list, a free value (which need not be one of
//! the options) and a filterable dropdown. It knows nothing about rendering.

use std::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// An entry that can be offered by a [`Selection`]
pub trait ComboOption {
    /// The value the selection takes when this option is picked
    fn value(&self) -> &str;
    /// Text shown in the dropdown
    fn label(&self) -> &str;
}

pub struct Selection<T> {
    options: Vec<T>,
    value: String,
    /// Match the filter against labels only, not values
    only_label_terms: bool,
    filter: String,
    filtered: Vec<usize>,
    highlighted: usize,
    open: bool,
    matcher: SkimMatcherV2,
}

impl<T: fmt::Debug> fmt::Debug for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("options", &self.options)
            .field("value", &self.value)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl<T: ComboOption> Selection<T> {
    pub fn new(only_label_terms: bool) -> Self {
        Self {
            options: Vec::new(),
            value: String::new(),
            only_label_terms,
            filter: String::new(),
            filtered: Vec::new(),
            highlighted: 0,
            open: false,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Replace the option list; the current value is kept
    pub fn set_options(&mut self, options: Vec<T>) {
        self.options = options;
        self.refilter();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value; returns `true` if it changed
    pub fn set_value(&mut self, value: &str) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value.to_string();
        true
    }

    /// The option whose value equals the current value
    pub fn selected(&self) -> Option<&T> {
        self.options.iter().find(|option| option.value() == self.value)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the dropdown with an empty filter, highlighting the current value
    pub fn open(&mut self) {
        self.open = true;
        self.filter.clear();
        self.refilter();
        self.highlighted = self
            .filtered
            .iter()
            .position(|&index| self.options[index].value() == self.value)
            .unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.filter.clear();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.refilter();
    }

    /// Options matching the filter, best match first
    pub fn visible_options(&self) -> impl Iterator<Item = &T> {
        self.filtered.iter().map(|&index| &self.options[index])
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        if !self.filtered.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.filtered.len();
        }
    }

    pub fn highlight_previous(&mut self) {
        if !self.filtered.is_empty() {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(self.filtered.len() - 1);
        }
    }

    /// Close the dropdown and take the highlighted option's value
    ///
    /// Returns the new value if it changed, which is the picker's change
    /// notification.
    pub fn confirm(&mut self) -> Option<String> {
        let picked = self
            .filtered
            .get(self.highlighted)
            .map(|&index| self.options[index].value().to_string());
        self.close();
        let value = picked?;
        self.set_value(&value).then_some(value)
    }

    fn refilter(&mut self) {
        self.highlighted = 0;
        let terms: Vec<&str> = self.filter.split_whitespace().collect();
        if terms.is_empty() {
            self.filtered = (0..self.options.len()).collect();
            return;
        }

        let mut scored: Vec<(usize, i64)> = self
            .options
            .iter()
            .enumerate()
            .filter_map(|(index, option)| {
                let mut total = 0;
                for term in &terms {
                    let label_score = self.matcher.fuzzy_match(option.label(), term);
                    let score = if self.only_label_terms {
                        label_score
                    } else {
                        label_score.max(self.matcher.fuzzy_match(option.value(), term))
                    };
                    total += score?;
                }
                Some((index, total))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.filtered = scored.into_iter().map(|(index, _)| index).collect();
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
