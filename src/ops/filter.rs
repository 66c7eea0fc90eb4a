use crate::model::filter::Filter;

/// Holds the process-wide filter selection. Not persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterController {
    current: Filter,
}

impl FilterController {
    pub fn new(initial: Filter) -> Self {
        FilterController { current: initial }
    }

    pub fn current(&self) -> Filter {
        self.current
    }

    /// Select `filter`. Returns false when it was already selected.
    pub fn set_filter(&mut self, filter: Filter) -> bool {
        if self.current == filter {
            return false;
        }
        log::debug!("event=filter_set from={} to={}", self.current, filter);
        self.current = filter;
        true
    }
}
