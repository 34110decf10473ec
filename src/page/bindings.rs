//! Element binding: resolve ids to handles once, when a controller is built.

use crate::error::{Error, Result};
use crate::page::{ElementId, Page};

pub struct Binder<'a> {
    page: &'a Page,
}

impl<'a> Binder<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    /// Handle for an element the controller cannot work without.
    pub fn require(&self, id: &str) -> Result<ElementId> {
        self.page.find(id).ok_or_else(|| Error::MissingElement {
            page: self.page.name().to_string(),
            id: id.to_string(),
        })
    }

    /// Handle for an element that switches on an optional capability.
    pub fn optional(&self, id: &str) -> Option<ElementId> {
        self.page.find(id)
    }

    /// Handles for a group of elements that only make sense together.
    pub fn all<const N: usize>(&self, ids: [&str; N]) -> Option<[ElementId; N]> {
        let mut out = [ElementId(0); N];
        for (slot, id) in out.iter_mut().zip(ids) {
            *slot = self.page.find(id)?;
        }
        Some(out)
    }
}
