//! Camera focus and info-panel selection, held as body ids only.

use crate::BodyId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    focused: Option<BodyId>,
    selected: Option<BodyId>,
}

impl Focus {
    pub fn focused(&self) -> Option<BodyId> {
        self.focused
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn select(&mut self, id: BodyId) {
        self.focused = Some(id);
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Clear focus and selection together if either refers to `id`.
    pub fn release(&mut self, id: BodyId) -> bool {
        if self.focused == Some(id) || self.selected == Some(id) {
            self.clear();
            true
        } else {
            false
        }
    }
}
