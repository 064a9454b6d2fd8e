use serde::{Deserialize, Serialize};

use crate::domain::entities::screen::ScreenInput;

/// A sales proposal: a named collection of display line items.
///
/// The proposal owns its screens exclusively; cost breakdowns are
/// recomputed from these inputs on every audit run and never stored on
/// the entity itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Project name (e.g., "Riverfront Arena Renovation")
    pub name: String,
    /// Customer or venue the proposal is addressed to
    pub customer: Option<String>,
    pub screens: Vec<ScreenInput>,
}

impl Proposal {
    pub fn new(name: impl Into<String>) -> Self {
        Proposal {
            name: name.into(),
            customer: None,
            screens: Vec::new(),
        }
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn add_screen(&mut self, screen: ScreenInput) {
        self.screens.push(screen);
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }
}
