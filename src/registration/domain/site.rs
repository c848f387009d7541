//! Site context rendered into notification templates.

use serde::{Deserialize, Serialize};

/// Display name and domain of the site a registration belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    name: String,
    domain: String,
}

impl Site {
    /// Creates a site context.
    #[must_use]
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }

    /// Returns the human-readable site name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the site domain used to build activation links.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }
}
