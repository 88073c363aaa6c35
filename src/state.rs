//! Page-scoped session state
//!
//! Holds the current bundle and the user's driver selections. A failed load
//! never disturbs what is already shown.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::bundle::SessionBundle;
use crate::{PaddockError, Result};

/// Current bundle plus driver selections
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    bundle: Option<Arc<SessionBundle>>,
    selected_driver: Option<String>,
    comparison: Option<(String, String)>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the outcome of a load.
    ///
    /// On success the bundle replaces the current one and selections are
    /// cleared. On failure nothing changes and the error is handed back.
    pub fn apply(&mut self, result: Result<SessionBundle>) -> Result<Arc<SessionBundle>> {
        match result {
            Ok(bundle) => {
                debug!(request = %bundle.request(), "Replacing session bundle");
                let bundle = Arc::new(bundle);
                self.bundle = Some(Arc::clone(&bundle));
                self.selected_driver = None;
                self.comparison = None;
                Ok(bundle)
            }
            Err(e) => {
                warn!(error = %e, "Load failed, keeping current session");
                Err(e)
            }
        }
    }

    pub fn bundle(&self) -> Option<&Arc<SessionBundle>> {
        self.bundle.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.is_some()
    }

    /// Select a driver by abbreviation; it must be on the current roster.
    pub fn select_driver(&mut self, abbreviation: &str) -> Result<()> {
        self.require_driver(abbreviation)?;
        self.selected_driver = Some(abbreviation.to_string());
        Ok(())
    }

    pub fn selected_driver(&self) -> Option<&str> {
        self.selected_driver.as_deref()
    }

    /// Pick two different drivers to compare.
    pub fn select_comparison(&mut self, first: &str, second: &str) -> Result<()> {
        self.require_driver(first)?;
        self.require_driver(second)?;
        if first == second {
            return Err(PaddockError::SameDriverComparison { abbreviation: first.to_string() });
        }
        self.comparison = Some((first.to_string(), second.to_string()));
        Ok(())
    }

    pub fn comparison(&self) -> Option<(&str, &str)> {
        self.comparison.as_ref().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    fn require_driver(&self, abbreviation: &str) -> Result<()> {
        let bundle = self.bundle.as_ref().ok_or_else(|| PaddockError::not_loaded("session"))?;
        if bundle.driver_by_abbreviation(abbreviation).is_none() {
            return Err(PaddockError::DriverNotFound { number: abbreviation.to_string() });
        }
        Ok(())
    }
}
