//! Name-to-report lookup.
//!
//! Registrations happen on a [`ReportRegistryBuilder`]; [`build`] freezes
//! them into a [`ReportRegistry`] that is passed to whoever dispatches.
//!
//! [`build`]: ReportRegistryBuilder::build

use tracing::debug;

use crate::error::{ReportError, Result};
use crate::reports::{Report, StudentPerformanceReport};

/// Creates a fresh report instance.
pub type ReportConstructor = fn() -> Box<dyn Report>;

#[derive(Default)]
pub struct ReportRegistryBuilder {
    entries: Vec<(String, ReportConstructor)>,
}

impl ReportRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`. Registering the same name again replaces the
    /// constructor but keeps the name's original position.
    pub fn register(mut self, name: impl Into<String>, constructor: ReportConstructor) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = constructor,
            None => self.entries.push((name, constructor)),
        }
        self
    }

    pub fn build(self) -> ReportRegistry {
        ReportRegistry {
            entries: self.entries,
        }
    }
}

/// Immutable set of known reports, in registration order.
pub struct ReportRegistry {
    entries: Vec<(String, ReportConstructor)>,
}

impl ReportRegistry {
    pub fn builder() -> ReportRegistryBuilder {
        ReportRegistryBuilder::new()
    }

    /// Registry holding every report this crate ships.
    pub fn with_builtin_reports() -> Self {
        Self::builder()
            .register(StudentPerformanceReport::NAME, || {
                Box::new(StudentPerformanceReport::new())
            })
            .build()
    }

    /// Returns a new instance of the report registered as `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Report>> {
        let Some((_, constructor)) = self.entries.iter().find(|(n, _)| n == name) else {
            return Err(ReportError::UnknownReport {
                name: name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            });
        };
        debug!(report = name, "Report resolved");
        Ok(constructor())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }
}
