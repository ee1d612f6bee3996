//! Settings shared by the mapper and the rules

use crate::symbols::Accessibility;
use std::fmt;
use std::sync::Arc;

/// Decides which symbols take part in a comparison
pub trait SymbolFilter: Send + Sync + fmt::Debug {
    fn include(&self, accessibility: Accessibility) -> bool;
}

/// Visibility threshold: public surface, optionally widened to internals
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessibilityFilter {
    pub include_internal_symbols: bool,
}

impl AccessibilityFilter {
    pub fn new(include_internal_symbols: bool) -> Self {
        Self {
            include_internal_symbols,
        }
    }
}

impl SymbolFilter for AccessibilityFilter {
    fn include(&self, accessibility: Accessibility) -> bool {
        match accessibility {
            Accessibility::Public | Accessibility::Protected | Accessibility::ProtectedOrInternal => {
                true
            }
            Accessibility::Internal | Accessibility::ProtectedAndInternal => {
                self.include_internal_symbols
            }
            Accessibility::Private => false,
        }
    }
}

/// Settings consumed while building the mapper tree
#[derive(Debug, Clone)]
pub struct MapperSettings {
    pub filter: Arc<dyn SymbolFilter>,
}

impl MapperSettings {
    pub fn new(include_internal_symbols: bool) -> Self {
        Self {
            filter: Arc::new(AccessibilityFilter::new(include_internal_symbols)),
        }
    }
}

impl Default for MapperSettings {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Settings consumed by the rule catalogue
#[derive(Debug, Clone)]
pub struct RuleSettings {
    pub filter: Arc<dyn SymbolFilter>,
    /// Also report API present only on the right
    pub strict_mode: bool,
    /// Compare assembly identities (version, culture, public key token)
    pub validate_assembly_identity: bool,
}

impl RuleSettings {
    pub fn new(include_internal_symbols: bool) -> Self {
        Self {
            filter: Arc::new(AccessibilityFilter::new(include_internal_symbols)),
            strict_mode: false,
            validate_assembly_identity: false,
        }
    }

    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    pub fn with_identity_validation(mut self, validate: bool) -> Self {
        self.validate_assembly_identity = validate;
        self
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self::new(false)
    }
}
