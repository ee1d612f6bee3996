use super::{ElementMapper, Side, TypeMapper};
use crate::settings::MapperSettings;
use crate::symbols::{SymbolKey, TypeSymbol};
use indexmap::IndexMap;
use std::sync::Arc;

/// Pairs one namespace across sides and maps its types
#[derive(Debug, Clone)]
pub struct NamespaceMapper {
    key: SymbolKey,
    settings: MapperSettings,
    element: ElementMapper<String>,
    types: IndexMap<SymbolKey, TypeMapper>,
}

impl NamespaceMapper {
    pub fn new(key: SymbolKey, settings: MapperSettings) -> Self {
        Self {
            key,
            settings,
            element: ElementMapper::new(),
            types: IndexMap::new(),
        }
    }

    /// Register one side's types declared in (or forwarded into) this namespace
    ///
    /// Types below the visibility threshold are dropped before matching.
    pub fn add_element<I>(&mut self, name: &str, types: I, side: Side)
    where
        I: IntoIterator<Item = Arc<TypeSymbol>>,
    {
        if !self.element.is_set(side) {
            self.element.set(side, name.to_string());
        }

        for ty in types {
            if !self.settings.filter.include(ty.accessibility) {
                tracing::trace!("Skipping {} type {}", side, ty.doc_id());
                continue;
            }
            let key = ty.key();
            self.types
                .entry(key.clone())
                .or_insert_with(|| TypeMapper::new(key))
                .add_element(ty, side);
        }
    }

    pub fn key(&self) -> &SymbolKey {
        &self.key
    }

    pub fn left(&self) -> Option<&String> {
        self.element.left()
    }

    pub fn right(&self) -> Option<&String> {
        self.element.right()
    }

    /// Types in encounter order
    pub fn types(&self) -> impl Iterator<Item = &TypeMapper> {
        self.types.values()
    }

    pub fn find_type(&self, key: &SymbolKey) -> Option<&TypeMapper> {
        self.types.get(key)
    }
}
