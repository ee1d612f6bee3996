use super::{AssemblyMapper, ElementMapper, Side};
use crate::settings::MapperSettings;
use crate::symbols::{AssemblySymbol, SymbolKey};
use indexmap::IndexMap;
use std::sync::Arc;

/// Root of the mapper tree: the ordered assemblies of each side
#[derive(Debug, Clone, Default)]
pub struct AssemblySetMapper {
    settings: MapperSettings,
    element: ElementMapper<Vec<Arc<AssemblySymbol>>>,
    assemblies: IndexMap<SymbolKey, AssemblyMapper>,
}

impl AssemblySetMapper {
    pub fn new(settings: MapperSettings) -> Self {
        Self {
            settings,
            element: ElementMapper::new(),
            assemblies: IndexMap::new(),
        }
    }

    /// Register one side's assemblies; a second call for the same side is ignored
    pub fn add_element<I>(&mut self, assemblies: I, side: Side)
    where
        I: IntoIterator<Item = Arc<AssemblySymbol>>,
    {
        let assemblies: Vec<Arc<AssemblySymbol>> = assemblies.into_iter().collect();
        if !self.element.set(side, assemblies.clone()) {
            tracing::warn!("The {} side of the assembly set was already registered", side);
            return;
        }

        for assembly in assemblies {
            let key = SymbolKey::for_assembly(assembly.name());
            let settings = &self.settings;
            self.assemblies
                .entry(key.clone())
                .or_insert_with(|| AssemblyMapper::new(key, settings.clone()))
                .add_element(assembly, side);
        }

        tracing::debug!(
            "Assembly set has {} assemblies after adding the {} side",
            self.assemblies.len(),
            side
        );
    }

    pub fn left(&self) -> Option<&Vec<Arc<AssemblySymbol>>> {
        self.element.left()
    }

    pub fn right(&self) -> Option<&Vec<Arc<AssemblySymbol>>> {
        self.element.right()
    }

    /// Assemblies in encounter order: left first, right-only appended
    pub fn assemblies(&self) -> impl Iterator<Item = &AssemblyMapper> {
        self.assemblies.values()
    }

    pub fn find_assembly(&self, name: &str) -> Option<&AssemblyMapper> {
        self.assemblies.get(&SymbolKey::for_assembly(name))
    }

    pub fn len(&self) -> usize {
        self.assemblies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }
}
