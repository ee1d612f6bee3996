use super::{ElementMapper, NamespaceMapper, Side};
use crate::settings::MapperSettings;
use crate::symbols::{AssemblySymbol, SymbolKey, TypeSymbol};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Pairs one assembly across sides and maps its namespaces
#[derive(Debug, Clone)]
pub struct AssemblyMapper {
    key: SymbolKey,
    settings: MapperSettings,
    element: ElementMapper<Arc<AssemblySymbol>>,
    namespaces: IndexMap<SymbolKey, NamespaceMapper>,
}

impl AssemblyMapper {
    pub fn new(key: SymbolKey, settings: MapperSettings) -> Self {
        Self {
            key,
            settings,
            element: ElementMapper::new(),
            namespaces: IndexMap::new(),
        }
    }

    /// Register one side's assembly, including the types it forwards
    pub fn add_element(&mut self, assembly: Arc<AssemblySymbol>, side: Side) {
        if !self.element.set(side, assembly.clone()) {
            return;
        }

        for namespace in &assembly.namespaces {
            self.namespace_mut(&namespace.name).add_element(
                &namespace.name,
                namespace.types.iter().cloned(),
                side,
            );
        }

        let mut resolver = ForwardResolver::default();
        for forwarded in &assembly.forwarded_types {
            let ty = resolver.resolve(&assembly, forwarded);
            let namespace = ty.namespace.clone();
            self.namespace_mut(&namespace)
                .add_element(&namespace, [ty], side);
        }

        debug!(
            "Mapped {} assembly '{}' into {} namespaces",
            side,
            assembly.name(),
            self.namespaces.len()
        );
    }

    fn namespace_mut(&mut self, name: &str) -> &mut NamespaceMapper {
        let key = SymbolKey::for_namespace(name);
        let settings = &self.settings;
        self.namespaces
            .entry(key.clone())
            .or_insert_with(|| NamespaceMapper::new(key, settings.clone()))
    }

    pub fn key(&self) -> &SymbolKey {
        &self.key
    }

    pub fn left(&self) -> Option<&Arc<AssemblySymbol>> {
        self.element.left()
    }

    pub fn right(&self) -> Option<&Arc<AssemblySymbol>> {
        self.element.right()
    }

    /// Namespaces ordered by case-insensitive name
    pub fn namespaces(&self) -> Vec<&NamespaceMapper> {
        let mut namespaces: Vec<(&SymbolKey, &NamespaceMapper)> = self.namespaces.iter().collect();
        namespaces.sort_by(|a, b| a.0.cmp(b.0));
        namespaces.into_iter().map(|(_, mapper)| mapper).collect()
    }

    pub fn find_namespace(&self, name: &str) -> Option<&NamespaceMapper> {
        self.namespaces.get(&SymbolKey::for_namespace(name))
    }
}

/// Declared and forwarded type keys of one assembly
struct AssemblyIndex {
    types: HashMap<SymbolKey, Arc<TypeSymbol>>,
    forwards: HashSet<SymbolKey>,
}

impl AssemblyIndex {
    fn new(assembly: &AssemblySymbol) -> Self {
        let mut types = HashMap::new();
        for ty in assembly.types() {
            types.entry(ty.key()).or_insert_with(|| ty.clone());
        }
        let forwards = assembly
            .forwarded_types
            .iter()
            .map(|name| SymbolKey::for_type_name(name))
            .collect();
        Self { types, forwards }
    }
}

/// Resolves forwarded types through references
///
/// Each referenced assembly is indexed once, on first use, so resolving a
/// forward costs a hash lookup per assembly on its reference chain.
/// References may forward again; each assembly is visited at most once per
/// forward so forwarding cycles terminate. An unresolvable forward yields a
/// memberless placeholder so the type's existence is still compared.
#[derive(Default)]
struct ForwardResolver {
    indexes: HashMap<*const AssemblySymbol, AssemblyIndex>,
}

impl ForwardResolver {
    fn resolve(&mut self, assembly: &AssemblySymbol, metadata_name: &str) -> Arc<TypeSymbol> {
        let key = SymbolKey::for_type_name(metadata_name);
        let mut visited = HashSet::new();
        visited.insert(SymbolKey::for_assembly(assembly.name()));

        match self.find(assembly, &key, &mut visited) {
            Some(ty) => {
                trace!(
                    "Resolved forwarded type '{}' from '{}'",
                    metadata_name,
                    assembly.name()
                );
                ty
            }
            None => {
                warn!(
                    "Could not resolve type '{}' forwarded by '{}'",
                    metadata_name,
                    assembly.name()
                );
                Arc::new(TypeSymbol::unresolved(metadata_name))
            }
        }
    }

    fn find(
        &mut self,
        assembly: &AssemblySymbol,
        key: &SymbolKey,
        visited: &mut HashSet<SymbolKey>,
    ) -> Option<Arc<TypeSymbol>> {
        for reference in &assembly.references {
            if !visited.insert(SymbolKey::for_assembly(reference.name())) {
                continue;
            }
            let index = self
                .indexes
                .entry(Arc::as_ptr(reference))
                .or_insert_with(|| AssemblyIndex::new(reference));
            if let Some(ty) = index.types.get(key) {
                return Some(ty.clone());
            }
            if index.forwards.contains(key) {
                if let Some(ty) = self.find(reference, key, visited) {
                    return Some(ty);
                }
            }
        }
        None
    }
}
