//! Depth-first traversal of the mapper tree
//!
//! Implementors override the `visit_*` methods they care about and call the
//! matching `walk_*` function to keep descending.

use crate::Result;
use crate::mapper::{AssemblyMapper, AssemblySetMapper, MapperNode, NamespaceMapper, TypeMapper};

pub trait MapperVisitor {
    fn visit(&mut self, node: MapperNode<'_>) -> Result<()> {
        match node {
            MapperNode::AssemblySet(mapper) => self.visit_assembly_set(mapper),
            MapperNode::Assembly(mapper) => self.visit_assembly(mapper),
            MapperNode::Namespace(mapper) => self.visit_namespace(mapper),
            MapperNode::Type(mapper) => self.visit_type(mapper),
        }
    }

    fn visit_assembly_set(&mut self, mapper: &AssemblySetMapper) -> Result<()> {
        walk_assembly_set(self, mapper)
    }

    fn visit_assembly(&mut self, mapper: &AssemblyMapper) -> Result<()> {
        walk_assembly(self, mapper)
    }

    fn visit_namespace(&mut self, mapper: &NamespaceMapper) -> Result<()> {
        walk_namespace(self, mapper)
    }

    fn visit_type(&mut self, _mapper: &TypeMapper) -> Result<()> {
        Ok(())
    }
}

/// Visit each assembly in encounter order
pub fn walk_assembly_set<V: MapperVisitor + ?Sized>(
    visitor: &mut V,
    mapper: &AssemblySetMapper,
) -> Result<()> {
    for assembly in mapper.assemblies() {
        visitor.visit_assembly(assembly)?;
    }
    Ok(())
}

/// Visit each namespace in case-insensitive name order
pub fn walk_assembly<V: MapperVisitor + ?Sized>(
    visitor: &mut V,
    mapper: &AssemblyMapper,
) -> Result<()> {
    for namespace in mapper.namespaces() {
        visitor.visit_namespace(namespace)?;
    }
    Ok(())
}

/// Visit each type in encounter order
pub fn walk_namespace<V: MapperVisitor + ?Sized>(
    visitor: &mut V,
    mapper: &NamespaceMapper,
) -> Result<()> {
    for ty in mapper.types() {
        visitor.visit_type(ty)?;
    }
    Ok(())
}
