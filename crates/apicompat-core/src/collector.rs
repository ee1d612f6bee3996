//! Collects differences while walking the mapper tree

use crate::Result;
use crate::difference::CompatDifference;
use crate::mapper::{AssemblyMapper, MapperNode, TypeMapper};
use crate::rules::RuleEngine;
use crate::suppression::DifferenceBag;
use crate::visitor::{MapperVisitor, walk_assembly};

/// Runs the engine at each assembly and type node, in traversal order
///
/// Assembly rules fire before the assembly's namespaces are descended.
/// Everything the engine reports passes through the [`DifferenceBag`].
pub struct DifferenceVisitor<'e> {
    engine: &'e dyn RuleEngine,
    bag: DifferenceBag,
}

impl<'e> DifferenceVisitor<'e> {
    pub fn new(engine: &'e dyn RuleEngine, bag: DifferenceBag) -> Self {
        Self { engine, bag }
    }

    pub fn bag(&self) -> &DifferenceBag {
        &self.bag
    }

    pub fn into_bag(self) -> DifferenceBag {
        self.bag
    }

    pub fn into_differences(self) -> Vec<CompatDifference> {
        self.bag.into_differences()
    }
}

impl MapperVisitor for DifferenceVisitor<'_> {
    fn visit_assembly(&mut self, mapper: &AssemblyMapper) -> Result<()> {
        let differences = self.engine.run(MapperNode::Assembly(mapper))?;
        self.bag.add_range(differences);
        walk_assembly(self, mapper)
    }

    fn visit_type(&mut self, mapper: &TypeMapper) -> Result<()> {
        let differences = self.engine.run(MapperNode::Type(mapper))?;
        self.bag.add_range(differences);
        Ok(())
    }
}
