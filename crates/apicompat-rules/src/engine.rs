//! Rule driver: dispatches mapper nodes to the rule catalogue

use crate::builtin::default_rules;
use apicompat_core::{
    ApiCompatError, CompatDifference, MapperNode, PairKind, Result, Rule, RuleEngine,
    RuleMetadata, RuleSettings,
};
use std::sync::Arc;

/// Runs every applicable rule, in catalogue order, against a node
pub struct RuleDriver {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleDriver {
    /// Driver over the built-in catalogue
    pub fn new(settings: &RuleSettings) -> Self {
        Self::with_rules(default_rules(settings))
    }

    /// Driver over a caller-supplied catalogue, replacing the built-in one
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleMetadata> {
        self.rules.iter().map(|rule| rule.metadata())
    }

    fn applicable(&self, kind: PairKind) -> impl Iterator<Item = &Box<dyn Rule>> {
        self.rules.iter().filter(move |rule| rule.applies_to(kind))
    }
}

fn both_absent(node: MapperNode<'_>) -> ApiCompatError {
    ApiCompatError::invariant(format!(
        "rules were asked to evaluate {} with neither side present",
        node.describe()
    ))
}

impl RuleEngine for RuleDriver {
    fn run(&self, node: MapperNode<'_>) -> Result<Vec<CompatDifference>> {
        if node.is_empty() {
            return Err(both_absent(node));
        }
        let mut differences = Vec::new();

        match node {
            MapperNode::Assembly(mapper) => {
                let left = mapper.left().map(Arc::as_ref);
                let right = mapper.right().map(Arc::as_ref);
                for rule in self.applicable(PairKind::Assembly) {
                    rule.run_assemblies(left, right, &mut differences);
                }
            }
            MapperNode::Type(mapper) => {
                let left = mapper.left().map(Arc::as_ref);
                let right = mapper.right().map(Arc::as_ref);
                for rule in self.applicable(PairKind::Type) {
                    rule.run_types(left, right, &mut differences);
                }
            }
            MapperNode::AssemblySet(_) | MapperNode::Namespace(_) => {}
        }

        if !differences.is_empty() {
            tracing::trace!("{} produced {} differences", node.describe(), differences.len());
        }
        Ok(differences)
    }
}
