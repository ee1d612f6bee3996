//! Rule trait and engine seam

use crate::Result;
use crate::difference::CompatDifference;
use crate::mapper::MapperNode;
use crate::symbols::{AssemblySymbol, TypeSymbol};
use serde::Serialize;
use std::fmt;

/// Granularity a rule operates at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PairKind {
    Assembly,
    Type,
}

impl fmt::Display for PairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairKind::Assembly => f.write_str("assembly"),
            PairKind::Type => f.write_str("type"),
        }
    }
}

/// Metadata associated with a rule
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    /// Diagnostic id, e.g. `CP0001`
    pub id: &'static str,
    /// Rule name, e.g. `TypeMustExist`
    pub name: &'static str,
    /// What the rule checks
    pub description: &'static str,
    pub pair_kind: PairKind,
}

/// A stateless comparison policy
///
/// Rules receive a matched pair where at least one side is present and append
/// any differences to `differences`. They must not depend on each other.
pub trait Rule: Send + Sync {
    fn metadata(&self) -> &RuleMetadata;

    fn applies_to(&self, kind: PairKind) -> bool {
        self.metadata().pair_kind == kind
    }

    fn run_assemblies(
        &self,
        _left: Option<&AssemblySymbol>,
        _right: Option<&AssemblySymbol>,
        _differences: &mut Vec<CompatDifference>,
    ) {
    }

    fn run_types(
        &self,
        _left: Option<&TypeSymbol>,
        _right: Option<&TypeSymbol>,
        _differences: &mut Vec<CompatDifference>,
    ) {
    }
}

/// Evaluates the rule catalogue against one mapper node
pub trait RuleEngine {
    fn run(&self, node: MapperNode<'_>) -> Result<Vec<CompatDifference>>;
}
