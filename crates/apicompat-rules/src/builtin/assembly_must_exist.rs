//! Assemblies of the contract must have an implementation

use apicompat_core::{
    AssemblySymbol, CompatDifference, DifferenceType, PairKind, Rule, RuleMetadata, diagnostic_ids,
};

static METADATA: RuleMetadata = RuleMetadata {
    id: diagnostic_ids::MATCHING_ASSEMBLY_MUST_EXIST,
    name: "MatchingAssemblyMustExist",
    description: "Every contract assembly must have a same-named implementation assembly",
    pair_kind: PairKind::Assembly,
};

#[derive(Debug, Clone, Default)]
pub struct MatchingAssemblyMustExist;

impl MatchingAssemblyMustExist {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MatchingAssemblyMustExist {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn run_assemblies(
        &self,
        left: Option<&AssemblySymbol>,
        right: Option<&AssemblySymbol>,
        differences: &mut Vec<CompatDifference>,
    ) {
        if let (Some(left), None) = (left, right) {
            differences.push(CompatDifference::new(
                METADATA.id,
                DifferenceType::Removed,
                format!("A:{}", left.name()),
                format!(
                    "Assembly '{}' exists on the contract but not on the implementation",
                    left.name()
                ),
            ));
        }
    }
}
