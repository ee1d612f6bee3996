//! Matched assemblies must share an identity when validation is on

use apicompat_core::{
    AssemblySymbol, CompatDifference, DifferenceType, PairKind, Rule, RuleMetadata, RuleSettings,
    diagnostic_ids,
};

static METADATA: RuleMetadata = RuleMetadata {
    id: diagnostic_ids::ASSEMBLY_IDENTITY_MUST_MATCH,
    name: "AssemblyIdentityMustMatch",
    description: "Matched assemblies must agree on version, culture and public key token",
    pair_kind: PairKind::Assembly,
};

#[derive(Debug, Clone)]
pub struct AssemblyIdentityMustMatch {
    enabled: bool,
}

impl AssemblyIdentityMustMatch {
    pub fn new(settings: &RuleSettings) -> Self {
        Self {
            enabled: settings.validate_assembly_identity,
        }
    }
}

impl Rule for AssemblyIdentityMustMatch {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn run_assemblies(
        &self,
        left: Option<&AssemblySymbol>,
        right: Option<&AssemblySymbol>,
        differences: &mut Vec<CompatDifference>,
    ) {
        if !self.enabled {
            return;
        }
        let (Some(left), Some(right)) = (left, right) else {
            return;
        };
        if left.identity == right.identity {
            return;
        }

        differences.push(CompatDifference::new(
            METADATA.id,
            DifferenceType::Changed,
            format!("A:{}", left.name()),
            format!(
                "Assembly '{}' has identity '{}' on the contract but '{}' on the implementation",
                left.name(),
                left.identity,
                right.identity
            ),
        ));
    }
}
