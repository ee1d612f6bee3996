//! Members of the contract must exist in the implementation

use apicompat_core::{
    ApiMember, CompatDifference, DifferenceType, PairKind, Rule, RuleMetadata, RuleSettings,
    SymbolFilter, SymbolKey, TypeSymbol, diagnostic_ids,
};
use indexmap::IndexMap;
use std::sync::Arc;

static METADATA: RuleMetadata = RuleMetadata {
    id: diagnostic_ids::MEMBER_MUST_EXIST,
    name: "MemberMustExist",
    description: "Every visible member and accessor of a matched contract type must exist in the implementation",
    pair_kind: PairKind::Type,
};

/// Matches the members of a type pair by key
///
/// Accessors of properties, indexers and events are matched one by one, so
/// a property that lost its setter reports exactly that setter.
#[derive(Debug, Clone)]
pub struct MemberMustExist {
    filter: Arc<dyn SymbolFilter>,
    strict_mode: bool,
}

impl MemberMustExist {
    pub fn new(settings: &RuleSettings) -> Self {
        Self {
            filter: settings.filter.clone(),
            strict_mode: settings.strict_mode,
        }
    }

    fn visible<'a>(&self, ty: &'a TypeSymbol) -> IndexMap<SymbolKey, ApiMember<'a>> {
        let mut members = IndexMap::new();
        for member in ty.api_members() {
            if self.filter.include(member.accessibility()) {
                members.entry(member.key()).or_insert(member);
            }
        }
        members
    }
}

impl Rule for MemberMustExist {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn run_types(
        &self,
        left: Option<&TypeSymbol>,
        right: Option<&TypeSymbol>,
        differences: &mut Vec<CompatDifference>,
    ) {
        let (Some(left), Some(right)) = (left, right) else {
            return;
        };

        let left_members = self.visible(left);
        let right_members = self.visible(right);

        for (key, member) in &left_members {
            if !right_members.contains_key(key) {
                differences.push(CompatDifference::new(
                    METADATA.id,
                    DifferenceType::Removed,
                    member.doc_id(),
                    format!(
                        "Member '{}' exists on the contract but not on the implementation",
                        member.display()
                    ),
                ));
            }
        }

        if !self.strict_mode {
            return;
        }
        for (key, member) in &right_members {
            if !left_members.contains_key(key) {
                differences.push(CompatDifference::new(
                    METADATA.id,
                    DifferenceType::Added,
                    member.doc_id(),
                    format!(
                        "Member '{}' exists on the implementation but not on the contract",
                        member.display()
                    ),
                ));
            }
        }
    }
}
