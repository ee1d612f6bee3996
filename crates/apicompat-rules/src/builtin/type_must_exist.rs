//! Types of the contract must exist in the implementation

use apicompat_core::{
    CompatDifference, DifferenceType, PairKind, Rule, RuleMetadata, RuleSettings, TypeSymbol,
    diagnostic_ids,
};

static METADATA: RuleMetadata = RuleMetadata {
    id: diagnostic_ids::TYPE_MUST_EXIST,
    name: "TypeMustExist",
    description: "Every visible type of the contract must exist in the implementation",
    pair_kind: PairKind::Type,
};

/// Reports types missing on the right; in strict mode also types added there
#[derive(Debug, Clone)]
pub struct TypeMustExist {
    strict_mode: bool,
}

impl TypeMustExist {
    pub fn new(settings: &RuleSettings) -> Self {
        Self {
            strict_mode: settings.strict_mode,
        }
    }
}

impl Rule for TypeMustExist {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn run_types(
        &self,
        left: Option<&TypeSymbol>,
        right: Option<&TypeSymbol>,
        differences: &mut Vec<CompatDifference>,
    ) {
        match (left, right) {
            (Some(left), None) => differences.push(CompatDifference::new(
                METADATA.id,
                DifferenceType::Removed,
                left.doc_id(),
                format!(
                    "Type '{}' exists on the contract but not on the implementation",
                    left.display()
                ),
            )),
            (None, Some(right)) if self.strict_mode => differences.push(CompatDifference::new(
                METADATA.id,
                DifferenceType::Added,
                right.doc_id(),
                format!(
                    "Type '{}' exists on the implementation but not on the contract",
                    right.display()
                ),
            )),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicompat_core::TypeKind;

    fn run(rule: &TypeMustExist, left: Option<&TypeSymbol>, right: Option<&TypeSymbol>) -> Vec<String> {
        let mut differences = Vec::new();
        rule.run_types(left, right, &mut differences);
        differences.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_removed_type() {
        let ty = TypeSymbol::new("CompatTests", "Second", TypeKind::Class);
        let rule = TypeMustExist::new(&RuleSettings::default());

        assert_eq!(
            run(&rule, Some(&ty), None),
            vec!["CP0001 : Type 'CompatTests.Second' exists on the contract but not on the implementation"]
        );
        assert!(run(&rule, Some(&ty), Some(&ty)).is_empty());
    }

    #[test]
    fn test_added_type_only_in_strict_mode() {
        let ty = TypeSymbol::new("CompatTests", "Extra", TypeKind::Class);

        let lenient = TypeMustExist::new(&RuleSettings::default());
        assert!(run(&lenient, None, Some(&ty)).is_empty());

        let strict = TypeMustExist::new(&RuleSettings::default().with_strict_mode(true));
        assert_eq!(
            run(&strict, None, Some(&ty)),
            vec!["CP0001 : Type 'CompatTests.Extra' exists on the implementation but not on the contract"]
        );
    }
}
