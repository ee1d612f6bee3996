//! Built-in rule catalogue

mod assembly_identity;
mod assembly_must_exist;
mod member_must_exist;
mod type_must_exist;

pub use assembly_identity::AssemblyIdentityMustMatch;
pub use assembly_must_exist::MatchingAssemblyMustExist;
pub use member_must_exist::MemberMustExist;
pub use type_must_exist::TypeMustExist;

use apicompat_core::{Rule, RuleSettings};

/// The production rule set, in evaluation order
pub fn default_rules(settings: &RuleSettings) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(MatchingAssemblyMustExist::new()),
        Box::new(AssemblyIdentityMustMatch::new(settings)),
        Box::new(TypeMustExist::new(settings)),
        Box::new(MemberMustExist::new(settings)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicompat_core::PairKind;

    #[test]
    fn test_catalogue_ids_are_unique_and_ordered() {
        let rules = default_rules(&RuleSettings::default());
        let ids: Vec<_> = rules.iter().map(|r| r.metadata().id).collect();
        assert_eq!(ids, vec!["CP0004", "CP0003", "CP0001", "CP0002"]);
    }

    #[test]
    fn test_pair_kinds() {
        let rules = default_rules(&RuleSettings::default());
        let type_rules = rules.iter().filter(|r| r.applies_to(PairKind::Type)).count();
        let assembly_rules = rules.iter().filter(|r| r.applies_to(PairKind::Assembly)).count();
        assert_eq!((assembly_rules, type_rules), (2, 2));
    }
}
