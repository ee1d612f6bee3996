//! Canonical identities, match keys and display strings
//!
//! Canonical identities use the documentation-comment ID format
//! (`T:Ns.Type`, `M:Ns.Type.Method(System.String)`, `F:Ns.Type.Field`).
//! Parameter types are written by type identity, with generic parameters
//! referenced by ordinal, so overloads stay distinct and renaming a generic
//! parameter does not change an identity.
//!
//! Match keys are the case-insensitive form of those identities.

use super::{
    Accessibility, AccessorKind, AccessorSymbol, GenericOwner, MemberKind, MemberSymbol,
    TypeRef, TypeSymbol,
};
use std::fmt;

/// Case-insensitive match key for a symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey(String);

impl SymbolKey {
    pub fn new(identity: impl AsRef<str>) -> Self {
        Self(identity.as_ref().to_lowercase())
    }

    /// Key of an assembly, by simple name
    pub fn for_assembly(name: &str) -> Self {
        Self::new(format!("A:{name}"))
    }

    /// Key of a namespace, by fully-qualified name
    pub fn for_namespace(name: &str) -> Self {
        Self::new(format!("N:{name}"))
    }

    /// Key of a type, by fully-qualified metadata name (`Ns.Type`1`)
    pub fn for_type_name(metadata_name: &str) -> Self {
        Self::new(format!("T:{metadata_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// C# keyword for well-known `System` types
pub fn keyword_alias(full_name: &str) -> Option<&'static str> {
    let alias = match full_name {
        "System.Boolean" => "bool",
        "System.Byte" => "byte",
        "System.SByte" => "sbyte",
        "System.Char" => "char",
        "System.Decimal" => "decimal",
        "System.Double" => "double",
        "System.Single" => "float",
        "System.Int16" => "short",
        "System.UInt16" => "ushort",
        "System.Int32" => "int",
        "System.UInt32" => "uint",
        "System.Int64" => "long",
        "System.UInt64" => "ulong",
        "System.Object" => "object",
        "System.String" => "string",
        "System.Void" => "void",
        _ => return None,
    };
    Some(alias)
}

impl TypeRef {
    /// Type identity as written inside a documentation-comment ID
    pub fn doc_id(&self) -> String {
        match self {
            TypeRef::Named {
                name,
                type_arguments,
            } => {
                if type_arguments.is_empty() {
                    name.clone()
                } else {
                    let args: Vec<String> = type_arguments.iter().map(TypeRef::doc_id).collect();
                    format!("{name}{{{}}}", args.join(","))
                }
            }
            TypeRef::TypeParameter { ordinal, owner, .. } => match owner {
                GenericOwner::Type => format!("`{ordinal}"),
                GenericOwner::Method => format!("``{ordinal}"),
            },
            TypeRef::Array { element, rank } => {
                if *rank <= 1 {
                    format!("{}[]", element.doc_id())
                } else {
                    format!("{}[{}]", element.doc_id(), vec!["0:"; *rank].join(","))
                }
            }
            TypeRef::ByRef { element } => format!("{}@", element.doc_id()),
            TypeRef::Pointer { element } => format!("{}*", element.doc_id()),
        }
    }

    /// Human-readable, C#-like rendering
    pub fn display(&self) -> String {
        match self {
            TypeRef::Named {
                name,
                type_arguments,
            } => {
                let base = keyword_alias(name).map_or_else(|| name.clone(), str::to_string);
                if type_arguments.is_empty() {
                    base
                } else {
                    let args: Vec<String> = type_arguments.iter().map(TypeRef::display).collect();
                    format!("{base}<{}>", args.join(", "))
                }
            }
            TypeRef::TypeParameter { name, .. } => name.clone(),
            TypeRef::Array { element, rank } => {
                format!("{}[{}]", element.display(), ",".repeat(rank.saturating_sub(1)))
            }
            TypeRef::ByRef { element } => format!("ref {}", element.display()),
            TypeRef::Pointer { element } => format!("{}*", element.display()),
        }
    }
}

impl TypeSymbol {
    /// `Ns.Name`, or `Name` in the global namespace
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Full name with generic arity suffix (`Ns.Name`2`)
    pub fn metadata_name(&self) -> String {
        if self.type_parameters.is_empty() {
            self.full_name()
        } else {
            format!("{}`{}", self.full_name(), self.type_parameters.len())
        }
    }

    pub fn doc_id(&self) -> String {
        format!("T:{}", self.metadata_name())
    }

    pub fn key(&self) -> SymbolKey {
        SymbolKey::for_type_name(&self.metadata_name())
    }

    pub fn display(&self) -> String {
        if self.type_parameters.is_empty() {
            self.full_name()
        } else {
            format!("{}<{}>", self.full_name(), self.type_parameters.join(", "))
        }
    }
}

/// One comparable member of a type
///
/// Properties, indexers and events never appear directly: each of their
/// accessors is its own `ApiMember` with its own identity, so a single
/// missing getter can be reported and suppressed on its own.
#[derive(Debug, Clone, Copy)]
pub enum ApiMember<'a> {
    /// A method, constructor or field
    Member {
        containing: &'a TypeSymbol,
        member: &'a MemberSymbol,
    },
    /// One accessor of a property, indexer or event
    Accessor {
        containing: &'a TypeSymbol,
        member: &'a MemberSymbol,
        accessor: AccessorSymbol,
    },
}

impl<'a> ApiMember<'a> {
    pub fn containing_type(&self) -> &'a TypeSymbol {
        match *self {
            ApiMember::Member { containing, .. } | ApiMember::Accessor { containing, .. } => {
                containing
            }
        }
    }

    /// The declaring member (the property for an accessor)
    pub fn member(&self) -> &'a MemberSymbol {
        match *self {
            ApiMember::Member { member, .. } | ApiMember::Accessor { member, .. } => member,
        }
    }

    pub fn accessor_kind(&self) -> Option<AccessorKind> {
        match *self {
            ApiMember::Member { .. } => None,
            ApiMember::Accessor { accessor, .. } => Some(accessor.kind),
        }
    }

    /// Effective accessibility; accessors inherit their member's unless narrowed
    pub fn accessibility(&self) -> Accessibility {
        match *self {
            ApiMember::Member { member, .. } => member.accessibility,
            ApiMember::Accessor {
                member, accessor, ..
            } => accessor.accessibility.unwrap_or(member.accessibility),
        }
    }

    fn metadata_name(&self) -> String {
        match self {
            ApiMember::Member { member, .. } if member.kind == MemberKind::Constructor => {
                "#ctor".to_string()
            }
            ApiMember::Member { member, .. } => member.name.clone(),
            ApiMember::Accessor {
                member, accessor, ..
            } => format!("{}{}", accessor.kind.prefix(), member.name),
        }
    }

    fn parameter_types(&self) -> Vec<&'a TypeRef> {
        let member = self.member();
        let mut types: Vec<&'a TypeRef> = Vec::new();
        match self.accessor_kind() {
            None | Some(AccessorKind::Get) => {
                types.extend(member.parameters.iter().map(|p| &p.parameter_type));
            }
            Some(AccessorKind::Set) => {
                types.extend(member.parameters.iter().map(|p| &p.parameter_type));
                types.extend(member.member_type.as_ref());
            }
            Some(AccessorKind::Add | AccessorKind::Remove) => {
                types.extend(member.member_type.as_ref());
            }
        }
        types
    }

    /// Canonical identity (`M:Ns.Type.get_Item(System.Int32)`)
    pub fn doc_id(&self) -> String {
        let member = self.member();
        let prefix = match (self, member.kind) {
            (ApiMember::Member { .. }, MemberKind::Field) => "F",
            _ => "M",
        };

        let mut id = format!(
            "{prefix}:{}.{}",
            self.containing_type().metadata_name(),
            self.metadata_name()
        );
        if matches!(self, ApiMember::Member { .. }) && !member.type_parameters.is_empty() {
            id.push_str(&format!("``{}", member.type_parameters.len()));
        }

        let parameters = self.parameter_types();
        if !parameters.is_empty() {
            let ids: Vec<String> = parameters.iter().map(|t| t.doc_id()).collect();
            id.push('(');
            id.push_str(&ids.join(","));
            id.push(')');
        }
        id
    }

    pub fn key(&self) -> SymbolKey {
        SymbolKey::new(self.doc_id())
    }

    /// Human-readable rendering (`Ns.Type.Prop.get`, `Ns.Type.this[int].get`)
    pub fn display(&self) -> String {
        let containing = self.containing_type();
        let member = self.member();
        let parameter_list = || {
            member
                .parameters
                .iter()
                .map(|p| p.parameter_type.display())
                .collect::<Vec<_>>()
                .join(", ")
        };

        match self {
            ApiMember::Member { .. } => match member.kind {
                MemberKind::Field => format!("{}.{}", containing.display(), member.name),
                MemberKind::Constructor => format!(
                    "{}.{}({})",
                    containing.display(),
                    containing.name,
                    parameter_list()
                ),
                _ => {
                    let generics = if member.type_parameters.is_empty() {
                        String::new()
                    } else {
                        format!("<{}>", member.type_parameters.join(", "))
                    };
                    format!(
                        "{}.{}{generics}({})",
                        containing.display(),
                        member.name,
                        parameter_list()
                    )
                }
            },
            ApiMember::Accessor { accessor, .. } => {
                let name = if member.kind == MemberKind::Indexer {
                    format!("this[{}]", parameter_list())
                } else {
                    member.name.clone()
                };
                format!(
                    "{}.{name}.{}",
                    containing.display(),
                    accessor.kind.keyword()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Parameter, TypeKind};
    use super::*;

    fn first() -> TypeSymbol {
        let mut ty = TypeSymbol::new("CompatTests", "First", TypeKind::Class);
        ty.members = vec![
            MemberSymbol::method("Parameterless", Vec::new()).with_return_type(TypeRef::string()),
            MemberSymbol::method(
                "ShouldReportMethod",
                vec![
                    Parameter::new("a", TypeRef::string()),
                    Parameter::new("b", TypeRef::string()),
                ],
            ),
            MemberSymbol::property(
                "ShouldReportMissingProperty",
                TypeRef::string(),
                &[AccessorKind::Get],
            ),
            MemberSymbol::indexer(
                TypeRef::string(),
                vec![Parameter::new("index", TypeRef::int32())],
                &[AccessorKind::Get],
            ),
            MemberSymbol::event(
                "ShouldReportMissingEvent",
                TypeRef::named("CompatTests.EventHandler"),
            ),
            MemberSymbol::field("ReportMissingField", TypeRef::int32()),
        ];
        ty
    }

    #[test]
    fn test_member_doc_ids() {
        let ty = first();
        let ids: Vec<String> = ty.api_members().iter().map(ApiMember::doc_id).collect();
        assert_eq!(
            ids,
            vec![
                "M:CompatTests.First.Parameterless",
                "M:CompatTests.First.ShouldReportMethod(System.String,System.String)",
                "M:CompatTests.First.get_ShouldReportMissingProperty",
                "M:CompatTests.First.get_Item(System.Int32)",
                "M:CompatTests.First.add_ShouldReportMissingEvent(CompatTests.EventHandler)",
                "M:CompatTests.First.remove_ShouldReportMissingEvent(CompatTests.EventHandler)",
                "F:CompatTests.First.ReportMissingField",
            ]
        );
    }

    #[test]
    fn test_member_display() {
        let ty = first();
        let displays: Vec<String> = ty.api_members().iter().map(ApiMember::display).collect();
        assert_eq!(
            displays,
            vec![
                "CompatTests.First.Parameterless()",
                "CompatTests.First.ShouldReportMethod(string, string)",
                "CompatTests.First.ShouldReportMissingProperty.get",
                "CompatTests.First.this[int].get",
                "CompatTests.First.ShouldReportMissingEvent.add",
                "CompatTests.First.ShouldReportMissingEvent.remove",
                "CompatTests.First.ReportMissingField",
            ]
        );
    }

    #[test]
    fn test_generic_parameter_renaming_keeps_key() {
        let mut left = TypeSymbol::new("Ns", "Box", TypeKind::Class);
        left.type_parameters = vec!["T".to_string()];
        left.members.push(
            MemberSymbol::method(
                "Map",
                vec![Parameter::new(
                    "value",
                    TypeRef::method_type_parameter("TResult", 0),
                )],
            )
            .with_type_parameters(["TResult"]),
        );

        let mut right = left.clone();
        right.type_parameters = vec!["TValue".to_string()];
        right.members[0] = MemberSymbol::method(
            "Map",
            vec![Parameter::new("value", TypeRef::method_type_parameter("TOut", 0))],
        )
        .with_type_parameters(["TOut"]);

        let left_key = left.api_members()[0].key();
        let right_key = right.api_members()[0].key();
        assert_eq!(left_key, right_key);
        assert_eq!(left.api_members()[0].doc_id(), "M:Ns.Box`1.Map``1(``0)");
        assert_eq!(left.key(), right.key());
    }

    #[test]
    fn test_overloads_have_distinct_keys() {
        let mut ty = TypeSymbol::new("Ns", "Parser", TypeKind::Class);
        ty.members.push(MemberSymbol::method(
            "Parse",
            vec![Parameter::new("text", TypeRef::string())],
        ));
        ty.members.push(MemberSymbol::method(
            "Parse",
            vec![
                Parameter::new("text", TypeRef::string()),
                Parameter::new("strict", TypeRef::boolean()),
            ],
        ));

        let members = ty.api_members();
        assert_ne!(members[0].key(), members[1].key());
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        assert_eq!(
            SymbolKey::new("T:CompatTests.First"),
            SymbolKey::new("t:compattests.FIRST")
        );
    }

    #[test]
    fn test_type_ref_rendering() {
        let list = TypeRef::generic(
            "System.Collections.Generic.List",
            vec![TypeRef::string()],
        );
        assert_eq!(list.doc_id(), "System.Collections.Generic.List{System.String}");
        assert_eq!(list.display(), "System.Collections.Generic.List<string>");

        let matrix = TypeRef::Array {
            element: Box::new(TypeRef::int32()),
            rank: 2,
        };
        assert_eq!(matrix.doc_id(), "System.Int32[0:,0:]");
        assert_eq!(matrix.display(), "int[,]");

        let by_ref = TypeRef::by_ref(TypeRef::type_parameter("T", 0));
        assert_eq!(by_ref.doc_id(), "`0@");
        assert_eq!(by_ref.display(), "ref T");
    }

    #[test]
    fn test_constructor_and_setter_identities() {
        let mut ty = TypeSymbol::new("Ns", "Point", TypeKind::Struct);
        ty.members.push(MemberSymbol::constructor(vec![
            Parameter::new("x", TypeRef::int32()),
            Parameter::new("y", TypeRef::int32()),
        ]));
        ty.members.push(MemberSymbol::indexer(
            TypeRef::int32(),
            vec![Parameter::new("axis", TypeRef::int32())],
            &[AccessorKind::Set],
        ));

        let members = ty.api_members();
        assert_eq!(members[0].doc_id(), "M:Ns.Point.#ctor(System.Int32,System.Int32)");
        assert_eq!(members[0].display(), "Ns.Point.Point(int, int)");
        assert_eq!(
            members[1].doc_id(),
            "M:Ns.Point.set_Item(System.Int32,System.Int32)"
        );
        assert_eq!(members[1].display(), "Ns.Point.this[int].set");
    }

    #[test]
    fn test_accessor_inherits_or_narrows_accessibility() {
        let mut property = MemberSymbol::property("Value", TypeRef::int32(), &[]);
        property.accessors = vec![
            AccessorSymbol::new(AccessorKind::Get),
            AccessorSymbol::with_accessibility(AccessorKind::Set, Accessibility::Private),
        ];
        let mut ty = TypeSymbol::new("Ns", "Holder", TypeKind::Class);
        ty.members.push(property);

        let members = ty.api_members();
        assert_eq!(members[0].accessibility(), Accessibility::Public);
        assert_eq!(members[1].accessibility(), Accessibility::Private);
    }
}
