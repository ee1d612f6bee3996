//! API surface symbol model
//!
//! A side of a comparison is an ordered list of [`AssemblySymbol`]s. Each
//! assembly owns flat, fully-qualified namespaces, which own types, which own
//! members. Types are shared through `Arc` so that a forwarded type resolved
//! from a referenced assembly is the very same instance the reference holds.
//!
//! The model is produced by a symbol provider (see [`crate::surface`] or the
//! fluent [`builder`]) and is immutable once handed to the mapper.

pub mod builder;
mod identity;

pub use identity::{ApiMember, SymbolKey, keyword_alias};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Declared accessibility of a type or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    #[default]
    Public,
    Protected,
    /// `protected internal`
    ProtectedOrInternal,
    Internal,
    /// `private protected`
    ProtectedAndInternal,
    Private,
}

/// Kind of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

/// Kind of a type member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Method,
    Constructor,
    Field,
    Property,
    Indexer,
    Event,
}

/// Generated sub-member of a property, indexer or event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessorKind {
    Get,
    Set,
    Add,
    Remove,
}

impl AccessorKind {
    /// Metadata name prefix (`get_`, `set_`, ...)
    pub fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Get => "get_",
            AccessorKind::Set => "set_",
            AccessorKind::Add => "add_",
            AccessorKind::Remove => "remove_",
        }
    }

    /// Suffix used in display strings (`Prop.get`)
    pub fn keyword(self) -> &'static str {
        match self {
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::Add => "add",
            AccessorKind::Remove => "remove",
        }
    }
}

/// Whether a generic parameter belongs to a type or to a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenericOwner {
    #[default]
    Type,
    Method,
}

/// A reference to a type in a signature
///
/// Type identity is positional for generic parameters: two references to the
/// first method type parameter are equal regardless of how each side named it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    /// A nominal type, e.g. `System.String` or `System.Collections.Generic.List`
    /// with type arguments
    #[serde(rename_all = "camelCase")]
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_arguments: Vec<TypeRef>,
    },
    /// A generic parameter, identified by owner and ordinal
    #[serde(rename_all = "camelCase")]
    TypeParameter {
        name: String,
        ordinal: usize,
        #[serde(default)]
        owner: GenericOwner,
    },
    Array {
        element: Box<TypeRef>,
        #[serde(default = "default_rank")]
        rank: usize,
    },
    ByRef {
        element: Box<TypeRef>,
    },
    Pointer {
        element: Box<TypeRef>,
    },
}

fn default_rank() -> usize {
    1
}

impl TypeRef {
    /// A non-generic nominal type
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    /// A constructed generic type
    pub fn generic(name: impl Into<String>, type_arguments: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            type_arguments,
        }
    }

    /// A type-level generic parameter
    pub fn type_parameter(name: impl Into<String>, ordinal: usize) -> Self {
        TypeRef::TypeParameter {
            name: name.into(),
            ordinal,
            owner: GenericOwner::Type,
        }
    }

    /// A method-level generic parameter
    pub fn method_type_parameter(name: impl Into<String>, ordinal: usize) -> Self {
        TypeRef::TypeParameter {
            name: name.into(),
            ordinal,
            owner: GenericOwner::Method,
        }
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    pub fn by_ref(element: TypeRef) -> Self {
        TypeRef::ByRef {
            element: Box::new(element),
        }
    }

    pub fn string() -> Self {
        Self::named("System.String")
    }

    pub fn int32() -> Self {
        Self::named("System.Int32")
    }

    pub fn object() -> Self {
        Self::named("System.Object")
    }

    pub fn boolean() -> Self {
        Self::named("System.Boolean")
    }
}

/// A method, constructor or indexer parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, parameter_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            parameter_type,
        }
    }
}

/// An accessor declared by a property, indexer or event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorSymbol {
    pub kind: AccessorKind,
    /// Accessor-specific accessibility; `None` inherits the member's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
}

impl AccessorSymbol {
    pub fn new(kind: AccessorKind) -> Self {
        Self {
            kind,
            accessibility: None,
        }
    }

    pub fn with_accessibility(kind: AccessorKind, accessibility: Accessibility) -> Self {
        Self {
            kind,
            accessibility: Some(accessibility),
        }
    }
}

/// A member declared by a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSymbol {
    /// Metadata name; indexers use `Item`, constructors `.ctor`
    pub name: String,
    pub kind: MemberKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Method-level generic parameter names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    /// Field, property, indexer or event handler type; method return type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<AccessorSymbol>,
}

impl MemberSymbol {
    fn bare(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            accessibility: Accessibility::Public,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            member_type: None,
            accessors: Vec::new(),
        }
    }

    pub fn method(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            ..Self::bare(name, MemberKind::Method)
        }
    }

    pub fn constructor(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            ..Self::bare(".ctor", MemberKind::Constructor)
        }
    }

    pub fn field(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self {
            member_type: Some(field_type),
            ..Self::bare(name, MemberKind::Field)
        }
    }

    pub fn property(
        name: impl Into<String>,
        property_type: TypeRef,
        accessors: &[AccessorKind],
    ) -> Self {
        Self {
            member_type: Some(property_type),
            accessors: accessors.iter().copied().map(AccessorSymbol::new).collect(),
            ..Self::bare(name, MemberKind::Property)
        }
    }

    pub fn indexer(
        item_type: TypeRef,
        parameters: Vec<Parameter>,
        accessors: &[AccessorKind],
    ) -> Self {
        Self {
            parameters,
            member_type: Some(item_type),
            accessors: accessors.iter().copied().map(AccessorSymbol::new).collect(),
            ..Self::bare("Item", MemberKind::Indexer)
        }
    }

    pub fn event(name: impl Into<String>, handler_type: TypeRef) -> Self {
        Self {
            member_type: Some(handler_type),
            accessors: vec![
                AccessorSymbol::new(AccessorKind::Add),
                AccessorSymbol::new(AccessorKind::Remove),
            ],
            ..Self::bare(name, MemberKind::Event)
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_type_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_return_type(mut self, return_type: TypeRef) -> Self {
        self.member_type = Some(return_type);
        self
    }

    /// Accessors as seen by the comparison
    ///
    /// Events always expose `add` and `remove`, so surfaces that omit them
    /// still produce both sub-members.
    pub fn effective_accessors(&self) -> Vec<AccessorSymbol> {
        if self.kind == MemberKind::Event && self.accessors.is_empty() {
            return vec![
                AccessorSymbol::new(AccessorKind::Add),
                AccessorSymbol::new(AccessorKind::Remove),
            ];
        }
        self.accessors.clone()
    }
}

/// A type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSymbol {
    /// Containing namespace; filled from the enclosing namespace when loaded
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberSymbol>,
}

impl TypeSymbol {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            accessibility: Accessibility::Public,
            type_parameters: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Stand-in for a forwarded type whose destination could not be resolved
    ///
    /// `metadata_name` is the fully-qualified name, optionally carrying a
    /// generic arity suffix (`Ns.Cache`2`).
    pub fn unresolved(metadata_name: &str) -> Self {
        let (namespace, simple) = match metadata_name.rsplit_once('.') {
            Some((ns, name)) => (ns, name),
            None => ("", metadata_name),
        };
        let (name, arity) = match simple.split_once('`') {
            Some((name, arity)) => (name, arity.parse::<usize>().unwrap_or(0)),
            None => (simple, 0),
        };

        let mut symbol = Self::new(namespace, name, TypeKind::Class);
        symbol.type_parameters = (1..=arity).map(|i| format!("T{i}")).collect();
        symbol
    }

    /// Members in declaration order, accessors expanded
    pub fn api_members(&self) -> Vec<ApiMember<'_>> {
        let mut members = Vec::with_capacity(self.members.len());
        for member in &self.members {
            match member.kind {
                MemberKind::Method | MemberKind::Constructor | MemberKind::Field => {
                    members.push(ApiMember::Member {
                        containing: self,
                        member,
                    });
                }
                MemberKind::Property | MemberKind::Indexer | MemberKind::Event => {
                    for accessor in member.effective_accessors() {
                        members.push(ApiMember::Accessor {
                            containing: self,
                            member,
                            accessor,
                        });
                    }
                }
            }
        }
        members
    }
}

/// Strong identity of an assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyIdentity {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_token: Option<String>,
}

fn default_version() -> String {
    "0.0.0.0".to_string()
}

impl AssemblyIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            culture: None,
            public_key_token: None,
        }
    }
}

fn same_optional(a: &Option<String>, b: &Option<String>) -> bool {
    match (a.as_deref(), b.as_deref()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        (Some(v), None) | (None, Some(v)) => {
            v.eq_ignore_ascii_case("neutral") || v.eq_ignore_ascii_case("null")
        }
    }
}

impl PartialEq for AssemblyIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.version == other.version
            && same_optional(&self.culture, &other.culture)
            && same_optional(&self.public_key_token, &other.public_key_token)
    }
}

impl Eq for AssemblyIdentity {}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Version={}, Culture={}, PublicKeyToken={}",
            self.name,
            self.version,
            self.culture.as_deref().unwrap_or("neutral"),
            self.public_key_token.as_deref().unwrap_or("null")
        )
    }
}

/// A fully-qualified namespace and the types declared in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceSymbol {
    /// Fully-qualified name; empty for the global namespace
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<Arc<TypeSymbol>>,
}

/// An assembly: the top-level unit of each side
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblySymbol {
    pub identity: AssemblyIdentity,
    #[serde(default)]
    pub namespaces: Vec<NamespaceSymbol>,
    /// Metadata names of types this assembly forwards to a referenced assembly
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forwarded_types: Vec<String>,
    /// Names of referenced assemblies, as declared
    #[serde(default, rename = "references", skip_serializing_if = "Vec::is_empty")]
    pub reference_names: Vec<String>,
    /// Referenced assemblies resolved by the provider
    #[serde(skip)]
    pub references: Vec<Arc<AssemblySymbol>>,
}

impl AssemblySymbol {
    pub fn new(identity: AssemblyIdentity) -> Self {
        Self {
            identity,
            namespaces: Vec::new(),
            forwarded_types: Vec::new(),
            reference_names: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Propagate each namespace's name into the types it declares
    pub fn normalize(&mut self) {
        for namespace in &mut self.namespaces {
            for ty in &mut namespace.types {
                if ty.namespace != namespace.name {
                    Arc::make_mut(ty).namespace = namespace.name.clone();
                }
            }
        }
    }

    /// All declared types in namespace order
    pub fn types(&self) -> impl Iterator<Item = &Arc<TypeSymbol>> {
        self.namespaces.iter().flat_map(|ns| ns.types.iter())
    }

    /// Add a type to the namespace it declares, creating the namespace if needed
    pub fn add_type(&mut self, ty: Arc<TypeSymbol>) {
        match self
            .namespaces
            .iter_mut()
            .find(|ns| ns.name == ty.namespace)
        {
            Some(namespace) => namespace.types.push(ty),
            None => self.namespaces.push(NamespaceSymbol {
                name: ty.namespace.clone(),
                types: vec![ty],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_placeholder_splits_name_and_arity() {
        let ty = TypeSymbol::unresolved("Contoso.Collections.Cache`2");
        assert_eq!(ty.namespace, "Contoso.Collections");
        assert_eq!(ty.name, "Cache");
        assert_eq!(ty.type_parameters.len(), 2);
        assert!(ty.members.is_empty());
    }

    #[test]
    fn test_unresolved_placeholder_global_namespace() {
        let ty = TypeSymbol::unresolved("Orphan");
        assert_eq!(ty.namespace, "");
        assert_eq!(ty.name, "Orphan");
    }

    #[test]
    fn test_event_without_accessors_exposes_add_and_remove() {
        let mut event = MemberSymbol::event("Changed", TypeRef::named("System.EventHandler"));
        event.accessors.clear();

        let kinds: Vec<_> = event.effective_accessors().iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AccessorKind::Add, AccessorKind::Remove]);
    }

    #[test]
    fn test_api_members_expand_accessors_in_declaration_order() {
        let mut ty = TypeSymbol::new("Ns", "Widget", TypeKind::Class);
        ty.members.push(MemberSymbol::field("count", TypeRef::int32()));
        ty.members.push(MemberSymbol::property(
            "Name",
            TypeRef::string(),
            &[AccessorKind::Get, AccessorKind::Set],
        ));
        ty.members.push(MemberSymbol::method("Run", Vec::new()));

        let ids: Vec<_> = ty.api_members().iter().map(|m| m.doc_id()).collect();
        assert_eq!(
            ids,
            vec![
                "F:Ns.Widget.count",
                "M:Ns.Widget.get_Name",
                "M:Ns.Widget.set_Name(System.String)",
                "M:Ns.Widget.Run",
            ]
        );
    }

    #[test]
    fn test_identity_equality_treats_neutral_as_absent() {
        let mut a = AssemblyIdentity::new("Contoso");
        let mut b = AssemblyIdentity::new("contoso");
        a.culture = Some("neutral".to_string());
        assert_eq!(a, b);

        b.version = "2.0.0.0".to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn test_normalize_fills_type_namespaces() {
        let json = r#"{
            "identity": { "name": "Contoso" },
            "namespaces": [
                { "name": "Contoso.Api", "types": [ { "name": "Client" } ] }
            ]
        }"#;
        let mut assembly: AssemblySymbol = serde_json::from_str(json).unwrap();
        assembly.normalize();

        let ty = assembly.types().next().unwrap();
        assert_eq!(ty.namespace, "Contoso.Api");
        assert_eq!(ty.doc_id(), "T:Contoso.Api.Client");
    }
}
