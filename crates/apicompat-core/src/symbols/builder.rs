//! Fluent construction of API surfaces
//!
//! Used by tests and by embedders that produce surfaces programmatically.
//!
//! ```
//! use apicompat_core::symbols::builder::{AssemblyBuilder, TypeBuilder};
//! use apicompat_core::symbols::TypeRef;
//!
//! let assembly = AssemblyBuilder::new("Contoso")
//!     .add_type(
//!         TypeBuilder::class("Contoso", "Client")
//!             .method("Send", &[TypeRef::string()])
//!             .build(),
//!     )
//!     .build();
//! assert_eq!(assembly.types().count(), 1);
//! ```

use super::{
    Accessibility, AccessorKind, AssemblyIdentity, AssemblySymbol, MemberSymbol, Parameter,
    TypeKind, TypeRef, TypeSymbol,
};
use std::sync::Arc;

/// Builder for [`AssemblySymbol`]
#[derive(Debug, Clone)]
pub struct AssemblyBuilder {
    assembly: AssemblySymbol,
}

impl AssemblyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            assembly: AssemblySymbol::new(AssemblyIdentity::new(name)),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.assembly.identity.version = version.into();
        self
    }

    pub fn culture(mut self, culture: impl Into<String>) -> Self {
        self.assembly.identity.culture = Some(culture.into());
        self
    }

    pub fn public_key_token(mut self, token: impl Into<String>) -> Self {
        self.assembly.identity.public_key_token = Some(token.into());
        self
    }

    pub fn add_type(mut self, ty: TypeSymbol) -> Self {
        self.assembly.add_type(Arc::new(ty));
        self
    }

    /// Forward a type (by fully-qualified metadata name) to a referenced assembly
    pub fn forward(mut self, metadata_name: impl Into<String>) -> Self {
        self.assembly.forwarded_types.push(metadata_name.into());
        self
    }

    /// Reference an already-built assembly
    pub fn reference(mut self, reference: Arc<AssemblySymbol>) -> Self {
        self.assembly
            .reference_names
            .push(reference.name().to_string());
        self.assembly.references.push(reference);
        self
    }

    pub fn build(self) -> Arc<AssemblySymbol> {
        Arc::new(self.assembly)
    }
}

/// Builder for [`TypeSymbol`]
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    ty: TypeSymbol,
}

fn positional(types: &[TypeRef]) -> Vec<Parameter> {
    types
        .iter()
        .enumerate()
        .map(|(i, t)| Parameter::new(format!("arg{i}"), t.clone()))
        .collect()
}

impl TypeBuilder {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            ty: TypeSymbol::new(namespace, name, kind),
        }
    }

    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, TypeKind::Class)
    }

    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, TypeKind::Interface)
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.ty.accessibility = accessibility;
        self
    }

    pub fn internal(self) -> Self {
        self.accessibility(Accessibility::Internal)
    }

    pub fn type_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ty.type_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    /// Public method with positional parameters of the given types
    pub fn method(self, name: &str, parameters: &[TypeRef]) -> Self {
        self.member(MemberSymbol::method(name, positional(parameters)))
    }

    pub fn constructor(self, parameters: &[TypeRef]) -> Self {
        self.member(MemberSymbol::constructor(positional(parameters)))
    }

    pub fn field(self, name: &str, field_type: TypeRef) -> Self {
        self.member(MemberSymbol::field(name, field_type))
    }

    pub fn property(self, name: &str, property_type: TypeRef, accessors: &[AccessorKind]) -> Self {
        self.member(MemberSymbol::property(name, property_type, accessors))
    }

    pub fn indexer(
        self,
        item_type: TypeRef,
        parameters: &[TypeRef],
        accessors: &[AccessorKind],
    ) -> Self {
        self.member(MemberSymbol::indexer(
            item_type,
            positional(parameters),
            accessors,
        ))
    }

    pub fn event(self, name: &str, handler_type: TypeRef) -> Self {
        self.member(MemberSymbol::event(name, handler_type))
    }

    pub fn member(mut self, member: MemberSymbol) -> Self {
        self.ty.members.push(member);
        self
    }

    pub fn build(self) -> TypeSymbol {
        self.ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolKey;

    #[test]
    fn test_builder_groups_types_by_namespace() {
        let assembly = AssemblyBuilder::new("Contoso")
            .version("1.2.0.0")
            .add_type(TypeBuilder::class("Contoso.A", "One").build())
            .add_type(TypeBuilder::class("Contoso.B", "Two").build())
            .add_type(TypeBuilder::class("Contoso.A", "Three").build())
            .build();

        assert_eq!(assembly.namespaces.len(), 2);
        assert_eq!(assembly.namespaces[0].types.len(), 2);
        assert_eq!(assembly.identity.version, "1.2.0.0");
        assert!(
            assembly
                .types()
                .any(|ty| ty.key() == SymbolKey::for_type_name("Contoso.B.Two"))
        );
    }

    #[test]
    fn test_builder_sets_full_identity() {
        let assembly = AssemblyBuilder::new("Contoso")
            .version("4.0.0.0")
            .culture("en-US")
            .public_key_token("b03f5f7f11d50a3a")
            .add_type(TypeBuilder::interface("Contoso", "IClient").build())
            .build();

        assert_eq!(
            assembly.identity.to_string(),
            "Contoso, Version=4.0.0.0, Culture=en-US, PublicKeyToken=b03f5f7f11d50a3a"
        );
        let ty = assembly.types().next().unwrap();
        assert_eq!(ty.kind, TypeKind::Interface);
    }

    #[test]
    fn test_reference_records_name() {
        let core = AssemblyBuilder::new("Contoso.Core").build();
        let facade = AssemblyBuilder::new("Contoso")
            .forward("Contoso.Widget")
            .reference(core.clone())
            .build();

        assert_eq!(facade.reference_names, vec!["Contoso.Core".to_string()]);
        assert!(Arc::ptr_eq(&facade.references[0], &core));
        assert_eq!(facade.forwarded_types, vec!["Contoso.Widget".to_string()]);
    }
}
