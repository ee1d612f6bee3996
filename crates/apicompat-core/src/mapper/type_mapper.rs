use super::{ElementMapper, Side};
use crate::symbols::{SymbolKey, TypeSymbol};
use std::sync::Arc;

/// Pairs one type across sides
///
/// Members are not mapped structurally; type rules match them by key.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    key: SymbolKey,
    element: ElementMapper<Arc<TypeSymbol>>,
}

impl TypeMapper {
    pub fn new(key: SymbolKey) -> Self {
        Self {
            key,
            element: ElementMapper::new(),
        }
    }

    pub fn add_element(&mut self, ty: Arc<TypeSymbol>, side: Side) {
        debug_assert_eq!(ty.key(), self.key);
        self.element.set(side, ty);
    }

    pub fn key(&self) -> &SymbolKey {
        &self.key
    }

    pub fn left(&self) -> Option<&Arc<TypeSymbol>> {
        self.element.left()
    }

    pub fn right(&self) -> Option<&Arc<TypeSymbol>> {
        self.element.right()
    }
}
