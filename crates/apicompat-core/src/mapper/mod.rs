//! Mapper tree pairing left and right symbols by canonical identity
//!
//! Each level keeps its children in an `IndexMap` keyed by [`SymbolKey`], so
//! matching is a hash lookup per element and iteration follows insertion
//! order: every left element first, then right-only elements appended.
//!
//! [`SymbolKey`]: crate::symbols::SymbolKey

mod assembly;
mod assembly_set;
mod namespace;
mod type_mapper;

pub use assembly::AssemblyMapper;
pub use assembly_set::AssemblySetMapper;
pub use namespace::NamespaceMapper;
pub use type_mapper::TypeMapper;

use std::fmt;

/// Which side of the comparison an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The contract
    Left = 0,
    /// The implementation
    Right = 1,
}

impl Side {
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// An optional left and an optional right instance of `T`
#[derive(Debug, Clone)]
pub struct ElementMapper<T> {
    elements: [Option<T>; 2],
}

impl<T> Default for ElementMapper<T> {
    fn default() -> Self {
        Self {
            elements: [None, None],
        }
    }
}

impl<T> ElementMapper<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(&self) -> Option<&T> {
        self.get(Side::Left)
    }

    pub fn right(&self) -> Option<&T> {
        self.get(Side::Right)
    }

    pub fn get(&self, side: Side) -> Option<&T> {
        self.elements[side.index()].as_ref()
    }

    pub fn is_set(&self, side: Side) -> bool {
        self.elements[side.index()].is_some()
    }

    /// Assign `value` to `side`; an occupied slot keeps its first value
    ///
    /// Returns whether the value was stored.
    pub fn set(&mut self, side: Side, value: T) -> bool {
        let slot = &mut self.elements[side.index()];
        if slot.is_some() {
            tracing::debug!("Duplicate element on the {} side, keeping the first", side);
            return false;
        }
        *slot = Some(value);
        true
    }

    /// Both slots empty; never true for a node reachable from the tree
    pub fn is_empty(&self) -> bool {
        self.elements.iter().all(Option::is_none)
    }
}

/// A node of the mapper tree
#[derive(Debug, Clone, Copy)]
pub enum MapperNode<'a> {
    AssemblySet(&'a AssemblySetMapper),
    Assembly(&'a AssemblyMapper),
    Namespace(&'a NamespaceMapper),
    Type(&'a TypeMapper),
}

impl MapperNode<'_> {
    /// Short label for logs and error messages
    pub fn describe(&self) -> String {
        match self {
            MapperNode::AssemblySet(_) => "assembly set".to_string(),
            MapperNode::Assembly(mapper) => format!("assembly '{}'", mapper.key()),
            MapperNode::Namespace(mapper) => format!("namespace '{}'", mapper.key()),
            MapperNode::Type(mapper) => format!("type '{}'", mapper.key()),
        }
    }

    /// Whether neither side holds an element
    pub fn is_empty(&self) -> bool {
        match self {
            MapperNode::AssemblySet(mapper) => mapper.left().is_none() && mapper.right().is_none(),
            MapperNode::Assembly(mapper) => mapper.left().is_none() && mapper.right().is_none(),
            MapperNode::Namespace(mapper) => mapper.left().is_none() && mapper.right().is_none(),
            MapperNode::Type(mapper) => mapper.left().is_none() && mapper.right().is_none(),
        }
    }
}
