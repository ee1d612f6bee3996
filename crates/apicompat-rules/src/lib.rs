//! apicompat rules
//!
//! The built-in compatibility rule catalogue, the [`RuleDriver`] that applies
//! it to mapper nodes, and [`ApiDiffer`], the entry point tying the mapper,
//! rules and suppression together.
//!
//! ```
//! use apicompat_core::symbols::builder::{AssemblyBuilder, TypeBuilder};
//! use apicompat_rules::ApiDiffer;
//!
//! let contract = AssemblyBuilder::new("Contoso")
//!     .add_type(TypeBuilder::class("Contoso", "Client").build())
//!     .build();
//! let implementation = AssemblyBuilder::new("Contoso").build();
//!
//! let differences = ApiDiffer::new()
//!     .get_differences(&[contract], &[implementation])
//!     .unwrap();
//! assert_eq!(differences[0].id(), "CP0001");
//! ```

pub mod builtin;
pub mod differ;
pub mod engine;

pub use builtin::{
    AssemblyIdentityMustMatch, MatchingAssemblyMustExist, MemberMustExist, TypeMustExist,
    default_rules,
};
pub use differ::ApiDiffer;
pub use engine::RuleDriver;
