//! apicompat core
//!
//! Comparison engine for API compatibility checks. Two API surfaces, the
//! contract (left) and the implementation (right), are paired element by
//! element in a mapper tree keyed by canonical identity. A rule engine then
//! walks the tree and reports every incompatibility as a
//! [`CompatDifference`], which a [`DifferenceBag`] filters against the
//! configured suppressions.
//!
//! The built-in rule catalogue and the `ApiDiffer` entry point live in the
//! `apicompat-rules` crate.

pub mod collector;
pub mod config;
pub mod difference;
pub mod error;
pub mod mapper;
pub mod result;
pub mod rules;
pub mod settings;
pub mod suppression;
pub mod surface;
pub mod symbols;
pub mod visitor;

pub use collector::DifferenceVisitor;
pub use config::{
    ApiCompatConfig, ConfigLoader, DiffingSettings, IgnoredDifference, InputsConfiguration,
};
pub use difference::{CompatDifference, DifferenceType, diagnostic_ids};
pub use error::{ApiCompatError, ErrorKind};
pub use mapper::{
    AssemblyMapper, AssemblySetMapper, ElementMapper, MapperNode, NamespaceMapper, Side,
    TypeMapper,
};
pub use result::{Result, ResultExt};
pub use rules::{PairKind, Rule, RuleEngine, RuleMetadata};
pub use settings::{AccessibilityFilter, MapperSettings, RuleSettings, SymbolFilter};
pub use suppression::DifferenceBag;
pub use surface::SurfaceLoader;
pub use symbols::{
    Accessibility, AccessorKind, AccessorSymbol, ApiMember, AssemblyIdentity, AssemblySymbol,
    MemberKind, MemberSymbol, NamespaceSymbol, Parameter, SymbolKey, TypeKind, TypeRef,
    TypeSymbol,
};
pub use visitor::MapperVisitor;

/// Initialize the tracing subscriber for logging
///
/// Honors `RUST_LOG`, defaulting to `apicompat=info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("apicompat=info"));
    install_subscriber(filter);
}

/// Initialize tracing with an explicit filter directive, e.g. `apicompat=debug`
pub fn init_tracing_with(directive: &str) {
    install_subscriber(tracing_subscriber::EnvFilter::new(directive));
}

fn install_subscriber(filter: tracing_subscriber::EnvFilter) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
