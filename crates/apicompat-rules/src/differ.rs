//! Entry point for comparing two API surfaces

use crate::engine::RuleDriver;
use apicompat_core::{
    AssemblySetMapper, AssemblySymbol, CompatDifference, DifferenceBag, DifferenceVisitor,
    DiffingSettings, IgnoredDifference, MapperNode, MapperVisitor, Result, RuleEngine, Side,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Compares a contract (left) with an implementation (right)
///
/// Builds the mapper tree, runs the rule engine over it and filters the
/// result through the configured suppressions. Every call is an independent
/// run; nothing is cached between calls.
#[derive(Default)]
pub struct ApiDiffer {
    settings: DiffingSettings,
    engine: Option<Box<dyn RuleEngine + Send + Sync>>,
}

impl ApiDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: DiffingSettings) -> Self {
        Self {
            settings,
            engine: None,
        }
    }

    pub fn with_include_internal_symbols(include_internal_symbols: bool) -> Self {
        Self::with_settings(DiffingSettings {
            include_internal_symbols,
            ..DiffingSettings::default()
        })
    }

    /// Replace the built-in rule driver
    pub fn with_engine(mut self, engine: Box<dyn RuleEngine + Send + Sync>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Globally suppressed ids, separated by `;` or `,`
    pub fn with_no_warn(mut self, no_warn: impl Into<String>) -> Self {
        self.settings.no_warn = no_warn.into();
        self
    }

    pub fn with_ignored_differences<I>(mut self, ignored: I) -> Self
    where
        I: IntoIterator<Item = IgnoredDifference>,
    {
        self.settings.ignored_differences = ignored.into_iter().collect();
        self
    }

    pub fn settings(&self) -> &DiffingSettings {
        &self.settings
    }

    /// Ordered differences between `left` and `right`
    pub fn get_differences(
        &self,
        left: &[Arc<AssemblySymbol>],
        right: &[Arc<AssemblySymbol>],
    ) -> Result<Vec<CompatDifference>> {
        Ok(self.get_difference_bag(left, right)?.into_differences())
    }

    /// Like [`get_differences`](Self::get_differences), keeping suppression counts
    pub fn get_difference_bag(
        &self,
        left: &[Arc<AssemblySymbol>],
        right: &[Arc<AssemblySymbol>],
    ) -> Result<DifferenceBag> {
        let mut mapper = AssemblySetMapper::new(self.settings.mapper_settings());
        mapper.add_element(left.iter().cloned(), Side::Left);
        mapper.add_element(right.iter().cloned(), Side::Right);
        debug!("Mapped {} assemblies", mapper.len());

        let default_engine;
        let engine: &dyn RuleEngine = match &self.engine {
            Some(engine) => &**engine,
            None => {
                default_engine = RuleDriver::new(&self.settings.rule_settings());
                &default_engine
            }
        };

        let bag = DifferenceBag::new(&self.settings.no_warn, self.settings.ignored_pairs());
        let mut visitor = DifferenceVisitor::new(engine, bag);
        visitor.visit(MapperNode::AssemblySet(&mapper))?;

        let bag = visitor.into_bag();
        info!(
            "Found {} differences ({} suppressed)",
            bag.len(),
            bag.suppressed_count()
        );
        Ok(bag)
    }
}
