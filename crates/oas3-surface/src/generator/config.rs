use std::{collections::HashSet, fmt, sync::Arc};

use bon::Builder;

use crate::generator::operation_registry::OperationEntry;

/// Which component schemas become named types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaScope {
  /// Only schemas reachable from the selected operations.
  #[default]
  ReferencedOnly,
  /// Every component schema, referenced or not.
  All,
}

/// How operations are split into output units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientGrouping {
  /// One client per first tag, `Default` for untagged operations.
  #[default]
  ByTag,
  Single,
}

pub type OperationPredicate = Arc<dyn Fn(&OperationEntry<'_>) -> bool + Send + Sync>;

/// Filter for including or excluding operations from the model.
///
/// Inclusion and exclusion sets match stable operation ids before uniquing. Exclusion takes
/// precedence if an operation matches both. The predicate, when set, is consulted last.
#[derive(Clone, Default)]
pub struct OperationFilter {
  only: Option<HashSet<String>>,
  excluded: Option<HashSet<String>>,
  predicate: Option<OperationPredicate>,
}

impl fmt::Debug for OperationFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("OperationFilter")
      .field("only", &self.only)
      .field("excluded", &self.excluded)
      .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
      .finish()
  }
}

impl OperationFilter {
  #[must_use]
  pub fn new(only: Option<&HashSet<String>>, excluded: Option<&HashSet<String>>) -> Self {
    Self {
      only: only.cloned(),
      excluded: excluded.cloned(),
      predicate: None,
    }
  }

  #[must_use]
  pub fn with_predicate<F>(mut self, predicate: F) -> Self
  where
    F: Fn(&OperationEntry<'_>) -> bool + Send + Sync + 'static,
  {
    self.predicate = Some(Arc::new(predicate));
    self
  }

  /// Returns whether the given operation id passes the inclusion and exclusion sets.
  #[must_use]
  pub fn accepts_id<S>(&self, base_id: S) -> bool
  where
    S: AsRef<str>,
  {
    if let Some(ref included) = self.only
      && !included.contains(base_id.as_ref())
    {
      return false;
    }

    if let Some(ref excluded) = self.excluded
      && excluded.contains(base_id.as_ref())
    {
      return false;
    }

    true
  }

  #[must_use]
  pub fn accepts_entry(&self, entry: &OperationEntry<'_>) -> bool {
    self.predicate.as_ref().is_none_or(|predicate| predicate(entry))
  }
}

/// Engine configuration. Fixed once model construction starts.
#[derive(Debug, Clone, Default, Builder)]
pub struct ModelConfig {
  /// Qualifies every named type reference. Never interpreted by the engine.
  #[builder(into)]
  pub base_package: Option<String>,
  #[builder(default)]
  pub schema_scope: SchemaScope,
  #[builder(default)]
  pub grouping: ClientGrouping,
  #[builder(default)]
  pub filter: OperationFilter,
}

/// Pre-construction hook that adjusts the configuration.
pub type Customizer = Box<dyn Fn(&mut ModelConfig)>;

impl ModelConfig {
  /// Applies customizers in order and returns the final configuration.
  #[must_use]
  pub fn customized(mut self, customizers: &[Customizer]) -> Self {
    for customize in customizers {
      customize(&mut self);
    }
    self
  }
}
