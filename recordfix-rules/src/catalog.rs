use crate::builtin::{DoubleRule, IntegerRule, RequiredRule, UrlRule};
use crate::rule::{FixResult, FnRule, Rule, RuleMeta};
use recordfix_types::{reserved, Record};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No rule is registered under this name. Surfaces declaration bugs.
    #[error("unknown rule '{rule}'")]
    UnknownRule { rule: String },

    /// The name belongs to a structural pseudo-rule the engine resolves itself.
    #[error("rule name '{rule}' is reserved")]
    Reserved { rule: String },
}

/// Registry of named rules.
///
/// `exists` is never stored: the engine resolves it against the record shape and the catalog only
/// answers [`FixResult::NotApplicable`] for it.
pub struct RuleCatalog {
    rules: BTreeMap<String, Box<dyn Rule>>,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RuleCatalog {
    /// A catalog with no rules besides the structural `exists`.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// `integer`, `double`, `url` and `required`.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for rule in builtin_rules() {
            catalog.rules.insert(rule.meta().name, rule);
        }
        catalog
    }

    /// Register `rule` under its meta name, replacing any rule already using it.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<(), CatalogError> {
        let name = rule.meta().name;
        if name == reserved::EXISTS {
            return Err(CatalogError::Reserved { rule: name });
        }
        if self.rules.insert(name.clone(), rule).is_some() {
            debug!(rule = %name, "replaced registered rule");
        }
        Ok(())
    }

    /// Register a closure as a rule.
    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        f: F,
    ) -> Result<(), CatalogError>
    where
        F: Fn(&Record) -> FixResult + Send + Sync + 'static,
    {
        self.register(Box::new(FnRule::new(name, description, f)))
    }

    /// True for registered rules and the structural `exists`.
    pub fn contains(&self, name: &str) -> bool {
        name == reserved::EXISTS || self.rules.contains_key(name)
    }

    /// Fails with [`CatalogError::UnknownRule`] unless [`contains`](Self::contains) holds.
    pub fn ensure_known(&self, name: &str) -> Result<(), CatalogError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(CatalogError::UnknownRule {
                rule: name.to_string(),
            })
        }
    }

    pub fn apply(&self, name: &str, value: &Record) -> Result<FixResult, CatalogError> {
        if name == reserved::EXISTS {
            return Ok(FixResult::NotApplicable);
        }
        let rule = self
            .rules
            .get(name)
            .ok_or_else(|| CatalogError::UnknownRule {
                rule: name.to_string(),
            })?;
        Ok(rule.apply(value))
    }

    /// Every rule, `exists` included, sorted by name.
    pub fn metas(&self) -> Vec<RuleMeta> {
        let mut out: Vec<RuleMeta> = self.rules.values().map(|r| r.meta()).collect();
        out.push(exists_meta());
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    pub fn names(&self) -> Vec<String> {
        self.metas().into_iter().map(|m| m.name).collect()
    }
}

fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(IntegerRule),
        Box::new(DoubleRule),
        Box::new(UrlRule),
        Box::new(RequiredRule),
    ]
}

fn exists_meta() -> RuleMeta {
    RuleMeta {
        name: reserved::EXISTS.to_string(),
        description: "Creates the field (and missing parents) with null when absent; never alters present values"
            .to_string(),
        structural: true,
    }
}
