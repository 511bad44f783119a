//! Rule harness: runs every resource rule once per discovered resource class.
//!
//! Rules implement [`ResourceRule`] and report through the
//! [`Evaluation::assert`] primitive. A failed assertion becomes a
//! [`Diagnostic`] unless the [`LintConfig`] filters it out. Rules never abort
//! the run; only a malformed resource class (see [`ResourceIdentity::build`])
//! does.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::classifier::{CfnResourceClassifier, ResourceClassifier};
use crate::config::LintConfig;
use crate::diagnostics::{Diagnostic, Severity};
use crate::errors::Result;
use crate::reflect::Reflection;
use crate::resource::{find_all, ResourceIdentity, ResourceIndexCache};
use crate::rules;
use crate::wrapper::{ResourceTagDiscovery, Wrapper, WrapperDiscovery};

/// Static metadata for a rule.
#[derive(Debug)]
pub struct RuleMeta {
    /// Rule name, e.g. `"resource-class"`.
    pub name: &'static str,
    /// Stable code, e.g. `"L001"`.
    pub code: &'static str,
    /// Message reported when the rule's assertion fails.
    pub message: &'static str,
    /// Fix appended to the message; `{scope}` is replaced by the failing scope.
    pub suggestion: Option<&'static str>,
    /// Severity when no config override is set.
    pub default_severity: Severity,
}

/// What a rule sees for one resource class.
pub struct ResourceContext<'a> {
    pub resource: &'a ResourceIdentity,
    /// Wrappers declared by the assembly that owns `resource`.
    pub wrappers: &'a [Wrapper],
}

/// Collects the diagnostics of one rule run.
pub struct Evaluation<'a> {
    meta: &'static RuleMeta,
    severity: Severity,
    config: &'a LintConfig,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Evaluation<'a> {
    fn new(meta: &'static RuleMeta, severity: Severity, config: &'a LintConfig) -> Self {
        Self {
            meta,
            severity,
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Report the rule's message at `scope` unless `condition` holds.
    /// Returns `condition`.
    pub fn assert(&mut self, condition: bool, scope: &str) -> bool {
        if condition {
            return true;
        }
        let meta = self.meta;
        let diag = match meta.suggestion {
            Some(template) => {
                let fix = template.replace("{scope}", scope);
                let message = format!("{}, {fix}", meta.message);
                Diagnostic::new(self.severity, meta.code, meta.name, scope, message)
                    .with_suggestion(fix)
            }
            None => Diagnostic::new(self.severity, meta.code, meta.name, scope, meta.message),
        };
        if self.config.accepts(&diag.key()) {
            self.diagnostics.push(diag);
        } else {
            trace!(key = %diag.key(), "diagnostic excluded by config");
        }
        false
    }

    fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// A check evaluated once per resource class.
pub trait ResourceRule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    fn eval(&self, ctx: &ResourceContext<'_>, e: &mut Evaluation<'_>);
}

/// Result of linting one assembly.
#[derive(Debug, Serialize)]
pub struct LintReport {
    pub assembly: String,
    /// Number of resource classes evaluated.
    pub resources: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }
}

/// The linter: rules, configuration, and the collaborators they depend on.
pub struct Linter {
    rules: Vec<Box<dyn ResourceRule>>,
    config: LintConfig,
    classifier: Box<dyn ResourceClassifier>,
    discovery: Box<dyn WrapperDiscovery>,
    cache: Arc<ResourceIndexCache>,
}

impl Linter {
    /// All rules, default config, marker-base classifier, `@resource` wrapper discovery.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LintConfig::new())
    }

    #[must_use]
    pub fn with_config(config: LintConfig) -> Self {
        Self {
            rules: rules::all_rules(),
            config,
            classifier: Box::new(CfnResourceClassifier::default()),
            discovery: Box::new(ResourceTagDiscovery),
            cache: Arc::new(ResourceIndexCache::new()),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl ResourceClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    #[must_use]
    pub fn with_discovery(mut self, discovery: impl WrapperDiscovery + 'static) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    /// Share an index cache with other components.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ResourceIndexCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Resource classes visible from `assembly`.
    pub fn resources(&self, ts: &dyn Reflection, assembly: &str) -> Result<Vec<ResourceIdentity>> {
        find_all(ts, assembly, self.classifier.as_ref())
    }

    /// Case-insensitive lookup of a resource by identifier.
    pub fn find_resource(
        &self,
        ts: &dyn Reflection,
        full_name: &str,
    ) -> Result<Option<ResourceIdentity>> {
        self.cache.find_by_name(ts, full_name)
    }

    /// Run every enabled rule against every resource class of `assembly`.
    ///
    /// Resources pulled in from dependencies are matched against the wrappers
    /// of the assembly that declares them.
    pub fn lint_assembly(&self, ts: &dyn Reflection, assembly: &str) -> Result<LintReport> {
        let resources = self.resources(ts, assembly)?;
        let mut wrappers: HashMap<&str, Vec<Wrapper>> = HashMap::new();
        for resource in &resources {
            let owner = resource.assembly.as_str();
            wrappers
                .entry(owner)
                .or_insert_with(|| self.discovery.wrappers(ts, owner));
        }
        debug!(
            assembly,
            resources = resources.len(),
            owners = wrappers.len(),
            "linting assembly"
        );

        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            let meta = rule.meta();
            let Some(severity) = self
                .config
                .effective_severity(meta.name, meta.default_severity)
            else {
                debug!(rule = meta.name, "rule disabled");
                continue;
            };
            for resource in &resources {
                trace!(rule = meta.name, resource = %resource.full_name, "evaluating");
                let ctx = ResourceContext {
                    resource,
                    wrappers: wrappers
                        .get(resource.assembly.as_str())
                        .map_or(&[][..], Vec::as_slice),
                };
                let mut e = Evaluation::new(meta, severity, &self.config);
                rule.eval(&ctx, &mut e);
                diagnostics.extend(e.into_diagnostics());
            }
        }

        Ok(LintReport {
            assembly: assembly.to_string(),
            resources: resources.len(),
            diagnostics,
        })
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
