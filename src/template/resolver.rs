//! Template resolution - maps a requested template id and caption lines onto the catalog

use std::collections::HashSet;

use log::info;
use rand::seq::SliceRandom;
use serde::Deserialize;

use super::registry::{CatalogError, Template, TemplateCatalog};

/// Which templates a random fallback may choose from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPool {
    /// Every template in the catalog
    #[default]
    All,
    /// Only templates listed in [`FallbackPolicy::popular`]
    Popular,
}

/// Rule for choosing a substitute when the requested template is unknown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackPolicy {
    /// Always fall back to this id when set
    pub fixed_id: Option<String>,
    /// Pool used when no fixed id is configured
    pub pool: FallbackPool,
    /// Template ids making up the popular pool
    pub popular: Vec<String>,
}

impl FallbackPolicy {
    /// Create a policy that picks randomly over the whole catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Fall back to a fixed template id
    pub fn with_fixed_id(mut self, id: impl Into<String>) -> Self {
        self.fixed_id = Some(id.into());
        self
    }

    /// Set the random selection pool
    pub fn with_pool(mut self, pool: FallbackPool) -> Self {
        self.pool = pool;
        self
    }

    /// Set the ids of the popular pool
    pub fn with_popular<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.popular = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Chooses a fallback template from a non-empty pool
pub trait FallbackPicker {
    fn pick<'c>(&self, pool: &[&'c Template]) -> Option<&'c Template>;
}

/// Uniform random choice using the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl FallbackPicker for RandomPicker {
    fn pick<'c>(&self, pool: &[&'c Template]) -> Option<&'c Template> {
        pool.choose(&mut rand::thread_rng()).copied()
    }
}

/// A template id paired with caption lines that fit it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub template_id: String,
    /// Exactly as many entries as the template requires
    pub lines: Vec<String>,
    /// True when the requested id was not in the catalog
    pub fallback_used: bool,
}

/// Resolves requested templates against a catalog
#[derive(Debug, Clone, Default)]
pub struct Resolver<P = RandomPicker> {
    policy: FallbackPolicy,
    picker: P,
}

impl Resolver<RandomPicker> {
    /// Create a resolver using random fallback selection
    pub fn new(policy: FallbackPolicy) -> Self {
        Self::with_picker(policy, RandomPicker)
    }
}

impl<P: FallbackPicker> Resolver<P> {
    /// Create a resolver with a custom fallback picker
    pub fn with_picker(policy: FallbackPolicy, picker: P) -> Self {
        Self { policy, picker }
    }

    pub fn policy(&self) -> &FallbackPolicy {
        &self.policy
    }

    /// Resolve a requested template id and reconcile the lines to its slot count
    ///
    /// Unknown ids are not an error: the fallback policy picks a substitute.
    /// An empty catalog, or a policy that cannot select anything from it,
    /// fails with a [`CatalogError`].
    pub fn resolve(
        &self,
        requested_id: &str,
        lines: Vec<String>,
        catalog: &TemplateCatalog,
    ) -> Result<Resolution, CatalogError> {
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }

        let (template, fallback_used) = match catalog.get(requested_id) {
            Some(template) => (template, false),
            None => {
                let template = self.select_fallback(catalog)?;
                info!(
                    "template '{}' not found; using '{}' as fallback",
                    requested_id, template.id
                );
                (template, true)
            }
        };

        let required = template.required_line_count();
        if lines.len() != required {
            info!(
                "adjusting text lines from {} to {} for template '{}'",
                lines.len(),
                required,
                template.id
            );
        }

        Ok(Resolution {
            template_id: template.id.clone(),
            lines: reconcile_lines(lines, required),
            fallback_used,
        })
    }

    fn select_fallback<'c>(&self, catalog: &'c TemplateCatalog) -> Result<&'c Template, CatalogError> {
        if let Some(id) = &self.policy.fixed_id {
            return catalog
                .get(id)
                .ok_or_else(|| CatalogError::UnknownFallback { id: id.clone() });
        }

        let pool = fallback_pool(&self.policy, catalog);
        self.picker
            .pick(&pool)
            .ok_or_else(|| CatalogError::EmptyFallbackPool {
                ids: match self.policy.pool {
                    FallbackPool::All => catalog.ids().map(String::from).collect(),
                    FallbackPool::Popular => self.policy.popular.clone(),
                },
            })
    }
}

/// Collect the candidate templates for a random fallback
///
/// Each id appears once, as the entry a lookup by that id would return.
fn fallback_pool<'c>(policy: &FallbackPolicy, catalog: &'c TemplateCatalog) -> Vec<&'c Template> {
    let mut seen = HashSet::new();
    match policy.pool {
        FallbackPool::All => catalog
            .templates()
            .iter()
            .filter(|&t| seen.insert(t.id.as_str()))
            .collect(),
        FallbackPool::Popular => policy
            .popular
            .iter()
            .filter(|&id| seen.insert(id.as_str()))
            .filter_map(|id| catalog.get(id))
            .collect(),
    }
}

/// Pad with blank lines or drop trailing lines so exactly `required` remain
pub fn reconcile_lines(mut lines: Vec<String>, required: usize) -> Vec<String> {
    lines.resize(required, String::new());
    lines
}
