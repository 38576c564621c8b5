//! Meme template catalog and resolution
//!
//! A [`TemplateCatalog`] is loaded once (from the bundled data file or a
//! memegen-style `templates.json`) and shared read-only. A [`Resolver`] maps a
//! requested template id onto it, substituting a fallback template when the id
//! is unknown, and reconciles caption lines to the template's slot count.
//!
//! # Example
//!
//! ```rust
//! use meme_mint::template::{FallbackPolicy, Resolver, Template, TemplateCatalog};
//!
//! let catalog = TemplateCatalog::new(vec![Template::new("doge", "Doge", 2)]);
//! let resolver = Resolver::new(FallbackPolicy::new());
//!
//! let res = resolver.resolve("unknown", vec!["hi".to_string()], &catalog).unwrap();
//! assert_eq!(res.template_id, "doge");
//! assert_eq!(res.lines, vec!["hi".to_string(), String::new()]);
//! ```

mod registry;
mod resolver;

pub use registry::{CatalogError, Template, TemplateCatalog, TemplateExample, DEFAULT_LINE_COUNT};
pub use resolver::{
    reconcile_lines, FallbackPicker, FallbackPolicy, FallbackPool, RandomPicker, Resolution,
    Resolver,
};
