//! Meme Mint - meme image URLs and NFT minting glue
//!
//! This library resolves an agent's template choice against a meme template
//! catalog, builds the memegen image URL for the captions, and validates the
//! result before it is minted as an NFT `tokenURI`.
//!
//! # Example
//!
//! ```rust
//! use meme_mint::{generate_meme, GeneratorConfig, TemplateCatalog};
//!
//! let catalog = TemplateCatalog::bundled().unwrap();
//! let meme = generate_meme(
//!     &catalog,
//!     "drake",
//!     vec!["Code works".to_string(), "Code breaks?".to_string()],
//!     &GeneratorConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     meme.meme_url,
//!     "https://api.memegen.link/images/drake/Code_works/Code_breaks~q.png"
//! );
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod extract;
pub mod mint;
pub mod prompt;
pub mod template;

pub use config::{ConfigError, GeneratorConfig};
pub use encoder::{encode, encode_with_base, repair_double_slashes, EncoderConfig};
pub use error::MemeError;
pub use extract::MemeUrlExtractor;
pub use mint::{mint_meme, Address, MintError, MintReceipt, MintRequest, Minter};
pub use template::{
    CatalogError, FallbackPicker, FallbackPolicy, FallbackPool, RandomPicker, Resolver, Template,
    TemplateCatalog,
};

use log::debug;
use serde::Serialize;

/// Result of generating a meme, as reported back to the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMeme {
    pub meme_url: String,
    /// Template actually used, which differs from the request on fallback
    pub template_id: String,
    pub text_lines: Vec<String>,
    #[serde(skip)]
    pub fallback_used: bool,
}

/// Resolve a template choice and build its image URL with random fallback
pub fn generate_meme(
    catalog: &TemplateCatalog,
    template_id: &str,
    text_lines: Vec<String>,
    config: &GeneratorConfig,
) -> Result<GeneratedMeme, MemeError> {
    generate_meme_with_picker(catalog, template_id, text_lines, config, RandomPicker)
}

/// Resolve a template choice and build its image URL
pub fn generate_meme_with_picker<P: FallbackPicker>(
    catalog: &TemplateCatalog,
    template_id: &str,
    text_lines: Vec<String>,
    config: &GeneratorConfig,
    picker: P,
) -> Result<GeneratedMeme, MemeError> {
    let resolver = Resolver::with_picker(config.fallback.clone(), picker);
    generate_with(&resolver, catalog, &config.encoder, template_id, text_lines)
}

fn generate_with<P: FallbackPicker>(
    resolver: &Resolver<P>,
    catalog: &TemplateCatalog,
    encoder: &EncoderConfig,
    template_id: &str,
    text_lines: Vec<String>,
) -> Result<GeneratedMeme, MemeError> {
    let resolution = resolver.resolve(template_id, text_lines, catalog)?;
    let meme_url = encoder.encode(&resolution.template_id, &resolution.lines);
    debug!("generated meme URL: {}", meme_url);

    Ok(GeneratedMeme {
        meme_url,
        template_id: resolution.template_id,
        text_lines: resolution.lines,
        fallback_used: resolution.fallback_used,
    })
}

/// Catalog and configuration built once at startup and shared by every request
#[derive(Debug, Clone)]
pub struct MemeGenerator<P = RandomPicker> {
    catalog: TemplateCatalog,
    config: GeneratorConfig,
    resolver: Resolver<P>,
}

impl MemeGenerator<RandomPicker> {
    /// Create a generator with random fallback selection
    pub fn new(catalog: TemplateCatalog, config: GeneratorConfig) -> Result<Self, MemeError> {
        Self::with_picker(catalog, config, RandomPicker)
    }
}

impl<P: FallbackPicker> MemeGenerator<P> {
    /// Create a generator with a custom fallback picker
    ///
    /// Fails if the catalog is empty, the configuration is invalid, or the
    /// fallback policy names nothing in the catalog.
    pub fn with_picker(
        catalog: TemplateCatalog,
        config: GeneratorConfig,
        picker: P,
    ) -> Result<Self, MemeError> {
        if catalog.is_empty() {
            return Err(CatalogError::Empty.into());
        }
        config.validate()?;

        let fallback = &config.fallback;
        match &fallback.fixed_id {
            Some(id) if !catalog.contains(id) => {
                return Err(CatalogError::UnknownFallback { id: id.clone() }.into());
            }
            Some(_) => {}
            None => {
                if fallback.pool == FallbackPool::Popular
                    && !fallback.popular.iter().any(|id| catalog.contains(id))
                {
                    return Err(CatalogError::EmptyFallbackPool {
                        ids: fallback.popular.clone(),
                    }
                    .into());
                }
            }
        }

        let resolver = Resolver::with_picker(config.fallback.clone(), picker);
        Ok(Self {
            catalog,
            config,
            resolver,
        })
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolve a template choice and build its image URL
    pub fn generate(
        &self,
        template_id: &str,
        text_lines: Vec<String>,
    ) -> Result<GeneratedMeme, MemeError> {
        generate_with(
            &self.resolver,
            &self.catalog,
            &self.config.encoder,
            template_id,
            text_lines,
        )
    }

    /// Template listing for the agent prompt
    pub fn describe_templates(&self) -> Vec<String> {
        prompt::describe_templates(&self.catalog)
    }

    /// Mint a generated meme URL through the given collaborator
    pub fn mint<M: Minter + ?Sized>(
        &self,
        minter: &M,
        meme_url: &str,
        to: &Address,
    ) -> Result<MintReceipt, MemeError> {
        Ok(mint_meme(minter, meme_url, to, &self.config.encoder.base_url)?)
    }

    /// Find an image service URL in agent output
    pub fn extract_meme_url(&self, text: &str) -> Option<String> {
        MemeUrlExtractor::new(&self.config.encoder.base_url)
            .ok()
            .and_then(|extractor| extractor.extract(text))
    }
}
