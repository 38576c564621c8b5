//! Configuration for meme URL encoding

/// Public memegen image service
pub const MEMEGEN_API_BASE: &str = "https://api.memegen.link";

/// Image extension used when none is configured
pub const DEFAULT_FORMAT: &str = "png";

/// Where and in which format meme images are requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Image service base URL, without the `/images` suffix
    pub base_url: String,

    /// Image file extension (png, jpg, gif, webp)
    pub format: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            base_url: MEMEGEN_API_BASE.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl EncoderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image service base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the image format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Encode caption lines with this configuration
    pub fn encode<S: AsRef<str>>(&self, template_id: &str, lines: &[S]) -> String {
        super::encode_with_base(&self.base_url, template_id, lines, &self.format)
    }
}
