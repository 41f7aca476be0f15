/// Declarative framebuffer definitions.
///
/// A `FramebufferDefinition` describes how to build a framebuffer for a
/// given surface size. Definitions are plain immutable values: the registry
/// keeps them in a shared snapshot that is replaced as a whole on reload.
///
/// Sizes are expressed as [`Dimension`]s evaluated against a [`SizeContext`],
/// which exposes the current surface size as the named queries
/// `screen_width` and `screen_height`.

use serde::Deserialize;
use crate::error::{Error, Result};

/// Query name for the surface width
pub const QUERY_SCREEN_WIDTH: &str = "screen_width";

/// Query name for the surface height
pub const QUERY_SCREEN_HEIGHT: &str = "screen_height";

// ===== SIZE CONTEXT =====

/// Evaluation context handed to framebuffer builders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeContext {
    screen_width: u32,
    screen_height: u32,
}

impl SizeContext {
    /// Create a context for the given surface size
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self { screen_width, screen_height }
    }

    /// Surface width in pixels
    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    /// Surface height in pixels
    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// Look up a named query value
    ///
    /// Returns None for unknown query names.
    pub fn query(&self, name: &str) -> Option<f32> {
        match name {
            QUERY_SCREEN_WIDTH => Some(self.screen_width as f32),
            QUERY_SCREEN_HEIGHT => Some(self.screen_height as f32),
            _ => None,
        }
    }
}

// ===== DIMENSION =====

/// One axis of a framebuffer size policy
///
/// In JSON a dimension is either a number (`512`), a query name
/// (`"screen_width"`) or a scaled query (`{ "query": "screen_height", "scale": 0.5 }`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    /// Fixed size in pixels
    Fixed(u32),
    /// Value of a named query
    Query(String),
    /// Value of a named query multiplied by `scale`
    Scaled {
        /// Query name
        query: String,
        /// Multiplier applied to the query value
        scale: f32,
    },
}

impl Dimension {
    /// Evaluate against a size context, clamped to at least one pixel
    pub fn resolve(&self, context: &SizeContext) -> Result<u32> {
        let value = match self {
            Dimension::Fixed(pixels) => return Ok((*pixels).max(1)),
            Dimension::Query(query) => Self::query(context, query)?,
            Dimension::Scaled { query, scale } => {
                if !scale.is_finite() || *scale < 0.0 {
                    return Err(Error::InvalidDefinition(format!(
                        "scale for query '{}' must be a finite non-negative number, got {}",
                        query, scale
                    )));
                }
                Self::query(context, query)? * scale
            }
        };
        Ok((value.round() as u32).max(1))
    }

    fn query(context: &SizeContext, query: &str) -> Result<f32> {
        context.query(query).ok_or_else(|| {
            Error::InvalidDefinition(format!("unknown size query '{}'", query))
        })
    }
}

// ===== ATTACHMENTS =====

/// Abstract color attachment format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AttachmentFormat {
    /// 8-bit normalized RGBA
    #[default]
    #[serde(rename = "rgba8")]
    Rgba8,
    /// 16-bit float RGBA
    #[serde(rename = "rgba16f")]
    Rgba16Float,
    /// 32-bit float RGBA
    #[serde(rename = "rgba32f")]
    Rgba32Float,
    /// Single 32-bit float channel
    #[serde(rename = "r32f")]
    R32Float,
}

/// Color attachment description
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttachmentDefinition {
    /// Attachment format
    pub format: AttachmentFormat,
    /// Optional sampler name exposed to shaders
    pub name: Option<String>,
}

// ===== DEFINITION =====

/// Declarative description of a framebuffer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FramebufferDefinition {
    /// Width policy (default: `screen_width`)
    pub width: Dimension,
    /// Height policy (default: `screen_height`)
    pub height: Dimension,
    /// Color attachments (default: one `rgba8` attachment)
    pub color_attachments: Vec<AttachmentDefinition>,
    /// Whether a depth attachment is created
    pub depth: bool,
}

impl Default for FramebufferDefinition {
    fn default() -> Self {
        Self {
            width: Dimension::Query(QUERY_SCREEN_WIDTH.to_string()),
            height: Dimension::Query(QUERY_SCREEN_HEIGHT.to_string()),
            color_attachments: vec![AttachmentDefinition::default()],
            depth: false,
        }
    }
}

impl FramebufferDefinition {
    /// Full-screen definition with a single `rgba8` attachment
    pub fn screen_sized() -> Self {
        Self::default()
    }

    /// Fixed-size definition with a single `rgba8` attachment
    pub fn fixed(width: u32, height: u32) -> Self {
        Self {
            width: Dimension::Fixed(width),
            height: Dimension::Fixed(height),
            ..Self::default()
        }
    }

    /// Evaluate the size policy
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDefinition` for unknown queries or bad scales.
    pub fn resolve_size(&self, context: &SizeContext) -> Result<(u32, u32)> {
        Ok((self.width.resolve(context)?, self.height.resolve(context)?))
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
