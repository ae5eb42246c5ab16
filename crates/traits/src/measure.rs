//! ContentMeasurer trait for abstracting text measurement.
//!
//! Layout never measures content itself. A measurer supplied by the host (a native text
//! layer, a font rasterizer, or the in-memory implementation below) reports how much room a
//! piece of content needs in a given font.

use boxpack_style::font::{Font, FontWeight, SYSTEM};
use boxpack_types::Size;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for measurement operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("Font not available: {0}")]
    UnknownFont(String),

    #[error("Failed to measure content: {0}")]
    Failed(String),
}

/// A trait for measuring the natural size of content.
///
/// # Example
///
/// ```ignore
/// let measurer = InMemoryMeasurer::new();
/// measurer.add_family("serif", 0.5)?;
/// let size = measurer.measure("Hello", &Font::new("serif", 12), None)?;
/// ```
pub trait ContentMeasurer: Send + Sync + Debug {
    /// Measure `content` set in `font`.
    ///
    /// With `wrap_width`, content is broken into lines no wider than that width where
    /// possible. The result is in device pixels.
    fn measure(
        &self,
        content: &str,
        font: &Font,
        wrap_width: Option<f32>,
    ) -> Result<Size, MeasureError>;

    /// Returns a human-readable name for this measurer (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Point size used when a font asks for the system default.
pub const DEFAULT_POINT_SIZE: f32 = 12.0;

/// Line height as a multiple of the point size.
const LINE_HEIGHT: f32 = 1.25;

/// A fixed-advance measurer backed by a table of font families.
///
/// Every glyph of a family has the same advance, given as a fraction of the point size. The
/// `system` family is always available.
#[derive(Debug)]
pub struct InMemoryMeasurer {
    families: RwLock<HashMap<String, f32>>,
}

impl Default for InMemoryMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMeasurer {
    pub fn new() -> Self {
        let mut families = HashMap::new();
        families.insert(SYSTEM.to_string(), 0.5);
        Self {
            families: RwLock::new(families),
        }
    }

    /// Register a family with a glyph advance expressed in ems.
    ///
    /// # Errors
    ///
    /// Returns `MeasureError::Failed` if the internal lock is poisoned.
    pub fn add_family(&self, family: impl Into<String>, advance_em: f32) -> Result<(), MeasureError> {
        let mut families = self
            .families
            .write()
            .map_err(|_| MeasureError::Failed("family table lock poisoned".to_string()))?;
        families.insert(family.into().to_lowercase(), advance_em);
        Ok(())
    }

    /// Number of registered families, `system` included. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.families.read().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The advance of the first family in the list that is registered.
    fn advance_em(&self, font: &Font) -> Result<f32, MeasureError> {
        let families = self
            .families
            .read()
            .map_err(|_| MeasureError::Failed("family table lock poisoned".to_string()))?;
        font.family
            .iter()
            .find_map(|name| families.get(&name.to_lowercase()).copied())
            .ok_or_else(|| MeasureError::UnknownFont(font.family.join(", ")))
    }
}

impl ContentMeasurer for InMemoryMeasurer {
    fn measure(
        &self,
        content: &str,
        font: &Font,
        wrap_width: Option<f32>,
    ) -> Result<Size, MeasureError> {
        let points = if font.is_system_size() {
            DEFAULT_POINT_SIZE
        } else {
            font.size as f32
        };
        let mut advance = self.advance_em(font)? * points;
        if font.weight == FontWeight::Bold {
            advance *= 1.1;
        }
        let line_height = (points * LINE_HEIGHT).ceil();

        let max_chars = wrap_width
            .filter(|w| *w > 0.0 && advance > 0.0)
            .map(|w| ((w / advance).floor() as usize).max(1));
        let lines = layout_lines(content, max_chars);
        let widest = lines.iter().copied().max().unwrap_or(0);

        Ok(Size::new(
            (widest as f32 * advance).ceil(),
            lines.len() as f32 * line_height,
        ))
    }

    fn name(&self) -> &'static str {
        "InMemoryMeasurer"
    }
}

/// Breaks content into lines and returns each line's length in characters.
///
/// Explicit newlines always break. With a limit, words are packed greedily; a word longer
/// than the limit gets a line of its own.
fn layout_lines(content: &str, max_chars: Option<usize>) -> Vec<usize> {
    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        let Some(limit) = max_chars else {
            lines.push(paragraph.chars().count());
            continue;
        };
        let mut current = 0usize;
        for word in paragraph.split_whitespace() {
            let len = word.chars().count();
            if current == 0 {
                current = len;
            } else if current + 1 + len <= limit {
                current += 1 + len;
            } else {
                lines.push(current);
                current = len;
            }
        }
        lines.push(current);
    }
    lines
}
