use crate::perf::Profiler;
use boxpack_style::Font;
use boxpack_traits::{ContentMeasurer, MeasureError};
use boxpack_types::Size;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct MeasureCacheKey {
    pub text: String,
    pub font: Font,
    /// Wrap width as raw bits; `None` for unwrapped measurement.
    pub wrap_width: Option<u32>,
}

/// Memoizes content measurements across layout passes.
///
/// Owned by a [`LayoutEngine`](crate::LayoutEngine); lives as long as the engine and is
/// dropped or cleared with it. Not shared between threads.
#[derive(Debug)]
pub struct MeasureCache {
    entries: RefCell<HashMap<MeasureCacheKey, Size>>,
    capacity: usize,
}

impl MeasureCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            capacity,
        }
    }

    /// Returns the cached size for `text` in `font`, measuring on a miss.
    pub fn get_or_measure(
        &self,
        measurer: &dyn ContentMeasurer,
        text: &str,
        font: &Font,
        wrap_width: Option<f32>,
        profiler: &dyn Profiler,
    ) -> Result<Size, MeasureError> {
        let key = MeasureCacheKey {
            text: text.to_string(),
            font: font.clone(),
            wrap_width: wrap_width.map(f32::to_bits),
        };
        if let Some(size) = self.entries.borrow().get(&key) {
            profiler.count_hit();
            return Ok(*size);
        }
        profiler.count_miss();
        let size = measurer.measure(text, font, wrap_width)?;

        let mut entries = self.entries.borrow_mut();
        if entries.len() >= self.capacity {
            log::debug!("measure cache reached {} entries; resetting", entries.len());
            entries.clear();
        }
        entries.insert(key, size);
        Ok(size)
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
