#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// The maximum number of content measurements kept by the engine's measurement cache
    /// before it is reset.
    ///
    /// - **Higher values**: fewer calls into the measurer when the same strings reappear
    ///   across trees, at the cost of memory.
    /// - **Lower values**: less memory, more re-measuring.
    ///
    /// Defaults to `10000`.
    pub measure_cache_capacity: usize,

    /// Log a warning when a container's children do not fit on its main axis.
    ///
    /// Defaults to `true`.
    pub overflow_warnings: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            measure_cache_capacity: 10000,
            overflow_warnings: true,
        }
    }
}
