use crate::algorithms::{natural, pack};
use crate::applicator::{Applicator, apply_layout};
use crate::cache::MeasureCache;
use crate::config::LayoutConfig;
use crate::intrinsic::Intrinsic;
use crate::node::NodeId;
use crate::perf::{DebugProfiler, NoOpProfiler, Profiler};
use crate::tree::LayoutTree;
use crate::LayoutError;
use boxpack_traits::ContentMeasurer;
use boxpack_types::Viewport;
use std::time::Instant;

/// Runs layout passes over [`LayoutTree`]s.
///
/// The engine holds no per-tree state; one engine can lay out any number of trees. It owns
/// the content measurement cache, which is why it is not shared between threads.
pub struct LayoutEngine {
    pub cache: MeasureCache,
    pub profiler: Box<dyn Profiler>,
    config: LayoutConfig,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        // Simple strategy: use DebugProfiler if feature enabled, else NoOp
        let profiler: Box<dyn Profiler> = if cfg!(feature = "profiling") {
            Box::new(DebugProfiler::new())
        } else {
            Box::new(NoOpProfiler)
        };
        Self::with_profiler(config, profiler)
    }

    pub fn with_profiler(config: LayoutConfig, profiler: Box<dyn Profiler>) -> Self {
        Self {
            cache: MeasureCache::new(config.measure_cache_capacity),
            profiler,
            config,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn reset_stats(&self) {
        self.profiler.reset();
    }

    /// Lays out the whole tree containing `node` against `viewport`.
    ///
    /// Layout always starts at the root, whichever node is passed. Afterwards every node
    /// of the tree has a fresh [`LayoutBox`](crate::LayoutBox) and the tree is clean.
    pub fn layout(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        viewport: &Viewport,
    ) -> Result<(), LayoutError> {
        let root = tree.root_of(node)?;
        let start = Instant::now();

        let sizes = natural::compute(tree, root, viewport);
        self.profiler.record("LayoutEngine::natural", start.elapsed());

        let pack_start = Instant::now();
        pack::layout_root(tree, root, viewport, &sizes, &self.config);
        self.profiler.record("LayoutEngine::pack", pack_start.elapsed());

        tree.mark_clean(root);
        self.profiler.record_pass(sizes.len(), start.elapsed());
        log::debug!(
            "laid out {} nodes under {:?} at {}x{} ({} dpi) in {:?}",
            sizes.len(),
            root,
            viewport.width,
            viewport.height,
            viewport.dpi,
            start.elapsed()
        );
        Ok(())
    }

    /// Lays out the tree containing `node` only if something changed since the last pass.
    ///
    /// Returns whether a pass ran.
    pub fn layout_if_dirty(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        viewport: &Viewport,
    ) -> Result<bool, LayoutError> {
        if !tree.is_dirty(node)? {
            return Ok(false);
        }
        self.layout(tree, node, viewport)?;
        Ok(true)
    }

    /// Measures the text content of every node under `node` and stores the result as its
    /// intrinsic size: at least the measured width, exactly the measured height.
    ///
    /// Content that cannot be measured is logged and treated as empty. Returns how many
    /// nodes changed intrinsic size, each of which dirtied its tree.
    pub fn measure_content(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        measurer: &dyn ContentMeasurer,
    ) -> Result<usize, LayoutError> {
        let start = Instant::now();
        let mut changed = 0;
        for id in tree.descendants(node)? {
            let measured = {
                let target = tree.node(id)?;
                let Some(text) = target.content() else {
                    continue;
                };
                let font = target.style().font();
                match self
                    .cache
                    .get_or_measure(measurer, text, &font, None, &*self.profiler)
                {
                    Ok(size) => size,
                    Err(e) => {
                        log::warn!(
                            "{} could not measure content of {:?}: {}",
                            measurer.name(),
                            id,
                            e
                        );
                        boxpack_types::Size::zero()
                    }
                }
            };
            let width = tree.set_intrinsic_width(id, Some(Intrinsic::at_least(measured.width)))?;
            let height = tree.set_intrinsic_height(id, Some(Intrinsic::Exact(measured.height)))?;
            if width || height {
                changed += 1;
            }
        }
        self.profiler.record("LayoutEngine::measure_content", start.elapsed());
        Ok(changed)
    }

    /// Lays out the tree containing `node` and hands every box to `applicator`.
    ///
    /// This is what a host runs in response to the tree's refresh hook. Returns the number of
    /// boxes applied.
    pub fn refresh(
        &self,
        tree: &mut LayoutTree,
        node: NodeId,
        viewport: &Viewport,
        applicator: &mut dyn Applicator,
    ) -> Result<usize, LayoutError> {
        let root = tree.root_of(node)?;
        self.layout(tree, root, viewport)?;
        let start = Instant::now();
        let applied = apply_layout(tree, root, applicator)?;
        self.profiler.record("LayoutEngine::apply", start.elapsed());
        Ok(applied)
    }
}
