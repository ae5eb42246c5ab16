//! Arena-backed node tree.
//!
//! Every structural mutation validates first and only then rewrites parent, child and root
//! handles, so a failed call leaves the tree exactly as it was. Mutations never lay anything
//! out; they mark the owning root dirty and, on the clean to dirty transition, call the
//! refresh hook.

use crate::intrinsic::{Intrinsic, IntrinsicSize};
use crate::layout_box::LayoutBox;
use crate::node::{Node, NodeId};
use crate::{LayoutError, TreeError};
use boxpack_style::{Style, StyleError};
use slotmap::SlotMap;
use std::collections::HashSet;
use std::fmt;

type RefreshHook = Box<dyn FnMut(NodeId)>;

pub struct LayoutTree {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Roots whose boxes are stale.
    dirty: HashSet<NodeId>,
    on_refresh: Option<RefreshHook>,
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutTree")
            .field("nodes", &self.nodes.len())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            dirty: HashSet::new(),
            on_refresh: None,
        }
    }

    // --- Construction ---

    /// Creates a detached node that can hold children.
    pub fn create_node(&mut self, style: Style) -> NodeId {
        self.insert_node(Node::new(style, true))
    }

    /// Creates a detached node that can never hold children.
    pub fn create_leaf(&mut self, style: Style) -> NodeId {
        self.insert_node(Node::new(style, false))
    }

    /// Creates a container and adopts `children` in order.
    pub fn create_with_children(
        &mut self,
        style: Style,
        children: &[NodeId],
    ) -> Result<NodeId, TreeError> {
        for child in children {
            self.node(*child)?;
        }
        let id = self.create_node(style);
        for child in children {
            self.add(id, *child)?;
        }
        Ok(id)
    }

    fn insert_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.insert(node);
        // A new root has never been laid out.
        self.dirty.insert(id);
        id
    }

    // --- Queries ---

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id).ok_or(TreeError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::NodeNotFound(id))
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], TreeError> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(id)?.parent)
    }

    /// The stored root handle: `None` when `id` is itself a root.
    pub fn root(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(id)?.root)
    }

    /// The root of the tree containing `id`, which may be `id` itself.
    pub fn root_of(&self, id: NodeId) -> Result<NodeId, TreeError> {
        Ok(self.node(id)?.root.unwrap_or(id))
    }

    pub fn can_have_children(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.node(id)?.can_have_children())
    }

    pub fn style(&self, id: NodeId) -> Result<&Style, TreeError> {
        Ok(&self.node(id)?.style)
    }

    pub fn intrinsic(&self, id: NodeId) -> Result<&IntrinsicSize, TreeError> {
        Ok(&self.node(id)?.intrinsic)
    }

    pub fn layout(&self, id: NodeId) -> Result<&LayoutBox, TreeError> {
        Ok(&self.node(id)?.layout)
    }

    /// `id` and everything below it, parents before children, in document order.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        self.node(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(node) = self.nodes.get(next) {
                stack.extend(node.children().iter().rev());
            }
        }
        Ok(out)
    }

    // --- Structure ---

    /// Appends `child` to `parent`, detaching it from any previous parent.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let end = self.children(parent)?.len();
        self.attach(parent, end, child, "add")
    }

    /// Inserts `child` at `index` (clamped to the child count).
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<(), TreeError> {
        self.attach(parent, index, child, "insert")
    }

    fn attach(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
        operation: &'static str,
    ) -> Result<(), TreeError> {
        if !self.node(parent)?.can_have_children() {
            return Err(TreeError::CannotHaveChildren { operation });
        }
        let previous_parent = self.node(child)?.parent;
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }

        let new_root = self.root_of(parent)?;
        if let Some(old_parent) = previous_parent {
            let old_root = self.root_of(old_parent)?;
            self.detach(old_parent, child);
            if old_root != new_root {
                self.mark_root_dirty(old_root);
            }
        }

        if let Some(siblings) = self.nodes[parent].children.as_mut() {
            let index = index.min(siblings.len());
            siblings.insert(index, child);
        }
        self.nodes[child].parent = Some(parent);
        self.dirty.remove(&child);
        self.set_subtree_root(child, Some(new_root));
        self.mark_root_dirty(new_root);
        Ok(())
    }

    /// Detaches `child` from `parent`; the child becomes the root of its own tree.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.take_child(parent, child)?;
        self.mark_root_dirty(child);
        Ok(())
    }

    /// Unlinks `child` and dirties the tree it left, but not the detached subtree.
    fn take_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let Some(children) = self.node(parent)?.children.as_ref() else {
            return Err(TreeError::CannotHaveChildren {
                operation: "remove",
            });
        };
        if !children.contains(&child) {
            return Err(TreeError::NotAChild { parent, child });
        }

        let old_root = self.root_of(parent)?;
        self.detach(parent, child);
        self.set_subtree_root(child, None);
        self.mark_root_dirty(old_root);
        Ok(())
    }

    /// Detaches every child of `parent`. A no-op on leaves.
    pub fn clear(&mut self, parent: NodeId) -> Result<(), TreeError> {
        let children = self.children(parent)?.to_vec();
        for child in children {
            self.remove(parent, child)?;
        }
        Ok(())
    }

    /// Detaches `id` and frees it together with its whole subtree.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), TreeError> {
        if let Some(parent) = self.parent(id)? {
            self.take_child(parent, id)?;
        }
        for node in self.descendants(id)? {
            self.nodes.remove(node);
            self.dirty.remove(&node);
        }
        Ok(())
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(siblings) = self.nodes.get_mut(parent).and_then(|p| p.children.as_mut()) {
            siblings.retain(|c| *c != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.nodes.get(node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Points `start` at `root` and every node below it at the resolved root.
    fn set_subtree_root(&mut self, start: NodeId, root: Option<NodeId>) {
        let shared = root.unwrap_or(start);
        let mut stack = Vec::new();
        if let Some(node) = self.nodes.get_mut(start) {
            node.root = root;
            stack.extend_from_slice(node.children());
        }
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(id) {
                node.root = Some(shared);
                stack.extend_from_slice(node.children());
            }
        }
    }

    // --- Dirty tracking ---

    /// Registers the callback raised when a clean tree becomes dirty. It receives the root.
    pub fn on_refresh(&mut self, hook: impl FnMut(NodeId) + 'static) {
        self.on_refresh = Some(Box::new(hook));
    }

    pub fn is_dirty(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.dirty.contains(&self.root_of(id)?))
    }

    /// Marks the tree containing `id` as needing a layout pass.
    pub fn mark_dirty(&mut self, id: NodeId) -> Result<(), TreeError> {
        let root = self.root_of(id)?;
        self.mark_root_dirty(root);
        Ok(())
    }

    fn mark_root_dirty(&mut self, root: NodeId) {
        if self.dirty.insert(root) {
            log::trace!("tree {:?} needs layout", root);
            if let Some(hook) = self.on_refresh.as_mut() {
                hook(root);
            }
        }
    }

    pub(crate) fn mark_clean(&mut self, root: NodeId) {
        self.dirty.remove(&root);
    }

    // --- Style, content and intrinsic size ---

    /// Replaces a node's style after validating it.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), LayoutError> {
        style.validate()?;
        self.modify_style(id, |current| {
            *current = style;
            Ok(())
        })
    }

    pub fn set_style_property(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), LayoutError> {
        self.modify_style(id, |style| style.set(name, value))
    }

    /// Applies several attributes as one bulk update; see [`Style::update`].
    pub fn update_style<I, N, V>(&mut self, id: NodeId, declarations: I) -> Result<(), LayoutError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        self.modify_style(id, |style| style.update(declarations))
    }

    pub fn reset_style_property(&mut self, id: NodeId, name: &str) -> Result<(), LayoutError> {
        self.modify_style(id, |style| style.reset(name))
    }

    fn modify_style(
        &mut self,
        id: NodeId,
        change: impl FnOnce(&mut Style) -> Result<(), StyleError>,
    ) -> Result<(), LayoutError> {
        let node = self.node_mut(id)?;
        let before = node.style.clone();
        change(&mut node.style)?;
        if before.layout_differs(&node.style) {
            self.mark_dirty(id)?;
        }
        Ok(())
    }

    /// Sets the text a node displays. It is measured on the next
    /// [`LayoutEngine::measure_content`](crate::LayoutEngine::measure_content).
    pub fn set_content(&mut self, id: NodeId, content: Option<String>) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        if node.content != content {
            node.content = content;
            self.mark_dirty(id)?;
        }
        Ok(())
    }

    pub fn set_intrinsic_width(
        &mut self,
        id: NodeId,
        width: Option<Intrinsic>,
    ) -> Result<bool, TreeError> {
        let changed = self.node_mut(id)?.intrinsic.set_width(width);
        self.dirty_if(id, changed)
    }

    pub fn set_intrinsic_height(
        &mut self,
        id: NodeId,
        height: Option<Intrinsic>,
    ) -> Result<bool, TreeError> {
        let changed = self.node_mut(id)?.intrinsic.set_height(height);
        self.dirty_if(id, changed)
    }

    pub fn set_intrinsic_ratio(&mut self, id: NodeId, ratio: Option<f32>) -> Result<bool, TreeError> {
        let changed = self.node_mut(id)?.intrinsic.set_ratio(ratio);
        self.dirty_if(id, changed)
    }

    /// Replaces all three intrinsic values at once.
    pub fn set_intrinsic(&mut self, id: NodeId, size: IntrinsicSize) -> Result<bool, TreeError> {
        let intrinsic = &mut self.node_mut(id)?.intrinsic;
        let changed = intrinsic.set_width(size.width())
            | intrinsic.set_height(size.height())
            | intrinsic.set_ratio(size.ratio());
        self.dirty_if(id, changed)
    }

    fn dirty_if(&mut self, id: NodeId, changed: bool) -> Result<bool, TreeError> {
        if changed {
            self.mark_dirty(id)?;
        }
        Ok(changed)
    }

    // --- Geometry ---

    /// Moves a node's origin and shifts everything below it. No sizes change.
    pub fn set_origin(&mut self, id: NodeId, left: f32, top: f32) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        node.layout.origin_left = left;
        node.layout.origin_top = top;
        self.propagate_origin(id);
        Ok(())
    }

    /// Rewrites the cached origin of every descendant from its parent's absolute content
    /// origin.
    pub(crate) fn propagate_origin(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(parent) = stack.pop() {
            let Some(node) = self.nodes.get(parent) else {
                continue;
            };
            let left = node.layout.absolute_content_left();
            let top = node.layout.absolute_content_top();
            let children = node.children().to_vec();
            for child in children {
                if let Some(child_node) = self.nodes.get_mut(child) {
                    child_node.layout.origin_left = left;
                    child_node.layout.origin_top = top;
                }
                stack.push(child);
            }
        }
    }

    pub(crate) fn layout_mut(&mut self, id: NodeId) -> Option<&mut LayoutBox> {
        self.nodes.get_mut(id).map(|n| &mut n.layout)
    }
}
