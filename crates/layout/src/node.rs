use crate::intrinsic::IntrinsicSize;
use crate::layout_box::LayoutBox;
use boxpack_style::Style;
use slotmap::new_key_type;

new_key_type! {
    /// Handle to a node in a [`LayoutTree`](crate::LayoutTree).
    pub struct NodeId;
}

/// One element of a layout tree.
///
/// Parent and root are plain handles into the owning arena; only the arena owns nodes.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) style: Style,
    pub(crate) intrinsic: IntrinsicSize,
    pub(crate) layout: LayoutBox,
    /// `None` for leaves, which can never hold children.
    pub(crate) children: Option<Vec<NodeId>>,
    pub(crate) parent: Option<NodeId>,
    /// `None` only on the root itself.
    pub(crate) root: Option<NodeId>,
    pub(crate) content: Option<String>,
}

impl Node {
    pub(crate) fn new(style: Style, can_have_children: bool) -> Self {
        Self {
            style,
            intrinsic: IntrinsicSize::default(),
            layout: LayoutBox::default(),
            children: can_have_children.then(Vec::new),
            parent: None,
            root: None,
            content: None,
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn intrinsic(&self) -> &IntrinsicSize {
        &self.intrinsic
    }

    pub fn layout(&self) -> &LayoutBox {
        &self.layout
    }

    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn can_have_children(&self) -> bool {
        self.children.is_some()
    }

    /// Text the node displays, measured by [`LayoutEngine::measure_content`](crate::LayoutEngine::measure_content).
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}
