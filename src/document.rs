//! JSON descriptions of layout trees.
//!
//! ```json
//! { "id": "app", "style": "direction: column; margin_top: 10",
//!   "children": [
//!     { "id": "ok", "leaf": true, "style": { "flex": 1, "margin": 15 },
//!       "intrinsic": { "width": { "at_least": 120 }, "height": 30 } }
//!   ] }
//! ```

use crate::error::BoxpackError;
use boxpack_layout::{IntrinsicSize, LayoutBox, LayoutTree, NodeId};
use boxpack_style::Style;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub style: Style,
    /// Leaves can never hold children.
    #[serde(default)]
    pub leaf: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub intrinsic: IntrinsicSize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutDocument>,
}

/// A tree created from a [`LayoutDocument`].
#[derive(Debug)]
pub struct BuiltDocument {
    pub tree: LayoutTree,
    pub root: NodeId,
    /// Nodes that were given an `id`.
    pub ids: HashMap<String, NodeId>,
}

/// One node's computed box in absolute coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoxReport>,
}

impl LayoutDocument {
    pub fn from_json(json: &str) -> Result<Self, BoxpackError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, BoxpackError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Creates the described tree.
    pub fn build(&self) -> Result<BuiltDocument, BoxpackError> {
        let mut tree = LayoutTree::new();
        let mut ids = HashMap::new();
        let root = self.build_node(&mut tree, &mut ids)?;
        Ok(BuiltDocument { tree, root, ids })
    }

    fn build_node(
        &self,
        tree: &mut LayoutTree,
        ids: &mut HashMap<String, NodeId>,
    ) -> Result<NodeId, BoxpackError> {
        self.style.validate()?;
        let node = if self.leaf {
            tree.create_leaf(self.style.clone())
        } else {
            tree.create_node(self.style.clone())
        };
        if let Some(id) = &self.id {
            if ids.insert(id.clone(), node).is_some() {
                return Err(BoxpackError::DuplicateId(id.clone()));
            }
        }
        tree.set_intrinsic(node, self.intrinsic)?;
        if self.text.is_some() {
            tree.set_content(node, self.text.clone())?;
        }
        for child in &self.children {
            let child = child.build_node(tree, ids)?;
            tree.add(node, child)?;
        }
        Ok(node)
    }
}

impl BuiltDocument {
    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn layout(&self, id: &str) -> Option<&LayoutBox> {
        self.tree.layout(self.node(id)?).ok()
    }

    /// The current boxes of the whole tree, nested like the document.
    pub fn report(&self) -> Result<BoxReport, BoxpackError> {
        let names: HashMap<NodeId, &str> =
            self.ids.iter().map(|(name, id)| (*id, name.as_str())).collect();
        self.report_node(self.root, &names)
    }

    fn report_node(
        &self,
        node: NodeId,
        names: &HashMap<NodeId, &str>,
    ) -> Result<BoxReport, BoxpackError> {
        let layout = self.tree.layout(node)?;
        let rect = layout.content_rect();
        let children = self
            .tree
            .children(node)?
            .iter()
            .map(|child| self.report_node(*child, names))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BoxReport {
            id: names.get(&node).map(|name| name.to_string()),
            left: rect.x,
            top: rect.y,
            width: rect.width,
            height: rect.height,
            visible: layout.visible,
            children,
        })
    }
}
