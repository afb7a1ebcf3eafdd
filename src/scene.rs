//! A small retained scene graph, exportable to SVG.
//!
//! Nodes live in an arena owned by the [`Scene`] and are addressed by
//! [`NodeId`]. Each node carries ordered attributes and a set of classes, the
//! latter doubling as boolean flags (`ghost`, `hidden`) toggled by pointer
//! interactions. The scene also owns the registry of rendered syntenic regions,
//! which interaction handlers consult instead of re-querying the tree.

use indexmap::{IndexMap, IndexSet};
use std::io::Write;
use svg::node::element::{Group, Line, Polygon};
use svg::Document;

use super::file::OutputFile;
use super::region::Pixel;
use super::synteny::SyntenyError;

/// Handle to a node of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Group,
    Polygon,
    Line,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub element: Element,
    pub attributes: IndexMap<String, String>,
    pub classes: IndexSet<String>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(element: Element) -> Self {
        Self {
            element,
            attributes: IndexMap::new(),
            classes: IndexSet::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn classed(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    synteny_regions: Vec<NodeId>,
}

impl Scene {
    /// Create a scene whose root group is identified by `selector`.
    ///
    /// A leading `#` in the selector is dropped from the root's `id`.
    pub fn new(selector: &str) -> Self {
        let mut root = Node::new(Element::Group);
        let id = selector.trim_start_matches('#');
        if !id.is_empty() {
            root.attributes.insert("id".to_string(), id.to_string());
        }
        Self {
            nodes: vec![root],
            synteny_regions: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SyntenyError> {
        self.nodes.get_mut(id.0).ok_or(SyntenyError::NoNode(id.0))
    }

    fn create(
        &mut self,
        parent: NodeId,
        element: Element,
        first: bool,
    ) -> Result<NodeId, SyntenyError> {
        let id = NodeId(self.nodes.len());
        let parent = self.node_mut(parent)?;
        if first {
            parent.children.insert(0, id);
        } else {
            parent.children.push(id);
        }
        self.nodes.push(Node::new(element));
        Ok(id)
    }

    /// Append a new child element to `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Result<NodeId, SyntenyError> {
        self.create(parent, element, false)
    }

    /// Insert a new child element before all other children of `parent`.
    pub fn insert_first(
        &mut self,
        parent: NodeId,
        element: Element,
    ) -> Result<NodeId, SyntenyError> {
        self.create(parent, element, true)
    }

    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl ToString,
    ) -> Result<(), SyntenyError> {
        self.node_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).and_then(|node| node.attr(name))
    }

    pub fn classed(&self, id: NodeId, class: &str) -> bool {
        self.node(id).map_or(false, |node| node.classed(class))
    }

    /// Add (`on = true`) or remove a class of a node.
    pub fn set_classed(&mut self, id: NodeId, class: &str, on: bool) -> Result<(), SyntenyError> {
        let node = self.node_mut(id)?;
        if on {
            node.classes.insert(class.to_string());
        } else {
            node.classes.shift_remove(class);
        }
        Ok(())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes accepted by `keep`, in document order.
    fn select(&self, keep: impl Fn(NodeId) -> bool) -> Vec<NodeId> {
        let mut selected = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            if keep(id) {
                selected.push(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        selected
    }

    /// All nodes having `class`, in document order.
    pub fn select_all(&self, class: &str) -> Vec<NodeId> {
        self.select(|id| self.classed(id, class))
    }

    /// Add a rendered syntenic region to the registry, making it respond to pointer events.
    pub fn register_synteny_region(&mut self, id: NodeId) -> Result<(), SyntenyError> {
        self.node_mut(id)?;
        self.synteny_regions.push(id);
        Ok(())
    }

    /// The registered syntenic regions, in the order they were rendered.
    pub fn synteny_regions(&self) -> &[NodeId] {
        &self.synteny_regions
    }

    /// The registered syntenic regions, in document order.
    ///
    /// Each render pass inserts its layer first, so regions of later passes
    /// come before those of earlier ones.
    pub fn synteny_regions_in_document_order(&self) -> Vec<NodeId> {
        self.select(|id| self.is_synteny_region(id))
    }

    pub fn is_synteny_region(&self, id: NodeId) -> bool {
        self.synteny_regions.contains(&id)
    }

    fn to_group(&self, id: NodeId) -> Group {
        let mut group = match self.node(id) {
            Some(node) => with_attributes(Group::new(), node),
            None => return Group::new(),
        };
        for &child in self.children(id) {
            let Some(node) = self.node(child) else {
                continue;
            };
            group = match node.element {
                Element::Group => group.add(self.to_group(child)),
                Element::Polygon => group.add(with_attributes(Polygon::new(), node)),
                Element::Line => group.add(with_attributes(Line::new(), node)),
            };
        }
        group
    }

    /// Build an SVG document of the whole scene.
    pub fn to_document(&self, width: Pixel, height: Pixel) -> Document {
        Document::new()
            .set("viewBox", (0, 0, width, height))
            .set("width", width)
            .set("height", height)
            .add(self.to_group(self.root()))
    }

    /// Write the scene as SVG to `filepath`, or standard out if `None`.
    ///
    /// Paths with a `.gz` extension are gzip compressed.
    pub fn write_svg(
        &self,
        filepath: Option<&str>,
        width: Pixel,
        height: Pixel,
    ) -> Result<(), SyntenyError> {
        let mut writer: Box<dyn Write> = match filepath {
            Some(path) => OutputFile::new(path).writer()?,
            None => Box::new(std::io::stdout()),
        };
        writeln!(writer, "{}", self.to_document(width, height))?;
        writer.flush()?;
        Ok(())
    }
}

fn with_attributes<N: svg::Node>(mut element: N, node: &Node) -> N {
    for (name, value) in &node.attributes {
        element.assign(name.clone(), value.clone());
    }
    if !node.classes.is_empty() {
        let classes: Vec<&str> = node.classes.iter().map(String::as_str).collect();
        element.assign("class", classes.join(" "));
    }
    element
}
