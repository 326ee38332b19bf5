//! Editing model
//!
//! The engine keeps marks on text leaves instead of wrapper nodes. A block is
//! either a container (every child is a block) or a leaf block (children are
//! texts and inlines); inlines hold only texts. [`Document::normalize`] restores
//! these invariants after loading and after every command.

use std::collections::BTreeSet;
use std::mem;

use tracing::trace;

use crate::ast::{BlockType, DocumentNode, InlineType, MarkType};
use crate::selection::Selection;

/// Marks carried by a text leaf, in nesting order
pub type MarkSet = BTreeSet<MarkType>;

/// A run of text sharing one set of marks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub marks: MarkSet,
}

impl Text {
    pub fn new(text: impl Into<String>, marks: MarkSet) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, MarkSet::new())
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split at a character offset, keeping the head and returning the tail
    pub fn split_off(&mut self, at: usize) -> Text {
        let byte = byte_offset(&self.text, at);
        Text {
            text: self.text.split_off(byte),
            marks: self.marks.clone(),
        }
    }

    /// Insert at a character offset
    pub fn insert_str(&mut self, at: usize, s: &str) {
        let byte = byte_offset(&self.text, at);
        self.text.insert_str(byte, s);
    }
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

/// A structural node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub ty: BlockType,
    pub class_name: Option<String>,
    pub nodes: Vec<Node>,
}

impl Block {
    pub fn new(ty: BlockType, nodes: Vec<Node>) -> Self {
        Self {
            ty,
            class_name: None,
            nodes,
        }
    }

    /// A block whose content is text and inlines rather than other blocks
    pub fn is_leaf(&self) -> bool {
        !self.nodes.iter().any(Node::is_block)
    }

    pub fn text_len(&self) -> usize {
        nodes_len(&self.nodes)
    }

    pub fn text(&self) -> String {
        nodes_text(&self.nodes)
    }

    fn normalize(&mut self, default_block: BlockType) {
        if self.is_leaf() {
            self.nodes = normalize_inline_content(mem::take(&mut self.nodes));
            if self.nodes.is_empty() {
                self.nodes.push(Node::Text(Text::default()));
            }
        } else {
            self.nodes = wrap_loose_inlines(mem::take(&mut self.nodes), default_block);
            for node in &mut self.nodes {
                if let Node::Block(block) = node {
                    block.normalize(default_block);
                }
            }
        }
    }
}

/// A node in the text flow carrying its own attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    pub ty: InlineType,
    pub href: Option<String>,
    pub nodes: Vec<Node>,
}

impl Inline {
    pub fn new(ty: InlineType, href: Option<String>, nodes: Vec<Node>) -> Self {
        Self { ty, href, nodes }
    }

    pub fn text_len(&self) -> usize {
        nodes_len(&self.nodes)
    }

    pub fn text(&self) -> String {
        nodes_text(&self.nodes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Block(Block),
    Inline(Inline),
    Text(Text),
}

impl Node {
    pub fn is_block(&self) -> bool {
        matches!(self, Node::Block(_))
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Block(block) => Some(&block.nodes),
            Node::Inline(inline) => Some(&inline.nodes),
            Node::Text(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Block(block) => Some(&mut block.nodes),
            Node::Inline(inline) => Some(&mut inline.nodes),
            Node::Text(_) => None,
        }
    }

    /// Number of offsets this node spans
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text(text) => text.len(),
            Node::Inline(inline) => inline.text_len(),
            Node::Block(block) => block.text_len(),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Node::Text(text) => text.text.clone(),
            Node::Inline(inline) => inline.text(),
            Node::Block(block) => block.text(),
        }
    }

    fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }
}

/// Sibling blocks are separated by one offset
fn nodes_len(nodes: &[Node]) -> usize {
    let blocks = nodes.iter().filter(|n| n.is_block()).count();
    nodes.iter().map(Node::text_len).sum::<usize>() + blocks.saturating_sub(1)
}

fn nodes_text(nodes: &[Node]) -> String {
    if nodes.iter().any(Node::is_block) {
        nodes
            .iter()
            .map(Node::text)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        nodes.iter().map(Node::text).collect()
    }
}

/// A leaf block located in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafBlock {
    pub path: Vec<usize>,
    pub start: usize,
    pub end: usize,
}

/// The document owned by an editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Build a normalized document
    pub fn new(nodes: Vec<Node>, default_block: BlockType) -> Self {
        let mut document = Self { nodes };
        document.normalize(default_block);
        document
    }

    /// Fold a codec tree into the editing model
    pub fn from_nodes(nodes: Vec<DocumentNode>, default_block: BlockType) -> Self {
        let marks = MarkSet::new();
        let mut converted = Vec::with_capacity(nodes.len());
        for node in nodes {
            import_node(node, &marks, &mut converted);
        }
        Self::new(converted, default_block)
    }

    /// Expand the editing model into a codec tree
    pub fn to_nodes(&self) -> Vec<DocumentNode> {
        self.nodes.iter().map(export_node).collect()
    }

    pub fn len(&self) -> usize {
        nodes_len(&self.nodes)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain text, leaf blocks joined by newlines
    pub fn text(&self) -> String {
        nodes_text(&self.nodes)
    }

    /// Leaf blocks in document order with their offset spans
    pub fn leaf_blocks(&self) -> Vec<LeafBlock> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        let mut offset = 0;
        collect_leaf_blocks(&self.nodes, &mut path, &mut offset, &mut out);
        out
    }

    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.nodes.get(*first)?, |node, &i| node.children()?.get(i))
    }

    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.nodes.get_mut(*first)?;
        for &i in rest {
            node = node.children_mut()?.get_mut(i)?;
        }
        Some(node)
    }

    pub fn block(&self, path: &[usize]) -> Option<&Block> {
        match self.node(path)? {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn block_mut(&mut self, path: &[usize]) -> Option<&mut Block> {
        match self.node_mut(path)? {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Children of the node at `parent`; the empty path is the document itself
    pub fn children_mut(&mut self, parent: &[usize]) -> Option<&mut Vec<Node>> {
        if parent.is_empty() {
            Some(&mut self.nodes)
        } else {
            self.node_mut(parent)?.children_mut()
        }
    }

    /// Parent block of the node at `path`, `None` at the top level
    pub fn parent(&self, path: &[usize]) -> Option<&Block> {
        let (_, parent) = path.split_last()?;
        if parent.is_empty() {
            None
        } else {
            self.block(parent)
        }
    }

    /// Path of the nearest ancestor block matching `pred`
    pub fn closest(
        &self,
        path: &[usize],
        mut pred: impl FnMut(&Block) -> bool,
    ) -> Option<Vec<usize>> {
        (1..path.len())
            .rev()
            .map(|len| &path[..len])
            .find(|ancestor| self.block(ancestor).is_some_and(&mut pred))
            .map(<[usize]>::to_vec)
    }

    pub fn normalize(&mut self, default_block: BlockType) {
        self.nodes = wrap_loose_inlines(mem::take(&mut self.nodes), default_block);
        for node in &mut self.nodes {
            if let Node::Block(block) = node {
                block.normalize(default_block);
            }
        }
        if self.nodes.is_empty() {
            self.nodes.push(Node::Block(Block::new(
                default_block,
                vec![Node::Text(Text::default())],
            )));
        }
    }
}

fn collect_leaf_blocks(
    nodes: &[Node],
    path: &mut Vec<usize>,
    offset: &mut usize,
    out: &mut Vec<LeafBlock>,
) {
    for (i, node) in nodes.iter().enumerate() {
        let Node::Block(block) = node else { continue };
        path.push(i);
        if block.is_leaf() {
            if !out.is_empty() {
                *offset += 1;
            }
            let start = *offset;
            *offset += block.text_len();
            out.push(LeafBlock {
                path: path.clone(),
                start,
                end: *offset,
            });
        } else {
            collect_leaf_blocks(&block.nodes, path, offset, out);
        }
        path.pop();
    }
}

fn import_node(node: DocumentNode, marks: &MarkSet, out: &mut Vec<Node>) {
    match node {
        DocumentNode::Block {
            ty,
            class_name,
            children,
        } => {
            let mut nodes = Vec::with_capacity(children.len());
            for child in children {
                import_node(child, marks, &mut nodes);
            }
            out.push(Node::Block(Block {
                ty,
                class_name,
                nodes,
            }));
        }
        DocumentNode::Inline { ty, href, children } => {
            let mut nodes = Vec::with_capacity(children.len());
            for child in children {
                import_node(child, marks, &mut nodes);
            }
            out.push(Node::Inline(Inline { ty, href, nodes }));
        }
        DocumentNode::Mark { ty, children } => {
            let mut inner = marks.clone();
            inner.insert(ty);
            for child in children {
                import_node(child, &inner, out);
            }
        }
        DocumentNode::Text(content) => out.push(Node::Text(Text::new(content, marks.clone()))),
    }
}

fn export_node(node: &Node) -> DocumentNode {
    match node {
        Node::Block(block) => DocumentNode::Block {
            ty: block.ty,
            class_name: block.class_name.clone(),
            children: block.nodes.iter().map(export_node).collect(),
        },
        Node::Inline(inline) => DocumentNode::Inline {
            ty: inline.ty,
            href: inline.href.clone(),
            children: inline.nodes.iter().map(export_node).collect(),
        },
        Node::Text(text) => {
            let leaf = DocumentNode::Text(text.text.clone());
            if text.is_empty() {
                return leaf;
            }
            text.marks
                .iter()
                .fold(leaf, |child, &ty| DocumentNode::mark(ty, vec![child]))
        }
    }
}

/// Wrap runs of non-block nodes into default blocks, dropping blank runs
fn wrap_loose_inlines(nodes: Vec<Node>, default_block: BlockType) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut run = Vec::new();
    for node in nodes {
        if node.is_block() {
            flush_run(&mut run, &mut out, default_block);
            out.push(node);
        } else {
            run.push(node);
        }
    }
    flush_run(&mut run, &mut out, default_block);
    out
}

fn flush_run(run: &mut Vec<Node>, out: &mut Vec<Node>, default_block: BlockType) {
    if run.is_empty() {
        return;
    }
    let nodes = mem::take(run);
    if nodes.iter().all(Node::is_blank) {
        trace!(count = nodes.len(), "dropping blank nodes between blocks");
        return;
    }
    out.push(Node::Block(Block::new(default_block, nodes)));
}

fn normalize_inline_content(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => push_text(&mut out, text),
            Node::Inline(mut inline) => {
                let mut texts = Vec::new();
                collect_texts(mem::take(&mut inline.nodes), &mut texts);
                if nodes_len(&texts) == 0 {
                    trace!(ty = %inline.ty, "removing empty inline");
                    continue;
                }
                inline.nodes = texts;
                out.push(Node::Inline(inline));
            }
            Node::Block(block) => collect_texts(block.nodes, &mut out),
        }
    }
    out
}

/// Flatten nested nodes into merged texts
fn collect_texts(nodes: Vec<Node>, out: &mut Vec<Node>) {
    for node in nodes {
        match node {
            Node::Text(text) => push_text(out, text),
            Node::Inline(Inline { nodes, .. }) | Node::Block(Block { nodes, .. }) => {
                collect_texts(nodes, out)
            }
        }
    }
}

/// Append a text, merging with an equally marked predecessor and skipping
/// empty texts that have a sibling
fn push_text(out: &mut Vec<Node>, text: Text) {
    match out.last_mut() {
        Some(Node::Text(prev)) if prev.marks == text.marks || text.is_empty() => {
            prev.text.push_str(&text.text)
        }
        Some(Node::Text(prev)) if prev.is_empty() => *prev = text,
        Some(_) if text.is_empty() => {}
        _ => out.push(Node::Text(text)),
    }
}

/// Document, selection and the marks pending for the next insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub document: Document,
    pub selection: Selection,
    pub marks: Option<MarkSet>,
}

impl Value {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: Selection::default(),
            marks: None,
        }
    }
}
