//! Editing engine.
//!
//! [`Editor`] is the session handle over a [`Value`]. Commands are methods
//! returning `&mut Self` so they chain the way toolbar handlers compose them:
//!
//! ```rust
//! use richtext_core::{BlockType, Document, DocumentNode, Editor};
//!
//! let document = Document::from_nodes(
//!     vec![DocumentNode::paragraph(vec![DocumentNode::text("item")])],
//!     BlockType::Paragraph,
//! );
//! let mut editor = Editor::new(document);
//! editor
//!     .set_blocks(BlockType::ListItem)
//!     .wrap_block(BlockType::BulletedList);
//!
//! assert_eq!(editor.document().block(&[0]).unwrap().ty, BlockType::BulletedList);
//! ```

use std::mem;

use tracing::debug;

use crate::ast::{BlockType, InlineType, MarkType};
use crate::selection::Selection;
use crate::transforms;
use crate::value::{Block, Document, Inline, LeafBlock, MarkSet, Node, Text, Value};
use crate::{EditorError, Result};

/// An editing session over one document
#[derive(Debug, Clone)]
pub struct Editor {
    value: Value,
    default_block: BlockType,
}

impl Editor {
    /// Start a session with the cursor at offset 0
    pub fn new(document: Document) -> Self {
        Self {
            value: Value::new(document),
            default_block: BlockType::Paragraph,
        }
    }

    /// Block type used when loose content has to be wrapped
    pub fn with_default_block(mut self, ty: BlockType) -> Self {
        self.default_block = ty;
        self
    }

    /// Get the document and selection
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Get the current document
    pub fn document(&self) -> &Document {
        &self.value.document
    }

    /// Get the current selection
    pub fn selection(&self) -> Selection {
        self.value.selection
    }

    /// Get the block type used for wrapping
    pub fn default_block(&self) -> BlockType {
        self.default_block
    }

    // Queries

    fn selected_leaves(&self) -> Vec<LeafBlock> {
        let selection = self.value.selection;
        self.value
            .document
            .leaf_blocks()
            .into_iter()
            .filter(|leaf| selection.touches(leaf.start, leaf.end))
            .collect()
    }

    /// The selection clipped to a leaf block, in block-local offsets
    fn local_range(&self, leaf: &LeafBlock) -> (usize, usize) {
        let selection = self.value.selection;
        (
            selection.start().max(leaf.start) - leaf.start,
            selection.end().min(leaf.end) - leaf.start,
        )
    }

    /// Leaf blocks touched by the selection
    pub fn blocks(&self) -> Vec<&Block> {
        self.selected_leaves()
            .iter()
            .filter_map(|leaf| self.value.document.block(&leaf.path))
            .collect()
    }

    pub fn has_block(&self, ty: BlockType) -> bool {
        self.blocks().iter().any(|block| block.ty == ty)
    }

    /// Parent of the first selected leaf block
    pub fn parent_of_first_block(&self) -> Option<&Block> {
        let leaf = self.selected_leaves().into_iter().next()?;
        self.value.document.parent(&leaf.path)
    }

    /// Whether some selected leaf block sits inside a block of type `ty`
    pub fn has_ancestor(&self, ty: BlockType) -> bool {
        self.selected_leaves().iter().any(|leaf| {
            self.value
                .document
                .closest(&leaf.path, |block| block.ty == ty)
                .is_some()
        })
    }

    /// Marks in effect for the selection.
    ///
    /// A collapsed selection reports the pending marks if any, otherwise the
    /// marks of the text before the cursor. An expanded selection reports the
    /// marks shared by every text it overlaps.
    pub fn active_marks(&self) -> MarkSet {
        if self.value.selection.is_collapsed() {
            if let Some(marks) = &self.value.marks {
                return marks.clone();
            }
            return self.marks_at_cursor();
        }

        let mut shared: Option<MarkSet> = None;
        for leaf in self.selected_leaves() {
            let (start, end) = self.local_range(&leaf);
            let Some(block) = self.value.document.block(&leaf.path) else {
                continue;
            };
            if let Some(marks) = transforms::marks_in(&block.nodes, start, end) {
                shared = Some(match shared {
                    Some(prev) => prev.intersection(&marks).copied().collect(),
                    None => marks,
                });
            }
        }
        shared.unwrap_or_default()
    }

    fn marks_at_cursor(&self) -> MarkSet {
        let offset = self.value.selection.focus;
        self.selected_leaves()
            .first()
            .and_then(|leaf| {
                let block = self.value.document.block(&leaf.path)?;
                transforms::text_at(&block.nodes, offset - leaf.start).map(|t| t.marks.clone())
            })
            .unwrap_or_default()
    }

    pub fn has_mark(&self, ty: MarkType) -> bool {
        self.active_marks().contains(&ty)
    }

    /// Inlines touched by the selection
    pub fn inlines(&self) -> Vec<&Inline> {
        let mut out = Vec::new();
        for leaf in self.selected_leaves() {
            let Some(block) = self.value.document.block(&leaf.path) else {
                continue;
            };
            for i in self.selected_inline_indices(block, &leaf) {
                if let Node::Inline(inline) = &block.nodes[i] {
                    out.push(inline);
                }
            }
        }
        out
    }

    pub fn has_inline(&self, ty: InlineType) -> bool {
        self.inlines().iter().any(|inline| inline.ty == ty)
    }

    fn selected_inline_indices(&self, block: &Block, leaf: &LeafBlock) -> Vec<usize> {
        let (start, end) = self.local_range(leaf);
        if self.value.selection.is_collapsed() {
            transforms::inline_at(&block.nodes, start).into_iter().collect()
        } else {
            transforms::inlines_overlapping(&block.nodes, start, end)
        }
    }

    // Selection

    /// Replace the selection. Offsets past the end of the document are rejected.
    pub fn select(&mut self, selection: impl Into<Selection>) -> Result<&mut Self> {
        let selection = selection.into();
        let len = self.value.document.len();
        for offset in [selection.anchor, selection.focus] {
            if offset > len {
                return Err(EditorError::SelectionOutOfBounds { offset, len });
            }
        }
        self.set_selection(selection);
        Ok(self)
    }

    fn set_selection(&mut self, selection: Selection) {
        if selection != self.value.selection {
            self.value.marks = None;
        }
        self.value.selection = selection;
    }

    pub fn move_to(&mut self, offset: usize) -> &mut Self {
        let offset = offset.min(self.value.document.len());
        self.set_selection(Selection::collapsed(offset));
        self
    }

    /// Collapse to the start of the selection
    pub fn move_to_start(&mut self) -> &mut Self {
        let start = self.value.selection.start();
        self.set_selection(Selection::collapsed(start));
        self
    }

    /// Collapse to the end of the selection
    pub fn move_to_end(&mut self) -> &mut Self {
        let end = self.value.selection.end();
        self.set_selection(Selection::collapsed(end));
        self
    }

    pub fn move_focus_backward(&mut self, n: usize) -> &mut Self {
        let selection = self.value.selection;
        self.set_selection(Selection::new(
            selection.anchor,
            selection.focus.saturating_sub(n),
        ));
        self
    }

    pub fn move_focus_forward(&mut self, n: usize) -> &mut Self {
        let selection = self.value.selection;
        let focus = (selection.focus + n).min(self.value.document.len());
        self.set_selection(Selection::new(selection.anchor, focus));
        self
    }

    // Commands

    pub fn toggle_mark(&mut self, ty: MarkType) -> &mut Self {
        if self.has_mark(ty) {
            self.remove_mark(ty)
        } else {
            self.add_mark(ty)
        }
    }

    pub fn add_mark(&mut self, ty: MarkType) -> &mut Self {
        self.change_mark(ty, true)
    }

    pub fn remove_mark(&mut self, ty: MarkType) -> &mut Self {
        self.change_mark(ty, false)
    }

    fn change_mark(&mut self, ty: MarkType, add: bool) -> &mut Self {
        debug!(mark = %ty, add, "changing mark");

        if self.value.selection.is_collapsed() {
            let mut marks = self.active_marks();
            if add {
                marks.insert(ty);
            } else {
                marks.remove(&ty);
            }
            self.value.marks = Some(marks);
            return self;
        }

        for leaf in self.selected_leaves() {
            let (start, end) = self.local_range(&leaf);
            if start == end {
                continue;
            }
            let Some(block) = self.value.document.block_mut(&leaf.path) else {
                continue;
            };
            transforms::split_texts_at(&mut block.nodes, start);
            transforms::split_texts_at(&mut block.nodes, end);
            transforms::update_texts_in(&mut block.nodes, start, end, &mut |text| {
                if add {
                    text.marks.insert(ty);
                } else {
                    text.marks.remove(&ty);
                }
            });
        }
        self.normalize();
        self
    }

    /// Retype every selected leaf block
    pub fn set_blocks(&mut self, ty: BlockType) -> &mut Self {
        debug!(block = %ty, "setting blocks");
        for leaf in self.selected_leaves() {
            if let Some(block) = self.value.document.block_mut(&leaf.path) {
                block.ty = ty;
            }
        }
        self
    }

    /// Wrap the selected blocks, at the level of their common ancestor, in a
    /// new block
    pub fn wrap_block(&mut self, ty: BlockType) -> &mut Self {
        let leaves = self.selected_leaves();
        let (Some(first), Some(last)) = (leaves.first(), leaves.last()) else {
            return self;
        };

        let depth = if leaves.len() == 1 {
            first.path.len() - 1
        } else {
            common_prefix_len(&first.path, &last.path)
        };
        let parent = &first.path[..depth];
        let (from, to) = (first.path[depth], last.path[depth]);
        debug!(block = %ty, ?parent, from, to, "wrapping blocks");

        if let Some(children) = self.value.document.children_mut(parent) {
            let wrapped: Vec<Node> = children.drain(from..=to).collect();
            children.insert(from, Node::Block(Block::new(ty, wrapped)));
        }
        self
    }

    /// Lift the selected blocks out of their closest ancestor of type `ty`
    pub fn unwrap_block(&mut self, ty: BlockType) -> &mut Self {
        let mut wrappers: Vec<Vec<usize>> = self
            .selected_leaves()
            .iter()
            .filter_map(|leaf| self.value.document.closest(&leaf.path, |b| b.ty == ty))
            .collect();
        wrappers.sort();
        wrappers.dedup();

        // Later and deeper wrappers first, so earlier paths stay valid.
        for wrapper in wrappers.iter().rev() {
            self.lift_selected_children(wrapper);
        }
        self
    }

    fn lift_selected_children(&mut self, wrapper: &[usize]) {
        let selection = self.value.selection;
        let leaves = self.value.document.leaf_blocks();
        let Some(count) = self.value.document.block(wrapper).map(|b| b.nodes.len()) else {
            return;
        };

        let selected: Vec<usize> = (0..count)
            .filter(|&j| {
                let mut child = wrapper.to_vec();
                child.push(j);
                leaves
                    .iter()
                    .any(|leaf| leaf.path.starts_with(&child) && selection.touches(leaf.start, leaf.end))
            })
            .collect();
        let (Some(&first), Some(&last)) = (selected.first(), selected.last()) else {
            return;
        };
        let Some((&index, parent)) = wrapper.split_last() else {
            return;
        };
        let Some(siblings) = self.value.document.children_mut(parent) else {
            return;
        };
        if !matches!(siblings.get(index), Some(Node::Block(_))) {
            return;
        }
        let Node::Block(Block {
            ty,
            class_name,
            mut nodes,
        }) = siblings.remove(index)
        else {
            return;
        };

        debug!(block = %ty, ?wrapper, first, last, total = nodes.len(), "unwrapping blocks");
        let after = nodes.split_off(last + 1);
        let lifted = nodes.split_off(first);
        let before = nodes;

        let mut replacement = Vec::with_capacity(lifted.len() + 2);
        if !before.is_empty() {
            replacement.push(Node::Block(Block {
                ty,
                class_name: class_name.clone(),
                nodes: before,
            }));
        }
        replacement.extend(lifted);
        if !after.is_empty() {
            replacement.push(Node::Block(Block {
                ty,
                class_name,
                nodes: after,
            }));
        }
        siblings.splice(index..index, replacement);
    }

    /// Wrap the selected text in a new inline. Inlines already overlapping the
    /// selection are dissolved first so inlines never nest.
    pub fn wrap_inline(&mut self, ty: InlineType, href: Option<String>) -> &mut Self {
        if self.value.selection.is_collapsed() {
            debug!(inline = %ty, "nothing selected to wrap");
            return self;
        }
        debug!(inline = %ty, ?href, "wrapping inline");

        for leaf in self.selected_leaves() {
            let (start, end) = self.local_range(&leaf);
            if start == end {
                continue;
            }
            let Some(block) = self.value.document.block_mut(&leaf.path) else {
                continue;
            };
            let overlapping = transforms::inlines_overlapping(&block.nodes, start, end);
            transforms::lift_inlines(&mut block.nodes, &overlapping);
            transforms::split_texts_at(&mut block.nodes, start);
            transforms::split_texts_at(&mut block.nodes, end);
            if let Some((from, to)) = transforms::covered_range(&block.nodes, start, end) {
                let wrapped: Vec<Node> = block.nodes.drain(from..=to).collect();
                block
                    .nodes
                    .insert(from, Node::Inline(Inline::new(ty, href.clone(), wrapped)));
            }
        }
        self.normalize();
        self
    }

    /// Dissolve the selected inlines of type `ty`
    pub fn unwrap_inline(&mut self, ty: InlineType) -> &mut Self {
        debug!(inline = %ty, "unwrapping inline");
        for leaf in self.selected_leaves() {
            let indices: Vec<usize> = match self.value.document.block(&leaf.path) {
                Some(block) => self
                    .selected_inline_indices(block, &leaf)
                    .into_iter()
                    .filter(|&i| matches!(&block.nodes[i], Node::Inline(inline) if inline.ty == ty))
                    .collect(),
                None => continue,
            };
            if indices.is_empty() {
                continue;
            }
            if let Some(block) = self.value.document.block_mut(&leaf.path) {
                transforms::lift_inlines(&mut block.nodes, &indices);
            }
        }
        self.normalize();
        self
    }

    /// Insert text at the cursor, replacing an expanded selection
    pub fn insert_text(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        if self.value.selection.is_expanded() {
            self.delete();
        }

        let offset = self.value.selection.focus;
        let marks = self.value.marks.take();
        let Some(leaf) = self.selected_leaves().into_iter().next() else {
            return self;
        };
        debug!(offset, len = text.len(), "inserting text");

        if let Some(block) = self.value.document.block_mut(&leaf.path) {
            let inserted =
                transforms::insert_text_at(&mut block.nodes, offset - leaf.start, text, marks.as_ref());
            if !inserted {
                block
                    .nodes
                    .push(Node::Text(Text::new(text, marks.unwrap_or_default())));
            }
        }
        self.normalize();
        self.value.selection = Selection::collapsed(offset + text.chars().count());
        self
    }

    /// Remove the selected text. A selection spanning several blocks merges
    /// the last block's remainder into the first.
    pub fn delete(&mut self) -> &mut Self {
        let selection = self.value.selection;
        if selection.is_collapsed() {
            return self;
        }
        let leaves = self.selected_leaves();
        let (Some(first), Some(last)) = (leaves.first(), leaves.last()) else {
            return self;
        };
        debug!(
            start = selection.start(),
            end = selection.end(),
            blocks = leaves.len(),
            "deleting selection"
        );

        let (first_start, _) = self.local_range(first);
        let (_, last_end) = self.local_range(last);
        if leaves.len() == 1 {
            if let Some(block) = self.value.document.block_mut(&first.path) {
                transforms::remove_text_range(&mut block.nodes, first_start, last_end);
            }
        } else {
            let first_len = first.end - first.start;
            if let Some(block) = self.value.document.block_mut(&first.path) {
                transforms::remove_text_range(&mut block.nodes, first_start, first_len);
            }
            let tail = match self.value.document.block_mut(&last.path) {
                Some(block) => {
                    transforms::remove_text_range(&mut block.nodes, 0, last_end);
                    mem::take(&mut block.nodes)
                }
                None => Vec::new(),
            };
            for leaf in leaves[1..].iter().rev() {
                self.remove_block(&leaf.path);
            }
            if let Some(block) = self.value.document.block_mut(&first.path) {
                block.nodes.extend(tail);
            }
        }

        self.normalize();
        self.value.selection = Selection::collapsed(selection.start());
        self.value.marks = None;
        self
    }

    /// Remove a block and any container it leaves empty
    fn remove_block(&mut self, path: &[usize]) {
        let mut path = path.to_vec();
        while let Some(index) = path.pop() {
            let Some(siblings) = self.value.document.children_mut(&path) else {
                return;
            };
            if index < siblings.len() {
                siblings.remove(index);
            }
            if path.is_empty() || !siblings.is_empty() {
                return;
            }
        }
    }

    fn normalize(&mut self) {
        self.value.document.normalize(self.default_block);
    }
}

fn common_prefix_len(a: &[usize], b: &[usize]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
