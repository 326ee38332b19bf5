//! Edits on the inline content of a single leaf block.
//!
//! All offsets are local to the block. Inlines never nest, so a leaf block's
//! children are texts and inlines whose children are texts.

use crate::value::{MarkSet, Node, Text};

/// Split texts so that `offset` falls between two siblings.
///
/// Inlines are split internally, never themselves.
pub(crate) fn split_texts_at(nodes: &mut Vec<Node>, offset: usize) {
    let mut pos = 0;
    for i in 0..nodes.len() {
        let len = nodes[i].text_len();
        if offset > pos && offset < pos + len {
            let tail = match &mut nodes[i] {
                Node::Text(text) => text.split_off(offset - pos),
                Node::Inline(inline) => {
                    split_texts_at(&mut inline.nodes, offset - pos);
                    return;
                }
                Node::Block(_) => return,
            };
            nodes.insert(i + 1, Node::Text(tail));
            return;
        }
        pos += len;
    }
}

/// Visit every text with its start offset
pub(crate) fn for_each_text<F: FnMut(&Text, usize)>(nodes: &[Node], f: &mut F) {
    let mut pos = 0;
    visit_texts(nodes, &mut pos, f);
}

fn visit_texts<F: FnMut(&Text, usize)>(nodes: &[Node], pos: &mut usize, f: &mut F) {
    for node in nodes {
        match node {
            Node::Text(text) => {
                f(text, *pos);
                *pos += text.len();
            }
            Node::Inline(inline) => visit_texts(&inline.nodes, pos, f),
            Node::Block(_) => {}
        }
    }
}

/// Apply `f` to the non-empty texts lying entirely inside `[start, end)`
pub(crate) fn update_texts_in<F: FnMut(&mut Text)>(
    nodes: &mut [Node],
    start: usize,
    end: usize,
    f: &mut F,
) {
    let mut pos = 0;
    update_texts(nodes, start, end, &mut pos, f);
}

fn update_texts<F: FnMut(&mut Text)>(
    nodes: &mut [Node],
    start: usize,
    end: usize,
    pos: &mut usize,
    f: &mut F,
) {
    for node in nodes {
        match node {
            Node::Text(text) => {
                let len = text.len();
                if len > 0 && *pos >= start && *pos + len <= end {
                    f(text);
                }
                *pos += len;
            }
            Node::Inline(inline) => update_texts(&mut inline.nodes, start, end, pos, f),
            Node::Block(_) => {}
        }
    }
}

/// Marks shared by every text overlapping `[start, end)`
pub(crate) fn marks_in(nodes: &[Node], start: usize, end: usize) -> Option<MarkSet> {
    let mut shared: Option<MarkSet> = None;
    for_each_text(nodes, &mut |text, text_start| {
        let len = text.len();
        if len == 0 || text_start >= end || text_start + len <= start {
            return;
        }
        shared = Some(match shared.take() {
            Some(marks) => marks.intersection(&text.marks).copied().collect(),
            None => text.marks.clone(),
        });
    });
    shared
}

/// Text holding the cursor, preferring the text that ends at `offset`
pub(crate) fn text_at(nodes: &[Node], offset: usize) -> Option<&Text> {
    let mut pos = 0;
    find_text(nodes, offset, &mut pos)
}

fn find_text<'a>(nodes: &'a [Node], offset: usize, pos: &mut usize) -> Option<&'a Text> {
    for node in nodes {
        match node {
            Node::Text(text) => {
                if offset <= *pos + text.len() {
                    return Some(text);
                }
                *pos += text.len();
            }
            Node::Inline(inline) => {
                if let Some(text) = find_text(&inline.nodes, offset, pos) {
                    return Some(text);
                }
            }
            Node::Block(_) => {}
        }
    }
    None
}

/// Index of the inline holding the cursor, with the same affinity as [`text_at`]
pub(crate) fn inline_at(nodes: &[Node], offset: usize) -> Option<usize> {
    let mut pos = 0;
    for (i, node) in nodes.iter().enumerate() {
        let len = node.text_len();
        if offset <= pos + len {
            return matches!(node, Node::Inline(_)).then_some(i);
        }
        pos += len;
    }
    None
}

/// Indices of the inlines sharing at least one character with `[start, end)`
pub(crate) fn inlines_overlapping(nodes: &[Node], start: usize, end: usize) -> Vec<usize> {
    let mut pos = 0;
    let mut out = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        let len = node.text_len();
        if matches!(node, Node::Inline(_)) && pos < end && pos + len > start {
            out.push(i);
        }
        pos += len;
    }
    out
}

/// Replace the inlines at `indices` (ascending) with their children
pub(crate) fn lift_inlines(nodes: &mut Vec<Node>, indices: &[usize]) {
    for &i in indices.iter().rev() {
        if !matches!(nodes.get(i), Some(Node::Inline(_))) {
            continue;
        }
        if let Node::Inline(inline) = nodes.remove(i) {
            nodes.splice(i..i, inline.nodes);
        }
    }
}

/// First and last child lying entirely inside `[start, end)`
pub(crate) fn covered_range(nodes: &[Node], start: usize, end: usize) -> Option<(usize, usize)> {
    let mut pos = 0;
    let mut range: Option<(usize, usize)> = None;
    for (i, node) in nodes.iter().enumerate() {
        let len = node.text_len();
        if len > 0 && pos >= start && pos + len <= end {
            range = Some(range.map_or((i, i), |(from, _)| (from, i)));
        }
        pos += len;
    }
    range
}

/// Insert `s` at the cursor. A text with different marks than `marks` is split
/// around a new text instead of being extended.
pub(crate) fn insert_text_at(
    nodes: &mut Vec<Node>,
    offset: usize,
    s: &str,
    marks: Option<&MarkSet>,
) -> bool {
    let mut pos = 0;
    insert_into(nodes, offset, &mut pos, s, marks)
}

fn insert_into(
    nodes: &mut Vec<Node>,
    offset: usize,
    pos: &mut usize,
    s: &str,
    marks: Option<&MarkSet>,
) -> bool {
    for i in 0..nodes.len() {
        let (tail, new_marks) = match &mut nodes[i] {
            Node::Text(text) => {
                let len = text.len();
                if offset > *pos + len {
                    *pos += len;
                    continue;
                }
                let at = offset - *pos;
                match marks {
                    Some(marks) if *marks != text.marks => (text.split_off(at), marks.clone()),
                    _ => {
                        text.insert_str(at, s);
                        return true;
                    }
                }
            }
            Node::Inline(inline) => {
                if insert_into(&mut inline.nodes, offset, pos, s, marks) {
                    return true;
                }
                continue;
            }
            Node::Block(_) => continue,
        };
        nodes.insert(i + 1, Node::Text(Text::new(s, new_marks)));
        nodes.insert(i + 2, Node::Text(tail));
        return true;
    }
    false
}

/// Remove the characters in `[start, end)`. Emptied inlines are left for
/// normalization to drop.
pub(crate) fn remove_text_range(nodes: &mut Vec<Node>, start: usize, end: usize) {
    if start >= end {
        return;
    }
    split_texts_at(nodes, start);
    split_texts_at(nodes, end);

    let mut pos = 0;
    nodes.retain_mut(|node| {
        let node_start = pos;
        let len = node.text_len();
        pos += len;
        match node {
            Node::Text(_) => !(len > 0 && node_start >= start && node_start + len <= end),
            Node::Inline(inline) => {
                if node_start < end && node_start + len > start {
                    let inner_start = start.saturating_sub(node_start);
                    let inner_end = (end - node_start).min(len);
                    remove_text_range(&mut inline.nodes, inner_start, inner_end);
                }
                true
            }
            Node::Block(_) => true,
        }
    });
}
