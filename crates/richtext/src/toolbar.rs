//! Toolbar view model.
//!
//! Buttons are plain data: the host renders them however it likes and feeds
//! clicks back through [`crate::RichTextEditor::click`].

use std::fmt;

use richtext_core::{BlockType, InlineType, MarkType};

use crate::options::ToolbarStyle;

/// What a toolbar button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Mark(MarkType),
    Block(BlockType),
    Link,
}

impl ToolbarAction {
    /// Buttons in display order
    pub const ALL: [ToolbarAction; 8] = [
        ToolbarAction::Mark(MarkType::Bold),
        ToolbarAction::Mark(MarkType::Italic),
        ToolbarAction::Mark(MarkType::Underlined),
        ToolbarAction::Block(BlockType::Heading),
        ToolbarAction::Block(BlockType::BlockQuote),
        ToolbarAction::Block(BlockType::NumberedList),
        ToolbarAction::Block(BlockType::BulletedList),
        ToolbarAction::Link,
    ];

    /// Material icon name
    pub fn icon(self) -> &'static str {
        match self {
            ToolbarAction::Mark(MarkType::Bold) => "format_bold",
            ToolbarAction::Mark(MarkType::Italic) => "format_italic",
            ToolbarAction::Mark(MarkType::Underlined) => "format_underlined",
            ToolbarAction::Block(BlockType::Heading) => "format_size",
            ToolbarAction::Block(BlockType::BlockQuote) => "format_quote",
            ToolbarAction::Block(BlockType::NumberedList) => "format_list_numbered",
            ToolbarAction::Block(BlockType::BulletedList) => "format_list_bulleted",
            ToolbarAction::Block(BlockType::Paragraph) => "format_textdirection_l_to_r",
            ToolbarAction::Block(BlockType::ListItem) => "format_list_bulleted",
            ToolbarAction::Link => "link",
        }
    }
}

impl fmt::Display for ToolbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolbarAction::Mark(ty) => write!(f, "{ty}"),
            ToolbarAction::Block(ty) => write!(f, "{ty}"),
            ToolbarAction::Link => f.write_str(InlineType::Link.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    pub action: ToolbarAction,
    pub icon: &'static str,
    pub active: bool,
}

impl ToolbarButton {
    pub fn opacity(&self, style: &ToolbarStyle) -> f32 {
        if self.active {
            style.active_opacity
        } else {
            style.inactive_opacity
        }
    }
}

/// Snapshot of the toolbar for the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    pub buttons: Vec<ToolbarButton>,
}

impl Toolbar {
    pub fn button(&self, action: ToolbarAction) -> Option<&ToolbarButton> {
        self.buttons.iter().find(|b| b.action == action)
    }

    pub fn is_active(&self, action: ToolbarAction) -> bool {
        self.button(action).is_some_and(|b| b.active)
    }

    /// Actions of the active buttons, in display order
    pub fn active(&self) -> Vec<ToolbarAction> {
        self.buttons
            .iter()
            .filter(|b| b.active)
            .map(|b| b.action)
            .collect()
    }
}
