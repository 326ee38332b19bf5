//! Editor configuration.

use std::fmt;
use std::sync::Arc;

use richtext_core::BlockType;

use crate::service::HtmlSerializer;
use crate::utilities::looks_like_url;

/// Visual constants of the toolbar and the editing surface
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarStyle {
    /// Toolbar background color
    pub background: String,
    pub margin_bottom: u32,
    pub padding_left: u32,
    pub padding_right: u32,
    /// Icon font size in pixels
    pub icon_size: u32,
    /// Button padding, CSS shorthand
    pub button_padding: String,
    pub active_opacity: f32,
    pub inactive_opacity: f32,
    /// Minimum height of the editing surface
    pub editor_min_height: u32,
}

impl Default for ToolbarStyle {
    fn default() -> Self {
        Self {
            background: "#f2f2f2".to_string(),
            margin_bottom: 10,
            padding_left: 12,
            padding_right: 12,
            icon_size: 22,
            button_padding: "10px 15px".to_string(),
            active_opacity: 1.0,
            inactive_opacity: 0.3,
            editor_min_height: 200,
        }
    }
}

/// Options for [`crate::RichTextEditor`]
#[derive(Clone)]
pub struct EditorOptions {
    /// Placeholder shown while the document is empty
    pub placeholder: String,

    pub spell_check: bool,

    pub auto_focus: bool,

    /// Block type for loose content and for blocks leaving a list
    pub default_block: BlockType,

    pub style: ToolbarStyle,

    /// Decides whether pasted text is a URL to link
    pub url_detector: fn(&str) -> bool,

    pub serializer: Arc<HtmlSerializer>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            placeholder: "Enter text here...".to_string(),
            spell_check: true,
            auto_focus: true,
            default_block: BlockType::Paragraph,
            style: ToolbarStyle::default(),
            url_detector: looks_like_url,
            serializer: HtmlSerializer::shared(),
        }
    }
}

impl fmt::Debug for EditorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorOptions")
            .field("placeholder", &self.placeholder)
            .field("spell_check", &self.spell_check)
            .field("auto_focus", &self.auto_focus)
            .field("default_block", &self.default_block)
            .field("style", &self.style)
            .field("serializer", &self.serializer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EditorOptions::default();
        assert_eq!(options.placeholder, "Enter text here...");
        assert!(options.spell_check);
        assert!(options.auto_focus);
        assert_eq!(options.default_block, BlockType::Paragraph);
        assert!((options.url_detector)("https://example.com"));
        assert!(!(options.url_detector)("not a url"));
    }

    #[test]
    fn test_override_style() {
        let options = EditorOptions {
            style: ToolbarStyle {
                inactive_opacity: 0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(options.style.inactive_opacity, 0.5);
        assert_eq!(options.style.background, "#f2f2f2");
    }
}
