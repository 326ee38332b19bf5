//! Built-in tag table.

use richtext_core::{BlockType, InlineType, MarkType};

use super::TagRule;

/// Create the standard rules, in registration order
pub fn standard_rules() -> Vec<TagRule> {
    let mut rules = block_rules();
    rules.extend(mark_rules());
    rules.extend(inline_rules());
    rules
}

fn block_rules() -> Vec<TagRule> {
    vec![
        TagRule::block("p", BlockType::Paragraph).carrying_attribute(),
        TagRule::block("blockquote", BlockType::BlockQuote),
        TagRule::block("h3", BlockType::Heading),
        TagRule::block("ul", BlockType::BulletedList),
        TagRule::block("ol", BlockType::NumberedList),
        TagRule::block("li", BlockType::ListItem),
    ]
}

fn mark_rules() -> Vec<TagRule> {
    vec![
        TagRule::mark("em", MarkType::Italic),
        TagRule::mark("strong", MarkType::Bold),
        TagRule::mark("u", MarkType::Underlined),
    ]
}

fn inline_rules() -> Vec<TagRule> {
    vec![TagRule::inline("a", InlineType::Link).carrying_attribute()]
}
