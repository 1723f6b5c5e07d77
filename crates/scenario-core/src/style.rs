use crate::color::Color;
use crate::element::ElementType;
use serde::{Deserialize, Serialize};

/// Paragraph spacing unit.
const SPACING: i32 = 15;
const INDENT_DIALOG: i32 = 100;
const INDENT_NARROW: i32 = 150;
const INDENT_WIDE: i32 = 200;

const TITLE_HEADER_TEXT: &str = "Title:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capitalization {
    #[default]
    Mixed,
    AllUppercase,
}

/// Color values the rule table reads from the application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub text_color: Color,
    pub nonprintable_text_color: Color,
    pub folder_background_color: Color,
    pub folder_text_color: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            nonprintable_text_color: Color::rgb(0x80, 0x80, 0x80),
            folder_background_color: Color::rgb(0xd3, 0xd3, 0xd3),
            folder_text_color: Color::BLACK,
        }
    }
}

/// Paragraph-level layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockFormat {
    pub top_margin: i32,
    pub left_margin: i32,
    pub right_margin: i32,
    pub alignment: Alignment,
    pub background: Option<Color>,
}

/// Run-level text attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharFormat {
    pub capitalization: Capitalization,
    pub foreground: Color,
    pub prefix: String,
    pub postfix: String,
    pub first_uppercase: bool,
    pub can_modify: bool,
}

impl CharFormat {
    fn base(config: &StyleConfig) -> Self {
        Self {
            capitalization: Capitalization::Mixed,
            foreground: config.text_color,
            prefix: String::new(),
            postfix: String::new(),
            first_uppercase: true,
            can_modify: true,
        }
    }
}

/// Formatting resolved for one element type under one configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProfile {
    block_type: ElementType,
    header_type: ElementType,
    header: Option<String>,
    block_format: BlockFormat,
    char_format: CharFormat,
}

impl StyleProfile {
    pub fn new(block_type: ElementType, config: &StyleConfig) -> Self {
        let mut block = BlockFormat::default();
        let mut chars = CharFormat::base(config);
        let mut header_type = ElementType::Undefined;
        let mut header = None;

        match block_type {
            ElementType::TimeAndPlace | ElementType::Note => {
                block.top_margin = SPACING;
                chars.capitalization = Capitalization::AllUppercase;
            }
            ElementType::Action => {
                block.top_margin = SPACING;
            }
            ElementType::Character => {
                block.top_margin = SPACING;
                block.left_margin = INDENT_WIDE;
                chars.capitalization = Capitalization::AllUppercase;
            }
            ElementType::Parenthetical => {
                block.left_margin = INDENT_NARROW;
                block.right_margin = INDENT_NARROW;
                chars.first_uppercase = false;
                chars.prefix = String::from("(");
                chars.postfix = String::from(")");
            }
            ElementType::Dialog => {
                block.left_margin = INDENT_DIALOG;
                block.right_margin = INDENT_DIALOG;
            }
            ElementType::Transition => {
                block.top_margin = SPACING;
                block.alignment = Alignment::Right;
                chars.capitalization = Capitalization::AllUppercase;
            }
            ElementType::TitleHeader => {
                block.top_margin = SPACING;
                chars.capitalization = Capitalization::AllUppercase;
                chars.can_modify = false;
            }
            ElementType::Title => {
                block.left_margin = INDENT_NARROW;
                block.right_margin = INDENT_NARROW;
                header_type = ElementType::TitleHeader;
                header = Some(String::from(TITLE_HEADER_TEXT));
            }
            ElementType::NoprintableText => {
                block.top_margin = SPACING;
                block.left_margin = INDENT_WIDE;
                chars.foreground = config.nonprintable_text_color;
            }
            ElementType::SceneGroupHeader | ElementType::SceneGroupFooter => {
                block.top_margin = SPACING;
                chars.capitalization = Capitalization::AllUppercase;
            }
            ElementType::FolderHeader | ElementType::FolderFooter => {
                block.top_margin = SPACING;
                block.background = Some(config.folder_background_color);
                chars.foreground = config.folder_text_color;
                chars.capitalization = Capitalization::AllUppercase;
            }
            ElementType::Undefined => {}
        }

        Self {
            block_type,
            header_type,
            header,
            block_format: block,
            char_format: chars,
        }
    }

    pub fn block_type(&self) -> ElementType {
        self.block_type
    }

    pub fn block_format(&self) -> &BlockFormat {
        &self.block_format
    }

    pub fn char_format(&self) -> &CharFormat {
        &self.char_format
    }

    pub fn top_margin(&self) -> i32 {
        self.block_format.top_margin
    }

    pub fn left_margin(&self) -> i32 {
        self.block_format.left_margin
    }

    pub fn right_margin(&self) -> i32 {
        self.block_format.right_margin
    }

    pub fn alignment(&self) -> Alignment {
        self.block_format.alignment
    }

    pub fn background(&self) -> Option<Color> {
        self.block_format.background
    }

    pub fn capitalization(&self) -> Capitalization {
        self.char_format.capitalization
    }

    pub fn foreground(&self) -> Color {
        self.char_format.foreground
    }

    pub fn is_first_uppercase(&self) -> bool {
        self.char_format.first_uppercase
    }

    /// False for generated text the user may not edit.
    pub fn is_can_modify(&self) -> bool {
        self.char_format.can_modify
    }

    pub fn prefix(&self) -> &str {
        &self.char_format.prefix
    }

    pub fn postfix(&self) -> &str {
        &self.char_format.postfix
    }

    pub fn has_decoration(&self) -> bool {
        !self.prefix().is_empty() || !self.postfix().is_empty()
    }

    pub fn header_type(&self) -> ElementType {
        self.header_type
    }

    /// Label rendered before the block's content, empty when there is none.
    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or("")
    }

    pub fn has_header(&self) -> bool {
        !self.header().is_empty()
    }

    pub fn is_header(&self) -> bool {
        self.block_type == ElementType::TitleHeader
    }

    pub fn is_embeddable(&self) -> bool {
        self.block_type.is_embeddable()
    }

    pub fn is_embeddable_header(&self) -> bool {
        self.block_type.is_embeddable_header()
    }

    pub fn embeddable_footer(&self) -> ElementType {
        self.block_type.embeddable_footer()
    }
}

/// Resolve the style profile for `block_type` under `config`.
pub fn resolve(block_type: ElementType, config: &StyleConfig) -> StyleProfile {
    StyleProfile::new(block_type, config)
}
