use crate::element::ElementType;
use crate::style::{BlockFormat, Capitalization, CharFormat, StyleProfile};
use crate::tag::{self, TaggedUnit};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// One paragraph of a script together with the formatting applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenarioBlock {
    pub text: String,
    tag: Option<i32>,
    header: Option<String>,
    block_format: Option<BlockFormat>,
    char_format: Option<CharFormat>,
}

impl ScenarioBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn styled(text: impl Into<String>, profile: &StyleProfile) -> Self {
        let mut block = Self::new(text);
        block.apply(profile);
        block
    }

    /// Copy the profile's formats onto the block and tag it with the type.
    pub fn apply(&mut self, profile: &StyleProfile) {
        self.block_format = Some(profile.block_format().clone());
        self.char_format = Some(profile.char_format().clone());
        self.header = profile.has_header().then(|| profile.header().to_string());
        tag::attach(self, profile);
    }

    pub fn element_type(&self) -> ElementType {
        tag::type_of(self)
    }

    pub fn block_format(&self) -> Option<&BlockFormat> {
        self.block_format.as_ref()
    }

    pub fn char_format(&self) -> Option<&CharFormat> {
        self.char_format.as_ref()
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn is_editable(&self) -> bool {
        self.char_format.as_ref().map_or(true, |f| f.can_modify)
    }

    /// Text as it should be presented: capitalization and decoration applied.
    pub fn display_text(&self) -> String {
        let Some(format) = &self.char_format else {
            return self.text.clone();
        };

        let mut text = match format.capitalization {
            Capitalization::AllUppercase => self.text.to_uppercase(),
            Capitalization::Mixed if format.first_uppercase => uppercase_first(&self.text),
            Capitalization::Mixed => self.text.clone(),
        };

        if !format.prefix.is_empty() && !text.starts_with(&format.prefix) {
            text.insert_str(0, &format.prefix);
        }
        if !format.postfix.is_empty() && !text.ends_with(&format.postfix) {
            text.push_str(&format.postfix);
        }
        text
    }
}

impl TaggedUnit for ScenarioBlock {
    fn type_tag(&self) -> Option<i32> {
        self.tag
    }

    fn set_type_tag(&mut self, tag: i32) {
        self.tag = Some(tag);
    }
}

fn uppercase_first(text: &str) -> String {
    let mut graphemes = text.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(graphemes.as_str());
            out
        }
        None => String::new(),
    }
}
