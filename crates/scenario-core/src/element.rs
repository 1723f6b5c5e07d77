use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic role of a paragraph in a screenplay.
///
/// Declaration order is the integer tag stored on content units, so new
/// variants must only ever be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    #[default]
    Undefined,
    TimeAndPlace,
    Action,
    Character,
    Parenthetical,
    Dialog,
    Transition,
    Note,
    TitleHeader,
    Title,
    NoprintableText,
    SceneGroupHeader,
    SceneGroupFooter,
    FolderHeader,
    FolderFooter,
}

impl ElementType {
    pub const ALL: [ElementType; 15] = [
        ElementType::Undefined,
        ElementType::TimeAndPlace,
        ElementType::Action,
        ElementType::Character,
        ElementType::Parenthetical,
        ElementType::Dialog,
        ElementType::Transition,
        ElementType::Note,
        ElementType::TitleHeader,
        ElementType::Title,
        ElementType::NoprintableText,
        ElementType::SceneGroupHeader,
        ElementType::SceneGroupFooter,
        ElementType::FolderHeader,
        ElementType::FolderFooter,
    ];

    /// Integer value written into a content unit's tag slot.
    pub fn tag(self) -> i32 {
        self as i32
    }

    /// Decode a stored tag. Values outside the enumeration read as `Undefined`.
    pub fn from_tag(value: i32) -> Self {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or_else(|| {
                log::debug!("Unknown element type tag {}, treating as undefined", value);
                ElementType::Undefined
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Undefined => "undefined",
            ElementType::TimeAndPlace => "time_and_place",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Dialog => "dialog",
            ElementType::Transition => "transition",
            ElementType::Note => "note",
            ElementType::TitleHeader => "title_header",
            ElementType::Title => "title",
            ElementType::NoprintableText => "noprintable_text",
            ElementType::SceneGroupHeader => "scene_group_header",
            ElementType::SceneGroupFooter => "scene_group_footer",
            ElementType::FolderHeader => "folder_header",
            ElementType::FolderFooter => "folder_footer",
        }
    }

    /// Folder and scene group markers: the foldable region boundaries.
    pub fn is_embeddable(self) -> bool {
        matches!(
            self,
            ElementType::SceneGroupHeader
                | ElementType::SceneGroupFooter
                | ElementType::FolderHeader
                | ElementType::FolderFooter
        )
    }

    pub fn is_embeddable_header(self) -> bool {
        matches!(self, ElementType::SceneGroupHeader | ElementType::FolderHeader)
    }

    pub fn is_embeddable_footer(self) -> bool {
        matches!(self, ElementType::SceneGroupFooter | ElementType::FolderFooter)
    }

    /// Footer that closes a region opened by this type, or `Undefined`.
    pub fn embeddable_footer(self) -> Self {
        match self {
            ElementType::SceneGroupHeader => ElementType::SceneGroupFooter,
            ElementType::FolderHeader => ElementType::FolderFooter,
            _ => ElementType::Undefined,
        }
    }

    /// Header that opens a region closed by this type, or `Undefined`.
    pub fn embeddable_header(self) -> Self {
        match self {
            ElementType::SceneGroupFooter => ElementType::SceneGroupHeader,
            ElementType::FolderFooter => ElementType::FolderHeader,
            _ => ElementType::Undefined,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.name() == wanted)
            .ok_or_else(|| anyhow!("Unknown element type: {}", s))
    }
}
