use anyhow::{anyhow, bail, Result};
use scenario_core::{type_of, ElementType, ScenarioBlock, StyleConfig, StyleRegistry, TaggedUnit};

/// In-memory script: an ordered list of blocks styled through one registry.
#[derive(Debug, Clone, Default)]
pub struct ScenarioDocument {
    blocks: Vec<ScenarioBlock>,
    registry: StyleRegistry,
}

impl ScenarioDocument {
    pub fn new(config: StyleConfig) -> Self {
        Self {
            blocks: Vec::new(),
            registry: StyleRegistry::new(config),
        }
    }

    /// Wrap blocks that were tagged elsewhere, e.g. by an importer.
    pub fn from_blocks(config: StyleConfig, blocks: Vec<ScenarioBlock>) -> Self {
        Self {
            blocks,
            registry: StyleRegistry::new(config),
        }
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn blocks(&self) -> &[ScenarioBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append an untagged block, returning its index.
    pub fn push(&mut self, text: impl Into<String>) -> usize {
        self.blocks.push(ScenarioBlock::new(text));
        self.blocks.len() - 1
    }

    pub fn insert(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        if index > self.blocks.len() {
            return Err(anyhow!(
                "Insert position {} is past the end of the document ({} blocks)",
                index,
                self.blocks.len()
            ));
        }
        self.blocks.insert(index, ScenarioBlock::new(text));
        Ok(())
    }

    pub fn block(&self, index: usize) -> Result<&ScenarioBlock> {
        self.blocks
            .get(index)
            .ok_or_else(|| anyhow!("Block {} does not exist ({} blocks)", index, self.blocks.len()))
    }

    pub fn block_type(&self, index: usize) -> Result<ElementType> {
        Ok(self.registry.type_of(self.block(index)?))
    }

    /// Style the block at `index` as `block_type`.
    ///
    /// Turning a block into a folder or scene group header also opens the
    /// region: the paired footer is inserted right after it. Retyping a header
    /// carries its region along: the old footer is retyped to the new header's
    /// footer, or removed when the block stops being a header. Footers only
    /// follow their header and cannot be set or retyped directly.
    pub fn set_block_type(&mut self, index: usize, block_type: ElementType) -> Result<()> {
        let previous = self.block_type(index)?;
        if block_type.is_embeddable_footer() && previous != block_type {
            bail!("Block {} cannot become {}: footers follow their header", index, block_type);
        }
        if previous.is_embeddable_footer() && previous != block_type {
            bail!(
                "Block {} is a {}, retype its {} instead",
                index,
                previous,
                previous.embeddable_header()
            );
        }

        let old_footer = if previous != block_type {
            self.matching_footer(index, previous)
        } else {
            None
        };

        let profile = self.registry.resolve(block_type);
        self.blocks[index].apply(&profile);
        log::debug!("Block {} restyled from {} to {}", index, previous, block_type);

        let footer_type = profile.embeddable_footer();
        match (old_footer, footer_type != ElementType::Undefined) {
            (Some(footer_index), true) => {
                self.blocks[footer_index].apply(&self.registry.resolve(footer_type));
                log::debug!("Block {} retyped to {}", footer_index, footer_type);
            }
            (Some(footer_index), false) => {
                self.blocks.remove(footer_index);
                log::debug!("Removed {} closing block {}", previous.embeddable_footer(), index);
            }
            (None, true) if previous != block_type => {
                let footer = ScenarioBlock::styled("", &self.registry.resolve(footer_type));
                self.blocks.insert(index + 1, footer);
                log::debug!("Inserted {} for block {}", footer_type, index);
            }
            _ => {}
        }
        Ok(())
    }

    /// Remove the block at `index`. Removing an embeddable header also removes
    /// the footer closing its region; the blocks in between are kept.
    pub fn remove_block(&mut self, index: usize) -> Result<ScenarioBlock> {
        let block_type = self.block_type(index)?;
        if block_type.is_embeddable_footer() {
            bail!(
                "Block {} is a {}, remove its {} instead",
                index,
                block_type,
                block_type.embeddable_header()
            );
        }
        if let Some(footer_index) = self.matching_footer(index, block_type) {
            self.blocks.remove(footer_index);
        }
        Ok(self.blocks.remove(index))
    }

    fn matching_footer(&self, header_index: usize, header_type: ElementType) -> Option<usize> {
        let footer_type = header_type.embeddable_footer();
        if footer_type == ElementType::Undefined {
            return None;
        }

        let mut depth = 0usize;
        for (offset, block) in self.blocks[header_index + 1..].iter().enumerate() {
            let ty = type_of(block);
            if ty == header_type {
                depth += 1;
            } else if ty == footer_type {
                if depth == 0 {
                    return Some(header_index + 1 + offset);
                }
                depth -= 1;
            }
        }
        None
    }

    /// Whether every embeddable footer closes a header of the matching kind.
    pub fn is_balanced(&self) -> bool {
        let mut open: Vec<ElementType> = Vec::new();
        for block in &self.blocks {
            let ty = type_of(block);
            if ty.is_embeddable_header() {
                open.push(ty);
            } else if ty.is_embeddable_footer() && open.pop() != Some(ty.embeddable_header()) {
                return false;
            }
        }
        open.is_empty()
    }

    /// Re-resolve every tagged block against a new configuration snapshot.
    ///
    /// Blocks carrying a tag this registry does not know keep it untouched.
    pub fn restyle(&mut self, config: StyleConfig) {
        self.registry = StyleRegistry::new(config);
        let mut restyled = 0;
        for (index, block) in self.blocks.iter_mut().enumerate() {
            let Some(tag) = block.type_tag() else {
                continue;
            };
            let ty = type_of(&*block);
            if ty == ElementType::Undefined && tag != ElementType::Undefined.tag() {
                log::debug!("Block {} keeps foreign tag {}", index, tag);
                continue;
            }
            block.apply(&self.registry.resolve(ty));
            restyled += 1;
        }
        log::info!("Restyled {} of {} blocks", restyled, self.blocks.len());
    }

    /// Presented text of the whole script, one line per block.
    pub fn to_display_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if let Some(header) = block.header() {
                lines.push(header.to_string());
            }
            lines.push(block.display_text());
        }
        lines.join("\n")
    }
}
