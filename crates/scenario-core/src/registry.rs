use crate::element::ElementType;
use crate::style::{StyleConfig, StyleProfile};
use crate::tag::{self, TaggedUnit};

/// Rule table bound to one configuration snapshot.
///
/// Holds no state besides the snapshot; every call builds a fresh profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRegistry {
    config: StyleConfig,
}

impl StyleRegistry {
    pub fn new(config: StyleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn resolve(&self, block_type: ElementType) -> StyleProfile {
        StyleProfile::new(block_type, &self.config)
    }

    /// Profiles for every element type, in declaration order.
    pub fn profiles(&self) -> impl Iterator<Item = StyleProfile> + '_ {
        ElementType::ALL.into_iter().map(move |ty| self.resolve(ty))
    }

    pub fn type_of<U: TaggedUnit + ?Sized>(&self, unit: &U) -> ElementType {
        tag::type_of(unit)
    }

    pub fn embeddable_footer(&self, block_type: ElementType) -> ElementType {
        block_type.embeddable_footer()
    }
}
