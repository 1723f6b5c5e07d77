pub mod block;
pub mod color;
pub mod element;
pub mod registry;
pub mod style;
pub mod tag;

pub use block::ScenarioBlock;
pub use color::Color;
pub use element::ElementType;
pub use registry::StyleRegistry;
pub use style::{
    resolve, Alignment, BlockFormat, Capitalization, CharFormat, StyleConfig, StyleProfile,
};
pub use tag::{attach, type_of, TaggedUnit};

#[cfg(test)]
mod tests;
