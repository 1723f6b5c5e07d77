// Scenarist library exports

pub mod config;
pub mod document;

pub use config::Settings;
pub use document::ScenarioDocument;
