use anyhow::Result;
use log::LevelFilter;
use scenarist::Settings;
use scenario_core::{ElementType, StyleProfile, StyleRegistry};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
        logger.filter_module("scenarist", LevelFilter::Debug);
        logger.filter_module("scenario_core", LevelFilter::Debug);
    }
    logger.init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    let settings = Settings::load().await?;
    let registry = StyleRegistry::new(settings.style_config()?);

    let profiles: Vec<StyleProfile> = match args.get(1) {
        Some(name) => {
            let block_type: ElementType = name.parse()?;
            vec![registry.resolve(block_type)]
        }
        None => registry.profiles().collect(),
    };
    log::debug!("Resolved {} style profiles", profiles.len());

    println!("{}", serde_json::to_string_pretty(&profiles)?);
    Ok(())
}

fn print_usage() {
    println!("Usage: scenarist [ELEMENT_TYPE]");
    println!();
    println!("Print the resolved style profile of ELEMENT_TYPE, or of every type, as JSON.");
    println!("Element types:");
    for block_type in ElementType::ALL {
        println!("  {}", block_type);
    }
}
