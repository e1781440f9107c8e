//! Replays saved region annotations against a spot template.
//!
//! The annotation file may be a name-keyed dump or an id-keyed snapshot.
//! With `--save`, the resulting regions are stored as an annotation
//! document.

use clap::Parser;
use spotlasso_core::storage::{AnnotationDocument, FileStorage, Storage};
use spotlasso_core::template::JsonFileTemplate;
use spotlasso_core::{RegionDump, RegionSet, SelectResult, SelectorConfig, Snapshot};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "spotlasso")]
#[command(about = "Replay region annotations against a spot template", long_about = None)]
struct Cli {
    /// JSON file of spots: `[{"id": 0, "x": .., "y": ..}, ...]`
    spots: PathBuf,

    /// Dump or snapshot to load onto the template
    annotations: Option<PathBuf>,

    /// Engine config file (JSON)
    #[arg(long, env = "SPOTLASSO_CONFIG")]
    config: Option<PathBuf>,

    /// Save the regions as an annotation document with this name
    #[arg(long, value_name = "NAME")]
    save: Option<String>,

    /// Directory for saved documents (defaults to the user data directory)
    #[arg(long, value_name = "DIR", requires = "save")]
    store: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<SelectorConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = SelectorConfig::from_json(&json)?;
            log::info!("Using config from {}", path.display());
            Ok(config)
        }
        None => Ok(SelectorConfig::default()),
    }
}

/// Restore regions from either annotation format.
fn load_annotations(regions: &mut RegionSet, json: &str) -> SelectResult<usize> {
    let is_snapshot = serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|v| v.get("version").map(|version| version.is_u64()))
        .unwrap_or(false);
    let ids = if is_snapshot {
        regions.restore(&Snapshot::from_json(json)?)?
    } else {
        regions.load_dump(&RegionDump::from_json(json)?)?
    };
    Ok(ids.len())
}

/// Store the current regions under `name`, returning the new document id.
fn save_annotations(
    storage: &dyn Storage,
    regions: &RegionSet,
    name: &str,
    sample: Option<&str>,
) -> Result<String, Box<dyn Error>> {
    let mut document = AnnotationDocument::new(name, regions.snapshot());
    if let Some(sample) = sample {
        document = document.with_sample(sample);
    }
    pollster::block_on(storage.save(&document.id, &document))?;
    Ok(document.id)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut regions = RegionSet::new(load_config(cli.config.as_deref())?)?;
    pollster::block_on(regions.load_template_from(&JsonFileTemplate::new(&cli.spots)))?;

    if let Some(path) = &cli.annotations {
        let json = std::fs::read_to_string(path)?;
        let count = load_annotations(&mut regions, &json)?;
        log::info!("Loaded {} regions from {}", count, path.display());
    }

    for region in regions.regions() {
        println!(
            "{}\t{}\t{} spots",
            region.id(),
            if region.name().is_empty() { "(unnamed)" } else { region.name() },
            region.owned_ids().len()
        );
    }

    match &cli.save {
        Some(name) => {
            let storage = match cli.store {
                Some(dir) => FileStorage::new(dir)?,
                None => FileStorage::default_location()?,
            };
            let sample = cli.spots.file_stem().and_then(|s| s.to_str());
            let id = save_annotations(&storage, &regions, name, sample)?;
            println!("saved {} to {}", id, storage.base_path().display());
        }
        None => println!("{}", regions.snapshot().to_json()?),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting spotlasso");

    if let Err(e) = run(Cli::parse()) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotlasso_core::storage::MemoryStorage;
    use spotlasso_core::{Spot, SpotTemplate};

    fn session() -> RegionSet {
        let mut regions = RegionSet::default();
        regions.load_template(
            SpotTemplate::new(vec![Spot::new(0, 0.0, 0.0), Spot::new(1, 10.0, 10.0)]).unwrap(),
        );
        regions
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "spotlasso",
            "spots.json",
            "regions.json",
            "--config",
            "engine.json",
            "--save",
            "slice 3",
        ])
        .unwrap();
        assert_eq!(cli.spots, PathBuf::from("spots.json"));
        assert_eq!(cli.annotations, Some(PathBuf::from("regions.json")));
        assert_eq!(cli.config, Some(PathBuf::from("engine.json")));
        assert_eq!(cli.save.as_deref(), Some("slice 3"));
        assert_eq!(cli.store, None);
    }

    #[test]
    fn test_spots_required_and_store_needs_save() {
        assert!(Cli::try_parse_from(["spotlasso"]).is_err());
        assert!(Cli::try_parse_from(["spotlasso", "spots.json", "--store", "out"]).is_err());
    }

    #[test]
    fn test_loads_dump() {
        let mut regions = session();
        let json = r#"{"A": {"vertices": [[[-1, -1], [1, 1]]], "pointIds": [0]}}"#;
        assert_eq!(load_annotations(&mut regions, json).unwrap(), 1);
        assert_eq!(regions.region_at(0).unwrap().name(), "A");
    }

    #[test]
    fn test_loads_snapshot() {
        let mut source = session();
        source.begin_draw().unwrap();
        let id = source.commit(vec![[9.0, 9.0], [11.0, 11.0]]).unwrap();
        source.rename(id, "B").unwrap();
        let json = source.snapshot().to_json().unwrap();

        let mut regions = session();
        assert_eq!(load_annotations(&mut regions, &json).unwrap(), 1);
        assert_eq!(regions.region_at(0).unwrap().owned_ids(), &[1]);
    }

    #[test]
    fn test_rejects_garbage() {
        let mut regions = session();
        assert!(load_annotations(&mut regions, "[1, 2]").is_err());
    }

    #[test]
    fn test_save_annotations() {
        let mut regions = session();
        regions.begin_draw().unwrap();
        let id = regions.commit(vec![[-1.0, -1.0], [1.0, 1.0]]).unwrap();
        regions.rename(id, "core").unwrap();

        let storage = MemoryStorage::new();
        let doc_id = save_annotations(&storage, &regions, "slice 3", Some("brain")).unwrap();

        let doc = pollster::block_on(storage.load(&doc_id)).unwrap();
        assert_eq!(doc.name, "slice 3");
        assert_eq!(doc.sample.as_deref(), Some("brain"));
        assert_eq!(doc.snapshot, regions.snapshot());
    }
}
