//! KMAP world map command implementations

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use console::style;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use kmap::KmapView;
use kmap_world::{ItemTypes, MapLoader, RecordError, World};

use crate::utils::{Listing, format_bytes, format_share};

#[derive(Subcommand)]
pub enum MapCommands {
    /// Display information about a map file
    Info {
        /// Path to the map file
        file: PathBuf,

        /// Show chunk, town and waypoint listings
        #[arg(short, long)]
        detailed: bool,
    },

    /// Validate a map file
    Validate {
        /// Path to the map file
        file: PathBuf,

        /// Item type definitions (JSON); enables record-level checks
        #[arg(long)]
        item_types: Option<PathBuf>,

        /// Fail when loading reports any record problem
        #[arg(long)]
        strict: bool,
    },

    /// Load a map into the world model and summarize it
    Load {
        /// Path to the map file
        file: PathBuf,

        /// Item type definitions (JSON)
        #[arg(long)]
        item_types: PathBuf,

        /// List every record problem
        #[arg(short, long)]
        detailed: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn execute(command: MapCommands) -> Result<()> {
    match command {
        MapCommands::Info { file, detailed } => execute_info(&file, detailed),
        MapCommands::Validate {
            file,
            item_types,
            strict,
        } => execute_validate(&file, item_types.as_deref(), strict),
        MapCommands::Load {
            file,
            item_types,
            detailed,
            json,
        } => execute_load(&file, &item_types, detailed, json),
    }
}

fn read_map(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read map file {}", path.display()))
}

fn read_item_types(path: &Path) -> Result<ItemTypes> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open item types {}", path.display()))?;
    let types = ItemTypes::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse item types {}", path.display()))?;
    log::debug!("Loaded {} item types from {}", types.len(), path.display());
    Ok(types)
}

fn load_world(path: &Path, data: &[u8], item_types: &ItemTypes) -> Result<(World, Vec<RecordError>)> {
    let mut loader = MapLoader::new(item_types).with_diagnostics(Vec::<RecordError>::new());
    let world = loader
        .load_bytes(data, path)
        .context("Failed to load map file")?;
    Ok((world, loader.into_diagnostics()))
}

fn execute_info(path: &Path, detailed: bool) -> Result<()> {
    let data = read_map(path)?;
    let view = KmapView::new(&data).context("Failed to parse map file")?;

    println!("{}", style("KMAP File Information").bold().cyan());
    println!("{}", style("=====================").cyan());
    println!();

    println!("{}: {}", style("File").bold(), path.display());
    println!("{}: {}", style("Size").bold(), format_bytes(data.len() as u64));
    println!("{}: {}", style("Version").bold(), view.version());
    println!(
        "{}: {}x{}",
        style("Dimensions").bold(),
        view.width(),
        view.height()
    );
    println!();

    println!("{}", style("Resource Files:").bold());
    println!("  Monster spawns: {}", view.monster_spawn_file());
    println!("  NPC spawns:     {}", view.npc_spawn_file());
    println!("  Houses:         {}", view.house_file());
    println!();

    println!("{}: {}", style("Areas").bold(), view.area_count());
    println!("{}: {}", style("Tiles").bold(), view.tile_count());
    println!("{}: {}", style("Towns").bold(), view.town_count());
    println!("{}: {}", style("Waypoints").bold(), view.waypoint_count());

    if detailed {
        let mut chunks = Listing::new("Chunks:", ["Chunk", "#Offset", "#Size"]);
        for chunk in view.chunks() {
            chunks.push([
                chunk.id.to_string(),
                format!("0x{:08X}", chunk.offset),
                format_bytes(u64::from(chunk.size)),
            ]);
        }
        chunks.print();

        let mut towns = Listing::new("Towns:", ["#ID", "Name", "Temple"]);
        for town in view.towns() {
            let town = town.context("Failed to decode town record")?;
            towns.push([town.id.to_string(), town.name, town.position.to_string()]);
        }
        towns.print();

        let mut waypoints = Listing::new("Waypoints:", ["Name", "Position"]);
        for waypoint in view.waypoints().into_iter().flatten() {
            let waypoint = waypoint.context("Failed to decode waypoint record")?;
            waypoints.push([waypoint.name, waypoint.position.to_string()]);
        }
        waypoints.print();
    }

    Ok(())
}

fn execute_validate(path: &Path, item_types: Option<&Path>, strict: bool) -> Result<()> {
    println!("{}", style("Validating KMAP File").bold().cyan());
    println!("{}", style("====================").cyan());
    println!();

    let data = read_map(path)?;

    if let Err(e) = KmapView::new(&data) {
        println!("{} {}", style("✗").red(), style(&e).red());
        bail!("{} is not a valid map file", path.display());
    }
    println!("{} {}", style("✓").green(), "Structure is valid");

    let Some(item_types) = item_types else {
        return Ok(());
    };

    let types = read_item_types(item_types)?;
    let (_, diagnostics) = load_world(path, &data, &types)?;

    if diagnostics.is_empty() {
        println!("{} {}", style("✓").green(), "All records load cleanly");
        return Ok(());
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.level() == log::Level::Error)
        .count();
    let warnings = diagnostics.len() - errors;

    let skipped = diagnostics.iter().filter(|d| d.skips_record()).count();
    println!(
        "{} {} error(s), {} warning(s) in records, {} record(s) skipped:",
        style("!").yellow(),
        errors,
        warnings,
        skipped
    );
    for diagnostic in &diagnostics {
        let bullet = if diagnostic.level() == log::Level::Error {
            style("•").red()
        } else {
            style("•").yellow()
        };
        println!("  {bullet} {diagnostic}");
    }

    if strict {
        bail!(
            "{} record problem(s), {} record(s) would be skipped",
            diagnostics.len(),
            skipped
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct LoadSummary {
    width: u16,
    height: u16,
    tiles: usize,
    static_tiles: usize,
    dynamic_tiles: usize,
    house_tiles: usize,
    houses: usize,
    towns: usize,
    waypoints: usize,
    diagnostics: usize,
    skipped_records: usize,
    monster_spawn_file: PathBuf,
    npc_spawn_file: PathBuf,
    house_file: PathBuf,
}

impl LoadSummary {
    fn new(world: &World, diagnostics: &[RecordError]) -> Self {
        let counts = world.tile_kind_counts();
        let files = world.resource_files();
        Self {
            width: world.width(),
            height: world.height(),
            tiles: world.tile_count(),
            static_tiles: counts.static_tiles,
            dynamic_tiles: counts.dynamic_tiles,
            house_tiles: counts.house_tiles,
            houses: world.houses().len(),
            towns: world.towns().len(),
            waypoints: world.waypoints().len(),
            diagnostics: diagnostics.len(),
            skipped_records: diagnostics.iter().filter(|d| d.skips_record()).count(),
            monster_spawn_file: files.monster_spawn_file.clone(),
            npc_spawn_file: files.npc_spawn_file.clone(),
            house_file: files.house_file.clone(),
        }
    }
}

fn execute_load(path: &Path, item_types: &Path, detailed: bool, json: bool) -> Result<()> {
    let types = read_item_types(item_types)?;
    let data = read_map(path)?;
    let (world, diagnostics) = load_world(path, &data, &types)?;
    let summary = LoadSummary::new(&world, &diagnostics);

    if json {
        let output =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{output}");
        return Ok(());
    }

    println!("{}", style("World Summary").bold().cyan());
    println!("{}", style("=============").cyan());
    println!();

    println!(
        "{}: {}x{}",
        style("Dimensions").bold(),
        summary.width,
        summary.height
    );

    let mut tiles = Listing::new("Tiles:", ["Kind", "#Count", "#Share"]);
    for (kind, count) in [
        ("Static", summary.static_tiles),
        ("Dynamic", summary.dynamic_tiles),
        ("House", summary.house_tiles),
    ] {
        tiles.push([
            kind.to_string(),
            count.to_string(),
            format_share(count, summary.tiles),
        ]);
    }
    tiles.print();
    println!();

    println!("{}: {}", style("Houses").bold(), summary.houses);
    println!("{}: {}", style("Towns").bold(), summary.towns);
    println!("{}: {}", style("Waypoints").bold(), summary.waypoints);
    println!();

    println!("{}", style("Resource Files:").bold());
    println!("  Monster spawns: {}", summary.monster_spawn_file.display());
    println!("  NPC spawns:     {}", summary.npc_spawn_file.display());
    println!("  Houses:         {}", summary.house_file.display());
    println!();

    if diagnostics.is_empty() {
        println!("{} No record problems", style("✓").green());
    } else {
        println!(
            "{} {} record problem(s), {} record(s) skipped",
            style("!").yellow(),
            summary.diagnostics,
            summary.skipped_records
        );
        if detailed {
            for diagnostic in &diagnostics {
                println!("  {} {}", style("•").yellow(), diagnostic);
            }
        }
    }

    Ok(())
}
