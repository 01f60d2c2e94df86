use crate::config::{Config, load_config};
use crate::placement::{PlacementEngine, Point};
use crate::scene::{Scene, parse_scene};
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mlbl", version, about = "Map tile label collision/placement engine")]
pub struct Args {
    /// Scene file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for placement records. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (default scale window and padding)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long = "pretty")]
    pub pretty: bool,
}

/// One output record per scene label, in scene order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub placed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_range: Option<(f32, f32)>,
}

pub fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let scene = parse_scene(&input)?;

    let records = place_scene(&scene, &config);
    let json = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    write_output(&json, args.output.as_deref())?;
    Ok(())
}

/// Run a whole scene through a fresh engine, one tile's worth of labels in
/// request order.
pub fn place_scene(scene: &Scene, config: &Config) -> Vec<PlacementRecord> {
    let mut engine = PlacementEngine::new();
    scene
        .labels
        .iter()
        .map(|label| {
            let boxes = label.glyph_boxes();
            let (min_scale, max_scale) = label.window(&config.engine);
            let padding = label.padding(&config.engine);
            let anchor: Point = label.anchor_point();

            let result = engine.place(&boxes, anchor, min_scale, max_scale, padding, label.horizontal);
            PlacementRecord {
                name: label.name.clone(),
                placed: result.is_some(),
                zoom: result.map(|p| p.zoom),
                rotation_range: result.map(|p| (p.range.min, p.range.max)),
            }
        })
        .collect()
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, json)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
