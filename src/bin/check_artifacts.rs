//! Artifact check utility for homeprice.
//!
//! Loads the column manifest and model the same way the server does, runs
//! the same consistency checks, and prints a summary with SHA-256
//! fingerprints. Exits non-zero if the artifacts would fail to load.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin check_artifacts -- [<artifact_dir>] [--columns <path>] [--model <path>] [--list]
//! ```

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use homeprice::adapters::fs::{FsArtifacts, DEFAULT_ARTIFACT_DIR};
use homeprice::ArtifactStore;

struct Args {
    dir: PathBuf,
    columns: Option<PathBuf>,
    model: Option<PathBuf>,
    list: bool,
}

fn usage() -> anyhow::Error {
    anyhow!("Usage: check_artifacts [<artifact_dir>] [--columns <path>] [--model <path>] [--list]")
}

fn parse_args() -> Result<Args> {
    let mut args = env::args().skip(1);
    let mut dir: Option<PathBuf> = None;
    let mut columns = None;
    let mut model = None;
    let mut list = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--columns" => columns = Some(PathBuf::from(args.next().ok_or_else(usage)?)),
            "--model" => model = Some(PathBuf::from(args.next().ok_or_else(usage)?)),
            "--list" => list = true,
            "-h" | "--help" => return Err(usage()),
            _ if dir.is_none() && !arg.starts_with('-') => dir = Some(PathBuf::from(arg)),
            _ => return Err(usage()),
        }
    }

    Ok(Args {
        dir: dir.unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_DIR)),
        columns,
        model,
        list,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = parse_args()?;
    let defaults = FsArtifacts::in_dir(Path::new(&args.dir));
    let source = FsArtifacts::new(
        args.columns.unwrap_or_else(|| defaults.columns_path().to_path_buf()),
        args.model.unwrap_or_else(|| defaults.model_path().to_path_buf()),
    );

    println!("Columns: {}", source.columns_path().display());
    println!("Model:   {}", source.model_path().display());

    let store = ArtifactStore::new(source);
    let loaded = store.ensure_loaded()?;
    let manifest = loaded.manifest();

    println!("Features:  {}", manifest.len());
    println!("Locations: {}", manifest.locations().len());
    if let Some(fp) = loaded.fingerprint() {
        println!("columns sha256={}", fp.columns_sha256);
        println!("model   sha256={}", fp.model_sha256);
    }

    if args.list {
        for location in manifest.locations() {
            println!("  {location}");
        }
    }

    println!("OK");
    Ok(())
}
