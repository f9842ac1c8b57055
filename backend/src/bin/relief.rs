//! relief command-line driver
//!
//! Loads a directory document, applies the map filters, clusters what is
//! left at a zoom level and prints a JSON report with each member's
//! open/closed status. With `--suggest` it prints type-ahead matches
//! instead, capped at `[directory] suggestion_limit`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin relief -- data/directory.json --zoom 12 --open-now
//! cargo run --bin relief -- data/directory.json --at 2025-01-27T09:00:00 \
//!     --kind resources --category "Food & Water" --category "Legal Aid"
//! cargo run --bin relief -- data/directory.json --suggest pan
//! ```
//!
//! # Environment Variables
//!
//! - `RELIEF_CONFIG`: Path to a TOML config file (default: search for `relief.toml`)
//! - `RUST_LOG`: Log level (default: config `[logging] level`, else info)

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, Local, NaiveDateTime};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use relief_map::algorithms::{Cluster, ClusterPreview, SpatialClusterer};
use relief_map::config::ReliefConfig;
use relief_map::models::{Coordinates, EntityId, EntityKind, LocatedEntity};
use relief_map::parsing::parse_directory_file;
use relief_map::services::{
    filter_entities, is_open_at, resolve, search_first, status_label, suggestions,
    AvailabilityStatus, DirectoryFilter,
};

const USAGE: &str = "usage: relief <directory.json> [--zoom N] [--at YYYY-MM-DDTHH:MM[:SS]] \
[--kind resources|donations|volunteering] [--category NAME]... [--open-now] [--search TEXT] \
[--suggest TEXT] [--config PATH]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    zoom: i32,
    at: Option<NaiveDateTime>,
    filter: DirectoryFilter,
    search: Option<String>,
    suggest: Option<String>,
    config: Option<PathBuf>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs> {
    let mut input = None;
    let mut zoom = 12;
    let mut at = None;
    let mut filter = DirectoryFilter::default();
    let mut search = None;
    let mut suggest = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| anyhow!("{} needs a value", flag));
        match arg.as_str() {
            "--zoom" => {
                zoom = value("--zoom")?
                    .parse()
                    .context("--zoom must be an integer")?
            }
            "--at" => at = Some(parse_instant(&value("--at")?)?),
            "--kind" => {
                filter.kind = Some(value("--kind")?.parse::<EntityKind>().map_err(|e| anyhow!(e))?)
            }
            "--category" => filter.categories.push(value("--category")?),
            "--open-now" => filter.open_now = true,
            "--search" => search = Some(value("--search")?),
            "--suggest" => suggest = Some(value("--suggest")?),
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
            path => {
                if input.replace(PathBuf::from(path)).is_some() {
                    bail!("only one input file may be given\n{}", USAGE);
                }
            }
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| anyhow!(USAGE))?,
        zoom,
        at,
        filter,
        search,
        suggest,
        config,
    })
}

fn parse_instant(value: &str) -> Result<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .with_context(|| format!("--at: cannot parse '{}' as a local date and time", value))
}

fn init_logging(config: &ReliefConfig) {
    let level = env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::INFO);

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct Suggestion<'a> {
    id: &'a EntityId,
    name: &'a str,
    kind: EntityKind,
}

#[derive(Serialize)]
struct MemberReport<'a> {
    id: &'a EntityId,
    name: &'a str,
    kind: EntityKind,
    types: &'a [String],
    open_now: bool,
    status: AvailabilityStatus,
    label: String,
}

#[derive(Serialize)]
struct ClusterReport<'a> {
    centroid: Coordinates,
    count: usize,
    aggregate: bool,
    colors: Vec<&'static str>,
    preview: ClusterPreview<'a>,
    members: Vec<MemberReport<'a>>,
}

#[derive(Serialize)]
struct Report<'a> {
    reference_instant: NaiveDateTime,
    zoom: i32,
    threshold_deg: Option<f64>,
    loaded: usize,
    shown: usize,
    clusters: Vec<ClusterReport<'a>>,
}

fn suggestion_report<'a>(
    entities: &'a [LocatedEntity],
    query: &str,
    config: &ReliefConfig,
) -> Vec<Suggestion<'a>> {
    suggestions(entities, query, config.directory.suggestion_limit)
        .into_iter()
        .map(|entity| Suggestion {
            id: &entity.id,
            name: entity.display_name(),
            kind: entity.kind,
        })
        .collect()
}

fn cluster_report<'a>(
    cluster: &Cluster<'a, LocatedEntity>,
    zoom: i32,
    at: NaiveDateTime,
    config: &ReliefConfig,
) -> ClusterReport<'a> {
    let members = cluster
        .members()
        .iter()
        .map(|&entity| {
            let status = resolve(&entity.hours_of_operation, at);
            MemberReport {
                id: &entity.id,
                name: entity.display_name(),
                kind: entity.kind,
                types: &entity.types,
                open_now: is_open_at(entity, at),
                label: status_label(&status, at.weekday()),
                status,
            }
        })
        .collect();

    ClusterReport {
        centroid: cluster.centroid(),
        count: cluster.len(),
        aggregate: cluster
            .renders_as_aggregate(zoom, config.clustering.aggregate_marker_zoom_below),
        colors: cluster.colors(),
        preview: cluster.preview(config.directory.popup_preview_limit),
        members,
    }
}

fn main() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => ReliefConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReliefConfig::load().context("Failed to load configuration")?,
    };
    init_logging(&config);

    let at = args.at.unwrap_or_else(|| Local::now().naive_local());
    info!(input = %args.input.display(), zoom = args.zoom, %at, "building map report");

    let entities = parse_directory_file(&args.input)
        .with_context(|| format!("Failed to load directory {}", args.input.display()))?;

    if let Some(query) = args.suggest.as_deref() {
        let matches = suggestion_report(&entities, query, &config);
        let json = serde_json::to_string_pretty(&matches).context("Failed to serialize suggestions")?;
        println!("{}", json);
        info!(query, matches = matches.len(), "done");
        return Ok(());
    }

    let shown: Vec<LocatedEntity> = match args.search.as_deref() {
        Some(query) => search_first(&entities, query).cloned().into_iter().collect(),
        None => filter_entities(&entities, &args.filter, at)
            .into_iter()
            .cloned()
            .collect(),
    };

    let clusterer = SpatialClusterer::new(config.clustering.thresholds);
    let clusters = clusterer.cluster(&shown, args.zoom);
    let threshold = clusterer.thresholds().threshold_for(args.zoom);

    let report = Report {
        reference_instant: at,
        zoom: args.zoom,
        threshold_deg: threshold.is_finite().then_some(threshold),
        loaded: entities.len(),
        shown: shown.len(),
        clusters: clusters
            .iter()
            .map(|c| cluster_report(c, args.zoom, at, &config))
            .collect(),
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);
    info!(clusters = report.clusters.len(), "done");
    Ok(())
}
