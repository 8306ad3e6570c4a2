mod config;
mod error;
mod logging;
mod snapshot;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use atlas_core::detail::DetailView;
use atlas_core::location::{PlotPoint, Projection, Resolution};
use atlas_core::search::{Ranking, SearchOptions};
use atlas_core::view::{self, EventCard};
use atlas_core::{Event, Explorer, LatLng, SortMode, query};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::{AtlasConfig, Overrides};
use crate::error::AtlasError;

#[derive(Parser)]
#[command(
    name = "atlas",
    about = "Browse exported Vietnamese history collections"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding the collection snapshots
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Settings file (defaults to ./atlas.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Coordinate system for map points
    #[arg(long, global = true, value_enum)]
    projection: Option<ProjectionArg>,

    /// Debug-level diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Canvas,
    Geographic,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Canvas => Projection::Canvas,
            ProjectionArg::Geographic => Projection::Geographic,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Event, period and year-span counts
    Stats {
        #[arg(long)]
        period: Option<String>,
    },
    /// Event cards under a period / sub-period filter
    List {
        /// Period id, or "all"
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        sub_period: Option<String>,
        /// date-asc, date-desc, name-asc or name-desc
        #[arg(long, default_value_t = SortMode::DateAsc)]
        sort: SortMode,
    },
    /// Multi-word search over titles and descriptions
    Search {
        query: Vec<String>,
        /// Use the map panel's result limit
        #[arg(long)]
        map: bool,
        /// Order by relevance score instead of title match
        #[arg(long)]
        scored: bool,
    },
    /// Full detail view of one event
    Show { id: String },
    /// Where an event lands on the map, and which rule placed it
    Locate { id: String },
    /// Map markers and annotations under a filter
    Map {
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        sub_period: Option<String>,
    },
    /// Timeline items, window and legend under a period filter
    Timeline {
        #[arg(long)]
        period: Option<String>,
    },
    /// Events dated within a year range (negative years are BC)
    #[command(allow_negative_numbers = true)]
    Range { start: i32, end: i32 },
    /// Events with coordinates near a point, nearest first
    #[command(allow_negative_numbers = true)]
    Near {
        lat: f64,
        lng: f64,
        /// Radius in metres
        #[arg(long)]
        distance: Option<f64>,
    },
    /// Write card, map, timeline and stats JSON for the whole collection
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{e}");
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AtlasError> {
    let settings = config::load_config(cli.config.as_deref())?.with_overrides(Overrides {
        data_dir: cli.data_dir,
        output_dir: match &cli.command {
            Some(Command::Export { out }) => out.clone(),
            _ => None,
        },
        projection: cli.projection.map(Projection::from),
    });
    let mut explorer = snapshot::load(&settings.data_dir, settings.projection)?;
    if let Some(banner) = explorer.banner() {
        warn!("{banner}");
    }

    match cli.command.unwrap_or(Command::Stats { period: None }) {
        Command::Stats { period } => {
            select(&mut explorer, period.as_deref(), None);
            print_json(&explorer.stats())
        }
        Command::List {
            period,
            sub_period,
            sort,
        } => {
            select(&mut explorer, period.as_deref(), sub_period.as_deref());
            explorer.sort(sort);
            print_json(&explorer.list_view())
        }
        Command::Search { query, map, scored } => {
            explorer.set_query(&query.join(" "));
            run_search(&explorer, map, scored)
        }
        Command::Show { id } => {
            let event = find(&explorer, &id)?;
            print_json(&DetailView::build(explorer.catalog(), event))
        }
        Command::Locate { id } => run_locate(&explorer, &id),
        Command::Map { period, sub_period } => {
            select(&mut explorer, period.as_deref(), sub_period.as_deref());
            print_json(&explorer.map_view())
        }
        Command::Timeline { period } => {
            select(&mut explorer, period.as_deref(), None);
            print_json(&explorer.timeline_view())
        }
        Command::Range { start, end } => {
            let found = query::in_year_range(explorer.catalog().events(), start, end);
            info!(start, end, found = found.len(), "year range");
            print_json(&view::event_cards(explorer.catalog(), &found))
        }
        Command::Near { lat, lng, distance } => run_near(&explorer, LatLng { lat, lng }, distance),
        Command::Export { .. } => run_export(&explorer, &settings),
    }
}

fn select(explorer: &mut Explorer, period: Option<&str>, sub_period: Option<&str>) {
    if let Some(period) = period {
        explorer.filter_by_period(period);
    }
    if let Some(sub) = sub_period {
        explorer.filter_by_sub_period(sub);
    }
}

fn find<'a>(explorer: &'a Explorer, id: &str) -> Result<&'a Event, AtlasError> {
    explorer
        .catalog()
        .event(id)
        .ok_or_else(|| AtlasError::UnknownEvent(id.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn print_json<T: Serialize>(data: &T) -> Result<(), AtlasError> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn write_json<T: Serialize>(dir: &Path, name: &str, data: &T) -> Result<(), AtlasError> {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(&path, &json).map_err(|e| AtlasError::io(&path, e))?;
    info!(path = %path.display(), bytes = json.len(), "wrote");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  COMMANDS
// ═══════════════════════════════════════════════════════════════════════

fn run_search(explorer: &Explorer, map: bool, scored: bool) -> Result<(), AtlasError> {
    let mut options = if map {
        SearchOptions::map()
    } else {
        SearchOptions::list()
    };
    if scored {
        options.ranking = Ranking::Scored;
    }
    match explorer.current_hits(options) {
        Some(hits) => print_json(&hits),
        None => {
            warn!(query = explorer.filter().query(), "query too short, nothing searched");
            print_json(&Vec::<view::SearchHit>::new())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Located<'a> {
    id: &'a str,
    title: &'a str,
    location: &'a str,
    point: Option<PlotPoint>,
    resolution: Option<Resolution>,
}

fn run_locate(explorer: &Explorer, id: &str) -> Result<(), AtlasError> {
    let event = find(explorer, id)?;
    let found = explorer.resolver().resolve_detailed(event.location.as_ref());
    print_json(&Located {
        id,
        title: event.title_or_default(),
        location: event.location_label(),
        point: found.map(|(point, _)| point),
        resolution: found.map(|(_, how)| how),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NearHit {
    #[serde(flatten)]
    card: EventCard,
    distance_m: f64,
}

fn run_near(explorer: &Explorer, center: LatLng, distance: Option<f64>) -> Result<(), AtlasError> {
    let catalog = explorer.catalog();
    let hits: Vec<NearHit> = query::near(catalog.events(), center, distance)
        .into_iter()
        .map(|(event, d)| NearHit {
            card: EventCard::build(catalog, event),
            distance_m: d.round(),
        })
        .collect();
    info!(lat = center.lat, lng = center.lng, found = hits.len(), "near");
    print_json(&hits)
}

fn run_export(explorer: &Explorer, settings: &AtlasConfig) -> Result<(), AtlasError> {
    let dir = &settings.output_dir;
    std::fs::create_dir_all(dir).map_err(|e| AtlasError::io(dir, e))?;
    write_json(dir, "cards.json", &explorer.list_view())?;
    write_json(dir, "map.json", &explorer.map_view())?;
    write_json(dir, "timeline.json", &explorer.timeline_view())?;
    write_json(dir, "stats.json", &explorer.stats())?;

    let details: Vec<DetailView> = explorer
        .catalog()
        .events()
        .iter()
        .map(|e| DetailView::build(explorer.catalog(), e))
        .collect();
    write_json(dir, "details.json", &details)?;
    info!(dir = %dir.display(), events = details.len(), "export done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_years_parse() {
        let cli = Cli::try_parse_from(["atlas", "range", "-258", "938"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Range { start: -258, end: 938 })
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "atlas",
            "list",
            "--sort",
            "name-desc",
            "--data-dir",
            "dump",
            "--projection",
            "geographic",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("dump")));
        assert!(matches!(cli.projection, Some(ProjectionArg::Geographic)));
        assert!(matches!(
            cli.command,
            Some(Command::List { sort: SortMode::TitleDesc, .. })
        ));
    }

    #[test]
    fn test_bad_sort_mode_rejected() {
        assert!(Cli::try_parse_from(["atlas", "list", "--sort", "random"]).is_err());
    }
}
