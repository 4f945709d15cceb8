//! Team Creator CLI
//!
//! Club teams from roster files, national teams from players.txt, plus the
//! nation availability scan and XI preview.

#[cfg(feature = "cli")]
use anyhow::{bail, Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tc_core::CreatorConfig;
#[cfg(feature = "cli")]
use team_creator::{NationMapping, TableFile, TeamCreator, TeamReport};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "team_creator")]
#[command(about = "Add generated teams to the game's tab-delimited tables", long_about = None)]
struct Cli {
    /// Settings file (.yaml, .yml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct WriteOpts {
    /// Directory holding the game tables
    #[arg(long)]
    data_dir: PathBuf,

    /// Formation name, or "random" (default 4-3-3)
    #[arg(long)]
    formation: Option<String>,

    /// Build every row but leave the files untouched
    #[arg(long, default_value = "false")]
    dry_run: bool,

    /// Accept team ids that already exist in teams.txt
    #[arg(long, default_value = "false")]
    allow_duplicate_ids: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Create club teams from roster files (one team per file)
    Club {
        #[command(flatten)]
        opts: WriteOpts,

        /// Roster files (tab-separated: playerid, ovr, pos1..pos3, given, sur, jersey)
        #[arg(long, required = true, num_args = 1..)]
        players: Vec<PathBuf>,

        /// League to link the team(s) to
        #[arg(long)]
        league_id: u32,

        /// Team id of the first team (default: highest teamid + 1)
        #[arg(long)]
        team_id: Option<u32>,

        /// Team name for a single roster (default: file name)
        #[arg(long)]
        name: Option<String>,

        /// Stadium to link a single team to
        #[arg(long)]
        stadium_id: Option<u32>,
    },

    /// Create national teams from players.txt
    National {
        #[command(flatten)]
        opts: WriteOpts,

        /// Nation name (partial names are matched)
        #[arg(long, conflicts_with = "batch", required_unless_present = "batch")]
        nation: Option<String>,

        /// File of NationName,TeamID lines
        #[arg(long)]
        batch: Option<PathBuf>,

        /// Team id (default: highest teamid + 1)
        #[arg(long, conflicts_with = "batch")]
        team_id: Option<u32>,

        #[arg(long, conflicts_with = "batch")]
        stadium_id: Option<u32>,

        /// Save the nations that were created as a mapping file
        #[arg(long)]
        save_mappings: Option<PathBuf>,
    },

    /// Count available players per nation
    Scan {
        #[arg(long)]
        data_dir: PathBuf,

        /// Hide nations with fewer players
        #[arg(long, default_value_t = team_creator::report::DEFAULT_MIN_PLAYERS)]
        min_players: usize,

        /// Write a text report with a batch-ready nation list
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the scan as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show the best 4-3-3 a nation could field
    Preview {
        #[arg(long)]
        data_dir: PathBuf,

        #[arg(long)]
        nation: String,
    },

    /// List available formations
    Formations,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => CreatorConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CreatorConfig::default(),
    };

    match cli.command {
        Commands::Club {
            opts,
            players,
            league_id,
            team_id,
            name,
            stadium_id,
        } => {
            let creator = creator(&opts, config);
            let formation = creator.formation(opts.formation.as_deref())?;
            println!("🔨 Creating {} club team(s)...", players.len());
            println!("   Data:      {}", opts.data_dir.display());
            println!("   Formation: {}", formation.name);

            if let [file] = players.as_slice() {
                let team_name = match name {
                    Some(n) => n,
                    None => file
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .context("Roster file has no name")?,
                };
                let id = creator.resolve_team_id(team_id)?;
                let team =
                    tc_core::TeamSpec::club(id, team_name, league_id).with_stadium(stadium_id);
                let report = creator.create_club_team(file, &team, &formation)?;
                print_report(&report);
                if !report.created() {
                    bail!("❌ No table was updated");
                }
            } else {
                let results = creator.create_club_batch(&players, team_id, league_id, &formation)?;
                print_batch(&results);
            }
        }

        Commands::National {
            opts,
            nation,
            batch,
            team_id,
            stadium_id,
            save_mappings,
        } => {
            let creator = creator(&opts, config);
            let formation = creator.formation(opts.formation.as_deref())?;
            println!("🔨 Creating national team(s)...");
            println!("   Data:      {}", opts.data_dir.display());
            println!("   Formation: {}", formation.name);

            let created: Vec<NationMapping> = match (nation, batch) {
                (_, Some(batch)) => {
                    let mappings = team_creator::load_mappings(&batch)?;
                    if mappings.is_empty() {
                        bail!("❌ No valid NationName,TeamID lines in {}", batch.display());
                    }
                    let results = creator.create_national_batch(&mappings, &formation)?;
                    print_batch(&results);
                    mappings
                        .into_iter()
                        .zip(&results)
                        .filter(|(_, (_, r))| r.as_ref().is_ok_and(TeamReport::created))
                        .map(|(m, _)| m)
                        .collect()
                }
                (Some(nation), None) => {
                    let report =
                        creator.create_national_team(&nation, team_id, stadium_id, &formation)?;
                    print_report(&report);
                    if !report.created() {
                        bail!("❌ No table was updated");
                    }
                    let mapping = report.team.nation_id().map(|nation_id| NationMapping {
                        nation: tc_core::data::nation_name(nation_id).unwrap_or("Unknown"),
                        nation_id,
                        team_id: report.team.id,
                    });
                    mapping.into_iter().collect()
                }
                (None, None) => bail!("Pass --nation or --batch"),
            };

            if let Some(path) = save_mappings {
                team_creator::save_mappings(&created, &path)?;
                println!("\n📄 Mappings saved to: {}", path.display());
            }
        }

        Commands::Scan {
            data_dir,
            min_players,
            export,
            json,
        } => {
            println!("🔍 Scanning players.txt in {}...", data_dir.display());
            let players = TableFile::open(&data_dir.join(team_creator::PLAYERS_FILE))?;
            let pool = team_creator::read_player_pool(&players)?;

            let teams_path = data_dir.join(team_creator::TEAMS_FILE);
            let created = if teams_path.exists() {
                team_creator::created_national_teams(&TableFile::open(&teams_path)?)
            } else {
                Default::default()
            };

            let blacklist = tc_core::data::Blacklist::new(&config.extra_blacklist);
            let scan = team_creator::scan_nations(
                &pool,
                &blacklist,
                min_players,
                &config.extra_excluded_nations,
                &created,
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&scan)?);
            } else {
                println!("\n{}", team_creator::report::render_scan(&scan));
                if !scan.skipped_base_game.is_empty() {
                    println!("   In base game:    {}", scan.skipped_base_game.join(", "));
                }
                if !scan.skipped_created.is_empty() {
                    println!("   Already created: {}", scan.skipped_created.join(", "));
                }
            }

            if let Some(path) = export {
                team_creator::report::export_scan(&scan, min_players, &path)?;
                println!("\n📄 Report saved to: {}", path.display());
            }
        }

        Commands::Preview { data_dir, nation } => {
            let (name, nation_id) = tc_core::data::resolve_nation(&nation)
                .with_context(|| format!("Unknown nation '{}'", nation))?;
            let players = TableFile::open(&data_dir.join(team_creator::PLAYERS_FILE))?;
            let pool = team_creator::read_player_pool(&players)?;
            let blacklist = tc_core::data::Blacklist::new(&config.extra_blacklist);
            print!(
                "{}",
                team_creator::preview_starting_xi(&pool, nation_id, name, &blacklist)
            );
        }

        Commands::Formations => {
            let creator = TeamCreator::new(".", config);
            println!("{:<6} {:<22} {:>4} {:>4} {:>4}", "ID", "Name", "DEF", "MID", "ATT");
            for f in creator.formations() {
                let id = f.source_id.map_or_else(|| "-".to_string(), |id| id.to_string());
                println!(
                    "{:<6} {:<22} {:>4} {:>4} {:>4}",
                    id, f.name, f.defenders, f.midfielders, f.attackers
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn creator(opts: &WriteOpts, config: CreatorConfig) -> TeamCreator {
    TeamCreator::new(&opts.data_dir, config)
        .dry_run(opts.dry_run)
        .allow_duplicate_ids(opts.allow_duplicate_ids)
}

#[cfg(feature = "cli")]
fn print_report(report: &TeamReport) {
    let mark = if report.created() { "✅" } else { "❌" };
    println!("\n{} {}", mark, report);
}

#[cfg(feature = "cli")]
fn print_batch(results: &[(String, Result<TeamReport>)]) {
    let mut created = 0;
    for (name, result) in results {
        match result {
            Ok(report) => {
                print_report(report);
                if report.created() {
                    created += 1;
                }
            }
            Err(e) => println!("\n❌ {}: {:#}", name, e),
        }
    }
    println!("\n✅ Created {} of {} teams", created, results.len());
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("team_creator CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
