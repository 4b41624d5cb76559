//! Tocata - headless player for JSON playlist catalogs

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tocata_artwork::{CoverResolver, ItunesSearch};
use tocata_catalog::CatalogClient;
use tocata_cli::{AppConfig, CliError, HeadlessDriver, HttpProbe};
use tocata_core::{normalize_entries, Favorites, Track};
use tocata_playback::{PlayerSession, RngSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tocata")]
#[command(about = "Headless Tocata player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TOCATA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List playlists in the index
    Playlists,
    /// Play a playlist without audio, skipping streams that never start
    Play {
        /// Playlist name; the first playlist when omitted
        playlist: Option<String>,
        /// Start in shuffled order
        #[arg(long)]
        shuffle: bool,
        /// Number of tracks to attempt
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },
    /// Resolve a cover for a track description
    Cover {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        artist: String,
        #[arg(long, default_value = "")]
        year: String,
        /// Entry type, e.g. "movie"
        #[arg(long, default_value = "")]
        kind: String,
        /// Playlist the track belongs to; influences media kind detection
        #[arg(long, default_value = "")]
        playlist: String,
    },
    /// Toggle the favorite flag of a track
    Favorite {
        playlist: String,
        /// Position in the playlist document, counting playable entries only
        index: usize,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tocata=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Playlists => list_playlists(&config).await?,
        Commands::Play {
            playlist,
            shuffle,
            steps,
        } => play(config, playlist, shuffle, steps).await?,
        Commands::Cover {
            title,
            artist,
            year,
            kind,
            playlist,
        } => {
            let track = Track::new(title, artist, "")
                .with_year(year)
                .with_kind(kind);
            resolve_cover(&config, &track, &playlist).await?;
        }
        Commands::Favorite { playlist, index } => {
            toggle_favorite(&config, &playlist, index).await?;
        }
        Commands::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

async fn list_playlists(config: &AppConfig) -> anyhow::Result<()> {
    let client = CatalogClient::new(config.catalog_config())?;
    let index = client.index().await?;

    for entry in index.iter() {
        println!("{}\t{}", entry.name, entry.url);
    }
    Ok(())
}

async fn play(
    mut config: AppConfig,
    playlist: Option<String>,
    shuffle: bool,
    steps: usize,
) -> anyhow::Result<()> {
    config.session.shuffle |= shuffle;

    let client = Arc::new(CatalogClient::new(config.catalog_config())?);
    let favorites = load_favorites(&config.favorites_path)?;
    let resolver = build_resolver(&config)?;

    let session_config = config.session_config();
    let probe = Arc::new(HttpProbe::new(session_config.stall_timeout)?);
    let (session, alarms) = PlayerSession::new(
        session_config,
        client,
        resolver,
        Box::new(RngSource::from_entropy()),
    );
    let mut driver = HeadlessDriver::new(session.with_favorites(favorites), alarms, probe);

    match playlist {
        Some(name) => driver.session_mut().select_playlist(&name).await?,
        None => driver.session_mut().start().await?,
    };
    tracing::info!(
        playlist = driver.session().current_playlist().unwrap_or_default(),
        tracks = driver.session().pool().len(),
        shuffled = driver.session().is_shuffled(),
        "Starting playback"
    );

    let report = driver.run(steps).await;

    for track in &report.played {
        let star = if track.favorite { "*" } else { " " };
        println!(
            "{} {:>4}  {} - {}  [{}]",
            star, track.index, track.artist, track.title, track.cover
        );
    }
    if !report.skipped.is_empty() {
        println!("skipped {} track(s) that never started", report.skipped.len());
    }
    tracing::debug!(snapshot = ?driver.session().snapshot(), "Session state");

    Ok(())
}

async fn resolve_cover(config: &AppConfig, track: &Track, playlist: &str) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let cover = resolver.resolve(track, playlist).await;
    println!("{}", cover);
    Ok(())
}

async fn toggle_favorite(config: &AppConfig, playlist: &str, index: usize) -> anyhow::Result<()> {
    let client = CatalogClient::new(config.catalog_config())?;
    let tracks = normalize_entries(&client.fetch_playlist(playlist).await?);
    let track = tracks.get(index).ok_or_else(|| CliError::NoSuchTrack {
        playlist: playlist.to_string(),
        index,
    })?;

    let mut favorites = load_favorites(&config.favorites_path)?;
    let favorite = favorites.toggle(track.key());
    favorites.save(&config.favorites_path)?;

    let verb = if favorite { "Added" } else { "Removed" };
    println!("{} {} - {} ({} favorites)", verb, track.artist, track.title, favorites.len());
    Ok(())
}

fn build_resolver(config: &AppConfig) -> Result<CoverResolver, CliError> {
    let search = ItunesSearch::with_base_url(&config.artwork.search_base_url)?;
    Ok(CoverResolver::new(Arc::new(search), config.artwork_config()))
}

fn load_favorites(path: &Path) -> Result<Favorites, CliError> {
    Ok(Favorites::load(path)?)
}
