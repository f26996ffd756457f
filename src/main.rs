use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use playlist_genie::client::HttpProvider;
use playlist_genie::config::load_config;
use playlist_genie::engine::{FeatureBatchFetcher, PlaylistAssembler, SeedSelectionChain, TrackProvider};
use playlist_genie::errors::EngineError;
use playlist_genie::models::{LikedSongSet, TimeRange, Track};

#[derive(Parser)]
#[command(name = "playlist-genie")]
#[command(about = "Assemble a ranked playlist for a requested archetype")]
#[command(version)]
struct Args {
    /// Playlist archetype: mood-happy, mood-sad, mood-chill, mood-hype,
    /// throwback, past-favorites, new-releases, genre-explorer
    #[arg(default_value = "mood-happy")]
    archetype: String,

    /// Path to a JSON file of liked songs: [{"name": ..., "artist": ...}]
    #[arg(short = 'l', long = "liked-songs")]
    liked_songs: Option<String>,

    /// How many saved tracks to pull into the candidate pool
    #[arg(long = "limit", default_value_t = 50)]
    limit: usize,

    /// Fix the jitter seed for reproducible rankings
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Quiet mode - reduce output verbosity
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

/// One entry in the liked-songs JSON file
#[derive(Debug, Deserialize)]
struct LikedSongEntry {
    name: String,
    artist: String,
}

fn load_liked_songs(path: &str) -> Result<LikedSongSet> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<LikedSongEntry> = serde_json::from_str(&content)?;
    Ok(LikedSongSet::from_pairs(
        entries.into_iter().map(|e| (e.name, e.artist)),
    ))
}

/// Genres of pool tracks the user already likes, lowercased. This is the
/// preference set the genre explorer scores novelty against.
fn preferred_genres(pool: &[Track], liked: &LikedSongSet) -> std::collections::HashSet<String> {
    pool.iter()
        .filter(|t| liked.contains(&t.name, t.primary_artist()))
        .filter_map(|t| t.genre.as_ref().map(|g| g.to_lowercase()))
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Load configuration from .env
    let config = load_config()?;
    let provider = HttpProvider::new(config);

    // Liked songs are optional; favorites and explorer degrade without them
    let liked = match &args.liked_songs {
        Some(path) => {
            let set = load_liked_songs(path)?;
            if !args.quiet {
                println!("Loaded {} liked songs from {path}", set.len());
            }
            set
        }
        None => LikedSongSet::new(),
    };

    // Build the candidate pool from the user's top and saved tracks
    if !args.quiet {
        println!("Fetching candidate tracks...");
    }
    let mut stubs = provider.fetch_top_tracks(TimeRange::MediumTerm)?;
    stubs.extend(provider.fetch_saved_tracks(args.limit)?);
    if !args.quiet {
        println!("Fetched {} candidate tracks, annotating features...", stubs.len());
    }

    let pool = FeatureBatchFetcher::fetch_features(&provider, stubs)?;
    let genres = preferred_genres(&pool, &liked);

    // Seed selection is informational here: a caller issuing provider-side
    // recommendation requests would use these; below threshold it switches
    // to genre seeding
    match SeedSelectionChain::select_seeds(&provider) {
        Ok(seeds) if !args.quiet => {
            println!("Seed tracks for upstream recommendations: {}", seeds.join(", "));
        }
        Ok(_) => {}
        Err(EngineError::InsufficientSeeds { found }) => {
            log::warn!("only {found} seed track(s), switching to genre seeding");
            let available = provider.fetch_available_genres().unwrap_or_default();
            if !args.quiet && !available.is_empty() {
                println!(
                    "Falling back to genre seeds: {}",
                    available.iter().take(5).cloned().collect::<Vec<_>>().join(", ")
                );
            }
        }
        Err(e) => return Err(e.into()),
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let playlist = match PlaylistAssembler::assemble(&args.archetype, pool, &liked, &genres, &mut rng)
    {
        Ok(playlist) => playlist,
        Err(EngineError::EmptyPool) => {
            eprintln!("No candidate tracks available - cannot generate a playlist.");
            return Err(EngineError::EmptyPool.into());
        }
        Err(e) => return Err(e.into()),
    };

    println!("\n=== {} PLAYLIST ===", args.archetype.to_uppercase());
    for (i, entry) in playlist.iter().enumerate() {
        let track = &entry.track;
        let year_display = track
            .release_year()
            .map(|y| format!(" [{y}]"))
            .unwrap_or_default();
        println!(
            "{:2}. \"{}\" by {}{} (score: {})",
            i + 1,
            track.name,
            track.artists_display(),
            year_display,
            entry.display_score()
        );
        if !args.quiet {
            println!(
                "     Album: {} | Popularity: {} | Genre: {}",
                track.album,
                track.popularity_or_default(),
                track.genre.as_deref().unwrap_or("unknown")
            );
        }
    }

    Ok(())
}
