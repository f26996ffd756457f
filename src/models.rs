use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A candidate track, optionally annotated with audio features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    pub popularity: Option<u8>,
    pub genre: Option<String>,
    #[serde(rename = "albumArtUrl")]
    pub album_art_url: Option<String>,
    pub features: Option<AudioFeatures>,
}

/// Provider-supplied audio feature annotations, all 0-1 except tempo (BPM)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub valence: f32,
    pub energy: f32,
    pub danceability: f32,
    pub acousticness: f32,
    pub tempo: f32,
}

/// A bare track listing entry, as returned by provider catalogs before
/// feature annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackStub {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    pub popularity: Option<u8>,
    pub genre: Option<String>,
    #[serde(rename = "albumArtUrl")]
    pub album_art_url: Option<String>,
}

impl Track {
    /// Year parsed from the first four characters of the release date string
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_ref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse::<i32>().ok())
    }

    /// Popularity with the documented default of 50 for missing values,
    /// so scoring never reads an undefined popularity
    pub fn popularity_or_default(&self) -> u8 {
        self.popularity.unwrap_or(50)
    }

    /// Primary artist used for liked-song matching and diversity grouping
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or("")
    }

    /// Artist names joined for display
    pub fn artists_display(&self) -> String {
        self.artists.join(", ")
    }

    pub fn from_stub(stub: TrackStub, features: Option<AudioFeatures>) -> Self {
        Track {
            id: stub.id,
            name: stub.name,
            artists: stub.artists,
            album: stub.album,
            release_date: stub.release_date,
            popularity: stub.popularity,
            genre: stub.genre,
            album_art_url: stub.album_art_url,
            features,
        }
    }
}

impl Default for Track {
    fn default() -> Self {
        Track {
            id: String::new(),
            name: "Unknown Track".to_string(),
            artists: vec!["Unknown Artist".to_string()],
            album: "Unknown Album".to_string(),
            release_date: None,
            popularity: None,
            genre: None,
            album_art_url: None,
            features: None,
        }
    }
}

/// The closed set of playlist archetypes a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaylistArchetype {
    MoodHappy,
    MoodSad,
    MoodChill,
    MoodHype,
    Throwback,
    PastFavorites,
    NewReleases,
    GenreExplorer,
}

impl PlaylistArchetype {
    /// Parse the kebab-case request string. Unrecognized values fall back
    /// to `MoodHappy` rather than failing the request.
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "mood-happy" => Self::MoodHappy,
            "mood-sad" => Self::MoodSad,
            "mood-chill" => Self::MoodChill,
            "mood-hype" => Self::MoodHype,
            "throwback" => Self::Throwback,
            "past-favorites" => Self::PastFavorites,
            "new-releases" => Self::NewReleases,
            "genre-explorer" => Self::GenreExplorer,
            other => {
                log::warn!("unrecognized playlist archetype '{other}', defaulting to mood-happy");
                Self::MoodHappy
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoodHappy => "mood-happy",
            Self::MoodSad => "mood-sad",
            Self::MoodChill => "mood-chill",
            Self::MoodHype => "mood-hype",
            Self::Throwback => "throwback",
            Self::PastFavorites => "past-favorites",
            Self::NewReleases => "new-releases",
            Self::GenreExplorer => "genre-explorer",
        }
    }
}

impl fmt::Display for PlaylistArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track plus the score it earned against a given archetype
#[derive(Debug, Clone)]
pub struct ScoredTrack {
    pub track: Track,
    pub score: f32,
    pub archetype: PlaylistArchetype,
}

impl ScoredTrack {
    /// Score formatted the way the renderer displays it
    pub fn display_score(&self) -> String {
        format!("{:.2}", self.score)
    }
}

/// The user's known-liked tracks as (name, artist) pairs, matched
/// case-insensitively. Supplied by the caller, never mutated here.
#[derive(Debug, Clone, Default)]
pub struct LikedSongSet {
    entries: HashSet<(String, String)>,
}

impl LikedSongSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, artist)| {
                (
                    name.as_ref().to_lowercase(),
                    artist.as_ref().to_lowercase(),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn contains(&self, name: &str, artist: &str) -> bool {
        self.entries
            .contains(&(name.to_lowercase(), artist.to_lowercase()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Time window for provider top-track listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::LongTerm => "long_term",
        }
    }
}
