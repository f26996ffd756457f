use crate::config::Config;
use crate::engine::TrackProvider;
use crate::models::{AudioFeatures, TimeRange, TrackStub};
use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use ureq::Agent;
use urlencoding::encode;

/// HTTP client for the track-data provider, authenticated with a bearer
/// token
pub struct HttpProvider {
    agent: Agent,
    base_url: String,
    access_token: String,
}

/// Wire shape of one track in provider listings
#[derive(Debug, Deserialize)]
struct TrackObject {
    id: String,
    name: String,
    artists: Vec<ArtistObject>,
    album: AlbumObject,
    popularity: Option<u8>,
    genre: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AlbumObject {
    name: String,
    release_date: Option<String>,
    #[serde(default)]
    images: Vec<ImageObject>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    items: Vec<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct SavedTracksResponse {
    items: Vec<SavedTrackItem>,
}

#[derive(Debug, Deserialize)]
struct SavedTrackItem {
    track: TrackObject,
}

#[derive(Debug, Deserialize)]
struct AudioFeaturesResponse {
    /// One entry per requested id; null when the provider has no features
    /// for that id
    audio_features: Vec<Option<AudioFeaturesObject>>,
}

#[derive(Debug, Deserialize)]
struct AudioFeaturesObject {
    id: String,
    valence: f32,
    energy: f32,
    danceability: f32,
    acousticness: f32,
    tempo: f32,
}

#[derive(Debug, Deserialize)]
struct GenresResponse {
    genres: Vec<String>,
}

impl From<TrackObject> for TrackStub {
    fn from(t: TrackObject) -> Self {
        TrackStub {
            id: t.id,
            name: t.name,
            artists: t.artists.into_iter().map(|a| a.name).collect(),
            album: t.album.name,
            release_date: t.album.release_date,
            popularity: t.popularity,
            genre: t.genre,
            album_art_url: t.album.images.into_iter().next().map(|i| i.url),
        }
    }
}

impl HttpProvider {
    /// Create a new client with configuration from environment
    pub fn new(config: Config) -> Self {
        HttpProvider {
            agent: Agent::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token,
        }
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path_and_query);
        log::debug!("GET {url}");

        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.access_token))
            .call()
            .map_err(|e| anyhow::anyhow!("HTTP request failed: {}", e))?;

        let response_text = response.into_string()?;
        serde_json::from_str(&response_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON response: {}", e))
    }
}

impl TrackProvider for HttpProvider {
    fn fetch_features_batch(&self, ids: &[String]) -> Result<HashMap<String, AudioFeatures>> {
        let joined = ids.join(",");
        let response: AudioFeaturesResponse =
            self.get_json(&format!("/v1/audio-features?ids={}", encode(&joined)))?;

        // Null entries are dropped here: those ids stay feature-less and the
        // scoring layer takes its neutral-default path for them
        let mut features = HashMap::new();
        for entry in response.audio_features.into_iter().flatten() {
            features.insert(
                entry.id,
                AudioFeatures {
                    valence: entry.valence,
                    energy: entry.energy,
                    danceability: entry.danceability,
                    acousticness: entry.acousticness,
                    tempo: entry.tempo,
                },
            );
        }
        Ok(features)
    }

    fn fetch_top_tracks(&self, range: TimeRange) -> Result<Vec<TrackStub>> {
        let response: TopTracksResponse = self.get_json(&format!(
            "/v1/me/top/tracks?time_range={}&limit=50",
            range.as_query_value()
        ))?;
        Ok(response.items.into_iter().map(TrackStub::from).collect())
    }

    fn fetch_saved_tracks(&self, limit: usize) -> Result<Vec<TrackStub>> {
        let response: SavedTracksResponse =
            self.get_json(&format!("/v1/me/tracks?limit={limit}"))?;
        Ok(response
            .items
            .into_iter()
            .map(|item| TrackStub::from(item.track))
            .collect())
    }

    fn fetch_available_genres(&self) -> Result<Vec<String>> {
        let response: GenresResponse =
            self.get_json("/v1/recommendations/available-genre-seeds")?;
        Ok(response.genres)
    }
}
