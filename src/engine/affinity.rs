use super::{popularity_score, sort_by_score_desc};
use crate::models::{LikedSongSet, PlaylistArchetype, ScoredTrack, Track};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Boosts tracks the user already likes; degrades to popularity without
/// liked-song data
pub struct FavoritesScorer;

impl FavoritesScorer {
    /// Jitter-free favorites score: 40% popularity, 50% liked bonus
    pub fn base_score(track: &Track, liked: &LikedSongSet) -> f32 {
        if liked.is_empty() {
            // No liked songs supplied: popularity is the only signal left
            return popularity_score(track) * 0.9;
        }
        let liked_bonus = if liked.contains(&track.name, track.primary_artist()) {
            1.0
        } else {
            0.0
        };
        popularity_score(track) * 0.4 + liked_bonus * 0.5
    }

    pub fn score_tracks(
        tracks: &[Track],
        liked: &LikedSongSet,
        rng: &mut impl Rng,
    ) -> Vec<ScoredTrack> {
        if liked.is_empty() {
            log::debug!("no liked songs supplied, favorites degrades to popularity ranking");
        }
        let mut scored: Vec<ScoredTrack> = tracks
            .iter()
            .map(|track| {
                let jitter: f32 = rng.gen_range(0.0..1.0);
                ScoredTrack {
                    track: track.clone(),
                    score: Self::base_score(track, liked) + jitter * 0.1,
                    archetype: PlaylistArchetype::PastFavorites,
                }
            })
            .collect();
        sort_by_score_desc(&mut scored);
        scored
    }
}

/// Surfaces genres outside the user's known preferences
pub struct GenreExplorerScorer;

impl GenreExplorerScorer {
    /// Jitter-free exploration score. Tracks without a genre annotation
    /// count as novel.
    pub fn base_score(track: &Track, preferred_genres: &HashSet<String>) -> f32 {
        if preferred_genres.is_empty() {
            return popularity_score(track) * 0.9;
        }
        let novel = match &track.genre {
            Some(genre) => !preferred_genres.contains(&genre.to_lowercase()),
            None => true,
        };
        let novelty_score = if novel { 0.8 } else { 0.2 };
        novelty_score + popularity_score(track) * 0.15
    }

    /// Score the pool, sorted descending. Diversity selection is a separate
    /// pass (`select_diverse`) applied by the assembler.
    pub fn score_tracks(
        tracks: &[Track],
        preferred_genres: &HashSet<String>,
        rng: &mut impl Rng,
    ) -> Vec<ScoredTrack> {
        if preferred_genres.is_empty() {
            log::debug!("no preferred genres supplied, explorer degrades to popularity ranking");
        }
        let mut scored: Vec<ScoredTrack> = tracks
            .iter()
            .map(|track| {
                let jitter: f32 = rng.gen_range(0.0..1.0);
                ScoredTrack {
                    track: track.clone(),
                    score: Self::base_score(track, preferred_genres) + jitter * 0.05,
                    archetype: PlaylistArchetype::GenreExplorer,
                }
            })
            .collect();
        sort_by_score_desc(&mut scored);
        scored
    }

    /// Pick up to `limit` tracks favoring artist diversity: one track per
    /// artist in a first pass (artists visited in shuffled order, each
    /// contributing its best-scoring track), then top up with the
    /// highest-scoring leftovers regardless of artist.
    pub fn select_diverse(
        scored: Vec<ScoredTrack>,
        limit: usize,
        rng: &mut impl Rng,
    ) -> Vec<ScoredTrack> {
        // Group by primary artist; input is sorted, so the first entry per
        // artist is that artist's best
        let mut by_artist: HashMap<String, Vec<ScoredTrack>> = HashMap::new();
        let mut artists: Vec<String> = Vec::new();
        for entry in scored {
            let artist = entry.track.primary_artist().to_lowercase();
            if !by_artist.contains_key(&artist) {
                artists.push(artist.clone());
            }
            by_artist.entry(artist).or_default().push(entry);
        }

        artists.shuffle(rng);

        let mut picked: Vec<ScoredTrack> = Vec::new();
        let mut leftovers: Vec<ScoredTrack> = Vec::new();
        for artist in &artists {
            let mut tracks = by_artist.remove(artist).unwrap_or_default();
            if picked.len() < limit && !tracks.is_empty() {
                picked.push(tracks.remove(0));
            }
            leftovers.append(&mut tracks);
        }

        if picked.len() < limit {
            sort_by_score_desc(&mut leftovers);
            let shortfall = limit - picked.len();
            picked.extend(leftovers.into_iter().take(shortfall));
        }

        sort_by_score_desc(&mut picked);
        picked
    }
}
