use super::range::RangeScorer;
use super::{popularity_score, sort_by_score_desc};
use crate::models::{PlaylistArchetype, ScoredTrack, Track};
use rand::Rng;

/// Weight of the deterministic mood score in the final blend; the remainder
/// is uniform jitter that diversifies otherwise-tied results.
const MOOD_WEIGHT: f32 = 0.9;

/// The four mood flavors the mood archetypes map onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Chill,
    Hype,
}

/// Target feature windows for one mood
#[derive(Debug, Clone, Copy)]
pub struct MoodProfile {
    pub valence_min: f32,
    pub valence_max: f32,
    pub energy_min: f32,
    pub energy_max: f32,
    /// Positive favors acoustic tracks, negative favors non-acoustic ones
    pub acousticness_weight: f32,
}

impl Mood {
    pub fn profile(&self) -> MoodProfile {
        match self {
            // High valence, medium-high energy
            Mood::Happy => MoodProfile {
                valence_min: 0.6,
                valence_max: 1.0,
                energy_min: 0.4,
                energy_max: 1.0,
                acousticness_weight: 0.0,
            },
            // Low valence, low-medium energy, lean acoustic
            Mood::Sad => MoodProfile {
                valence_min: 0.0,
                valence_max: 0.4,
                energy_min: 0.0,
                energy_max: 0.6,
                acousticness_weight: 1.0,
            },
            // Medium valence, low energy, strongly acoustic
            Mood::Chill => MoodProfile {
                valence_min: 0.3,
                valence_max: 0.8,
                energy_min: 0.0,
                energy_max: 0.5,
                acousticness_weight: 2.0,
            },
            // Medium-high valence, high energy, lean electric
            Mood::Hype => MoodProfile {
                valence_min: 0.4,
                valence_max: 1.0,
                energy_min: 0.7,
                energy_max: 1.0,
                acousticness_weight: -1.0,
            },
        }
    }

    pub fn archetype(&self) -> PlaylistArchetype {
        match self {
            Mood::Happy => PlaylistArchetype::MoodHappy,
            Mood::Sad => PlaylistArchetype::MoodSad,
            Mood::Chill => PlaylistArchetype::MoodChill,
            Mood::Hype => PlaylistArchetype::MoodHype,
        }
    }
}

/// Scores tracks against a mood's valence/energy/acousticness profile
pub struct MoodScorer {
    mood: Mood,
}

impl MoodScorer {
    pub fn new(mood: Mood) -> Self {
        Self { mood }
    }

    /// Jitter-free mood score for a single track.
    ///
    /// Tracks without audio features fall back toward popularity, centred on
    /// the neutral band: `0.3 + 0.4 * popularity_score`. A very popular
    /// feature-less track can outrank a badly-matching featured one, but
    /// never a squarely in-mood one.
    pub fn base_score(&self, track: &Track) -> f32 {
        let profile = self.mood.profile();

        let Some(features) = &track.features else {
            return 0.3 + popularity_score(track) * 0.4;
        };

        let valence_score = RangeScorer::score_in_range(
            Some(features.valence),
            profile.valence_min,
            profile.valence_max,
        );
        let energy_score = RangeScorer::score_in_range(
            Some(features.energy),
            profile.energy_min,
            profile.energy_max,
        );

        // Acousticness contributes a small directional term
        let w = profile.acousticness_weight;
        let acousticness_factor = if w >= 0.0 {
            features.acousticness * w
        } else {
            (1.0 - features.acousticness) * w.abs()
        };

        valence_score * 0.5 + energy_score * 0.4 + acousticness_factor * 0.1
    }

    /// Score the whole pool, sorted descending, not yet truncated
    pub fn score_tracks(&self, tracks: &[Track], rng: &mut impl Rng) -> Vec<ScoredTrack> {
        let archetype = self.mood.archetype();
        let featured = tracks.iter().filter(|t| t.features.is_some()).count();
        if featured == 0 {
            log::debug!(
                "no audio features in pool of {}, mood '{archetype}' degrades to popularity",
                tracks.len()
            );
        }

        let mut scored: Vec<ScoredTrack> = tracks
            .iter()
            .map(|track| {
                let jitter: f32 = rng.gen_range(0.0..1.0);
                ScoredTrack {
                    track: track.clone(),
                    score: self.base_score(track) * MOOD_WEIGHT + jitter * (1.0 - MOOD_WEIGHT),
                    archetype,
                }
            })
            .collect();

        sort_by_score_desc(&mut scored);
        scored
    }
}
