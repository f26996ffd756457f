use super::{popularity_score, sort_by_score_desc};
use crate::models::{PlaylistArchetype, ScoredTrack, Track};
use chrono::Datelike;
use rand::Rng;

/// Assumed age when a track carries no usable release year
const DEFAULT_AGE: i32 = 5;

/// Scores tracks by nostalgic age: the 10-20 year band is the sweet spot
pub struct ThrowbackScorer {
    current_year: i32,
}

impl ThrowbackScorer {
    pub fn new() -> Self {
        Self {
            current_year: chrono::Local::now().year(),
        }
    }

    /// Pin the reference year, used by tests to keep ages stable
    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Piecewise nostalgia curve over track age in years
    pub fn age_score(age: i32) -> f32 {
        let age = age.max(0) as f32;
        if (10.0..=20.0).contains(&age) {
            1.0
        } else if (5.0..10.0).contains(&age) {
            // Ramp 0.7 -> 0.94 approaching the sweet spot
            0.7 + (age - 5.0) * 0.06
        } else if age > 20.0 && age <= 30.0 {
            // Ramp down 0.9 -> 0.7 leaving it
            0.9 - (age - 20.0) * 0.02
        } else if age > 30.0 {
            (0.7 - (age - 30.0) * 0.01).max(0.0)
        } else {
            // Too recent for nostalgia: 0 -> 0.7 over the first five years
            age * 0.14
        }
    }

    fn age_of(&self, track: &Track) -> i32 {
        match track.release_year() {
            Some(year) => self.current_year - year,
            None => DEFAULT_AGE,
        }
    }

    /// Jitter-free throwback score: 70% age curve, 20% popularity (the
    /// remaining 10% of the final score is jitter)
    pub fn base_score(&self, track: &Track) -> f32 {
        Self::age_score(self.age_of(track)) * 0.7 + popularity_score(track) * 0.2
    }

    pub fn score_tracks(&self, tracks: &[Track], rng: &mut impl Rng) -> Vec<ScoredTrack> {
        let mut scored: Vec<ScoredTrack> = tracks
            .iter()
            .map(|track| {
                let jitter: f32 = rng.gen_range(0.0..1.0);
                ScoredTrack {
                    track: track.clone(),
                    score: self.base_score(track) + jitter * 0.1,
                    archetype: PlaylistArchetype::Throwback,
                }
            })
            .collect();
        sort_by_score_desc(&mut scored);
        scored
    }
}

impl Default for ThrowbackScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirror image of throwback: the newer the release, the better
pub struct NewReleasesScorer {
    current_year: i32,
}

impl NewReleasesScorer {
    pub fn new() -> Self {
        Self {
            current_year: chrono::Local::now().year(),
        }
    }

    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Stepped recency curve over track age in years
    pub fn recency_score(age: i32) -> f32 {
        let age = age.max(0);
        if age <= 1 {
            1.0
        } else if age <= 2 {
            0.8
        } else if age <= 3 {
            0.6
        } else if age <= 5 {
            0.4
        } else {
            (0.3 - (age - 5) as f32 * 0.05).max(0.0)
        }
    }

    fn age_of(&self, track: &Track) -> i32 {
        match track.release_year() {
            Some(year) => self.current_year - year,
            None => DEFAULT_AGE,
        }
    }

    /// Jitter-free recency score: 70% recency curve, 20% popularity
    pub fn base_score(&self, track: &Track) -> f32 {
        Self::recency_score(self.age_of(track)) * 0.7 + popularity_score(track) * 0.2
    }

    pub fn score_tracks(&self, tracks: &[Track], rng: &mut impl Rng) -> Vec<ScoredTrack> {
        let mut scored: Vec<ScoredTrack> = tracks
            .iter()
            .map(|track| {
                let jitter: f32 = rng.gen_range(0.0..1.0);
                ScoredTrack {
                    track: track.clone(),
                    score: self.base_score(track) + jitter * 0.1,
                    archetype: PlaylistArchetype::NewReleases,
                }
            })
            .collect();
        sort_by_score_desc(&mut scored);
        scored
    }
}

impl Default for NewReleasesScorer {
    fn default() -> Self {
        Self::new()
    }
}
