#[cfg(test)]
mod tests {
    use crate::engine::affinity::{FavoritesScorer, GenreExplorerScorer};
    use crate::engine::assembler::{PlaylistAssembler, MAX_PLAYLIST_LEN};
    use crate::engine::era::{NewReleasesScorer, ThrowbackScorer};
    use crate::engine::mood::{Mood, MoodScorer};
    use crate::engine::range::RangeScorer;
    use crate::errors::EngineError;
    use crate::models::{
        AudioFeatures, LikedSongSet, PlaylistArchetype, ScoredTrack, Track,
    };
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn features(valence: f32, energy: f32, acousticness: f32) -> AudioFeatures {
        AudioFeatures {
            valence,
            energy,
            danceability: 0.5,
            acousticness,
            tempo: 120.0,
        }
    }

    fn make_track(
        id: &str,
        name: &str,
        artist: &str,
        popularity: Option<u8>,
        year: Option<&str>,
        audio: Option<AudioFeatures>,
    ) -> Track {
        Track {
            id: id.to_string(),
            name: name.to_string(),
            artists: vec![artist.to_string()],
            album: "Test Album".to_string(),
            release_date: year.map(|y| format!("{y}-06-15")),
            popularity,
            genre: None,
            album_art_url: None,
            features: audio,
        }
    }

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    // --- RangeScorer ---

    #[test]
    fn test_range_missing_value_is_neutral() {
        assert_relative_eq!(RangeScorer::score_in_range(None, 0.4, 0.8), 0.5);
        assert_relative_eq!(RangeScorer::score_in_range(Some(f32::NAN), 0.4, 0.8), 0.5);
        assert_relative_eq!(
            RangeScorer::score_in_range(Some(f32::INFINITY), 0.4, 0.8),
            0.5
        );
    }

    #[test]
    fn test_range_peaks_at_midpoint() {
        assert_relative_eq!(RangeScorer::score_in_range(Some(0.6), 0.4, 0.8), 1.0);
        // Edges of the window score 0.8
        assert_relative_eq!(RangeScorer::score_in_range(Some(0.4), 0.4, 0.8), 0.8);
        assert_relative_eq!(RangeScorer::score_in_range(Some(0.8), 0.4, 0.8), 0.8);
    }

    #[test]
    fn test_range_continuous_at_boundaries() {
        let eps = 1e-4_f32;
        let below = RangeScorer::score_in_range(Some(0.4 - eps), 0.4, 0.8);
        let at_min = RangeScorer::score_in_range(Some(0.4), 0.4, 0.8);
        assert!(
            (below - at_min).abs() < 0.01,
            "score jumps at lower boundary: {below} vs {at_min}"
        );

        let above = RangeScorer::score_in_range(Some(0.8 + eps), 0.4, 0.8);
        let at_max = RangeScorer::score_in_range(Some(0.8), 0.4, 0.8);
        assert!(
            (above - at_max).abs() < 0.01,
            "score jumps at upper boundary: {above} vs {at_max}"
        );
    }

    #[test]
    fn test_range_bounded_for_any_input() {
        let mut v = -5.0_f32;
        while v <= 5.0 {
            let score = RangeScorer::score_in_range(Some(v), 0.3, 0.7);
            assert!(
                (0.0..=1.0).contains(&score),
                "score {score} out of bounds for value {v}"
            );
            v += 0.01;
        }
    }

    #[test]
    fn test_range_falls_off_outside_window() {
        let near_miss = RangeScorer::score_in_range(Some(0.35), 0.4, 0.8);
        let far_miss = RangeScorer::score_in_range(Some(0.1), 0.4, 0.8);
        assert!(near_miss > far_miss);
        // Far enough out, the score bottoms at zero
        assert_relative_eq!(RangeScorer::score_in_range(Some(-1.0), 0.4, 0.8), 0.0);
    }

    // --- MoodScorer ---

    #[test]
    fn test_happy_mood_monotonic_in_valence_and_energy() {
        let scorer = MoodScorer::new(Mood::Happy);
        let pairs = [
            ((0.9, 0.8), (0.7, 0.8)),
            ((0.8, 0.9), (0.6, 0.7)),
            ((0.95, 0.6), (0.5, 0.6)),
            ((0.7, 0.5), (0.3, 0.5)),
        ];
        for ((va, ea), (vb, eb)) in pairs {
            let a = make_track("a", "A", "X", Some(50), None, Some(features(va, ea, 0.2)));
            let b = make_track("b", "B", "X", Some(50), None, Some(features(vb, eb, 0.2)));
            assert!(
                scorer.base_score(&a) >= scorer.base_score(&b),
                "higher valence/energy ({va},{ea}) should not score below ({vb},{eb})"
            );
        }
    }

    #[test]
    fn test_sad_mood_prefers_low_valence_acoustic() {
        let scorer = MoodScorer::new(Mood::Sad);
        let sad = make_track("s", "Sad", "X", Some(50), None, Some(features(0.15, 0.2, 0.9)));
        let upbeat = make_track("u", "Up", "X", Some(50), None, Some(features(0.9, 0.9, 0.1)));
        assert!(scorer.base_score(&sad) > scorer.base_score(&upbeat));
    }

    #[test]
    fn test_hype_mood_penalizes_acoustic() {
        let scorer = MoodScorer::new(Mood::Hype);
        let electric = make_track("e", "E", "X", Some(50), None, Some(features(0.7, 0.85, 0.05)));
        let acoustic = make_track("a", "A", "X", Some(50), None, Some(features(0.7, 0.85, 0.95)));
        assert!(scorer.base_score(&electric) > scorer.base_score(&acoustic));
    }

    #[test]
    fn test_mood_happy_scenario_ranking() {
        // Pool of 3: a happy profile, a sad profile, and a feature-less but
        // very popular track. The happy-profile track must always come
        // first; the popular feature-less one outranks the badly-matching
        // sad one via the popularity fallback.
        let happy = make_track("h", "Happy", "A", Some(50), None, Some(features(0.9, 0.8, 0.2)));
        let sad = make_track("s", "Sad", "B", Some(50), None, Some(features(0.1, 0.1, 0.8)));
        let popular = make_track("p", "Popular", "C", Some(90), None, None);

        // Jitter cannot reorder these gaps, but run a few seeds anyway
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = PlaylistAssembler::assemble_for(
                PlaylistArchetype::MoodHappy,
                vec![sad.clone(), popular.clone(), happy.clone()],
                &LikedSongSet::new(),
                &HashSet::new(),
                &mut rng,
            )
            .unwrap();
            let ids: Vec<&str> = result.iter().map(|s| s.track.id.as_str()).collect();
            assert_eq!(ids, vec!["h", "p", "s"], "seed {seed} broke the ranking");
        }
    }

    #[test]
    fn test_mood_degrades_to_popularity_without_features() {
        let scorer = MoodScorer::new(Mood::Happy);
        let hit = make_track("hit", "Hit", "A", Some(95), None, None);
        let obscure = make_track("obs", "Obscure", "B", Some(5), None, None);
        // Popularity gap is wide enough that jitter cannot flip the order
        let mut rng = seeded_rng();
        let scored = scorer.score_tracks(&[obscure, hit], &mut rng);
        assert_eq!(scored[0].track.id, "hit");
        assert_eq!(scored.len(), 2);
    }

    // --- ThrowbackScorer / NewReleasesScorer ---

    #[test]
    fn test_throwback_sweet_spot_scores_one() {
        assert_relative_eq!(ThrowbackScorer::age_score(15), 1.0);
        assert_relative_eq!(ThrowbackScorer::age_score(10), 1.0);
        assert_relative_eq!(ThrowbackScorer::age_score(20), 1.0);
    }

    #[test]
    fn test_throwback_curve_is_consistent_at_seams() {
        // age 5 sits on the ramp start, age 30 on the slow-decay start
        assert_relative_eq!(ThrowbackScorer::age_score(5), 0.7);
        assert_relative_eq!(ThrowbackScorer::age_score(30), 0.7, epsilon = 1e-6);
        assert_relative_eq!(ThrowbackScorer::age_score(9), 0.94, epsilon = 1e-6);
        assert_relative_eq!(ThrowbackScorer::age_score(25), 0.8, epsilon = 1e-6);
        assert_relative_eq!(ThrowbackScorer::age_score(0), 0.0);
    }

    #[test]
    fn test_throwback_ranks_nostalgic_ages_first() {
        let scorer = ThrowbackScorer::with_current_year(2026);
        let sweet = make_track("sweet", "Sweet", "A", Some(50), Some("2011"), None);
        let fresh = make_track("fresh", "Fresh", "B", Some(50), Some("2025"), None);
        let ancient = make_track("old", "Old", "C", Some(50), Some("1960"), None);
        let mut rng = seeded_rng();
        let scored = scorer.score_tracks(&[fresh, ancient, sweet], &mut rng);
        assert_eq!(scored[0].track.id, "sweet");
    }

    #[test]
    fn test_throwback_defaults_missing_year_to_five() {
        let scorer = ThrowbackScorer::with_current_year(2026);
        let no_year = make_track("ny", "NY", "A", Some(50), None, None);
        let five_years = make_track("fy", "FY", "A", Some(50), Some("2021"), None);
        assert_relative_eq!(scorer.base_score(&no_year), scorer.base_score(&five_years));
    }

    #[test]
    fn test_new_release_current_year_scores_one() {
        assert_relative_eq!(NewReleasesScorer::recency_score(0), 1.0);
        assert_relative_eq!(NewReleasesScorer::recency_score(1), 1.0);
        assert_relative_eq!(NewReleasesScorer::recency_score(2), 0.8);
        assert_relative_eq!(NewReleasesScorer::recency_score(3), 0.6);
        assert_relative_eq!(NewReleasesScorer::recency_score(5), 0.4);
        assert_relative_eq!(NewReleasesScorer::recency_score(11), 0.0);
    }

    #[test]
    fn test_new_releases_ranks_recent_first() {
        let scorer = NewReleasesScorer::with_current_year(2026);
        let current = make_track("cur", "Cur", "A", Some(50), Some("2026"), None);
        let decade_old = make_track("dec", "Dec", "B", Some(50), Some("2016"), None);
        let mut rng = seeded_rng();
        let scored = scorer.score_tracks(&[decade_old, current], &mut rng);
        assert_eq!(scored[0].track.id, "cur");
    }

    // --- FavoritesScorer ---

    #[test]
    fn test_favorites_liked_track_outscores_unliked() {
        let liked = LikedSongSet::from_pairs([("Known Song", "Known Artist")]);
        let matched = make_track("m", "Known Song", "Known Artist", Some(40), None, None);
        let unmatched = make_track("u", "Other Song", "Other Artist", Some(40), None, None);
        assert!(
            FavoritesScorer::base_score(&matched, &liked)
                >= FavoritesScorer::base_score(&unmatched, &liked) + 0.4,
            "liked bonus should dominate identical popularity"
        );
    }

    #[test]
    fn test_favorites_matching_is_case_insensitive() {
        let liked = LikedSongSet::from_pairs([("Known Song", "Known Artist")]);
        let matched = make_track("m", "KNOWN SONG", "known artist", Some(40), None, None);
        assert!(FavoritesScorer::base_score(&matched, &liked) > 0.5);
    }

    #[test]
    fn test_favorites_degrades_to_popularity_without_liked_songs() {
        let empty = LikedSongSet::new();
        let hit = make_track("hit", "Hit", "A", Some(95), None, None);
        let obscure = make_track("obs", "Obscure", "B", Some(5), None, None);
        let mut rng = seeded_rng();
        let scored = FavoritesScorer::score_tracks(&[obscure, hit], &empty, &mut rng);
        assert_eq!(scored[0].track.id, "hit");
    }

    // --- GenreExplorerScorer ---

    fn genre_track(id: &str, artist: &str, genre: &str, popularity: u8) -> Track {
        let mut track = make_track(id, id, artist, Some(popularity), None, None);
        track.genre = Some(genre.to_string());
        track
    }

    #[test]
    fn test_explorer_prefers_novel_genres() {
        let preferred: HashSet<String> = ["rock".to_string(), "pop".to_string()].into();
        let novel = genre_track("n", "A", "jazz", 50);
        let familiar = genre_track("f", "B", "Rock", 50);
        assert!(
            GenreExplorerScorer::base_score(&novel, &preferred)
                > GenreExplorerScorer::base_score(&familiar, &preferred) + 0.5
        );
    }

    #[test]
    fn test_explorer_one_track_per_artist_with_enough_artists() {
        let preferred: HashSet<String> = ["rock".to_string()].into();
        // 12 artists, two tracks each: the first pass alone can fill the
        // playlist, so no artist may appear twice
        let mut pool = Vec::new();
        for i in 0..12 {
            pool.push(genre_track(&format!("a{i}"), &format!("Artist {i}"), "jazz", 60));
            pool.push(genre_track(&format!("b{i}"), &format!("Artist {i}"), "jazz", 40));
        }
        let mut rng = seeded_rng();
        let scored = GenreExplorerScorer::score_tracks(&pool, &preferred, &mut rng);
        let picked = GenreExplorerScorer::select_diverse(scored, MAX_PLAYLIST_LEN, &mut rng);

        assert_eq!(picked.len(), MAX_PLAYLIST_LEN);
        let artists: HashSet<String> = picked
            .iter()
            .map(|s| s.track.primary_artist().to_string())
            .collect();
        assert_eq!(artists.len(), picked.len(), "an artist appears twice");
    }

    #[test]
    fn test_explorer_tops_up_when_artists_are_scarce() {
        let preferred: HashSet<String> = ["rock".to_string()].into();
        // Only 3 artists but 15 tracks: first pass takes one per artist,
        // top-up fills the rest regardless of artist
        let mut pool = Vec::new();
        for i in 0..15 {
            pool.push(genre_track(
                &format!("t{i}"),
                &format!("Artist {}", i % 3),
                "jazz",
                50,
            ));
        }
        let mut rng = seeded_rng();
        let scored = GenreExplorerScorer::score_tracks(&pool, &preferred, &mut rng);
        let picked = GenreExplorerScorer::select_diverse(scored, MAX_PLAYLIST_LEN, &mut rng);
        assert_eq!(picked.len(), MAX_PLAYLIST_LEN);
    }

    #[test]
    fn test_explorer_selection_is_sorted_descending() {
        let preferred: HashSet<String> = ["rock".to_string()].into();
        let pool: Vec<Track> = (0..20)
            .map(|i| genre_track(&format!("t{i}"), &format!("Artist {i}"), "jazz", (i * 5) as u8))
            .collect();
        let mut rng = seeded_rng();
        let scored = GenreExplorerScorer::score_tracks(&pool, &preferred, &mut rng);
        let picked = GenreExplorerScorer::select_diverse(scored, MAX_PLAYLIST_LEN, &mut rng);
        for pair in picked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    // --- PlaylistAssembler ---

    fn assemble(archetype: &str, pool: Vec<Track>) -> Result<Vec<ScoredTrack>, EngineError> {
        let mut rng = seeded_rng();
        PlaylistAssembler::assemble(archetype, pool, &LikedSongSet::new(), &HashSet::new(), &mut rng)
    }

    #[test]
    fn test_assembler_caps_playlist_at_ten() {
        let pool: Vec<Track> = (0..25)
            .map(|i| make_track(&format!("t{i}"), "T", "A", Some(50), None, None))
            .collect();
        let playlist = assemble("throwback", pool).unwrap();
        assert_eq!(playlist.len(), MAX_PLAYLIST_LEN);
    }

    #[test]
    fn test_assembler_returns_whole_pool_when_small() {
        let pool: Vec<Track> = (0..3)
            .map(|i| make_track(&format!("t{i}"), "T", "A", Some(50), None, None))
            .collect();
        let playlist = assemble("new-releases", pool).unwrap();
        assert_eq!(playlist.len(), 3);
    }

    #[test]
    fn test_assembler_rejects_empty_pool() {
        let result = assemble("mood-happy", Vec::new());
        assert!(matches!(result, Err(EngineError::EmptyPool)));
    }

    #[test]
    fn test_assembler_dedups_by_id() {
        let pool = vec![
            make_track("dup", "First", "A", Some(50), None, None),
            make_track("dup", "Second", "A", Some(50), None, None),
            make_track("other", "Other", "B", Some(50), None, None),
        ];
        let playlist = assemble("past-favorites", pool).unwrap();
        assert_eq!(playlist.len(), 2);
        // First occurrence wins
        assert!(playlist
            .iter()
            .any(|s| s.track.id == "dup" && s.track.name == "First"));
    }

    #[test]
    fn test_assembler_unknown_archetype_falls_back_to_happy() {
        let pool = vec![make_track("t", "T", "A", Some(50), None, None)];
        let playlist = assemble("polka-party", pool).unwrap();
        assert_eq!(playlist[0].archetype, PlaylistArchetype::MoodHappy);
    }

    #[test]
    fn test_assembler_tags_tracks_with_requested_archetype() {
        let pool = vec![make_track("t", "T", "A", Some(50), Some("2010"), None)];
        let playlist = assemble("throwback", pool).unwrap();
        assert_eq!(playlist[0].archetype, PlaylistArchetype::Throwback);
    }

    #[test]
    fn test_archetype_string_round_trip() {
        let all = [
            PlaylistArchetype::MoodHappy,
            PlaylistArchetype::MoodSad,
            PlaylistArchetype::MoodChill,
            PlaylistArchetype::MoodHype,
            PlaylistArchetype::Throwback,
            PlaylistArchetype::PastFavorites,
            PlaylistArchetype::NewReleases,
            PlaylistArchetype::GenreExplorer,
        ];
        for archetype in all {
            assert_eq!(
                PlaylistArchetype::parse_or_default(archetype.as_str()),
                archetype
            );
        }
    }

    #[test]
    fn test_score_display_rounds_to_two_decimals() {
        let scored = ScoredTrack {
            track: make_track("t", "T", "A", Some(50), None, None),
            score: 0.87654,
            archetype: PlaylistArchetype::MoodHappy,
        };
        assert_eq!(scored.display_score(), "0.88");
    }
}
