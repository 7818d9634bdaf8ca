use scorer::{MAX_SCORE_PER_PROTOCOL, ScoringParams, protocol_score, time_weighted_score};

const NOW: i64 = 1_700_000_000;

#[test]
fn vote_cast_at_reference_time_scores_exactly_one() {
    assert_eq!(time_weighted_score(NOW, NOW), 1.0);
}

#[test]
fn vote_score_strictly_decreases_with_age_and_stays_positive() {
    let ages = [0_i64, 1, 60, 86_400, 7_000_000, 50_000_000, 500_000_000];
    let scores: Vec<f64> = ages
        .iter()
        .map(|age| time_weighted_score(NOW, NOW - age))
        .collect();

    assert!(scores.iter().all(|score| *score > 0.0 && *score <= 1.0));
    assert!(scores.windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn vote_score_halves_after_about_eighty_days() {
    let half_life_s = (2.0_f64.ln() / 1e-7).round() as i64;
    let score = time_weighted_score(NOW, NOW - half_life_s);
    assert!((score - 0.5).abs() < 1e-6, "score was {score}");
}

#[test]
fn future_dated_votes_score_exactly_zero() {
    assert_eq!(time_weighted_score(NOW, NOW + 1), 0.0);
    assert_eq!(time_weighted_score(NOW, NOW + 10_000_000_000), 0.0);
    assert_eq!(time_weighted_score(NOW, i64::MAX), 0.0);
}

#[test]
fn protocol_score_grows_with_votes_until_capped() {
    let mut timestamps = Vec::new();
    let mut previous = protocol_score(NOW, &timestamps);
    assert_eq!(previous, 0.0);

    for index in 0..250_i64 {
        timestamps.push(NOW - index * 3_600);
        let current = protocol_score(NOW, &timestamps);
        assert!(current >= previous);
        assert!(current <= MAX_SCORE_PER_PROTOCOL);
        previous = current;
    }
    assert_eq!(previous, MAX_SCORE_PER_PROTOCOL);
}

#[test]
fn protocol_score_ignores_future_votes() {
    let timestamps = [NOW, NOW + 500, NOW + 1_000_000];
    assert_eq!(protocol_score(NOW, &timestamps), 1.0);
}

#[test]
fn custom_params_change_the_cap() {
    let params = ScoringParams {
        max_score_per_protocol: 3.0,
        ..ScoringParams::default()
    };
    let timestamps = vec![NOW; 10];
    assert_eq!(params.protocol_score(NOW, &timestamps), 3.0);
}
