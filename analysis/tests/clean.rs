mod fixtures;

use analysis::clean::{Stage, StageContext};
use analysis::diagnostics::Anomaly;
use analysis::pipeline::Validated;
use analysis::CleanOptions;
use pretty_assertions::assert_eq;
use serde_json::json;

fn run(stage: Stage, data: common::Match) -> (common::Match, Vec<Anomaly>) {
    let mut anomalies: Vec<Anomaly> = Vec::new();
    let data = stage.apply(data, &StageContext::default(), &mut anomalies);
    (data, anomalies)
}

fn numbers(data: &common::Match) -> Vec<u32> {
    data.game_rounds.iter().map(|r| r.round_num).collect()
}

#[test]
fn excess_players_pattern_rounds() {
    let data = fixtures::load(fixtures::player_count_rounds());

    let (data, anomalies) = run(Stage::ExcessPlayers, data);

    assert_eq!(3, data.game_rounds.len());
    assert_eq!(6, anomalies.len());
    assert!(anomalies.iter().all(Anomaly::drops_round));
}

#[test]
fn excess_players_filters_frames() {
    let mut doc = fixtures::round(1, 0, 0, "CT");
    doc["frames"] = json!([fixtures::frame(5, 5), fixtures::frame(6, 5), fixtures::frame(0, 0)]);
    let data = fixtures::load(fixtures::match_doc(vec![doc]));

    let (data, anomalies) = run(Stage::ExcessPlayers, data);

    assert_eq!(1, data.game_rounds.len());
    assert_eq!(1, data.game_rounds[0].frames.len());
    assert_eq!(
        vec![Anomaly::InvalidFrames {
            round: 1,
            dropped: 2,
            kept: 1
        }],
        anomalies
    );
}

#[test]
fn frame_stages_idempotent() {
    let mut rounds = vec![];
    for (i, pattern) in [(5, 5), (6, 6), (0, 3)].into_iter().enumerate() {
        let mut doc = fixtures::round(i as u32 + 1, 0, 0, "CT");
        doc["frames"] = json!([fixtures::frame(pattern.0, pattern.1)]);
        rounds.push(doc);
    }
    let mut empty = fixtures::round(4, 0, 0, "CT");
    empty["frames"] = json!([]);
    rounds.push(empty);

    let data = fixtures::load(fixtures::match_doc(rounds));

    let (once, _) = run(Stage::NoFrames, data);
    let (once, _) = run(Stage::ExcessPlayers, once);
    let (twice, anomalies) = run(Stage::NoFrames, once.clone());
    let (twice, more) = run(Stage::ExcessPlayers, twice);

    assert_eq!(vec![1, 3], numbers(&once));
    assert_eq!(once, twice);
    assert!(anomalies.is_empty());
    assert!(more.is_empty());
}

#[test]
fn no_frames_only_drops_empty() {
    let mut empty = fixtures::round(2, 1, 0, "CT");
    empty["frames"] = json!([]);
    let mut invalid = fixtures::round(3, 2, 0, "CT");
    invalid["frames"] = json!([fixtures::frame(7, 7)]);
    let data = fixtures::load(fixtures::match_doc(vec![fixtures::round(1, 0, 0, "CT"), empty, invalid]));

    let (data, anomalies) = run(Stage::NoFrames, data);

    assert_eq!(vec![1, 3], numbers(&data));
    assert_eq!(vec![Anomaly::NoFrames { round: 2 }], anomalies);
}

#[test]
fn bad_scoring_cascades_against_kept_rounds() {
    let data = fixtures::load(fixtures::match_doc(vec![
        fixtures::round(1, 0, 0, "CT"),
        fixtures::round(2, 1, 0, "T"),
        fixtures::round(3, 5, 5, "CT"),
        fixtures::round(4, 1, 1, "CT"),
        fixtures::round(5, 1, 1, "CT"),
        fixtures::round(6, 2, 1, "T"),
        fixtures::round(7, 2, 2, "T"),
    ]));

    let (data, anomalies) = run(Stage::BadScoring, data);

    assert_eq!(vec![1, 2, 4, 6, 7], numbers(&data));
    assert_eq!(
        vec![
            Anomaly::BadScoring {
                round: 3,
                expected: (1, 1),
                found: (5, 5)
            },
            Anomaly::BadScoring {
                round: 5,
                expected: (2, 1),
                found: (1, 1)
            },
        ],
        anomalies
    );

    for pair in data.game_rounds.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let ct_step = next.ct_score - prev.ct_score;
        let t_step = next.t_score - prev.t_score;
        assert_eq!(1, ct_step + t_step, "rounds {} -> {}", prev.round_num, next.round_num);
    }
    assert_eq!((0, 0), data.game_rounds[0].score());

    let (again, anomalies) = run(Stage::BadScoring, data.clone());
    assert_eq!(data, again);
    assert!(anomalies.is_empty());
}

#[test]
fn bad_scoring_anchors_on_first_zero_zero_round() {
    let data = fixtures::load(fixtures::match_doc(vec![
        fixtures::round(1, 3, 2, "CT"),
        fixtures::round(2, 4, 2, "CT"),
        fixtures::round(3, 0, 0, "T"),
        fixtures::round(4, 0, 1, "CT"),
    ]));

    let annotations = Validated::new(data.clone(), &CleanOptions::default()).annotations().to_vec();
    assert!(!annotations[0].score_consistent);

    let (data, anomalies) = run(Stage::BadScoring, data);

    assert_eq!(vec![3, 4], numbers(&data));
    assert_eq!((0, 0), data.game_rounds[0].score());
    assert_eq!(
        vec![
            Anomaly::BadScoring {
                round: 1,
                expected: (0, 0),
                found: (3, 2)
            },
            Anomaly::BadScoring {
                round: 2,
                expected: (0, 0),
                found: (4, 2)
            },
        ],
        anomalies
    );
}

#[test]
fn bad_scoring_skips_unscored_rounds() {
    let mut warmup = fixtures::round(1, 3, 2, "CT");
    warmup["isWarmup"] = json!(true);
    let data = fixtures::load(fixtures::match_doc(vec![
        warmup,
        fixtures::knife_round(2),
        fixtures::round(3, 0, 0, "CT"),
        fixtures::round(4, 1, 0, "CT"),
    ]));

    let (data, anomalies) = run(Stage::BadScoring, data);

    assert_eq!(vec![1, 2, 3, 4], numbers(&data));
    assert!(anomalies.is_empty());
}

#[test]
fn bad_scoring_accepts_halftime_switch() {
    let mut rounds = vec![];
    let (mut ct, mut t) = (0, 0);
    for num in 1..=15 {
        rounds.push(fixtures::round(num, ct, t, "CT"));
        ct += 1;
    }
    rounds.push(fixtures::round(16, t, ct, "T"));
    let data = fixtures::load(fixtures::match_doc(rounds));

    let (data, anomalies) = run(Stage::BadScoring, data);

    assert_eq!(16, data.game_rounds.len());
    assert!(anomalies.is_empty());
}

#[test]
fn end_round_drops_trailing_only() {
    let data = fixtures::load(fixtures::match_doc(vec![
        fixtures::round(1, 0, 0, "CT"),
        fixtures::unfinished_round(2, 1, 0),
        fixtures::round(3, 1, 0, "T"),
        fixtures::unfinished_round(4, 1, 1),
        fixtures::unfinished_round(5, 1, 1),
    ]));

    let (data, anomalies) = run(Stage::EndRound, data);

    assert_eq!(vec![1, 2, 3], numbers(&data));
    assert_eq!(
        vec![Anomaly::IncompleteEnd { round: 5 }, Anomaly::IncompleteEnd { round: 4 }],
        anomalies
    );
}

#[test]
fn end_round_draw() {
    let mut draw = fixtures::round(2, 1, 0, "T");
    draw["roundEndReason"] = json!("Draw");
    let data = fixtures::load(fixtures::match_doc(vec![fixtures::round(1, 0, 0, "CT"), draw]));

    let (data, _) = run(Stage::EndRound, data);

    assert_eq!(vec![1], numbers(&data));
}

#[test]
fn warmups_by_flag_and_phase() {
    let mut flagged = fixtures::round(1, 0, 0, "CT");
    flagged["isWarmup"] = json!(true);
    let mut doc = fixtures::match_doc(vec![
        flagged,
        fixtures::round(2, 0, 0, "CT"),
        fixtures::round(3, 0, 0, "CT"),
        fixtures::round(4, 1, 0, "CT"),
    ]);
    doc["matchPhases"] = json!({ "warmup": [2] });

    let (data, anomalies) = run(Stage::Warmups, fixtures::load(doc));

    assert_eq!(vec![3, 4], numbers(&data));
    assert_eq!(vec![Anomaly::Warmup { round: 1 }, Anomaly::Warmup { round: 2 }], anomalies);
}

#[test]
fn knife_rounds() {
    let mut marked = fixtures::round(2, 0, 0, "CT");
    marked["roundType"] = json!("knife");
    let mut no_kills = fixtures::round(3, 0, 0, "CT");
    no_kills["kills"] = json!([]);
    let data = fixtures::load(fixtures::match_doc(vec![fixtures::knife_round(1), marked, no_kills]));

    let (data, anomalies) = run(Stage::KnifeRounds, data);

    assert_eq!(vec![3], numbers(&data));
    assert_eq!(2, anomalies.len());
}

#[test]
fn excess_kill_rounds() {
    let mut corrupted = fixtures::round(2, 1, 0, "CT");
    corrupted["kills"] = (0..11).map(|i| json!({ "tick": i, "weapon": "AK-47" })).collect();
    let mut short_handed = fixtures::round(3, 2, 0, "CT");
    short_handed["frames"] = json!([fixtures::frame(2, 2)]);
    short_handed["kills"] = (0..5).map(|i| json!({ "tick": i, "weapon": "AWP" })).collect();
    let data = fixtures::load(fixtures::match_doc(vec![fixtures::round(1, 0, 0, "CT"), corrupted, short_handed]));

    let (data, anomalies) = run(Stage::ExcessKills, data);

    assert_eq!(vec![1], numbers(&data));
    assert_eq!(
        vec![
            Anomaly::ExcessKills {
                round: 2,
                kills: 11,
                limit: 10
            },
            Anomaly::ExcessKills {
                round: 3,
                kills: 5,
                limit: 4
            },
        ],
        anomalies
    );
}

#[test]
fn time_rounds() {
    let mut short = fixtures::round(2, 1, 0, "CT");
    short["endTick"] = json!(20_100);
    short["freezeTimeEndTick"] = json!(20_050);
    short["endOfficialTick"] = json!(20_200);
    let mut unordered = fixtures::round(3, 2, 0, "CT");
    unordered["freezeTimeEndTick"] = json!(1);
    let data = fixtures::load(fixtures::match_doc(vec![fixtures::round(1, 0, 0, "CT"), short, unordered]));

    let (data, anomalies) = run(Stage::TimeRounds, data);

    assert_eq!(vec![1], numbers(&data));
    assert_eq!(2, anomalies.len());
}

#[test]
fn filter_runs_in_fixed_order() {
    let data = fixtures::load(fixtures::thirty_rounds());
    let options = CleanOptions::none();

    let mut forward: Vec<Anomaly> = Vec::new();
    let a = Validated::new(data.clone(), &options)
        .filter(&[Stage::KnifeRounds, Stage::EndRound], &StageContext::default(), &mut forward)
        .renumber(&options.format);

    let mut backward: Vec<Anomaly> = Vec::new();
    let b = Validated::new(data, &options)
        .filter(&[Stage::EndRound, Stage::KnifeRounds], &StageContext::default(), &mut backward)
        .renumber(&options.format);

    assert_eq!(a, b);
    assert_eq!(forward, backward);
    assert_eq!(vec![Anomaly::IncompleteEnd { round: 30 }, Anomaly::KnifeRound { round: 1 }], forward);
}
