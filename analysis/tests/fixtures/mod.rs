#![allow(dead_code)]

use serde_json::{json, Value};

pub fn players(count: usize) -> Value {
    (0..count)
        .map(|i| json!({ "name": format!("player{}", i), "isAlive": true }))
        .collect()
}

pub fn frame(ct: usize, t: usize) -> Value {
    json!({
        "tick": 0,
        "ct": { "teamName": "Team A", "players": players(ct) },
        "t": { "teamName": "Team B", "players": players(t) },
    })
}

fn end_reason(winner: &str) -> &'static str {
    match winner {
        "CT" => "CTWin",
        "T" => "TerroristsWin",
        _ => "",
    }
}

pub fn round(num: u32, ct_score: u32, t_score: u32, winner: &str) -> Value {
    let start = num as i64 * 10_000;
    json!({
        "roundNum": num,
        "isWarmup": false,
        "startTick": start,
        "freezeTimeEndTick": start + 2_000,
        "endTick": start + 8_000,
        "endOfficialTick": start + 8_500,
        "ctScore": ct_score,
        "tScore": t_score,
        "winningSide": winner,
        "roundEndReason": end_reason(winner),
        "kills": [
            { "tick": start + 3_000, "weapon": "AK-47", "weaponClass": "Rifle" },
            { "tick": start + 4_000, "weapon": "M4A4", "weaponClass": "Rifle" },
        ],
        "damages": [{ "tick": start + 2_900, "weapon": "AK-47", "hpDamage": 27 }],
        "grenades": [],
        "flashes": [],
        "weaponFires": [{ "tick": start + 2_800, "weapon": "AK-47" }],
        "bombEvents": [],
        "frames": [frame(5, 5), frame(5, 4)],
    })
}

pub fn knife_round(num: u32) -> Value {
    let mut r = round(num, 0, 0, "T");
    r["kills"] = json!([
        { "weapon": "Knife", "weaponClass": "Melee" },
        { "weapon": "Knife", "weaponClass": "Melee" },
    ]);
    r
}

pub fn unfinished_round(num: u32, ct_score: u32, t_score: u32) -> Value {
    round(num, ct_score, t_score, "")
}

/// `count` rounds numbered from `first`, starting 0-0, with consistent scores.
pub fn scored_rounds(first: u32, count: u32) -> (Vec<Value>, (u32, u32)) {
    let (mut ct, mut t) = (0, 0);
    let mut rounds = Vec::new();
    for i in 0..count {
        let winner = if i % 3 == 2 { "T" } else { "CT" };
        rounds.push(round(first + i, ct, t, winner));
        if winner == "CT" {
            ct += 1;
        } else {
            t += 1;
        }
    }
    (rounds, (ct, t))
}

pub fn match_doc(rounds: Vec<Value>) -> Value {
    json!({
        "matchID": "fixture",
        "clientName": "GOTV Demo",
        "mapName": "de_mirage",
        "tickRate": 128,
        "playbackTicks": 400_000,
        "parserParameters": {
            "parseRate": 128,
            "parseFrames": true,
            "parseKillFrames": false,
            "tradeTime": 5,
            "roundBuyStyle": "hltv",
            "damagesRolledUp": false,
        },
        "gameRounds": rounds,
        "matchPhases": {},
    })
}

/// Knife round, 28 played rounds and a final round cut short.
pub fn thirty_rounds() -> Value {
    let mut rounds = vec![knife_round(1)];
    let (played, (ct, t)) = scored_rounds(2, 28);
    rounds.extend(played);
    rounds.push(unfinished_round(30, ct, t));
    match_doc(rounds)
}

/// One round per frame pattern, three of which have a valid frame.
pub fn player_count_rounds() -> Value {
    let null = Value::Null;
    let three = json!([1, 2, 3]);
    let six = json!([1, 2, 3, 4, 5, 6]);

    let patterns = [
        (null.clone(), null.clone()),
        (null.clone(), three.clone()),
        (null.clone(), six.clone()),
        (three.clone(), null.clone()),
        (three.clone(), three.clone()),
        (three.clone(), six.clone()),
        (six.clone(), null.clone()),
        (six.clone(), three.clone()),
        (six.clone(), six.clone()),
    ];

    json!({
        "gameRounds": patterns
            .into_iter()
            .map(|(ct, t)| json!({ "frames": [{ "ct": { "players": ct }, "t": { "players": t } }] }))
            .collect::<Vec<_>>(),
    })
}

pub fn load(doc: Value) -> common::Match {
    common::Match::from_value(doc).unwrap()
}
