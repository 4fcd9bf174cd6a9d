//! Flat tables, one row per event, joined on `roundNum`.

use common::{Frame, Match, Round, Side, TeamState};
use serde_json::Value;

use crate::error::Result;

pub type Row = serde_json::Map<String, Value>;

const ROUND_LISTS: [&str; 7] = [
    "kills",
    "damages",
    "grenades",
    "flashes",
    "weaponFires",
    "bombEvents",
    "frames",
];

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tables {
    pub rounds: Vec<Row>,
    pub kills: Vec<Row>,
    pub damages: Vec<Row>,
    pub grenades: Vec<Row>,
    pub flashes: Vec<Row>,
    pub weapon_fires: Vec<Row>,
    pub bomb_events: Vec<Row>,
    pub frames: Vec<Row>,
    pub player_frames: Vec<Row>,
}

fn to_row<T: serde::Serialize>(value: &T) -> Result<Row> {
    Ok(match serde_json::to_value(value)? {
        Value::Object(map) => map,
        other => {
            let mut row = Row::new();
            row.insert("value".to_owned(), other);
            row
        }
    })
}

fn event_rows<T, F>(data: &Match, select: F) -> Result<Vec<Row>>
where
    T: serde::Serialize,
    F: Fn(&Round) -> &[T],
{
    let mut rows = Vec::new();
    for round in data.game_rounds.iter() {
        for event in select(round) {
            let mut row = to_row(event)?;
            row.insert("roundNum".to_owned(), round.round_num.into());
            rows.push(row);
        }
    }
    Ok(rows)
}

pub fn rounds(data: &Match) -> Result<Vec<Row>> {
    data.game_rounds
        .iter()
        .map(|round| -> Result<Row> {
            let mut row = to_row(round)?;
            for list in ROUND_LISTS {
                row.remove(list);
            }
            Ok(row)
        })
        .collect()
}

pub fn kills(data: &Match) -> Result<Vec<Row>> {
    event_rows(data, |r| r.kills.as_slice())
}

pub fn damages(data: &Match) -> Result<Vec<Row>> {
    event_rows(data, |r| r.damages.as_slice())
}

pub fn grenades(data: &Match) -> Result<Vec<Row>> {
    event_rows(data, |r| r.grenades.as_slice())
}

pub fn flashes(data: &Match) -> Result<Vec<Row>> {
    event_rows(data, |r| r.flashes.as_slice())
}

pub fn weapon_fires(data: &Match) -> Result<Vec<Row>> {
    event_rows(data, |r| r.weapon_fires.as_slice())
}

pub fn bomb_events(data: &Match) -> Result<Vec<Row>> {
    event_rows(data, |r| r.bomb_events.as_slice())
}

// Side scalars are lifted into prefixed columns, e.g. `ctTeamName`.
fn team_columns(row: &mut Row, prefix: &str, team: &TeamState) -> Result<()> {
    let mut columns = to_row(team)?;
    columns.remove("players");

    for (key, value) in columns {
        let mut chars = key.chars();
        let name = match chars.next() {
            Some(first) => format!("{}{}{}", prefix, first.to_ascii_uppercase(), chars.as_str()),
            None => continue,
        };
        row.insert(name, value);
    }
    Ok(())
}

fn frame_row(round: &Round, idx: usize, frame: &Frame) -> Result<Row> {
    let mut row = to_row(frame)?;
    row.remove("ct");
    row.remove("t");
    team_columns(&mut row, "ct", &frame.ct)?;
    team_columns(&mut row, "t", &frame.t)?;
    row.insert("roundNum".to_owned(), round.round_num.into());
    row.insert("frameIdx".to_owned(), idx.into());
    Ok(row)
}

pub fn frames(data: &Match) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for round in data.game_rounds.iter() {
        for (idx, frame) in round.frames.iter().enumerate() {
            rows.push(frame_row(round, idx, frame)?);
        }
    }
    Ok(rows)
}

pub fn player_frames(data: &Match) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for round in data.game_rounds.iter() {
        for (idx, frame) in round.frames.iter().enumerate() {
            for side in [Side::Ct, Side::T] {
                let players = match &frame.side(side).players {
                    Some(p) => p,
                    None => continue,
                };

                for player in players {
                    let mut row = match player {
                        Value::Object(map) => map.clone(),
                        other => {
                            let mut row = Row::new();
                            row.insert("player".to_owned(), other.clone());
                            row
                        }
                    };
                    row.insert("roundNum".to_owned(), round.round_num.into());
                    row.insert("frameIdx".to_owned(), idx.into());
                    row.insert("tick".to_owned(), frame.tick.into());
                    row.insert("side".to_owned(), side.as_str().into());
                    rows.push(row);
                }
            }
        }
    }
    Ok(rows)
}

pub fn project(data: &Match) -> Result<Tables> {
    Ok(Tables {
        rounds: rounds(data)?,
        kills: kills(data)?,
        damages: damages(data)?,
        grenades: grenades(data)?,
        flashes: flashes(data)?,
        weapon_fires: weapon_fires(data)?,
        bomb_events: bomb_events(data)?,
        frames: frames(data)?,
        player_frames: player_frames(data)?,
    })
}
