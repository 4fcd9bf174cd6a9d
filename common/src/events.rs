use crate::Extra;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kill {
    pub tick: i64,
    pub seconds: f64,
    pub attacker_steam_id: Option<u64>,
    pub attacker_name: Option<String>,
    pub attacker_side: Option<String>,
    pub victim_steam_id: Option<u64>,
    pub victim_name: Option<String>,
    pub victim_side: Option<String>,
    pub weapon: String,
    pub weapon_class: String,
    pub is_suicide: bool,
    pub is_teamkill: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Kill {
    pub fn is_knife(&self) -> bool {
        self.weapon.eq_ignore_ascii_case("knife")
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Damage {
    pub tick: i64,
    pub seconds: f64,
    pub attacker_name: Option<String>,
    pub victim_name: Option<String>,
    pub weapon: String,
    pub hp_damage: i64,
    pub hp_damage_taken: i64,
    pub armor_damage: i64,
    pub is_friendly_fire: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Grenade {
    pub throw_tick: i64,
    pub destroy_tick: i64,
    pub thrower_name: Option<String>,
    pub grenade_type: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flash {
    pub tick: i64,
    pub attacker_name: Option<String>,
    pub player_name: Option<String>,
    pub flash_duration: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeaponFire {
    pub tick: i64,
    pub player_name: Option<String>,
    pub weapon: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BombEvent {
    pub tick: i64,
    pub player_name: Option<String>,
    pub bomb_action: String,
    pub bomb_site: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
