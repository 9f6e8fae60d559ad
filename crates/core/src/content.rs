//! Fixed placeholder content stamped onto generated rooms: labels and
//! opponent rosters. Campaign-specific content replaces these at the editing
//! layer; generation only needs stable defaults.

pub mod labels {
    pub const START_ROOM: &str = "Outer Gate";
    pub const BOSS_ROOM: &str = "The Warden's Vault";

    pub fn chamber(layer: usize, index: usize) -> String {
        format!("Chamber {layer}-{index}")
    }
}

pub const BATTLE_ROSTER: [&str; 2] = ["Blood Acolyte", "Feral Hound x2"];
pub const BOSS_ROSTER: [&str; 1] = ["Abyssal Warden"];

pub fn roster_strings(roster: &[&str]) -> Vec<String> {
    roster.iter().map(|name| (*name).to_string()).collect()
}
