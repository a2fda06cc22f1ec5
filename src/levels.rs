//! Stock level plans and JSON level packs
//!
//! A pack is a JSON array of plans, each plan an array of row strings:
//! `[["  o ", "@ xx"], ["..."]]`.

use crate::error::{SimError, SimResult};
use crate::parser::Plan;

pub const LEVEL_ONE: &[&str] = &[
    "         ",
    "         ",
    "    =    ",
    "       o ",
    "     !xxx",
    " @       ",
    "xxx!     ",
    "         ",
];

pub const LEVEL_TWO: &[&str] = &[
    "      v  ",
    "         ",
    "  v      ",
    "        o",
    "        x",
    "@   x    ",
    "x        ",
    "         ",
];

/// The stock levels, in play order
pub fn builtin() -> Vec<Plan> {
    [LEVEL_ONE, LEVEL_TWO]
        .iter()
        .map(|plan| plan.iter().map(|row| row.to_string()).collect())
        .collect()
}

pub fn from_json(json: &str) -> SimResult<Vec<Plan>> {
    let pack: Vec<Plan> = serde_json::from_str(json).map_err(SimError::InvalidLevelPack)?;
    log::info!("Loaded level pack with {} levels", pack.len());
    Ok(pack)
}

pub fn to_json(pack: &[Plan]) -> SimResult<String> {
    serde_json::to_string(pack).map_err(SimError::InvalidLevelPack)
}
