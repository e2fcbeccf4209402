/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Percentage chance (d100 roll, `<=` succeeds) that entering a
    /// forest/cave-class room spawns an extra enemy.
    pub encounter_chance: u32,
    /// Percentage chance (d100 roll, `<=` succeeds) that fleeing combat
    /// succeeds.
    pub flee_chance: u32,
    /// Attack jitter for enemy rolls: damage is drawn uniformly from
    /// `[attack - jitter, attack + jitter]`, floored at 1.
    pub enemy_attack_jitter: i32,
}

impl GameConfig {
    // ===== fixed starting stats =====
    pub const STARTING_HEALTH: i32 = 100;
    pub const STARTING_ATTACK: i32 = 10;
    pub const STARTING_DEFENSE: i32 = 5;
    pub const STARTING_GOLD: i32 = 50;

    // ===== hazard chip damage (flat, not run through the defense formula) =====
    pub const HAZARD_DAMAGE_SEVERE: i32 = 2;
    pub const HAZARD_DAMAGE_MINOR: i32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENCOUNTER_CHANCE: u32 = 60;
    pub const DEFAULT_FLEE_CHANCE: u32 = 70;
    pub const DEFAULT_ENEMY_ATTACK_JITTER: i32 = 2;

    /// Journal entry recorded when the final boss falls. Narrative flavor;
    /// the win check itself keys on the engine's boss-defeated flag.
    pub const BOSS_VICTORY_MEMORY: &'static str =
        "You have defeated the Shadow Lord and restored balance to the realm!";

    pub fn new() -> Self {
        Self {
            encounter_chance: Self::DEFAULT_ENCOUNTER_CHANCE,
            flee_chance: Self::DEFAULT_FLEE_CHANCE,
            enemy_attack_jitter: Self::DEFAULT_ENEMY_ATTACK_JITTER,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
