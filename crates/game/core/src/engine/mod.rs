//! Command dispatch and the exploration/combat state machine.
//!
//! The engine borrows the caller's [`GameState`] and mutates it one command
//! at a time. It performs no I/O: user-facing text and boundary
//! notifications come back in a [`TurnReport`], so a blocking line reader
//! and a fixed-rate key poll produce identical transitions when they feed
//! the same command strings.

mod errors;

pub use errors::EngineError;

use crate::combat::{CombatSession, enemy_attack_roll};
use crate::command::{CombatChoice, Command};
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::event::GameEvent;
use crate::state::{Enemy, EnemyKind, EntityId, GameState, ItemKind, Mode, Room, RunState};

/// Per-call environment: the RNG handle and the tunable configuration.
///
/// Threaded explicitly so every probabilistic branch is reproducible with a
/// scripted source.
pub struct TurnEnv<'r> {
    pub rng: &'r mut dyn RngOracle,
    pub config: &'r GameConfig,
}

/// Everything one command produced: display text in order, boundary events
/// for observers, and whether the turn counter advanced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub messages: Vec<String>,
    pub events: Vec<GameEvent>,
    pub turn_consumed: bool,
}

impl TurnReport {
    fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

/// The rules orchestrator. Holds no state of its own; it borrows the game
/// state for a run and every mutation flows through [`Self::handle_line`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    /// Full description of the current room, for the front end's opening
    /// display.
    ///
    /// # Errors
    ///
    /// Fails only on an integrity violation (current room missing from the
    /// arena).
    pub fn describe_current(&self) -> Result<Vec<String>, EngineError> {
        self.current_room().map(Room::describe)
    }

    /// Process one input line.
    ///
    /// Empty lines are silently skipped. Unrecognized input produces a hint
    /// and does not advance the turn counter. Hazard chip damage applies
    /// after each successful command while exploring; since combat rounds
    /// leave the mode at `InCombat` until the session resolves, a combat
    /// session chips the player exactly once, on the round that ends it.
    ///
    /// # Errors
    ///
    /// Only integrity violations surface as `Err`; everything a player can
    /// cause comes back as messages in the report.
    pub fn handle_line(
        &mut self,
        line: &str,
        env: &mut TurnEnv<'_>,
    ) -> Result<TurnReport, EngineError> {
        let mut report = TurnReport::default();
        let line = line.trim();
        if line.is_empty() {
            return Ok(report);
        }
        if self.state.run_state != RunState::Running {
            report.say("The adventure has already ended.");
            return Ok(report);
        }

        let succeeded = match self.state.mode.clone() {
            Mode::ConfirmQuit => {
                self.handle_confirm_quit(line, &mut report);
                false
            }
            Mode::InCombat(session) => self.handle_combat_round(session, line, env, &mut report)?,
            Mode::Exploring => self.handle_exploration(line, env, &mut report)?,
        };

        if report.turn_consumed {
            self.state.turns_played += 1;
        }
        if succeeded
            && self.state.run_state == RunState::Running
            && self.state.player.is_alive()
            && matches!(self.state.mode, Mode::Exploring)
        {
            self.apply_hazard(&mut report)?;
        }
        self.check_endgame(&mut report);
        Ok(report)
    }

    /// Input-stream termination is an implicit quit.
    pub fn notify_eof(&mut self) -> TurnReport {
        let mut report = TurnReport::default();
        if self.state.run_state == RunState::Running {
            self.state.run_state = RunState::Quit;
            report.say("Farewell, adventurer.");
        }
        report
    }

    // ========================================================================
    // Exploration
    // ========================================================================

    fn handle_exploration(
        &mut self,
        line: &str,
        env: &mut TurnEnv<'_>,
        report: &mut TurnReport,
    ) -> Result<bool, EngineError> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                report.say(err.to_string());
                return Ok(false);
            }
        };

        report.turn_consumed = true;
        match command {
            Command::Look => {
                for line in self.current_room()?.describe() {
                    report.say(line);
                }
                Ok(true)
            }
            Command::Move(direction) => self.handle_move(&direction, env, report),
            Command::Take(name) => self.handle_take(&name, report),
            Command::Use(name) => self.handle_use(&name, report),
            Command::Attack => self.begin_combat(report),
            Command::Inventory => {
                self.show_inventory(report);
                Ok(true)
            }
            Command::Memory => {
                self.show_memories(report);
                Ok(true)
            }
            Command::Status => {
                self.show_status(report);
                Ok(true)
            }
            Command::Save => {
                report.say("Saving is not available yet.");
                Ok(true)
            }
            Command::Load => {
                report.say("Loading is not available yet.");
                Ok(true)
            }
            Command::Help => {
                Self::show_help(report);
                Ok(true)
            }
            Command::Quit => {
                report.turn_consumed = false;
                self.state.mode = Mode::ConfirmQuit;
                report.say("Are you sure you want to quit? (y/n)");
                Ok(false)
            }
        }
    }

    fn handle_move(
        &mut self,
        direction: &str,
        env: &mut TurnEnv<'_>,
        report: &mut TurnReport,
    ) -> Result<bool, EngineError> {
        let room = self.current_room()?;
        if room.has_alive_enemies() {
            report.say("You can't leave while enemies are blocking your way!");
            return Ok(false);
        }
        let Some(target) = room.exit(direction).cloned() else {
            report.say("You can't go that way.");
            return Ok(false);
        };

        self.state.current = target.clone();
        report.events.push(GameEvent::RoomChanged {
            room: target.clone(),
        });

        let room = self
            .state
            .world
            .room_mut(&target)
            .ok_or_else(|| EngineError::MissingRoom(target.clone()))?;
        room.set_visited(true);
        for line in room.describe() {
            report.say(line);
        }
        let spawns = room.biome().spawns_encounters();

        // A spawned enemy blocks the exits like any other, but combat only
        // starts when the player attacks.
        if spawns && env.rng.roll_d100() <= env.config.encounter_chance {
            let id = self.state.world.alloc_entity_id();
            let enemy = Enemy::spawn_random(id, env.rng);
            let name = enemy.name().to_string();
            let room = self
                .state
                .world
                .room_mut(&target)
                .ok_or_else(|| EngineError::MissingRoom(target.clone()))?;
            room.add_enemy(enemy);
            report.say(String::new());
            report.say(format!("A {name} leaps out at you!"));
        }
        Ok(true)
    }

    fn handle_take(&mut self, name: &str, report: &mut TurnReport) -> Result<bool, EngineError> {
        let s = &mut *self.state;
        let room = s
            .world
            .room_mut(&s.current)
            .ok_or_else(|| EngineError::MissingRoom(s.current.clone()))?;
        let Some(item) = room.take_item(name) else {
            report.say("There's no such item here.");
            return Ok(false);
        };

        report.say(format!("You take the {}.", item.name()));
        report.events.push(GameEvent::ItemPickedUp {
            item: item.name().to_string(),
        });

        if let Some(echo) = item.memory_echo()
            && s.player.add_memory(echo)
        {
            report.say(String::new());
            report.say("*** MEMORY RECOVERED ***");
            report.say(echo.to_string());
        }

        if item.kind() == ItemKind::Weapon {
            report.say(format!("You equip the {}.", item.name()));
            s.player.equip_weapon(item);
        } else {
            s.player.add_item(item);
        }
        Ok(true)
    }

    /// The shared `use` handler: identical semantics from the exploration
    /// prompt and from the combat menu.
    fn handle_use(&mut self, name: &str, report: &mut TurnReport) -> Result<bool, EngineError> {
        let Some(kind) = self.state.player.item(name).map(|item| item.kind()) else {
            report.say("You don't have that item.");
            return Ok(false);
        };

        match kind {
            ItemKind::Potion => {
                let Some(potion) = self.state.player.take_item(name) else {
                    return Ok(false);
                };
                let restored = self.state.player.heal(potion.effect());
                report.say(format!(
                    "You drink the {} and restore {restored} health.",
                    potion.name()
                ));
                report.say(format!(
                    "Health: {}/{}",
                    self.state.player.health(),
                    self.state.player.max_health()
                ));
                Ok(true)
            }
            ItemKind::Key => self.handle_use_key(name, report),
            // Weapons equip on pickup, never through `use`.
            ItemKind::Weapon | ItemKind::Treasure | ItemKind::QuestItem => {
                report.say("You can't use that right now.");
                Ok(false)
            }
        }
    }

    fn handle_use_key(&mut self, name: &str, report: &mut TurnReport) -> Result<bool, EngineError> {
        let Some(key_name) = self
            .state
            .player
            .item(name)
            .map(|item| item.name().to_string())
        else {
            report.say("You don't have that item.");
            return Ok(false);
        };

        let s = &mut *self.state;
        let room = s
            .world
            .room_mut(&s.current)
            .ok_or_else(|| EngineError::MissingRoom(s.current.clone()))?;
        let fits = room
            .locked_passage()
            .is_some_and(|passage| passage.key_name.eq_ignore_ascii_case(&key_name));
        if !fits {
            report.say("Nothing happens.");
            return Ok(false);
        }
        let Some(passage) = room.take_locked_passage() else {
            return Ok(false);
        };
        room.add_exit(passage.direction.clone(), passage.to.clone());
        room.set_special_event(passage.reveal_text.clone());
        report.say(passage.reveal_text);
        report.say(format!("A new path opens to the {}!", passage.direction));
        Ok(true)
    }

    // ========================================================================
    // Combat
    // ========================================================================

    /// Open a combat session against the room's first alive enemy.
    fn begin_combat(&mut self, report: &mut TurnReport) -> Result<bool, EngineError> {
        let room = self.current_room()?;
        let Some(enemy) = room.alive_enemy() else {
            report.say("There's nothing to attack here.");
            return Ok(false);
        };
        let id = enemy.id();
        report.say(String::new());
        report.say("*** COMBAT BEGINS ***");
        for line in enemy.status_lines() {
            report.say(line);
        }
        self.state.mode = Mode::InCombat(CombatSession::new(id));
        Self::show_combat_menu(report);
        Ok(true)
    }

    fn handle_combat_round(
        &mut self,
        session: CombatSession,
        line: &str,
        env: &mut TurnEnv<'_>,
        report: &mut TurnReport,
    ) -> Result<bool, EngineError> {
        let Some(choice) = CombatChoice::parse(line) else {
            // Invalid input re-prompts without consuming the round.
            Self::show_combat_menu(report);
            return Ok(false);
        };
        report.turn_consumed = true;

        match choice {
            CombatChoice::Attack => self.combat_attack(session.enemy, env, report),
            CombatChoice::UseItem(name) => {
                // Item use consumes the round but draws no retaliation.
                self.handle_use(&name, report)
            }
            CombatChoice::Flee => {
                if env.rng.roll_d100() <= env.config.flee_chance {
                    report.say("You successfully flee from combat!");
                    self.state.mode = Mode::Exploring;
                    report.say("*** COMBAT ENDS ***");
                } else {
                    report.say("You couldn't escape!");
                    self.enemy_retaliates(session.enemy, env, report)?;
                }
                Ok(true)
            }
        }
    }

    fn combat_attack(
        &mut self,
        target: EntityId,
        env: &mut TurnEnv<'_>,
        report: &mut TurnReport,
    ) -> Result<bool, EngineError> {
        let attack = self.state.player.effective_attack();
        let s = &mut *self.state;
        let room = s
            .world
            .room_mut(&s.current)
            .ok_or_else(|| EngineError::MissingRoom(s.current.clone()))?;
        let Some(enemy) = room.enemy_mut(target) else {
            // Session target vanished; close the session.
            s.mode = Mode::Exploring;
            return Ok(false);
        };

        let dealt = enemy.take_damage(attack);
        let name = enemy.name().to_string();
        let defeated = !enemy.is_alive();
        let gold = enemy.gold_reward();
        let kind = enemy.kind();

        report.say(format!("You attack the {name} for {dealt} damage!"));
        report.events.push(GameEvent::CombatHit {
            by_player: true,
            amount: dealt,
        });

        if !defeated {
            self.enemy_retaliates(target, env, report)?;
            return Ok(true);
        }

        report.say(format!("You defeated the {name}!"));
        report.say(format!("You loot {gold} gold."));
        report.events.push(GameEvent::EnemyDefeated { enemy: target });
        s.player.add_gold(gold);

        if kind == EnemyKind::Boss {
            s.final_boss_defeated = true;
            if s.player.add_memory(GameConfig::BOSS_VICTORY_MEMORY) {
                report.say(String::new());
                report.say("*** MEMORY RECOVERED ***");
                report.say(GameConfig::BOSS_VICTORY_MEMORY);
            }
        }

        self.state.mode = Mode::Exploring;
        let s = &mut *self.state;
        if let Some(room) = s.world.room_mut(&s.current) {
            room.remove_dead_enemies();
        }
        report.say("*** COMBAT ENDS ***");
        Ok(true)
    }

    /// One enemy counter-attack, the only path that damages the player in
    /// combat.
    fn enemy_retaliates(
        &mut self,
        attacker: EntityId,
        env: &mut TurnEnv<'_>,
        report: &mut TurnReport,
    ) -> Result<(), EngineError> {
        let s = &mut *self.state;
        let room = s
            .world
            .room_mut(&s.current)
            .ok_or_else(|| EngineError::MissingRoom(s.current.clone()))?;
        let Some(enemy) = room.enemy_mut(attacker) else {
            return Ok(());
        };
        if !enemy.is_alive() {
            return Ok(());
        }
        let roll = enemy_attack_roll(enemy.attack(), env.rng, env.config);
        let name = enemy.name().to_string();

        let taken = s.player.take_attack_damage(roll);
        report.say(format!("The {name} attacks you for {taken} damage!"));
        report.events.push(GameEvent::CombatHit {
            by_player: false,
            amount: taken,
        });
        if !s.player.is_alive() {
            s.mode = Mode::Exploring;
        }
        Ok(())
    }

    // ========================================================================
    // Turn bookkeeping
    // ========================================================================

    /// Flat chip damage from the current room's hazard, applied after each
    /// successful command taken while exploring.
    fn apply_hazard(&mut self, report: &mut TurnReport) -> Result<(), EngineError> {
        let s = &mut *self.state;
        let room = s
            .world
            .room(&s.current)
            .ok_or_else(|| EngineError::MissingRoom(s.current.clone()))?;
        let chip = room.hazard().chip_damage();
        if chip == 0 {
            return Ok(());
        }
        let taken = s.player.take_flat_damage(chip);
        report.say(format!(
            "The environment saps you for {taken} damage. ({}/{})",
            s.player.health(),
            s.player.max_health()
        ));
        Ok(())
    }

    fn check_endgame(&mut self, report: &mut TurnReport) {
        if self.state.run_state != RunState::Running {
            return;
        }
        if !self.state.player.is_alive() {
            self.state.run_state = RunState::Lost;
            report.say(String::new());
            report.say("*** GAME OVER ***");
            report.say("You have fallen. The realm's memories fade into darkness...");
            return;
        }
        if self.state.final_boss_defeated {
            self.state.run_state = RunState::Won;
            report.say(String::new());
            report.say("*** VICTORY ***");
            report.say(GameConfig::BOSS_VICTORY_MEMORY);
            report.say(format!(
                "Congratulations, {}! Your adventure is complete.",
                self.state.player.name()
            ));
        }
    }

    fn handle_confirm_quit(&mut self, line: &str, report: &mut TurnReport) {
        if matches!(line.to_lowercase().as_str(), "y" | "yes") {
            self.state.run_state = RunState::Quit;
            report.say("Thanks for playing! Farewell, adventurer.");
        } else {
            self.state.mode = Mode::Exploring;
            report.say("You steel yourself and press on.");
        }
    }

    // ========================================================================
    // Display helpers
    // ========================================================================

    fn show_combat_menu(report: &mut TurnReport) {
        report.say("What do you want to do?");
        report.say("1. Attack");
        report.say("2. Use item (use <item>)");
        report.say("3. Try to flee");
    }

    fn show_inventory(&self, report: &mut TurnReport) {
        let player = &self.state.player;
        report.say("=== Inventory ===");
        report.say(format!("Gold: {}", player.gold()));
        match player.equipped_weapon() {
            Some(weapon) => report.say(format!(
                "Equipped: {} (+{} attack)",
                weapon.name(),
                weapon.effect()
            )),
            None => report.say("Equipped: nothing"),
        }
        if player.inventory().is_empty() {
            report.say("Your pack is empty.");
        } else {
            for item in player.inventory() {
                report.say(format!("- {} ({})", item.name(), item.kind()));
            }
        }
    }

    fn show_memories(&self, report: &mut TurnReport) {
        let memories = self.state.player.memories();
        if memories.is_empty() {
            report.say("No memories recovered yet.");
            return;
        }
        report.say("=== Memory Journal ===");
        for memory in memories {
            report.say(format!("- {memory}"));
        }
    }

    fn show_status(&self, report: &mut TurnReport) {
        let player = &self.state.player;
        report.say(format!("=== {} ===", player.name()));
        report.say(format!(
            "Health: {}/{}",
            player.health(),
            player.max_health()
        ));
        report.say(format!("Attack: {}", player.effective_attack()));
        report.say(format!("Defense: {}", player.defense()));
        report.say(format!("Gold: {}", player.gold()));
        report.say(format!("Turns played: {}", self.state.turns_played));
    }

    fn show_help(report: &mut TurnReport) {
        report.say("Available commands:");
        report.say("  look (l)               - describe the current room");
        report.say("  move <dir> / go <dir>  - travel (or just: north, south, east, west)");
        report.say("  take <item>            - pick up an item");
        report.say("  use <item>             - drink a potion or try a key");
        report.say("  attack                 - fight the nearest enemy");
        report.say("  inventory (i)          - list what you carry");
        report.say("  memory                 - read your recovered memories");
        report.say("  status                 - show your stats");
        report.say("  save / load            - not available yet");
        report.say("  quit (q)               - leave the game");
    }

    fn current_room(&self) -> Result<&Room, EngineError> {
        self.state
            .world
            .room(&self.state.current)
            .ok_or_else(|| EngineError::MissingRoom(self.state.current.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{Biome, EntityId, Hazard, Item, LockedPassage, Player, World};

    fn wolf(id: u32) -> Enemy {
        Enemy::new(EntityId(id), "Wild Wolf", EnemyKind::Wolf, 30, 10, 1, 20)
    }

    fn fixture() -> GameState {
        let mut world = World::new();
        let mut village = Room::new("village", "Village", "A quiet square.", Biome::Village);
        village.add_item(
            Item::new("rusty sword", "An old blade", ItemKind::Weapon, 10, 5)
                .with_memory_echo("You remember your first day of sword training."),
        );
        village.add_item(Item::new(
            "health potion",
            "A red vial",
            ItemKind::Potion,
            25,
            20,
        ));
        world.insert_room(village);
        world.insert_room(Room::new(
            "dark_forest",
            "Dark Forest",
            "Twisted trees.",
            Biome::Forest,
        ));
        world.insert_room(Room::new(
            "old_mill",
            "Old Mill",
            "A ruined mill.",
            Biome::Village,
        ));
        world.connect("village", "dark_forest", "north", "south");
        world.connect("village", "old_mill", "east", "west");
        GameState::new(world, Player::new("Hero")).expect("fixture world is valid")
    }

    fn run(state: &mut GameState, rng: &mut ScriptedRng, line: &str) -> TurnReport {
        let config = GameConfig::default();
        let mut env = TurnEnv { rng, config: &config };
        GameEngine::new(state)
            .handle_line(line, &mut env)
            .expect("no integrity errors in fixture")
    }

    #[test]
    fn unknown_command_does_not_consume_turn() {
        let mut state = fixture();
        let mut rng = ScriptedRng::new(vec![]);
        let report = run(&mut state, &mut rng, "dance");
        assert!(!report.turn_consumed);
        assert_eq!(state.turns_played, 0);
        assert_eq!(
            report.messages,
            vec!["I don't understand that command. Type 'help' for available commands."]
        );
    }

    #[test]
    fn movement_is_rejected_while_enemies_live() {
        let mut state = fixture();
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.add_enemy(wolf(1));
        }
        let mut rng = ScriptedRng::new(vec![]);
        let report = run(&mut state, &mut rng, "north");
        assert_eq!(state.current.as_str(), "village");
        assert!(report.turn_consumed);
        assert!(
            report
                .messages
                .iter()
                .any(|m| m.contains("can't leave while enemies"))
        );
    }

    #[test]
    fn encounters_spawn_exactly_on_rolls_within_chance() {
        // Roll 60 (raw 59) is within the 60% chance; the follow-up draw
        // picks the enemy kind. The spawn announces itself but leaves the
        // player exploring.
        let mut state = fixture();
        let mut rng = ScriptedRng::new(vec![59, 0]);
        let report = run(&mut state, &mut rng, "north");
        assert!(matches!(state.mode, Mode::Exploring));
        assert!(report.messages.iter().any(|m| m.contains("leaps out")));
        assert_eq!(rng.remaining(), 0);
        assert!(
            state
                .world
                .room(&"dark_forest".into())
                .is_some_and(Room::has_alive_enemies)
        );

        // Roll 61 misses; no spawn, no extra draw.
        let mut state = fixture();
        let mut rng = ScriptedRng::new(vec![60]);
        run(&mut state, &mut rng, "north");
        assert!(matches!(state.mode, Mode::Exploring));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn spawned_encounter_blocks_exits_but_not_other_commands() {
        let mut state = fixture();
        if let Some(room) = state.world.room_mut(&"dark_forest".into()) {
            room.add_item(Item::new(
                "forest berries",
                "A sweet handful",
                ItemKind::Potion,
                5,
                5,
            ));
        }
        let mut rng = ScriptedRng::new(vec![59, 0]);
        run(&mut state, &mut rng, "north");
        assert!(matches!(state.mode, Mode::Exploring));

        // The exploration surface stays available after the spawn.
        let mut rng = ScriptedRng::new(vec![]);
        let report = run(&mut state, &mut rng, "take forest berries");
        assert!(report.turn_consumed);
        assert!(state.player.has_item("forest berries"));
        assert!(matches!(state.mode, Mode::Exploring));

        // Leaving is still gated until the enemy is dealt with.
        run(&mut state, &mut rng, "south");
        assert_eq!(state.current.as_str(), "dark_forest");
    }

    #[test]
    fn encounters_never_spawn_outside_forest_and_cave_biomes() {
        let mut state = fixture();
        // No draws scripted: moving east into a village-biome room must not
        // touch the RNG at all.
        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "east");
        assert_eq!(state.current.as_str(), "old_mill");
        assert!(matches!(state.mode, Mode::Exploring));
    }

    #[test]
    fn failed_flee_draws_exactly_one_retaliation() {
        let mut state = fixture();
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.add_enemy(wolf(1));
        }
        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "attack");
        assert!(matches!(state.mode, Mode::InCombat(_)));

        // Flee roll 71 fails (> 70), then one retaliation draw: wolf attack
        // 10 with jitter 2 and raw draw 2 rolls 10, minus defense 5 = 5.
        let mut rng = ScriptedRng::new(vec![70, 2]);
        let report = run(&mut state, &mut rng, "3");
        assert!(report.messages.iter().any(|m| m == "You couldn't escape!"));
        assert_eq!(state.player.health(), 95);
        assert_eq!(rng.remaining(), 0);
        assert!(matches!(state.mode, Mode::InCombat(_)));
    }

    #[test]
    fn successful_flee_ends_the_session_without_damage() {
        let mut state = fixture();
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.add_enemy(wolf(1));
        }
        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "attack");

        let mut rng = ScriptedRng::with_d100(&[70]);
        let report = run(&mut state, &mut rng, "flee");
        assert!(matches!(state.mode, Mode::Exploring));
        assert_eq!(state.player.health(), 100);
        assert!(
            report
                .messages
                .iter()
                .any(|m| m == "You successfully flee from combat!")
        );
    }

    #[test]
    fn combat_item_use_draws_no_retaliation() {
        let mut state = fixture();
        state.player.add_item(Item::new(
            "health potion",
            "A red vial",
            ItemKind::Potion,
            25,
            20,
        ));
        state.player.take_flat_damage(30);
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.add_enemy(wolf(1));
        }
        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "attack");

        // No scripted draws: a retaliation would panic the scripted rng.
        let mut rng = ScriptedRng::new(vec![]);
        let report = run(&mut state, &mut rng, "use health potion");
        assert_eq!(state.player.health(), 90);
        assert!(report.turn_consumed);
        assert!(matches!(state.mode, Mode::InCombat(_)));
    }

    #[test]
    fn invalid_combat_input_reprompts_without_consuming_the_round() {
        let mut state = fixture();
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.add_enemy(wolf(1));
        }
        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "attack");
        let turns = state.turns_played;

        let report = run(&mut state, &mut rng, "look");
        assert!(!report.turn_consumed);
        assert_eq!(state.turns_played, turns);
        assert!(matches!(state.mode, Mode::InCombat(_)));
        assert!(report.messages.iter().any(|m| m == "What do you want to do?"));
    }

    #[test]
    fn boss_defeat_sets_flag_records_memory_once_and_wins() {
        let mut state = fixture();
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.add_enemy(Enemy::new(
                EntityId(1),
                "Shadow Lord Malachar",
                EnemyKind::Boss,
                5,
                26,
                3,
                200,
            ));
        }
        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "attack");

        // Effective attack 10 vs defense 3 kills the 5-health boss outright;
        // no retaliation draw happens.
        let report = run(&mut state, &mut rng, "1");
        assert!(state.final_boss_defeated);
        assert_eq!(state.run_state, RunState::Won);
        assert_eq!(state.player.gold(), 50 + 200);
        let echoes = state
            .player
            .memories()
            .iter()
            .filter(|m| m.as_str() == GameConfig::BOSS_VICTORY_MEMORY)
            .count();
        assert_eq!(echoes, 1);
        assert!(report.messages.iter().any(|m| m == "*** VICTORY ***"));
        assert!(
            state
                .world
                .room(&"village".into())
                .is_some_and(|room| room.enemies().is_empty())
        );
    }

    #[test]
    fn taking_a_weapon_auto_equips_and_dedups_the_memory_echo() {
        let mut state = fixture();
        let mut rng = ScriptedRng::new(vec![]);
        let report = run(&mut state, &mut rng, "take rusty sword");
        assert!(
            report
                .messages
                .iter()
                .any(|m| m == "*** MEMORY RECOVERED ***")
        );
        assert_eq!(state.player.effective_attack(), 15);
        assert_eq!(state.player.memories().len(), 1);

        // A second identical sword re-equips but records nothing new.
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.add_item(
                Item::new("rusty sword", "An old blade", ItemKind::Weapon, 10, 5)
                    .with_memory_echo("You remember your first day of sword training."),
            );
        }
        let report = run(&mut state, &mut rng, "take rusty sword");
        assert!(
            !report
                .messages
                .iter()
                .any(|m| m == "*** MEMORY RECOVERED ***")
        );
        assert_eq!(state.player.memories().len(), 1);
    }

    #[test]
    fn using_a_carried_weapon_is_rejected() {
        let mut state = fixture();
        state
            .player
            .add_item(Item::new("rusty sword", "An old blade", ItemKind::Weapon, 10, 5));
        let mut rng = ScriptedRng::new(vec![]);

        let report = run(&mut state, &mut rng, "use rusty sword");
        assert!(
            report
                .messages
                .iter()
                .any(|m| m == "You can't use that right now.")
        );
        assert!(report.turn_consumed);
        assert!(state.player.equipped_weapon().is_none());
        assert!(state.player.has_item("rusty sword"));
    }

    #[test]
    fn hazard_chips_after_successful_commands_only() {
        let mut state = fixture();
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.set_hazard(Hazard::Poison);
        }
        let mut rng = ScriptedRng::new(vec![]);

        run(&mut state, &mut rng, "look");
        assert_eq!(state.player.health(), 98);

        // A recognized but failed command (no exit west) does not chip.
        run(&mut state, &mut rng, "west");
        assert_eq!(state.player.health(), 98);

        // Unknown input neither chips nor advances the turn counter.
        run(&mut state, &mut rng, "dance");
        assert_eq!(state.player.health(), 98);
    }

    #[test]
    fn quit_requires_confirmation() {
        let mut state = fixture();
        let mut rng = ScriptedRng::new(vec![]);

        run(&mut state, &mut rng, "quit");
        assert!(matches!(state.mode, Mode::ConfirmQuit));
        run(&mut state, &mut rng, "n");
        assert!(matches!(state.mode, Mode::Exploring));
        assert_eq!(state.run_state, RunState::Running);

        run(&mut state, &mut rng, "quit");
        run(&mut state, &mut rng, "y");
        assert_eq!(state.run_state, RunState::Quit);
    }

    #[test]
    fn key_opens_exactly_one_new_exit_once() {
        let mut state = fixture();
        state.world.insert_room(Room::new(
            "hidden_chamber",
            "Hidden Chamber",
            "A sealed vault.",
            Biome::Castle,
        ));
        if let Some(room) = state.world.room_mut(&"old_mill".into()) {
            room.set_locked_passage(LockedPassage {
                key_name: "ancient key".to_string(),
                direction: "north".to_string(),
                to: "hidden_chamber".into(),
                reveal_text: "The lock clicks open.".to_string(),
            });
        }
        state
            .player
            .add_item(Item::new("ancient key", "A bronze key", ItemKind::Key, 50, 0));

        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "east");
        let before: Vec<String> = state
            .world
            .room(&"old_mill".into())
            .map(|room| room.exit_directions().map(str::to_string).collect())
            .unwrap_or_default();

        let report = run(&mut state, &mut rng, "use ancient key");
        assert!(report.messages.iter().any(|m| m == "The lock clicks open."));
        let room = state.world.room(&"old_mill".into()).expect("room exists");
        assert_eq!(room.exit("north"), Some(&"hidden_chamber".into()));
        assert_eq!(room.exits().len(), before.len() + 1);
        assert!(room.locked_passage().is_none());

        // Re-using the key does nothing further.
        let report = run(&mut state, &mut rng, "use ancient key");
        assert!(report.messages.iter().any(|m| m == "Nothing happens."));
    }

    #[test]
    fn player_death_from_retaliation_loses_the_game() {
        let mut state = fixture();
        state.player.take_flat_damage(96);
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.add_enemy(wolf(1));
        }
        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "attack");

        // Wolf survives the hit (30 - 9 = 21) and rolls 10, dealing 5
        // against 4 remaining health.
        let mut rng = ScriptedRng::new(vec![2]);
        let report = run(&mut state, &mut rng, "1");
        assert_eq!(state.run_state, RunState::Lost);
        assert!(report.messages.iter().any(|m| m == "*** GAME OVER ***"));
    }

    #[test]
    fn hazard_spares_a_fallen_player() {
        let mut state = fixture();
        state.player.take_flat_damage(96);
        if let Some(room) = state.world.room_mut(&"village".into()) {
            room.set_hazard(Hazard::Poison);
            room.add_enemy(wolf(1));
        }
        let mut rng = ScriptedRng::new(vec![]);
        run(&mut state, &mut rng, "attack");

        // The fatal retaliation ends the run; no hazard chip follows it.
        let mut rng = ScriptedRng::new(vec![2]);
        let report = run(&mut state, &mut rng, "1");
        assert_eq!(state.run_state, RunState::Lost);
        assert_eq!(state.player.health(), 0);
        assert!(
            !report
                .messages
                .iter()
                .any(|m| m.contains("environment saps"))
        );
        assert!(report.messages.iter().any(|m| m == "*** GAME OVER ***"));
    }

    #[test]
    fn eof_is_an_implicit_quit() {
        let mut state = fixture();
        let report = GameEngine::new(&mut state).notify_eof();
        assert_eq!(state.run_state, RunState::Quit);
        assert!(!report.messages.is_empty());
    }
}
