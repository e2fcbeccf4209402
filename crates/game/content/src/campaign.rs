//! The fixed campaign world: rooms, connections, items and enemies.
//!
//! Room ids are stable snake_case keys; item names are lowercase so the
//! case-folded command surface can address them directly. Three items carry
//! memory echoes that feed the player's journal on pickup.

use realm_core::state::{
    Biome, Enemy, EnemyKind, GameState, Hazard, Item, ItemKind, LockedPassage, Player, Room, World,
    WorldError,
};

/// Build the full world graph and population.
///
/// Deterministic: two calls produce identical worlds. Enemy ids are
/// allocated from the world's counter in a fixed order.
pub fn build_world() -> World {
    let mut world = World::new();
    add_rooms(&mut world);
    connect_rooms(&mut world);
    populate_items(&mut world);
    populate_enemies(&mut world);
    add_secrets(&mut world);
    world
}

/// A fresh player with the fixed starting stats.
pub fn starting_player(name: impl Into<String>) -> Player {
    Player::new(name)
}

/// Convenience: a validated game state at the village entry room.
pub fn new_game(name: impl Into<String>) -> Result<GameState, WorldError> {
    GameState::new(build_world(), starting_player(name))
}

fn add_rooms(world: &mut World) {
    // ======== Village area (starting zone) ========
    world.insert_room(Room::new(
        "village",
        "Peaceful Village",
        "You stand in the heart of a small village. Wooden houses with thatched \
         roofs surround a central well. Villagers go about their daily routines. \
         To the north lies the dark forest, east leads to a stone bridge over a \
         river, and south stretches the dusty desert road.",
        Biome::Village,
    ));
    world.insert_room(Room::new(
        "village_market",
        "Village Market",
        "A bustling marketplace filled with colorful stalls. Merchants sell their \
         wares and the smell of fresh bread fills the air. You can see the \
         village square to the west.",
        Biome::Village,
    ));

    // ======== Forest area ========
    world.insert_room(Room::new(
        "dark_forest",
        "Dark Forest",
        "Ancient trees tower above you, their branches forming a dense canopy \
         that blocks most sunlight. Strange sounds echo in the distance. A path \
         leads deeper north, while south returns to the village. East leads to a \
         clearing.",
        Biome::Forest,
    ));
    world.insert_room(Room::new(
        "forest_clearing",
        "Forest Clearing",
        "A peaceful clearing bathed in dappled sunlight. Wildflowers grow in \
         abundance. To the west is the dark forest path, north leads to ancient \
         ruins.",
        Biome::Forest,
    ));
    world.insert_room(Room::new(
        "ancient_ruins",
        "Ancient Ruins",
        "Crumbling stone structures covered in moss and vines. Ancient runes are \
         carved into weathered stones. A sense of old magic lingers here. South \
         returns to the clearing, east leads to a cave entrance.",
        Biome::Forest,
    ));

    // ======== Cave system ========
    world.insert_room(Room::new(
        "cave_entrance",
        "Cave Entrance",
        "A dark opening in the mountainside. Cool, damp air flows from within. \
         Water drips echoing in the darkness. West returns to the ruins, deeper \
         into the cave lies north.",
        Biome::Cave,
    ));
    let mut cave_depths = Room::new(
        "cave_depths",
        "Deep Cavern",
        "The cave opens into a vast underground chamber. Stalactites hang from \
         the ceiling and an underground stream flows through. Strange crystals \
         glow faintly. South leads back to the entrance, north continues deeper.",
        Biome::Cave,
    );
    cave_depths.set_hazard(Hazard::Cold);
    world.insert_room(cave_depths);
    world.insert_room(Room::new(
        "crystal_chamber",
        "Crystal Chamber",
        "A magnificent chamber filled with glowing crystals of all colors. Their \
         light creates dancing shadows on the walls. This appears to be a place \
         of great power. South returns to the main cavern, west leads to an \
         underground lake.",
        Biome::Cave,
    ));

    // ======== Bridge & river ========
    world.insert_room(Room::new(
        "stone_bridge",
        "Ancient Stone Bridge",
        "An old but sturdy stone bridge spans a wide river. The water rushes \
         below. You can see fish swimming in the clear water. West leads back to \
         the village, east continues to the castle approach.",
        Biome::Village,
    ));

    // ======== Castle area ========
    world.insert_room(Room::new(
        "castle_approach",
        "Castle Approach",
        "A foreboding castle looms ahead, its dark towers reaching into the \
         clouds. The stone walls are covered in creeping vines. West returns to \
         the bridge, north leads to the castle gate.",
        Biome::Castle,
    ));
    world.insert_room(Room::new(
        "castle_gate",
        "Castle Gate",
        "Massive iron gates stand before you, partially rusted but still \
         imposing. Gargoyles glare down from above. South leads back to the \
         approach, north enters the castle courtyard.",
        Biome::Castle,
    ));
    world.insert_room(Room::new(
        "castle_courtyard",
        "Castle Courtyard",
        "An overgrown courtyard filled with broken statues and dead fountains. \
         The main keep looms to the north. South returns to the gate, east leads \
         to the throne room.",
        Biome::Castle,
    ));
    world.insert_room(Room::new(
        "throne_room",
        "Dark Throne Room",
        "A grand chamber with high vaulted ceilings. An ornate throne sits on a \
         raised platform. Tattered banners hang from the walls. This is where \
         the Shadow Lord makes his stand. West returns to the courtyard.",
        Biome::Castle,
    ));

    // ======== Desert area ========
    let mut desert_road = Room::new(
        "desert_road",
        "Desert Road",
        "Hot sand stretches in all directions under a blazing sun. A worn path \
         leads through the dunes. North returns to the village, east leads to an \
         oasis.",
        Biome::Desert,
    );
    desert_road.set_hazard(Hazard::Hot);
    world.insert_room(desert_road);
    world.insert_room(Room::new(
        "desert_oasis",
        "Desert Oasis",
        "A welcome sight - palm trees surround a clear pool of water. The air is \
         cooler here. West returns to the desert road, north leads toward the \
         mountains.",
        Biome::Desert,
    ));

    // ======== Mountain area ========
    world.insert_room(Room::new(
        "mountain_path",
        "Mountain Path",
        "A narrow path winds up the mountainside. The air grows thin. \
         Spectacular views stretch in all directions. Down leads to the desert \
         oasis, up continues to the peak.",
        Biome::Mountain,
    ));
    let mut mountain_peak = Room::new(
        "mountain_peak",
        "Mountain Peak",
        "The highest point for miles. Clouds drift below you. An ancient \
         monastery sits here, abandoned long ago. Down returns to the path.",
        Biome::Mountain,
    );
    mountain_peak.set_hazard(Hazard::Cold);
    world.insert_room(mountain_peak);

    // ======== Underwater area ========
    world.insert_room(Room::new(
        "underwater_grotto",
        "Underwater Grotto",
        "You've found a magical air pocket in an underwater cave. Bioluminescent \
         plants provide eerie blue light. Ancient treasure might be hidden here. \
         East returns to the crystal chamber through a submerged passage.",
        Biome::Underwater,
    ));

    // ======== Hidden chamber (key-gated) ========
    let mut hidden_chamber = Room::new(
        "hidden_chamber",
        "Hidden Chamber",
        "A secret chamber revealed by the ancient key. Mystical energy fills the \
         air, and a portal of swirling darkness dominates the center.",
        Biome::Castle,
    );
    hidden_chamber.set_hazard(Hazard::Cursed);
    world.insert_room(hidden_chamber);
}

fn connect_rooms(world: &mut World) {
    world.connect("village", "village_market", "east", "west");
    world.connect("village", "dark_forest", "north", "south");
    world.connect("village", "desert_road", "south", "north");
    // The bridge hangs off the market so the village keeps one exit per
    // direction.
    world.connect("village_market", "stone_bridge", "east", "west");

    world.connect("dark_forest", "forest_clearing", "east", "west");
    world.connect("forest_clearing", "ancient_ruins", "north", "south");
    world.connect("ancient_ruins", "cave_entrance", "east", "west");

    world.connect("cave_entrance", "cave_depths", "north", "south");
    world.connect("cave_depths", "crystal_chamber", "north", "south");
    world.connect("crystal_chamber", "underwater_grotto", "west", "east");

    world.connect("stone_bridge", "castle_approach", "east", "west");
    world.connect("castle_approach", "castle_gate", "north", "south");
    world.connect("castle_gate", "castle_courtyard", "north", "south");
    world.connect("castle_courtyard", "throne_room", "east", "west");

    world.connect("desert_road", "desert_oasis", "east", "west");
    world.connect("desert_oasis", "mountain_path", "north", "south");
    world.connect("mountain_path", "mountain_peak", "up", "down");
}

/// The key-gated passage out of the ancient ruins, plus the room items.
fn populate_items(world: &mut World) {
    let placements: &[(&str, Item)] = &[
        (
            "village",
            Item::new(
                "rusty sword",
                "An old but serviceable blade",
                ItemKind::Weapon,
                10,
                5,
            )
            .with_memory_echo(
                "You remember wielding this blade in battle against the Shadow Forces...",
            ),
        ),
        (
            "village",
            Item::new(
                "health potion",
                "A small vial of red liquid",
                ItemKind::Potion,
                25,
                20,
            ),
        ),
        (
            "village",
            Item::new(
                "quest journal",
                "Tracks your adventure",
                ItemKind::QuestItem,
                0,
                0,
            ),
        ),
        (
            "village_market",
            Item::new("steel sword", "A sharp blade", ItemKind::Weapon, 35, 8),
        ),
        (
            "village_market",
            Item::new(
                "traveler's cloak",
                "Provides warmth",
                ItemKind::Treasure,
                15,
                0,
            ),
        ),
        (
            "dark_forest",
            Item::new(
                "forest berries",
                "Restores a little health",
                ItemKind::Potion,
                20,
                15,
            ),
        ),
        (
            "forest_clearing",
            Item::new(
                "mana potion",
                "A swirling blue draught",
                ItemKind::Potion,
                40,
                25,
            ),
        ),
        (
            "ancient_ruins",
            Item::new(
                "ancient key",
                "An ornate key humming with power",
                ItemKind::Key,
                0,
                0,
            )
            .with_memory_echo("This key once opened the doors to your forgotten castle..."),
        ),
        (
            "ancient_ruins",
            Item::new(
                "rune tablet",
                "Contains ancient knowledge",
                ItemKind::QuestItem,
                0,
                0,
            ),
        ),
        (
            "cave_depths",
            Item::new(
                "crystal shard",
                "A glowing fragment of pure energy",
                ItemKind::QuestItem,
                100,
                0,
            )
            .with_memory_echo(
                "The crystal resonates with power - a fragment of the Realm's heart...",
            ),
        ),
        (
            "crystal_chamber",
            Item::new(
                "crystal staff",
                "Powerful magical weapon",
                ItemKind::Weapon,
                60,
                12,
            ),
        ),
        (
            "stone_bridge",
            Item::new("bridge toll token", "Allows passage", ItemKind::Key, 0, 0),
        ),
        (
            "castle_courtyard",
            Item::new(
                "grand health potion",
                "Fully restores health",
                ItemKind::Potion,
                100,
                100,
            ),
        ),
        (
            "throne_room",
            Item::new(
                "crown of power",
                "The Shadow Lord's crown",
                ItemKind::QuestItem,
                0,
                0,
            ),
        ),
        (
            "desert_oasis",
            Item::new(
                "desert rose",
                "Rare healing plant",
                ItemKind::Potion,
                75,
                50,
            ),
        ),
        (
            "mountain_peak",
            Item::new(
                "wisdom scroll",
                "Teaches ancient techniques",
                ItemKind::QuestItem,
                0,
                0,
            ),
        ),
        (
            "mountain_peak",
            Item::new("monk's staff", "Balanced weapon", ItemKind::Weapon, 45, 10),
        ),
        (
            "underwater_grotto",
            Item::new(
                "trident of the depths",
                "Legendary weapon",
                ItemKind::Weapon,
                70,
                15,
            ),
        ),
        (
            "underwater_grotto",
            Item::new(
                "pearl of power",
                "Mystical artifact",
                ItemKind::QuestItem,
                0,
                0,
            ),
        ),
        (
            "hidden_chamber",
            Item::new(
                "legendary blade",
                "The weapon of a forgotten hero",
                ItemKind::Weapon,
                200,
                15,
            ),
        ),
    ];

    for (room_id, item) in placements {
        if let Some(room) = world.room_mut(&(*room_id).into()) {
            room.add_item(item.clone());
        }
    }

    if let Some(ruins) = world.room_mut(&"ancient_ruins".into()) {
        ruins.set_locked_passage(LockedPassage {
            key_name: "ancient key".to_string(),
            direction: "north".to_string(),
            to: "hidden_chamber".into(),
            reveal_text: "You unlock the hidden chamber! A passage opens to the north.".to_string(),
        });
    }
    if let Some(chamber) = world.room_mut(&"hidden_chamber".into()) {
        chamber.add_exit("south", "ancient_ruins");
    }
}

fn populate_enemies(world: &mut World) {
    let placements: &[(&str, &str, EnemyKind, i32, i32, i32, i32)] = &[
        ("dark_forest", "Forest Wolf", EnemyKind::Wolf, 40, 12, 5, 25),
        (
            "forest_clearing",
            "Giant Spider",
            EnemyKind::Goblin,
            50,
            14,
            6,
            30,
        ),
        (
            "ancient_ruins",
            "Stone Guardian",
            EnemyKind::Skeleton,
            80,
            16,
            10,
            50,
        ),
        ("cave_entrance", "Cave Bat", EnemyKind::Ghost, 25, 8, 2, 15),
        ("cave_depths", "Cave Troll", EnemyKind::Goblin, 100, 20, 10, 60),
        (
            "crystal_chamber",
            "Crystal Elemental",
            EnemyKind::Ghost,
            90,
            22,
            8,
            70,
        ),
        (
            "castle_gate",
            "Dark Knight",
            EnemyKind::Skeleton,
            120,
            24,
            10,
            80,
        ),
        (
            "castle_courtyard",
            "Shadow Beast",
            EnemyKind::Wolf,
            110,
            22,
            9,
            75,
        ),
        (
            "throne_room",
            "Shadow Lord Malachar",
            EnemyKind::Boss,
            200,
            26,
            10,
            200,
        ),
        (
            "desert_road",
            "Desert Scorpion",
            EnemyKind::Goblin,
            45,
            14,
            6,
            30,
        ),
        (
            "desert_oasis",
            "Sand Elemental",
            EnemyKind::Ghost,
            70,
            18,
            8,
            50,
        ),
        (
            "mountain_path",
            "Mountain Goat",
            EnemyKind::Wolf,
            35,
            10,
            4,
            20,
        ),
        (
            "mountain_peak",
            "Ancient Monk Spirit",
            EnemyKind::Ghost,
            95,
            20,
            8,
            70,
        ),
        (
            "underwater_grotto",
            "Sea Serpent",
            EnemyKind::Wolf,
            130,
            25,
            10,
            100,
        ),
    ];

    for (room_id, name, kind, health, attack, defense, gold) in placements {
        let id = world.alloc_entity_id();
        if let Some(room) = world.room_mut(&(*room_id).into()) {
            room.add_enemy(Enemy::new(id, *name, *kind, *health, *attack, *defense, *gold));
        }
    }
}

fn add_secrets(world: &mut World) {
    if let Some(ruins) = world.room_mut(&"ancient_ruins".into()) {
        ruins.add_item(Item::new(
            "hidden gold",
            "A secret stash",
            ItemKind::Treasure,
            50,
            0,
        ));
    }
    if let Some(chamber) = world.room_mut(&"crystal_chamber".into()) {
        chamber.add_item(Item::new(
            "prismatic crystal",
            "Extremely rare",
            ItemKind::Treasure,
            120,
            0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_has_nineteen_rooms_and_validates() {
        let world = build_world();
        assert_eq!(world.len(), 19);
        assert!(world.validate().is_ok());
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(build_world(), build_world());
    }

    #[test]
    fn exactly_one_boss_exists_in_the_throne_room() {
        let world = build_world();
        let bosses: Vec<&Enemy> = world
            .rooms()
            .flat_map(|room| room.enemies())
            .filter(|enemy| enemy.kind() == EnemyKind::Boss)
            .collect();
        assert_eq!(bosses.len(), 1);
        assert_eq!(bosses[0].name(), "Shadow Lord Malachar");
        assert!(
            world
                .room(&"throne_room".into())
                .is_some_and(|room| room.has_alive_enemies())
        );
    }

    #[test]
    fn memory_echo_items_are_present() {
        let world = build_world();
        for (room_id, item_name) in [
            ("village", "rusty sword"),
            ("ancient_ruins", "ancient key"),
            ("cave_depths", "crystal shard"),
        ] {
            let room = world.room(&room_id.into()).expect("room exists");
            let item = room
                .items()
                .iter()
                .find(|item| item.matches_name(item_name))
                .expect("item present");
            assert!(item.memory_echo().is_some(), "{item_name} carries an echo");
        }
    }

    #[test]
    fn item_names_are_lowercase() {
        let world = build_world();
        for room in world.rooms() {
            for item in room.items() {
                assert_eq!(
                    item.name(),
                    item.name().to_lowercase(),
                    "item addressable by case-folded input"
                );
            }
        }
    }
}
