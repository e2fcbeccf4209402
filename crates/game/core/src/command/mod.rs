//! Text command parsing.
//!
//! Parsing is pure and independent of game state: the same line always
//! yields the same [`Command`] or [`ParseError`]. Mode-dependent
//! interpretation (exploration vs. combat vs. confirmation prompts) happens
//! in the engine, which re-reads the raw line through [`CombatChoice`] when
//! a combat session is active.

/// A recognized exploration command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Look,
    Move(String),
    Take(String),
    Use(String),
    Attack,
    Inventory,
    Memory,
    Status,
    Save,
    Load,
    Help,
    Quit,
}

/// Why a line failed to parse. Each variant carries the exact hint text the
/// front ends print.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Move where? (north, south, east, west)")]
    MissingDirection,
    #[error("Take what?")]
    MissingTakeTarget,
    #[error("Use what?")]
    MissingUseTarget,
    #[error("I don't understand that command. Type 'help' for available commands.")]
    Unknown,
}

impl Command {
    /// Parse one input line.
    ///
    /// Tokenization is whitespace-based and case-insensitive on the verb;
    /// multi-word arguments ("take rusty sword") are rejoined with single
    /// spaces. Bare direction words are shorthand for `move`.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or(ParseError::Unknown)?.to_lowercase();
        let rest = || {
            let arg = tokens.clone().collect::<Vec<_>>().join(" ");
            (!arg.is_empty()).then(|| arg.to_lowercase())
        };

        match verb.as_str() {
            "look" | "l" => Ok(Command::Look),
            "move" | "go" | "m" => rest()
                .map(Command::Move)
                .ok_or(ParseError::MissingDirection),
            "north" | "n" => Ok(Command::Move("north".to_string())),
            "south" | "s" => Ok(Command::Move("south".to_string())),
            "east" | "e" => Ok(Command::Move("east".to_string())),
            "west" | "w" => Ok(Command::Move("west".to_string())),
            "take" | "get" | "pick" => rest()
                .map(Command::Take)
                .ok_or(ParseError::MissingTakeTarget),
            "use" | "u" => rest().map(Command::Use).ok_or(ParseError::MissingUseTarget),
            "attack" | "fight" => Ok(Command::Attack),
            "inventory" | "inv" | "i" => Ok(Command::Inventory),
            "memory" | "memories" | "journal" => Ok(Command::Memory),
            "status" | "stats" => Ok(Command::Status),
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(ParseError::Unknown),
        }
    }
}

/// A player choice inside an active combat session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatChoice {
    Attack,
    UseItem(String),
    Flee,
}

impl CombatChoice {
    /// Parse a combat-menu line. Accepts the menu numbers as well as the
    /// spelled-out verbs; anything else is `None` and re-prompts.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next()?.to_lowercase();
        let arg = tokens.collect::<Vec<_>>().join(" ").to_lowercase();

        match verb.as_str() {
            "1" | "attack" | "a" | "fight" => Some(CombatChoice::Attack),
            "2" | "use" | "u" => (!arg.is_empty()).then_some(CombatChoice::UseItem(arg)),
            "3" | "flee" | "run" | "f" => Some(CombatChoice::Flee),
            _ => None,
        }
    }
}
