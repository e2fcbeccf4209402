//! Client configuration from environment variables.
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Which front end drives the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrontendMode {
    /// Blocking line-oriented loop on stdin.
    #[default]
    Text,
    /// Fixed-rate key poll in raw terminal mode.
    Realtime,
}

/// Client-side configuration. Game rules are configured separately through
/// `realm_core::GameConfig`.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub mode: FrontendMode,
    pub seed: Option<u64>,
    pub player_name: Option<String>,
    pub telemetry: bool,
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// - `REALM_MODE` - `text` (default) or `realtime`
    /// - `REALM_SEED` - RNG seed for a reproducible run (default: wall clock)
    /// - `REALM_NAME` - player name, skipping the startup prompt
    /// - `REALM_TELEMETRY` - `0` disables the telemetry event sink
    pub fn from_env() -> Self {
        let mode = match env::var("REALM_MODE").as_deref() {
            Ok("realtime") => FrontendMode::Realtime,
            _ => FrontendMode::Text,
        };
        Self {
            mode,
            seed: read_env::<u64>("REALM_SEED"),
            player_name: env::var("REALM_NAME").ok(),
            telemetry: read_env::<u8>("REALM_TELEMETRY") != Some(0),
        }
    }

    /// The effective RNG seed: explicit, or derived from the wall clock.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or_default()
        })
    }
}

/// Trim, cap and default a player name.
pub fn sanitize_name(raw: &str) -> String {
    let name: String = raw.trim().chars().take(50).collect();
    if name.is_empty() {
        "Hero".to_string()
    } else {
        name
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_capped_and_defaulted() {
        assert_eq!(sanitize_name("  Aria  "), "Aria");
        assert_eq!(sanitize_name("   "), "Hero");
        assert_eq!(sanitize_name(""), "Hero");
        assert_eq!(sanitize_name(&"x".repeat(80)).len(), 50);
    }
}
