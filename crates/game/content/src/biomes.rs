//! Cosmetic biome themes for rendering/audio front ends.
//!
//! The core never branches on any of this; front ends look a theme up by
//! the room's biome and pass it straight to whatever presentation layer is
//! attached.

use realm_core::state::Biome;

/// Environmental presentation parameters for one biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeTheme {
    pub sky_color: [f32; 3],
    pub ambient_light: [f32; 3],
    pub fog_color: [f32; 3],
    pub fog_density: f32,
    pub music_track: &'static str,
    pub ambient_sounds: &'static [&'static str],
}

/// Fixed theme table, keyed by biome.
pub fn theme(biome: Biome) -> BiomeTheme {
    match biome {
        Biome::Village => BiomeTheme {
            sky_color: [0.53, 0.81, 0.98],
            ambient_light: [0.8, 0.8, 0.7],
            fog_color: [0.7, 0.7, 0.8],
            fog_density: 0.01,
            music_track: "village_theme.wav",
            ambient_sounds: &["birds.wav", "wind.wav", "villagers.wav"],
        },
        Biome::Forest => BiomeTheme {
            sky_color: [0.4, 0.6, 0.4],
            ambient_light: [0.5, 0.7, 0.5],
            fog_color: [0.3, 0.5, 0.3],
            fog_density: 0.03,
            music_track: "forest_theme.wav",
            ambient_sounds: &["forest_ambient.wav", "leaves.wav", "owl.wav"],
        },
        Biome::Cave => BiomeTheme {
            sky_color: [0.1, 0.1, 0.15],
            ambient_light: [0.2, 0.2, 0.3],
            fog_color: [0.1, 0.1, 0.1],
            fog_density: 0.05,
            music_track: "cave_theme.wav",
            ambient_sounds: &["dripping_water.wav", "cave_echo.wav", "bats.wav"],
        },
        Biome::Castle => BiomeTheme {
            sky_color: [0.3, 0.3, 0.4],
            ambient_light: [0.6, 0.5, 0.5],
            fog_color: [0.4, 0.3, 0.3],
            fog_density: 0.02,
            music_track: "castle_theme.wav",
            ambient_sounds: &["footsteps_stone.wav", "torch.wav", "wind_howl.wav"],
        },
        Biome::Desert => BiomeTheme {
            sky_color: [0.95, 0.85, 0.6],
            ambient_light: [1.0, 0.9, 0.7],
            fog_color: [0.9, 0.8, 0.6],
            fog_density: 0.015,
            music_track: "desert_theme.wav",
            ambient_sounds: &["desert_wind.wav", "sandstorm.wav"],
        },
        Biome::Mountain => BiomeTheme {
            sky_color: [0.6, 0.7, 0.9],
            ambient_light: [0.7, 0.7, 0.8],
            fog_color: [0.8, 0.8, 0.9],
            fog_density: 0.04,
            music_track: "mountain_theme.wav",
            ambient_sounds: &["mountain_wind.wav", "eagle.wav"],
        },
        Biome::Underwater => BiomeTheme {
            sky_color: [0.0, 0.3, 0.5],
            ambient_light: [0.3, 0.4, 0.6],
            fog_color: [0.0, 0.2, 0.4],
            fog_density: 0.08,
            music_track: "underwater_theme.wav",
            ambient_sounds: &["bubbles.wav", "underwater_ambient.wav"],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_biome_has_a_music_track_and_sounds() {
        for biome in [
            Biome::Village,
            Biome::Forest,
            Biome::Cave,
            Biome::Castle,
            Biome::Desert,
            Biome::Mountain,
            Biome::Underwater,
        ] {
            let theme = theme(biome);
            assert!(theme.music_track.ends_with(".wav"));
            assert!(!theme.ambient_sounds.is_empty());
            assert!(theme.fog_density > 0.0);
        }
    }
}
