//! Tunable constants for geometry, timing, and generation policy.
//!
//! Every section carries `#[serde(default)]`, so a TOML file only needs the
//! keys it overrides. `Config::default()` is the shipped tuning.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geometry: GeometryConfig,
    pub timing: TimingConfig,
    pub generation: GenerationConfig,
    pub difficulty: Difficulty,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub room_size: f32,
    pub door_width: f32,
    pub body_radius: f32,
    /// Distance from the entry wall at which an arriving avatar is placed.
    pub entrance_inset: f32,
    /// Distance from the wall an illegal crossing is pushed back to.
    pub push_back_margin: f32,
    pub max_step_per_tick: f32,
    pub pickup_radius: f32,
    pub item_ring_radius: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            room_size: 8.0,
            door_width: 1.5,
            body_radius: 0.4,
            entrance_inset: 1.5,
            push_back_margin: 1.0,
            max_step_per_tick: 2.0,
            pickup_radius: 1.5,
            item_ring_radius: 2.0,
        }
    }
}

impl GeometryConfig {
    pub fn half_size(&self) -> f32 {
        self.room_size / 2.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub transition_cooldown_ticks: u32,
    pub hazard_spawn_delay_ticks: u32,
    pub npc_spawn_delay_ticks: u32,
    pub dialogue_delay_ticks: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            transition_cooldown_ticks: 30,
            hazard_spawn_delay_ticks: 6,
            npc_spawn_delay_ticks: 6,
            dialogue_delay_ticks: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub door_probability: f64,
    /// Consecutive ordinary rooms after which a non-ordinary room is forced.
    pub ordinary_run_limit: u32,
    /// Rooms at the start of a level that are always ordinary.
    pub early_ordinary_rooms: u32,
    pub loop_room_probability: f64,
    pub category_weights: CategoryWeights,
    pub relief_weights: ReliefWeights,
    pub milestones: Milestones,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            door_probability: 0.5,
            ordinary_run_limit: 2,
            early_ordinary_rooms: 3,
            loop_room_probability: 0.15,
            category_weights: CategoryWeights::default(),
            relief_weights: ReliefWeights::default(),
            milestones: Milestones::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub ordinary: f64,
    pub hazardous: f64,
    pub hub: f64,
    pub secret: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self { ordinary: 0.70, hazardous: 0.20, hub: 0.05, secret: 0.05 }
    }
}

impl CategoryWeights {
    fn total(&self) -> f64 {
        self.ordinary + self.hazardous + self.hub + self.secret
    }
}

/// Draw used when a run of ordinary rooms has to be broken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefWeights {
    pub hazardous: f64,
    pub hub: f64,
    pub secret: f64,
}

impl Default for ReliefWeights {
    fn default() -> Self {
        Self { hazardous: 0.6, hub: 0.3, secret: 0.1 }
    }
}

impl ReliefWeights {
    fn total(&self) -> f64 {
        self.hazardous + self.hub + self.secret
    }
}

/// Ramp for a once-per-level room: eligible from `min_rooms`, chance grows
/// by `ramp_per_room` for each room past the threshold, capped at `max_chance`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRule {
    pub min_rooms: u32,
    pub base_chance: f64,
    pub ramp_per_room: f64,
    pub max_chance: f64,
}

impl MilestoneRule {
    pub fn chance(&self, rooms_generated: u32) -> Option<f64> {
        if rooms_generated < self.min_rooms {
            return None;
        }
        let past = f64::from(rooms_generated - self.min_rooms);
        Some((past * self.ramp_per_room + self.base_chance).min(self.max_chance))
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        for value in [self.base_chance, self.ramp_per_room, self.max_chance] {
            ensure_probability(field, value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestones {
    pub lobby_portal: MilestoneRule,
    pub lobby_exit: MilestoneRule,
    pub grid_portal: MilestoneRule,
}

impl Default for Milestones {
    fn default() -> Self {
        Self {
            lobby_portal: MilestoneRule {
                min_rooms: 6,
                base_chance: 0.10,
                ramp_per_room: 0.04,
                max_chance: 0.25,
            },
            lobby_exit: MilestoneRule {
                min_rooms: 10,
                base_chance: 0.10,
                ramp_per_room: 0.05,
                max_chance: 0.30,
            },
            grid_portal: MilestoneRule {
                min_rooms: 5,
                base_chance: 0.15,
                ramp_per_room: 0.08,
                max_chance: 0.40,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn hazard_spawn_factor(self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let geometry = &self.geometry;
        for (field, value) in [
            ("geometry.room_size", geometry.room_size),
            ("geometry.door_width", geometry.door_width),
            ("geometry.body_radius", geometry.body_radius),
            ("geometry.max_step_per_tick", geometry.max_step_per_tick),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid { field, reason: format!("{value} must be > 0") });
            }
        }
        if geometry.door_width >= geometry.room_size - 2.0 * geometry.body_radius {
            return Err(ConfigError::Invalid {
                field: "geometry.door_width",
                reason: "door gap must be narrower than the walkable wall".to_string(),
            });
        }
        if geometry.entrance_inset <= 0.0 || geometry.entrance_inset >= geometry.half_size() {
            return Err(ConfigError::Invalid {
                field: "geometry.entrance_inset",
                reason: "entrance must sit strictly inside the room".to_string(),
            });
        }
        let margin = geometry.push_back_margin;
        if !(margin > 0.0 && margin < geometry.half_size()) {
            return Err(ConfigError::Invalid {
                field: "geometry.push_back_margin",
                reason: format!("{margin} must lie strictly between 0 and half the room size"),
            });
        }
        if geometry.max_step_per_tick >= geometry.half_size() {
            return Err(ConfigError::Invalid {
                field: "geometry.max_step_per_tick",
                reason: "a single tick must not cover half a room".to_string(),
            });
        }

        let generation = &self.generation;
        ensure_probability("generation.door_probability", generation.door_probability)?;
        ensure_probability("generation.loop_room_probability", generation.loop_room_probability)?;
        let weights = &generation.category_weights;
        for value in [weights.ordinary, weights.hazardous, weights.hub, weights.secret] {
            ensure_probability("generation.category_weights", value)?;
        }
        if (weights.total() - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Invalid {
                field: "generation.category_weights",
                reason: format!("weights sum to {}, expected 1", weights.total()),
            });
        }
        let relief = &generation.relief_weights;
        if relief.total() <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "generation.relief_weights",
                reason: "at least one non-ordinary weight must be positive".to_string(),
            });
        }
        generation.milestones.lobby_portal.validate("generation.milestones.lobby_portal")?;
        generation.milestones.lobby_exit.validate("generation.milestones.lobby_exit")?;
        generation.milestones.grid_portal.validate("generation.milestones.grid_portal")?;
        Ok(())
    }

    /// Stable hash of the effective tuning, recorded in journals.
    pub fn fingerprint(&self) -> u64 {
        let text = serde_json::to_string(self).unwrap_or_default();
        xxh3_64(text.as_bytes())
    }
}

fn ensure_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("{value} is not within [0, 1]") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().expect("defaults must validate");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let config = Config::from_toml_str(
            r#"
            difficulty = "easy"

            [timing]
            transition_cooldown_ticks = 12

            [generation.milestones.lobby_exit]
            min_rooms = 4
            base_chance = 1.0
            ramp_per_room = 0.0
            max_chance = 1.0
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.timing.transition_cooldown_ticks, 12);
        assert_eq!(config.timing.npc_spawn_delay_ticks, 6);
        assert_eq!(config.generation.milestones.lobby_exit.min_rooms, 4);
        assert_eq!(config.generation.milestones.lobby_portal.min_rooms, 6);
        assert_eq!(config.geometry, GeometryConfig::default());
    }

    #[test]
    fn weights_that_do_not_sum_to_one_are_rejected() {
        let err = Config::from_toml_str(
            r#"
            [generation.category_weights]
            ordinary = 0.5
            hazardous = 0.2
            hub = 0.05
            secret = 0.05
            "#,
        )
        .expect_err("weights sum to 0.8");
        assert!(matches!(err, ConfigError::Invalid { field: "generation.category_weights", .. }));
    }

    #[test]
    fn oversized_step_is_rejected() {
        let mut config = Config::default();
        config.geometry.max_step_per_tick = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn push_back_margin_outside_the_room_is_rejected() {
        for margin in [-2.0, 0.0, 4.0, 9.0] {
            let mut config = Config::default();
            config.geometry.push_back_margin = margin;
            let err = config.validate().expect_err("margin must land inside the room");
            assert!(
                matches!(err, ConfigError::Invalid { field: "geometry.push_back_margin", .. }),
                "margin {margin} gave {err:?}"
            );
        }

        let err = Config::from_toml_str("[geometry]\npush_back_margin = 9.0")
            .expect_err("margin past the far wall");
        assert!(matches!(err, ConfigError::Invalid { field: "geometry.push_back_margin", .. }));
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let err = Config::from_toml_str("[geometry\nroom_size = 8").expect_err("bad toml");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("backrooms.toml");
        fs::write(&path, "[generation]\ndoor_probability = 0.25\n").expect("write");
        let config = Config::load(&path).expect("load");
        assert_eq!(config.generation.door_probability, 0.25);
    }

    #[test]
    fn milestone_chance_ramps_and_caps() {
        let rule = Milestones::default().lobby_exit;
        assert_eq!(rule.chance(9), None);
        assert!((rule.chance(10).expect("eligible") - 0.10).abs() < 1e-9);
        assert!((rule.chance(12).expect("eligible") - 0.20).abs() < 1e-9);
        assert!((rule.chance(40).expect("eligible") - 0.30).abs() < 1e-9);
    }

    #[test]
    fn fingerprint_follows_tuning() {
        let base = Config::default();
        let mut tweaked = Config::default();
        tweaked.timing.dialogue_delay_ticks = 9;
        assert_eq!(base.fingerprint(), Config::default().fingerprint());
        assert_ne!(base.fingerprint(), tweaked.fingerprint());
    }
}
