use serde::{Deserialize, Serialize};

/// Base-stat snapshot of one combatant as the battle service sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    #[serde(rename = "maxHp", alias = "max_hp")]
    pub max_hp: i32,
    /// Pre-battle HP, normally equal to `max_hp`. Ignored by the replay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    #[serde(default, rename = "image", alias = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CombatantSnapshot {
    pub fn new(name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            hp: Some(max_hp),
            image_url: None,
        }
    }
}

/// Colour band of a health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,  // >= 50%
    Wounded,  // >= 20%
    Critical, // < 20%
}

impl HealthBand {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction < 0.2 {
            HealthBand::Critical
        } else if fraction < 0.5 {
            HealthBand::Wounded
        } else {
            HealthBand::Healthy
        }
    }
}

/// Live view-state of one side of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub max_hp: i32,
    /// Stored HP. Goes negative when a damage line over-subtracts; use
    /// [`Combatant::displayed_hp`] for rendering.
    pub current_hp: i32,
}

impl Combatant {
    pub fn from_snapshot(snapshot: &CombatantSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            max_hp: snapshot.max_hp,
            current_hp: snapshot.max_hp,
        }
    }

    pub fn apply_damage(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn displayed_hp(&self) -> i32 {
        self.current_hp.clamp(0, self.max_hp)
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.displayed_hp() as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    pub fn health_band(&self) -> HealthBand {
        HealthBand::from_fraction(self.hp_fraction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_damage_is_stored_but_clamped_for_display() {
        let mut mon = Combatant::from_snapshot(&CombatantSnapshot::new("Pikachu", 30));
        mon.apply_damage(20);
        mon.apply_damage(25);
        assert_eq!(mon.current_hp, -15);
        assert_eq!(mon.displayed_hp(), 0);
        assert_eq!(mon.hp_fraction(), 0.0);
    }

    #[test]
    fn health_band_thresholds() {
        let mut mon = Combatant::from_snapshot(&CombatantSnapshot::new("Onix", 100));
        assert_eq!(mon.health_band(), HealthBand::Healthy);
        mon.apply_damage(50);
        assert_eq!(mon.health_band(), HealthBand::Healthy);
        mon.apply_damage(1);
        assert_eq!(mon.health_band(), HealthBand::Wounded);
        mon.apply_damage(30);
        assert_eq!(mon.health_band(), HealthBand::Critical);
    }

    #[test]
    fn huge_damage_saturates() {
        let mut mon = Combatant::from_snapshot(&CombatantSnapshot::new("Snorlax", 160));
        mon.apply_damage(u32::MAX);
        assert_eq!(mon.current_hp, 160 - i32::MAX);
        assert_eq!(mon.displayed_hp(), 0);
    }
}
