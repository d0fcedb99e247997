use tracing::{debug, info, warn};
use crate::error::ReplayError;
use crate::models::{BattleTranscript, Combatant, CombatantSnapshot, HealthBand};
use crate::parsing::{LogEvent, classify_line, names_match};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    One,
    Two,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

/// Replay progress. `revealed_count` only ever grows by one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayCursor {
    pub revealed_count: usize,
    pub attacking_side: Option<Side>,
}

/// State change caused by a single revealed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEffect {
    None,
    Highlight(Side),
    HighlightCleared,
    /// Every side whose name matches the target takes the damage.
    Damaged { sides: Vec<Side>, amount: u32 },
    /// Attack or damage line naming nobody in this battle.
    Unattributed { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub index: usize,
    pub line: String,
    pub event: LogEvent,
    pub effect: TickEffect,
    pub complete: bool,
}

/// Read-only snapshot of one combatant for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantView {
    pub name: String,
    pub current_hp: i32,
    pub displayed_hp: i32,
    pub max_hp: i32,
    pub attacking: bool,
    pub band: HealthBand,
}

#[derive(Debug, Clone)]
struct ActiveReplay {
    transcript: BattleTranscript,
    combatants: [Combatant; 2],
    cursor: ReplayCursor,
}

impl ActiveReplay {
    fn resolve(transcript: BattleTranscript) -> Result<Self, ReplayError> {
        if transcript.log.is_empty() {
            return Err(ReplayError::EmptyLog);
        }
        let first = transcript
            .combatant1_base_stats
            .as_ref()
            .ok_or(ReplayError::MissingBaseStats { side: Side::One })?;
        let second = transcript
            .combatant2_base_stats
            .as_ref()
            .ok_or(ReplayError::MissingBaseStats { side: Side::Two })?;
        for snapshot in [first, second] {
            validate_snapshot(snapshot)?;
        }

        let (one, two) = if names_match(&first.name, &transcript.combatant1_name) {
            (first, second)
        } else if names_match(&second.name, &transcript.combatant1_name) {
            (second, first)
        } else {
            return Err(ReplayError::UnresolvedSides {
                combatant1: transcript.combatant1_name.clone(),
                first: first.name.clone(),
                second: second.name.clone(),
            });
        };

        let combatants = [Combatant::from_snapshot(one), Combatant::from_snapshot(two)];
        Ok(Self {
            transcript,
            combatants,
            cursor: ReplayCursor::default(),
        })
    }

    fn is_complete(&self) -> bool {
        self.cursor.revealed_count >= self.transcript.log.len()
    }

    fn is_named(&self, side: Side, name: &str) -> bool {
        let listed = match side {
            Side::One => &self.transcript.combatant1_name,
            Side::Two => &self.transcript.combatant2_name,
        };
        names_match(name, listed) || names_match(name, &self.combatants[side.index()].name)
    }

    /// Sides answering to `name`. Both in a mirror match.
    fn sides_named(&self, name: &str) -> Vec<Side> {
        [Side::One, Side::Two]
            .into_iter()
            .filter(|side| self.is_named(*side, name))
            .collect()
    }

    fn advance(&mut self) -> Option<TickOutcome> {
        if self.is_complete() {
            return None;
        }
        let index = self.cursor.revealed_count;
        let line = self.transcript.log[index].clone();
        self.cursor.revealed_count += 1;

        let event = classify_line(&line);
        let effect = self.apply(&event);
        if let TickEffect::Unattributed { name } = &effect {
            debug!("Line {} names unknown combatant '{}': {}", index, name, line);
        }

        Some(TickOutcome {
            index,
            line,
            event,
            effect,
            complete: self.is_complete(),
        })
    }

    fn apply(&mut self, event: &LogEvent) -> TickEffect {
        match event {
            // Only one side can be highlighted; a mirror match highlights side one.
            LogEvent::Attack { actor } => match self.sides_named(actor).first().copied() {
                Some(side) => {
                    self.cursor.attacking_side = Some(side);
                    TickEffect::Highlight(side)
                }
                None => TickEffect::Unattributed { name: actor.clone() },
            },
            LogEvent::Damage { target, amount } => {
                let sides = self.sides_named(target);
                if sides.is_empty() {
                    return TickEffect::Unattributed { name: target.clone() };
                }
                for side in &sides {
                    self.combatants[side.index()].apply_damage(*amount);
                }
                TickEffect::Damaged { sides, amount: *amount }
            }
            LogEvent::TurnEnd => {
                self.cursor.attacking_side = None;
                TickEffect::HighlightCleared
            }
            LogEvent::Narrative => TickEffect::None,
        }
    }
}

fn validate_snapshot(snapshot: &CombatantSnapshot) -> Result<(), ReplayError> {
    if snapshot.max_hp <= 0 {
        return Err(ReplayError::InvalidMaxHp {
            name: snapshot.name.clone(),
            max_hp: snapshot.max_hp,
        });
    }
    Ok(())
}

/// Progressive replay of a finished battle transcript.
///
/// Each [`advance`](Self::advance) reveals exactly one log line and applies
/// whatever it implies to the two combatants. Starting a new transcript
/// discards the previous replay and bumps [`replay_id`](Self::replay_id), so
/// ticks scheduled for the old replay can be recognised as stale.
#[derive(Debug, Default)]
pub struct BattleReplayEngine {
    active: Option<ActiveReplay>,
    replay_id: u64,
}

impl BattleReplayEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(transcript: BattleTranscript) -> Result<Self, ReplayError> {
        let mut engine = Self::new();
        engine.start(transcript)?;
        Ok(engine)
    }

    pub fn start(&mut self, transcript: BattleTranscript) -> Result<(), ReplayError> {
        self.active = None;
        self.replay_id += 1;

        let title = transcript.title();
        match ActiveReplay::resolve(transcript) {
            Ok(active) => {
                info!(
                    "Replay #{} started: {} ({} log lines)",
                    self.replay_id,
                    title,
                    active.transcript.log.len()
                );
                self.active = Some(active);
                Ok(())
            }
            Err(e) => {
                warn!("Cannot replay {}: {}", title, e);
                Err(e)
            }
        }
    }

    /// Reveals the next line. Returns `None` when unstarted or complete.
    pub fn advance(&mut self) -> Option<TickOutcome> {
        let outcome = self.active.as_mut()?.advance()?;
        if outcome.complete {
            info!("Replay #{} complete, winner: {}", self.replay_id, self.winner().unwrap_or("unknown"));
        }
        Some(outcome)
    }

    /// Drops the current replay, as when the owning view is torn down.
    pub fn stop(&mut self) {
        self.active = None;
        self.replay_id += 1;
    }

    pub fn is_started(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.active.as_ref().is_some_and(ActiveReplay::is_complete)
    }

    pub fn replay_id(&self) -> u64 {
        self.replay_id
    }

    pub fn transcript(&self) -> Option<&BattleTranscript> {
        self.active.as_ref().map(|a| &a.transcript)
    }

    pub fn cursor(&self) -> ReplayCursor {
        self.active.as_ref().map(|a| a.cursor).unwrap_or_default()
    }

    pub fn attacking_side(&self) -> Option<Side> {
        self.cursor().attacking_side
    }

    pub fn revealed_lines(&self) -> &[String] {
        match &self.active {
            Some(active) => &active.transcript.log[..active.cursor.revealed_count],
            None => &[],
        }
    }

    pub fn total_lines(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.transcript.log.len())
    }

    pub fn combatant(&self, side: Side) -> Option<&Combatant> {
        self.active.as_ref().map(|a| &a.combatants[side.index()])
    }

    pub fn view(&self, side: Side) -> Option<CombatantView> {
        let active = self.active.as_ref()?;
        let mon = &active.combatants[side.index()];
        Some(CombatantView {
            name: mon.name.clone(),
            current_hp: mon.current_hp,
            displayed_hp: mon.displayed_hp(),
            max_hp: mon.max_hp,
            attacking: active.cursor.attacking_side == Some(side),
            band: mon.health_band(),
        })
    }

    /// Winner name, only once every line has been revealed.
    pub fn winner(&self) -> Option<&str> {
        let active = self.active.as_ref()?;
        if !active.is_complete() {
            return None;
        }
        active.transcript.winner_name.as_deref()
    }
}
