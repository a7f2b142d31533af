use chrono::{DateTime, Utc};

use crate::game::{format_finish_time, Game, Outbox};
use crate::models::{ConnectionId, Phase, PlayerStatus, ServerMessage, WINNER_SLOTS};

/// What a single `player-move` did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Unknown player, player already dead or finished, or round over.
    Ignored,
    /// No light has been shown yet.
    Idle,
    /// Red light, but still inside the grace window.
    Forgiven,
    /// Red light after the grace window.
    Eliminated,
    Advanced { progress: u32 },
    /// Reached the goal. `rank` is the 1-based place among the winners.
    Finished { rank: usize },
}

impl Game {
    /// Apply one tap from `id` at time `now`.
    pub fn apply_move(
        &mut self,
        id: &ConnectionId,
        now: DateTime<Utc>,
        out: &mut Outbox,
    ) -> MoveOutcome {
        let Some(player) = self.registry.get_mut(id) else {
            log::debug!("Ignoring move from unknown connection {}", id);
            return MoveOutcome::Ignored;
        };
        if player.status.is_terminal() || self.state.is_ended() {
            log::debug!("Ignoring move from {} ({:?}, {:?})", id, player.status, self.state.phase);
            return MoveOutcome::Ignored;
        }

        match self.state.phase {
            Phase::Red => {
                let past_grace = self.state.last_light_change.map_or(true, |changed| {
                    now.signed_duration_since(changed) > self.rules.grace_period
                });
                if !past_grace {
                    return MoveOutcome::Forgiven;
                }

                player.status = PlayerStatus::Dead;
                log::info!("Player {} ({}) moved on red and is out", id, player.name);
                out.send_to(id, ServerMessage::YouDied);
                out.broadcast(self.snapshot());
                MoveOutcome::Eliminated
            }
            Phase::Green => self.advance(id, now, out),
            Phase::Waiting => {
                out.broadcast(self.snapshot());
                MoveOutcome::Idle
            }
            Phase::Ended => MoveOutcome::Ignored,
        }
    }

    fn advance(&mut self, id: &ConnectionId, now: DateTime<Utc>, out: &mut Outbox) -> MoveOutcome {
        let goal = self.rules.goal;
        let Some(player) = self.registry.get_mut(id) else {
            return MoveOutcome::Ignored;
        };

        player.progress = player.progress.saturating_add(1).min(goal);
        let progress = player.progress;
        let mut outcome = MoveOutcome::Advanced { progress };

        if progress >= goal {
            player.status = PlayerStatus::Finished;
            let recorded = self.state.winners.iter().position(|w| &w.id == id);
            match recorded {
                Some(index) => {
                    // Same connection finishing twice keeps its first stamp.
                    player.finish_time = self.state.winners[index].finish_time.clone();
                    outcome = MoveOutcome::Finished { rank: index + 1 };
                }
                None => {
                    player.finish_time = Some(format_finish_time(now, self.rules.finish_offset));
                    let finished = player.clone();
                    self.state.winners.push(finished.clone());
                    let rank = self.state.winners.len();
                    log::info!("Player {} ({}) finished in place {}", id, finished.name, rank);
                    out.broadcast(ServerMessage::PlayerFinished(finished));

                    if rank >= WINNER_SLOTS {
                        self.state.phase = Phase::Ended;
                        log::info!("Game over, winners decided");
                        out.broadcast(ServerMessage::GameOver(self.state.winners.clone()));
                    }
                    outcome = MoveOutcome::Finished { rank };
                }
            }
        }

        let percentage = f64::from(progress) / f64::from(goal) * 100.0;
        out.send_to(id, ServerMessage::ProgressUpdate(percentage));
        out.broadcast(self.snapshot());
        outcome
    }
}
