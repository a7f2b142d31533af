//! End-to-end rounds driven through `GameServer` with recording sinks.
//!
//! Each test plays the part of several browser connections plus the admin
//! console and checks both the authoritative state and what every connection
//! was told.

use pretty_assertions::assert_eq;
use red_light_server::game::{ManualClock, MoveOutcome, Rules};
use red_light_server::models::{
    ClientMessage, ConnectionId, Light, Phase, PlayerStatus, ServerMessage,
};
use red_light_server::server::{GameServer, Sink};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Inbox {
    frames: Arc<Mutex<Vec<String>>>,
}

impl Inbox {
    fn messages(&self) -> Vec<ServerMessage> {
        self.frames
            .lock()
            .unwrap()
            .iter()
            .map(|frame| serde_json::from_str(frame).unwrap())
            .collect()
    }

    fn events(&self) -> Vec<&'static str> {
        self.messages().iter().map(|m| m.event_name()).collect()
    }

    fn clear(&self) {
        self.frames.lock().unwrap().clear();
    }
}

impl Sink for Inbox {
    fn deliver(&self, frame: &str) {
        self.frames.lock().unwrap().push(frame.to_string());
    }
}

struct Table {
    server: GameServer<Inbox>,
    clock: ManualClock,
    admin: Inbox,
    admin_id: ConnectionId,
}

impl Table {
    fn new(rules: Rules) -> Self {
        let clock = ManualClock::at_millis(0);
        let mut server = GameServer::new(rules, clock.clone());
        let admin = Inbox::default();
        let admin_id = ConnectionId::from("admin");
        server.connect(admin_id.clone(), admin.clone());
        Self {
            server,
            clock,
            admin,
            admin_id,
        }
    }

    fn seat(&mut self, id: &str, name: &str) -> (ConnectionId, Inbox) {
        let id = ConnectionId::from(id);
        let inbox = Inbox::default();
        self.server.connect(id.clone(), inbox.clone());
        self.server
            .handle(&id, ClientMessage::JoinGame(name.to_string()));
        (id, inbox)
    }

    fn light(&mut self, light: Light) {
        let admin_id = self.admin_id.clone();
        self.server
            .handle(&admin_id, ClientMessage::AdminChangeLight(light));
    }

    fn tap(&mut self, id: &ConnectionId, times: usize) -> MoveOutcome {
        let mut last = MoveOutcome::Ignored;
        for _ in 0..times {
            last = self.server.player_move(id);
        }
        last
    }

    fn status(&self, id: &ConnectionId) -> Option<PlayerStatus> {
        self.server.game().player(id).map(|p| p.status)
    }
}

#[test]
fn single_finisher_takes_first_place_and_round_continues() {
    let mut table = Table::new(Rules::default());
    let (a, a_inbox) = table.seat("a", "A");
    let (b, _) = table.seat("b", "B");
    table.light(Light::Green);

    assert_eq!(table.tap(&a, 60), MoveOutcome::Finished { rank: 1 });

    let state = table.server.game().state();
    assert_eq!(state.phase, Phase::Green);
    assert_eq!(state.winners.len(), 1);
    assert_eq!(state.winners[0].id, a);
    assert_eq!(table.status(&a), Some(PlayerStatus::Finished));
    assert_eq!(table.status(&b), Some(PlayerStatus::Alive));

    let finished: Vec<_> = a_inbox
        .messages()
        .into_iter()
        .filter(|m| matches!(m, ServerMessage::PlayerFinished(_)))
        .collect();
    assert_eq!(finished, vec![ServerMessage::PlayerFinished(state.winners[0].clone())]);
    assert_eq!(
        a_inbox
            .messages()
            .into_iter()
            .filter(|m| matches!(m, ServerMessage::ProgressUpdate(_)))
            .count(),
        60
    );
}

#[test]
fn three_winners_end_the_round_and_freeze_everyone_else() {
    let mut table = Table::new(Rules::default());
    let (a, _) = table.seat("a", "A");
    let (b, _) = table.seat("b", "B");
    let (c, _) = table.seat("c", "C");
    let (d, d_inbox) = table.seat("d", "D");
    table.light(Light::Green);
    table.tap(&d, 30);
    table.tap(&a, 60);
    table.tap(&b, 60);
    table.admin.clear();

    assert_eq!(table.tap(&c, 60), MoveOutcome::Finished { rank: 3 });
    assert_eq!(table.server.game().state().phase, Phase::Ended);
    assert!(table.admin.events().contains(&"game-over"));

    d_inbox.clear();
    assert_eq!(table.tap(&d, 1), MoveOutcome::Ignored);
    table.light(Light::Red);
    assert_eq!(table.server.game().state().phase, Phase::Ended);
    assert!(d_inbox.events().is_empty());
    assert_eq!(table.server.game().player(&d).map(|p| p.progress), Some(30));

    let winners: Vec<_> = table
        .server
        .game()
        .state()
        .winners
        .iter()
        .map(|w| w.id.clone())
        .collect();
    assert_eq!(winners, vec![a, b, c]);
}

#[test]
fn red_light_grace_window_is_inclusive() {
    let mut table = Table::new(Rules::default());
    let (early, early_inbox) = table.seat("early", "Early");
    let (late, late_inbox) = table.seat("late", "Late");
    table.light(Light::Green);
    table.tap(&early, 5);
    table.tap(&late, 5);

    table.clock.set_millis(10_000);
    table.light(Light::Red);
    early_inbox.clear();
    late_inbox.clear();

    table.clock.set_millis(10_399);
    assert_eq!(table.tap(&early, 1), MoveOutcome::Forgiven);
    table.clock.set_millis(10_400);
    assert_eq!(table.tap(&early, 1), MoveOutcome::Forgiven);
    table.clock.set_millis(10_401);
    assert_eq!(table.tap(&late, 1), MoveOutcome::Eliminated);

    assert_eq!(table.status(&early), Some(PlayerStatus::Alive));
    assert_eq!(table.server.game().player(&early).map(|p| p.progress), Some(5));
    assert_eq!(table.status(&late), Some(PlayerStatus::Dead));

    // you-died goes only to the eliminated player
    assert_eq!(late_inbox.events(), vec!["you-died", "update-admin"]);
    assert_eq!(early_inbox.events(), vec!["update-admin"]);
}

#[test]
fn moves_before_any_light_are_no_ops() {
    let mut table = Table::new(Rules::default());
    let (a, a_inbox) = table.seat("a", "A");
    a_inbox.clear();

    assert_eq!(table.tap(&a, 10), MoveOutcome::Idle);

    let player = table.server.game().player(&a).cloned().unwrap();
    assert_eq!(player.progress, 0);
    assert_eq!(player.status, PlayerStatus::Alive);
    assert!(a_inbox.events().iter().all(|e| *e == "update-admin"));
}

#[test]
fn reset_after_game_over_starts_a_fresh_round() {
    let mut table = Table::new(Rules {
        goal: 3,
        ..Rules::default()
    });
    let seats: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|id| table.seat(id, id))
        .collect();
    table.light(Light::Green);
    for (id, _) in &seats[..3] {
        table.tap(id, 3);
    }
    table.light(Light::Red);
    table.clock.advance_millis(1_000);
    // Round already over, so this tap is ignored rather than fatal.
    assert_eq!(table.tap(&seats[3].0, 1), MoveOutcome::Ignored);
    table.admin.clear();

    let admin_id = table.admin_id.clone();
    table.server.handle(&admin_id, ClientMessage::AdminReset);

    assert_eq!(table.admin.events(), vec!["game-reset", "update-admin"]);
    let game = table.server.game();
    assert_eq!(game.state().phase, Phase::Waiting);
    assert!(game.state().winners.is_empty());
    for (id, _) in &seats {
        let player = game.player(id).unwrap();
        assert_eq!(player.progress, 0);
        assert_eq!(player.status, PlayerStatus::Alive);
        assert_eq!(player.finish_time, None);
    }

    table.light(Light::Green);
    assert_eq!(table.tap(&seats[3].0, 3), MoveOutcome::Finished { rank: 1 });
}

#[test]
fn disconnected_winner_stays_on_the_board() {
    let mut table = Table::new(Rules {
        goal: 1,
        ..Rules::default()
    });
    let (a, _) = table.seat("a", "A");
    table.light(Light::Green);
    table.tap(&a, 1);
    table.admin.clear();

    table.server.disconnect(&a);

    assert!(table.server.game().player(&a).is_none());
    match table.admin.messages().as_slice() {
        [ServerMessage::UpdateAdmin { players, winners }] => {
            assert!(players.is_empty());
            assert_eq!(winners.len(), 1);
            assert_eq!(winners[0].id, a);
        }
        other => panic!("unexpected frames: {other:?}"),
    }
    assert_eq!(table.tap(&a, 1), MoveOutcome::Ignored);
}

#[test]
fn joiner_learns_current_phase() {
    let mut table = Table::new(Rules::default());
    table.light(Light::Red);

    let (_, inbox) = table.seat("late", "Late");

    let messages = inbox.messages();
    assert_eq!(messages[1], ServerMessage::InitGame { state: Phase::Red });
}
