//! Room actor: an isolated Tokio task that owns one game.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. All mutation of a room's membership and game
//! state happens inside that task, one command at a time — two actions
//! hitting the same room can never interleave, and no locks are held
//! across any of it.
//!
//! Replies are sent only after the matching broadcast has been queued on
//! every member's channel, so a caller that sees `Ok(())` knows the
//! room's events are already on their way.

use std::collections::HashMap;

use deckhand_game::{
    Color, GameConfig, GameError, GameState, PlayOutcome, Player, Pseudonym, next_turn,
};
use deckhand_protocol::{RoomId, ServerEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};

use crate::{RoomConfig, RoomError, RoomPhase};

/// Channel sender for delivering room events to a member's connection.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its channel.
///
/// Each carries a `oneshot` reply channel; the caller awaits the
/// outcome on it.
pub(crate) enum RoomCommand {
    /// Seat a player in the room.
    Join {
        player: Player,
        sender: EventSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Remove a player from the room (exact pseudonym match).
    Leave {
        pseudo: Pseudonym,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Deal hands and begin play.
    Start {
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Play a card from a hand.
    Play {
        pseudo: Pseudonym,
        card_index: usize,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Draw one card from the pile.
    Pick {
        pseudo: Pseudonym,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Pass the turn.
    EndTurn {
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Declare the active color.
    SetColor {
        color: Color,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
}

/// Handle to a running room actor. Used to send commands to it.
///
/// This is cheap to clone — it's just an `mpsc::Sender` wrapper.
/// The `RoomRegistry` holds one of these per room.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's ID.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Seats `player` in the room; their events go out through `sender`.
    pub async fn join(&self, player: Player, sender: EventSender) -> Result<(), RoomError> {
        self.command(|reply| RoomCommand::Join { player, sender, reply }).await
    }

    /// Removes the member with exactly this pseudonym.
    pub async fn leave(&self, pseudo: Pseudonym) -> Result<(), RoomError> {
        self.command(|reply| RoomCommand::Leave { pseudo, reply }).await
    }

    /// Deals hands and begins play.
    pub async fn start(&self) -> Result<(), RoomError> {
        self.command(|reply| RoomCommand::Start { reply }).await
    }

    /// Plays the card at `card_index` from `pseudo`'s hand.
    pub async fn play_card(&self, pseudo: Pseudonym, card_index: usize) -> Result<(), RoomError> {
        self.command(|reply| RoomCommand::Play { pseudo, card_index, reply }).await
    }

    /// Draws one card into `pseudo`'s hand.
    pub async fn pick_card(&self, pseudo: Pseudonym) -> Result<(), RoomError> {
        self.command(|reply| RoomCommand::Pick { pseudo, reply }).await
    }

    /// Ends the current turn.
    pub async fn end_turn(&self) -> Result<(), RoomError> {
        self.command(|reply| RoomCommand::EndTurn { reply }).await
    }

    /// Declares the active color and passes the turn.
    pub async fn set_color(&self, color: Color) -> Result<(), RoomError> {
        self.command(|reply| RoomCommand::SetColor { color, reply }).await
    }

    async fn command<F>(&self, make: F) -> Result<(), RoomError>
    where
        F: FnOnce(oneshot::Sender<Result<(), RoomError>>) -> RoomCommand,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(make(reply_tx))
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room_id: RoomId,
    phase: RoomPhase,
    config: RoomConfig,
    game_config: GameConfig,
    /// Seated players, in join order — which is also turn rotation order.
    members: Vec<Player>,
    /// Per-member outbound channels.
    senders: HashMap<Pseudonym, EventSender>,
    game: GameState,
    rng: StdRng,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop. Ends when every handle is dropped, which for
    /// a registry-held room means never.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join { player, sender, reply } => {
                    let result = self.handle_join(player, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { pseudo, reply } => {
                    let result = self.handle_leave(&pseudo);
                    let _ = reply.send(result);
                }
                RoomCommand::Start { reply } => {
                    let result = self.handle_start();
                    let _ = reply.send(result);
                }
                RoomCommand::Play { pseudo, card_index, reply } => {
                    let result = self.handle_play(&pseudo, card_index);
                    let _ = reply.send(result);
                }
                RoomCommand::Pick { pseudo, reply } => {
                    let result = self.handle_pick(&pseudo);
                    let _ = reply.send(result);
                }
                RoomCommand::EndTurn { reply } => {
                    let result = self.handle_end_turn();
                    let _ = reply.send(result);
                }
                RoomCommand::SetColor { color, reply } => {
                    let result = self.handle_set_color(color);
                    let _ = reply.send(result);
                }
            }
        }

        tracing::info!(room_id = %self.room_id, "room actor stopped");
    }

    fn handle_join(&mut self, player: Player, sender: EventSender) -> Result<(), RoomError> {
        if !self.phase.is_joinable() {
            return Err(RoomError::AlreadyStarted(self.room_id.clone()));
        }
        if self.members.len() >= self.config.max_players {
            return Err(RoomError::RoomFull(self.room_id.clone()));
        }
        if self.members.iter().any(|m| m.pseudo.conflicts_with(&player.pseudo)) {
            return Err(RoomError::DuplicatePseudonym(player.pseudo));
        }

        self.senders.insert(player.pseudo.clone(), sender);
        tracing::info!(
            room_id = %self.room_id,
            pseudo = %player.pseudo,
            players = self.members.len() + 1,
            "player joined"
        );
        self.members.push(player);
        self.broadcast_members();
        Ok(())
    }

    fn handle_leave(&mut self, pseudo: &Pseudonym) -> Result<(), RoomError> {
        let index = self
            .members
            .iter()
            .position(|m| m.pseudo == *pseudo)
            .ok_or_else(|| RoomError::Game(GameError::PlayerNotFound(pseudo.clone())))?;

        // If the leaver holds the turn, pass it along while they are
        // still in rotation; otherwise the turn would dangle.
        if self.phase.is_playing() {
            if let Some(current) = self.game.turn.clone() {
                if current.pseudo == *pseudo {
                    if self.members.len() > 1 {
                        let next = next_turn(&self.members, &current, self.game.forward_direction)?;
                        self.game.turn = Some(next);
                    } else {
                        self.game.turn = None;
                    }
                }
            }
        }

        let player = self.members.remove(index);
        self.senders.remove(&player.pseudo);
        tracing::info!(
            room_id = %self.room_id,
            pseudo = %player.pseudo,
            players = self.members.len(),
            "player left"
        );

        // The leaver is gone before the broadcast, so they don't hear it.
        self.broadcast_members();
        Ok(())
    }

    fn handle_start(&mut self) -> Result<(), RoomError> {
        if self.phase.is_playing() {
            return Err(RoomError::AlreadyStarted(self.room_id.clone()));
        }

        self.game = GameState::start(&self.members, &self.game_config, &mut self.rng)?;
        self.phase = RoomPhase::Playing;
        tracing::info!(
            room_id = %self.room_id,
            players = self.members.len(),
            "game started"
        );
        self.broadcast(ServerEvent::LaunchGame(self.game.clone()));
        Ok(())
    }

    fn handle_play(&mut self, pseudo: &Pseudonym, card_index: usize) -> Result<(), RoomError> {
        self.ensure_playing()?;
        match self.game.play_card(pseudo, card_index, &mut self.rng)? {
            PlayOutcome::Win(winner) => {
                self.phase = RoomPhase::Finished;
                tracing::info!(room_id = %self.room_id, pseudo = %winner, "game won");
                self.broadcast(ServerEvent::Winner { pseudo: winner });
            }
            PlayOutcome::Continue => self.broadcast_state(),
        }
        Ok(())
    }

    fn handle_pick(&mut self, pseudo: &Pseudonym) -> Result<(), RoomError> {
        self.ensure_playing()?;
        self.game.draw_card(pseudo, &mut self.rng)?;
        self.broadcast_state();
        Ok(())
    }

    fn handle_end_turn(&mut self) -> Result<(), RoomError> {
        self.ensure_playing()?;
        self.game.end_turn(&self.members, &mut self.rng)?;
        self.broadcast_state();
        Ok(())
    }

    fn handle_set_color(&mut self, color: Color) -> Result<(), RoomError> {
        self.ensure_playing()?;
        self.game.set_color(&self.members, color)?;
        self.broadcast_state();
        Ok(())
    }

    fn ensure_playing(&self) -> Result<(), RoomError> {
        match self.phase {
            RoomPhase::Playing => Ok(()),
            RoomPhase::Lobby => Err(RoomError::Game(GameError::NotStarted)),
            RoomPhase::Finished => Err(RoomError::GameFinished(self.room_id.clone())),
        }
    }

    /// Broadcasts the membership list after a join or leave.
    fn broadcast_members(&self) {
        self.broadcast(ServerEvent::Joined(self.members.clone()));
    }

    /// Broadcasts the full game state after a successful action.
    fn broadcast_state(&self) {
        self.broadcast(ServerEvent::UpdateState(self.game.clone()));
    }

    /// Sends an event to every member. Silently drops members whose
    /// receiver is gone (connection died).
    fn broadcast(&self, event: ServerEvent) {
        for member in &self.members {
            if let Some(sender) = self.senders.get(&member.pseudo) {
                let _ = sender.send(event.clone());
            }
        }
    }
}

/// Spawns a new room actor task and returns a handle to communicate
/// with it.
///
/// `channel_size` controls backpressure — if the channel fills up,
/// senders will wait (bounded channel).
pub(crate) fn spawn_room(
    room_id: RoomId,
    config: RoomConfig,
    game_config: GameConfig,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room_id: room_id.clone(),
        phase: RoomPhase::Lobby,
        config,
        game_config,
        members: Vec::new(),
        senders: HashMap::new(),
        game: GameState::default(),
        rng: StdRng::from_os_rng(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle { room_id, sender: tx }
}
