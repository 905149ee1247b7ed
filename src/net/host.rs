//! The authoritative side of a networked match.
//!
//! The host owns the only snapshot that matters. Local commands act for
//! seat 0 and guest `ACTION`s act for seat 1; both go through the same
//! engine one at a time, and the full snapshot is broadcast after each.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::message::{Handshake, WireMessage};
use super::transport::Transport;
use crate::core::{Command, MatchRules, MatchSetup, MatchSnapshot, PlayerId, PlayerMap};
use crate::error::{NetError, NetResult};
use crate::rules::{MatchEngine, RulesEngine};

/// Seat the host plays.
pub const HOST_SEAT: PlayerId = PlayerId::FIRST;

/// Seat the guest plays.
pub const GUEST_SEAT: PlayerId = PlayerId::SECOND;

/// Host side of a two-seat match.
pub struct HostSession<T: Transport> {
    engine: MatchEngine<'static>,
    transport: T,
    snapshot: MatchSnapshot,
    profile: Handshake,
    guest: Option<Handshake>,
    rules: Option<MatchRules>,
}

impl<T: Transport> HostSession<T> {
    /// A host waiting in the lobby for its guest.
    pub fn new(transport: T, profile: Handshake) -> Self {
        Self {
            engine: MatchEngine::standard(),
            transport,
            snapshot: MatchSnapshot::lobby(),
            profile,
            guest: None,
            rules: None,
        }
    }

    /// Use non-default rules for the next `start_match`.
    #[must_use]
    pub fn with_rules(mut self, rules: MatchRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn snapshot(&self) -> &MatchSnapshot {
        &self.snapshot
    }

    pub fn guest(&self) -> Option<&Handshake> {
        self.guest.as_ref()
    }

    pub fn engine(&self) -> &MatchEngine<'static> {
        &self.engine
    }

    /// Start (or restart) the match with both peers' decks and names.
    ///
    /// An invalid deck on either side leaves the lobby in place with the
    /// reason in the log; the result is broadcast either way.
    pub fn start_match(&mut self, seed: u64) -> NetResult<()> {
        let guest = self.guest.as_ref().ok_or(NetError::HandshakeMissing)?;

        let mut setup = MatchSetup::new(seed).with_decks(PlayerMap::from_pair(
            self.profile.deck_card_ids.clone(),
            guest.deck_card_ids.clone(),
        ));
        setup.names =
            PlayerMap::from_pair(self.profile.player_name.clone(), guest.player_name.clone());
        setup.avatars =
            PlayerMap::from_pair(self.profile.avatar_id.clone(), guest.avatar_id.clone());
        if let Some(rules) = &self.rules {
            setup = setup.with_rules(rules.clone());
        }

        info!(seed, guest = %guest.player_name, "starting match");
        self.apply_from(HOST_SEAT, Command::StartMatch(setup))
    }

    /// Apply a command for the host's own seat.
    pub fn apply_local(&mut self, command: Command) -> NetResult<()> {
        self.apply_from(HOST_SEAT, command)
    }

    /// Apply a command on behalf of `seat` and broadcast the result.
    ///
    /// Once the match has started only the acting seat may send
    /// rule-affecting commands.
    pub fn apply_from(&mut self, seat: PlayerId, command: Command) -> NetResult<()> {
        if self.snapshot.started && !command.is_host_only() {
            let acting = self.snapshot.acting_seat();
            if seat != acting {
                return Err(NetError::NotYourTurn(seat));
            }
        }

        debug!(%seat, command = command.name(), "applying");
        self.snapshot = self.engine.apply(&self.snapshot, &command);
        self.broadcast()
    }

    /// Send the current snapshot to the guest.
    pub fn broadcast(&mut self) -> NetResult<()> {
        let frame = WireMessage::GameState {
            snapshot: Box::new(self.snapshot.clone()),
        }
        .encode()?;
        self.transport.send(frame)
    }

    /// Handle one inbound frame from the guest.
    pub fn handle_frame(&mut self, frame: &str) -> NetResult<()> {
        match WireMessage::decode(frame)? {
            WireMessage::Handshake(handshake) => {
                info!(
                    guest = %handshake.player_name,
                    custom_deck = handshake.deck_card_ids.is_some(),
                    "guest joined"
                );
                self.guest = Some(handshake);
                self.broadcast()
            }
            WireMessage::Action { command } => {
                if self.guest.is_none() {
                    return Err(NetError::HandshakeMissing);
                }
                if command.is_host_only() {
                    return Err(NetError::Protocol(format!(
                        "guest may not send {}",
                        command.name()
                    )));
                }
                self.apply_from(GUEST_SEAT, command)
            }
            WireMessage::GameState { .. } => Err(NetError::Protocol(
                "GAME_STATE only flows from host to guest".to_string(),
            )),
        }
    }

    /// Wait for and handle the next guest frame.
    pub async fn next_frame(&mut self) -> NetResult<()> {
        let frame = self.transport.recv().await.ok_or(NetError::Disconnected)?;
        self.handle_frame(&frame)
    }

    /// Serve the match until the guest disconnects or `local` closes.
    ///
    /// Refused frames and commands are logged and skipped. Returns `Ok`
    /// when the local channel closes and `Disconnected` when the guest
    /// goes away.
    pub async fn run(&mut self, mut local: mpsc::UnboundedReceiver<Command>) -> NetResult<()> {
        loop {
            tokio::select! {
                frame = self.transport.recv() => {
                    let Some(frame) = frame else {
                        info!("guest disconnected");
                        return Err(NetError::Disconnected);
                    };
                    if let Err(err) = self.handle_frame(&frame) {
                        if matches!(err, NetError::Disconnected) {
                            return Err(err);
                        }
                        warn!(%err, "guest frame refused");
                    }
                }
                command = local.recv() => {
                    let Some(command) = command else {
                        debug!("local command channel closed");
                        return Ok(());
                    };
                    if let Err(err) = self.apply_local(command) {
                        if matches!(err, NetError::Disconnected) {
                            return Err(err);
                        }
                        warn!(%err, "local command refused");
                    }
                }
            }
        }
    }
}
