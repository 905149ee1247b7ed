//! The guest side of a networked match.
//!
//! A client never runs rules itself. It forwards rule-affecting commands to
//! the host and replaces its snapshot with whatever the host sends back.
//! Unit highlighting outside an interaction is local-only state.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::host::GUEST_SEAT;
use super::message::{Handshake, WireMessage};
use super::transport::Transport;
use crate::core::{CastCue, Command, InstanceId, MatchSnapshot, PlayerId};
use crate::error::{NetError, NetResult};
use crate::rules::{MatchEngine, RulesEngine};

/// Guest side of a two-seat match.
pub struct ClientSession<T: Transport> {
    engine: MatchEngine<'static>,
    transport: T,
    snapshot: MatchSnapshot,
    highlighted: FxHashSet<InstanceId>,
    last_cue: u64,
    fresh_cast: Option<CastCue>,
}

impl<T: Transport> ClientSession<T> {
    /// Join a host by sending the handshake.
    pub fn connect(mut transport: T, profile: Handshake) -> NetResult<Self> {
        transport.send(WireMessage::Handshake(profile).encode()?)?;
        Ok(Self {
            engine: MatchEngine::standard(),
            transport,
            snapshot: MatchSnapshot::lobby(),
            highlighted: FxHashSet::default(),
            last_cue: 0,
            fresh_cast: None,
        })
    }

    pub fn seat(&self) -> PlayerId {
        GUEST_SEAT
    }

    pub fn snapshot(&self) -> &MatchSnapshot {
        &self.snapshot
    }

    /// Units highlighted locally, in id order.
    pub fn highlighted(&self) -> Vec<InstanceId> {
        let mut ids: Vec<_> = self.highlighted.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// The cast the host reported since the last call, if it is new.
    pub fn take_fresh_cast(&mut self) -> Option<CastCue> {
        self.fresh_cast.take()
    }

    /// Send a command to the host.
    ///
    /// `SelectMinion` with no interaction open only changes the local
    /// highlight set. Host-only commands are refused without sending.
    pub fn send_command(&mut self, command: Command) -> NetResult<()> {
        if command.is_host_only() {
            return Err(NetError::Protocol(format!(
                "{} is reserved for the host",
                command.name()
            )));
        }
        if let Command::SelectMinion { minion, toggle } = command {
            if self.snapshot.pending.is_none() {
                self.highlight(minion, toggle);
                return Ok(());
            }
        }
        if self.snapshot.started && self.snapshot.acting_seat() != GUEST_SEAT {
            return Err(NetError::NotYourTurn(GUEST_SEAT));
        }

        debug!(command = command.name(), "forwarding to host");
        let frame = WireMessage::Action { command }.encode()?;
        self.transport.send(frame)
    }

    fn highlight(&mut self, minion: InstanceId, toggle: bool) {
        if toggle {
            if !self.highlighted.remove(&minion) {
                self.highlighted.insert(minion);
            }
        } else {
            self.highlighted.clear();
            self.highlighted.insert(minion);
        }
    }

    /// Handle one frame from the host.
    pub fn handle_frame(&mut self, frame: &str) -> NetResult<()> {
        match WireMessage::decode(frame)? {
            WireMessage::GameState { snapshot } => {
                self.snapshot = self
                    .engine
                    .apply(&self.snapshot, &Command::SyncState { snapshot });

                let snapshot = &self.snapshot;
                self.highlighted
                    .retain(|id| snapshot.find_unit(*id).is_some());

                if let Some(cue) = &snapshot.last_cast {
                    if cue.version > self.last_cue {
                        self.last_cue = cue.version;
                        self.fresh_cast = Some(cue.clone());
                    }
                }
                Ok(())
            }
            WireMessage::Handshake(_) | WireMessage::Action { .. } => Err(NetError::Protocol(
                "only GAME_STATE flows from host to guest".to_string(),
            )),
        }
    }

    /// Wait for and handle the next host frame.
    pub async fn next_frame(&mut self) -> NetResult<()> {
        let frame = self.transport.recv().await.ok_or(NetError::Disconnected)?;
        self.handle_frame(&frame)
    }
}
