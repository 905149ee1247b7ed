//! duel-sim - Main Binary
//!
//! Plays one seeded match between two greedy bots, the host bot on seat 0
//! and a guest bot connected over an in-memory transport.

use anyhow::{bail, Context};
use clap::Parser;
use duel_engine::{
    logging::init_tracing,
    net::{ChannelTransport, ClientSession, Handshake, HostSession, HOST_SEAT},
    Command, MatchSnapshot, RulesEngine,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "duel-sim")]
#[command(about = "Simulate a replicated card duel between two greedy bots", long_about = None)]
struct Cli {
    /// Match seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many turns even without a winner
    #[arg(long, default_value_t = 60)]
    max_turns: u32,

    /// Tracing filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,

    /// Print the full match log at the end
    #[arg(long)]
    print_log: bool,
}

/// Pick the first useful command: finish an interaction, then play cards,
/// use specials, attack, and finally end the turn.
fn choose(commands: Vec<Command>) -> Option<Command> {
    let rank = |c: &Command| match c {
        Command::ChooseAllies { .. } | Command::ChooseTarget { .. } | Command::PickRevealed { .. } => 0,
        Command::PlayCard { .. } => 1,
        Command::UseSpecial { .. } => 2,
        Command::Attack { .. } => 3,
        Command::EndTurn => 4,
        _ => 5,
    };
    commands.into_iter().min_by_key(rank)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let (host_end, guest_end) = ChannelTransport::pair();
    let mut host = HostSession::new(host_end, Handshake::new("Host"));
    let mut client = ClientSession::connect(guest_end, Handshake::new("Guest"))?;

    host.next_frame().await.context("waiting for guest handshake")?;
    client.next_frame().await?;
    host.start_match(cli.seed)?;
    client.next_frame().await?;
    if !host.snapshot().started {
        bail!("match failed to start: {:?}", host.snapshot().log.back());
    }

    let step_limit = cli.max_turns as usize * 64;
    let mut steps = 0;
    while !host.snapshot().game_over && host.snapshot().turn <= cli.max_turns {
        steps += 1;
        if steps > step_limit {
            bail!("no progress after {steps} commands");
        }

        let snapshot = host.snapshot();
        let seat = snapshot.acting_seat();
        let Some(command) = choose(host.engine().legal_commands(snapshot)) else {
            info!(%seat, "no legal command, stopping");
            break;
        };

        if seat == HOST_SEAT {
            host.apply_local(command)?;
        } else {
            client.send_command(command)?;
            host.next_frame().await?;
        }
        client.next_frame().await?;

        if let Some(cue) = client.take_fresh_cast() {
            info!(caster = %cue.caster, card = %cue.card_name, "cast");
        }
    }

    report(host.snapshot(), client.snapshot(), cli.print_log);
    Ok(())
}

fn report(host: &MatchSnapshot, guest: &MatchSnapshot, print_log: bool) {
    if print_log {
        for line in host.log.iter() {
            println!("{line}");
        }
        println!();
    }

    match host.winner.filter(|_| host.game_over) {
        Some(winner) => println!(
            "{} wins on turn {} ({} commands)",
            host.players[winner].name, host.turn, host.version
        ),
        None => println!("No winner after {} turns", host.turn),
    }
    for (_, player) in host.players.iter() {
        println!(
            "  {:<8} life {:>3}  board {}  hand {}  deck {}",
            player.name,
            player.life,
            player.board.len(),
            player.hand.len(),
            player.deck.len()
        );
    }
    println!("Replicas in sync: {}", host == guest);
}
