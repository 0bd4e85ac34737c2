use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};

use premove::board::cozy::Position;
use premove::session::GameSession;
use premove::submit::{GameOutcome, GameSnapshot, GameStatus, MoveReply, MoveSubmitter, SubmitError};
use premove::types::{Premove, Side};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play against a random mover with premoves", long_about = None)]
struct Args {
    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Random seed for the opponent
    #[arg(long, default_value_t = 1u64)]
    seed: u64,

    /// Chance (percent) that the opponent goes into the tank instead of
    /// replying immediately, leaving room to queue premoves
    #[arg(long, default_value_t = 60)]
    think_pct: u32,
}

/// Stands in for the remote move service: commits the user's move on a local
/// board and answers with a seeded random reply, the way the real service
/// answers with the engine's. A deferred reply models the engine thinking;
/// `poll` delivers it, like refetching the game from the server.
struct LocalGame {
    position: Position,
    rng: SmallRng,
    pending_reply: Option<Premove>,
    think_pct: u32,
}

impl LocalGame {
    fn new(position: Position, seed: u64, think_pct: u32) -> Self {
        Self { position, rng: SmallRng::seed_from_u64(seed), pending_reply: None, think_pct }
    }

    fn standing(&self) -> (GameStatus, Option<GameOutcome>) {
        if !self.position.legal().is_empty() {
            return (GameStatus::Active, None);
        }
        if !self.position.in_check() {
            return (GameStatus::Finished, Some(GameOutcome::Draw));
        }
        let outcome = match self.position.side_to_move() {
            Side::White => GameOutcome::BlackWin,
            Side::Black => GameOutcome::WhiteWin,
        };
        (GameStatus::Finished, Some(outcome))
    }

    fn snapshot(&self, game_id: &str) -> GameSnapshot {
        let (status, result) = self.standing();
        GameSnapshot {
            game_id: game_id.to_string(),
            current_position: self.position.fen(),
            status,
            turn: self.position.side_to_move(),
            result,
        }
    }

    /// Deliver a deferred opponent reply, if one is pending.
    fn poll(&mut self, game_id: &str) -> Option<GameSnapshot> {
        let reply = self.pending_reply.take()?;
        if let Some(next) = self.position.apply(&reply) {
            println!("opponent plays: {reply}");
            self.position = next;
        }
        Some(self.snapshot(game_id))
    }

    fn pick_reply(&mut self) -> Option<Premove> {
        let moves = self.position.legal();
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.gen_range(0..moves.len())])
    }
}

#[async_trait]
impl MoveSubmitter for LocalGame {
    async fn submit_move(&mut self, _game_id: &str, notation: &str)
        -> Result<MoveReply, SubmitError>
    {
        let mv = Premove::parse(notation)
            .ok_or_else(|| SubmitError::Rejected(format!("unparseable move: {notation}")))?;
        let next = self.position.apply(&mv)
            .ok_or_else(|| SubmitError::Rejected(format!("illegal move: {notation}")))?;
        self.position = next;
        let mut last_moves = vec![notation.to_string()];

        let thinking = self.rng.gen_range(0..100) < self.think_pct;
        if let Some(reply) = self.pick_reply() {
            if thinking {
                self.pending_reply = Some(reply);
            } else {
                if let Some(after) = self.position.apply(&reply) {
                    println!("opponent plays: {reply}");
                    self.position = after;
                }
                last_moves.push(reply.notation());
            }
        }

        let (status, result) = self.standing();
        Ok(MoveReply {
            current_position: self.position.fen(),
            status,
            turn: self.position.side_to_move(),
            result,
            last_moves,
        })
    }
}

fn print_board(fen: &str) {
    let placement = fen.split_whitespace().next().unwrap_or("");
    for (i, row) in placement.split('/').enumerate() {
        print!("{} ", 8 - i);
        for c in row.chars() {
            match c.to_digit(10) {
                Some(n) => {
                    for _ in 0..n {
                        print!(" .");
                    }
                }
                None => print!(" {c}"),
            }
        }
        println!();
    }
    println!("   a b c d e f g h");
}

fn render(session: &GameSession<LocalGame>) {
    let Some(fen) = session.display_position() else { return };
    println!();
    print_board(fen);
    if !session.premoves().is_empty() {
        let queued: Vec<String> = session.premoves().iter().map(|m| m.notation()).collect();
        println!("premoves: {}", queued.join(" "));
    }
}

fn report_result(game: &GameSnapshot) {
    match game.result {
        Some(GameOutcome::WhiteWin) => println!("\nCheckmate! You win!"),
        Some(GameOutcome::BlackWin) => println!("\nCheckmate! The opponent wins!"),
        Some(GameOutcome::Draw) => println!("\nGame drawn!"),
        None => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = match &args.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };
    let game_id = "local";

    let local = LocalGame::new(start.clone(), args.seed, args.think_pct.min(100));
    let opening = local.snapshot(game_id);

    let mut session = GameSession::new(
        Side::White,
        local,
        Box::new(|_reply: &MoveReply| {}),
        Box::new(|message: &str| println!("move failed: {message}")),
    );
    session.update_game(opening);

    println!("You are white. Type moves like e2e4 (e7e8q to promote).");
    println!("Moves typed while the opponent thinks are queued as premoves.");
    println!("Press enter to wait for the opponent; 'cancel' clears premoves; 'quit' exits.");

    loop {
        render(&session);
        match session.game() {
            Some(game) if game.is_active() => {}
            Some(game) => {
                report_result(game);
                break;
            }
            None => break,
        }

        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "quit" => break,
            "cancel" => session.cancel_premoves(),
            "" => {
                // Wait: the opponent finishes thinking, if it was.
                if let Some(snapshot) = session.submitter_mut().poll(game_id) {
                    session.update_game(snapshot);
                } else {
                    println!("nothing to wait for");
                }
            }
            _ => match Premove::parse(input) {
                Some(mv) => {
                    if !session.add_premove(mv) {
                        println!("illegal move: {input}");
                    }
                }
                None => println!("could not read '{input}' (expected e2e4 style)"),
            },
        }

        session.pump().await;
    }

    Ok(())
}
