//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current position, routes `go` requests
//! to the selected engine implementation, and emits protocol-compliant
//! output. The engine keeps positions relative to the side to move, so this
//! layer owns the actual-color bookkeeping: coordinates are flipped through
//! the 180-degree mirror whenever the current perspective belongs to black.

use std::io::{self, BufRead, Write};

use crate::engines::engine_iterative::IterativeEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::{Color, Move, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_apply::{apply_move, mirror_square, rotate};
use crate::utils::coordinates::{parse_coordinates, render_coordinates};
use crate::utils::render_board::render_board;

const UCI_ENGINE_NAME: &str = "Mailbox Chess";
const UCI_ENGINE_AUTHOR: &str = "the mailbox_chess authors";

const DEFAULT_SKILL_LEVEL: u8 = 5;

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct UciState {
    game: GameState,
    color: Color,
    engine: Box<dyn Engine>,
    skill_level: u8,
    fixed_depth_override: Option<u8>,
    hash_mb: usize,
    debug_mode: bool,
}

impl UciState {
    fn new() -> Self {
        UciState {
            game: GameState::new_game(),
            color: Color::Light,
            engine: build_engine(DEFAULT_SKILL_LEVEL),
            skill_level: DEFAULT_SKILL_LEVEL,
            fixed_depth_override: None,
            hash_mb: 0,
            debug_mode: false,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(
                    out,
                    "option name Skill Level type spin default {} min 1 max 10",
                    DEFAULT_SKILL_LEVEL
                )?;
                writeln!(
                    out,
                    "option name FixedDepth type spin default 0 min 0 max 64"
                )?;
                writeln!(out, "option name Hash type spin default 16 min 1 max 1024")?;
                writeln!(
                    out,
                    "option name TimeStrategy type combo default adaptive var adaptive var fraction20"
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {}", err)?;
                }
            }
            "ucinewgame" => {
                self.game = GameState::new_game();
                self.color = Color::Light;
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out) {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            }
            "d" => {
                writeln!(out, "{}", render_board(&self.game, self.color))?;
                writeln!(out, "fen: {}", self.game.to_fen(self.color))?;
            }
            "stop" => {
                // Search is synchronous; there is nothing running to stop.
            }
            "debug" => {
                let mode = parts.next().unwrap_or_default();
                self.debug_mode = mode.eq_ignore_ascii_case("on");
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                // Unknown commands are ignored for UCI compatibility.
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace();
        let _ = tokens.next(); // setoption

        let mut name_tokens = Vec::<String>::new();
        let mut value_tokens = Vec::<String>::new();
        let mut mode = "";

        for tok in tokens {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok.to_owned()),
                _ if mode == "value" => value_tokens.push(tok.to_owned()),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Skill Level") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid Skill Level value '{}'", value))?;
            self.skill_level = parsed;
            self.engine = build_engine(self.skill_level);
            if self.hash_mb > 0 {
                self.engine.set_option("Hash", &self.hash_mb.to_string())?;
            }
            self.engine.new_game();
        } else if name.eq_ignore_ascii_case("FixedDepth") {
            let parsed = value
                .parse::<u8>()
                .map_err(|_| format!("invalid FixedDepth value '{}'", value))?;
            self.fixed_depth_override = if parsed == 0 { None } else { Some(parsed) };
        } else if name.eq_ignore_ascii_case("Hash") {
            let parsed = value
                .parse::<usize>()
                .map_err(|_| format!("invalid Hash value '{}'", value))?;
            self.hash_mb = parsed.max(1);
            self.engine.set_option("Hash", &self.hash_mb.to_string())?;
        } else {
            self.engine.set_option(&name, &value)?;
        }

        Ok(())
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace().peekable();
        let _ = tokens.next(); // "position"

        match tokens.next() {
            Some("startpos") => {
                self.game = GameState::new_game();
                self.color = Color::Light;
            }
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(next) = tokens.peek() {
                    if *next == "moves" {
                        break;
                    }
                    fen_parts.push(tokens.next().unwrap_or_default());
                }
                if fen_parts.is_empty() {
                    return Err("missing FEN after 'position fen'".to_owned());
                }
                let (game, color) = GameState::from_fen(&fen_parts.join(" "))?;
                self.game = game;
                self.color = color;
            }
            Some(other) => return Err(format!("unsupported position token '{}'", other)),
            None => return Err("incomplete position command".to_owned()),
        }

        if tokens.peek().copied() == Some("moves") {
            let _ = tokens.next();
            for lan in tokens {
                self.play_lan_move(lan)?;
            }
        }

        // The castling transit marker only matters for the move that was
        // just legality-checked; a fresh position starts without one.
        self.game.king_passant = None;
        Ok(())
    }

    /// Apply one long-algebraic move from the GUI. Moves arrive in absolute
    /// coordinates and are assumed legal; the board rotates after every move
    /// so the next one is again played by the side on move.
    fn play_lan_move(&mut self, lan: &str) -> Result<(), String> {
        if lan.len() != 4 && lan.len() != 5 {
            return Err(format!("invalid move '{}'", lan));
        }
        let (from_part, to_part) = match (lan.get(0..2), lan.get(2..4)) {
            (Some(from_part), Some(to_part)) => (from_part, to_part),
            _ => return Err(format!("invalid move '{}'", lan)),
        };
        let mut from = parse_coordinates(from_part)?;
        let mut to = parse_coordinates(to_part)?;
        let promotion = match lan.as_bytes().get(4) {
            None => None,
            Some(&symbol) => Some(
                PieceKind::from_ascii(symbol)
                    .ok_or_else(|| format!("invalid promotion piece '{}'", symbol as char))?,
            ),
        };

        if self.color == Color::Dark {
            from = mirror_square(from);
            to = mirror_square(to);
        }

        let mv = Move {
            from,
            to,
            captured: PieceKind::from_ascii(self.game.piece_at(to)),
            promotion,
        };
        self.game = rotate(&apply_move(&self.game, mv));
        self.color = self.color.opposite();
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> Result<(), String> {
        let mut params = parse_go_params(line);
        if params.depth.is_none() {
            params.depth = self.fixed_depth_override;
        }

        let result = self.engine.choose_move(&self.game, self.color, &params)?;

        for info in &result.info_lines {
            writeln!(out, "{}", info).map_err(|e| e.to_string())?;
        }

        match result.best_move {
            Some(best_move) => {
                let lan = self.move_to_lan(best_move)?;
                writeln!(out, "bestmove {}", lan).map_err(|e| e.to_string())?;
            }
            None => {
                writeln!(out, "bestmove 0000").map_err(|e| e.to_string())?;
            }
        }

        Ok(())
    }

    /// Render a perspective-relative move in absolute long algebraic.
    fn move_to_lan(&self, mv: Move) -> Result<String, String> {
        let (from, to) = if self.color == Color::Dark {
            (mirror_square(mv.from), mirror_square(mv.to))
        } else {
            (mv.from, mv.to)
        };
        let mut lan = format!("{}{}", render_coordinates(from)?, render_coordinates(to)?);
        if let Some(promotion) = mv.promotion {
            lan.push(char::from(promotion.to_ascii().to_ascii_lowercase()));
        }
        Ok(lan)
    }
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut i = 0usize;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                params.depth = tokens.get(i).and_then(|x| x.parse::<u8>().ok());
            }
            "movetime" => {
                i += 1;
                params.movetime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "wtime" => {
                i += 1;
                params.wtime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "btime" => {
                i += 1;
                params.btime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "winc" => {
                i += 1;
                params.winc_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "binc" => {
                i += 1;
                params.binc_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "movestogo" => {
                i += 1;
                params.movestogo = tokens.get(i).and_then(|x| x.parse::<u16>().ok());
            }
            "infinite" => {
                params.infinite = true;
            }
            _ => {}
        }
        i += 1;
    }
    params
}

fn build_engine(skill_level: u8) -> Box<dyn Engine> {
    match skill_level {
        1 => Box::new(RandomEngine::new()),
        2 => Box::new(IterativeEngine::new(1)),
        3 => Box::new(IterativeEngine::new(2)),
        4 => Box::new(IterativeEngine::new(3)),
        5 => Box::new(IterativeEngine::new(4)),
        6 => Box::new(IterativeEngine::new(5)),
        _ => Box::new(IterativeEngine::new(6)),
    }
}
