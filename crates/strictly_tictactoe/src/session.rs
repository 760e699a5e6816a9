//! Stateful game session: the only owner of the live board.
//!
//! Lifecycle: created fresh (empty board, X to move, in progress), mutated
//! only through [`GameSession::apply_move`], and discarded once a terminal
//! status is reached. Playing again means building a new session.

use crate::action::{Move, MoveError};
use crate::strategy::{self, Difficulty};
use crate::{Board, GameStatus, Player, Position, Square, invariants, rules, validation};
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

/// A coordinate as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordArg {
    /// Not supplied.
    #[default]
    Missing,
    /// An integer, possibly out of range.
    Index(i64),
    /// Supplied but not representable as an integer.
    Malformed,
}

impl From<Option<i64>> for CoordArg {
    fn from(value: Option<i64>) -> Self {
        value.map_or(CoordArg::Missing, CoordArg::Index)
    }
}

impl From<i64> for CoordArg {
    fn from(value: i64) -> Self {
        CoordArg::Index(value)
    }
}

/// Result of a move request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A mark was written to the board.
    Applied(MoveReport),
    /// Nothing changed: the game was already over, or no move was available.
    Unchanged(GameStatus),
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// The move just applied.
    pub last_move: Move,
    /// Status after the move.
    pub status: GameStatus,
    /// Whose turn follows.
    pub next_player: Player,
}

/// A rejected move request. The session is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// Player name other than `X` or `O`.
    #[display("Invalid player '{}'. Use 'X' or 'O'.", _0)]
    InvalidPlayer(#[error(not(source))] String),

    /// Off-board, occupied, out-of-turn or malformed coordinates.
    #[display("Invalid move: {}", reason)]
    InvalidMove {
        /// Why the move was rejected.
        #[error(not(source))]
        reason: MoveError,
        /// Squares that would have been accepted.
        legal_moves: Vec<Position>,
    },

    /// A human-controlled move arrived without row or column.
    #[display("Missing coordinates for player {}", player)]
    MissingCoordinates {
        /// The player who needs to supply a square.
        player: Player,
        /// Squares to choose from.
        legal_moves: Vec<Position>,
    },
}

/// A single game of tic-tac-toe against the automated player.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    to_move: Player,
    status: GameStatus,
    difficulty: Difficulty,
    automated: Player,
    history: Vec<Move>,
    rng: StdRng,
}

impl GameSession {
    /// Creates a fresh session whose random choices follow `seed`.
    #[instrument]
    pub fn new(difficulty: Difficulty, automated: Player, seed: u64) -> Self {
        Self::with_rng(difficulty, automated, StdRng::seed_from_u64(seed))
    }

    /// Creates a fresh session seeded from the operating system.
    #[instrument]
    pub fn from_entropy(difficulty: Difficulty, automated: Player) -> Self {
        Self::with_rng(difficulty, automated, StdRng::from_os_rng())
    }

    /// Creates a fresh session drawing randomness from `rng`.
    #[instrument(skip(rng))]
    pub fn with_rng(difficulty: Difficulty, automated: Player, rng: StdRng) -> Self {
        info!(%difficulty, automated = %automated, "Creating new game session");
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            difficulty,
            automated,
            history: Vec::new(),
            rng,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose turn it is. Frozen once the game is over.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Opponent difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The mark played by the engine.
    pub fn automated(&self) -> Player {
        self.automated
    }

    /// The mark played by the human.
    pub fn human(&self) -> Player {
        self.automated.opponent()
    }

    /// Moves applied so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Empty squares in row-major order.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.empty_cells()
    }

    /// Rendered board.
    pub fn render(&self) -> String {
        self.board.display()
    }

    /// Applies a move request as it arrives from the tool boundary.
    ///
    /// `player` defaults to the side to move. Missing coordinates are filled
    /// in by the opponent strategy for the automated player and rejected for
    /// the human. Once the game is over every request returns
    /// [`Transition::Unchanged`].
    #[instrument(skip(self), fields(status = %self.status, to_move = %self.to_move))]
    pub fn apply_move(
        &mut self,
        player: Option<&str>,
        row: CoordArg,
        col: CoordArg,
    ) -> Result<Transition, SessionError> {
        if self.status.is_terminal() {
            debug!("Game already over, ignoring move request");
            return Ok(Transition::Unchanged(self.status));
        }

        let player = match player {
            None => self.to_move,
            Some(raw) => raw.parse::<Player>().map_err(|_| {
                warn!(player = raw, "Rejected unknown player");
                SessionError::InvalidPlayer(raw.to_string())
            })?,
        };

        self.apply(player, row, col)
    }

    /// Places `player`'s mark at `(row, col)`.
    pub fn play(&mut self, player: Player, row: i64, col: i64) -> Result<Transition, SessionError> {
        self.apply(player, row.into(), col.into())
    }

    /// Lets the engine move for the automated player.
    pub fn play_automated(&mut self) -> Result<Transition, SessionError> {
        self.apply(self.automated, CoordArg::Missing, CoordArg::Missing)
    }

    fn reject(&self, reason: MoveError) -> SessionError {
        warn!(%reason, "Rejected move");
        SessionError::InvalidMove {
            reason,
            legal_moves: self.legal_moves(),
        }
    }

    #[instrument(skip(self))]
    fn apply(
        &mut self,
        player: Player,
        row: CoordArg,
        col: CoordArg,
    ) -> Result<Transition, SessionError> {
        if self.status.is_terminal() {
            return Ok(Transition::Unchanged(self.status));
        }
        if player != self.to_move {
            return Err(self.reject(MoveError::WrongTurn(player)));
        }

        let (row, col) = match (row, col) {
            (CoordArg::Index(row), CoordArg::Index(col)) => (row, col),
            (CoordArg::Missing, _) | (_, CoordArg::Missing) if player == self.automated => {
                match strategy::choose_move(&self.board, player, self.difficulty, &mut self.rng) {
                    Some(pos) => {
                        let (row, col) = pos.coords();
                        (row as i64, col as i64)
                    }
                    None => {
                        debug!("No move available for automated player");
                        return Ok(Transition::Unchanged(self.status));
                    }
                }
            }
            (CoordArg::Missing, _) | (_, CoordArg::Missing) => {
                debug!(player = %player, "Human move without coordinates");
                return Err(SessionError::MissingCoordinates {
                    player,
                    legal_moves: self.legal_moves(),
                });
            }
            _ => return Err(self.reject(MoveError::Malformed)),
        };

        let pos = validation::check_move(&self.board, self.status, row, col)
            .map_err(|reason| self.reject(reason))?;

        self.board.place(pos, Square::Occupied(player));
        let last_move = Move::new(player, pos);
        self.history.push(last_move);
        self.to_move = player.opponent();
        self.status = rules::evaluate(&self.board);
        invariants::assert_invariants(self);

        info!(
            mv = %last_move,
            status = %self.status,
            next_player = %self.to_move,
            "Move applied"
        );

        Ok(Transition::Applied(MoveReport {
            last_move,
            status: self.status,
            next_player: self.to_move,
        }))
    }
}
