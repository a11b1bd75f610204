//! Async game loop runner with a command channel.
//!
//! [`run_game_loop`] owns the [`Game`] on a single task and multiplexes a
//! fixed-interval ticker with incoming [`Command`]s, so all mutation stays
//! on one logical thread. The ticker branch is disabled while the game is
//! not playing; resuming or starting re-arms it from the current instant.
//!
//! [`GameHandle`] is the cloneable client. Every method sends one command
//! and waits for its reply.

use std::time::Duration;

use ramen_kitchen::CookOutcome;
use ramen_types::{GameSnapshot, IngredientId, MenuEntry, MenuId, Millis};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::GameError;
use crate::game::{Game, ServeOutcome};

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 64;

/// Errors returned by [`GameHandle`] calls.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The game loop has stopped.
    #[error("game loop is not running")]
    Closed,

    /// The game rejected the command.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The loop answered with a reply of the wrong kind.
    #[error("unexpected reply to {command}")]
    UnexpectedReply {
        /// The command that was sent.
        command: &'static str,
    },
}

/// A player or control action for the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Begin a new session.
    StartGame,
    /// Select a pot.
    SelectPot(usize),
    /// Clear the pot selection.
    DeselectPot,
    /// Add an ingredient to the selected pot.
    AddIngredient(IngredientId),
    /// Commit the selected pot to a recipe.
    ConfirmCook(MenuId),
    /// Serve the dish in a pot.
    TryServe(usize),
    /// Freeze the session.
    Pause,
    /// Unfreeze the session.
    Resume,
    /// Finalise the session and return to the title screen.
    GoToMenu,
    /// Buy a menu.
    UnlockMenu(MenuId),
    /// Read the full presentation view.
    Snapshot,
    /// Read the menu board.
    MenuBoard,
    /// Stop the loop.
    Shutdown,
}

impl Command {
    /// Short label used in logs and errors.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StartGame => "start_game",
            Self::SelectPot(_) => "select_pot",
            Self::DeselectPot => "deselect_pot",
            Self::AddIngredient(_) => "add_ingredient",
            Self::ConfirmCook(_) => "confirm_cook",
            Self::TryServe(_) => "try_serve",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::GoToMenu => "go_to_menu",
            Self::UnlockMenu(_) => "unlock_menu",
            Self::Snapshot => "snapshot",
            Self::MenuBoard => "menu_board",
            Self::Shutdown => "shutdown",
        }
    }
}

/// The loop's answer to a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The command succeeded with nothing to report.
    Done,
    /// Result of an ingredient or confirm.
    Cook(CookOutcome),
    /// Result of a serve.
    Served(Box<ServeOutcome>),
    /// Resumed after shifting timers by this many milliseconds.
    Resumed(Millis),
    /// A menu was bought for this cost.
    Unlocked(u64),
    /// The presentation view.
    Snapshot(Box<GameSnapshot>),
    /// The menu board.
    MenuBoard(Vec<MenuEntry>),
}

/// A command plus the channel its reply goes back on.
#[derive(Debug)]
pub struct Request {
    /// The action to run.
    pub command: Command,
    /// Where the result is sent.
    pub reply: oneshot::Sender<Result<Reply, GameError>>,
}

/// Run `command` against `game`.
///
/// # Errors
///
/// Returns the [`GameError`] the game raised.
pub fn dispatch(game: &mut Game, command: Command) -> Result<Reply, GameError> {
    match command {
        Command::StartGame => game.start_game().map(|()| Reply::Done),
        Command::SelectPot(index) => game.select_pot(index).map(|()| Reply::Done),
        Command::DeselectPot => {
            game.deselect_pot();
            Ok(Reply::Done)
        }
        Command::AddIngredient(ingredient) => game.add_ingredient(&ingredient).map(Reply::Cook),
        Command::ConfirmCook(menu) => game.confirm_cook(&menu).map(Reply::Cook),
        Command::TryServe(pot) => game
            .try_serve(pot)
            .map(|outcome| Reply::Served(Box::new(outcome))),
        Command::Pause => game.pause().map(|()| Reply::Done),
        Command::Resume => game.resume().map(Reply::Resumed),
        Command::GoToMenu | Command::Shutdown => {
            game.go_to_menu();
            Ok(Reply::Done)
        }
        Command::UnlockMenu(menu) => game.unlock_menu(&menu).map(Reply::Unlocked),
        Command::Snapshot => Ok(Reply::Snapshot(Box::new(game.snapshot()))),
        Command::MenuBoard => Ok(Reply::MenuBoard(game.menu_board())),
    }
}

/// Drive `game` until [`Command::Shutdown`] arrives or every
/// [`GameHandle`] is dropped. A session still running at shutdown is
/// finalised and persisted. Returns the game for inspection.
pub async fn run_game_loop(
    mut game: Game,
    mut commands: mpsc::Receiver<Request>,
    tick_interval: Duration,
) -> Game {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        tick_interval_ms = u64::try_from(tick_interval.as_millis()).unwrap_or(u64::MAX),
        "Game loop starting"
    );

    loop {
        tokio::select! {
            _ = ticker.tick(), if game.is_playing() => {
                game.tick();
            }
            request = commands.recv() => {
                let Some(Request { command, reply }) = request else {
                    debug!("All handles dropped");
                    break;
                };
                let label = command.label();
                let shutdown = command == Command::Shutdown;
                let was_playing = game.is_playing();

                let result = dispatch(&mut game, command);
                if !was_playing && game.is_playing() {
                    ticker.reset();
                }
                if reply.send(result).is_err() {
                    debug!(command = label, "Caller dropped the reply");
                }
                if shutdown {
                    break;
                }
            }
        }
    }

    if game.state().in_session() {
        game.go_to_menu();
    }
    info!(state = %game.state(), "Game loop stopped");
    game
}

/// Spawn [`run_game_loop`] on the current runtime and return a handle to it.
pub fn spawn_game(game: Game, tick_interval: Duration) -> (GameHandle, JoinHandle<Game>) {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(run_game_loop(game, rx, tick_interval));
    (GameHandle { tx }, task)
}

/// Cloneable client for a running game loop.
#[derive(Debug, Clone)]
pub struct GameHandle {
    tx: mpsc::Sender<Request>,
}

impl GameHandle {
    /// Wrap the sending half of a command channel.
    pub const fn new(tx: mpsc::Sender<Request>) -> Self {
        Self { tx }
    }

    /// Send one command and wait for its reply.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Closed`] if the loop is gone, or
    /// [`RunnerError::Game`] if the game rejected the command.
    pub async fn request(&self, command: Command) -> Result<Reply, RunnerError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request { command, reply })
            .await
            .map_err(|_closed| RunnerError::Closed)?;
        let result = rx.await.map_err(|_closed| RunnerError::Closed)?;
        Ok(result?)
    }

    /// Begin a new session.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn start_game(&self) -> Result<(), RunnerError> {
        self.expect_done(Command::StartGame).await
    }

    /// Select a pot.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn select_pot(&self, index: usize) -> Result<(), RunnerError> {
        self.expect_done(Command::SelectPot(index)).await
    }

    /// Clear the pot selection.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn deselect_pot(&self) -> Result<(), RunnerError> {
        self.expect_done(Command::DeselectPot).await
    }

    /// Add an ingredient to the selected pot.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn add_ingredient(&self, ingredient: IngredientId) -> Result<CookOutcome, RunnerError> {
        match self.request(Command::AddIngredient(ingredient)).await? {
            Reply::Cook(outcome) => Ok(outcome),
            _ => Err(RunnerError::UnexpectedReply {
                command: "add_ingredient",
            }),
        }
    }

    /// Commit the selected pot to a recipe.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn confirm_cook(&self, menu: MenuId) -> Result<CookOutcome, RunnerError> {
        match self.request(Command::ConfirmCook(menu)).await? {
            Reply::Cook(outcome) => Ok(outcome),
            _ => Err(RunnerError::UnexpectedReply {
                command: "confirm_cook",
            }),
        }
    }

    /// Serve the dish in a pot.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn try_serve(&self, pot: usize) -> Result<ServeOutcome, RunnerError> {
        match self.request(Command::TryServe(pot)).await? {
            Reply::Served(outcome) => Ok(*outcome),
            _ => Err(RunnerError::UnexpectedReply {
                command: "try_serve",
            }),
        }
    }

    /// Freeze the session.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn pause(&self) -> Result<(), RunnerError> {
        self.expect_done(Command::Pause).await
    }

    /// Unfreeze the session. Returns the paused duration.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn resume(&self) -> Result<Millis, RunnerError> {
        match self.request(Command::Resume).await? {
            Reply::Resumed(shift) => Ok(shift),
            _ => Err(RunnerError::UnexpectedReply { command: "resume" }),
        }
    }

    /// Finalise the session and return to the title screen.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn go_to_menu(&self) -> Result<(), RunnerError> {
        self.expect_done(Command::GoToMenu).await
    }

    /// Buy a menu. Returns the cost paid.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn unlock_menu(&self, menu: MenuId) -> Result<u64, RunnerError> {
        match self.request(Command::UnlockMenu(menu)).await? {
            Reply::Unlocked(cost) => Ok(cost),
            _ => Err(RunnerError::UnexpectedReply {
                command: "unlock_menu",
            }),
        }
    }

    /// Read the presentation view.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn snapshot(&self) -> Result<GameSnapshot, RunnerError> {
        match self.request(Command::Snapshot).await? {
            Reply::Snapshot(snapshot) => Ok(*snapshot),
            _ => Err(RunnerError::UnexpectedReply {
                command: "snapshot",
            }),
        }
    }

    /// Read the menu board.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn menu_board(&self) -> Result<Vec<MenuEntry>, RunnerError> {
        match self.request(Command::MenuBoard).await? {
            Reply::MenuBoard(board) => Ok(board),
            _ => Err(RunnerError::UnexpectedReply {
                command: "menu_board",
            }),
        }
    }

    /// Stop the loop.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn shutdown(&self) -> Result<(), RunnerError> {
        self.expect_done(Command::Shutdown).await
    }

    async fn expect_done(&self, command: Command) -> Result<(), RunnerError> {
        let label = command.label();
        match self.request(command).await? {
            Reply::Done => Ok(()),
            _ => Err(RunnerError::UnexpectedReply { command: label }),
        }
    }
}
