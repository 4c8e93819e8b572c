//! 终端对局会话
//!
//! 持有当前对局，轮到 AI 时在阻塞线程池中计算走法，输入循环不被搜索阻塞。

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use othello_ai::Opponent;
use othello_core::{Action, Game, GameResult, GameStatus, OthelloError, Position, Side};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::settings::{PlayerKind, Settings};

/// 人类玩家输入的指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Action),
    Hint,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, OthelloError> {
        match line.trim().to_ascii_lowercase().as_str() {
            "hint" | "?" => Ok(Command::Hint),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => other.parse().map(Command::Play),
        }
    }
}

/// 对局会话
pub struct Session {
    game: Game,
    settings: Settings,
    /// 有 AI 玩家时在创建会话时构建，否则在第一次请求提示时构建
    opponent: Option<Arc<dyn Opponent>>,
}

impl Session {
    /// 从初始局面开始
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_game(settings, Game::new())
    }

    /// 从指定局面开始
    pub fn with_game(settings: Settings, game: Game) -> Result<Self> {
        let mut session = Self {
            game,
            settings,
            opponent: None,
        };
        if session.has_ai_player() {
            session.opponent()?;
        }
        Ok(session)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// 是否有一方由 AI 操作
    pub fn has_ai_player(&self) -> bool {
        [Side::Black, Side::White]
            .into_iter()
            .any(|side| self.settings.player(side) == PlayerKind::Ai)
    }

    fn opponent(&mut self) -> Result<Arc<dyn Opponent>> {
        if let Some(opponent) = &self.opponent {
            return Ok(Arc::clone(opponent));
        }

        let opponent: Arc<dyn Opponent> = self
            .settings
            .backend
            .build(self.settings.ai.clone(), None)
            .context("Failed to set up AI opponent")?
            .into();
        info!(
            "AI opponent: {} (depth {})",
            opponent.name(),
            self.settings.ai.search_depth()
        );

        self.opponent = Some(Arc::clone(&opponent));
        Ok(opponent)
    }

    /// 为当前走子方计算一步；无合法走法时为停着
    pub async fn ai_action(&mut self) -> Result<Action> {
        let opponent = self.opponent()?;
        let board = self.game.board().clone();
        let side = self.game.current_turn();
        let started = Instant::now();

        let chosen = tokio::task::spawn_blocking(move || opponent.find_best_move(&board, side))
            .await
            .context("AI task panicked")??;

        info!("{} thought for {:?}: {:?}", side, started.elapsed(), chosen);
        Ok(chosen.map_or(Action::Pass, Action::Place))
    }

    /// AI 为当前走子方走一步
    pub async fn step_ai(&mut self) -> Result<Action> {
        let action = self.ai_action().await?;
        self.game.act(action)?;
        Ok(action)
    }

    /// 运行对局直到结束；人类退出或输入结束时返回 None
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<Option<GameResult>>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        loop {
            match self.game.status() {
                GameStatus::Finished(result) => {
                    write!(output, "{}", self.game.board())?;
                    writeln!(output, "Game over: {}", result)?;
                    info!("Game over: {}", result);
                    return Ok(Some(result));
                }
                GameStatus::MustPass(side) => {
                    writeln!(output, "{} has no legal move and passes", side)?;
                    self.game.pass()?;
                }
                GameStatus::ToMove(side) => match self.settings.player(side) {
                    PlayerKind::Ai => {
                        let action = self.step_ai().await?;
                        writeln!(output, "{} plays {}", side, action)?;
                    }
                    PlayerKind::Human => {
                        write!(output, "{}", self.game.board())?;
                        if self.settings.show_hints {
                            writeln!(output, "Legal moves: {}", format_moves(&self.game.valid_moves()))?;
                        }
                        write!(output, "{} to move> ", side)?;
                        output.flush()?;

                        let Some(line) = lines.next_line().await? else {
                            return Ok(None);
                        };

                        match Command::parse(&line) {
                            Ok(Command::Quit) => return Ok(None),
                            Ok(Command::Hint) => match self.ai_action().await {
                                Ok(hint) => writeln!(output, "Hint: {}", hint)?,
                                Err(e) => writeln!(output, "Hint unavailable: {:#}", e)?,
                            },
                            Ok(Command::Play(action)) => match self.game.act(action) {
                                Ok(flips) => {
                                    writeln!(output, "{} plays {}, flipping {}", side, action, flips.len())?
                                }
                                Err(e) => writeln!(output, "{}", e)?,
                            },
                            Err(e) => writeln!(output, "{}", e)?,
                        }
                    }
                },
            }
        }
    }
}

fn format_moves(moves: &[Position]) -> String {
    moves
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
