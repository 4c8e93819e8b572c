use anyhow::{Context, Result};
use othello_cli::{Session, Settings};
use othello_core::Game;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志（输出到 stderr，不打断棋盘显示）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("othello_cli=info".parse()?))
        .init();

    info!("黑白棋启动中...");

    let settings = Settings::load();

    // 可选参数：起始局面，例如 "8/8/8/3WB3/3BW3/8/8/8 b"
    let game = match std::env::args().nth(1) {
        Some(fen) => Game::from_fen(&fen).with_context(|| format!("Bad starting position {:?}", fen))?,
        None => Game::new(),
    };

    let mut session = Session::with_game(settings, game)?;
    let mut stdout = std::io::stdout();
    match session.run(BufReader::new(tokio::io::stdin()), &mut stdout).await? {
        Some(result) => info!("Finished: {}", result),
        None => info!("Game abandoned at {}", session.game().to_fen()),
    }

    Ok(())
}
