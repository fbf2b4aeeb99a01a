use anyhow::{Context, ensure};
use hangman::cli::{CliInterface, parse_cli};
use hangman::persistence::{SaveStore, default_save_path};
use hangman::tui::TuiInterface;
use hangman::wordbank::{EMBEDDED_WORDBANK, WordBank, load_wordbank_from_str};
use hangman::{GameState, game_loop, logging};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init(&log_path) {
        eprintln!("Logging disabled: could not open '{}': {e}", log_path.display());
    }

    ensure!(cli.min_len > 0, "--min-len must be at least 1");
    ensure!(
        cli.min_len <= cli.max_len,
        "--min-len ({}) is larger than --max-len ({})",
        cli.min_len,
        cli.max_len
    );

    let bank = match &cli.wordbank_path {
        Some(path) => WordBank::load(path, cli.min_len, cli.max_len),
        None => WordBank::new(
            load_wordbank_from_str(EMBEDDED_WORDBANK),
            cli.min_len,
            cli.max_len,
        ),
    }
    .context("cannot start a game without a word list")?;
    log::info!("loaded {} words", bank.len());

    let store = SaveStore::new(cli.save_path.clone().unwrap_or_else(default_save_path));
    let state = GameState::new_round(&bank)?;

    if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(state, &bank, &store, &mut interface);
    } else {
        let mut interface = TuiInterface::new().context("failed to set up the terminal")?;
        game_loop(state, &bank, &store, &mut interface);
    }

    log::info!("exiting");
    Ok(())
}
