use crate::board::Board;
use crate::debug_log;
use crate::driver::{
    GameInterface, LOAD_KEY, Notice, RESET_KEY, SAVE_KEY, UserAction, parse_key,
};
use crate::wordbank::{MAX_WORD_LEN, MIN_WORD_LEN};
use clap::Parser;
use crossterm::{cursor, execute, terminal};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const TITLE: &str = "HANGMAN";
const LABEL_WIDTH: usize = 9;

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the built-in list)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Save file used by the save and load keys
    #[arg(short = 's', long = "save")]
    pub save_path: Option<PathBuf>,

    /// Shortest word that can be drawn
    #[arg(long, default_value_t = MIN_WORD_LEN)]
    pub min_len: usize,

    /// Longest word that can be drawn
    #[arg(long, default_value_t = MAX_WORD_LEN)]
    pub max_len: usize,

    /// Line-based play instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Where to write the log
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Interpret one line of input. Only the first character counts, except for
/// the word `exit`.
pub fn parse_line(line: &str) -> Option<UserAction> {
    let input = line.trim();
    if input.eq_ignore_ascii_case("exit") {
        return Some(UserAction::Exit);
    }
    input
        .chars()
        .next()
        .and_then(parse_key)
        .map(UserAction::Command)
}

pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => Some(UserAction::Exit),
        Ok(_) => parse_line(&input),
        Err(e) => {
            log::warn!("failed to read input: {e}");
            Some(UserAction::Exit)
        }
    }
}

pub fn write_board<W: Write>(out: &mut W, board: &Board, notice: &Notice) -> io::Result<()> {
    let rule = "=".repeat(TITLE.len() + 6);
    writeln!(out, "{rule}")?;
    writeln!(out, "=  {TITLE}  =")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    writeln!(out, "{}", board.status_line())?;
    writeln!(out)?;
    for line in board.gallows() {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "| {:<LABEL_WIDTH$} |{}|",
        board.word_label(),
        board.word_text()
    )?;
    writeln!(out)?;

    for (label, letters) in board.letter_rows() {
        let cells: Vec<String> = letters.iter().map(char::to_string).collect();
        writeln!(out, "| {:<LABEL_WIDTH$} |{}|", label, cells.join("|"))?;
    }
    writeln!(out)?;

    if notice.is_error() {
        writeln!(out, "! {notice}")?;
    } else {
        writeln!(out, "{notice}")?;
    }
    writeln!(out)?;

    writeln!(out, "{SAVE_KEY}. Save")?;
    writeln!(out, "{LOAD_KEY}. Load")?;
    writeln!(out, "{RESET_KEY}. Reset")?;
    writeln!(out, "*. Guess a letter")?;
    writeln!(out, "exit. Quit")?;
    writeln!(out)?;
    out.flush()
}

/// Line-based implementation of [`GameInterface`].
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    writer: W,
    clear_screen: bool,
}

impl<R: BufRead> CliInterface<R> {
    /// Play on stdout, clearing the screen before each board.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            writer: io::stdout(),
            clear_screen: true,
        }
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_writer(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            clear_screen: false,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn draw(&mut self, board: &Board, notice: &Notice) -> io::Result<()> {
        if self.clear_screen {
            execute!(
                self.writer,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
        }
        write_board(&mut self.writer, board, notice)
    }

    fn write_exit_message(&mut self, board: &Board) -> io::Result<()> {
        writeln!(self.writer, "{}", board.status_line())?;
        writeln!(self.writer, "Thanks for playing!")?;
        self.writer.flush()
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn render(&mut self, board: &Board, notice: &Notice) {
        if let Err(e) = self.draw(board, notice) {
            debug_log!("CliInterface::render() - {}", e);
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_exit_message(&mut self, board: &Board) {
        if let Err(e) = self.write_exit_message(board) {
            log::warn!("could not write exit message: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Command;
    use crate::game_state::{GameState, GuessOutcome};
    use std::io::Cursor;

    fn render_to_string(state: &GameState, notice: &Notice) -> String {
        let mut out = Vec::new();
        write_board(&mut out, &Board::from(state), notice).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["hangman"]);
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.save_path, None);
        assert_eq!(cli.min_len, MIN_WORD_LEN);
        assert_eq!(cli.max_len, MAX_WORD_LEN);
        assert!(!cli.plain);
    }

    #[test]
    fn test_cli_with_options() {
        let cli = Cli::parse_from([
            "hangman", "-i", "words.txt", "--save", "game.json", "--min-len", "4", "--max-len",
            "8", "--plain",
        ]);
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
        assert_eq!(cli.save_path, Some(PathBuf::from("game.json")));
        assert_eq!(cli.min_len, 4);
        assert_eq!(cli.max_len, 8);
        assert!(cli.plain);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("1\n"), Some(UserAction::Command(Command::Save)));
        assert_eq!(parse_line("2"), Some(UserAction::Command(Command::Load)));
        assert_eq!(parse_line("3"), Some(UserAction::Command(Command::Reset)));
        assert_eq!(
            parse_line("  Apple\n"),
            Some(UserAction::Command(Command::Guess('a')))
        );
        assert_eq!(parse_line("EXIT\n"), Some(UserAction::Exit));
        assert_eq!(parse_line("\n"), None);
        assert_eq!(parse_line("?"), None);
    }

    #[test]
    fn test_read_action_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_action(&mut reader), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_action_sequence() {
        let mut reader = Cursor::new("e\n\n3\n");
        assert_eq!(
            read_action(&mut reader),
            Some(UserAction::Command(Command::Guess('e')))
        );
        assert_eq!(read_action(&mut reader), None);
        assert_eq!(
            read_action(&mut reader),
            Some(UserAction::Command(Command::Reset))
        );
        assert_eq!(read_action(&mut reader), Some(UserAction::Exit));
    }

    #[test]
    fn test_write_board_in_progress() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        state.guess('p');
        state.guess('z');
        let text = render_to_string(&state, &Notice::Guessed('z', GuessOutcome::Incorrect));
        assert!(text.starts_with("=============\n=  HANGMAN  =\n"));
        assert!(text.contains("5 limbs left!"));
        assert!(text.contains("| Secret    |_ p p _ _|"));
        assert!(text.contains("| Letters   |a|b|c|"));
        assert!(text.contains("No 'z' in the word."));
        assert!(!text.contains("apple"));
    }

    #[test]
    fn test_write_board_reveals_solution() {
        let mut state = GameState::with_secret_word("apple").unwrap();
        for c in "bcdfgh".chars() {
            state.guess(c);
        }
        let text = render_to_string(&state, &Notice::LoadFailed("bad".to_string()));
        assert!(text.contains("Game lost!"));
        assert!(text.contains("| Solution  |a p p l e|"));
        assert!(text.contains("! Load failed: bad"));
    }

    #[test]
    fn test_cli_interface_exit_message() {
        let mut interface = CliInterface::with_writer(Cursor::new(""), Vec::new());
        let mut state = GameState::with_secret_word("cat").unwrap();
        state.guess('z');
        interface.display_exit_message(&Board::from(&state));
        let text = String::from_utf8(interface.into_writer()).unwrap();
        assert_eq!(text, "5 limbs left!\nThanks for playing!\n");
    }

    /// Accepts a fixed number of bytes, then fails every write.
    struct FullWriter {
        room: usize,
        written: Vec<u8>,
    }

    impl Write for FullWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.room == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "no room"));
            }
            let n = buf.len().min(self.room);
            self.room -= n;
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_exit_message_stops_at_first_failed_write() {
        let writer = FullWriter {
            room: 3,
            written: Vec::new(),
        };
        let mut interface = CliInterface::with_writer(Cursor::new(""), writer);
        let board = Board::from(&GameState::with_secret_word("cat").unwrap());
        assert!(interface.write_exit_message(&board).is_err());
        interface.display_exit_message(&board);
        assert_eq!(interface.into_writer().written, b"6 l");
    }
}
