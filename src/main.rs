//! Squares entry point
//!
//! Native: a terminal game over a JSON file store.
//! wasm32: the page drives `squares::platform::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::error::Error;
    use std::io::{self, BufRead, Write};
    use std::rc::Rc;

    use squares::{Config, FileStorage, GameSession, MoveOutcome};

    /// One line of user input
    #[derive(Debug, PartialEq, Eq)]
    pub enum Command {
        /// 0-based square index
        Play(usize),
        Restart,
        GoTo(usize),
        History,
        Namespace(Option<String>),
        Help,
        Quit,
    }

    pub fn parse_command(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        let head = words.next()?;
        let arg = words.next();
        if words.next().is_some() {
            return None;
        }
        match (head, arg) {
            (n, None) if n.len() == 1 => match n.parse::<usize>() {
                Ok(square @ 1..=9) => Some(Command::Play(square - 1)),
                _ => match n {
                    "r" => Some(Command::Restart),
                    "h" => Some(Command::History),
                    "q" => Some(Command::Quit),
                    "?" => Some(Command::Help),
                    _ => None,
                },
            },
            ("restart", None) => Some(Command::Restart),
            ("history", None) => Some(Command::History),
            ("quit" | "exit", None) => Some(Command::Quit),
            ("help", None) => Some(Command::Help),
            ("goto" | "g", Some(step)) => step.parse().ok().map(Command::GoTo),
            ("ns", ns) => Some(Command::Namespace(ns.map(str::to_string))),
            _ => None,
        }
    }

    const HELP: &str = "\
Commands:
  1-9        play that square
  goto N     show the board after move N (0 = start)
  history    list the recorded moves
  restart    start a new game
  ns [NAME]  move this game under namespace NAME (none to clear)
  quit       leave (the game is saved)";

    fn show(session: &GameSession<Rc<FileStorage>>) {
        println!("\n{}\n\n{}", session.board(), session.status());
    }

    pub fn run(config: Config) -> Result<(), Box<dyn Error>> {
        let store = Rc::new(FileStorage::open(&config.store_path)?);
        let mut session = GameSession::open(store, config.session_keys())?;

        println!("Squares - type `help` for commands");
        show(&session);

        let stdin = io::stdin();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Some(Command::Play(index)) => match session.select_square(index)? {
                    MoveOutcome::Played { .. } => show(&session),
                    MoveOutcome::Rejected(reason) => println!("Can't play there: {reason}"),
                },
                Some(Command::Restart) => {
                    session.restart()?;
                    show(&session);
                }
                Some(Command::GoTo(step)) => match session.go_to(step) {
                    Ok(()) => show(&session),
                    Err(e) => println!("{e}"),
                },
                Some(Command::History) => {
                    for (index, label) in session.moves().iter().enumerate() {
                        let marker = if index == session.step() { "*" } else { " " };
                        println!("{marker} {label}");
                    }
                }
                Some(Command::Namespace(ns)) => {
                    session.set_namespace(ns.as_deref())?;
                    let keys = session.keys();
                    println!("Saving to {} / {}", keys.step, keys.history);
                }
                Some(Command::Help) => println!("{HELP}"),
                Some(Command::Quit) => break,
                None => println!("Unknown command, try `help`"),
            }
        }

        log::info!("Saved at step {}", session.step());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    let config = squares::Config::from_env();
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();
    log::info!("Squares (native) starting, store {}", config.store_path.display());

    match terminal::run(config) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
