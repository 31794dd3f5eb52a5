use hangman::cli::{self, Cli, CliInterface, parse_cli};
use hangman::logging::{LogTarget, default_log_path, init_logging};
use hangman::tui::TuiInterface;
use hangman::{WordSource, start_game};
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    // The terminal UI owns stdout and stderr, so its logs go to a file.
    let log_target = match (cli.tui, default_log_path()) {
        (false, _) => Some(LogTarget::Stderr),
        (true, Some(path)) => Some(LogTarget::File(path)),
        (true, None) => None,
    };
    if let Some(target) = log_target
        && let Err(e) = init_logging(target)
    {
        eprintln!("Logging disabled: {e}");
    }

    let words = match WordSource::from_file(&cli.word_list) {
        Ok(words) => words,
        Err(e) => {
            eprintln!(
                "Failed to load word list from '{}': {e}",
                cli.word_list.display()
            );
            return ExitCode::FAILURE;
        }
    };
    log::info!("Loaded {} words from {}", words.len(), cli.word_list.display());

    match run(&cli, &words) {
        Ok(rounds) => {
            log::info!("Finished after {} round(s)", rounds);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, words: &WordSource) -> Result<usize, Box<dyn Error>> {
    let mut rng = rand::rng();

    if cli.tui {
        let rounds = {
            let mut ui = TuiInterface::new()?;
            if cli.no_animation {
                ui = ui.without_animation();
            }
            start_game(cli.name.as_deref(), words, &mut ui, &mut rng)?
        };
        // The alternate screen is gone once the interface is dropped.
        cli::display_exit_message();
        return Ok(rounds);
    }

    let stdin = io::stdin();
    let mut ui = CliInterface::new(stdin.lock());
    if cli.no_animation {
        ui = ui.without_animation();
    }
    Ok(start_game(cli.name.as_deref(), words, &mut ui, &mut rng)?)
}
