//! Line-oriented dashboard: edit headline rows, score them, view and export results.

use std::io::Write as _;
use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::client::{score_rows, ApiClient, StatusCheck};
use crate::report::DEFAULT_EXPORT_FILE;
use crate::session::Session;

const HELP: &str = "\
commands:
  list                 show headline rows
  add <text>           append a row
  edit <n> <text>      replace row n
  rm <n>               remove row n
  paste                replace all rows, one headline per line, end with '.'
  sample               load sample headlines
  clear | reset        remove all rows and results
  score                score non-empty rows
  results              show the last results
  export [path]        write the last results as CSV (default headline_sentiment.csv)
  status               check the scoring service
  help                 show this help
  quit                 exit";

/// One parsed interactive command. Row numbers are 1-based as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add(String),
    Edit { row: usize, text: String },
    Remove { row: usize },
    Paste,
    Sample,
    Clear,
    Score,
    Results,
    Export(Option<PathBuf>),
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a user-facing message for unknown commands or bad arguments.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "add" => Command::Add(rest.to_string()),
        "edit" => {
            let (num, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: edit <n> <text>".to_string())?;
            Command::Edit {
                row: parse_row(num)?,
                text: text.trim().to_string(),
            }
        }
        "rm" | "remove" | "del" => Command::Remove {
            row: parse_row(rest)?,
        },
        "paste" => Command::Paste,
        "sample" => Command::Sample,
        "clear" | "reset" => Command::Clear,
        "score" => Command::Score,
        "results" => Command::Results,
        "export" => Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(command))
}

fn parse_row(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("'{raw}' is not a row number (rows start at 1)")),
    }
}

/// Run the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if stdin cannot be read. Service and validation
/// failures are printed inline and the loop continues.
pub async fn run(client: &ApiClient) -> anyhow::Result<()> {
    let mut session = Session::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Headline Sentiment Lab, scoring via {}", client.base_url());
    println!("type 'help' for commands");
    print_rows(&session);

    loop {
        prompt("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Paste => {
                let pasted = read_paste(&mut lines).await?;
                session.replace_from_paste(&pasted);
                print_rows(&session);
            }
            Command::Score => score(client, &mut session).await,
            Command::Status => status(client).await,
            other => apply_local(&mut session, other),
        }
    }
    Ok(())
}

/// Apply a command that only touches session state.
fn apply_local(session: &mut Session, command: Command) {
    match command {
        Command::List => print_rows(session),
        Command::Add(text) => {
            session.add(text);
            print_rows(session);
        }
        Command::Edit { row, text } => match session.edit(row - 1, text) {
            Ok(()) => print_rows(session),
            Err(e) => println!("{e}"),
        },
        Command::Remove { row } => match session.remove(row - 1) {
            Ok(removed) => println!("removed: {removed}"),
            Err(e) => println!("{e}"),
        },
        Command::Sample => {
            session.load_sample();
            print_rows(session);
        }
        Command::Clear => {
            session.clear();
            println!("reset");
        }
        Command::Results => print_results(session),
        Command::Export(path) => export(session, path),
        Command::Help => println!("{HELP}"),
        Command::Paste | Command::Score | Command::Status | Command::Quit => {}
    }
}

async fn read_paste(lines: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<String> {
    println!("paste headlines, one per line; finish with a single '.'");
    let mut pasted = String::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "." {
            break;
        }
        pasted.push_str(&line);
        pasted.push('\n');
    }
    Ok(pasted)
}

async fn score(client: &ApiClient, session: &mut Session) {
    let payload = session.payload();
    if !payload.is_empty() {
        println!("scoring {} headlines…", payload.len());
    }
    let result = score_rows(client, &payload).await;
    match result {
        Ok(batch) => {
            tracing::info!(count = batch.len(), "scored headlines");
            session.set_results(batch);
            println!("scored");
            print_results(session);
        }
        Err(e) => {
            tracing::debug!(error = %e, "scoring failed");
            println!("{e}");
        }
    }
}

async fn status(client: &ApiClient) {
    match client.check_status().await {
        Ok(StatusCheck::Ok) => println!("API OK"),
        Ok(StatusCheck::BadResponse) => println!("API reachable, bad response"),
        Err(e) => println!("Failed: {e}"),
    }
}

fn export(session: &Session, path: Option<PathBuf>) {
    let Some(batch) = session.results() else {
        println!("nothing to export; run 'score' first");
        return;
    };
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
    match batch.write_csv(&path) {
        Ok(()) => println!("wrote {} rows to {}", batch.len(), path.display()),
        Err(e) => println!("failed to write {}: {e}", path.display()),
    }
}

fn print_rows(session: &Session) {
    if session.rows().is_empty() {
        println!("(no headlines; use 'add', 'paste' or 'sample')");
        return;
    }
    for (idx, row) in session.rows().iter().enumerate() {
        println!("{:>3}. {row}", idx + 1);
    }
}

fn print_results(session: &Session) {
    match session.results() {
        Some(batch) if !batch.is_empty() => {
            print!("{}", batch.render_table());
            println!("{}", batch.counts().summary());
        }
        _ => println!("no results yet"),
    }
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn parses_add_with_full_text() {
        assert_eq!(
            parse_command("add  Oil prices fall amid weak demand "),
            Ok(Some(Command::Add("Oil prices fall amid weak demand".into())))
        );
    }

    #[test]
    fn parses_edit_with_row_and_text() {
        assert_eq!(
            parse_command("edit 2 Company misses estimates"),
            Ok(Some(Command::Edit {
                row: 2,
                text: "Company misses estimates".into()
            }))
        );
    }

    #[test]
    fn edit_without_text_is_usage_error() {
        assert!(parse_command("edit 2").is_err());
    }

    #[test]
    fn remove_rejects_row_zero_and_garbage() {
        assert!(parse_command("rm 0").is_err());
        assert!(parse_command("rm two").is_err());
        assert_eq!(
            parse_command("rm 3"),
            Ok(Some(Command::Remove { row: 3 }))
        );
    }

    #[test]
    fn export_path_is_optional() {
        assert_eq!(parse_command("export"), Ok(Some(Command::Export(None))));
        assert_eq!(
            parse_command("export out/today.csv"),
            Ok(Some(Command::Export(Some(PathBuf::from("out/today.csv")))))
        );
    }

    #[test]
    fn reset_is_an_alias_for_clear() {
        assert_eq!(parse_command("reset"), Ok(Some(Command::Clear)));
        assert_eq!(parse_command("CLEAR"), Ok(Some(Command::Clear)));
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse_command("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }

    #[test]
    fn apply_local_edits_session_with_one_based_rows() {
        let mut session = Session::new();
        apply_local(
            &mut session,
            Command::Edit {
                row: 1,
                text: "Bonds sink".into(),
            },
        );
        apply_local(&mut session, Command::Remove { row: 3 });
        assert_eq!(
            session.rows(),
            ["Bonds sink", "Company beats earnings expectations"]
        );
    }
}
