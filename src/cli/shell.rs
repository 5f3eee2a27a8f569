//! Interactive session: one board kept in memory across many commands.

use std::io::{BufRead, Write};

use clap::Parser;
use tracing::debug;

use crate::cli::commands::ShellLine;
use crate::cli::handlers::{self, Session};

const PROMPT: &str = "tb> ";

/// Read commands line by line until `quit`, `exit` or end of input.
///
/// Each line is split like a shell would (quotes group words) and parsed
/// with the same subcommands as the binary. Errors are reported on stderr
/// and the session carries on. `prompt` enables the banner and the `tb>`
/// prompt for terminal use.
pub fn run_shell(
    session: &mut Session,
    json: bool,
    input: impl BufRead,
    out: &mut dyn Write,
    prompt: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if prompt {
        writeln!(
            out,
            "{}: {} tasks in {} columns. Type 'help' for commands, 'quit' to leave.",
            session.board.name(),
            session.board.tasks().len(),
            session.board.columns().len()
        )?;
    }

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // --help and bare `help` land here too
                if e.use_stderr() {
                    eprint!("{}", e);
                } else {
                    write!(out, "{}", e)?;
                }
                continue;
            }
        };

        debug!(line, "shell command");
        if let Err(e) = handlers::dispatch(session, parsed.command, json || parsed.json, out) {
            eprintln!("error: {}", e);
        }
        out.flush()?;
    }
    if prompt {
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::BoardConfig;

    fn session() -> Session {
        Session::from_config(&BoardConfig::default(), false).unwrap()
    }

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run_shell(session, false, script.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_state_persists_across_lines() {
        let mut session = session();
        let out = run_script(&mut session, "mv 3 col-4\nrm 2\ncolumns\n");
        assert!(out.contains("moved 3 to col-4"));
        assert!(out.contains("deleted 2"));
        assert_eq!(session.board.tasks().len(), 7);
        assert_eq!(session.board.column_tasks("col-4").len(), 2);
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut session = session();
        run_script(
            &mut session,
            "mv 3 nowhere\nfrobnicate\nadd 'unterminated\nrm 8\n",
        );
        assert!(session.board.task("8").is_none());
        assert_eq!(session.board.task("3").unwrap().status, "col-3");
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut session = session();
        run_script(&mut session, "rm 1\nquit\nrm 2\n");
        assert!(session.board.task("1").is_none());
        assert!(session.board.task("2").is_some());
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        let mut session = session();
        let out = run_script(&mut session, "\n   \n# setup\nrm 1\n");
        assert_eq!(out, "deleted 1\n");
    }

    #[test]
    fn test_prompt_mode() {
        let mut session = session();
        let mut out = Vec::new();
        run_shell(&mut session, false, "exit\n".as_bytes(), &mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Project Board: 8 tasks in 4 columns."));
        assert!(text.contains(PROMPT));
    }
}
