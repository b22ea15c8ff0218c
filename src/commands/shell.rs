//! Shell command - Interactive review of every project
//!
//! Mirrors a checkbox list: filter by name, show only ignored projects,
//! toggle rows, then submit the whole batch at once.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::utils::{self, TableOptions};
use workspace_recs::backend::ProjectBackend;
use workspace_recs::session::{Session, SessionError, Toggled};

const HELP: &str = "\
Commands:
  list                 Show the current view
  filter [TEXT]        Filter by project name (no text clears the filter)
  active               Toggle showing ignored projects only
  toggle N [N...]      Toggle the ignore flag of rows N in the current view
  open N [storage]     Open the project folder (or its workspace storage)
  pending              Show pending changes
  submit               Write pending changes
  reload               Re-read projects (asks before discarding changes)
  help                 Show this help
  quit                 Leave (pending changes are not written)";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Filter(String),
    Active,
    Toggle(Vec<usize>),
    Open { row: usize, storage: bool },
    Pending,
    Submit,
    Reload { force: bool },
    Help,
    Quit,
    Empty,
}

/// Parse one line of input; rows are 1-based as displayed
pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let rows = |args: &str| -> Result<Vec<usize>, String> {
        args.split_whitespace()
            .map(|n| match n.parse::<usize>() {
                Ok(0) | Err(_) => Err(format!("Not a row number: {}", n)),
                Ok(n) => Ok(n),
            })
            .collect()
    };

    match word {
        "" => Ok(ShellCommand::Empty),
        "list" | "ls" => Ok(ShellCommand::List),
        "filter" | "f" => Ok(ShellCommand::Filter(rest.to_string())),
        "active" | "a" => Ok(ShellCommand::Active),
        "toggle" | "t" => {
            let rows = rows(rest)?;
            if rows.is_empty() {
                return Err("Usage: toggle N [N...]".to_string());
            }
            Ok(ShellCommand::Toggle(rows))
        }
        "open" | "o" => {
            let (row, target) = match rest.split_once(char::is_whitespace) {
                Some((row, target)) => (row, target.trim()),
                None => (rest, ""),
            };
            let storage = match target {
                "" => false,
                "storage" | "s" => true,
                other => return Err(format!("Unknown open target: {}", other)),
            };
            match rows(row)?.as_slice() {
                [row] => Ok(ShellCommand::Open { row: *row, storage }),
                _ => Err("Usage: open N [storage]".to_string()),
            }
        }
        "pending" | "p" => Ok(ShellCommand::Pending),
        "submit" => Ok(ShellCommand::Submit),
        "reload" => Ok(ShellCommand::Reload { force: false }),
        "reload!" => Ok(ShellCommand::Reload { force: true }),
        "help" | "h" | "?" => Ok(ShellCommand::Help),
        "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command: {} (try 'help')", other)),
    }
}

/// Interactive loop state: the session plus the rows last shown
struct Shell<B> {
    session: Session<B>,
    view: Vec<PathBuf>,
}

impl<B: ProjectBackend> Shell<B> {
    fn print_view<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.view = self
            .session
            .visible()
            .map(|p| p.storage_key.clone())
            .collect();

        let session = &self.session;
        let table = utils::project_table(
            session
                .visible()
                .map(|p| (p, session.is_pending(&p.storage_key))),
            &TableOptions {
                numbered: true,
                with_id: false,
            },
        );
        writeln!(out, "{}", table)?;

        let filter = session.filter();
        let mut status = format!(
            "{} of {} projects",
            self.view.len(),
            session.projects().len()
        );
        if !filter.query().is_empty() {
            status.push_str(&format!(", name contains {:?}", filter.query()));
        }
        if filter.active_only() {
            status.push_str(", ignored only");
        }
        if session.has_pending() {
            status.push_str(&format!(", {} pending", session.pending().len()));
        }
        writeln!(out, "{}", status.dimmed())?;
        Ok(())
    }

    fn row(&self, row: usize) -> Result<PathBuf, String> {
        self.view
            .get(row - 1)
            .cloned()
            .ok_or_else(|| format!("No row {} in the current view", row))
    }

    fn toggle<W: Write>(&mut self, rows: &[usize], out: &mut W) -> Result<()> {
        // Resolve all rows first so a bad number toggles nothing
        let keys = match rows.iter().map(|&r| self.row(r)).collect::<Result<Vec<_>, _>>() {
            Ok(keys) => keys,
            Err(msg) => {
                writeln!(out, "{}", msg.red())?;
                return Ok(());
            }
        };

        for key in keys {
            let toggled = self.session.toggle_ignore(&key)?;
            if let Some(project) = self.session.get(&key) {
                let state = if project.ignore { "ignored" } else { "not ignored" };
                let note = match toggled {
                    Toggled::Pending => "pending",
                    Toggled::Cancelled => "back to saved state",
                };
                writeln!(out, "{}: {} ({})", project.name, state, note)?;
            }
        }
        Ok(())
    }

    fn open<W: Write>(&self, row: usize, storage: bool, out: &mut W) -> Result<()> {
        let key = match self.row(row) {
            Ok(key) => key,
            Err(msg) => {
                writeln!(out, "{}", msg.red())?;
                return Ok(());
            }
        };
        let Some(project) = self.session.get(&key) else {
            return Ok(());
        };

        let target = if storage || project.remote.is_some() {
            &project.storage_key
        } else {
            &project.path
        };
        if let Err(e) = self.session.open_path(target) {
            writeln!(out, "{} {:#}", "Error:".red(), anyhow::Error::from(e))?;
        }
        Ok(())
    }

    fn submit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.session.submit() {
            Ok(count) => {
                writeln!(out, "{} {} project(s)", "Updated:".green(), count)?;
                self.print_view(out)?;
            }
            Err(SessionError::NothingToSubmit) => {
                writeln!(out, "Nothing to submit.")?;
            }
            Err(SessionError::RefreshAfterSubmit { submitted, source }) => {
                writeln!(out, "{} {} project(s)", "Updated:".green(), submitted)?;
                writeln!(
                    out,
                    "{} could not reload projects: {:#}",
                    "Warning:".yellow(),
                    source
                )?;
            }
            Err(e) => {
                writeln!(
                    out,
                    "{} {:#}. Pending changes kept; try again.",
                    "Error:".red(),
                    anyhow::Error::from(e)
                )?;
            }
        }
        Ok(())
    }

    fn reload<W: Write>(&mut self, force: bool, out: &mut W) -> Result<()> {
        if self.session.has_pending() && !force {
            writeln!(
                out,
                "{} pending change(s) would be discarded. Use 'reload!' to confirm.",
                self.session.pending().len()
            )?;
            return Ok(());
        }
        match self.session.reload() {
            Ok(_) => self.print_view(out)?,
            Err(e) => writeln!(out, "{} {:#}", "Error:".red(), anyhow::Error::from(e))?,
        }
        Ok(())
    }
}

/// Run the interactive loop until `quit` or end of input
pub fn execute<B: ProjectBackend, R: BufRead, W: Write>(
    backend: B,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mut session = Session::new(backend);
    if let Err(e) = session.reload() {
        // Start empty; `reload` can retry
        writeln!(out, "{} {:#}", "Error:".red(), anyhow::Error::from(e))?;
    }

    let mut shell = Shell {
        session,
        view: Vec::new(),
    };
    shell.print_view(out)?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{}", msg.red())?;
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::List => shell.print_view(out)?,
            ShellCommand::Filter(text) => {
                shell.session.set_filter_text(text);
                shell.print_view(out)?;
            }
            ShellCommand::Active => {
                shell.session.toggle_active_only();
                shell.print_view(out)?;
            }
            ShellCommand::Toggle(rows) => shell.toggle(&rows, out)?,
            ShellCommand::Open { row, storage } => shell.open(row, storage, out)?,
            ShellCommand::Pending => {
                if !shell.session.has_pending() {
                    writeln!(out, "No pending changes.")?;
                }
                for project in shell.session.pending() {
                    let state = if project.ignore { "ignore" } else { "unignore" };
                    writeln!(out, "  {} -> {}", project.name, state)?;
                }
            }
            ShellCommand::Submit => shell.submit(out)?,
            ShellCommand::Reload { force } => shell.reload(force, out)?,
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => break,
        }
    }

    if shell.session.has_pending() {
        writeln!(
            out,
            "{} {} pending change(s) were not submitted.",
            "Note:".yellow(),
            shell.session.pending().len()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::Storage;
    use std::io::Cursor;
    use workspace_recs::vscode::WorkspaceStorage;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("  "), Ok(ShellCommand::Empty));
        assert_eq!(parse("ls"), Ok(ShellCommand::List));
        assert_eq!(
            parse("filter My App "),
            Ok(ShellCommand::Filter("My App".to_string()))
        );
        assert_eq!(parse("filter"), Ok(ShellCommand::Filter(String::new())));
        assert_eq!(parse("t 1 3"), Ok(ShellCommand::Toggle(vec![1, 3])));
        assert_eq!(
            parse("open 2 storage"),
            Ok(ShellCommand::Open {
                row: 2,
                storage: true
            })
        );
        assert_eq!(parse("reload!"), Ok(ShellCommand::Reload { force: true }));
        assert_eq!(parse("exit"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("toggle").is_err());
        assert!(parse("toggle 0").is_err());
        assert!(parse("toggle x").is_err());
        assert!(parse("open").is_err());
        assert!(parse("open 1 2").is_err());
        assert!(parse("open 1 sideways").is_err());
        assert!(parse("frobnicate").is_err());
    }

    fn run(storage: &Storage, script: &str) -> String {
        let mut out = Vec::new();
        execute(
            WorkspaceStorage::new(storage.root()),
            Cursor::new(script.to_string()),
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn flags(storage: &Storage) -> Vec<bool> {
        WorkspaceStorage::new(storage.root())
            .scan()
            .unwrap()
            .iter()
            .map(|p| p.ignore)
            .collect()
    }

    fn storage() -> Storage {
        let storage = Storage::new();
        storage.add("h1", "Foo", Some(false));
        storage.add("h2", "Bar", Some(true));
        storage
    }

    #[test]
    fn test_toggle_and_submit() {
        let storage = storage();
        let output = run(&storage, "toggle 1\nsubmit\nquit\n");

        assert!(output.contains("Foo: ignored (pending)"));
        assert!(output.contains("1 project(s)"));
        assert_eq!(flags(&storage), vec![true, true]);
    }

    #[test]
    fn test_double_toggle_leaves_nothing_pending() {
        let storage = storage();
        let output = run(&storage, "toggle 1\ntoggle 1\nsubmit\n");

        assert!(output.contains("Foo: not ignored (back to saved state)"));
        assert!(output.contains("Nothing to submit."));
        assert_eq!(flags(&storage), vec![false, true]);
    }

    #[test]
    fn test_rows_follow_the_filtered_view() {
        let storage = storage();
        let output = run(&storage, "filter bar\ntoggle 1\npending\n");

        assert!(output.contains("Bar -> unignore"));
        assert!(output.contains("not submitted"));
        assert_eq!(flags(&storage), vec![false, true]);
    }

    #[test]
    fn test_active_view_and_bad_row() {
        let storage = storage();
        let output = run(&storage, "active\ntoggle 2\npending\n");

        assert!(output.contains("No row 2 in the current view"));
        assert!(output.contains("No pending changes."));
    }

    #[test]
    fn test_reload_asks_before_discarding() {
        let storage = storage();
        let output = run(&storage, "toggle 2\nreload\nreload!\npending\n");

        assert!(output.contains("Use 'reload!' to confirm."));
        assert!(output.contains("No pending changes."));
        assert_eq!(flags(&storage), vec![false, true]);
    }

    #[test]
    fn test_unknown_command_keeps_running() {
        let storage = storage();
        let output = run(&storage, "dance\nhelp\n");

        assert!(output.contains("Unknown command: dance"));
        assert!(output.contains("Commands:"));
    }
}
