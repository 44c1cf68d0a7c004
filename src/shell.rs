use std::io::BufRead;
use std::sync::mpsc::Sender;
use eframe::egui;
use crate::state::visibility::VisibilityAction;

pub const HELP: &str = "\
commands:
  help                 show this text
  list                 list cells and their legends
  diag                 list diagnostics of the last build
  hide R C             hide the plot at row R, column C
  hide-row R           hide row R
  hide-col C           hide column C
  only R C             hide all except the plot at R, C
  only-row R           hide all except row R
  only-col C           hide all except column C
  restore              show every plot again
  size R C W H         set the plot at R, C to W x H pixels
  reload               re-read the log and both configs
  quit                 close the window";

/// A line typed at the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellCommand {
    Help,
    List,
    Diagnostics,
    Visibility(VisibilityAction),
    Resize { row: usize, col: usize, width: f32, height: f32 },
    Reload,
    Quit,
}

fn index(arg: Option<&str>, name: &str) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| format!("missing {name}"))?;
    arg.parse().map_err(|_| format!("invalid {name}: {arg}"))
}

fn pixels(arg: Option<&str>, name: &str) -> Result<f32, String> {
    let arg = arg.ok_or_else(|| format!("missing {name}"))?;
    match arg.trim_end_matches("px").parse::<f32>() {
        Ok(v) if v > 0.0 => Ok(v),
        _ => Err(format!("invalid {name}: {arg}")),
    }
}

/// Parse one input line. Empty lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let command = match head {
        "help" | "?" => ShellCommand::Help,
        "list" | "ls" => ShellCommand::List,
        "diag" => ShellCommand::Diagnostics,
        "hide" => ShellCommand::Visibility(VisibilityAction::HidePlot {
            row: index(words.next(), "row")?,
            col: index(words.next(), "column")?,
        }),
        "hide-row" => ShellCommand::Visibility(VisibilityAction::HideRow(index(words.next(), "row")?)),
        "hide-col" => ShellCommand::Visibility(VisibilityAction::HideColumn(index(words.next(), "column")?)),
        "only" => ShellCommand::Visibility(VisibilityAction::HideExceptPlot {
            row: index(words.next(), "row")?,
            col: index(words.next(), "column")?,
        }),
        "only-row" => ShellCommand::Visibility(VisibilityAction::HideExceptRow(index(words.next(), "row")?)),
        "only-col" => ShellCommand::Visibility(VisibilityAction::HideExceptColumn(index(words.next(), "column")?)),
        "restore" => ShellCommand::Visibility(VisibilityAction::Restore),
        "size" => ShellCommand::Resize {
            row: index(words.next(), "row")?,
            col: index(words.next(), "column")?,
            width: pixels(words.next(), "width")?,
            height: pixels(words.next(), "height")?,
        },
        "reload" => ShellCommand::Reload,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {extra}"));
    }
    Ok(Some(command))
}

/// Read commands from stdin on a background thread and forward them to the UI.
/// Stops at end of input or once the UI side hangs up.
pub fn spawn_stdin_reader(tx: Sender<ShellCommand>, ctx: egui::Context) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("stdin: {e}");
                    break;
                }
            };
            match parse(&line) {
                Ok(Some(command)) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                    ctx.request_repaint();
                }
                Ok(None) => {}
                Err(e) => eprintln!("{e}"),
            }
        }
        tracing::info!("stdin closed, shell stopped");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_visibility_commands() {
        assert_eq!(
            parse("hide 1 2"),
            Ok(Some(ShellCommand::Visibility(VisibilityAction::HidePlot { row: 1, col: 2 })))
        );
        assert_eq!(
            parse("  only-col 3 "),
            Ok(Some(ShellCommand::Visibility(VisibilityAction::HideExceptColumn(3))))
        );
        assert_eq!(parse("restore"), Ok(Some(ShellCommand::Visibility(VisibilityAction::Restore))));
    }

    #[test]
    fn parses_graph_size() {
        assert_eq!(
            parse("size 0 1 400 250px"),
            Ok(Some(ShellCommand::Resize { row: 0, col: 1, width: 400.0, height: 250.0 }))
        );
        assert_eq!(parse("size 0 1 400"), Err("missing height".to_string()));
        assert_eq!(parse("size 0 1 -4 20"), Err("invalid width: -4".to_string()));
    }

    #[test]
    fn blank_and_plain_commands() {
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("list"), Ok(Some(ShellCommand::List)));
        assert_eq!(parse("quit"), Ok(Some(ShellCommand::Quit)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse("hide 1"), Err("missing column".to_string()));
        assert_eq!(parse("hide-row x"), Err("invalid row: x".to_string()));
        assert_eq!(parse("restore now"), Err("unexpected argument: now".to_string()));
        assert!(parse("zoom").unwrap_err().starts_with("unknown command"));
    }
}
