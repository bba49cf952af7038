//! Interactive session - analyze one text per line, keeping an in-memory history

use crate::analyzer::{AnalysisEngine, AnalyzeError};
use crate::history::SharedHistory;
use crate::reporter::ConsoleReporter;
use crate::AnalysisResult;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Engine plus the history it records into
pub struct Session {
    engine: AnalysisEngine,
    history: SharedHistory,
}

impl Session {
    pub fn new(engine: AnalysisEngine, history: SharedHistory) -> Self {
        Self { engine, history }
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    /// Analyze and record. Returns the result and the previous score, if any.
    pub fn analyze(&self, text: &str) -> Result<(AnalysisResult, Option<u8>), AnalyzeError> {
        let previous = self.history.trend_series().last().copied();
        let result = self.engine.analyze_recorded(text, &self.history)?;
        Ok((result, previous))
    }
}

/// A line typed into the interactive loop
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Analyze(&'a str),
    History,
    Clear,
    Tips,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    match trimmed {
        ":history" | ":h" => Command::History,
        ":clear" => Command::Clear,
        ":tips" => Command::Tips,
        ":help" | ":?" => Command::Help,
        ":quit" | ":q" | ":exit" => Command::Quit,
        cmd if cmd.starts_with(':') => Command::Unknown(cmd),
        _ => Command::Analyze(line),
    }
}

const HELP: &str = "Paste text and press Enter to analyze it.
Commands: :history  show trend and recent analyses
          :clear    clear history
          :tips     how to spot fake news
          :quit     leave";

/// Run the read-analyze-print loop until EOF or `:quit`
pub fn run_interactive<R: BufRead, W: Write>(
    session: &Session,
    reporter: &ConsoleReporter,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "{}", HELP.dimmed())?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Command::Quit => break,
            Command::History => {
                write!(output, "{}", reporter.render_history(&session.history().snapshot()))?
            }
            Command::Clear => {
                session.history().clear();
                writeln!(output, "   History cleared.")?;
            }
            Command::Tips => write!(output, "{}", reporter.render_tips())?,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Unknown(cmd) => {
                writeln!(output, "   Unknown command '{}'. Type :help for commands.", cmd)?
            }
            Command::Analyze(text) => match session.analyze(text) {
                Ok((result, previous)) => {
                    write!(output, "{}", reporter.render(&result, previous))?
                }
                Err(e) => writeln!(output, "   {} {}", "⚠".yellow(), e)?,
            },
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(AnalysisEngine::new().unwrap(), SharedHistory::default())
    }

    fn run(session: &Session, script: &str) -> String {
        let reporter = ConsoleReporter::new().without_colors().without_tips();
        let mut out = Vec::new();
        run_interactive(session, &reporter, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(":history"), Command::History);
        assert_eq!(parse_command("  :q "), Command::Quit);
        assert_eq!(parse_command(":clear"), Command::Clear);
        assert_eq!(parse_command(":bogus"), Command::Unknown(":bogus"));
        assert_eq!(parse_command("Breaking news"), Command::Analyze("Breaking news"));
    }

    #[test]
    fn analyzes_lines_and_records_history() {
        let s = session();
        let out = run(&s, "A calm and ordinary report.\nSHOCKING secret!!!\n:history\n");
        assert!(out.contains("Credibility Analysis"));
        assert!(out.contains("Sensational language"));
        assert!(out.contains("Recent Analyses"));
        assert!(out.contains("Average: "));
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn blank_line_is_rejected_without_recording() {
        let s = session();
        let out = run(&s, "   \n");
        assert!(out.contains("Please enter some text to analyze."));
        assert!(s.history().is_empty());
    }

    #[test]
    fn clear_command_empties_history() {
        let s = session();
        run(&s, "first report\nsecond report\n:clear\n");
        assert!(s.history().is_empty());
    }

    #[test]
    fn quit_stops_processing() {
        let s = session();
        run(&s, "first report\n:quit\nsecond report\n");
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn second_analysis_reports_delta() {
        let s = session();
        let out = run(&s, "plain report\nplain report, however\n");
        assert!(out.contains("[was 50, up 7]"));
    }

    #[test]
    fn session_analyze_returns_previous_score() {
        let s = session();
        let (_, prev) = s.analyze("first").unwrap();
        assert_eq!(prev, None);
        let (_, prev) = s.analyze("second").unwrap();
        assert_eq!(prev, Some(50));
    }
}
