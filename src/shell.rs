//! Interactive scan shell over any line-based input

use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::domain::ViewMode;
use crate::location::LocationStatus;
use crate::render::{RenderOptions, render_results};
use crate::search::{CrowdSource, SearchSession, SearchState};

pub const QUICK_SCANS: [&str; 4] = ["Nightclubs", "Coffee Shops", "Gyms", "Parks"];

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Quit,
    Refresh,
    View(ViewMode),
    Help,
    Search(String),
    Empty,
    Invalid(String),
}

impl ShellCommand {
    /// Parse one input line. Quick-scan numbers are only honored while the
    /// suggestions are still on screen.
    pub fn parse(line: &str, quick_scans_visible: bool) -> ShellCommand {
        let line = line.trim();
        if line.is_empty() {
            return ShellCommand::Empty;
        }

        if let Some(command) = line.strip_prefix(':') {
            let mut words = command.split_whitespace();
            return match (words.next(), words.next()) {
                (Some("q" | "quit"), None) => ShellCommand::Quit,
                (Some("r" | "refresh"), None) => ShellCommand::Refresh,
                (Some("h" | "help"), None) => ShellCommand::Help,
                (Some("v" | "view"), Some(mode)) => match ViewMode::from_command(mode) {
                    Some(view) => ShellCommand::View(view),
                    None => ShellCommand::Invalid(format!("Unknown view: {}", mode)),
                },
                _ => ShellCommand::Invalid(format!("Unknown command: {}", line)),
            };
        }

        if quick_scans_visible
            && let Ok(n) = line.parse::<usize>()
            && (1..=QUICK_SCANS.len()).contains(&n)
        {
            return ShellCommand::Search(QUICK_SCANS[n - 1].to_string());
        }

        ShellCommand::Search(line.to_string())
    }
}

pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◜", "◠", "◝", "◞", "◡", "◟", "◉"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Run one search with a spinner and return the resulting state
pub fn scan_with_spinner<'s, S: CrowdSource + ?Sized>(
    session: &'s mut SearchSession,
    source: &S,
    query: Option<&str>,
) -> Option<&'s SearchState> {
    let spinner = create_spinner("ACQUIRING SATELLITE DATA...");
    let state = match query {
        Some(q) => session.search(source, q),
        None => session.refresh(source),
    };
    spinner.finish_and_clear();
    state
}

/// Text shown for a finished search
pub fn render_state(state: &SearchState, view: ViewMode, options: &RenderOptions) -> String {
    match state {
        SearchState::Succeeded(result) => render_results(result, view, options),
        SearchState::Failed(message) => {
            options.paint(&format!("⚠ {}", message), &console::Style::new().red())
        }
        SearchState::Idle | SearchState::Searching { .. } => String::new(),
    }
}

/// Interactive loop state: the session plus display preferences
pub struct Shell<'a, S: CrowdSource + ?Sized> {
    source: &'a S,
    session: SearchSession,
    location: LocationStatus,
    view: ViewMode,
    options: RenderOptions,
}

impl<'a, S: CrowdSource + ?Sized> Shell<'a, S> {
    pub fn new(source: &'a S, location: LocationStatus, view: ViewMode, options: RenderOptions) -> Self {
        Self {
            source,
            session: SearchSession::new(location.coordinates()),
            location,
            view,
            options,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    fn write_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "● {} │ SYSTEM READY", self.location.indicator())?;
        if let LocationStatus::Unavailable(reason) = &self.location {
            writeln!(out, "{}", reason)?;
        }
        Ok(())
    }

    fn write_quick_scans<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let options: Vec<String> = QUICK_SCANS
            .iter()
            .enumerate()
            .map(|(i, term)| format!("[{}] {}", i + 1, term))
            .collect();
        writeln!(out, "QUICK SCAN: {}", options.join("  "))
    }

    fn write_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Type a query to scan for crowds.")?;
        writeln!(out, "  :r              repeat the last scan")?;
        writeln!(out, "  :v grid|list    switch result layout")?;
        writeln!(out, "  :q              quit")
    }

    /// Read commands from `input` until `:q` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        self.write_status(out)?;
        self.write_quick_scans(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "scan> ")?;
            out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };

            let state = match ShellCommand::parse(&line, !self.session.has_searched()) {
                ShellCommand::Quit => break,
                ShellCommand::Empty => continue,
                ShellCommand::Help => {
                    self.write_help(out)?;
                    continue;
                }
                ShellCommand::Invalid(message) => {
                    writeln!(out, "{}", message)?;
                    continue;
                }
                ShellCommand::View(view) => {
                    self.view = view;
                    // Re-render what is on screen in the new layout
                    self.session.state().clone()
                }
                ShellCommand::Refresh => {
                    match scan_with_spinner(&mut self.session, self.source, None) {
                        Some(state) => state.clone(),
                        None => {
                            writeln!(out, "Nothing to refresh yet.")?;
                            continue;
                        }
                    }
                }
                ShellCommand::Search(query) => {
                    match scan_with_spinner(&mut self.session, self.source, Some(&query)) {
                        Some(state) => state.clone(),
                        None => continue,
                    }
                }
            };

            let rendered = render_state(&state, self.view, &self.options);
            if !rendered.is_empty() {
                writeln!(out, "{}", rendered)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use crate::error::ScanError;
    use crate::parser::parse_places;
    use crate::search::{SCAN_FAILED_MESSAGE, ScanResult};
    use std::cell::RefCell;
    use std::io::Cursor;

    struct ScriptedSource {
        queries: RefCell<Vec<String>>,
    }

    impl CrowdSource for ScriptedSource {
        fn scan(&self, query: &str, _: Option<Coordinates>) -> Result<ScanResult, ScanError> {
            self.queries.borrow_mut().push(query.to_string());
            if query == "Broken" {
                return Err(ScanError::Status {
                    status: 503,
                    body: "overloaded".to_string(),
                });
            }
            let text = format!(
                "---PLACE_START---\nNAME: {query} Central\nCROWD_SCORE: 85\n---PLACE_END---"
            );
            Ok(ScanResult {
                places: parse_places(&text, &[]),
                grounding: Vec::new(),
            })
        }
    }

    fn run_script(script: &str) -> (String, Vec<String>) {
        let source = ScriptedSource {
            queries: RefCell::new(Vec::new()),
        };
        let mut shell = Shell::new(
            &source,
            LocationStatus::Locked(Coordinates::new(1.0, 2.0)),
            ViewMode::List,
            RenderOptions::plain(),
        );
        let mut out = Vec::new();
        shell.run(Cursor::new(script), &mut out).unwrap();
        let queries = source.queries.borrow().clone();
        (String::from_utf8(out).unwrap(), queries)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse(":q", true), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse(" :r ", false), ShellCommand::Refresh);
        assert_eq!(ShellCommand::parse(":v grid", false), ShellCommand::View(ViewMode::Grid));
        assert!(matches!(ShellCommand::parse(":v table", false), ShellCommand::Invalid(_)));
        assert!(matches!(ShellCommand::parse(":x", false), ShellCommand::Invalid(_)));
        assert_eq!(ShellCommand::parse("   ", true), ShellCommand::Empty);
        assert_eq!(
            ShellCommand::parse("rooftop bars", true),
            ShellCommand::Search("rooftop bars".to_string())
        );
    }

    #[test]
    fn test_quick_scan_numbers_only_before_first_search() {
        assert_eq!(ShellCommand::parse("2", true), ShellCommand::Search("Coffee Shops".to_string()));
        assert_eq!(ShellCommand::parse("2", false), ShellCommand::Search("2".to_string()));
        assert_eq!(ShellCommand::parse("9", true), ShellCommand::Search("9".to_string()));
    }

    #[test]
    fn test_shell_session() {
        let (out, queries) = run_script("1\n:r\nBroken\n:q\nParks\n");

        assert_eq!(queries, vec!["Nightclubs", "Nightclubs", "Broken"]);
        assert!(out.starts_with("● GPS LOCKED │ SYSTEM READY"));
        assert!(out.contains("QUICK SCAN: [1] Nightclubs"));
        assert!(out.contains("SEVERE    85%  Nightclubs Central"));
        assert!(out.contains(SCAN_FAILED_MESSAGE));
        assert!(!out.contains("overloaded"));
    }

    #[test]
    fn test_refresh_before_any_search() {
        let (out, queries) = run_script(":r\n");
        assert!(queries.is_empty());
        assert!(out.contains("Nothing to refresh yet."));
    }

    #[test]
    fn test_view_switch_rerenders_results() {
        let (out, _) = run_script("Gyms\n:v grid\n");
        assert!(out.contains("SEVERE    85%  Gyms Central"));
        assert!(out.contains("SENSOR READING"));
    }
}
