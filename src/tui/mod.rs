// terminal ui

mod app;
mod ascii;
mod event;
mod theme;
mod ui;

use crossterm::{
    cursor::SetCursorStyle,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};
use std::time::Duration;

use crate::core::{Ai, Classifier, Diagnoser};
use crate::{Error, Provider};
use app::{App, LogLevel, Mode};
use event::{Action, handle_event, poll_event};

fn copy_to_clipboard(text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    // pbcopy (macOS), wl-copy (wayland), xclip / xsel (x11)
    let candidates: [(&str, &[&str]); 4] = [
        ("pbcopy", &[]),
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ];

    for (program, args) in candidates {
        if let Ok(mut child) = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            && let Some(stdin) = child.stdin.as_mut()
            && stdin.write_all(text.as_bytes()).is_ok()
        {
            drop(child.stdin.take());
            return child.wait().map(|s| s.success()).unwrap_or(false);
        }
    }

    false
}

fn term_err(e: io::Error) -> Error {
    Error::Server(e.to_string())
}

pub async fn run(
    provider: Provider,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<(), Error> {
    // fail on a bad classifier before touching the terminal
    let classifier = Classifier::medical()?;

    enable_raw_mode().map_err(term_err)?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).map_err(term_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(term_err)?;

    let result = run_app(&mut terminal, classifier, provider, api_key, model).await;

    // restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    classifier: Classifier,
    provider: Provider,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<(), Error> {
    // a missing key sends us into setup instead of failing
    let (mut app, mut diagnoser) = match Ai::new(provider, api_key, model.clone()) {
        Ok(ai) => {
            let app = App::new(provider, ai.model().to_string());
            (app, Some(Diagnoser::new(classifier.clone(), ai)))
        }
        Err(Error::MissingApiKey(_)) => (App::new_setup(provider), None),
        Err(e) => return Err(e),
    };

    let mut last_mode = app.mode;

    loop {
        if app.mode != last_mode {
            let cursor_style = match app.mode {
                Mode::Insert => SetCursorStyle::BlinkingBar,
                Mode::Normal => SetCursorStyle::BlinkingBlock,
            };
            execute!(terminal.backend_mut(), cursor_style).ok();
            last_mode = app.mode;
        }

        terminal
            .draw(|frame| ui::render(frame, &mut app))
            .map_err(term_err)?;

        let Some(event) = poll_event(Duration::from_millis(100)).map_err(term_err)? else {
            continue;
        };

        match handle_event(&mut app, event) {
            Action::Quit => break,
            Action::Submit(report) => {
                let Some(diagnoser) = diagnoser.as_ref() else {
                    app.cancel_submit("finish setup first");
                    continue;
                };

                // show the loading state while we wait on the ai
                terminal
                    .draw(|frame| ui::render(frame, &mut app))
                    .map_err(term_err)?;

                match diagnoser.diagnose(&report).await {
                    Ok(result) => app.set_result(result),
                    Err(rejection) => app.set_rejection(&rejection),
                }
            }
            Action::CopyResult => match app.result_json() {
                Some(json) if copy_to_clipboard(&json) => {
                    app.log(LogLevel::Ok, "insights copied to clipboard".to_string())
                }
                Some(_) => app.log(LogLevel::Warn, "clipboard not available".to_string()),
                None => app.log(LogLevel::Warn, "no insights to copy".to_string()),
            },
            Action::ExportResult => match app.result_json() {
                Some(json) => {
                    let filename = format!(
                        "healthwise_{}.json",
                        chrono::Local::now().format("%Y%m%d_%H%M%S")
                    );
                    match std::fs::write(&filename, json) {
                        Ok(_) => app.log(LogLevel::Ok, format!("exported to {filename}")),
                        Err(e) => app.log(LogLevel::Error, format!("export failed: {e}")),
                    }
                }
                None => app.log(LogLevel::Warn, "no insights to export".to_string()),
            },
            Action::SetupComplete {
                provider: chosen,
                api_key,
            } => match Ai::new(chosen, Some(api_key), model.clone()) {
                Ok(ai) => {
                    app.finish_setup(chosen, ai.model().to_string());
                    diagnoser = Some(Diagnoser::new(classifier.clone(), ai));
                }
                Err(e) => app.setup_set_error(format!("ai init failed: {e}")),
            },
            Action::None => {}
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
