// event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::core::{Provider, SymptomReport};
use crate::tui::app::{App, Mode, Popup};

pub enum Action {
    None,
    Quit,
    Submit(SymptomReport),
    CopyResult,
    ExportResult,
    SetupComplete { provider: Provider, api_key: String },
}

pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_event(app: &mut App, event: Event) -> Action {
    match event {
        // windows reports releases too
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            app.edit(|input| text.chars().for_each(|c| input.insert(c)));
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.popup {
        Popup::Themes => return handle_theme_popup(app, key),
        Popup::SetupProvider => return handle_provider_popup(app, key),
        Popup::SetupApiKey => return handle_api_key_popup(app, key),
        Popup::None => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::Insert => handle_insert_key(app, key),
    }
}

fn handle_theme_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_popup(),
        KeyCode::Char('j') | KeyCode::Down => app.theme_scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.theme_scroll_up(),
        KeyCode::Enter => app.select_theme(),
        _ => {}
    }
    Action::None
}

fn handle_provider_popup(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.setup_provider_down(),
        KeyCode::Char('k') | KeyCode::Up => app.setup_provider_up(),
        KeyCode::Enter => app.setup_provider_select(),
        _ => {}
    }
    Action::None
}

fn handle_api_key_popup(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => app.edit(|i| i.start()),
            KeyCode::Char('e') => app.edit(|i| i.end()),
            KeyCode::Char('u') => app.edit(|i| i.clear()),
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        // back to provider choice
        KeyCode::Esc => app.popup = Popup::SetupProvider,
        KeyCode::Enter => {
            if let Some((provider, api_key)) = app.setup_api_key_submit() {
                return Action::SetupComplete { provider, api_key };
            }
        }
        _ => edit_key(app, key.code),
    }
    Action::None
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') => return Action::Quit,

        // enter insert mode
        KeyCode::Char('i') => app.enter_insert(),
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.enter_insert();
            app.edit(|i| i.end());
        }
        KeyCode::Char('I') => {
            app.enter_insert();
            app.edit(|i| i.start());
        }

        KeyCode::Tab => app.cycle_panel(),
        KeyCode::Char('t') => app.open_theme_popup(),

        KeyCode::Char('y') => return Action::CopyResult,
        KeyCode::Char('x') => return Action::ExportResult,

        // recall earlier reports
        KeyCode::Char('p') if ctrl => app.recall_prev(),
        KeyCode::Char('n') if ctrl => app.recall_next(),

        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),

        KeyCode::Enter => {
            if let Some(report) = app.submit() {
                return Action::Submit(report);
            }
        }

        _ => {}
    }
    Action::None
}

fn handle_insert_key(app: &mut App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => app.edit(|i| i.start()),
            KeyCode::Char('e') => app.edit(|i| i.end()),
            KeyCode::Char('u') => app.edit(|i| i.clear()),
            KeyCode::Char('p') => app.recall_prev(),
            KeyCode::Char('n') => app.recall_next(),
            // ctrl+enter for newline
            KeyCode::Enter => app.edit(|i| i.insert('\n')),
            _ => {}
        }
        return Action::None;
    }

    // shift+enter for newline
    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code == KeyCode::Enter {
        app.edit(|i| i.insert('\n'));
        return Action::None;
    }

    match key.code {
        KeyCode::Esc => app.exit_insert(),
        // tab moves between the two fields while typing
        KeyCode::Tab => app.cycle_form_field(),
        KeyCode::Enter => {
            app.exit_insert();
            if let Some(report) = app.submit() {
                return Action::Submit(report);
            }
        }
        code => edit_key(app, code),
    }
    Action::None
}

// plain text editing shared by the form fields and the api key popup
fn edit_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) => app.edit(|i| i.insert(c)),
        KeyCode::Backspace => app.edit(|i| i.delete_back()),
        KeyCode::Delete => app.edit(|i| i.delete_forward()),
        KeyCode::Left => app.edit(|i| i.left()),
        KeyCode::Right => app.edit(|i| i.right()),
        KeyCode::Home => app.edit(|i| i.start()),
        KeyCode::End => app.edit(|i| i.end()),
        _ => {}
    }
}
