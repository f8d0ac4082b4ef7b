// app state for the tui

use crate::core::{DiagnosisResult, Provider, SymptomReport};
use crate::Rejection;
use crate::tui::theme::{Theme, ThemeKind, detect_theme};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Symptoms,
    History,
    Insights,
    Logs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Themes,
    SetupProvider,
    SetupApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Ok,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Editable text with a cursor counted in chars, not bytes.
#[derive(Debug, Clone, Default)]
pub struct Input {
    text: String,
    cursor: usize,
}

impl Input {
    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn start(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// Line and column of the cursor, counting newlines.
    pub fn line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

pub struct App {
    pub running: bool,
    pub mode: Mode,
    pub panel: Panel,
    pub popup: Popup,
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    // ai
    pub provider: Provider,
    pub model: String,

    // form
    pub symptoms: Input,
    pub history: Input,

    // last outcome
    pub result: Option<DiagnosisResult>,
    pub error: Option<(&'static str, String)>,
    pub latency_ms: Option<u64>,

    pub logs: Vec<LogEntry>,

    // state
    pub loading: bool,
    pub started: Option<Instant>,

    // scroll
    pub insights_scroll: usize,
    pub log_scroll: usize,
    pub theme_scroll: usize,

    // previously submitted reports, for ctrl+p / ctrl+n
    pub past: Vec<SymptomReport>,
    pub past_index: Option<usize>,

    // setup (no api key yet)
    pub in_setup_mode: bool,
    pub setup_provider_index: usize,
    pub api_key_input: Input,
    pub setup_error: Option<String>,
}

impl App {
    pub fn new(provider: Provider, model: String) -> Self {
        let theme_kind = detect_theme();

        let mut app = Self {
            running: true,
            mode: Mode::Normal,
            panel: Panel::Symptoms,
            popup: Popup::None,
            theme_kind,
            theme: Theme::from_kind(theme_kind),
            provider,
            model,
            symptoms: Input::default(),
            history: Input::default(),
            result: None,
            error: None,
            latency_ms: None,
            logs: Vec::new(),
            loading: false,
            started: None,
            insights_scroll: 0,
            log_scroll: 0,
            theme_scroll: theme_kind.index(),
            past: Vec::new(),
            past_index: None,
            in_setup_mode: false,
            setup_provider_index: provider.index(),
            api_key_input: Input::default(),
            setup_error: None,
        };

        app.log(
            LogLevel::Ok,
            format!("provider: {} ({})", provider.name(), app.model),
        );
        app.log(LogLevel::Info, "describe your symptoms and press enter".to_string());

        app
    }

    /// Start with the provider/api key popups because no key was found.
    pub fn new_setup(provider: Provider) -> Self {
        let mut app = Self::new(provider, provider.default_model().to_string());
        app.logs.clear();
        app.in_setup_mode = true;
        app.popup = Popup::SetupProvider;
        app.log(LogLevel::Warn, "no api key found, starting setup".to_string());
        app
    }

    pub fn log(&mut self, level: LogLevel, message: String) {
        self.logs.push(LogEntry { level, message });
        // keep the newest entries in view
        if self.logs.len() > 1 {
            self.log_scroll = self.logs.len().saturating_sub(8);
        }
    }

    // themes
    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.theme_kind = kind;
        self.theme = Theme::from_kind(kind);
        self.theme_scroll = kind.index();
    }

    pub fn open_theme_popup(&mut self) {
        self.popup = Popup::Themes;
        self.theme_scroll = self.theme_kind.index();
    }

    pub fn close_popup(&mut self) {
        self.popup = Popup::None;
    }

    pub fn theme_scroll_up(&mut self) {
        if self.theme_scroll > 0 {
            self.theme_scroll -= 1;
            self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        }
    }

    pub fn theme_scroll_down(&mut self) {
        if self.theme_scroll < ThemeKind::ALL.len() - 1 {
            self.theme_scroll += 1;
            self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        }
    }

    pub fn select_theme(&mut self) {
        self.set_theme(ThemeKind::ALL[self.theme_scroll]);
        self.close_popup();
    }

    // setup
    pub fn setup_provider_up(&mut self) {
        self.setup_provider_index = self.setup_provider_index.saturating_sub(1);
    }

    pub fn setup_provider_down(&mut self) {
        if self.setup_provider_index < Provider::ALL.len() - 1 {
            self.setup_provider_index += 1;
        }
    }

    pub fn setup_provider(&self) -> Provider {
        Provider::ALL[self.setup_provider_index]
    }

    pub fn setup_provider_select(&mut self) {
        self.setup_error = None;
        self.popup = Popup::SetupApiKey;
    }

    pub fn setup_api_key_submit(&mut self) -> Option<(Provider, String)> {
        if self.api_key_input.is_blank() {
            self.setup_error = Some("api key required".to_string());
            return None;
        }
        Some((
            self.setup_provider(),
            self.api_key_input.value().trim().to_string(),
        ))
    }

    pub fn setup_set_error(&mut self, error: String) {
        self.setup_error = Some(error);
    }

    pub fn finish_setup(&mut self, provider: Provider, model: String) {
        self.in_setup_mode = false;
        self.popup = Popup::None;
        self.api_key_input.clear();
        self.setup_error = None;
        self.provider = provider;
        self.model = model;
        self.log(
            LogLevel::Ok,
            format!("provider: {} ({})", provider.name(), self.model),
        );
    }

    // panels and modes
    pub fn cycle_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Symptoms => Panel::History,
            Panel::History => Panel::Insights,
            Panel::Insights => Panel::Logs,
            Panel::Logs => Panel::Symptoms,
        };
    }

    pub fn enter_insert(&mut self) {
        // only the form panels take text
        if !matches!(self.panel, Panel::Symptoms | Panel::History) {
            self.panel = Panel::Symptoms;
        }
        self.mode = Mode::Insert;
    }

    pub fn cycle_form_field(&mut self) {
        self.panel = match self.panel {
            Panel::Symptoms => Panel::History,
            _ => Panel::Symptoms,
        };
    }

    pub fn exit_insert(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn active_input(&mut self) -> Option<&mut Input> {
        match self.popup {
            Popup::SetupApiKey => return Some(&mut self.api_key_input),
            Popup::None => {}
            _ => return None,
        }
        match self.panel {
            Panel::Symptoms => Some(&mut self.symptoms),
            Panel::History => Some(&mut self.history),
            _ => None,
        }
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut Input)) {
        if let Some(input) = self.active_input() {
            f(input);
        }
        self.setup_error = None;
    }

    // recall earlier reports
    pub fn recall_prev(&mut self) {
        if self.past.is_empty() {
            return;
        }
        let index = match self.past_index {
            None => self.past.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.past_index = Some(index);
        self.load_report(index);
    }

    pub fn recall_next(&mut self) {
        match self.past_index {
            Some(i) if i + 1 < self.past.len() => {
                self.past_index = Some(i + 1);
                self.load_report(i + 1);
            }
            Some(_) => {
                self.past_index = None;
                self.symptoms.clear();
                self.history.clear();
            }
            None => {}
        }
    }

    fn load_report(&mut self, index: usize) {
        let report = self.past[index].clone();
        self.symptoms.set(&report.symptoms);
        self.history
            .set(report.medical_history.as_deref().unwrap_or_default());
    }

    pub fn submit(&mut self) -> Option<SymptomReport> {
        if self.loading {
            return None;
        }
        if self.in_setup_mode {
            self.log(LogLevel::Warn, "finish setup first".to_string());
            return None;
        }
        if self.symptoms.is_blank() {
            self.log(LogLevel::Warn, "please enter your symptoms".to_string());
            return None;
        }

        let history = Some(self.history.value().trim().to_string()).filter(|h| !h.is_empty());
        let report = SymptomReport::new(self.symptoms.value().trim(), history);

        if self.past.last() != Some(&report) {
            self.past.push(report.clone());
        }
        self.past_index = None;
        self.error = None;
        self.loading = true;
        self.started = Some(Instant::now());
        self.log(LogLevel::Info, "generating insights...".to_string());
        Some(report)
    }

    /// Undo a submit that never reached the ai.
    pub fn cancel_submit(&mut self, reason: &str) {
        self.loading = false;
        self.started = None;
        self.log(LogLevel::Warn, reason.to_string());
    }

    fn stop_clock(&mut self) {
        if let Some(start) = self.started.take() {
            self.latency_ms = Some(start.elapsed().as_millis() as u64);
        }
        self.loading = false;
    }

    pub fn set_result(&mut self, result: DiagnosisResult) {
        self.stop_clock();
        self.log(
            LogLevel::Ok,
            format!(
                "health insights generated ({} conditions, {}ms)",
                result.diagnoses.len(),
                self.latency_ms.unwrap_or(0)
            ),
        );
        self.result = Some(result);
        self.error = None;
        self.insights_scroll = 0;
        self.panel = Panel::Insights;
    }

    pub fn set_rejection(&mut self, rejection: &Rejection) {
        self.stop_clock();
        let level = if rejection.is_user_correctable() {
            LogLevel::Warn
        } else {
            LogLevel::Error
        };
        self.log(level, format!("{}: {}", rejection.category(), rejection.detail()));
        self.error = Some((rejection.category(), rejection.to_string()));
    }

    pub fn result_json(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        serde_json::to_string_pretty(result).ok()
    }

    pub fn scroll_up(&mut self) {
        match self.panel {
            Panel::Insights => self.insights_scroll = self.insights_scroll.saturating_sub(1),
            Panel::Logs => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => {}
        }
    }

    pub fn scroll_down(&mut self) {
        match self.panel {
            Panel::Insights => self.insights_scroll += 1,
            Panel::Logs => self.log_scroll += 1,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> Input {
        let mut input = Input::default();
        text.chars().for_each(|c| input.insert(c));
        input
    }

    #[test]
    fn input_handles_multibyte_chars() {
        let mut input = typed("fièvre");
        input.left();
        input.left();
        input.left();
        input.delete_back();
        assert_eq!(input.value(), "fivre");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn input_line_col_counts_newlines() {
        let input = typed("cough\nfever");
        assert_eq!(input.line_col(), (1, 5));
    }

    #[test]
    fn submit_refuses_blank_symptoms() {
        let mut app = App::new(Provider::Gemini, "test".to_string());
        app.history.set("asthma");
        assert!(app.submit().is_none());
        assert!(!app.loading);
    }

    #[test]
    fn submit_builds_report_and_remembers_it() {
        let mut app = App::new(Provider::Gemini, "test".to_string());
        app.symptoms.set("  headache  ");
        let report = app.submit().unwrap();
        assert_eq!(report.symptoms, "headache");
        assert_eq!(report.medical_history, None);
        assert!(app.loading);
        assert_eq!(app.past.len(), 1);

        app.set_rejection(&Rejection::OutOfScope);
        assert!(!app.loading);
        assert_eq!(app.error.as_ref().map(|e| e.0), Some("out_of_scope"));

        app.symptoms.clear();
        app.recall_prev();
        assert_eq!(app.symptoms.value(), "headache");
    }

    #[test]
    fn submit_refused_during_setup() {
        let mut app = App::new_setup(Provider::Claude);
        app.symptoms.set("fever");
        assert!(app.submit().is_none());
        assert!(!app.loading);
        assert!(app.started.is_none());
        assert!(app.past.is_empty());
    }

    #[test]
    fn cancel_submit_clears_timing() {
        let mut app = App::new(Provider::Gemini, "test".to_string());
        app.symptoms.set("fever");
        assert!(app.submit().is_some());
        assert!(app.started.is_some());

        app.cancel_submit("finish setup first");
        assert!(!app.loading);
        assert!(app.started.is_none());
        assert!(app.latency_ms.is_none());
    }
}
