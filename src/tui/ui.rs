// ui rendering

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::core::{DiagnosisResult, OVERALL_DISCLAIMER, Provider};
use crate::output::confidence_bar;
use crate::tui::app::{App, Input, LogLevel, Mode, Panel, Popup};
use crate::tui::ascii::HEALTHWISE_LOGO;
use crate::tui::theme::{Theme, ThemeKind};

pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;

    // clear with bg color
    frame.render_widget(Clear, frame.area());
    frame.render_widget(Block::default().style(theme.base()), frame.area());

    // header + content + footer
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, main[0]);
    render_content(frame, app, main[1]);
    render_footer(frame, app, main[2]);

    match app.popup {
        Popup::Themes => render_theme_popup(frame, app),
        Popup::SetupProvider => render_provider_popup(frame, app),
        Popup::SetupApiKey => render_api_key_popup(frame, app),
        Popup::None => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .style(theme.base());
    frame.render_widget(block, area);

    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(46), Constraint::Min(20)])
        .margin(1)
        .split(area);

    let logo: Vec<Line> = HEALTHWISE_LOGO
        .iter()
        .map(|&line| Line::styled(line, theme.accent()))
        .collect();
    frame.render_widget(Paragraph::new(logo).style(theme.base()), inner[0]);

    let latency = app
        .latency_ms
        .map(|ms| format!("{ms}ms"))
        .unwrap_or_else(|| "-".to_string());

    let mode = match app.mode {
        Mode::Normal => "normal",
        Mode::Insert => "insert",
    };

    let info = vec![
        Line::from(vec![
            Span::styled("| ", theme.muted()),
            Span::styled("health insights from your symptoms", theme.accent()),
        ]),
        Line::from(vec![
            Span::styled("| AI: ", theme.muted()),
            Span::styled(app.provider.name(), theme.base()),
            Span::styled(format!(" ({})", app.model), theme.muted()),
            Span::styled(" | ", theme.muted()),
            Span::styled(latency, theme.accent()),
        ]),
        Line::from(vec![
            Span::styled("| Mode: ", theme.muted()),
            Span::styled(mode, theme.accent()),
        ]),
        Line::from(vec![
            Span::styled("| ", theme.muted()),
            Span::styled("not a substitute for professional medical advice", theme.warning()),
        ]),
    ];
    frame.render_widget(Paragraph::new(info).style(theme.base()), inner[1]);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    // form on the left, insights and logs on the right
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let form = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(cols[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(cols[1]);

    render_input(
        frame,
        app,
        form[0],
        Panel::Symptoms,
        " Symptoms ",
        "press 'i' and list what you are experiencing, e.g. fever, headache, fatigue",
        &app.symptoms,
    );
    render_input(
        frame,
        app,
        form[1],
        Panel::History,
        " Medical History (optional) ",
        "relevant conditions, allergies, or medications",
        &app.history,
    );
    render_insights(frame, app, right[0]);
    render_logs(frame, app, right[1]);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = Line::from(vec![
        Span::styled(" Enter ", theme.base().bg(theme.accent).fg(theme.bg)),
        Span::styled(" Get insights ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("i ", theme.accent()),
        Span::styled("Edit ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("Tab ", theme.accent()),
        Span::styled("Panels ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("y ", theme.accent()),
        Span::styled("Copy ", theme.muted()),
        Span::styled("x ", theme.accent()),
        Span::styled("Export ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("t ", theme.accent()),
        Span::styled("Theme ", theme.muted()),
        Span::styled("| ", theme.border()),
        Span::styled("q ", theme.accent()),
        Span::styled("Quit ", theme.muted()),
    ]);

    let paragraph = Paragraph::new(line)
        .style(theme.base())
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn panel_block<'a>(app: &App, panel: Panel, title: impl Into<String>) -> Block<'a> {
    let theme = &app.theme;
    let border_style = if app.panel == panel {
        theme.accent()
    } else {
        theme.border()
    };

    Block::default()
        .title(Span::styled(title.into(), theme.title()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme.base())
}

fn render_input(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    panel: Panel,
    title: &str,
    placeholder: &str,
    input: &Input,
) {
    let theme = &app.theme;
    let editing = app.mode == Mode::Insert && app.panel == panel && app.popup == Popup::None;

    let content: Vec<Line> = if input.value().is_empty() && !editing {
        vec![Line::styled(placeholder.to_string(), theme.muted())]
    } else {
        input
            .value()
            .split('\n')
            .map(|l| Line::styled(l.to_string(), theme.base()))
            .collect()
    };

    let paragraph = Paragraph::new(content)
        .block(panel_block(app, panel, title))
        .style(theme.base())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);

    // real terminal cursor while typing
    if editing {
        let inner = area.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        let (line, col) = input.line_col();
        let x = inner.x + col as u16;
        let y = inner.y + line as u16;
        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn render_insights(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = area.width.saturating_sub(4) as usize;

    let content = if app.loading {
        vec![Line::styled("generating insights...", theme.muted())]
    } else if let Some((category, message)) = &app.error {
        vec![
            Line::styled(format!("error ({category})"), theme.error()),
            Line::from(""),
            Line::styled(message.clone(), theme.base()),
        ]
    } else if let Some(result) = &app.result {
        insight_lines(result, theme, width)
    } else {
        vec![Line::styled(
            "enter your symptoms to receive health insights and suggestions",
            theme.muted(),
        )]
    };

    let paragraph = Paragraph::new(content)
        .block(panel_block(app, Panel::Insights, " Health Insights & Suggestions "))
        .style(theme.base())
        .wrap(Wrap { trim: false })
        .scroll((app.insights_scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn insight_lines(result: &DiagnosisResult, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled("Potential Conditions", theme.heading())];

    if result.diagnoses.is_empty() {
        lines.push(Line::styled("  none reported", theme.muted()));
    }
    let bar_width = width.saturating_sub(10).clamp(10, 40);
    for d in &result.diagnoses {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", d.name), theme.base()),
            Span::styled(format!("  {}%", d.percent()), theme.accent()),
        ]));
        lines.push(Line::styled(
            format!("  {}", confidence_bar(d.confidence, bar_width)),
            theme.accent(),
        ));
    }

    lines.push(Line::from(""));
    let (title, body) = result.recommendation();
    let (marker, style) = if result.seek_care() {
        ("[!]", theme.error())
    } else {
        ("[+]", theme.success())
    };
    lines.push(Line::styled("Recommendation", theme.heading()));
    lines.push(Line::styled(format!("  {marker} {title}"), style));
    lines.push(Line::styled(format!("  {body}"), theme.base()));

    if let Some(advice) = result.advice.as_deref().filter(|a| !a.trim().is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::styled("Additional Advice", theme.heading()));
        lines.push(Line::styled(format!("  {advice}"), theme.base()));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled("Potential OTC Medication Suggestions", theme.heading()));
    let meds = result.recommendations();
    if meds.is_empty() {
        lines.push(Line::styled(
            "  No medication suggestions available.",
            theme.muted(),
        ));
    }
    for med in meds {
        lines.push(Line::styled(format!("  * {}", med.medicine_name), theme.accent()));
        if let Some(dosage) = &med.dosage_suggestion {
            lines.push(Line::from(vec![
                Span::styled("    Dosage: ", theme.muted()),
                Span::styled(dosage.clone(), theme.base()),
            ]));
        }
        if let Some(precautions) = &med.precautions {
            lines.push(Line::from(vec![
                Span::styled("    Precautions: ", theme.muted()),
                Span::styled(precautions.clone(), theme.base()),
            ]));
        }
        if med.dosage_suggestion.is_none() && med.precautions.is_none() {
            lines.push(Line::styled(
                "    No specific dosage or precaution info provided. Always follow package \
                 instructions and consult a doctor.",
                theme.muted(),
            ));
        }
    }

    if let Some(disclaimer) = result.medicine_disclaimer() {
        lines.push(Line::from(""));
        lines.push(Line::styled("Important Disclaimer", theme.warning()));
        lines.push(Line::styled(format!("  {disclaimer}"), theme.base()));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled(OVERALL_DISCLAIMER, theme.muted()));

    lines
}

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let lines: Vec<Line> = app
        .logs
        .iter()
        .map(|entry| {
            let (prefix, style) = match entry.level {
                LogLevel::Ok => ("[OK]", theme.success()),
                LogLevel::Info => ("[--]", theme.muted()),
                LogLevel::Warn => ("[!!]", theme.warning()),
                LogLevel::Error => ("[ERR]", theme.error()),
            };
            Line::from(vec![
                Span::styled(format!("{prefix} "), style),
                Span::styled(entry.message.as_str(), theme.base()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(panel_block(app, Panel::Logs, " Logs "))
        .style(theme.base())
        .scroll((app.log_scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_theme_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(40, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" select theme ", theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let mut lines: Vec<Line> = ThemeKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| selectable(theme, kind.name(), i == app.theme_scroll))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" j/k ", theme.accent()),
        Span::styled("navigate  ", theme.muted()),
        Span::styled("enter ", theme.accent()),
        Span::styled("select  ", theme.muted()),
        Span::styled("esc ", theme.accent()),
        Span::styled("close", theme.muted()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block).style(theme.base()), area);
}

fn render_provider_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" healthwise setup - ai provider ", theme.title()))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let mut lines = vec![
        Line::styled("no api key was found. pick a provider:", theme.muted()),
        Line::from(""),
    ];
    for (i, provider) in Provider::ALL.iter().enumerate() {
        lines.push(selectable(theme, provider.name(), i == app.setup_provider_index));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("j/k ", theme.accent()),
        Span::styled("navigate  ", theme.muted()),
        Span::styled("enter ", theme.accent()),
        Span::styled("select  ", theme.muted()),
        Span::styled("esc ", theme.accent()),
        Span::styled("quit", theme.muted()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block).style(theme.base()), area);
}

fn render_api_key_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(70, 40, frame.area());
    frame.render_widget(Clear, area);

    let provider = app.setup_provider();
    let block = Block::default()
        .title(Span::styled(
            format!(" healthwise setup - {} api key ", provider.name()),
            theme.title(),
        ))
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());

    let masked = "*".repeat(app.api_key_input.value().chars().count());
    let mut lines = vec![
        Line::styled("paste your api key:", theme.muted()),
        Line::from(""),
        Line::from(vec![Span::styled("key: ", theme.accent()), Span::raw(masked)]),
        Line::from(""),
    ];

    if let Some(err) = &app.setup_error {
        lines.push(Line::styled(format!("error: {err}"), theme.error()));
        lines.push(Line::from(""));
    }

    lines.push(Line::styled(
        format!("or set one of: {}", provider.key_vars().join(", ")),
        theme.muted(),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("enter ", theme.accent()),
        Span::styled("continue  ", theme.muted()),
        Span::styled("esc ", theme.accent()),
        Span::styled("back  ", theme.muted()),
        Span::styled("ctrl+u ", theme.accent()),
        Span::styled("clear", theme.muted()),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);

    let inner = area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    // "key: " is 5 chars
    let x = inner.x + 5 + app.api_key_input.cursor() as u16;
    if x < inner.right() {
        frame.set_cursor_position((x, inner.y + 2));
    }
}

fn selectable<'a>(theme: &Theme, label: &'a str, selected: bool) -> Line<'a> {
    if selected {
        Line::from(vec![
            Span::styled(" > ", theme.accent()),
            Span::styled(label, theme.selected().fg(theme.accent)),
        ])
    } else {
        Line::from(Span::styled(format!("   {label}"), theme.base()))
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
