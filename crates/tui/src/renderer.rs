use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_protocol::ThemeToken;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::TuiApp;

pub fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background
        | ThemeToken::SectionBackground
        | ThemeToken::SectionAltBackground
        | ThemeToken::CardBackground => Color::Reset,
        ThemeToken::Heading | ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary | ThemeToken::NavText => Color::Gray,
        ThemeToken::TextMuted | ThemeToken::NavBorder | ThemeToken::CardBorder => Color::DarkGray,
        ThemeToken::Accent | ThemeToken::NavActive | ThemeToken::LevelFill => Color::LightBlue,
        ThemeToken::NavBackground => Color::Black,
        ThemeToken::ChipIdle | ThemeToken::ImagePlaceholder | ThemeToken::LevelTrack => {
            Color::DarkGray
        }
        ThemeToken::ChipIdleText | ThemeToken::ChipActiveText => Color::White,
        ThemeToken::ChipActive => Color::Blue,
        ThemeToken::TagBackground => Color::Reset,
        ThemeToken::TagText => Color::Cyan,
    }
}

/// Nav row: site title, then one entry per section with the active one lit.
fn nav_line(app: &TuiApp) -> Line<'static> {
    let active = app.active_section();
    let mut spans = vec![Span::styled(
        format!(" {} ", app.site().title),
        Style::default()
            .fg(theme_to_color(ThemeToken::Heading))
            .add_modifier(Modifier::BOLD),
    )];
    for section in &app.site().sections {
        let is_active = active.as_deref() == Some(section.id.as_str());
        let style = if is_active {
            Style::default()
                .fg(theme_to_color(ThemeToken::NavActive))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme_to_color(ThemeToken::NavText))
        };
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(section.heading.to_string(), style));
    }
    Line::from(spans)
}

pub fn render_tui(app: &mut TuiApp) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        let term_size = terminal.size()?;
        let body_height = term_size.height.saturating_sub(2);
        let doc = app.layout(term_size.width);
        app.observe(&doc, term_size.width, body_height);

        terminal.draw(|frame| {
            let area = frame.area();

            let nav_area = Rect::new(0, 0, area.width, 1);
            frame.render_widget(
                Paragraph::new(nav_line(app))
                    .style(Style::default().bg(theme_to_color(ThemeToken::NavBackground))),
                nav_area,
            );

            let content_area = Rect::new(0, 1, area.width, body_height);
            let scroll = u16::try_from(app.scroll()).unwrap_or(u16::MAX);
            frame.render_widget(
                Paragraph::new(doc.lines.clone())
                    .block(Block::default())
                    .scroll((scroll, 0)),
                content_area,
            );

            let focused = app
                .site()
                .sections
                .get(app.focus())
                .map(|s| s.heading.to_string())
                .unwrap_or_default();
            let filter = app
                .filter(app.focus())
                .map(ToString::to_string)
                .unwrap_or_default();
            let help_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
            frame.render_widget(
                Paragraph::new(format!(
                    " {focused}: {filter} │ Tab focus │ ←→ filter │ ↑↓ PgUp PgDn scroll │ q quit "
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                help_area,
            );
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            let page = isize::from(i16::try_from(body_height).unwrap_or(i16::MAX));
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Tab => app.focus_next(&doc),
                    KeyCode::Left => {
                        app.cycle_filter(false);
                    }
                    KeyCode::Right => {
                        app.cycle_filter(true);
                    }
                    KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
                    KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
                    KeyCode::PageUp => app.scroll_by(-page),
                    KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(page),
                    KeyCode::Home => app.scroll_by(isize::MIN),
                    KeyCode::End => app.scroll_by(isize::MAX),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app.scroll_by(3),
                    MouseEventKind::ScrollUp => app.scroll_by(-3),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
