use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table,
        TableState, Wrap,
    },
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cli::i18n::texts;
use crate::controller::{dropdown_options, FormView, CUSTOM_SENTINEL};
use crate::endpoints;
use crate::provider::ProviderSettings;

use super::{
    app::{App, Overlay, ToastKind},
    form::FormField,
    theme::{theme_for, Theme},
};

fn selection_style(theme: &Theme) -> Style {
    if theme.no_color {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    }
}

fn inactive_chip_style(theme: &Theme) -> Style {
    if theme.no_color {
        Style::default()
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}

fn focus_block_style(active: bool, theme: &Theme) -> Style {
    if active {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    }
}

fn pad1(s: &str) -> String {
    format!(" {s}")
}

fn key_bar_line(theme: &Theme, items: &[(&str, &str)]) -> Line<'static> {
    if theme.no_color {
        let parts = items
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();
        return Line::raw(parts.join("  "));
    }

    let base = inactive_chip_style(theme);
    let key = base.add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span<'static>> = vec![Span::styled(" ", base)];
    for (idx, (k, v)) in items.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", base));
        }
        spans.push(Span::styled((*k).to_string(), key));
        spans.push(Span::styled(" ", base));
        spans.push(Span::styled((*v).to_string(), base));
    }
    spans.push(Span::styled(" ", base));
    Line::from(spans)
}

fn key_items(app: &App) -> Vec<(&'static str, &'static str)> {
    if matches!(app.overlay, Overlay::EndpointPicker { .. }) {
        return vec![
            ("↑↓", texts::tui_key_move()),
            ("Enter", texts::tui_key_apply()),
            ("Esc", texts::tui_key_cancel()),
        ];
    }
    if app.form.editing {
        return vec![
            ("←→", texts::tui_key_cursor()),
            ("Enter/Esc", texts::tui_key_done()),
        ];
    }
    vec![
        ("↑↓", texts::tui_key_move()),
        ("Enter", texts::tui_key_edit()),
        ("r", texts::tui_key_reload()),
        ("q", texts::tui_key_quit()),
    ]
}

fn masked(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// Label shown for the dropdown value: preset label, "Custom", or the raw URL.
fn dropdown_display(view: &FormView<'_>) -> String {
    if view.dropdown_value == CUSTOM_SENTINEL {
        return texts::custom_option_label().to_string();
    }
    endpoints::find(view.dropdown_value)
        .map(|preset| preset.label.to_string())
        .unwrap_or_else(|| view.dropdown_value.to_string())
}

fn field_row(app: &App, view: &FormView<'_>, field: FormField) -> (&'static str, String) {
    match field {
        FormField::Endpoint => (texts::base_url_label(), format!("{} ▾", dropdown_display(view))),
        FormField::BaseUrl => {
            let value = &app.form.base_url.value;
            let shown = if value.is_empty() {
                texts::custom_url_placeholder().to_string()
            } else {
                value.clone()
            };
            ("  URL", shown)
        }
        FormField::ApiKey => {
            let value = &app.form.api_key.value;
            let shown = if value.is_empty() {
                texts::api_key_placeholder().to_string()
            } else {
                masked(value)
            };
            (texts::api_key_label(), shown)
        }
    }
}

pub fn render(frame: &mut Frame<'_>, app: &App, snapshot: &ProviderSettings) {
    let view = app.form.controller.view(snapshot);
    let theme = theme_for(view.mode);

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, &view, root[0], &theme);
    render_form(frame, app, &view, root[1], &theme);
    render_footer(frame, app, root[2], &theme);

    if let Overlay::EndpointPicker { selected } = app.overlay {
        render_endpoint_picker(frame, selected, &theme);
    }
}

fn render_header(frame: &mut Frame<'_>, view: &FormView<'_>, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(theme.dim))
        .title(texts::tui_title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            format!(" {}: ", texts::mode_label()),
            Style::default().fg(theme.dim),
        ),
        Span::styled(
            texts::mode_name(view.mode),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_form(frame: &mut Frame<'_>, app: &App, view: &FormView<'_>, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let fields = app.form.fields();
    let rows_data = fields
        .iter()
        .map(|field| field_row(app, view, *field))
        .collect::<Vec<_>>();

    let label_width = rows_data
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(*label))
        .max()
        .unwrap_or(0)
        .saturating_add(2) as u16;

    let rows = rows_data.iter().map(|(label, value)| {
        Row::new(vec![Cell::from(pad1(label)), Cell::from(value.clone())])
    });

    let table = Table::new(rows, [Constraint::Length(label_width), Constraint::Min(10)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(focus_block_style(!app.form.editing, theme))
                .title(texts::tui_fields_title()),
        )
        .row_highlight_style(selection_style(theme))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.form.field_idx.min(fields.len().saturating_sub(1))));
    frame.render_stateful_widget(table, chunks[0], &mut state);

    render_editor(frame, app, chunks[1], theme);
    render_notice(frame, view, chunks[2], theme);
}

fn render_editor(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &Theme) {
    let editing = app.form.editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(focus_block_style(editing, theme))
        .title(if editing {
            texts::tui_editing_title()
        } else {
            texts::tui_input_title()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field = app.form.selected_field();
    let Some(input) = app.form.input(field) else {
        return;
    };

    let text = if field == FormField::ApiKey {
        masked(&input.value)
    } else {
        input.value.clone()
    };
    let (visible, cursor_x) = visible_text_window(&text, input.cursor, inner.width as usize);
    frame.render_widget(
        Paragraph::new(Line::raw(visible)).wrap(Wrap { trim: false }),
        inner,
    );

    if editing {
        let x = inner.x + cursor_x.min(inner.width.saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

fn render_notice(frame: &mut Frame<'_>, view: &FormView<'_>, area: Rect, theme: &Theme) {
    let mut lines = vec![Line::styled(
        pad1(texts::api_key_storage_notice()),
        Style::default().fg(theme.dim),
    )];
    if let Some(link) = view.api_key_link {
        lines.push(Line::from(vec![
            Span::raw(pad1(texts::get_api_key())),
            Span::raw(": "),
            Span::styled(
                link,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_footer(frame: &mut Frame<'_>, app: &App, area: Rect, theme: &Theme) {
    if let Some(toast) = app.toast.as_ref() {
        let color = match toast.kind {
            ToastKind::Info => theme.accent,
            ToastKind::Success => theme.ok,
            ToastKind::Error => theme.err,
        };
        frame.render_widget(
            Paragraph::new(Line::styled(
                pad1(&toast.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            area,
        );
        return;
    }

    frame.render_widget(
        Paragraph::new(key_bar_line(theme, &key_items(app))).alignment(Alignment::Left),
        area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_endpoint_picker(frame: &mut Frame<'_>, selected: usize, theme: &Theme) {
    let options = dropdown_options(texts::custom_option_label());
    let area = centered_rect(60, options.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let items = options
        .iter()
        .map(|(value, label)| {
            if *value == CUSTOM_SENTINEL {
                ListItem::new(Line::raw(pad1(label)))
            } else {
                ListItem::new(Line::from(vec![
                    Span::raw(pad1(label)),
                    Span::raw("  "),
                    Span::styled(*value, Style::default().fg(theme.dim)),
                ]))
            }
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(focus_block_style(true, theme))
                .title(texts::tui_picker_title()),
        )
        .highlight_style(selection_style(theme));

    let mut state = ListState::default();
    state.select(Some(selected.min(options.len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut state);
}

fn visible_text_window(text: &str, cursor: usize, width: usize) -> (String, u16) {
    if width == 0 {
        return (String::new(), 0);
    }

    let chars = text.chars().collect::<Vec<_>>();
    let cursor = cursor.min(chars.len());

    let mut cum: Vec<usize> = Vec::with_capacity(chars.len() + 1);
    cum.push(0);
    for c in &chars {
        let w = UnicodeWidthChar::width(*c).unwrap_or(0);
        cum.push(cum.last().copied().unwrap_or(0).saturating_add(w));
    }

    let cursor_x = cum.get(cursor).copied().unwrap_or(0);
    let target = cursor_x.saturating_sub(width.saturating_sub(1));
    let mut start_idx = 0usize;
    while start_idx < cum.len() && cum[start_idx] < target {
        start_idx += 1;
    }

    let mut end_idx = start_idx;
    while end_idx < chars.len() && cum[end_idx + 1].saturating_sub(cum[start_idx]) <= width {
        end_idx += 1;
    }

    let visible = chars
        .get(start_idx..end_idx)
        .unwrap_or_default()
        .iter()
        .collect::<String>();
    let cursor_in_window = cursor_x.saturating_sub(cum.get(start_idx).copied().unwrap_or(0));

    (visible, cursor_in_window.min(width) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ConfigurationStore, InMemoryStore};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render_app(app: &App, snapshot: &ProviderSettings) -> Buffer {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).expect("terminal created");
        terminal
            .draw(|f| super::render(f, app, snapshot))
            .expect("draw ok");
        terminal.backend().buffer().clone()
    }

    fn all_text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn preset_form_hides_url_row() {
        let snapshot = ProviderSettings::new(Some("https://api.minimax.io/anthropic"), None);
        let app = App::new(&snapshot);
        let text = all_text(&render_app(&app, &snapshot));

        assert!(text.contains("api.minimax.io ▾"));
        assert!(!text.contains("  URL"));
        assert!(text.contains("Preset"));
        assert!(text.contains(endpoints::api_key_url(snapshot.base_url.as_deref())));
    }

    #[test]
    fn custom_form_shows_url_and_masks_key() {
        let snapshot = ProviderSettings::new(Some("https://my.custom.host/anthropic"), Some("sk-1"));
        let app = App::new(&snapshot);
        let text = all_text(&render_app(&app, &snapshot));

        assert!(text.contains("Custom ▾"));
        assert!(text.contains("https://my.custom.host/anthropic"));
        assert!(text.contains("****"));
        assert!(!text.contains("sk-1"));
        assert!(!text.contains("interface-key"));
    }

    #[test]
    fn picker_overlay_lists_sentinel_last() {
        let store = InMemoryStore::new(ProviderSettings::default());
        let mut app = App::new(&store.snapshot());
        app.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &store);
        let text = all_text(&render_app(&app, &store.snapshot()));

        assert!(text.contains("Select endpoint"));
        let minimax = text.find("https://api.minimaxi.com/anthropic").expect("preset row");
        let custom = text.rfind(" Custom").expect("custom row");
        assert!(minimax < custom);
    }

    #[test]
    fn visible_window_scrolls_to_cursor() {
        let (visible, x) = visible_text_window("abcdefghij", 10, 5);
        assert_eq!(visible, "ghij");
        assert_eq!(x, 4);

        let (visible, x) = visible_text_window("abc", 0, 5);
        assert_eq!(visible, "abc");
        assert_eq!(x, 0);
    }
}
