use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::ui::{
    clip_art, tab_rows, App, DetailGrid, Focus, PanelLayout, PanelWidget, COLUMN_SPACING,
    SPINNER_FRAMES, TABS_SEPARATOR,
};

const BREADCRUMB_SEPARATOR: &str = "►";
const RULE: &str = "─";

pub fn draw(frame: &mut Frame, app: &App) {
    // Leave a blank screen behind on exit
    if app.should_quit {
        return;
    }
    let area = frame.area();
    if app.easter_egg {
        frame.render_widget(Block::default().style(app.theme.background()), area);
        draw_easter_egg(frame, app, area);
        return;
    }
    let Some(layout) = app.layout else {
        return;
    };

    let area = Rect {
        width: area.width.min(layout.term_width),
        ..area
    };
    frame.render_widget(Block::default().style(app.theme.background()), area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout.chrome.title_height), // Title + breadcrumb
            Constraint::Length(1),                          // Rule
            Constraint::Length(layout.center_height),       // Panels
            Constraint::Length(1),                          // Rule
            Constraint::Length(layout.chrome.footer_height), // Help
        ])
        .split(area);

    draw_title(frame, app, chunks[0]);
    draw_rule(frame, app, chunks[1]);

    let center = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(layout.picker_outer_width()),
            Constraint::Length(layout.detail_outer_width()),
        ])
        .split(chunks[2]);

    draw_picker(frame, app, center[0]);
    if let Some(grid) = app.active_grid() {
        draw_detail_region(frame, app, grid, &layout, center[1]);
    }

    draw_rule(frame, app, chunks[3]);
    draw_footer(frame, app, chunks[4]);
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];

    let mut spans = vec![
        Span::styled(format!(" {}", app.title), theme.accent()),
        Span::raw(format!(" {}", spinner)),
    ];
    let mut segment = |label: &str, name: &str| {
        spans.push(Span::styled(
            format!("  {} {} ", label, BREADCRUMB_SEPARATOR),
            theme.muted(),
        ));
        spans.push(Span::styled(name.to_string(), theme.breadcrumb()));
    };
    if !app.selection.schema.is_empty() {
        segment("schema", &app.selection.schema);
    }
    if let Some(table) = &app.selection.table {
        segment("table", table);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_rule(frame: &mut Frame, app: &App, area: Rect) {
    let rule = RULE.repeat(usize::from(area.width));
    frame.render_widget(Paragraph::new(rule).style(app.theme.rule()), area);
}

fn draw_picker(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Picker;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(format!(" {} ", app.selection.schema))
        .title_style(theme.title_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Count header
            Constraint::Min(0),    // Table names
        ])
        .split(inner);

    let count = app.picker.items.len();
    let header = format!(" {} {}", count, if count == 1 { "table" } else { "tables" });
    frame.render_widget(Paragraph::new(header).style(theme.muted()), chunks[0]);

    let items: Vec<ListItem> = app
        .picker
        .items
        .iter()
        .map(|name| {
            ListItem::new(format!(" {}", name)).style(Style::default().fg(theme.text_primary))
        })
        .collect();
    let list = List::new(items).highlight_style(if focused {
        theme.selected().add_modifier(Modifier::BOLD)
    } else {
        theme.selected()
    });

    let rows = Rect {
        width: app.picker.width.min(chunks[1].width),
        height: app.picker.height.min(chunks[1].height),
        ..chunks[1]
    };
    let mut state = app.picker.state.clone();
    frame.render_stateful_widget(list, rows, &mut state);
}

fn draw_detail_region(
    frame: &mut Frame,
    app: &App,
    grid: &DetailGrid,
    layout: &PanelLayout,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout.tab_bar_height), // Tabs
            Constraint::Min(0),                        // Grid
        ])
        .split(area);

    draw_tab_bar(frame, app, layout, chunks[0]);
    draw_detail_content(frame, app, grid, chunks[1]);
}

fn draw_tab_bar(frame: &mut Frame, app: &App, layout: &PanelLayout, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::TabBar;

    let lines: Vec<Line> = tab_rows(layout.detail_width)
        .into_iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (i, tab) in row.into_iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(TABS_SEPARATOR, theme.muted()));
                }
                let style = if tab == app.selection.tab {
                    theme.accent().add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default().fg(theme.text_secondary)
                };
                spans.push(Span::styled(tab.title(), style));
            }
            Line::from(spans).centered()
        })
        .collect();

    let tabs = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused)),
    );
    frame.render_widget(tabs, area);
}

fn draw_detail_content(frame: &mut Frame, app: &App, grid: &DetailGrid, area: Rect) {
    let theme = &app.theme;
    let focused = grid.is_focused();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let dataset = &grid.dataset;
    if dataset.is_empty() {
        let middle = Rect {
            y: inner.y + inner.height / 2,
            height: inner.height.min(1),
            ..inner
        };
        let empty = Paragraph::new(Line::from(dataset.no_data_text()).centered())
            .style(theme.muted());
        frame.render_widget(empty, middle);
        return;
    }

    let header = Row::new(
        dataset
            .headers()
            .into_iter()
            .map(|h| Cell::from(h).style(theme.header())),
    );
    let rows = dataset.rows.iter().map(|row| {
        Row::new(row.iter().map(|cell| Cell::from(cell.as_str())))
            .style(Style::default().fg(theme.text_primary))
    });
    let widths = dataset.widths.map(Constraint::Length);

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .highlight_style(if focused {
            theme.selected().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        });

    // header row plus the rows the grid was sized for
    let body = Rect {
        height: grid.height.saturating_add(1).min(inner.height),
        ..inner
    };
    let mut state = grid.state.clone();
    frame.render_stateful_widget(table, body, &mut state);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .help_lines()
        .into_iter()
        .map(|l| Line::from(format!(" {}", l)))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(app.theme.muted()), area);
}

fn draw_easter_egg(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = clip_art(area.height)
        .iter()
        .map(|&row| Line::from(row))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(app.theme.text_accent)),
        area,
    );
}
