use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::{AddField, Mode, TuiApp};

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Posts table
            Constraint::Length(3), // Download gauge
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_search_box(frame, app, chunks[0]);
    render_posts_table(frame, app, chunks[1]);
    render_gauge(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if app.mode == Mode::Add {
        render_add_dialog(frame, app);
    }
}

fn render_search_box(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let is_active = app.mode == Mode::Search;
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = if is_active {
        format!("{}█", app.filter)
    } else if app.filter.is_empty() {
        "Press / to search".to_string()
    } else {
        app.filter.clone()
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_posts_table(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let is_active = app.mode == Mode::Normal;
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let filtered = app.filtered();

    let rows: Vec<Row> = filtered
        .iter()
        .map(|post| {
            Row::new(vec![
                post.id.to_string(),
                post.user_id.to_string(),
                post.title.clone(),
                post.body.replace('\n', " "),
            ])
        })
        .collect();

    let header = Row::new(vec!["ID", "User", "Title", "Body"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Percentage(35),
        Constraint::Percentage(55),
    ];

    let title = format!(" Posts ({}/{}) ", filtered.len(), app.posts.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let selected = if filtered.is_empty() {
        None
    } else {
        Some(app.selected.min(filtered.len() - 1))
    };
    let mut state = TableState::default().with_selected(selected);

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_gauge(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let percent = app.progress.unwrap_or(0);
    let label = match app.progress {
        Some(p) => format!("{}%", p),
        None => "idle".to_string(),
    };

    let gauge = Gauge::default()
        .block(Block::default().title(" Download ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent)
        .label(label);

    frame.render_widget(gauge, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.is_downloading {
        "Downloading posts...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        let help = "j/k:Navigate  /:Search  r:Refresh  a:Add  d:Delete  s:Download  q:Quit";
        match app.last_synced_at {
            Some(t) => format!("{}  |  Last sync {}", help, t.format("%H:%M:%S")),
            None => help.to_string(),
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

fn render_add_dialog(frame: &mut Frame, app: &TuiApp) {
    let area = centered_rect(50, 60, frame.area());

    let block = Block::default()
        .title(" Add Post ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    render_dialog_field(
        frame,
        "User ID",
        &app.dialog.user_id,
        app.dialog.field == AddField::UserId,
        fields[0],
    );
    render_dialog_field(
        frame,
        "Title",
        &app.dialog.title,
        app.dialog.field == AddField::Title,
        fields[1],
    );
    render_dialog_field(
        frame,
        "Body",
        &app.dialog.body,
        app.dialog.field == AddField::Body,
        fields[2],
    );

    let hint = Paragraph::new("Tab:Next field  Enter:Save  Esc:Cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, fields[3]);
}

fn render_dialog_field(frame: &mut Frame, label: &str, value: &str, active: bool, area: Rect) {
    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = if active {
        format!("{}█", value)
    } else {
        value.to_string()
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
