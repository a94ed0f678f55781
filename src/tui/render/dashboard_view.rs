use chrono::{Local, Timelike};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Cell, Chart, Dataset, GraphType, Paragraph, Row, Sparkline, Table,
};

use crate::model::AlertKind;
use crate::ops::{analytics, auth, market};
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::helpers::{bar, fit, panel, priority_symbol};

const CARD_H: u16 = 4;
const SPARK_W: u16 = 12;

pub fn render_dashboard_view(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // greeting
            Constraint::Length(CARD_H), // KPI cards
            Constraint::Min(1),         // panels
        ])
        .split(area);

    render_greeting(frame, app, rows[0]);
    render_kpi_cards(frame, app, rows[1]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    render_task_column(frame, app, cols[0]);
    render_market_column(frame, app, cols[1]);
}

fn render_greeting(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let name = app
        .state
        .user()
        .and_then(|u| u.name.split_whitespace().next())
        .unwrap_or("");
    let line = Line::from(vec![
        Span::styled(
            format!(" Hi {}. ", name),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            analytics::greeting(Local::now().hour()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_kpi_cards(frame: &mut Frame, app: &App, area: Rect) {
    let cards = analytics::kpi_cards(&app.state);
    if cards.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let bg = app.theme.background;
    for (card, cell) in cards.iter().zip(cells.iter()) {
        let (arrow, color) = if card.up {
            ("\u{2191}", app.theme.green)
        } else {
            ("\u{2193}", app.theme.red)
        };
        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", card.value),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format!(" {} ", arrow), Style::default().fg(color).bg(bg)),
                Span::styled(card.note, Style::default().fg(app.theme.dim).bg(bg)),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(panel(&app.theme, card.label)),
            *cell,
        );
    }
}

// ---------------------------------------------------------------------------
// Task panels
// ---------------------------------------------------------------------------

fn render_task_column(frame: &mut Frame, app: &App, area: Rect) {
    let is_admin = auth::can_view_reports(app.state.user());
    let mut constraints = vec![
        Constraint::Length(7), // distribution
        Constraint::Length(7), // workload
    ];
    if is_admin {
        constraints.push(Constraint::Length(6));
    }
    constraints.push(Constraint::Min(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_distribution(frame, app, chunks[0]);
    render_workload(frame, app, chunks[1]);
    if is_admin {
        render_system_health(frame, app, chunks[2]);
    }
    render_recent_tasks(frame, app, chunks[chunks.len() - 1]);
}

fn render_distribution(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let counts = app.state.task_counts();
    let bar_w = (area.width as usize).saturating_sub(26).max(4);
    let lines: Vec<Line> = analytics::task_distribution(&counts)
        .into_iter()
        .map(|(status, share)| {
            let color = theme.status_color(status);
            Line::from(vec![
                Span::styled(
                    format!(" {}", fit(status.label(), 12)),
                    Style::default().fg(theme.text).bg(theme.background),
                ),
                Span::styled(
                    bar(share.percent, bar_w),
                    Style::default().fg(color).bg(theme.background),
                ),
                Span::styled(
                    format!(" {:>2} {:>3}%", share.count, share.percent),
                    Style::default().fg(theme.dim).bg(theme.background),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(panel(theme, "Task Distribution")),
        area,
    );
}

fn render_workload(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let rows = analytics::workload(&app.state);
    let max = rows.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
    let bar_w = (area.width as usize).saturating_sub(24).max(4);
    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::from(Span::styled(
            " No tasks assigned",
            Style::default().fg(theme.dim).bg(theme.background),
        ))]
    } else {
        rows.iter()
            .map(|(name, n)| {
                let percent = (*n * 100 / max) as u32;
                Line::from(vec![
                    Span::styled(
                        format!(" {}", fit(name, 16)),
                        Style::default().fg(theme.text).bg(theme.background),
                    ),
                    Span::styled(
                        bar(percent, bar_w),
                        Style::default().fg(theme.cyan).bg(theme.background),
                    ),
                    Span::styled(
                        format!(" {:>2}", n),
                        Style::default().fg(theme.dim).bg(theme.background),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(lines).block(panel(theme, "Team Workload")),
        area,
    );
}

fn render_system_health(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let lines: Vec<Line> = analytics::system_health()
        .iter()
        .map(|metric| {
            let color = theme.health_color(metric.health());
            Line::from(vec![
                Span::styled(
                    format!(" {}", fit(metric.label, 18)),
                    Style::default().fg(theme.text).bg(theme.background),
                ),
                Span::styled("\u{25CF} ", Style::default().fg(color).bg(theme.background)),
                Span::styled(
                    format!("{:.1}%", metric.value),
                    Style::default().fg(theme.text_bright).bg(theme.background),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(panel(theme, "System Health")),
        area,
    );
}

fn render_recent_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let title_w = (area.width as usize).saturating_sub(18);
    let tasks = app.state.recent_tasks(app.config.ui.recent_tasks);
    let lines: Vec<Line> = if tasks.is_empty() {
        vec![Line::from(Span::styled(
            " No recent tasks",
            Style::default().fg(theme.dim).bg(bg),
        ))]
    } else {
        tasks
            .iter()
            .map(|task| {
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", priority_symbol(task.priority)),
                        Style::default().fg(theme.priority_color(task.priority)).bg(bg),
                    ),
                    Span::styled(
                        fit(&task.title, title_w),
                        Style::default().fg(theme.text).bg(bg),
                    ),
                    Span::styled(
                        format!(" {}", task.status),
                        Style::default().fg(theme.status_color(task.status)).bg(bg),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(lines).block(panel(theme, "Recent Tasks")),
        area,
    );
}

// ---------------------------------------------------------------------------
// Market panels
// ---------------------------------------------------------------------------

fn render_market_column(frame: &mut Frame, app: &App, area: Rect) {
    if !app.company_query.is_empty() {
        render_company_results(frame, app, area);
        return;
    }

    let alerts = app.market.alerts.visible().len() as u16;
    let inventory = app.market.inventory.len() as u16;
    let advanced = auth::can_view_advanced_metrics(app.state.user());

    let mut constraints = vec![Constraint::Length(alerts.max(1) + 2)];
    if advanced {
        constraints.push(Constraint::Length(app.market.kpis.len() as u16 + 2));
        constraints.push(Constraint::Min(6));
        constraints.push(Constraint::Length(app.market.watchlist.len() as u16 + 3));
    }
    constraints.push(Constraint::Length(inventory + 3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_alerts(frame, app, chunks[0]);
    if advanced {
        render_market_indices(frame, app, chunks[1]);
        render_stock_chart(frame, app, chunks[2]);
        render_watchlist(frame, app, chunks[3]);
    }
    render_inventory(frame, app, chunks[chunks.len() - 1]);
}

fn alert_color(theme: &Theme, kind: AlertKind) -> Color {
    match kind {
        AlertKind::Critical => theme.red,
        AlertKind::Warning => theme.yellow,
        AlertKind::Info => theme.blue,
    }
}

fn render_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let alerts = app.market.alerts.visible();
    let lines: Vec<Line> = if alerts.is_empty() {
        vec![Line::from(Span::styled(
            " All clear",
            Style::default().fg(theme.dim).bg(bg),
        ))]
    } else {
        alerts
            .iter()
            .map(|alert| {
                Line::from(vec![
                    Span::styled(
                        format!(" {}: ", alert.kind.title()),
                        Style::default()
                            .fg(alert_color(theme, alert.kind))
                            .bg(bg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        alert.message.clone(),
                        Style::default().fg(theme.text).bg(bg),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(lines).block(panel(theme, "Smart Alerts")),
        area,
    );
}

fn render_market_indices(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let block = panel(theme, "Market Indices");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (i, kpi) in app.market.kpis.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(SPARK_W)])
            .split(row);
        let line = Line::from(vec![
            Span::styled(
                format!(" {}", fit(&kpi.label, 13)),
                Style::default().fg(theme.text).bg(bg),
            ),
            Span::styled(
                format!("{:>10} ", kpi.value),
                Style::default().fg(theme.text_bright).bg(bg),
            ),
            Span::styled(
                market::format_change(kpi.change),
                Style::default().fg(theme.change_color(kpi.change)).bg(bg),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), cols[0]);
        let spark = Sparkline::default()
            .data(&kpi.trend)
            .style(Style::default().fg(theme.change_color(kpi.change)).bg(bg));
        frame.render_widget(spark, cols[1]);
    }
}

fn render_stock_chart(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let points = &app.market.history;
    let (actual, forecast) = market::history_series(points);
    let [lo, hi] = market::history_bounds(points);
    let last = points.len().saturating_sub(1);

    let datasets = vec![
        Dataset::default()
            .name("Actual")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.cyan))
            .data(&actual),
        Dataset::default()
            .name("Forecast")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.purple))
            .data(&forecast),
    ];
    let label = |s: String| Span::styled(s, Style::default().fg(theme.dim));
    let x_labels = vec![
        label(points.first().map(|p| p.name.clone()).unwrap_or_default()),
        label(points.get(last).map(|p| p.name.clone()).unwrap_or_default()),
    ];
    let chart = Chart::new(datasets)
        .block(panel(theme, "AAPL Price Forecast"))
        .style(Style::default().bg(theme.background))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.dim))
                .bounds([0.0, last as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.dim))
                .bounds([lo, hi])
                .labels(vec![label(format!("{:.0}", lo)), label(format!("{:.0}", hi))]),
        );
    frame.render_widget(chart, area);
}

fn render_watchlist(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let header = Row::new(
        ["Symbol", "Company", "Price", "Change", "Signal"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(theme.text_bright).bg(bg));

    let rows: Vec<Row> = app
        .market
        .watchlist
        .iter()
        .map(|w| {
            let change_color = if w.change.starts_with('-') {
                theme.red
            } else {
                theme.green
            };
            Row::new(vec![
                Cell::from(w.symbol.clone())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(w.company.clone()),
                Cell::from(w.price.clone()),
                Cell::from(w.change.clone()).style(Style::default().fg(change_color)),
                Cell::from(w.confidence.clone()).style(Style::default().fg(theme.dim)),
            ])
            .style(Style::default().fg(theme.text).bg(bg))
        })
        .collect();

    let widths = [
        Constraint::Length(6),  // Symbol
        Constraint::Min(12),    // Company
        Constraint::Length(7),  // Price
        Constraint::Length(6),  // Change
        Constraint::Length(10), // Signal
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(theme, "AI Watchlist"));
    frame.render_widget(table, area);
}

fn render_inventory(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let header = Row::new(
        ["Item", "Category", "Stock", "Reorder", "Status"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
    )
    .style(Style::default().fg(theme.text_bright).bg(bg));

    let rows: Vec<Row> = app
        .market
        .inventory
        .iter()
        .map(|item| {
            let status = market::inventory_status(item);
            Row::new(vec![
                Cell::from(item.item.clone()),
                Cell::from(item.category.clone()),
                Cell::from(item.stock.to_string()),
                Cell::from(item.reorder_level.to_string()),
                Cell::from(status.label())
                    .style(Style::default().fg(theme.stock_color(status))),
            ])
            .style(Style::default().fg(theme.text).bg(bg))
        })
        .collect();

    let widths = [
        Constraint::Min(12),    // Item
        Constraint::Length(11), // Category
        Constraint::Length(5),  // Stock
        Constraint::Length(7),  // Reorder
        Constraint::Length(8),  // Status
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(theme, "Inventory Status"));
    frame.render_widget(table, area);
}

fn render_company_results(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let matches = market::search_companies(&app.market.companies, &app.company_query);
    let title = format!("Companies: \"{}\" ({})", app.company_query, matches.len());
    let name_w = (area.width as usize).saturating_sub(32).max(6);

    let lines: Vec<Line> = if matches.is_empty() {
        vec![Line::from(Span::styled(
            " No companies match",
            Style::default().fg(theme.dim).bg(bg),
        ))]
    } else {
        matches
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled(
                        format!(" {}", fit(&c.symbol, 6)),
                        Style::default()
                            .fg(theme.text_bright)
                            .bg(bg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(fit(&c.name, name_w), Style::default().fg(theme.text).bg(bg)),
                    Span::styled(
                        format!("{:>9.2} ", c.price),
                        Style::default().fg(theme.text_bright).bg(bg),
                    ),
                    Span::styled(
                        market::format_change(c.change),
                        Style::default().fg(theme.change_color(c.change)).bg(bg),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(panel(theme, &title)), area);
}
