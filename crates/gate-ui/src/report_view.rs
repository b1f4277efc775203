//! Employee activity report: stat cards, efficiency gauge and log table.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use gate_core::formatting::{efficiency_ratio, format_count, format_efficiency};
use gate_data::report::EmployeeReport;

use crate::themes::Theme;

/// Column widths of the log table, in terminal cells.
const TIME_WIDTH: u16 = 22;
const GATE_WIDTH: u16 = 8;
const QR_WIDTH: u16 = 10;
const CONFIDENCE_WIDTH: u16 = 12;
const STATUS_WIDTH: u16 = 26;

/// Render the full report for one employee into `area`.
pub fn render_report_view(frame: &mut Frame, area: Rect, report: &EmployeeReport, theme: &Theme) {
    let [header_area, cards_area, gauge_area, table_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .areas(area);

    render_header(frame, header_area, report, theme);
    render_cards(frame, cards_area, report, theme);
    render_gauge(frame, gauge_area, report, theme);
    render_log_table(frame, table_area, report, theme);
}

fn render_header(frame: &mut Frame, area: Rect, report: &EmployeeReport, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Activity report: ", theme.label),
        Span::styled(report.title(), theme.header),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Gate Reports "),
        ),
        area,
    );
}

fn render_cards(frame: &mut Frame, area: Rect, report: &EmployeeReport, theme: &Theme) {
    let stats = &report.stats;
    let cards = [
        ("Granted", format_count(stats.granted), theme.success),
        ("Denied", format_count(stats.denied), theme.danger),
        ("Incidents", format_count(stats.suspicious), theme.warning),
        (
            "Face match",
            format_efficiency(stats.efficiency),
            theme.efficiency_style(stats.efficiency),
        ),
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((label, value, style), card_area) in cards.into_iter().zip(areas.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(value, style)),
            Line::from(Span::styled(label.to_uppercase(), theme.label)),
        ]);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.table_border),
                ),
            *card_area,
        );
    }
}

fn render_gauge(frame: &mut Frame, area: Rect, report: &EmployeeReport, theme: &Theme) {
    let efficiency = report.stats.efficiency;
    frame.render_widget(
        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border)
                    .title(" Average face match "),
            )
            .gauge_style(theme.gauge)
            .ratio(efficiency_ratio(efficiency))
            .label(format_efficiency(efficiency)),
        area,
    );
}

fn render_log_table(frame: &mut Frame, area: Rect, report: &EmployeeReport, theme: &Theme) {
    let header = Row::new(
        ["Time", "Gate", "QR", "Biometrics", "Status"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = report
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.time.clone()),
                Cell::from(fit_width(&row.gate, GATE_WIDTH)),
                Cell::from(fit_width(&row.qr, QR_WIDTH)),
                Cell::from(row.confidence_label.clone()),
                Cell::from(fit_width(&row.status_label, STATUS_WIDTH))
                    .style(theme.status_style(row.status_tag)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(TIME_WIDTH),
        Constraint::Length(GATE_WIDTH),
        Constraint::Length(QR_WIDTH),
        Constraint::Length(CONFIDENCE_WIDTH),
        Constraint::Length(STATUS_WIDTH),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" Access log ({} entries) ", report.rows.len())),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a bordered message, used for empty reports and fetch failures.
pub fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

/// Cut `s` to at most `width` terminal cells, marking the cut with `…`.
pub fn fit_width(s: &str, width: u16) -> String {
    let width = usize::from(width);
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
