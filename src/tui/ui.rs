// src/tui/ui.rs

//! Frame rendering for the interactive form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row as TableRow, Table, Wrap},
    Frame,
};

use crate::form::{DisplayMode, Selector, NO_OPTIONS_LABEL};
use crate::models::{MatchTier, UniversityMatch};

use super::app::{App, Row};

pub(crate) fn draw(f: &mut Frame, app: &App) {
    match app.form.mode() {
        DisplayMode::Input => draw_form(f, app),
        DisplayMode::Results => draw_results(f, app),
    }

    if let Some(notice) = &app.notice {
        draw_notice(f, notice);
    }
}

fn draw_form(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], "Academic Profile Assessment");

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| form_row_item(app, index, *row))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Profile ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(list, chunks[1]);

    let hint = if app.form.is_loading() {
        "Analyzing your profile..."
    } else {
        "Tab/↑↓ move · Enter open/choose · Esc quit"
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );

    if let Some(slot) = app.open_popup() {
        draw_popup(f, app, &app.selectors[slot]);
    }
}

fn form_row_item(app: &App, index: usize, row: Row) -> ListItem<'static> {
    let focused = index == app.focus;
    let marker = if focused { "› " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let line = match row {
        Row::CvPath => {
            let shown = if app.cv_input.is_empty() {
                "No file chosen".to_string()
            } else {
                app.cv_input.clone()
            };
            Line::from(vec![
                Span::styled(format!("{marker}Academic CV/Resume: "), label_style),
                Span::styled(shown, Style::default().fg(Color::Gray)),
            ])
        }
        Row::Text(field) => {
            let value = app.form.field(field).to_string();
            Line::from(vec![
                Span::styled(format!("{marker}{}: ", field.label()), label_style),
                Span::styled(value, Style::default().fg(Color::Gray)),
            ])
        }
        Row::Dropdown { field, slot } => {
            let selector = &app.selectors[slot];
            let text = selector.display_text(app.form.field(field));
            let mut spans = vec![
                Span::styled(format!("{marker}{}: ", selector.label()), label_style),
                Span::styled(text, Style::default().fg(Color::Gray)),
            ];
            if selector.error().is_some() {
                spans.push(Span::styled(
                    "  (fetch failed)",
                    Style::default().fg(Color::Red),
                ));
            }
            Line::from(spans)
        }
        Row::Submit => {
            let style = if app.form.is_loading() {
                Style::default().fg(Color::DarkGray)
            } else if focused {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            let text = if app.form.is_loading() {
                "Analyzing Your Profile..."
            } else {
                "Get My University Recommendations"
            };
            Line::from(Span::styled(format!("{marker}[ {text} ]"), style))
        }
    };

    ListItem::new(line)
}

fn draw_popup(f: &mut Frame, app: &App, selector: &Selector) {
    let area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", selector.label()))
        .border_style(Style::default().fg(Color::Cyan));

    if let Some(error) = selector.error() {
        let text = vec![
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "r retry · Esc close",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
            area,
        );
        return;
    }

    if selector.is_loading() {
        f.render_widget(
            Paragraph::new("Loading...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    if selector.is_empty_state() {
        f.render_widget(
            Paragraph::new(NO_OPTIONS_LABEL)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = selector
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let style = if index == app.popup_highlight {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(option.label.clone(), style))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn draw_results(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3 + app.form.results().len().min(8) as u16),
            Constraint::Min(6),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], "University Recommendations");
    render_results_table(f, chunks[1], app);

    if let Some(selected) = app.form.results().get(app.result_cursor) {
        render_match_detail(f, chunks[2], selected);
    } else {
        f.render_widget(
            Paragraph::new("No universities matched your profile.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Details ")),
            chunks[2],
        );
    }

    let summary = Paragraph::new(app.form.summary().to_string())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" AI Analysis & Recommendations ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(summary, chunks[3]);

    f.render_widget(
        Paragraph::new("n new search · ↑↓ select · q quit")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

fn render_results_table(f: &mut Frame, area: Rect, app: &App) {
    let header = TableRow::new(vec!["#", "University", "Program", "Match"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<TableRow> = app
        .form
        .results()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let tier_style = Style::default().fg(tier_color(MatchTier::for_position(index)));
            let row_style = if index == app.result_cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            TableRow::new(vec![
                Cell::from(format!("{}", index + 1)).style(tier_style),
                Cell::from(format!("{} ({})", entry.name, entry.country)),
                Cell::from(format!("{} · {}", entry.program_name, entry.duration)),
                Cell::from(format!("{:.1}%", entry.match_score)).style(tier_style),
            ])
            .style(row_style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Ranked by compatibility with your profile ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(table, area);
}

fn render_match_detail(f: &mut Frame, area: Rect, entry: &UniversityMatch) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Ranking: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("#{}", entry.ranking)),
            Span::styled("   Tuition: ", Style::default().fg(Color::DarkGray)),
            Span::raw(entry.tuition_fee.clone()),
            Span::styled("   Admission rate: ", Style::default().fg(Color::DarkGray)),
            Span::raw(entry.admission_rate.clone()),
        ]),
        Line::from(vec![
            Span::styled("Scholarships: ", Style::default().fg(Color::DarkGray)),
            Span::raw(if entry.scholarship_available {
                "available"
            } else {
                "not available"
            }),
            Span::styled("   Deadline: ", Style::default().fg(Color::DarkGray)),
            Span::raw(entry.application_deadline.clone()),
        ]),
        Line::from(""),
        Line::from(entry.description.clone()),
    ];

    for (title, values) in [
        ("Requirements", &entry.requirements),
        ("Research areas", &entry.research_areas),
        ("Notable faculty", &entry.faculty_highlights),
        ("Strengths", &entry.strengths),
    ] {
        if !values.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{title}: "),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(values.join(", ")),
            ]));
        }
    }

    if !entry.campus_life.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Campus: ", Style::default().fg(Color::DarkGray)),
            Span::raw(entry.campus_life.clone()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Website: ", Style::default().fg(Color::DarkGray)),
        Span::styled(entry.website.clone(), Style::default().fg(Color::Blue)),
    ]));

    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", entry.name))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(detail, area);
}

fn draw_notice(f: &mut Frame, notice: &str) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Error ")
                    .border_style(Style::default().fg(Color::Red)),
            ),
        area,
    );
}

fn render_title_bar(f: &mut Frame, area: Rect, title: &str) {
    let line = Line::from(vec![
        Span::styled(
            "━━ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("uniAdvise · {title}"),
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " ━━",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn tier_color(tier: MatchTier) -> Color {
    match tier {
        MatchTier::Gold => Color::Yellow,
        MatchTier::Silver => Color::Gray,
        MatchTier::Bronze => Color::LightRed,
        MatchTier::Unranked => Color::White,
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
