use matchmaker_core::{
    export::{due_label, format_miles, format_price, service_count_label},
    model::{Priority, Recommendation},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, FormField, Screen};

const FORM_HINT: &str = "Type to edit · Tab/↑/↓ switch field · ←/→ change model · \
                         Enter generate · Esc/Ctrl-C quit";
const RESULTS_HINT: &str =
    "↑/↓ move · Space select · c clear · e export · Esc/←/b back · q/Ctrl-C quit";

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(format!(
        "Maintenance Matchmaker – recommended services for your {}",
        app.service.make()
    ))
    .block(Block::default().borders(Borders::ALL).title("Matchmaker"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::VehicleForm => draw_vehicle_form(frame, app, *content_area),
        Screen::Recommendations => draw_recommendations(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::VehicleForm => FORM_HINT,
        Screen::Recommendations => RESULTS_HINT,
    };

    let status_text = if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else if let Some(msg) = &app.status_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.status_message.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_vehicle_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // year
            Constraint::Length(3), // model
            Constraint::Length(3), // mileage
            Constraint::Min(0),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [year_area, model_area, mileage_area, _rest] = chunks else {
        return;
    };

    let model = app.selected_model();
    let model_text = if model.is_empty() {
        "<no models>".to_owned()
    } else {
        format!("◀ {model} ▶")
    };

    let fields = [
        (FormField::Year, "Year", app.year_input.as_str(), *year_area),
        (FormField::Model, "Model", model_text.as_str(), *model_area),
        (
            FormField::Mileage,
            "Current mileage",
            app.mileage_input.as_str(),
            *mileage_area,
        ),
    ];

    for (field, title, text, field_area) in fields {
        let style = if app.focus == field {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let input = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(style);
        frame.render_widget(input, field_area);
    }
}

fn draw_recommendations(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let totals = app.selection.totals();
    let summary_height = if totals.count == 0 { 0 } else { 3 };

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),              // vehicle header
            Constraint::Min(0),                 // services
            Constraint::Length(summary_height), // selection summary
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [vehicle_area, list_area, summary_area] = chunks else {
        return;
    };

    draw_vehicle_header(frame, app, *vehicle_area);

    if app.recommendations.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from("All caught up!").style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from("No services due at this mileage"),
        ])
        .block(Block::default().borders(Borders::ALL).title("Services"))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, *list_area);
    } else {
        draw_service_list(frame, app, *list_area);
    }

    if totals.count > 0 {
        let summary = Paragraph::new(format!(
            "{} selected · ${:.2} · {:.1}h",
            totals.count, totals.price, totals.labor_hours
        ))
        .block(Block::default().borders(Borders::ALL).title("Selection"))
        .style(Style::default().fg(Color::Cyan));
        frame.render_widget(summary, *summary_area);
    }
}

fn draw_vehicle_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(vehicle) = &app.vehicle else {
        return;
    };

    let mut lines = vec![Line::from(format!(
        "{} {} {} · {} mi",
        vehicle.year,
        app.service.make(),
        vehicle.model,
        format_miles(vehicle.mileage)
    ))];
    if let Some(next) = app.next_interval {
        lines.push(Line::from(format!(
            "Next service: {} mi · in {} mi",
            format_miles(next),
            format_miles(next.saturating_sub(u64::from(vehicle.mileage)))
        )));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Vehicle"));
    frame.render_widget(paragraph, area);
}

fn draw_service_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut items: Vec<ListItem<'_>> = Vec::new();
    let mut highlighted = None;
    let mut row = 0;

    for (priority, bucket) in app.recommendations.iter() {
        if bucket.is_empty() {
            continue;
        }

        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                priority.label(),
                Style::default()
                    .fg(priority_color(priority))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", service_count_label(bucket.len()))),
        ])));

        for recommendation in bucket {
            if row == app.cursor {
                highlighted = Some(items.len());
            }
            let selected = app.selection.contains(&recommendation.key());
            items.push(service_item(recommendation, selected));
            row += 1;
        }
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recommended services (Space to select)"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(highlighted);
    frame.render_stateful_widget(list, area, &mut state);
}

fn service_item(recommendation: &Recommendation, selected: bool) -> ListItem<'static> {
    let checkbox = if selected { "[x] " } else { "[ ] " };
    let due_style = if recommendation.overdue {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    ListItem::new(Line::from(vec![
        Span::raw(checkbox),
        Span::styled(
            recommendation.service.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(due_label(recommendation), due_style),
        Span::raw(format!(
            "  {}  {}h labor",
            format_price(recommendation.price),
            recommendation.labor_hours
        )),
    ]))
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Critical => Color::Red,
        Priority::High => Color::LightRed,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}
