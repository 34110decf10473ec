use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::cli::state::App;
use crate::page::{Column, Element, ElementId, Kind, Node, Page, Panel};

/// What the page drawing needs from the app besides the page itself.
struct Focus {
    id: Option<ElementId>,
    editor: String,
}

pub fn draw(f: &mut Frame, app: &App) {
    let focus = Focus {
        id: app.focused(),
        editor: app.editor.rendered(),
    };
    let status = app.status.clone();
    app.with_page(|page| draw_page(f, page, &focus, &status));
}

fn draw_page(f: &mut Frame, page: &Page, focus: &Focus, status: &str) {
    let size = f.size();

    // title | panels | notification or status
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(3)])
        .split(size);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("SecureBank", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  /{}", page.name())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, root[0]);

    let left: Vec<&Panel> = page.panels().iter().filter(|p| p.column == Column::Left).collect();
    let right: Vec<&Panel> = page.panels().iter().filter(|p| p.column == Column::Right).collect();

    if right.is_empty() {
        draw_column(f, root[1], page, &left, focus);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(root[1]);
        draw_column(f, cols[0], page, &left, focus);
        draw_column(f, cols[1], page, &right, focus);
    }

    draw_footer(f, root[2], page, status);
}

fn draw_column(f: &mut Frame, area: Rect, page: &Page, panels: &[&Panel], focus: &Focus) {
    if panels.is_empty() {
        return;
    }

    // Panels holding rendered lists take whatever height is left.
    let constraints: Vec<Constraint> = panels
        .iter()
        .map(|p| {
            let has_list = p.elements.iter().any(|&id| page.get(id).kind == Kind::Container);
            if has_list {
                Constraint::Min(4)
            } else {
                let lines: usize = p
                    .elements
                    .iter()
                    .map(|&id| element_lines(page.get(id), None).len())
                    .sum();
                Constraint::Length(lines as u16 + 2)
            }
        })
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (panel, chunk) in panels.iter().zip(chunks.iter()) {
        let lines: Vec<Line> = panel
            .elements
            .iter()
            .flat_map(|&id| {
                let editor = (Some(id) == focus.id).then_some(focus.editor.as_str());
                element_lines(page.get(id), editor)
            })
            .collect();
        let p = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(panel.title.as_str()))
            .wrap(Wrap { trim: false });
        f.render_widget(p, *chunk);
    }
}

/// `editor` is the live editor text when the element has focus.
fn element_lines<'a>(e: &'a Element, editor: Option<&str>) -> Vec<Line<'a>> {
    if !e.visible {
        return Vec::new();
    }
    let marker = if e.required { "*" } else { "" };
    let focused = editor.is_some();
    let field_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    match e.kind {
        Kind::Text => {
            let style = if e.has_class("error-message") {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let text = if e.label.is_empty() {
                e.text.clone()
            } else {
                format!("{}: {}", e.label, e.text)
            };
            vec![Line::from(Span::styled(text, style))]
        }
        Kind::Input | Kind::Password => {
            let shown = if let Some(text) = editor {
                format!("{text}_")
            } else if e.kind == Kind::Password {
                "*".repeat(e.value.chars().count())
            } else {
                e.value.clone()
            };
            vec![Line::from(vec![
                Span::raw(format!("{}{}: ", e.label, marker)),
                Span::styled(format!("[{shown}]"), field_style),
            ])]
        }
        Kind::Select => {
            let choice = e.selected_text().unwrap_or("");
            vec![Line::from(vec![
                Span::raw(format!("{}{}: ", e.label, marker)),
                Span::styled(format!("< {choice} >"), field_style),
            ])]
        }
        Kind::Container => e.children.iter().map(node_line).collect(),
    }
}

/// One line per node: leaf texts side by side, amounts coloured by style.
fn node_line(node: &Node) -> Line<'_> {
    let mut spans = Vec::new();
    collect_spans(node, &mut spans);
    Line::from(spans)
}

fn collect_spans<'a>(node: &'a Node, spans: &mut Vec<Span<'a>>) {
    if node.children.is_empty() {
        if node.text.is_empty() {
            return;
        }
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        let style = if node.has_class("positive") {
            Style::default().fg(Color::Green)
        } else if node.has_class("negative") {
            Style::default().fg(Color::Red)
        } else if node.has_class("account-type") || node.has_class("transaction-type") {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(node.text.as_str(), style));
        return;
    }
    if !node.text.is_empty() {
        spans.push(Span::raw(node.text.as_str()));
    }
    for child in &node.children {
        collect_spans(child, spans);
    }
}

fn draw_footer(f: &mut Frame, area: Rect, page: &Page, status: &str) {
    let notification = page
        .panels()
        .iter()
        .filter(|p| p.column == Column::Footer)
        .find(|p| p.shown_by.map_or(true, |id| page.is_visible(id)));

    let p = match notification {
        Some(panel) => {
            let is_error = panel.shown_by.is_some_and(|id| page.get(id).has_class("error"));
            let color = if is_error { Color::Red } else { Color::Green };
            Paragraph::new(footer_text(page, &panel.elements))
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(panel.title.as_str()))
        }
        None => Paragraph::new(status).block(Block::default().borders(Borders::ALL)),
    };
    f.render_widget(p, area);
}

fn footer_text(page: &Page, elements: &[ElementId]) -> String {
    elements
        .iter()
        .map(|&id| page.text(id))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
