//! Plain-terminal rendering of board view records.
//!
//! The `format_*` functions build the lines; the `print_*` wrappers write
//! them to stdout.

use console::{Color, style};

use crate::board::i18n::Language;
use crate::board::models::StatusColor;
use crate::board::render::{CardView, ColumnView, RenderOutcome, SubIssueProgress};
use crate::board::suggest::{Suggestion, SuggestionKind};
use crate::board::view::{BoardView, FacetKind, FilterBadge, LabelMenuEntry};
use crate::ui::icons::{CALENDAR, CLOCK, DOT, EMPTY, FILTER, LABEL, LOCK, MILESTONE, SEARCH};

/// Nearest terminal color for a status palette entry.
pub fn terminal_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => Color::Green,
        StatusColor::Yellow => Color::Yellow,
        StatusColor::Purple => Color::Magenta,
        StatusColor::Blue => Color::Blue,
        StatusColor::Orange => Color::Color256(208),
        StatusColor::Red => Color::Red,
        StatusColor::Pink => Color::Color256(205),
        StatusColor::Gray => Color::Color256(245),
    }
}

/// Reverse of the title escaping done by the render pass.
pub fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Turn a highlighted title into terminal text, styling `<mark>` spans.
pub fn terminal_title(title_html: &str) -> String {
    let mut out = String::new();
    let mut rest = title_html;
    while let Some(start) = rest.find("<mark>") {
        out.push_str(&unescape_html(&rest[..start]));
        let after = &rest[start + "<mark>".len()..];
        let (marked, tail) = match after.find("</mark>") {
            Some(end) => (&after[..end], &after[end + "</mark>".len()..]),
            None => (after, ""),
        };
        out.push_str(
            &style(unescape_html(marked))
                .black()
                .on_yellow()
                .to_string(),
        );
        rest = tail;
    }
    out.push_str(&unescape_html(rest));
    out
}

fn progress_bar(progress: &SubIssueProgress) -> String {
    let bar: String = progress
        .segments()
        .map(|done| if done { '■' } else { '□' })
        .collect();
    format!(
        "{} {}/{} ({}%)",
        bar, progress.completed, progress.total, progress.percentage
    )
}

fn format_card(card: &CardView, lines: &mut Vec<String>) {
    let dot = style(DOT.to_string()).fg(terminal_color(card.status_color));
    let private = if card.url.is_none() {
        LOCK.to_string()
    } else {
        String::new()
    };
    let status = card
        .status
        .as_deref()
        .map(|s| format!(" {}", style(format!("[{}]", s)).dim()))
        .unwrap_or_default();
    lines.push(format!(
        "  {} {}{}{}",
        dot,
        private,
        terminal_title(&card.title_html),
        status
    ));

    if let Some(url) = &card.url
        && !url.is_empty()
    {
        lines.push(format!("      {}", style(url).dim().underlined()));
    }
    if let Some(excerpt) = &card.description_excerpt {
        lines.push(format!("      {}", excerpt.replace('\n', " ")));
    }
    if !card.labels.is_empty() {
        let chips: Vec<String> = card
            .labels
            .iter()
            .map(|l| {
                if l.is_active {
                    style(&l.name).bold().underlined().to_string()
                } else {
                    style(&l.name).cyan().to_string()
                }
            })
            .collect();
        lines.push(format!("      {}{}", LABEL, chips.join(", ")));
    }
    if let Some(progress) = &card.sub_issues {
        lines.push(format!("      {}", progress_bar(progress)));
    }
}

fn format_column(column: &ColumnView, lines: &mut Vec<String>) {
    let due = column
        .due_on_display
        .as_deref()
        .map(|d| format!("  {}{}", CALENDAR, d))
        .unwrap_or_default();
    lines.push(format!(
        "{}{}{}",
        MILESTONE,
        style(&column.title).bold(),
        due
    ));
    if let Some(description) = &column.description {
        lines.push(format!("  {}", style(description).italic()));
    }
    for card in &column.cards {
        format_card(card, lines);
    }
    if !column.is_last_column {
        lines.push(String::new());
    }
}

fn badge_text(badge: &FilterBadge) -> String {
    let value = match badge.kind {
        FacetKind::Status => style(&badge.value)
            .fg(terminal_color(badge.status_color.unwrap_or_default()))
            .to_string(),
        _ => badge.value.clone(),
    };
    format!("{}: {}", badge.caption, value)
}

/// Every line of a full board view.
pub fn format_board(view: &BoardView, lang: Language) -> Vec<String> {
    let messages = lang.messages();
    let mut lines = Vec::new();

    if !view.project.title.is_empty() {
        lines.push(style(&view.project.title).bold().underlined().to_string());
    }
    if let Some(updated) = &view.updated_display {
        lines.push(format!("{}{} {}", CLOCK, messages.updated, updated));
    }
    if !view.badges.is_empty() {
        let badges: Vec<String> = view.badges.iter().map(badge_text).collect();
        lines.push(format!("{}{}", FILTER, badges.join("  ")));
    }
    if let Some(display) = &view.summary.display {
        lines.push(style(display).dim().to_string());
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }

    match &view.outcome {
        RenderOutcome::NoResults => {
            lines.push(format!("{}{}", EMPTY, messages.no_results));
        }
        RenderOutcome::Columns(columns) => {
            for column in columns {
                format_column(column, &mut lines);
            }
        }
    }
    lines
}

pub fn print_board(view: &BoardView, lang: Language) {
    for line in format_board(view, lang) {
        println!("{}", line);
    }
}

pub fn format_suggestions(suggestions: &[Suggestion]) -> Vec<String> {
    suggestions
        .iter()
        .map(|s| {
            let marker = match s.kind {
                SuggestionKind::Status => DOT.to_string(),
                SuggestionKind::Label => LABEL.to_string(),
                SuggestionKind::Text => SEARCH.to_string(),
            };
            format!("{} {}", marker, s.display)
        })
        .collect()
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    for line in format_suggestions(suggestions) {
        println!("{}", line);
    }
}

pub fn format_labels(menu: &[LabelMenuEntry]) -> Vec<String> {
    menu.iter()
        .map(|entry| {
            let check = if entry.is_selected { "[x]" } else { "[ ]" };
            format!(
                "{} {} {}",
                check,
                entry.name,
                style(&entry.style.background).dim()
            )
        })
        .collect()
}

pub fn print_labels(menu: &[LabelMenuEntry]) {
    for line in format_labels(menu) {
        println!("{}", line);
    }
}
