use client_core::{ListState, PeopleListController, StatusKind, StatusMessage};
use shared::domain::{Person, PersonField};

const ID_HEADER: &str = "ID";
pub const EMPTY_LIST: &str = "No people found.";
pub const LOADING: &str = "Loading...";

pub fn render_message(message: &StatusMessage) -> String {
    match message.kind() {
        StatusKind::Success => format!("[ok] {message}"),
        StatusKind::Error => format!("[error] {message}"),
    }
}

pub fn render_list(list: &PeopleListController) -> String {
    let mut out = String::new();
    if let Some(message) = list.message() {
        out.push_str(&render_message(message));
        out.push('\n');
    }
    match list.state() {
        ListState::Loading => out.push_str(LOADING),
        ListState::Ready | ListState::ReadyEmpty | ListState::Error => {
            out.push_str(&render_people(list.people()))
        }
    }
    out
}

/// Plain-text table, one row per person in the given order.
pub fn render_people(people: &[Person]) -> String {
    if people.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let rows: Vec<Vec<String>> = people
        .iter()
        .map(|person| {
            std::iter::once(person.id.to_string())
                .chain(PersonField::ALL.iter().map(|f| person.field(*f).to_string()))
                .collect()
        })
        .collect();
    let headers: Vec<&str> = std::iter::once(ID_HEADER)
        .chain(PersonField::ALL.iter().map(|f| f.label()))
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .map(|row| row[column].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
