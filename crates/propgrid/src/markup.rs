//! Markup fragments of the grid table.

use std::fmt::Write;

use crate::id::ElementId;
use crate::meta::{Choice, FieldStyle};

/// Escape text for use inside markup text or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn table(rows: &str) -> String {
    format!("<table class=\"pgTable\">{}</table>", rows)
}

pub fn group_header(name: &str) -> String {
    format!(
        "<tr class=\"pgGroupRow\"><td colspan=\"2\" class=\"pgGroupCell\">{}</td></tr>",
        escape(name)
    )
}

pub fn row(label: &str, widget: &str) -> String {
    format!(
        "<tr class=\"pgRow\"><td class=\"pgCell\">{}</td><td class=\"pgCell\">{}</td></tr>",
        label, widget
    )
}

/// Label cell content, with a `[?]` help marker when a description is set.
pub fn label(display_name: &str, description: Option<&str>) -> String {
    let mut html = escape(display_name);
    if let Some(text) = description {
        let _ = write!(
            html,
            "<span class=\"pgTooltip\" title=\"{}\">[?]</span>",
            escape(text)
        );
    }
    html
}

pub fn checkbox(id: &ElementId, name: &str, checked: bool) -> String {
    format!(
        "<input type=\"checkbox\" id=\"{}\" value=\"{}\"{} />",
        escape(id.as_str()),
        escape(name),
        if checked { " checked" } else { "" }
    )
}

pub fn select(id: &ElementId, choices: &[Choice], selected: Option<usize>) -> String {
    let mut html = format!("<select class=\"pgTextLarge\" id=\"{}\">", escape(id.as_str()));
    for (i, choice) in choices.iter().enumerate() {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(&choice.value.to_string()),
            if selected == Some(i) { " selected" } else { "" },
            escape(&choice.text)
        );
    }
    html.push_str("</select>");
    html
}

pub fn spinner_input(id: &ElementId, value: &str) -> String {
    format!(
        "<input type=\"text\" id=\"{}\" value=\"{}\" style=\"width:50px\" />",
        escape(id.as_str()),
        escape(value)
    )
}

pub fn color_input(id: &ElementId) -> String {
    format!("<input type=\"text\" id=\"{}\" />", escape(id.as_str()))
}

pub fn textarea(id: &ElementId, value: &str, max_length: Option<usize>) -> String {
    let max = max_length
        .map(|m| format!(" maxlength=\"{}\"", m))
        .unwrap_or_default();
    format!(
        "<textarea class=\"pgTextArea\"{} id=\"{}\">{}</textarea>",
        max,
        escape(id.as_str()),
        escape(value)
    )
}

pub fn tags_list(id: &ElementId) -> String {
    format!("<ul id=\"{}\"></ul>", escape(id.as_str()))
}

pub fn text_input(id: &ElementId, value: &str, read_only: bool, style: FieldStyle) -> String {
    format!(
        "<input type=\"text\"{}{} id=\"{}\" value=\"{}\" />",
        if style == FieldStyle::Large {
            " class=\"pgTextLarge\""
        } else {
            ""
        },
        if read_only { " readonly=\"readonly\"" } else { "" },
        escape(id.as_str()),
        escape(value)
    )
}
