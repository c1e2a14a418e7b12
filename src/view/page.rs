use std::fmt;

use chrono::{DateTime, Utc};

use super::{render_table, TableRow};
use crate::{
    helpers::escape_html,
    types::{CoinRecord, Interval},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

/// The page document: table body, filter input, loading indicator and
/// message area. `Display` renders it as a complete HTML page.
#[derive(Debug, Default)]
pub struct Page {
    rows: Vec<TableRow>,
    filter: String,
    loading: bool,
    message: Option<Message>,
    message_seq: u64,
    refreshed_at: Option<DateTime<Utc>>,
    source_updated_at: Option<String>,
}

impl Page {
    pub fn new() -> Page {
        Page::default()
    }

    /// Replaces every table row with the projection of `records`.
    pub fn render_table(&mut self, records: &[CoinRecord]) {
        self.rows = render_table(records);
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_owned();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Shows `text` and returns the sequence number identifying it.
    pub fn show_message(&mut self, text: &str, kind: MessageKind) -> u64 {
        self.message_seq += 1;
        self.message = Some(Message {
            text: text.to_owned(),
            kind,
        });
        self.message_seq
    }

    /// Clears the message only if it is still the one numbered `seq`.
    pub fn clear_message(&mut self, seq: u64) -> bool {
        if self.message_seq != seq || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn set_refreshed(
        &mut self,
        at: DateTime<Utc>,
        source_updated_at: Option<String>,
    ) {
        self.refreshed_at = Some(at);
        self.source_updated_at = source_updated_at;
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<tr><th>Symbol</th><th>Open interest</th>")?;
        for interval in Interval::displayed() {
            write!(f, "<th>{}</th>", interval)?;
        }
        write!(f, "</tr>")
    }

    fn write_rows(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            write!(f, "<tr>")?;
            for cell in &row.cells {
                match cell.class {
                    Some(class) => write!(
                        f,
                        r#"<td class="{}">{}</td>"#,
                        class.css(),
                        escape_html(&cell.text)
                    )?,
                    None => write!(f, "<td>{}</td>", escape_html(&cell.text))?,
                }
            }
            writeln!(f, "</tr>")?;
        }
        Ok(())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, r#"<head><meta charset="utf-8">"#)?;
        writeln!(f, "<title>Open Interest Monitor</title>")?;
        writeln!(f, r#"<link rel="stylesheet" href="/static/style.css">"#)?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<h1>Open Interest Monitor</h1>")?;

        writeln!(f, r#"<div class="toolbar">"#)?;
        writeln!(
            f,
            r#"<form method="get" action="/filter"><input type="text" id="symbolFilter" name="symbol" placeholder="Symbol" value="{}"><button type="submit">Filter</button></form>"#,
            escape_html(&self.filter)
        )?;
        writeln!(
            f,
            r#"<form method="post" action="/refresh"><button type="submit">Update data</button></form>"#
        )?;
        writeln!(f, "</div>")?;

        writeln!(
            f,
            r#"<div id="loading" style="display: {}">Loading...</div>"#,
            if self.loading { "block" } else { "none" }
        )?;

        match &self.message {
            Some(message) => writeln!(
                f,
                r#"<div id="message" class="message {}">{}</div>"#,
                message.kind.css(),
                escape_html(&message.text)
            )?,
            None => writeln!(f, r#"<div id="message" class="message"></div>"#)?,
        }

        if let Some(at) = self.refreshed_at {
            write!(
                f,
                r#"<p class="updated">Last updated: {}"#,
                at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
            if let Some(source) = &self.source_updated_at {
                write!(f, " (server data: {})", escape_html(source))?;
            }
            writeln!(f, "</p>")?;
        }

        writeln!(f, "<table>")?;
        write!(f, "<thead>")?;
        self.write_header(f)?;
        writeln!(f, "</thead>")?;
        writeln!(f, r#"<tbody id="coinsTableBody">"#)?;
        self.write_rows(f)?;
        writeln!(f, "</tbody>")?;
        writeln!(f, "</table>")?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}
