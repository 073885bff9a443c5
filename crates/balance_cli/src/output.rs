//! Text rendering of notices and render state.

use crate::args::Screen;
use balance_core::{Notice, NoticeLevel, RenderState};
use std::fmt::Write as _;

const DARK_BANNER: &str = "== Work-Life Balance ==  [dark]";
const LIGHT_BANNER: &str = "== Work-Life Balance ==  [light]";

pub fn render_notice(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Success => "+",
        NoticeLevel::Info => "i",
        NoticeLevel::Error => "!",
    };
    match &notice.record_id {
        Some(id) => format!("{marker} {}: {} (id {id})", notice.title, notice.description),
        None => format!("{marker} {}: {}", notice.title, notice.description),
    }
}

pub fn render_screen(state: &RenderState, screen: Screen) -> String {
    let mut out = String::new();
    out.push_str(if state.is_dark { DARK_BANNER } else { LIGHT_BANNER });
    out.push('\n');

    match screen {
        Screen::Day => render_day(state, &mut out),
        Screen::Resources => render_resources(state, &mut out),
        Screen::Theme => {}
        Screen::Everything => {
            render_day(state, &mut out);
            out.push('\n');
            render_resources(state, &mut out);
        }
    }

    for warning in &state.persistence_warnings {
        let _ = writeln!(
            out,
            "warning: changes to `{}` were not saved: {}",
            warning.key, warning.message
        );
    }
    out
}

fn render_day(state: &RenderState, out: &mut String) {
    let _ = writeln!(out, "{}", state.heading);
    if let Some(message) = state.empty_day_message {
        let _ = writeln!(out, "  {message}");
    }
    for row in &state.day_tasks {
        let _ = writeln!(
            out,
            "  {}  {:<8}  {}  [{}]",
            row.span, row.kind_label, row.title, row.id
        );
    }
}

fn render_resources(state: &RenderState, out: &mut String) {
    let _ = writeln!(out, "Saved Resources");
    if state.resources.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for resource in &state.resources {
        let _ = writeln!(out, "  {}  [{}]", resource.title, resource.id);
        if resource.has_url() {
            let _ = writeln!(out, "    {}", resource.url);
        }
        if resource.has_notes() {
            let _ = writeln!(out, "    {}", resource.notes);
        }
    }
}
