// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for the codemind CLI
// ABOUTME: Theme-aware colouring for terminal output, assistant replies, and history views

use codemind::{
    execution::{TerminalOutput, Tone},
    models::HistoryEntry,
    ui::{AppContext, AssistantDisplay, HistoryDetail, Notice, NoticeKind, RenderedMarkdown, Theme},
};

const RESET: &str = "\x1b[0m";

fn colour(theme: Theme, tone: Tone) -> &'static str {
    match (theme, tone) {
        (_, Tone::Neutral) => "",
        (Theme::Dark, Tone::Success) => "\x1b[92m",
        (Theme::Dark, Tone::Warning) => "\x1b[93m",
        (Theme::Dark, Tone::Error) => "\x1b[91m",
        (Theme::Light, Tone::Success) => "\x1b[32m",
        (Theme::Light, Tone::Warning) => "\x1b[33m",
        (Theme::Light, Tone::Error) => "\x1b[31m",
    }
}

fn paint(ctx: &AppContext, tone: Tone, text: &str) -> String {
    match colour(ctx.theme, tone) {
        "" => text.to_owned(),
        code => format!("{code}{text}{RESET}"),
    }
}

/// Print the editor's terminal pane
pub fn display_terminal(ctx: &AppContext, output: &TerminalOutput) {
    println!("{}", paint(ctx, output.tone, &output.text));
}

/// Print the assistant's response area
pub fn display_assistant(ctx: &AppContext, display: &AssistantDisplay) {
    match display {
        AssistantDisplay::Result(text) => {
            println!("{}", RenderedMarkdown::parse(text).to_terminal());
        }
        AssistantDisplay::Failure { .. } => {
            eprintln!("{}", paint(ctx, Tone::Error, &display.text()));
        }
        AssistantDisplay::Idle | AssistantDisplay::Loading => {}
    }
}

/// Print a viewer notice
pub fn display_notice(ctx: &AppContext, notice: &Notice) {
    let tone = match notice.kind {
        NoticeKind::Success => Tone::Success,
        NoticeKind::Error => Tone::Error,
    };
    let text = if notice.detail.is_empty() {
        notice.title.clone()
    } else {
        format!("{}: {}", notice.title, notice.detail)
    };
    eprintln!("{}", paint(ctx, tone, &text));
}

/// Print history list cards
pub fn display_history_list(ctx: &AppContext, entries: &[HistoryEntry]) {
    println!("\nAssistant History ({})", ctx.greeting());
    println!("{}", "=".repeat(60));
    if entries.is_empty() {
        println!("No history yet.");
        return;
    }
    for entry in entries {
        println!(
            "{}  [{} | {}]  {}",
            entry.id,
            entry.mode.as_str().to_uppercase(),
            entry.language,
            entry.display_timestamp()
        );
        println!("   {}", entry.preview().replace('\n', " "));
    }
    println!("{}", "=".repeat(60));
    println!("{} entries", entries.len());
}

/// Print one record in full
pub fn display_history_detail(detail: &HistoryDetail) {
    let entry = &detail.entry;
    println!(
        "\n{} [{} | {}]",
        entry.id,
        entry.mode.as_str().to_uppercase(),
        entry.language
    );
    println!("{}", entry.display_timestamp());
    println!("{}", "=".repeat(60));
    println!("{}:", detail.primary_label);
    println!("{}", detail.primary_input);
    println!("{}", "-".repeat(60));
    println!("AI Response:");
    println!("{}", detail.response.to_terminal());
}
