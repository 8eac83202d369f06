// ABOUTME: Editor surface state: source text, selected language, drafts, and the terminal pane
// ABOUTME: Runs code through a CodeRunner and publishes classified output to a watch binding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Editor Surface
//!
//! The editor keeps one draft per language. Leaving a language stores what
//! was typed; entering one restores its draft, or the language's starter
//! template when nothing (or only an empty buffer) was stored.
//!
//! Terminal output goes through a `watch` channel. Overlapping runs are not
//! sequenced: whichever response resolves last is what the terminal shows.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::errors::ErrorCode;
use crate::execution::{CodeRunner, ExecutionRequest, TerminalOutput, Tone};
use crate::models::Language;

fn template_for(language: &str) -> &'static str {
    Language::ALL
        .iter()
        .find(|l| l.as_str() == language)
        .map_or("", |l| l.template())
}

/// Source text, language, drafts, and the terminal display binding
pub struct EditorSurface {
    runner: Arc<dyn CodeRunner>,
    language: String,
    code: String,
    stdin: String,
    drafts: HashMap<String, String>,
    terminal: watch::Sender<TerminalOutput>,
}

impl EditorSurface {
    /// Editor opened on the JavaScript template
    #[must_use]
    pub fn new(runner: Arc<dyn CodeRunner>) -> Self {
        let (terminal, _) = watch::channel(TerminalOutput::idle());
        let language = Language::JavaScript;
        Self {
            runner,
            language: language.as_str().to_owned(),
            code: language.template().to_owned(),
            stdin: String::new(),
            drafts: HashMap::new(),
            terminal,
        }
    }

    /// Selected language name
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Current buffer
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Replace the buffer; the draft for the current language follows it
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.drafts.insert(self.language.clone(), self.code.clone());
    }

    /// Standard input sent with the next run
    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.stdin = stdin.into();
    }

    /// Switch languages
    ///
    /// Stores the buffer as the leaving language's draft, loads the entering
    /// language's draft or template, and clears the terminal. Selecting the
    /// current language does nothing.
    pub fn select_language(&mut self, language: &str) {
        if language == self.language {
            return;
        }

        let leaving = std::mem::replace(&mut self.language, language.to_owned());
        self.drafts.insert(leaving, std::mem::take(&mut self.code));

        self.code = match self.drafts.get(language) {
            Some(draft) if !draft.is_empty() => draft.clone(),
            _ => template_for(language).to_owned(),
        };
        debug!(language, "Editor language switched");
        self.terminal.send_replace(TerminalOutput::idle());
    }

    /// Run the buffer and publish the result
    ///
    /// Languages the runner does not support are rejected with a warning and
    /// no network call. Any other failure shows the fixed connection message.
    pub async fn run(&self) -> TerminalOutput {
        if !self.runner.supports(&self.language) {
            let output = TerminalOutput::new(
                format!("Language '{}' is not supported", self.language),
                Tone::Warning,
            );
            self.terminal.send_replace(output.clone());
            return output;
        }

        self.terminal.send_replace(TerminalOutput::running());

        let request = ExecutionRequest::new(self.code.clone(), self.language.clone())
            .with_stdin(self.stdin.clone());
        let output = match self.runner.execute(&request).await {
            Ok(result) => result.classify(),
            Err(e) if e.code == ErrorCode::UnsupportedLanguage => {
                TerminalOutput::new(e.message, Tone::Warning)
            }
            Err(e) => {
                warn!(runner = self.runner.name(), error = %e.message, "Run failed");
                TerminalOutput::connect_failed()
            }
        };

        self.terminal.send_replace(output.clone());
        output
    }

    /// Terminal display binding
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TerminalOutput> {
        self.terminal.subscribe()
    }

    /// What the terminal shows now
    #[must_use]
    pub fn terminal(&self) -> TerminalOutput {
        self.terminal.borrow().clone()
    }
}
