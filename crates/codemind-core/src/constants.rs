// ABOUTME: Constants shared by the server, client, and CLI
// ABOUTME: Service names, user-facing fixed messages, and layout bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identifiers used in structured logs
pub mod service_names {
    /// HTTP backend
    pub const CODEMIND_SERVER: &str = "codemind-server";
    /// Completion service label in error messages
    pub const COMPLETION: &str = "Groq";
    /// Piston execution service
    pub const PISTON: &str = "Piston";
    /// Judge0 execution service
    pub const JUDGE0: &str = "Judge0";
    /// Supabase history store
    pub const SUPABASE: &str = "Supabase";
    /// `CodeMind` HTTP API seen from the client
    pub const CODEMIND_API: &str = "CodeMind API";
}

/// Fixed strings the components show in place of a result
pub mod messages {
    /// Terminal text while a run is outstanding
    pub const RUNNING: &str = "Running...";
    /// Terminal text when a run produced nothing
    pub const NO_OUTPUT: &str = "Execution finished (no output)";
    /// Terminal text when the execution service could not be reached
    pub const RUN_CONNECT_FAILED: &str = "Failed to connect to server";
    /// Prefix for runtime errors in the terminal
    pub const RUNTIME_ERROR_PREFIX: &str = "Runtime Error:";
    /// Prefix for a runner-reported failure that produced no output
    pub const SYSTEM_ERROR_PREFIX: &str = "System Error:";
    /// Assistant text when the completion service could not be used
    pub const AI_CONNECT_FAILED: &str = "Error connecting to AI.";
    /// Assistant text when the completion came back empty
    pub const AI_NO_RESPONSE: &str = "No response from AI.";
    /// Completion text substituted for an empty model reply
    pub const NO_RESPONSE_GENERATED: &str = "No response generated.";
    /// History notice on load failure
    pub const HISTORY_LOAD_FAILED: &str = "Failed to load history";
    /// History notice on delete failure
    pub const HISTORY_DELETE_FAILED: &str = "Failed to delete";
    /// History notice on delete success
    pub const HISTORY_DELETED: &str = "Entry deleted successfully";
    /// Configuration error surfaced when the completion key is absent
    pub const COMPLETION_KEY_MISSING: &str =
        "GROQ_API_KEY is missing. Set it in the server environment.";
}

/// Split-pane bounds, in percent of the container width
pub mod layout {
    /// Narrowest the editor pane may get
    pub const MIN_SPLIT: f64 = 25.0;
    /// Widest the editor pane may get
    pub const MAX_SPLIT: f64 = 75.0;
    /// Editor pane width on load
    pub const DEFAULT_SPLIT: f64 = 55.0;
}
