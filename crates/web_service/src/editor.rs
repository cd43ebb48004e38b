//! Server-side mirror of the IDE's editor and console state.

use std::collections::HashMap;

use agent_interpreter::EditorSink;
use code_runner::ExecutionReport;
use ide_core::{format_code, Language, SessionContext};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EditorState {
    pub language: Language,
    pub code: String,
    pub stdin: String,
    pub output: String,
    pub error: String,
    pub execution_time_ms: Option<u64>,
    /// Last code typed per language, restored when switching back.
    #[serde(skip)]
    drafts: HashMap<Language, String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl EditorState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            code: language.default_snippet().to_string(),
            stdin: String::new(),
            output: String::new(),
            error: String::new(),
            execution_time_ms: None,
            drafts: HashMap::new(),
        }
    }

    fn clear_console(&mut self) {
        self.output.clear();
        self.error.clear();
        self.execution_time_ms = None;
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        if !self.code.is_empty() {
            self.drafts.insert(self.language, self.code.clone());
        }
    }

    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.stdin = stdin.into();
    }

    pub fn change_language(&mut self, language: Language) {
        if !self.code.is_empty() {
            self.drafts.insert(self.language, self.code.clone());
        }
        self.language = language;
        self.code = self
            .drafts
            .get(&language)
            .cloned()
            .unwrap_or_else(|| language.default_snippet().to_string());
        self.clear_console();
    }

    /// Reset the editor to the language's starter snippet and clear the console.
    pub fn clear(&mut self) {
        self.set_code(self.language.default_snippet());
        self.stdin.clear();
        self.clear_console();
    }

    /// Replace language and code with a saved snapshot.
    pub fn load(&mut self, language: Language, code: impl Into<String>) {
        self.language = language;
        self.set_code(code);
        self.clear_console();
    }

    pub fn format(&mut self) {
        let formatted = format_code(self.language, &self.code);
        self.set_code(formatted);
    }

    /// Prepare for a run: the console starts empty.
    pub fn begin_run(&mut self) {
        self.clear_console();
    }

    pub fn record_execution(&mut self, report: &ExecutionReport) {
        self.output = report.output.clone();
        self.error = report.error.clone().unwrap_or_default();
        self.execution_time_ms = Some(report.execution_time_ms);
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.error = message.into();
    }

    /// Install solver-produced code. The error is always cleared; debug also
    /// clears the output.
    pub fn apply_fix(&mut self, code: String, clear_output: bool) {
        self.set_code(code);
        self.error.clear();
        if clear_output {
            self.output.clear();
        }
    }

    pub fn context(&self) -> SessionContext {
        SessionContext::new(self.code.clone(), self.language).with_error(self.error.clone())
    }
}

impl EditorSink for EditorState {
    fn replace_source(&mut self, code: String) {
        self.set_code(code);
    }
}
