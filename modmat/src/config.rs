//! Session configuration

use clap::ValueEnum;

/// How protocol output is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text lines, one matrix row per line
    #[default]
    Text,
    /// One JSON document per line
    Json,
}

/// Configuration for a command session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Output encoding for matrices, dimensions and rejections
    pub output_format: OutputFormat,
    /// Number of matrices the store has room for before growing
    pub initial_capacity: usize,
}

impl SessionConfig {
    /// Set the output format
    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Set the initial store capacity
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Text,
            initial_capacity: 10,
        }
    }
}
