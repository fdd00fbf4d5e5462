use crate::error::RleError;
use std::str::FromStr;

/// How chunk encoders are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Dedicated rayon pool, one task per chunk
    Rayon,
    /// Scoped worker threads fed through channels
    Threads,
    /// Chunks encoded one after another on the calling thread
    Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<symbol><decimal count>` with no delimiters
    Text,
    /// symbol byte followed by a little-endian u64 count
    Binary,
    Json,
}

#[derive(Debug, Clone)]
pub struct RleConfig {
    pub workers: usize,
    /// Number of chunks; one per worker when unset
    pub chunks: Option<usize>,
    pub mode: ExecutionMode,
    pub format: OutputFormat,
    pub progress: bool,
}

impl Default for RleConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            chunks: None,
            mode: ExecutionMode::Rayon,
            format: OutputFormat::Text,
            progress: false,
        }
    }
}

impl RleConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_chunks(mut self, chunks: usize) -> Self {
        self.chunks = Some(chunks);
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.unwrap_or(self.workers)
    }

    pub fn validate(&self) -> Result<(), RleError> {
        if self.workers == 0 {
            return Err(RleError::Config("worker count must be at least 1".to_string()));
        }
        if self.chunk_count() == 0 {
            return Err(RleError::Config("chunk count must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl FromStr for ExecutionMode {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rayon" => Ok(ExecutionMode::Rayon),
            "threads" => Ok(ExecutionMode::Threads),
            "sequential" => Ok(ExecutionMode::Sequential),
            _ => Err(RleError::Config(format!("Invalid mode: {}", s))),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "binary" => Ok(OutputFormat::Binary),
            "json" => Ok(OutputFormat::Json),
            _ => Err(RleError::Config(format!("Invalid format: {}", s))),
        }
    }
}
