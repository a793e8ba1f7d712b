//! Renderer without a window
//!
//! Counts frames and logs a per-frame summary. Optionally records every
//! frame's draw list as one JSON line, which is handy for replay tooling and
//! for diffing two runs of the same seed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{DrawCommand, RenderError, Renderer};

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    commands: u64,
    recording: Option<BufWriter<File>>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record frames as JSON lines into `path` (created or truncated)
    pub fn recording(path: &Path) -> Result<Self, RenderError> {
        let file = File::create(path).map_err(|source| RenderError::Init {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Recording frames to {}", path.display());
        Ok(Self {
            recording: Some(BufWriter::new(file)),
            ..Self::default()
        })
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Total draw commands seen so far
    pub fn commands(&self) -> u64 {
        self.commands
    }

    /// Flush any buffered recording
    pub fn finish(&mut self) -> Result<(), RenderError> {
        if let Some(out) = self.recording.as_mut() {
            out.flush()?;
        }
        Ok(())
    }
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, commands: &[DrawCommand]) -> Result<(), RenderError> {
        self.frames += 1;
        self.commands += commands.len() as u64;
        log::trace!("frame {}: {} draw commands", self.frames, commands.len());

        if let Some(out) = self.recording.as_mut() {
            serde_json::to_writer(&mut *out, commands)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
