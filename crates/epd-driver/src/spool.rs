//! File-backed panel device.
//!
//! Each frame is written to a single spool file that the panel daemon picks
//! up. Writes go to a sibling temp file first and are renamed into place, so
//! the reader never sees a partial frame.

use std::fs;
use std::path::{Path, PathBuf};

use epd_common::{EpdError, EpdResult};
use tracing::{debug, info};

use crate::device::EpdDevice;
use crate::panel::Panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    Off,
    Awake,
    Asleep,
}

/// Device that spools packed frames to a file.
#[derive(Debug)]
pub struct SpoolDevice {
    panel: Panel,
    path: PathBuf,
    state: PowerState,
    frames_written: u64,
}

impl SpoolDevice {
    pub fn new(panel: Panel, path: impl Into<PathBuf>) -> Self {
        Self {
            panel,
            path: path.into(),
            state: PowerState::Off,
            frames_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Frames written since creation, including clears.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn require_awake(&self, operation: &str) -> EpdResult<()> {
        if self.state != PowerState::Awake {
            return Err(EpdError::DisplayError(format!(
                "Cannot {} panel {} while {:?}, call init first",
                operation, self.panel.name, self.state
            )));
        }
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> EpdResult<()> {
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, frame)?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            // rename across filesystems fails, fall back to copy+delete
            debug!(
                from = %temp_path.display(),
                to = %self.path.display(),
                error = %e,
                "Rename failed, copying frame"
            );
            let copied = fs::copy(&temp_path, &self.path);
            let removed = fs::remove_file(&temp_path);
            copied?;
            removed?;
        }

        self.frames_written += 1;
        debug!(
            path = %self.path.display(),
            bytes = frame.len(),
            frames = self.frames_written,
            "Frame spooled"
        );
        Ok(())
    }
}

impl EpdDevice for SpoolDevice {
    fn panel(&self) -> Panel {
        self.panel
    }

    fn init(&mut self) -> EpdResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.state = PowerState::Awake;
        info!(
            panel = self.panel.name,
            path = %self.path.display(),
            "Panel initialized"
        );
        Ok(())
    }

    fn clear(&mut self) -> EpdResult<()> {
        self.require_awake("clear")?;
        let blank = vec![0u8; self.panel.buffer_len()];
        self.write_frame(&blank)
    }

    fn display(&mut self, frame: &[u8]) -> EpdResult<()> {
        self.require_awake("display on")?;
        let expected = self.panel.buffer_len();
        if frame.len() != expected {
            return Err(EpdError::DisplayError(format!(
                "Frame is {} bytes, panel {} expects {}",
                frame.len(),
                self.panel.name,
                expected
            )));
        }
        self.write_frame(frame)
    }

    fn sleep(&mut self) -> EpdResult<()> {
        self.state = PowerState::Asleep;
        info!(panel = self.panel.name, "Panel asleep");
        Ok(())
    }
}
