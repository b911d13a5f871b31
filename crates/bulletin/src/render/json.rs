//! JSON rendering for scripts.

use std::io::Write;

use super::{Renderer, View};
use crate::error::Result;

/// Writes each view as one pretty-printed JSON document.
#[derive(Debug)]
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    /// Render to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &View) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, view)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
