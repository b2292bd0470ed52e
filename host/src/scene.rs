use std::io::Write;
use std::sync::{Mutex, PoisonError};

use sweepfield_core::RenderInstruction;
use sweepfield_protocol::SceneCommand;

use crate::Scene;

/// Writes every scene change as one JSON object per line, for a renderer in another process.
#[derive(Debug)]
pub struct JsonLinesScene<W> {
    out: Mutex<W>,
}

impl<W: Write> JsonLinesScene<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, command: &SceneCommand) -> anyhow::Result<()> {
        let line = command.to_json_line()?;
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(line.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

impl<W: Write> Scene for JsonLinesScene<W> {
    fn render(&self, scene: &str, instructions: &[RenderInstruction]) -> anyhow::Result<()> {
        self.send(&SceneCommand::Render {
            scene: scene.into(),
            instructions: instructions.to_vec(),
        })
    }

    fn clear(&self) -> anyhow::Result<()> {
        self.send(&SceneCommand::Clear)
    }
}
