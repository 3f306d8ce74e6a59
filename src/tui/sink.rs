//! Content buffer: the TUI's display sink.
//!
//! The workflow writes one cycle into the buffer and the draw loop renders
//! whatever the last cycle left there.

use crate::ports::{Backdrop, Content, DisplaySink};

#[derive(Debug, Default)]
pub struct ContentBuffer {
    backdrop: Backdrop,
    blocks: Vec<Content>,
}

impl ContentBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous cycle's content. The backdrop is kept until the
    /// next cycle sets one.
    pub fn begin_cycle(&mut self) {
        self.blocks.clear();
    }

    #[must_use]
    pub fn backdrop(&self) -> Backdrop {
        self.backdrop
    }

    #[must_use]
    pub fn blocks(&self) -> &[Content] {
        &self.blocks
    }

    /// Take the status notices of the current cycle, leaving it empty.
    pub fn take_notices(&mut self) -> Vec<Content> {
        std::mem::take(&mut self.blocks)
            .into_iter()
            .filter(|c| matches!(c, Content::Notice { .. }))
            .collect()
    }
}

impl DisplaySink for ContentBuffer {
    fn set_backdrop(&mut self, backdrop: Backdrop) {
        self.backdrop = backdrop;
    }

    fn emit(&mut self, content: Content) {
        self.blocks.push(content);
    }
}
