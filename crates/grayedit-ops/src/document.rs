//! Editing session: the current layer stack, its composite and history.

use crate::composite::composite;
use crate::layers::LayerStack;
use grayedit_core::{PixelBuffer, DEFAULT_MAX_LAYERS};
use tracing::debug;

/// Layer stack with cached composite and undo/redo.
///
/// History holds whole stacks. Layer buffers are shared, so a snapshot
/// costs one vector of small layer records.
#[derive(Debug, Clone)]
pub struct Document {
    stack: LayerStack,
    composite: Option<PixelBuffer>,
    undo: Vec<LayerStack>,
    redo: Vec<LayerStack>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LAYERS)
    }
}

impl Document {
    /// Empty document accepting up to `max_layers` layers.
    pub fn new(max_layers: usize) -> Self {
        Self {
            stack: LayerStack::new(max_layers),
            composite: None,
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Current layer stack.
    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    /// Composite of the current stack.
    pub fn composite(&self) -> Option<&PixelBuffer> {
        self.composite.as_ref()
    }

    /// Number of undoable steps.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable steps.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Makes `stack` current, recording the previous one for undo.
    pub fn commit(&mut self, stack: LayerStack) {
        let previous = std::mem::replace(&mut self.stack, stack);
        self.undo.push(previous);
        self.redo.clear();
        self.recompute();
    }

    /// Loads a new source image into the base layer.
    pub fn load_image(&mut self, image: PixelBuffer) {
        debug!(width = image.width(), height = image.height(), "load image");
        let next = self.stack.replace_base_image(image);
        self.commit(next);
    }

    /// Steps back one edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.stack, previous);
        self.redo.push(current);
        self.recompute();
        true
    }

    /// Re-applies an undone edit. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.stack, next);
        self.undo.push(current);
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        if self.stack.is_empty() {
            self.composite = None;
            return;
        }
        match composite(&self.stack) {
            Some(image) => self.composite = Some(image),
            None => debug!("composite unavailable, keeping previous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Layer;

    #[test]
    fn test_load_then_edit() {
        let mut doc = Document::default();
        assert!(doc.composite().is_none());

        doc.load_image(PixelBuffer::filled(2, 2, [0, 0, 0, 255]));
        assert_eq!(doc.stack().len(), 1);
        assert_eq!(doc.composite().unwrap().pixel(0, 0), Some([0, 0, 0, 255]));

        let (next, _) = doc.stack().push(Layer::fill("w", [255, 255, 255, 255])).unwrap();
        doc.commit(next);
        assert_eq!(doc.composite().unwrap().pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_undo_redo() {
        let mut doc = Document::new(4);
        doc.load_image(PixelBuffer::filled(1, 1, [10, 10, 10, 255]));
        let (next, _) = doc.stack().push(Layer::fill("r", [200, 0, 0, 255])).unwrap();
        doc.commit(next);

        assert!(doc.undo());
        assert_eq!(doc.stack().len(), 1);
        assert_eq!(doc.composite().unwrap().pixel(0, 0), Some([10, 10, 10, 255]));

        assert!(doc.redo());
        assert_eq!(doc.stack().len(), 2);
        assert!(!doc.redo());

        assert!(doc.undo());
        assert!(doc.undo());
        assert!(!doc.undo());
        assert!(doc.composite().is_none());
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut doc = Document::new(4);
        doc.load_image(PixelBuffer::filled(1, 1, [0, 0, 0, 255]));
        doc.load_image(PixelBuffer::filled(1, 1, [1, 1, 1, 255]));
        assert!(doc.undo());
        assert_eq!(doc.redo_depth(), 1);
        doc.load_image(PixelBuffer::filled(1, 1, [2, 2, 2, 255]));
        assert_eq!(doc.redo_depth(), 0);
        assert_eq!(doc.undo_depth(), 2);
    }

    #[test]
    fn test_failed_recompute_keeps_composite() {
        let mut doc = Document::new(4);
        doc.load_image(PixelBuffer::filled(2, 1, [5, 5, 5, 255]));
        doc.load_image(PixelBuffer::new(0, 0));
        assert_eq!(doc.composite().unwrap().pixel(1, 0), Some([5, 5, 5, 255]));
    }
}
