//! Layer model.
//!
//! A [`LayerStack`] is an ordered collection addressed by [`LayerId`]:
//! index 0 is the bottom of the stack and is drawn first. Every edit takes
//! `&self` and returns a new stack, so a caller can keep earlier stacks for
//! undo. Pixel buffers sit behind [`Arc`], making those copies cheap.
//!
//! One layer may carry the base role. It is always at index 0, is fed by
//! the loaded source image and cannot be removed or moved.
//!
//! ```rust
//! use grayedit_core::PixelBuffer;
//! use grayedit_ops::layers::{Direction, Layer, LayerStack};
//!
//! let stack = LayerStack::with_base(PixelBuffer::filled(4, 4, [0, 0, 0, 255]), 6);
//! let (stack, id) = stack.push(Layer::fill("red", [255, 0, 0, 255])).unwrap();
//! let stack = stack.set_opacity(id, 0.5).unwrap();
//! assert!(stack.move_layer(id, Direction::Down).is_err()); // would displace the base
//! assert_eq!(stack.len(), 2);
//! ```

use crate::composite::BlendMode;
use crate::curves::ToneCurve;
use crate::filter::{apply_kernel, Kernel};
use crate::{OpsError, OpsResult};
use grayedit_core::{extract_alpha, Channel, PixelBuffer};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Display name given to the base layer.
pub const BASE_LAYER_NAME: &str = "Background";
/// Default name for added layers.
pub const NEW_LAYER_NAME: &str = "New layer";
/// Default fill colour for added fill layers.
pub const DEFAULT_FILL: [u8; 4] = [255, 255, 255, 255];

/// Stable layer identifier, unique within a stack's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Placeholder id of a layer not yet in a stack. Stacks start counting at 1.
const UNASSIGNED: LayerId = LayerId(0);

/// Direction for [`LayerStack::move_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the top of the stack (drawn later).
    Up,
    /// Toward the bottom of the stack (drawn earlier).
    Down,
}

/// Tone-curve adjustment recorded on a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveAdjustment {
    /// Control points.
    pub curve: ToneCurve,
    /// Channel the curve was applied to.
    pub channel: Channel,
}

/// One element of the stack.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    is_base: bool,
    /// Display name.
    pub name: String,
    /// Hidden layers are skipped by the compositor.
    pub visible: bool,
    /// Global alpha multiplier, `[0, 1]`.
    pub opacity: f64,
    /// Per-pixel composite function.
    pub blend_mode: BlendMode,
    /// Pixel content. Takes precedence over `fill`.
    pub image: Option<Arc<PixelBuffer>>,
    /// Flat colour drawn when there is no image.
    pub fill: Option<[u8; 4]>,
    /// Diagnostic alpha visualisation, drawn over the layer at half opacity.
    pub alpha_preview: Option<Arc<PixelBuffer>>,
    /// Whether the alpha preview is drawn.
    pub alpha_visible: bool,
    /// Active tone curve, if any.
    pub curves: Option<CurveAdjustment>,
    /// Image as it was before the tone curve.
    pub original: Option<Arc<PixelBuffer>>,
}

impl Layer {
    fn blank(name: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED,
            is_base: false,
            name: name.into(),
            visible: true,
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
            image: None,
            fill: None,
            alpha_preview: None,
            alpha_visible: true,
            curves: None,
            original: None,
        }
    }

    /// Image layer. The identifier is assigned when pushed.
    pub fn image(name: impl Into<String>, buffer: PixelBuffer) -> Self {
        Self {
            image: Some(Arc::new(buffer)),
            ..Self::blank(name)
        }
    }

    /// Flat colour layer. The identifier is assigned when pushed.
    pub fn fill(name: impl Into<String>, rgba: [u8; 4]) -> Self {
        Self {
            fill: Some(rgba),
            ..Self::blank(name)
        }
    }

    /// Stable identifier.
    #[inline]
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// True for the base layer.
    #[inline]
    pub fn is_base(&self) -> bool {
        self.is_base
    }

    /// True when the layer has an image or a fill colour.
    pub fn is_drawable(&self) -> bool {
        self.image.is_some() || self.fill.is_some()
    }
}

/// Ordered, identifier-addressed collection of layers.
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Vec<Layer>,
    next_id: u64,
    max_layers: usize,
}

impl LayerStack {
    /// Empty stack accepting up to `max_layers` layers.
    pub fn new(max_layers: usize) -> Self {
        Self {
            layers: Vec::new(),
            next_id: 1,
            max_layers,
        }
    }

    /// Stack holding only a base layer for `image`.
    pub fn with_base(image: PixelBuffer, max_layers: usize) -> Self {
        Self::new(max_layers).replace_base_image(image)
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True when the stack has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Configured layer limit.
    pub fn max_layers(&self) -> usize {
        self.max_layers
    }

    /// The base layer, if an image has been loaded.
    pub fn base(&self) -> Option<&Layer> {
        self.layers.first().filter(|l| l.is_base)
    }

    /// Looks up a layer.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Position of a layer, 0 being the bottom.
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    fn require(&self, id: LayerId) -> OpsResult<usize> {
        self.index_of(id).ok_or(OpsError::LayerNotFound(id.0))
    }

    /// Replaces the base layer's image, creating the base layer on first
    /// load. Identity and display settings survive; curve state and the
    /// alpha preview belonged to the old image and are dropped.
    pub fn replace_base_image(&self, image: PixelBuffer) -> Self {
        let mut next = self.clone();
        let image = Arc::new(image);
        match next.layers.first_mut().filter(|l| l.is_base) {
            Some(base) => {
                base.image = Some(image);
                base.curves = None;
                base.original = None;
                base.alpha_preview = None;
            }
            None => {
                let mut base = Layer::blank(BASE_LAYER_NAME);
                base.id = LayerId(next.next_id);
                next.next_id += 1;
                base.is_base = true;
                base.image = Some(image);
                next.layers.insert(0, base);
                debug!("base layer created");
            }
        }
        next
    }

    /// Appends a layer at the top. Fails when the limit is reached.
    pub fn push(&self, mut layer: Layer) -> OpsResult<(Self, LayerId)> {
        if self.layers.len() >= self.max_layers {
            warn!(max = self.max_layers, "layer limit reached");
            return Err(OpsError::LayerLimit(self.max_layers));
        }
        let mut next = self.clone();
        let id = LayerId(next.next_id);
        next.next_id += 1;
        layer.id = id;
        layer.is_base = false;
        next.layers.push(layer);
        debug!(%id, count = next.layers.len(), "layer added");
        Ok((next, id))
    }

    /// Removes a layer. The base layer is rejected.
    pub fn remove(&self, id: LayerId) -> OpsResult<Self> {
        let index = self.require(id)?;
        if self.layers[index].is_base {
            return Err(OpsError::BaseLayerProtected("removed"));
        }
        let mut next = self.clone();
        next.layers.remove(index);
        Ok(next)
    }

    /// Swaps a layer with its neighbour.
    ///
    /// Moving past either end returns the stack unchanged. Moving the base
    /// layer, or moving a layer below it, is rejected.
    pub fn move_layer(&self, id: LayerId, direction: Direction) -> OpsResult<Self> {
        let index = self.require(id)?;
        let target = match direction {
            Direction::Up => index + 1,
            Direction::Down => match index.checked_sub(1) {
                Some(t) => t,
                None if self.layers[index].is_base => {
                    return Err(OpsError::BaseLayerProtected("moved"));
                }
                None => return Ok(self.clone()),
            },
        };
        if self.layers[index].is_base || self.layers.get(target).is_some_and(|l| l.is_base) {
            return Err(OpsError::BaseLayerProtected("moved"));
        }
        if target >= self.layers.len() {
            return Ok(self.clone());
        }
        let mut next = self.clone();
        next.layers.swap(index, target);
        Ok(next)
    }

    fn update(&self, id: LayerId, f: impl FnOnce(&mut Layer) -> OpsResult<()>) -> OpsResult<Self> {
        let index = self.require(id)?;
        let mut next = self.clone();
        f(&mut next.layers[index])?;
        Ok(next)
    }

    /// Sets visibility.
    pub fn set_visible(&self, id: LayerId, visible: bool) -> OpsResult<Self> {
        self.update(id, |l| {
            l.visible = visible;
            Ok(())
        })
    }

    /// Sets opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&self, id: LayerId, opacity: f64) -> OpsResult<Self> {
        let opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
        self.update(id, |l| {
            l.opacity = opacity;
            Ok(())
        })
    }

    /// Sets the blend mode.
    pub fn set_blend_mode(&self, id: LayerId, mode: BlendMode) -> OpsResult<Self> {
        self.update(id, |l| {
            l.blend_mode = mode;
            Ok(())
        })
    }

    /// Renames a layer.
    pub fn rename(&self, id: LayerId, name: impl Into<String>) -> OpsResult<Self> {
        let name = name.into();
        self.update(id, |l| {
            l.name = name;
            Ok(())
        })
    }

    /// Builds the alpha preview from the layer's image.
    pub fn set_alpha_preview(&self, id: LayerId) -> OpsResult<Self> {
        self.update(id, |l| {
            let image = l.image.as_ref().ok_or(OpsError::NoImage(id.0))?;
            l.alpha_preview = Some(Arc::new(extract_alpha(image)));
            Ok(())
        })
    }

    /// Sets whether the alpha preview is drawn.
    pub fn set_alpha_visible(&self, id: LayerId, visible: bool) -> OpsResult<Self> {
        self.update(id, |l| {
            l.alpha_visible = visible;
            Ok(())
        })
    }

    /// Drops the alpha preview.
    pub fn remove_alpha_preview(&self, id: LayerId) -> OpsResult<Self> {
        self.update(id, |l| {
            l.alpha_preview = None;
            Ok(())
        })
    }

    /// Applies a tone curve to a layer's image.
    ///
    /// The curve always runs on the pre-curve image, so replacing a curve
    /// does not stack it on the previous one.
    pub fn apply_curves(&self, id: LayerId, curve: ToneCurve, channel: Channel) -> OpsResult<Self> {
        self.update(id, |l| {
            let source = l
                .original
                .clone()
                .or_else(|| l.image.clone())
                .ok_or(OpsError::NoImage(id.0))?;
            let corrected = curve.build_lut().apply(&source, channel);
            l.image = Some(Arc::new(corrected));
            l.original = Some(source);
            l.curves = Some(CurveAdjustment { curve, channel });
            Ok(())
        })
    }

    /// Restores the pre-curve image. A layer without curves is unchanged.
    pub fn remove_curves(&self, id: LayerId) -> OpsResult<Self> {
        self.update(id, |l| {
            if let Some(original) = l.original.take() {
                l.image = Some(original);
            }
            l.curves = None;
            Ok(())
        })
    }

    /// Convolves a layer's image. Any tone curve is baked in: the filtered
    /// image becomes the new pre-curve state.
    pub fn apply_kernel(&self, id: LayerId, kernel: &Kernel) -> OpsResult<Self> {
        self.update(id, |l| {
            let image = l.image.as_ref().ok_or(OpsError::NoImage(id.0))?;
            l.image = Some(Arc::new(apply_kernel(image, kernel)));
            l.original = None;
            l.curves = None;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::KernelPreset;

    fn base_stack() -> LayerStack {
        LayerStack::with_base(PixelBuffer::filled(2, 2, [100, 100, 100, 255]), 4)
    }

    #[test]
    fn test_base_created_once() {
        let stack = base_stack();
        assert_eq!(stack.len(), 1);
        let base = stack.base().unwrap();
        let base_id = base.id();
        assert!(base.is_base());
        assert_eq!(base.name, BASE_LAYER_NAME);

        let stack = stack.set_opacity(base_id, 0.25).unwrap();
        let reloaded = stack.replace_base_image(PixelBuffer::filled(3, 1, [1, 2, 3, 255]));
        assert_eq!(reloaded.len(), 1);
        let base = reloaded.base().unwrap();
        assert_eq!(base.id(), base_id);
        assert_eq!(base.opacity, 0.25);
        assert_eq!(base.image.as_ref().unwrap().dimensions(), (3, 1));
    }

    #[test]
    fn test_edits_return_new_stack() {
        let stack = base_stack();
        let (next, id) = stack.push(Layer::fill(NEW_LAYER_NAME, DEFAULT_FILL)).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next.index_of(id), Some(1));
    }

    #[test]
    fn test_base_id_allocated_like_others() {
        let fill = Layer::fill("f", DEFAULT_FILL);
        let (stack, a) = LayerStack::new(4).push(fill.clone()).unwrap();
        let stack = stack.replace_base_image(PixelBuffer::filled(1, 1, [0, 0, 0, 255]));
        let base = stack.base().unwrap().id();
        assert_ne!(base, a);
        assert_ne!(base, fill.id());
        assert!(stack.get(fill.id()).is_none());

        let (_, b) = stack.push(fill).unwrap();
        assert_ne!(b, base);
        assert_ne!(b, a);
    }

    #[test]
    fn test_ids_not_reused() {
        let (stack, a) = base_stack().push(Layer::fill("a", DEFAULT_FILL)).unwrap();
        let stack = stack.remove(a).unwrap();
        let (_, b) = stack.push(Layer::fill("b", DEFAULT_FILL)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_layer_limit() {
        let mut stack = base_stack();
        for i in 0..3 {
            stack = stack.push(Layer::fill(format!("l{i}"), DEFAULT_FILL)).unwrap().0;
        }
        assert!(matches!(
            stack.push(Layer::fill("extra", DEFAULT_FILL)),
            Err(OpsError::LayerLimit(4))
        ));
    }

    #[test]
    fn test_base_protected() {
        let stack = base_stack();
        let base = stack.base().unwrap().id();
        assert!(matches!(stack.remove(base), Err(OpsError::BaseLayerProtected(_))));
        assert!(stack.move_layer(base, Direction::Up).is_err());
        assert!(stack.move_layer(base, Direction::Down).is_err());
        assert!(matches!(stack.remove(LayerId(99)), Err(OpsError::LayerNotFound(99))));
    }

    #[test]
    fn test_move_layers() {
        let stack = base_stack();
        let (stack, a) = stack.push(Layer::fill("a", DEFAULT_FILL)).unwrap();
        let (stack, b) = stack.push(Layer::fill("b", DEFAULT_FILL)).unwrap();

        let moved = stack.move_layer(b, Direction::Down).unwrap();
        assert_eq!(moved.index_of(b), Some(1));
        assert_eq!(moved.index_of(a), Some(2));

        // top layer moving up is a no-op
        let same = stack.move_layer(b, Direction::Up).unwrap();
        assert_eq!(same.index_of(b), Some(2));

        assert!(stack.move_layer(a, Direction::Down).is_err());
    }

    #[test]
    fn test_move_without_base() {
        let stack = LayerStack::new(4);
        let (stack, a) = stack.push(Layer::fill("a", DEFAULT_FILL)).unwrap();
        let (stack, b) = stack.push(Layer::fill("b", DEFAULT_FILL)).unwrap();
        let same = stack.move_layer(a, Direction::Down).unwrap();
        assert_eq!(same.index_of(a), Some(0));
        let swapped = stack.move_layer(a, Direction::Up).unwrap();
        assert_eq!(swapped.index_of(b), Some(0));
    }

    #[test]
    fn test_opacity_clamped() {
        let stack = base_stack();
        let id = stack.base().unwrap().id();
        assert_eq!(stack.set_opacity(id, 1.7).unwrap().get(id).unwrap().opacity, 1.0);
        assert_eq!(stack.set_opacity(id, -2.0).unwrap().get(id).unwrap().opacity, 0.0);
    }

    #[test]
    fn test_curves_do_not_compound() {
        let stack = base_stack();
        let id = stack.base().unwrap().id();
        let brighten = ToneCurve::new(100, 200, 200, 255);

        let once = stack.apply_curves(id, brighten, Channel::Rgb).unwrap();
        let twice = once.apply_curves(id, brighten, Channel::Rgb).unwrap();
        let px = twice.get(id).unwrap().image.as_ref().unwrap().pixel(0, 0).unwrap();
        assert_eq!(px, [200, 200, 200, 255]);

        let restored = twice.remove_curves(id).unwrap();
        let layer = restored.get(id).unwrap();
        assert!(layer.curves.is_none());
        assert!(layer.original.is_none());
        assert_eq!(layer.image.as_ref().unwrap().pixel(1, 1), Some([100, 100, 100, 255]));
    }

    #[test]
    fn test_fill_layer_has_no_image_for_curves() {
        let (stack, id) = base_stack().push(Layer::fill("f", DEFAULT_FILL)).unwrap();
        assert!(matches!(
            stack.apply_curves(id, ToneCurve::IDENTITY, Channel::Red),
            Err(OpsError::NoImage(_))
        ));
        assert!(stack.set_alpha_preview(id).is_err());
    }

    #[test]
    fn test_kernel_bakes_curves() {
        let stack = base_stack();
        let id = stack.base().unwrap().id();
        let curved = stack.apply_curves(id, ToneCurve::new(100, 50, 200, 200), Channel::Rgb).unwrap();
        let filtered = curved.apply_kernel(id, &KernelPreset::BoxBlur.kernel()).unwrap();
        let layer = filtered.get(id).unwrap();
        assert!(layer.original.is_none());
        assert_eq!(layer.image.as_ref().unwrap().pixel(0, 0), Some([50, 50, 50, 255]));
    }

    #[test]
    fn test_alpha_preview_lifecycle() {
        let stack = base_stack();
        let id = stack.base().unwrap().id();
        let with = stack.set_alpha_preview(id).unwrap();
        let preview = with.get(id).unwrap().alpha_preview.clone().unwrap();
        assert_eq!(preview.pixel(0, 0), Some([255, 255, 255, 255]));

        let hidden = with.set_alpha_visible(id, false).unwrap();
        assert!(!hidden.get(id).unwrap().alpha_visible);
        let removed = hidden.remove_alpha_preview(id).unwrap();
        assert!(removed.get(id).unwrap().alpha_preview.is_none());
    }
}
