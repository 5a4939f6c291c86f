//! Composite command
//!
//! Builds a layer stack on top of a base image and flattens it. Layer specs
//! carry optional opacity and blend mode suffixes: `top.png:0.5:multiply`.

use crate::config::Config;
use crate::CompositeArgs;
use anyhow::{Context, Result};
use grayedit_core::parse_hex_color;
use grayedit_ops::{BlendMode, Document, Layer};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A parsed `SOURCE[:OPACITY[:MODE]]` argument.
#[derive(Debug, Clone, PartialEq)]
struct LayerSpec {
    source: String,
    opacity: f64,
    mode: BlendMode,
}

/// Splits suffixes from the right so paths may contain ':'.
fn parse_spec(text: &str) -> Result<LayerSpec> {
    let mut source = text;
    let mut opacity = 1.0;
    let mut mode = BlendMode::Normal;

    if let Some((head, tail)) = source.rsplit_once(':') {
        if let Ok(m) = tail.parse::<BlendMode>() {
            mode = m;
            source = head;
        }
    }
    if let Some((head, tail)) = source.rsplit_once(':') {
        if let Ok(o) = tail.parse::<f64>() {
            if !(0.0..=1.0).contains(&o) {
                anyhow::bail!("Opacity {o} outside 0..1 in {text:?}");
            }
            opacity = o;
            source = head;
        }
    }
    if source.is_empty() {
        anyhow::bail!("Missing layer source in {text:?}");
    }
    Ok(LayerSpec {
        source: source.to_string(),
        opacity,
        mode,
    })
}

fn layer_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("layer")
        .to_string()
}

fn push_layer(doc: &mut Document, layer: Layer, spec: &LayerSpec, alpha_preview: bool) -> Result<()> {
    let (stack, id) = doc.stack().push(layer)?;
    let mut stack = stack.set_opacity(id, spec.opacity)?.set_blend_mode(id, spec.mode)?;
    if alpha_preview && stack.get(id).is_some_and(|l| l.image.is_some()) {
        stack = stack.set_alpha_preview(id)?;
    }
    doc.commit(stack);
    Ok(())
}

pub fn run(args: CompositeArgs, config: &Config, verbose: u8) -> Result<()> {
    let mut doc = Document::new(config.limits.max_layers);
    let base = super::load_image(&args.base, &config.limits)?;
    let (width, height) = base.buffer.dimensions();
    doc.load_image(base.buffer);

    if args.alpha_preview {
        let base = doc.stack().base().map(Layer::id).context("No base layer")?;
        let stack = doc.stack().set_alpha_preview(base)?;
        doc.commit(stack);
    }

    for text in &args.layers {
        let spec = parse_spec(text)?;
        let path = PathBuf::from(&spec.source);
        let loaded = super::load_image(&path, &config.limits)?;
        debug!(path = %path.display(), opacity = spec.opacity, mode = %spec.mode, "image layer");
        let layer = Layer::image(layer_name(&path), loaded.buffer);
        push_layer(&mut doc, layer, &spec, args.alpha_preview)
            .with_context(|| format!("Failed to add layer: {text}"))?;
    }

    for text in &args.fills {
        let spec = parse_spec(text)?;
        let rgba = parse_hex_color(&spec.source)?;
        debug!(color = %spec.source, opacity = spec.opacity, mode = %spec.mode, "fill layer");
        let layer = Layer::fill(spec.source.clone(), rgba);
        push_layer(&mut doc, layer, &spec, false)
            .with_context(|| format!("Failed to add fill: {text}"))?;
    }

    info!(layers = doc.stack().len(), width, height, "Compositing");
    if verbose > 0 {
        println!("Compositing {} layers at {}x{}", doc.stack().len(), width, height);
    }

    let flat = doc.composite().context("Nothing to composite")?;
    super::save_image(&args.output, flat, config.quality)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
