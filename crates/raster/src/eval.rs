//! Materialization of deferred images.

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::trace;

use crate::error::RasterError;
use crate::image::{Image, Node, Op};

/// Grids at least this large run pixel work on the rayon pool.
const PARALLEL_MIN_PIXELS: usize = 4096;

/// Materialized pixel values of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    values: Arc<[f64]>,
}

impl Raster {
    /// Returns the value at pixel `index`, or `None` when it is masked or
    /// out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().filter(|v| !v.is_nan())
    }

    /// Returns the raw values; masked pixels are NaN.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of pixels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of unmasked pixels.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Evaluates images on a fixed pixel grid.
///
/// Results are memoized per expression node for the lifetime of the
/// evaluator, so shared subexpressions (such as a water-balance state that
/// feeds every following day) are computed exactly once. Evaluation walks
/// the expression with an explicit stack, so arbitrarily long chains do not
/// grow the call stack.
#[derive(Debug)]
pub struct Evaluator {
    n_pixels: usize,
    // The image is held alongside its values so the node address used as the
    // key cannot be freed and reused while the entry exists.
    cache: HashMap<usize, (Image, Arc<[f64]>)>,
}

impl Evaluator {
    /// Creates an evaluator for a grid of `n_pixels` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::EmptyGrid`] if `n_pixels` is zero.
    pub fn new(n_pixels: usize) -> Result<Self, RasterError> {
        if n_pixels == 0 {
            return Err(RasterError::EmptyGrid);
        }
        Ok(Self {
            n_pixels,
            cache: HashMap::new(),
        })
    }

    /// Returns the number of pixels in the grid.
    pub fn n_pixels(&self) -> usize {
        self.n_pixels
    }

    /// Returns the number of memoized expression nodes.
    pub fn cached_nodes(&self) -> usize {
        self.cache.len()
    }

    /// Materializes `image`.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::PixelCountMismatch`] if any pixel image in the
    /// expression does not match the grid.
    pub fn evaluate(&mut self, image: &Image) -> Result<Raster, RasterError> {
        let mut stack: Vec<(Image, bool)> = vec![(image.clone(), false)];
        while let Some((current, expanded)) = stack.pop() {
            if self.cache.contains_key(&current.key()) {
                continue;
            }
            if expanded {
                let values = self.compute(current.node())?;
                self.cache.insert(current.key(), (current, values));
            } else {
                let pending: Vec<Image> = current
                    .node()
                    .inputs
                    .iter()
                    .filter(|input| !self.cache.contains_key(&input.key()))
                    .cloned()
                    .collect();
                stack.push((current, true));
                stack.extend(pending.into_iter().map(|input| (input, false)));
            }
        }
        trace!(cached = self.cache.len(), "evaluated image");
        Ok(Raster {
            values: Arc::clone(self.cached(image)),
        })
    }

    /// Materializes every image in order.
    ///
    /// # Errors
    ///
    /// See [`Evaluator::evaluate`].
    pub fn evaluate_all(&mut self, images: &[Image]) -> Result<Vec<Raster>, RasterError> {
        images.iter().map(|image| self.evaluate(image)).collect()
    }

    fn cached(&self, image: &Image) -> &Arc<[f64]> {
        // Inputs are always evaluated before the node that reads them.
        &self.cache[&image.key()].1
    }

    fn compute(&self, node: &Node) -> Result<Arc<[f64]>, RasterError> {
        let n = self.n_pixels;
        let inputs: Vec<&Arc<[f64]>> = node.inputs.iter().map(|im| self.cached(im)).collect();
        let values: Vec<f64> = match &node.op {
            Op::Constant(value) => vec![*value; n],
            Op::Pixels(values) => {
                if values.len() != n {
                    return Err(RasterError::PixelCountMismatch {
                        expected: n,
                        got: values.len(),
                    });
                }
                return Ok(Arc::clone(values));
            }
            Op::Binary(op) => {
                let (a, b) = (inputs[0], inputs[1]);
                map_pixels(n, |i| op.apply(a[i], b[i]))
            }
            Op::Clamp { low, high } => {
                let input = inputs[0];
                map_pixels(n, |i| {
                    let v = input[i];
                    if v.is_nan() { v } else { v.max(*low).min(*high) }
                })
            }
            Op::Round => {
                let input = inputs[0];
                map_pixels(n, |i| input[i].round())
            }
            Op::Cast(pixel_type) => {
                let input = inputs[0];
                map_pixels(n, |i| pixel_type.convert(input[i]))
            }
            Op::Unmask { fill } => {
                let input = inputs[0];
                map_pixels(n, |i| if input[i].is_nan() { *fill } else { input[i] })
            }
            Op::Reduce(reducer) => map_pixels(n, |i| reducer.apply(inputs.iter().map(|c| c[i]))),
        };
        Ok(values.into())
    }
}

fn map_pixels<F>(n: usize, f: F) -> Vec<f64>
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    if n >= PARALLEL_MIN_PIXELS {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}
