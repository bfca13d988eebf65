//! Deferred images and the expression nodes behind them.
//!
//! Every builder returns a new [`Image`] that references its inputs; nothing
//! is computed until an [`Evaluator`](crate::Evaluator) materializes it.
//! Masked pixels are represented as NaN throughout.

use std::sync::Arc;

use crate::pixel::PixelType;

/// Elementwise binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Min,
    Max,
    Gt,
    UpdateMask,
    Coalesce,
}

impl BinaryOp {
    pub(crate) fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            // Division by zero yields 0 rather than an infinity; zero
            // results are normalized to +0.
            Self::Divide => {
                if b == 0.0 && !a.is_nan() {
                    0.0
                } else {
                    a / b + 0.0
                }
            }
            Self::Min => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else {
                    a.min(b)
                }
            }
            Self::Max => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else {
                    a.max(b)
                }
            }
            Self::Gt => {
                if a.is_nan() || b.is_nan() {
                    f64::NAN
                } else if a > b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::UpdateMask => {
                if b.is_nan() || b == 0.0 {
                    f64::NAN
                } else {
                    a
                }
            }
            Self::Coalesce => {
                if a.is_nan() {
                    b
                } else {
                    a
                }
            }
        }
    }
}

/// Reductions over an ordered collection of images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reducer {
    Sum,
    ValidSum,
    Mean,
    Count,
    Mosaic,
}

impl Reducer {
    /// Reduces one pixel column, skipping masked values.
    pub(crate) fn apply(self, values: impl Iterator<Item = f64>) -> f64 {
        let valid = values.filter(|v| !v.is_nan());
        match self {
            Self::Sum => valid.fold(0.0, |s, v| s + v),
            Self::ValidSum => {
                let (total, n) = valid.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                if n == 0 { f64::NAN } else { total }
            }
            Self::Count => valid.count() as f64,
            Self::Mean => {
                let (total, n) = valid.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                if n == 0 { f64::NAN } else { total / n as f64 }
            }
            Self::Mosaic => valid.last().unwrap_or(f64::NAN),
        }
    }
}

/// The operation a node applies to its inputs.
#[derive(Debug)]
pub(crate) enum Op {
    Constant(f64),
    Pixels(Arc<[f64]>),
    Binary(BinaryOp),
    Clamp { low: f64, high: f64 },
    Round,
    Cast(PixelType),
    Unmask { fill: f64 },
    Reduce(Reducer),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) op: Op,
    pub(crate) inputs: Vec<Image>,
}

impl Drop for Node {
    // Dropping a long day-over-day chain recursively would overflow the
    // stack, so uniquely owned inputs are unlinked iteratively.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.inputs);
        while let Some(Image(node)) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(node) {
                pending.append(&mut node.inputs);
            }
        }
    }
}

/// A handle to an immutable, lazily evaluated single-band image.
///
/// Cloning is cheap and shares the underlying expression, so an image built
/// once and referenced from many places is only computed once per
/// evaluator.
#[derive(Debug, Clone)]
pub struct Image(Arc<Node>);

impl Image {
    fn wrap(op: Op, inputs: Vec<Image>) -> Self {
        Self(Arc::new(Node { op, inputs }))
    }

    pub(crate) fn node(&self) -> &Node {
        &self.0
    }

    /// Stable identity of the shared expression node.
    pub(crate) fn key(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// An image with the same value in every pixel.
    pub fn constant(value: f64) -> Self {
        Self::wrap(Op::Constant(value), Vec::new())
    }

    /// An image with every pixel masked.
    pub fn masked() -> Self {
        Self::constant(f64::NAN)
    }

    /// An image from explicit per-pixel values; NaN marks masked pixels.
    pub fn from_pixels(values: impl Into<Vec<f64>>) -> Self {
        let values: Vec<f64> = values.into();
        Self::wrap(Op::Pixels(values.into()), Vec::new())
    }

    fn binary(&self, op: BinaryOp, rhs: impl Into<Image>) -> Self {
        Self::wrap(Op::Binary(op), vec![self.clone(), rhs.into()])
    }

    /// Pixelwise `self + rhs`.
    pub fn add(&self, rhs: impl Into<Image>) -> Self {
        self.binary(BinaryOp::Add, rhs)
    }

    /// Pixelwise `self - rhs`.
    pub fn subtract(&self, rhs: impl Into<Image>) -> Self {
        self.binary(BinaryOp::Subtract, rhs)
    }

    /// Pixelwise `self * rhs`.
    pub fn multiply(&self, rhs: impl Into<Image>) -> Self {
        self.binary(BinaryOp::Multiply, rhs)
    }

    /// Pixelwise `self / rhs`; a zero denominator yields 0.
    pub fn divide(&self, rhs: impl Into<Image>) -> Self {
        self.binary(BinaryOp::Divide, rhs)
    }

    /// Pixelwise minimum; masked if either side is masked.
    pub fn min(&self, rhs: impl Into<Image>) -> Self {
        self.binary(BinaryOp::Min, rhs)
    }

    /// Pixelwise maximum; masked if either side is masked.
    pub fn max(&self, rhs: impl Into<Image>) -> Self {
        self.binary(BinaryOp::Max, rhs)
    }

    /// 1 where `self > rhs`, 0 elsewhere.
    pub fn gt(&self, rhs: impl Into<Image>) -> Self {
        self.binary(BinaryOp::Gt, rhs)
    }

    /// Masks every pixel where `mask` is 0 or masked.
    pub fn update_mask(&self, mask: impl Into<Image>) -> Self {
        self.binary(BinaryOp::UpdateMask, mask)
    }

    /// Takes `other` wherever `self` is masked.
    pub fn coalesce(&self, other: impl Into<Image>) -> Self {
        self.binary(BinaryOp::Coalesce, other)
    }

    /// Replaces masked pixels with `fill`.
    pub fn unmask(&self, fill: f64) -> Self {
        Self::wrap(Op::Unmask { fill }, vec![self.clone()])
    }

    /// Clamps every pixel to `[low, high]`.
    pub fn clamp(&self, low: f64, high: f64) -> Self {
        Self::wrap(Op::Clamp { low, high }, vec![self.clone()])
    }

    /// Rounds half away from zero.
    pub fn round(&self) -> Self {
        Self::wrap(Op::Round, vec![self.clone()])
    }

    /// Converts to `pixel_type` (see [`PixelType::convert`]).
    pub fn cast(&self, pixel_type: PixelType) -> Self {
        Self::wrap(Op::Cast(pixel_type), vec![self.clone()])
    }

    /// Validity mask: 1 where the pixel is unmasked, 0 elsewhere.
    pub fn mask(&self) -> Self {
        Self::count(std::slice::from_ref(self))
    }

    fn reduce(reducer: Reducer, images: &[Image]) -> Self {
        Self::wrap(Op::Reduce(reducer), images.to_vec())
    }

    /// Sum of unmasked values; 0 where nothing is valid.
    pub fn sum(images: &[Image]) -> Self {
        Self::reduce(Reducer::Sum, images)
    }

    /// Sum of unmasked values; masked where nothing is valid.
    pub fn valid_sum(images: &[Image]) -> Self {
        Self::reduce(Reducer::ValidSum, images)
    }

    /// Mean of unmasked values; masked where nothing is valid.
    pub fn mean(images: &[Image]) -> Self {
        Self::reduce(Reducer::Mean, images)
    }

    /// Number of unmasked values.
    pub fn count(images: &[Image]) -> Self {
        Self::reduce(Reducer::Count, images)
    }

    /// Last unmasked value in collection order.
    pub fn mosaic(images: &[Image]) -> Self {
        Self::reduce(Reducer::Mosaic, images)
    }
}

impl From<f64> for Image {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<&Image> for Image {
    fn from(image: &Image) -> Self {
        image.clone()
    }
}
