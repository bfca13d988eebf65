//! Ordered fold with per-step output.

/// Folds `items` in order, threading a state from `seed`.
///
/// `step` receives the previous state and the next item and returns the new
/// state together with the output for that item. Exactly one output is
/// produced per item; the seed itself is never emitted.
///
/// # Example
///
/// ```
/// use sims_raster::scan;
///
/// let running = scan(0, [1, 2, 3], |total, x| (total + x, total + x));
/// assert_eq!(running, vec![1, 3, 6]);
/// ```
pub fn scan<S, T, O, I, F>(seed: S, items: I, mut step: F) -> Vec<O>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&S, T) -> (S, O),
{
    let items = items.into_iter();
    let mut out = Vec::with_capacity(items.size_hint().0);
    let mut state = seed;
    for item in items {
        let (next, output) = step(&state, item);
        out.push(output);
        state = next;
    }
    out
}
