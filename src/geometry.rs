//! Small numeric and sequence helpers shared by layout and interaction code.

/// Constrain `value` to the inclusive range `[low, high]`.
///
/// Mirrors `min(high, max(value, low))`: when the bounds are inverted the
/// upper bound wins, which keeps scrollbar math stable for degenerate
/// (zero-travel) tracks.
pub fn constrain(value: f32, low: f32, high: f32) -> f32 {
    high.min(value.max(low))
}

/// Move the element at `from` to `to`, shifting every element strictly
/// between them one slot against the direction of travel.
///
/// Runs in `O(|to - from|)` and preserves the relative order of all other
/// elements. Out-of-range indices and `from == to` leave the slice untouched.
pub fn reorder<T>(items: &mut [T], from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    if from < to {
        if let Some(window) = items.get_mut(from..=to) {
            window.rotate_left(1);
        }
    } else if let Some(window) = items.get_mut(to..=from) {
        window.rotate_right(1);
    }
}
