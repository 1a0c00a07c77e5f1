//! Ink density test for a single scan line
//!
//! Handwriting leaves ink pixels in tight clusters, while scanner noise and
//! stray marks leave them scattered. A line counts as ink when the mean
//! logarithm of the distances between consecutive ink pixels is small.

/// Decide whether a scan line carries text
///
/// `positions` are the indices of the ink pixels of the line in increasing
/// order. Lines with fewer than `density_filter` ink pixels never count.
/// Otherwise the line counts when `floor(mean ln gap) <= ceil(max_distance)`,
/// the mean being taken over the gaps between neighbours. A single pixel has
/// no gaps and a mean of zero.
///
/// # Examples
///
/// ```
/// use folio_layout::is_ink_line;
///
/// let word: Vec<u32> = (100..140).collect();
/// assert!(is_ink_line(&word, 2.0, 12));
///
/// let specks = [10, 300, 700, 1100];
/// assert!(!is_ink_line(&specks, 2.0, 3));
/// ```
pub fn is_ink_line(positions: &[u32], max_distance: f64, density_filter: u32) -> bool {
    if positions.is_empty() || positions.len() < density_filter as usize {
        return false;
    }

    let gaps = positions.len() - 1;
    let mean = if gaps == 0 {
        0.0
    } else {
        let sum: f64 = positions
            .iter()
            .rev()
            .zip(positions.iter().rev().skip(1))
            .map(|(&later, &earlier)| f64::from(later.abs_diff(earlier).max(1)).ln())
            .sum();
        sum / gaps as f64
    };

    mean.floor() <= max_distance.ceil()
}
