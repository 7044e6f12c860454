//! Formatting utilities for terminal output

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format entropy as a bar scaled to the largest possible entropy
///
/// `total_candidates` bounds the entropy at log₂(n) bits.
#[must_use]
pub fn entropy_bar(entropy: f64, total_candidates: usize, width: usize) -> String {
    let max_entropy = (total_candidates.max(1) as f64).log2();
    create_progress_bar(entropy, max_entropy, width)
}

/// "1 guess", "4 guesses"
#[must_use]
pub fn guess_count(n: usize) -> String {
    if n == 1 {
        "1 guess".to_string()
    } else {
        format!("{n} guesses")
    }
}
