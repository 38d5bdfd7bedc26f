use anyhow::{Result, bail};
use colored::Colorize;
use folio_motion::HorizontalPin;
use folio_motion::pin::{PIN_BREAKPOINT, is_enabled_for};

use crate::diag::log_verbose;

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1440.0;

fn card_lines(pin: &HorizontalPin, progress: f64) -> Vec<String> {
    let x = pin.card_x_percent(progress);
    (1..=pin.cards())
        .map(|card| format!("  card {:<2} x_percent {:>8.2}%", card, x))
        .collect()
}

/// Pin geometry at one progress value, or at every snap point when none given.
pub fn report(cards: usize, progress: Option<f64>, viewport_width: f64) -> Result<Vec<String>> {
    if cards == 0 {
        bail!("A gallery needs at least one card");
    }
    if let Some(p) = progress {
        if !(0.0..=1.0).contains(&p) {
            bail!("Progress must be between 0 and 1 (got {})", p);
        }
    }

    if !is_enabled_for(viewport_width) {
        return Ok(vec![format!(
            "Pinning disabled at {}px (needs more than {}px); cards flow vertically",
            viewport_width, PIN_BREAKPOINT
        )]);
    }

    let mut pin = HorizontalPin::new(cards);
    pin.resize(viewport_width, 0.0);
    log_verbose(&format!("Pin enabled for {} cards at {}px", cards, viewport_width));

    let mut lines = vec![format!("Pin distance: {}px", pin.pin_distance())];
    let points = match progress {
        Some(p) => {
            lines.push(format!(
                "Progress {:.3} snaps to {:.3} (scroll {:.0}px)",
                p,
                pin.snap(p),
                pin.scroll_for(pin.snap(p))
            ));
            vec![p]
        }
        None => pin.snap_points(),
    };

    for p in points {
        lines.push(format!(
            "Progress {:.3}: row offset {:>7.2}% of row width",
            p,
            pin.row_offset_fraction(p) * 100.0
        ));
        lines.extend(card_lines(&pin, p));
    }
    Ok(lines)
}

pub fn run(cards: usize, progress: Option<f64>, viewport_width: f64) -> Result<()> {
    let lines = report(cards, progress, viewport_width)?;
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_at_breakpoint() {
        let lines = report(6, Some(0.5), PIN_BREAKPOINT).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("disabled"));
    }

    #[test]
    fn test_full_progress_moves_row_by_n_minus_one_over_n() {
        let lines = report(6, Some(1.0), DEFAULT_VIEWPORT_WIDTH).unwrap();
        assert!(lines.contains(&"Pin distance: 2400px".to_string()));
        assert!(lines.iter().any(|l| l.contains("row offset  -83.33%")));
        assert!(lines.iter().any(|l| l.contains("x_percent  -500.00%")));
    }

    #[test]
    fn test_partial_progress_reports_snap() {
        let lines = report(6, Some(0.33), DEFAULT_VIEWPORT_WIDTH).unwrap();
        assert!(lines.iter().any(|l| l.contains("snaps to 0.400")));
    }

    #[test]
    fn test_without_progress_lists_snap_points() {
        let lines = report(3, None, DEFAULT_VIEWPORT_WIDTH).unwrap();
        let headers = lines.iter().filter(|l| l.starts_with("Progress")).count();
        assert_eq!(headers, 3);
    }

    #[test]
    fn test_single_card_never_moves() {
        let lines = report(1, Some(1.0), DEFAULT_VIEWPORT_WIDTH).unwrap();
        assert!(lines.iter().any(|l| l.contains("x_percent     0.00%")));
    }

    #[test]
    fn test_rejects_out_of_range_progress() {
        assert!(report(6, Some(1.5), DEFAULT_VIEWPORT_WIDTH).is_err());
        assert!(report(0, None, DEFAULT_VIEWPORT_WIDTH).is_err());
    }
}
