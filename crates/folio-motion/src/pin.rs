//! Pin-and-scrub for the project gallery.
//!
//! Above the desktop breakpoint the gallery stays pinned while the page
//! scrolls through a fixed distance, and that distance is mapped onto a
//! horizontal translation of the card row.

/// Pinning is enabled only for viewports wider than this
pub const PIN_BREAKPOINT: f64 = 1024.0;
/// Vertical scroll consumed per card while pinned
pub const CARD_SCROLL_WIDTH: f64 = 400.0;
/// Seconds the row takes to catch up with the scroll position
pub const SCRUB_LAG: f64 = 1.0;
/// Seconds without scroll input before snapping
pub const SNAP_IDLE: f64 = 0.12;

/// Whether pinning applies at this viewport width
pub fn is_enabled_for(viewport_width: f64) -> bool {
    viewport_width > PIN_BREAKPOINT
}

/// Output of one pin tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinFrame {
    /// Translation applied to every card, as a percentage of its own width
    pub card_x_percent: f64,
    /// Smoothed progress through the pin distance
    pub progress: f64,
    /// Scroll position to glide to once input stopped
    pub snap_to: Option<f64>,
}

impl PinFrame {
    const REST: PinFrame = PinFrame {
        card_x_percent: 0.0,
        progress: 0.0,
        snap_to: None,
    };
}

#[derive(Debug, Clone)]
pub struct HorizontalPin {
    cards: usize,
    enabled: bool,
    pin_start: f64,
    target: f64,
    current: f64,
    idle: f64,
    snapped: bool,
}

impl HorizontalPin {
    pub fn new(cards: usize) -> Self {
        Self {
            cards,
            enabled: false,
            pin_start: 0.0,
            target: 0.0,
            current: 0.0,
            idle: 0.0,
            snapped: true,
        }
    }

    pub fn cards(&self) -> usize {
        self.cards
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-evaluate against the viewport. `pin_start` is the document scroll
    /// offset at which the gallery pins. Returns whether enablement changed;
    /// disabling clears any translation.
    pub fn resize(&mut self, viewport_width: f64, pin_start: f64) -> bool {
        let enabled = is_enabled_for(viewport_width);
        let changed = enabled != self.enabled;
        self.enabled = enabled;
        self.pin_start = pin_start;
        if !enabled {
            self.target = 0.0;
            self.current = 0.0;
            self.snapped = true;
        }
        changed
    }

    /// Scroll distance the pin consumes
    pub fn pin_distance(&self) -> f64 {
        self.cards as f64 * CARD_SCROLL_WIDTH
    }

    pub fn pin_start(&self) -> f64 {
        self.pin_start
    }

    /// Linear progress through the pin at a document scroll offset
    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        let distance = self.pin_distance();
        if !self.enabled || distance <= 0.0 {
            return 0.0;
        }
        ((scroll_y - self.pin_start) / distance).clamp(0.0, 1.0)
    }

    /// Whether the gallery is held in place at this scroll offset
    pub fn is_pinned(&self, scroll_y: f64) -> bool {
        self.enabled
            && scroll_y >= self.pin_start
            && scroll_y <= self.pin_start + self.pin_distance()
    }

    /// Per-card translation in percent of a card's width. Every card moves by
    /// `N - 1` card widths at full progress.
    pub fn card_x_percent(&self, progress: f64) -> f64 {
        if !self.enabled || self.cards <= 1 {
            return 0.0;
        }
        -100.0 * (self.cards - 1) as f64 * progress.clamp(0.0, 1.0)
    }

    /// Row translation as a fraction of the whole row's width.
    /// At full progress this is `-(N - 1) / N`, aligning the last card's
    /// trailing edge with the container's.
    pub fn row_offset_fraction(&self, progress: f64) -> f64 {
        if !self.enabled || self.cards <= 1 {
            return 0.0;
        }
        let n = self.cards as f64;
        -(n - 1.0) / n * progress.clamp(0.0, 1.0)
    }

    /// Progress values the gallery snaps to: multiples of `1 / (N - 1)`
    pub fn snap_points(&self) -> Vec<f64> {
        if self.cards <= 1 {
            return vec![0.0];
        }
        let steps = self.cards - 1;
        (0..=steps).map(|i| i as f64 / steps as f64).collect()
    }

    /// Nearest snap point to `progress`
    pub fn snap(&self, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        if self.cards <= 1 {
            return progress;
        }
        let step = 1.0 / (self.cards - 1) as f64;
        ((progress / step).round() * step).clamp(0.0, 1.0)
    }

    /// Document scroll offset that corresponds to `progress`
    pub fn scroll_for(&self, progress: f64) -> f64 {
        self.pin_start + progress.clamp(0.0, 1.0) * self.pin_distance()
    }

    /// Record scroll input.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if !self.enabled {
            return;
        }
        self.target = self.progress_at(scroll_y);
        self.idle = 0.0;
        self.snapped = false;
    }

    /// Advance the scrub by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> PinFrame {
        if !self.enabled {
            return PinFrame::REST;
        }
        let dt = dt.max(0.0);

        // Exponential catch-up that covers ~98% of the gap in SCRUB_LAG
        let alpha = 1.0 - (-4.0 * dt / SCRUB_LAG).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < 1e-4 {
            self.current = self.target;
        }

        self.idle += dt;
        let mut snap_to = None;
        if !self.snapped && self.idle >= SNAP_IDLE {
            self.snapped = true;
            // Only mid-pin positions need snapping
            if self.target > 0.0 && self.target < 1.0 {
                let snapped = self.snap(self.target);
                // Scroll offsets are whole pixels, so half a pixel counts as there
                let tolerance = 0.5 / self.pin_distance();
                if (snapped - self.target).abs() > tolerance {
                    snap_to = Some(self.scroll_for(snapped));
                }
                self.target = snapped;
            }
        }

        PinFrame {
            card_x_percent: self.card_x_percent(self.current),
            progress: self.current,
            snap_to,
        }
    }

    /// True while the row still lags behind the scroll target
    pub fn is_scrubbing(&self) -> bool {
        self.enabled && (!self.snapped || self.current != self.target)
    }
}
