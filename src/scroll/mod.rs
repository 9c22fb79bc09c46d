//! Scroll / layout adapter
//!
//! Wheel-to-horizontal redirection as a pure decision function, plus the
//! bus-driven scroll-configuration proxy (`proxy`). DOM installation of
//! the wheel listener lives in `api::scroll_dom`; everything here is
//! DOM-free and tested natively.

pub mod proxy;

use crate::models::events::LayoutMode;

/// Multiplier for line-unit wheel deltas.
const LINE_DELTA_PX: f64 = 40.0;

/// Unit of a wheel event's delta values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    /// Map the DOM `deltaMode` constant (0/1/2).
    pub fn from_dom(mode: u32) -> WheelDeltaMode {
        match mode {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }
}

/// Raw wheel input, normalized out of the DOM event.
#[derive(Clone, Copy, Debug)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: WheelDeltaMode,
    /// True when ctrl, meta, or alt is held (reserved for zoom/system
    /// shortcuts).
    pub modifier_held: bool,
}

/// Scroll geometry of the target container at event time.
#[derive(Clone, Copy, Debug)]
pub struct ScrollMetrics {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

impl ScrollMetrics {
    fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    fn has_horizontal_overflow(&self) -> bool {
        self.scroll_width > self.client_width
    }
}

/// Outcome of a wheel event on the score container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelAction {
    /// Leave the event unhandled; default browser behavior applies.
    Pass,
    /// Consume the event and scroll horizontally to the given position.
    Scroll { to: f64 },
}

/// Decide what to do with a wheel event.
///
/// The event is passed through when a modifier is held, when the layout is
/// not horizontal, when the container has no horizontal overflow, or when
/// the dominant delta pushes past the start/end boundary. Boundary events
/// stay unhandled so outer scroll containers and browser gestures keep
/// working at the edges.
pub fn decide(input: &WheelInput, metrics: &ScrollMetrics, layout: LayoutMode) -> WheelAction {
    if input.modifier_held || layout != LayoutMode::Horizontal || !metrics.has_horizontal_overflow() {
        return WheelAction::Pass;
    }

    let unit = match input.delta_mode {
        WheelDeltaMode::Pixel => 1.0,
        WheelDeltaMode::Line => LINE_DELTA_PX,
        WheelDeltaMode::Page => metrics.client_width,
    };

    // Dominant axis becomes the effective horizontal delta.
    let delta = if input.delta_x.abs() > input.delta_y.abs() {
        input.delta_x * unit
    } else {
        input.delta_y * unit
    };

    if delta == 0.0 {
        return WheelAction::Pass;
    }

    let max = metrics.max_scroll_left();
    let at_start = metrics.scroll_left <= 0.0;
    let at_end = metrics.scroll_left >= max;

    if (delta < 0.0 && at_start) || (delta > 0.0 && at_end) {
        return WheelAction::Pass;
    }

    WheelAction::Scroll { to: (metrics.scroll_left + delta).clamp(0.0, max) }
}
