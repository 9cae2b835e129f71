//! Scroll-triggered entry animations.
//!
//! The animation engine itself belongs to the renderer. This module only
//! decides *when* an element has entered the viewport (once, never replayed)
//! and samples a [`Transition`] into the opacity/offset pair the renderer
//! applies.

use crate::model::CardStyle;

/// Animate opacity and vertical offset from a start state to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from_opacity: f64,
    pub from_offset_y: f64,
    /// Seconds.
    pub duration: f64,
    /// Seconds after the trigger before the transition starts.
    pub delay: f64,
}

impl Transition {
    /// Fade in while rising 20px.
    pub const FADE_UP: Transition = Transition {
        from_opacity: 0.0,
        from_offset_y: 20.0,
        duration: 0.5,
        delay: 0.0,
    };

    /// Fade in without movement.
    pub const FADE: Transition = Transition {
        from_opacity: 0.0,
        from_offset_y: 0.0,
        duration: 0.5,
        delay: 0.0,
    };

    pub const fn with_delay(self, delay: f64) -> Self {
        Self { delay, ..self }
    }

    /// State `elapsed` seconds after the trigger.
    pub fn sample(&self, elapsed: f64) -> RevealFrame {
        let t = if self.duration <= 0.0 {
            if elapsed >= self.delay { 1.0 } else { 0.0 }
        } else {
            ((elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
        };
        let eased = ease_out_cubic(t);
        RevealFrame {
            opacity: self.from_opacity + (1.0 - self.from_opacity) * eased,
            offset_y: self.from_offset_y * (1.0 - eased),
            done: t >= 1.0,
        }
    }

    pub fn end(&self) -> f64 {
        self.delay + self.duration.max(0.0)
    }
}

/// What the renderer applies to an animated element this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    pub opacity: f64,
    pub offset_y: f64,
    pub done: bool,
}

impl RevealFrame {
    pub const REST: RevealFrame = RevealFrame {
        opacity: 1.0,
        offset_y: 0.0,
        done: true,
    };
}

/// Latches the first time an element is seen in the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RevealLatch {
    triggered_at: Option<f64>,
}

impl RevealLatch {
    /// Feed the current visibility at time `now` (seconds). Returns `true` on
    /// the call that triggers.
    pub fn observe(&mut self, visible: bool, now: f64) -> bool {
        if visible && self.triggered_at.is_none() {
            self.triggered_at = Some(now);
            return true;
        }
        false
    }

    pub fn has_entered(&self) -> bool {
        self.triggered_at.is_some()
    }

    /// Frame for `transition` at `now`; hidden (at the start state) until
    /// triggered.
    pub fn frame(&self, transition: &Transition, now: f64) -> RevealFrame {
        match self.triggered_at {
            Some(at) => transition.sample(now - at),
            None => RevealFrame {
                opacity: transition.from_opacity,
                offset_y: transition.from_offset_y,
                done: false,
            },
        }
    }

    /// Whether any of `transitions` is still moving at `now`.
    pub fn is_animating(&self, transitions: &[Transition], now: f64) -> bool {
        self.triggered_at
            .is_some_and(|at| transitions.iter().any(|t| now - at < t.end()))
    }
}

/// Entry animations of one section's parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionTransitions {
    pub header: Transition,
    pub controls: Transition,
    /// `None` means the grid is shown without animation.
    pub grid: Option<Transition>,
}

impl SectionTransitions {
    pub fn for_style(style: CardStyle) -> Self {
        let header = Transition::FADE_UP;
        let controls = Transition::FADE_UP.with_delay(0.2);
        match style {
            CardStyle::Project => Self {
                header,
                controls,
                grid: Some(Transition::FADE.with_delay(0.3)),
            },
            CardStyle::Skill => Self {
                header,
                controls,
                grid: None,
            },
        }
    }

    pub fn all(&self) -> Vec<Transition> {
        let mut out = vec![self.header, self.controls];
        out.extend(self.grid);
        out
    }

    /// Sample all parts at `now`.
    pub fn frames(&self, latch: &RevealLatch, now: f64) -> SectionFrames {
        SectionFrames {
            header: latch.frame(&self.header, now),
            controls: latch.frame(&self.controls, now),
            grid: self
                .grid
                .map_or(RevealFrame::REST, |grid| latch.frame(&grid, now)),
        }
    }
}

/// Per-part frames for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionFrames {
    pub header: RevealFrame,
    pub controls: RevealFrame,
    pub grid: RevealFrame,
}

impl SectionFrames {
    /// Everything at rest, for static output such as SVG export.
    pub const REST: SectionFrames = SectionFrames {
        header: RevealFrame::REST,
        controls: RevealFrame::REST,
        grid: RevealFrame::REST,
    };
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
