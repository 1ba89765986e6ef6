//! Presentation collaborators
//!
//! The simulation never touches the page directly. Counters and the one-shot
//! outcome message flow out through `Hud`; optional parameter widgets are
//! created and torn down through `Controls`.

use crate::sim::{FrameReport, Notification};

/// Text sink for the score/health readouts and terminal message
pub trait Hud {
    fn set_score(&mut self, text: &str);
    fn set_health(&mut self, text: &str);
    fn notify(&mut self, notification: &Notification);

    /// Write both counters and forward any notification of the frame
    fn apply(&mut self, report: &FrameReport) {
        self.set_score(&report.score.to_string());
        self.set_health(&report.health.to_string());
        for notification in &report.notifications {
            self.notify(notification);
        }
    }
}

/// Parameter-tweaking widgets shown while a session is live
pub trait Controls {
    fn render_controls(&mut self);
    fn clear_controls(&mut self);
}

/// For scenes without widgets
#[derive(Debug, Clone, Copy, Default)]
pub struct NoControls;

impl Controls for NoControls {
    fn render_controls(&mut self) {}
    fn clear_controls(&mut self) {}
}

/// HUD that logs instead of drawing; used by the headless binary
#[derive(Debug, Clone, Default)]
pub struct LogHud {
    pub score: String,
    pub health: String,
    pub messages: Vec<&'static str>,
}

impl Hud for LogHud {
    fn set_score(&mut self, text: &str) {
        if self.score != text {
            log::debug!("Score: {}", text);
            self.score = text.to_string();
        }
    }

    fn set_health(&mut self, text: &str) {
        if self.health != text {
            log::debug!("Health: {}", text);
            self.health = text.to_string();
        }
    }

    fn notify(&mut self, notification: &Notification) {
        log::info!("{}", notification.message());
        self.messages.push(notification.message());
    }
}
