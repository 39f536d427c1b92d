use crate::preview::config::ResendSchedule;
use crate::preview::message::{PreviewMessage, SurfaceId};
use crate::preview::surface::Effect;

/// Timers a host arms for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostTimer {
    /// Send the latest code again
    Resend,
}

pub type HostEffects = Vec<Effect<HostTimer>>;

/// Host side of one preview: owns a surface and the latest code for it.
///
/// The latest code is overwritten on every update, never queued. Every send
/// carries the current value, so resends are idempotent.
#[derive(Debug, Clone)]
pub struct PreviewHost {
    surface: SurfaceId,
    code: String,
    resend: ResendSchedule,
    sends: u64,
}

impl PreviewHost {
    pub fn new(surface: SurfaceId, resend: ResendSchedule) -> Self {
        Self {
            surface,
            code: String::new(),
            resend,
            sends: 0,
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Total CODE messages posted
    pub fn sends(&self) -> u64 {
        self.sends
    }

    /// Replace the code and send it
    pub fn set_code(&mut self, code: impl Into<String>) -> HostEffects {
        self.code = code.into();
        vec![self.send()]
    }

    /// The owned surface finished (re)loading
    pub fn on_surface_loaded(&mut self) -> HostEffects {
        log::debug!("surface {:?} loaded, scheduling resends", self.surface);
        let offsets = self.resend.offsets.clone();
        offsets
            .into_iter()
            .map(|delay| {
                if delay.is_zero() {
                    self.send()
                } else {
                    Effect::Schedule {
                        delay,
                        timer: HostTimer::Resend,
                    }
                }
            })
            .collect()
    }

    pub fn on_timer(&mut self, timer: HostTimer) -> HostEffects {
        match timer {
            HostTimer::Resend => vec![self.send()],
        }
    }

    /// Handle a message posted by `from`. Only READY from the owned surface
    /// triggers a resend.
    pub fn on_message(&mut self, from: SurfaceId, message: &PreviewMessage) -> HostEffects {
        if from != self.surface {
            log::debug!("ignoring message from foreign surface {:?}", from);
            return Vec::new();
        }
        if message.is_ready() {
            vec![self.send()]
        } else {
            Vec::new()
        }
    }

    fn send(&mut self) -> Effect<HostTimer> {
        self.sends += 1;
        Effect::Post(PreviewMessage::code(self.code.clone()))
    }
}
