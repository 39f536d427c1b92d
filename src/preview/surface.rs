//! Rendering surface state machine.
//!
//! A [`RenderSurface`] never sleeps or spawns. Every reaction to a message or
//! timer is returned as a list of [`Effect`]s: messages to post to the host and
//! timers to arm. Whoever drives the surface (see [`crate::preview::PreviewLink`])
//! decides how time passes.

use std::time::Duration;

use crate::error::PreviewError;
use crate::preview::config::PreviewConfig;
use crate::preview::message::PreviewMessage;
use crate::preview::pipeline::{self, Attempt};
use crate::preview::runtime::ComponentRuntime;

/// Lifecycle of one isolated rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Uninitialized,
    LibrariesLoading,
    Ready,
    Rendering,
    Rendered,
    Errored,
}

impl SurfaceState {
    /// Whether the surface holds a final result for its latest payload
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Rendered | Self::Errored)
    }
}

/// Side effect requested by a host or surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<T> {
    /// Post a message across the boundary
    Post(PreviewMessage),
    /// Fire `timer` after `delay`
    Schedule { delay: Duration, timer: T },
}

/// Timers a surface arms for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTimer {
    /// Check the runtime's dependencies again
    ReadyPoll,
    /// Re-run the pipeline for payload `generation`
    Retry { generation: u64, attempt: u32 },
}

pub type SurfaceEffects = Vec<Effect<SurfaceTimer>>;

pub struct RenderSurface<R> {
    runtime: R,
    config: PreviewConfig,
    state: SurfaceState,
    generation: u64,
    code: Option<String>,
    announced: bool,
    last_error: Option<PreviewError>,
}

impl<R: ComponentRuntime> RenderSurface<R> {
    pub fn new(runtime: R, config: PreviewConfig) -> Self {
        Self {
            runtime,
            config,
            state: SurfaceState::Uninitialized,
            generation: 0,
            code: None,
            announced: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Number of payloads received so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Error currently shown, if any
    pub fn last_error(&self) -> Option<&PreviewError> {
        self.last_error.as_ref()
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn into_runtime(self) -> R {
        self.runtime
    }

    /// Surface document finished loading; begin waiting for dependencies.
    ///
    /// Calling this again models a reload: prior payload state is discarded.
    pub fn start(&mut self) -> SurfaceEffects {
        log::debug!("surface loading libraries");
        self.state = SurfaceState::LibrariesLoading;
        self.code = None;
        self.announced = false;
        self.last_error = None;
        self.generation += 1;
        self.poll_ready()
    }

    pub fn on_message(&mut self, message: PreviewMessage) -> SurfaceEffects {
        match message {
            PreviewMessage::Code { code } => self.receive_code(code),
            PreviewMessage::Ready => {
                log::debug!("surface ignoring READY");
                Vec::new()
            }
        }
    }

    pub fn on_timer(&mut self, timer: SurfaceTimer) -> SurfaceEffects {
        match timer {
            SurfaceTimer::ReadyPoll => self.poll_ready(),
            SurfaceTimer::Retry { generation, attempt } => {
                if generation != self.generation {
                    log::debug!("dropping stale retry for payload {}", generation);
                    return Vec::new();
                }
                self.attempt(attempt)
            }
        }
    }

    fn poll_ready(&mut self) -> SurfaceEffects {
        if self.announced || self.state == SurfaceState::Uninitialized {
            return Vec::new();
        }

        if self.runtime.dependencies().all_present() {
            log::debug!("surface libraries loaded");
            self.announced = true;
            if self.state == SurfaceState::LibrariesLoading {
                self.state = SurfaceState::Ready;
            }
            vec![Effect::Post(PreviewMessage::Ready)]
        } else {
            vec![Effect::Schedule {
                delay: self.config.ready_poll,
                timer: SurfaceTimer::ReadyPoll,
            }]
        }
    }

    fn receive_code(&mut self, code: String) -> SurfaceEffects {
        if self.state == SurfaceState::Uninitialized {
            log::warn!("surface not listening yet, dropping code payload");
            return Vec::new();
        }

        self.generation += 1;
        self.code = Some(code);
        self.attempt(1)
    }

    fn attempt(&mut self, attempt: u32) -> SurfaceEffects {
        let Some(code) = self.code.as_deref() else {
            return Vec::new();
        };

        self.state = SurfaceState::Rendering;
        match pipeline::attempt_render(&mut self.runtime, code) {
            Attempt::Rendered => {
                self.state = SurfaceState::Rendered;
                self.last_error = None;
                Vec::new()
            }
            Attempt::Failed(err) => self.fail(err),
            Attempt::DependenciesMissing => match self.config.retry.next_delay(attempt) {
                Some(delay) => {
                    log::debug!("libraries missing, retry {} in {:?}", attempt + 1, delay);
                    vec![Effect::Schedule {
                        delay,
                        timer: SurfaceTimer::Retry {
                            generation: self.generation,
                            attempt: attempt + 1,
                        },
                    }]
                }
                None => {
                    let err = PreviewError::LibrariesNotLoaded;
                    pipeline::present(&mut self.runtime, &err);
                    self.fail(err)
                }
            },
        }
    }

    fn fail(&mut self, err: PreviewError) -> SurfaceEffects {
        self.state = SurfaceState::Errored;
        self.last_error = Some(err);
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::config::RetryPolicy;
    use crate::preview::runtime::{Dependencies, RuntimeError, SlotValue};

    /// Libraries appear after `checks_until_ready` dependency checks
    #[derive(Default)]
    struct SlowRuntime {
        checks_until_ready: u32,
        checks: u32,
        slot: SlotValue,
        mounts: u32,
        errors: Vec<String>,
    }

    impl ComponentRuntime for SlowRuntime {
        fn dependencies(&mut self) -> Dependencies {
            self.checks += 1;
            if self.checks > self.checks_until_ready {
                Dependencies::all()
            } else {
                Dependencies::default()
            }
        }

        fn transpile(&mut self, source: &str) -> Result<String, RuntimeError> {
            Ok(source.to_string())
        }

        fn reset_slot(&mut self) -> Result<(), RuntimeError> {
            self.slot = SlotValue::Empty;
            Ok(())
        }

        fn execute(&mut self, script: &str) -> Result<(), RuntimeError> {
            if script.contains("window.__previewComponent = function") {
                self.slot = SlotValue::Callable;
            }
            Ok(())
        }

        fn bind_slot(&mut self, _identifier: &str) -> Result<(), RuntimeError> {
            Ok(())
        }

        fn slot(&mut self) -> Result<SlotValue, RuntimeError> {
            Ok(self.slot.clone())
        }

        fn mount(&mut self) -> Result<(), RuntimeError> {
            self.mounts += 1;
            Ok(())
        }

        fn show_error(&mut self, message: &str) -> Result<(), RuntimeError> {
            self.errors.push(message.to_string());
            Ok(())
        }
    }

    const FOO: &str = "export default function Foo(){ return <div>Hi</div>; }";

    fn surface(checks_until_ready: u32) -> RenderSurface<SlowRuntime> {
        let runtime = SlowRuntime {
            checks_until_ready,
            ..Default::default()
        };
        RenderSurface::new(runtime, PreviewConfig::default())
    }

    #[test]
    fn test_ready_announced_once() {
        let mut surface = surface(0);
        assert_eq!(surface.state(), SurfaceState::Uninitialized);

        let effects = surface.start();
        assert_eq!(effects, vec![Effect::Post(PreviewMessage::Ready)]);
        assert_eq!(surface.state(), SurfaceState::Ready);

        assert!(surface.on_timer(SurfaceTimer::ReadyPoll).is_empty());
    }

    #[test]
    fn test_polls_until_libraries_load() {
        let mut surface = surface(2);

        let effects = surface.start();
        assert_eq!(
            effects,
            vec![Effect::Schedule {
                delay: Duration::from_millis(50),
                timer: SurfaceTimer::ReadyPoll
            }]
        );
        assert_eq!(surface.state(), SurfaceState::LibrariesLoading);

        assert!(matches!(surface.on_timer(SurfaceTimer::ReadyPoll)[0], Effect::Schedule { .. }));
        assert_eq!(
            surface.on_timer(SurfaceTimer::ReadyPoll),
            vec![Effect::Post(PreviewMessage::Ready)]
        );
        assert_eq!(surface.state(), SurfaceState::Ready);
    }

    #[test]
    fn test_code_before_start_is_dropped() {
        let mut surface = surface(0);
        assert!(surface.on_message(PreviewMessage::code(FOO)).is_empty());
        assert_eq!(surface.state(), SurfaceState::Uninitialized);
        assert_eq!(surface.runtime().mounts, 0);
    }

    #[test]
    fn test_render_and_recover_from_error() {
        let mut surface = surface(0);
        surface.start();

        surface.on_message(PreviewMessage::code("const x = 1;"));
        assert_eq!(surface.state(), SurfaceState::Errored);
        assert_eq!(surface.last_error(), Some(&PreviewError::MissingExport));

        surface.on_message(PreviewMessage::code(FOO));
        assert_eq!(surface.state(), SurfaceState::Rendered);
        assert_eq!(surface.last_error(), None);
        assert_eq!(surface.runtime().mounts, 1);
    }

    #[test]
    fn test_missing_libraries_retry_then_render() {
        // start checks once, the first attempt checks once more
        let mut surface = surface(2);
        surface.start();

        let effects = surface.on_message(PreviewMessage::code(FOO));
        assert_eq!(surface.state(), SurfaceState::Rendering);
        let Effect::Schedule { delay, timer } = effects[0] else {
            panic!("expected a retry, got {:?}", effects);
        };
        assert_eq!(delay, Duration::from_millis(600));

        assert!(surface.on_timer(timer).is_empty());
        assert_eq!(surface.state(), SurfaceState::Rendered);
    }

    #[test]
    fn test_missing_libraries_exhaust_retries() {
        let mut surface = surface(u32::MAX);
        surface.start();

        let effects = surface.on_message(PreviewMessage::code(FOO));
        let Effect::Schedule { timer, .. } = effects[0] else {
            panic!("expected a retry");
        };
        assert!(surface.on_timer(timer).is_empty());

        assert_eq!(surface.state(), SurfaceState::Errored);
        assert_eq!(surface.last_error(), Some(&PreviewError::LibrariesNotLoaded));
        assert_eq!(
            surface.runtime().errors,
            vec!["Libraries not loaded. Try refreshing the page."]
        );
    }

    #[test]
    fn test_stale_retry_is_ignored() {
        let runtime = SlowRuntime {
            checks_until_ready: 2,
            ..Default::default()
        };
        let config =
            PreviewConfig::default().retry(RetryPolicy::new(3, Duration::from_millis(600)));
        let mut surface = RenderSurface::new(runtime, config);
        surface.start();

        let first = surface.on_message(PreviewMessage::code("const x = 1;"));
        let Effect::Schedule { timer: stale, .. } = first[0] else {
            panic!("expected a retry");
        };

        surface.on_message(PreviewMessage::code(FOO));
        assert_eq!(surface.state(), SurfaceState::Rendered);

        assert!(surface.on_timer(stale).is_empty());
        assert_eq!(surface.state(), SurfaceState::Rendered);
        assert_eq!(surface.last_error(), None);
    }
}
