//! Single logical channel joining a [`PreviewHost`] and its [`RenderSurface`].
//!
//! Messages and timers share one queue ordered by due time, ties broken by
//! insertion order, so delivery between the pair is FIFO. Time only moves
//! through the link's [`Clock`]: [`VirtualClock`] for deterministic runs,
//! [`SystemClock`] when the surface is a real browser tab.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::preview::config::PreviewConfig;
use crate::preview::host::{HostTimer, PreviewHost};
use crate::preview::message::{PreviewMessage, SurfaceId};
use crate::preview::runtime::ComponentRuntime;
use crate::preview::surface::{Effect, RenderSurface, SurfaceState, SurfaceTimer};

pub trait Clock {
    /// Block until `delay` has elapsed
    fn sleep(&mut self, delay: Duration);
}

/// Clock that never blocks; records how much time was requested
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualClock {
    elapsed: Duration,
}

impl VirtualClock {
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Clock for VirtualClock {
    fn sleep(&mut self, delay: Duration) {
        self.elapsed += delay;
    }
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HostToSurface,
    SurfaceToHost,
}

/// A message that crossed the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub at: Duration,
    pub direction: Direction,
    pub message: PreviewMessage,
}

#[derive(Debug)]
enum Event {
    Deliver(Direction, PreviewMessage),
    Surface(SurfaceTimer),
    Host(HostTimer),
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    event: Event,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // reversed: BinaryHeap is a max-heap and the earliest event must pop first
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

pub struct PreviewLink<R, C = VirtualClock> {
    host: PreviewHost,
    surface: RenderSurface<R>,
    config: PreviewConfig,
    clock: C,
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Scheduled>,
    deliveries: Vec<Delivery>,
}

impl<R: ComponentRuntime, C: Clock> PreviewLink<R, C> {
    pub fn new(id: SurfaceId, runtime: R, config: PreviewConfig, clock: C) -> Self {
        Self {
            host: PreviewHost::new(id, config.resend.clone()),
            surface: RenderSurface::new(runtime, config.clone()),
            config,
            clock,
            now: Duration::ZERO,
            seq: 0,
            queue: BinaryHeap::new(),
            deliveries: Vec::new(),
        }
    }

    pub fn host(&self) -> &PreviewHost {
        &self.host
    }

    pub fn surface(&self) -> &RenderSurface<R> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut RenderSurface<R> {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time elapsed on the link
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Every message delivered so far, in delivery order
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn into_surface(self) -> RenderSurface<R> {
        self.surface
    }

    /// The surface document finished (re)loading
    pub fn load(&mut self) {
        let effects = self.surface.start();
        self.apply_surface(effects);
        let effects = self.host.on_surface_loaded();
        self.apply_host(effects);
    }

    /// Host produced new code
    pub fn send_code(&mut self, code: impl Into<String>) {
        let effects = self.host.set_code(code);
        self.apply_host(effects);
    }

    /// Process the next event, waiting for it if needed. Returns `false` when
    /// nothing is queued.
    pub fn step(&mut self) -> bool {
        let Some(next) = self.queue.pop() else {
            return false;
        };

        if next.due > self.now {
            self.clock.sleep(next.due - self.now);
            self.now = next.due;
        }

        match next.event {
            Event::Deliver(direction, message) => {
                self.deliveries.push(Delivery {
                    at: self.now,
                    direction,
                    message: message.clone(),
                });
                match direction {
                    Direction::HostToSurface => {
                        let effects = self.surface.on_message(message);
                        self.apply_surface(effects);
                    }
                    Direction::SurfaceToHost => {
                        let effects = self.host.on_message(self.host.surface(), &message);
                        self.apply_host(effects);
                    }
                }
            }
            Event::Surface(timer) => {
                let effects = self.surface.on_timer(timer);
                self.apply_surface(effects);
            }
            Event::Host(timer) => {
                let effects = self.host.on_timer(timer);
                self.apply_host(effects);
            }
        }
        true
    }

    /// Process events due within `limit` of now. Returns `true` if the queue
    /// drained.
    pub fn run_until_idle(&mut self, limit: Duration) -> bool {
        let deadline = self.now + limit;
        while let Some(next) = self.queue.peek() {
            if next.due > deadline {
                log::debug!("preview link still busy at {:?}", deadline);
                return false;
            }
            self.step();
        }
        true
    }

    /// Run until quiet or the settle timeout passes, then report the surface state
    pub fn settle(&mut self) -> SurfaceState {
        self.run_until_idle(self.config.settle_timeout);
        self.surface.state()
    }

    fn push(&mut self, delay: Duration, event: Event) {
        self.seq += 1;
        self.queue.push(Scheduled {
            due: self.now + delay,
            seq: self.seq,
            event,
        });
    }

    fn apply_surface(&mut self, effects: Vec<Effect<SurfaceTimer>>) {
        for effect in effects {
            match effect {
                Effect::Post(message) => {
                    self.push(Duration::ZERO, Event::Deliver(Direction::SurfaceToHost, message))
                }
                Effect::Schedule { delay, timer } => self.push(delay, Event::Surface(timer)),
            }
        }
    }

    fn apply_host(&mut self, effects: Vec<Effect<HostTimer>>) {
        for effect in effects {
            match effect {
                Effect::Post(message) => {
                    self.push(Duration::ZERO, Event::Deliver(Direction::HostToSurface, message))
                }
                Effect::Schedule { delay, timer } => self.push(delay, Event::Host(timer)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::runtime::{Dependencies, RuntimeError, SlotValue};

    #[derive(Default)]
    struct EchoRuntime {
        ready: bool,
        rendered: Vec<String>,
        last_script: String,
    }

    impl ComponentRuntime for EchoRuntime {
        fn dependencies(&mut self) -> Dependencies {
            if self.ready { Dependencies::all() } else { Dependencies::default() }
        }

        fn transpile(&mut self, source: &str) -> Result<String, RuntimeError> {
            Ok(source.to_string())
        }

        fn reset_slot(&mut self) -> Result<(), RuntimeError> {
            Ok(())
        }

        fn execute(&mut self, script: &str) -> Result<(), RuntimeError> {
            self.last_script = script.to_string();
            Ok(())
        }

        fn bind_slot(&mut self, _identifier: &str) -> Result<(), RuntimeError> {
            Ok(())
        }

        fn slot(&mut self) -> Result<SlotValue, RuntimeError> {
            Ok(SlotValue::Callable)
        }

        fn mount(&mut self) -> Result<(), RuntimeError> {
            self.rendered.push(self.last_script.clone());
            Ok(())
        }

        fn show_error(&mut self, _message: &str) -> Result<(), RuntimeError> {
            Ok(())
        }
    }

    fn link(ready: bool) -> PreviewLink<EchoRuntime> {
        let runtime = EchoRuntime {
            ready,
            ..Default::default()
        };
        PreviewLink::new(SurfaceId(7), runtime, PreviewConfig::default(), VirtualClock::default())
    }

    #[test]
    fn test_events_pop_in_time_then_insertion_order() {
        let resend = |due: Duration, seq: u64| Scheduled {
            due,
            seq,
            event: Event::Host(HostTimer::Resend),
        };

        let mut heap = BinaryHeap::new();
        heap.push(resend(Duration::from_millis(5), 1));
        heap.push(resend(Duration::ZERO, 3));
        heap.push(resend(Duration::ZERO, 2));

        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|s| s.seq)).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_load_settles_with_resends() {
        let mut link = link(true);
        link.send_code("export default function A() {}");
        link.load();

        assert_eq!(link.settle(), SurfaceState::Rendered);
        assert_eq!(link.pending(), 0);
        assert_eq!(link.now(), Duration::from_millis(600));
        assert_eq!(link.clock().elapsed(), Duration::from_millis(600));

        // initial send, READY reply, load-time send and both delayed resends
        assert_eq!(link.host().sends(), 5);
    }

    #[test]
    fn test_latest_code_wins() {
        let mut link = link(true);
        link.load();
        link.send_code("export default function Old() {}");
        link.send_code("export default function New() {}");
        link.settle();

        let last = link.surface().runtime().rendered.last().cloned().unwrap_or_default();
        assert!(last.contains("function New"));
    }

    #[test]
    fn test_settle_gives_up_when_libraries_never_load() {
        let mut link = link(false);
        link.load();

        assert_eq!(link.settle(), SurfaceState::Errored);
        assert!(link.pending() > 0);
        assert!(link.now() <= Duration::from_secs(10));
    }
}
