//! The carousel playback state machine.
//!
//! `Idle -> Advancing -> Showing -> (timer or video end) -> Advancing ...`
//!
//! Advancing scans at most one full lap of the items, starting after the
//! current one, and shows the first item whose date window contains "now".
//! When no item is active the engine shows nothing, goes `Idle` and arms a
//! re-check after one item duration, so items whose window opens later are
//! still picked up.
//!
//! Timers are owned by the [`Scheduler`] handed to the engine. Every
//! (re)start drains it first, so at most one advance chain is ever live.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use futures_util::future::BoxFuture;
use tracing::{debug, info, instrument};
use url::Url;

use super::render::{CarouselTrack, ItemMedia};
use super::scheduler::Scheduler;
use crate::asset::DateWindow;

/// Where the engine is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No item shown; at most a re-check timer is armed.
    Idle,
    /// Choosing the next item.
    Advancing,
    /// An item is shown and its timer (or video) is running.
    Showing,
}

/// The display surface the engine drives.
pub trait Stage: Send {
    /// Reveals the item at `index` (the track transform).
    fn show(&mut self, index: usize);

    /// Reloads the iframe of the item at `index` so it is warm when reached.
    fn preload(&mut self, index: usize, url: &Url);

    /// Starts the video of the item at `index`.
    ///
    /// The returned future completes when the video ends or fails.
    fn play_video(&mut self, index: usize, src: &str) -> BoxFuture<'static, ()>;

    /// Shows no item.
    fn show_nothing(&mut self);
}

/// Source of "now" for active-window checks.
pub trait Clock: Send + Sync {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// What the engine needs to know about one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSlide {
    /// When the item may be shown.
    pub window: DateWindow,
    /// How the item is paced.
    pub media: ItemMedia,
}

impl PlaybackSlide {
    /// Reads every item of a track.
    #[must_use]
    pub fn from_track(track: &CarouselTrack) -> Vec<Self> {
        track
            .items()
            .iter()
            .map(|item| Self {
                window: item.window(),
                media: item.media().clone(),
            })
            .collect()
    }
}

/// Index and pacing of the running carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// Item currently (or last) shown; `None` before the first show.
    pub current_index: Option<usize>,
    /// How long a static item stays on screen.
    pub item_duration: Duration,
}

/// Delivered by the scheduler when it is time to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackEvent {
    generation: u64,
}

/// Runs one carousel.
pub struct PlaybackEngine<S, C> {
    slides: Vec<PlaybackSlide>,
    state: PlaybackState,
    phase: PlaybackPhase,
    stage: S,
    clock: C,
    scheduler: Scheduler<PlaybackEvent>,
    generation: u64,
    skip_iframe_reload: bool,
}

impl<S: Stage, C: Clock> PlaybackEngine<S, C> {
    /// Creates an idle engine over `slides`.
    #[must_use]
    pub fn new(
        slides: Vec<PlaybackSlide>,
        item_duration: Duration,
        stage: S,
        clock: C,
        scheduler: Scheduler<PlaybackEvent>,
    ) -> Self {
        Self {
            slides,
            state: PlaybackState {
                current_index: None,
                item_duration,
            },
            phase: PlaybackPhase::Idle,
            stage,
            clock,
            scheduler,
            generation: 0,
            skip_iframe_reload: false,
        }
    }

    /// Disables iframe preloading (used for the synthesised fallback slide).
    #[must_use]
    pub fn with_skip_iframe_reload(mut self, skip: bool) -> Self {
        self.skip_iframe_reload = skip;
        self
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Current index and duration.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The stage being driven.
    #[must_use]
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Number of live timers.
    pub fn live_timers(&mut self) -> usize {
        self.scheduler.live_count()
    }

    /// Returns true when the item at `index` may be shown now.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        let now = self.clock.now();
        self.slides
            .get(index)
            .is_some_and(|slide| slide.window.contains(now))
    }

    /// (Re)starts playback from the first active item.
    ///
    /// Cancels every timer of the previous chain before advancing.
    #[instrument(skip(self), fields(items = self.slides.len()))]
    pub fn start(&mut self) {
        let drained = self.scheduler.drain_all();
        self.generation += 1;
        self.state.current_index = None;
        debug!(drained, generation = self.generation, "carousel (re)started");
        self.advance();
    }

    /// Shows the next active item, or goes idle when none is active.
    ///
    /// Returns the index shown.
    pub fn advance(&mut self) -> Option<usize> {
        let total = self.slides.len();
        if total == 0 {
            self.phase = PlaybackPhase::Idle;
            return None;
        }
        self.phase = PlaybackPhase::Advancing;

        let now = self.clock.now();
        let first = self.state.current_index.map_or(0, |index| (index + 1) % total);
        let next = (0..total)
            .map(|offset| (first + offset) % total)
            .find(|&candidate| self.slides[candidate].window.contains(now));

        match next {
            Some(index) => {
                self.show(index);
                Some(index)
            }
            None => {
                info!(items = total, "No active carousel items; re-checking after one item duration");
                self.stage.show_nothing();
                self.phase = PlaybackPhase::Idle;
                let event = self.event();
                self.scheduler.arm(self.state.item_duration, event);
                None
            }
        }
    }

    /// Waits for the next timer and handles it.
    ///
    /// Returns false when no timer is armed, so nothing will ever happen.
    pub async fn step(&mut self) -> bool {
        let Some(event) = self.scheduler.next_event().await else {
            return false;
        };
        if event.generation == self.generation {
            self.advance();
        } else {
            debug!(stale = event.generation, current = self.generation, "ignored stale timer");
        }
        true
    }

    /// Starts playback and handles up to `steps` timer events.
    ///
    /// Returns how many events were handled.
    pub async fn run(&mut self, steps: usize) -> usize {
        self.start();
        let mut handled = 0;
        while handled < steps && self.step().await {
            handled += 1;
        }
        handled
    }

    fn show(&mut self, index: usize) {
        let total = self.slides.len();
        if !self.skip_iframe_reload && total > 1 {
            let next = (index + 1) % total;
            if let ItemMedia::Iframe(url) = &self.slides[next].media {
                self.stage.preload(next, url);
            }
        }

        self.stage.show(index);
        self.state.current_index = Some(index);
        self.phase = PlaybackPhase::Showing;
        debug!(index, "showing carousel item");

        let event = self.event();
        if let ItemMedia::Video(src) = &self.slides[index].media {
            let wait = self.stage.play_video(index, src);
            self.scheduler.arm_after(wait, event);
        } else {
            self.scheduler.arm(self.state.item_duration, event);
        }
    }

    fn event(&self) -> PlaybackEvent {
        PlaybackEvent {
            generation: self.generation,
        }
    }
}
