use alloc::boxed::Box;
use core::fmt;

use crate::{Easing, ScrollContainer};

/// How a scroll animation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Completion {
    Finished,
    Cancelled,
}

impl Completion {
    pub fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Invoked once when an animation finishes or is cancelled.
pub type CompletionCallback = Box<dyn FnOnce(Completion)>;

/// Parameters for [`animate_scroll`].
pub struct AnimateScrollOptions {
    /// Start offset. Defaults to the container's scroll offset when the animation starts.
    pub from: Option<f64>,
    /// Target offset.
    pub to: f64,
    pub duration_ms: u64,
    /// Write `start + eased delta` every frame instead of adding the per-frame change.
    ///
    /// Absolute mode does not accumulate rounding error. Incremental mode composes with other
    /// writers nudging the offset at the same time.
    pub absolute: bool,
    /// Caps the travelled distance by moving `from` towards `to`. The end point is kept.
    pub max_distance: Option<f64>,
    pub on_complete: Option<CompletionCallback>,
}

impl AnimateScrollOptions {
    pub fn new(to: f64, duration_ms: u64) -> Self {
        Self {
            from: None,
            to,
            duration_ms,
            absolute: false,
            max_distance: None,
            on_complete: None,
        }
    }

    pub fn with_from(mut self, from: f64) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn with_max_distance(mut self, max_distance: Option<f64>) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_on_complete(mut self, f: impl FnOnce(Completion) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for AnimateScrollOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimateScrollOptions")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("absolute", &self.absolute)
            .field("max_distance", &self.max_distance)
            .finish_non_exhaustive()
    }
}

/// Moves `from` towards `to` so that `|to - from| <= max_distance`, keeping the direction.
///
/// A non-positive `max_distance` disables clamping.
pub fn clamp_travel(from: f64, to: f64, max_distance: f64) -> f64 {
    let delta = to - from;
    if max_distance > 0.0 && delta.abs() > max_distance {
        to - max_distance.copysign(delta)
    } else {
        from
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Running,
    Done(Completion),
}

/// A running scroll animation.
///
/// The handle is frame-driven: call [`ScrollAnimation::tick`] once per frame with the current
/// time. [`ScrollAnimation::cancel`] is synchronous: once it returns, no further frame applies.
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    delta: f64,
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
    absolute: bool,
    prev_offset: f64,
    phase: Phase,
    on_complete: Option<CompletionCallback>,
}

impl ScrollAnimation {
    /// Offset the animation starts from, after clamping.
    pub fn start_offset(&self) -> f64 {
        self.from
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Done(_))
    }

    /// How the animation ended, once it has.
    pub fn completion(&self) -> Option<Completion> {
        match self.phase {
            Phase::Done(c) => Some(c),
            _ => None,
        }
    }

    /// Stops the animation and reports [`Completion::Cancelled`].
    ///
    /// Returns `false` if it had already ended.
    pub fn cancel(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        vdebug!(from = self.from, to = self.to, "scroll animation cancelled");
        self.finish(Completion::Cancelled);
        true
    }

    /// Advances the animation to `now_ms` and writes the container's scroll offset.
    ///
    /// The first frame moves the container to the start offset. Returns the completion once the
    /// animation ends on this frame.
    pub fn tick<C: ScrollContainer + ?Sized>(
        &mut self,
        container: &mut C,
        now_ms: u64,
    ) -> Option<Completion> {
        match self.phase {
            Phase::Done(_) => return None,
            Phase::Pending => {
                self.phase = Phase::Running;
                container.set_scroll_left(self.from);
                if self.delta == 0.0 {
                    self.finish(Completion::Finished);
                    return Some(Completion::Finished);
                }
            }
            Phase::Running => {}
        }

        let elapsed = now_ms.saturating_sub(self.start_ms).min(self.duration_ms);
        let t = if self.duration_ms == 0 {
            1.0
        } else {
            elapsed as f64 / self.duration_ms as f64
        };
        let offset = self.delta * self.easing.sample(t);

        if self.absolute {
            container.set_scroll_left(self.from + offset);
        } else {
            let change = offset - self.prev_offset;
            self.prev_offset = offset;
            let current = container.scroll_left();
            container.set_scroll_left(current + change);
        }

        if elapsed >= self.duration_ms {
            vtrace!(at = container.scroll_left(), "scroll animation finished");
            self.finish(Completion::Finished);
            return Some(Completion::Finished);
        }
        None
    }

    fn finish(&mut self, completion: Completion) {
        self.phase = Phase::Done(completion);
        if let Some(cb) = self.on_complete.take() {
            cb(completion);
        }
    }
}

impl fmt::Debug for ScrollAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnimation")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("start_ms", &self.start_ms)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("absolute", &self.absolute)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Starts an animated scroll of `container` from `options.from` (or its current offset) to
/// `options.to`.
///
/// Nothing is written until the first [`ScrollAnimation::tick`]. The travelled distance is
/// rounded to whole units.
pub fn animate_scroll<C: ScrollContainer + ?Sized>(
    container: &C,
    options: AnimateScrollOptions,
    now_ms: u64,
) -> ScrollAnimation {
    let AnimateScrollOptions {
        from,
        to,
        duration_ms,
        absolute,
        max_distance,
        on_complete,
    } = options;

    let mut from = from.unwrap_or_else(|| container.scroll_left());
    if let Some(max) = max_distance {
        from = clamp_travel(from, to, max);
    }
    let delta = (to - from).round();
    vtrace!(from, to, delta, duration_ms, absolute, "animate_scroll");

    ScrollAnimation {
        from,
        to,
        delta,
        start_ms: now_ms,
        duration_ms,
        easing: Easing::for_duration(duration_ms),
        absolute,
        prev_offset: 0.0,
        phase: Phase::Pending,
        on_complete,
    }
}

/// Owner of the single current animation of one scroll container.
///
/// Starting a new animation cancels the previous one first.
#[derive(Debug, Default)]
pub struct Animator {
    current: Option<ScrollAnimation>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(ScrollAnimation::is_active)
    }

    pub fn current(&self) -> Option<&ScrollAnimation> {
        self.current.as_ref()
    }

    pub fn start<C: ScrollContainer + ?Sized>(
        &mut self,
        container: &C,
        options: AnimateScrollOptions,
        now_ms: u64,
    ) -> &ScrollAnimation {
        self.stop();
        self.current.insert(animate_scroll(container, options, now_ms))
    }

    /// Cancels the current animation, if any. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        match self.current.take() {
            Some(mut anim) => anim.cancel(),
            None => false,
        }
    }

    /// Advances the current animation. Returns its completion on the frame it ends.
    pub fn tick<C: ScrollContainer + ?Sized>(
        &mut self,
        container: &mut C,
        now_ms: u64,
    ) -> Option<Completion> {
        let anim = self.current.as_mut()?;
        let done = anim.tick(container, now_ms);
        if done.is_some() {
            self.current = None;
        }
        done
    }
}
