//! Sequencer - a generic multi-step animator driven by elapsed time.
//!
//! A schedule is an ordered list of (duration, step) pairs. Resolution is a
//! pure function of the schedule durations and the elapsed time: it picks
//! exactly one step and a progress fraction within it. Only step functions
//! have side effects.
//!
//! A "settle" step has infinite duration: once elapsed time reaches it, it is
//! selected forever with progress 0, so settle steps must set their final
//! values unconditionally.

/// Resolve a schedule position: walk the durations subtracting while the
/// elapsed time covers them; the first step whose duration exceeds the
/// remainder wins, with `progress = remaining / duration`.
///
/// Past the end of the schedule the last step is selected with progress 0.
pub fn resolve(durations: &[f32], elapsed: f32) -> (usize, f32) {
    if durations.is_empty() {
        return (0, 0.0);
    }

    let mut remaining = elapsed;
    let mut index = durations.len() - 1;
    let mut progress = 0.0;
    for (i, &duration) in durations.iter().enumerate() {
        if remaining < duration {
            index = i;
            progress = remaining / duration;
            break;
        }
        remaining -= duration;
    }
    (index, progress)
}

type StepFn<C> = Box<dyn Fn(&mut C, f32)>;

/// An ordered schedule of steps over a mutable context `C`.
///
/// The context goes in at `run` time rather than being captured, so every
/// step can mutate the same target without fighting the borrow checker.
pub struct Sequencer<C: ?Sized> {
    durations: Vec<f32>,
    steps: Vec<StepFn<C>>,
}

impl<C: ?Sized> Sequencer<C> {
    pub fn new() -> Self {
        Self {
            durations: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Append a step that runs for `duration` seconds.
    pub fn then(mut self, duration: f32, step: impl Fn(&mut C, f32) + 'static) -> Self {
        self.durations.push(duration);
        self.steps.push(Box::new(step));
        self
    }

    /// Append the terminal settle step.
    pub fn settle(self, step: impl Fn(&mut C, f32) + 'static) -> Self {
        self.then(f32::INFINITY, step)
    }

    /// Resolve the elapsed time and invoke the selected step once.
    pub fn run(&self, ctx: &mut C, elapsed: f32) {
        if self.steps.is_empty() {
            return;
        }
        let (index, progress) = resolve(&self.durations, elapsed);
        (self.steps[index])(ctx, progress);
    }
}

impl<C: ?Sized> Default for Sequencer<C> {
    fn default() -> Self {
        Self::new()
    }
}
