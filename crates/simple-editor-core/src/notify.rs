//! Change notification.
//!
//! Subscribers come in three delivery modes:
//!
//! - **immediate**: called synchronously on every edit, in registration order
//! - **interval**: called at most once per period, only if an edit happened
//!   since the previous tick (dirty flag)
//! - **idle**: called once after edits pause for the quiet period (debounce)
//!
//! Registration is only open until the notifier is started. Starting hands
//! back an [`EditFanout`] for the shared edit listener and one
//! [`IdleDebounce`] per idle subscription.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{RegistrationError, SubscriptionKind};
use crate::platform::Scheduler;

/// A zero-argument change callback.
pub type ChangeHandler = Rc<dyn Fn()>;

/// Call each handler in order.
///
/// Callers pass a cloned snapshot of their handler list, so no borrow is held
/// while user code runs.
pub fn fire_all(handlers: &[ChangeHandler]) {
    for handler in handlers {
        handler();
    }
}

struct IntervalSubscription {
    handler: ChangeHandler,
    period_ms: u32,
    dirty: Cell<bool>,
}

impl IntervalSubscription {
    fn tick(&self) {
        if self.dirty.replace(false) {
            tracing::trace!(period_ms = self.period_ms, "interval tick: delivering");
            (self.handler)();
        }
    }
}

struct IdleSubscription<S: Scheduler> {
    handler: ChangeHandler,
    quiet_ms: u32,
    pending: RefCell<Option<S::Timeout>>,
}

/// Shared listener body for edits: dirties interval subscriptions, then
/// calls immediate subscribers.
#[derive(Clone)]
pub struct EditFanout {
    immediate: Vec<ChangeHandler>,
    interval: Vec<Rc<IntervalSubscription>>,
}

impl EditFanout {
    /// Whether any subscriber cares about edits through this listener.
    pub fn is_empty(&self) -> bool {
        self.immediate.is_empty() && self.interval.is_empty()
    }

    pub fn on_edit(&self) {
        for subscription in &self.interval {
            subscription.dirty.set(true);
        }
        tracing::trace!(count = self.immediate.len(), "edit: notifying immediate handlers");
        fire_all(&self.immediate);
    }
}

/// Per-subscription edit listener body for idle delivery.
pub struct IdleDebounce<S: Scheduler> {
    subscription: Rc<IdleSubscription<S>>,
    scheduler: Rc<S>,
}

impl<S: Scheduler> Clone for IdleDebounce<S> {
    fn clone(&self) -> Self {
        Self {
            subscription: self.subscription.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<S: Scheduler + 'static> IdleDebounce<S> {
    /// Cancel the pending firing, if any, and schedule a fresh one.
    pub fn on_edit(&self) {
        let subscription = &self.subscription;
        // Drop the old handle first so it can never fire after this edit.
        drop(subscription.pending.borrow_mut().take());

        let handler = subscription.handler.clone();
        let quiet_ms = subscription.quiet_ms;
        let timeout = self.scheduler.timeout(
            quiet_ms,
            Box::new(move || {
                tracing::trace!(quiet_ms, "idle: delivering");
                handler();
            }),
        );
        *subscription.pending.borrow_mut() = Some(timeout);
    }

    /// Whether a firing is currently scheduled.
    pub fn is_pending(&self) -> bool {
        self.subscription.pending.borrow().is_some()
    }
}

enum Phase<S: Scheduler> {
    Registering,
    Running { _tickers: Vec<S::Interval> },
}

/// Change subscriber registry and delivery state.
pub struct ChangeNotifier<S: Scheduler> {
    immediate: Vec<ChangeHandler>,
    interval: Vec<Rc<IntervalSubscription>>,
    idle: Vec<Rc<IdleSubscription<S>>>,
    phase: Phase<S>,
}

impl<S: Scheduler> Default for ChangeNotifier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> ChangeNotifier<S> {
    pub fn new() -> Self {
        Self {
            immediate: Vec::new(),
            interval: Vec::new(),
            idle: Vec::new(),
            phase: Phase::Registering,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    fn ensure_open(&self, kind: SubscriptionKind) -> Result<(), RegistrationError> {
        if self.is_started() {
            return Err(RegistrationError::AfterAttach(kind));
        }
        Ok(())
    }

    /// Register a handler called on every edit.
    pub fn on_change(&mut self, handler: ChangeHandler) -> Result<(), RegistrationError> {
        self.ensure_open(SubscriptionKind::Immediate)?;
        self.immediate.push(handler);
        Ok(())
    }

    /// Register a handler called at most once every `period_ms`, only after edits.
    pub fn on_change_interval(
        &mut self,
        handler: ChangeHandler,
        period_ms: u32,
    ) -> Result<(), RegistrationError> {
        self.ensure_open(SubscriptionKind::Interval)?;
        if period_ms == 0 {
            return Err(RegistrationError::InvalidDuration(SubscriptionKind::Interval));
        }
        self.interval.push(Rc::new(IntervalSubscription {
            handler,
            period_ms,
            dirty: Cell::new(false),
        }));
        Ok(())
    }

    /// Register a handler called once edits have paused for `quiet_ms`.
    pub fn on_change_idle(
        &mut self,
        handler: ChangeHandler,
        quiet_ms: u32,
    ) -> Result<(), RegistrationError> {
        self.ensure_open(SubscriptionKind::Idle)?;
        if quiet_ms == 0 {
            return Err(RegistrationError::InvalidDuration(SubscriptionKind::Idle));
        }
        self.idle.push(Rc::new(IdleSubscription {
            handler,
            quiet_ms,
            pending: RefCell::new(None),
        }));
        Ok(())
    }

    /// Snapshot of the immediate handlers, in registration order.
    pub fn immediate_handlers(&self) -> Vec<ChangeHandler> {
        self.immediate.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.immediate.len() + self.interval.len() + self.idle.len()
    }
}

impl<S: Scheduler + 'static> ChangeNotifier<S> {
    /// Freeze registration and start the interval timers.
    ///
    /// Returns the shared edit listener body and one debounce per idle
    /// subscription; the caller wires each to the surface's edit event.
    /// Starting twice is a no-op that returns empty listeners.
    pub fn start(&mut self, scheduler: &Rc<S>) -> (EditFanout, Vec<IdleDebounce<S>>) {
        if self.is_started() {
            return (
                EditFanout {
                    immediate: Vec::new(),
                    interval: Vec::new(),
                },
                Vec::new(),
            );
        }

        let tickers = self
            .interval
            .iter()
            .map(|subscription| {
                subscription.dirty.set(false);
                let ticking = subscription.clone();
                scheduler.interval(subscription.period_ms, Box::new(move || ticking.tick()))
            })
            .collect();
        self.phase = Phase::Running { _tickers: tickers };

        tracing::debug!(
            immediate = self.immediate.len(),
            interval = self.interval.len(),
            idle = self.idle.len(),
            "change notifier started"
        );

        let fanout = EditFanout {
            immediate: self.immediate.clone(),
            interval: self.interval.clone(),
        };
        let debounces = self
            .idle
            .iter()
            .map(|subscription| IdleDebounce {
                subscription: subscription.clone(),
                scheduler: scheduler.clone(),
            })
            .collect();
        (fanout, debounces)
    }
}
