#![forbid(unsafe_code)]

//! Background timer sources.
//!
//! A [`Subscription`] runs on its own thread and pushes messages into a
//! channel; the owner drains the channel on its own thread and feeds the
//! messages to a [`CarouselDriver`](crate::driver::CarouselDriver). This is
//! how a terminal or headless host gets `Tick` and `Frame` callbacks without
//! the controller ever owning a timer.
//!
//! # How it works
//!
//! 1. The host declares the timers it wants as a list of subscriptions.
//! 2. [`Subscriptions::reconcile`] starts new IDs and stops missing ones.
//! 3. [`Subscriptions::drain`] (or [`recv_timeout`](Subscriptions::recv_timeout))
//!    returns whatever the timers produced.
//! 4. Dropping [`Subscriptions`] stops every timer.

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Stable identifier used to deduplicate subscriptions across reconciles.
pub type SubId = u64;

/// A background message source.
pub trait Subscription<M: Send + 'static>: Send {
    /// Subscriptions with the same ID are considered identical.
    fn id(&self) -> SubId;

    /// Produce messages until `stop` fires or the receiver is dropped.
    ///
    /// Called on a dedicated thread.
    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal);
}

// ---------------------------------------------------------------------------
// Stop signalling
// ---------------------------------------------------------------------------

type StopState = Arc<(Mutex<bool>, Condvar)>;

/// Stop flag observed by a running subscription.
#[derive(Clone)]
pub struct StopSignal {
    inner: StopState,
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl StopSignal {
    /// Create a linked (signal, trigger) pair.
    #[must_use]
    pub fn pair() -> (Self, StopTrigger) {
        let inner: StopState = Arc::new((Mutex::new(false), Condvar::new()));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            StopTrigger { inner },
        )
    }

    /// Whether the trigger has fired.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for `duration` or until stopped. Returns `true` if stopped.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return true;
        }
        let (stopped, _) = cvar
            .wait_timeout_while(stopped, duration, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }
}

/// Owner side of a [`StopSignal`].
#[derive(Debug)]
pub struct StopTrigger {
    inner: StopState,
}

impl StopTrigger {
    /// Signal the subscription to stop.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

// ---------------------------------------------------------------------------
// Running handle
// ---------------------------------------------------------------------------

struct Running {
    id: SubId,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl Running {
    fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        // Never join here; dropping must not block.
        self.trigger.stop();
    }
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// The set of running subscriptions plus their shared channel.
pub struct Subscriptions<M: Send + 'static> {
    active: Vec<Running>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> std::fmt::Debug for Subscriptions<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("active", &self.active_ids())
            .finish()
    }
}

impl<M: Send + 'static> Default for Subscriptions<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send + 'static> Subscriptions<M> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            active: Vec::new(),
            sender,
            receiver,
        }
    }

    /// Make the running set match `subscriptions` by ID.
    pub fn reconcile(&mut self, subscriptions: Vec<Box<dyn Subscription<M>>>) {
        let wanted: HashSet<SubId> = subscriptions.iter().map(|s| s.id()).collect();

        let mut kept = Vec::with_capacity(self.active.len());
        for running in self.active.drain(..) {
            if wanted.contains(&running.id) {
                kept.push(running);
            } else {
                tracing::debug!(sub_id = running.id, "stopping subscription");
                running.stop();
            }
        }
        self.active = kept;

        let mut ids: HashSet<SubId> = self.active.iter().map(|r| r.id).collect();
        for sub in subscriptions {
            let id = sub.id();
            if !ids.insert(id) {
                continue;
            }
            tracing::debug!(sub_id = id, "starting subscription");
            let (signal, trigger) = StopSignal::pair();
            let sender = self.sender.clone();
            let thread = thread::spawn(move || sub.run(sender, signal));
            self.active.push(Running {
                id,
                trigger,
                thread: Some(thread),
            });
        }
    }

    /// IDs of the running subscriptions, in start order.
    #[must_use]
    pub fn active_ids(&self) -> Vec<SubId> {
        self.active.iter().map(|r| r.id).collect()
    }

    /// Take every message produced so far without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }

    /// Block for at most `timeout` waiting for one message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<M> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Stop and join every subscription.
    pub fn stop_all(&mut self) {
        for running in self.active.drain(..) {
            running.stop();
        }
    }
}

impl<M: Send + 'static> Drop for Subscriptions<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

// ---------------------------------------------------------------------------
// Built-in subscriptions
// ---------------------------------------------------------------------------

/// Fires a message at a fixed interval.
///
/// ```ignore
/// subs.reconcile(vec![
///     Box::new(Every::new(config.auto_advance_interval, || CarouselMsg::Tick)),
///     Box::new(Every::with_id(FRAME_ID, Duration::from_millis(16), || CarouselMsg::Frame)),
/// ]);
/// ```
pub struct Every<M: Send + 'static> {
    id: SubId,
    interval: Duration,
    make_msg: Box<dyn Fn() -> M + Send + Sync>,
}

impl<M: Send + 'static> Every<M> {
    /// Interval timer with an ID derived from the interval.
    pub fn new(interval: Duration, make_msg: impl Fn() -> M + Send + Sync + 'static) -> Self {
        let id = u64::try_from(interval.as_nanos()).unwrap_or(u64::MAX) ^ 0x5245_454C; // "REEL"
        Self::with_id(id, interval, make_msg)
    }

    /// Interval timer with an explicit ID.
    pub fn with_id(
        id: SubId,
        interval: Duration,
        make_msg: impl Fn() -> M + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            interval,
            make_msg: Box::new(make_msg),
        }
    }
}

impl<M: Send + 'static> Subscription<M> for Every<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal) {
        while !stop.wait_timeout(self.interval) {
            if sender.send((self.make_msg)()).is_err() {
                break;
            }
        }
    }
}

/// Sends a fixed list of messages immediately, then exits. For tests.
pub struct MockSubscription<M: Send + 'static> {
    id: SubId,
    messages: Vec<M>,
}

impl<M: Send + Clone + 'static> MockSubscription<M> {
    /// Create a mock that sends `messages`.
    pub fn new(id: SubId, messages: Vec<M>) -> Self {
        Self { id, messages }
    }
}

impl<M: Send + Clone + 'static> Subscription<M> for MockSubscription<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(&self, sender: mpsc::Sender<M>, _stop: StopSignal) {
        for msg in &self.messages {
            if sender.send(msg.clone()).is_err() {
                break;
            }
        }
    }
}
