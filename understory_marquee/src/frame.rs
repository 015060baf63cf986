// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame scheduling: the host's per-repaint callback, seen as request/cancel.
//!
//! Every marquee owns its own [`FrameSlot`], so there is no shared timer
//! registry. At most one frame is pending per slot at any time.

/// Host capability to run a callback on the next repaint.
///
/// In a browser this wraps `requestAnimationFrame`/`cancelAnimationFrame`; in a
/// native shell it might set a "needs redraw" flag on a window. The engine only
/// needs to request one frame at a time and to cancel it again.
pub trait FrameScheduler {
    /// Token identifying a requested frame.
    type Handle;

    /// Requests a callback on the next frame.
    fn request_frame(&mut self) -> Self::Handle;

    /// Cancels a previously requested frame that has not fired yet.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Owns the (at most one) pending frame of a marquee.
#[derive(Debug)]
pub struct FrameSlot<H> {
    pending: Option<H>,
}

impl<H> Default for FrameSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> FrameSlot<H> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a frame is requested and has not fired.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests a frame unless one is already pending.
    pub fn ensure<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if self.pending.is_none() {
            self.pending = Some(scheduler.request_frame());
            log::trace!("marquee frame requested");
        }
    }

    /// Marks the pending frame as delivered.
    ///
    /// Returns `false` when no frame was pending, meaning the callback is stale
    /// (for example it fired after a cancellation the host could not honor).
    pub fn fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancels the pending frame, if any.
    pub fn cancel<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
            log::trace!("marquee frame cancelled");
        }
    }
}

/// Identifier handed out by [`ManualScheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// A [`FrameScheduler`] for hosts that pump frames themselves.
///
/// Fixed-step loops, headless renderers and tests can use it to see whether a
/// marquee wants another frame, then deliver it with their own timestamp.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameId>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// Creates a scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently requested frame, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// Takes the requested frame so the host can deliver it.
    pub fn take_pending(&mut self) -> Option<FrameId> {
        self.pending.take()
    }

    /// Total number of frames requested so far.
    #[must_use]
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total number of frames cancelled so far.
    #[must_use]
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = FrameId;

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        self.pending = Some(id);
        id
    }

    fn cancel_frame(&mut self, handle: FrameId) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled += 1;
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    type Handle = S::Handle;

    fn request_frame(&mut self) -> Self::Handle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: Self::Handle) {
        (**self).cancel_frame(handle);
    }
}
