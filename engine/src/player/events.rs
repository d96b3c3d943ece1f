//! Controller notifications for the UI and audio collaborators.
//!
//! The controller queues [`ControlEvent`]s as transitions happen; the host
//! drains the queue after each frame or handler call and hands the events
//! to whoever listens.

/// Something the controller wants collaborators to know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// Pointer capture acquired; first-person control active
    Lock,
    /// Pointer capture lost while not paused
    Unlock,
    /// Switched to the orbit fallback (fires at most once)
    Fallback,
    /// Pause entered (`true`) or left (`false`)
    Pause(bool),
    /// A footstep is due
    Footstep,
}

/// Receives controller notifications. Every method defaults to a no-op.
pub trait ControlListener {
    fn on_lock(&mut self) {}
    fn on_unlock(&mut self) {}
    fn on_fallback(&mut self) {}
    fn on_pause(&mut self, _paused: bool) {}
    fn on_footstep(&mut self) {}
}

impl ControlEvent {
    /// Call the matching listener method.
    pub fn dispatch_to<L: ControlListener + ?Sized>(self, listener: &mut L) {
        match self {
            ControlEvent::Lock => listener.on_lock(),
            ControlEvent::Unlock => listener.on_unlock(),
            ControlEvent::Fallback => listener.on_fallback(),
            ControlEvent::Pause(paused) => listener.on_pause(paused),
            ControlEvent::Footstep => listener.on_footstep(),
        }
    }
}

/// Dispatch a batch of events in order.
pub fn dispatch_all<L, I>(events: I, listener: &mut L)
where
    L: ControlListener + ?Sized,
    I: IntoIterator<Item = ControlEvent>,
{
    for event in events {
        event.dispatch_to(listener);
    }
}
