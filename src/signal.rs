// signal.rs — gyroscope event hub
//
// Platform sensor plumbing pushes events in here; controllers subscribe and
// drain their own queue when the viewer pumps them. Events keep their
// arrival order within a subscription.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use crate::orientation::OrientationSample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GyroscopeEvent {
    DeviceOrientation(OrientationSample),
    /// The screen turned; receivers re-read the platform angle.
    ScreenOrientation,
}

/// Cancellation handle for one subscriber. Dropping it also unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    receiver: Receiver<GyroscopeEvent>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Next pending event, if any. Never blocks.
    pub fn try_next(&self) -> Option<GyroscopeEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct GyroscopeSignals {
    next_id: u64,
    subscribers: Vec<(u64, Sender<GyroscopeEvent>)>,
    last_orientation: Option<OrientationSample>,
}

impl GyroscopeSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = channel();
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, tx));
        Subscription { id, receiver: rx }
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscribers.retain(|(id, _)| *id != subscription.id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Most recent device orientation sample, used to seed new subscribers.
    pub fn last_device_orientation(&self) -> Option<OrientationSample> {
        self.last_orientation
    }

    pub fn dispatch_device_orientation(&mut self, sample: OrientationSample) {
        self.last_orientation = Some(sample);
        self.dispatch(GyroscopeEvent::DeviceOrientation(sample));
    }

    pub fn dispatch_screen_orientation(&mut self) {
        self.dispatch(GyroscopeEvent::ScreenOrientation);
    }

    fn dispatch(&mut self, event: GyroscopeEvent) {
        // A failed send means the subscription was dropped.
        self.subscribers.retain(|(_, tx)| tx.send(event).is_ok());
    }
}
