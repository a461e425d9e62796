/// One notification in a recorded or scripted stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Completed,
}

/// A value tagged with the tick it happened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded<T> {
  pub time: u64,
  pub value: T,
}

pub fn on_next<Item, Err>(time: u64, value: Item) -> Recorded<Notification<Item, Err>> {
  Recorded { time, value: Notification::Next(value) }
}

pub fn on_error<Item, Err>(time: u64, err: Err) -> Recorded<Notification<Item, Err>> {
  Recorded { time, value: Notification::Error(err) }
}

pub fn on_completed<Item, Err>(time: u64) -> Recorded<Notification<Item, Err>> {
  Recorded { time, value: Notification::Completed }
}

/// When a subscription to a test observable started and ended.
///
/// A subscription ends at its own terminal notification or when it is
/// unsubscribed, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionLog {
  pub subscribed: u64,
  pub unsubscribed: Option<u64>,
}

impl SubscriptionLog {
  pub fn open(subscribed: u64) -> Self { SubscriptionLog { subscribed, unsubscribed: None } }

  pub fn closed(subscribed: u64, unsubscribed: u64) -> Self {
    SubscriptionLog { subscribed, unsubscribed: Some(unsubscribed) }
  }
}
