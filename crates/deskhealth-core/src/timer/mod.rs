mod countdown;

pub use countdown::{Completion, CompletionReceiver, CountdownTimer};
