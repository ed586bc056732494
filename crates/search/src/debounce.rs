//! Trailing-edge debounce for live input.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::task::{TaskClass, spawn};
use crate::token::{GenerationClock, GenerationToken};

/// Default quiet period before the follow-up action runs.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

type Action<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Runs an action with the latest notified value once input goes quiet.
///
/// Each [`notify`](Self::notify) re-arms the timer and cancels the
/// previously armed follow-up, so a burst of notifications faster than the
/// delay runs the action exactly once, with the last value.
pub struct DebounceGate<T> {
	delay: Duration,
	clock: GenerationClock,
	armed: Arc<Mutex<Option<GenerationToken>>>,
	action: Action<T>,
}

impl<T> std::fmt::Debug for DebounceGate<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DebounceGate")
			.field("delay", &self.delay)
			.field("armed", &self.is_armed())
			.finish_non_exhaustive()
	}
}

impl<T: Send + 'static> DebounceGate<T> {
	pub fn new(delay: Duration, action: impl Fn(T) + Send + Sync + 'static) -> Self {
		Self {
			delay,
			clock: GenerationClock::new(),
			armed: Arc::new(Mutex::new(None)),
			action: Arc::new(action),
		}
	}

	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Records `value` and (re)arms the timer.
	///
	/// Must be called within a Tokio runtime.
	pub fn notify(&self, value: T) {
		let token = GenerationToken::new(self.clock.next());
		if let Some(previous) = self.armed.lock().replace(token.clone()) {
			previous.cancel();
			tracing::trace!(superseded = previous.generation(), "debounce.rearm");
		}

		let armed = Arc::clone(&self.armed);
		let action = Arc::clone(&self.action);
		let delay = self.delay;
		spawn(TaskClass::Debounce, async move {
			tokio::select! {
				biased;
				_ = token.cancelled() => return,
				_ = tokio::time::sleep(delay) => {}
			}

			{
				let mut slot = armed.lock();
				match slot.as_ref() {
					Some(current) if current.generation() == token.generation() => {
						slot.take();
					}
					_ => return,
				}
			}

			tracing::debug!(generation = token.generation(), "debounce.fire");
			action(value);
		});
	}
}

impl<T> DebounceGate<T> {
	/// Disarms the pending follow-up without running it.
	///
	/// Returns true if a follow-up was armed.
	pub fn cancel(&self) -> bool {
		match self.armed.lock().take() {
			Some(token) => {
				token.cancel();
				tracing::trace!(generation = token.generation(), "debounce.cancel");
				true
			}
			None => false,
		}
	}

	/// Returns true while a follow-up is waiting for its delay.
	pub fn is_armed(&self) -> bool {
		self.armed.lock().is_some()
	}
}

impl<T> Drop for DebounceGate<T> {
	fn drop(&mut self) {
		self.cancel();
	}
}
