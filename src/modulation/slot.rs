use std::sync::{Arc, PoisonError, RwLock};

/// Latest-value buffer shared between a sampler and the tick.
///
/// Producers replace the whole sample; readers clone the `Arc` and never observe a partial
/// value. Neither side waits on the other beyond the swap itself.
#[derive(Debug)]
pub struct SampleSlot<T> {
    inner: RwLock<Option<Arc<T>>>,
}

impl<T> Default for SampleSlot<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }
}

impl<T> SampleSlot<T> {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current sample.
    pub fn publish(&self, sample: T) {
        self.publish_arc(Arc::new(sample));
    }

    /// Replace the current sample with an already shared value.
    pub fn publish_arc(&self, sample: Arc<T>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(sample);
    }

    /// Most recent complete sample, if any.
    pub fn latest(&self) -> Option<Arc<T>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop the current sample.
    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modulation/slot.rs"]
mod tests;
