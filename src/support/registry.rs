/// Holder for a hardware-backed singleton.
///
/// At most one instance is live at a time. It is created on first request,
/// kept on later requests and torn down by [`Slot::clear`].
pub struct Slot<T> {
    inner: Option<T>,
}

impl<T> Slot<T> {
    pub const fn new() -> Self {
        Self { inner: None }
    }

    /// Returns the live instance, constructing it with `f` if there is none.
    /// `f` is not called when an instance already exists.
    pub fn get_or_insert_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        if self.inner.is_none() {
            trace!("Slot: construct");
        }
        self.inner.get_or_insert_with(f)
    }

    /// Drops the live instance. Returns `false` if the slot was empty.
    pub fn clear(&mut self) -> bool {
        match self.inner.take() {
            Some(v) => {
                trace!("Slot: destroy");
                drop(v);
                true
            }
            None => false,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.inner.as_mut()
    }

    pub fn is_live(&self) -> bool {
        self.inner.is_some()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}
