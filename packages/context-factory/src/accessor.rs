use std::{fmt, marker::PhantomData};

use crate::{MissingProviderError, Slot};

/// The access hook used when the factory is not given one.
pub(crate) fn noop(_: ()) {}

/// Reads the value of the nearest provider and runs the factory's access hook.
///
/// The arguments of [`Accessor::call`] are the arguments of the access hook. Without a hook the
/// accessor takes `()`, and [`Accessor::get`] is the shorter spelling.
pub struct Accessor<V, A = (), S = fn(())> {
    slot: Slot<V>,
    on_access: S,
    _args: PhantomData<fn(A)>,
}

impl<V, A, S: Clone> Clone for Accessor<V, A, S> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot,
            on_access: self.on_access.clone(),
            _args: PhantomData,
        }
    }
}

impl<V, A, S: Copy> Copy for Accessor<V, A, S> {}

impl<V, A, S> PartialEq for Accessor<V, A, S> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<V, A, S> fmt::Debug for Accessor<V, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl<V, A, S> Accessor<V, A, S> {
    pub(crate) fn new(slot: Slot<V>, on_access: S) -> Self {
        Self {
            slot,
            on_access,
            _args: PhantomData,
        }
    }

    /// The slot this accessor reads from.
    pub fn slot(&self) -> Slot<V> {
        self.slot
    }
}

impl<V, A, S> Accessor<V, A, S>
where
    V: Clone + 'static,
    S: Fn(A),
{
    /// Read the current value.
    ///
    /// Fails with [`MissingProviderError`] if the calling component is not rendered inside a
    /// provider of this context; the access hook does not run in that case. Otherwise the hook runs
    /// once with `args` before the value is returned.
    pub fn call(&self, args: A) -> Result<V, MissingProviderError> {
        let value = self.slot.read()?;
        (self.on_access)(args);
        Ok(value)
    }
}

impl<V, S> Accessor<V, (), S>
where
    V: Clone + 'static,
    S: Fn(()),
{
    /// Read the current value of a context whose access hook takes no arguments.
    pub fn get(&self) -> Result<V, MissingProviderError> {
        self.call(())
    }
}
