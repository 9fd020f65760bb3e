use std::{fmt, marker::PhantomData};

use dioxus_core::{use_hook, ComponentFunction, Element};
use dioxus_core_macro::Props;

use crate::slot::{Slot, SlotFrame, SlotId};

/// The props of a [`ContextProvider`].
#[derive(Props, Clone, PartialEq)]
pub struct ProviderProps<P: Clone + PartialEq + 'static> {
    /// The input passed to the value function every time the provider renders.
    pub input: P,

    /// The subtree that can read the provided value.
    pub children: Element,
}

/// A component that computes a value from its `input` and makes it visible to every component in
/// its `children`.
///
/// The provider is a plain value that implements [`ComponentFunction`], so it is rendered like any
/// other component:
///
/// ```rust, ignore
/// let (_, CounterProvider, use_counter) = create_context(|start: i32| use_signal(move || start));
///
/// rsx! {
///     CounterProvider { input: 10,
///         Counter {}
///     }
/// }
/// ```
///
/// The value function runs inside the provider's scope on every render, so it may call hooks.
/// Rendering a provider inside another provider of the same factory shadows the outer value for
/// the inner subtree only.
pub struct ContextProvider<P, V, F> {
    slot: Slot<V>,
    value_fn: F,
    // One allocation per factory. Its address is the provider's component identity, so the diff
    // replaces the scope when one provider takes the place of another of the same type
    identity: &'static SlotId,
    _input: PhantomData<fn(P)>,
}

impl<P, V, F: Clone> Clone for ContextProvider<P, V, F> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot,
            value_fn: self.value_fn.clone(),
            identity: self.identity,
            _input: PhantomData,
        }
    }
}

impl<P, V, F: Copy> Copy for ContextProvider<P, V, F> {}

impl<P, V, F> fmt::Debug for ContextProvider<P, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextProvider")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl<P, V, F> ContextProvider<P, V, F> {
    pub(crate) fn new(slot: Slot<V>, value_fn: F) -> Self {
        Self {
            slot,
            value_fn,
            identity: Box::leak(Box::new(slot.id())),
            _input: PhantomData,
        }
    }

    /// The slot this provider writes to.
    pub fn slot(&self) -> Slot<V> {
        self.slot
    }
}

/// Distinguishes the provider's [`ComponentFunction`] impl from the one for closures.
#[doc(hidden)]
pub struct ProviderMarker;

impl<P, V, F> ComponentFunction<ProviderProps<P>, ProviderMarker> for ContextProvider<P, V, F>
where
    P: Clone + PartialEq + 'static,
    V: 'static,
    F: Fn(P) -> V + Clone + 'static,
{
    fn fn_ptr(&self) -> usize {
        self.identity as *const SlotId as usize
    }

    fn rebuild(&self, props: ProviderProps<P>) -> Element {
        let ProviderProps { input, children } = props;

        let slot = self.slot;
        let frame = use_hook(move || SlotFrame::mount(slot));

        // Lookups made while the value function runs must resolve to an enclosing provider
        frame.take::<V>();
        let value = (self.value_fn)(input);
        frame.store(value);
        frame.notify();

        children
    }
}
