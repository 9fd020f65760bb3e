use std::marker::PhantomData;

use crate::{accessor::noop, Accessor, ContextProvider, Slot};

/// The handles produced by the factory: the raw slot, the provider component and the accessor.
pub type Context<P, V, F, A = (), S = fn(())> =
    (Slot<V>, ContextProvider<P, V, F>, Accessor<V, A, S>);

/// Create a context from a function that computes its value.
///
/// `value_fn` receives the provider's `input` and runs inside the provider on every render, so it
/// may call hooks like `use_signal`. Components below the provider read the result with the
/// returned accessor.
///
/// ```rust, ignore
/// #[derive(Clone, Copy)]
/// struct Counter {
///     count: Signal<i32>,
/// }
///
/// let (_, CounterProvider, use_counter) = create_context(|start: i32| Counter {
///     count: use_signal(move || start),
/// });
/// ```
pub fn create_context<P, V, F>(value_fn: F) -> Context<P, V, F>
where
    P: Clone + PartialEq + 'static,
    V: 'static,
    F: Fn(P) -> V + Clone + 'static,
{
    ContextFactory::new(value_fn).build()
}

/// Create a context whose accessor runs `on_access` every time it is called.
///
/// The accessor takes the same arguments as `on_access` and forwards them unchanged. The hook runs
/// after the provider lookup succeeds and before the value is returned.
pub fn create_context_with<P, V, F, A, S>(value_fn: F, on_access: S) -> Context<P, V, F, A, S>
where
    P: Clone + PartialEq + 'static,
    V: 'static,
    F: Fn(P) -> V + Clone + 'static,
    S: Fn(A) + Clone + 'static,
{
    ContextFactory::new(value_fn).on_access(on_access).build()
}

/// Builder for a context when the defaults of [`create_context`] are not enough.
///
/// ```rust, ignore
/// let (_, ThemeProvider, use_theme) = ContextFactory::new(|dark: bool| Theme::new(dark))
///     .name("theme")
///     .on_access(|component: &'static str| tracing::debug!("{component} read the theme"))
///     .build();
/// ```
pub struct ContextFactory<P, V, F, A = (), S = fn(())> {
    value_fn: F,
    on_access: S,
    name: Option<&'static str>,
    _marker: PhantomData<fn(P, A) -> V>,
}

impl<P, V, F> ContextFactory<P, V, F>
where
    F: Fn(P) -> V,
{
    /// Start a factory from the function that computes the context's value.
    pub fn new(value_fn: F) -> Self {
        Self {
            value_fn,
            on_access: noop,
            name: None,
            _marker: PhantomData,
        }
    }
}

impl<P, V, F, A, S> ContextFactory<P, V, F, A, S> {
    /// Set the name used in [`MissingProviderError`](crate::MissingProviderError) and trace logs.
    ///
    /// Defaults to the type name of the value.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Run `on_access` every time the accessor is called. The accessor takes its arguments.
    pub fn on_access<A2, S2>(self, on_access: S2) -> ContextFactory<P, V, F, A2, S2>
    where
        S2: Fn(A2),
    {
        ContextFactory {
            value_fn: self.value_fn,
            on_access,
            name: self.name,
            _marker: PhantomData,
        }
    }

    /// Create the slot, provider and accessor.
    pub fn build(self) -> Context<P, V, F, A, S>
    where
        V: 'static,
    {
        let name = self.name.unwrap_or_else(std::any::type_name::<V>);
        let slot = Slot::new(name);
        tracing::trace!("created context {} ({})", name, slot.id());

        (
            slot,
            ContextProvider::new(slot, self.value_fn),
            Accessor::new(slot, self.on_access),
        )
    }
}
