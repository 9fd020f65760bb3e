use thiserror::Error;

/// Returned when a context is read from a component that is not rendered below one of its providers.
///
/// The error implements [`std::error::Error`], so a component can bubble it up with `?` and let the
/// nearest error boundary handle it:
///
/// ```rust, ignore
/// fn Counter() -> Element {
///     let counter = USE_COUNTER.get()?;
///     rsx! { "{counter.count}" }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("could not find a provider for context `{name}`; the accessor must be called from a component rendered inside its provider")]
pub struct MissingProviderError {
    /// The debug name of the context that was requested.
    pub name: &'static str,
}
