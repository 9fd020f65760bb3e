use std::{
    any::Any,
    cell::{Cell, RefCell},
    fmt,
    marker::PhantomData,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use dioxus_core::{provide_context, try_consume_context, ReactiveContext, Subscribers};

use crate::MissingProviderError;

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(0);

/// A process-unique identifier for a slot.
///
/// Every call to the factory draws a fresh id, so two factories that carry the same value type
/// never see each other's providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl SlotId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// The raw handle behind a context.
///
/// A slot does not hold a value itself. Each mounted provider stores a value for its own subtree,
/// and reading the slot returns the value of the nearest provider above the calling component.
/// Outside of every provider the slot is absent.
///
/// Slots are `Copy`, so they can be moved into closures, props and event handlers freely.
pub struct Slot<V> {
    id: SlotId,
    name: &'static str,
    _value: PhantomData<fn() -> V>,
}

impl<V> Clone for Slot<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Slot<V> {}

impl<V> PartialEq for Slot<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<V> Eq for Slot<V> {}

impl<V> fmt::Debug for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl<V> Slot<V> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            id: SlotId::next(),
            name,
            _value: PhantomData,
        }
    }

    /// The id that distinguishes this slot from every other slot.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// The debug name used in errors and trace logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if a provider for this slot is mounted above the current component.
    pub fn has_provider(&self) -> bool {
        SlotFrame::nearest(self.id).is_some()
    }
}

impl<V: Clone + 'static> Slot<V> {
    /// Read the value of the nearest provider above the current component.
    ///
    /// If the read happens while a component renders, that component is re-rendered whenever the
    /// provider computes a new value.
    pub fn try_read(&self) -> Option<V> {
        let frame = SlotFrame::nearest(self.id)?;
        let value = frame.get::<V>()?;
        frame.subscribe_current();
        Some(value)
    }

    /// Read the value of the nearest provider, failing if there is none.
    pub fn read(&self) -> Result<V, MissingProviderError> {
        self.try_read()
            .ok_or(MissingProviderError { name: self.name })
    }
}

/// The context a mounted provider places in its scope.
///
/// Frames link to the frame of the nearest enclosing provider (of any slot), so a lookup can walk
/// outward past providers that belong to other factories.
#[derive(Clone)]
pub(crate) struct SlotFrame(Rc<FrameInner>);

struct FrameInner {
    id: SlotId,
    name: &'static str,
    // A `RefCell<Option<V>>` for the slot's value type
    cell: Box<dyn Any>,
    present: Cell<bool>,
    subscribers: Subscribers,
    parent: Option<SlotFrame>,
}

impl SlotFrame {
    /// Create a frame for `slot` and provide it to the current scope.
    pub(crate) fn mount<V: 'static>(slot: Slot<V>) -> Self {
        let parent = try_consume_context::<SlotFrame>();
        tracing::trace!(
            "mounting provider for {} ({}), enclosed by {:?}",
            slot.name,
            slot.id,
            parent.as_ref().map(|frame| frame.0.id)
        );

        let frame = SlotFrame(Rc::new(FrameInner {
            id: slot.id,
            name: slot.name,
            cell: Box::new(RefCell::new(None::<V>)),
            present: Cell::new(false),
            subscribers: Subscribers::new(),
            parent,
        }));

        provide_context(frame)
    }

    /// Find the nearest frame for `id` that currently holds a value.
    fn nearest(id: SlotId) -> Option<SlotFrame> {
        let mut search = try_consume_context::<SlotFrame>();
        while let Some(frame) = search {
            if frame.0.id == id && frame.is_present() {
                return Some(frame);
            }
            tracing::trace!(
                "skipping frame {} ({}) while looking for {}",
                frame.0.name,
                frame.0.id,
                id
            );
            search = frame.0.parent.clone();
        }
        None
    }

    fn is_present(&self) -> bool {
        self.0.present.get()
    }

    fn cell<V: 'static>(&self) -> Option<&RefCell<Option<V>>> {
        self.0.cell.downcast_ref::<RefCell<Option<V>>>()
    }

    fn get<V: Clone + 'static>(&self) -> Option<V> {
        self.cell::<V>()?.borrow().clone()
    }

    /// Remove the current value, leaving the frame absent until [`SlotFrame::store`] runs.
    pub(crate) fn take<V: 'static>(&self) -> Option<V> {
        self.0.present.set(false);
        self.cell::<V>()?.borrow_mut().take()
    }

    pub(crate) fn store<V: 'static>(&self, value: V) {
        if let Some(cell) = self.cell::<V>() {
            *cell.borrow_mut() = Some(value);
            self.0.present.set(true);
        }
    }

    /// Subscribe the current reactive context (usually the rendering component) to this frame.
    fn subscribe_current(&self) {
        if let Some(reactive_context) = ReactiveContext::current() {
            tracing::trace!(
                "subscribing {} to {} ({})",
                reactive_context,
                self.0.name,
                self.0.id
            );
            reactive_context.subscribe(self.0.subscribers.clone());
        }
    }

    /// Mark every subscriber dirty so it re-reads the new value.
    pub(crate) fn notify(&self) {
        self.0.subscribers.visit(|subscriber| {
            tracing::trace!(
                "{} ({}) changed, marking {} dirty",
                self.0.name,
                self.0.id,
                subscriber
            );
            subscriber.mark_dirty();
        });
    }
}
