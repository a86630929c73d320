use std::{any::Any, fmt, sync::Arc};

/// A scan destination: the caller-owned slot a result column is written into
/// by whatever layer executes the query.
///
/// The builder never looks inside a destination; it only keeps them in column
/// order. [`Dest::discard`] marks a column that is selected but not scanned.
#[derive(Clone, Default)]
pub struct Dest(Option<Arc<dyn Any + Send + Sync>>);

impl Dest {
    pub fn new<T>(slot: Arc<T>) -> Self
    where
        T: Any + Send + Sync,
    {
        Self(Some(slot))
    }

    /// The shared "do not scan" sentinel.
    pub const fn discard() -> Self {
        Self(None)
    }

    pub fn is_discard(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the slot if it holds a `T`.
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let slot = self.0.clone()?;
        slot.downcast::<T>().ok()
    }
}

impl PartialEq for Dest {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => std::ptr::addr_eq(Arc::as_ptr(lhs), Arc::as_ptr(rhs)),
            _ => false,
        }
    }
}

impl fmt::Debug for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("Dest::Discard"),
            Some(ref slot) => f
                .debug_tuple("Dest")
                .field(&Arc::as_ptr(slot))
                .finish(),
        }
    }
}

impl<T> From<Arc<T>> for Dest
where
    T: Any + Send + Sync,
{
    fn from(slot: Arc<T>) -> Self {
        Self::new(slot)
    }
}

impl From<Option<Dest>> for Dest {
    fn from(value: Option<Dest>) -> Self {
        value.unwrap_or_default()
    }
}
