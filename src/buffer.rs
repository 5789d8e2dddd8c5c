//! Mirrors of host data living outside of this crate, typically on a GPU.
//!
//! Structures owning such a mirror upload their tables to it every time they
//! change, and release it explicitly. Dropping the owner never releases the
//! mirror implicitly.

/// A buffer mirroring host data in an external resource.
pub trait ExternalBuffer<T> {
    /// Replaces the content of this buffer with `data`.
    fn upload(&mut self, data: &[T]);

    /// Frees the external resource.
    ///
    /// Owners of the buffer call this at most once.
    fn release(&mut self);
}

/// An external buffer that does nothing: the data only lives on the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HostOnly;

impl<T> ExternalBuffer<T> for HostOnly {
    #[inline]
    fn upload(&mut self, _: &[T]) {}

    #[inline]
    fn release(&mut self) {}
}
