//! UUID-keyed weak references into shared containers.
//!
//! A schematic document may be loaded before the containers it
//! cross-references exist, so a [`Reference`] starts out as a bare UUID and
//! is later resolved against a container.  References never own the referent:
//! reading through one borrows the container, which is what keeps the
//! referent alive for exactly as long as the read.

use crate::SchematicError;
use std::marker::PhantomData;
use uuid::Uuid;

/// Lookup surface a container offers for references of type `T`.
pub trait UuidLookup<T> {
    fn lookup(&self, uuid: &Uuid) -> Option<&T>;
}

impl<T> UuidLookup<T> for std::collections::BTreeMap<Uuid, T> {
    fn lookup(&self, uuid: &Uuid) -> Option<&T> {
        self.get(uuid)
    }
}

/// Implemented by every type a [`Reference`] can point at; `KIND` names the
/// target in error messages.
pub trait RefTarget {
    const KIND: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unresolved,
    Resolved,
}

/// A non-owning, UUID-keyed reference to a `T` held in some container.
///
/// Starts out [`Reference::unresolved`]; [`Reference::resolve`] validates the
/// UUID against a container once and is a no-op on an already-resolved
/// reference.  [`Reference::get`] fails with `UnresolvedReference` until that
/// transition has happened.
#[derive(Debug)]
pub struct Reference<T> {
    uuid: Uuid,
    state: State,
    _marker: PhantomData<fn() -> T>,
}

// Manual impls: a reference is always a plain key + state regardless of `T`.
impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Reference<T> {}

impl<T> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid && self.state == other.state
    }
}

impl<T> Eq for Reference<T> {}

impl<T: RefTarget> Reference<T> {
    /// A reference holding only a UUID, to be resolved later.
    pub fn unresolved(uuid: Uuid) -> Self {
        Self {
            uuid,
            state: State::Unresolved,
            _marker: PhantomData,
        }
    }

    /// A reference validated against `container` at construction time.
    pub fn resolved<C: UuidLookup<T>>(uuid: Uuid, container: &C) -> Result<Self, SchematicError> {
        let mut r = Self::unresolved(uuid);
        r.resolve(container)?;
        Ok(r)
    }

    /// The target UUID, available in both states.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn is_resolved(&self) -> bool {
        self.state == State::Resolved
    }

    /// Validate the UUID against `container` and mark the reference resolved.
    ///
    /// Resolving an already-resolved reference is a no-op; the container is
    /// not consulted again.
    pub fn resolve<C: UuidLookup<T>>(&mut self, container: &C) -> Result<(), SchematicError> {
        if self.state == State::Resolved {
            return Ok(());
        }
        if container.lookup(&self.uuid).is_none() {
            return Err(SchematicError::NotFound {
                kind: T::KIND,
                uuid: self.uuid,
            });
        }
        self.state = State::Resolved;
        Ok(())
    }

    /// Borrow the referent out of `container`.
    ///
    /// Fails with `UnresolvedReference` before [`resolve`](Self::resolve) has
    /// run, and with `NotFound` if the container no longer holds the key.
    pub fn get<'a, C: UuidLookup<T>>(&self, container: &'a C) -> Result<&'a T, SchematicError> {
        if self.state == State::Unresolved {
            return Err(SchematicError::UnresolvedReference {
                kind: T::KIND,
                uuid: self.uuid,
            });
        }
        container
            .lookup(&self.uuid)
            .ok_or(SchematicError::NotFound {
                kind: T::KIND,
                uuid: self.uuid,
            })
    }
}
