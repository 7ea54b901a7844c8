//! Producer-side contracts: source handles, pull producers and the
//! push-to-pull adapter

use super::slot::RowSlot;
use crate::error::SourceError;
use std::marker::PhantomData;
use std::ops::ControlFlow;

/// The underlying resource a cursor streams from
///
/// Owned exclusively by the cursor until it is released.
pub trait SourceHandle {
    /// Release the resource
    ///
    /// Best-effort: the cursor logs and swallows any error returned here.
    fn release(&mut self) -> Result<(), SourceError>;
}

/// Advances a source by one row per call
///
/// Implementations keep their position inside the source (or themselves)
/// so that each call resumes where the previous one stopped. A call writes
/// at most one row into the slot; leaving the slot empty signals that the
/// source is exhausted.
pub trait RowProducer {
    type Source: SourceHandle;
    /// Row shape descriptor, passed through by the cursor untouched
    type Shape;
    type Row;

    fn advance_one(
        &mut self,
        source: &mut Self::Source,
        shape: &Self::Shape,
        slot: &mut RowSlot<Self::Row>,
    ) -> Result<(), SourceError>;
}

impl<P: RowProducer + ?Sized> RowProducer for Box<P> {
    type Source = P::Source;
    type Shape = P::Shape;
    type Row = P::Row;

    fn advance_one(
        &mut self,
        source: &mut Self::Source,
        shape: &Self::Shape,
        slot: &mut RowSlot<Self::Row>,
    ) -> Result<(), SourceError> {
        (**self).advance_one(source, shape, slot)
    }
}

/// A source that pushes every remaining row into a visitor
///
/// The visitor returns `ControlFlow::Break` to ask the source to pause.
/// Rows not yet visited must still be available on the next `visit` call.
pub trait PushSource: SourceHandle {
    type Shape;
    type Row;

    fn visit(
        &mut self,
        shape: &Self::Shape,
        visitor: &mut dyn FnMut(Self::Row) -> ControlFlow<()>,
    ) -> Result<(), SourceError>;
}

/// Pull-one producer over a push-many source
///
/// Each `advance_one` runs a single `visit` whose visitor stores the first
/// row and breaks immediately.
pub struct PushAdapter<S> {
    _source: PhantomData<fn(&mut S)>,
}

impl<S> PushAdapter<S> {
    pub fn new() -> Self {
        Self {
            _source: PhantomData,
        }
    }
}

impl<S> Default for PushAdapter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for PushAdapter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PushAdapter")
    }
}

impl<S: PushSource> RowProducer for PushAdapter<S> {
    type Source = S;
    type Shape = S::Shape;
    type Row = S::Row;

    fn advance_one(
        &mut self,
        source: &mut S,
        shape: &S::Shape,
        slot: &mut RowSlot<S::Row>,
    ) -> Result<(), SourceError> {
        let mut overrun = false;
        source.visit(shape, &mut |row| {
            if !slot.put(row) {
                overrun = true;
            }
            ControlFlow::Break(())
        })?;

        if overrun {
            return Err(SourceError::new(
                "push source kept producing rows after a stop request",
            ));
        }
        Ok(())
    }
}
