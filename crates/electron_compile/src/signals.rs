//! Signal identity allocation and the current value of every signal.

use electron_common::{InternalError, ElectronResult, Logic};
use electron_ir::{SigId, SigValue, Signal};
use tracing::trace;

/// Allocates signal identities for one compilation unit and tracks their
/// values.
///
/// Ids are handed out in increasing order starting at zero and are never
/// reused until [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct SignalTable {
    values: Vec<SigValue>,
}

impl SignalTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every signal; the next id is zero again.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Number of signals allocated so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no signal was allocated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Allocates a signal with no value of its own.
    pub fn alloc(&mut self) -> SigId {
        let id = SigId::from_raw(self.values.len() as u32);
        self.values.push(SigValue::Symbolic(id));
        trace!(sig = %id, "allocated signal");
        id
    }

    /// Allocates a signal tied to `level`.
    pub fn alloc_const(&mut self, level: Logic) -> SigId {
        let id = SigId::from_raw(self.values.len() as u32);
        self.values.push(SigValue::Const(level));
        id
    }

    /// Allocates `width` fresh signals.
    pub fn alloc_many(&mut self, width: usize) -> Vec<SigId> {
        (0..width).map(|_| self.alloc()).collect()
    }

    /// The current value of `id`.
    pub fn value(&self, id: SigId) -> ElectronResult<SigValue> {
        self.values
            .get(id.as_raw() as usize)
            .copied()
            .ok_or_else(|| InternalError::new(format!("signal {id} was never allocated")))
    }

    /// Overwrites the value of `id`.
    pub fn set(&mut self, id: SigId, value: SigValue) -> ElectronResult<()> {
        let slot = self
            .values
            .get_mut(id.as_raw() as usize)
            .ok_or_else(|| InternalError::new(format!("signal {id} was never allocated")))?;
        *slot = value;
        Ok(())
    }

    /// The signal `id` with its current value.
    pub fn signal(&self, id: SigId) -> ElectronResult<Signal> {
        Ok(Signal {
            id,
            value: self.value(id)?,
        })
    }

    /// The constant level of `id`, or `x` if it has none.
    pub fn level(&self, id: SigId) -> ElectronResult<Logic> {
        Ok(match self.value(id)? {
            SigValue::Const(level) => level,
            SigValue::Symbolic(_) => Logic::X,
        })
    }

    /// Brings a signal copied out earlier up to date.
    pub fn refresh(&self, signal: &mut Signal) -> ElectronResult<()> {
        signal.value = self.value(signal.id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_unique() {
        let mut table = SignalTable::new();
        let a = table.alloc_many(3);
        let b = table.alloc();
        assert_eq!(
            a.iter().map(|s| s.as_raw()).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(b.as_raw(), 3);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut table = SignalTable::new();
        table.alloc_many(5);
        table.reset();
        assert!(table.is_empty());
        assert_eq!(table.alloc().as_raw(), 0);
    }

    #[test]
    fn set_and_refresh() {
        let mut table = SignalTable::new();
        let a = table.alloc();
        let b = table.alloc();
        let mut copy = table.signal(b).unwrap();
        assert!(copy.is_unassigned());
        table.set(b, table.value(a).unwrap()).unwrap();
        table.refresh(&mut copy).unwrap();
        assert_eq!(copy.value, SigValue::Symbolic(a));
    }

    #[test]
    fn constants_and_levels() {
        let mut table = SignalTable::new();
        let one = table.alloc_const(Logic::One);
        let free = table.alloc();
        assert_eq!(table.level(one).unwrap(), Logic::One);
        assert_eq!(table.level(free).unwrap(), Logic::X);
    }

    #[test]
    fn unknown_signal_is_internal_error() {
        let table = SignalTable::new();
        assert!(table.value(SigId::from_raw(0)).is_err());
    }
}
