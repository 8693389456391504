//! Input event vocabulary shared by symbol resolution and target matching.

use std::collections::BTreeSet;

/// Kinds of input events the engine reasons about.
///
/// The discriminants are the kernel's `EV_KEY` / `EV_REL` type codes,
/// which is also what the first field of a preset mapping key encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `EV_KEY`: keys and buttons.
    Key,
    /// `EV_REL`: relative axes (pointer motion, wheels).
    Relative,
}

impl EventKind {
    /// The kernel event-type code.
    pub const fn code(self) -> u16 {
        match self {
            Self::Key => evdev::EventType::KEY.0,
            Self::Relative => evdev::EventType::RELATIVE.0,
        }
    }
}

/// The event codes a device can emit or a symbol requires, partitioned
/// by event kind.
///
/// Ordered sets keep logs and test output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// `EV_KEY` codes.
    pub keys: BTreeSet<u16>,
    /// `EV_REL` codes.
    pub rel: BTreeSet<u16>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capabilities consisting of a single key code.
    pub fn single_key(code: u16) -> Self {
        Self {
            keys: BTreeSet::from([code]),
            rel: BTreeSet::new(),
        }
    }

    /// Absorb all codes from `other`.
    pub fn merge(&mut self, other: &Self) {
        self.keys.extend(other.keys.iter().copied());
        self.rel.extend(other.rel.iter().copied());
    }

    /// True if no codes are required at all.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.rel.is_empty()
    }

    /// True if every key code in `self` is present in `other`.
    pub fn keys_subset_of(&self, other: &Self) -> bool {
        self.keys.is_subset(&other.keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_codes() {
        assert_eq!(EventKind::Key.code(), 1);
        assert_eq!(EventKind::Relative.code(), 2);
    }

    #[test]
    fn test_merge() {
        let mut caps = Capabilities::single_key(30);
        let mut other = Capabilities::single_key(31);
        other.rel.insert(0);
        caps.merge(&other);
        assert_eq!(caps.keys, BTreeSet::from([30, 31]));
        assert_eq!(caps.rel, BTreeSet::from([0]));
    }

    #[test]
    fn test_subset() {
        let needed = Capabilities::single_key(30);
        let mut device = Capabilities::new();
        device.keys.extend([29, 30, 31]);
        assert!(needed.keys_subset_of(&device));
        assert!(!device.keys_subset_of(&needed));
    }

    #[test]
    fn test_empty() {
        assert!(Capabilities::new().is_empty());
        assert!(!Capabilities::single_key(1).is_empty());
    }
}
