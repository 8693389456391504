//! Virtual output devices and target resolution.
//!
//! Mappings are emitted through one of a fixed set of virtual output
//! devices ("targets"). Each target declares the event codes it can
//! emit; resolution picks the first registered target able to satisfy
//! a symbol's required capabilities.

use evdev::{Key, RelativeAxisType};
use tracing::{debug, info};

use crate::error::Result;
use crate::event::Capabilities;
use crate::macros::{MacroParser, is_macro};
use crate::symbols::SymbolTable;

/// Target selected for anything needing relative axes.
pub const POINTER_TARGET: &str = "mouse";

/// Target used when no registered device satisfies a symbol.
pub const FALLBACK_TARGET: &str = "keyboard";

/// Appended to a symbol when no target can emit it, so the mapping is
/// kept but visibly flagged in the preset file.
pub const BROKEN_MAPPING_NOTE: &str =
    "\n# Broken mapping:\n# No target can handle all specified keycodes";

/// One registered virtual output device.
#[derive(Debug, Clone)]
pub struct VirtualDevice {
    pub name: String,
    pub capabilities: Capabilities,
}

/// The ordered set of virtual output devices.
///
/// Iteration order is registration order, and registration order is the
/// resolution priority: when several devices could emit a symbol, the
/// earliest registered one wins.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    devices: Vec<VirtualDevice>,
    prepared: bool,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the standard targets: `keyboard`, `gamepad`, `mouse`.
    ///
    /// Idempotent; repeated calls are no-ops.
    pub fn prepare(&mut self) {
        if self.prepared {
            return;
        }
        debug!("Registering standard virtual output devices");
        self.register("keyboard", keyboard_capabilities());
        self.register("gamepad", gamepad_capabilities());
        self.register("mouse", mouse_capabilities());
        self.prepared = true;
    }

    /// Append a device; later registrations have lower priority.
    pub fn register(&mut self, name: impl Into<String>, capabilities: Capabilities) {
        self.devices.push(VirtualDevice {
            name: name.into(),
            capabilities,
        });
    }

    /// Devices in registration order.
    pub fn devices(&self) -> &[VirtualDevice] {
        &self.devices
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }
}

/// All keyboard key codes (`KEY_ESC` through `KEY_MICMUTE`).
fn keyboard_capabilities() -> Capabilities {
    let mut caps = Capabilities::new();
    caps.keys.extend(Key::KEY_ESC.code()..=Key::KEY_MICMUTE.code());
    caps
}

/// Gamepad buttons and dpad.
fn gamepad_capabilities() -> Capabilities {
    let mut caps = Capabilities::new();
    caps.keys.extend(Key::BTN_SOUTH.code()..=Key::BTN_THUMBR.code());
    caps.keys
        .extend(Key::BTN_DPAD_UP.code()..=Key::BTN_DPAD_RIGHT.code());
    caps
}

/// Mouse buttons plus the relative axes.
fn mouse_capabilities() -> Capabilities {
    let mut caps = Capabilities::new();
    caps.keys.extend(Key::BTN_LEFT.code()..=Key::BTN_TASK.code());
    caps.rel.extend([
        RelativeAxisType::REL_X.0,
        RelativeAxisType::REL_Y.0,
        RelativeAxisType::REL_WHEEL.0,
        RelativeAxisType::REL_HWHEEL.0,
    ]);
    caps
}

/// Picks the target device able to emit a mapping symbol.
pub struct TargetResolver<'a> {
    registry: &'a TargetRegistry,
    symbols: &'a SymbolTable,
}

impl<'a> TargetResolver<'a> {
    pub fn new(registry: &'a TargetRegistry, symbols: &'a SymbolTable) -> Self {
        Self { registry, symbols }
    }

    /// Resolve the target for `symbol`.
    ///
    /// Policy, in priority order:
    /// 1. anything needing relative axes goes to the pointer device,
    /// 2. otherwise the first registered device whose key capabilities
    ///    are a superset of the required key codes,
    /// 3. otherwise `None` - the caller decides the fallback.
    ///
    /// Unknown symbols and malformed macros are errors; the caller
    /// skips that single mapping entry.
    pub fn resolve(&self, symbol: &str) -> Result<Option<&str>> {
        let required = if is_macro(symbol) {
            MacroParser::new(self.symbols).capabilities(symbol)?
        } else {
            Capabilities::single_key(self.symbols.get(symbol)?)
        };

        if !required.rel.is_empty() {
            return Ok(Some(POINTER_TARGET));
        }

        for device in self.registry.devices() {
            if required.keys_subset_of(&device.capabilities) {
                return Ok(Some(&device.name));
            }
        }

        info!(symbol = %symbol, "No target can emit this symbol");
        Ok(None)
    }
}
