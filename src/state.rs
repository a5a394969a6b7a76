//! State-path conventions over the persistent trie.
//!
//! Every piece of logical AL state lives under a scoped URI-style key:
//!
//! ```text
//! global://<field>
//! device://<device-handle>/<field>
//! context://<context-handle>/<field>
//! source://<context-handle>/<source-name>/<field>
//! buffer://<device-handle>/<buffer-name>/<field>
//! ```
//!
//! Handles print as hex, names as decimal. The key builders are public so
//! consumers can ask a snapshot the same questions the builder does.
//!
//! Values are `u64` cells interpreted per key: unsigned values widen,
//! signed and floating values are stored as their bit pattern
//! (zero-extended for 32-bit types), booleans are 0/1, and strings hold
//! the [`StringHandle`](crate::StringHandle) of the interned text.

use phamt::{Trie, TrieSnapshot};

use crate::event::{ContextId, DeviceId};

pub fn global_key(field: &str) -> String {
    format!("global://{field}")
}

pub fn device_key(device: DeviceId, field: &str) -> String {
    format!("device://{:#x}/{field}", device.0)
}

pub fn context_key(context: ContextId, field: &str) -> String {
    format!("context://{:#x}/{field}", context.0)
}

pub fn source_key(context: ContextId, name: u32, field: &str) -> String {
    format!("source://{:#x}/{name}/{field}", context.0)
}

pub fn buffer_key(device: DeviceId, name: u32, field: &str) -> String {
    format!("buffer://{:#x}/{name}/{field}", device.0)
}

pub fn int_bits(value: i32) -> u64 {
    value as u32 as u64
}

pub fn int_from_bits(bits: u64) -> i32 {
    bits as u32 as i32
}

pub fn float_bits(value: f32) -> u64 {
    u64::from(value.to_bits())
}

pub fn float_from_bits(bits: u64) -> f32 {
    f32::from_bits(bits as u32)
}

pub fn double_bits(value: f64) -> u64 {
    value.to_bits()
}

pub fn double_from_bits(bits: u64) -> f64 {
    f64::from_bits(bits)
}

/// The mutable "current" state during a playback pass. Only the
/// [`StateBuilder`](crate::StateBuilder) writes to it; everything else sees
/// snapshots.
#[derive(Debug, Default)]
pub struct StateTrie {
    trie: Trie,
}

impl StateTrie {
    pub fn new() -> Self {
        Default::default()
    }

    /// Writing the value a key already has is skipped, so no-op updates
    /// don't clone trie paths.
    fn put(&mut self, key: &str, value: u64) {
        if self.trie.get(key) != Some(value) {
            self.trie.put(key, value);
        }
    }

    pub fn put_global(&mut self, field: &str, value: u64) {
        self.put(&global_key(field), value);
    }

    pub fn get_global(&self, field: &str) -> Option<u64> {
        self.trie.get(&global_key(field))
    }

    pub fn put_device(&mut self, device: DeviceId, field: &str, value: u64) {
        self.put(&device_key(device, field), value);
    }

    pub fn get_device(&self, device: DeviceId, field: &str) -> Option<u64> {
        self.trie.get(&device_key(device, field))
    }

    pub fn put_context(&mut self, context: ContextId, field: &str, value: u64) {
        self.put(&context_key(context, field), value);
    }

    pub fn get_context(&self, context: ContextId, field: &str) -> Option<u64> {
        self.trie.get(&context_key(context, field))
    }

    pub fn put_source(&mut self, context: ContextId, name: u32, field: &str, value: u64) {
        self.put(&source_key(context, name, field), value);
    }

    pub fn get_source(&self, context: ContextId, name: u32, field: &str) -> Option<u64> {
        self.trie.get(&source_key(context, name, field))
    }

    pub fn put_buffer(&mut self, device: DeviceId, name: u32, field: &str, value: u64) {
        self.put(&buffer_key(device, name, field), value);
    }

    pub fn get_buffer(&self, device: DeviceId, name: u32, field: &str) -> Option<u64> {
        self.trie.get(&buffer_key(device, name, field))
    }

    pub fn current_context(&self) -> ContextId {
        ContextId(self.get_global("current_context").unwrap_or(0))
    }

    /// The current context plus the device it was created on.
    pub fn current_context_and_device(&self) -> (ContextId, DeviceId) {
        let context = self.current_context();
        let device = if context.is_null() {
            DeviceId::NULL
        } else {
            DeviceId(self.get_context(context, "device").unwrap_or(0))
        };
        (context, device)
    }

    pub fn set_current_context(&mut self, context: ContextId) {
        self.put_global("current_context", context.0);
    }

    pub fn snapshot(&mut self) -> TrieSnapshot {
        self.trie.snapshot()
    }
}
