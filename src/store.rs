//! The append-only record of every decoded API call.

use phamt::TrieSnapshot;

use crate::decoder::CallerInfo;
use crate::event::{ContextId, DeviceId, EventTag};
use crate::string_table::{StringHandle, StringTable};

/// One typed argument or return value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue {
    Device(DeviceId),
    Context(ContextId),
    Source(u32),
    Buffer(u32),
    Ptr(u64),
    Int(i32),
    Uint(u32),
    Size(i32),
    Float(f32),
    Double(f64),
    Enum(u32),
    Bool(bool),
    /// `None` when the recorded program passed a NULL pointer.
    Str(Option<StringHandle>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arg {
    pub name: &'static str,
    pub value: ArgValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFrame {
    pub ip: u64,
    pub symbol: Option<StringHandle>,
}

/// Everything known about one recorded call, plus the snapshot of the
/// logical AL state taken after the call (and any meta events that trailed
/// it) finished mutating the world.
#[derive(Debug, Clone)]
pub struct ApiCallRecord {
    pub tag: EventTag,
    pub args: Vec<Arg>,
    pub rets: Vec<Arg>,
    pub frames: Vec<RecordFrame>,
    pub thread_id: u32,
    pub timestamp_ms: u32,
    pub trace_scope: u32,
    /// File offset of the record in the trace, for re-reading PCM payloads.
    pub file_offset: u64,
    /// The AL error the call raised, reported by the recorder through a
    /// trailing `AL_ERROR_TRIGGERED` event.
    pub generated_al_error: Option<u32>,
    pub generated_alc_error: Option<u32>,
    /// The call's own return value indicated failure.
    pub reported_failure: bool,
    /// The call tried to change state but nothing observably changed, or it
    /// queried an error register that was already clear.
    pub inefficient_state_change: bool,
    pub(crate) snapshot: Option<TrieSnapshot>,
}

impl ApiCallRecord {
    pub(crate) fn new(tag: EventTag, caller: &CallerInfo, strings: &mut StringTable) -> Self {
        let frames = caller
            .frames
            .iter()
            .map(|frame| RecordFrame {
                ip: frame.ip,
                symbol: frame
                    .symbol
                    .as_deref()
                    .map(|sym| strings.handle_for_string(sym)),
            })
            .collect();
        ApiCallRecord {
            tag,
            args: Vec::new(),
            rets: Vec::new(),
            frames,
            thread_id: caller.thread_id,
            timestamp_ms: caller.timestamp_ms,
            trace_scope: caller.trace_scope,
            file_offset: caller.record_offset,
            generated_al_error: None,
            generated_alc_error: None,
            reported_failure: false,
            inefficient_state_change: false,
            snapshot: None,
        }
    }

    pub fn fn_name(&self) -> &'static str {
        self.tag.name()
    }

    /// The state of the world immediately after this call (including meta
    /// events the recorder emitted before the next call).
    ///
    /// Finalized when the following record is appended, or at end of
    /// stream; a store obtained from a completed
    /// [`StateBuilder`](crate::StateBuilder) always has it.
    pub fn snapshot(&self) -> &TrieSnapshot {
        self.snapshot
            .as_ref()
            .expect("snapshot is finalized once the next record arrives")
    }

    pub(crate) fn arg(&mut self, name: &'static str, value: ArgValue) {
        self.args.push(Arg { name, value });
    }

    pub(crate) fn ret(&mut self, value: ArgValue) {
        self.rets.push(Arg {
            name: "return value",
            value,
        });
    }
}

/// Append-only sequence of call records. Indexed reads only; records are
/// immutable once their snapshot is finalized.
#[derive(Debug, Default)]
pub struct CallStore {
    records: Vec<ApiCallRecord>,
    strings: StringTable,
    latest_timestamp: u32,
    largest_thread_id: u32,
}

impl CallStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ApiCallRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApiCallRecord> {
        self.records.iter()
    }

    /// The table that resolves every [`StringHandle`] on the records and in
    /// snapshot string cells.
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn latest_timestamp(&self) -> u32 {
        self.latest_timestamp
    }

    pub fn largest_thread_id(&self) -> u32 {
        self.largest_thread_id
    }

    pub(crate) fn strings_mut(&mut self) -> &mut StringTable {
        &mut self.strings
    }

    pub(crate) fn push(&mut self, record: ApiCallRecord) {
        self.latest_timestamp = self.latest_timestamp.max(record.timestamp_ms);
        self.largest_thread_id = self.largest_thread_id.max(record.thread_id);
        self.records.push(record);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut ApiCallRecord> {
        self.records.last_mut()
    }
}

impl<'a> IntoIterator for &'a CallStore {
    type Item = &'a ApiCallRecord;
    type IntoIter = std::slice::Iter<'a, ApiCallRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
