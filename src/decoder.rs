//! Streaming decoder for the trace log format.
//!
//! The decoder walks the byte stream record by record and hands each one to
//! a [`TraceVisitor`]. It owns the two pieces of cross-record state the
//! format requires: the instruction-pointer → symbol table built up from
//! `NEW_CALLSTACK_SYMS` records, and the mapping from the recorded
//! program's 64-bit thread ids to small stable integers.
//!
//! Decoding follows `Init → HeaderRead → Streaming → Terminated`: any
//! framing problem (bad magic, short read, unknown tag, a length prefix
//! running past the end of the file) terminates the stream with
//! `eos(okay=false)`. Events dispatched before the failure remain valid.

use std::sync::Arc;

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::error::DecodeError;
use crate::event::{ApiCall, ContextId, DeviceId, EventTag};
use crate::raw_data::RawData;

pub const TRACE_MAGIC: u32 = 0x0104_e5a1;
pub const TRACE_FORMAT_VERSION: u32 = 1;

type FastHashMap<K, V> = FxHashMap<K, V>;

#[derive(Debug, Clone)]
pub struct CallstackFrame {
    pub ip: u64,
    /// Resolved from the most recent `NEW_CALLSTACK_SYMS` record that
    /// mentioned this instruction pointer, if any.
    pub symbol: Option<Arc<str>>,
}

/// Everything an entry-point record carries besides its typed payload.
#[derive(Debug, Clone)]
pub struct CallerInfo {
    /// Stable small id, assigned per distinct recorded thread in order of
    /// first appearance, starting at 1.
    pub thread_id: u32,
    /// Milliseconds since the start of the recorded run.
    pub timestamp_ms: u32,
    /// Nesting depth of `alTracePushScope`/`alTracePopScope` at call time.
    pub trace_scope: u32,
    pub frames: Vec<CallstackFrame>,
    /// Absolute file offset of this record's tag.
    pub record_offset: u64,
}

/// Receives decoded events in strict trace order.
///
/// All methods default to doing nothing, so a consumer that only cares
/// about API calls (a text dumper, say) implements just [`api_call`].
/// [`progress`] may return `false` to cancel the walk; the decoder then
/// stops dispatching and reports `eos(okay=false)`.
///
/// [`api_call`]: TraceVisitor::api_call
/// [`progress`]: TraceVisitor::progress
#[allow(unused_variables)]
pub trait TraceVisitor {
    fn api_call(&mut self, caller: &CallerInfo, tag: EventTag, call: &ApiCall) {}

    fn al_error(&mut self, error: u32) {}
    fn alc_error(&mut self, device: DeviceId, error: u32) {}

    fn device_state_changed_bool(&mut self, device: DeviceId, param: u32, value: bool) {}
    fn device_state_changed_int(&mut self, device: DeviceId, param: u32, value: i32) {}
    fn context_state_changed_enum(&mut self, context: ContextId, param: u32, value: u32) {}
    fn context_state_changed_float(&mut self, context: ContextId, param: u32, value: f32) {}
    fn context_state_changed_string(&mut self, context: ContextId, param: u32, value: &str) {}
    fn listener_state_changed_floatv(&mut self, context: ContextId, param: u32, values: &[f32]) {}
    fn source_state_changed_bool(&mut self, name: u32, param: u32, value: bool) {}
    fn source_state_changed_enum(&mut self, name: u32, param: u32, value: u32) {}
    fn source_state_changed_int(&mut self, name: u32, param: u32, value: i32) {}
    fn source_state_changed_uint(&mut self, name: u32, param: u32, value: u32) {}
    fn source_state_changed_float(&mut self, name: u32, param: u32, value: f32) {}
    fn source_state_changed_float3(&mut self, name: u32, param: u32, values: [f32; 3]) {}
    fn buffer_state_changed_int(&mut self, name: u32, param: u32, value: i32) {}

    /// End of stream. `okay` is false when decoding stopped early, whether
    /// from corrupt data or cancellation.
    fn eos(&mut self, okay: bool) {}

    /// Called once per record with (bytes consumed, total bytes). Return
    /// `false` to cancel.
    fn progress(&mut self, consumed: u64, total: u64) -> bool {
        true
    }
}

/// How a [`process_trace`](crate::process_trace) run ended.
#[derive(Debug, Clone)]
pub enum TraceStatus {
    /// The stream's `EOS` record was reached.
    Finished,
    /// The progress visitor asked to stop.
    Cancelled,
    Failed(DecodeError),
}

impl TraceStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, TraceStatus::Finished)
    }
}

enum Run {
    Finished,
    Cancelled,
}

pub(crate) struct TraceDecoder<'a> {
    r: RawData<'a>,
    symbols: FastHashMap<u64, Arc<str>>,
    thread_ids: FastHashMap<u64, u32>,
}

impl<'a> TraceDecoder<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        TraceDecoder {
            r: RawData::new(data),
            symbols: FastHashMap::default(),
            thread_ids: FastHashMap::default(),
        }
    }

    pub(crate) fn process<V: TraceVisitor>(data: &'a [u8], visitor: &mut V) -> TraceStatus {
        let mut decoder = TraceDecoder::new(data);
        match decoder.run(visitor) {
            Ok(Run::Finished) => {
                visitor.eos(true);
                TraceStatus::Finished
            }
            Ok(Run::Cancelled) => {
                visitor.eos(false);
                TraceStatus::Cancelled
            }
            Err(err) => {
                warn!("trace decoding failed: {err}");
                visitor.eos(false);
                TraceStatus::Failed(err)
            }
        }
    }

    fn run<V: TraceVisitor>(&mut self, visitor: &mut V) -> Result<Run, DecodeError> {
        self.read_header()?;

        loop {
            if !visitor.progress(self.r.position(), self.r.total_len()) {
                return Ok(Run::Cancelled);
            }

            let record_offset = self.r.position();
            let raw_tag = self.r.read_u16()?;
            let tag = EventTag::try_from(raw_tag).map_err(|_| DecodeError::UnknownTag {
                tag: raw_tag,
                offset: record_offset,
            })?;

            if tag.is_entry_point() {
                let caller = self.read_caller_info(record_offset)?;
                let call = ApiCall::read(tag, &mut self.r)?;
                visitor.api_call(&caller, tag, &call);
                continue;
            }

            match tag {
                EventTag::Eos => return Ok(Run::Finished),
                EventTag::NewCallstackSyms => self.read_callstack_syms()?,
                EventTag::AlErrorTriggered => {
                    let error = self.r.read_u32()?;
                    visitor.al_error(error);
                }
                EventTag::AlcErrorTriggered => {
                    let device = DeviceId(self.r.read_u64()?);
                    let error = self.r.read_u32()?;
                    visitor.alc_error(device, error);
                }
                EventTag::DeviceStateChangedBool => {
                    let device = DeviceId(self.r.read_u64()?);
                    let param = self.r.read_u32()?;
                    let value = self.r.read_bool()?;
                    visitor.device_state_changed_bool(device, param, value);
                }
                EventTag::DeviceStateChangedInt => {
                    let device = DeviceId(self.r.read_u64()?);
                    let param = self.r.read_u32()?;
                    let value = self.r.read_i32()?;
                    visitor.device_state_changed_int(device, param, value);
                }
                EventTag::ContextStateChangedEnum => {
                    let context = ContextId(self.r.read_u64()?);
                    let param = self.r.read_u32()?;
                    let value = self.r.read_u32()?;
                    visitor.context_state_changed_enum(context, param, value);
                }
                EventTag::ContextStateChangedFloat => {
                    let context = ContextId(self.r.read_u64()?);
                    let param = self.r.read_u32()?;
                    let value = self.r.read_f32()?;
                    visitor.context_state_changed_float(context, param, value);
                }
                EventTag::ContextStateChangedString => {
                    let context = ContextId(self.r.read_u64()?);
                    let param = self.r.read_u32()?;
                    let value = self.r.read_string()?;
                    visitor.context_state_changed_string(
                        context,
                        param,
                        value.as_deref().unwrap_or(""),
                    );
                }
                EventTag::ListenerStateChangedFloatv => {
                    let context = ContextId(self.r.read_u64()?);
                    let param = self.r.read_u32()?;
                    let numfloats = self.r.read_u32()?;
                    let values = self.r.read_f32_values(numfloats as usize)?;
                    visitor.listener_state_changed_floatv(context, param, &values);
                }
                EventTag::SourceStateChangedBool => {
                    let name = self.r.read_u32()?;
                    let param = self.r.read_u32()?;
                    let value = self.r.read_bool()?;
                    visitor.source_state_changed_bool(name, param, value);
                }
                EventTag::SourceStateChangedEnum => {
                    let name = self.r.read_u32()?;
                    let param = self.r.read_u32()?;
                    let value = self.r.read_u32()?;
                    visitor.source_state_changed_enum(name, param, value);
                }
                EventTag::SourceStateChangedInt => {
                    let name = self.r.read_u32()?;
                    let param = self.r.read_u32()?;
                    let value = self.r.read_i32()?;
                    visitor.source_state_changed_int(name, param, value);
                }
                EventTag::SourceStateChangedUint => {
                    let name = self.r.read_u32()?;
                    let param = self.r.read_u32()?;
                    let value = self.r.read_u32()?;
                    visitor.source_state_changed_uint(name, param, value);
                }
                EventTag::SourceStateChangedFloat => {
                    let name = self.r.read_u32()?;
                    let param = self.r.read_u32()?;
                    let value = self.r.read_f32()?;
                    visitor.source_state_changed_float(name, param, value);
                }
                EventTag::SourceStateChangedFloat3 => {
                    let name = self.r.read_u32()?;
                    let param = self.r.read_u32()?;
                    let values = [self.r.read_f32()?, self.r.read_f32()?, self.r.read_f32()?];
                    visitor.source_state_changed_float3(name, param, values);
                }
                EventTag::BufferStateChangedInt => {
                    let name = self.r.read_u32()?;
                    let param = self.r.read_u32()?;
                    let value = self.r.read_i32()?;
                    visitor.buffer_state_changed_int(name, param, value);
                }
                _ => unreachable!("entry points handled above"),
            }
        }
    }

    fn read_header(&mut self) -> Result<(), DecodeError> {
        let magic = self.r.read_u32()?;
        if magic != TRACE_MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }
        let version = self.r.read_u32()?;
        if version != TRACE_FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let appname_len = self.r.read_u32()?;
        let appname = self.r.read_u8_string(appname_len as usize)?;
        debug!("decoding trace recorded from {appname:?}");
        Ok(())
    }

    fn read_caller_info(&mut self, record_offset: u64) -> Result<CallerInfo, DecodeError> {
        let raw_thread_id = self.r.read_u64()?;
        let timestamp_ms = self.r.read_u32()?;
        let trace_scope = self.r.read_u32()?;
        let frame_count = self.r.read_u32()?;

        let mut frames = Vec::with_capacity(frame_count.min(256) as usize);
        for _ in 0..frame_count {
            let ip = self.r.read_u64()?;
            frames.push(CallstackFrame {
                ip,
                symbol: self.symbols.get(&ip).cloned(),
            });
        }

        let next_id = self.thread_ids.len() as u32 + 1;
        let thread_id = *self.thread_ids.entry(raw_thread_id).or_insert(next_id);

        Ok(CallerInfo {
            thread_id,
            timestamp_ms,
            trace_scope,
            frames,
            record_offset,
        })
    }

    /// Symbol mappings apply to every event from here on; later records may
    /// re-resolve an ip to a better name.
    fn read_callstack_syms(&mut self) -> Result<(), DecodeError> {
        let num_new_syms = self.r.read_u32()?;
        for _ in 0..num_new_syms {
            let ip = self.r.read_u64()?;
            let sym = self.r.read_string()?;
            if let Some(sym) = sym {
                self.symbols.insert(ip, Arc::from(sym.as_str()));
            }
        }
        Ok(())
    }
}
