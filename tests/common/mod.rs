//! Shared test support: a byte-level trace synthesizer and a visitor that
//! records everything it sees.

#![allow(dead_code)]

use altrace_playback::{
    ApiCall, CallerInfo, ContextId, DeviceId, EventTag, TraceVisitor, NULL_STRING_SENTINEL,
    TRACE_FORMAT_VERSION, TRACE_MAGIC,
};

/// Builds trace files the way the recording shim would: header first, then
/// records. Entry-point helpers write the fixed caller prefix from the
/// writer's current `thread_id` / `timestamp_ms` / `trace_scope` / `frames`
/// settings.
pub struct TraceWriter {
    pub bytes: Vec<u8>,
    pub thread_id: u64,
    pub timestamp_ms: u32,
    pub trace_scope: u32,
    pub frames: Vec<u64>,
}

impl TraceWriter {
    pub fn new() -> Self {
        Self::with_header(TRACE_MAGIC, TRACE_FORMAT_VERSION, "testapp")
    }

    pub fn with_header(magic: u32, version: u32, appname: &str) -> Self {
        let mut w = TraceWriter {
            bytes: Vec::new(),
            thread_id: 0xabcd,
            timestamp_ms: 0,
            trace_scope: 0,
            frames: Vec::new(),
        };
        w.u32(magic);
        w.u32(version);
        w.u32(appname.len() as u32);
        w.bytes.extend_from_slice(appname.as_bytes());
        w
    }

    /// Appends the EOS record and returns the finished trace.
    pub fn finish(mut self) -> Vec<u8> {
        self.tag(EventTag::Eos);
        self.bytes
    }

    /// The trace without an EOS record (for truncation tests).
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn u8(&mut self, v: u8) {
        self.bytes.push(v);
    }

    pub fn bool(&mut self, v: bool) {
        self.u8(v as u8);
    }

    pub fn u16(&mut self, v: u16) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    pub fn i32(&mut self, v: i32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u64(&mut self, v: u64) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    pub fn f32(&mut self, v: f32) {
        self.u32(v.to_bits());
    }

    pub fn f64(&mut self, v: f64) {
        self.u64(v.to_bits());
    }

    pub fn str_opt(&mut self, s: Option<&str>) {
        match s {
            None => self.u32(NULL_STRING_SENTINEL),
            Some(s) => {
                self.u32(s.len() as u32);
                self.bytes.extend_from_slice(s.as_bytes());
            }
        }
    }

    pub fn tag(&mut self, tag: EventTag) {
        self.u16(u16::from(tag));
    }

    /// Writes the tag and the entry-point caller prefix; the caller of this
    /// method appends the tag-specific fields.
    pub fn begin_call(&mut self, tag: EventTag) {
        self.tag(tag);
        self.u64(self.thread_id);
        self.u32(self.timestamp_ms);
        self.u32(self.trace_scope);
        self.u32(self.frames.len() as u32);
        for ip in self.frames.clone() {
            self.u64(ip);
        }
    }

    // Entry points used by the scenario tests.

    pub fn open_device(&mut self, retval: u64, name: Option<&str>) {
        self.begin_call(EventTag::AlcOpenDevice);
        self.u64(retval);
        self.str_opt(name);
        self.i32(1);
        self.i32(1);
        self.str_opt(Some("Test Output Device"));
        self.str_opt(Some("ALC_EXT_disconnect"));
    }

    pub fn close_device(&mut self, device: u64, retval: bool) {
        self.begin_call(EventTag::AlcCloseDevice);
        self.bool(retval);
        self.u64(device);
    }

    pub fn capture_open_device(
        &mut self,
        retval: u64,
        name: Option<&str>,
        frequency: u32,
        format: u32,
        buffersize: i32,
    ) {
        self.begin_call(EventTag::AlcCaptureOpenDevice);
        self.u64(retval);
        self.str_opt(name);
        self.u32(frequency);
        self.u32(format);
        self.i32(buffersize);
        self.i32(1);
        self.i32(1);
        self.str_opt(Some("Test Capture Device"));
        self.str_opt(Some(""));
    }

    pub fn create_context(&mut self, retval: u64, device: u64, attrs: &[i32]) {
        self.begin_call(EventTag::AlcCreateContext);
        self.u64(retval);
        self.u64(device);
        self.u64(if attrs.is_empty() { 0 } else { 0xa77a });
        self.u32(attrs.len() as u32);
        for &attr in attrs {
            self.i32(attr);
        }
    }

    pub fn make_current(&mut self, context: u64, retval: bool) {
        self.begin_call(EventTag::AlcMakeContextCurrent);
        self.bool(retval);
        self.u64(context);
    }

    pub fn process_context(&mut self, context: u64) {
        self.begin_call(EventTag::AlcProcessContext);
        self.u64(context);
    }

    pub fn suspend_context(&mut self, context: u64) {
        self.begin_call(EventTag::AlcSuspendContext);
        self.u64(context);
    }

    pub fn destroy_context(&mut self, context: u64) {
        self.begin_call(EventTag::AlcDestroyContext);
        self.u64(context);
    }

    pub fn alc_get_error(&mut self, device: u64, retval: u32) {
        self.begin_call(EventTag::AlcGetError);
        self.u32(retval);
        self.u64(device);
    }

    pub fn al_get_error(&mut self, retval: u32) {
        self.begin_call(EventTag::AlGetError);
        self.u32(retval);
    }

    pub fn gen_sources(&mut self, names: &[u32]) {
        self.begin_call(EventTag::AlGenSources);
        self.i32(names.len() as i32);
        self.u64(0xbeef);
        for &name in names {
            self.u32(name);
        }
    }

    pub fn delete_sources(&mut self, names: &[u32]) {
        self.begin_call(EventTag::AlDeleteSources);
        self.i32(names.len() as i32);
        self.u64(0xbeef);
        for &name in names {
            self.u32(name);
        }
    }

    pub fn source_f(&mut self, name: u32, param: u32, value: f32) {
        self.begin_call(EventTag::AlSourcef);
        self.u32(name);
        self.u32(param);
        self.f32(value);
    }

    pub fn source_i(&mut self, name: u32, param: u32, value: i32) {
        self.begin_call(EventTag::AlSourcei);
        self.u32(name);
        self.u32(param);
        self.i32(value);
    }

    pub fn source_play(&mut self, name: u32) {
        self.begin_call(EventTag::AlSourcePlay);
        self.u32(name);
    }

    pub fn gen_buffers(&mut self, names: &[u32]) {
        self.begin_call(EventTag::AlGenBuffers);
        self.i32(names.len() as i32);
        self.u64(0xbeef);
        for &name in names {
            self.u32(name);
        }
    }

    /// Returns the file offset of the PCM payload.
    pub fn buffer_data(&mut self, name: u32, format: u32, payload: &[u8], freq: i32) -> u64 {
        self.begin_call(EventTag::AlBufferData);
        self.u32(name);
        self.u32(format);
        self.u64(0xdada);
        self.u32(payload.len() as u32);
        let offset = self.bytes.len() as u64;
        self.bytes.extend_from_slice(payload);
        self.i32(freq);
        offset
    }

    pub fn capture_start(&mut self, device: u64) {
        self.begin_call(EventTag::AlcCaptureStart);
        self.u64(device);
    }

    pub fn capture_stop(&mut self, device: u64) {
        self.begin_call(EventTag::AlcCaptureStop);
        self.u64(device);
    }

    /// Returns the file offset of the PCM payload.
    pub fn capture_samples(
        &mut self,
        device: u64,
        origbuffer: u64,
        payload: &[u8],
        samples: i32,
    ) -> u64 {
        self.begin_call(EventTag::AlcCaptureSamples);
        self.u64(device);
        self.u64(origbuffer);
        self.u32(payload.len() as u32);
        let offset = self.bytes.len() as u64;
        self.bytes.extend_from_slice(payload);
        self.i32(samples);
        offset
    }

    pub fn push_scope(&mut self, name: &str) {
        self.begin_call(EventTag::AlTracePushScope);
        self.str_opt(Some(name));
    }

    pub fn pop_scope(&mut self) {
        self.begin_call(EventTag::AlTracePopScope);
    }

    pub fn source_label(&mut self, name: u32, label: &str) {
        self.begin_call(EventTag::AlTraceSourceLabel);
        self.u32(name);
        self.str_opt(Some(label));
    }

    pub fn device_label(&mut self, device: u64, label: &str) {
        self.begin_call(EventTag::AlcTraceDeviceLabel);
        self.u64(device);
        self.str_opt(Some(label));
    }

    // Meta events.

    pub fn al_error(&mut self, error: u32) {
        self.tag(EventTag::AlErrorTriggered);
        self.u32(error);
    }

    pub fn alc_error(&mut self, device: u64, error: u32) {
        self.tag(EventTag::AlcErrorTriggered);
        self.u64(device);
        self.u32(error);
    }

    pub fn new_callstack_syms(&mut self, syms: &[(u64, &str)]) {
        self.tag(EventTag::NewCallstackSyms);
        self.u32(syms.len() as u32);
        for &(ip, sym) in syms {
            self.u64(ip);
            self.str_opt(Some(sym));
        }
    }

    pub fn device_state_changed_int(&mut self, device: u64, param: u32, value: i32) {
        self.tag(EventTag::DeviceStateChangedInt);
        self.u64(device);
        self.u32(param);
        self.i32(value);
    }

    pub fn context_state_changed_enum(&mut self, context: u64, param: u32, value: u32) {
        self.tag(EventTag::ContextStateChangedEnum);
        self.u64(context);
        self.u32(param);
        self.u32(value);
    }

    pub fn context_state_changed_float(&mut self, context: u64, param: u32, value: f32) {
        self.tag(EventTag::ContextStateChangedFloat);
        self.u64(context);
        self.u32(param);
        self.f32(value);
    }

    pub fn context_state_changed_string(&mut self, context: u64, param: u32, value: &str) {
        self.tag(EventTag::ContextStateChangedString);
        self.u64(context);
        self.u32(param);
        self.str_opt(Some(value));
    }

    pub fn listener_state_changed_floatv(&mut self, context: u64, param: u32, values: &[f32]) {
        self.tag(EventTag::ListenerStateChangedFloatv);
        self.u64(context);
        self.u32(param);
        self.u32(values.len() as u32);
        for &v in values {
            self.f32(v);
        }
    }

    pub fn source_state_changed_enum(&mut self, name: u32, param: u32, value: u32) {
        self.tag(EventTag::SourceStateChangedEnum);
        self.u32(name);
        self.u32(param);
        self.u32(value);
    }

    pub fn source_state_changed_float(&mut self, name: u32, param: u32, value: f32) {
        self.tag(EventTag::SourceStateChangedFloat);
        self.u32(name);
        self.u32(param);
        self.f32(value);
    }

    pub fn source_state_changed_float3(&mut self, name: u32, param: u32, values: [f32; 3]) {
        self.tag(EventTag::SourceStateChangedFloat3);
        self.u32(name);
        self.u32(param);
        for v in values {
            self.f32(v);
        }
    }

    pub fn buffer_state_changed_int(&mut self, name: u32, param: u32, value: i32) {
        self.tag(EventTag::BufferStateChangedInt);
        self.u32(name);
        self.u32(param);
        self.i32(value);
    }
}

/// Everything a [`CollectingVisitor`] can observe, in dispatch order.
#[derive(Debug, Clone, PartialEq)]
pub enum Seen {
    Call {
        tag: EventTag,
        call: ApiCall,
        thread_id: u32,
        timestamp_ms: u32,
        trace_scope: u32,
        frames: Vec<(u64, Option<String>)>,
    },
    AlError(u32),
    AlcError(u64, u32),
    DeviceBool(u64, u32, bool),
    DeviceInt(u64, u32, i32),
    CtxEnum(u64, u32, u32),
    CtxFloat(u64, u32, f32),
    CtxString(u64, u32, String),
    ListenerFloatv(u64, u32, Vec<f32>),
    SourceBool(u32, u32, bool),
    SourceEnum(u32, u32, u32),
    SourceInt(u32, u32, i32),
    SourceUint(u32, u32, u32),
    SourceFloat(u32, u32, f32),
    SourceFloat3(u32, u32, [f32; 3]),
    BufferInt(u32, u32, i32),
    Eos(bool),
}

#[derive(Default)]
pub struct CollectingVisitor {
    pub seen: Vec<Seen>,
    /// Cancel (return false from `progress`) once this many progress
    /// callbacks have happened.
    pub cancel_after_progress: Option<usize>,
    pub progress_calls: usize,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Default::default()
    }

    /// The events seen, minus the trailing EOS marker.
    pub fn events(&self) -> &[Seen] {
        match self.seen.last() {
            Some(Seen::Eos(_)) => &self.seen[..self.seen.len() - 1],
            _ => &self.seen,
        }
    }
}

impl TraceVisitor for CollectingVisitor {
    fn api_call(&mut self, caller: &CallerInfo, tag: EventTag, call: &ApiCall) {
        self.seen.push(Seen::Call {
            tag,
            call: call.clone(),
            thread_id: caller.thread_id,
            timestamp_ms: caller.timestamp_ms,
            trace_scope: caller.trace_scope,
            frames: caller
                .frames
                .iter()
                .map(|f| (f.ip, f.symbol.as_deref().map(str::to_string)))
                .collect(),
        });
    }

    fn al_error(&mut self, error: u32) {
        self.seen.push(Seen::AlError(error));
    }

    fn alc_error(&mut self, device: DeviceId, error: u32) {
        self.seen.push(Seen::AlcError(device.0, error));
    }

    fn device_state_changed_bool(&mut self, device: DeviceId, param: u32, value: bool) {
        self.seen.push(Seen::DeviceBool(device.0, param, value));
    }

    fn device_state_changed_int(&mut self, device: DeviceId, param: u32, value: i32) {
        self.seen.push(Seen::DeviceInt(device.0, param, value));
    }

    fn context_state_changed_enum(&mut self, context: ContextId, param: u32, value: u32) {
        self.seen.push(Seen::CtxEnum(context.0, param, value));
    }

    fn context_state_changed_float(&mut self, context: ContextId, param: u32, value: f32) {
        self.seen.push(Seen::CtxFloat(context.0, param, value));
    }

    fn context_state_changed_string(&mut self, context: ContextId, param: u32, value: &str) {
        self.seen
            .push(Seen::CtxString(context.0, param, value.to_string()));
    }

    fn listener_state_changed_floatv(&mut self, context: ContextId, param: u32, values: &[f32]) {
        self.seen
            .push(Seen::ListenerFloatv(context.0, param, values.to_vec()));
    }

    fn source_state_changed_bool(&mut self, name: u32, param: u32, value: bool) {
        self.seen.push(Seen::SourceBool(name, param, value));
    }

    fn source_state_changed_enum(&mut self, name: u32, param: u32, value: u32) {
        self.seen.push(Seen::SourceEnum(name, param, value));
    }

    fn source_state_changed_int(&mut self, name: u32, param: u32, value: i32) {
        self.seen.push(Seen::SourceInt(name, param, value));
    }

    fn source_state_changed_uint(&mut self, name: u32, param: u32, value: u32) {
        self.seen.push(Seen::SourceUint(name, param, value));
    }

    fn source_state_changed_float(&mut self, name: u32, param: u32, value: f32) {
        self.seen.push(Seen::SourceFloat(name, param, value));
    }

    fn source_state_changed_float3(&mut self, name: u32, param: u32, values: [f32; 3]) {
        self.seen.push(Seen::SourceFloat3(name, param, values));
    }

    fn buffer_state_changed_int(&mut self, name: u32, param: u32, value: i32) {
        self.seen.push(Seen::BufferInt(name, param, value));
    }

    fn eos(&mut self, okay: bool) {
        self.seen.push(Seen::Eos(okay));
    }

    fn progress(&mut self, _consumed: u64, _total: u64) -> bool {
        self.progress_calls += 1;
        match self.cancel_after_progress {
            Some(limit) => self.progress_calls <= limit,
            None => true,
        }
    }
}
