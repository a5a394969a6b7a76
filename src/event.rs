//! Event tags and typed payloads for every record in a trace log.
//!
//! The tag space mirrors the recorder: a block of meta tags first (end of
//! stream, error triggers, callstack symbols, recorder-observed state
//! changes), then one tag per traced AL/ALC entry point. Entry-point
//! payloads carry the return value(s) first and then the arguments, in the
//! order the recorder's visitor signatures declare them.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::DecodeError;
use crate::raw_data::{BlobRef, RawData};

/// A recorded program's opaque `ALCdevice *`. Never dereferenced; equality
/// is identity. The null device is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u64);

impl DeviceId {
    pub const NULL: DeviceId = DeviceId(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// A recorded program's opaque `ALCcontext *`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(pub u64);

impl ContextId {
    pub const NULL: ContextId = ContextId(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum EventTag {
    Eos = 0,
    AlErrorTriggered,
    AlcErrorTriggered,
    NewCallstackSyms,
    DeviceStateChangedBool,
    DeviceStateChangedInt,
    ContextStateChangedEnum,
    ContextStateChangedFloat,
    ContextStateChangedString,
    ListenerStateChangedFloatv,
    SourceStateChangedBool,
    SourceStateChangedEnum,
    SourceStateChangedInt,
    SourceStateChangedUint,
    SourceStateChangedFloat,
    SourceStateChangedFloat3,
    BufferStateChangedInt,

    AlcGetCurrentContext,
    AlcGetContextsDevice,
    AlcIsExtensionPresent,
    AlcGetProcAddress,
    AlcGetEnumValue,
    AlcGetString,
    AlcCaptureOpenDevice,
    AlcCaptureCloseDevice,
    AlcOpenDevice,
    AlcCloseDevice,
    AlcCreateContext,
    AlcMakeContextCurrent,
    AlcProcessContext,
    AlcSuspendContext,
    AlcDestroyContext,
    AlcGetError,
    AlcGetIntegerv,
    AlcCaptureStart,
    AlcCaptureStop,
    AlcCaptureSamples,

    AlDopplerFactor,
    AlDopplerVelocity,
    AlSpeedOfSound,
    AlDistanceModel,
    AlEnable,
    AlDisable,
    AlIsEnabled,
    AlGetString,
    AlGetBooleanv,
    AlGetIntegerv,
    AlGetFloatv,
    AlGetDoublev,
    AlGetBoolean,
    AlGetInteger,
    AlGetFloat,
    AlGetDouble,
    AlIsExtensionPresent,
    AlGetError,
    AlGetProcAddress,
    AlGetEnumValue,
    AlListenerfv,
    AlListenerf,
    AlListener3f,
    AlListeneriv,
    AlListeneri,
    AlListener3i,
    AlGetListenerfv,
    AlGetListenerf,
    AlGetListener3f,
    AlGetListeneri,
    AlGetListeneriv,
    AlGetListener3i,
    AlGenSources,
    AlDeleteSources,
    AlIsSource,
    AlSourcefv,
    AlSourcef,
    AlSource3f,
    AlSourceiv,
    AlSourcei,
    AlSource3i,
    AlGetSourcefv,
    AlGetSourcef,
    AlGetSource3f,
    AlGetSourceiv,
    AlGetSourcei,
    AlGetSource3i,
    AlSourcePlay,
    AlSourcePlayv,
    AlSourcePause,
    AlSourcePausev,
    AlSourceRewind,
    AlSourceRewindv,
    AlSourceStop,
    AlSourceStopv,
    AlSourceQueueBuffers,
    AlSourceUnqueueBuffers,
    AlGenBuffers,
    AlDeleteBuffers,
    AlIsBuffer,
    AlBufferData,
    AlBufferfv,
    AlBufferf,
    AlBuffer3f,
    AlBufferiv,
    AlBufferi,
    AlBuffer3i,
    AlGetBufferfv,
    AlGetBufferf,
    AlGetBuffer3f,
    AlGetBufferi,
    AlGetBuffer3i,
    AlGetBufferiv,

    AlTracePushScope,
    AlTracePopScope,
    AlTraceMessage,
    AlTraceBufferLabel,
    AlTraceSourceLabel,
    AlcTraceDeviceLabel,
    AlcTraceContextLabel,
}

impl EventTag {
    pub fn is_entry_point(self) -> bool {
        u16::from(self) >= u16::from(EventTag::AlcGetCurrentContext)
    }

    /// The entry-point function name, or the meta event's symbolic name.
    pub fn name(self) -> &'static str {
        use EventTag::*;
        match self {
            Eos => "EOS",
            AlErrorTriggered => "AL_ERROR_TRIGGERED",
            AlcErrorTriggered => "ALC_ERROR_TRIGGERED",
            NewCallstackSyms => "NEW_CALLSTACK_SYMS",
            DeviceStateChangedBool => "DEVICE_STATE_CHANGED_BOOL",
            DeviceStateChangedInt => "DEVICE_STATE_CHANGED_INT",
            ContextStateChangedEnum => "CONTEXT_STATE_CHANGED_ENUM",
            ContextStateChangedFloat => "CONTEXT_STATE_CHANGED_FLOAT",
            ContextStateChangedString => "CONTEXT_STATE_CHANGED_STRING",
            ListenerStateChangedFloatv => "LISTENER_STATE_CHANGED_FLOATV",
            SourceStateChangedBool => "SOURCE_STATE_CHANGED_BOOL",
            SourceStateChangedEnum => "SOURCE_STATE_CHANGED_ENUM",
            SourceStateChangedInt => "SOURCE_STATE_CHANGED_INT",
            SourceStateChangedUint => "SOURCE_STATE_CHANGED_UINT",
            SourceStateChangedFloat => "SOURCE_STATE_CHANGED_FLOAT",
            SourceStateChangedFloat3 => "SOURCE_STATE_CHANGED_FLOAT3",
            BufferStateChangedInt => "BUFFER_STATE_CHANGED_INT",
            AlcGetCurrentContext => "alcGetCurrentContext",
            AlcGetContextsDevice => "alcGetContextsDevice",
            AlcIsExtensionPresent => "alcIsExtensionPresent",
            AlcGetProcAddress => "alcGetProcAddress",
            AlcGetEnumValue => "alcGetEnumValue",
            AlcGetString => "alcGetString",
            AlcCaptureOpenDevice => "alcCaptureOpenDevice",
            AlcCaptureCloseDevice => "alcCaptureCloseDevice",
            AlcOpenDevice => "alcOpenDevice",
            AlcCloseDevice => "alcCloseDevice",
            AlcCreateContext => "alcCreateContext",
            AlcMakeContextCurrent => "alcMakeContextCurrent",
            AlcProcessContext => "alcProcessContext",
            AlcSuspendContext => "alcSuspendContext",
            AlcDestroyContext => "alcDestroyContext",
            AlcGetError => "alcGetError",
            AlcGetIntegerv => "alcGetIntegerv",
            AlcCaptureStart => "alcCaptureStart",
            AlcCaptureStop => "alcCaptureStop",
            AlcCaptureSamples => "alcCaptureSamples",
            AlDopplerFactor => "alDopplerFactor",
            AlDopplerVelocity => "alDopplerVelocity",
            AlSpeedOfSound => "alSpeedOfSound",
            AlDistanceModel => "alDistanceModel",
            AlEnable => "alEnable",
            AlDisable => "alDisable",
            AlIsEnabled => "alIsEnabled",
            AlGetString => "alGetString",
            AlGetBooleanv => "alGetBooleanv",
            AlGetIntegerv => "alGetIntegerv",
            AlGetFloatv => "alGetFloatv",
            AlGetDoublev => "alGetDoublev",
            AlGetBoolean => "alGetBoolean",
            AlGetInteger => "alGetInteger",
            AlGetFloat => "alGetFloat",
            AlGetDouble => "alGetDouble",
            AlIsExtensionPresent => "alIsExtensionPresent",
            AlGetError => "alGetError",
            AlGetProcAddress => "alGetProcAddress",
            AlGetEnumValue => "alGetEnumValue",
            AlListenerfv => "alListenerfv",
            AlListenerf => "alListenerf",
            AlListener3f => "alListener3f",
            AlListeneriv => "alListeneriv",
            AlListeneri => "alListeneri",
            AlListener3i => "alListener3i",
            AlGetListenerfv => "alGetListenerfv",
            AlGetListenerf => "alGetListenerf",
            AlGetListener3f => "alGetListener3f",
            AlGetListeneri => "alGetListeneri",
            AlGetListeneriv => "alGetListeneriv",
            AlGetListener3i => "alGetListener3i",
            AlGenSources => "alGenSources",
            AlDeleteSources => "alDeleteSources",
            AlIsSource => "alIsSource",
            AlSourcefv => "alSourcefv",
            AlSourcef => "alSourcef",
            AlSource3f => "alSource3f",
            AlSourceiv => "alSourceiv",
            AlSourcei => "alSourcei",
            AlSource3i => "alSource3i",
            AlGetSourcefv => "alGetSourcefv",
            AlGetSourcef => "alGetSourcef",
            AlGetSource3f => "alGetSource3f",
            AlGetSourceiv => "alGetSourceiv",
            AlGetSourcei => "alGetSourcei",
            AlGetSource3i => "alGetSource3i",
            AlSourcePlay => "alSourcePlay",
            AlSourcePlayv => "alSourcePlayv",
            AlSourcePause => "alSourcePause",
            AlSourcePausev => "alSourcePausev",
            AlSourceRewind => "alSourceRewind",
            AlSourceRewindv => "alSourceRewindv",
            AlSourceStop => "alSourceStop",
            AlSourceStopv => "alSourceStopv",
            AlSourceQueueBuffers => "alSourceQueueBuffers",
            AlSourceUnqueueBuffers => "alSourceUnqueueBuffers",
            AlGenBuffers => "alGenBuffers",
            AlDeleteBuffers => "alDeleteBuffers",
            AlIsBuffer => "alIsBuffer",
            AlBufferData => "alBufferData",
            AlBufferfv => "alBufferfv",
            AlBufferf => "alBufferf",
            AlBuffer3f => "alBuffer3f",
            AlBufferiv => "alBufferiv",
            AlBufferi => "alBufferi",
            AlBuffer3i => "alBuffer3i",
            AlGetBufferfv => "alGetBufferfv",
            AlGetBufferf => "alGetBufferf",
            AlGetBuffer3f => "alGetBuffer3f",
            AlGetBufferi => "alGetBufferi",
            AlGetBuffer3i => "alGetBuffer3i",
            AlGetBufferiv => "alGetBufferiv",
            AlTracePushScope => "alTracePushScope",
            AlTracePopScope => "alTracePopScope",
            AlTraceMessage => "alTraceMessage",
            AlTraceBufferLabel => "alTraceBufferLabel",
            AlTraceSourceLabel => "alTraceSourceLabel",
            AlcTraceDeviceLabel => "alcTraceDeviceLabel",
            AlcTraceContextLabel => "alcTraceContextLabel",
        }
    }
}

/// One decoded entry-point event, with the recorder's field layout mapped
/// onto typed Rust fields. `orig*` fields are the pointers the recorded
/// program passed in, kept for display; the sibling vectors hold the values
/// the recorder captured through those pointers.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    AlcGetCurrentContext { retval: ContextId },
    AlcGetContextsDevice { retval: DeviceId, context: ContextId },
    AlcIsExtensionPresent { retval: bool, device: DeviceId, extname: Option<String> },
    AlcGetProcAddress { retval: u64, device: DeviceId, funcname: Option<String> },
    AlcGetEnumValue { retval: u32, device: DeviceId, enumname: Option<String> },
    AlcGetString { retval: Option<String>, device: DeviceId, param: u32 },
    AlcCaptureOpenDevice {
        retval: DeviceId,
        devicename: Option<String>,
        frequency: u32,
        format: u32,
        buffersize: i32,
        major_version: i32,
        minor_version: i32,
        devspec: Option<String>,
        extensions: Option<String>,
    },
    AlcCaptureCloseDevice { retval: bool, device: DeviceId },
    AlcOpenDevice {
        retval: DeviceId,
        devicename: Option<String>,
        major_version: i32,
        minor_version: i32,
        devspec: Option<String>,
        extensions: Option<String>,
    },
    AlcCloseDevice { retval: bool, device: DeviceId },
    AlcCreateContext {
        retval: ContextId,
        device: DeviceId,
        origattrlist: u64,
        attrcount: u32,
        attrlist: Vec<i32>,
    },
    AlcMakeContextCurrent { retval: bool, context: ContextId },
    AlcProcessContext { context: ContextId },
    AlcSuspendContext { context: ContextId },
    AlcDestroyContext { context: ContextId },
    AlcGetError { retval: u32, device: DeviceId },
    AlcGetIntegerv {
        device: DeviceId,
        param: u32,
        size: i32,
        origvalues: u64,
        is_bool: bool,
        values: Vec<i32>,
    },
    AlcCaptureStart { device: DeviceId },
    AlcCaptureStop { device: DeviceId },
    AlcCaptureSamples { device: DeviceId, origbuffer: u64, buffer: BlobRef, samples: i32 },

    AlDopplerFactor { value: f32 },
    AlDopplerVelocity { value: f32 },
    AlSpeedOfSound { value: f32 },
    AlDistanceModel { model: u32 },
    AlEnable { capability: u32 },
    AlDisable { capability: u32 },
    AlIsEnabled { retval: bool, capability: u32 },
    AlGetString { retval: Option<String>, param: u32 },
    AlGetBooleanv { param: u32, origvalues: u64, numvals: u32, values: Vec<bool> },
    AlGetIntegerv { param: u32, origvalues: u64, numvals: u32, is_enum: bool, values: Vec<i32> },
    AlGetFloatv { param: u32, origvalues: u64, numvals: u32, values: Vec<f32> },
    AlGetDoublev { param: u32, origvalues: u64, numvals: u32, values: Vec<f64> },
    AlGetBoolean { retval: bool, param: u32 },
    AlGetInteger { retval: i32, param: u32 },
    AlGetFloat { retval: f32, param: u32 },
    AlGetDouble { retval: f64, param: u32 },
    AlIsExtensionPresent { retval: bool, extname: Option<String> },
    AlGetError { retval: u32 },
    AlGetProcAddress { retval: u64, funcname: Option<String> },
    AlGetEnumValue { retval: u32, enumname: Option<String> },
    AlListenerfv { param: u32, origvalues: u64, numvals: u32, values: Vec<f32> },
    AlListenerf { param: u32, value: f32 },
    AlListener3f { param: u32, value1: f32, value2: f32, value3: f32 },
    AlListeneriv { param: u32, origvalues: u64, numvals: u32, values: Vec<i32> },
    AlListeneri { param: u32, value: i32 },
    AlListener3i { param: u32, value1: i32, value2: i32, value3: i32 },
    AlGetListenerfv { param: u32, origvalues: u64, numvals: u32, values: Vec<f32> },
    AlGetListenerf { param: u32, origvalue: u64, value: f32 },
    AlGetListener3f {
        param: u32,
        origvalue1: u64,
        origvalue2: u64,
        origvalue3: u64,
        value1: f32,
        value2: f32,
        value3: f32,
    },
    AlGetListeneri { param: u32, origvalue: u64, value: i32 },
    AlGetListeneriv { param: u32, origvalues: u64, numvals: u32, values: Vec<i32> },
    AlGetListener3i {
        param: u32,
        origvalue1: u64,
        origvalue2: u64,
        origvalue3: u64,
        value1: i32,
        value2: i32,
        value3: i32,
    },
    AlGenSources { n: i32, orignames: u64, names: Vec<u32> },
    AlDeleteSources { n: i32, orignames: u64, names: Vec<u32> },
    AlIsSource { retval: bool, name: u32 },
    AlSourcefv { name: u32, param: u32, origvalues: u64, numvals: u32, values: Vec<f32> },
    AlSourcef { name: u32, param: u32, value: f32 },
    AlSource3f { name: u32, param: u32, value1: f32, value2: f32, value3: f32 },
    AlSourceiv { name: u32, param: u32, origvalues: u64, numvals: u32, values: Vec<i32> },
    AlSourcei { name: u32, param: u32, value: i32 },
    AlSource3i { name: u32, param: u32, value1: i32, value2: i32, value3: i32 },
    AlGetSourcefv { name: u32, param: u32, origvalues: u64, numvals: u32, values: Vec<f32> },
    AlGetSourcef { name: u32, param: u32, origvalue: u64, value: f32 },
    AlGetSource3f {
        name: u32,
        param: u32,
        origvalue1: u64,
        origvalue2: u64,
        origvalue3: u64,
        value1: f32,
        value2: f32,
        value3: f32,
    },
    AlGetSourceiv {
        name: u32,
        param: u32,
        is_enum: bool,
        origvalues: u64,
        numvals: u32,
        values: Vec<i32>,
    },
    AlGetSourcei { name: u32, param: u32, is_enum: bool, origvalue: u64, value: i32 },
    AlGetSource3i {
        name: u32,
        param: u32,
        origvalue1: u64,
        origvalue2: u64,
        origvalue3: u64,
        value1: i32,
        value2: i32,
        value3: i32,
    },
    AlSourcePlay { name: u32 },
    AlSourcePlayv { n: i32, orignames: u64, names: Vec<u32> },
    AlSourcePause { name: u32 },
    AlSourcePausev { n: i32, orignames: u64, names: Vec<u32> },
    AlSourceRewind { name: u32 },
    AlSourceRewindv { n: i32, orignames: u64, names: Vec<u32> },
    AlSourceStop { name: u32 },
    AlSourceStopv { n: i32, orignames: u64, names: Vec<u32> },
    AlSourceQueueBuffers { name: u32, nb: i32, origbufnames: u64, bufnames: Vec<u32> },
    AlSourceUnqueueBuffers { name: u32, nb: i32, origbufnames: u64, bufnames: Vec<u32> },
    AlGenBuffers { n: i32, orignames: u64, names: Vec<u32> },
    AlDeleteBuffers { n: i32, orignames: u64, names: Vec<u32> },
    AlIsBuffer { retval: bool, name: u32 },
    AlBufferData { name: u32, format: u32, origdata: u64, data: BlobRef, freq: i32 },
    AlBufferfv { name: u32, param: u32, origvalues: u64, numvals: u32, values: Vec<f32> },
    AlBufferf { name: u32, param: u32, value: f32 },
    AlBuffer3f { name: u32, param: u32, value1: f32, value2: f32, value3: f32 },
    AlBufferiv { name: u32, param: u32, origvalues: u64, numvals: u32, values: Vec<i32> },
    AlBufferi { name: u32, param: u32, value: i32 },
    AlBuffer3i { name: u32, param: u32, value1: i32, value2: i32, value3: i32 },
    AlGetBufferfv { name: u32, param: u32, origvalues: u64, numvals: u32, values: Vec<f32> },
    AlGetBufferf { name: u32, param: u32, origvalue: u64, value: f32 },
    AlGetBuffer3f {
        name: u32,
        param: u32,
        origvalue1: u64,
        origvalue2: u64,
        origvalue3: u64,
        value1: f32,
        value2: f32,
        value3: f32,
    },
    AlGetBufferi { name: u32, param: u32, origvalue: u64, value: i32 },
    AlGetBuffer3i {
        name: u32,
        param: u32,
        origvalue1: u64,
        origvalue2: u64,
        origvalue3: u64,
        value1: i32,
        value2: i32,
        value3: i32,
    },
    AlGetBufferiv { name: u32, param: u32, origvalues: u64, numvals: u32, values: Vec<i32> },

    AlTracePushScope { name: Option<String> },
    AlTracePopScope,
    AlTraceMessage { message: Option<String> },
    AlTraceBufferLabel { name: u32, label: Option<String> },
    AlTraceSourceLabel { name: u32, label: Option<String> },
    AlcTraceDeviceLabel { device: DeviceId, label: Option<String> },
    AlcTraceContextLabel { context: ContextId, label: Option<String> },
}

fn count(n: i32) -> usize {
    n.max(0) as usize
}

impl ApiCall {
    /// Decodes the tag-specific portion of an entry-point record. The
    /// caller has already consumed the fixed prefix (thread id, timestamp,
    /// scope, callstack).
    pub(crate) fn read(tag: EventTag, r: &mut RawData) -> Result<ApiCall, DecodeError> {
        use EventTag as T;
        let call = match tag {
            T::AlcGetCurrentContext => ApiCall::AlcGetCurrentContext {
                retval: ContextId(r.read_u64()?),
            },
            T::AlcGetContextsDevice => ApiCall::AlcGetContextsDevice {
                retval: DeviceId(r.read_u64()?),
                context: ContextId(r.read_u64()?),
            },
            T::AlcIsExtensionPresent => ApiCall::AlcIsExtensionPresent {
                retval: r.read_bool()?,
                device: DeviceId(r.read_u64()?),
                extname: r.read_string()?,
            },
            T::AlcGetProcAddress => ApiCall::AlcGetProcAddress {
                retval: r.read_u64()?,
                device: DeviceId(r.read_u64()?),
                funcname: r.read_string()?,
            },
            T::AlcGetEnumValue => ApiCall::AlcGetEnumValue {
                retval: r.read_u32()?,
                device: DeviceId(r.read_u64()?),
                enumname: r.read_string()?,
            },
            T::AlcGetString => ApiCall::AlcGetString {
                retval: r.read_string()?,
                device: DeviceId(r.read_u64()?),
                param: r.read_u32()?,
            },
            T::AlcCaptureOpenDevice => ApiCall::AlcCaptureOpenDevice {
                retval: DeviceId(r.read_u64()?),
                devicename: r.read_string()?,
                frequency: r.read_u32()?,
                format: r.read_u32()?,
                buffersize: r.read_i32()?,
                major_version: r.read_i32()?,
                minor_version: r.read_i32()?,
                devspec: r.read_string()?,
                extensions: r.read_string()?,
            },
            T::AlcCaptureCloseDevice => ApiCall::AlcCaptureCloseDevice {
                retval: r.read_bool()?,
                device: DeviceId(r.read_u64()?),
            },
            T::AlcOpenDevice => ApiCall::AlcOpenDevice {
                retval: DeviceId(r.read_u64()?),
                devicename: r.read_string()?,
                major_version: r.read_i32()?,
                minor_version: r.read_i32()?,
                devspec: r.read_string()?,
                extensions: r.read_string()?,
            },
            T::AlcCloseDevice => ApiCall::AlcCloseDevice {
                retval: r.read_bool()?,
                device: DeviceId(r.read_u64()?),
            },
            T::AlcCreateContext => {
                let retval = ContextId(r.read_u64()?);
                let device = DeviceId(r.read_u64()?);
                let origattrlist = r.read_u64()?;
                let attrcount = r.read_u32()?;
                let attrlist = r.read_i32_values(attrcount as usize)?;
                ApiCall::AlcCreateContext {
                    retval,
                    device,
                    origattrlist,
                    attrcount,
                    attrlist,
                }
            }
            T::AlcMakeContextCurrent => ApiCall::AlcMakeContextCurrent {
                retval: r.read_bool()?,
                context: ContextId(r.read_u64()?),
            },
            T::AlcProcessContext => ApiCall::AlcProcessContext {
                context: ContextId(r.read_u64()?),
            },
            T::AlcSuspendContext => ApiCall::AlcSuspendContext {
                context: ContextId(r.read_u64()?),
            },
            T::AlcDestroyContext => ApiCall::AlcDestroyContext {
                context: ContextId(r.read_u64()?),
            },
            T::AlcGetError => ApiCall::AlcGetError {
                retval: r.read_u32()?,
                device: DeviceId(r.read_u64()?),
            },
            T::AlcGetIntegerv => {
                let device = DeviceId(r.read_u64()?);
                let param = r.read_u32()?;
                let size = r.read_i32()?;
                let origvalues = r.read_u64()?;
                let is_bool = r.read_bool()?;
                let values = r.read_i32_values(count(size))?;
                ApiCall::AlcGetIntegerv {
                    device,
                    param,
                    size,
                    origvalues,
                    is_bool,
                    values,
                }
            }
            T::AlcCaptureStart => ApiCall::AlcCaptureStart {
                device: DeviceId(r.read_u64()?),
            },
            T::AlcCaptureStop => ApiCall::AlcCaptureStop {
                device: DeviceId(r.read_u64()?),
            },
            T::AlcCaptureSamples => ApiCall::AlcCaptureSamples {
                device: DeviceId(r.read_u64()?),
                origbuffer: r.read_u64()?,
                buffer: r.read_blob()?,
                samples: r.read_i32()?,
            },

            T::AlDopplerFactor => ApiCall::AlDopplerFactor { value: r.read_f32()? },
            T::AlDopplerVelocity => ApiCall::AlDopplerVelocity { value: r.read_f32()? },
            T::AlSpeedOfSound => ApiCall::AlSpeedOfSound { value: r.read_f32()? },
            T::AlDistanceModel => ApiCall::AlDistanceModel { model: r.read_u32()? },
            T::AlEnable => ApiCall::AlEnable { capability: r.read_u32()? },
            T::AlDisable => ApiCall::AlDisable { capability: r.read_u32()? },
            T::AlIsEnabled => ApiCall::AlIsEnabled {
                retval: r.read_bool()?,
                capability: r.read_u32()?,
            },
            T::AlGetString => ApiCall::AlGetString {
                retval: r.read_string()?,
                param: r.read_u32()?,
            },
            T::AlGetBooleanv => {
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_bool_values(numvals as usize)?;
                ApiCall::AlGetBooleanv {
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlGetIntegerv => {
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let is_enum = r.read_bool()?;
                let values = r.read_i32_values(numvals as usize)?;
                ApiCall::AlGetIntegerv {
                    param,
                    origvalues,
                    numvals,
                    is_enum,
                    values,
                }
            }
            T::AlGetFloatv => {
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_f32_values(numvals as usize)?;
                ApiCall::AlGetFloatv {
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlGetDoublev => {
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_f64_values(numvals as usize)?;
                ApiCall::AlGetDoublev {
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlGetBoolean => ApiCall::AlGetBoolean {
                retval: r.read_bool()?,
                param: r.read_u32()?,
            },
            T::AlGetInteger => ApiCall::AlGetInteger {
                retval: r.read_i32()?,
                param: r.read_u32()?,
            },
            T::AlGetFloat => ApiCall::AlGetFloat {
                retval: r.read_f32()?,
                param: r.read_u32()?,
            },
            T::AlGetDouble => ApiCall::AlGetDouble {
                retval: r.read_f64()?,
                param: r.read_u32()?,
            },
            T::AlIsExtensionPresent => ApiCall::AlIsExtensionPresent {
                retval: r.read_bool()?,
                extname: r.read_string()?,
            },
            T::AlGetError => ApiCall::AlGetError { retval: r.read_u32()? },
            T::AlGetProcAddress => ApiCall::AlGetProcAddress {
                retval: r.read_u64()?,
                funcname: r.read_string()?,
            },
            T::AlGetEnumValue => ApiCall::AlGetEnumValue {
                retval: r.read_u32()?,
                enumname: r.read_string()?,
            },

            T::AlListenerfv => {
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_f32_values(numvals as usize)?;
                ApiCall::AlListenerfv {
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlListenerf => ApiCall::AlListenerf {
                param: r.read_u32()?,
                value: r.read_f32()?,
            },
            T::AlListener3f => ApiCall::AlListener3f {
                param: r.read_u32()?,
                value1: r.read_f32()?,
                value2: r.read_f32()?,
                value3: r.read_f32()?,
            },
            T::AlListeneriv => {
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_i32_values(numvals as usize)?;
                ApiCall::AlListeneriv {
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlListeneri => ApiCall::AlListeneri {
                param: r.read_u32()?,
                value: r.read_i32()?,
            },
            T::AlListener3i => ApiCall::AlListener3i {
                param: r.read_u32()?,
                value1: r.read_i32()?,
                value2: r.read_i32()?,
                value3: r.read_i32()?,
            },
            T::AlGetListenerfv => {
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_f32_values(numvals as usize)?;
                ApiCall::AlGetListenerfv {
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlGetListenerf => ApiCall::AlGetListenerf {
                param: r.read_u32()?,
                origvalue: r.read_u64()?,
                value: r.read_f32()?,
            },
            T::AlGetListener3f => ApiCall::AlGetListener3f {
                param: r.read_u32()?,
                origvalue1: r.read_u64()?,
                origvalue2: r.read_u64()?,
                origvalue3: r.read_u64()?,
                value1: r.read_f32()?,
                value2: r.read_f32()?,
                value3: r.read_f32()?,
            },
            T::AlGetListeneri => ApiCall::AlGetListeneri {
                param: r.read_u32()?,
                origvalue: r.read_u64()?,
                value: r.read_i32()?,
            },
            T::AlGetListeneriv => {
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_i32_values(numvals as usize)?;
                ApiCall::AlGetListeneriv {
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlGetListener3i => ApiCall::AlGetListener3i {
                param: r.read_u32()?,
                origvalue1: r.read_u64()?,
                origvalue2: r.read_u64()?,
                origvalue3: r.read_u64()?,
                value1: r.read_i32()?,
                value2: r.read_i32()?,
                value3: r.read_i32()?,
            },

            T::AlGenSources => {
                let n = r.read_i32()?;
                let orignames = r.read_u64()?;
                let names = r.read_u32_values(count(n))?;
                ApiCall::AlGenSources { n, orignames, names }
            }
            T::AlDeleteSources => {
                let n = r.read_i32()?;
                let orignames = r.read_u64()?;
                let names = r.read_u32_values(count(n))?;
                ApiCall::AlDeleteSources { n, orignames, names }
            }
            T::AlIsSource => ApiCall::AlIsSource {
                retval: r.read_bool()?,
                name: r.read_u32()?,
            },
            T::AlSourcefv => {
                let name = r.read_u32()?;
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_f32_values(numvals as usize)?;
                ApiCall::AlSourcefv {
                    name,
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlSourcef => ApiCall::AlSourcef {
                name: r.read_u32()?,
                param: r.read_u32()?,
                value: r.read_f32()?,
            },
            T::AlSource3f => ApiCall::AlSource3f {
                name: r.read_u32()?,
                param: r.read_u32()?,
                value1: r.read_f32()?,
                value2: r.read_f32()?,
                value3: r.read_f32()?,
            },
            T::AlSourceiv => {
                let name = r.read_u32()?;
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_i32_values(numvals as usize)?;
                ApiCall::AlSourceiv {
                    name,
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlSourcei => ApiCall::AlSourcei {
                name: r.read_u32()?,
                param: r.read_u32()?,
                value: r.read_i32()?,
            },
            T::AlSource3i => ApiCall::AlSource3i {
                name: r.read_u32()?,
                param: r.read_u32()?,
                value1: r.read_i32()?,
                value2: r.read_i32()?,
                value3: r.read_i32()?,
            },
            T::AlGetSourcefv => {
                let name = r.read_u32()?;
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_f32_values(numvals as usize)?;
                ApiCall::AlGetSourcefv {
                    name,
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlGetSourcef => ApiCall::AlGetSourcef {
                name: r.read_u32()?,
                param: r.read_u32()?,
                origvalue: r.read_u64()?,
                value: r.read_f32()?,
            },
            T::AlGetSource3f => ApiCall::AlGetSource3f {
                name: r.read_u32()?,
                param: r.read_u32()?,
                origvalue1: r.read_u64()?,
                origvalue2: r.read_u64()?,
                origvalue3: r.read_u64()?,
                value1: r.read_f32()?,
                value2: r.read_f32()?,
                value3: r.read_f32()?,
            },
            T::AlGetSourceiv => {
                let name = r.read_u32()?;
                let param = r.read_u32()?;
                let is_enum = r.read_bool()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_i32_values(numvals as usize)?;
                ApiCall::AlGetSourceiv {
                    name,
                    param,
                    is_enum,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlGetSourcei => ApiCall::AlGetSourcei {
                name: r.read_u32()?,
                param: r.read_u32()?,
                is_enum: r.read_bool()?,
                origvalue: r.read_u64()?,
                value: r.read_i32()?,
            },
            T::AlGetSource3i => ApiCall::AlGetSource3i {
                name: r.read_u32()?,
                param: r.read_u32()?,
                origvalue1: r.read_u64()?,
                origvalue2: r.read_u64()?,
                origvalue3: r.read_u64()?,
                value1: r.read_i32()?,
                value2: r.read_i32()?,
                value3: r.read_i32()?,
            },

            T::AlSourcePlay => ApiCall::AlSourcePlay { name: r.read_u32()? },
            T::AlSourcePlayv => {
                let n = r.read_i32()?;
                let orignames = r.read_u64()?;
                let names = r.read_u32_values(count(n))?;
                ApiCall::AlSourcePlayv { n, orignames, names }
            }
            T::AlSourcePause => ApiCall::AlSourcePause { name: r.read_u32()? },
            T::AlSourcePausev => {
                let n = r.read_i32()?;
                let orignames = r.read_u64()?;
                let names = r.read_u32_values(count(n))?;
                ApiCall::AlSourcePausev { n, orignames, names }
            }
            T::AlSourceRewind => ApiCall::AlSourceRewind { name: r.read_u32()? },
            T::AlSourceRewindv => {
                let n = r.read_i32()?;
                let orignames = r.read_u64()?;
                let names = r.read_u32_values(count(n))?;
                ApiCall::AlSourceRewindv { n, orignames, names }
            }
            T::AlSourceStop => ApiCall::AlSourceStop { name: r.read_u32()? },
            T::AlSourceStopv => {
                let n = r.read_i32()?;
                let orignames = r.read_u64()?;
                let names = r.read_u32_values(count(n))?;
                ApiCall::AlSourceStopv { n, orignames, names }
            }
            T::AlSourceQueueBuffers => {
                let name = r.read_u32()?;
                let nb = r.read_i32()?;
                let origbufnames = r.read_u64()?;
                let bufnames = r.read_u32_values(count(nb))?;
                ApiCall::AlSourceQueueBuffers {
                    name,
                    nb,
                    origbufnames,
                    bufnames,
                }
            }
            T::AlSourceUnqueueBuffers => {
                let name = r.read_u32()?;
                let nb = r.read_i32()?;
                let origbufnames = r.read_u64()?;
                let bufnames = r.read_u32_values(count(nb))?;
                ApiCall::AlSourceUnqueueBuffers {
                    name,
                    nb,
                    origbufnames,
                    bufnames,
                }
            }

            T::AlGenBuffers => {
                let n = r.read_i32()?;
                let orignames = r.read_u64()?;
                let names = r.read_u32_values(count(n))?;
                ApiCall::AlGenBuffers { n, orignames, names }
            }
            T::AlDeleteBuffers => {
                let n = r.read_i32()?;
                let orignames = r.read_u64()?;
                let names = r.read_u32_values(count(n))?;
                ApiCall::AlDeleteBuffers { n, orignames, names }
            }
            T::AlIsBuffer => ApiCall::AlIsBuffer {
                retval: r.read_bool()?,
                name: r.read_u32()?,
            },
            T::AlBufferData => ApiCall::AlBufferData {
                name: r.read_u32()?,
                format: r.read_u32()?,
                origdata: r.read_u64()?,
                data: r.read_blob()?,
                freq: r.read_i32()?,
            },
            T::AlBufferfv => {
                let name = r.read_u32()?;
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_f32_values(numvals as usize)?;
                ApiCall::AlBufferfv {
                    name,
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlBufferf => ApiCall::AlBufferf {
                name: r.read_u32()?,
                param: r.read_u32()?,
                value: r.read_f32()?,
            },
            T::AlBuffer3f => ApiCall::AlBuffer3f {
                name: r.read_u32()?,
                param: r.read_u32()?,
                value1: r.read_f32()?,
                value2: r.read_f32()?,
                value3: r.read_f32()?,
            },
            T::AlBufferiv => {
                let name = r.read_u32()?;
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_i32_values(numvals as usize)?;
                ApiCall::AlBufferiv {
                    name,
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlBufferi => ApiCall::AlBufferi {
                name: r.read_u32()?,
                param: r.read_u32()?,
                value: r.read_i32()?,
            },
            T::AlBuffer3i => ApiCall::AlBuffer3i {
                name: r.read_u32()?,
                param: r.read_u32()?,
                value1: r.read_i32()?,
                value2: r.read_i32()?,
                value3: r.read_i32()?,
            },
            T::AlGetBufferfv => {
                let name = r.read_u32()?;
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_f32_values(numvals as usize)?;
                ApiCall::AlGetBufferfv {
                    name,
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }
            T::AlGetBufferf => ApiCall::AlGetBufferf {
                name: r.read_u32()?,
                param: r.read_u32()?,
                origvalue: r.read_u64()?,
                value: r.read_f32()?,
            },
            T::AlGetBuffer3f => ApiCall::AlGetBuffer3f {
                name: r.read_u32()?,
                param: r.read_u32()?,
                origvalue1: r.read_u64()?,
                origvalue2: r.read_u64()?,
                origvalue3: r.read_u64()?,
                value1: r.read_f32()?,
                value2: r.read_f32()?,
                value3: r.read_f32()?,
            },
            T::AlGetBufferi => ApiCall::AlGetBufferi {
                name: r.read_u32()?,
                param: r.read_u32()?,
                origvalue: r.read_u64()?,
                value: r.read_i32()?,
            },
            T::AlGetBuffer3i => ApiCall::AlGetBuffer3i {
                name: r.read_u32()?,
                param: r.read_u32()?,
                origvalue1: r.read_u64()?,
                origvalue2: r.read_u64()?,
                origvalue3: r.read_u64()?,
                value1: r.read_i32()?,
                value2: r.read_i32()?,
                value3: r.read_i32()?,
            },
            T::AlGetBufferiv => {
                let name = r.read_u32()?;
                let param = r.read_u32()?;
                let origvalues = r.read_u64()?;
                let numvals = r.read_u32()?;
                let values = r.read_i32_values(numvals as usize)?;
                ApiCall::AlGetBufferiv {
                    name,
                    param,
                    origvalues,
                    numvals,
                    values,
                }
            }

            T::AlTracePushScope => ApiCall::AlTracePushScope {
                name: r.read_string()?,
            },
            T::AlTracePopScope => ApiCall::AlTracePopScope,
            T::AlTraceMessage => ApiCall::AlTraceMessage {
                message: r.read_string()?,
            },
            T::AlTraceBufferLabel => ApiCall::AlTraceBufferLabel {
                name: r.read_u32()?,
                label: r.read_string()?,
            },
            T::AlTraceSourceLabel => ApiCall::AlTraceSourceLabel {
                name: r.read_u32()?,
                label: r.read_string()?,
            },
            T::AlcTraceDeviceLabel => ApiCall::AlcTraceDeviceLabel {
                device: DeviceId(r.read_u64()?),
                label: r.read_string()?,
            },
            T::AlcTraceContextLabel => ApiCall::AlcTraceContextLabel {
                context: ContextId(r.read_u64()?),
                label: r.read_string()?,
            },

            _ => unreachable!("meta tag {tag:?} is handled by the decoder loop"),
        };
        Ok(call)
    }
}
