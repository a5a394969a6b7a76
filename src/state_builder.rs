//! Derives the logical AL state timeline from the decoded event stream.
//!
//! The builder owns the mutable [`StateTrie`] and the append-only
//! [`CallStore`]. For every entry-point event it builds an
//! [`ApiCallRecord`], applies the call's state effects, and classifies the
//! call. A record's snapshot is deliberately taken one call late, when the
//! *next* record arrives (or at end of stream), so that the meta events the
//! recorder emits after a call (error triggers, mixer-observed state
//! changes) land in that call's snapshot. The recorder's `*_STATE_CHANGED_*`
//! events are authoritative: whatever a call was expected to do, the
//! observed change wins.

use crate::al;
use crate::decoder::{CallerInfo, TraceVisitor};
use crate::event::{ApiCall, ContextId, DeviceId, EventTag};
use crate::state::{self, StateTrie};
use crate::store::{ApiCallRecord, ArgValue, CallStore};
use crate::string_table::StringHandle;

fn str_bits(handle: Option<StringHandle>) -> u64 {
    handle.map_or(0, StringHandle::as_u64)
}

/// A [`TraceVisitor`] that turns a trace into a [`CallStore`] full of
/// records with per-call state snapshots.
#[derive(Debug, Default)]
pub struct StateBuilder {
    state: StateTrie,
    store: CallStore,
    decode_ok: Option<bool>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn store(&self) -> &CallStore {
        &self.store
    }

    pub fn into_store(self) -> CallStore {
        self.store
    }

    /// Whether the decoder reported a clean end of stream. `None` until
    /// `eos` has fired.
    pub fn decode_ok(&self) -> Option<bool> {
        self.decode_ok
    }

    fn finalize_last_snapshot(&mut self) {
        if let Some(rec) = self.store.last_mut() {
            if rec.snapshot.is_none() {
                rec.snapshot = Some(self.state.snapshot());
            }
        }
    }

    fn clear_inefficient(&mut self) {
        if let Some(rec) = self.store.last_mut() {
            rec.inefficient_state_change = false;
        }
    }

    fn intern(&mut self, s: &Option<String>) -> Option<StringHandle> {
        s.as_deref()
            .map(|s| self.store.strings_mut().handle_for_string(s))
    }

    // The device/context/source/buffer index vectors are append-only:
    // closing or destroying zeroes the slot but never shifts or shrinks.

    fn append_device_slot(&mut self, device: DeviceId) {
        let n = self.state.get_global("numdevices").unwrap_or(0);
        self.state.put_global(&format!("device/{n}"), device.0);
        self.state.put_global("numdevices", n + 1);
    }

    fn clear_device_slot(&mut self, device: DeviceId) {
        let n = self.state.get_global("numdevices").unwrap_or(0);
        for i in 0..n {
            let field = format!("device/{i}");
            if self.state.get_global(&field) == Some(device.0) {
                self.state.put_global(&field, 0);
                break;
            }
        }
    }

    fn append_context_slot(&mut self, device: DeviceId, context: ContextId) {
        let n = self.state.get_device(device, "numcontexts").unwrap_or(0);
        self.state.put_device(device, &format!("context/{n}"), context.0);
        self.state.put_device(device, "numcontexts", n + 1);
    }

    fn clear_context_slot(&mut self, device: DeviceId, context: ContextId) {
        let n = self.state.get_device(device, "numcontexts").unwrap_or(0);
        for i in 0..n {
            let field = format!("context/{i}");
            if self.state.get_device(device, &field) == Some(context.0) {
                self.state.put_device(device, &field, 0);
                break;
            }
        }
    }

    fn reset_device_error(&mut self, rec: &mut ApiCallRecord, device: DeviceId) {
        match self.state.get_device(device, "error") {
            Some(err) if err != u64::from(al::ALC_NO_ERROR) => {
                self.state
                    .put_device(device, "error", al::ALC_NO_ERROR.into());
            }
            _ => rec.inefficient_state_change = true,
        }
    }

    fn reset_context_error(&mut self, rec: &mut ApiCallRecord, context: ContextId) {
        match self.state.get_context(context, "error") {
            Some(err) if err != u64::from(al::AL_NO_ERROR) => {
                self.state
                    .put_context(context, "error", al::AL_NO_ERROR.into());
            }
            _ => rec.inefficient_state_change = true,
        }
    }

    /// Records arguments/returns, applies state effects and sets the
    /// classifications that are knowable at the call itself. Calls whose
    /// whole purpose is to change state start out flagged inefficient; a
    /// matching `*_STATE_CHANGED_*` event clears the flag again.
    #[allow(clippy::too_many_lines)]
    fn apply_call(&mut self, rec: &mut ApiCallRecord, call: &ApiCall) {
        use ApiCall as C;
        use ArgValue::{Bool, Buffer, Context, Device, Double, Enum, Float, Int, Ptr, Size, Source, Str, Uint};

        match call {
            C::AlcGetCurrentContext { retval } => {
                rec.ret(Context(*retval));
            }
            C::AlcGetContextsDevice { retval, context } => {
                rec.arg("context", Context(*context));
                rec.ret(Device(*retval));
                if retval.is_null() {
                    rec.reported_failure = true;
                }
            }
            C::AlcIsExtensionPresent {
                retval,
                device,
                extname,
            } => {
                let extname = self.intern(extname);
                rec.arg("device", Device(*device));
                rec.arg("extname", Str(extname));
                rec.ret(Bool(*retval));
            }
            C::AlcGetProcAddress {
                retval,
                device,
                funcname,
            } => {
                let funcname = self.intern(funcname);
                rec.arg("device", Device(*device));
                rec.arg("funcname", Str(funcname));
                rec.ret(Ptr(*retval));
                if *retval == 0 {
                    rec.reported_failure = true;
                }
            }
            C::AlcGetEnumValue {
                retval,
                device,
                enumname,
            } => {
                let enumname = self.intern(enumname);
                rec.arg("device", Device(*device));
                rec.arg("enumname", Str(enumname));
                rec.ret(Enum(*retval));
            }
            C::AlcGetString {
                retval,
                device,
                param,
            } => {
                let retval = self.intern(retval);
                rec.arg("device", Device(*device));
                rec.arg("param", Enum(*param));
                rec.ret(Str(retval));
            }
            C::AlcCaptureOpenDevice {
                retval,
                devicename,
                frequency,
                format,
                buffersize,
                major_version,
                minor_version,
                devspec,
                extensions,
            } => {
                let devicename = self.intern(devicename);
                rec.arg("devicename", Str(devicename));
                rec.arg("frequency", Uint(*frequency));
                rec.arg("format", Enum(*format));
                rec.arg("buffersize", Size(*buffersize));
                rec.ret(Device(*retval));
                if retval.is_null() {
                    rec.reported_failure = true;
                } else {
                    let devspec = self.intern(devspec);
                    let extensions = self.intern(extensions);
                    let dev = *retval;
                    self.state.put_device(dev, "opened", 1);
                    self.state.put_device(dev, "devtype", 1);
                    self.state.put_device(dev, "openname", str_bits(devicename));
                    self.state.put_device(dev, "frequency", u64::from(*frequency));
                    self.state.put_device(dev, "format", u64::from(*format));
                    self.state
                        .put_device(dev, "buffersize", state::int_bits(*buffersize));
                    self.state.put_device(dev, "capturing", 0);
                    self.state
                        .put_device(dev, "ALC_MAJOR_VERSION", state::int_bits(*major_version));
                    self.state
                        .put_device(dev, "ALC_MINOR_VERSION", state::int_bits(*minor_version));
                    self.state
                        .put_device(dev, "ALC_CAPTURE_DEVICE_SPECIFIER", str_bits(devspec));
                    self.state
                        .put_device(dev, "ALC_EXTENSIONS", str_bits(extensions));
                    self.append_device_slot(dev);
                }
            }
            C::AlcCaptureCloseDevice { retval, device } => {
                rec.arg("device", Device(*device));
                rec.ret(Bool(*retval));
                if !*retval {
                    rec.reported_failure = true;
                } else {
                    self.state.put_device(*device, "opened", 0);
                    self.clear_device_slot(*device);
                }
            }
            C::AlcOpenDevice {
                retval,
                devicename,
                major_version,
                minor_version,
                devspec,
                extensions,
            } => {
                let devicename = self.intern(devicename);
                rec.arg("devicename", Str(devicename));
                rec.ret(Device(*retval));
                if retval.is_null() {
                    rec.reported_failure = true;
                } else {
                    let devspec = self.intern(devspec);
                    let extensions = self.intern(extensions);
                    let dev = *retval;
                    self.state.put_device(dev, "opened", 1);
                    self.state.put_device(dev, "devtype", 0);
                    self.state.put_device(dev, "openname", str_bits(devicename));
                    self.state
                        .put_device(dev, "ALC_MAJOR_VERSION", state::int_bits(*major_version));
                    self.state
                        .put_device(dev, "ALC_MINOR_VERSION", state::int_bits(*minor_version));
                    self.state
                        .put_device(dev, "ALC_DEVICE_SPECIFIER", str_bits(devspec));
                    self.state
                        .put_device(dev, "ALC_EXTENSIONS", str_bits(extensions));
                    self.append_device_slot(dev);
                }
            }
            C::AlcCloseDevice { retval, device } => {
                rec.arg("device", Device(*device));
                rec.ret(Bool(*retval));
                if !*retval {
                    rec.reported_failure = true;
                } else {
                    self.state.put_device(*device, "opened", 0);
                    self.clear_device_slot(*device);
                }
            }
            C::AlcCreateContext {
                retval,
                device,
                origattrlist,
                attrcount,
                attrlist,
            } => {
                rec.arg("device", Device(*device));
                rec.arg("attrlist", Ptr(*origattrlist));
                rec.ret(Context(*retval));
                if retval.is_null() {
                    rec.reported_failure = true;
                } else {
                    let ctx = *retval;
                    self.state.put_context(ctx, "processing", 1);
                    self.state.put_context(ctx, "created", 1);
                    self.state.put_context(ctx, "device", device.0);
                    self.state
                        .put_context(ctx, "ALC_ATTRIBUTES_SIZE", u64::from(*attrcount));
                    for (i, attr) in attrlist.iter().enumerate() {
                        self.state.put_context(
                            ctx,
                            &format!("ALC_ALL_ATTRIBUTES/{i}"),
                            state::int_bits(*attr),
                        );
                    }
                    self.append_context_slot(*device, ctx);
                }
            }
            C::AlcMakeContextCurrent { retval, context } => {
                rec.arg("context", Context(*context));
                rec.ret(Bool(*retval));
                if !*retval {
                    rec.reported_failure = true;
                } else if *context == self.state.current_context() {
                    rec.inefficient_state_change = true;
                } else {
                    self.state.set_current_context(*context);
                }
            }
            C::AlcProcessContext { context } => {
                rec.arg("context", Context(*context));
                if self
                    .state
                    .get_context(*context, "processing")
                    .is_some_and(|v| v != 0)
                {
                    rec.inefficient_state_change = true;
                } else {
                    self.state.put_context(*context, "processing", 1);
                }
            }
            C::AlcSuspendContext { context } => {
                rec.arg("context", Context(*context));
                if self
                    .state
                    .get_context(*context, "processing")
                    .is_some_and(|v| v != 0)
                {
                    self.state.put_context(*context, "processing", 0);
                } else {
                    rec.inefficient_state_change = true;
                }
            }
            C::AlcDestroyContext { context } => {
                rec.arg("context", Context(*context));
                self.state.put_context(*context, "created", 0);
                if let Some(dev) = self.state.get_context(*context, "device") {
                    self.clear_context_slot(DeviceId(dev), *context);
                }
            }
            C::AlcGetError { retval, device } => {
                rec.arg("device", Device(*device));
                rec.ret(Enum(*retval));
                if !device.is_null() {
                    self.reset_device_error(rec, *device);
                }
            }
            C::AlcGetIntegerv {
                device,
                param,
                size,
                origvalues,
                is_bool,
                values,
            } => {
                rec.arg("device", Device(*device));
                rec.arg("param", Enum(*param));
                rec.arg("size", Size(*size));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(if *is_bool { Bool(*v != 0) } else { Int(*v) });
                }
            }
            C::AlcCaptureStart { device } => {
                rec.arg("device", Device(*device));
                if self.state.get_device(*device, "devtype") == Some(1) {
                    if self
                        .state
                        .get_device(*device, "capturing")
                        .is_some_and(|v| v != 0)
                    {
                        rec.inefficient_state_change = true;
                    } else {
                        self.state.put_device(*device, "capturing", 1);
                    }
                } else {
                    rec.reported_failure = true;
                }
            }
            C::AlcCaptureStop { device } => {
                rec.arg("device", Device(*device));
                if self.state.get_device(*device, "devtype") == Some(1) {
                    if self
                        .state
                        .get_device(*device, "capturing")
                        .is_some_and(|v| v != 0)
                    {
                        self.state.put_device(*device, "capturing", 0);
                    } else {
                        rec.inefficient_state_change = true;
                    }
                } else {
                    rec.reported_failure = true;
                }
            }
            C::AlcCaptureSamples {
                device,
                origbuffer,
                buffer,
                samples,
            } => {
                rec.arg("device", Device(*device));
                rec.arg("buffer", Ptr(*origbuffer));
                rec.arg("samples", Size(*samples));
                if self.state.get_device(*device, "devtype") == Some(1) {
                    let capturing = self
                        .state
                        .get_device(*device, "capturing")
                        .is_some_and(|v| v != 0);
                    if !capturing || *origbuffer == 0 {
                        rec.reported_failure = true;
                    } else if *samples == 0 {
                        rec.inefficient_state_change = true;
                    } else {
                        let n = self.state.get_device(*device, "numcaptures").unwrap_or(0);
                        self.state.put_device(
                            *device,
                            &format!("capturedatalen/{n}"),
                            u64::from(buffer.len),
                        );
                        self.state
                            .put_device(*device, &format!("capturedata/{n}"), buffer.offset);
                        self.state.put_device(*device, "numcaptures", n + 1);
                    }
                } else {
                    rec.reported_failure = true;
                }
            }

            C::AlDopplerFactor { value } => {
                rec.arg("value", Float(*value));
                rec.inefficient_state_change = true;
            }
            C::AlDopplerVelocity { value } => {
                rec.arg("value", Float(*value));
                rec.inefficient_state_change = true;
            }
            C::AlSpeedOfSound { value } => {
                rec.arg("value", Float(*value));
                rec.inefficient_state_change = true;
            }
            C::AlDistanceModel { model } => {
                rec.arg("model", Enum(*model));
                rec.inefficient_state_change = true;
            }
            C::AlEnable { capability } => {
                rec.arg("capability", Enum(*capability));
                rec.inefficient_state_change = true;
            }
            C::AlDisable { capability } => {
                rec.arg("capability", Enum(*capability));
                rec.inefficient_state_change = true;
            }
            C::AlIsEnabled { retval, capability } => {
                rec.arg("capability", Enum(*capability));
                rec.ret(Bool(*retval));
            }
            C::AlGetString { retval, param } => {
                let retval = self.intern(retval);
                rec.arg("param", Enum(*param));
                rec.ret(Str(retval));
            }
            C::AlGetBooleanv {
                param,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(Bool(*v));
                }
            }
            C::AlGetIntegerv {
                param,
                origvalues,
                numvals: _,
                is_enum,
                values,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(if *is_enum { Enum(*v as u32) } else { Int(*v) });
                }
            }
            C::AlGetFloatv {
                param,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(Float(*v));
                }
            }
            C::AlGetDoublev {
                param,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(Double(*v));
                }
            }
            C::AlGetBoolean { retval, param } => {
                rec.arg("param", Enum(*param));
                rec.ret(Bool(*retval));
            }
            C::AlGetInteger { retval, param } => {
                rec.arg("param", Enum(*param));
                if *param == al::AL_DISTANCE_MODEL {
                    rec.ret(Enum(*retval as u32));
                } else {
                    rec.ret(Int(*retval));
                }
            }
            C::AlGetFloat { retval, param } => {
                rec.arg("param", Enum(*param));
                rec.ret(Float(*retval));
            }
            C::AlGetDouble { retval, param } => {
                rec.arg("param", Enum(*param));
                rec.ret(Double(*retval));
            }
            C::AlIsExtensionPresent { retval, extname } => {
                let extname = self.intern(extname);
                rec.arg("extname", Str(extname));
                rec.ret(Bool(*retval));
            }
            C::AlGetError { retval } => {
                rec.ret(Enum(*retval));
                let context = self.state.current_context();
                if !context.is_null() {
                    self.reset_context_error(rec, context);
                }
            }
            C::AlGetProcAddress { retval, funcname } => {
                let funcname = self.intern(funcname);
                rec.arg("funcname", Str(funcname));
                rec.ret(Ptr(*retval));
                if *retval == 0 {
                    rec.reported_failure = true;
                }
            }
            C::AlGetEnumValue { retval, enumname } => {
                let enumname = self.intern(enumname);
                rec.arg("enumname", Str(enumname));
                rec.ret(Enum(*retval));
            }

            C::AlListenerfv {
                param,
                origvalues,
                numvals: _,
                values: _,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                rec.inefficient_state_change = true;
            }
            C::AlListenerf { param, value } => {
                rec.arg("param", Enum(*param));
                rec.arg("value", Float(*value));
                rec.inefficient_state_change = true;
            }
            C::AlListener3f {
                param,
                value1,
                value2,
                value3,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("value1", Float(*value1));
                rec.arg("value2", Float(*value2));
                rec.arg("value3", Float(*value3));
                rec.inefficient_state_change = true;
            }
            C::AlListeneriv {
                param,
                origvalues,
                numvals: _,
                values: _,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                rec.inefficient_state_change = true;
            }
            C::AlListeneri { param, value } => {
                rec.arg("param", Enum(*param));
                rec.arg("value", Int(*value));
                rec.inefficient_state_change = true;
            }
            C::AlListener3i {
                param,
                value1,
                value2,
                value3,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("value1", Int(*value1));
                rec.arg("value2", Int(*value2));
                rec.arg("value3", Int(*value3));
                rec.inefficient_state_change = true;
            }

            C::AlGetListenerfv {
                param,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(Float(*v));
                }
            }
            C::AlGetListenerf {
                param,
                origvalue,
                value,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("value", Ptr(*origvalue));
                rec.ret(Float(*value));
            }
            C::AlGetListener3f {
                param,
                origvalue1,
                origvalue2,
                origvalue3,
                value1,
                value2,
                value3,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("value1", Ptr(*origvalue1));
                rec.arg("value2", Ptr(*origvalue2));
                rec.arg("value3", Ptr(*origvalue3));
                rec.ret(Float(*value1));
                rec.ret(Float(*value2));
                rec.ret(Float(*value3));
            }
            C::AlGetListeneri {
                param,
                origvalue,
                value,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("value", Ptr(*origvalue));
                rec.ret(Int(*value));
            }
            C::AlGetListeneriv {
                param,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(Int(*v));
                }
            }
            C::AlGetListener3i {
                param,
                origvalue1,
                origvalue2,
                origvalue3,
                value1,
                value2,
                value3,
            } => {
                rec.arg("param", Enum(*param));
                rec.arg("value1", Ptr(*origvalue1));
                rec.arg("value2", Ptr(*origvalue2));
                rec.arg("value3", Ptr(*origvalue3));
                rec.ret(Int(*value1));
                rec.ret(Int(*value2));
                rec.ret(Int(*value3));
            }

            C::AlGenSources {
                n,
                orignames,
                names,
            } => {
                rec.arg("n", Size(*n));
                rec.arg("names", Ptr(*orignames));
                for name in names {
                    rec.ret(Source(*name));
                }
                let context = self.state.current_context();
                if !context.is_null() {
                    let base = self.state.get_context(context, "numsources").unwrap_or(0);
                    let mut total = 0u64;
                    for &name in names {
                        if name != 0 {
                            self.state.put_context(
                                context,
                                &format!("source/{}", base + total),
                                u64::from(name),
                            );
                            self.state.put_source(context, name, "allocated", 1);
                            total += 1;
                        }
                    }
                    self.state.put_context(context, "numsources", base + total);
                }
            }
            C::AlDeleteSources {
                n,
                orignames,
                names,
            } => {
                rec.arg("n", Size(*n));
                rec.arg("names", Ptr(*orignames));
                let context = self.state.current_context();
                if !context.is_null() {
                    for &name in names {
                        if name != 0 {
                            self.state.put_source(context, name, "allocated", 0);
                        }
                    }
                }
            }
            C::AlIsSource { retval, name } => {
                rec.arg("name", Source(*name));
                rec.ret(Bool(*retval));
            }

            C::AlSourcefv {
                name,
                param,
                origvalues,
                numvals: _,
                values: _,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                rec.inefficient_state_change = true;
            }
            C::AlSourcef { name, param, value } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value", Float(*value));
                rec.inefficient_state_change = true;
            }
            C::AlSource3f {
                name,
                param,
                value1,
                value2,
                value3,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value1", Float(*value1));
                rec.arg("value2", Float(*value2));
                rec.arg("value3", Float(*value3));
                rec.inefficient_state_change = true;
            }
            C::AlSourceiv {
                name,
                param,
                origvalues,
                numvals: _,
                values: _,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                rec.inefficient_state_change = true;
            }
            C::AlSourcei { name, param, value } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                // The parameter decides how the value reads: a buffer name,
                // a boolean, an enum, or a plain integer.
                let value = match *param {
                    al::AL_BUFFER => Buffer(*value as u32),
                    al::AL_LOOPING | al::AL_SOURCE_RELATIVE => Bool(*value != 0),
                    al::AL_SOURCE_TYPE | al::AL_SOURCE_STATE => Enum(*value as u32),
                    _ => Int(*value),
                };
                rec.arg("value", value);
                rec.inefficient_state_change = true;
            }
            C::AlSource3i {
                name,
                param,
                value1,
                value2,
                value3,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value1", Int(*value1));
                rec.arg("value2", Int(*value2));
                rec.arg("value3", Int(*value3));
                rec.inefficient_state_change = true;
            }

            C::AlGetSourcefv {
                name,
                param,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(Float(*v));
                }
            }
            C::AlGetSourcef {
                name,
                param,
                origvalue,
                value,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value", Ptr(*origvalue));
                rec.ret(Float(*value));
            }
            C::AlGetSource3f {
                name,
                param,
                origvalue1,
                origvalue2,
                origvalue3,
                value1,
                value2,
                value3,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value1", Ptr(*origvalue1));
                rec.arg("value2", Ptr(*origvalue2));
                rec.arg("value3", Ptr(*origvalue3));
                rec.ret(Float(*value1));
                rec.ret(Float(*value2));
                rec.ret(Float(*value3));
            }
            C::AlGetSourceiv {
                name,
                param,
                is_enum,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(if *is_enum { Enum(*v as u32) } else { Int(*v) });
                }
            }
            C::AlGetSourcei {
                name,
                param,
                is_enum,
                origvalue,
                value,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value", Ptr(*origvalue));
                rec.ret(if *is_enum { Enum(*value as u32) } else { Int(*value) });
            }
            C::AlGetSource3i {
                name,
                param,
                origvalue1,
                origvalue2,
                origvalue3,
                value1,
                value2,
                value3,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value1", Ptr(*origvalue1));
                rec.arg("value2", Ptr(*origvalue2));
                rec.arg("value3", Ptr(*origvalue3));
                rec.ret(Int(*value1));
                rec.ret(Int(*value2));
                rec.ret(Int(*value3));
            }

            C::AlSourcePlay { name } => {
                rec.arg("name", Source(*name));
                rec.inefficient_state_change = true;
            }
            C::AlSourcePlayv {
                n,
                orignames,
                names: _,
            } => {
                rec.arg("n", Size(*n));
                rec.arg("names", Ptr(*orignames));
                rec.inefficient_state_change = true;
            }
            C::AlSourcePause { name } => {
                rec.arg("name", Source(*name));
                rec.inefficient_state_change = true;
            }
            C::AlSourcePausev {
                n,
                orignames,
                names: _,
            } => {
                rec.arg("n", Size(*n));
                rec.arg("names", Ptr(*orignames));
                rec.inefficient_state_change = true;
            }
            C::AlSourceRewind { name } => {
                rec.arg("name", Source(*name));
                rec.inefficient_state_change = true;
            }
            C::AlSourceRewindv {
                n,
                orignames,
                names: _,
            } => {
                rec.arg("n", Size(*n));
                rec.arg("names", Ptr(*orignames));
                rec.inefficient_state_change = true;
            }
            C::AlSourceStop { name } => {
                rec.arg("name", Source(*name));
                rec.inefficient_state_change = true;
            }
            C::AlSourceStopv {
                n,
                orignames,
                names: _,
            } => {
                rec.arg("n", Size(*n));
                rec.arg("names", Ptr(*orignames));
                rec.inefficient_state_change = true;
            }
            C::AlSourceQueueBuffers {
                name,
                nb,
                origbufnames,
                bufnames: _,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("nb", Size(*nb));
                rec.arg("bufnames", Ptr(*origbufnames));
                rec.inefficient_state_change = true;
            }
            C::AlSourceUnqueueBuffers {
                name,
                nb,
                origbufnames,
                bufnames,
            } => {
                rec.arg("name", Source(*name));
                rec.arg("nb", Size(*nb));
                rec.arg("bufnames", Ptr(*origbufnames));
                rec.inefficient_state_change = true;
                for b in bufnames {
                    rec.ret(Buffer(*b));
                }
            }

            C::AlGenBuffers {
                n,
                orignames,
                names,
            } => {
                rec.arg("n", Size(*n));
                rec.arg("names", Ptr(*orignames));
                for name in names {
                    rec.ret(Buffer(*name));
                }
                let (context, device) = self.state.current_context_and_device();
                if !context.is_null() && !device.is_null() {
                    let base = self.state.get_device(device, "numbuffers").unwrap_or(0);
                    let mut total = 0u64;
                    for &name in names {
                        if name != 0 {
                            self.state.put_device(
                                device,
                                &format!("buffer/{}", base + total),
                                u64::from(name),
                            );
                            self.state.put_buffer(device, name, "allocated", 1);
                            total += 1;
                        }
                    }
                    self.state.put_device(device, "numbuffers", base + total);
                }
            }
            C::AlDeleteBuffers {
                n,
                orignames,
                names,
            } => {
                rec.arg("n", Size(*n));
                rec.arg("names", Ptr(*orignames));
                let (context, device) = self.state.current_context_and_device();
                if !context.is_null() && !device.is_null() {
                    for &name in names {
                        if name != 0 {
                            self.state.put_buffer(device, name, "allocated", 0);
                        }
                    }
                }
            }
            C::AlIsBuffer { retval, name } => {
                rec.arg("name", Buffer(*name));
                rec.ret(Bool(*retval));
            }
            C::AlBufferData {
                name,
                format,
                origdata,
                data,
                freq,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("format", Enum(*format));
                rec.arg("data", Ptr(*origdata));
                rec.arg("size", Size(data.len as i32));
                rec.arg("freq", Size(*freq));
                if *name != 0 {
                    let (context, device) = self.state.current_context_and_device();
                    if !context.is_null() && !device.is_null() {
                        self.state
                            .put_buffer(device, *name, "format", u64::from(*format));
                        let (offset, len) = if *origdata != 0 {
                            (data.offset, u64::from(data.len))
                        } else {
                            (0, 0)
                        };
                        self.state.put_buffer(device, *name, "data", offset);
                        self.state.put_buffer(device, *name, "datalen", len);
                    }
                }
            }

            C::AlBufferfv {
                name,
                param,
                origvalues,
                numvals: _,
                values: _,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                rec.inefficient_state_change = true;
            }
            C::AlBufferf { name, param, value } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value", Float(*value));
                rec.inefficient_state_change = true;
            }
            C::AlBuffer3f {
                name,
                param,
                value1,
                value2,
                value3,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value1", Float(*value1));
                rec.arg("value2", Float(*value2));
                rec.arg("value3", Float(*value3));
                rec.inefficient_state_change = true;
            }
            C::AlBufferiv {
                name,
                param,
                origvalues,
                numvals: _,
                values: _,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                rec.inefficient_state_change = true;
            }
            C::AlBufferi { name, param, value } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value", Int(*value));
                rec.inefficient_state_change = true;
            }
            C::AlBuffer3i {
                name,
                param,
                value1,
                value2,
                value3,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value1", Int(*value1));
                rec.arg("value2", Int(*value2));
                rec.arg("value3", Int(*value3));
                rec.inefficient_state_change = true;
            }

            C::AlGetBufferfv {
                name,
                param,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(Float(*v));
                }
            }
            C::AlGetBufferf {
                name,
                param,
                origvalue,
                value,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value", Ptr(*origvalue));
                rec.ret(Float(*value));
            }
            C::AlGetBuffer3f {
                name,
                param,
                origvalue1,
                origvalue2,
                origvalue3,
                value1,
                value2,
                value3,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value1", Ptr(*origvalue1));
                rec.arg("value2", Ptr(*origvalue2));
                rec.arg("value3", Ptr(*origvalue3));
                rec.ret(Float(*value1));
                rec.ret(Float(*value2));
                rec.ret(Float(*value3));
            }
            C::AlGetBufferi {
                name,
                param,
                origvalue,
                value,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value", Ptr(*origvalue));
                rec.ret(Int(*value));
            }
            C::AlGetBuffer3i {
                name,
                param,
                origvalue1,
                origvalue2,
                origvalue3,
                value1,
                value2,
                value3,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("value1", Ptr(*origvalue1));
                rec.arg("value2", Ptr(*origvalue2));
                rec.arg("value3", Ptr(*origvalue3));
                rec.ret(Int(*value1));
                rec.ret(Int(*value2));
                rec.ret(Int(*value3));
            }
            C::AlGetBufferiv {
                name,
                param,
                origvalues,
                numvals: _,
                values,
            } => {
                rec.arg("name", Buffer(*name));
                rec.arg("param", Enum(*param));
                rec.arg("values", Ptr(*origvalues));
                for v in values {
                    rec.ret(Int(*v));
                }
            }

            C::AlTracePushScope { name } => {
                let name = self.intern(name);
                rec.arg("name", Str(name));
            }
            C::AlTracePopScope => {}
            C::AlTraceMessage { message } => {
                let message = self.intern(message);
                rec.arg("message", Str(message));
            }
            C::AlTraceBufferLabel { name, label } => {
                let label = self.intern(label);
                // Listed as a plain uint: by the time a reader looks at
                // this call the name may refer to a long-dead buffer.
                rec.arg("name", Uint(*name));
                rec.arg("label", Str(label));
                let (context, device) = self.state.current_context_and_device();
                if !context.is_null() && !device.is_null() {
                    self.state
                        .put_buffer(device, *name, "label", str_bits(label));
                }
            }
            C::AlTraceSourceLabel { name, label } => {
                let label = self.intern(label);
                rec.arg("name", Uint(*name));
                rec.arg("label", Str(label));
                let context = self.state.current_context();
                if !context.is_null() {
                    self.state
                        .put_source(context, *name, "label", str_bits(label));
                }
            }
            C::AlcTraceDeviceLabel { device, label } => {
                let label = self.intern(label);
                rec.arg("device", Ptr(device.0));
                rec.arg("label", Str(label));
                self.state.put_device(*device, "label", str_bits(label));
            }
            C::AlcTraceContextLabel { context, label } => {
                let label = self.intern(label);
                rec.arg("context", Ptr(context.0));
                rec.arg("label", Str(label));
                self.state.put_context(*context, "label", str_bits(label));
            }
        }
    }
}

impl TraceVisitor for StateBuilder {
    fn api_call(&mut self, caller: &CallerInfo, tag: EventTag, call: &ApiCall) {
        // Lock down the previous record's snapshot now: any meta events
        // that arrived since then belonged to it.
        self.finalize_last_snapshot();
        let mut rec = ApiCallRecord::new(tag, caller, self.store.strings_mut());
        self.apply_call(&mut rec, call);
        self.store.push(rec);
    }

    fn al_error(&mut self, error: u32) {
        if let Some(rec) = self.store.last_mut() {
            rec.reported_failure = true;
            rec.generated_al_error = Some(error);
        }
        let context = self.state.current_context();
        if !context.is_null() {
            self.state.put_context(context, "error", u64::from(error));
        }
    }

    fn alc_error(&mut self, device: DeviceId, error: u32) {
        if let Some(rec) = self.store.last_mut() {
            rec.reported_failure = true;
            rec.generated_alc_error = Some(error);
        }
        if !device.is_null() {
            self.state.put_device(device, "error", u64::from(error));
        }
    }

    fn device_state_changed_bool(&mut self, device: DeviceId, param: u32, value: bool) {
        self.clear_inefficient();
        self.state
            .put_device(device, &al::alc_param_key(param), u64::from(value));
    }

    fn device_state_changed_int(&mut self, device: DeviceId, param: u32, value: i32) {
        // Capture-sample counts advance because the hardware captured
        // audio, not because the last call did anything.
        if param != al::ALC_CAPTURE_SAMPLES {
            self.clear_inefficient();
        }
        self.state
            .put_device(device, &al::alc_param_key(param), state::int_bits(value));
    }

    fn context_state_changed_enum(&mut self, context: ContextId, param: u32, value: u32) {
        self.clear_inefficient();
        self.state
            .put_context(context, &al::al_param_key(param), u64::from(value));
    }

    fn context_state_changed_float(&mut self, context: ContextId, param: u32, value: f32) {
        self.clear_inefficient();
        self.state
            .put_context(context, &al::al_param_key(param), state::float_bits(value));
    }

    fn context_state_changed_string(&mut self, context: ContextId, param: u32, value: &str) {
        self.clear_inefficient();
        let handle = self.store.strings_mut().handle_for_string(value);
        self.state
            .put_context(context, &al::al_param_key(param), handle.as_u64());
    }

    fn listener_state_changed_floatv(&mut self, context: ContextId, param: u32, values: &[f32]) {
        self.clear_inefficient();
        let key = al::al_param_key(param);
        if let [value] = values {
            self.state
                .put_context(context, &key, state::float_bits(*value));
        } else {
            for (i, value) in values.iter().enumerate() {
                self.state
                    .put_context(context, &format!("{key}/{i}"), state::float_bits(*value));
            }
        }
    }

    fn source_state_changed_bool(&mut self, name: u32, param: u32, value: bool) {
        self.clear_inefficient();
        let context = self.state.current_context();
        if !context.is_null() {
            self.state
                .put_source(context, name, &al::al_param_key(param), u64::from(value));
        }
    }

    fn source_state_changed_enum(&mut self, name: u32, param: u32, value: u32) {
        self.clear_inefficient();
        let context = self.state.current_context();
        if !context.is_null() {
            self.state
                .put_source(context, name, &al::al_param_key(param), u64::from(value));
        }
    }

    fn source_state_changed_int(&mut self, name: u32, param: u32, value: i32) {
        self.clear_inefficient();
        let context = self.state.current_context();
        if !context.is_null() {
            self.state
                .put_source(context, name, &al::al_param_key(param), state::int_bits(value));
        }
    }

    fn source_state_changed_uint(&mut self, name: u32, param: u32, value: u32) {
        self.clear_inefficient();
        let context = self.state.current_context();
        if !context.is_null() {
            self.state
                .put_source(context, name, &al::al_param_key(param), u64::from(value));
        }
    }

    fn source_state_changed_float(&mut self, name: u32, param: u32, value: f32) {
        self.clear_inefficient();
        let context = self.state.current_context();
        if !context.is_null() {
            self.state.put_source(
                context,
                name,
                &al::al_param_key(param),
                state::float_bits(value),
            );
        }
    }

    fn source_state_changed_float3(&mut self, name: u32, param: u32, values: [f32; 3]) {
        self.clear_inefficient();
        let context = self.state.current_context();
        if !context.is_null() {
            let key = al::al_param_key(param);
            for (i, value) in values.iter().enumerate() {
                self.state.put_source(
                    context,
                    name,
                    &format!("{key}/{i}"),
                    state::float_bits(*value),
                );
            }
        }
    }

    fn buffer_state_changed_int(&mut self, name: u32, param: u32, value: i32) {
        self.clear_inefficient();
        let (context, device) = self.state.current_context_and_device();
        if !context.is_null() && !device.is_null() {
            self.state
                .put_buffer(device, name, &al::al_param_key(param), state::int_bits(value));
        }
    }

    fn eos(&mut self, okay: bool) {
        self.finalize_last_snapshot();
        self.decode_ok = Some(okay);
    }
}
