//! The handful of AL/ALC enum values the state layer has to understand.
//!
//! The full enum-to-name tables live with the UI and CLI front ends; the
//! core only needs the parameters that appear as state keys, plus the few
//! values (errors, device queries, distance model) its classification rules
//! test against. Everything else round-trips as a raw number.

use std::borrow::Cow;

pub const AL_NO_ERROR: u32 = 0;
pub const ALC_NO_ERROR: u32 = 0;

pub const AL_SOURCE_RELATIVE: u32 = 0x202;

pub const AL_CONE_INNER_ANGLE: u32 = 0x1001;
pub const AL_CONE_OUTER_ANGLE: u32 = 0x1002;
pub const AL_PITCH: u32 = 0x1003;
pub const AL_POSITION: u32 = 0x1004;
pub const AL_DIRECTION: u32 = 0x1005;
pub const AL_VELOCITY: u32 = 0x1006;
pub const AL_LOOPING: u32 = 0x1007;
pub const AL_BUFFER: u32 = 0x1009;
pub const AL_GAIN: u32 = 0x100a;
pub const AL_MIN_GAIN: u32 = 0x100d;
pub const AL_MAX_GAIN: u32 = 0x100e;
pub const AL_ORIENTATION: u32 = 0x100f;
pub const AL_SOURCE_STATE: u32 = 0x1010;
pub const AL_BUFFERS_QUEUED: u32 = 0x1015;
pub const AL_BUFFERS_PROCESSED: u32 = 0x1016;
pub const AL_REFERENCE_DISTANCE: u32 = 0x1020;
pub const AL_ROLLOFF_FACTOR: u32 = 0x1021;
pub const AL_CONE_OUTER_GAIN: u32 = 0x1022;
pub const AL_MAX_DISTANCE: u32 = 0x1023;
pub const AL_SEC_OFFSET: u32 = 0x1024;
pub const AL_SAMPLE_OFFSET: u32 = 0x1025;
pub const AL_BYTE_OFFSET: u32 = 0x1026;
pub const AL_SOURCE_TYPE: u32 = 0x1027;

pub const AL_FREQUENCY: u32 = 0x2001;
pub const AL_BITS: u32 = 0x2002;
pub const AL_CHANNELS: u32 = 0x2003;
pub const AL_SIZE: u32 = 0x2004;

pub const AL_VENDOR: u32 = 0xb001;
pub const AL_VERSION: u32 = 0xb002;
pub const AL_RENDERER: u32 = 0xb003;
pub const AL_EXTENSIONS: u32 = 0xb004;

pub const AL_DOPPLER_FACTOR: u32 = 0xc000;
pub const AL_DOPPLER_VELOCITY: u32 = 0xc001;
pub const AL_SPEED_OF_SOUND: u32 = 0xc003;
pub const AL_DISTANCE_MODEL: u32 = 0xd000;

pub const ALC_MAJOR_VERSION: u32 = 0x1000;
pub const ALC_MINOR_VERSION: u32 = 0x1001;
pub const ALC_ATTRIBUTES_SIZE: u32 = 0x1002;
pub const ALC_ALL_ATTRIBUTES: u32 = 0x1003;
pub const ALC_DEFAULT_DEVICE_SPECIFIER: u32 = 0x1004;
pub const ALC_DEVICE_SPECIFIER: u32 = 0x1005;
pub const ALC_EXTENSIONS: u32 = 0x1006;
pub const ALC_FREQUENCY: u32 = 0x1007;
pub const ALC_REFRESH: u32 = 0x1008;
pub const ALC_SYNC: u32 = 0x1009;
pub const ALC_MONO_SOURCES: u32 = 0x1010;
pub const ALC_STEREO_SOURCES: u32 = 0x1011;
pub const ALC_CAPTURE_DEVICE_SPECIFIER: u32 = 0x310;
pub const ALC_CAPTURE_SAMPLES: u32 = 0x312;
/// ALC_EXT_DISCONNECTED.
pub const ALC_CONNECTED: u32 = 0x313;

/// State-key name for an AL parameter, e.g. `AL_PITCH`. Parameters the
/// core doesn't know stay addressable as their hex value.
pub fn al_param_key(param: u32) -> Cow<'static, str> {
    let name = match param {
        AL_SOURCE_RELATIVE => "AL_SOURCE_RELATIVE",
        AL_CONE_INNER_ANGLE => "AL_CONE_INNER_ANGLE",
        AL_CONE_OUTER_ANGLE => "AL_CONE_OUTER_ANGLE",
        AL_PITCH => "AL_PITCH",
        AL_POSITION => "AL_POSITION",
        AL_DIRECTION => "AL_DIRECTION",
        AL_VELOCITY => "AL_VELOCITY",
        AL_LOOPING => "AL_LOOPING",
        AL_BUFFER => "AL_BUFFER",
        AL_GAIN => "AL_GAIN",
        AL_MIN_GAIN => "AL_MIN_GAIN",
        AL_MAX_GAIN => "AL_MAX_GAIN",
        AL_ORIENTATION => "AL_ORIENTATION",
        AL_SOURCE_STATE => "AL_SOURCE_STATE",
        AL_BUFFERS_QUEUED => "AL_BUFFERS_QUEUED",
        AL_BUFFERS_PROCESSED => "AL_BUFFERS_PROCESSED",
        AL_REFERENCE_DISTANCE => "AL_REFERENCE_DISTANCE",
        AL_ROLLOFF_FACTOR => "AL_ROLLOFF_FACTOR",
        AL_CONE_OUTER_GAIN => "AL_CONE_OUTER_GAIN",
        AL_MAX_DISTANCE => "AL_MAX_DISTANCE",
        AL_SEC_OFFSET => "AL_SEC_OFFSET",
        AL_SAMPLE_OFFSET => "AL_SAMPLE_OFFSET",
        AL_BYTE_OFFSET => "AL_BYTE_OFFSET",
        AL_SOURCE_TYPE => "AL_SOURCE_TYPE",
        AL_FREQUENCY => "AL_FREQUENCY",
        AL_BITS => "AL_BITS",
        AL_CHANNELS => "AL_CHANNELS",
        AL_SIZE => "AL_SIZE",
        AL_VENDOR => "AL_VENDOR",
        AL_VERSION => "AL_VERSION",
        AL_RENDERER => "AL_RENDERER",
        AL_EXTENSIONS => "AL_EXTENSIONS",
        AL_DOPPLER_FACTOR => "AL_DOPPLER_FACTOR",
        AL_DOPPLER_VELOCITY => "AL_DOPPLER_VELOCITY",
        AL_SPEED_OF_SOUND => "AL_SPEED_OF_SOUND",
        AL_DISTANCE_MODEL => "AL_DISTANCE_MODEL",
        other => return Cow::Owned(format!("{other:#x}")),
    };
    Cow::Borrowed(name)
}

/// State-key name for an ALC parameter, e.g. `ALC_CAPTURE_SAMPLES`.
pub fn alc_param_key(param: u32) -> Cow<'static, str> {
    let name = match param {
        ALC_MAJOR_VERSION => "ALC_MAJOR_VERSION",
        ALC_MINOR_VERSION => "ALC_MINOR_VERSION",
        ALC_ATTRIBUTES_SIZE => "ALC_ATTRIBUTES_SIZE",
        ALC_ALL_ATTRIBUTES => "ALC_ALL_ATTRIBUTES",
        ALC_DEFAULT_DEVICE_SPECIFIER => "ALC_DEFAULT_DEVICE_SPECIFIER",
        ALC_DEVICE_SPECIFIER => "ALC_DEVICE_SPECIFIER",
        ALC_EXTENSIONS => "ALC_EXTENSIONS",
        ALC_FREQUENCY => "ALC_FREQUENCY",
        ALC_REFRESH => "ALC_REFRESH",
        ALC_SYNC => "ALC_SYNC",
        ALC_MONO_SOURCES => "ALC_MONO_SOURCES",
        ALC_STEREO_SOURCES => "ALC_STEREO_SOURCES",
        ALC_CAPTURE_DEVICE_SPECIFIER => "ALC_CAPTURE_DEVICE_SPECIFIER",
        ALC_CAPTURE_SAMPLES => "ALC_CAPTURE_SAMPLES",
        ALC_CONNECTED => "ALC_CONNECTED",
        other => return Cow::Owned(format!("{other:#x}")),
    };
    Cow::Borrowed(name)
}
