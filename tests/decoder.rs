//! Framing and dispatch tests for the trace decoder, driven entirely by
//! synthesized byte streams.

mod common;

use altrace_playback::{
    al, process_trace, ApiCall, BlobRef, ContextId, DecodeError, DeviceId, EventTag, TraceStatus,
    TRACE_FORMAT_VERSION, TRACE_MAGIC,
};
use common::{CollectingVisitor, Seen, TraceWriter};

#[test]
fn bad_magic_fails_with_zero_events() {
    let bytes = TraceWriter::with_header(0xdeadbeef, TRACE_FORMAT_VERSION, "app").finish();
    let mut visitor = CollectingVisitor::new();
    let status = process_trace(&bytes, &mut visitor);
    match status {
        TraceStatus::Failed(DecodeError::BadMagic(magic)) => assert_eq!(magic, 0xdeadbeef),
        other => panic!("expected BadMagic, got {other:?}"),
    }
    // The only visitor invocation is the failure EOS.
    assert_eq!(visitor.seen, vec![Seen::Eos(false)]);
}

#[test]
fn version_mismatch_fails() {
    let bytes = TraceWriter::with_header(TRACE_MAGIC, 2, "app").finish();
    let mut visitor = CollectingVisitor::new();
    let status = process_trace(&bytes, &mut visitor);
    assert!(matches!(
        status,
        TraceStatus::Failed(DecodeError::UnsupportedVersion(2))
    ));
    assert_eq!(visitor.seen, vec![Seen::Eos(false)]);
}

#[test]
fn unknown_tag_fails_but_keeps_prior_events() {
    let mut w = TraceWriter::new();
    w.open_device(0xd1, Some("hw:0"));
    w.u16(0x7fff); // no such tag
    let bytes = w.into_bytes();

    let mut visitor = CollectingVisitor::new();
    let status = process_trace(&bytes, &mut visitor);
    assert!(matches!(
        status,
        TraceStatus::Failed(DecodeError::UnknownTag { tag: 0x7fff, .. })
    ));
    assert_eq!(visitor.events().len(), 1);
    assert!(matches!(
        &visitor.events()[0],
        Seen::Call { tag: EventTag::AlcOpenDevice, .. }
    ));
    assert_eq!(visitor.seen.last(), Some(&Seen::Eos(false)));
}

#[test]
fn missing_eos_is_a_truncation() {
    let mut w = TraceWriter::new();
    w.open_device(0xd1, Some("hw:0"));
    let bytes = w.into_bytes();
    let mut visitor = CollectingVisitor::new();
    let status = process_trace(&bytes, &mut visitor);
    assert!(matches!(
        status,
        TraceStatus::Failed(DecodeError::Truncated { .. })
    ));
    assert_eq!(visitor.events().len(), 1);
}

fn representative_trace() -> (Vec<u8>, Vec<Seen>, u64) {
    let mut w = TraceWriter::new();
    let mut expected = Vec::new();

    w.timestamp_ms = 10;
    w.open_device(0xd1, Some("hw:0"));
    expected.push(Seen::Call {
        tag: EventTag::AlcOpenDevice,
        call: ApiCall::AlcOpenDevice {
            retval: DeviceId(0xd1),
            devicename: Some("hw:0".to_string()),
            major_version: 1,
            minor_version: 1,
            devspec: Some("Test Output Device".to_string()),
            extensions: Some("ALC_EXT_disconnect".to_string()),
        },
        thread_id: 1,
        timestamp_ms: 10,
        trace_scope: 0,
        frames: vec![],
    });

    w.timestamp_ms = 11;
    w.create_context(0xc1, 0xd1, &[al::ALC_FREQUENCY as i32, 48000]);
    expected.push(Seen::Call {
        tag: EventTag::AlcCreateContext,
        call: ApiCall::AlcCreateContext {
            retval: ContextId(0xc1),
            device: DeviceId(0xd1),
            origattrlist: 0xa77a,
            attrcount: 2,
            attrlist: vec![al::ALC_FREQUENCY as i32, 48000],
        },
        thread_id: 1,
        timestamp_ms: 11,
        trace_scope: 0,
        frames: vec![],
    });

    w.timestamp_ms = 12;
    w.make_current(0xc1, true);
    expected.push(Seen::Call {
        tag: EventTag::AlcMakeContextCurrent,
        call: ApiCall::AlcMakeContextCurrent {
            retval: true,
            context: ContextId(0xc1),
        },
        thread_id: 1,
        timestamp_ms: 12,
        trace_scope: 0,
        frames: vec![],
    });

    w.timestamp_ms = 13;
    w.gen_sources(&[42, 43]);
    expected.push(Seen::Call {
        tag: EventTag::AlGenSources,
        call: ApiCall::AlGenSources {
            n: 2,
            orignames: 0xbeef,
            names: vec![42, 43],
        },
        thread_id: 1,
        timestamp_ms: 13,
        trace_scope: 0,
        frames: vec![],
    });

    w.timestamp_ms = 14;
    w.source_f(42, al::AL_PITCH, 2.0);
    expected.push(Seen::Call {
        tag: EventTag::AlSourcef,
        call: ApiCall::AlSourcef {
            name: 42,
            param: al::AL_PITCH,
            value: 2.0,
        },
        thread_id: 1,
        timestamp_ms: 14,
        trace_scope: 0,
        frames: vec![],
    });
    w.source_state_changed_float(42, al::AL_PITCH, 2.0);
    expected.push(Seen::SourceFloat(42, al::AL_PITCH, 2.0));

    w.timestamp_ms = 15;
    w.gen_buffers(&[7]);
    expected.push(Seen::Call {
        tag: EventTag::AlGenBuffers,
        call: ApiCall::AlGenBuffers {
            n: 1,
            orignames: 0xbeef,
            names: vec![7],
        },
        thread_id: 1,
        timestamp_ms: 15,
        trace_scope: 0,
        frames: vec![],
    });

    w.timestamp_ms = 16;
    let pcm_offset = w.buffer_data(7, 0x1101, &[1, 2, 3, 4, 5, 6, 7, 8], 44100);
    expected.push(Seen::Call {
        tag: EventTag::AlBufferData,
        call: ApiCall::AlBufferData {
            name: 7,
            format: 0x1101,
            origdata: 0xdada,
            data: BlobRef {
                offset: pcm_offset,
                len: 8,
            },
            freq: 44100,
        },
        thread_id: 1,
        timestamp_ms: 16,
        trace_scope: 0,
        frames: vec![],
    });

    w.al_error(0xa002);
    expected.push(Seen::AlError(0xa002));
    w.listener_state_changed_floatv(0xc1, al::AL_POSITION, &[1.0, 2.0, 3.0]);
    expected.push(Seen::ListenerFloatv(0xc1, al::AL_POSITION, vec![1.0, 2.0, 3.0]));
    w.context_state_changed_string(0xc1, al::AL_VERSION, "1.1 TEST");
    expected.push(Seen::CtxString(0xc1, al::AL_VERSION, "1.1 TEST".to_string()));
    w.device_state_changed_int(0xd1, al::ALC_CONNECTED, 1);
    expected.push(Seen::DeviceInt(0xd1, al::ALC_CONNECTED, 1));

    (w.finish(), expected, pcm_offset)
}

#[test]
fn round_trip_observes_identical_event_sequence() {
    let (bytes, expected, _) = representative_trace();
    let mut visitor = CollectingVisitor::new();
    let status = process_trace(&bytes, &mut visitor);
    assert!(status.is_finished());
    assert_eq!(visitor.events(), expected.as_slice());
    assert_eq!(visitor.seen.last(), Some(&Seen::Eos(true)));
}

#[test]
fn truncation_at_any_offset_keeps_fully_decoded_prefix() {
    let (bytes, _, _) = representative_trace();

    let mut full = CollectingVisitor::new();
    assert!(process_trace(&bytes, &mut full).is_finished());
    let full_events = full.events().to_vec();

    for cut in 0..bytes.len() {
        let mut visitor = CollectingVisitor::new();
        let status = process_trace(&bytes[..cut], &mut visitor);
        assert!(
            matches!(status, TraceStatus::Failed(_)),
            "cut at {cut} of {} should fail",
            bytes.len()
        );
        assert_eq!(
            visitor.seen.last(),
            Some(&Seen::Eos(false)),
            "cut at {cut}"
        );
        let events = visitor.events();
        assert!(
            events.len() <= full_events.len()
                && events == &full_events[..events.len()],
            "cut at {cut}: events are not a prefix of the full decode"
        );
    }
}

#[test]
fn progress_cancellation_stops_dispatch() {
    let (bytes, _, _) = representative_trace();
    let mut visitor = CollectingVisitor::new();
    visitor.cancel_after_progress = Some(2);
    let status = process_trace(&bytes, &mut visitor);
    assert!(matches!(status, TraceStatus::Cancelled));
    assert_eq!(visitor.events().len(), 2);
    assert_eq!(visitor.seen.last(), Some(&Seen::Eos(false)));
}

#[test]
fn thread_ids_are_remapped_to_small_stable_integers() {
    let mut w = TraceWriter::new();
    w.thread_id = 0xffee_ddcc_bbaa_0099;
    w.source_play(1);
    w.thread_id = 0x0123_4567_89ab_cdef;
    w.source_play(2);
    w.thread_id = 0xffee_ddcc_bbaa_0099;
    w.source_play(3);
    let bytes = w.finish();

    let mut visitor = CollectingVisitor::new();
    assert!(process_trace(&bytes, &mut visitor).is_finished());
    let ids: Vec<u32> = visitor
        .events()
        .iter()
        .map(|seen| match seen {
            Seen::Call { thread_id, .. } => *thread_id,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(ids, vec![1, 2, 1]);
}

#[test]
fn callstack_symbols_apply_to_subsequent_events() {
    let mut w = TraceWriter::new();
    w.frames = vec![0x1000, 0x2000];
    w.source_play(1);
    w.new_callstack_syms(&[(0x1000, "game_audio_update"), (0x2000, "main_loop")]);
    w.source_play(2);
    let bytes = w.finish();

    let mut visitor = CollectingVisitor::new();
    assert!(process_trace(&bytes, &mut visitor).is_finished());

    match &visitor.events()[0] {
        Seen::Call { frames, .. } => {
            assert_eq!(frames, &vec![(0x1000, None), (0x2000, None)]);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &visitor.events()[1] {
        Seen::Call { frames, .. } => {
            assert_eq!(
                frames,
                &vec![
                    (0x1000, Some("game_audio_update".to_string())),
                    (0x2000, Some("main_loop".to_string())),
                ]
            );
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn trace_scope_is_reported_per_record() {
    let mut w = TraceWriter::new();
    w.push_scope("mixer");
    w.trace_scope = 1;
    w.source_play(1);
    w.trace_scope = 0;
    w.pop_scope();
    let bytes = w.finish();

    let mut visitor = CollectingVisitor::new();
    assert!(process_trace(&bytes, &mut visitor).is_finished());
    let scopes: Vec<u32> = visitor
        .events()
        .iter()
        .map(|seen| match seen {
            Seen::Call { trace_scope, .. } => *trace_scope,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(scopes, vec![0, 1, 0]);
}
