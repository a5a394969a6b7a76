//! Playback core for alTrace logs.
//!
//! A companion shim records every AL/ALC call a program makes into a binary
//! trace. This crate consumes such traces: it decodes the stream, rebuilds
//! the logical AL state after every recorded call, and exposes the result
//! as an append-only [`CallStore`] of [`ApiCallRecord`]s, each holding a
//! structurally-shared snapshot of the full state at that moment. A UI, a
//! text dumper or a re-driver can then ask "what did the world look like
//! right after call N?" without rescanning the log.
//!
//! The usual pipeline:
//!
//! ```no_run
//! use altrace_playback::{process_trace_file, StateBuilder};
//!
//! let mut builder = StateBuilder::new();
//! process_trace_file("game.altrace", &mut builder)?;
//! let store = builder.into_store();
//! for record in &store {
//!     let snapshot = record.snapshot();
//!     let devices = snapshot.get("global://numdevices").unwrap_or(0);
//!     println!("{}: {} devices open", record.fn_name(), devices);
//! }
//! # Ok::<(), altrace_playback::DecodeError>(())
//! ```
//!
//! Custom consumers implement [`TraceVisitor`] directly and feed it to
//! [`process_trace`].

pub mod al;
mod decoder;
mod error;
mod event;
mod raw_data;
pub mod state;
mod state_builder;
mod store;
mod string_table;

use std::fs::File;
use std::path::Path;

pub use phamt::{Trie, TrieSnapshot};

pub use crate::decoder::{
    CallerInfo, CallstackFrame, TraceStatus, TraceVisitor, TRACE_FORMAT_VERSION, TRACE_MAGIC,
};
pub use crate::error::DecodeError;
pub use crate::event::{ApiCall, ContextId, DeviceId, EventTag};
pub use crate::raw_data::{BlobRef, RawData, NULL_STRING_SENTINEL};
pub use crate::state_builder::StateBuilder;
pub use crate::store::{ApiCallRecord, Arg, ArgValue, CallStore, RecordFrame};
pub use crate::string_table::{StringHandle, StringTable};

use crate::decoder::TraceDecoder;

/// Walks a complete in-memory trace, dispatching every event to `visitor`.
///
/// Magic, version and framing are validated; any violation stops the walk
/// with `eos(okay=false)` and a `Failed` status. Events dispatched before
/// the failure remain valid.
pub fn process_trace<V: TraceVisitor>(data: &[u8], visitor: &mut V) -> TraceStatus {
    TraceDecoder::process(data, visitor)
}

/// Maps `path` into memory and decodes it with [`process_trace`].
///
/// The `Err` case covers only opening and mapping the file; decode failures
/// come back as [`TraceStatus::Failed`].
pub fn process_trace_file<P: AsRef<Path>, V: TraceVisitor>(
    path: P,
    visitor: &mut V,
) -> Result<TraceStatus, DecodeError> {
    let file = File::open(path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    Ok(TraceDecoder::process(&mmap, visitor))
}
