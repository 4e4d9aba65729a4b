//! Placeholder record source for plain-text input.
//!
//! Plain-text event dumps have no agreed layout yet, so this source ignores
//! the file content and yields a single photon without parent in event 0.
//! It is enough to exercise the whole chain end to end.

use crate::model::{IdentityCode, NO_PARENT, ParticleRecord};

/// Identity code of the placeholder particle (photon)
pub const STUB_IDENTITY_CODE: IdentityCode = 22;

/// Status flag of the placeholder particle
pub const STUB_STATUS: i32 = 3;

/// Returns the fixed single-record, single-event sequence.
///
/// The event bound is applied later by
/// [partition_events](crate::model::partition_events).
pub fn read_stub_records() -> Vec<ParticleRecord> {
    vec![ParticleRecord::new(0, 0, STUB_IDENTITY_CODE, NO_PARENT, STUB_STATUS)]
}
