//! Particle record module.
//!
//! - `ParticleRecord`: one row of generator-level truth for a single particle.
//! - `ParticleIndex` identifies a particle within its event.
//! - `IdentityCode` is the (PDG) particle type code.

/// Index of a particle within its event; doubles as graph node identifier.
pub type ParticleIndex = usize;

/// Signed particle identity code (PDG numbering scheme).
pub type IdentityCode = i32;

/// Parent index value meaning "no parent in this record set".
pub const NO_PARENT: i64 = -1;

// =#========================================================================#=
// PARTICLE RECORD
// =#========================================================================#=
/// One particle of one simulated event, as delivered by a record source.
///
/// Records are immutable once read; all fields are exposed through getters.
/// The `parent_index` is kept as read from the source (a signed integer), so
/// that the graph builder can tell the [NO_PARENT] sentinel apart from broken
/// references.
///
/// # Example
/// ```
/// use decaygraph::model::{ParticleRecord, NO_PARENT};
///
/// let photon = ParticleRecord::new(0, 3, 22, 1, 0);
/// assert_eq!(photon.parent(), Some(1));
///
/// let beam = ParticleRecord::new(0, 0, 2212, NO_PARENT, 4);
/// assert!(beam.is_root());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleRecord {
    event_index: usize,
    particle_index: ParticleIndex,
    identity_code: IdentityCode,
    parent_index: i64,
    status: i32,
}

impl ParticleRecord {
    /// Creates a new record.
    ///
    /// # Arguments
    /// * `event_index` - Event this particle belongs to
    /// * `particle_index` - Index of the particle, unique within its event
    /// * `identity_code` - Particle type code
    /// * `parent_index` - Index of the parent particle, or [NO_PARENT]
    /// * `status` - Auxiliary status flag, carried through unchanged
    pub fn new(
        event_index: usize,
        particle_index: ParticleIndex,
        identity_code: IdentityCode,
        parent_index: i64,
        status: i32,
    ) -> Self {
        Self {
            event_index,
            particle_index,
            identity_code,
            parent_index,
            status,
        }
    }

    pub fn event_index(&self) -> usize {
        self.event_index
    }

    pub fn particle_index(&self) -> ParticleIndex {
        self.particle_index
    }

    pub fn identity_code(&self) -> IdentityCode {
        self.identity_code
    }

    /// Returns the raw parent index, possibly [NO_PARENT].
    pub fn parent_index(&self) -> i64 {
        self.parent_index
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    /// Returns whether this particle has no recorded parent.
    pub fn is_root(&self) -> bool {
        self.parent_index == NO_PARENT
    }

    /// Returns the parent index, or `None` for the [NO_PARENT] sentinel.
    ///
    /// Other negative values are returned as they are; they never match an
    /// existing particle.
    pub fn parent(&self) -> Option<i64> {
        if self.is_root() { None } else { Some(self.parent_index) }
    }
}
