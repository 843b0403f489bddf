//! Admission checks run before an intent touches the engine.
//!
//! Each check is pure: it reads the session and either names the acting
//! slot or says why the intent is refused.

use crate::core::{Coordinate, PlayerId, Slot};
use crate::error::{Result, SessionError};
use crate::session::{Phase, SessionState};

/// Resolve `player` to a seated slot.
pub fn seat_of(session: &SessionState, player: PlayerId) -> Result<Slot> {
    session.slot_of(player).ok_or(SessionError::UnknownPlayer)
}

/// Require the session to be in `expected`.
pub fn require_phase(session: &SessionState, expected: Phase) -> Result<()> {
    if session.phase == expected {
        Ok(())
    } else {
        Err(SessionError::WrongPhase {
            expected,
            actual: session.phase,
        })
    }
}

/// Admit an attack on `coordinate`.
///
/// The player must be seated, in battle, holding the turn, and aiming at a
/// cell on the grid. A refused attack never costs the attacker the turn.
pub fn admit_attack(session: &SessionState, player: PlayerId, coordinate: Coordinate) -> Result<Slot> {
    let slot = seat_of(session, player)?;
    require_phase(session, Phase::Battle)?;
    if session.current_turn != slot {
        return Err(SessionError::NotYourTurn);
    }
    if !coordinate.in_bounds() {
        return Err(SessionError::OutOfBounds(coordinate));
    }
    Ok(slot)
}

/// Admit a ping sweep: seated and in battle.
///
/// The ability flag and the optional turn gate are checked by the engine.
pub fn admit_sweep(session: &SessionState, player: PlayerId) -> Result<Slot> {
    let slot = seat_of(session, player)?;
    require_phase(session, Phase::Battle)?;
    Ok(slot)
}
