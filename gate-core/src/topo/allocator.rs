use crate::error::{GateError, Result};
use crate::toolkit::{FrameClass, Toolkit};
use std::collections::HashSet;

/// First id of the range reserved for topocentric frames
pub const FRAME_ID_BEGIN: i32 = 1_400_000;
/// Exclusive upper bound of the reserved range
pub const FRAME_ID_END: i32 = 2_000_000;

/// Lowest id in `[FRAME_ID_BEGIN, FRAME_ID_END)` that the toolkit does not
/// report as a TK frame.
///
/// The used set is fetched fresh on every call since other code may define
/// or remove frames between two allocations.
pub fn find_free_id<T: Toolkit + ?Sized>(toolkit: &T) -> Result<i32> {
    let used: HashSet<i32> = toolkit
        .used_frame_ids(FrameClass::Tk)
        .into_iter()
        .filter(|id| (FRAME_ID_BEGIN..FRAME_ID_END).contains(id))
        .collect();

    let id = lowest_unused(&used, FRAME_ID_BEGIN, FRAME_ID_END).ok_or(
        GateError::FrameIdSpaceExhausted {
            begin: FRAME_ID_BEGIN,
            end: FRAME_ID_END,
        },
    )?;

    tracing::trace!(frame_id = id, used = used.len(), "Allocated frame id");
    Ok(id)
}

fn lowest_unused(used: &HashSet<i32>, begin: i32, end: i32) -> Option<i32> {
    (begin..end).find(|candidate| !used.contains(candidate))
}
