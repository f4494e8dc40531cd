//! Maps validated frames to the projector for their `(class, id)`.

use log::debug;

use crate::{
    error::DispatchError,
    frame::{Frame, MessageClass},
    store::NavStore,
    ubx_packets::{NavSolution, ReceiverId, SecUniqId, UbxPacketMeta},
};

/// Copies a validated payload into the store
pub type Projector = fn(&[u8], &NavStore) -> Result<Dispatched, DispatchError>;

/// Which record a frame updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Navigation,
    Identity,
}

const PROJECTORS: &[(MessageClass, u8, Projector)] = &[
    (NavSolution::CLASS, NavSolution::ID, project_nav_pvt),
    (SecUniqId::CLASS, SecUniqId::ID, project_sec_uniqid),
];

fn project_nav_pvt(payload: &[u8], store: &NavStore) -> Result<Dispatched, DispatchError> {
    let solution = NavSolution::from_payload(payload)?;
    store.update_navigation(solution);
    Ok(Dispatched::Navigation)
}

fn project_sec_uniqid(payload: &[u8], store: &NavStore) -> Result<Dispatched, DispatchError> {
    let packet = SecUniqId::from_payload(payload)?;
    store.update_identity(ReceiverId::from(&packet));
    Ok(Dispatched::Identity)
}

/// Projector registered for `(class, id)`, if any
pub fn projector_for(class: MessageClass, id: u8) -> Option<Projector> {
    PROJECTORS
        .iter()
        .find(|(c, i, _)| *c == class && *i == id)
        .map(|(_, _, projector)| *projector)
}

/// Project `frame` into `store`.
///
/// Frames without a projector are reported, not fatal: the store is left
/// untouched and the caller moves on to the next frame.
pub fn dispatch(frame: &Frame, store: &NavStore) -> Result<Dispatched, DispatchError> {
    let class = frame.message_class()?;
    match projector_for(class, frame.msg_id()) {
        Some(projector) => projector(frame.payload(), store),
        None => {
            debug!("No projector for {}-0x{:02x}", class, frame.msg_id());
            Err(DispatchError::UnimplementedClass {
                class,
                id: frame.msg_id(),
            })
        },
    }
}
