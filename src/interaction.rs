//! Pointer interactions between rendered syntenic regions.
//!
//! Every registered region starts out neither ghosted nor hidden. Events are
//! always scoped to the *other* registered regions, i.e. the registry minus the
//! region under the pointer:
//!
//! - a click hides all other regions, or shows them again if they are hidden;
//! - entering a region ghosts all other regions;
//! - leaving a region clears the ghosting of every region.
//!
//! Handlers run one at a time on the thread owning the [`Scene`], each flipping
//! the flags of all affected regions before returning.

use super::scene::{NodeId, Scene};
use super::synteny::SyntenyError;

/// Class marking a region de-emphasised while a peer is highlighted.
pub const GHOST_CLASS: &str = "ghost";

/// Class marking a region hidden while a peer is isolated.
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Click,
    PointerEnter,
    PointerLeave,
}

/// The visual flags of a rendered syntenic region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionState {
    pub ghosted: bool,
    pub hidden: bool,
}

impl RegionState {
    pub fn is_normal(&self) -> bool {
        !self.ghosted && !self.hidden
    }
}

/// Read the flags of a region.
pub fn region_state(scene: &Scene, region: NodeId) -> RegionState {
    RegionState {
        ghosted: scene.classed(region, GHOST_CLASS),
        hidden: scene.classed(region, HIDDEN_CLASS),
    }
}

/// The registered regions but `target`, in document order.
fn others(scene: &Scene, target: NodeId) -> Vec<NodeId> {
    let mut regions = scene.synteny_regions_in_document_order();
    regions.retain(|&id| id != target);
    regions
}

/// Toggle `hidden` on every region but `target`.
///
/// The new state is the inverse of the current state of the first other
/// region in document order, and is applied to all others alike, whatever
/// their individual states were.
pub fn on_click(scene: &mut Scene, target: NodeId) -> Result<(), SyntenyError> {
    let others = others(scene, target);
    let Some(&representative) = others.first() else {
        return Ok(());
    };
    let hide = !scene.classed(representative, HIDDEN_CLASS);
    for id in others {
        scene.set_classed(id, HIDDEN_CLASS, hide)?;
    }
    Ok(())
}

/// Ghost every region but `target`.
pub fn on_pointer_enter(scene: &mut Scene, target: NodeId) -> Result<(), SyntenyError> {
    for id in others(scene, target) {
        scene.set_classed(id, GHOST_CLASS, true)?;
    }
    Ok(())
}

/// Clear the ghosting of every region, `target` included.
pub fn on_pointer_leave(scene: &mut Scene, _target: NodeId) -> Result<(), SyntenyError> {
    let regions = scene.synteny_regions().to_vec();
    for id in regions {
        scene.set_classed(id, GHOST_CLASS, false)?;
    }
    Ok(())
}

/// Deliver a pointer event to a rendered syntenic region.
pub fn dispatch(
    scene: &mut Scene,
    target: NodeId,
    event: PointerEvent,
) -> Result<(), SyntenyError> {
    if !scene.is_synteny_region(target) {
        return Err(SyntenyError::UnknownRegion(format!("{:?}", target)));
    }
    log::trace!("{:?} on syntenic region {:?}", event, target);
    match event {
        PointerEvent::Click => on_click(scene, target),
        PointerEvent::PointerEnter => on_pointer_enter(scene, target),
        PointerEvent::PointerLeave => on_pointer_leave(scene, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Element;

    fn scene_with_regions(n: usize) -> (Scene, Vec<NodeId>) {
        let mut scene = Scene::new("#_ideogram");
        let layer = scene.insert_first(scene.root(), Element::Group).unwrap();
        let regions = (0..n)
            .map(|_| {
                let g = scene.append(layer, Element::Group).unwrap();
                scene.register_synteny_region(g).unwrap();
                g
            })
            .collect();
        (scene, regions)
    }

    #[test]
    fn test_initial_state_normal() {
        let (scene, regions) = scene_with_regions(2);
        for id in regions {
            assert!(region_state(&scene, id).is_normal());
        }
    }

    #[test]
    fn test_click_isolates_then_restores() {
        let (mut scene, r) = scene_with_regions(2);
        dispatch(&mut scene, r[0], PointerEvent::Click).unwrap();
        assert!(!region_state(&scene, r[0]).hidden);
        assert!(region_state(&scene, r[1]).hidden);

        dispatch(&mut scene, r[0], PointerEvent::Click).unwrap();
        assert!(!region_state(&scene, r[0]).hidden);
        assert!(!region_state(&scene, r[1]).hidden);
    }

    #[test]
    fn test_click_follows_first_other_region() {
        let (mut scene, r) = scene_with_regions(3);
        // heterogeneous peers: the first other region decides
        scene.set_classed(r[2], HIDDEN_CLASS, true).unwrap();
        on_click(&mut scene, r[0]).unwrap();
        assert!(region_state(&scene, r[1]).hidden);
        assert!(region_state(&scene, r[2]).hidden);
    }

    #[test]
    fn test_click_reads_first_region_in_document_order() {
        let (mut scene, r) = scene_with_regions(2);
        on_click(&mut scene, r[0]).unwrap();
        assert!(region_state(&scene, r[1]).hidden);

        // a later layer goes first in the document
        let layer = scene.insert_first(scene.root(), Element::Group).unwrap();
        let late = scene.append(layer, Element::Group).unwrap();
        scene.register_synteny_region(late).unwrap();

        on_click(&mut scene, r[0]).unwrap();
        assert!(region_state(&scene, late).hidden);
        assert!(region_state(&scene, r[1]).hidden);
        assert!(!region_state(&scene, r[0]).hidden);
    }

    #[test]
    fn test_click_alone_is_noop() {
        let (mut scene, r) = scene_with_regions(1);
        dispatch(&mut scene, r[0], PointerEvent::Click).unwrap();
        assert!(region_state(&scene, r[0]).is_normal());
    }

    #[test]
    fn test_enter_ghosts_others() {
        let (mut scene, r) = scene_with_regions(3);
        dispatch(&mut scene, r[0], PointerEvent::PointerEnter).unwrap();
        assert!(!region_state(&scene, r[0]).ghosted);
        assert!(region_state(&scene, r[1]).ghosted);
        assert!(region_state(&scene, r[2]).ghosted);
    }

    #[test]
    fn test_leave_clears_all() {
        let (mut scene, r) = scene_with_regions(3);
        dispatch(&mut scene, r[0], PointerEvent::PointerEnter).unwrap();
        dispatch(&mut scene, r[1], PointerEvent::PointerEnter).unwrap();
        assert!(region_state(&scene, r[0]).ghosted);
        dispatch(&mut scene, r[2], PointerEvent::PointerLeave).unwrap();
        for id in r {
            assert!(!region_state(&scene, id).ghosted);
        }
    }

    #[test]
    fn test_ghosted_and_hidden_independent() {
        let (mut scene, r) = scene_with_regions(2);
        dispatch(&mut scene, r[0], PointerEvent::PointerEnter).unwrap();
        dispatch(&mut scene, r[0], PointerEvent::Click).unwrap();
        assert_eq!(
            region_state(&scene, r[1]),
            RegionState {
                ghosted: true,
                hidden: true
            }
        );
    }

    #[test]
    fn test_unregistered_target() {
        let (mut scene, _) = scene_with_regions(2);
        let root = scene.root();
        assert!(matches!(
            dispatch(&mut scene, root, PointerEvent::Click),
            Err(SyntenyError::UnknownRegion(_))
        ));
    }
}
