//! Swept rectangle-vs-region resolution.
//!
//! Every test here compares the rectangle before a move (`last`) with the
//! rectangle after it (`new`). A side only counts as hit when the mover was
//! outside it last tick and is past it now, so anything that starts a tick
//! already overlapping a region is left where it is.

use crate::entities::Wall;
use crate::geometry::Rect;
use crate::map::{SideSet, TriggerRegion};

/// Region sides the mover passed through this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Crossing {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Crossing {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

pub fn crossed_left(last: &Rect, new: &Rect, region: &Rect) -> bool {
    last.right() <= region.left() && new.right() > region.left()
}

pub fn crossed_right(last: &Rect, new: &Rect, region: &Rect) -> bool {
    last.left() >= region.right() && new.left() < region.right()
}

pub fn crossed_top(last: &Rect, new: &Rect, region: &Rect) -> bool {
    last.bottom() <= region.top() && new.bottom() > region.top()
}

pub fn crossed_bottom(last: &Rect, new: &Rect, region: &Rect) -> bool {
    last.top() >= region.bottom() && new.top() < region.bottom()
}

/// Which of the active `sides` of `region` were crossed, without moving anything.
pub fn crossing(last: &Rect, new: &Rect, region: &Rect, sides: SideSet) -> Crossing {
    Crossing {
        left: sides.left && crossed_left(last, new, region),
        right: sides.right && crossed_right(last, new, region),
        top: sides.top && crossed_top(last, new, region),
        bottom: sides.bottom && crossed_bottom(last, new, region),
    }
}

/// What a mover touched while being pushed out of one blocker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockerContact {
    /// Wall on the mover's side, e.g. `Wall::Right` after running into a
    /// region's left face.
    pub wall: Option<Wall>,
    pub landed: bool,
    pub bumped_head: bool,
}

/// Clamps `new` against one blocker region.
///
/// Sides are checked left, right, top, bottom, each against the rectangle
/// as already clamped by the earlier sides.
pub fn resolve_blocker(last: &Rect, new: &mut Rect, region: &TriggerRegion) -> BlockerContact {
    let mut contact = BlockerContact::default();
    let cell = &region.rect;
    let sides = region.sides;

    if sides.left && crossed_left(last, new, cell) {
        new.set_right(cell.left());
        contact.wall = Some(Wall::Right);
    }
    if sides.right && crossed_right(last, new, cell) {
        new.set_left(cell.right());
        contact.wall = Some(Wall::Left);
    }
    if sides.top && crossed_top(last, new, cell) {
        new.set_bottom(cell.top());
        contact.landed = true;
    }
    if sides.bottom && crossed_bottom(last, new, cell) {
        new.set_top(cell.bottom());
        contact.bumped_head = true;
    }
    contact
}

/// Ladder checks; both can hold in the same tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LadderContact {
    /// `new` lies horizontally within the ladder.
    pub inside: bool,
    /// `new` dropped through the ladder's top edge.
    pub crossed_top: bool,
}

pub fn ladder_contact(last: &Rect, new: &Rect, region: &Rect) -> LadderContact {
    LadderContact {
        inside: new.left() >= region.left() && new.right() <= region.right(),
        crossed_top: crossed_top(last, new, region),
    }
}
