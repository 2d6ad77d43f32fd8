use glam::IVec2;

/// An axis-aligned bounding box, in pixels.
///
/// Every collidable thing on the board (walls, food, ghosts, Pac-Man) is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hitbox {
    /// Top-left corner.
    pub pos: IVec2,
    /// Width and height.
    pub size: IVec2,
}

impl Hitbox {
    pub const fn new(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    /// The bottom-right corner (exclusive).
    pub fn max(&self) -> IVec2 {
        self.pos + self.size
    }

    /// Returns true if the two boxes overlap on both axes.
    ///
    /// Boxes that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Trait for entities that can participate in collision detection.
pub trait Collidable {
    /// Returns the current bounding box of this entity.
    fn hitbox(&self) -> Hitbox;

    /// Checks if this entity is colliding with another entity.
    fn is_colliding_with(&self, other: &dyn Collidable) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }

    /// Checks if this entity overlaps any of the given boxes.
    fn collides_with_any(&self, others: &[Hitbox]) -> bool {
        let hitbox = self.hitbox();
        others.iter().any(|other| hitbox.overlaps(other))
    }
}

impl Collidable for Hitbox {
    fn hitbox(&self) -> Hitbox {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: i32, y: i32) -> Hitbox {
        Hitbox::new(IVec2::new(x, y), IVec2::splat(32))
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = tile(0, 0);
        let b = tile(16, 16);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        assert!(!tile(0, 0).overlaps(&tile(32, 0)));
        assert!(!tile(0, 0).overlaps(&tile(0, 32)));
        assert!(!tile(0, 0).overlaps(&tile(32, 32)));
    }

    #[test]
    fn test_single_axis_overlap_is_not_enough() {
        // Same row, but far apart horizontally.
        assert!(!tile(0, 0).overlaps(&tile(64, 8)));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let food = Hitbox::new(IVec2::new(14, 14), IVec2::splat(4));
        assert!(tile(0, 0).overlaps(&food));
        assert!(food.overlaps(&tile(0, 0)));
    }

    #[test]
    fn test_collides_with_any() {
        let walls = [tile(64, 0), tile(96, 0)];
        assert!(tile(70, 0).collides_with_any(&walls));
        assert!(!tile(0, 0).collides_with_any(&walls));
        assert!(!tile(0, 0).collides_with_any(&[]));
    }
}
