use serde::{Deserialize, Serialize};

/// Tissue identity of a lattice site or an agent.
///
/// The set is closed: every site and agent always carries exactly one of
/// these variants. Integer tags only exist at the rendering boundary, see
/// [`CellType::from_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellType {
    Empty,
    /// Undifferentiated cell (the "stem" cell of the off-lattice model).
    Embryo,
    Head,
    Brain,
    Body,
    ArmLeft,
    ArmRight,
    LegLeft,
    LegRight,
    Placenta,
    Umbilical,
    Heart,
    Liver,
    Stomach,
    Intestine,
    Kidney,
    Lung,
    Eye,
    Bladder,
}

impl CellType {
    pub const COUNT: usize = 19;

    /// All variants in dense-index order.
    pub const ALL: [CellType; Self::COUNT] = [
        CellType::Empty,
        CellType::Embryo,
        CellType::Head,
        CellType::Brain,
        CellType::Body,
        CellType::ArmLeft,
        CellType::ArmRight,
        CellType::LegLeft,
        CellType::LegRight,
        CellType::Placenta,
        CellType::Umbilical,
        CellType::Heart,
        CellType::Liver,
        CellType::Stomach,
        CellType::Intestine,
        CellType::Kidney,
        CellType::Lung,
        CellType::Eye,
        CellType::Bladder,
    ];

    pub const ORGANS: [CellType; 8] = [
        CellType::Heart,
        CellType::Liver,
        CellType::Stomach,
        CellType::Intestine,
        CellType::Kidney,
        CellType::Lung,
        CellType::Eye,
        CellType::Bladder,
    ];

    /// Dense index in `0..COUNT`, used for lookup tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Legacy integer tag used by renderers and exported grids.
    pub fn tag(self) -> u8 {
        match self {
            CellType::Empty => 0,
            CellType::Embryo => 1,
            CellType::Head => 2,
            CellType::Brain => 3,
            CellType::Body => 4,
            CellType::ArmLeft => 5,
            CellType::ArmRight => 6,
            CellType::LegLeft => 7,
            CellType::LegRight => 8,
            CellType::Placenta => 9,
            CellType::Umbilical => 10,
            CellType::Heart => 20,
            CellType::Liver => 21,
            CellType::Stomach => 22,
            CellType::Intestine => 23,
            CellType::Kidney => 24,
            CellType::Lung => 25,
            CellType::Eye => 26,
            CellType::Bladder => 27,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.tag() == tag)
    }

    /// Boundary conversion for renderers: unknown tags draw as empty space.
    pub fn from_tag_or_empty(tag: u8) -> Self {
        Self::from_tag(tag).unwrap_or(CellType::Empty)
    }

    pub fn label(self) -> &'static str {
        match self {
            CellType::Empty => "Empty",
            CellType::Embryo => "Embryo",
            CellType::Head => "Head",
            CellType::Brain => "Brain",
            CellType::Body => "Body",
            CellType::ArmLeft => "Left arm",
            CellType::ArmRight => "Right arm",
            CellType::LegLeft => "Left leg",
            CellType::LegRight => "Right leg",
            CellType::Placenta => "Placenta",
            CellType::Umbilical => "Umbilical",
            CellType::Heart => "Heart",
            CellType::Liver => "Liver",
            CellType::Stomach => "Stomach",
            CellType::Intestine => "Intestine",
            CellType::Kidney => "Kidney",
            CellType::Lung => "Lung",
            CellType::Eye => "Eye",
            CellType::Bladder => "Bladder",
        }
    }

    /// Display color (r, g, b). Organs use colors no other type shares.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            CellType::Empty => (12, 12, 28),
            CellType::Embryo => (255, 140, 160),
            CellType::Head => (255, 200, 160),
            CellType::Brain => (255, 160, 120),
            CellType::Body => (255, 150, 170),
            CellType::ArmLeft | CellType::ArmRight => (220, 130, 150),
            CellType::LegLeft | CellType::LegRight => (200, 110, 140),
            CellType::Placenta => (120, 90, 180),
            CellType::Umbilical => (160, 130, 210),
            CellType::Heart => (255, 0, 0),
            CellType::Liver => (0, 0, 255),
            CellType::Stomach => (255, 255, 255),
            CellType::Intestine => (139, 69, 19),
            CellType::Kidney => (255, 255, 0),
            CellType::Lung => (255, 105, 180),
            CellType::Eye => (0, 0, 0),
            CellType::Bladder => (0, 0, 139),
        }
    }

    pub fn is_organ(self) -> bool {
        Self::ORGANS.contains(&self)
    }

    pub fn is_limb(self) -> bool {
        matches!(
            self,
            CellType::ArmLeft | CellType::ArmRight | CellType::LegLeft | CellType::LegRight
        )
    }

    pub fn is_head_region(self) -> bool {
        matches!(self, CellType::Head | CellType::Brain)
    }

    /// Types that may still take on a fetal identity.
    pub fn is_undifferentiated(self) -> bool {
        matches!(self, CellType::Empty | CellType::Embryo)
    }

    /// Whether differentiation may relabel `self` as `target`.
    ///
    /// Precedence is Head/Brain > organs > Body > limbs. Brain only forms
    /// inside existing head tissue and eyes may claim head tissue. An organ
    /// keeps its sites against every other organ. Placenta is never
    /// relabeled.
    pub fn may_become(self, target: CellType) -> bool {
        if self == CellType::Placenta || self == target {
            return false;
        }
        match target {
            CellType::Brain => self == CellType::Head,
            CellType::Head => self != CellType::Brain && self != CellType::Eye,
            CellType::Eye => self != CellType::Brain && !self.is_organ(),
            t if t.is_organ() => !self.is_head_region() && !self.is_organ(),
            CellType::Body => !self.is_head_region() && !self.is_organ(),
            t if t.is_limb() => !self.is_head_region() && !self.is_organ() && self != CellType::Body,
            CellType::Umbilical => self.is_undifferentiated(),
            _ => false,
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_index_matches_all_order() {
        for (i, t) in CellType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn test_tag_roundtrip_and_fallback() {
        assert_eq!(CellType::from_tag(20), Some(CellType::Heart));
        assert_eq!(CellType::from_tag(11), None);
        assert_eq!(CellType::from_tag_or_empty(99), CellType::Empty);
        for t in CellType::ALL {
            assert_eq!(CellType::from_tag(t.tag()), Some(t));
        }
    }

    #[test]
    fn test_body_and_limbs_never_overwrite_head() {
        for target in [
            CellType::Body,
            CellType::ArmLeft,
            CellType::ArmRight,
            CellType::LegLeft,
            CellType::LegRight,
        ] {
            assert!(!CellType::Head.may_become(target));
            assert!(!CellType::Brain.may_become(target));
        }
    }

    #[test]
    fn test_brain_requires_head() {
        assert!(CellType::Head.may_become(CellType::Brain));
        assert!(!CellType::Embryo.may_become(CellType::Brain));
        assert!(!CellType::Body.may_become(CellType::Brain));
    }

    #[test]
    fn test_organs_keep_their_sites() {
        assert!(CellType::Body.may_become(CellType::Heart));
        assert!(!CellType::Heart.may_become(CellType::Lung));
        assert!(!CellType::Heart.may_become(CellType::Body));
        assert!(CellType::Heart.may_become(CellType::Head));
        assert!(CellType::Head.may_become(CellType::Eye));
        assert!(!CellType::Eye.may_become(CellType::Head));
    }

    #[test]
    fn test_umbilical_only_from_undifferentiated() {
        assert!(CellType::Empty.may_become(CellType::Umbilical));
        assert!(CellType::Embryo.may_become(CellType::Umbilical));
        assert!(!CellType::Body.may_become(CellType::Umbilical));
    }

    #[test]
    fn test_placenta_is_never_relabeled() {
        for t in CellType::ALL {
            assert!(!CellType::Placenta.may_become(t));
        }
    }

    #[test]
    fn test_organ_colors_are_unique() {
        let mut colors: Vec<_> = CellType::ORGANS.iter().map(|o| o.color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), CellType::ORGANS.len());
        for t in CellType::ALL.iter().filter(|t| !t.is_organ()) {
            assert!(!colors.contains(&t.color()), "{t} shares an organ color");
        }
    }
}
