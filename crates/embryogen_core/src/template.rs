//! Anatomical template: where each body part should form at a given week.
//!
//! The layout is authored in a canonical 600 x 600 frame as offsets from the
//! frame center (head up, legs down) and placed onto a concrete tissue with a
//! [`Frame`]. Weeks are bucketed to match the milestone table; inside a bucket
//! a linear `growth` interpolant in `[0, 1]` scales radii and offsets, so
//! radii never shrink as the week advances within one bucket.
//!
//! Every anchor of a bucket is returned regardless of its minimum week. The
//! differentiation pass applies [`AnchorKind::min_week`] itself.

use embryogen_data::CellType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Edge length of the frame the layout is authored in.
pub const CANONICAL_EXTENT: f64 = 600.0;

/// One named anatomical structure.
///
/// Declaration order is the order the lattice differentiation pass visits
/// anchors in: head first, then brain, body, limbs and the organs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Embryo,
    Head,
    Brain,
    Body,
    ArmLeft,
    ArmRight,
    LegLeft,
    LegRight,
    EyeLeft,
    EyeRight,
    Heart,
    Lungs,
    Liver,
    Stomach,
    Intestine,
    KidneyLeft,
    KidneyRight,
    Bladder,
}

/// Distance metric of an anchor. Limbs use elongated diamonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorShape {
    Round,
    /// Stretched horizontally.
    Arm,
    /// Stretched vertically.
    Leg,
}

impl AnchorShape {
    #[inline]
    pub fn distance(self, dx: f64, dy: f64) -> f64 {
        match self {
            AnchorShape::Round => dx.hypot(dy),
            AnchorShape::Arm => dy.abs() + 0.6 * dx.abs(),
            AnchorShape::Leg => 0.6 * dy.abs() + dx.abs(),
        }
    }
}

impl AnchorKind {
    pub const ALL: [AnchorKind; 18] = [
        AnchorKind::Embryo,
        AnchorKind::Head,
        AnchorKind::Brain,
        AnchorKind::Body,
        AnchorKind::ArmLeft,
        AnchorKind::ArmRight,
        AnchorKind::LegLeft,
        AnchorKind::LegRight,
        AnchorKind::EyeLeft,
        AnchorKind::EyeRight,
        AnchorKind::Heart,
        AnchorKind::Lungs,
        AnchorKind::Liver,
        AnchorKind::Stomach,
        AnchorKind::Intestine,
        AnchorKind::KidneyLeft,
        AnchorKind::KidneyRight,
        AnchorKind::Bladder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnchorKind::Embryo => "embryo",
            AnchorKind::Head => "head",
            AnchorKind::Brain => "brain",
            AnchorKind::Body => "body",
            AnchorKind::ArmLeft => "arm_left",
            AnchorKind::ArmRight => "arm_right",
            AnchorKind::LegLeft => "leg_left",
            AnchorKind::LegRight => "leg_right",
            AnchorKind::EyeLeft => "eye_left",
            AnchorKind::EyeRight => "eye_right",
            AnchorKind::Heart => "heart",
            AnchorKind::Lungs => "lungs",
            AnchorKind::Liver => "liver",
            AnchorKind::Stomach => "stomach",
            AnchorKind::Intestine => "intestine",
            AnchorKind::KidneyLeft => "kidney_left",
            AnchorKind::KidneyRight => "kidney_right",
            AnchorKind::Bladder => "bladder",
        }
    }

    /// Cell type formed inside the anchor. The early embryo disc forms none.
    pub fn target(self) -> Option<CellType> {
        Some(match self {
            AnchorKind::Embryo => return None,
            AnchorKind::Head => CellType::Head,
            AnchorKind::Brain => CellType::Brain,
            AnchorKind::Body => CellType::Body,
            AnchorKind::ArmLeft => CellType::ArmLeft,
            AnchorKind::ArmRight => CellType::ArmRight,
            AnchorKind::LegLeft => CellType::LegLeft,
            AnchorKind::LegRight => CellType::LegRight,
            AnchorKind::EyeLeft | AnchorKind::EyeRight => CellType::Eye,
            AnchorKind::Heart => CellType::Heart,
            AnchorKind::Lungs => CellType::Lung,
            AnchorKind::Liver => CellType::Liver,
            AnchorKind::Stomach => CellType::Stomach,
            AnchorKind::Intestine => CellType::Intestine,
            AnchorKind::KidneyLeft | AnchorKind::KidneyRight => CellType::Kidney,
            AnchorKind::Bladder => CellType::Bladder,
        })
    }

    /// First week in which the structure may start to form.
    pub fn min_week(self) -> u32 {
        match self {
            AnchorKind::Embryo => 1,
            AnchorKind::Head | AnchorKind::Body => 3,
            AnchorKind::Heart | AnchorKind::EyeLeft | AnchorKind::EyeRight => 5,
            AnchorKind::Lungs | AnchorKind::Liver => 6,
            AnchorKind::ArmLeft | AnchorKind::ArmRight => 6,
            AnchorKind::LegLeft | AnchorKind::LegRight | AnchorKind::Stomach => 7,
            AnchorKind::Intestine => 8,
            AnchorKind::Brain | AnchorKind::KidneyLeft | AnchorKind::KidneyRight => 9,
            AnchorKind::Bladder => 10,
        }
    }

    /// Scoring weight used when agents choose between overlapping anchors.
    pub fn priority(self) -> f64 {
        match self {
            AnchorKind::Embryo => 0.0,
            AnchorKind::Head => 100.0,
            AnchorKind::Brain => 95.0,
            AnchorKind::Body => 50.0,
            AnchorKind::ArmLeft
            | AnchorKind::ArmRight
            | AnchorKind::LegLeft
            | AnchorKind::LegRight => 40.0,
            AnchorKind::EyeLeft | AnchorKind::EyeRight => 35.0,
            AnchorKind::Heart => 30.0,
            AnchorKind::Liver | AnchorKind::Lungs => 25.0,
            AnchorKind::Stomach
            | AnchorKind::Intestine
            | AnchorKind::KidneyLeft
            | AnchorKind::KidneyRight => 20.0,
            AnchorKind::Bladder => 15.0,
        }
    }

    /// Multiplier on the lattice differentiation rate.
    pub fn lattice_factor(self) -> f64 {
        match self {
            AnchorKind::Embryo => 0.0,
            AnchorKind::Head => 1.0,
            AnchorKind::Brain => 0.55,
            AnchorKind::Body => 0.85,
            AnchorKind::ArmLeft
            | AnchorKind::ArmRight
            | AnchorKind::LegLeft
            | AnchorKind::LegRight => 0.6,
            AnchorKind::EyeLeft | AnchorKind::EyeRight => 0.9,
            AnchorKind::Heart => 1.3,
            AnchorKind::Lungs => 0.9,
            AnchorKind::Liver => 1.0,
            AnchorKind::Stomach => 0.9,
            AnchorKind::Intestine => 0.8,
            AnchorKind::KidneyLeft | AnchorKind::KidneyRight => 0.7,
            AnchorKind::Bladder => 0.7,
        }
    }

    pub fn shape(self) -> AnchorShape {
        match self {
            AnchorKind::ArmLeft | AnchorKind::ArmRight => AnchorShape::Arm,
            AnchorKind::LegLeft | AnchorKind::LegRight => AnchorShape::Leg,
            _ => AnchorShape::Round,
        }
    }

    /// Whether the head morphogen (rather than the body one) drives it.
    pub fn is_head_driven(self) -> bool {
        matches!(
            self,
            AnchorKind::Head | AnchorKind::Brain | AnchorKind::EyeLeft | AnchorKind::EyeRight
        )
    }

    #[inline]
    pub fn is_active(self, week: u32) -> bool {
        self.target().is_some() && week >= self.min_week()
    }
}

impl std::fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Anchor {
    #[inline]
    pub fn distance(&self, shape: AnchorShape, x: f64, y: f64) -> f64 {
        shape.distance(x - self.x, y - self.y)
    }
}

/// Vertical cord below the body, from `start_y` down to `end_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UmbilicalPath {
    pub x: f64,
    pub start_y: f64,
    pub end_y: f64,
}

impl UmbilicalPath {
    pub fn length(&self) -> f64 {
        self.end_y - self.start_y
    }

    /// Distance from a point to the cord segment.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let cy = y.clamp(self.start_y, self.end_y);
        (x - self.x).hypot(y - cy)
    }

    /// Integer sites along the cord: `round(start_y)..round(end_y)` at
    /// column `round(x)`.
    pub fn sites(&self) -> impl Iterator<Item = (i64, i64)> {
        let x = self.x.round() as i64;
        (self.start_y.round() as i64..self.end_y.round() as i64).map(move |y| (x, y))
    }
}

/// Placement of the canonical layout onto a tissue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub cx: f64,
    pub cy: f64,
    pub scale: f64,
}

impl Frame {
    pub fn canonical() -> Self {
        Self {
            cx: CANONICAL_EXTENT / 2.0,
            cy: CANONICAL_EXTENT / 2.0,
            scale: 1.0,
        }
    }

    /// Center site `size / 2`, one site per `600 / size` canonical units.
    pub fn for_lattice(size: usize) -> Self {
        let center = (size / 2) as f64;
        Self {
            cx: center,
            cy: center,
            scale: size as f64 / CANONICAL_EXTENT,
        }
    }

    pub fn for_area(width: f64, height: f64) -> Self {
        Self {
            cx: width / 2.0,
            cy: height / 2.0,
            scale: width.min(height) / CANONICAL_EXTENT,
        }
    }

    #[inline]
    fn point(&self, dx: f64, dy: f64) -> (f64, f64) {
        (self.cx + dx * self.scale, self.cy + dy * self.scale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnatomicalTemplate {
    week: u32,
    anchors: BTreeMap<AnchorKind, Anchor>,
    umbilical: Option<UmbilicalPath>,
}

/// Template in the canonical 600 x 600 frame.
pub fn template_for(week: u32) -> AnatomicalTemplate {
    AnatomicalTemplate::for_week(week, &Frame::canonical())
}

/// Bucket number of a week (0 for weeks 1-2 up to 9 for weeks 37+).
pub fn bucket_index(week: u32) -> u8 {
    match week {
        0..=2 => 0,
        3..=8 => 1,
        9..=12 => 2,
        13..=16 => 3,
        17..=20 => 4,
        21..=24 => 5,
        25..=28 => 6,
        29..=32 => 7,
        33..=36 => 8,
        _ => 9,
    }
}

impl AnatomicalTemplate {
    pub fn for_week(week: u32, frame: &Frame) -> Self {
        let week = week.max(1);
        let layout = Layout::for_week(week);
        let anchors = layout
            .anchors
            .iter()
            .map(|&(kind, dx, dy, r)| {
                let (x, y) = frame.point(dx, dy);
                (
                    kind,
                    Anchor {
                        x,
                        y,
                        radius: r * frame.scale,
                    },
                )
            })
            .collect();
        let umbilical = layout.cord.map(|(start, length)| {
            let (x, start_y) = frame.point(0.0, start);
            UmbilicalPath {
                x,
                start_y,
                end_y: start_y + length * frame.scale,
            }
        });
        Self {
            week,
            anchors,
            umbilical,
        }
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn get(&self, kind: AnchorKind) -> Option<&Anchor> {
        self.anchors.get(&kind)
    }

    pub fn contains(&self, kind: AnchorKind) -> bool {
        self.anchors.contains_key(&kind)
    }

    /// Anchors in visiting order.
    pub fn anchors(&self) -> impl Iterator<Item = (AnchorKind, &Anchor)> {
        self.anchors.iter().map(|(k, a)| (*k, a))
    }

    /// Anchors whose target may form at this template's week.
    pub fn active(&self) -> impl Iterator<Item = (AnchorKind, &Anchor)> {
        let week = self.week;
        self.anchors().filter(move |(k, _)| k.is_active(week))
    }

    pub fn umbilical(&self) -> Option<&UmbilicalPath> {
        self.umbilical.as_ref()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// `name -> (x, y, radius)` view.
    pub fn to_named(&self) -> BTreeMap<&'static str, (f64, f64, f64)> {
        self.anchors
            .iter()
            .map(|(k, a)| (k.name(), (a.x, a.y, a.radius)))
            .collect()
    }
}

/// Relative layout of one week: `(kind, dx, dy, radius)` plus the cord
/// `(start offset, length)`.
struct Layout {
    anchors: Vec<(AnchorKind, f64, f64, f64)>,
    cord: Option<(f64, f64)>,
}

#[inline]
fn grow(base: f64, gain: f64, growth: f64) -> f64 {
    base + (gain * growth).floor()
}

impl Layout {
    fn put(&mut self, kind: AnchorKind, dx: f64, dy: f64, radius: f64) {
        self.anchors.push((kind, dx, dy, radius));
    }

    fn pair(&mut self, kinds: (AnchorKind, AnchorKind), dx: f64, dy: f64, radius: f64) {
        self.put(kinds.0, -dx, dy, radius);
        self.put(kinds.1, dx, dy, radius);
    }

    fn for_week(week: u32) -> Self {
        use AnchorKind::*;
        let mut t = Layout {
            anchors: Vec::with_capacity(AnchorKind::ALL.len()),
            cord: None,
        };
        let w = f64::from(week);
        let arms = (ArmLeft, ArmRight);
        let legs = (LegLeft, LegRight);
        let eyes = (EyeLeft, EyeRight);
        let kidneys = (KidneyLeft, KidneyRight);

        match bucket_index(week) {
            0 => {
                t.put(Embryo, 0.0, 0.0, 15.0 + w * 3.0);
            }
            1 => {
                let g = (w - 2.0) / 6.0;
                let head_dy = -20.0 - 15.0 * g;
                t.put(Head, 0.0, head_dy, grow(20.0, 12.0, g));
                t.put(Body, 0.0, 5.0 + 10.0 * g, grow(25.0, 20.0, g));
                t.pair(arms, 40.0, -5.0, grow(12.0, 3.0, g));
                t.pair(legs, 22.0, 40.0, grow(12.0, 3.0, g));
                t.pair(eyes, 8.0, head_dy - 5.0, 3.0);
                t.put(Heart, -8.0, 8.0, grow(10.0, 5.0, g));
                t.put(Lungs, 6.0, -2.0, grow(8.0, 4.0, g));
                t.put(Liver, 12.0, 10.0, grow(8.0, 3.0, g));
                t.put(Stomach, -4.0, 16.0, grow(6.0, 3.0, g));
                t.put(Intestine, 4.0, 22.0, grow(8.0, 4.0, g));
            }
            2 => {
                let g = (w - 8.0) / 4.0;
                t.put(Head, 0.0, -70.0, grow(35.0, 10.0, g));
                t.put(Brain, 0.0, -70.0, grow(18.0, 6.0, g));
                t.put(Body, 0.0, 0.0, grow(50.0, 12.0, g));
                t.pair(arms, 50.0, -25.0, grow(20.0, 5.0, g));
                t.pair(legs, 22.0, 45.0, grow(22.0, 5.0, g));
                t.pair(eyes, 10.0, -75.0, 4.0);
                t.put(Heart, -15.0, -24.0, grow(8.0, 2.0, g));
                t.put(Lungs, 0.0, -32.0, grow(15.0, 3.0, g));
                t.put(Liver, 18.0, -18.0, grow(8.0, 2.0, g));
                t.put(Stomach, -10.0, -5.0, grow(13.0, 3.0, g));
                t.put(Intestine, 8.0, 8.0, grow(16.0, 4.0, g));
                t.pair(kidneys, 22.0, -10.0, grow(8.0, 2.0, g));
                t.put(Bladder, 0.0, 22.0, grow(11.0, 2.0, g));
                t.cord = Some((64.0, grow(40.0, 8.0, g)));
            }
            3 => {
                let g = (w - 12.0) / 4.0;
                t.put(Head, 0.0, -90.0, grow(45.0, 8.0, g));
                t.put(Brain, 0.0, -90.0, grow(22.0, 6.0, g));
                t.put(Body, 0.0, 0.0, grow(60.0, 15.0, g));
                t.pair(arms, 60.0, -30.0, grow(24.0, 6.0, g));
                t.pair(legs, 24.0, 55.0, grow(26.0, 6.0, g));
                t.pair(eyes, 12.0, -98.0, grow(4.0, 1.0, g));
                t.put(Heart, -18.0, -38.0, grow(16.0, 3.0, g));
                t.put(Lungs, 0.0, -40.0, grow(17.0, 3.0, g));
                t.put(Liver, 22.0, -22.0, grow(19.0, 4.0, g));
                t.put(Stomach, -12.0, -8.0, grow(15.0, 3.0, g));
                t.put(Intestine, 10.0, 10.0, grow(18.0, 4.0, g));
                t.pair(kidneys, 26.0, -12.0, grow(10.0, 2.0, g));
                t.put(Bladder, 0.0, 28.0, grow(12.0, 2.0, g));
                t.cord = Some((64.0, grow(56.0, 8.0, g)));
            }
            4 => {
                let g = (w - 16.0) / 4.0;
                t.put(Head, 0.0, -105.0, grow(50.0, 8.0, g));
                t.put(Brain, 0.0, -105.0, grow(26.0, 6.0, g));
                t.put(Body, 0.0, 5.0, grow(70.0, 12.0, g));
                t.pair(arms, 68.0, -35.0, grow(28.0, 6.0, g));
                t.pair(legs, 26.0, 65.0, grow(30.0, 6.0, g));
                t.pair(eyes, 14.0, -113.0, 5.0);
                t.put(Heart, -20.0, -45.0, grow(18.0, 3.0, g));
                t.put(Lungs, 0.0, -48.0, grow(20.0, 3.0, g));
                t.put(Liver, 26.0, -28.0, grow(22.0, 4.0, g));
                t.put(Stomach, -14.0, -12.0, grow(16.0, 3.0, g));
                t.put(Intestine, 12.0, 14.0, grow(22.0, 4.0, g));
                t.pair(kidneys, 28.0, -16.0, grow(11.0, 2.0, g));
                t.put(Bladder, 0.0, 34.0, grow(13.0, 2.0, g));
                t.cord = Some((64.0, grow(68.0, 8.0, g)));
            }
            5 => {
                let g = (w - 20.0) / 4.0;
                t.put(Head, 0.0, -115.0, grow(55.0, 8.0, g));
                t.put(Brain, 0.0, -115.0, grow(30.0, 8.0, g));
                t.put(Body, 0.0, 8.0, grow(78.0, 12.0, g));
                t.pair(arms, 72.0, -38.0, grow(32.0, 6.0, g));
                t.pair(legs, 28.0, 72.0, grow(34.0, 6.0, g));
                t.pair(eyes, 16.0, -123.0, grow(5.0, 1.0, g));
                t.put(Heart, -22.0, -50.0, grow(20.0, 3.0, g));
                t.put(Lungs, 0.0, -52.0, grow(22.0, 4.0, g));
                t.put(Liver, 28.0, -32.0, grow(24.0, 4.0, g));
                t.put(Stomach, -16.0, -15.0, grow(18.0, 3.0, g));
                t.put(Intestine, 14.0, 16.0, grow(24.0, 4.0, g));
                t.pair(kidneys, 30.0, -18.0, grow(12.0, 2.0, g));
                t.put(Bladder, 0.0, 38.0, grow(14.0, 2.0, g));
                t.cord = Some((64.0, grow(80.0, 4.0, g)));
            }
            6 => {
                let g = (w - 24.0) / 4.0;
                t.put(Head, 0.0, -125.0, grow(60.0, 8.0, g));
                t.put(Brain, 0.0, -125.0, grow(35.0, 5.0, g));
                t.put(Body, 0.0, 10.0, grow(85.0, 12.0, g));
                t.pair(arms, 76.0, -42.0, grow(36.0, 6.0, g));
                t.pair(legs, 30.0, 78.0, grow(38.0, 6.0, g));
                t.pair(eyes, 17.0, -133.0, 6.0);
                t.put(Heart, -24.0, -54.0, grow(22.0, 2.0, g));
                t.put(Lungs, 0.0, -56.0, grow(25.0, 5.0, g));
                t.put(Liver, 30.0, -35.0, grow(26.0, 3.0, g));
                t.put(Stomach, -17.0, -18.0, grow(19.0, 2.0, g));
                t.put(Intestine, 15.0, 18.0, grow(26.0, 3.0, g));
                t.pair(kidneys, 32.0, -20.0, grow(13.0, 2.0, g));
                t.put(Bladder, 0.0, 40.0, grow(15.0, 2.0, g));
                t.cord = Some((64.0, grow(84.0, 4.0, g)));
            }
            7 => {
                let g = (w - 28.0) / 4.0;
                t.put(Head, 0.0, -135.0, grow(65.0, 8.0, g));
                t.put(Brain, 0.0, -135.0, grow(38.0, 6.0, g));
                t.put(Body, 0.0, 12.0, grow(92.0, 12.0, g));
                t.pair(arms, 78.0, -45.0, grow(40.0, 6.0, g));
                t.pair(legs, 32.0, 85.0, grow(42.0, 6.0, g));
                t.pair(eyes, 18.0, -143.0, 6.0);
                t.put(Heart, -25.0, -57.0, grow(23.0, 2.0, g));
                t.put(Lungs, 0.0, -60.0, grow(28.0, 3.0, g));
                t.put(Liver, 32.0, -37.0, grow(28.0, 3.0, g));
                t.put(Stomach, -18.0, -20.0, grow(20.0, 2.0, g));
                t.put(Intestine, 16.0, 20.0, grow(28.0, 3.0, g));
                t.pair(kidneys, 34.0, -22.0, grow(14.0, 2.0, g));
                t.put(Bladder, 0.0, 43.0, grow(16.0, 2.0, g));
                t.cord = Some((64.0, 88.0));
            }
            8 => {
                let g = (w - 32.0) / 4.0;
                t.put(Head, 0.0, -145.0, grow(70.0, 8.0, g));
                t.put(Brain, 0.0, -145.0, grow(42.0, 6.0, g));
                t.put(Body, 0.0, 15.0, grow(100.0, 12.0, g));
                t.pair(arms, 80.0, -48.0, grow(44.0, 6.0, g));
                t.pair(legs, 34.0, 92.0, grow(46.0, 6.0, g));
                t.pair(eyes, 19.0, -153.0, 6.0);
                t.put(Heart, -26.0, -60.0, 24.0);
                t.put(Lungs, 0.0, -63.0, 30.0);
                t.put(Liver, 34.0, -40.0, 30.0);
                t.put(Stomach, -19.0, -22.0, 21.0);
                t.put(Intestine, 17.0, 22.0, 30.0);
                t.pair(kidneys, 36.0, -24.0, 15.0);
                t.put(Bladder, 0.0, 45.0, 17.0);
                t.cord = Some((64.0, 88.0));
            }
            _ => {
                let g = ((w - 36.0) / 4.0).min(1.0);
                t.put(Head, 0.0, -150.0, grow(75.0, 10.0, g));
                t.put(Brain, 0.0, -150.0, grow(46.0, 8.0, g));
                t.put(Body, 0.0, 18.0, grow(108.0, 15.0, g));
                t.pair(arms, 82.0, -50.0, grow(48.0, 8.0, g));
                t.pair(legs, 36.0, 98.0, grow(50.0, 10.0, g));
                t.pair(eyes, 20.0, -158.0, 6.0);
                t.put(Heart, -27.0, -62.0, 25.0);
                t.put(Lungs, 0.0, -65.0, 32.0);
                t.put(Liver, 36.0, -42.0, 32.0);
                t.put(Stomach, -20.0, -24.0, 22.0);
                t.put(Intestine, 18.0, 24.0, 32.0);
                t.pair(kidneys, 38.0, -26.0, 16.0);
                t.put(Bladder, 0.0, 48.0, 18.0);
                t.cord = Some((64.0, 88.0));
            }
        }
        t
    }
}
