//! WHO hand-rub gesture catalog.
//!
//! The order of [`GESTURES`] is the order a session walks through; ids are
//! 1-based and match the position in the slice.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Gesture {
    pub id: u8,
    pub name: &'static str,
    /// Asset reference for the illustration; resolved by whatever renders it.
    pub image: &'static str,
    pub description: &'static str,
}

pub const GESTURES: [Gesture; 6] = [
    Gesture {
        id: 1,
        name: "Palm to Palm",
        image: "gesture-palm-to-palm.png",
        description: "Rub palms together",
    },
    Gesture {
        id: 2,
        name: "Palm Over Dorsum",
        image: "gesture-palm-over-dorsum.png",
        description: "Right palm over left hand",
    },
    Gesture {
        id: 3,
        name: "Fingers Interlaced",
        image: "gesture-fingers-interlaced.png",
        description: "Interlock fingers",
    },
    Gesture {
        id: 4,
        name: "Backs of Fingers",
        image: "gesture-backs-of-fingers.png",
        description: "Lock fingers and rub backs",
    },
    Gesture {
        id: 5,
        name: "Thumb Rotation",
        image: "gesture-thumb-rub.png",
        description: "Rotate thumbs in palms",
    },
    Gesture {
        id: 6,
        name: "Fingertips Rotation",
        image: "gesture-fingertips-rub.png",
        description: "Rotate fingertips in palms",
    },
];

pub fn gesture_count() -> usize {
    GESTURES.len()
}

pub fn gesture_at(step: usize) -> Option<&'static Gesture> {
    GESTURES.get(step)
}

/// The gesture after `step`, or `None` on the last one.
pub fn next_after(step: usize) -> Option<&'static Gesture> {
    GESTURES.get(step + 1)
}

pub fn is_last(step: usize) -> bool {
    step + 1 >= GESTURES.len()
}
