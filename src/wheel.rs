pub const FULL_TURN: f64 = 360.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub hue: f64,
}

impl Segment {
    /// Angle of the slice bisector, where the label is drawn.
    pub fn label_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Angular width of one slice in degrees, `None` for an empty wheel.
pub fn segment_angle(count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(FULL_TURN / count as f64)
    }
}

pub fn segment_hue(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 * FULL_TURN / count as f64
}

/// Slices in canvas order, angles in radians.
pub fn layout(count: usize) -> Vec<Segment> {
    let Some(angle) = segment_angle(count) else {
        return Vec::new();
    };

    (0..count)
        .map(|index| Segment {
            start: (index as f64 * angle).to_radians(),
            end: ((index + 1) as f64 * angle).to_radians(),
            hue: segment_hue(index, count),
        })
        .collect()
}

pub fn normalize_degrees(degrees: f64) -> f64 {
    let angle = degrees.rem_euclid(FULL_TURN);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if angle >= FULL_TURN {
        0.0
    } else {
        angle
    }
}

/// Index of the participant under the pointer once the wheel rests at
/// `rotation` degrees. Slices are counted backwards from the pointer.
pub fn winner_index(rotation: f64, count: usize, pointer_angle: f64) -> Option<usize> {
    let angle = segment_angle(count)?;
    if !rotation.is_finite() {
        return None;
    }

    let corrected = normalize_degrees(normalize_degrees(rotation) + pointer_angle);
    let from_pointer = ((corrected / angle).floor() as usize).min(count - 1);
    Some((count - 1 - from_pointer) % count)
}
