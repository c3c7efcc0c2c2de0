/// Highest heading level the outline and the accessibility roles support.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Keeps heading levels continuous while a document is assembled.
///
/// The first heading is always level 1 and no heading may sit more than one
/// level below the previous one. Out-of-range requests are corrected and logged
/// instead of rejected.
#[derive(Debug, Clone, Default)]
pub struct HeadingLevelTracker {
    last_level: u8,
}

impl HeadingLevelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The level of the last accepted heading; 0 before the first one.
    pub fn last_level(&self) -> u8 {
        self.last_level
    }

    /// Accepts a heading at `requested` and returns the level it must be given.
    pub fn next(&mut self, requested: u8) -> u8 {
        let clamped = requested.clamp(1, MAX_HEADING_LEVEL);
        if clamped != requested {
            log::warn!(
                "Heading level {} is out of range, using {} instead",
                requested,
                clamped
            );
        }

        let accepted = if clamped == 1 {
            1
        } else if self.last_level == 0 {
            log::warn!(
                "Document starts with a level {} heading, correcting it to level 1",
                clamped
            );
            1
        } else if clamped <= self.last_level + 1 {
            clamped
        } else {
            let corrected = self.last_level + 1;
            log::warn!(
                "Heading level {} follows level {}, correcting it to level {}",
                clamped,
                self.last_level,
                corrected
            );
            corrected
        };

        self.last_level = accepted;
        accepted
    }
}
