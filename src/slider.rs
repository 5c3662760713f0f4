//! A one-dimensional drag slider that picks an integer in `0..=max_characters`.
//!
//! The selector holds no reference to any UI toolkit; the host feeds it pointer positions and
//! reads back the thumb offset and the value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel dimensions of the slider track and its thumb.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Geometry {
    pub track_width: f64,
    pub thumb_width: f64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SliderError {
    #[error("the slider needs at least one character to select")]
    NoCharacters,
    #[error("slider widths must be finite and non-negative (track {track_width}, thumb {thumb_width})")]
    BadWidth { track_width: f64, thumb_width: f64 },
    #[error("the thumb ({thumb_width}px) is wider than the track ({track_width}px)")]
    ThumbWiderThanTrack { track_width: f64, thumb_width: f64 },
    #[error(
        "a {track_width}px track cannot hold {max_characters} characters (each step would be \
         {step}px)"
    )]
    NonPositiveStep {
        track_width: f64,
        max_characters: u32,
        step: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Dragging { last_pointer_x: f64 },
}

/// Tracks a thumb dragged along a track, reporting the selected value through a callback.
pub struct RangeSelector<F> {
    max_characters: u32,
    min_offset: f64,
    max_offset: f64,
    step: f64,
    offset: f64,
    value: u32,
    state: DragState,
    on_change: F,
}

impl<F> RangeSelector<F>
where
    F: FnMut(u32),
{
    pub fn new(
        geometry: Geometry,
        max_characters: u32,
        on_change: F,
    ) -> Result<RangeSelector<F>, SliderError> {
        let Geometry {
            track_width,
            thumb_width,
        } = geometry;
        if max_characters == 0 {
            return Err(SliderError::NoCharacters);
        }
        let widths_ok = track_width.is_finite()
            && thumb_width.is_finite()
            && track_width >= 0.0
            && thumb_width >= 0.0;
        if !widths_ok {
            return Err(SliderError::BadWidth {
                track_width,
                thumb_width,
            });
        }
        if thumb_width > track_width {
            return Err(SliderError::ThumbWiderThanTrack {
                track_width,
                thumb_width,
            });
        }
        // Not `track_width / max_characters`: one pixel is taken off the per-character width.
        let step = track_width / f64::from(max_characters) - 1.0;
        if step <= 0.0 {
            return Err(SliderError::NonPositiveStep {
                track_width,
                max_characters,
                step,
            });
        }
        Ok(RangeSelector {
            max_characters,
            min_offset: 0.0,
            max_offset: track_width - thumb_width,
            step,
            offset: 0.0,
            value: 0,
            state: DragState::Idle,
            on_change,
        })
    }

    /// Start a drag at the given pointer position. Ignored while a drag is already running.
    pub fn begin(&mut self, pointer_x: f64) {
        if let DragState::Idle = self.state {
            self.state = DragState::Dragging {
                last_pointer_x: pointer_x,
            };
        }
    }

    /// Move the pointer during a drag.
    ///
    /// A move that would put the thumb outside the track is dropped whole: the thumb is not
    /// clamped to the edge, and the pointer origin stays where it was. Returns whether the move
    /// was applied.
    pub fn move_to(&mut self, pointer_x: f64) -> bool {
        let last_pointer_x = match self.state {
            DragState::Idle => return false,
            DragState::Dragging { last_pointer_x } => last_pointer_x,
        };
        let proposed = self.offset + (pointer_x - last_pointer_x);
        if proposed < self.min_offset || proposed > self.max_offset {
            return false;
        }

        self.offset = proposed;
        self.value = (proposed / self.step).round() as u32;
        self.state = DragState::Dragging {
            last_pointer_x: pointer_x,
        };
        (self.on_change)(self.value);
        true
    }

    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }
}

impl<F> RangeSelector<F> {
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max_characters(&self) -> u32 {
        self.max_characters
    }

    /// Thumb position from the left end of the track, in pixels.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Width of the filled part of the track to the left of the thumb.
    pub fn left_track_width(&self) -> f64 {
        self.offset
    }

    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}

impl<F> fmt::Debug for RangeSelector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSelector")
            .field("max_characters", &self.max_characters)
            .field("offset", &self.offset)
            .field("value", &self.value)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
