//! Scrollbar thumb geometry.

use trellis_render::{Point, Rect};

/// Scrollbar orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Part of a scrollbar under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBarPart {
    /// The draggable thumb.
    Thumb,
    /// Track before the thumb (pages toward the start).
    TrackBefore,
    /// Track after the thumb (pages toward the end).
    TrackAfter,
}

/// Geometry of one scrollbar for the current scroll value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBarGeometry {
    pub orientation: Orientation,
    /// Full track rectangle in grid-local coordinates.
    pub track: Rect,
    /// Current scroll value in `0..=maximum`.
    pub value: f32,
    pub maximum: f32,
    /// Visible extent of the content, in content units.
    pub visible: f32,
    /// Total extent of the content, in content units.
    pub total: f32,
    pub min_thumb_size: f32,
}

impl ScrollBarGeometry {
    fn track_start(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.track.left(),
            Orientation::Vertical => self.track.top(),
        }
    }

    fn track_length(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.track.width(),
            Orientation::Vertical => self.track.height(),
        }
    }

    /// Thumb length along the track.
    pub fn thumb_length(&self) -> f32 {
        let track_length = self.track_length();
        if self.total <= 0.0 {
            return track_length;
        }
        let ratio = (self.visible / self.total).clamp(0.0, 1.0);
        (track_length * ratio)
            .max(self.min_thumb_size)
            .min(track_length)
    }

    /// Distance the thumb can travel along the track.
    pub fn travel(&self) -> f32 {
        (self.track_length() - self.thumb_length()).max(0.0)
    }

    /// Thumb offset from the track start.
    pub fn thumb_offset(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        (self.value / self.maximum).clamp(0.0, 1.0) * self.travel()
    }

    /// The thumb rectangle.
    pub fn thumb_rect(&self) -> Rect {
        let offset = self.thumb_offset();
        let length = self.thumb_length();
        match self.orientation {
            Orientation::Horizontal => Rect::new(
                self.track.left() + offset,
                self.track.top(),
                length,
                self.track.height(),
            ),
            Orientation::Vertical => Rect::new(
                self.track.left(),
                self.track.top() + offset,
                self.track.width(),
                length,
            ),
        }
    }

    /// Which part of the bar contains `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<ScrollBarPart> {
        if !self.track.contains(point) {
            return None;
        }
        let thumb = self.thumb_rect();
        if thumb.contains(point) {
            return Some(ScrollBarPart::Thumb);
        }
        let before = match self.orientation {
            Orientation::Horizontal => point.x < thumb.left(),
            Orientation::Vertical => point.y < thumb.top(),
        };
        Some(if before {
            ScrollBarPart::TrackBefore
        } else {
            ScrollBarPart::TrackAfter
        })
    }

    /// Pointer coordinate along this bar's axis.
    pub fn axis(&self, point: Point) -> f32 {
        match self.orientation {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Offset of the pointer from the thumb start, used to keep the grab
    /// point fixed while dragging.
    pub fn grab_offset(&self, point: Point) -> f32 {
        self.axis(point) - (self.track_start() + self.thumb_offset())
    }

    /// Scroll value that puts the thumb start at `axis - grab_offset`.
    pub fn value_for_drag(&self, axis: f32, grab_offset: f32) -> f32 {
        let travel = self.travel();
        if travel <= 0.0 || self.maximum <= 0.0 {
            return 0.0;
        }
        let offset = (axis - grab_offset - self.track_start()).clamp(0.0, travel);
        offset / travel * self.maximum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical(value: f32) -> ScrollBarGeometry {
        ScrollBarGeometry {
            orientation: Orientation::Vertical,
            track: Rect::new(100.0, 20.0, 10.0, 200.0),
            value,
            maximum: 30.0,
            visible: 10.0,
            total: 40.0,
            min_thumb_size: 20.0,
        }
    }

    #[test]
    fn test_thumb_is_proportional() {
        let bar = vertical(0.0);
        assert_eq!(bar.thumb_length(), 50.0);
        assert_eq!(bar.thumb_rect(), Rect::new(100.0, 20.0, 10.0, 50.0));

        let bar = vertical(30.0);
        assert_eq!(bar.thumb_rect().bottom(), 220.0);
    }

    #[test]
    fn test_thumb_respects_minimum_and_track() {
        let mut bar = vertical(0.0);
        bar.total = 10_000.0;
        assert_eq!(bar.thumb_length(), 20.0);

        bar.min_thumb_size = 500.0;
        assert_eq!(bar.thumb_length(), 200.0);
        assert_eq!(bar.travel(), 0.0);
    }

    #[test]
    fn test_parts() {
        let bar = vertical(15.0);
        // thumb spans 95..145
        assert_eq!(bar.hit_test(Point::new(105.0, 100.0)), Some(ScrollBarPart::Thumb));
        assert_eq!(bar.hit_test(Point::new(105.0, 30.0)), Some(ScrollBarPart::TrackBefore));
        assert_eq!(bar.hit_test(Point::new(105.0, 200.0)), Some(ScrollBarPart::TrackAfter));
        assert_eq!(bar.hit_test(Point::new(90.0, 100.0)), None);
    }

    #[test]
    fn test_drag_keeps_grab_point() {
        let bar = vertical(0.0);
        let grab = bar.grab_offset(Point::new(105.0, 30.0));
        assert_eq!(grab, 10.0);
        assert_eq!(bar.value_for_drag(30.0, grab), 0.0);
        assert_eq!(bar.value_for_drag(105.0, grab), 15.0);
        assert_eq!(bar.value_for_drag(1_000.0, grab), 30.0);
        assert_eq!(bar.value_for_drag(-50.0, grab), 0.0);
    }
}
